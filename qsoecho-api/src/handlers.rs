//! Endpoint handlers
//!
//! Each handler gets the fully read body and either returns the success
//! text or the error that rejects the request.

use qsoecho_core::payload::{QsoUploadRequest, RadioRequest, RawDecodeRequest};
use qsoecho_core::Result;

/// Body of every successful response
pub const OK_BODY: &str = "OK";

/// Handle POST /adif
pub fn submit_adif(body: &[u8]) -> Result<&'static str> {
    let request = QsoUploadRequest::from_json(body)?;
    tracing::info!("ADIF: {:?}", request);
    Ok(OK_BODY)
}

/// Handle POST /decode
pub fn decode_raw(body: &[u8]) -> Result<&'static str> {
    let raw = RawDecodeRequest::new(body);
    tracing::debug!("Decode passthrough, {} bytes", raw.len());
    tracing::info!("{}", raw.text());
    Ok(OK_BODY)
}

/// Handle POST /radio
pub fn report_radio(body: &[u8]) -> Result<&'static str> {
    let request = RadioRequest::from_json(body)?;
    tracing::info!("Radio: {}", request.trace());
    Ok(OK_BODY)
}

#[cfg(test)]
mod tests {
    use super::*;
    use qsoecho_core::Error;

    #[test]
    fn test_submit_adif() {
        assert_eq!(submit_adif(br#"{"adif":"<CALL:4>N0CALL<EOR>","timestamp":1690000000}"#).unwrap(), "OK");
        assert!(matches!(submit_adif(b"{}"), Err(Error::Validation(_))));
    }

    #[test]
    fn test_decode_never_validates() {
        assert_eq!(decode_raw(b"").unwrap(), "OK");
        assert_eq!(decode_raw(b"{not json").unwrap(), "OK");
        assert_eq!(decode_raw(&[0xff, 0xfe, 0x00, 0x80]).unwrap(), "OK");
    }

    #[test]
    fn test_report_radio() {
        assert_eq!(report_radio(br#"{"radio":"IC-7300","frequency":14074000,"mode":"USB"}"#).unwrap(), "OK");
        assert!(matches!(report_radio(br#"{"radio":"IC-7300"}"#), Err(Error::Validation(_))));
    }
}

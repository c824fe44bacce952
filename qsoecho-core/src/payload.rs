//! Request payloads accepted by the debug server
//!
//! Each type lives for a single request. Parsing is strict on required
//! fields and lenient on unknown ones.

use serde::Deserialize;
use std::borrow::Cow;
use std::fmt;

use crate::error::{Error, Result};

/// Body of `POST /adif`
///
/// Capitalised key spellings are accepted alongside the lowercase ones.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct QsoUploadRequest {
    /// ADIF text of one or more QSO records
    #[serde(alias = "Adif", alias = "ADIF")]
    pub adif: String,

    /// Upload time as a unix epoch; seconds or milliseconds, the client decides
    #[serde(alias = "Timestamp")]
    pub timestamp: i64,
}

impl QsoUploadRequest {
    /// Parse and validate a JSON body
    pub fn from_json(body: &[u8]) -> Result<Self> {
        let request: Self = serde_json::from_slice(body)?;
        if request.adif.is_empty() {
            return Err(Error::Validation("field `adif` must not be empty".to_string()));
        }
        Ok(request)
    }
}

/// Body of `POST /decode`, never parsed
#[derive(Debug, Clone, Copy)]
pub struct RawDecodeRequest<'a> {
    body: &'a [u8],
}

impl<'a> RawDecodeRequest<'a> {
    pub fn new(body: &'a [u8]) -> Self {
        Self { body }
    }

    /// Body as UTF-8, with invalid sequences replaced
    pub fn text(&self) -> Cow<'a, str> {
        String::from_utf8_lossy(self.body)
    }

    pub fn len(&self) -> usize {
        self.body.len()
    }

    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }
}

/// Body of `POST /radio`
///
/// Optional fields stay `None` when omitted or sent as `null`, so a reported
/// rx frequency of `0` is kept apart from "not reported".
/// Keys are accepted in camelCase, snake_case and PascalCase.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct RadioRequest {
    /// Logbook API key, if the client sends one
    #[serde(default, alias = "Key")]
    pub key: Option<String>,

    /// Rig model or name
    #[serde(alias = "Radio")]
    pub radio: String,

    /// Transmit frequency in Hz
    #[serde(alias = "Frequency")]
    pub frequency: u64,

    /// Transmit mode
    #[serde(alias = "Mode")]
    pub mode: String,

    /// Receive frequency in Hz (split operation)
    #[serde(default, rename = "frequencyRx", alias = "frequency_rx", alias = "FrequencyRx")]
    pub frequency_rx: Option<u64>,

    /// Receive mode (split operation)
    #[serde(default, rename = "modeRx", alias = "mode_rx", alias = "ModeRx")]
    pub mode_rx: Option<String>,

    /// Transmit power in watts
    #[serde(default, alias = "Power")]
    pub power: Option<f32>,
}

impl RadioRequest {
    /// Parse and validate a JSON body
    pub fn from_json(body: &[u8]) -> Result<Self> {
        let request: Self = serde_json::from_slice(body)?;
        // serde narrows f64 to f32 with a cast, so out-of-range values arrive as inf
        if request.power.is_some_and(|p| !p.is_finite()) {
            return Err(Error::Validation("field `power` out of range for f32".to_string()));
        }
        Ok(request)
    }

    /// Field-by-field view used for the server trace
    pub fn trace(&self) -> RadioTrace<'_> {
        RadioTrace(self)
    }
}

/// Renders a [`RadioRequest`] one field at a time, writing `null` for every
/// optional field that was not reported. The API key is left out.
pub struct RadioTrace<'a>(&'a RadioRequest);

impl fmt::Display for RadioTrace<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let r = self.0;
        write!(
            f,
            "radio={} tx_freq={} tx_mode={} rx_freq={} rx_mode={} tx_power={}",
            r.radio,
            r.frequency,
            r.mode,
            OrNull(r.frequency_rx.as_ref()),
            OrNull(r.mode_rx.as_ref()),
            OrNull(r.power.as_ref()),
        )
    }
}

struct OrNull<'a, T>(Option<&'a T>);

impl<T: fmt::Display> fmt::Display for OrNull<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            Some(v) => v.fmt(f),
            None => f.write_str("null"),
        }
    }
}

//! API route definitions

use std::fmt;

use hyper::Method;
use qsoecho_core::Result;

use crate::handlers;

/// Endpoints served by the debug server
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    /// POST /adif
    Adif,
    /// POST /decode
    Decode,
    /// POST /radio
    Radio,
}

impl Route {
    /// Match a request line against the route table
    pub fn resolve(method: &Method, path: &str) -> Option<Self> {
        if *method != Method::POST {
            return None;
        }
        match path {
            "/adif" => Some(Route::Adif),
            "/decode" => Some(Route::Decode),
            "/radio" => Some(Route::Radio),
            _ => None,
        }
    }

    pub fn path(&self) -> &'static str {
        match self {
            Route::Adif => "/adif",
            Route::Decode => "/decode",
            Route::Radio => "/radio",
        }
    }

    /// Run the route's handler on a fully read body
    pub fn handle(&self, body: &[u8]) -> Result<&'static str> {
        match self {
            Route::Adif => handlers::submit_adif(body),
            Route::Decode => handlers::decode_raw(body),
            Route::Radio => handlers::report_radio(body),
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_post_routes() {
        assert_eq!(Route::resolve(&Method::POST, "/adif"), Some(Route::Adif));
        assert_eq!(Route::resolve(&Method::POST, "/decode"), Some(Route::Decode));
        assert_eq!(Route::resolve(&Method::POST, "/radio"), Some(Route::Radio));
    }

    #[test]
    fn test_resolve_rejects_other_methods() {
        assert_eq!(Route::resolve(&Method::GET, "/adif"), None);
        assert_eq!(Route::resolve(&Method::PUT, "/radio"), None);
    }

    #[test]
    fn test_resolve_unknown_paths() {
        assert_eq!(Route::resolve(&Method::POST, "/"), None);
        assert_eq!(Route::resolve(&Method::POST, "/adif/"), None);
        assert_eq!(Route::resolve(&Method::POST, "/Radio"), None);
    }

    #[test]
    fn test_display_is_path() {
        assert_eq!(Route::Radio.to_string(), "/radio");
    }
}

//! qsoecho Core Library
//!
//! Request payload types, configuration and the error type shared by the
//! qsoecho debug server crates.

pub mod config;
pub mod error;
pub mod payload;

pub use error::{Error, Result};

/// qsoecho version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

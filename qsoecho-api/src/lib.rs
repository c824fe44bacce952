//! qsoecho HTTP API
//!
//! Stateless JSON echo endpoints for exercising upload clients.

mod handlers;
pub mod routes;
pub mod server;

pub use server::{handle_request, run_echo_server, EchoServer, ServerContext};

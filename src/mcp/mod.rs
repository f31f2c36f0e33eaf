//! MCP serving surface: JSON-RPC 2.0 over stdio.

pub mod protocol;
pub mod server;

pub use server::run_stdio;

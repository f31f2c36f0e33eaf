//! taskbridge — credential-isolating MCP bridge for the Task API.
//!
//! Exposes the Task API's users, scheduled calls, and tasks as nine
//! schema-validated tools over MCP. The shared secret lives only in this
//! process: it is attached to every backend request and never appears in
//! anything returned to the calling model. Backend and transport failures
//! are logged in full internally and sanitized before they cross the wire.
//!
//! # Quick start
//!
//! ```no_run
//! use std::sync::Arc;
//! use taskbridge::backend::TaskApiClient;
//! use taskbridge::config::BridgeConfig;
//! use taskbridge::tools::ToolRegistry;
//!
//! # async fn example() -> taskbridge::error::Result<()> {
//! let config = BridgeConfig::from_env()?;
//! let client = Arc::new(TaskApiClient::new(&config)?);
//! let registry = ToolRegistry::bridge(client);
//! let text = registry
//!     .dispatch("list_users", serde_json::json!({}))
//!     .await?;
//! println!("{text}");
//! # Ok(())
//! # }
//! ```

pub mod backend;
pub mod config;
pub mod error;
pub mod mcp;
pub mod tools;

//! Tool Bridge: parameter contracts, validation, dispatch, formatting.

pub mod arguments;
pub mod bridge;
pub mod tool;
pub mod types;
pub mod validation;

pub use arguments::ToolArguments;
pub use bridge::{all_tools, ToolRegistry};
pub use tool::{BridgeTool, Tool};
pub use types::ToolParameters;

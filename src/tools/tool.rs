//! Tool trait and closure-based tool wrapper.

use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use async_trait::async_trait;

use super::arguments::ToolArguments;
use super::types::ToolParameters;
use crate::error::Result;

/// A named, schema-validated operation exposed to the calling client.
///
/// `execute` receives arguments that have already passed schema validation
/// and returns caller-facing text; it must never leak the credential or
/// transport-level error detail.
#[async_trait]
pub trait Tool: Send + Sync {
    /// Tool name (what the model invokes).
    fn name(&self) -> &str;

    /// Human-readable description shown to the model.
    fn description(&self) -> &str;

    /// Declared parameter schema.
    fn parameters(&self) -> &ToolParameters;

    /// Execute with validated arguments, returning the text payload.
    async fn execute(&self, args: &ToolArguments) -> Result<String>;
}

type ToolHandler =
    dyn Fn(ToolArguments) -> Pin<Box<dyn Future<Output = Result<String>> + Send>> + Send + Sync;

/// Closure-based tool; each bridge operation is one of these.
pub struct BridgeTool {
    name: String,
    description: String,
    parameters: ToolParameters,
    handler: Arc<ToolHandler>,
}

impl BridgeTool {
    /// Create a tool from a closure.
    pub fn new<F, Fut>(
        name: impl Into<String>,
        description: impl Into<String>,
        parameters: ToolParameters,
        handler: F,
    ) -> Self
    where
        F: Fn(ToolArguments) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<String>> + Send + 'static,
    {
        Self {
            name: name.into(),
            description: description.into(),
            parameters,
            handler: Arc::new(move |args| Box::pin(handler(args))),
        }
    }
}

#[async_trait]
impl Tool for BridgeTool {
    fn name(&self) -> &str {
        &self.name
    }

    fn description(&self) -> &str {
        &self.description
    }

    fn parameters(&self) -> &ToolParameters {
        &self.parameters
    }

    async fn execute(&self, args: &ToolArguments) -> Result<String> {
        (self.handler)(args.clone()).await
    }
}

impl std::fmt::Debug for BridgeTool {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BridgeTool")
            .field("name", &self.name)
            .field("description", &self.description)
            .finish()
    }
}

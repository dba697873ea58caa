//! Injected operation logger
//!
//! Providers take an explicit logger at construction instead of writing to a
//! process-wide default. The no-op implementation is substitutable with no
//! behavior change, which is what tests use.

use serde_json::Value;
use std::sync::Arc;

/// Structured logging capability for provider operations
///
/// `sdk_call` attaches request/response snapshots of a vendor API call so a
/// failed run can be diagnosed without vendor-side logs.
pub trait OperationLogger: Send + Sync {
    fn info(&self, message: &str);

    fn sdk_call(&self, operation: &str, request: &Value, response: &Value);
}

/// Discards everything.
#[derive(Debug, Default)]
pub struct NoopLogger;

impl OperationLogger for NoopLogger {
    fn info(&self, _message: &str) {}

    fn sdk_call(&self, _operation: &str, _request: &Value, _response: &Value) {}
}

/// Forwards to the `tracing` subscriber.
#[derive(Debug, Default)]
pub struct TracingLogger;

impl OperationLogger for TracingLogger {
    fn info(&self, message: &str) {
        tracing::info!("{}", message);
    }

    fn sdk_call(&self, operation: &str, request: &Value, response: &Value) {
        tracing::debug!(
            operation,
            request = %request,
            response = %response,
            "sdk request"
        );
    }
}

/// Shared logger handle used throughout the provider layer.
pub type Logger = Arc<dyn OperationLogger>;

/// Default logger for providers constructed without one.
pub fn noop() -> Logger {
    Arc::new(NoopLogger)
}

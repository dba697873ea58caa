//! Provider error taxonomy

use thiserror::Error;

/// Errors surfaced by every provider kind
///
/// The orchestrating caller treats all providers identically, so the whole
/// provider layer shares this one taxonomy. Every message names the failing
/// vendor operation so cross-vendor debugging does not require vendor docs.
#[derive(Error, Debug)]
pub enum ProviderError {
    /// A required configuration field is missing or invalid. Detected before
    /// any network call; never retried.
    #[error("invalid configuration: {0}")]
    Config(String),

    /// The access-credential blob could not be decoded. Never retried.
    #[error("failed to decode access credential: {0}")]
    Decode(#[from] serde_json::Error),

    /// An underlying vendor SDK call failed. Retrying is the caller's policy.
    #[error("failed to execute sdk request '{operation}': {message}")]
    Transport { operation: String, message: String },

    /// The vendor reported success but the resulting state is unobservable
    /// (e.g. a created record missing from a follow-up scan).
    #[error(
        "sdk request '{operation}' reported success but the result could not be observed (code: {code}, message: {message})"
    )]
    Integrity {
        operation: String,
        code: i64,
        message: String,
    },

    /// The vendor returned a status outside the contracted vocabulary.
    /// Fatal for the operation; never retried.
    #[error("sdk request '{operation}' returned unexpected status '{status}'")]
    UnexpectedState { operation: String, status: String },

    /// A deployment job reached its failure terminal state.
    #[error("deployment job '{job_id}' finished with failure status")]
    JobFailed { job_id: String },

    /// The ambient cancellation/deadline signal fired. Takes priority over
    /// any in-progress vendor call outcome.
    #[error("operation cancelled")]
    Cancelled,
}

impl ProviderError {
    /// Wrap a vendor call failure with the name of the failed operation.
    pub fn transport(operation: impl Into<String>, message: impl ToString) -> Self {
        Self::Transport {
            operation: operation.into(),
            message: message.to_string(),
        }
    }

    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }
}

pub type Result<T> = std::result::Result<T, ProviderError>;

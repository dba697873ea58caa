//! Certflow Provider Orchestration Layer
//!
//! This crate provides the shared behavioral contract that every certificate
//! provider implementation satisfies: job-completion polling with
//! cancellation, content-based dedup before mutating remote state, and a
//! uniform error-wrapping discipline across calls to third-party services.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────┐
//! │             workflow engine (caller)             │
//! └─────────────────┬───────────────────────────────┘
//!                   │
//! ┌─────────────────▼───────────────────────────────┐
//! │              certflow-provider                   │
//! │  ┌──────────────────────────────────────────┐   │
//! │  │  trait Applicant / Uploader / Deployer    │   │
//! │  └──────────────────────────────────────────┘   │
//! │  ┌──────────────┐  ┌──────────────────────┐    │
//! │  │ DedupResolver │  │   DeployJobPoller    │    │
//! │  │ UploadOp      │  │   (fixed interval)   │    │
//! │  └──────────────┘  └──────────────────────┘    │
//! └───────┬─────────────────┬───────────────────────┘
//!         │                 │
//! ┌───────▼───────┐ ┌───────▼───────┐
//! │    1panel     │ │  aliyun-cas   │
//! │   provider    │ │   provider    │
//! └───────────────┘ └───────────────┘
//! ```
//!
//! Vendor crates plug in through the [`adapter`] traits; the orchestration
//! here never touches a wire format itself.

pub mod access;
pub mod adapter;
pub mod artifact;
pub mod cancel;
pub mod dedup;
pub mod error;
pub mod logging;
pub mod poll;
pub mod provider;
pub mod upload;

// Re-exports
pub use access::decode_access;
pub use adapter::{CertificateStore, CreateReceipt, DeploymentApi, JobRequest, JobStatus};
pub use artifact::{
    CertificateArtifact, DeployResult, IssuedCertificate, RemoteRecord, UploadResult,
};
pub use cancel::{CancelToken, Delay, TokioDelay};
pub use dedup::{DEFAULT_PAGE_SIZE, DedupResolver};
pub use error::{ProviderError, Result};
pub use logging::{Logger, NoopLogger, OperationLogger, TracingLogger};
pub use poll::{DeployJobPoller, POLL_INTERVAL};
pub use provider::{Applicant, Deployer, Uploader};
pub use upload::UploadOperation;

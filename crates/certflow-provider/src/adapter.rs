//! Outbound vendor adapter contracts
//!
//! Each vendor crate wraps its API behind exactly this shape so the
//! orchestration layer can drive every vendor through one state machine.
//! Request/response marshaling stays inside the adapter; the wire format is
//! whatever the vendor's API defines.

use crate::artifact::{CertificateArtifact, RemoteRecord};
use crate::error::Result;
use async_trait::async_trait;

/// Receipt from a create call
///
/// Some vendors do not return the new record's identifier synchronously; the
/// code/message pair is kept for integrity diagnostics either way.
#[derive(Debug, Clone)]
pub struct CreateReceipt {
    pub code: i64,
    pub message: String,
    pub id: Option<String>,
}

/// A vendor's certificate record store (list + create)
#[async_trait]
pub trait CertificateStore: Send + Sync {
    /// Fetch one page of existing records. Pages are 1-based. A page shorter
    /// than `page_size` is the last page.
    async fn list_page(&self, page: i32, page_size: i32) -> Result<Vec<RemoteRecord>>;

    /// Create a new record holding the artifact under `name`.
    async fn create(&self, artifact: &CertificateArtifact, name: &str) -> Result<CreateReceipt>;
}

/// Deployment job status mapped from the vendor's vocabulary
///
/// Adapters map every raw value they recognize; anything outside the
/// contracted vocabulary becomes `Unknown` and is fatal for the operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum JobStatus {
    Pending,
    Success,
    Failure,
    Unknown(String),
}

/// Parameters for submitting a deployment job
#[derive(Debug, Clone)]
pub struct JobRequest {
    pub cert_id: String,
    pub job_name: String,
    pub resource_ids: Vec<String>,
    pub contact_ids: Vec<String>,
}

/// A vendor's deployment/activation API
#[async_trait]
pub trait DeploymentApi: Send + Sync {
    /// First contact identifier on the account, used when none is configured.
    async fn first_contact_id(&self) -> Result<Option<String>>;

    /// Submit a deployment job; returns the vendor-assigned job identifier.
    async fn submit_job(&self, request: &JobRequest) -> Result<String>;

    /// Read the current status of a job.
    async fn job_status(&self, job_id: &str) -> Result<JobStatus>;
}

//! Provider facade traits
//!
//! All three provider kinds share the construct(config, logger) ->
//! operation(cancel, artifact) -> result lifecycle so the orchestrating
//! caller can treat them polymorphically. Required-field validation happens
//! at the start of the operation call, before any network activity, so
//! configuration errors never consume vendor API quota.

use crate::artifact::{DeployResult, IssuedCertificate, UploadResult};
use crate::cancel::CancelToken;
use crate::error::Result;
use async_trait::async_trait;

/// Challenge-solving provider: obtains a certificate via a DNS-01 challenge.
#[async_trait]
pub trait Applicant: Send + Sync {
    async fn apply(&self, cancel: &CancelToken) -> Result<IssuedCertificate>;
}

/// Storage provider: uploads an artifact to a vendor certificate store.
#[async_trait]
pub trait Uploader: Send + Sync {
    async fn upload(
        &self,
        cancel: &CancelToken,
        cert_pem: &str,
        privkey_pem: &str,
    ) -> Result<UploadResult>;
}

/// Deployment provider: activates an uploaded artifact on vendor resources.
#[async_trait]
pub trait Deployer: Send + Sync {
    async fn deploy(
        &self,
        cancel: &CancelToken,
        cert_pem: &str,
        privkey_pem: &str,
    ) -> Result<DeployResult>;
}

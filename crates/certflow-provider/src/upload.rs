//! Idempotent upload operation
//!
//! Scan-then-create-then-rescan: the second scan exists because some vendors
//! do not return the new record's identifier from the create call itself, and
//! a few report success without the record ever becoming observable.

use crate::adapter::CertificateStore;
use crate::artifact::{CertificateArtifact, UploadResult};
use crate::cancel::CancelToken;
use crate::dedup::DedupResolver;
use crate::error::{ProviderError, Result};
use crate::logging::{self, Logger};

/// Upload orchestration over a vendor certificate store
pub struct UploadOperation {
    resolver: DedupResolver,
    logger: Logger,
}

impl UploadOperation {
    pub fn new() -> Self {
        Self {
            resolver: DedupResolver::new(),
            logger: logging::noop(),
        }
    }

    pub fn with_logger(mut self, logger: Logger) -> Self {
        self.logger = logger;
        self
    }

    pub fn with_resolver(mut self, resolver: DedupResolver) -> Self {
        self.resolver = resolver;
        self
    }

    /// Upload `artifact`, returning the stable remote identifier.
    ///
    /// Calling this twice with the same artifact yields the same identifier
    /// and the second call issues no create request.
    pub async fn run(
        &self,
        cancel: &CancelToken,
        store: &dyn CertificateStore,
        artifact: &CertificateArtifact,
    ) -> Result<UploadResult> {
        // Scan existing records first so retries never duplicate
        if let Some(existing) = self.resolver.find_existing(cancel, store, artifact).await? {
            self.logger.info("ssl certificate already exists");
            return Ok(UploadResult {
                cert_id: existing.id,
                cert_name: existing.name,
            });
        }

        cancel.check()?;

        // Unique display name; vendors reject duplicate names
        let cert_name = generated_name();
        let receipt = store.create(artifact, &cert_name).await?;
        self.logger.info("ssl certificate uploaded");

        // Rescan to pick up the vendor-assigned identifier
        match self.resolver.find_existing(cancel, store, artifact).await? {
            Some(created) => Ok(UploadResult {
                cert_id: created.id,
                cert_name: created.name,
            }),
            None => Err(ProviderError::Integrity {
                operation: "create certificate".to_string(),
                code: receipt.code,
                message: receipt.message,
            }),
        }
    }
}

impl Default for UploadOperation {
    fn default() -> Self {
        Self::new()
    }
}

/// Display name derived from the current time to avoid vendor-side name
/// collisions.
fn generated_name() -> String {
    format!("certflow-{}", chrono::Utc::now().timestamp_millis())
}

//! 1Panel uploader provider

use crate::sdk::OnePanelClient;
use async_trait::async_trait;
use certflow_provider::{
    CancelToken, CertificateArtifact, Logger, Result, UploadOperation, UploadResult, Uploader,
    decode_access,
};
use serde::Deserialize;

/// 1Panel uploader configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OnePanelConfig {
    /// Panel base URL.
    #[serde(default)]
    pub server_url: String,
    /// Panel API version.
    #[serde(default)]
    pub api_version: String,
    /// Panel API key.
    #[serde(default)]
    pub api_key: String,
    /// Skip TLS verification for self-signed panels.
    #[serde(default)]
    pub allow_insecure_connections: bool,
    /// Request timeout in seconds; 0 keeps the transport default.
    #[serde(default)]
    pub timeout_secs: u64,
}

/// Uploads certificates to a 1Panel instance, deduplicating by PEM content.
pub struct OnePanelUploader {
    client: OnePanelClient,
    operation: UploadOperation,
}

impl OnePanelUploader {
    pub fn new(config: OnePanelConfig) -> Result<Self> {
        let client = OnePanelClient::new(
            &config.server_url,
            &config.api_version,
            &config.api_key,
            config.allow_insecure_connections,
            config.timeout_secs,
        )?;
        Ok(Self {
            client,
            operation: UploadOperation::new(),
        })
    }

    /// Decode an opaque access blob and construct the uploader from it.
    pub fn from_access(access: &str) -> Result<Self> {
        let config: OnePanelConfig = decode_access(access)?;
        Self::new(config)
    }

    pub fn with_logger(mut self, logger: Logger) -> Self {
        self.client = self.client.with_logger(logger.clone());
        self.operation = self.operation.with_logger(logger);
        self
    }
}

#[async_trait]
impl Uploader for OnePanelUploader {
    async fn upload(
        &self,
        cancel: &CancelToken,
        cert_pem: &str,
        privkey_pem: &str,
    ) -> Result<UploadResult> {
        let artifact = CertificateArtifact::new(cert_pem, privkey_pem);
        self.operation.run(cancel, &self.client, &artifact).await
    }
}

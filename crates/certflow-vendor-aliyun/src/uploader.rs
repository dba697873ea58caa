//! Aliyun CAS uploader provider

use crate::sdk::AliyunCasClient;
use async_trait::async_trait;
use certflow_provider::{
    CancelToken, CertificateArtifact, Logger, Result, UploadOperation, UploadResult, Uploader,
    decode_access,
};
use serde::Deserialize;
use std::sync::Arc;

/// CAS uploader configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AliyunCasConfig {
    #[serde(default)]
    pub access_key_id: String,
    #[serde(default)]
    pub access_key_secret: String,
    /// Empty means the CAS default region.
    #[serde(default)]
    pub region: String,
    #[serde(default)]
    pub timeout_secs: u64,
}

/// Uploads certificates to the CAS user-certificate store.
pub struct AliyunCasUploader {
    client: Arc<AliyunCasClient>,
    operation: UploadOperation,
}

impl AliyunCasUploader {
    pub fn new(config: AliyunCasConfig) -> Result<Self> {
        let client = AliyunCasClient::new(
            &config.access_key_id,
            &config.access_key_secret,
            &config.region,
            config.timeout_secs,
        )?;
        Ok(Self {
            client: Arc::new(client),
            operation: UploadOperation::new(),
        })
    }

    pub fn from_access(access: &str) -> Result<Self> {
        let config: AliyunCasConfig = decode_access(access)?;
        Self::new(config)
    }

    pub fn with_logger(mut self, logger: Logger) -> Self {
        self.operation = self.operation.with_logger(logger);
        self
    }

    pub(crate) fn client(&self) -> Arc<AliyunCasClient> {
        self.client.clone()
    }
}

#[async_trait]
impl Uploader for AliyunCasUploader {
    async fn upload(
        &self,
        cancel: &CancelToken,
        cert_pem: &str,
        privkey_pem: &str,
    ) -> Result<UploadResult> {
        let artifact = CertificateArtifact::new(cert_pem, privkey_pem);
        self.operation
            .run(cancel, self.client.as_ref(), &artifact)
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use certflow_provider::ProviderError;

    #[test]
    fn test_from_access_with_default_region() {
        let uploader = AliyunCasUploader::from_access(
            r#"{"accessKeyId": "ak", "accessKeySecret": "sk"}"#,
        );
        assert!(uploader.is_ok());
    }

    #[test]
    fn test_missing_secret_is_a_config_error() {
        let result = AliyunCasUploader::from_access(r#"{"accessKeyId": "ak"}"#);
        assert!(matches!(result, Err(ProviderError::Config(_))));
    }
}

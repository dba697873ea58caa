//! Aliyun CAS deployment provider
//!
//! Uploads the artifact to the CAS store (idempotently), then creates a user
//! deployment job over the configured cloud resources and polls it to a
//! terminal state.

use crate::sdk::AliyunCasClient;
use crate::uploader::{AliyunCasConfig, AliyunCasUploader};
use async_trait::async_trait;
use certflow_provider::{
    CancelToken, DeployJobPoller, DeployResult, Deployer, DeploymentApi, Logger, ProviderError,
    Result, Uploader, decode_access, logging,
};
use serde::Deserialize;
use std::sync::Arc;

/// CAS deployer configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AliyunCasDeployConfig {
    #[serde(default)]
    pub access_key_id: String,
    #[serde(default)]
    pub access_key_secret: String,
    #[serde(default)]
    pub region: String,
    /// Cloud resource ids to deploy onto. Required.
    #[serde(default)]
    pub resource_ids: Vec<String>,
    /// Contact ids for job notifications. Empty means the account's first
    /// contact.
    #[serde(default)]
    pub contact_ids: Vec<String>,
    #[serde(default)]
    pub timeout_secs: u64,
}

/// Deploys certificates onto Aliyun resources through CAS deployment jobs.
pub struct AliyunCasDeployer {
    config: AliyunCasDeployConfig,
    api: Arc<dyn DeploymentApi>,
    uploader: Arc<dyn Uploader>,
    poller: DeployJobPoller,
    logger: Logger,
}

impl AliyunCasDeployer {
    pub fn new(config: AliyunCasDeployConfig) -> Result<Self> {
        let uploader = AliyunCasUploader::new(AliyunCasConfig {
            access_key_id: config.access_key_id.clone(),
            access_key_secret: config.access_key_secret.clone(),
            region: config.region.clone(),
            timeout_secs: config.timeout_secs,
        })?;
        let api: Arc<AliyunCasClient> = uploader.client();
        Ok(Self::from_parts(config, api, Arc::new(uploader)))
    }

    pub fn from_access(access: &str) -> Result<Self> {
        let config: AliyunCasDeployConfig = decode_access(access)?;
        Self::new(config)
    }

    pub fn with_logger(mut self, logger: Logger) -> Self {
        self.poller = self.poller.with_logger(logger.clone());
        self.logger = logger;
        self
    }

    fn from_parts(
        config: AliyunCasDeployConfig,
        api: Arc<dyn DeploymentApi>,
        uploader: Arc<dyn Uploader>,
    ) -> Self {
        Self {
            config,
            api,
            uploader,
            poller: DeployJobPoller::new(),
            logger: logging::noop(),
        }
    }
}

#[async_trait]
impl Deployer for AliyunCasDeployer {
    async fn deploy(
        &self,
        cancel: &CancelToken,
        cert_pem: &str,
        privkey_pem: &str,
    ) -> Result<DeployResult> {
        // Validated before any vendor call so a bad config costs no quota
        if self.config.resource_ids.is_empty() {
            return Err(ProviderError::config("config `resourceIds` is required"));
        }

        let uploaded = self.uploader.upload(cancel, cert_pem, privkey_pem).await?;
        self.logger.info("certificate file uploaded");

        self.poller
            .run(
                cancel,
                self.api.as_ref(),
                &uploaded.cert_id,
                &self.config.resource_ids,
                &self.config.contact_ids,
            )
            .await
    }
}

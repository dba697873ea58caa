//! 1Panel API client
//!
//! Thin typed wrapper over the 1Panel website-SSL endpoints. Construction is
//! side-effect-free; the connection is established lazily on the first call.

use async_trait::async_trait;
use certflow_provider::{
    CertificateArtifact, CertificateStore, CreateReceipt, Logger, ProviderError, RemoteRecord,
    Result, logging,
};
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::time::Duration;
use url::Url;

const TOKEN_HEADER: &str = "1Panel-Token";

/// 1Panel API client
pub struct OnePanelClient {
    http: reqwest::Client,
    base_url: Url,
    api_version: String,
    api_key: String,
    logger: Logger,
}

impl OnePanelClient {
    /// Validate the connection parameters and build a client handle.
    ///
    /// `timeout_secs == 0` keeps the transport default. No network round trip
    /// happens here.
    pub fn new(
        server_url: &str,
        api_version: &str,
        api_key: &str,
        allow_insecure: bool,
        timeout_secs: u64,
    ) -> Result<Self> {
        let base_url = Url::parse(server_url)
            .map_err(|_| ProviderError::config("invalid 1panel server url"))?;
        if api_version.is_empty() {
            return Err(ProviderError::config("invalid 1panel api version"));
        }
        if api_key.is_empty() {
            return Err(ProviderError::config("invalid 1panel api key"));
        }

        let mut builder = reqwest::Client::builder().danger_accept_invalid_certs(allow_insecure);
        if timeout_secs > 0 {
            builder = builder.timeout(Duration::from_secs(timeout_secs));
        }
        let http = builder
            .build()
            .map_err(|e| ProviderError::transport("1panel client build", e))?;

        Ok(Self {
            http,
            base_url,
            api_version: api_version.to_string(),
            api_key: api_key.to_string(),
            logger: logging::noop(),
        })
    }

    pub fn with_logger(mut self, logger: Logger) -> Self {
        self.logger = logger;
        self
    }

    fn endpoint(&self, path: &str) -> String {
        format!(
            "{}/api/{}/{}",
            self.base_url.as_str().trim_end_matches('/'),
            self.api_version,
            path.trim_start_matches('/')
        )
    }

    async fn post<Req: Serialize, Resp: for<'de> Deserialize<'de> + Default>(
        &self,
        operation: &str,
        path: &str,
        request: &Req,
    ) -> Result<Envelope<Resp>> {
        let response = self
            .http
            .post(self.endpoint(path))
            .header(TOKEN_HEADER, &self.api_key)
            .json(request)
            .send()
            .await
            .map_err(|e| ProviderError::transport(operation, e))?;

        let envelope: Envelope<Resp> = response
            .json()
            .await
            .map_err(|e| ProviderError::transport(operation, e))?;

        self.logger.sdk_call(
            operation,
            &serde_json::to_value(request).unwrap_or_default(),
            &json!({ "code": envelope.code, "message": envelope.message }),
        );

        if envelope.code != 200 {
            return Err(ProviderError::transport(operation, &envelope.message));
        }
        Ok(envelope)
    }

    /// Fetch one page of website SSL records.
    pub async fn search_website_ssl(&self, page: i32, page_size: i32) -> Result<Vec<SslItem>> {
        let request = SearchWebsiteSslRequest { page, page_size };
        let envelope: Envelope<SearchWebsiteSslData> = self
            .post("1panel.SearchWebsiteSSL", "websites/ssl/search", &request)
            .await?;
        Ok(envelope.data.map(|d| d.items).unwrap_or_default())
    }

    /// Upload a certificate as a pasted PEM pair.
    pub async fn upload_website_ssl(
        &self,
        description: &str,
        certificate: &str,
        private_key: &str,
    ) -> Result<CreateReceipt> {
        let request = UploadWebsiteSslRequest {
            r#type: "paste".to_string(),
            description: description.to_string(),
            certificate: certificate.to_string(),
            private_key: private_key.to_string(),
        };
        let envelope: Envelope<serde_json::Value> = self
            .post("1panel.UploadWebsiteSSL", "websites/ssl/upload", &request)
            .await?;
        // 1Panel does not return the new record id; the caller rescans.
        Ok(CreateReceipt {
            code: envelope.code,
            message: envelope.message,
            id: None,
        })
    }
}

#[async_trait]
impl CertificateStore for OnePanelClient {
    async fn list_page(&self, page: i32, page_size: i32) -> Result<Vec<RemoteRecord>> {
        let items = self.search_website_ssl(page, page_size).await?;
        Ok(items.into_iter().map(RemoteRecord::from).collect())
    }

    async fn create(&self, artifact: &CertificateArtifact, name: &str) -> Result<CreateReceipt> {
        self.upload_website_ssl(name, &artifact.certificate_pem, &artifact.private_key_pem)
            .await
    }
}

#[derive(Debug, Deserialize)]
struct Envelope<T> {
    code: i64,
    #[serde(default)]
    message: String,
    #[serde(default)]
    data: Option<T>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct SearchWebsiteSslRequest {
    page: i32,
    page_size: i32,
}

#[derive(Debug, Default, Deserialize)]
struct SearchWebsiteSslData {
    #[serde(default)]
    items: Vec<SslItem>,
}

/// One website-SSL record as the panel returns it
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SslItem {
    pub id: i64,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub pem: String,
    #[serde(default)]
    pub private_key: String,
}

impl From<SslItem> for RemoteRecord {
    fn from(item: SslItem) -> Self {
        Self {
            id: item.id.to_string(),
            name: item.description,
            certificate_pem: Some(item.pem),
            private_key_pem: Some(item.private_key),
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct UploadWebsiteSslRequest {
    r#type: String,
    description: String,
    certificate: String,
    private_key: String,
}

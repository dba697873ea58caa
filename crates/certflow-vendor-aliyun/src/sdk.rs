//! Aliyun CAS API client
//!
//! Wraps the certificate-store and deployment-job endpoints of the CAS
//! (cloud certificate) service. Construction only validates the credential
//! fields and resolves the regional endpoint; nothing touches the network
//! until the first call.

use async_trait::async_trait;
use certflow_provider::{
    CertificateArtifact, CertificateStore, CreateReceipt, DeploymentApi, JobRequest, JobStatus,
    Logger, ProviderError, RemoteRecord, Result, logging,
};
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::time::Duration;

/// CAS default region when none is configured.
pub const DEFAULT_REGION: &str = "cn-hangzhou";

const API_VERSION: &str = "2020-04-07";

/// In-progress statuses CAS is contracted to report for a user-created job.
/// Anything else (notably "editing") is outside the vocabulary.
const IN_PROGRESS_STATUSES: &[&str] = &["pending", "checking", "domainVerify", "deploying"];

/// Resolve the service endpoint for a region. Vendor constants, not
/// user-configurable.
pub fn endpoint_for_region(region: &str) -> String {
    let region = if region.is_empty() {
        DEFAULT_REGION
    } else {
        region
    };
    match region {
        DEFAULT_REGION => "cas.aliyuncs.com".to_string(),
        other => format!("cas.{other}.aliyuncs.com"),
    }
}

/// Map a raw CAS job status into the contracted vocabulary.
pub fn map_job_status(raw: Option<&str>) -> JobStatus {
    match raw {
        Some("success") => JobStatus::Success,
        Some("error") => JobStatus::Failure,
        Some(status) if IN_PROGRESS_STATUSES.contains(&status) => JobStatus::Pending,
        Some(status) => JobStatus::Unknown(status.to_string()),
        None => JobStatus::Unknown("<missing>".to_string()),
    }
}

/// Aliyun CAS API client
pub struct AliyunCasClient {
    http: reqwest::Client,
    endpoint: String,
    access_key_id: String,
    access_key_secret: String,
    logger: Logger,
}

impl AliyunCasClient {
    pub fn new(
        access_key_id: &str,
        access_key_secret: &str,
        region: &str,
        timeout_secs: u64,
    ) -> Result<Self> {
        if access_key_id.is_empty() {
            return Err(ProviderError::config("access `accessKeyId` is required"));
        }
        if access_key_secret.is_empty() {
            return Err(ProviderError::config(
                "access `accessKeySecret` is required",
            ));
        }

        let mut builder = reqwest::Client::builder();
        if timeout_secs > 0 {
            builder = builder.timeout(Duration::from_secs(timeout_secs));
        }
        let http = builder
            .build()
            .map_err(|e| ProviderError::transport("cas client build", e))?;

        Ok(Self {
            http,
            endpoint: endpoint_for_region(region),
            access_key_id: access_key_id.to_string(),
            access_key_secret: access_key_secret.to_string(),
            logger: logging::noop(),
        })
    }

    pub fn with_logger(mut self, logger: Logger) -> Self {
        self.logger = logger;
        self
    }

    async fn call<Req: Serialize, Resp: for<'de> Deserialize<'de>>(
        &self,
        action: &str,
        request: &Req,
    ) -> Result<Resp> {
        let operation = format!("cas.{action}");
        let url = format!(
            "https://{}/?Action={}&Version={}",
            self.endpoint, action, API_VERSION
        );
        let response = self
            .http
            .post(&url)
            .header("x-acs-access-key-id", &self.access_key_id)
            .header("x-acs-access-key-secret", &self.access_key_secret)
            .json(request)
            .send()
            .await
            .map_err(|e| ProviderError::transport(operation.as_str(), e))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| ProviderError::transport(operation.as_str(), e))?;

        self.logger.sdk_call(
            &operation,
            &serde_json::to_value(request).unwrap_or_default(),
            &json!({ "status": status.as_u16(), "body": body }),
        );

        if !status.is_success() {
            return Err(ProviderError::transport(
                operation.as_str(),
                format!("http {status}: {body}"),
            ));
        }
        serde_json::from_str(&body).map_err(|e| ProviderError::transport(operation.as_str(), e))
    }

    /// List one page of user certificates.
    pub async fn list_user_certificates(
        &self,
        page: i32,
        page_size: i32,
    ) -> Result<Vec<UserCertificate>> {
        let response: ListUserCertificateOrderResponse = self
            .call(
                "ListUserCertificateOrder",
                &json!({
                    "CurrentPage": page,
                    "ShowSize": page_size,
                    "OrderType": "UPLOAD",
                }),
            )
            .await?;
        Ok(response.certificate_order_list)
    }

    /// Upload a certificate; CAS returns the new certificate id directly.
    pub async fn upload_user_certificate(
        &self,
        name: &str,
        cert_pem: &str,
        key_pem: &str,
    ) -> Result<CreateReceipt> {
        let response: UploadUserCertificateResponse = self
            .call(
                "UploadUserCertificate",
                &json!({
                    "Name": name,
                    "Cert": cert_pem,
                    "Key": key_pem,
                }),
            )
            .await?;
        Ok(CreateReceipt {
            code: 200,
            message: response.request_id,
            id: response.cert_id.map(|id| id.to_string()),
        })
    }

    /// First contact on the account, if any.
    pub async fn first_contact(&self) -> Result<Option<String>> {
        let response: ListContactResponse = self
            .call(
                "ListContact",
                &json!({ "CurrentPage": 1, "ShowSize": 1 }),
            )
            .await?;
        Ok(response
            .contact_list
            .first()
            .map(|contact| contact.contact_id.to_string()))
    }

    /// Create a user deployment job; returns the job id.
    pub async fn create_deployment_job(
        &self,
        name: &str,
        cert_ids: &str,
        resource_ids: &str,
        contact_ids: &str,
    ) -> Result<String> {
        let response: CreateDeploymentJobResponse = self
            .call(
                "CreateDeploymentJob",
                &json!({
                    "Name": name,
                    "JobType": "user",
                    "CertIds": cert_ids,
                    "ResourceIds": resource_ids,
                    "ContactIds": contact_ids,
                }),
            )
            .await?;
        Ok(response.job_id.to_string())
    }

    /// Read the raw status of a deployment job.
    pub async fn describe_deployment_job(&self, job_id: &str) -> Result<Option<String>> {
        let response: DescribeDeploymentJobResponse = self
            .call("DescribeDeploymentJob", &json!({ "JobId": job_id }))
            .await?;
        Ok(response.status)
    }
}

#[async_trait]
impl CertificateStore for AliyunCasClient {
    async fn list_page(&self, page: i32, page_size: i32) -> Result<Vec<RemoteRecord>> {
        let items = self.list_user_certificates(page, page_size).await?;
        Ok(items.into_iter().map(RemoteRecord::from).collect())
    }

    async fn create(&self, artifact: &CertificateArtifact, name: &str) -> Result<CreateReceipt> {
        self.upload_user_certificate(name, &artifact.certificate_pem, &artifact.private_key_pem)
            .await
    }
}

#[async_trait]
impl DeploymentApi for AliyunCasClient {
    async fn first_contact_id(&self) -> Result<Option<String>> {
        self.first_contact().await
    }

    async fn submit_job(&self, request: &JobRequest) -> Result<String> {
        self.create_deployment_job(
            &request.job_name,
            &request.cert_id,
            &request.resource_ids.join(","),
            &request.contact_ids.join(","),
        )
        .await
    }

    async fn job_status(&self, job_id: &str) -> Result<JobStatus> {
        let raw = self.describe_deployment_job(job_id).await?;
        Ok(map_job_status(raw.as_deref()))
    }
}

/// One uploaded certificate as CAS lists it
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct UserCertificate {
    pub certificate_id: i64,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub cert: Option<String>,
    #[serde(default)]
    pub key: Option<String>,
}

impl From<UserCertificate> for RemoteRecord {
    fn from(item: UserCertificate) -> Self {
        Self {
            id: item.certificate_id.to_string(),
            name: item.name,
            certificate_pem: item.cert,
            private_key_pem: item.key,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct ListUserCertificateOrderResponse {
    #[serde(default)]
    certificate_order_list: Vec<UserCertificate>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct UploadUserCertificateResponse {
    #[serde(default)]
    request_id: String,
    #[serde(default)]
    cert_id: Option<i64>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct ListContactResponse {
    #[serde(default)]
    contact_list: Vec<Contact>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct Contact {
    contact_id: i64,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct CreateDeploymentJobResponse {
    job_id: i64,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct DescribeDeploymentJobResponse {
    #[serde(default)]
    status: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_region_uses_bare_endpoint() {
        assert_eq!(endpoint_for_region(""), "cas.aliyuncs.com");
        assert_eq!(endpoint_for_region("cn-hangzhou"), "cas.aliyuncs.com");
    }

    #[test]
    fn test_other_regions_use_regional_endpoint() {
        assert_eq!(
            endpoint_for_region("ap-southeast-1"),
            "cas.ap-southeast-1.aliyuncs.com"
        );
    }

    #[test]
    fn test_empty_credentials_rejected() {
        assert!(AliyunCasClient::new("", "secret", "", 0).is_err());
        assert!(AliyunCasClient::new("key", "", "", 0).is_err());
        assert!(AliyunCasClient::new("key", "secret", "", 0).is_ok());
    }

    #[test]
    fn test_status_mapping_terminal_states() {
        assert_eq!(map_job_status(Some("success")), JobStatus::Success);
        assert_eq!(map_job_status(Some("error")), JobStatus::Failure);
    }

    #[test]
    fn test_status_mapping_in_progress_vocabulary() {
        for status in ["pending", "checking", "domainVerify", "deploying"] {
            assert_eq!(map_job_status(Some(status)), JobStatus::Pending);
        }
    }

    #[test]
    fn test_editing_and_missing_status_are_unknown() {
        assert_eq!(
            map_job_status(Some("editing")),
            JobStatus::Unknown("editing".to_string())
        );
        assert_eq!(
            map_job_status(None),
            JobStatus::Unknown("<missing>".to_string())
        );
    }

    #[test]
    fn test_list_response_tolerates_missing_pem_fields() {
        let response: ListUserCertificateOrderResponse = serde_json::from_str(
            r#"{"CertificateOrderList": [{"CertificateId": 9, "Name": "certflow-1"}]}"#,
        )
        .unwrap();
        let record = RemoteRecord::from(response.certificate_order_list[0].clone());
        assert_eq!(record.id, "9");
        assert!(record.certificate_pem.is_none());
    }
}

//! AWS Route 53 challenge provider

use crate::options::{AcmeIssuer, ApplyOptions, ChallengeOrder, DnsProviderSettings};
use async_trait::async_trait;
use certflow_provider::{
    Applicant, CancelToken, IssuedCertificate, ProviderError, Result, decode_access,
};
use serde::Deserialize;
use std::sync::Arc;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct AwsAccess {
    #[serde(default)]
    access_key_id: String,
    #[serde(default)]
    secret_access_key: String,
    #[serde(default)]
    region: String,
    #[serde(default)]
    hosted_zone_id: String,
}

pub struct AwsApplicant {
    options: ApplyOptions,
    issuer: Arc<dyn AcmeIssuer>,
}

impl AwsApplicant {
    pub fn new(options: ApplyOptions, issuer: Arc<dyn AcmeIssuer>) -> Self {
        Self { options, issuer }
    }
}

#[async_trait]
impl Applicant for AwsApplicant {
    async fn apply(&self, cancel: &CancelToken) -> Result<IssuedCertificate> {
        let access: AwsAccess = decode_access(&self.options.access)?;
        if access.access_key_id.is_empty() {
            return Err(ProviderError::config("access `accessKeyId` is required"));
        }
        if access.secret_access_key.is_empty() {
            return Err(ProviderError::config(
                "access `secretAccessKey` is required",
            ));
        }

        let order = ChallengeOrder {
            domain: self.options.domain.clone(),
            contact_email: self.options.contact_email.clone(),
            key_algorithm: self.options.key_algorithm.clone(),
            nameservers: self.options.nameservers.clone(),
            propagation_timeout: self.options.propagation_timeout(),
            dns_provider: DnsProviderSettings::Route53 {
                access_key_id: access.access_key_id,
                secret_access_key: access.secret_access_key,
                region: access.region,
                hosted_zone_id: access.hosted_zone_id,
            },
        };
        self.issuer.issue(cancel, &order).await
    }
}

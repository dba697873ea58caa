//! Cloudflare challenge provider

use crate::options::{AcmeIssuer, ApplyOptions, ChallengeOrder, DnsProviderSettings};
use async_trait::async_trait;
use certflow_provider::{
    Applicant, CancelToken, IssuedCertificate, ProviderError, Result, decode_access,
};
use serde::Deserialize;
use std::sync::Arc;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CloudflareAccess {
    #[serde(default)]
    dns_api_token: String,
}

pub struct CloudflareApplicant {
    options: ApplyOptions,
    issuer: Arc<dyn AcmeIssuer>,
}

impl CloudflareApplicant {
    pub fn new(options: ApplyOptions, issuer: Arc<dyn AcmeIssuer>) -> Self {
        Self { options, issuer }
    }
}

#[async_trait]
impl Applicant for CloudflareApplicant {
    async fn apply(&self, cancel: &CancelToken) -> Result<IssuedCertificate> {
        let access: CloudflareAccess = decode_access(&self.options.access)?;
        if access.dns_api_token.is_empty() {
            return Err(ProviderError::config("access `dnsApiToken` is required"));
        }

        let order = ChallengeOrder {
            domain: self.options.domain.clone(),
            contact_email: self.options.contact_email.clone(),
            key_algorithm: self.options.key_algorithm.clone(),
            nameservers: self.options.nameservers.clone(),
            propagation_timeout: self.options.propagation_timeout(),
            dns_provider: DnsProviderSettings::Cloudflare {
                dns_api_token: access.dns_api_token,
            },
        };
        self.issuer.issue(cancel, &order).await
    }
}

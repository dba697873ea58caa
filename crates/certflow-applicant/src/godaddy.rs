//! GoDaddy challenge provider

use crate::options::{AcmeIssuer, ApplyOptions, ChallengeOrder, DnsProviderSettings};
use async_trait::async_trait;
use certflow_provider::{
    Applicant, CancelToken, IssuedCertificate, ProviderError, Result, decode_access,
};
use serde::Deserialize;
use std::sync::Arc;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GoDaddyAccess {
    #[serde(default)]
    api_key: String,
    #[serde(default)]
    api_secret: String,
}

pub struct GoDaddyApplicant {
    options: ApplyOptions,
    issuer: Arc<dyn AcmeIssuer>,
}

impl GoDaddyApplicant {
    pub fn new(options: ApplyOptions, issuer: Arc<dyn AcmeIssuer>) -> Self {
        Self { options, issuer }
    }
}

#[async_trait]
impl Applicant for GoDaddyApplicant {
    async fn apply(&self, cancel: &CancelToken) -> Result<IssuedCertificate> {
        let access: GoDaddyAccess = decode_access(&self.options.access)?;
        if access.api_key.is_empty() {
            return Err(ProviderError::config("access `apiKey` is required"));
        }
        if access.api_secret.is_empty() {
            return Err(ProviderError::config("access `apiSecret` is required"));
        }

        let order = ChallengeOrder {
            domain: self.options.domain.clone(),
            contact_email: self.options.contact_email.clone(),
            key_algorithm: self.options.key_algorithm.clone(),
            nameservers: self.options.nameservers.clone(),
            propagation_timeout: self.options.propagation_timeout(),
            dns_provider: DnsProviderSettings::GoDaddy {
                api_key: access.api_key,
                api_secret: access.api_secret,
            },
        };
        self.issuer.issue(cancel, &order).await
    }
}

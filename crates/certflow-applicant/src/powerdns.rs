//! PowerDNS challenge provider (self-hosted)

use crate::options::{AcmeIssuer, ApplyOptions, ChallengeOrder, DnsProviderSettings};
use async_trait::async_trait;
use certflow_provider::{
    Applicant, CancelToken, IssuedCertificate, ProviderError, Result, decode_access,
};
use serde::Deserialize;
use std::sync::Arc;
use url::Url;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PowerDnsAccess {
    #[serde(default)]
    api_url: String,
    #[serde(default)]
    api_key: String,
}

pub struct PowerDnsApplicant {
    options: ApplyOptions,
    issuer: Arc<dyn AcmeIssuer>,
}

impl PowerDnsApplicant {
    pub fn new(options: ApplyOptions, issuer: Arc<dyn AcmeIssuer>) -> Self {
        Self { options, issuer }
    }
}

#[async_trait]
impl Applicant for PowerDnsApplicant {
    async fn apply(&self, cancel: &CancelToken) -> Result<IssuedCertificate> {
        let access: PowerDnsAccess = decode_access(&self.options.access)?;
        let api_url = Url::parse(&access.api_url)
            .map_err(|_| ProviderError::config("access `apiUrl` is not a valid url"))?;
        if access.api_key.is_empty() {
            return Err(ProviderError::config("access `apiKey` is required"));
        }

        let order = ChallengeOrder {
            domain: self.options.domain.clone(),
            contact_email: self.options.contact_email.clone(),
            key_algorithm: self.options.key_algorithm.clone(),
            nameservers: self.options.nameservers.clone(),
            propagation_timeout: self.options.propagation_timeout(),
            dns_provider: DnsProviderSettings::PowerDns {
                api_url,
                api_key: access.api_key,
            },
        };
        self.issuer.issue(cancel, &order).await
    }
}

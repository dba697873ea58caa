//! Apply options and the ACME issuance boundary

use async_trait::async_trait;
use certflow_provider::{CancelToken, IssuedCertificate, Result};
use std::time::Duration;
use url::Url;

/// Options for one certificate application
///
/// `access` is the opaque serialized credential blob; its recognized fields
/// are vendor-specific. `timeout_secs == 0` means "use the challenge
/// library's default propagation timeout".
#[derive(Debug, Clone)]
pub struct ApplyOptions {
    pub domain: String,
    pub contact_email: String,
    pub access: String,
    pub key_algorithm: String,
    pub nameservers: Vec<String>,
    pub timeout_secs: u64,
}

impl ApplyOptions {
    /// Propagation timeout override, `None` when the vendor default applies.
    pub fn propagation_timeout(&self) -> Option<Duration> {
        if self.timeout_secs == 0 {
            None
        } else {
            Some(Duration::from_secs(self.timeout_secs))
        }
    }
}

/// Validated, vendor-typed DNS provider settings for the challenge solver
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DnsProviderSettings {
    Route53 {
        access_key_id: String,
        secret_access_key: String,
        region: String,
        hosted_zone_id: String,
    },
    Cloudflare {
        dns_api_token: String,
    },
    GoDaddy {
        api_key: String,
        api_secret: String,
    },
    PowerDns {
        api_url: Url,
        api_key: String,
    },
}

/// A fully prepared challenge order handed to the ACME engine
#[derive(Debug, Clone)]
pub struct ChallengeOrder {
    pub domain: String,
    pub contact_email: String,
    pub key_algorithm: String,
    pub nameservers: Vec<String>,
    pub propagation_timeout: Option<Duration>,
    pub dns_provider: DnsProviderSettings,
}

/// ACME/DNS-01 protocol engine, provided by the embedding application
///
/// The protocol itself (account, order, challenge records, finalization) is
/// out of scope here; this layer only prepares the validated DNS provider
/// settings the engine needs.
#[async_trait]
pub trait AcmeIssuer: Send + Sync {
    async fn issue(&self, cancel: &CancelToken, order: &ChallengeOrder)
    -> Result<IssuedCertificate>;
}

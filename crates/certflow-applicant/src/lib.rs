//! DNS-01 challenge-solving providers for Certflow
//!
//! One module per registrar. Each applicant decodes its vendor access blob,
//! validates the vendor-mandated fields, and hands a typed challenge order to
//! the embedding application's ACME engine. Vendor dispatch goes through a
//! discriminator enum so the set of supported registrars is checked at
//! compile time.

pub mod aws;
pub mod cloudflare;
pub mod godaddy;
pub mod options;
pub mod powerdns;

pub use aws::AwsApplicant;
pub use cloudflare::CloudflareApplicant;
pub use godaddy::GoDaddyApplicant;
pub use options::{AcmeIssuer, ApplyOptions, ChallengeOrder, DnsProviderSettings};
pub use powerdns::PowerDnsApplicant;

use certflow_provider::{Applicant, ProviderError, Result};
use std::str::FromStr;
use std::sync::Arc;

/// Supported DNS registrar discriminators
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DnsProviderKind {
    Aws,
    Cloudflare,
    GoDaddy,
    PowerDns,
}

impl FromStr for DnsProviderKind {
    type Err = ProviderError;

    fn from_str(value: &str) -> Result<Self> {
        match value {
            "aws" | "route53" => Ok(Self::Aws),
            "cloudflare" => Ok(Self::Cloudflare),
            "godaddy" => Ok(Self::GoDaddy),
            "powerdns" | "pdns" => Ok(Self::PowerDns),
            other => Err(ProviderError::config(format!(
                "unsupported dns provider '{other}'"
            ))),
        }
    }
}

/// Construct the applicant for `kind`.
///
/// Credential validation is deferred to `apply`, matching the facade
/// contract: construction is side-effect-free.
pub fn new_applicant(
    kind: DnsProviderKind,
    options: ApplyOptions,
    issuer: Arc<dyn AcmeIssuer>,
) -> Box<dyn Applicant> {
    match kind {
        DnsProviderKind::Aws => Box::new(AwsApplicant::new(options, issuer)),
        DnsProviderKind::Cloudflare => Box::new(CloudflareApplicant::new(options, issuer)),
        DnsProviderKind::GoDaddy => Box::new(GoDaddyApplicant::new(options, issuer)),
        DnsProviderKind::PowerDns => Box::new(PowerDnsApplicant::new(options, issuer)),
    }
}

#[cfg(test)]
pub(crate) mod tests_support {
    use super::options::{AcmeIssuer, ApplyOptions, ChallengeOrder};
    use async_trait::async_trait;
    use certflow_provider::{CancelToken, IssuedCertificate, Result};
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Issuer stub that records the last order it was handed.
    #[derive(Default)]
    pub struct CapturingIssuer {
        order: Mutex<Option<ChallengeOrder>>,
        call_count: AtomicUsize,
    }

    impl CapturingIssuer {
        pub fn last_order(&self) -> Option<ChallengeOrder> {
            self.order.lock().unwrap().clone()
        }

        pub fn calls(&self) -> usize {
            self.call_count.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl AcmeIssuer for CapturingIssuer {
        async fn issue(
            &self,
            _cancel: &CancelToken,
            order: &ChallengeOrder,
        ) -> Result<IssuedCertificate> {
            self.call_count.fetch_add(1, Ordering::SeqCst);
            *self.order.lock().unwrap() = Some(order.clone());
            Ok(IssuedCertificate {
                certificate_pem: "CERT".to_string(),
                private_key_pem: "KEY".to_string(),
                issuer_certificate_pem: "ISSUER".to_string(),
                csr_pem: "CSR".to_string(),
            })
        }
    }

    pub fn options_with_access(access: &str) -> ApplyOptions {
        ApplyOptions {
            domain: "*.example.com".to_string(),
            contact_email: "ops@example.com".to_string(),
            access: access.to_string(),
            key_algorithm: "RSA2048".to_string(),
            nameservers: Vec::new(),
            timeout_secs: 0,
        }
    }
}

//! Certificate artifact and result value types

use serde::{Deserialize, Serialize};

/// A certificate/private-key pair, treated as an opaque immutable value
///
/// Identity for dedup purposes is exact match on whitespace-trimmed PEM
/// content of both fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CertificateArtifact {
    pub certificate_pem: String,
    pub private_key_pem: String,
}

impl CertificateArtifact {
    pub fn new(certificate_pem: impl Into<String>, private_key_pem: impl Into<String>) -> Self {
        Self {
            certificate_pem: certificate_pem.into(),
            private_key_pem: private_key_pem.into(),
        }
    }

    /// Content equality against a remote record. A record missing either PEM
    /// field can never match.
    pub fn matches(&self, record: &RemoteRecord) -> bool {
        let (Some(cert), Some(key)) = (&record.certificate_pem, &record.private_key_pem) else {
            return false;
        };
        cert.trim() == self.certificate_pem.trim() && key.trim() == self.private_key_pem.trim()
    }
}

/// Vendor-side representation of a previously uploaded artifact
///
/// Mirrors vendor-owned state; never mutated locally. PEM content is present
/// only where the vendor's list endpoint returns it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RemoteRecord {
    pub id: String,
    pub name: String,
    pub certificate_pem: Option<String>,
    pub private_key_pem: Option<String>,
}

/// Stable remote identifier returned by an upload
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UploadResult {
    pub cert_id: String,
    pub cert_name: String,
}

/// Opaque success marker returned by a deploy
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DeployResult {}

/// Certificate issued by a challenge-solving provider
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IssuedCertificate {
    pub certificate_pem: String,
    pub private_key_pem: String,
    pub issuer_certificate_pem: String,
    pub csr_pem: String,
}

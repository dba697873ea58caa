//! Aliyun CAS provider for Certflow
//!
//! Two provider kinds over the same CAS client: an `Uploader` for the
//! user-certificate store and a `Deployer` that drives CAS deployment jobs
//! onto cloud resources (CDN, load balancers, and friends).

pub mod deployer;
pub mod sdk;
pub mod uploader;

pub use deployer::{AliyunCasDeployConfig, AliyunCasDeployer};
pub use sdk::{AliyunCasClient, DEFAULT_REGION, endpoint_for_region, map_job_status};
pub use uploader::{AliyunCasConfig, AliyunCasUploader};

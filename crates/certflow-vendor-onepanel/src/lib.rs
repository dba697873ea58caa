//! 1Panel SSL store provider for Certflow
//!
//! Implements the `Uploader` contract against a self-hosted 1Panel instance.
//! Uploads are idempotent: the website-SSL list is scanned page by page for
//! an existing record with the same PEM content before anything is created.

pub mod provider;
pub mod sdk;

pub use provider::{OnePanelConfig, OnePanelUploader};
pub use sdk::{OnePanelClient, SslItem};

//! Access-credential decoding
//!
//! Decoding is purely syntactic: unknown fields are ignored for forward
//! compatibility, and missing required fields are only detected later, when
//! the vendor client is constructed.

use crate::error::Result;
use serde::de::DeserializeOwned;

/// Decode a provider-specific access-credential blob into a typed config.
///
/// Fails with a `Decode` error if the blob is not well-formed JSON for the
/// expected shape.
pub fn decode_access<T: DeserializeOwned>(raw: &str) -> Result<T> {
    Ok(serde_json::from_str(raw)?)
}

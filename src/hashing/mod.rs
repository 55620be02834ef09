//! Content digests used for duplicate tracking and reporting.

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

/// Computes the SHA-256 digest of the given data and returns it as a hex string.
pub fn sha256_digest(data: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(data);
    format!("{:x}", hasher.finalize())
}

/// Computes the MD5 digest of the given data and returns it as a hex string.
pub fn md5_digest(data: &[u8]) -> String {
    format!("{:x}", md5::compute(data))
}

/// Digests reported for an extracted entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Hashes {
    pub md5: String,
    pub sha256: String,
}

impl Hashes {
    pub fn compute(data: &[u8]) -> Self {
        Self {
            md5: md5_digest(data),
            sha256: sha256_digest(data),
        }
    }
}

//! Hash source expressions for inline content.

use base64::{engine::general_purpose::STANDARD as BASE64, Engine as _};
use common::{CspError, CspResult};
use sha2::{Digest, Sha256, Sha384, Sha512};
use std::fmt;

/// Hash algorithm usable in a CSP hash source.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum HashAlgorithm {
    /// SHA-256.
    #[default]
    Sha256,
    /// SHA-384.
    Sha384,
    /// SHA-512.
    Sha512,
}

impl HashAlgorithm {
    /// Get algorithm name.
    pub fn name(&self) -> &'static str {
        match self {
            HashAlgorithm::Sha256 => "sha256",
            HashAlgorithm::Sha384 => "sha384",
            HashAlgorithm::Sha512 => "sha512",
        }
    }

    /// Parse algorithm from name.
    pub fn from_name(name: &str) -> CspResult<Self> {
        match name.to_lowercase().as_str() {
            "sha256" => Ok(HashAlgorithm::Sha256),
            "sha384" => Ok(HashAlgorithm::Sha384),
            "sha512" => Ok(HashAlgorithm::Sha512),
            _ => Err(CspError::unsupported_algorithm(name)),
        }
    }

    /// Hash content using this algorithm.
    pub fn hash(&self, content: &[u8]) -> Vec<u8> {
        match self {
            HashAlgorithm::Sha256 => {
                let mut hasher = Sha256::new();
                hasher.update(content);
                hasher.finalize().to_vec()
            }
            HashAlgorithm::Sha384 => {
                let mut hasher = Sha384::new();
                hasher.update(content);
                hasher.finalize().to_vec()
            }
            HashAlgorithm::Sha512 => {
                let mut hasher = Sha512::new();
                hasher.update(content);
                hasher.finalize().to_vec()
            }
        }
    }
}

/// A quoted hash source expression, e.g. `'sha256-<base64>'`.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct HashToken(String);

impl HashToken {
    /// Hash `content` exactly as given (no trimming or normalization).
    pub fn compute(content: &str, algorithm: HashAlgorithm) -> Self {
        let digest = algorithm.hash(content.as_bytes());
        HashToken(format!("'{}-{}'", algorithm.name(), BASE64.encode(digest)))
    }

    /// SHA-256 token, the algorithm inline content is allow-listed with.
    pub fn sha256(content: &str) -> Self {
        Self::compute(content, HashAlgorithm::Sha256)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The base64 digest without the algorithm prefix or quotes.
    pub fn digest(&self) -> &str {
        self.0
            .trim_matches('\'')
            .split_once('-')
            .map(|(_, digest)| digest)
            .unwrap_or("")
    }
}

impl fmt::Display for HashToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for HashToken {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

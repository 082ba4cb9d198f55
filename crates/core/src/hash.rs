//! SHA-1 hashing primitives for content-addressed storage

use crate::error::{NoraError, Result};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use sha1::{Digest, Sha1};
use std::path::Path;
use std::str::FromStr;

/// A SHA-1 hash (20 bytes), rendered as 40 lowercase hex characters
#[derive(Copy, Clone, Hash, Eq, PartialEq, Ord, PartialOrd)]
pub struct Sha1Hash([u8; 20]);

impl Sha1Hash {
    /// Length of the hex form
    pub const HEX_LEN: usize = 40;

    pub const fn from_bytes(bytes: [u8; 20]) -> Self {
        Self(bytes)
    }

    /// Convert to lowercase hex string
    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }

    /// Parse from hex string
    pub fn from_hex(hex: &str) -> Result<Self> {
        if hex.len() != Self::HEX_LEN {
            return Err(NoraError::InvalidHash(format!(
                "expected {} hex characters, got {}",
                Self::HEX_LEN,
                hex.len()
            )));
        }

        let mut bytes = [0u8; 20];
        hex::decode_to_slice(hex, &mut bytes)
            .map_err(|e| NoraError::InvalidHash(format!("{}: {}", hex, e)))?;
        Ok(Self(bytes))
    }

    /// Object fan-out split: (`hash[0:2]`, `hash[2:]`)
    pub fn shard(&self) -> (String, String) {
        let hex = self.to_hex();
        let (prefix, rest) = hex.split_at(2);
        (prefix.to_string(), rest.to_string())
    }
}

impl std::fmt::Debug for Sha1Hash {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Sha1Hash({})", self.to_hex())
    }
}

impl std::fmt::Display for Sha1Hash {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_hex())
    }
}

impl FromStr for Sha1Hash {
    type Err = NoraError;

    fn from_str(s: &str) -> Result<Self> {
        Self::from_hex(s)
    }
}

// Persisted as the hex string so index and snapshot JSON stay human-readable.
impl Serialize for Sha1Hash {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for Sha1Hash {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let hex = String::deserialize(deserializer)?;
        Sha1Hash::from_hex(&hex).map_err(serde::de::Error::custom)
    }
}

/// Hash bytes using SHA-1
pub fn hash_bytes(data: &[u8]) -> Sha1Hash {
    let mut hasher = IncrementalHasher::new();
    hasher.update(data);
    hasher.finalize()
}

/// Hash a file using SHA-1 (streaming for large files)
pub fn hash_file(path: &Path) -> Result<Sha1Hash> {
    use std::fs::File;
    use std::io::{BufReader, Read};

    let file = File::open(path).map_err(|e| NoraError::io(path, e))?;
    let mut reader = BufReader::new(file);
    let mut hasher = IncrementalHasher::new();

    let mut buffer = [0u8; 8192];
    loop {
        let bytes_read = reader
            .read(&mut buffer)
            .map_err(|e| NoraError::io(path, e))?;
        if bytes_read == 0 {
            break;
        }
        hasher.update(&buffer[..bytes_read]);
    }

    Ok(hasher.finalize())
}

/// Incremental hasher for building hashes across multiple chunks
pub struct IncrementalHasher {
    inner: Sha1,
}

impl IncrementalHasher {
    pub fn new() -> Self {
        Self { inner: Sha1::new() }
    }

    /// Update the hash with more data
    pub fn update(&mut self, data: &[u8]) {
        self.inner.update(data);
    }

    /// Finalize and return the hash
    pub fn finalize(self) -> Sha1Hash {
        let digest = self.inner.finalize();
        let mut bytes = [0u8; 20];
        bytes.copy_from_slice(&digest);
        Sha1Hash::from_bytes(bytes)
    }
}

impl Default for IncrementalHasher {
    fn default() -> Self {
        Self::new()
    }
}

//! Entry fingerprints.
//!
//! A fingerprint is the MD5 digest of an entry's **name**, not of its
//! contents. Two files with the same name in different directories share a
//! fingerprint, and editing a file never changes it. This is legacy behavior
//! that downstream consumers of the listing depend on, so it is kept as is.

use std::fmt;

use serde::{Deserialize, Serialize};

/// 128-bit digest of an entry name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub struct Fingerprint(pub [u8; 16]);

impl Fingerprint {
    /// Create a fingerprint from raw digest bytes.
    pub fn new(bytes: [u8; 16]) -> Self {
        Self(bytes)
    }

    /// Get the fingerprint as a 32 character lowercase hex string.
    pub fn to_hex(&self) -> String {
        self.0.iter().map(|b| format!("{b:02x}")).collect()
    }

    /// Parse a 32 character hex string.
    pub fn from_hex(hex: &str) -> Option<Self> {
        if hex.len() != 32 || !hex.is_ascii() {
            return None;
        }
        let mut bytes = [0u8; 16];
        for (i, byte) in bytes.iter_mut().enumerate() {
            *byte = u8::from_str_radix(&hex[i * 2..i * 2 + 2], 16).ok()?;
        }
        Some(Self(bytes))
    }
}

impl fmt::Display for Fingerprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl From<Fingerprint> for String {
    fn from(fingerprint: Fingerprint) -> Self {
        fingerprint.to_hex()
    }
}

impl TryFrom<String> for Fingerprint {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::from_hex(&value).ok_or_else(|| format!("invalid fingerprint: {value}"))
    }
}

/// Fingerprint an entry name: MD5 over its UTF-8 bytes.
pub fn fingerprint(name: &str) -> Fingerprint {
    Fingerprint(md5::compute(name.as_bytes()).0)
}

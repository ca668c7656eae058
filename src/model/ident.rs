use std::collections::HashSet;
use std::fmt;

use crate::error::XcbundleError;

const ID_LEN: usize = 24;
const MAX_ATTEMPTS: usize = 64;

/// Identifier naming a record in a project descriptor.
///
/// Xcode generates these as 24 uppercase hex digits. Hand-edited projects
/// can carry other tokens, so anything found in a document is kept
/// verbatim; only identifiers we generate are guaranteed canonical.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ObjectId(String);

impl ObjectId {
    pub fn new(text: impl Into<String>) -> Self {
        Self(text.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// True for the 24-digit uppercase hex form Xcode emits.
    pub fn is_canonical(&self) -> bool {
        self.0.len() == ID_LEN
            && self
                .0
                .bytes()
                .all(|b| b.is_ascii_digit() || (b'A'..=b'F').contains(&b))
    }

    /// Generates a fresh identifier not present in `existing`.
    pub fn generate(existing: &HashSet<ObjectId>) -> Result<Self, XcbundleError> {
        for _ in 0..MAX_ATTEMPTS {
            let id = Self::random();
            debug_assert!(id.is_canonical());
            if !existing.contains(&id) {
                return Ok(id);
            }
        }
        Err(XcbundleError::IdentExhausted)
    }

    fn random() -> Self {
        let hex = uuid::Uuid::new_v4().simple().to_string();
        Self(hex[..ID_LEN].to_ascii_uppercase())
    }
}

impl fmt::Display for ObjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for ObjectId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

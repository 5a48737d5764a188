use std::fmt;

use serde::{Deserialize, Serialize};

/// Store-assigned guest identifier.
///
/// Opaque to this client: compared for equality, never parsed or
/// ordered. The store serializes it as a bare JSON string.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GuestId(pub String);

impl GuestId {
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for GuestId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for GuestId {
    fn from(raw: &str) -> Self {
        Self(raw.to_string())
    }
}

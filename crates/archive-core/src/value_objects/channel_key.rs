//! Channel key - case-normalized channel identifier used for metadata lookups

use std::fmt;

use serde::{Deserialize, Serialize};

/// Case-folded channel name
///
/// Deserializing a key normalizes it, so keys read back from a metadata
/// document written by hand still match lookups.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub struct ChannelKey(String);

impl ChannelKey {
    /// Normalize a channel name into a key
    pub fn new(name: &str) -> Self {
        Self(name.trim().to_lowercase())
    }

    /// Get the normalized key
    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<String> for ChannelKey {
    fn from(name: String) -> Self {
        Self::new(&name)
    }
}

impl From<&str> for ChannelKey {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

impl From<ChannelKey> for String {
    fn from(key: ChannelKey) -> Self {
        key.0
    }
}

impl AsRef<str> for ChannelKey {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ChannelKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalization() {
        assert_eq!(ChannelKey::new("General").as_str(), "general");
        assert_eq!(ChannelKey::new("  Dev-Ops ").as_str(), "dev-ops");
        assert_eq!(ChannelKey::new("GENERAL"), ChannelKey::new("general"));
    }

    #[test]
    fn test_deserialize_normalizes() {
        let key: ChannelKey = serde_json::from_str("\"Random\"").unwrap();
        assert_eq!(key.as_str(), "random");
        assert_eq!(serde_json::to_string(&key).unwrap(), "\"random\"");
    }
}

//! The persisted output document.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Base64 ciphertext per giver.
///
/// Serializes as a flat JSON object ordered by participant. This is the only
/// artifact a run writes; it carries no plaintext assignment information.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EncryptedAssignment {
    entries: BTreeMap<String, String>,
}

impl EncryptedAssignment {
    /// Wrap base64 ciphertexts keyed by giver.
    pub fn from_entries(entries: BTreeMap<String, String>) -> Self {
        Self { entries }
    }

    /// Base64 ciphertext for `participant`.
    pub fn get(&self, participant: &str) -> Option<&str> {
        self.entries.get(participant).map(String::as_str)
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True if there are no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// `(participant, base64 ciphertext)` pairs in participant order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(p, c)| (p.as_str(), c.as_str()))
    }

    /// Pretty-printed JSON with 2-space indentation and a trailing newline.
    pub fn to_json_pretty(&self) -> String {
        let Ok(mut json) = serde_json::to_string_pretty(&self.entries) else {
            unreachable!("a map of strings always serializes");
        };
        json.push('\n');
        json
    }
}

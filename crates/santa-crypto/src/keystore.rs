//! Participant public keys.
//!
//! The key-store document is a flat JSON object mapping each participant to
//! the standard base64 encoding of their DER public key:
//!
//! ```json
//! {
//!   "Alice": "MIIBIjANBgkqhkiG9w0BAQEFAAOCAQ8AMIIBCgKCAQEA...",
//!   "Bob": "MIIBIjANBgkqhkiG9w0BAQEFAAOCAQ8AMIIBCgKCAQEA..."
//! }
//! ```
//!
//! Keys are accepted as `SubjectPublicKeyInfo` (what browser key generators
//! export) or as a bare PKCS#1 `RSAPublicKey`. ASCII whitespace inside a
//! value is ignored, so PEM-style bodies wrapped at 64 columns load as is.

use std::collections::BTreeMap;

use base64::{Engine as _, engine::general_purpose::STANDARD};
use rsa::{RsaPublicKey, pkcs1::DecodeRsaPublicKey, pkcs8::DecodePublicKey};

use crate::error::KeyStoreError;

/// Public keys by participant, ordered by name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct KeyStore {
    keys: BTreeMap<String, RsaPublicKey>,
}

impl KeyStore {
    /// Create an empty key store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a key store from already decoded keys.
    ///
    /// A later entry for the same participant replaces an earlier one.
    pub fn from_keys<I, S>(keys: I) -> Self
    where
        I: IntoIterator<Item = (S, RsaPublicKey)>,
        S: Into<String>,
    {
        Self { keys: keys.into_iter().map(|(name, key)| (name.into(), key)).collect() }
    }

    /// Parse a key-store document.
    ///
    /// # Errors
    ///
    /// - `MalformedDocument`: not a JSON object whose values are all strings
    /// - `InvalidEncoding`: a value is not standard base64 once whitespace is
    ///   stripped
    /// - `InvalidKey`: decoded bytes are not a DER RSA public key
    pub fn from_json(document: &str) -> Result<Self, KeyStoreError> {
        let encoded: BTreeMap<String, String> = serde_json::from_str(document)
            .map_err(|e| KeyStoreError::MalformedDocument { reason: e.to_string() })?;

        let mut keys = BTreeMap::new();
        for (participant, key_b64) in encoded {
            let compact: String = key_b64.split_ascii_whitespace().collect();
            let der = STANDARD.decode(compact).map_err(|e| KeyStoreError::InvalidEncoding {
                participant: participant.clone(),
                reason: e.to_string(),
            })?;

            let key = decode_public_key(&der).map_err(|reason| KeyStoreError::InvalidKey {
                participant: participant.clone(),
                reason,
            })?;

            keys.insert(participant, key);
        }

        Ok(Self { keys })
    }

    /// Add or replace a participant's key.
    pub fn insert(&mut self, participant: impl Into<String>, key: RsaPublicKey) {
        self.keys.insert(participant.into(), key);
    }

    /// Key for `participant`, if present.
    pub fn get(&self, participant: &str) -> Option<&RsaPublicKey> {
        self.keys.get(participant)
    }

    /// Participant names in order. This is the roster handed to the generator.
    pub fn participants(&self) -> Vec<&str> {
        self.keys.keys().map(String::as_str).collect()
    }

    /// Number of participants.
    pub fn len(&self) -> usize {
        self.keys.len()
    }

    /// True if no keys are loaded.
    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }
}

/// Parse DER public key bytes, trying SPKI before PKCS#1.
fn decode_public_key(der: &[u8]) -> Result<RsaPublicKey, String> {
    match RsaPublicKey::from_public_key_der(der) {
        Ok(key) => Ok(key),
        Err(spki_err) => RsaPublicKey::from_pkcs1_der(der)
            .map_err(|pkcs1_err| format!("not SPKI ({spki_err}) or PKCS#1 ({pkcs1_err})")),
    }
}

//! Error types for key loading and sealing.

use thiserror::Error;

/// Errors decoding the key-store document.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum KeyStoreError {
    /// The document is not a JSON object of strings.
    #[error("malformed key store: {reason}")]
    MalformedDocument {
        /// Parser diagnostic
        reason: String,
    },

    /// A key value is not valid standard base64.
    #[error("invalid base64 key for {participant}: {reason}")]
    InvalidEncoding {
        /// Participant whose key failed to decode
        participant: String,
        /// Decoder diagnostic
        reason: String,
    },

    /// The decoded bytes are not a DER RSA public key.
    #[error("invalid public key for {participant}: {reason}")]
    InvalidKey {
        /// Participant whose key failed to parse
        participant: String,
        /// Parser diagnostic
        reason: String,
    },
}

/// Errors encrypting an assignment.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SealError {
    /// A giver in the assignment has no key in the key store.
    #[error("no public key for participant {participant}")]
    MissingKey {
        /// The giver without a key
        participant: String,
    },

    /// The encryption primitive rejected the message.
    #[error("failed to encrypt assignment for {participant}: {reason}")]
    Encryption {
        /// The giver whose entry failed
        participant: String,
        /// Diagnostic from the primitive
        reason: String,
    },
}

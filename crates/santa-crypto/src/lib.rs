//! Santa Cryptographic Sealing
//!
//! Turns a plaintext [`santa_core::Assignment`] into an
//! [`EncryptedAssignment`] that only each giver can read. Pure functions;
//! callers provide the RNG.
//!
//! ```text
//! key-store JSON ──base64──▶ DER ──▶ KeyStore
//!                                       │
//! Assignment ──"You are assigned to: R"─┤
//!                                       ▼
//!                        RSA-OAEP(SHA-256) to giver's key
//!                                       │
//!                                       ▼
//!                       base64 ──▶ EncryptedAssignment JSON
//! ```
//!
//! # Security
//!
//! - Each entry is encrypted to the giver's own public key, so a giver learns
//!   only their own recipient
//! - OAEP is randomized; identical draws produce unrelated ciphertexts
//! - No private key material is handled here
//! - Sealing is all or nothing: any missing key or encryption failure
//!   discards the whole batch

#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod encrypted;
mod error;
mod keystore;
mod seal;

pub use encrypted::EncryptedAssignment;
pub use error::{KeyStoreError, SealError};
pub use keystore::KeyStore;
pub use seal::{
    ASSIGNMENT_MESSAGE_PREFIX, assignment_message, encrypt_all, max_message_len,
    parse_assignment_message, seal_entry,
};

//! RSA-OAEP sealing of assignments.
//!
//! Every giver's entry is `"You are assigned to: {recipient}"` encrypted to
//! the giver's own public key with RSA-OAEP, SHA-256 for both the digest and
//! MGF1, and no label. The ciphertext is stored as standard base64.
//!
//! OAEP is randomized: sealing the same assignment twice yields different
//! ciphertexts. The caller MUST provide a cryptographically secure RNG in
//! production.

use std::collections::BTreeMap;

use base64::{Engine as _, engine::general_purpose::STANDARD};
use rand::{CryptoRng, RngCore};
use rsa::{Oaep, RsaPublicKey, traits::PublicKeyParts};
use santa_core::Assignment;
use sha2::{Digest, Sha256};

use crate::{encrypted::EncryptedAssignment, error::SealError, keystore::KeyStore};

/// Fixed prefix of every plaintext entry.
pub const ASSIGNMENT_MESSAGE_PREFIX: &str = "You are assigned to: ";

/// Plaintext sealed for a giver whose recipient is `recipient`.
pub fn assignment_message(recipient: &str) -> String {
    format!("{ASSIGNMENT_MESSAGE_PREFIX}{recipient}")
}

/// Recipient named in a decrypted entry, or `None` if it lacks the prefix.
pub fn parse_assignment_message(message: &str) -> Option<&str> {
    message.strip_prefix(ASSIGNMENT_MESSAGE_PREFIX)
}

/// Largest plaintext, in bytes, OAEP-SHA256 can seal under `key`.
///
/// `k - 2 * hLen - 2` where `k` is the modulus size in bytes.
pub fn max_message_len(key: &RsaPublicKey) -> usize {
    key.size().saturating_sub(2 * <Sha256 as Digest>::output_size() + 2)
}

/// Seal one entry to `key`, returning raw ciphertext bytes.
///
/// # Errors
///
/// - `Encryption`: message exceeds [`max_message_len`] or the primitive
///   failed
pub fn seal_entry<R: CryptoRng + RngCore>(
    giver: &str,
    recipient: &str,
    key: &RsaPublicKey,
    rng: &mut R,
) -> Result<Vec<u8>, SealError> {
    let message = assignment_message(recipient);
    let limit = max_message_len(key);
    if message.len() > limit {
        return Err(SealError::Encryption {
            participant: giver.to_owned(),
            reason: format!("message is {} bytes, key allows at most {limit}", message.len()),
        });
    }

    key.encrypt(rng, Oaep::new::<Sha256>(), message.as_bytes()).map_err(|e| {
        SealError::Encryption { participant: giver.to_owned(), reason: e.to_string() }
    })
}

/// Seal every entry of `assignment` to its giver's key.
///
/// All or nothing: the first failure aborts and nothing is returned.
///
/// # Errors
///
/// - `MissingKey`: a giver has no key in `keys`
/// - `Encryption`: sealing an entry failed
pub fn encrypt_all<R: CryptoRng + RngCore>(
    assignment: &Assignment,
    keys: &KeyStore,
    rng: &mut R,
) -> Result<EncryptedAssignment, SealError> {
    let mut entries = BTreeMap::new();

    for (giver, recipient) in assignment.iter() {
        let key = keys
            .get(giver)
            .ok_or_else(|| SealError::MissingKey { participant: giver.to_owned() })?;

        let ciphertext = seal_entry(giver, recipient, key, rng)?;
        entries.insert(giver.to_owned(), STANDARD.encode(ciphertext));
    }

    Ok(EncryptedAssignment::from_entries(entries))
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;
    use rsa::RsaPrivateKey;

    use super::*;

    fn test_private_key(seed: u64) -> RsaPrivateKey {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        RsaPrivateKey::new(&mut rng, 1024).unwrap()
    }

    fn open(private: &RsaPrivateKey, ciphertext: &[u8]) -> String {
        let plaintext = private.decrypt(Oaep::new::<Sha256>(), ciphertext).unwrap();
        String::from_utf8(plaintext).unwrap()
    }

    #[test]
    fn message_format() {
        assert_eq!(assignment_message("Bob"), "You are assigned to: Bob");
        assert_eq!(parse_assignment_message("You are assigned to: Bob"), Some("Bob"));
        assert_eq!(parse_assignment_message("You owe Bob a gift"), None);
    }

    #[test]
    fn unicode_recipient_round_trips_through_message() {
        let message = assignment_message("Zoë");

        assert_eq!(message.len(), ASSIGNMENT_MESSAGE_PREFIX.len() + "Zoë".len());
        assert_eq!(parse_assignment_message(&message), Some("Zoë"));
    }

    #[test]
    fn sealed_entry_opens_with_private_key() {
        let private = test_private_key(1);
        let mut rng = ChaCha8Rng::seed_from_u64(100);

        let ciphertext = seal_entry("Alice", "Bob", &private.to_public_key(), &mut rng).unwrap();

        assert_eq!(ciphertext.len(), 128);
        assert_eq!(open(&private, &ciphertext), "You are assigned to: Bob");
    }

    #[test]
    fn sealing_is_randomized() {
        let public = test_private_key(2).to_public_key();
        let mut rng = ChaCha8Rng::seed_from_u64(100);

        let first = seal_entry("Alice", "Bob", &public, &mut rng).unwrap();
        let second = seal_entry("Alice", "Bob", &public, &mut rng).unwrap();

        assert_ne!(first, second);
    }

    #[test]
    fn max_message_len_for_1024_bit_key() {
        let public = test_private_key(3).to_public_key();

        // 128 - 2 * 32 - 2
        assert_eq!(max_message_len(&public), 62);
    }

    #[test]
    fn oversized_message_is_rejected() {
        let public = test_private_key(4).to_public_key();
        let mut rng = ChaCha8Rng::seed_from_u64(100);
        let long_name = "X".repeat(max_message_len(&public));

        let result = seal_entry("Alice", &long_name, &public, &mut rng);

        assert!(matches!(
            result,
            Err(SealError::Encryption { participant, .. }) if participant == "Alice"
        ));
    }

    #[test]
    fn message_at_limit_is_sealed() {
        let private = test_private_key(5);
        let public = private.to_public_key();
        let mut rng = ChaCha8Rng::seed_from_u64(100);
        let name = "Y".repeat(max_message_len(&public) - ASSIGNMENT_MESSAGE_PREFIX.len());

        let ciphertext = seal_entry("Alice", &name, &public, &mut rng).unwrap();

        assert_eq!(parse_assignment_message(&open(&private, &ciphertext)), Some(name.as_str()));
    }

    #[test]
    fn encrypt_all_covers_every_giver() {
        let alice = test_private_key(10);
        let bob = test_private_key(11);
        let carol = test_private_key(12);
        let keys = KeyStore::from_keys([
            ("Alice", alice.to_public_key()),
            ("Bob", bob.to_public_key()),
            ("Carol", carol.to_public_key()),
        ]);
        let assignment =
            Assignment::from_pairs([("Alice", "Bob"), ("Bob", "Carol"), ("Carol", "Alice")])
                .unwrap();
        let mut rng = ChaCha8Rng::seed_from_u64(100);

        let sealed = encrypt_all(&assignment, &keys, &mut rng).unwrap();

        assert_eq!(sealed.len(), 3);
        for (giver, private, expected) in
            [("Alice", &alice, "Bob"), ("Bob", &bob, "Carol"), ("Carol", &carol, "Alice")]
        {
            let ciphertext = STANDARD.decode(sealed.get(giver).unwrap()).unwrap();
            let name = expected.as_bytes();
            assert!(!ciphertext.windows(name.len()).any(|w| w == name));
            assert_eq!(parse_assignment_message(&open(private, &ciphertext)), Some(expected));
        }
    }

    #[test]
    fn missing_key_fails_whole_batch() {
        let keys = KeyStore::from_keys([
            ("Alice", test_private_key(20).to_public_key()),
            ("Carol", test_private_key(21).to_public_key()),
        ]);
        let assignment =
            Assignment::from_pairs([("Alice", "Bob"), ("Bob", "Carol"), ("Carol", "Alice")])
                .unwrap();
        let mut rng = ChaCha8Rng::seed_from_u64(100);

        let result = encrypt_all(&assignment, &keys, &mut rng);

        assert_eq!(result, Err(SealError::MissingKey { participant: "Bob".to_string() }));
    }
}

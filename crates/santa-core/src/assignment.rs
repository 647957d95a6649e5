//! The giver to recipient mapping.
//!
//! An [`Assignment`] only exists in memory. It deliberately has no
//! serialization support and its `Debug` output omits the pairs, so the
//! plaintext result of a draw cannot end up in a file or a log line by
//! accident.

use std::{
    collections::{BTreeMap, BTreeSet},
    fmt,
};

use crate::error::AssignmentError;

/// A complete gift exchange draw.
///
/// # Invariants
///
/// - Every participant appears exactly once as a giver and exactly once as a
///   recipient
/// - No giver is their own recipient
/// - No two participants are assigned to each other
#[derive(Clone, PartialEq, Eq)]
pub struct Assignment {
    pairs: BTreeMap<String, String>,
}

impl Assignment {
    /// Build an assignment from explicit `(giver, recipient)` pairs.
    ///
    /// Checks every invariant listed on [`Assignment`].
    ///
    /// # Errors
    ///
    /// - `DuplicateParticipant` if a giver appears twice
    /// - `SelfAssignment` if a giver is paired with themselves
    /// - `NotAPermutation` if the recipients are not exactly the givers
    /// - `ReciprocalPair` if two participants are assigned to each other
    pub fn from_pairs<I, G, R>(pairs: I) -> Result<Self, AssignmentError>
    where
        I: IntoIterator<Item = (G, R)>,
        G: Into<String>,
        R: Into<String>,
    {
        let mut map = BTreeMap::new();
        for (giver, recipient) in pairs {
            let giver = giver.into();
            let recipient = recipient.into();
            if giver == recipient {
                return Err(AssignmentError::SelfAssignment { name: giver });
            }
            if map.contains_key(&giver) {
                return Err(AssignmentError::DuplicateParticipant { name: giver });
            }
            map.insert(giver, recipient);
        }

        let mut received = BTreeSet::new();
        for recipient in map.values() {
            if !map.contains_key(recipient) || !received.insert(recipient) {
                return Err(AssignmentError::NotAPermutation { name: recipient.clone() });
            }
        }

        for (giver, recipient) in &map {
            if map.get(recipient) == Some(giver) {
                return Err(AssignmentError::ReciprocalPair {
                    giver: giver.clone(),
                    recipient: recipient.clone(),
                });
            }
        }

        Ok(Self { pairs: map })
    }

    /// Wrap pairs the generator has already checked.
    pub(crate) fn from_checked(pairs: BTreeMap<String, String>) -> Self {
        Self { pairs }
    }

    /// Recipient assigned to `giver`, if `giver` takes part.
    pub fn recipient_of(&self, giver: &str) -> Option<&str> {
        self.pairs.get(giver).map(String::as_str)
    }

    /// Number of participants.
    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    /// True if nobody takes part.
    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    /// All givers, in name order.
    pub fn givers(&self) -> impl Iterator<Item = &str> {
        self.pairs.keys().map(String::as_str)
    }

    /// All `(giver, recipient)` pairs, in giver name order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.pairs.iter().map(|(g, r)| (g.as_str(), r.as_str()))
    }
}

impl fmt::Debug for Assignment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Assignment")
            .field("participants", &self.pairs.len())
            .finish_non_exhaustive()
    }
}

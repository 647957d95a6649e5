//! Rejection-sampling assignment generator.
//!
//! Each attempt shuffles the roster and pairs position `i` of the original
//! order with position `i` of the shuffled order. The candidate is accepted
//! when nobody draws themselves and no two participants draw each other.
//! Longer cycles are allowed.
//!
//! The search is uniform over all permutations before filtering, which does
//! not make it uniform over the accepted ones. That is good enough for a gift
//! exchange and the constraint set is intentionally kept to these two rules.

use std::collections::{BTreeMap, HashSet};

use rand::{Rng, seq::SliceRandom};

use crate::{assignment::Assignment, error::AssignmentError};

/// Default number of shuffles tried before giving up.
pub const DEFAULT_MAX_ATTEMPTS: u32 = 1000;

/// Generator configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GeneratorConfig {
    /// Shuffles tried before failing with `GenerationExhausted`.
    pub max_attempts: u32,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self { max_attempts: DEFAULT_MAX_ATTEMPTS }
    }
}

/// A successful draw together with the number of shuffles it took.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedAssignment {
    /// The accepted assignment
    pub assignment: Assignment,
    /// 1-based index of the accepted attempt
    pub attempts: u32,
}

/// Produces constrained assignments from a roster.
///
/// Pure apart from the caller-supplied RNG: the same roster, config and RNG
/// state always produce the same result.
#[derive(Debug, Clone, Default)]
pub struct AssignmentGenerator {
    config: GeneratorConfig,
}

impl AssignmentGenerator {
    /// Create a generator with the given configuration.
    pub fn new(config: GeneratorConfig) -> Self {
        Self { config }
    }

    /// The configuration in use.
    pub fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    /// Draw an assignment for `participants`.
    ///
    /// # Errors
    ///
    /// - `TooFewParticipants`: the roster is empty
    /// - `DuplicateParticipant`: an identifier appears twice
    /// - `GenerationExhausted`: no shuffle passed within `max_attempts`
    pub fn generate<S, R>(
        &self,
        participants: &[S],
        rng: &mut R,
    ) -> Result<GeneratedAssignment, AssignmentError>
    where
        S: AsRef<str>,
        R: Rng + ?Sized,
    {
        validate_roster(participants)?;

        let n = participants.len();
        let mut permuted: Vec<usize> = (0..n).collect();

        for attempt in 1..=self.config.max_attempts {
            permuted.shuffle(rng);

            if is_acceptable(&permuted) {
                tracing::debug!(participants = n, attempts = attempt, "assignment accepted");

                let pairs = permuted
                    .iter()
                    .enumerate()
                    .map(|(giver, &recipient)| {
                        (
                            participants[giver].as_ref().to_owned(),
                            participants[recipient].as_ref().to_owned(),
                        )
                    })
                    .collect::<BTreeMap<_, _>>();

                return Ok(GeneratedAssignment {
                    assignment: Assignment::from_checked(pairs),
                    attempts: attempt,
                });
            }
        }

        tracing::warn!(
            participants = n,
            attempts = self.config.max_attempts,
            "retry budget exhausted"
        );

        Err(AssignmentError::GenerationExhausted {
            attempts: self.config.max_attempts,
            participants: n,
        })
    }
}

/// Draw an assignment using [`GeneratorConfig::default`].
pub fn generate<S, R>(
    participants: &[S],
    rng: &mut R,
) -> Result<GeneratedAssignment, AssignmentError>
where
    S: AsRef<str>,
    R: Rng + ?Sized,
{
    AssignmentGenerator::default().generate(participants, rng)
}

fn validate_roster<S: AsRef<str>>(participants: &[S]) -> Result<(), AssignmentError> {
    if participants.is_empty() {
        return Err(AssignmentError::TooFewParticipants { count: 0 });
    }

    let mut seen = HashSet::with_capacity(participants.len());
    for name in participants {
        let name = name.as_ref();
        if !seen.insert(name) {
            return Err(AssignmentError::DuplicateParticipant { name: name.to_owned() });
        }
    }

    Ok(())
}

/// `permuted[i]` is the roster index of giver `i`'s recipient.
///
/// Identifiers are unique, so looking up the recipient's own draw by index is
/// the same as finding their position in the original order by name.
fn is_acceptable(permuted: &[usize]) -> bool {
    permuted.iter().enumerate().all(|(giver, &recipient)| {
        recipient != giver && permuted[recipient] != giver
    })
}

//! Error types for assignment generation.

use thiserror::Error;

/// Errors produced while building or validating an [`crate::Assignment`].
///
/// None of these are recoverable within a run. A caller that receives one
/// must abort without writing any output.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AssignmentError {
    /// The roster is empty, so there is nobody to assign.
    #[error("too few participants: need at least 2, got {count}")]
    TooFewParticipants {
        /// Number of participants supplied
        count: usize,
    },

    /// The same identifier appears more than once in the roster.
    #[error("duplicate participant: {name}")]
    DuplicateParticipant {
        /// The repeated identifier
        name: String,
    },

    /// No permutation passed the constraints within the retry budget.
    ///
    /// Always the outcome for one or two participants, where every
    /// permutation is either the identity or a mutual pair.
    #[error("no valid assignment for {participants} participants after {attempts} attempts")]
    GenerationExhausted {
        /// Attempts made before giving up
        attempts: u32,
        /// Size of the roster
        participants: usize,
    },

    /// A giver is paired with themselves.
    #[error("participant {name} is assigned to themselves")]
    SelfAssignment {
        /// The offending giver
        name: String,
    },

    /// Two participants are assigned to each other.
    #[error("participants {giver} and {recipient} are assigned to each other")]
    ReciprocalPair {
        /// The giver of the first half of the pair
        giver: String,
        /// The recipient, who is also assigned back to `giver`
        recipient: String,
    },

    /// The recipients are not exactly the set of givers.
    #[error("participant {name} is not a giver or receives more than once")]
    NotAPermutation {
        /// The recipient that breaks the bijection
        name: String,
    },
}

//! Santa Core
//!
//! Draws gift exchange assignments. Given a roster of unique participant
//! identifiers, [`AssignmentGenerator`] pairs every giver with a recipient so
//! that:
//!
//! - nobody gives to themselves
//! - no two participants give to each other
//!
//! ```text
//! roster ──shuffle──▶ candidate ──check──▶ Assignment
//!   ▲                      │
//!   └──── retry (bounded) ─┘
//! ```
//!
//! Randomness is supplied by the caller. Seeding the RNG reproduces a draw,
//! which the tests rely on.
//!
//! The resulting [`Assignment`] is plaintext and is meant to be encrypted
//! immediately and dropped. It cannot be serialized.

#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod assignment;
mod error;
mod generator;

pub use assignment::Assignment;
pub use error::AssignmentError;
pub use generator::{
    AssignmentGenerator, DEFAULT_MAX_ATTEMPTS, GeneratedAssignment, GeneratorConfig, generate,
};

//! Domain layer: VoteSprout model, validation rules, tallying and the
//! account-abstraction primitives used by the gasless path.

pub mod aa;
pub mod model;
pub mod submission;
pub mod tally;
pub mod validation;

pub use model::*;
pub use submission::{DirectOutcome, GaslessOutcome, SubmissionState};
pub use tally::ProposalTally;

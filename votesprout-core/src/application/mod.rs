//! Application layer: orchestration across domain logic and infrastructure I/O.

pub mod gasless;
pub mod governance;
pub mod repository;

pub use gasless::{GaslessExecutor, GaslessSettings};
pub use governance::{ChainOutcome, GovernanceClient, GovernanceReport, MirrorStatus};
pub use repository::VoteRepository;

//! ERC-4337 (EntryPoint v0.6) primitives: user operations, call encoding and
//! chain selection for the paymaster service.

pub mod calls;
pub mod chain;
pub mod user_operation;

pub use chain::PaymasterChain;
pub use user_operation::{Sponsorship, UserOperation};

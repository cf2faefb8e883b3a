pub mod daos;
pub mod health;
pub mod paymaster;
pub mod proposals;
pub mod types;
pub mod votes;

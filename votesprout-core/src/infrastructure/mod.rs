pub mod config;
pub mod logging;
pub mod rpc;
pub mod storage;
pub mod wallet;

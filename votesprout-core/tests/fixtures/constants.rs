#![allow(dead_code)]

pub const TEST_VOTER: &str = "0x1111111111111111111111111111111111111111";
pub const TEST_VOTER_MIXED_CASE: &str = "0xAbCdEf0000000000000000000000000000000001";
pub const TEST_OPTIONS: [&str; 3] = ["Yes", "No", "Abstain"];
pub const TEST_USER_OP_HASH: &str = "0x9b5f0000000000000000000000000000000000000000000000000000000000aa";
pub const TEST_TX_HASH: &str = "0x7e1a000000000000000000000000000000000000000000000000000000000bb1";
pub const TEST_DIRECT_TX_HASH: &str = "0xd1ec000000000000000000000000000000000000000000000000000000000cc2";
pub const TEST_DATABASE_URL_ENV: &str = "VOTESPROUT_TEST_DATABASE_URL";

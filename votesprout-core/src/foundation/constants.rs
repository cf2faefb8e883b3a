//! System-wide constants for VoteSprout.

/// DAO name length bounds (inclusive, in characters).
pub const DAO_NAME_MIN_LEN: usize = 2;
pub const DAO_NAME_MAX_LEN: usize = 100;
/// Maximum DAO description length.
pub const DAO_DESCRIPTION_MAX_LEN: usize = 500;

/// Proposal title length bounds (inclusive).
pub const PROPOSAL_TITLE_MIN_LEN: usize = 2;
pub const PROPOSAL_TITLE_MAX_LEN: usize = 200;
/// Maximum proposal description length.
pub const PROPOSAL_DESCRIPTION_MAX_LEN: usize = 1000;
/// Proposal option count bounds (inclusive).
pub const PROPOSAL_MIN_OPTIONS: usize = 2;
pub const PROPOSAL_MAX_OPTIONS: usize = 10;

/// Voter identity length bounds (inclusive).
pub const VOTER_MIN_LEN: usize = 4;
pub const VOTER_MAX_LEN: usize = 100;

/// Options used when a proposal is created without an explicit option list.
pub const DEFAULT_PROPOSAL_OPTIONS: [&str; 2] = ["Yes", "No"];

/// Voting closes this many hours after a proposal is created.
///
/// Enforced by clients only; nothing is persisted.
pub const VOTING_WINDOW_HOURS: i64 = 72;

/// User-facing message returned for a second vote on the same proposal.
pub const DUPLICATE_VOTE_MESSAGE: &str = "You already voted on this proposal.";

/// Default number of `eth_getUserOperationReceipt` attempts.
pub const DEFAULT_RECEIPT_POLL_ATTEMPTS: u32 = 20;
/// Default delay between receipt attempts (1.5 seconds).
pub const DEFAULT_RECEIPT_POLL_INTERVAL_MS: u64 = 1_500;

/// Default paymaster JSON-RPC base endpoint; `/{chain}/rpc` is appended.
pub const DEFAULT_PAYMASTER_ENDPOINT: &str = "https://api.pimlico.io/v2";

/// ERC-4337 EntryPoint v0.6.
pub const ENTRY_POINT_V06: &str = "0x5FF137D4b0FDCD49DcA30c7CF57E578a026d2789";
/// SimpleAccountFactory deployed for EntryPoint v0.6.
pub const SIMPLE_ACCOUNT_FACTORY_V06: &str = "0x9406Cc6185a346906296840746125a0E44976454";

/// Placeholder signature accepted by SimpleAccount during gas estimation.
pub const SIMPLE_ACCOUNT_DUMMY_SIGNATURE: &str =
    "0xfffffffffffffffffffffffffffffff0000000000000000000000000000000007aaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaa1c";

/// Base mainnet chain id.
pub const BASE_CHAIN_ID: u64 = 8453;
/// Base Sepolia chain id.
pub const BASE_SEPOLIA_CHAIN_ID: u64 = 84532;

use crate::foundation::{BASE_CHAIN_ID, BASE_SEPOLIA_CHAIN_ID};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Chain selector understood by the paymaster API path (`/v2/{chain}/rpc`).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case", from = "String")]
pub enum PaymasterChain {
    #[default]
    Base,
    BaseSepolia,
}

impl PaymasterChain {
    /// Lenient parse: anything other than `base-sepolia` (case-insensitive) selects `base`.
    pub fn from_env_value(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "base-sepolia" => Self::BaseSepolia,
            _ => Self::Base,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Base => "base",
            Self::BaseSepolia => "base-sepolia",
        }
    }

    pub fn chain_id(&self) -> u64 {
        match self {
            Self::Base => BASE_CHAIN_ID,
            Self::BaseSepolia => BASE_SEPOLIA_CHAIN_ID,
        }
    }

    pub fn explorer_tx_url(&self, tx_hash: &str) -> String {
        match self {
            Self::Base => format!("https://basescan.org/tx/{tx_hash}"),
            Self::BaseSepolia => format!("https://sepolia.basescan.org/tx/{tx_hash}"),
        }
    }
}

impl From<String> for PaymasterChain {
    fn from(value: String) -> Self {
        Self::from_env_value(&value)
    }
}

impl fmt::Display for PaymasterChain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

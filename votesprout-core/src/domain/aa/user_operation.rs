use crate::foundation::{VoteSproutError, SIMPLE_ACCOUNT_DUMMY_SIGNATURE};
use alloy::primitives::{keccak256, Address, Bytes, B256, U256};
use alloy::sol_types::SolValue;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// EntryPoint v0.6 user operation, serialized the way bundlers expect it
/// (camelCase keys, hex quantities and byte strings).
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserOperation {
    pub sender: Address,
    pub nonce: U256,
    pub init_code: Bytes,
    pub call_data: Bytes,
    pub call_gas_limit: U256,
    pub verification_gas_limit: U256,
    pub pre_verification_gas: U256,
    pub max_fee_per_gas: U256,
    pub max_priority_fee_per_gas: U256,
    pub paymaster_and_data: Bytes,
    pub signature: Bytes,
}

/// Fields returned by `pm_sponsorUserOperation`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Sponsorship {
    pub paymaster_and_data: Bytes,
    pub pre_verification_gas: U256,
    pub verification_gas_limit: U256,
    pub call_gas_limit: U256,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_fee_per_gas: Option<U256>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_priority_fee_per_gas: Option<U256>,
}

impl UserOperation {
    /// Unsigned operation with zero gas limits, no paymaster and the
    /// SimpleAccount placeholder signature, ready to be sent for sponsorship.
    pub fn unsigned(
        sender: Address,
        nonce: U256,
        init_code: Bytes,
        call_data: Bytes,
        max_fee_per_gas: U256,
        max_priority_fee_per_gas: U256,
    ) -> Result<Self, VoteSproutError> {
        let signature = Bytes::from_str(SIMPLE_ACCOUNT_DUMMY_SIGNATURE)
            .map_err(|err| VoteSproutError::EncodingError(format!("dummy signature: {err}")))?;
        Ok(Self {
            sender,
            nonce,
            init_code,
            call_data,
            call_gas_limit: U256::ZERO,
            verification_gas_limit: U256::ZERO,
            pre_verification_gas: U256::ZERO,
            max_fee_per_gas,
            max_priority_fee_per_gas,
            paymaster_and_data: Bytes::new(),
            signature,
        })
    }

    pub fn apply_sponsorship(&mut self, sponsorship: &Sponsorship) {
        self.paymaster_and_data = sponsorship.paymaster_and_data.clone();
        self.pre_verification_gas = sponsorship.pre_verification_gas;
        self.verification_gas_limit = sponsorship.verification_gas_limit;
        self.call_gas_limit = sponsorship.call_gas_limit;
        if let Some(max_fee) = sponsorship.max_fee_per_gas {
            self.max_fee_per_gas = max_fee;
        }
        if let Some(priority_fee) = sponsorship.max_priority_fee_per_gas {
            self.max_priority_fee_per_gas = priority_fee;
        }
    }

    /// ABI-encoded operation without its signature; dynamic fields are hashed.
    pub fn pack(&self) -> Vec<u8> {
        (
            self.sender,
            self.nonce,
            keccak256(&self.init_code),
            keccak256(&self.call_data),
            self.call_gas_limit,
            self.verification_gas_limit,
            self.pre_verification_gas,
            self.max_fee_per_gas,
            self.max_priority_fee_per_gas,
            keccak256(&self.paymaster_and_data),
        )
            .abi_encode()
    }

    /// `keccak256(abi.encode(keccak256(pack(op)), entryPoint, chainId))`, the hash the account owner signs.
    pub fn hash(&self, entry_point: Address, chain_id: u64) -> B256 {
        let packed_hash = keccak256(self.pack());
        keccak256((packed_hash, entry_point, U256::from(chain_id)).abi_encode())
    }
}

//! ABI encoding for the contracts the gasless path touches.

use crate::foundation::VoteSproutError;
use alloy::primitives::aliases::U192;
use alloy::primitives::{Address, Bytes, U256};
use alloy::sol;
use alloy::sol_types::SolCall;

sol! {
    /// SimpleAccount: execute a call from the smart account.
    function execute(address dest, uint256 value, bytes func);

    /// SimpleAccountFactory.
    function createAccount(address owner, uint256 salt) returns (address account);
    function getAddress(address owner, uint256 salt) view returns (address account);

    /// EntryPoint v0.6 nonce manager.
    function getNonce(address sender, uint192 key) view returns (uint256 nonce);

    /// VoteSprout governance contract.
    function createProposal(string title, string description, string[] options) returns (uint256 proposalId);
    function vote(uint256 proposalId, uint8 choiceIndex);
}

pub fn encode_execute(to: Address, value: U256, data: Bytes) -> Bytes {
    executeCall { dest: to, value, func: data }.abi_encode().into()
}

/// `factory ‖ createAccount(owner, salt)`, the v0.6 `initCode` of an undeployed account.
pub fn encode_init_code(factory: Address, owner: Address, salt: U256) -> Bytes {
    let call = createAccountCall { owner, salt }.abi_encode();
    let mut out = Vec::with_capacity(20 + call.len());
    out.extend_from_slice(factory.as_slice());
    out.extend_from_slice(&call);
    out.into()
}

pub fn encode_get_address(owner: Address, salt: U256) -> Bytes {
    getAddressCall { owner, salt }.abi_encode().into()
}

pub fn decode_get_address(data: &[u8]) -> Result<Address, VoteSproutError> {
    getAddressCall::abi_decode_returns(data, true)
        .map(|ret| ret.account)
        .map_err(|err| VoteSproutError::EncodingError(format!("getAddress return: {err}")))
}

pub fn encode_get_nonce(sender: Address) -> Bytes {
    getNonceCall { sender, key: U192::ZERO }.abi_encode().into()
}

pub fn decode_get_nonce(data: &[u8]) -> Result<U256, VoteSproutError> {
    getNonceCall::abi_decode_returns(data, true)
        .map(|ret| ret.nonce)
        .map_err(|err| VoteSproutError::EncodingError(format!("getNonce return: {err}")))
}

pub fn encode_create_proposal(title: &str, description: &str, options: &[String]) -> Bytes {
    createProposalCall { title: title.to_string(), description: description.to_string(), options: options.to_vec() }
        .abi_encode()
        .into()
}

pub fn encode_vote(proposal_id: u64, choice_index: i64) -> Result<Bytes, VoteSproutError> {
    let choice = u8::try_from(choice_index)
        .map_err(|_| VoteSproutError::validation("choiceIndex", format!("must fit in uint8, got {choice_index}")))?;
    Ok(voteCall { proposalId: U256::from(proposal_id), choiceIndex: choice }.abi_encode().into())
}

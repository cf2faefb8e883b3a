//! Lifecycle of one gasless submission.
//!
//! `Created -> Sponsored -> Submitted -> (ReceiptFound | ReceiptUnknown)`.
//! Failures at sponsorship or submission are returned to the caller directly;
//! there is no failed state. `ReceiptUnknown` is not a failure either: the
//! operation may still land and callers re-poll if they care.

use crate::foundation::VoteSproutError;
use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SubmissionState {
    Created,
    Sponsored,
    Submitted,
    ReceiptFound,
    ReceiptUnknown,
}

const VALID_TRANSITIONS: &[(SubmissionState, SubmissionState)] = &[
    (SubmissionState::Created, SubmissionState::Sponsored),
    (SubmissionState::Sponsored, SubmissionState::Submitted),
    (SubmissionState::Submitted, SubmissionState::ReceiptFound),
    (SubmissionState::Submitted, SubmissionState::ReceiptUnknown),
];

impl SubmissionState {
    pub fn is_terminal(&self) -> bool {
        matches!(self, SubmissionState::ReceiptFound | SubmissionState::ReceiptUnknown)
    }

    pub fn can_transition_to(&self, next: SubmissionState) -> bool {
        VALID_TRANSITIONS.contains(&(*self, next))
    }

    pub fn transition(self, next: SubmissionState) -> Result<SubmissionState, VoteSproutError> {
        if self.can_transition_to(next) {
            Ok(next)
        } else {
            Err(VoteSproutError::InvalidStateTransition { from: format!("{self:?}"), to: format!("{next:?}") })
        }
    }
}

/// Result of a gasless execution.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GaslessOutcome {
    pub user_op_hash: String,
    pub state: SubmissionState,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tx_hash: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub explorer_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub receipt: Option<serde_json::Value>,
}

/// Result of a plain EOA transaction sent without the paymaster.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DirectOutcome {
    pub tx_hash: String,
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub block_number: Option<u64>,
    pub explorer_url: String,
}

/// Transaction hash carried by a user-operation receipt.
///
/// Bundlers nest it under `receipt.transactionHash`; some return it at the top level.
pub fn receipt_transaction_hash(receipt: &serde_json::Value) -> Option<String> {
    receipt
        .get("receipt")
        .and_then(|inner| inner.get("transactionHash"))
        .or_else(|| receipt.get("transactionHash"))
        .and_then(|value| value.as_str())
        .map(str::to_string)
}

use crate::fixtures::{test_receipt, MockChain, MockDirectSender, MockMirror, MockRelay, TEST_DIRECT_TX_HASH, TEST_TX_HASH, TEST_USER_OP_HASH};
use alloy::primitives::{Address, U256};
use std::sync::Arc;
use votesprout_core::application::{ChainOutcome, GaslessExecutor, GaslessSettings, GovernanceClient, MirrorStatus};
use votesprout_core::domain::aa::calls::{encode_create_proposal, encode_vote};
use votesprout_core::domain::aa::PaymasterChain;
use votesprout_core::foundation::util::time::now;
use votesprout_core::foundation::ErrorCode;
use votesprout_core::infrastructure::wallet::{LocalOwnerSigner, OwnerSigner};

fn governance() -> Address {
    Address::repeat_byte(0x90)
}

struct Setup {
    relay: Arc<MockRelay>,
    mirror: Arc<MockMirror>,
    signer: Arc<LocalOwnerSigner>,
    executor: Arc<GaslessExecutor>,
}

impl Setup {
    fn new(relay: MockRelay, mirror: MockMirror) -> Self {
        let settings = GaslessSettings {
            entry_point: Address::repeat_byte(0xe0),
            account_factory: Address::repeat_byte(0xfa),
            account_salt: U256::ZERO,
            governance: Some(governance()),
            chain: PaymasterChain::Base,
        };
        let chain = Arc::new(MockChain::new(settings.account_factory, settings.entry_point, Address::repeat_byte(0x5a)));
        let relay = Arc::new(relay);
        let signer = Arc::new(LocalOwnerSigner::random());
        let executor = Arc::new(GaslessExecutor::new(chain, relay.clone(), Some(signer.clone()), settings));
        Self { relay, mirror: Arc::new(mirror), signer, executor }
    }

    fn landing() -> Self {
        Self::new(MockRelay::new(TEST_USER_OP_HASH, Some(test_receipt(TEST_TX_HASH))), MockMirror::open_for(24))
    }

    fn client(&self) -> GovernanceClient {
        GovernanceClient::new(self.executor.clone(), self.mirror.clone())
    }
}

fn options(values: &[&str]) -> Vec<String> {
    values.iter().map(|value| value.to_string()).collect()
}

#[tokio::test]
async fn gasless_vote_is_mirrored_as_the_owner_with_the_tx_hash() {
    let setup = Setup::landing();
    let report = setup.client().vote(7, 1, true).await.expect("vote");

    assert!(matches!(report.outcome, ChainOutcome::Gasless(_)));
    assert_eq!(report.outcome.landed_tx_hash(), Some(TEST_TX_HASH));
    assert!(matches!(report.mirror, MirrorStatus::Recorded { .. }));

    let votes = setup.mirror.votes();
    assert_eq!(votes.len(), 1);
    assert_eq!(votes[0].proposal_id, 7);
    assert_eq!(votes[0].choice_index, 1);
    assert_eq!(votes[0].voter, setup.signer.address().to_string());
    assert_eq!(votes[0].tx_hash.as_deref(), Some(TEST_TX_HASH));
}

#[tokio::test]
async fn gasless_proposal_is_mirrored_into_the_chosen_dao() {
    let setup = Setup::landing();
    let report = setup.client().create_proposal(3, "Raise quorum", "", &options(&["Yes", "No"])).await.expect("proposal");

    match report.mirror {
        MirrorStatus::Recorded { record } => assert_eq!(record.dao_id, 3),
        other => panic!("expected a recorded proposal, got {other:?}"),
    }
    let proposals = setup.mirror.proposals();
    assert_eq!(proposals.len(), 1);
    assert_eq!(proposals[0].title, "Raise quorum");
    assert_eq!(proposals[0].description, None);
    assert_eq!(proposals[0].options, options(&["Yes", "No"]));
    assert_eq!(proposals[0].creator, Some(setup.signer.address().to_string()));
    assert_eq!(proposals[0].tx_hash.as_deref(), Some(TEST_TX_HASH));
}

#[tokio::test]
async fn invalid_proposal_never_reaches_the_paymaster() {
    let setup = Setup::landing();
    let client = setup.client();

    let err = client.create_proposal(1, "Raise quorum", "", &options(&["Yes"])).await.expect_err("one option");
    assert_eq!(err.code(), ErrorCode::Validation);
    let err = client.create_proposal(1, "Raise quorum", "", &options(&["Yes", " "])).await.expect_err("blank option");
    assert_eq!(err.code(), ErrorCode::Validation);
    let eleven: Vec<String> = (0..11).map(|i| format!("option {i}")).collect();
    let err = client.create_proposal(1, "Raise quorum", "", &eleven).await.expect_err("too many options");
    assert_eq!(err.code(), ErrorCode::Validation);

    let err = setup.executor.create_proposal_gasless("Raise quorum", "", &options(&["Yes"])).await.expect_err("executor validates too");
    assert_eq!(err.code(), ErrorCode::Validation);

    assert!(setup.relay.sponsored().is_empty());
    assert!(setup.mirror.proposals().is_empty());
}

#[tokio::test]
async fn direct_mode_sends_plain_transactions_from_the_owner() {
    let setup = Setup::landing();
    let owner = Address::repeat_byte(0x77);
    let sender = Arc::new(MockDirectSender::new(owner));
    let client = setup.client().with_direct(sender.clone());
    assert!(client.is_direct());
    assert_eq!(client.acting_address().await.expect("address"), owner);

    let report = client.vote(5, 2, true).await.expect("vote");
    assert!(matches!(report.outcome, ChainOutcome::Direct(_)));
    let report_proposal = client.create_proposal(2, "Fund grants", "Round two", &options(&["Yes", "No", "Abstain"])).await.expect("proposal");
    assert_eq!(report_proposal.outcome.landed_tx_hash(), Some(TEST_DIRECT_TX_HASH));

    let calls = sender.calls();
    assert_eq!(calls.len(), 2);
    assert_eq!(calls[0], (governance(), encode_vote(5, 2).expect("encode")));
    assert_eq!(calls[1], (governance(), encode_create_proposal("Fund grants", "Round two", &options(&["Yes", "No", "Abstain"]))));
    assert!(setup.relay.sponsored().is_empty());

    let votes = setup.mirror.votes();
    assert_eq!(votes[0].voter, owner.to_string());
    assert_eq!(votes[0].tx_hash.as_deref(), Some(TEST_DIRECT_TX_HASH));
    assert_eq!(setup.mirror.proposals()[0].description.as_deref(), Some("Round two"));
}

#[tokio::test]
async fn closed_window_blocks_the_vote_unless_skipped() {
    let mut mirror = MockMirror::open_for(0);
    mirror.voting_closes_at = Some(now() - chrono::Duration::hours(1));
    let setup = Setup::new(MockRelay::new(TEST_USER_OP_HASH, Some(test_receipt(TEST_TX_HASH))), mirror);

    let err = setup.client().vote(1, 0, true).await.expect_err("closed");
    assert_eq!(err.code(), ErrorCode::Validation);
    assert!(err.to_string().contains("voting closed"));
    assert!(setup.relay.sponsored().is_empty());

    setup.client().vote(1, 0, false).await.expect("window check skipped");
    assert_eq!(setup.relay.sent().len(), 1);
}

#[tokio::test]
async fn unknown_proposal_fails_the_window_check() {
    let mut mirror = MockMirror::open_for(1);
    mirror.voting_closes_at = None;
    let setup = Setup::new(MockRelay::new(TEST_USER_OP_HASH, None), mirror);
    let err = setup.client().vote(42, 0, true).await.expect_err("missing");
    assert_eq!(err.code(), ErrorCode::NotFound);
    assert!(setup.relay.sponsored().is_empty());
}

#[tokio::test]
async fn missing_receipt_skips_the_mirror() {
    let setup = Setup::new(MockRelay::new(TEST_USER_OP_HASH, None), MockMirror::open_for(24));
    let report = setup.client().vote(1, 0, true).await.expect("vote");
    assert!(matches!(report.mirror, MirrorStatus::Skipped { .. }));
    assert!(setup.mirror.votes().is_empty());
}

#[tokio::test]
async fn reverted_direct_transaction_is_not_mirrored() {
    let setup = Setup::landing();
    let mut sender = MockDirectSender::new(Address::repeat_byte(0x77));
    sender.reverts = true;
    let report = setup.client().with_direct(Arc::new(sender)).vote(1, 0, true).await.expect("vote");
    assert_eq!(report.outcome.landed_tx_hash(), None);
    match report.mirror {
        MirrorStatus::Skipped { reason } => assert!(reason.contains("reverted")),
        other => panic!("expected skipped mirror, got {other:?}"),
    }
    assert!(setup.mirror.votes().is_empty());
}

#[tokio::test]
async fn mirror_failure_keeps_the_onchain_result() {
    let mut mirror = MockMirror::open_for(24);
    mirror.fail_record = true;
    let setup = Setup::new(MockRelay::new(TEST_USER_OP_HASH, Some(test_receipt(TEST_TX_HASH))), mirror);

    let report = setup.client().vote(1, 0, true).await.expect("on-chain vote still reported");
    assert_eq!(report.outcome.landed_tx_hash(), Some(TEST_TX_HASH));
    match report.mirror {
        MirrorStatus::Failed { error } => assert_eq!(error, "You already voted on this proposal."),
        other => panic!("expected failed mirror, got {other:?}"),
    }
}

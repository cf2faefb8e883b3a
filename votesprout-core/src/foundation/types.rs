/// Row identifier of a DAO.
pub type DaoId = i64;
/// Row identifier of a proposal.
pub type ProposalId = i64;
/// Row identifier of a vote.
pub type VoteId = i64;

/// UTC timestamp used for every `created_at` column.
pub type Timestamp = chrono::DateTime<chrono::Utc>;

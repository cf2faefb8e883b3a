//! PostgreSQL backend.
//!
//! Queries are runtime-checked (`sqlx::query_as`) so the crate builds without a live database.

mod schema;

pub use schema::SCHEMA_STATEMENTS;

use crate::domain::{Dao, NewDao, NewProposal, NewVote, Proposal, Vote};
use crate::foundation::{DaoId, ProposalId, Timestamp, VoteId, VoteSproutError};
use crate::infrastructure::storage::{Result, Storage, StorageBackend};
use crate::storage_err;
use async_trait::async_trait;
use log::{debug, info};
use sqlx::postgres::PgPoolOptions;
use sqlx::types::Json;
use sqlx::{FromRow, PgPool};

const FOREIGN_KEY_VIOLATION: &str = "23503";

#[derive(FromRow)]
struct DaoRow {
    id: DaoId,
    name: String,
    description: Option<String>,
    created_at: Timestamp,
}

impl From<DaoRow> for Dao {
    fn from(row: DaoRow) -> Self {
        Dao { id: row.id, name: row.name, description: row.description, created_at: row.created_at }
    }
}

#[derive(FromRow)]
struct ProposalRow {
    id: ProposalId,
    dao_id: DaoId,
    title: String,
    description: Option<String>,
    options: Json<Vec<String>>,
    created_at: Timestamp,
    creator: Option<String>,
    tx_hash: Option<String>,
}

impl From<ProposalRow> for Proposal {
    fn from(row: ProposalRow) -> Self {
        Proposal {
            id: row.id,
            dao_id: row.dao_id,
            title: row.title,
            description: row.description,
            options: row.options.0,
            created_at: row.created_at,
            creator: row.creator,
            tx_hash: row.tx_hash,
        }
    }
}

#[derive(FromRow)]
struct VoteRow {
    id: VoteId,
    proposal_id: ProposalId,
    voter: String,
    choice_index: i64,
    created_at: Timestamp,
    tx_hash: Option<String>,
}

impl From<VoteRow> for Vote {
    fn from(row: VoteRow) -> Self {
        Vote {
            id: row.id,
            proposal_id: row.proposal_id,
            voter: row.voter,
            choice_index: row.choice_index,
            created_at: row.created_at,
            tx_hash: row.tx_hash,
        }
    }
}

pub struct PostgresStorage {
    pool: PgPool,
}

impl PostgresStorage {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Connect and apply the schema.
    pub async fn connect(database_url: &str, max_connections: u32) -> Result<Self> {
        let pool = PgPoolOptions::new()
            .max_connections(max_connections)
            .connect(database_url)
            .await
            .map_err(|err| storage_err!("postgres connect", err))?;
        let storage = Self::new(pool);
        storage.migrate().await?;
        info!("postgres storage ready max_connections={}", max_connections);
        Ok(storage)
    }

    pub async fn migrate(&self) -> Result<()> {
        for statement in SCHEMA_STATEMENTS {
            sqlx::query(statement).execute(&self.pool).await.map_err(|err| storage_err!("postgres migrate", err))?;
        }
        debug!("postgres schema applied statements={}", SCHEMA_STATEMENTS.len());
        Ok(())
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

fn is_foreign_key_violation(err: &sqlx::Error) -> bool {
    err.as_database_error().and_then(|db| db.code()).is_some_and(|code| code == FOREIGN_KEY_VIOLATION)
}

#[async_trait]
impl Storage for PostgresStorage {
    fn backend(&self) -> StorageBackend {
        StorageBackend::Postgres
    }

    async fn create_dao(&self, dao: NewDao) -> Result<Dao> {
        let row = sqlx::query_as::<_, DaoRow>(
            "INSERT INTO daos (name, description) VALUES ($1, $2) RETURNING id, name, description, created_at",
        )
        .bind(&dao.name)
        .bind(&dao.description)
        .fetch_one(&self.pool)
        .await
        .map_err(|err| storage_err!("postgres insert dao", err))?;
        Ok(row.into())
    }

    async fn list_daos(&self) -> Result<Vec<Dao>> {
        let rows = sqlx::query_as::<_, DaoRow>("SELECT id, name, description, created_at FROM daos ORDER BY id DESC")
            .fetch_all(&self.pool)
            .await
            .map_err(|err| storage_err!("postgres list daos", err))?;
        Ok(rows.into_iter().map(Dao::from).collect())
    }

    async fn get_dao(&self, id: DaoId) -> Result<Option<Dao>> {
        let row = sqlx::query_as::<_, DaoRow>("SELECT id, name, description, created_at FROM daos WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|err| storage_err!("postgres get dao", err))?;
        Ok(row.map(Dao::from))
    }

    async fn create_proposal(&self, proposal: NewProposal) -> Result<Proposal> {
        let row = sqlx::query_as::<_, ProposalRow>(
            r#"
            INSERT INTO proposals (dao_id, title, description, options, creator, tx_hash)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING id, dao_id, title, description, options, created_at, creator, tx_hash
            "#,
        )
        .bind(proposal.dao_id)
        .bind(&proposal.title)
        .bind(&proposal.description)
        .bind(Json(&proposal.options))
        .bind(&proposal.creator)
        .bind(&proposal.tx_hash)
        .fetch_one(&self.pool)
        .await
        .map_err(|err| {
            if is_foreign_key_violation(&err) {
                VoteSproutError::not_found("dao", proposal.dao_id)
            } else {
                storage_err!("postgres insert proposal", err)
            }
        })?;
        Ok(row.into())
    }

    async fn list_proposals(&self, dao_id: DaoId) -> Result<Vec<Proposal>> {
        let rows = sqlx::query_as::<_, ProposalRow>(
            r#"
            SELECT id, dao_id, title, description, options, created_at, creator, tx_hash
            FROM proposals
            WHERE dao_id = $1
            ORDER BY id DESC
            "#,
        )
        .bind(dao_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|err| storage_err!("postgres list proposals", err))?;
        Ok(rows.into_iter().map(Proposal::from).collect())
    }

    async fn get_proposal(&self, id: ProposalId) -> Result<Option<Proposal>> {
        let row = sqlx::query_as::<_, ProposalRow>(
            "SELECT id, dao_id, title, description, options, created_at, creator, tx_hash FROM proposals WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|err| storage_err!("postgres get proposal", err))?;
        Ok(row.map(Proposal::from))
    }

    async fn insert_vote(&self, vote: NewVote) -> Result<Option<Vote>> {
        let row = sqlx::query_as::<_, VoteRow>(
            r#"
            INSERT INTO votes (proposal_id, voter, choice_index, tx_hash)
            VALUES ($1, $2, $3, $4)
            ON CONFLICT (proposal_id, voter) DO NOTHING
            RETURNING id, proposal_id, voter, choice_index, created_at, tx_hash
            "#,
        )
        .bind(vote.proposal_id)
        .bind(&vote.voter)
        .bind(vote.choice_index)
        .bind(&vote.tx_hash)
        .fetch_optional(&self.pool)
        .await
        .map_err(|err| {
            if is_foreign_key_violation(&err) {
                VoteSproutError::not_found("proposal", vote.proposal_id)
            } else {
                storage_err!("postgres insert vote", err)
            }
        })?;
        Ok(row.map(Vote::from))
    }

    async fn vote_counts(&self, proposal_id: ProposalId) -> Result<Vec<(i64, u64)>> {
        let groups = sqlx::query_as::<_, (i64, i64)>(
            "SELECT choice_index, count(*) FROM votes WHERE proposal_id = $1 GROUP BY choice_index ORDER BY choice_index",
        )
        .bind(proposal_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|err| storage_err!("postgres vote counts", err))?;
        Ok(groups.into_iter().map(|(choice, count)| (choice, u64::try_from(count).unwrap_or(0))).collect())
    }

    async fn health_check(&self) -> Result<()> {
        sqlx::query("SELECT 1").execute(&self.pool).await.map_err(|err| storage_err!("postgres health check", err))?;
        Ok(())
    }
}

/// Idempotent DDL applied when the pool is opened.
pub const SCHEMA_STATEMENTS: &[&str] = &[
    r#"
    CREATE TABLE IF NOT EXISTS daos (
        id BIGSERIAL PRIMARY KEY,
        name TEXT NOT NULL,
        description TEXT,
        created_at TIMESTAMPTZ NOT NULL DEFAULT now()
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS proposals (
        id BIGSERIAL PRIMARY KEY,
        dao_id BIGINT NOT NULL REFERENCES daos(id),
        title TEXT NOT NULL,
        description TEXT,
        options JSONB NOT NULL,
        created_at TIMESTAMPTZ NOT NULL DEFAULT now(),
        creator TEXT,
        tx_hash TEXT
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS votes (
        id BIGSERIAL PRIMARY KEY,
        proposal_id BIGINT NOT NULL REFERENCES proposals(id),
        voter TEXT NOT NULL,
        choice_index BIGINT NOT NULL,
        created_at TIMESTAMPTZ NOT NULL DEFAULT now(),
        tx_hash TEXT,
        UNIQUE (proposal_id, voter)
    )
    "#,
    "CREATE INDEX IF NOT EXISTS proposals_dao_id_idx ON proposals (dao_id)",
];

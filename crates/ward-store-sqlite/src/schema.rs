//! SQL schema for the Ward SQLite store.
//!
//! Executed once at connection startup. Future migrations will be gated on
//! `PRAGMA user_version`.

/// Full schema DDL; idempotent thanks to `CREATE TABLE IF NOT EXISTS`.
pub const SCHEMA: &str = "
PRAGMA journal_mode = WAL;

CREATE TABLE IF NOT EXISTS subjects (
    subject_id    TEXT PRIMARY KEY,
    display_name  TEXT NOT NULL,
    avatar_ref    TEXT NOT NULL DEFAULT '',
    status        TEXT NOT NULL,   -- 'WHITELISTED' | 'BLACKLISTED' | 'PERM_BLACKLISTED' | 'APPEALED'
    updated_at    TEXT NOT NULL    -- ISO 8601 UTC
);

-- Evidence is sourced independently of subjects, so there is no foreign key:
-- an import may arrive before (or outlive) the subject record.
CREATE TABLE IF NOT EXISTS imports (
    subject_id   TEXT NOT NULL,
    source_id    TEXT NOT NULL,
    severity     TEXT NOT NULL,
    recorded_at  TEXT NOT NULL,
    PRIMARY KEY (subject_id, source_id)
);

-- Appeals started by fail-safe downgrades, drained by the appeal workflow.
CREATE TABLE IF NOT EXISTS appeals (
    appeal_id     TEXT PRIMARY KEY,
    subject_id    TEXT NOT NULL,
    requested_at  TEXT NOT NULL
);

CREATE INDEX IF NOT EXISTS imports_subject_idx ON imports(subject_id);
CREATE INDEX IF NOT EXISTS appeals_subject_idx ON appeals(subject_id);

PRAGMA user_version = 1;
";

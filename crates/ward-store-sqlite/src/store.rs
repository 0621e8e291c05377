//! [`SqliteStore`] — the SQLite implementation of [`ModerationStore`].

use std::path::Path;

use chrono::{DateTime, Utc};
use rusqlite::OptionalExtension as _;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use ward_core::{
  evidence::Evidence,
  store::ModerationStore,
  subject::{Subject, SubjectId, SubjectStatus},
};

use crate::{
  Result,
  encode::{RawAppeal, RawEvidence, RawSubject, encode_dt, encode_status, encode_uuid},
  schema::SCHEMA,
};

// ─── Appeal ──────────────────────────────────────────────────────────────────

/// A queued appeal, recorded when a stale blacklist was downgraded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Appeal {
  pub appeal_id:    Uuid,
  pub subject_id:   SubjectId,
  pub requested_at: DateTime<Utc>,
}

// ─── Store ───────────────────────────────────────────────────────────────────

/// A Ward moderation store backed by a single SQLite file.
///
/// Cloning is cheap — the inner connection is reference-counted.
#[derive(Clone)]
pub struct SqliteStore {
  conn: tokio_rusqlite::Connection,
}

impl SqliteStore {
  /// Open (or create) a store at `path` and run schema initialisation.
  pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open(path).await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  /// Open an in-memory store — useful for testing.
  pub async fn open_in_memory() -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open_in_memory().await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  async fn init_schema(&self) -> Result<()> {
    self
      .conn
      .call(|conn| {
        conn.execute_batch(SCHEMA)?;
        Ok(())
      })
      .await?;
    Ok(())
  }

  // ── Ingestion ─────────────────────────────────────────────────────────────

  /// Insert a subject, or overwrite every field of an existing one.
  pub async fn upsert_subject(&self, subject: &Subject) -> Result<()> {
    let id_str     = subject.id.as_str().to_owned();
    let name       = subject.display_name.clone();
    let avatar     = subject.avatar_ref.clone();
    let status_str = encode_status(subject.status);
    let at_str     = encode_dt(subject.updated_at);

    self
      .conn
      .call(move |conn| {
        conn.execute(
          "INSERT INTO subjects (subject_id, display_name, avatar_ref, status, updated_at)
           VALUES (?1, ?2, ?3, ?4, ?5)
           ON CONFLICT (subject_id) DO UPDATE SET
             display_name = excluded.display_name,
             avatar_ref   = excluded.avatar_ref,
             status       = excluded.status,
             updated_at   = excluded.updated_at",
          rusqlite::params![id_str, name, avatar, status_str, at_str],
        )?;
        Ok(())
      })
      .await?;
    Ok(())
  }

  /// Record evidence. A second import from the same source replaces the
  /// first.
  pub async fn record_evidence(&self, evidence: &Evidence) -> Result<()> {
    let subject_str  = evidence.subject_id.as_str().to_owned();
    let source       = evidence.source_id.clone();
    let severity_str = evidence.severity.as_str().to_owned();
    let at_str       = encode_dt(evidence.recorded_at);

    self
      .conn
      .call(move |conn| {
        conn.execute(
          "INSERT INTO imports (subject_id, source_id, severity, recorded_at)
           VALUES (?1, ?2, ?3, ?4)
           ON CONFLICT (subject_id, source_id) DO UPDATE SET
             severity    = excluded.severity,
             recorded_at = excluded.recorded_at",
          rusqlite::params![subject_str, source, severity_str, at_str],
        )?;
        Ok(())
      })
      .await?;
    Ok(())
  }

  /// Delete the evidence one source holds against a subject. Returns whether
  /// a row was removed.
  pub async fn remove_evidence(
    &self,
    subject_id: &SubjectId,
    source_id:  &str,
  ) -> Result<bool> {
    let subject_str = subject_id.as_str().to_owned();
    let source      = source_id.to_owned();

    let removed = self
      .conn
      .call(move |conn| {
        Ok(conn.execute(
          "DELETE FROM imports WHERE subject_id = ?1 AND source_id = ?2",
          rusqlite::params![subject_str, source],
        )?)
      })
      .await?;
    Ok(removed > 0)
  }

  /// Delete all evidence for a subject. Returns the number of rows removed.
  pub async fn clear_evidence(&self, subject_id: &SubjectId) -> Result<usize> {
    let subject_str = subject_id.as_str().to_owned();

    let removed = self
      .conn
      .call(move |conn| {
        Ok(conn.execute(
          "DELETE FROM imports WHERE subject_id = ?1",
          rusqlite::params![subject_str],
        )?)
      })
      .await?;
    Ok(removed)
  }

  // ── Appeals ───────────────────────────────────────────────────────────────

  /// Queue an appeal for `subject_id`.
  pub async fn record_appeal(&self, subject_id: &SubjectId) -> Result<Appeal> {
    let appeal = Appeal {
      appeal_id:    Uuid::new_v4(),
      subject_id:   subject_id.clone(),
      requested_at: Utc::now(),
    };

    let id_str      = encode_uuid(appeal.appeal_id);
    let subject_str = appeal.subject_id.as_str().to_owned();
    let at_str      = encode_dt(appeal.requested_at);

    self
      .conn
      .call(move |conn| {
        conn.execute(
          "INSERT INTO appeals (appeal_id, subject_id, requested_at) VALUES (?1, ?2, ?3)",
          rusqlite::params![id_str, subject_str, at_str],
        )?;
        Ok(())
      })
      .await?;

    Ok(appeal)
  }

  /// All queued appeals, oldest first.
  pub async fn list_appeals(&self) -> Result<Vec<Appeal>> {
    let raws: Vec<RawAppeal> = self
      .conn
      .call(|conn| {
        let mut stmt = conn.prepare(
          "SELECT appeal_id, subject_id, requested_at
           FROM appeals
           ORDER BY requested_at, appeal_id",
        )?;
        let rows = stmt
          .query_map([], RawAppeal::from_row)?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    raws.into_iter().map(RawAppeal::into_appeal).collect()
  }
}

// ─── ModerationStore impl ────────────────────────────────────────────────────

impl ModerationStore for SqliteStore {
  type Error = crate::Error;

  async fn fetch_subject(&self, id: &SubjectId) -> Result<Option<Subject>> {
    let id_str = id.as_str().to_owned();

    let raw: Option<RawSubject> = self
      .conn
      .call(move |conn| {
        Ok(conn
          .query_row(
            "SELECT subject_id, display_name, avatar_ref, status, updated_at
             FROM subjects WHERE subject_id = ?1",
            rusqlite::params![id_str],
            RawSubject::from_row,
          )
          .optional()?)
      })
      .await?;

    raw.map(RawSubject::into_subject).transpose()
  }

  async fn fetch_evidence(&self, id: &SubjectId) -> Result<Vec<Evidence>> {
    let id_str = id.as_str().to_owned();

    let raws: Vec<RawEvidence> = self
      .conn
      .call(move |conn| {
        let mut stmt = conn.prepare(
          "SELECT subject_id, source_id, severity, recorded_at
           FROM imports WHERE subject_id = ?1",
        )?;
        let rows = stmt
          .query_map(rusqlite::params![id_str], RawEvidence::from_row)?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    raws.into_iter().map(RawEvidence::into_evidence).collect()
  }

  async fn apply_fail_safe(
    &self,
    id:       &SubjectId,
    observed: SubjectStatus,
  ) -> Result<bool> {
    let id_str       = id.as_str().to_owned();
    let observed_str = encode_status(observed);
    let appealed_str = encode_status(SubjectStatus::Appealed);
    let at_str       = encode_dt(Utc::now());

    // Compare-and-swap: only the writer that still sees `observed` wins.
    let changed = self
      .conn
      .call(move |conn| {
        Ok(conn.execute(
          "UPDATE subjects SET status = ?3, updated_at = ?4
           WHERE subject_id = ?1 AND status = ?2",
          rusqlite::params![id_str, observed_str, appealed_str, at_str],
        )?)
      })
      .await?;

    tracing::trace!(subject_id = %id, %observed, changed, "fail-safe write");
    Ok(changed == 1)
  }
}

//! Encoding and decoding helpers between domain types and the plain-text
//! representations stored in SQLite columns.
//!
//! Timestamps are RFC 3339 strings; statuses use their SCREAMING_SNAKE_CASE
//! names; UUIDs are hyphenated lowercase strings.

use chrono::{DateTime, Utc};
use uuid::Uuid;
use ward_core::{
  evidence::Evidence,
  subject::{Subject, SubjectId, SubjectStatus},
};

use crate::{Error, Result, store::Appeal};

// ─── Uuid ─────────────────────────────────────────────────────────────────────

pub fn encode_uuid(id: Uuid) -> String { id.hyphenated().to_string() }

pub fn decode_uuid(s: &str) -> Result<Uuid> { Ok(Uuid::parse_str(s)?) }

// ─── DateTime<Utc> ────────────────────────────────────────────────────────────

pub fn encode_dt(dt: DateTime<Utc>) -> String { dt.to_rfc3339() }

pub fn decode_dt(s: &str) -> Result<DateTime<Utc>> {
  DateTime::parse_from_rfc3339(s)
    .map(|dt| dt.with_timezone(&Utc))
    .map_err(|e| Error::DateParse(e.to_string()))
}

// ─── SubjectStatus ────────────────────────────────────────────────────────────

pub fn encode_status(status: SubjectStatus) -> &'static str { status.as_str() }

pub fn decode_status(s: &str) -> Result<SubjectStatus> {
  Ok(SubjectStatus::parse(s)?)
}

// ─── Row types ───────────────────────────────────────────────────────────────

/// Raw strings read directly from a `subjects` row.
pub struct RawSubject {
  pub subject_id:   String,
  pub display_name: String,
  pub avatar_ref:   String,
  pub status:       String,
  pub updated_at:   String,
}

impl RawSubject {
  pub fn from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
    Ok(Self {
      subject_id:   row.get(0)?,
      display_name: row.get(1)?,
      avatar_ref:   row.get(2)?,
      status:       row.get(3)?,
      updated_at:   row.get(4)?,
    })
  }

  pub fn into_subject(self) -> Result<Subject> {
    Ok(Subject {
      id:           SubjectId::new(self.subject_id),
      display_name: self.display_name,
      avatar_ref:   self.avatar_ref,
      status:       decode_status(&self.status)?,
      updated_at:   decode_dt(&self.updated_at)?,
    })
  }
}

/// Raw strings read directly from an `imports` row.
pub struct RawEvidence {
  pub subject_id:  String,
  pub source_id:   String,
  pub severity:    String,
  pub recorded_at: String,
}

impl RawEvidence {
  pub fn from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
    Ok(Self {
      subject_id:  row.get(0)?,
      source_id:   row.get(1)?,
      severity:    row.get(2)?,
      recorded_at: row.get(3)?,
    })
  }

  pub fn into_evidence(self) -> Result<Evidence> {
    Ok(Evidence {
      subject_id:  SubjectId::new(self.subject_id),
      source_id:   self.source_id,
      severity:    self.severity.into(),
      recorded_at: decode_dt(&self.recorded_at)?,
    })
  }
}

/// Raw strings read directly from an `appeals` row.
pub struct RawAppeal {
  pub appeal_id:    String,
  pub subject_id:   String,
  pub requested_at: String,
}

impl RawAppeal {
  pub fn from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
    Ok(Self {
      appeal_id:    row.get(0)?,
      subject_id:   row.get(1)?,
      requested_at: row.get(2)?,
    })
  }

  pub fn into_appeal(self) -> Result<Appeal> {
    Ok(Appeal {
      appeal_id:    decode_uuid(&self.appeal_id)?,
      subject_id:   SubjectId::new(self.subject_id),
      requested_at: decode_dt(&self.requested_at)?,
    })
  }
}

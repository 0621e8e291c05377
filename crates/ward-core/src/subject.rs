//! Subject — the identity being looked up, with its cached moderation status.

use std::{fmt, str::FromStr};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// Opaque identifier of a subject (for a chat platform, the user snowflake).
#[derive(
  Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct SubjectId(String);

impl SubjectId {
  pub fn new(id: impl Into<String>) -> Self { Self(id.into()) }

  pub fn as_str(&self) -> &str { &self.0 }
}

impl fmt::Display for SubjectId {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(&self.0)
  }
}

impl From<&str> for SubjectId {
  fn from(s: &str) -> Self { Self::new(s) }
}

impl From<String> for SubjectId {
  fn from(s: String) -> Self { Self(s) }
}

/// The stored moderation status of a subject.
///
/// This is a cached signal derived from evidence; it can lag behind the
/// evidence table and is reconciled on lookup.
#[derive(
  Debug,
  Clone,
  Copy,
  PartialEq,
  Eq,
  Hash,
  Serialize,
  Deserialize,
  strum::Display,
  strum::EnumString,
  strum::IntoStaticStr,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum SubjectStatus {
  Whitelisted,
  Blacklisted,
  PermBlacklisted,
  Appealed,
}

impl SubjectStatus {
  /// The string stored in the `status` column.
  pub fn as_str(self) -> &'static str { self.into() }

  /// Parse a stored status string.
  pub fn parse(s: &str) -> Result<Self> {
    <Self as FromStr>::from_str(s).map_err(|_| Error::UnknownStatus(s.to_owned()))
  }

  /// Whether this status claims the subject is actively flagged.
  pub fn is_blacklisted(self) -> bool {
    matches!(self, Self::Blacklisted | Self::PermBlacklisted)
  }
}

/// One record per identity. Created and updated by the ingestion side; the
/// lookup only ever moves a stale blacklist to [`SubjectStatus::Appealed`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Subject {
  pub id:           SubjectId,
  /// Last observed name; may be stale.
  pub display_name: String,
  pub avatar_ref:   String,
  pub status:       SubjectStatus,
  pub updated_at:   DateTime<Utc>,
}

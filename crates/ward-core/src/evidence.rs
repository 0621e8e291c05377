//! Evidence — independent records asserting a subject was flagged by some
//! source. Evidence existence is the ground truth for "actively flagged".

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{severity::SeverityKind, subject::SubjectId};

/// A single import: the subject was seen flagged in `source_id`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Evidence {
  pub subject_id:  SubjectId,
  /// The flagging source, e.g. the community the subject was seen in.
  pub source_id:   String,
  pub severity:    SeverityKind,
  pub recorded_at: DateTime<Utc>,
}

impl Evidence {
  /// Evidence recorded now.
  pub fn new(
    subject_id: SubjectId,
    source_id: impl Into<String>,
    severity: impl Into<SeverityKind>,
  ) -> Self {
    Self {
      subject_id,
      source_id: source_id.into(),
      severity: severity.into(),
      recorded_at: Utc::now(),
    }
  }
}

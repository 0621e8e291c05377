//! Verdicts and the side effects a resolution may require.

use serde::{Deserialize, Serialize};

use crate::{
  lookup::Notifier,
  severity::SeverityKind,
  subject::{SubjectId, SubjectStatus},
};

/// Display fields of a flagged subject, copied from the stored record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlacklistedVerdict {
  pub subject_id:       SubjectId,
  pub display_name:     String,
  pub avatar_ref:       String,
  pub status:           SubjectStatus,
  /// Number of evidence records backing the flag.
  pub evidence_count:   usize,
  pub highest_severity: SeverityKind,
}

/// The user-facing outcome of a lookup. Never persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Verdict {
  Clean,
  Blacklisted(BlacklistedVerdict),
}

impl Verdict {
  pub fn is_clean(&self) -> bool { matches!(self, Self::Clean) }

  /// Hand the verdict to `notifier`, calling exactly one render method.
  pub fn render<N: Notifier>(&self, notifier: &N) -> N::Output {
    match self {
      Self::Clean => notifier.render_clean(),
      Self::Blacklisted(v) => notifier.render_blacklisted(v),
    }
  }
}

/// A state transition the caller must apply to the store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ReconciliationAction {
  /// Move a stale blacklist to `APPEALED`, but only if the stored status is
  /// still `observed`.
  DowngradeToAppealed {
    subject_id: SubjectId,
    observed:   SubjectStatus,
  },
}

/// Output of [`crate::resolve`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolution {
  pub verdict: Verdict,
  pub action:  Option<ReconciliationAction>,
}

impl Resolution {
  pub fn clean() -> Self { Self { verdict: Verdict::Clean, action: None } }
}

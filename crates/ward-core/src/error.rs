//! Error types for `ward-core`.

use thiserror::Error;

use crate::severity::SeverityKind;

#[derive(Debug, Error)]
pub enum Error {
  /// Evidence carries a severity that the ranking table does not know.
  #[error("unknown severity kind: {0}")]
  UnknownSeverityKind(SeverityKind),

  #[error("severity kind {0} is ranked more than once")]
  DuplicateSeverityKind(SeverityKind),

  #[error("severity ranking must contain at least one kind")]
  EmptySeverityRanking,

  #[error("unknown subject status: {0:?}")]
  UnknownStatus(String),

  #[error("store unavailable: {0}")]
  StoreUnavailable(#[source] Box<dyn std::error::Error + Send + Sync>),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;

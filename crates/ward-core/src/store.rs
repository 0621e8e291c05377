//! The `ModerationStore` trait — the persistence contract used by a lookup.
//!
//! Implemented by storage backends (e.g. `ward-store-sqlite`). Ingestion of
//! subjects and evidence is not part of this contract; a lookup only reads,
//! plus the single conditional fail-safe write.

use std::future::Future;

use crate::{
  evidence::Evidence,
  subject::{Subject, SubjectId, SubjectStatus},
};

/// Abstraction over a moderation store backend.
///
/// All methods return `Send` futures so the trait can be used in
/// multi-threaded async runtimes (e.g. tokio with `axum`).
pub trait ModerationStore: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static;

  /// Retrieve a subject by id. Returns `None` if there is no record.
  fn fetch_subject<'a>(
    &'a self,
    id: &'a SubjectId,
  ) -> impl Future<Output = Result<Option<Subject>, Self::Error>> + Send + 'a;

  /// All evidence for a subject, in no particular order.
  fn fetch_evidence<'a>(
    &'a self,
    id: &'a SubjectId,
  ) -> impl Future<Output = Result<Vec<Evidence>, Self::Error>> + Send + 'a;

  /// Move the subject to [`SubjectStatus::Appealed`] if its stored status is
  /// still `observed`.
  ///
  /// Returns `Ok(false)` when the record no longer matches (a concurrent
  /// lookup won, or ingestion changed it); that is not an error.
  fn apply_fail_safe<'a>(
    &'a self,
    id: &'a SubjectId,
    observed: SubjectStatus,
  ) -> impl Future<Output = Result<bool, Self::Error>> + Send + 'a;
}

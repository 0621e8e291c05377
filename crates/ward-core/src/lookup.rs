//! One lookup, end to end: fetch, resolve, reconcile, render.

use tracing::debug;

use crate::{
  Error, Result,
  resolve::resolve,
  severity::SeverityRanking,
  store::ModerationStore,
  subject::{SubjectId, SubjectStatus},
  verdict::{BlacklistedVerdict, ReconciliationAction, Resolution, Verdict},
};

/// Starts the appeal workflow for a subject. Fire-and-forget: failures are
/// the implementation's to log, never the lookup's to report.
pub trait AppealTrigger: Send + Sync {
  fn trigger(&self, subject_id: &SubjectId);
}

/// Presentation layer for verdicts.
pub trait Notifier {
  type Output;

  fn render_clean(&self) -> Self::Output;

  fn render_blacklisted(&self, verdict: &BlacklistedVerdict) -> Self::Output;
}

/// Result of [`check`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Outcome {
  pub verdict:    Verdict,
  /// Whether this lookup moved a stale blacklist to `APPEALED`.
  pub downgraded: bool,
}

/// Look up `id`, applying the fail-safe downgrade when the stored status
/// claims a blacklist that no evidence supports.
///
/// The appeal trigger fires only when this call's conditional write
/// succeeded; losing the write to a concurrent change is a silent no-op.
pub async fn check<S, A>(
  store: &S,
  appeals: &A,
  ranking: &SeverityRanking,
  id: &SubjectId,
) -> Result<Outcome>
where
  S: ModerationStore,
  A: AppealTrigger + ?Sized,
{
  let subject = store.fetch_subject(id).await.map_err(store_error)?;

  let evidence = match &subject {
    Some(s) if s.status != SubjectStatus::Whitelisted => {
      store.fetch_evidence(id).await.map_err(store_error)?
    }
    _ => Vec::new(),
  };

  let Resolution { verdict, action } =
    resolve(subject.as_ref(), &evidence, ranking)?;

  let mut downgraded = false;
  if let Some(ReconciliationAction::DowngradeToAppealed {
    subject_id,
    observed,
  }) = action
  {
    downgraded = store
      .apply_fail_safe(&subject_id, observed)
      .await
      .map_err(store_error)?;

    if downgraded {
      debug!(action = "checkuser", %subject_id, "subject being appealed");
      appeals.trigger(&subject_id);
    } else {
      debug!(%subject_id, "fail-safe downgrade skipped, record changed");
    }
  }

  Ok(Outcome { verdict, downgraded })
}

/// [`check`], then render the final verdict with `notifier` exactly once.
///
/// On error nothing is rendered; the caller reports the lookup as failed.
pub async fn check_and_render<S, A, N>(
  store: &S,
  appeals: &A,
  ranking: &SeverityRanking,
  notifier: &N,
  id: &SubjectId,
) -> Result<N::Output>
where
  S: ModerationStore,
  A: AppealTrigger + ?Sized,
  N: Notifier,
{
  let outcome = check(store, appeals, ranking, id).await?;
  Ok(outcome.verdict.render(notifier))
}

fn store_error<E>(e: E) -> Error
where
  E: std::error::Error + Send + Sync + 'static,
{
  Error::StoreUnavailable(Box::new(e))
}

//! The status resolver: turns a stored subject and its evidence into a
//! verdict, plus the reconciliation the store needs when the two disagree.

use crate::{
  Result,
  evidence::Evidence,
  severity::SeverityRanking,
  subject::{Subject, SubjectStatus},
  verdict::{BlacklistedVerdict, ReconciliationAction, Resolution, Verdict},
};

/// Decide the verdict for `subject` given its `evidence`.
///
/// Rules, first match wins:
///
/// 1. No record, or [`SubjectStatus::Whitelisted`]: clean.
/// 2. No evidence and [`SubjectStatus::Appealed`]: clean.
/// 3. No evidence and a blacklist status (permanent or not): clean, and the
///    stored status must be downgraded to `APPEALED`.
/// 4. Otherwise: blacklisted, with the most severe kind among the evidence.
///
/// Evidence order does not matter. A severity missing from `ranking` fails
/// the resolution with [`crate::Error::UnknownSeverityKind`].
pub fn resolve(
  subject: Option<&Subject>,
  evidence: &[Evidence],
  ranking: &SeverityRanking,
) -> Result<Resolution> {
  let Some(subject) = subject else {
    return Ok(Resolution::clean());
  };
  if subject.status == SubjectStatus::Whitelisted {
    return Ok(Resolution::clean());
  }

  let highest = ranking.highest(evidence.iter().map(|e| &e.severity))?;

  let resolution = match highest {
    None if subject.status.is_blacklisted() => Resolution {
      verdict: Verdict::Clean,
      action:  Some(ReconciliationAction::DowngradeToAppealed {
        subject_id: subject.id.clone(),
        observed:   subject.status,
      }),
    },
    None => Resolution::clean(),
    Some(highest_severity) => Resolution {
      verdict: Verdict::Blacklisted(BlacklistedVerdict {
        subject_id: subject.id.clone(),
        display_name: subject.display_name.clone(),
        avatar_ref: subject.avatar_ref.clone(),
        status: subject.status,
        evidence_count: evidence.len(),
        highest_severity,
      }),
      action:  None,
    },
  };

  Ok(resolution)
}

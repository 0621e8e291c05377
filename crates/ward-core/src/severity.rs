//! Severity kinds and the ranking table that orders them.
//!
//! The ranking is data, not logic: a new kind is introduced by listing it in
//! the table (see `severity_order` in the server configuration).

use std::{collections::HashMap, fmt};

use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// A severity value carried by a piece of evidence, e.g. `CHEATER`.
///
/// Kinds are canonicalised to trimmed upper case on construction.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub struct SeverityKind(String);

impl SeverityKind {
  pub fn new(kind: impl AsRef<str>) -> Self {
    Self(kind.as_ref().trim().to_uppercase())
  }

  pub fn as_str(&self) -> &str { &self.0 }
}

impl fmt::Display for SeverityKind {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(&self.0)
  }
}

impl From<String> for SeverityKind {
  fn from(s: String) -> Self { Self::new(s) }
}

impl From<&str> for SeverityKind {
  fn from(s: &str) -> Self { Self::new(s) }
}

impl From<SeverityKind> for String {
  fn from(k: SeverityKind) -> Self { k.0 }
}

/// Kinds known to the default table, lowest to highest.
pub const DEFAULT_ORDER: [&str; 5] =
  ["OTHER", "LEAKER", "CHEATER", "SUPPORTER", "OWNER"];

/// A strict total order over severity kinds.
#[derive(Debug, Clone)]
pub struct SeverityRanking {
  order: Vec<SeverityKind>,
  ranks: HashMap<SeverityKind, usize>,
}

impl SeverityRanking {
  /// Build a ranking from kinds listed lowest to highest.
  pub fn new<I>(lowest_to_highest: I) -> Result<Self>
  where
    I: IntoIterator,
    I::Item: Into<SeverityKind>,
  {
    let order: Vec<SeverityKind> =
      lowest_to_highest.into_iter().map(Into::into).collect();
    if order.is_empty() {
      return Err(Error::EmptySeverityRanking);
    }

    let mut ranks = HashMap::with_capacity(order.len());
    for (rank, kind) in order.iter().enumerate() {
      if ranks.insert(kind.clone(), rank).is_some() {
        return Err(Error::DuplicateSeverityKind(kind.clone()));
      }
    }

    Ok(Self { order, ranks })
  }

  /// Position of `kind` in the order; higher is more severe.
  pub fn rank(&self, kind: &SeverityKind) -> Option<usize> {
    self.ranks.get(kind).copied()
  }

  /// The ranked kinds, lowest first.
  pub fn kinds(&self) -> &[SeverityKind] { &self.order }

  /// The most severe of `kinds`, or `None` if there are none.
  ///
  /// Fails on the first kind missing from the table rather than skipping it.
  pub fn highest<'a, I>(&self, kinds: I) -> Result<Option<SeverityKind>>
  where
    I: IntoIterator<Item = &'a SeverityKind>,
  {
    let mut best: Option<(usize, &SeverityKind)> = None;
    for kind in kinds {
      let rank = self
        .rank(kind)
        .ok_or_else(|| Error::UnknownSeverityKind(kind.clone()))?;
      if best.is_none_or(|(best_rank, _)| rank > best_rank) {
        best = Some((rank, kind));
      }
    }
    Ok(best.map(|(_, kind)| kind.clone()))
  }
}

impl Default for SeverityRanking {
  fn default() -> Self {
    let order: Vec<SeverityKind> =
      DEFAULT_ORDER.iter().copied().map(SeverityKind::new).collect();
    let ranks = order
      .iter()
      .enumerate()
      .map(|(rank, kind)| (kind.clone(), rank))
      .collect();
    Self { order, ranks }
  }
}

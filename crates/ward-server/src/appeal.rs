//! Channel-backed appeal trigger and the worker that drains it.
//!
//! Lookups must not wait on the appeal workflow, so [`ChannelAppealTrigger`]
//! only enqueues the subject id. The worker records each appeal in the store.

use tokio::{sync::mpsc, task::JoinHandle};
use tracing::{error, info, warn};
use ward_core::{lookup::AppealTrigger, subject::SubjectId};
use ward_store_sqlite::SqliteStore;

/// Sends subject ids to the appeal worker.
#[derive(Debug, Clone)]
pub struct ChannelAppealTrigger {
  tx: mpsc::UnboundedSender<SubjectId>,
}

impl AppealTrigger for ChannelAppealTrigger {
  fn trigger(&self, subject_id: &SubjectId) {
    if self.tx.send(subject_id.clone()).is_err() {
      warn!(%subject_id, "appeal worker has stopped, dropping appeal");
    }
  }
}

/// Spawn the appeal worker on the current runtime.
///
/// The worker exits once every clone of the returned trigger is dropped and
/// the queue is drained.
pub fn spawn_worker(store: SqliteStore) -> (ChannelAppealTrigger, JoinHandle<()>) {
  let (tx, rx) = mpsc::unbounded_channel();
  let handle = tokio::spawn(run_worker(store, rx));
  (ChannelAppealTrigger { tx }, handle)
}

async fn run_worker(store: SqliteStore, mut rx: mpsc::UnboundedReceiver<SubjectId>) {
  while let Some(subject_id) = rx.recv().await {
    match store.record_appeal(&subject_id).await {
      Ok(appeal) => {
        info!(%subject_id, appeal_id = %appeal.appeal_id, "appeal queued");
      }
      Err(e) => error!(%subject_id, error = %e, "failed to queue appeal"),
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[tokio::test]
  async fn worker_records_every_trigger() {
    let store = SqliteStore::open_in_memory().await.unwrap();
    let (trigger, handle) = spawn_worker(store.clone());

    trigger.trigger(&SubjectId::new("1"));
    trigger.trigger(&SubjectId::new("2"));
    drop(trigger);
    handle.await.unwrap();

    let mut ids: Vec<String> = store
      .list_appeals()
      .await
      .unwrap()
      .into_iter()
      .map(|a| a.subject_id.to_string())
      .collect();
    ids.sort();
    assert_eq!(ids, ["1", "2"]);
  }

  #[tokio::test]
  async fn trigger_after_worker_stops_does_not_panic() {
    let (tx, rx) = mpsc::unbounded_channel();
    drop(rx);
    ChannelAppealTrigger { tx }.trigger(&SubjectId::new("1"));
  }
}

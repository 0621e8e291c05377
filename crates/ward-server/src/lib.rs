//! HTTP layer and runtime wiring for Ward.
//!
//! Exposes an axum [`Router`] that runs blacklist lookups against any
//! [`ModerationStore`] and returns embed-style messages as JSON.

pub mod appeal;
pub mod error;
pub mod handlers;
pub mod render;

pub use error::Error;

use std::{path::PathBuf, sync::Arc};

use axum::{Router, routing::get};
use serde::Deserialize;
use tower_http::trace::TraceLayer;
use ward_core::{
  lookup::AppealTrigger,
  severity::SeverityRanking,
  store::ModerationStore,
};

// ─── Configuration ────────────────────────────────────────────────────────────

/// Runtime configuration, deserialised from `config.toml` and `WARD_*`
/// environment variables.
#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
  pub host:           String,
  pub port:           u16,
  pub store_path:     PathBuf,
  /// Severity kinds from lowest to highest; the built-in table when unset.
  #[serde(default)]
  pub severity_order: Option<Vec<String>>,
}

impl ServerConfig {
  /// The severity ranking this server resolves with.
  pub fn ranking(&self) -> ward_core::Result<SeverityRanking> {
    match &self.severity_order {
      Some(order) => SeverityRanking::new(order.iter().map(String::as_str)),
      None => Ok(SeverityRanking::default()),
    }
  }
}

// ─── Application state ────────────────────────────────────────────────────────

/// Shared state threaded through all axum handlers.
#[derive(Clone)]
pub struct AppState<S: ModerationStore> {
  pub store:   Arc<S>,
  pub appeals: Arc<dyn AppealTrigger>,
  pub ranking: Arc<SeverityRanking>,
}

// ─── Router ───────────────────────────────────────────────────────────────────

/// Build the axum [`Router`] for the lookup API.
pub fn router<S>(state: AppState<S>) -> Router
where
  S: ModerationStore + Clone + 'static,
{
  Router::new()
    .route("/check/{id}", get(handlers::check::handler::<S>))
    .route("/health",     get(handlers::health))
    .layer(TraceLayer::new_for_http())
    .with_state(state)
}

// ─── Integration tests ────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
  use super::*;
  use std::sync::Mutex;

  use axum::{
    body::Body,
    http::{Request, StatusCode},
    response::Response,
  };
  use chrono::Utc;
  use tower::ServiceExt as _;
  use ward_core::{
    evidence::Evidence,
    subject::{Subject, SubjectId, SubjectStatus},
  };
  use ward_store_sqlite::SqliteStore;

  use crate::render::{BLACKLISTED_TITLE, Colour, Message, NO_RESULTS};

  #[derive(Default)]
  struct RecordingTrigger {
    triggered: Mutex<Vec<SubjectId>>,
  }

  impl AppealTrigger for RecordingTrigger {
    fn trigger(&self, subject_id: &SubjectId) {
      self.triggered.lock().unwrap().push(subject_id.clone());
    }
  }

  struct Harness {
    store:   SqliteStore,
    appeals: Arc<RecordingTrigger>,
    state:   AppState<SqliteStore>,
  }

  async fn harness() -> Harness {
    let store   = SqliteStore::open_in_memory().await.unwrap();
    let appeals = Arc::new(RecordingTrigger::default());
    let state   = AppState {
      store:   Arc::new(store.clone()),
      appeals: appeals.clone(),
      ranking: Arc::new(SeverityRanking::default()),
    };
    Harness { store, appeals, state }
  }

  async fn seed(store: &SqliteStore, id: &str, status: SubjectStatus, severities: &[&str]) {
    let subject = Subject {
      id: SubjectId::new(id),
      display_name: format!("user-{id}"),
      avatar_ref: format!("https://cdn.example/{id}.png"),
      status,
      updated_at: Utc::now(),
    };
    store.upsert_subject(&subject).await.unwrap();
    for (i, severity) in severities.iter().enumerate() {
      store
        .record_evidence(&Evidence::new(subject.id.clone(), format!("guild-{i}"), *severity))
        .await
        .unwrap();
    }
  }

  async fn get(state: AppState<SqliteStore>, uri: &str) -> Response {
    let req = Request::builder().uri(uri).body(Body::empty()).unwrap();
    router(state).oneshot(req).await.unwrap()
  }

  async fn json(resp: Response) -> serde_json::Value {
    let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
  }

  #[tokio::test]
  async fn health_returns_ok() {
    let h = harness().await;
    let resp = get(h.state, "/health").await;
    assert_eq!(resp.status(), StatusCode::OK);
  }

  #[tokio::test]
  async fn unknown_subject_is_clean() {
    let h = harness().await;
    let resp = get(h.state, "/check/123").await;
    assert_eq!(resp.status(), StatusCode::OK);

    let msg: Message = serde_json::from_value(json(resp).await).unwrap();
    assert_eq!(msg.description, NO_RESULTS);
    assert_eq!(msg.colour, Colour::Green);
  }

  #[tokio::test]
  async fn flagged_subject_renders_blacklisted_embed() {
    let h = harness().await;
    seed(&h.store, "555", SubjectStatus::Blacklisted, &["LEAKER", "OWNER"]).await;

    let resp = get(h.state, "/check/555").await;
    assert_eq!(resp.status(), StatusCode::OK);

    let msg: Message = serde_json::from_value(json(resp).await).unwrap();
    assert_eq!(msg.title.as_deref(), Some(BLACKLISTED_TITLE));
    assert_eq!(msg.description, "<@555> has been seen in 2 blacklisted Discords.");
    assert!(msg.fields[0].value.contains("> Type: Owner"), "{:?}", msg.fields);
    assert!(h.appeals.triggered.lock().unwrap().is_empty());
  }

  #[tokio::test]
  async fn stale_subject_is_clean_and_appealed() {
    let h = harness().await;
    seed(&h.store, "777", SubjectStatus::PermBlacklisted, &[]).await;

    let resp = get(h.state.clone(), "/check/777").await;
    assert_eq!(resp.status(), StatusCode::OK);
    let msg: Message = serde_json::from_value(json(resp).await).unwrap();
    assert_eq!(msg.description, NO_RESULTS);

    let id = SubjectId::new("777");
    let stored = h.store.fetch_subject(&id).await.unwrap().unwrap();
    assert_eq!(stored.status, SubjectStatus::Appealed);
    assert_eq!(h.appeals.triggered.lock().unwrap().as_slice(), &[id]);

    let resp = get(h.state, "/check/777").await;
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(h.appeals.triggered.lock().unwrap().len(), 1);
  }

  #[tokio::test]
  async fn unranked_severity_fails_the_lookup() {
    let h = harness().await;
    seed(&h.store, "888", SubjectStatus::Blacklisted, &["SPAMMER"]).await;

    let resp = get(h.state, "/check/888").await;
    assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body = json(resp).await;
    let error = body["error"].as_str().unwrap();
    assert!(error.contains("SPAMMER"), "{error}");
  }

  #[test]
  fn configured_severity_order_overrides_default() {
    let cfg = ServerConfig {
      host:           "127.0.0.1".into(),
      port:           8080,
      store_path:     PathBuf::from(":memory:"),
      severity_order: Some(vec!["low".into(), "high".into()]),
    };
    let ranking = cfg.ranking().unwrap();
    assert_eq!(ranking.kinds().len(), 2);
    assert!(ranking.rank(&"HIGH".into()) > ranking.rank(&"LOW".into()));

    let default = ServerConfig { severity_order: None, ..cfg };
    assert_eq!(default.ranking().unwrap().kinds().len(), 5);
  }
}

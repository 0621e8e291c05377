//! `GET /check/{id}` — look a subject up and return the rendered message.

use axum::{
  Json,
  extract::{Path, State},
};
use ward_core::{lookup, store::ModerationStore, subject::SubjectId};

use crate::{
  AppState,
  error::Error,
  render::{Message, MessageNotifier},
};

pub async fn handler<S>(
  State(state): State<AppState<S>>,
  Path(id): Path<String>,
) -> Result<Json<Message>, Error>
where
  S: ModerationStore + Clone + 'static,
{
  let id = SubjectId::new(id);

  let message = lookup::check_and_render(
    state.store.as_ref(),
    state.appeals.as_ref(),
    &state.ranking,
    &MessageNotifier,
    &id,
  )
  .await
  .inspect_err(|e| tracing::error!(subject_id = %id, error = %e, "lookup failed"))?;

  Ok(Json(message))
}

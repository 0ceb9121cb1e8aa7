//! HTTP endpoint handlers. These are thin wrappers that forward to core logic.
//! Each handler is instrumented and logs parameters and basic result info.

use std::sync::Arc;
use axum::{
  extract::{Path, State},
  http::{header, StatusCode},
  response::{IntoResponse, Response},
  Json,
};
use tracing::{info, instrument, warn};
use uuid::Uuid;

use crate::analysis::SelfAssessment;
use crate::domain::Level;
use crate::error::{MentorError, SessionError};
use crate::logic;
use crate::protocol::*;
use crate::state::{AppState, SessionHandle};

/// Error body `{ "error": "..." }`: 404 for lookups that miss, 400 for rejected input.
#[derive(Debug)]
pub struct ApiError {
  status: StatusCode,
  message: String,
}

impl From<MentorError> for ApiError {
  fn from(err: MentorError) -> Self {
    let status = match &err {
      MentorError::Catalog(_) | MentorError::Session(SessionError::UnknownSession(_)) => StatusCode::NOT_FOUND,
      MentorError::Session(_) => StatusCode::BAD_REQUEST,
    };
    Self { status, message: err.to_string() }
  }
}

impl From<SessionError> for ApiError {
  fn from(err: SessionError) -> Self {
    MentorError::from(err).into()
  }
}

impl IntoResponse for ApiError {
  fn into_response(self) -> Response {
    warn!(target: "writing_mentor", status = %self.status, error = %self.message, "HTTP request rejected");
    (self.status, Json(ErrorOut { error: self.message })).into_response()
  }
}

type ApiResult<T> = Result<T, ApiError>;

async fn open(state: &AppState, id: Uuid) -> ApiResult<SessionHandle> {
  Ok(state.session(id).await?)
}

#[instrument(level = "info", skip(state))]
pub async fn http_health(State(state): State<Arc<AppState>>) -> impl IntoResponse {
  Json(HealthOut { ok: true, mentor_configured: state.dialogue.has_endpoint() })
}

//
// Catalog
//

#[instrument(level = "info", skip(state))]
pub async fn http_list_tasks(State(state): State<Arc<AppState>>, Path(level): Path<Level>) -> impl IntoResponse {
  Json(TaskListOut { level, tasks: state.catalog.list_tasks(level) })
}

#[instrument(level = "info", skip(state))]
pub async fn http_get_task(
  State(state): State<Arc<AppState>>,
  Path((level, name)): Path<(Level, String)>,
) -> ApiResult<impl IntoResponse> {
  let task = state.catalog.get_task(level, &name).map_err(MentorError::from)?;
  Ok(Json(TaskOut::new(task)))
}

#[instrument(level = "info", skip(state))]
pub async fn http_get_toolkit(State(state): State<Arc<AppState>>, Path(level): Path<Level>) -> impl IntoResponse {
  Json(state.catalog.toolkit(level))
}

//
// Sessions
//

#[instrument(level = "info", skip(state))]
pub async fn http_create_session(State(state): State<Arc<AppState>>) -> impl IntoResponse {
  let (session_id, _) = state.create_session().await;
  (StatusCode::CREATED, Json(SessionOut { session_id }))
}

#[instrument(level = "info", skip(state))]
pub async fn http_delete_session(
  State(state): State<Arc<AppState>>,
  Path(id): Path<Uuid>,
) -> ApiResult<impl IntoResponse> {
  if !state.drop_session(id).await {
    return Err(SessionError::UnknownSession(id.to_string()).into());
  }
  Ok(StatusCode::NO_CONTENT)
}

#[instrument(level = "info", skip(state, body), fields(name = %body.name))]
pub async fn http_select_task(
  State(state): State<Arc<AppState>>,
  Path((id, level)): Path<(Uuid, Level)>,
  Json(body): Json<SelectTaskIn>,
) -> ApiResult<impl IntoResponse> {
  let session = open(&state, id).await?;
  let task = logic::select_task(&state, &session, level, &body.name).await?;
  Ok(Json(TaskOut::new(task)))
}

#[instrument(level = "info", skip(state, body), fields(draft_len = body.text.len()))]
pub async fn http_put_draft(
  State(state): State<Arc<AppState>>,
  Path((id, level)): Path<(Uuid, Level)>,
  Json(body): Json<DraftIn>,
) -> ApiResult<impl IntoResponse> {
  let session = open(&state, id).await?;
  logic::update_draft(&session, level, body.text).await;
  Ok(StatusCode::NO_CONTENT)
}

#[instrument(level = "info", skip(state))]
pub async fn http_delete_draft(
  State(state): State<Arc<AppState>>,
  Path((id, level)): Path<(Uuid, Level)>,
) -> ApiResult<impl IntoResponse> {
  let session = open(&state, id).await?;
  logic::reset_draft(&session, level).await;
  Ok(StatusCode::NO_CONTENT)
}

#[instrument(level = "info", skip(state))]
pub async fn http_get_draft_stats(
  State(state): State<Arc<AppState>>,
  Path((id, level)): Path<(Uuid, Level)>,
) -> ApiResult<impl IntoResponse> {
  let session = open(&state, id).await?;
  Ok(Json(logic::draft_stats(&session, level).await?))
}

//
// Mentor chat
//

#[instrument(level = "info", skip(state, body), fields(text_len = body.text.len()))]
pub async fn http_post_chat(
  State(state): State<Arc<AppState>>,
  Path((id, level)): Path<(Uuid, Level)>,
  Json(body): Json<ChatIn>,
) -> ApiResult<impl IntoResponse> {
  let session = open(&state, id).await?;
  let exchange = logic::send_message(&state, &session, level, &body.text).await;
  if let Some(ex) = &exchange {
    info!(target: "session", %id, %level, fallback = ex.fallback, "HTTP chat answered");
  }
  let transcript = logic::transcript(&session, level).await;
  Ok(Json(ChatOut { exchange, transcript }))
}

#[instrument(level = "info", skip(state, body), fields(quick_id = %body.id))]
pub async fn http_post_quick_question(
  State(state): State<Arc<AppState>>,
  Path((id, level)): Path<(Uuid, Level)>,
  Json(body): Json<QuickQuestionIn>,
) -> ApiResult<impl IntoResponse> {
  let session = open(&state, id).await?;
  let exchange = logic::ask_quick_question(&state, &session, level, &body.id).await?;
  let transcript = logic::transcript(&session, level).await;
  Ok(Json(ChatOut { exchange: Some(exchange), transcript }))
}

#[instrument(level = "info", skip(state))]
pub async fn http_delete_chat(
  State(state): State<Arc<AppState>>,
  Path((id, level)): Path<(Uuid, Level)>,
) -> ApiResult<impl IntoResponse> {
  let session = open(&state, id).await?;
  logic::clear_chat(&session, level).await;
  Ok(StatusCode::NO_CONTENT)
}

#[instrument(level = "info", skip(state))]
pub async fn http_export_chat(
  State(state): State<Arc<AppState>>,
  Path((id, level)): Path<(Uuid, Level)>,
) -> ApiResult<impl IntoResponse> {
  let session = open(&state, id).await?;
  let text = logic::export_chat(&session, level).await;
  Ok(([(header::CONTENT_TYPE, "text/plain; charset=utf-8")], text))
}

//
// Scratch features
//

#[instrument(level = "info", skip(state, body), fields(method = %body.method))]
pub async fn http_post_brainstorm(
  State(state): State<Arc<AppState>>,
  Path((id, level)): Path<(Uuid, Level)>,
  Json(body): Json<BrainstormIn>,
) -> ApiResult<impl IntoResponse> {
  let session = open(&state, id).await?;
  let idea = logic::brainstorm(&state, &session, level, &body.method).await?;
  let ideas = logic::ideas(&session, level).await;
  Ok(Json(IdeasOut { idea: Some(idea), ideas }))
}

#[instrument(level = "info", skip(state))]
pub async fn http_delete_brainstorm(
  State(state): State<Arc<AppState>>,
  Path((id, level)): Path<(Uuid, Level)>,
) -> ApiResult<impl IntoResponse> {
  let session = open(&state, id).await?;
  logic::clear_ideas(&session, level).await;
  Ok(StatusCode::NO_CONTENT)
}

#[instrument(level = "info", skip(state, body), fields(goal_len = body.goal.len()))]
pub async fn http_post_goal(
  State(state): State<Arc<AppState>>,
  Path((id, level)): Path<(Uuid, Level)>,
  Json(body): Json<GoalIn>,
) -> ApiResult<impl IntoResponse> {
  let session = open(&state, id).await?;
  let goals = logic::add_goal(&session, level, &body.goal).await?;
  Ok(Json(GoalsOut { goals }))
}

#[instrument(level = "info", skip(state))]
pub async fn http_delete_goals(
  State(state): State<Arc<AppState>>,
  Path((id, level)): Path<(Uuid, Level)>,
) -> ApiResult<impl IntoResponse> {
  let session = open(&state, id).await?;
  logic::clear_goals(&session, level).await;
  Ok(StatusCode::NO_CONTENT)
}

#[instrument(level = "info", skip(state, body))]
pub async fn http_post_assessment(
  State(state): State<Arc<AppState>>,
  Path((id, _level)): Path<(Uuid, Level)>,
  Json(body): Json<SelfAssessment>,
) -> ApiResult<impl IntoResponse> {
  open(&state, id).await?;
  Ok(Json(logic::self_assess(&body)?))
}

#[instrument(level = "info", skip(state))]
pub async fn http_get_encouragement(
  State(state): State<Arc<AppState>>,
  Path((id, _level)): Path<(Uuid, Level)>,
) -> ApiResult<impl IntoResponse> {
  open(&state, id).await?;
  Ok(Json(EncouragementOut { text: logic::encouragement(&state) }))
}

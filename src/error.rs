//! Error types. Catalog misses and session precondition failures surface to callers;
//! completion failures stay inside the dialogue service.

use thiserror::Error;

use crate::domain::Level;

/// Lookup misses against the static tables.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CatalogError {
  #[error("no task named '{name}' at level {level}")]
  TaskNotFound { level: Level, name: String },

  #[error("no quick question '{id}' at level {level}")]
  QuickQuestionNotFound { level: Level, id: String },

  #[error("unknown brainstorming method '{0}'")]
  MethodNotFound(String),
}

/// Why a completion request did not produce text.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CompletionError {
  #[error("completion endpoint not configured")]
  Unconfigured,

  #[error("network error: {0}")]
  Network(String),

  #[error("request timed out")]
  Timeout,

  #[error("quota or rate limit exceeded: {0}")]
  Quota(String),

  #[error("HTTP {status}: {message}")]
  Http { status: u16, message: String },

  #[error("malformed response: {0}")]
  Malformed(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SessionError {
  #[error("unknown session '{0}'")]
  UnknownSession(String),

  #[error("draft is empty")]
  EmptyDraft,

  #[error("goal must not be blank")]
  BlankGoal,

  #[error("invalid self-assessment: {0}")]
  InvalidAssessment(String),
}

/// Everything a session operation can fail with.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MentorError {
  #[error(transparent)]
  Catalog(#[from] CatalogError),

  #[error(transparent)]
  Session(#[from] SessionError),
}

//! Core session operations shared by both HTTP and WebSocket handlers.
//!
//! This includes:
//!   - Task selection and draft editing
//!   - Sending free-text and quick questions to the mentor, recording the transcript
//!   - Transcript clear/export
//!   - Draft analysis, brainstorming ideas, writing goals, self-assessment

use serde::Serialize;
use tracing::{debug, info, instrument};

use crate::analysis::{self, AssessmentSummary, DraftStats, SelfAssessment};
use crate::domain::{ChatEntry, Level, TaskDefinition};
use crate::error::{MentorError, SessionError};
use crate::seeds::ENCOURAGEMENTS;
use crate::state::{AppState, SessionHandle};

/// The two transcript entries produced by one mentor round trip.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ChatExchange {
  pub user: ChatEntry,
  pub assistant: ChatEntry,
  /// True when the reply is a canned apology rather than a model answer.
  pub fallback: bool,
}

#[instrument(level = "info", skip(state, session))]
pub async fn select_task(
  state: &AppState,
  session: &SessionHandle,
  level: Level,
  name: &str,
) -> Result<&'static TaskDefinition, MentorError> {
  let task = state.catalog.get_task(level, name)?;
  session.lock().await.level_mut(level).selected_task = Some(task);
  info!(target: "session", %level, task = %task.name, "Task selected");
  Ok(task)
}

pub async fn update_draft(session: &SessionHandle, level: Level, text: String) {
  debug!(target: "session", %level, draft_len = text.len(), "Draft updated");
  session.lock().await.level_mut(level).draft = text;
}

pub async fn reset_draft(session: &SessionHandle, level: Level) {
  session.lock().await.level_mut(level).draft.clear();
  debug!(target: "session", %level, "Draft reset");
}

/// Blank or whitespace-only text is a no-op: nothing recorded, no mentor call.
#[instrument(level = "info", skip(state, session, text), fields(text_len = text.len()))]
pub async fn send_message(
  state: &AppState,
  session: &SessionHandle,
  level: Level,
  text: &str,
) -> Option<ChatExchange> {
  let text = text.trim();
  if text.is_empty() {
    debug!(target: "session", %level, "Ignoring blank message");
    return None;
  }

  let mut guard = session.lock().await;
  let slot = guard.level_mut(level);
  let task_kind = slot.selected_task.map(|t| t.kind);
  let user = ChatEntry::user(text);
  slot.transcript.push(user.clone());

  let outcome = state.dialogue.reply(level, text, task_kind, &slot.draft).await;
  let fallback = outcome.is_fallback();
  let assistant = ChatEntry::assistant(outcome.into_text());
  slot.transcript.push(assistant.clone());
  debug!(target: "session", %level, transcript_len = slot.transcript.len(), "Exchange recorded");

  Some(ChatExchange { user, assistant, fallback })
}

/// Quick questions are sent without task context; the transcript shows their display text.
#[instrument(level = "info", skip(state, session))]
pub async fn ask_quick_question(
  state: &AppState,
  session: &SessionHandle,
  level: Level,
  id: &str,
) -> Result<ChatExchange, MentorError> {
  let question = state.catalog.quick_question(level, id)?;

  let mut guard = session.lock().await;
  let slot = guard.level_mut(level);
  let user = ChatEntry::user(question.display);
  slot.transcript.push(user.clone());

  let outcome = state.dialogue.reply(level, question.prompt, None, &slot.draft).await;
  let fallback = outcome.is_fallback();
  let assistant = ChatEntry::assistant(outcome.into_text());
  slot.transcript.push(assistant.clone());

  Ok(ChatExchange { user, assistant, fallback })
}

pub async fn clear_chat(session: &SessionHandle, level: Level) {
  session.lock().await.level_mut(level).transcript.clear();
  debug!(target: "session", %level, "Transcript cleared");
}

pub async fn transcript(session: &SessionHandle, level: Level) -> Vec<ChatEntry> {
  session.lock().await.level(level).transcript.entries().to_vec()
}

pub async fn export_chat(session: &SessionHandle, level: Level) -> String {
  session.lock().await.level(level).transcript.export()
}

pub async fn draft_stats(session: &SessionHandle, level: Level) -> Result<DraftStats, MentorError> {
  let guard = session.lock().await;
  Ok(analysis::draft_stats(level, &guard.level(level).draft)?)
}

/// Record one random prompt of the chosen method as a new idea; returns the idea.
#[instrument(level = "debug", skip(state, session))]
pub async fn brainstorm(
  state: &AppState,
  session: &SessionHandle,
  level: Level,
  method: &str,
) -> Result<String, MentorError> {
  let m = state.catalog.brainstorm_method(method)?;
  let prompt = state.dialogue.choose(m.prompts).copied().unwrap_or_default();
  let idea = format!("**{}**: {}", m.name, prompt);
  session.lock().await.level_mut(level).add_idea(idea.clone());
  Ok(idea)
}

pub async fn ideas(session: &SessionHandle, level: Level) -> Vec<String> {
  session.lock().await.level(level).ideas.clone()
}

pub async fn clear_ideas(session: &SessionHandle, level: Level) {
  session.lock().await.level_mut(level).ideas.clear();
}

pub async fn add_goal(session: &SessionHandle, level: Level, goal: &str) -> Result<Vec<String>, MentorError> {
  let goal = goal.trim();
  if goal.is_empty() {
    return Err(SessionError::BlankGoal.into());
  }
  let mut guard = session.lock().await;
  let slot = guard.level_mut(level);
  slot.add_goal(goal.to_string());
  Ok(slot.goals.clone())
}

pub async fn clear_goals(session: &SessionHandle, level: Level) {
  session.lock().await.level_mut(level).goals.clear();
}

pub fn self_assess(assessment: &SelfAssessment) -> Result<AssessmentSummary, MentorError> {
  Ok(analysis::summarize_assessment(assessment)?)
}

pub fn encouragement(state: &AppState) -> &'static str {
  state.dialogue.choose(ENCOURAGEMENTS).copied().unwrap_or(ENCOURAGEMENTS[0])
}

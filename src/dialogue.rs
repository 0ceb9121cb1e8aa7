//! Mentor dialogue: turns a learner question plus writing context into one completion
//! request, and adapts the result into display text.
//!
//! The service never fails outward. Endpoint errors are logged with their typed reason and
//! replaced by one of the level's canned apologies, picked from an injectable RNG.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use tracing::{info, instrument, warn};

use crate::config::Personas;
use crate::domain::{Level, TaskKind};
use crate::error::CompletionError;
use crate::seeds::fallback_messages;
use crate::util::{fill_template, trunc_for_log, truncate_chars};

const GENERIC_TASK_KIND: &str = "일반";

/// Everything the completion endpoint needs for one call.
#[derive(Clone, Debug, PartialEq)]
pub struct CompletionRequest {
  pub system: String,
  pub user: String,
  pub temperature: f32,
  pub max_tokens: u32,
}

/// A chat-completion backend. `OpenAI` in production, scripted stubs in tests.
#[async_trait]
pub trait CompletionEndpoint: Send + Sync {
  async fn complete(&self, req: &CompletionRequest) -> Result<String, CompletionError>;
}

#[derive(Debug, Clone, PartialEq)]
pub enum DialogueOutcome {
  Responded(String),
  FallenBack { text: &'static str, reason: CompletionError },
}

impl DialogueOutcome {
  pub fn into_text(self) -> String {
    match self {
      DialogueOutcome::Responded(t) => t,
      DialogueOutcome::FallenBack { text, .. } => text.to_string(),
    }
  }

  pub fn is_fallback(&self) -> bool {
    matches!(self, DialogueOutcome::FallenBack { .. })
  }
}

/// The learner's draft cut to the level's cap. `None` when the draft is blank.
pub fn draft_snapshot(level: Level, draft: &str) -> Option<(&str, bool)> {
  if draft.trim().is_empty() {
    return None;
  }
  Some(truncate_chars(draft, level.profile().draft_cap))
}

pub struct DialogueService {
  endpoint: Option<Arc<dyn CompletionEndpoint>>,
  personas: Personas,
  rng: Mutex<StdRng>,
}

impl DialogueService {
  pub fn new(endpoint: Option<Arc<dyn CompletionEndpoint>>, personas: Personas) -> Self {
    Self { endpoint, personas, rng: Mutex::new(StdRng::from_entropy()) }
  }

  /// Replace the random source, e.g. with a seeded one for deterministic picks.
  pub fn with_rng(mut self, rng: StdRng) -> Self {
    self.rng = Mutex::new(rng);
    self
  }

  pub fn has_endpoint(&self) -> bool {
    self.endpoint.is_some()
  }

  pub fn build_request(
    &self,
    level: Level,
    message: &str,
    task_kind: Option<TaskKind>,
    draft: &str,
  ) -> CompletionRequest {
    let kind = task_kind.map(|k| k.prompt_tag(level)).unwrap_or(GENERIC_TASK_KIND);
    let system = fill_template(self.personas.for_level(level), &[("task_kind", kind)]);

    let mut user = format!("학생 질문: {}", message);
    if let Some((snapshot, truncated)) = draft_snapshot(level, draft) {
      user.push_str("\n\n학생이 현재 작성 중인 글: ");
      user.push_str(snapshot);
      if truncated {
        user.push_str("...");
      }
    }

    let profile = level.profile();
    CompletionRequest { system, user, temperature: profile.temperature, max_tokens: profile.max_tokens }
  }

  /// One request, no retry. Always yields display text.
  #[instrument(
    level = "info",
    skip(self, level, message, task_kind, draft),
    fields(%level, kind = ?task_kind, message_len = message.len(), draft_len = draft.len())
  )]
  pub async fn reply(
    &self,
    level: Level,
    message: &str,
    task_kind: Option<TaskKind>,
    draft: &str,
  ) -> DialogueOutcome {
    let result = match &self.endpoint {
      Some(endpoint) => {
        let req = self.build_request(level, message, task_kind, draft);
        endpoint.complete(&req).await
      }
      None => Err(CompletionError::Unconfigured),
    };

    match result {
      Ok(text) => {
        info!(target: "dialogue", %level, reply = %trunc_for_log(&text, 60), "Mentor replied");
        DialogueOutcome::Responded(text)
      }
      Err(reason) => {
        let text = self.fallback(level);
        warn!(target: "dialogue", %level, error = %reason, "Mentor request failed; serving fallback");
        DialogueOutcome::FallenBack { text, reason }
      }
    }
  }

  fn fallback(&self, level: Level) -> &'static str {
    let messages = fallback_messages(level);
    self.choose(messages).copied().unwrap_or(messages[0])
  }

  /// Uniform pick from `items` using the service's random source.
  pub fn choose<'a, T>(&self, items: &'a [T]) -> Option<&'a T> {
    let mut rng = self.rng.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
    items.choose(&mut *rng)
  }
}

#[cfg(test)]
pub(crate) mod testing {
  use std::sync::atomic::{AtomicUsize, Ordering};
  use std::sync::Mutex;

  use super::*;

  /// Endpoint that returns a fixed result and records what it was sent.
  pub struct ScriptedEndpoint {
    result: Result<String, CompletionError>,
    calls: AtomicUsize,
    last: Mutex<Option<CompletionRequest>>,
  }

  impl ScriptedEndpoint {
    pub fn replying(text: &str) -> Arc<Self> {
      Arc::new(Self { result: Ok(text.to_string()), calls: AtomicUsize::new(0), last: Mutex::new(None) })
    }

    pub fn failing(err: CompletionError) -> Arc<Self> {
      Arc::new(Self { result: Err(err), calls: AtomicUsize::new(0), last: Mutex::new(None) })
    }

    pub fn calls(&self) -> usize {
      self.calls.load(Ordering::SeqCst)
    }

    pub fn last_request(&self) -> Option<CompletionRequest> {
      self.last.lock().unwrap().clone()
    }
  }

  #[async_trait]
  impl CompletionEndpoint for ScriptedEndpoint {
    async fn complete(&self, req: &CompletionRequest) -> Result<String, CompletionError> {
      self.calls.fetch_add(1, Ordering::SeqCst);
      *self.last.lock().unwrap() = Some(req.clone());
      self.result.clone()
    }
  }

  pub fn service_with(endpoint: Arc<ScriptedEndpoint>) -> DialogueService {
    DialogueService::new(Some(endpoint as Arc<dyn CompletionEndpoint>), Personas::default()).with_rng(StdRng::seed_from_u64(7))
  }
}

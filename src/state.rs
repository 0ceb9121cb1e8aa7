//! Application state: static catalog, mentor dialogue service, and in-memory sessions.
//!
//! This module owns:
//!   - the task catalog (compiled-in, read-only)
//!   - the dialogue service (persona prompts + optional OpenAI client)
//!   - the session table; each session sits behind its own async mutex so one learner
//!     never has two mentor requests in flight at once. Sessions idle longer than
//!     `session_idle` are swept by a background task.

use std::{
    collections::HashMap,
    sync::Arc,
    time::{Duration, Instant},
};
use rand::rngs::StdRng;
use rand::SeedableRng;
use tokio::sync::{Mutex, RwLock};
use tokio::task::JoinHandle;
use tracing::{debug, error, info, instrument};
use uuid::Uuid;

use crate::catalog::Catalog;
use crate::config::{load_mentor_config_from_env, MentorConfig};
use crate::dialogue::{CompletionEndpoint, DialogueService};
use crate::error::SessionError;
use crate::openai::OpenAI;
use crate::session::Session;

pub type SessionHandle = Arc<Mutex<Session>>;

struct SessionSlot {
    handle: SessionHandle,
    last_seen: Instant,
}

pub struct AppState {
    pub catalog: Catalog,
    pub dialogue: DialogueService,
    sessions: RwLock<HashMap<Uuid, SessionSlot>>,
    pub transcript_cap: usize,
    pub session_idle: Duration,
}

/// Pick the mentor endpoint from the result of reading the OpenAI env.
fn mentor_endpoint(openai: Result<Option<OpenAI>, reqwest::Error>) -> Option<Arc<dyn CompletionEndpoint>> {
    match openai {
        Ok(Some(oa)) => {
            info!(target: "writing_mentor", base_url = %oa.base_url, model = %oa.model, "OpenAI enabled.");
            Some(Arc::new(oa) as Arc<dyn CompletionEndpoint>)
        }
        Ok(None) => {
            info!(target: "writing_mentor", "OpenAI disabled (no OPENAI_API_KEY). Every mentor reply will be a fallback.");
            None
        }
        Err(e) => {
            error!(target: "writing_mentor", error = %e, "OpenAI client could not be built. Every mentor reply will be a fallback.");
            None
        }
    }
}

impl AppState {
    /// Build state from env: load config, init OpenAI (if keyed), load the catalog.
    #[instrument(level = "info", skip_all)]
    pub fn new() -> Self {
        let cfg = load_mentor_config_from_env().unwrap_or_default();

        let endpoint = mentor_endpoint(OpenAI::from_env(Duration::from_secs(cfg.request_timeout_secs)));
        let mut dialogue = DialogueService::new(endpoint, cfg.personas.clone());
        if let Some(seed) = cfg.rng_seed {
            info!(target: "writing_mentor", seed, "Using seeded random source");
            dialogue = dialogue.with_rng(StdRng::seed_from_u64(seed));
        }

        Self::with_parts(Catalog::builtin(), dialogue, &cfg)
    }

    pub fn with_parts(catalog: Catalog, dialogue: DialogueService, cfg: &MentorConfig) -> Self {
        Self {
            catalog,
            dialogue,
            sessions: RwLock::new(HashMap::new()),
            transcript_cap: cfg.transcript_cap,
            session_idle: Duration::from_secs(cfg.session_idle_secs),
        }
    }

    /// Register a fresh session with empty state for every level.
    #[instrument(level = "debug", skip(self))]
    pub async fn create_session(&self) -> (Uuid, SessionHandle) {
        let id = Uuid::new_v4();
        let handle = Arc::new(Mutex::new(Session::new(self.transcript_cap)));
        let slot = SessionSlot { handle: handle.clone(), last_seen: Instant::now() };
        self.sessions.write().await.insert(id, slot);
        info!(target: "session", %id, "Session created");
        (id, handle)
    }

    /// Look up a session and mark it as used.
    pub async fn session(&self, id: Uuid) -> Result<SessionHandle, SessionError> {
        let mut sessions = self.sessions.write().await;
        let slot = sessions
            .get_mut(&id)
            .ok_or_else(|| SessionError::UnknownSession(id.to_string()))?;
        slot.last_seen = Instant::now();
        Ok(slot.handle.clone())
    }

    /// Mark a session as used without fetching it (WebSocket connections hold their handle).
    pub async fn touch(&self, id: Uuid) {
        if let Some(slot) = self.sessions.write().await.get_mut(&id) {
            slot.last_seen = Instant::now();
        }
    }

    /// Returns whether the session existed.
    pub async fn drop_session(&self, id: Uuid) -> bool {
        let existed = self.sessions.write().await.remove(&id).is_some();
        if existed {
            debug!(target: "session", %id, "Session dropped");
        }
        existed
    }

    pub async fn session_count(&self) -> usize {
        self.sessions.read().await.len()
    }

    /// Remove every session last used more than `session_idle` before `now`.
    pub async fn sweep_idle(&self, now: Instant) -> usize {
        let mut sessions = self.sessions.write().await;
        let before = sessions.len();
        sessions.retain(|_, slot| now.saturating_duration_since(slot.last_seen) < self.session_idle);
        let removed = before - sessions.len();
        if removed > 0 {
            info!(target: "session", removed, remaining = sessions.len(), "Idle sessions swept");
        }
        removed
    }
}

/// Periodically sweep idle sessions for the lifetime of the server.
pub fn spawn_session_sweeper(state: Arc<AppState>) -> JoinHandle<()> {
    let period = (state.session_idle / 4).max(Duration::from_secs(1));
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(period);
        loop {
            ticker.tick().await;
            state.sweep_idle(Instant::now()).await;
        }
    })
}

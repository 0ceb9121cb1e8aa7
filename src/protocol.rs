//! Public protocol structs for WebSocket and HTTP endpoints (serde ready).
//! Keep this small and stable to evolve backend and frontend independently.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::analysis::{AssessmentSummary, DraftStats};
use crate::domain::{ChatEntry, Level, TaskDefinition};
use crate::logic::ChatExchange;
use crate::seeds::genre_guide;

/// Messages the client can send over WebSocket. The connection owns its session,
/// so every operation only names the level it targets.
#[derive(Debug, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ClientWsMessage {
    Ping,
    ListTasks {
        level: Level,
    },
    SelectTask {
        level: Level,
        name: String,
    },
    UpdateDraft {
        level: Level,
        text: String,
    },
    ResetDraft {
        level: Level,
    },
    DraftStats {
        level: Level,
    },
    SendMessage {
        level: Level,
        text: String,
    },
    QuickQuestion {
        level: Level,
        id: String,
    },
    ClearChat {
        level: Level,
    },
    ExportChat {
        level: Level,
    },
    Brainstorm {
        level: Level,
        method: String,
    },
    ClearIdeas {
        level: Level,
    },
    AddGoal {
        level: Level,
        goal: String,
    },
    ClearGoals {
        level: Level,
    },
    SelfAssess {
        content: [u8; 4],
        organization: [u8; 4],
        language: [u8; 4],
    },
    Encouragement,
}

/// Messages the server sends back over WebSocket.
#[derive(Debug, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ServerWsMessage {
    Pong,
    Tasks {
        level: Level,
        names: Vec<&'static str>,
    },
    Task {
        level: Level,
        task: TaskOut,
    },
    Ack {
        level: Level,
    },
    DraftStats {
        level: Level,
        stats: DraftStats,
    },
    Chat {
        level: Level,
        exchange: Option<ChatExchange>,
    },
    Export {
        level: Level,
        text: String,
    },
    Ideas {
        level: Level,
        ideas: Vec<String>,
    },
    Goals {
        level: Level,
        goals: Vec<String>,
    },
    Assessment {
        summary: AssessmentSummary,
    },
    Encouragement {
        text: &'static str,
    },
    Error {
        message: String,
    },
}

//
// HTTP request/response DTOs
//

#[derive(Serialize)]
pub struct HealthOut {
    pub ok: bool,
    #[serde(rename = "mentorConfigured")]
    pub mentor_configured: bool,
}

/// A task plus the genre guide for its kind (advanced tasks only).
#[derive(Debug, Serialize)]
pub struct TaskOut {
    #[serde(flatten)]
    pub task: &'static TaskDefinition,
    #[serde(rename = "genreGuide", skip_serializing_if = "Option::is_none")]
    pub genre_guide: Option<&'static [&'static str]>,
}

impl TaskOut {
    pub fn new(task: &'static TaskDefinition) -> Self {
        Self { task, genre_guide: genre_guide(task.kind) }
    }
}

#[derive(Serialize)]
pub struct TaskListOut {
    pub level: Level,
    pub tasks: Vec<&'static str>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct SessionOut {
    #[serde(rename = "sessionId")]
    pub session_id: Uuid,
}

#[derive(Deserialize)]
pub struct SelectTaskIn {
    pub name: String,
}

#[derive(Deserialize)]
pub struct DraftIn {
    pub text: String,
}

#[derive(Deserialize)]
pub struct ChatIn {
    pub text: String,
}

/// `exchange` is null when the submitted text was blank.
#[derive(Serialize)]
pub struct ChatOut {
    pub exchange: Option<ChatExchange>,
    pub transcript: Vec<ChatEntry>,
}

#[derive(Deserialize)]
pub struct QuickQuestionIn {
    pub id: String,
}

#[derive(Deserialize)]
pub struct BrainstormIn {
    pub method: String,
}

#[derive(Serialize)]
pub struct IdeasOut {
    pub idea: Option<String>,
    pub ideas: Vec<String>,
}

#[derive(Deserialize)]
pub struct GoalIn {
    pub goal: String,
}

#[derive(Serialize)]
pub struct GoalsOut {
    pub goals: Vec<String>,
}

#[derive(Serialize)]
pub struct EncouragementOut {
    pub text: &'static str,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorOut {
    pub error: String,
}

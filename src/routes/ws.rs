//! WebSocket upgrade + message loop. Each connection owns a fresh session for its lifetime.
//! Client messages are parsed as JSON and forwarded to core logic; we reply with a single
//! JSON message per request.

use std::sync::Arc;
use axum::{
  extract::{
    ws::{Message, WebSocket},
    State, WebSocketUpgrade,
  },
  response::IntoResponse,
};
use tracing::{debug, error, info, instrument};

use crate::analysis::SelfAssessment;
use crate::logic;
use crate::protocol::{ClientWsMessage, ServerWsMessage, TaskOut};
use crate::state::{AppState, SessionHandle};

#[instrument(level = "info", skip(state))]
pub async fn ws_upgrade(ws: WebSocketUpgrade, State(state): State<Arc<AppState>>) -> impl IntoResponse {
  info!(target: "writing_mentor", "WebSocket upgrade requested");
  ws.on_upgrade(move |socket| handle_ws(socket, state))
}

#[instrument(level = "info", skip(socket, state))]
async fn handle_ws(mut socket: WebSocket, state: Arc<AppState>) {
  let (id, session) = state.create_session().await;
  info!(target: "writing_mentor", %id, "WebSocket connected");

  while let Some(Ok(msg)) = socket.recv().await {
    match msg {
      Message::Text(txt) => {
        state.touch(id).await;
        // Parse, dispatch, serialize response.
        let reply_msg = match serde_json::from_str::<ClientWsMessage>(&txt) {
          Ok(incoming) => {
            debug!(target: "writing_mentor", "WS received: {:?}", &incoming);
            handle_client_ws(incoming, &state, &session).await
          }
          Err(e) => ServerWsMessage::Error { message: format!("Invalid JSON: {}", e) },
        };

        let out = serde_json::to_string(&reply_msg).unwrap_or_else(|e| {
          serde_json::json!({ "type": "error", "message": format!("Serialization error: {}", e) }).to_string()
        });

        if let Err(e) = socket.send(Message::Text(out)).await {
          error!(target: "writing_mentor", error = %e, "WS send error");
          break;
        }
      }
      Message::Ping(payload) => { let _ = socket.send(Message::Pong(payload)).await; }
      Message::Close(_) => break,
      _ => {}
    }
  }

  state.drop_session(id).await;
  info!(target: "writing_mentor", %id, "WebSocket disconnected");
}

#[instrument(level = "info", skip(state, session))]
pub(crate) async fn handle_client_ws(msg: ClientWsMessage, state: &AppState, session: &SessionHandle) -> ServerWsMessage {
  let result = match msg {
    ClientWsMessage::Ping => Ok(ServerWsMessage::Pong),

    ClientWsMessage::ListTasks { level } =>
      Ok(ServerWsMessage::Tasks { level, names: state.catalog.list_tasks(level) }),

    ClientWsMessage::SelectTask { level, name } =>
      logic::select_task(state, session, level, &name).await.map(|task| ServerWsMessage::Task { level, task: TaskOut::new(task) }),

    ClientWsMessage::UpdateDraft { level, text } => {
      logic::update_draft(session, level, text).await;
      Ok(ServerWsMessage::Ack { level })
    }

    ClientWsMessage::ResetDraft { level } => {
      logic::reset_draft(session, level).await;
      Ok(ServerWsMessage::Ack { level })
    }

    ClientWsMessage::DraftStats { level } =>
      logic::draft_stats(session, level).await.map(|stats| ServerWsMessage::DraftStats { level, stats }),

    ClientWsMessage::SendMessage { level, text } => {
      let exchange = logic::send_message(state, session, level, &text).await;
      Ok(ServerWsMessage::Chat { level, exchange })
    }

    ClientWsMessage::QuickQuestion { level, id } =>
      logic::ask_quick_question(state, session, level, &id)
        .await
        .map(|exchange| ServerWsMessage::Chat { level, exchange: Some(exchange) }),

    ClientWsMessage::ClearChat { level } => {
      logic::clear_chat(session, level).await;
      Ok(ServerWsMessage::Ack { level })
    }

    ClientWsMessage::ExportChat { level } =>
      Ok(ServerWsMessage::Export { level, text: logic::export_chat(session, level).await }),

    ClientWsMessage::Brainstorm { level, method } => match logic::brainstorm(state, session, level, &method).await {
      Ok(_) => Ok(ServerWsMessage::Ideas { level, ideas: logic::ideas(session, level).await }),
      Err(e) => Err(e),
    },

    ClientWsMessage::ClearIdeas { level } => {
      logic::clear_ideas(session, level).await;
      Ok(ServerWsMessage::Ideas { level, ideas: Vec::new() })
    }

    ClientWsMessage::AddGoal { level, goal } =>
      logic::add_goal(session, level, &goal).await.map(|goals| ServerWsMessage::Goals { level, goals }),

    ClientWsMessage::ClearGoals { level } => {
      logic::clear_goals(session, level).await;
      Ok(ServerWsMessage::Goals { level, goals: Vec::new() })
    }

    ClientWsMessage::SelfAssess { content, organization, language } =>
      logic::self_assess(&SelfAssessment { content, organization, language })
        .map(|summary| ServerWsMessage::Assessment { summary }),

    ClientWsMessage::Encouragement => Ok(ServerWsMessage::Encouragement { text: logic::encouragement(state) }),
  };

  result.unwrap_or_else(|e| ServerWsMessage::Error { message: e.to_string() })
}

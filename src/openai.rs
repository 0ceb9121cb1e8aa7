//! Minimal OpenAI client for the mentor dialogue.
//!
//! We only call chat.completions with a (system, user) pair and read back plain text.
//! Calls are instrumented and log model names, latencies, and response sizes (not contents).
//!
//! NOTE: We never log the API key, and every failure is mapped onto a `CompletionError`
//! so the dialogue service can tell network, quota and malformed-response failures apart.

use std::time::{Duration, Instant};

use async_trait::async_trait;
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE, USER_AGENT};
use reqwest::StatusCode;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument};

use crate::dialogue::{CompletionEndpoint, CompletionRequest};
use crate::error::CompletionError;

pub const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";
pub const DEFAULT_MODEL: &str = "gpt-4o-mini";

#[derive(Clone)]
pub struct OpenAI {
  pub client: reqwest::Client,
  pub api_key: String,
  pub base_url: String,
  pub model: String,
}

impl OpenAI {
  pub fn new(
    api_key: impl Into<String>,
    base_url: impl Into<String>,
    model: impl Into<String>,
    timeout: Duration,
  ) -> Result<Self, reqwest::Error> {
    let client = reqwest::Client::builder().timeout(timeout).build()?;
    let base_url: String = base_url.into();
    Ok(Self {
      client,
      api_key: api_key.into(),
      base_url: base_url.trim_end_matches('/').to_string(),
      model: model.into(),
    })
  }

  /// Construct the client if we find OPENAI_API_KEY; `Ok(None)` when no key is set.
  pub fn from_env(timeout: Duration) -> Result<Option<Self>, reqwest::Error> {
    let Some(api_key) = std::env::var("OPENAI_API_KEY").ok().filter(|k| !k.trim().is_empty()) else {
      return Ok(None);
    };
    let base_url = std::env::var("OPENAI_BASE_URL").unwrap_or_else(|_| DEFAULT_BASE_URL.into());
    let model = std::env::var("OPENAI_MODEL").unwrap_or_else(|_| DEFAULT_MODEL.into());
    Self::new(api_key, base_url, model, timeout).map(Some)
  }

  /// Plain-text chat completion with an output-length cap.
  #[instrument(level = "info", skip(self, req), fields(model = %self.model, temperature = req.temperature, max_tokens = req.max_tokens))]
  async fn chat_plain(&self, req: &CompletionRequest) -> Result<String, CompletionError> {
    let url = format!("{}/chat/completions", self.base_url);
    let body = ChatCompletionRequest {
      model: &self.model,
      messages: [
        ChatMessageReq { role: "system", content: &req.system },
        ChatMessageReq { role: "user", content: &req.user },
      ],
      temperature: req.temperature,
      max_tokens: req.max_tokens,
    };

    let start = Instant::now();
    let res = self
      .client
      .post(&url)
      .header(USER_AGENT, "writing-mentor/0.1")
      .header(CONTENT_TYPE, "application/json")
      .header(AUTHORIZATION, format!("Bearer {}", self.api_key))
      .json(&body)
      .send()
      .await
      .map_err(classify_transport)?;

    let status = res.status();
    if !status.is_success() {
      let body = res.text().await.unwrap_or_default();
      return Err(classify_status(status, &body));
    }

    let body: ChatCompletionResponse = res.json().await.map_err(|e| {
      if e.is_timeout() { CompletionError::Timeout } else { CompletionError::Malformed(e.to_string()) }
    })?;
    if let Some(usage) = &body.usage {
      info!(prompt_tokens = ?usage.prompt_tokens, completion_tokens = ?usage.completion_tokens, total_tokens = ?usage.total_tokens, "OpenAI usage");
    }

    let text = body
      .choices
      .into_iter()
      .next()
      .and_then(|c| c.message.content)
      .ok_or_else(|| CompletionError::Malformed("response carried no completion text".into()))?;

    debug!(elapsed = ?start.elapsed(), reply_len = text.len(), "Completion received");
    Ok(text)
  }
}

#[async_trait]
impl CompletionEndpoint for OpenAI {
  async fn complete(&self, req: &CompletionRequest) -> Result<String, CompletionError> {
    self.chat_plain(req).await
  }
}

fn classify_transport(e: reqwest::Error) -> CompletionError {
  if e.is_timeout() {
    CompletionError::Timeout
  } else {
    CompletionError::Network(e.to_string())
  }
}

fn classify_status(status: StatusCode, body: &str) -> CompletionError {
  let detail = extract_openai_error(body);
  let message = detail.as_ref().map(|d| d.message.clone()).unwrap_or_else(|| body.to_string());
  let quota_code = detail
    .as_ref()
    .and_then(|d| d.code.as_deref().or(d.kind.as_deref()))
    .is_some_and(|c| c == "insufficient_quota" || c == "rate_limit_exceeded");

  if status == StatusCode::TOO_MANY_REQUESTS || quota_code {
    CompletionError::Quota(message)
  } else {
    CompletionError::Http { status: status.as_u16(), message }
  }
}

// --- Chat DTOs ---

#[derive(Serialize)]
struct ChatCompletionRequest<'a> {
  model: &'a str,
  messages: [ChatMessageReq<'a>; 2],
  temperature: f32,
  max_tokens: u32,
}
#[derive(Serialize)]
struct ChatMessageReq<'a> { role: &'static str, content: &'a str }

#[derive(Deserialize)]
struct ChatCompletionResponse {
  choices: Vec<ChatChoice>,
  #[serde(default)] usage: Option<Usage>,
}
#[derive(Deserialize)]
struct ChatChoice { message: ChatMessageResp }
#[derive(Deserialize)]
struct ChatMessageResp { content: Option<String> }
#[derive(Deserialize)]
struct Usage {
  #[serde(default)] prompt_tokens: Option<u32>,
  #[serde(default)] completion_tokens: Option<u32>,
  #[serde(default)] total_tokens: Option<u32>,
}

struct ErrorDetail {
  message: String,
  code: Option<String>,
  kind: Option<String>,
}

/// Try to extract a clean error message (and code) from an OpenAI error body.
fn extract_openai_error(body: &str) -> Option<ErrorDetail> {
  #[derive(Deserialize)]
  struct EWrap { error: EObj }
  #[derive(Deserialize)]
  struct EObj {
    message: String,
    #[serde(default)] code: Option<String>,
    #[serde(default, rename = "type")] kind: Option<String>,
  }
  serde_json::from_str::<EWrap>(body)
    .ok()
    .map(|w| ErrorDetail { message: w.error.message, code: w.error.code, kind: w.error.kind })
}

#[cfg(test)]
mod tests {
  use super::*;
  use serde_json::json;
  use wiremock::matchers::{body_partial_json, header, method, path};
  use wiremock::{Mock, MockServer, ResponseTemplate};

  fn request() -> CompletionRequest {
    CompletionRequest {
      system: "persona".into(),
      user: "학생 질문: hi".into(),
      temperature: 0.7,
      max_tokens: 200,
    }
  }

  fn client(server: &MockServer) -> OpenAI {
    OpenAI::new("sk-test", format!("{}/", server.uri()), "gpt-test", Duration::from_secs(5)).unwrap()
  }

  #[test]
  fn strips_trailing_slash() {
    let oa = OpenAI::new("k", "https://example.com/v1/", "m", Duration::from_secs(1)).unwrap();
    assert_eq!(oa.base_url, "https://example.com/v1");
  }

  #[test]
  fn request_serializes_two_messages_and_caps() {
    let req = request();
    let body = ChatCompletionRequest {
      model: "gpt-test",
      messages: [
        ChatMessageReq { role: "system", content: &req.system },
        ChatMessageReq { role: "user", content: &req.user },
      ],
      temperature: req.temperature,
      max_tokens: req.max_tokens,
    };
    let v = serde_json::to_value(&body).unwrap();
    assert_eq!(v["messages"].as_array().unwrap().len(), 2);
    assert_eq!(v["messages"][0]["role"], "system");
    assert_eq!(v["messages"][1]["role"], "user");
    assert_eq!(v["max_tokens"], 200);
  }

  #[tokio::test]
  async fn returns_completion_text_unmodified() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
      .and(path("/chat/completions"))
      .and(header("authorization", "Bearer sk-test"))
      .and(body_partial_json(json!({ "model": "gpt-test", "max_tokens": 200 })))
      .respond_with(ResponseTemplate::new(200).set_body_json(json!({
        "choices": [{ "message": { "content": "  Try: Hello!\n" } }],
        "usage": { "prompt_tokens": 10, "completion_tokens": 4, "total_tokens": 14 }
      })))
      .expect(1)
      .mount(&server)
      .await;

    let text = client(&server).complete(&request()).await.unwrap();
    assert_eq!(text, "  Try: Hello!\n");
  }

  #[tokio::test]
  async fn rate_limit_maps_to_quota() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
      .and(path("/chat/completions"))
      .respond_with(ResponseTemplate::new(429).set_body_json(json!({
        "error": { "message": "Rate limit reached", "type": "requests" }
      })))
      .mount(&server)
      .await;

    let err = client(&server).complete(&request()).await.unwrap_err();
    assert_eq!(err, CompletionError::Quota("Rate limit reached".into()));
  }

  #[tokio::test]
  async fn insufficient_quota_code_maps_to_quota() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
      .respond_with(ResponseTemplate::new(403).set_body_json(json!({
        "error": { "message": "You exceeded your current quota", "code": "insufficient_quota" }
      })))
      .mount(&server)
      .await;

    let err = client(&server).complete(&request()).await.unwrap_err();
    assert!(matches!(err, CompletionError::Quota(_)));
  }

  #[tokio::test]
  async fn server_error_keeps_status() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
      .respond_with(ResponseTemplate::new(500).set_body_string("upstream exploded"))
      .mount(&server)
      .await;

    let err = client(&server).complete(&request()).await.unwrap_err();
    assert_eq!(err, CompletionError::Http { status: 500, message: "upstream exploded".into() });
  }

  #[tokio::test]
  async fn empty_choices_is_malformed() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
      .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "choices": [] })))
      .mount(&server)
      .await;

    let err = client(&server).complete(&request()).await.unwrap_err();
    assert!(matches!(err, CompletionError::Malformed(_)));
  }

  #[tokio::test]
  async fn non_json_body_is_malformed() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
      .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
      .mount(&server)
      .await;

    let err = client(&server).complete(&request()).await.unwrap_err();
    assert!(matches!(err, CompletionError::Malformed(_)));
  }

  #[tokio::test]
  async fn slow_endpoint_times_out() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
      .respond_with(
        ResponseTemplate::new(200)
          .set_body_json(json!({ "choices": [{ "message": { "content": "late" } }] }))
          .set_delay(Duration::from_millis(500)),
      )
      .mount(&server)
      .await;

    let oa = OpenAI::new("k", server.uri(), "m", Duration::from_millis(50)).unwrap();
    let err = oa.complete(&request()).await.unwrap_err();
    assert_eq!(err, CompletionError::Timeout);
  }

  #[tokio::test]
  async fn unreachable_host_is_network_error() {
    let oa = OpenAI::new("k", "http://127.0.0.1:9", "m", Duration::from_secs(2)).unwrap();
    let err = oa.complete(&request()).await.unwrap_err();
    assert!(matches!(err, CompletionError::Network(_) | CompletionError::Timeout));
  }
}

//! Loading mentor configuration (persona prompts + limits) from TOML.
//!
//! See `MentorConfig` and `Personas` for expected schema.

use serde::Deserialize;
use tracing::{error, info};

use crate::domain::Level;

pub const DEFAULT_TRANSCRIPT_CAP: usize = 200;
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 60;
pub const DEFAULT_SESSION_IDLE_SECS: u64 = 30 * 60;

#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct MentorConfig {
  pub personas: Personas,
  /// Max entries kept per transcript; oldest are evicted first.
  pub transcript_cap: usize,
  pub request_timeout_secs: u64,
  /// Sessions untouched for this long are removed from the session table.
  pub session_idle_secs: u64,
  /// Fixed seed for fallback, encouragement and brainstorm picks (reproducible demos).
  pub rng_seed: Option<u64>,
}

impl Default for MentorConfig {
  fn default() -> Self {
    Self {
      personas: Personas::default(),
      transcript_cap: DEFAULT_TRANSCRIPT_CAP,
      request_timeout_secs: DEFAULT_REQUEST_TIMEOUT_SECS,
      session_idle_secs: DEFAULT_SESSION_IDLE_SECS,
      rng_seed: None,
    }
  }
}

/// Persona system prompts, one per level. `{task_kind}` is replaced with the active
/// task kind, or "일반" when no task is selected.
#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct Personas {
  pub beginner: String,
  pub intermediate: String,
  pub advanced: String,
}

impl Personas {
  pub fn for_level(&self, level: Level) -> &str {
    match level {
      Level::Beginner => &self.beginner,
      Level::Intermediate => &self.intermediate,
      Level::Advanced => &self.advanced,
    }
  }
}

impl Default for Personas {
  fn default() -> Self {
    Self {
      beginner: r#"당신은 한국 중학생 영어 초급 학습자를 위한 친근하고 도움이 되는 AI 영어 선생님입니다.

특징:
- 간단하고 이해하기 쉬운 한국어로 설명
- 기초적인 문법과 어휘 중심
- 격려와 동기부여 제공
- 실수를 두려워하지 않도록 따뜻한 톤
- 구체적이고 실용적인 조언

현재 과제 유형: {task_kind}

학습자가 질문하면:
1. 문법: 기본 문법을 예시와 함께 설명
2. 어휘: 초급 수준 단어와 표현 제안
3. 작문: 간단한 문장 구조와 아이디어 제공
4. 일반: 영어 학습 동기부여와 격려

답변은 3-4문장으로 간결하게, 이모지를 적절히 사용해서 친근하게 해주세요."#
        .into(),
      intermediate: r#"당신은 한국 중학생 영어 중급 학습자를 위한 전문적이고 도움이 되는 AI 영어 선생님입니다.

특징:
- 체계적이고 구조적인 조언 제공
- 중급 수준의 문법과 어휘 활용
- 글의 구조와 논리적 전개 중시
- 구체적인 예시와 함께 설명
- 학습자의 창의성과 자기표현 격려

현재 과제 유형: {task_kind}

학습자가 질문하면:
1. 구조: 서론-본론-결론, 문단 구성, 연결어구 활용
2. 어휘: 다양한 표현, 동의어, 연결어구 제안
3. 문법: 복합문, 다양한 시제, 문장 패턴
4. 내용: 아이디어 발전, 근거 제시, 예시 활용

답변은 4-5문장으로 구체적이고 실용적으로, 이모지를 적절히 사용해주세요."#
        .into(),
      advanced: r#"당신은 한국 고등학생 및 대학생 수준의 고급 영어 학습자를 위한 전문적인 AI 영어 튜터입니다.

특징:
- 고도의 분석적이고 비판적 사고 능력 개발
- 복잡한 문법 구조와 고급 어휘 활용 지도
- 창의성과 독창성을 중시하는 접근
- 학문적이고 전문적인 글쓰기 기술 향상
- 자기성찰과 메타인지 전략 촉진

현재 과제 유형: {task_kind}

학습자가 질문하면:
1. 내용: 복잡한 아이디어 발전, 비판적 분석, 독창적 관점 개발
2. 구조: 고급 에세이 구조, 논리적 흐름, coherence와 cohesion
3. 언어: 정교한 어휘 선택, 복잡한 문장 구조, 수사법 활용
4. 스타일: 학문적 어조, 개인적 목소리, 장르별 특성

답변은 5-6문장으로 심도 있고 전문적으로, 이모지를 최소한으로 사용해주세요."#
        .into(),
    }
  }
}

/// Parse a TOML document into `MentorConfig`. Missing keys take defaults; zero limits
/// are treated as missing.
pub fn parse_mentor_config(src: &str) -> Result<MentorConfig, toml::de::Error> {
  let mut cfg = toml::from_str::<MentorConfig>(src)?;
  if cfg.transcript_cap == 0 {
    cfg.transcript_cap = DEFAULT_TRANSCRIPT_CAP;
  }
  if cfg.request_timeout_secs == 0 {
    cfg.request_timeout_secs = DEFAULT_REQUEST_TIMEOUT_SECS;
  }
  if cfg.session_idle_secs == 0 {
    cfg.session_idle_secs = DEFAULT_SESSION_IDLE_SECS;
  }
  Ok(cfg)
}

/// Attempt to load `MentorConfig` from MENTOR_CONFIG_PATH. On any parsing/IO error, returns None.
pub fn load_mentor_config_from_env() -> Option<MentorConfig> {
  let path = std::env::var("MENTOR_CONFIG_PATH").ok()?;
  match std::fs::read_to_string(&path) {
    Ok(s) => match parse_mentor_config(&s) {
      Ok(cfg) => {
        info!(target: "writing_mentor", %path, transcript_cap = cfg.transcript_cap, "Loaded mentor config (TOML)");
        Some(cfg)
      }
      Err(e) => {
        error!(target: "writing_mentor", %path, error = %e, "Failed to parse TOML config");
        None
      }
    },
    Err(e) => {
      error!(target: "writing_mentor", %path, error = %e, "Failed to read TOML config file");
      None
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn empty_document_yields_defaults() {
    let cfg = parse_mentor_config("").unwrap();
    assert_eq!(cfg.transcript_cap, DEFAULT_TRANSCRIPT_CAP);
    assert_eq!(cfg.request_timeout_secs, DEFAULT_REQUEST_TIMEOUT_SECS);
    assert!(cfg.personas.beginner.contains("3-4문장"));
  }

  #[test]
  fn partial_persona_override_keeps_other_levels() {
    let cfg = parse_mentor_config(
      r#"
transcript_cap = 10

[personas]
advanced = "You are a strict editor. Task: {task_kind}"
"#,
    )
    .unwrap();
    assert_eq!(cfg.transcript_cap, 10);
    assert_eq!(cfg.personas.for_level(Level::Advanced), "You are a strict editor. Task: {task_kind}");
    assert!(cfg.personas.for_level(Level::Intermediate).contains("4-5문장"));
  }

  #[test]
  fn zero_cap_falls_back_to_default() {
    let cfg = parse_mentor_config("transcript_cap = 0").unwrap();
    assert_eq!(cfg.transcript_cap, DEFAULT_TRANSCRIPT_CAP);
  }

  #[test]
  fn zero_timeouts_fall_back_to_defaults() {
    let cfg = parse_mentor_config("request_timeout_secs = 0\nsession_idle_secs = 0").unwrap();
    assert_eq!(cfg.request_timeout_secs, DEFAULT_REQUEST_TIMEOUT_SECS);
    assert_eq!(cfg.session_idle_secs, DEFAULT_SESSION_IDLE_SECS);

    let cfg = parse_mentor_config("request_timeout_secs = 5\nrng_seed = 42").unwrap();
    assert_eq!(cfg.request_timeout_secs, 5);
    assert_eq!(cfg.rng_seed, Some(42));
  }

  #[test]
  fn every_default_persona_has_task_slot() {
    let p = Personas::default();
    for level in Level::ALL {
      assert!(p.for_level(level).contains("{task_kind}"));
    }
  }
}

//! Domain models: levels and their fixed profiles, task kinds, task definitions, chat entries.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Difficulty tier. Every per-level table and session slot is indexed by this tag.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Level {
  Beginner,
  Intermediate,
  Advanced,
}

/// Fixed dialogue parameters for one level.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LevelProfile {
  /// Max characters of the learner's draft forwarded to the mentor.
  pub draft_cap: usize,
  pub temperature: f32,
  pub max_tokens: u32,
}

impl Level {
  pub const ALL: [Level; 3] = [Level::Beginner, Level::Intermediate, Level::Advanced];

  /// Position in per-level arrays.
  pub fn index(self) -> usize {
    match self {
      Level::Beginner => 0,
      Level::Intermediate => 1,
      Level::Advanced => 2,
    }
  }

  pub fn as_str(self) -> &'static str {
    match self {
      Level::Beginner => "beginner",
      Level::Intermediate => "intermediate",
      Level::Advanced => "advanced",
    }
  }

  pub fn profile(self) -> LevelProfile {
    match self {
      Level::Beginner => LevelProfile { draft_cap: 200, temperature: 0.7, max_tokens: 200 },
      Level::Intermediate => LevelProfile { draft_cap: 300, temperature: 0.7, max_tokens: 300 },
      Level::Advanced => LevelProfile { draft_cap: 500, temperature: 0.8, max_tokens: 400 },
    }
  }

  /// Task kinds a level's catalog may contain.
  pub fn kinds(self) -> &'static [TaskKind] {
    match self {
      Level::Beginner => &[TaskKind::FillBlanks, TaskKind::PictureDescription, TaskKind::Opinion],
      Level::Intermediate => &[
        TaskKind::Opinion,
        TaskKind::Argumentative,
        TaskKind::CompareContrast,
        TaskKind::Narrative,
      ],
      Level::Advanced => &[
        TaskKind::AnalyticalEssay,
        TaskKind::CreativeWriting,
        TaskKind::PhilosophicalEssay,
        TaskKind::CriticalReview,
        TaskKind::ResearchReport,
      ],
    }
  }
}

impl fmt::Display for Level {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.as_str())
  }
}

/// What sort of writing a task asks for. Narrows the mentor's tone.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TaskKind {
  FillBlanks,
  PictureDescription,
  Opinion,
  Argumentative,
  CompareContrast,
  Narrative,
  AnalyticalEssay,
  CreativeWriting,
  PhilosophicalEssay,
  CriticalReview,
  ResearchReport,
}

impl TaskKind {
  /// Name interpolated into persona prompts. An intermediate opinion task is a full
  /// essay, so the mentor is told so.
  pub fn prompt_tag(self, level: Level) -> &'static str {
    match (self, level) {
      (TaskKind::Opinion, Level::Intermediate) => "opinion_essay",
      _ => self.as_str(),
    }
  }

  fn as_str(self) -> &'static str {
    match self {
      TaskKind::FillBlanks => "fill_blanks",
      TaskKind::PictureDescription => "picture_description",
      TaskKind::Opinion => "opinion",
      TaskKind::Argumentative => "argumentative",
      TaskKind::CompareContrast => "compare_contrast",
      TaskKind::Narrative => "narrative",
      TaskKind::AnalyticalEssay => "analytical_essay",
      TaskKind::CreativeWriting => "creative_writing",
      TaskKind::PhilosophicalEssay => "philosophical_essay",
      TaskKind::CriticalReview => "critical_review",
      TaskKind::ResearchReport => "research_report",
    }
  }
}

/// One named group of useful expressions (e.g. "서론" → openers).
#[derive(Clone, Debug, Serialize)]
pub struct ExpressionGroup {
  pub category: &'static str,
  pub expressions: &'static [&'static str],
}

/// Level-dependent scaffolding attached to a task.
#[derive(Clone, Debug, Serialize)]
#[serde(tag = "shape", rename_all = "snake_case")]
pub enum Scaffold {
  /// Beginner: fill-in-the-blank paragraph with word list and hints.
  Template {
    template: &'static str,
    vocabulary: &'static [&'static str],
    hints: &'static [&'static str],
  },
  /// Intermediate: guide questions and grouped connective expressions.
  Guided {
    guide_questions: &'static [&'static str],
    useful_expressions: &'static [ExpressionGroup],
    vocabulary: &'static [&'static str],
  },
  /// Advanced: minimal guidance, rich vocabulary and sentence structures.
  Minimal {
    minimal_guidance: &'static [&'static str],
    advanced_vocabulary: &'static [&'static str],
    complex_structures: &'static [&'static str],
  },
}

/// Static record describing one writing exercise. Never mutated after load.
#[derive(Clone, Debug, Serialize)]
pub struct TaskDefinition {
  pub name: &'static str,
  pub kind: TaskKind,
  pub description: &'static str,
  pub scaffold: Scaffold,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
  User,
  Assistant,
}

impl Role {
  pub fn as_str(self) -> &'static str {
    match self {
      Role::User => "user",
      Role::Assistant => "assistant",
    }
  }
}

/// One line of the mentor dialogue.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatEntry {
  pub role: Role,
  pub text: String,
}

impl ChatEntry {
  pub fn user(text: impl Into<String>) -> Self {
    Self { role: Role::User, text: text.into() }
  }

  pub fn assistant(text: impl Into<String>) -> Self {
    Self { role: Role::Assistant, text: text.into() }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn level_deserializes_lowercase_only() {
    assert_eq!(serde_json::from_str::<Level>("\"advanced\"").unwrap(), Level::Advanced);
    assert!(serde_json::from_str::<Level>("\"expert\"").is_err());
  }

  #[test]
  fn opinion_tag_depends_on_level() {
    assert_eq!(TaskKind::Opinion.prompt_tag(Level::Beginner), "opinion");
    assert_eq!(TaskKind::Opinion.prompt_tag(Level::Intermediate), "opinion_essay");
    assert_eq!(TaskKind::CompareContrast.prompt_tag(Level::Intermediate), "compare_contrast");
  }

  #[test]
  fn profiles_follow_level_budgets() {
    let caps: Vec<usize> = Level::ALL.iter().map(|l| l.profile().draft_cap).collect();
    assert_eq!(caps, vec![200, 300, 500]);
    assert_eq!(Level::Intermediate.profile().temperature, 0.7);
    assert_eq!(Level::Advanced.profile().temperature, 0.8);
    assert_eq!(Level::Advanced.profile().max_tokens, 400);
  }

  #[test]
  fn level_indices_are_distinct() {
    let idx: Vec<usize> = Level::ALL.iter().map(|l| l.index()).collect();
    assert_eq!(idx, vec![0, 1, 2]);
  }

  #[test]
  fn task_kind_serializes_kebab_case() {
    let json = serde_json::to_string(&TaskKind::CompareContrast).unwrap();
    assert_eq!(json, "\"compare-contrast\"");
  }
}

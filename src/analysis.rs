//! Draft statistics with level-appropriate notes, and the advanced self-assessment rubric.

use serde::{Deserialize, Serialize};

use crate::domain::Level;
use crate::error::SessionError;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Tone {
  Success,
  Info,
  Warning,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Note {
  pub tone: Tone,
  pub message: &'static str,
}

const fn note(tone: Tone, message: &'static str) -> Note {
  Note { tone, message }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct DraftStats {
  pub words: usize,
  pub chars: usize,
  pub sentences: usize,
  pub paragraphs: usize,
  pub avg_words_per_sentence: f32,
  pub avg_chars_per_word: f32,
  pub notes: Vec<Note>,
}

pub fn draft_stats(level: Level, draft: &str) -> Result<DraftStats, SessionError> {
  if draft.trim().is_empty() {
    return Err(SessionError::EmptyDraft);
  }

  let words = draft.split_whitespace().count();
  let chars = draft.chars().count();
  let sentences = draft.split('.').filter(|s| !s.trim().is_empty()).count();
  let paragraphs = draft.split("\n\n").filter(|p| !p.trim().is_empty()).count();
  let avg_words_per_sentence = words as f32 / sentences.max(1) as f32;
  let avg_chars_per_word = chars as f32 / words.max(1) as f32;

  let mut notes = Vec::new();
  match level {
    Level::Beginner => {}
    Level::Intermediate => {
      notes.push(if words < 50 {
        note(Tone::Warning, "더 자세히 써보세요! (최소 50단어 권장)")
      } else if words > 200 {
        note(Tone::Info, "충분히 자세하게 잘 써주셨네요!")
      } else {
        note(Tone::Success, "적절한 길이의 글이에요!")
      });
      notes.push(if draft.contains("\n\n") {
        note(Tone::Success, "✅ 문단 구분이 잘 되어 있어요!")
      } else {
        note(Tone::Info, "💡 문단을 나누어서 써보세요!")
      });
    }
    Level::Advanced => {
      if words > 100 {
        notes.push(note(Tone::Success, "✅ 충분한 분량의 글입니다"));
      }
      if avg_words_per_sentence > 15.0 {
        notes.push(note(Tone::Info, "🔍 복잡한 문장 구조를 잘 활용하고 있습니다"));
      }
      if paragraphs >= 4 {
        notes.push(note(Tone::Success, "📝 잘 구조화된 글입니다"));
      }
    }
  }

  Ok(DraftStats { words, chars, sentences, paragraphs, avg_words_per_sentence, avg_chars_per_word, notes })
}

pub const CONTENT_CRITERIA: [&str; 4] = [
  "명확하고 집중된 주제를 다루고 있다",
  "독창적이고 흥미로운 아이디어를 제시한다",
  "충분한 세부사항과 예시를 포함한다",
  "논리적이고 설득력 있는 논증을 펼친다",
];

pub const ORGANIZATION_CRITERIA: [&str; 4] = [
  "명확한 서론, 본론, 결론 구조를 갖는다",
  "각 문단이 하나의 주요 아이디어를 다룬다",
  "문단 간 자연스러운 연결이 이루어진다",
  "전체적으로 논리적 흐름을 따른다",
];

pub const LANGUAGE_CRITERIA: [&str; 4] = [
  "다양하고 정확한 어휘를 사용한다",
  "복잡하고 효과적인 문장 구조를 활용한다",
  "적절한 어조와 문체를 유지한다",
  "문법적으로 정확하다",
];

/// Labels for each score position of a `SelfAssessment`, offered with the advanced toolkit.
#[derive(Clone, Debug, Serialize)]
pub struct AssessmentCriteria {
  pub content: &'static [&'static str; 4],
  pub organization: &'static [&'static str; 4],
  pub language: &'static [&'static str; 4],
}

pub const ASSESSMENT_CRITERIA: AssessmentCriteria = AssessmentCriteria {
  content: &CONTENT_CRITERIA,
  organization: &ORGANIZATION_CRITERIA,
  language: &LANGUAGE_CRITERIA,
};

/// Learner-rated scores (1..=5), one per criterion in the order above.
#[derive(Clone, Debug, Deserialize)]
pub struct SelfAssessment {
  pub content: [u8; 4],
  pub organization: [u8; 4],
  pub language: [u8; 4],
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct AssessmentSummary {
  pub content: f32,
  pub organization: f32,
  pub language: f32,
  pub overall: f32,
  pub improvement_areas: Vec<&'static str>,
  pub all_strong: bool,
}

fn average(scores: &[u8; 4]) -> f32 {
  scores.iter().map(|&s| s as f32).sum::<f32>() / scores.len() as f32
}

pub fn summarize_assessment(a: &SelfAssessment) -> Result<AssessmentSummary, SessionError> {
  for (group, scores) in [("content", &a.content), ("organization", &a.organization), ("language", &a.language)] {
    if let Some(bad) = scores.iter().find(|s| !(1..=5).contains(*s)) {
      return Err(SessionError::InvalidAssessment(format!("{group} score {bad} is outside 1..=5")));
    }
  }

  let content = average(&a.content);
  let organization = average(&a.organization);
  let language = average(&a.language);
  let overall = (content + organization + language) / 3.0;

  let mut improvement_areas = Vec::new();
  if content < 4.0 {
    improvement_areas.push("💡 내용의 깊이와 독창성을 더 발전시켜보세요");
  }
  if organization < 4.0 {
    improvement_areas.push("🏗️ 글의 구조와 논리적 흐름을 개선해보세요");
  }
  if language < 4.0 {
    improvement_areas.push("🗣️ 어휘와 문장 구조의 다양성을 높여보세요");
  }
  let all_strong = improvement_areas.is_empty();

  Ok(AssessmentSummary { content, organization, language, overall, improvement_areas, all_strong })
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn counts_words_sentences_and_paragraphs() {
    let stats = draft_stats(Level::Beginner, "Hello there. I am Mina.\n\nI like pizza.").unwrap();
    assert_eq!(stats.words, 8);
    assert_eq!(stats.sentences, 3);
    assert_eq!(stats.paragraphs, 2);
    assert_eq!(stats.chars, 38);
    assert!(stats.notes.is_empty());
  }

  #[test]
  fn empty_or_blank_draft_is_rejected() {
    assert_eq!(draft_stats(Level::Advanced, ""), Err(SessionError::EmptyDraft));
    assert_eq!(draft_stats(Level::Advanced, " \n "), Err(SessionError::EmptyDraft));
  }

  #[test]
  fn intermediate_flags_short_single_paragraph() {
    let stats = draft_stats(Level::Intermediate, "My dream is to be a chef.").unwrap();
    assert_eq!(stats.notes[0].tone, Tone::Warning);
    assert_eq!(stats.notes[1].tone, Tone::Info);
  }

  #[test]
  fn intermediate_praises_paragraphs() {
    let body = "word ".repeat(60);
    let draft = format!("{body}\n\n{body}");
    let stats = draft_stats(Level::Intermediate, &draft).unwrap();
    assert_eq!(stats.notes[0].tone, Tone::Success);
    assert_eq!(stats.notes[1].message, "✅ 문단 구분이 잘 되어 있어요!");
  }

  #[test]
  fn advanced_recognises_long_structured_essays() {
    let paragraph = format!("{}.", "idea ".repeat(30).trim_end());
    let draft = vec![paragraph; 4].join("\n\n");
    let stats = draft_stats(Level::Advanced, &draft).unwrap();
    assert_eq!(stats.words, 120);
    assert_eq!(stats.paragraphs, 4);
    assert_eq!(stats.notes.len(), 3);
  }

  #[test]
  fn assessment_averages_and_suggests_areas() {
    let summary = summarize_assessment(&SelfAssessment {
      content: [5, 5, 4, 4],
      organization: [3, 3, 3, 3],
      language: [4, 4, 4, 4],
    })
    .unwrap();
    assert_eq!(summary.content, 4.5);
    assert_eq!(summary.organization, 3.0);
    assert_eq!(summary.overall, 11.5 / 3.0);
    assert_eq!(summary.improvement_areas, vec!["🏗️ 글의 구조와 논리적 흐름을 개선해보세요"]);
    assert!(!summary.all_strong);
  }

  #[test]
  fn assessment_rejects_out_of_range_scores() {
    let err = summarize_assessment(&SelfAssessment {
      content: [1, 2, 3, 4],
      organization: [0, 3, 3, 3],
      language: [4, 4, 4, 4],
    })
    .unwrap_err();
    assert!(matches!(err, SessionError::InvalidAssessment(_)));
  }
}

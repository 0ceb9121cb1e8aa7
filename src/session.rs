//! Per-session learner state: one `LevelState` slot per level, never shared across levels.

use serde::Serialize;

use crate::domain::{ChatEntry, Level, TaskDefinition};

/// Ordered user/assistant history, bounded by `cap` (oldest evicted first).
#[derive(Clone, Debug, Serialize)]
pub struct Transcript {
  entries: Vec<ChatEntry>,
  #[serde(skip)]
  cap: usize,
}

impl Transcript {
  pub fn with_cap(cap: usize) -> Self {
    Self { entries: Vec::new(), cap: cap.max(1) }
  }

  pub fn push(&mut self, entry: ChatEntry) {
    self.entries.push(entry);
    if self.entries.len() > self.cap {
      let excess = self.entries.len() - self.cap;
      self.entries.drain(..excess);
    }
  }

  pub fn clear(&mut self) {
    self.entries.clear();
  }

  pub fn entries(&self) -> &[ChatEntry] {
    &self.entries
  }

  pub fn len(&self) -> usize {
    self.entries.len()
  }

  /// One `"{role}: {text}"` line per entry. Line breaks inside an entry are written as `\n`
  /// so each entry stays on its own line.
  pub fn export(&self) -> String {
    self
      .entries
      .iter()
      .map(|e| format!("{}: {}", e.role.as_str(), escape_line_breaks(&e.text)))
      .collect::<Vec<_>>()
      .join("\n")
  }
}

fn escape_line_breaks(text: &str) -> String {
  text.replace("\r\n", "\\n").replace(&['\n', '\r'][..], "\\n")
}

/// Max brainstorming ideas or writing goals kept per level; oldest are dropped first.
pub const SCRATCH_CAP: usize = 50;

fn push_capped(items: &mut Vec<String>, item: String) {
  items.push(item);
  if items.len() > SCRATCH_CAP {
    let excess = items.len() - SCRATCH_CAP;
    items.drain(..excess);
  }
}

/// Everything one level owns inside a session.
#[derive(Clone, Debug)]
pub struct LevelState {
  pub selected_task: Option<&'static TaskDefinition>,
  pub draft: String,
  pub transcript: Transcript,
  /// Intermediate brainstorming notes.
  pub ideas: Vec<String>,
  /// Advanced personal writing goals.
  pub goals: Vec<String>,
}

impl LevelState {
  fn new(transcript_cap: usize) -> Self {
    Self {
      selected_task: None,
      draft: String::new(),
      transcript: Transcript::with_cap(transcript_cap),
      ideas: Vec::new(),
      goals: Vec::new(),
    }
  }

  pub fn add_idea(&mut self, idea: String) {
    push_capped(&mut self.ideas, idea);
  }

  pub fn add_goal(&mut self, goal: String) {
    push_capped(&mut self.goals, goal);
  }
}

#[derive(Clone, Debug)]
pub struct Session {
  levels: [LevelState; 3],
}

impl Session {
  pub fn new(transcript_cap: usize) -> Self {
    Self { levels: Level::ALL.map(|_| LevelState::new(transcript_cap)) }
  }

  pub fn level(&self, level: Level) -> &LevelState {
    &self.levels[level.index()]
  }

  pub fn level_mut(&mut self, level: Level) -> &mut LevelState {
    &mut self.levels[level.index()]
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::domain::Role;

  #[test]
  fn export_has_one_line_per_entry() {
    let mut t = Transcript::with_cap(10);
    t.push(ChatEntry::user("How do I start?"));
    t.push(ChatEntry::assistant("First line\nSecond line\r\nThird"));
    t.push(ChatEntry::user("thanks"));

    let out = t.export();
    assert_eq!(out.lines().count(), t.len());
    assert_eq!(
      out,
      "user: How do I start?\nassistant: First line\\nSecond line\\nThird\nuser: thanks"
    );
    assert_eq!(out, t.clone().export());
  }

  #[test]
  fn empty_transcript_exports_nothing() {
    assert_eq!(Transcript::with_cap(3).export(), "");
  }

  #[test]
  fn cap_evicts_oldest_entries() {
    let mut t = Transcript::with_cap(3);
    for i in 0..5 {
      t.push(ChatEntry::user(format!("m{i}")));
    }
    let texts: Vec<_> = t.entries().iter().map(|e| e.text.as_str()).collect();
    assert_eq!(texts, vec!["m2", "m3", "m4"]);
  }

  #[test]
  fn levels_do_not_alias() {
    let mut s = Session::new(10);
    s.level_mut(Level::Beginner).draft.push_str("hello");
    s.level_mut(Level::Advanced).transcript.push(ChatEntry::assistant("hi"));

    assert_eq!(s.level(Level::Beginner).draft, "hello");
    assert!(s.level(Level::Intermediate).draft.is_empty());
    assert!(s.level(Level::Beginner).transcript.entries().is_empty());
    assert_eq!(s.level(Level::Advanced).transcript.entries()[0].role, Role::Assistant);
  }

  #[test]
  fn ideas_and_goals_are_capped() {
    let mut s = Session::new(10);
    let slot = s.level_mut(Level::Intermediate);
    for i in 0..SCRATCH_CAP + 5 {
      slot.add_idea(format!("idea {i}"));
      slot.add_goal(format!("goal {i}"));
    }
    assert_eq!(slot.ideas.len(), SCRATCH_CAP);
    assert_eq!(slot.goals.len(), SCRATCH_CAP);
    assert_eq!(slot.ideas[0], "idea 5");
    assert_eq!(slot.goals.last().map(String::as_str), Some(format!("goal {}", SCRATCH_CAP + 4).as_str()));
  }
}

//! Read-only task catalog over the compiled-in tables, one table per level.

use serde::Serialize;
use tracing::{debug, info};

use crate::analysis::{AssessmentCriteria, ASSESSMENT_CRITERIA};
use crate::domain::{Level, TaskDefinition};
use crate::error::CatalogError;
use crate::seeds::{
  self, BrainstormMethod, QuickQuestion, ToolCategory, ADVANCED_TASKS, BEGINNER_TASKS, INTERMEDIATE_TASKS,
};

#[derive(Clone, Debug)]
pub struct Catalog {
  tables: [&'static [TaskDefinition]; 3],
}

/// Extra per-level material offered alongside the tasks.
#[derive(Clone, Debug, Serialize)]
pub struct LevelToolkit {
  pub level: Level,
  pub quick_questions: &'static [QuickQuestion],
  #[serde(skip_serializing_if = "is_empty")]
  pub encouragements: &'static [&'static str],
  #[serde(skip_serializing_if = "is_empty")]
  pub brainstorm_methods: &'static [BrainstormMethod],
  #[serde(skip_serializing_if = "is_empty")]
  pub writing_tips: &'static [&'static str],
  #[serde(skip_serializing_if = "is_empty")]
  pub writing_tools: &'static [ToolCategory],
  #[serde(skip_serializing_if = "is_empty")]
  pub reflection_questions: &'static [&'static str],
  #[serde(skip_serializing_if = "Option::is_none")]
  pub assessment_criteria: Option<AssessmentCriteria>,
}

fn is_empty<T>(items: &&'static [T]) -> bool {
  items.is_empty()
}

impl Catalog {
  pub fn builtin() -> Self {
    let catalog = Self { tables: [BEGINNER_TASKS, INTERMEDIATE_TASKS, ADVANCED_TASKS] };
    for level in Level::ALL {
      debug_assert!(
        catalog.table(level).iter().all(|t| level.kinds().contains(&t.kind)),
        "catalog table for {level} holds a task kind outside its level"
      );
      info!(target: "writing_mentor", %level, tasks = catalog.table(level).len(), "Catalog loaded");
    }
    catalog
  }

  fn table(&self, level: Level) -> &'static [TaskDefinition] {
    self.tables[level.index()]
  }

  /// Task names in table order.
  pub fn list_tasks(&self, level: Level) -> Vec<&'static str> {
    self.table(level).iter().map(|t| t.name).collect()
  }

  pub fn get_task(&self, level: Level, name: &str) -> Result<&'static TaskDefinition, CatalogError> {
    let found = self.table(level).iter().find(|t| t.name == name);
    if found.is_none() {
      debug!(target: "writing_mentor", %level, %name, "Task lookup miss");
    }
    found.ok_or_else(|| CatalogError::TaskNotFound { level, name: name.to_string() })
  }

  pub fn quick_question(&self, level: Level, id: &str) -> Result<&'static QuickQuestion, CatalogError> {
    seeds::quick_questions(level)
      .iter()
      .find(|q| q.id == id)
      .ok_or_else(|| CatalogError::QuickQuestionNotFound { level, id: id.to_string() })
  }

  pub fn brainstorm_method(&self, name: &str) -> Result<&'static BrainstormMethod, CatalogError> {
    seeds::BRAINSTORM_METHODS
      .iter()
      .find(|m| m.name == name)
      .ok_or_else(|| CatalogError::MethodNotFound(name.to_string()))
  }

  pub fn toolkit(&self, level: Level) -> LevelToolkit {
    let mut kit = LevelToolkit {
      level,
      quick_questions: seeds::quick_questions(level),
      encouragements: &[],
      brainstorm_methods: &[],
      writing_tips: &[],
      writing_tools: &[],
      reflection_questions: &[],
      assessment_criteria: None,
    };
    match level {
      Level::Beginner => kit.encouragements = seeds::ENCOURAGEMENTS,
      Level::Intermediate => {
        kit.brainstorm_methods = seeds::BRAINSTORM_METHODS;
        kit.writing_tips = seeds::WRITING_TIPS;
      }
      Level::Advanced => {
        kit.writing_tools = seeds::ADVANCED_TOOLS;
        kit.reflection_questions = seeds::REFLECTION_QUESTIONS;
        kit.assessment_criteria = Some(ASSESSMENT_CRITERIA);
      }
    }
    kit
  }
}

impl Default for Catalog {
  fn default() -> Self {
    Self::builtin()
  }
}

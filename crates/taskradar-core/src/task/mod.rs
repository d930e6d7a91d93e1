//! Task records and intake.
//!
//! A [`Task`] always carries its scores and the quadrant derived from them.
//! New tasks start as a [`NewTask`], which validates the title and is turned
//! into a `Task` only once classification has succeeded.

pub mod query;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::time::Duration;
use uuid::Uuid;

use crate::classifier::{classify_with_timeout, Classifier};
use crate::error::{ClassifyError, ValidationError};
use crate::quadrant::Priority;
use crate::scoring::{Scorer, TaskScores};

pub use query::{SortField, SortOrder, TaskQuery};

/// Where a task was captured from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TaskSource {
    Slack,
    Mail,
    Jira,
    Backlog,
}

impl TaskSource {
    pub const ALL: [TaskSource; 4] = [
        TaskSource::Slack,
        TaskSource::Mail,
        TaskSource::Jira,
        TaskSource::Backlog,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            TaskSource::Slack => "slack",
            TaskSource::Mail => "mail",
            TaskSource::Jira => "jira",
            TaskSource::Backlog => "backlog",
        }
    }
}

impl fmt::Display for TaskSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TaskSource {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lowered = s.to_lowercase();
        TaskSource::ALL
            .into_iter()
            .find(|source| source.as_str() == lowered)
            .ok_or_else(|| ValidationError::InvalidValue {
                field: "source".into(),
                message: format!("unknown source '{s}' (expected slack, mail, jira or backlog)"),
            })
    }
}

/// A scored task.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: String,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(flatten)]
    pub scores: TaskScores,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<TaskSource>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub assigned_to: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Task {
    pub fn priority(&self) -> Priority {
        self.scores.priority()
    }

    pub fn urgency(&self) -> u8 {
        self.scores.urgency()
    }

    pub fn importance(&self) -> u8 {
        self.scores.importance()
    }

    /// Justification for the task's quadrant, rendered from its scores.
    /// It is never stored, so it cannot drift from the priority.
    pub fn reasoning(&self) -> String {
        self.scores.justification()
    }
}

/// A task that has been submitted but not yet scored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTask {
    title: String,
    description: Option<String>,
    source: Option<TaskSource>,
    assigned_to: Option<String>,
}

impl NewTask {
    /// # Errors
    ///
    /// Returns [`ValidationError::EmptyTitle`] when the title is blank.
    pub fn new(title: impl Into<String>) -> Result<Self, ValidationError> {
        let title = title.into().trim().to_string();
        if title.is_empty() {
            return Err(ValidationError::EmptyTitle);
        }
        Ok(Self {
            title,
            description: None,
            source: None,
            assigned_to: None,
        })
    }

    /// Attach a description; blank text is dropped.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        let description = description.into();
        self.description = if description.trim().is_empty() {
            None
        } else {
            Some(description)
        };
        self
    }

    pub fn with_source(mut self, source: TaskSource) -> Self {
        self.source = Some(source);
        self
    }

    pub fn with_assignee(mut self, member_id: impl Into<String>) -> Self {
        self.assigned_to = Some(member_id.into());
        self
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// Score synchronously with a local scorer.
    pub fn score_with(self, scorer: &dyn Scorer) -> Task {
        let scores = scorer.score(&self.title, self.description.as_deref());
        self.into_task(scores)
    }

    /// Classify through the async boundary, bounded by `timeout`.
    ///
    /// # Errors
    ///
    /// Returns the classifier's error or [`ClassifyError::Timeout`]; no task
    /// is produced in that case.
    pub async fn classify<C>(self, classifier: &C, timeout: Duration) -> Result<Task, ClassifyError>
    where
        C: Classifier + ?Sized,
    {
        let classification =
            classify_with_timeout(classifier, &self.title, self.description.as_deref(), timeout)
                .await?;
        tracing::debug!(reasoning = %classification.reasoning, "classified task");
        Ok(self.into_task(classification.scores))
    }

    fn into_task(self, scores: TaskScores) -> Task {
        let now = Utc::now();
        Task {
            id: Uuid::new_v4().to_string(),
            title: self.title,
            description: self.description,
            scores,
            source: self.source,
            assigned_to: self.assigned_to,
            created_at: now,
            updated_at: now,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classifier::{Classification, KeywordClassifier};
    use crate::scoring::KeywordScorer;
    use async_trait::async_trait;

    struct Failing;

    #[async_trait]
    impl Classifier for Failing {
        fn name(&self) -> &str {
            "failing"
        }

        async fn classify_task(
            &self,
            _title: &str,
            _description: Option<&str>,
        ) -> Result<Classification, ClassifyError> {
            Err(ClassifyError::Backend {
                classifier: "failing".into(),
                message: "service unavailable".into(),
            })
        }
    }

    #[test]
    fn blank_title_is_rejected() {
        assert_eq!(NewTask::new("   ").unwrap_err(), ValidationError::EmptyTitle);
        assert_eq!(NewTask::new("").unwrap_err(), ValidationError::EmptyTitle);
    }

    #[test]
    fn blank_description_is_dropped() {
        let task = NewTask::new("書類作成").unwrap().with_description("  ");
        assert_eq!(task.description(), None);
    }

    #[test]
    fn score_with_attaches_consistent_priority() {
        let task = NewTask::new("デプロイ準備")
            .unwrap()
            .with_description("本番環境へのデプロイを今日中に")
            .with_source(TaskSource::Backlog)
            .with_assignee("member-3")
            .score_with(&KeywordScorer::new());

        assert_eq!(task.urgency(), 9);
        assert_eq!(task.importance(), 9);
        assert_eq!(task.priority(), Priority::UrgentImportant);
        assert_eq!(task.source, Some(TaskSource::Backlog));
        assert_eq!(task.assigned_to.as_deref(), Some("member-3"));
        assert_eq!(task.created_at, task.updated_at);
        assert!(Uuid::parse_str(&task.id).is_ok());
    }

    #[tokio::test]
    async fn classify_produces_task() {
        let task = NewTask::new("重要なプロジェクト報告")
            .unwrap()
            .classify(&KeywordClassifier::new(), Duration::from_secs(1))
            .await
            .unwrap();
        assert_eq!(task.priority(), Priority::NotUrgentImportant);
        assert_eq!(task.reasoning(), task.scores.justification());
    }

    #[tokio::test]
    async fn failed_classification_yields_no_task() {
        let err = NewTask::new("anything")
            .unwrap()
            .classify(&Failing, Duration::from_secs(1))
            .await
            .unwrap_err();
        assert!(matches!(err, ClassifyError::Backend { .. }));
    }

    #[test]
    fn task_json_round_trip_keeps_flat_layout() {
        let task = NewTask::new("緊急システム障害対応")
            .unwrap()
            .with_source(TaskSource::Slack)
            .score_with(&KeywordScorer::new());
        let json = serde_json::to_value(&task).unwrap();
        assert_eq!(json["urgencyScore"], 10);
        assert_eq!(json["importanceScore"], 3);
        assert_eq!(json["priority"], "urgent-not-important");
        assert_eq!(json["source"], "slack");
        assert!(json.get("assignedTo").is_none());

        let decoded: Task = serde_json::from_value(json).unwrap();
        assert_eq!(decoded, task);
    }

    #[test]
    fn task_with_mismatched_label_fails_to_load() {
        let json = serde_json::json!({
            "id": "task-1",
            "title": "緊急システム障害対応",
            "urgencyScore": 9,
            "importanceScore": 10,
            "priority": "not-urgent-important",
            "createdAt": "2025-11-08T09:00:00Z",
            "updatedAt": "2025-11-08T09:00:00Z"
        });
        assert!(serde_json::from_value::<Task>(json).is_err());
    }

    #[test]
    fn stored_reasoning_is_ignored_on_load() {
        let json = serde_json::json!({
            "id": "task-1",
            "title": "緊急システム障害対応",
            "urgencyScore": 10,
            "importanceScore": 3,
            "priority": "urgent-not-important",
            "reasoning": Priority::NotUrgentImportant.reasoning(),
            "createdAt": "2025-11-08T09:00:00Z",
            "updatedAt": "2025-11-08T09:00:00Z"
        });
        let task: Task = serde_json::from_value(json).unwrap();
        assert!(task.reasoning().contains(Priority::UrgentNotImportant.reasoning()));
        assert!(!task.reasoning().contains(Priority::NotUrgentImportant.reasoning()));

        let reencoded = serde_json::to_value(&task).unwrap();
        assert!(reencoded.get("reasoning").is_none());
    }

    #[test]
    fn source_parses_case_insensitively() {
        assert_eq!("Slack".parse::<TaskSource>().unwrap(), TaskSource::Slack);
        assert!("teams".parse::<TaskSource>().is_err());
    }
}

//! Async classification boundary.
//!
//! Scoring itself is pure and instantaneous, but callers go through
//! [`Classifier`] so a remote or model-backed implementation can replace the
//! keyword tables later. A call may suspend; it either yields a complete
//! [`Classification`] or an error with no score attached.

use async_trait::async_trait;
use serde::Serialize;
use std::time::Duration;

use crate::error::ClassifyError;
use crate::quadrant::Priority;
use crate::scoring::{KeywordScorer, Scorer, TaskScores};

/// Outcome of classifying one task's text.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Classification {
    #[serde(flatten)]
    pub scores: TaskScores,
    pub reasoning: String,
}

impl Classification {
    pub fn from_scores(scores: TaskScores) -> Self {
        Self {
            reasoning: scores.justification(),
            scores,
        }
    }

    pub fn priority(&self) -> Priority {
        self.scores.priority()
    }
}

/// A classification service that may suspend.
#[async_trait]
pub trait Classifier: Send + Sync {
    /// Identifier used in logs and error messages.
    fn name(&self) -> &str;

    /// Score and classify one task.
    async fn classify_task(
        &self,
        title: &str,
        description: Option<&str>,
    ) -> Result<Classification, ClassifyError>;
}

/// Classifier that runs a local [`Scorer`].
#[derive(Debug, Clone, Default)]
pub struct KeywordClassifier<S = KeywordScorer> {
    scorer: S,
}

impl KeywordClassifier {
    pub fn new() -> Self {
        Self::default()
    }
}

impl<S: Scorer> KeywordClassifier<S> {
    pub fn with_scorer(scorer: S) -> Self {
        Self { scorer }
    }

    pub fn scorer(&self) -> &S {
        &self.scorer
    }
}

#[async_trait]
impl<S: Scorer> Classifier for KeywordClassifier<S> {
    fn name(&self) -> &str {
        self.scorer.name()
    }

    async fn classify_task(
        &self,
        title: &str,
        description: Option<&str>,
    ) -> Result<Classification, ClassifyError> {
        tokio::task::yield_now().await;
        let classification = Classification::from_scores(self.scorer.score(title, description));
        tracing::debug!(
            classifier = self.name(),
            priority = %classification.priority(),
            "classified task"
        );
        Ok(classification)
    }
}

/// Run `classifier` with an upper bound on how long it may take.
///
/// # Errors
///
/// Returns [`ClassifyError::Timeout`] when the deadline passes, or whatever
/// error the classifier itself reports.
pub async fn classify_with_timeout<C>(
    classifier: &C,
    title: &str,
    description: Option<&str>,
    timeout: Duration,
) -> Result<Classification, ClassifyError>
where
    C: Classifier + ?Sized,
{
    match tokio::time::timeout(timeout, classifier.classify_task(title, description)).await {
        Ok(result) => result,
        Err(_) => {
            let timeout_ms = u64::try_from(timeout.as_millis()).unwrap_or(u64::MAX);
            tracing::warn!(classifier = classifier.name(), timeout_ms, "classification timed out");
            Err(ClassifyError::Timeout { timeout_ms })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Stalled;

    #[async_trait]
    impl Classifier for Stalled {
        fn name(&self) -> &str {
            "stalled"
        }

        async fn classify_task(
            &self,
            _title: &str,
            _description: Option<&str>,
        ) -> Result<Classification, ClassifyError> {
            std::future::pending().await
        }
    }

    #[tokio::test]
    async fn keyword_classifier_matches_scorer() {
        let classifier = KeywordClassifier::new();
        let result = classifier
            .classify_task("緊急システム障害対応", None)
            .await
            .unwrap();
        assert_eq!(result.scores, KeywordScorer::new().score("緊急システム障害対応", None));
        assert_eq!(result.priority(), Priority::UrgentNotImportant);
        assert!(result.reasoning.contains("10/10"));
    }

    #[tokio::test]
    async fn timeout_surfaces_as_error() {
        let err = classify_with_timeout(&Stalled, "anything", None, Duration::from_millis(20))
            .await
            .unwrap_err();
        assert_eq!(err, ClassifyError::Timeout { timeout_ms: 20 });
    }

    #[tokio::test]
    async fn fast_classifier_beats_timeout() {
        let classifier = KeywordClassifier::new();
        let result = classify_with_timeout(&classifier, "今日の会議", None, Duration::from_secs(5))
            .await
            .unwrap();
        assert_eq!(result.priority(), Priority::UrgentImportant);
    }

    #[tokio::test]
    async fn works_through_trait_object() {
        let classifier: Box<dyn Classifier> = Box::new(KeywordClassifier::new());
        let result = classify_with_timeout(classifier.as_ref(), "ランチ", None, Duration::from_secs(1))
            .await
            .unwrap();
        assert_eq!(result.priority(), Priority::NotUrgentNotImportant);
    }
}

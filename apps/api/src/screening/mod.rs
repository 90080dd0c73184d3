//! Screening — pluggable, trait-based scorer plus the dispatcher that applies its
//! verdict to applications.
//!
//! Default: `SimulatedScorer` (fixed delay, pseudo-random score).
//! Tests swap in deterministic fakes from `testing`.
//!
//! `AppState` holds an `Arc<dyn Scorer>`.

pub mod dispatcher;

use std::ops::Range;
use std::time::Duration;

use async_trait::async_trait;
use rand::Rng;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::models::Application;

/// Reasons attached when a single screen qualifies the applicant.
pub const QUALIFIED_REASONS: &[&str] = &[
    "Matches required skills",
    "Relevant experience level",
    "Strong communication indicators",
];

/// Reasons attached when a single screen does not qualify the applicant.
pub const UNQUALIFIED_REASONS: &[&str] = &["Missing specific required skill", "Limited domain depth"];

/// Default pass mark for single screening, inclusive.
pub const DEFAULT_THRESHOLD: u32 = 70;

/// Which screening path asked for a score. Each draws from its own range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScreeningPass {
    Single,
    Bulk,
}

impl ScreeningPass {
    pub fn score_range(&self) -> Range<u32> {
        match self {
            ScreeningPass::Single => 60..100,
            ScreeningPass::Bulk => 70..95,
        }
    }
}

#[derive(Debug, Clone, Error, PartialEq)]
pub enum ScreeningError {
    #[error("scoring service unavailable: {0}")]
    Unavailable(String),

    #[error("cancelled")]
    Cancelled,
}

/// Knobs the dispatcher reads from platform settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScreeningPolicy {
    pub enabled: bool,
    pub threshold: u32,
}

impl Default for ScreeningPolicy {
    fn default() -> Self {
        Self {
            enabled: true,
            threshold: DEFAULT_THRESHOLD,
        }
    }
}

/// The scorer trait. Implement this to swap the scoring backend without
/// touching the dispatcher or handlers.
#[async_trait]
pub trait Scorer: Send + Sync {
    async fn score(
        &self,
        application: &Application,
        pass: ScreeningPass,
    ) -> Result<u32, ScreeningError>;

    /// Scores a batch for bulk screening. Must return one result per input,
    /// in input order.
    async fn score_batch(&self, applications: &[Application]) -> Vec<Result<u32, ScreeningError>> {
        let mut results = Vec::with_capacity(applications.len());
        for application in applications {
            results.push(self.score(application, ScreeningPass::Bulk).await);
        }
        results
    }
}

/// Stand-in for an AI screening service: waits, then draws a score uniformly
/// from the pass's range. Bulk batches share a single wait.
pub struct SimulatedScorer {
    single_delay: Duration,
    bulk_delay: Duration,
}

impl SimulatedScorer {
    pub fn new(single_delay: Duration, bulk_delay: Duration) -> Self {
        Self {
            single_delay,
            bulk_delay,
        }
    }
}

#[async_trait]
impl Scorer for SimulatedScorer {
    async fn score(
        &self,
        _application: &Application,
        pass: ScreeningPass,
    ) -> Result<u32, ScreeningError> {
        let delay = match pass {
            ScreeningPass::Single => self.single_delay,
            ScreeningPass::Bulk => self.bulk_delay,
        };
        tokio::time::sleep(delay).await;
        Ok(rand::thread_rng().gen_range(pass.score_range()))
    }

    async fn score_batch(&self, applications: &[Application]) -> Vec<Result<u32, ScreeningError>> {
        tokio::time::sleep(self.bulk_delay).await;
        let mut rng = rand::thread_rng();
        let range = ScreeningPass::Bulk.score_range();
        applications
            .iter()
            .map(|_| Ok(rng.gen_range(range.clone())))
            .collect()
    }
}

#[cfg(test)]
pub(crate) mod testing {
    use std::collections::HashMap;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use super::*;

    /// Returns a fixed score, optionally per applicant id.
    pub struct FixedScorer {
        pub default: u32,
        pub by_id: HashMap<String, u32>,
        pub calls: AtomicUsize,
    }

    impl FixedScorer {
        pub fn new(default: u32) -> Self {
            Self {
                default,
                by_id: HashMap::new(),
                calls: AtomicUsize::new(0),
            }
        }

        pub fn with(mut self, id: &str, score: u32) -> Self {
            self.by_id.insert(id.to_string(), score);
            self
        }
    }

    #[async_trait]
    impl Scorer for FixedScorer {
        async fn score(
            &self,
            application: &Application,
            _pass: ScreeningPass,
        ) -> Result<u32, ScreeningError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(*self.by_id.get(&application.id).unwrap_or(&self.default))
        }
    }

    /// Fails for the listed ids, scores everyone else with `score`.
    pub struct FlakyScorer {
        pub failing: Vec<String>,
        pub score: u32,
    }

    #[async_trait]
    impl Scorer for FlakyScorer {
        async fn score(
            &self,
            application: &Application,
            _pass: ScreeningPass,
        ) -> Result<u32, ScreeningError> {
            if self.failing.contains(&application.id) {
                Err(ScreeningError::Unavailable("upstream timeout".to_string()))
            } else {
                Ok(self.score)
            }
        }
    }

    /// Never answers; used to exercise in-flight and cancellation paths.
    pub struct StalledScorer;

    #[async_trait]
    impl Scorer for StalledScorer {
        async fn score(
            &self,
            _application: &Application,
            _pass: ScreeningPass,
        ) -> Result<u32, ScreeningError> {
            std::future::pending::<Result<u32, ScreeningError>>().await
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::seed;

    #[tokio::test(start_paused = true)]
    async fn test_simulated_single_score_in_range() {
        let scorer = SimulatedScorer::new(Duration::from_millis(900), Duration::from_millis(1500));
        let apps = seed::applications();
        for _ in 0..50 {
            let score = scorer.score(&apps[0], ScreeningPass::Single).await.unwrap();
            assert!((60..100).contains(&score), "score {score} out of range");
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_simulated_batch_scores_in_bulk_range() {
        let scorer = SimulatedScorer::new(Duration::from_millis(900), Duration::from_millis(1500));
        let apps = seed::applications();
        let results = scorer.score_batch(&apps).await;
        assert_eq!(results.len(), apps.len());
        for result in results {
            let score = result.unwrap();
            assert!((70..95).contains(&score), "score {score} out of range");
        }
    }

    #[tokio::test]
    async fn test_default_batch_calls_score_per_record() {
        let scorer = testing::FixedScorer::new(80);
        let apps = seed::applications();
        let results = scorer.score_batch(&apps[..2]).await;
        assert_eq!(results, vec![Ok(80), Ok(80)]);
        assert_eq!(scorer.calls.load(std::sync::atomic::Ordering::SeqCst), 2);
    }

    #[test]
    fn test_policy_default_threshold() {
        assert_eq!(ScreeningPolicy::default().threshold, 70);
        assert!(ScreeningPolicy::default().enabled);
    }
}

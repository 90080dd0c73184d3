//! Screening dispatcher — marks applications in flight, awaits the scorer with
//! the board lock released, then applies the verdict.
//!
//! Single and bulk screening deliberately differ: a single screen shortlists
//! only at or above the threshold and attaches reasons, while a bulk screen
//! shortlists every record it scores and leaves reasons untouched.
//! On any scorer failure the record keeps its prior status and fields.

use serde::Serialize;
use tracing::{info, warn};

use crate::errors::AppError;
use crate::listing::board::Desk;
use crate::listing::flight::FlightGuard;
use crate::models::{Application, ApplicationStatus, Lifecycle};
use crate::screening::{
    ScreeningError, ScreeningPass, ScreeningPolicy, Scorer, QUALIFIED_REASONS,
    UNQUALIFIED_REASONS,
};

#[derive(Debug, Clone, Serialize)]
pub struct ScreeningVerdict {
    pub application: Application,
    pub score: u32,
    pub qualified: bool,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct Unscreened {
    pub id: String,
    pub reason: String,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct BulkScreenReport {
    pub screened: Vec<Application>,
    /// Scorer errors; these records are unchanged.
    pub failed: Vec<Unscreened>,
    /// Never sent to the scorer (unknown, terminal, or already in flight).
    pub skipped: Vec<Unscreened>,
}

/// Screens one application.
///
/// Rejects a second call for an id that is already in flight, and refuses
/// applications that are already shortlisted or rejected.
pub async fn screen_one(
    desk: &Desk<Application>,
    scorer: &dyn Scorer,
    policy: &ScreeningPolicy,
    id: &str,
) -> Result<ScreeningVerdict, AppError> {
    ensure_enabled(policy)?;

    let (snapshot, flight) = {
        let board = desk.lock().await;
        let current = board
            .get(id)
            .cloned()
            .ok_or_else(|| AppError::NotFound(format!("Application {id} not found")))?;
        if current.status.is_terminal() {
            return Err(AppError::InvalidTransition {
                id: id.to_string(),
                from: current.status.to_string(),
                to: ApplicationStatus::Screened.to_string(),
            });
        }
        let flight = board
            .begin_flight(id)
            .ok_or_else(|| AppError::ScreeningInFlight(id.to_string()))?;
        (current, flight)
    };

    info!(id, "screening application");
    let cancel = desk.cancellation();
    let outcome = tokio::select! {
        biased;
        _ = cancel.cancelled() => Err(ScreeningError::Cancelled),
        result = scorer.score(&snapshot, ScreeningPass::Single) => result,
    };

    let mut board = desk.lock().await;
    drop(flight);

    let score = outcome.map_err(|e| AppError::ScreeningFailed {
        reason: format!("application {id}: {e}"),
    })?;
    let current = board
        .get(id)
        .cloned()
        .ok_or_else(|| AppError::NotFound(format!("Application {id} was removed during screening")))?;

    let qualified = score >= policy.threshold;
    let (status, reasons) = if qualified {
        (ApplicationStatus::Shortlisted, QUALIFIED_REASONS)
    } else {
        (ApplicationStatus::Rejected, UNQUALIFIED_REASONS)
    };
    let application = Application {
        status,
        fit_score: Some(score),
        ai_reasons: reasons.iter().map(|r| r.to_string()).collect(),
        screened: true,
        ..current
    };
    board.replace(application.clone());
    info!(id, score, qualified, status = %application.status, "screening complete");

    Ok(ScreeningVerdict {
        application,
        score,
        qualified,
    })
}

/// Screens every id in `ids` with one scorer batch.
///
/// Every scored record ends `Shortlisted` whatever its score. Ids that are
/// unknown, terminal or already in flight are skipped rather than queued.
pub async fn screen_bulk(
    desk: &Desk<Application>,
    scorer: &dyn Scorer,
    policy: &ScreeningPolicy,
    ids: &[String],
) -> Result<BulkScreenReport, AppError> {
    ensure_enabled(policy)?;
    if ids.is_empty() {
        return Err(AppError::Validation(
            "Please select at least one candidate".to_string(),
        ));
    }

    let mut report = BulkScreenReport::default();
    let batch: Vec<(Application, FlightGuard)> = {
        let board = desk.lock().await;
        let mut batch = Vec::new();
        for id in ids {
            let skip = |reason: &str| Unscreened {
                id: id.clone(),
                reason: reason.to_string(),
            };
            let Some(current) = board.get(id).cloned() else {
                report.skipped.push(skip("not found"));
                continue;
            };
            if current.status.is_terminal() {
                report
                    .skipped
                    .push(skip(&format!("already {}", current.status)));
                continue;
            }
            let Some(flight) = board.begin_flight(id) else {
                report.skipped.push(skip("screening already in progress"));
                continue;
            };
            batch.push((current, flight));
        }
        batch
    };

    if batch.is_empty() {
        return Ok(report);
    }

    info!(count = batch.len(), "bulk screening applications");
    let cancel = desk.cancellation();
    let applications: Vec<Application> = batch.iter().map(|(app, _)| app.clone()).collect();
    let outcomes: Vec<Result<u32, ScreeningError>> = tokio::select! {
        biased;
        _ = cancel.cancelled() => batch.iter().map(|_| Err(ScreeningError::Cancelled)).collect(),
        results = scorer.score_batch(&applications) => results,
    };

    let mut board = desk.lock().await;
    let mut outcomes = outcomes.into_iter();
    for (snapshot, flight) in batch {
        let id = snapshot.id;
        drop(flight);

        let outcome = outcomes
            .next()
            .unwrap_or_else(|| Err(ScreeningError::Unavailable("no score returned".to_string())));
        let score = match outcome {
            Ok(score) => score,
            Err(e) => {
                warn!(id = %id, error = %e, "bulk screening failed for application");
                report.failed.push(Unscreened {
                    id,
                    reason: e.to_string(),
                });
                continue;
            }
        };

        let Some(current) = board.get(&id).cloned() else {
            report.skipped.push(Unscreened {
                id,
                reason: "removed during screening".to_string(),
            });
            continue;
        };
        let application = Application {
            status: ApplicationStatus::Shortlisted,
            fit_score: Some(score),
            screened: true,
            ..current
        };
        board.replace(application.clone());
        report.screened.push(application);
    }

    info!(
        screened = report.screened.len(),
        failed = report.failed.len(),
        skipped = report.skipped.len(),
        "bulk screening complete"
    );
    Ok(report)
}

fn ensure_enabled(policy: &ScreeningPolicy) -> Result<(), AppError> {
    if policy.enabled {
        Ok(())
    } else {
        Err(AppError::Validation("AI screening is disabled".to_string()))
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::time::Duration;

    use tokio_util::sync::CancellationToken;

    use super::*;
    use crate::screening::testing::{FixedScorer, FlakyScorer, StalledScorer};
    use crate::seed;

    fn desk() -> Desk<Application> {
        Desk::new(seed::applications(), 6, CancellationToken::new())
    }

    #[tokio::test]
    async fn test_score_69_is_rejected() {
        let desk = desk();
        let verdict = screen_one(&desk, &FixedScorer::new(69), &ScreeningPolicy::default(), "1")
            .await
            .unwrap();
        assert!(!verdict.qualified);
        assert_eq!(verdict.application.status, ApplicationStatus::Rejected);
        assert_eq!(verdict.application.ai_reasons.len(), 2);
        assert_eq!(desk.lock().await.get("1").unwrap().status, ApplicationStatus::Rejected);
    }

    #[tokio::test]
    async fn test_score_70_is_shortlisted() {
        let desk = desk();
        let verdict = screen_one(&desk, &FixedScorer::new(70), &ScreeningPolicy::default(), "1")
            .await
            .unwrap();
        assert!(verdict.qualified);
        assert_eq!(verdict.application.status, ApplicationStatus::Shortlisted);
        assert_eq!(verdict.application.fit_score, Some(70));
        assert!(verdict.application.screened);
        assert_eq!(verdict.application.ai_reasons[0], "Matches required skills");
    }

    #[tokio::test]
    async fn test_threshold_follows_policy() {
        let desk = desk();
        let policy = ScreeningPolicy {
            enabled: true,
            threshold: 90,
        };
        let verdict = screen_one(&desk, &FixedScorer::new(85), &policy, "2")
            .await
            .unwrap();
        assert_eq!(verdict.application.status, ApplicationStatus::Rejected);
    }

    #[tokio::test]
    async fn test_disabled_policy_rejects_screening() {
        let desk = desk();
        let policy = ScreeningPolicy {
            enabled: false,
            threshold: 70,
        };
        let err = screen_one(&desk, &FixedScorer::new(90), &policy, "1")
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
    }

    #[tokio::test]
    async fn test_unknown_and_terminal_ids_are_refused() {
        let desk = desk();
        let scorer = FixedScorer::new(90);
        let policy = ScreeningPolicy::default();
        assert!(matches!(
            screen_one(&desk, &scorer, &policy, "missing").await,
            Err(AppError::NotFound(_))
        ));
        assert!(matches!(
            screen_one(&desk, &scorer, &policy, "5").await,
            Err(AppError::InvalidTransition { .. })
        ));
        assert_eq!(scorer.calls.load(std::sync::atomic::Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_failure_leaves_record_untouched() {
        let desk = desk();
        let before = desk.lock().await.get("1").cloned().unwrap();
        let scorer = FlakyScorer {
            failing: vec!["1".to_string()],
            score: 90,
        };
        let err = screen_one(&desk, &scorer, &ScreeningPolicy::default(), "1")
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::ScreeningFailed { .. }));

        let board = desk.lock().await;
        assert_eq!(board.get("1"), Some(&before));
        assert!(!board.is_in_flight("1"));
    }

    #[tokio::test]
    async fn test_reentrant_screen_is_rejected_while_in_flight() {
        let desk = Arc::new(desk());
        let pending = {
            let desk = Arc::clone(&desk);
            tokio::spawn(async move {
                screen_one(&desk, &StalledScorer, &ScreeningPolicy::default(), "1").await
            })
        };
        while !desk.lock().await.is_in_flight("1") {
            tokio::task::yield_now().await;
        }

        let err = screen_one(&desk, &FixedScorer::new(90), &ScreeningPolicy::default(), "1")
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::ScreeningInFlight(_)));

        desk.cancellation().cancel();
        let cancelled = tokio::time::timeout(Duration::from_secs(5), pending)
            .await
            .unwrap()
            .unwrap();
        assert!(matches!(cancelled, Err(AppError::ScreeningFailed { .. })));

        let board = desk.lock().await;
        assert_eq!(board.get("1").unwrap().status, ApplicationStatus::New);
        assert!(!board.is_in_flight("1"));
    }

    #[tokio::test]
    async fn test_dropped_screen_releases_flight() {
        let desk = Arc::new(desk());
        let pending = {
            let desk = Arc::clone(&desk);
            tokio::spawn(async move {
                screen_one(&desk, &StalledScorer, &ScreeningPolicy::default(), "1").await
            })
        };
        while !desk.lock().await.is_in_flight("1") {
            tokio::task::yield_now().await;
        }

        pending.abort();
        assert!(pending.await.unwrap_err().is_cancelled());
        assert!(!desk.lock().await.is_in_flight("1"));

        desk.lock()
            .await
            .set_status("1", ApplicationStatus::Screened)
            .unwrap();
        let verdict = screen_one(&desk, &FixedScorer::new(90), &ScreeningPolicy::default(), "1")
            .await
            .unwrap();
        assert_eq!(verdict.application.status, ApplicationStatus::Shortlisted);
    }

    #[tokio::test]
    async fn test_dropped_bulk_screen_releases_every_flight() {
        let desk = Arc::new(desk());
        let pending = {
            let desk = Arc::clone(&desk);
            tokio::spawn(async move {
                let ids = vec!["1".to_string(), "2".to_string()];
                screen_bulk(&desk, &StalledScorer, &ScreeningPolicy::default(), &ids).await
            })
        };
        while !desk.lock().await.is_in_flight("2") {
            tokio::task::yield_now().await;
        }

        pending.abort();
        assert!(pending.await.unwrap_err().is_cancelled());
        let board = desk.lock().await;
        assert!(!board.is_in_flight("1"));
        assert!(!board.is_in_flight("2"));
        assert_eq!(board.get("2").unwrap().status, ApplicationStatus::New);
    }

    #[tokio::test]
    async fn test_bulk_always_shortlists_regardless_of_score() {
        let desk = desk();
        // 60 would be rejected by a single screen.
        let scorer = FixedScorer::new(60).with("2", 94);
        let ids = vec!["1".to_string(), "2".to_string()];
        let report = screen_bulk(&desk, &scorer, &ScreeningPolicy::default(), &ids)
            .await
            .unwrap();

        assert_eq!(report.screened.len(), 2);
        let board = desk.lock().await;
        for id in ["1", "2"] {
            let app = board.get(id).unwrap();
            assert_eq!(app.status, ApplicationStatus::Shortlisted);
            assert!(app.screened);
            assert!(app.ai_reasons.is_empty());
        }
        assert_eq!(board.get("1").unwrap().fit_score, Some(60));
        assert_eq!(board.get("2").unwrap().fit_score, Some(94));
    }

    #[tokio::test]
    async fn test_bulk_skips_terminal_and_unknown() {
        let desk = desk();
        let ids = vec!["4".to_string(), "ghost".to_string(), "6".to_string()];
        let report = screen_bulk(&desk, &FixedScorer::new(80), &ScreeningPolicy::default(), &ids)
            .await
            .unwrap();
        assert_eq!(report.screened.len(), 1);
        assert_eq!(report.screened[0].id, "6");
        let skipped: Vec<&str> = report.skipped.iter().map(|s| s.id.as_str()).collect();
        assert_eq!(skipped, vec!["4", "ghost"]);
    }

    #[tokio::test]
    async fn test_bulk_failure_is_per_record() {
        let desk = desk();
        let scorer = FlakyScorer {
            failing: vec!["2".to_string()],
            score: 80,
        };
        let ids = vec!["1".to_string(), "2".to_string()];
        let report = screen_bulk(&desk, &scorer, &ScreeningPolicy::default(), &ids)
            .await
            .unwrap();
        assert_eq!(report.screened.len(), 1);
        assert_eq!(
            report.failed,
            vec![Unscreened {
                id: "2".to_string(),
                reason: "scoring service unavailable: upstream timeout".to_string(),
            }]
        );
        let board = desk.lock().await;
        assert_eq!(board.get("2").unwrap().status, ApplicationStatus::New);
        assert!(!board.is_in_flight("2"));
    }

    #[tokio::test]
    async fn test_bulk_requires_selection() {
        let desk = desk();
        let err = screen_bulk(&desk, &FixedScorer::new(80), &ScreeningPolicy::default(), &[])
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
    }
}

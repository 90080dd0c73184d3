//! Exam results board: bulk decisions, the overview cards and the export envelope.

use axum::{
    extract::{Query, State},
    Json,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::errors::AppError;
use crate::export::JsonExport;
use crate::listing::aggregate::{count_where, mean, percentage, BoardStats, StatScope};
use crate::listing::predicate::{build, Facets};
use crate::models::exam::ExamStatus;
use crate::models::{Decision, ExamResult};
use crate::notify::Variant;
use crate::routes::boards::StatsQuery;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct DecisionRequest {
    pub decision: Decision,
}

#[derive(Debug, Serialize)]
pub struct DecisionResponse {
    pub decision: Decision,
    pub updated: Vec<ExamResult>,
}

/// Headline numbers for the exam results page.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExamOverview {
    pub total_exams: usize,
    pub completed_exams: usize,
    /// Mean percentage over completed exams, one decimal.
    pub average_score: f64,
    /// Share of completed exams that passed.
    pub pass_rate: u32,
}

#[derive(Debug, Serialize)]
pub struct ExamStats {
    #[serde(flatten)]
    pub board: BoardStats,
    pub overview: ExamOverview,
}

#[derive(Debug, Serialize)]
struct ExamExport<'a> {
    timestamp: DateTime<Utc>,
    query: &'a str,
    facets: &'a Facets,
    results: &'a [ExamResult],
    overview: ExamOverview,
}

/// Pending exams are not yet graded and stay out of the averages.
pub fn overview(results: &[ExamResult]) -> ExamOverview {
    let completed: Vec<&ExamResult> = results
        .iter()
        .filter(|r| r.status != ExamStatus::Pending)
        .collect();
    let passed_only = Facets::from([(
        "status".to_string(),
        ExamStatus::Passed.as_str().to_string(),
    )]);
    let passed = count_where(results, &build::<ExamResult>("", &passed_only, &[]));
    let scores: Vec<u32> = completed.iter().map(|r| r.percentage).collect();

    ExamOverview {
        total_exams: results.len(),
        completed_exams: completed.len(),
        average_score: mean(&scores),
        pass_rate: percentage(passed, completed.len()),
    }
}

/// POST /api/v1/exams/decision
/// Applies one decision to every selected result that is still undecided.
pub async fn handle_decision(
    State(state): State<AppState>,
    Json(req): Json<DecisionRequest>,
) -> Result<Json<DecisionResponse>, AppError> {
    if req.decision == Decision::Undecided {
        return Err(AppError::Validation(
            "Decision must be shortlisted or rejected".to_string(),
        ));
    }

    let mut board = state.exams.lock().await;
    let ids = board.view_state().selection().ids();
    if ids.is_empty() {
        return Err(AppError::Validation(
            "Please select at least one candidate".to_string(),
        ));
    }

    // Already-decided results are skipped and stay selected.
    let updated = board.set_status_many(&ids, &req.decision);
    let selection = board.view_state_mut().selection_mut();
    for result in &updated {
        selection.remove(&result.id);
    }
    drop(board);

    if updated.is_empty() {
        state.notifier.show(
            "No selected candidates could be updated",
            Variant::Error,
        );
    } else {
        state.notifier.show(
            &format!("{} candidates marked {}", updated.len(), req.decision),
            Variant::Success,
        );
    }
    Ok(Json(DecisionResponse {
        decision: req.decision,
        updated,
    }))
}

/// GET /api/v1/exams/stats?scope=full|filtered
pub async fn handle_stats(
    State(state): State<AppState>,
    Query(params): Query<StatsQuery>,
) -> Result<Json<ExamStats>, AppError> {
    let board = state.exams.lock().await;
    let summary = match params.scope {
        StatScope::Full => overview(board.records()),
        StatScope::Filtered => overview(&board.filtered()),
    };
    Ok(Json(ExamStats {
        board: board.stats(params.scope),
        overview: summary,
    }))
}

/// GET /api/v1/exams/export
/// Exports the filtered results with the active filters and overview alongside.
pub async fn handle_export(State(state): State<AppState>) -> Result<JsonExport, AppError> {
    let board = state.exams.lock().await;
    let results = board.filtered();
    let envelope = ExamExport {
        timestamp: Utc::now(),
        query: board.view_state().query(),
        facets: board.view_state().facets(),
        results: &results,
        overview: overview(board.records()),
    };
    JsonExport::new("exam-results", &envelope)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::seed;

    #[test]
    fn test_overview_skips_pending() {
        let results = seed::exam_results();
        let o = overview(&results);
        assert_eq!(o.total_exams, 5);
        assert_eq!(o.completed_exams, 4);
        // 85, 72, 45, 92
        assert_eq!(o.average_score, 73.5);
        assert_eq!(o.pass_rate, 75);
    }

    #[test]
    fn test_overview_of_nothing_is_zero() {
        let o = overview(&[]);
        assert_eq!(o.completed_exams, 0);
        assert_eq!(o.average_score, 0.0);
        assert_eq!(o.pass_rate, 0);
    }
}

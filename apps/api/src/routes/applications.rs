//! Axum route handlers for application screening.

use axum::{
    extract::{Path, State},
    Json,
};
use serde::Deserialize;

use crate::errors::AppError;
use crate::notify::Variant;
use crate::screening::dispatcher::{screen_bulk, screen_one, BulkScreenReport, ScreeningVerdict};
use crate::state::AppState;

#[derive(Debug, Default, Deserialize)]
pub struct BulkScreenRequest {
    /// Ids to screen. Defaults to the board's current selection.
    #[serde(default)]
    pub ids: Option<Vec<String>>,
}

/// POST /api/v1/applications/:id/screen
pub async fn handle_screen_one(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<ScreeningVerdict>, AppError> {
    let policy = state.settings.read().await.screening_policy();

    match screen_one(&state.applications, state.scorer.as_ref(), &policy, &id).await {
        Ok(verdict) => {
            if verdict.qualified {
                state.notifier.show(
                    &format!("{} has been shortlisted", verdict.application.name),
                    Variant::Success,
                );
            }
            Ok(Json(verdict))
        }
        Err(err @ AppError::ScreeningFailed { .. }) => {
            state.notifier.show(&err.to_string(), Variant::Error);
            Err(err)
        }
        Err(err) => Err(err),
    }
}

/// POST /api/v1/applications/screen
pub async fn handle_screen_bulk(
    State(state): State<AppState>,
    Json(req): Json<BulkScreenRequest>,
) -> Result<Json<BulkScreenReport>, AppError> {
    let policy = state.settings.read().await.screening_policy();
    let ids = match req.ids {
        Some(ids) => ids,
        None => state.applications.lock().await.view_state().selection().ids(),
    };

    let report = screen_bulk(&state.applications, state.scorer.as_ref(), &policy, &ids).await?;

    if !report.screened.is_empty() {
        state.notifier.show(
            &format!("{} candidates shortlisted", report.screened.len()),
            Variant::Success,
        );
    }
    if !report.failed.is_empty() {
        state.notifier.show(
            &format!("Screening failed for {} candidates", report.failed.len()),
            Variant::Error,
        );
    }
    Ok(Json(report))
}

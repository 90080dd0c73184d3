use axum::{extract::State, Json};
use tracing::info;

use crate::errors::AppError;
use crate::export::{dated_filename, JsonExport};
use crate::settings::PlatformSettings;
use crate::state::AppState;

/// GET /api/v1/settings
pub async fn handle_get_settings(State(state): State<AppState>) -> Json<PlatformSettings> {
    Json(state.settings.read().await.clone())
}

/// GET /api/v1/settings/export
pub async fn handle_export_settings(
    State(state): State<AppState>,
) -> Result<JsonExport, AppError> {
    let body = state.settings.read().await.export()?;
    Ok(JsonExport {
        filename: dated_filename("platform-settings"),
        body,
    })
}

/// POST /api/v1/settings/import
/// Body is the raw text of a previously exported settings file.
pub async fn handle_import_settings(
    State(state): State<AppState>,
    body: String,
) -> Result<Json<PlatformSettings>, AppError> {
    let imported = PlatformSettings::import(&body)?;
    *state.settings.write().await = imported.clone();
    info!(
        threshold = imported.ai_screening_threshold,
        screening = imported.ai_screening_enabled,
        "platform settings imported"
    );
    Ok(Json(imported))
}

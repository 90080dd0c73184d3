//! Handlers shared by every list board, generic over the record type.
//!
//! Each board registers these under its own prefix; `HasDesk<R>` picks the
//! collection out of `AppState`.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::{delete, patch, post, put},
    Json, Router,
};
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use tracing::debug;

use crate::errors::AppError;
use crate::export::JsonExport;
use crate::listing::aggregate::{BoardStats, StatScope};
use crate::listing::board::BoardSnapshot;
use crate::listing::predicate::Facets;
use crate::listing::selection::Selection;
use crate::listing::view::total_pages;
use crate::models::Record;
use crate::state::{AppState, HasDesk};

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

/// Partial update of a board's view. Query and facet changes reset the page,
/// so an explicit `page` is applied last.
#[derive(Debug, Default, Deserialize)]
pub struct ViewUpdate {
    #[serde(default)]
    pub clear: bool,
    pub query: Option<String>,
    pub facets: Option<Facets>,
    pub page_size: Option<usize>,
    pub page: Option<usize>,
}

#[derive(Debug, Deserialize)]
#[serde(bound = "S: DeserializeOwned")]
pub struct StatusUpdate<S> {
    pub status: S,
}

#[derive(Debug, Serialize)]
pub struct StatusChange<R> {
    /// `None` when the id did not exist; the request is then a no-op.
    pub updated: Option<R>,
}

#[derive(Debug, Serialize)]
pub struct SelectionResponse {
    pub count: usize,
    pub selected: Vec<String>,
}

impl SelectionResponse {
    fn of(selection: &Selection) -> Self {
        Self {
            count: selection.len(),
            selected: selection.ids(),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct StatsQuery {
    #[serde(default)]
    pub scope: StatScope,
}

#[derive(Debug, Deserialize)]
pub struct OverlayToggle {
    pub id: String,
}

#[derive(Debug, Default, Deserialize)]
pub struct OverlayDismiss {
    pub target: Option<String>,
}

// ────────────────────────────────────────────────────────────────────────────
// Router
// ────────────────────────────────────────────────────────────────────────────

/// Registers the shared board routes under `base`. The bare `base` path,
/// `stats` and `export` are left to the caller so boards can specialize them.
pub fn routes<R: Record>(router: Router<AppState>, base: &str) -> Router<AppState>
where
    AppState: HasDesk<R>,
{
    router
        .route(&format!("{base}/view"), put(handle_update_view::<R>))
        .route(&format!("{base}/view/next"), post(handle_next_page::<R>))
        .route(&format!("{base}/view/prev"), post(handle_prev_page::<R>))
        .route(
            &format!("{base}/selection/visible"),
            post(handle_toggle_visible::<R>),
        )
        .route(&format!("{base}/selection/:id"), post(handle_toggle_one::<R>))
        .route(&format!("{base}/overlay"), post(handle_toggle_overlay::<R>))
        .route(
            &format!("{base}/overlay/dismiss"),
            post(handle_dismiss_overlay::<R>),
        )
        .route(&format!("{base}/:id/status"), patch(handle_set_status::<R>))
        .route(&format!("{base}/:id"), delete(handle_remove::<R>))
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// GET /api/v1/{board}
pub async fn handle_list<R: Record>(
    State(state): State<AppState>,
) -> Result<Json<BoardSnapshot<R>>, AppError>
where
    AppState: HasDesk<R>,
{
    let mut board = HasDesk::<R>::desk(&state).lock().await;
    Ok(Json(board.snapshot()))
}

/// PUT /api/v1/{board}/view
pub async fn handle_update_view<R: Record>(
    State(state): State<AppState>,
    Json(update): Json<ViewUpdate>,
) -> Result<Json<BoardSnapshot<R>>, AppError>
where
    AppState: HasDesk<R>,
{
    if update.page_size == Some(0) {
        return Err(AppError::Validation(
            "page_size must be greater than zero".to_string(),
        ));
    }

    let mut board = HasDesk::<R>::desk(&state).lock().await;
    let view = board.view_state_mut();
    if update.clear {
        view.clear_filters();
    }
    if let Some(query) = update.query {
        view.set_query(query);
    }
    for (key, value) in update.facets.unwrap_or_default() {
        view.set_facet(key, value);
    }
    if let Some(page_size) = update.page_size {
        view.set_page_size(page_size);
    }
    if let Some(page) = update.page {
        let pages = total_pages(board.filtered().len(), board.view_state().page_size());
        board.view_state_mut().go_to(page, pages);
    }
    Ok(Json(board.snapshot()))
}

/// POST /api/v1/{board}/view/next
pub async fn handle_next_page<R: Record>(
    State(state): State<AppState>,
) -> Result<Json<BoardSnapshot<R>>, AppError>
where
    AppState: HasDesk<R>,
{
    let mut board = HasDesk::<R>::desk(&state).lock().await;
    let pages = board.current_page().total_pages;
    board.view_state_mut().next_page(pages);
    Ok(Json(board.snapshot()))
}

/// POST /api/v1/{board}/view/prev
pub async fn handle_prev_page<R: Record>(
    State(state): State<AppState>,
) -> Result<Json<BoardSnapshot<R>>, AppError>
where
    AppState: HasDesk<R>,
{
    let mut board = HasDesk::<R>::desk(&state).lock().await;
    let pages = board.current_page().total_pages;
    board.view_state_mut().prev_page(pages);
    Ok(Json(board.snapshot()))
}

/// POST /api/v1/{board}/selection/:id
pub async fn handle_toggle_one<R: Record>(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<SelectionResponse>, AppError>
where
    AppState: HasDesk<R>,
{
    let mut board = HasDesk::<R>::desk(&state).lock().await;
    board.toggle_selected(&id)?;
    Ok(Json(SelectionResponse::of(board.view_state().selection())))
}

/// POST /api/v1/{board}/selection/visible
pub async fn handle_toggle_visible<R: Record>(
    State(state): State<AppState>,
) -> Result<Json<SelectionResponse>, AppError>
where
    AppState: HasDesk<R>,
{
    let mut board = HasDesk::<R>::desk(&state).lock().await;
    board.toggle_all_visible();
    Ok(Json(SelectionResponse::of(board.view_state().selection())))
}

/// POST /api/v1/{board}/overlay
pub async fn handle_toggle_overlay<R: Record>(
    State(state): State<AppState>,
    Json(req): Json<OverlayToggle>,
) -> Result<Json<BoardSnapshot<R>>, AppError>
where
    AppState: HasDesk<R>,
{
    let mut board = HasDesk::<R>::desk(&state).lock().await;
    board.view_state_mut().toggle_overlay(&req.id);
    Ok(Json(board.snapshot()))
}

/// POST /api/v1/{board}/overlay/dismiss
pub async fn handle_dismiss_overlay<R: Record>(
    State(state): State<AppState>,
    Json(req): Json<OverlayDismiss>,
) -> Result<Json<BoardSnapshot<R>>, AppError>
where
    AppState: HasDesk<R>,
{
    let mut board = HasDesk::<R>::desk(&state).lock().await;
    board.view_state_mut().dismiss_outside(req.target.as_deref());
    Ok(Json(board.snapshot()))
}

/// PATCH /api/v1/{board}/:id/status
///
/// Unknown ids are a no-op and answer `{"updated": null}`.
pub async fn handle_set_status<R: Record>(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(req): Json<StatusUpdate<R::Status>>,
) -> Result<Json<StatusChange<R>>, AppError>
where
    AppState: HasDesk<R>,
{
    let mut board = HasDesk::<R>::desk(&state).lock().await;
    let updated = board.set_status(&id, req.status)?;
    if updated.is_none() {
        debug!(board = R::BOARD, id = %id, "status change for unknown id ignored");
    }
    Ok(Json(StatusChange { updated }))
}

/// DELETE /api/v1/{board}/:id
pub async fn handle_remove<R: Record>(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, AppError>
where
    AppState: HasDesk<R>,
{
    let mut board = HasDesk::<R>::desk(&state).lock().await;
    board
        .remove(&id)
        .ok_or_else(|| AppError::NotFound(format!("{} record {id} not found", R::BOARD)))?;
    Ok(StatusCode::NO_CONTENT)
}

/// GET /api/v1/{board}/stats?scope=full|filtered
pub async fn handle_stats<R: Record>(
    State(state): State<AppState>,
    Query(params): Query<StatsQuery>,
) -> Result<Json<BoardStats>, AppError>
where
    AppState: HasDesk<R>,
{
    let board = HasDesk::<R>::desk(&state).lock().await;
    Ok(Json(board.stats(params.scope)))
}

/// GET /api/v1/{board}/export
pub async fn handle_export<R: Record>(
    State(state): State<AppState>,
) -> Result<JsonExport, AppError>
where
    AppState: HasDesk<R>,
{
    let board = HasDesk::<R>::desk(&state).lock().await;
    JsonExport::records(board.records())
}

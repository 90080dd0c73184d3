pub mod applications;
pub mod boards;
pub mod exams;
pub mod health;
pub mod jobs;
pub mod session;
pub mod settings;
pub mod users;

use axum::{
    middleware,
    routing::{get, post},
    Router,
};

use crate::models::{Application, ExamResult, Job, User};
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    // Board and settings API (session required)
    let guarded = Router::new()
        .route(
            "/api/v1/applications",
            get(boards::handle_list::<Application>),
        )
        .route(
            "/api/v1/applications/stats",
            get(boards::handle_stats::<Application>),
        )
        .route(
            "/api/v1/applications/export",
            get(boards::handle_export::<Application>),
        )
        .route(
            "/api/v1/applications/screen",
            post(applications::handle_screen_bulk),
        )
        .route(
            "/api/v1/applications/:id/screen",
            post(applications::handle_screen_one),
        )
        .route(
            "/api/v1/jobs",
            get(boards::handle_list::<Job>).post(jobs::handle_create_job),
        )
        .route("/api/v1/jobs/stats", get(boards::handle_stats::<Job>))
        .route("/api/v1/jobs/export", get(boards::handle_export::<Job>))
        .route("/api/v1/exams", get(boards::handle_list::<ExamResult>))
        .route("/api/v1/exams/stats", get(exams::handle_stats))
        .route("/api/v1/exams/export", get(exams::handle_export))
        .route("/api/v1/exams/decision", post(exams::handle_decision))
        .route("/api/v1/users", get(boards::handle_list::<User>))
        .route("/api/v1/users/stats", get(users::handle_stats))
        .route("/api/v1/users/export", get(boards::handle_export::<User>))
        .route("/api/v1/users/:id/toggle", post(users::handle_toggle_status))
        .route("/api/v1/settings", get(settings::handle_get_settings))
        .route(
            "/api/v1/settings/export",
            get(settings::handle_export_settings),
        )
        .route(
            "/api/v1/settings/import",
            post(settings::handle_import_settings),
        );
    let guarded = boards::routes::<Application>(guarded, "/api/v1/applications");
    let guarded = boards::routes::<Job>(guarded, "/api/v1/jobs");
    let guarded = boards::routes::<ExamResult>(guarded, "/api/v1/exams");
    let guarded = boards::routes::<User>(guarded, "/api/v1/users").route_layer(
        middleware::from_fn_with_state(state.clone(), session::require_session),
    );

    Router::new()
        .route("/health", get(health::health_handler))
        .route(
            "/api/v1/session",
            get(session::handle_get_session)
                .post(session::handle_sign_in)
                .delete(session::handle_sign_out),
        )
        .route(
            "/api/v1/session/profile",
            post(session::handle_complete_profile),
        )
        .merge(guarded)
        .with_state(state)
}

use axum::{
    extract::{Request, State},
    http::StatusCode,
    middleware::Next,
    response::Response,
    Json,
};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::errors::AppError;
use crate::flags::{FlagStore, PROFILE_COMPLETED_FLAG, USER_FLAG};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct SignInRequest {
    pub email: String,
}

#[derive(Debug, Serialize, PartialEq)]
pub struct SessionStatus {
    pub user: Option<String>,
    pub profile_completed: bool,
}

fn session_status(flags: &dyn FlagStore) -> SessionStatus {
    SessionStatus {
        user: signed_in_user(flags),
        profile_completed: flags.get(PROFILE_COMPLETED_FLAG).as_deref() == Some("true"),
    }
}

fn signed_in_user(flags: &dyn FlagStore) -> Option<String> {
    flags.get(USER_FLAG).filter(|u| !u.trim().is_empty())
}

/// GET /api/v1/session
pub async fn handle_get_session(State(state): State<AppState>) -> Json<SessionStatus> {
    Json(session_status(state.flags.as_ref()))
}

/// POST /api/v1/session
pub async fn handle_sign_in(
    State(state): State<AppState>,
    Json(req): Json<SignInRequest>,
) -> Result<Json<SessionStatus>, AppError> {
    let email = req.email.trim();
    if email.is_empty() || !email.contains('@') {
        return Err(AppError::Validation("A valid email is required".to_string()));
    }
    state.flags.set(USER_FLAG, email);
    info!(user = email, "signed in");
    Ok(Json(session_status(state.flags.as_ref())))
}

/// DELETE /api/v1/session
pub async fn handle_sign_out(State(state): State<AppState>) -> StatusCode {
    state.flags.remove(USER_FLAG);
    state.flags.remove(PROFILE_COMPLETED_FLAG);
    info!("signed out");
    StatusCode::NO_CONTENT
}

/// POST /api/v1/session/profile
pub async fn handle_complete_profile(
    State(state): State<AppState>,
) -> Result<Json<SessionStatus>, AppError> {
    if signed_in_user(state.flags.as_ref()).is_none() {
        return Err(AppError::Unauthorized);
    }
    state.flags.set(PROFILE_COMPLETED_FLAG, "true");
    Ok(Json(session_status(state.flags.as_ref())))
}

/// Rejects requests made without a signed-in user.
pub async fn require_session(
    State(state): State<AppState>,
    req: Request,
    next: Next,
) -> Result<Response, AppError> {
    if signed_in_user(state.flags.as_ref()).is_none() {
        return Err(AppError::Unauthorized);
    }
    Ok(next.run(req).await)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::flags::InMemoryFlagStore;

    #[test]
    fn test_blank_user_flag_is_signed_out() {
        let flags = InMemoryFlagStore::new();
        flags.set(USER_FLAG, "  ");
        assert_eq!(signed_in_user(&flags), None);

        flags.set(USER_FLAG, "hr@example.com");
        flags.set(PROFILE_COMPLETED_FLAG, "true");
        assert_eq!(
            session_status(&flags),
            SessionStatus {
                user: Some("hr@example.com".to_string()),
                profile_completed: true,
            }
        );
    }
}

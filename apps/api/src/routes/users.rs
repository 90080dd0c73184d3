//! User management board: activate/deactivate and the headline account counts.

use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde::Serialize;

use crate::errors::AppError;
use crate::listing::aggregate::{count_where, BoardStats, StatScope};
use crate::listing::predicate::{build, Facets};
use crate::models::user::{UserKind, UserStatus};
use crate::models::{Record, User};
use crate::routes::boards::{StatsQuery, StatusChange};
use crate::state::AppState;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UserOverview {
    pub total_users: usize,
    pub job_seekers: usize,
    pub recruiters: usize,
    pub active_users: usize,
}

#[derive(Debug, Serialize)]
pub struct UserStats {
    #[serde(flatten)]
    pub board: BoardStats,
    pub overview: UserOverview,
}

fn count_field(users: &[User], field: &str, value: &str) -> usize {
    let facets = Facets::from([(field.to_string(), value.to_string())]);
    count_where(users, &build::<User>("", &facets, &[]))
}

pub fn overview(users: &[User]) -> UserOverview {
    UserOverview {
        total_users: users.len(),
        job_seekers: count_field(users, "kind", UserKind::JobSeeker.as_str()),
        recruiters: count_field(users, "kind", UserKind::Recruiter.as_str()),
        active_users: count_field(users, "status", UserStatus::Active.as_str()),
    }
}

/// POST /api/v1/users/:id/toggle
/// Deactivates an active account, activates any other.
pub async fn handle_toggle_status(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<StatusChange<User>>, AppError> {
    let mut board = state.users.lock().await;
    let next = board
        .get(&id)
        .map(|user| user.status().toggled())
        .ok_or_else(|| AppError::NotFound(format!("User {id} not found")))?;
    let updated = board.set_status(&id, next)?;
    Ok(Json(StatusChange { updated }))
}

/// GET /api/v1/users/stats?scope=full|filtered
pub async fn handle_stats(
    State(state): State<AppState>,
    Query(params): Query<StatsQuery>,
) -> Result<Json<UserStats>, AppError> {
    let board = state.users.lock().await;
    let summary = match params.scope {
        StatScope::Full => overview(board.records()),
        StatScope::Filtered => overview(&board.filtered()),
    };
    Ok(Json(UserStats {
        board: board.stats(params.scope),
        overview: summary,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::seed;

    #[test]
    fn test_overview_counts() {
        assert_eq!(
            overview(&seed::users()),
            UserOverview {
                total_users: 8,
                job_seekers: 4,
                recruiters: 4,
                active_users: 5,
            }
        );
    }
}

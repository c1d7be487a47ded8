//! Admin endpoints.

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    response::{IntoResponse, Response},
    Json,
};

use super::ApiResult;
use crate::errors::{AppError, ErrorResponse};
use crate::models::{AdminAction, AdminMessage, AdminRequest, LegacySnapshot, PollDetails};
use crate::AppState;

/// GET /api/admin - Legacy ledger snapshot.
pub async fn get_admin_snapshot(State(state): State<AppState>) -> Response {
    match state.admin.get_snapshot().await {
        Ok(snapshot) => Json::<LegacySnapshot>(snapshot).into_response(),
        Err(e) => failure(&e, "Failed to fetch data"),
    }
}

/// POST /api/admin - Apply a reset action.
pub async fn post_admin_action(
    State(state): State<AppState>,
    payload: Result<Json<AdminRequest>, JsonRejection>,
) -> Response {
    let request = match payload {
        Ok(Json(request)) => request,
        Err(rejection) => {
            tracing::warn!("Unreadable admin request: {}", rejection);
            AdminRequest::default()
        }
    };

    let Some(action) = request.action.as_deref().and_then(AdminAction::parse) else {
        return failure(
            &AppError::BadRequest(format!("Unknown action {:?}", request.action)),
            "Invalid action",
        );
    };

    let result = match action {
        AdminAction::ResetYes => state
            .admin
            .reset_yes()
            .await
            .map(|_| "Yes votes reset successfully"),
        AdminAction::ResetNo => state
            .admin
            .reset_no()
            .await
            .map(|_| "No votes reset successfully"),
        AdminAction::ResetAll => state
            .admin
            .reset_all()
            .await
            .map(|_| "All data reset successfully"),
        AdminAction::ResetUser => match non_blank(request.user_id.as_deref()) {
            Some(user_id) => state
                .admin
                .reset_user(user_id)
                .await
                .map(|_| "User reset successfully"),
            None => Err(AppError::Validation("userId is required".to_string())),
        },
        AdminAction::ResetVote => match non_blank(request.vote_id.as_deref()) {
            Some(vote_id) => state
                .admin
                .reset_vote(vote_id)
                .await
                .map(|_| "Vote reset successfully"),
            None => Err(AppError::Validation("voteId is required".to_string())),
        },
    };

    match result {
        Ok(message) => Json(AdminMessage::new(message)).into_response(),
        Err(e @ (AppError::Store(_) | AppError::Internal(_))) => {
            failure(&e, "Failed to reset data")
        }
        Err(e) => e.into_response(),
    }
}

/// GET /api/admin/votes/:id - Inspect a poll and its tally.
pub async fn lookup_vote(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<PollDetails> {
    Ok(Json(state.admin.lookup_vote(&id).await?))
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

fn failure(error: &AppError, message: &str) -> Response {
    (
        error.status_code(),
        Json(ErrorResponse::with_message(error, message)),
    )
        .into_response()
}

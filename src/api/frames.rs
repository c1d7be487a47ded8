//! Frame submission endpoints.
//!
//! Clients of the frame protocol cannot show HTTP errors, so every failure
//! is rendered as an error card with status 200.

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    Json,
};

use crate::db::{LEGACY_OPTIONS, LEGACY_QUESTION};
use crate::errors::AppError;
use crate::models::{compute_results, legacy_summary, FrameRequest, Poll};
use crate::render::{poll_prompt, site_link, FrameView};
use crate::AppState;

/// POST /api/advanced/:id - Button click on a poll frame.
pub async fn submit_poll_frame(
    State(state): State<AppState>,
    Path(id): Path<String>,
    payload: Result<Json<FrameRequest>, JsonRejection>,
) -> FrameView {
    let site_url = state.config.site_url.clone();
    let Ok(Json(request)) = payload else {
        return FrameView::error(&site_url, "Invalid request");
    };
    match handle_poll_submission(&state, &id, &request).await {
        Ok(view) => view,
        Err(e) => {
            tracing::warn!(poll_id = %id, "Frame submission failed: {}", e);
            FrameView::error(&site_url, frame_error_message(&e))
        }
    }
}

async fn handle_poll_submission(
    state: &AppState,
    id: &str,
    request: &FrameRequest,
) -> Result<FrameView, AppError> {
    let poll = state
        .polls
        .get_poll(id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Vote {} not found", id)))?;

    let user_id = request
        .user_id()
        .ok_or_else(|| AppError::UnauthenticatedUser("Missing fid".to_string()))?;

    if state.ledger.has_voted(&poll.id, &user_id).await? {
        return results_view(state, &poll).await;
    }

    let Some(button_index) = request.button_index() else {
        return Ok(poll_prompt(&state.config.site_url, &poll));
    };

    state.ledger.cast_vote(&poll, &user_id, button_index).await?;
    results_view(state, &poll).await
}

async fn results_view(state: &AppState, poll: &Poll) -> Result<FrameView, AppError> {
    let tally = state.ledger.get_tally(poll).await?;
    let results = compute_results(&poll.options, &tally);
    let results_json = serde_json::to_string(&results)?;

    let image = site_link(
        &state.config.site_url,
        "/og",
        &[("title", poll.title.as_str()), ("results", results_json.as_str())],
    );
    let post_url = site_link(
        &state.config.site_url,
        &format!("/api/advanced/{}", poll.id),
        &[],
    );
    Ok(FrameView::image(image).with_post_url(post_url))
}

/// POST /api/advanced - Button click on the legacy yes/no frame.
pub async fn submit_legacy_frame(
    State(state): State<AppState>,
    payload: Result<Json<FrameRequest>, JsonRejection>,
) -> FrameView {
    let site_url = state.config.site_url.clone();
    let Ok(Json(request)) = payload else {
        return FrameView::error(&site_url, "Invalid request");
    };
    match handle_legacy_submission(&state, &request).await {
        Ok(view) => view,
        Err(e) => {
            tracing::warn!("Legacy frame submission failed: {}", e);
            FrameView::error(&site_url, frame_error_message(&e))
        }
    }
}

async fn handle_legacy_submission(
    state: &AppState,
    request: &FrameRequest,
) -> Result<FrameView, AppError> {
    let user_id = request
        .user_id()
        .ok_or_else(|| AppError::UnauthenticatedUser("Missing fid".to_string()))?;

    if state.legacy.has_voted(&user_id).await? {
        return legacy_results_view(state).await;
    }

    match request.button_index() {
        Some(button_index @ 1..=2) => {
            state.legacy.cast_vote(&user_id, button_index).await?;
            legacy_results_view(state).await
        }
        _ => {
            let site_url = &state.config.site_url;
            let labels: Vec<String> = LEGACY_OPTIONS.iter().map(|s| s.to_string()).collect();
            Ok(FrameView::image(site_link(site_url, "/og", &[("title", LEGACY_QUESTION)]))
                .with_buttons(&labels)
                .with_post_url(site_link(site_url, "/api/advanced", &[])))
        }
    }
}

async fn legacy_results_view(state: &AppState) -> Result<FrameView, AppError> {
    let (yes, no) = state.legacy.tally().await?;
    let summary = legacy_summary(yes, no);
    Ok(FrameView::image(site_link(
        &state.config.site_url,
        "/og",
        &[
            ("title", "Current Voting Results"),
            ("description", summary.as_str()),
        ],
    )))
}

fn frame_error_message(error: &AppError) -> &'static str {
    match error {
        AppError::NotFound(_) => "Vote not found",
        AppError::UnauthenticatedUser(_) => "Unable to verify user",
        AppError::InvalidOption { .. } => "Invalid option",
        _ => "Something went wrong",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_frame_error_messages() {
        assert_eq!(
            frame_error_message(&AppError::UnauthenticatedUser("x".into())),
            "Unable to verify user"
        );
        assert_eq!(
            frame_error_message(&AppError::NotFound("x".into())),
            "Vote not found"
        );
        assert_eq!(
            frame_error_message(&AppError::Store("boom".into())),
            "Something went wrong"
        );
    }
}

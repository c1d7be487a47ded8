//! Poll creation and inspection endpoints.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{Html, IntoResponse, Response},
    Json,
};

use super::ApiResult;
use crate::errors::AppError;
use crate::models::{CreatePollRequest, CreatePollResponse, PollDetails};
use crate::render::{not_found_page, poll_page};
use crate::AppState;

/// POST /api/vote-creation - Create a new poll.
pub async fn create_poll(
    State(state): State<AppState>,
    Json(request): Json<CreatePollRequest>,
) -> ApiResult<CreatePollResponse> {
    let poll = request.validate()?;
    let vote_id = state.polls.create_poll(&poll).await?;
    Ok(Json(CreatePollResponse { vote_id }))
}

/// GET /api/votes/:id - Poll with its current results.
pub async fn get_poll(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<PollDetails> {
    let poll = state.polls.require_poll(&id).await?;
    Ok(Json(state.ledger.details(poll).await?))
}

/// GET /advanced/:id - Share page carrying the poll's frame metadata.
pub async fn poll_share_page(State(state): State<AppState>, Path(id): Path<String>) -> Response {
    match render_share_page(&state, &id).await {
        Ok(response) => response,
        Err(e) => e.into_response(),
    }
}

async fn render_share_page(state: &AppState, id: &str) -> Result<Response, AppError> {
    let response = match state.polls.get_poll(id).await? {
        Some(poll) => Html(poll_page(&state.config.site_url, &poll)?).into_response(),
        None => (StatusCode::NOT_FOUND, Html(not_found_page()?)).into_response(),
    };
    Ok(response)
}

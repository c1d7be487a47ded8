//! Card image endpoints used as frame images.

use axum::{
    extract::Query,
    http::{header, StatusCode},
    response::{IntoResponse, Response},
};
use serde::Deserialize;

use crate::models::OptionResult;
use crate::render::{poll_card, result_card, CardBody, DEFAULT_DEADLINE, DEFAULT_TITLE};

const SVG_CONTENT_TYPE: &str = "image/svg+xml";

/// Query for `/og`. Newer links send `results`; older ones free text.
#[derive(Debug, Default, Deserialize)]
pub struct ResultCardQuery {
    pub title: Option<String>,
    pub results: Option<String>,
    pub description: Option<String>,
    pub description1: Option<String>,
    pub description2: Option<String>,
}

impl ResultCardQuery {
    fn body(&self) -> Result<CardBody, serde_json::Error> {
        if let Some(raw) = &self.results {
            let results: Vec<OptionResult> = serde_json::from_str(raw)?;
            return Ok(CardBody::Results(results));
        }

        let lines = [&self.description, &self.description1, &self.description2]
            .into_iter()
            .flatten()
            .filter(|line| !line.trim().is_empty())
            .cloned()
            .collect();
        Ok(CardBody::Lines(lines))
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct PollCardQuery {
    pub title: Option<String>,
    pub deadline: Option<String>,
}

/// GET /og - Result card.
pub async fn result_image(Query(query): Query<ResultCardQuery>) -> Response {
    let title = non_empty(query.title.as_deref()).unwrap_or(DEFAULT_TITLE);

    let card = query
        .body()
        .map_err(|e| e.to_string())
        .and_then(|body| result_card(title, &body).map_err(|e| e.to_string()));

    match card {
        Ok(svg) => svg_response(svg),
        Err(e) => {
            tracing::error!("Failed to generate result card: {}", e);
            image_failure()
        }
    }
}

/// GET /frame-image - Poll card with title and deadline.
pub async fn poll_image(Query(query): Query<PollCardQuery>) -> Response {
    let title = non_empty(query.title.as_deref()).unwrap_or(DEFAULT_TITLE);
    let deadline = non_empty(query.deadline.as_deref()).unwrap_or(DEFAULT_DEADLINE);
    match poll_card(title, deadline) {
        Ok(svg) => svg_response(svg),
        Err(e) => {
            tracing::error!("Failed to generate poll card: {}", e);
            image_failure()
        }
    }
}

fn image_failure() -> Response {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        "Failed to generate the image",
    )
        .into_response()
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.trim().is_empty())
}

fn svg_response(svg: String) -> Response {
    (
        [
            (header::CONTENT_TYPE, SVG_CONTENT_TYPE),
            (header::CACHE_CONTROL, "no-store"),
        ],
        svg,
    )
        .into_response()
}

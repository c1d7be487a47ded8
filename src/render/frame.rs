//! Frame protocol HTML envelopes.

use askama::Template;
use axum::response::{Html, IntoResponse, Response};

use super::site_link;
use crate::errors::AppError;

/// Frame clients render at most four buttons.
pub const MAX_FRAME_BUTTONS: usize = 4;

/// A frame view: an image, optional buttons and where clicks are posted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrameView {
    pub image: String,
    pub buttons: Vec<String>,
    pub post_url: Option<String>,
}

impl FrameView {
    pub fn image(image: impl Into<String>) -> Self {
        Self {
            image: image.into(),
            buttons: Vec::new(),
            post_url: None,
        }
    }

    pub fn with_buttons(mut self, labels: &[String]) -> Self {
        self.buttons = labels.iter().take(MAX_FRAME_BUTTONS).cloned().collect();
        self
    }

    pub fn with_post_url(mut self, post_url: impl Into<String>) -> Self {
        self.post_url = Some(post_url.into());
        self
    }

    /// Error card pointing at the result image endpoint.
    pub fn error(site_url: &str, message: &str) -> Self {
        let title = format!("Error: {}", message);
        Self::image(site_link(site_url, "/og", &[("title", title.as_str())]))
    }

    /// Standalone HTML document returned to frame clients.
    pub fn to_html(&self) -> Result<String, askama::Error> {
        FrameDocument { frame: self }.render()
    }
}

/// Frame metadata alone in an otherwise empty document.
#[derive(Template)]
#[template(path = "frame.html")]
struct FrameDocument<'a> {
    frame: &'a FrameView,
}

impl IntoResponse for FrameView {
    fn into_response(self) -> Response {
        match self.to_html() {
            Ok(html) => Html(html).into_response(),
            Err(e) => AppError::from(e).into_response(),
        }
    }
}

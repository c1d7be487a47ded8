//! Presentation: frame HTML envelopes, the poll share page and SVG cards.
//!
//! Markup lives in askama templates under `templates/`; interpolated text is
//! HTML-escaped by the template engine.

mod card;
mod frame;
mod page;

pub use card::*;
pub use frame::*;
pub use page::*;

use url::Url;

/// Absolute URL under `site_url` with the given query parameters.
///
/// Falls back to plain concatenation when `site_url` does not parse.
pub fn site_link(site_url: &str, path: &str, query: &[(&str, &str)]) -> String {
    let base = format!("{}{}", site_url.trim_end_matches('/'), path);
    let Ok(mut url) = Url::parse(&base) else {
        tracing::warn!("Site URL {} is not absolute", site_url);
        return base;
    };
    if !query.is_empty() {
        url.query_pairs_mut().extend_pairs(query);
    }
    url.to_string()
}

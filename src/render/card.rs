//! 1200×630 SVG cards for frame images.

use askama::Template;
use chrono::{DateTime, Utc};

use crate::models::OptionResult;

pub const CARD_WIDTH: u32 = 1200;
pub const CARD_HEIGHT: u32 = 630;

/// Titles longer than this are cut before rendering.
pub const MAX_TITLE_CHARS: usize = 100;

pub const DEFAULT_TITLE: &str = "Default Title";
pub const DEFAULT_DEADLINE: &str = "No deadline set";

/// What the result card shows under its title.
#[derive(Debug, Clone, PartialEq)]
pub enum CardBody {
    Results(Vec<OptionResult>),
    Lines(Vec<String>),
}

#[derive(Debug)]
struct CardText {
    text: String,
    y: u32,
    font_size: u32,
}

impl CardText {
    fn new(text: impl Into<String>, y: u32, font_size: u32) -> Self {
        Self {
            text: text.into(),
            y,
            font_size,
        }
    }
}

#[derive(Template)]
#[template(path = "card.svg", escape = "html")]
struct CardTemplate<'a> {
    width: u32,
    height: u32,
    background: &'a str,
    panel: bool,
    lines: Vec<CardText>,
}

impl<'a> CardTemplate<'a> {
    fn new(background: &'a str, panel: bool, lines: Vec<CardText>) -> Self {
        Self {
            width: CARD_WIDTH,
            height: CARD_HEIGHT,
            background,
            panel,
            lines,
        }
    }
}

/// Result card: title, "Results:" and one line per option or description.
pub fn result_card(title: &str, body: &CardBody) -> Result<String, askama::Error> {
    let title: String = title.chars().take(MAX_TITLE_CHARS).collect();

    let rows: Vec<String> = match body {
        CardBody::Results(results) => results
            .iter()
            .map(|r| format!("{}: {}% ({} votes)", r.option, r.percentage, r.count))
            .collect(),
        CardBody::Lines(lines) => lines.clone(),
    };

    let mut lines = vec![CardText::new(title, 150, 50), CardText::new("Results:", 230, 50)];
    let mut y = 300;
    for row in rows {
        lines.push(CardText::new(row, y, 40));
        y += 55;
    }

    CardTemplate::new("#2C2C2C", false, lines).render()
}

/// Poll card: title and a readable deadline.
pub fn poll_card(title: &str, deadline: &str) -> Result<String, askama::Error> {
    let lines = vec![
        CardText::new(title, 290, 48),
        CardText::new(format!("Deadline: {}", format_deadline(deadline)), 370, 32),
    ];
    CardTemplate::new("#1B1B2F", true, lines).render()
}

/// RFC 3339 deadlines are shown as `YYYY-MM-DD HH:MM UTC`; anything else verbatim.
pub fn format_deadline(deadline: &str) -> String {
    DateTime::parse_from_rfc3339(deadline)
        .map(|dt| {
            dt.with_timezone(&Utc)
                .format("%Y-%m-%d %H:%M UTC")
                .to_string()
        })
        .unwrap_or_else(|_| deadline.to_string())
}

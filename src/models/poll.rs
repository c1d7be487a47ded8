//! Poll model and the creation request contract.

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

use crate::errors::AppError;

pub const MIN_OPTIONS: usize = 2;
pub const MAX_OPTIONS: usize = 4;

/// A stored poll. Immutable after creation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Poll {
    pub id: String,
    pub title: String,
    /// ISO-8601 UTC timestamp as written at creation time
    pub deadline: String,
    pub options: Vec<String>,
}

impl Poll {
    pub fn option_count(&self) -> usize {
        self.options.len()
    }
}

/// Request body for creating a poll.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatePollRequest {
    pub title: String,
    pub deadline: String,
    pub options: OptionsInput,
}

/// Options as submitted: the form sends an array, older clients a single string.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum OptionsInput {
    Many(Vec<String>),
    One(String),
}

impl OptionsInput {
    fn into_vec(self) -> Vec<String> {
        match self {
            OptionsInput::Many(options) => options,
            OptionsInput::One(option) => vec![option],
        }
    }
}

/// A creation request that passed validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewPoll {
    pub title: String,
    pub deadline: String,
    pub options: Vec<String>,
}

impl CreatePollRequest {
    /// Check title, deadline and options, normalising the deadline to UTC.
    pub fn validate(self) -> Result<NewPoll, AppError> {
        let title = self.title.trim().to_string();
        if title.is_empty() {
            return Err(AppError::Validation("Title is required".to_string()));
        }

        let deadline = normalize_deadline(&self.deadline)?;

        let options: Vec<String> = self
            .options
            .into_vec()
            .into_iter()
            .map(|o| o.trim().to_string())
            .collect();

        if options.len() < MIN_OPTIONS || options.len() > MAX_OPTIONS {
            return Err(AppError::Validation(format!(
                "A poll needs between {} and {} options, got {}",
                MIN_OPTIONS,
                MAX_OPTIONS,
                options.len()
            )));
        }
        if options.iter().any(|o| o.is_empty()) {
            return Err(AppError::Validation("Option cannot be empty".to_string()));
        }
        for (i, option) in options.iter().enumerate() {
            if options[..i].contains(option) {
                return Err(AppError::Validation(format!(
                    "Duplicate option: {}",
                    option
                )));
            }
        }

        Ok(NewPoll {
            title,
            deadline,
            options,
        })
    }
}

fn normalize_deadline(raw: &str) -> Result<String, AppError> {
    DateTime::parse_from_rfc3339(raw.trim())
        .map(|dt| {
            dt.with_timezone(&Utc)
                .to_rfc3339_opts(SecondsFormat::Millis, true)
        })
        .map_err(|e| AppError::Validation(format!("Invalid deadline '{}': {}", raw, e)))
}

/// Response body for poll creation.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatePollResponse {
    pub vote_id: String,
}

/// Normalise a stored `options` field.
///
/// Tries a JSON array first and falls back to a comma-joined list. Empty
/// entries are dropped either way.
pub fn parse_options(raw: &str) -> Vec<String> {
    let items: Vec<String> = match serde_json::from_str::<Vec<String>>(raw) {
        Ok(options) => options,
        Err(_) => raw.split(',').map(str::to_string).collect(),
    };

    items
        .into_iter()
        .map(|o| o.trim().to_string())
        .filter(|o| !o.is_empty())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(options: &[&str]) -> CreatePollRequest {
        CreatePollRequest {
            title: "T".to_string(),
            deadline: "2030-01-01T00:00:00Z".to_string(),
            options: OptionsInput::Many(options.iter().map(|s| s.to_string()).collect()),
        }
    }

    #[test]
    fn test_parse_options_json() {
        assert_eq!(
            parse_options(r#"["Red","Blue","Green"]"#),
            vec!["Red", "Blue", "Green"]
        );
    }

    #[test]
    fn test_parse_options_comma_joined() {
        assert_eq!(parse_options("Red, Blue,Green"), vec!["Red", "Blue", "Green"]);
    }

    #[test]
    fn test_parse_options_single_value() {
        assert_eq!(parse_options("Only"), vec!["Only"]);
        assert!(parse_options("").is_empty());
    }

    #[test]
    fn test_validate_accepts_two_to_four() {
        assert!(request(&["a", "b"]).validate().is_ok());
        assert!(request(&["a", "b", "c", "d"]).validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_option_counts() {
        assert!(matches!(
            request(&["a"]).validate(),
            Err(AppError::Validation(_))
        ));
        assert!(matches!(
            request(&["a", "b", "c", "d", "e"]).validate(),
            Err(AppError::Validation(_))
        ));
    }

    #[test]
    fn test_validate_rejects_empty_and_duplicate_options() {
        assert!(request(&["a", "  "]).validate().is_err());
        assert!(request(&["a", "a"]).validate().is_err());
    }

    #[test]
    fn test_validate_normalizes_deadline_to_utc() {
        let mut req = request(&["Yes", "No"]);
        req.deadline = "2030-01-01T02:00:00+02:00".to_string();
        let poll = req.validate().unwrap();
        assert_eq!(poll.deadline, "2030-01-01T00:00:00.000Z");
    }

    #[test]
    fn test_validate_rejects_bad_deadline_and_title() {
        let mut req = request(&["Yes", "No"]);
        req.deadline = "tomorrow".to_string();
        assert!(req.validate().is_err());

        let mut req = request(&["Yes", "No"]);
        req.title = " ".to_string();
        assert!(req.validate().is_err());
    }

    #[test]
    fn test_single_string_options_input() {
        let req: CreatePollRequest = serde_json::from_value(serde_json::json!({
            "title": "T",
            "deadline": "2030-01-01T00:00:00Z",
            "options": "Solo"
        }))
        .unwrap();
        // One option is below the minimum
        assert!(req.validate().is_err());
    }
}

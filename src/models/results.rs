//! Results calculator: raw counts to display percentages.

use serde::{de, Deserialize, Deserializer, Serialize};

/// One row of a poll's results, in option order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OptionResult {
    pub option: String,
    pub count: u64,
    /// Percentage with one decimal place, e.g. `"50.0"`
    #[serde(deserialize_with = "percentage_from_any")]
    pub percentage: String,
}

/// Pair each option with its count and share of the total.
///
/// Counts beyond the option list are ignored; missing counts read as 0.
pub fn compute_results(options: &[String], counts: &[u64]) -> Vec<OptionResult> {
    let total: u64 = counts.iter().take(options.len()).sum();

    options
        .iter()
        .enumerate()
        .map(|(i, option)| {
            let count = counts.get(i).copied().unwrap_or(0);
            let percentage = if total > 0 {
                count as f64 / total as f64 * 100.0
            } else {
                0.0
            };
            OptionResult {
                option: option.clone(),
                count,
                percentage: format!("{:.1}", round_half_up(percentage)),
            }
        })
        .collect()
}

// `{:.1}` rounds ties to even; ties round up on the cards.
fn round_half_up(percentage: f64) -> f64 {
    (percentage * 10.0).round() / 10.0
}

/// Whole-number percentage used by the legacy yes/no summary.
pub fn rounded_percentage(count: u64, total: u64) -> u64 {
    if total == 0 {
        return 0;
    }
    (count as f64 / total as f64 * 100.0).round() as u64
}

/// `Yes: 63% | No: 38%` line shown on the legacy poll's result card.
pub fn legacy_summary(yes: u64, no: u64) -> String {
    let total = yes + no;
    format!(
        "Yes: {}% | No: {}%",
        rounded_percentage(yes, total),
        rounded_percentage(no, total)
    )
}

// Result cards accept percentages written as strings or as bare numbers.
fn percentage_from_any<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    match serde_json::Value::deserialize(deserializer)? {
        serde_json::Value::String(s) => Ok(s),
        serde_json::Value::Number(n) => n
            .as_f64()
            .map(|v| format!("{:.1}", v))
            .ok_or_else(|| de::Error::custom("percentage out of range")),
        other => Err(de::Error::custom(format!(
            "expected percentage string or number, got {}",
            other
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn options(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_even_split() {
        let results = compute_results(&options(&["Yes", "No"]), &[1, 1]);
        assert_eq!(
            results,
            vec![
                OptionResult {
                    option: "Yes".into(),
                    count: 1,
                    percentage: "50.0".into()
                },
                OptionResult {
                    option: "No".into(),
                    count: 1,
                    percentage: "50.0".into()
                },
            ]
        );
    }

    #[test]
    fn test_ties_round_up() {
        let results = compute_results(&options(&["a", "b", "c", "d"]), &[1, 15, 0, 0]);
        assert_eq!(results[0].percentage, "6.3");
        assert_eq!(results[1].percentage, "93.8");
        assert_eq!(results[2].percentage, "0.0");
    }

    #[test]
    fn test_no_votes_all_zero() {
        let results = compute_results(&options(&["a", "b", "c"]), &[0, 0, 0]);
        assert!(results.iter().all(|r| r.percentage == "0.0"));
        assert_eq!(results.len(), 3);
    }

    #[test]
    fn test_percentages_sum_to_hundred() {
        for counts in [vec![1, 1, 1], vec![2, 5, 0, 7], vec![1, 2], vec![3, 3, 1, 0]] {
            let names: Vec<String> = (0..counts.len()).map(|i| format!("o{}", i)).collect();
            let sum: f64 = compute_results(&names, &counts)
                .iter()
                .map(|r| r.percentage.parse::<f64>().unwrap())
                .sum();
            assert!((sum - 100.0).abs() <= 0.1 * counts.len() as f64, "sum {}", sum);
        }
    }

    #[test]
    fn test_order_follows_options_not_counts() {
        let results = compute_results(&options(&["low", "high"]), &[1, 9]);
        assert_eq!(results[0].option, "low");
        assert_eq!(results[1].percentage, "90.0");
    }

    #[test]
    fn test_missing_counts_read_as_zero() {
        let results = compute_results(&options(&["a", "b"]), &[4]);
        assert_eq!(results[1].count, 0);
        assert_eq!(results[0].percentage, "100.0");
    }

    #[test]
    fn test_legacy_summary() {
        assert_eq!(legacy_summary(0, 0), "Yes: 0% | No: 0%");
        assert_eq!(legacy_summary(5, 3), "Yes: 63% | No: 38%");
    }

    #[test]
    fn test_deserialize_numeric_percentage() {
        let parsed: Vec<OptionResult> =
            serde_json::from_str(r#"[{"option":"a","count":1,"percentage":33.333}]"#).unwrap();
        assert_eq!(parsed[0].percentage, "33.3");
    }
}

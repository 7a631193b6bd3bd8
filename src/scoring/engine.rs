use std::cmp::Ordering;

use crate::contest::types::ContestEntry;
use crate::output::formatter::format_time;
use crate::scoring::attempt::{parse_attempt, Attempt};
use crate::scoring::policy::{EventPolicy, ScoringMethod, ValueFormat};
use crate::scoring::ranking::ContestantResult;

/// A scored set of attempts.
///
/// `value` is `None` when the scoring method yields no countable result;
/// `display` then carries "DNF" (all non-finishes) or "-" (wrong attempt
/// count). `secondary_*` is set only by [`ScoringMethod::SingleWithMean`].
#[derive(Debug, Clone)]
pub struct CalculatedResult {
    pub value: Option<f64>,
    pub display: String,
    pub secondary_value: Option<f64>,
    pub secondary_display: Option<String>,
}

impl CalculatedResult {
    fn empty(display: &str) -> Self {
        Self {
            value: None,
            display: display.to_string(),
            secondary_value: None,
            secondary_display: None,
        }
    }
}

/// Reduce a contestant's attempts to a single result under `policy`.
///
/// Pure and infallible: missing or insufficient data degrades to a
/// "-"/"DNF" result rather than erroring.
pub fn calculate_result(attempts: &[Attempt], policy: &EventPolicy) -> CalculatedResult {
    if attempts.is_empty() {
        return CalculatedResult::empty("-");
    }

    let moves = policy.format == ValueFormat::Moves;

    match policy.method {
        ScoringMethod::Single => best_single(attempts),
        ScoringMethod::MeanOf3 => mean_of_all(attempts, policy.attempts, moves),
        ScoringMethod::AverageOf5 => trimmed_average(attempts, policy.attempts, moves),
        ScoringMethod::SingleWithMean => single_with_mean(attempts, policy.attempts, moves),
    }
}

/// Parse an entry's raw attempt strings and score them.
///
/// Unparseable attempts are skipped here; `validate_entry` is the strict
/// path that reports them.
pub fn score_entry(entry: &ContestEntry, policy: &EventPolicy) -> ContestantResult {
    let moves = policy.format == ValueFormat::Moves;
    let attempts: Vec<Attempt> = entry
        .times
        .iter()
        .filter_map(|raw| parse_attempt(raw, moves).ok())
        .collect();

    let calculated = calculate_result(&attempts, policy);

    ContestantResult {
        name: entry.name.clone(),
        round: entry.round,
        attempts,
        value: calculated.value,
        display: calculated.display,
        secondary_value: calculated.secondary_value,
        secondary_display: calculated.secondary_display,
    }
}

/// Best finished attempt. Attempt count is not constrained.
fn best_single(attempts: &[Attempt]) -> CalculatedResult {
    match best_attempt(attempts) {
        Some(best) => CalculatedResult {
            value: best.value,
            display: best.display.clone(),
            secondary_value: None,
            secondary_display: None,
        },
        None => CalculatedResult::empty("DNF"),
    }
}

/// Plain mean of exactly `expected` attempts; any DNF forces DNF.
fn mean_of_all(attempts: &[Attempt], expected: u32, moves: bool) -> CalculatedResult {
    if attempts.len() != expected as usize {
        return CalculatedResult::empty("-");
    }
    if attempts.iter().any(Attempt::is_dnf) {
        return CalculatedResult::empty("DNF");
    }

    let mean = mean_value(attempts);
    CalculatedResult {
        value: Some(mean),
        display: format_time(Some(mean), moves),
        secondary_value: None,
        secondary_display: None,
    }
}

/// Drop the best and worst of exactly `expected` attempts, mean the rest.
///
/// DNFs sort after every finished attempt (and equal to each other), so a
/// single DNF is dropped as the worst attempt and does not spoil the
/// average.
fn trimmed_average(attempts: &[Attempt], expected: u32, moves: bool) -> CalculatedResult {
    if attempts.len() != expected as usize {
        return CalculatedResult::empty("-");
    }

    let mut sorted: Vec<&Attempt> = attempts.iter().collect();
    sorted.sort_by(|a, b| compare_attempts(a, b));
    let middle = &sorted[1..sorted.len() - 1];

    if middle.iter().any(|a| a.is_dnf()) {
        return CalculatedResult::empty("DNF");
    }

    let sum: f64 = middle.iter().filter_map(|a| a.value).sum();
    let mean = sum / middle.len() as f64;
    CalculatedResult {
        value: Some(mean),
        display: format_time(Some(mean), moves),
        secondary_value: None,
        secondary_display: None,
    }
}

/// Blind-event scoring: ranked by best single, mean carried alongside.
///
/// The mean is only countable when every attempt finished; there is no
/// best/worst trimming.
fn single_with_mean(attempts: &[Attempt], expected: u32, moves: bool) -> CalculatedResult {
    if attempts.len() != expected as usize {
        return CalculatedResult {
            value: None,
            display: "-".to_string(),
            secondary_value: None,
            secondary_display: Some("-".to_string()),
        };
    }

    let best = best_single(attempts);

    let (secondary_value, secondary_display) = if attempts.iter().any(Attempt::is_dnf) {
        (None, "DNF".to_string())
    } else {
        let mean = mean_value(attempts);
        (Some(mean), format_time(Some(mean), moves))
    };

    CalculatedResult {
        value: best.value,
        display: best.display,
        secondary_value,
        secondary_display: Some(secondary_display),
    }
}

fn best_attempt(attempts: &[Attempt]) -> Option<&Attempt> {
    attempts
        .iter()
        .filter(|a| !a.is_dnf())
        .min_by(|a, b| compare_attempts(a, b))
}

/// Mean over attempts that are known to all carry values.
fn mean_value(attempts: &[Attempt]) -> f64 {
    let sum: f64 = attempts.iter().filter_map(|a| a.value).sum();
    sum / attempts.len() as f64
}

/// Ascending by value; DNF after every finished attempt, DNFs mutually
/// equal so the sort stays stable with several of them.
fn compare_attempts(a: &Attempt, b: &Attempt) -> Ordering {
    match (a.value, b.value) {
        (None, None) => Ordering::Equal,
        (None, Some(_)) => Ordering::Greater,
        (Some(_), None) => Ordering::Less,
        (Some(a), Some(b)) => a.partial_cmp(&b).unwrap_or(Ordering::Equal),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scoring::policy::{EventPolicy, ScoringMethod, ValueFormat};

    fn attempts(raws: &[&str]) -> Vec<Attempt> {
        raws.iter().map(|raw| parse_attempt(raw, false).unwrap()).collect()
    }

    fn ao5_policy() -> EventPolicy {
        EventPolicy::new(5, ScoringMethod::AverageOf5, ValueFormat::Standard)
    }

    fn mo3_policy() -> EventPolicy {
        EventPolicy::new(3, ScoringMethod::MeanOf3, ValueFormat::Extended)
    }

    fn blind_policy() -> EventPolicy {
        EventPolicy::new(3, ScoringMethod::SingleWithMean, ValueFormat::Extended)
    }

    #[test]
    fn test_average_of_5_drops_best_and_worst() {
        let result = calculate_result(
            &attempts(&["10.00", "9.00", "11.00", "12.00", "9.50"]),
            &ao5_policy(),
        );
        // Middle three: 9.50, 10.00, 11.00.
        let value = result.value.unwrap();
        assert!((value - 10.166666666666666).abs() < 1e-9);
        assert_eq!(result.display, "10.17");
    }

    #[test]
    fn test_average_of_5_single_dnf_is_dropped_as_worst() {
        let result = calculate_result(
            &attempts(&["10.00", "9.00", "11.00", "DNF", "9.50"]),
            &ao5_policy(),
        );
        let value = result.value.unwrap();
        assert!((value - 10.166666666666666).abs() < 1e-9);
        assert_eq!(result.display, "10.17");
    }

    #[test]
    fn test_average_of_5_two_dnfs_force_dnf() {
        let result = calculate_result(
            &attempts(&["10.00", "DNF", "11.00", "DNF", "9.50"]),
            &ao5_policy(),
        );
        assert_eq!(result.value, None);
        assert_eq!(result.display, "DNF");
    }

    #[test]
    fn test_average_of_5_wrong_attempt_count_is_dash() {
        let result = calculate_result(&attempts(&["10.00", "9.00", "11.00"]), &ao5_policy());
        assert_eq!(result.value, None);
        assert_eq!(result.display, "-");
    }

    #[test]
    fn test_average_of_5_counts_penalized_values() {
        // 9.00+ becomes 11.00 and lands in the middle three.
        let result = calculate_result(
            &attempts(&["10.00", "9.00+", "8.00", "12.00", "10.50"]),
            &ao5_policy(),
        );
        let value = result.value.unwrap();
        assert!((value - 10.5).abs() < 1e-9);
    }

    #[test]
    fn test_mean_of_3() {
        let result = calculate_result(&attempts(&["2:45.00", "3:00.00", "2:55.50"]), &mo3_policy());
        let value = result.value.unwrap();
        assert!((value - 173.5).abs() < 1e-9);
        assert_eq!(result.display, "2:53.50");
    }

    #[test]
    fn test_mean_of_3_any_dnf_forces_dnf() {
        let result = calculate_result(&attempts(&["2:45.00", "DNF", "2:55.50"]), &mo3_policy());
        assert_eq!(result.value, None);
        assert_eq!(result.display, "DNF");
    }

    #[test]
    fn test_mean_of_3_wrong_count_is_dash() {
        let result = calculate_result(&attempts(&["2:45.00", "2:55.50"]), &mo3_policy());
        assert_eq!(result.display, "-");
    }

    #[test]
    fn test_mean_of_moves_renders_as_count() {
        let policy = EventPolicy::new(3, ScoringMethod::MeanOf3, ValueFormat::Moves);
        let raws: Vec<Attempt> =
            ["25", "30", "28"].iter().map(|r| parse_attempt(r, true).unwrap()).collect();
        let result = calculate_result(&raws, &policy);
        let value = result.value.unwrap();
        assert!((value - 27.666666666666668).abs() < 1e-9);
        assert_eq!(result.display, "27.67");

        let raws: Vec<Attempt> =
            ["25", "26", "27"].iter().map(|r| parse_attempt(r, true).unwrap()).collect();
        let result = calculate_result(&raws, &policy);
        assert_eq!(result.display, "26");
    }

    #[test]
    fn test_best_single_keeps_attempt_display() {
        let policy = EventPolicy::new(5, ScoringMethod::Single, ValueFormat::Standard);
        let result = calculate_result(&attempts(&["12.00", "9.00+", "13.00"]), &policy);
        // 9.00+ parses to 11.00, beating 12.00; display keeps the marker.
        assert_eq!(result.value, Some(11.00));
        assert_eq!(result.display, "11.00+");
    }

    #[test]
    fn test_best_single_all_dnf() {
        let policy = EventPolicy::new(5, ScoringMethod::Single, ValueFormat::Standard);
        let result = calculate_result(&attempts(&["DNF", "DNF"]), &policy);
        assert_eq!(result.value, None);
        assert_eq!(result.display, "DNF");
    }

    #[test]
    fn test_single_with_mean_dnf_spoils_mean_not_rank_value() {
        let result = calculate_result(&attempts(&["12.00", "DNF", "13.00"]), &blind_policy());
        assert_eq!(result.value, Some(12.00));
        assert_eq!(result.display, "12.00");
        assert_eq!(result.secondary_value, None);
        assert_eq!(result.secondary_display.as_deref(), Some("DNF"));
    }

    #[test]
    fn test_single_with_mean_all_finished() {
        let result =
            calculate_result(&attempts(&["1:00.00", "1:30.00", "2:00.00"]), &blind_policy());
        assert_eq!(result.value, Some(60.0));
        assert_eq!(result.secondary_value, Some(90.0));
        assert_eq!(result.secondary_display.as_deref(), Some("1:30.00"));
    }

    #[test]
    fn test_single_with_mean_wrong_count() {
        let result = calculate_result(&attempts(&["1:00.00"]), &blind_policy());
        assert_eq!(result.value, None);
        assert_eq!(result.display, "-");
        assert_eq!(result.secondary_display.as_deref(), Some("-"));
    }

    #[test]
    fn test_empty_attempts_is_dash() {
        let result = calculate_result(&[], &ao5_policy());
        assert_eq!(result.value, None);
        assert_eq!(result.display, "-");
    }

    #[test]
    fn test_score_entry_skips_unparseable_attempts() {
        let entry = ContestEntry {
            name: "Alice".to_string(),
            round: 1,
            times: vec![
                "9.00".to_string(),
                "bogus".to_string(),
                "10.00".to_string(),
                "11.00".to_string(),
                "9.50".to_string(),
            ],
            submitted_at: None,
            submitted_by: None,
        };
        // One attempt dropped leaves four, which an ao5 event scores as "-".
        let result = score_entry(&entry, &ao5_policy());
        assert_eq!(result.attempts.len(), 4);
        assert_eq!(result.display, "-");
        assert_eq!(result.name, "Alice");
    }
}

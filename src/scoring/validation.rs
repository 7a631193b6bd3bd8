use crate::contest::types::ContestEntry;
use crate::scoring::attempt::parse_attempt;
use crate::scoring::policy::{EventPolicy, ScoringMethod, ValueFormat};

/// Validate a submission before scoring.
/// Returns all validation errors at once (not just the first).
pub fn validate_entry(
    entry: &ContestEntry,
    event: &str,
    policy: &EventPolicy,
) -> Result<(), Vec<String>> {
    let mut errors = Vec::new();
    let moves = policy.format == ValueFormat::Moves;

    if entry.name.trim().is_empty() {
        errors.push("contestant name must not be empty".to_string());
    }

    if entry.times.is_empty() {
        errors.push("at least one attempt is required".to_string());
    }

    if entry.times.len() > policy.attempts as usize {
        errors.push(format!(
            "{} takes at most {} attempts, got {}",
            event,
            policy.attempts,
            entry.times.len()
        ));
    }

    let mut finished = 0usize;
    for (i, raw) in entry.times.iter().enumerate() {
        match parse_attempt(raw, moves) {
            Ok(attempt) => {
                if !attempt.is_dnf() {
                    finished += 1;
                }
            }
            Err(e) => errors.push(format!("attempt {}: {}", i + 1, e)),
        }
    }

    // Averaging methods cannot produce a countable result without enough
    // finished attempts.
    match policy.method {
        ScoringMethod::AverageOf5 if !entry.times.is_empty() && finished < 3 => {
            errors.push(format!(
                "{} needs at least 3 finished attempts for an average of 5",
                event
            ));
        }
        ScoringMethod::MeanOf3 if !entry.times.is_empty() && finished == 0 => {
            errors.push(format!("{} needs at least 1 finished attempt", event));
        }
        _ => {}
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scoring::policy::{EventPolicy, ScoringMethod, ValueFormat};

    fn entry(name: &str, times: &[&str]) -> ContestEntry {
        ContestEntry {
            name: name.to_string(),
            round: 1,
            times: times.iter().map(|t| t.to_string()).collect(),
            submitted_at: None,
            submitted_by: None,
        }
    }

    fn ao5_policy() -> EventPolicy {
        EventPolicy::new(5, ScoringMethod::AverageOf5, ValueFormat::Standard)
    }

    #[test]
    fn test_valid_entry() {
        let e = entry("Alice", &["9.00", "9.50", "10.00", "DNF", "11.00"]);
        assert!(validate_entry(&e, "3x3", &ao5_policy()).is_ok());
    }

    #[test]
    fn test_empty_name() {
        let e = entry("  ", &["9.00", "9.50", "10.00", "10.50", "11.00"]);
        let errors = validate_entry(&e, "3x3", &ao5_policy()).unwrap_err();
        assert!(errors[0].contains("name"));
    }

    #[test]
    fn test_no_attempts() {
        let e = entry("Alice", &[]);
        let errors = validate_entry(&e, "3x3", &ao5_policy()).unwrap_err();
        assert!(errors[0].contains("at least one attempt"));
    }

    #[test]
    fn test_too_many_attempts() {
        let e = entry("Alice", &["9.00", "9.50", "10.00", "10.50", "11.00", "12.00"]);
        let errors = validate_entry(&e, "3x3", &ao5_policy()).unwrap_err();
        assert!(errors[0].contains("at most 5"));
    }

    #[test]
    fn test_bad_attempt_reported_with_index() {
        let e = entry("Alice", &["9.00", "wat", "10.00", "10.50", "11.00"]);
        let errors = validate_entry(&e, "3x3", &ao5_policy()).unwrap_err();
        assert_eq!(errors.len(), 1);
        assert!(errors[0].starts_with("attempt 2:"));
        assert!(errors[0].contains("unrecognized"));
    }

    #[test]
    fn test_average_needs_three_finished() {
        let e = entry("Alice", &["9.00", "DNF", "DNF", "DNF", "11.00"]);
        let errors = validate_entry(&e, "3x3", &ao5_policy()).unwrap_err();
        assert!(errors[0].contains("at least 3 finished"));
    }

    #[test]
    fn test_mean_needs_one_finished() {
        let policy = EventPolicy::new(3, ScoringMethod::MeanOf3, ValueFormat::Extended);
        let e = entry("Alice", &["DNF", "DNF", "DNF"]);
        let errors = validate_entry(&e, "6x6", &policy).unwrap_err();
        assert!(errors[0].contains("at least 1 finished"));
    }

    #[test]
    fn test_collects_all_errors() {
        let e = entry("", &["bogus", "9.00", "DNF", "DNF", "DNF"]);
        let errors = validate_entry(&e, "3x3", &ao5_policy()).unwrap_err();
        // Empty name, bad attempt 1, not enough finished attempts.
        assert_eq!(errors.len(), 3);
    }

    #[test]
    fn test_blind_event_accepts_all_dnf() {
        let policy = EventPolicy::new(3, ScoringMethod::SingleWithMean, ValueFormat::Extended);
        let e = entry("Alice", &["DNF", "DNF", "DNF"]);
        assert!(validate_entry(&e, "3x3-blind", &policy).is_ok());
    }
}

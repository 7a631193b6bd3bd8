use std::cmp::Ordering;

use crate::scoring::attempt::Attempt;

/// One contestant's scored entry for an event round.
///
/// Built once by [`crate::scoring::engine::calculate_result`] /
/// [`crate::scoring::engine::score_entry`]; rescoring means building a new
/// value. `value` is what ranking compares; `secondary_*` is only carried by
/// best-single-with-mean events.
#[derive(Debug, Clone)]
pub struct ContestantResult {
    pub name: String,
    pub round: u32,
    pub attempts: Vec<Attempt>,
    pub value: Option<f64>,
    pub display: String,
    pub secondary_value: Option<f64>,
    pub secondary_display: Option<String>,
}

/// A contestant result with its competition rank.
///
/// `rank` is `None` for contestants with no countable result; they sort
/// after everyone else and render as "-".
#[derive(Debug, Clone)]
pub struct RankedResult {
    pub rank: Option<u32>,
    pub result: ContestantResult,
}

/// Compare scored values: ascending, no-result after every finite value.
fn compare_values(a: Option<f64>, b: Option<f64>) -> Ordering {
    match (a, b) {
        (None, None) => Ordering::Equal,
        (None, Some(_)) => Ordering::Greater,
        (Some(_), None) => Ordering::Less,
        (Some(a), Some(b)) => a.partial_cmp(&b).unwrap_or(Ordering::Equal),
    }
}

/// Sort results and assign competition ranks.
///
/// The sort is stable, so equally-scored contestants keep their input
/// order. Ranks are the 1-based sorted position, except that an entry whose
/// value exactly equals its predecessor's carries the predecessor's rank;
/// the next distinct value resumes at its true position (9.50, 9.50, 10.00
/// ranks 1, 1, 3).
pub fn rank_results(mut results: Vec<ContestantResult>) -> Vec<RankedResult> {
    results.sort_by(|a, b| compare_values(a.value, b.value));

    let mut ranked = Vec::with_capacity(results.len());
    let mut current_rank = 0u32;
    let mut previous_value: Option<f64> = None;

    for (index, result) in results.into_iter().enumerate() {
        let tied = index > 0 && result.value == previous_value && result.value.is_some();
        if !tied {
            current_rank = index as u32 + 1;
        }
        previous_value = result.value;

        let rank = result.value.is_some().then_some(current_rank);
        ranked.push(RankedResult { rank, result });
    }

    ranked
}

#[cfg(test)]
mod tests {
    use super::*;

    fn result(name: &str, value: Option<f64>) -> ContestantResult {
        ContestantResult {
            name: name.to_string(),
            round: 1,
            attempts: vec![],
            value,
            display: String::new(),
            secondary_value: None,
            secondary_display: None,
        }
    }

    fn ranks(results: &[RankedResult]) -> Vec<Option<u32>> {
        results.iter().map(|r| r.rank).collect()
    }

    fn names(results: &[RankedResult]) -> Vec<&str> {
        results.iter().map(|r| r.result.name.as_str()).collect()
    }

    #[test]
    fn test_rank_empty() {
        assert!(rank_results(vec![]).is_empty());
    }

    #[test]
    fn test_rank_sorts_ascending() {
        let ranked = rank_results(vec![
            result("slow", Some(12.0)),
            result("fast", Some(8.0)),
            result("mid", Some(10.0)),
        ]);
        assert_eq!(names(&ranked), ["fast", "mid", "slow"]);
        assert_eq!(ranks(&ranked), [Some(1), Some(2), Some(3)]);
    }

    #[test]
    fn test_rank_ties_share_rank_and_skip_positions() {
        let ranked = rank_results(vec![
            result("a", Some(9.50)),
            result("b", Some(9.50)),
            result("c", Some(10.00)),
            result("d", None),
        ]);
        assert_eq!(ranks(&ranked), [Some(1), Some(1), Some(3), None]);
    }

    #[test]
    fn test_rank_three_way_tie() {
        let ranked = rank_results(vec![
            result("a", Some(9.5)),
            result("b", Some(9.5)),
            result("c", Some(9.5)),
            result("d", Some(10.0)),
        ]);
        assert_eq!(ranks(&ranked), [Some(1), Some(1), Some(1), Some(4)]);
    }

    #[test]
    fn test_rank_no_result_sorts_last_and_is_unranked() {
        let ranked = rank_results(vec![
            result("dnf", None),
            result("ok", Some(15.0)),
        ]);
        assert_eq!(names(&ranked), ["ok", "dnf"]);
        assert_eq!(ranks(&ranked), [Some(1), None]);
    }

    #[test]
    fn test_rank_multiple_no_results_keep_input_order() {
        let ranked = rank_results(vec![
            result("first-dnf", None),
            result("ok", Some(15.0)),
            result("second-dnf", None),
        ]);
        assert_eq!(names(&ranked), ["ok", "first-dnf", "second-dnf"]);
        assert_eq!(ranks(&ranked), [Some(1), None, None]);
    }

    #[test]
    fn test_rank_tied_entries_keep_input_order() {
        let ranked = rank_results(vec![
            result("earlier", Some(9.5)),
            result("later", Some(9.5)),
        ]);
        assert_eq!(names(&ranked), ["earlier", "later"]);
    }

    #[test]
    fn test_rank_after_tie_resumes_at_position() {
        let ranked = rank_results(vec![
            result("a", Some(9.0)),
            result("b", Some(9.0)),
            result("c", Some(9.0)),
            result("d", Some(9.5)),
            result("e", Some(10.0)),
        ]);
        assert_eq!(ranks(&ranked), [Some(1), Some(1), Some(1), Some(4), Some(5)]);
    }
}

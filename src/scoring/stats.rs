use crate::output::formatter::format_time;
use crate::scoring::policy::{EventPolicy, ValueFormat};
use crate::scoring::ranking::ContestantResult;

/// One extreme (best or worst) of an event's scored results.
#[derive(Debug, Clone)]
pub struct StatEntry {
    pub value: f64,
    pub display: String,
    pub name: String,
}

/// Aggregate statistics over an event's scored results.
#[derive(Debug, Clone)]
pub struct EventStats {
    pub participants: usize,
    /// Results with a countable value.
    pub finished: usize,
    pub best: Option<StatEntry>,
    pub worst: Option<StatEntry>,
    pub mean: Option<f64>,
    pub mean_display: Option<String>,
}

/// Compute event statistics over already-scored results.
pub fn event_stats(results: &[ContestantResult], policy: &EventPolicy) -> EventStats {
    let moves = policy.format == ValueFormat::Moves;
    let finished: Vec<&ContestantResult> =
        results.iter().filter(|r| r.value.is_some()).collect();

    if finished.is_empty() {
        return EventStats {
            participants: results.len(),
            finished: 0,
            best: None,
            worst: None,
            mean: None,
            mean_display: None,
        };
    }

    let best = finished
        .iter()
        .min_by(|a, b| a.value.partial_cmp(&b.value).unwrap_or(std::cmp::Ordering::Equal))
        .map(|r| stat_entry(r));
    let worst = finished
        .iter()
        .max_by(|a, b| a.value.partial_cmp(&b.value).unwrap_or(std::cmp::Ordering::Equal))
        .map(|r| stat_entry(r));

    let sum: f64 = finished.iter().filter_map(|r| r.value).sum();
    let mean = sum / finished.len() as f64;

    EventStats {
        participants: results.len(),
        finished: finished.len(),
        best,
        worst,
        mean: Some(mean),
        mean_display: Some(format_time(Some(mean), moves)),
    }
}

fn stat_entry(result: &ContestantResult) -> StatEntry {
    StatEntry {
        value: result.value.unwrap_or_default(),
        display: result.display.clone(),
        name: result.name.clone(),
    }
}

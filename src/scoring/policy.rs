use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// How a set of attempts is reduced to one ranked result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ScoringMethod {
    /// Best single attempt.
    Single,
    /// Plain mean of all attempts; any DNF makes the mean DNF.
    MeanOf3,
    /// Drop best and worst, mean the middle three.
    AverageOf5,
    /// Ranked by best single, with the mean shown alongside (blind events).
    SingleWithMean,
}

/// How attempt values are entered and displayed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ValueFormat {
    /// Seconds with centiseconds (sub-minute solves).
    Standard,
    /// Times that routinely exceed a minute.
    Extended,
    /// Move counts, not times (fewest moves).
    Moves,
}

/// Scoring rules for one event.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct EventPolicy {
    /// Expected number of attempts per contestant.
    pub attempts: u32,
    pub method: ScoringMethod,
    pub format: ValueFormat,
}

impl EventPolicy {
    pub fn new(attempts: u32, method: ScoringMethod, format: ValueFormat) -> Self {
        Self { attempts, method, format }
    }
}

/// Maps event names to their scoring policies.
///
/// Lookups never fail: unknown events fall back to the default policy
/// (5 attempts, average of 5, standard times). Callers that want strict
/// validation should check [`EventRegistry::is_known`] first.
#[derive(Debug, Clone)]
pub struct EventRegistry {
    events: BTreeMap<String, EventPolicy>,
    fallback: EventPolicy,
}

impl Default for EventRegistry {
    fn default() -> Self {
        use ScoringMethod::*;
        use ValueFormat::*;

        let table: &[(&str, u32, ScoringMethod, ValueFormat)] = &[
            ("2x2", 5, AverageOf5, Standard),
            ("3x3", 5, AverageOf5, Standard),
            ("3x3-oh", 5, AverageOf5, Standard),
            ("4x4", 5, AverageOf5, Extended),
            ("5x5", 5, AverageOf5, Extended),
            ("6x6", 3, MeanOf3, Extended),
            ("7x7", 3, MeanOf3, Extended),
            ("3x3-blind", 3, SingleWithMean, Extended),
            ("4x4-blind", 3, SingleWithMean, Extended),
            ("5x5-blind", 3, SingleWithMean, Extended),
            ("fmc", 3, MeanOf3, Moves),
            ("clock", 5, AverageOf5, Standard),
            ("megaminx", 5, AverageOf5, Extended),
            ("pyraminx", 5, AverageOf5, Standard),
            ("skewb", 5, AverageOf5, Standard),
            ("sq1", 5, AverageOf5, Standard),
        ];

        let events = table
            .iter()
            .map(|&(name, attempts, method, format)| {
                (name.to_string(), EventPolicy::new(attempts, method, format))
            })
            .collect();

        Self {
            events,
            fallback: EventPolicy::new(5, AverageOf5, Standard),
        }
    }
}

impl EventRegistry {
    /// Policy for `event`, or the default policy if the event is unknown.
    pub fn policy(&self, event: &str) -> EventPolicy {
        self.events.get(event).copied().unwrap_or(self.fallback)
    }

    /// Whether `event` has an explicit entry (the lookup itself never fails).
    pub fn is_known(&self, event: &str) -> bool {
        self.events.contains_key(event)
    }

    /// Known event names, sorted.
    pub fn names(&self) -> Vec<&str> {
        self.events.keys().map(String::as_str).collect()
    }

    /// Add or replace an event's policy.
    pub fn set(&mut self, event: impl Into<String>, policy: EventPolicy) {
        self.events.insert(event.into(), policy);
    }

    /// Move-count events record counts, not times, so DNF does not apply.
    pub fn allows_dnf(&self, event: &str) -> bool {
        self.policy(event).format != ValueFormat::Moves
    }

    /// +2 penalties apply to timed, non-blind events only.
    pub fn allows_plus2(&self, event: &str) -> bool {
        let policy = self.policy(event);
        policy.format != ValueFormat::Moves && policy.method != ScoringMethod::SingleWithMean
    }
}

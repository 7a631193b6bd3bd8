use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A weekly contest document: one file, several events.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Contest {
    pub title: String,
    /// Club convention, e.g. "2025.08.10".
    #[serde(default)]
    pub date: Option<String>,
    pub events: Vec<EventResults>,
}

impl Contest {
    /// The entries submitted for `event`, if the contest ran it.
    pub fn event(&self, event: &str) -> Option<&EventResults> {
        self.events.iter().find(|e| e.event == event)
    }

    pub fn event_names(&self) -> Vec<&str> {
        self.events.iter().map(|e| e.event.as_str()).collect()
    }
}

/// All submissions for one event of a contest.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct EventResults {
    pub event: String,
    #[serde(default)]
    pub entries: Vec<ContestEntry>,
}

impl EventResults {
    /// Entries for one round, keeping submission order.
    pub fn round(&self, round: u32) -> Vec<&ContestEntry> {
        self.entries.iter().filter(|e| e.round == round).collect()
    }

    /// Rounds present in this event, ascending and deduplicated.
    pub fn rounds(&self) -> Vec<u32> {
        let mut rounds: Vec<u32> = self.entries.iter().map(|e| e.round).collect();
        rounds.sort_unstable();
        rounds.dedup();
        rounds
    }
}

/// One contestant's submission: raw attempt strings plus metadata.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ContestEntry {
    pub name: String,
    #[serde(default = "default_round")]
    pub round: u32,
    pub times: Vec<String>,
    #[serde(default)]
    pub submitted_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub submitted_by: Option<String>,
}

fn default_round() -> u32 {
    1
}

/// A standing school record for one event.
///
/// `single` and `average` are stored in display notation; at most one is
/// normally set per record row.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Record {
    pub event: String,
    pub name: String,
    #[serde(default)]
    pub grade: Option<String>,
    pub date: String,
    pub competition: String,
    #[serde(default)]
    pub single: Option<String>,
    #[serde(default)]
    pub average: Option<String>,
}

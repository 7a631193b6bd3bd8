pub mod types;

pub use types::{Contest, ContestEntry, EventResults, Record};

use anyhow::{Context, Result};
use std::fs;
use std::path::Path;

/// Load a contest document from a JSON file.
pub fn load_contest(path: &Path) -> Result<Contest> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read contest file at {}", path.display()))?;
    let contest: Contest = serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse contest file at {}", path.display()))?;
    Ok(contest)
}

/// Load school records from a JSON file.
pub fn load_records(path: &Path) -> Result<Vec<Record>> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read records file at {}", path.display()))?;
    let records: Vec<Record> = serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse records file at {}", path.display()))?;
    Ok(records)
}

use anyhow::{bail, Result};
use once_cell::sync::Lazy;
use regex::Regex;

use crate::output::formatter::format_time;

/// Fixed time penalty added to an attempt marked with a trailing `+`.
pub const PLUS2_PENALTY: f64 = 2.0;

static SECONDS_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\d+\.?\d*$").unwrap());
static MIN_SEC_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^(\d+):(\d+(?:\.\d+)?)$").unwrap());
static HOUR_MIN_SEC_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(\d+):(\d+):(\d+(?:\.\d+)?)$").unwrap());

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttemptStatus {
    Normal,
    /// Valid solve with the fixed +2 penalty applied.
    Plus2,
    /// Did not finish; carries no countable value.
    Dnf,
}

/// One submitted attempt, normalized.
///
/// `value` is seconds for timed events and a count for move-count events.
/// `value` is `None` exactly when `status` is [`AttemptStatus::Dnf`].
#[derive(Debug, Clone, PartialEq)]
pub struct Attempt {
    pub raw: String,
    pub value: Option<f64>,
    pub status: AttemptStatus,
    pub display: String,
}

impl Attempt {
    pub fn is_dnf(&self) -> bool {
        self.status == AttemptStatus::Dnf
    }
}

/// Parse one attempt entry.
///
/// Accepted, case-insensitive: `DNF`, plain seconds (`5.89`), minute:second
/// (`1:23.45`), hour:minute:second (`1:02:03.45`), bare move counts (`25`),
/// each optionally with a trailing `+` for the 2-second penalty.
///
/// `moves_format` affects only how `display` is rendered; the grammar is the
/// same for every event.
pub fn parse_attempt(raw: &str, moves_format: bool) -> Result<Attempt> {
    let trimmed = raw.trim().to_ascii_uppercase();
    if trimmed.is_empty() {
        bail!("attempt must not be empty");
    }

    if trimmed == "DNF" {
        return Ok(Attempt {
            raw: raw.to_string(),
            value: None,
            status: AttemptStatus::Dnf,
            display: "DNF".to_string(),
        });
    }

    let (base, penalized) = match trimmed.strip_suffix('+') {
        Some(base) => (base, true),
        None => (trimmed.as_str(), false),
    };

    let seconds = parse_value(base)?;

    if penalized {
        let total = seconds + PLUS2_PENALTY;
        Ok(Attempt {
            raw: raw.to_string(),
            value: Some(total),
            status: AttemptStatus::Plus2,
            display: format!("{}+", format_time(Some(total), moves_format)),
        })
    } else {
        Ok(Attempt {
            raw: raw.to_string(),
            value: Some(seconds),
            status: AttemptStatus::Normal,
            display: format_time(Some(seconds), moves_format),
        })
    }
}

/// Parse the numeric part of an attempt (no DNF, no penalty marker).
fn parse_value(s: &str) -> Result<f64> {
    if s.is_empty() {
        bail!("attempt must not be empty");
    }

    // Plain seconds, which also covers bare move counts.
    if SECONDS_RE.is_match(s) {
        return Ok(s.parse::<f64>()?);
    }

    if let Some(caps) = MIN_SEC_RE.captures(s) {
        let minutes: f64 = caps[1].parse()?;
        let seconds: f64 = caps[2].parse()?;
        if seconds >= 60.0 {
            bail!("seconds must be below 60 in minute:second times: {}", s);
        }
        return Ok(minutes * 60.0 + seconds);
    }

    if let Some(caps) = HOUR_MIN_SEC_RE.captures(s) {
        let hours: f64 = caps[1].parse()?;
        let minutes: f64 = caps[2].parse()?;
        let seconds: f64 = caps[3].parse()?;
        if minutes >= 60.0 || seconds >= 60.0 {
            bail!("minutes and seconds must be below 60 in hour:minute:second times: {}", s);
        }
        return Ok(hours * 3600.0 + minutes * 60.0 + seconds);
    }

    bail!("unrecognized attempt format: {}", s)
}

use std::io::IsTerminal;

use owo_colors::OwoColorize;
use terminal_size::{terminal_size, Width};

use crate::contest::types::Record;
use crate::scoring::ranking::RankedResult;
use crate::scoring::stats::EventStats;

/// Render a scored value in the event's display convention.
///
/// `None` means no countable result and renders as "-". A positive
/// non-finite value is the forced-DNF sentinel some call sites use.
/// Times render as "S.ss", "M:SS.ss" or "H:MM:SS.ss"; move counts render
/// without decimals unless the value is an averaged (fractional) count.
pub fn format_time(value: Option<f64>, moves_format: bool) -> String {
    let value = match value {
        Some(v) => v,
        None => return "-".to_string(),
    };

    if value.is_infinite() && value > 0.0 {
        return "DNF".to_string();
    }

    if moves_format {
        return if value.fract() == 0.0 {
            format!("{}", value as i64)
        } else {
            format!("{:.2}", value)
        };
    }

    if value < 0.0 {
        return "-".to_string();
    }

    if value < 60.0 {
        return format!("{:.2}", value);
    }

    if value < 3600.0 {
        let minutes = (value / 60.0).floor() as u64;
        let seconds = value % 60.0;
        return format!("{}:{:05.2}", minutes, seconds);
    }

    let hours = (value / 3600.0).floor() as u64;
    let minutes = ((value % 3600.0) / 60.0).floor() as u64;
    let seconds = value % 60.0;
    format!("{}:{:02}:{:05.2}", hours, minutes, seconds)
}

/// Check if stdout is a TTY (for auto-detecting color support)
pub fn should_use_colors() -> bool {
    std::io::stdout().is_terminal()
}

/// Get terminal width, defaulting to None for pipes (unlimited)
fn get_terminal_width() -> Option<usize> {
    terminal_size().map(|(Width(w), _)| w as usize)
}

/// Truncate a contestant name to fit available width, accounting for Unicode
fn truncate_name(name: &str, max_width: usize) -> String {
    let chars: Vec<char> = name.chars().collect();
    if chars.len() <= max_width {
        name.to_string()
    } else if max_width > 3 {
        format!("{}...", chars[..max_width - 3].iter().collect::<String>())
    } else {
        chars[..max_width].iter().collect()
    }
}

/// Width of the widest cell in a column, floored at the header width.
fn column_width<'a>(header: &str, cells: impl Iterator<Item = &'a str>) -> usize {
    cells
        .map(|c| c.chars().count())
        .chain(std::iter::once(header.chars().count()))
        .max()
        .unwrap_or(0)
}

/// Format ranked results as a table: Rank, Name, attempt columns, Result
/// (and the mean alongside for events that carry a secondary value).
pub fn format_ranked_table(results: &[RankedResult], attempts: u32, use_colors: bool) -> String {
    if results.is_empty() {
        return "No results submitted.".to_string();
    }

    let term_width = get_terminal_width();
    let has_mean = results.iter().any(|r| r.result.secondary_display.is_some());

    // Rank column: 4 chars fits "99."; result column sized to content.
    let rank_width = 4;
    let result_width = column_width("Result", results.iter().map(|r| r.result.display.as_str()));
    let attempt_width = results
        .iter()
        .flat_map(|r| r.result.attempts.iter())
        .map(|a| a.display.chars().count())
        .max()
        .unwrap_or(5)
        .max(5);

    // Whatever the terminal leaves after the fixed columns goes to the name.
    let fixed = rank_width + 2 + result_width + 2 + (attempt_width + 2) * attempts as usize;
    let name_width = match term_width {
        Some(w) if w > fixed + 12 => (w - fixed).min(24),
        Some(_) => 12,
        None => 24,
    };

    let mut lines = Vec::with_capacity(results.len());
    for ranked in results {
        let rank_str = match ranked.rank {
            Some(rank) => format!("{:>3}.", rank),
            None => format!("{:>4}", "-"),
        };
        let name = format!(
            "{:<width$}",
            truncate_name(&ranked.result.name, name_width),
            width = name_width
        );

        let mut attempt_cells = Vec::with_capacity(attempts as usize);
        for i in 0..attempts as usize {
            let cell = ranked
                .result
                .attempts
                .get(i)
                .map(|a| a.display.as_str())
                .unwrap_or("");
            attempt_cells.push(format!("{:>width$}", cell, width = attempt_width));
        }
        let attempts_str = attempt_cells.join("  ");

        let result_str = format!("{:>width$}", ranked.result.display, width = result_width);
        let mean_str = match &ranked.result.secondary_display {
            Some(mean) if has_mean => format!("  ({})", mean),
            _ => String::new(),
        };

        let line = if use_colors {
            format!(
                "{} {}  {}  {}{}",
                rank_str.dimmed(),
                name.yellow(),
                attempts_str,
                result_str.bold(),
                mean_str.dimmed(),
            )
        } else {
            format!("{} {}  {}  {}{}", rank_str, name, attempts_str, result_str, mean_str)
        };
        lines.push(line);
    }

    lines.join("\n")
}

/// Format ranked results as CSV: rank, name, round, one column per attempt,
/// final result. Cells are quoted.
pub fn format_csv(results: &[RankedResult], attempts: u32) -> String {
    let mut headers = vec!["Rank".to_string(), "Name".to_string(), "Round".to_string()];
    for i in 1..=attempts {
        headers.push(format!("Attempt {}", i));
    }
    headers.push("Result".to_string());

    let mut rows = vec![headers];
    for ranked in results {
        let mut row = vec![
            ranked
                .rank
                .map(|r| r.to_string())
                .unwrap_or_else(|| "-".to_string()),
            ranked.result.name.clone(),
            ranked.result.round.to_string(),
        ];
        for i in 0..attempts as usize {
            row.push(
                ranked
                    .result
                    .attempts
                    .get(i)
                    .map(|a| a.display.clone())
                    .unwrap_or_default(),
            );
        }
        row.push(ranked.result.display.clone());
        rows.push(row);
    }

    rows.iter()
        .map(|row| {
            row.iter()
                .map(|cell| format!("\"{}\"", cell))
                .collect::<Vec<_>>()
                .join(",")
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Format school records as a table, one line per record.
pub fn format_records_table(records: &[Record], use_colors: bool) -> String {
    if records.is_empty() {
        return "No records.".to_string();
    }

    let event_width = column_width("Event", records.iter().map(|r| r.event.as_str()));
    let name_width = column_width("Name", records.iter().map(|r| r.name.as_str()));
    let grade_width =
        column_width("Grade", records.iter().map(|r| r.grade.as_deref().unwrap_or("")));
    let single_width =
        column_width("Single", records.iter().map(|r| r.single.as_deref().unwrap_or("")));
    let average_width =
        column_width("Average", records.iter().map(|r| r.average.as_deref().unwrap_or("")));

    let mut lines = Vec::with_capacity(records.len());
    for record in records {
        let event = format!("{:<width$}", record.event, width = event_width);
        let name = format!("{:<width$}", record.name, width = name_width);
        let grade =
            format!("{:<width$}", record.grade.as_deref().unwrap_or(""), width = grade_width);
        let single =
            format!("{:>width$}", record.single.as_deref().unwrap_or(""), width = single_width);
        let average =
            format!("{:>width$}", record.average.as_deref().unwrap_or(""), width = average_width);
        let line = if use_colors {
            format!(
                "{}  {}  {}  {}  {}  {}  {}",
                event.cyan(),
                name.yellow(),
                grade,
                single.bold(),
                average.bold(),
                record.date,
                record.competition.dimmed(),
            )
        } else {
            format!(
                "{}  {}  {}  {}  {}  {}  {}",
                event, name, grade, single, average, record.date, record.competition
            )
        };
        lines.push(line);
    }

    lines.join("\n")
}

/// Format event statistics as a short block.
pub fn format_stats(stats: &EventStats, use_colors: bool) -> String {
    let mut lines = vec![
        format!("Participants: {}", stats.participants),
        format!("Finished:     {}", stats.finished),
    ];

    if let Some(best) = &stats.best {
        let line = if use_colors {
            format!("Best:         {} ({})", best.display.bold(), best.name)
        } else {
            format!("Best:         {} ({})", best.display, best.name)
        };
        lines.push(line);
    }
    if let Some(worst) = &stats.worst {
        lines.push(format!("Worst:        {} ({})", worst.display, worst.name));
    }
    if let Some(mean) = &stats.mean_display {
        lines.push(format!("Mean:         {}", mean));
    }

    lines.join("\n")
}

pub mod formatter;

pub use formatter::{
    format_csv, format_ranked_table, format_records_table, format_stats, format_time,
    should_use_colors,
};

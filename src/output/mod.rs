pub mod export;
pub mod formatter;

pub use export::{default_export_path, export_csv, write_csv};
pub use formatter::{
    format_breakdown, format_json, format_scored_table, format_tsv, lead_label,
    should_use_colors,
};

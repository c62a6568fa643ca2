pub mod formatter;
pub mod report;

pub use formatter::{
    format_comparison_table, format_price, format_property, format_result_detail, format_score,
    format_tsv, should_use_colors,
};
pub use report::{write_report, ValuationReport};

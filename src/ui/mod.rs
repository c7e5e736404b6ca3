pub mod output;
pub mod progress;
pub mod table;

pub use output::{dim, error, header, info, section, status, success, theme, timing, warn, Icons, Theme};
pub use table::{results_table, stats_table};

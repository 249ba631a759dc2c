//! Loader for three-column scaling tables.

pub mod parse;
pub mod row;

pub use parse::{LoadError, parse_table_file, parse_table_str};
pub use row::{ScalingRecord, ScalingRow};

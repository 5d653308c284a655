//! Miscellaneous utilities.

pub mod data_parsers;

pub use data_parsers::{parse_real, parse_year_month};

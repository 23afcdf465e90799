// src/data_input/mod.rs

pub mod log_data;
pub mod log_parser;
pub mod timezone;

pub use log_data::{LogRowData, LogTable};
pub use log_parser::parse_log_file;

// src/process/mod.rs
pub mod date_parser;
pub mod number;
pub mod raw_table;

pub use raw_table::{normalize, RawTable, Record};

//! Plain-text rendering of the host table.
//!
//! Each cycle prints a fresh table below the previous one; nothing is
//! cleared or redrawn.
//!
//! ```text
//! # 2026-10-18 09:42:00                          ← timestamp line
//! Host        LoadAvg %CPU(user) ...             ← column headers
//! 2eQGEaLxibb 0.52     10.00 ...                 ← one row per host
//! ```
//!
//! Cell formatting lives in [`crate::data::units`].

pub mod table;

pub use table::{format_timestamp, render_table, TIMESTAMP_FORMAT};

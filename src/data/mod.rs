//! Host records and metric processing.
//!
//! ## Submodules
//!
//! - [`host`]: [`Host`] and its metric groups ([`LoadAverage`], [`Cpu`], [`Memory`], [`Interface`])
//! - [`metrics`]: The fixed [`Metric`] catalogue and the mapping of `mkr fetch` output onto hosts
//! - [`units`]: Fixed-precision and binary-unit formatting for table cells
//!
//! ## Data Flow
//!
//! ```text
//! mkr hosts (JSON array)
//!        │
//!        ▼
//! Vec<Host> (metrics zeroed)
//!        │
//!        ├◀── mkr fetch (serde_json::Value)
//!        ▼
//! MetricCatalog::apply()
//!        │
//!        ▼
//! Vec<Host> (metrics filled) ──▶ ui::render_table()
//! ```

pub mod host;
pub mod metrics;
pub mod units;

pub use host::{Cpu, Host, Interface, LoadAverage, Memory};
pub use metrics::{Metric, MetricCatalog, DEFAULT_INTERFACE};

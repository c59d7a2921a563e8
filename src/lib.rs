//! # mkr-top
//!
//! A `top`-like view of the hosts in a Mackerel service/role, built on the
//! `mkr` command-line tool.
//!
//! Every few seconds the hosts of a service/role pair are listed with
//! `mkr hosts`, their load, CPU, memory and network metrics are fetched with
//! `mkr fetch`, and a timestamped table is printed to standard output.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                           Poller                            │
//! │  ┌─────────┐    ┌──────────┐    ┌─────────┐    ┌─────────┐ │
//! │  │ source  │───▶│   data   │───▶│   ui    │───▶│ stdout  │ │
//! │  │ (mkr)   │    │(mapping) │    │ (table) │    │         │ │
//! │  └────┬────┘    └──────────┘    └─────────┘    └─────────┘ │
//! │       │                                                     │
//! │       ▼                                                     │
//! │  CommandRunner ◀── ProcessRunner | ScriptedRunner           │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! - **[`app`]**: The [`Poller`] loop and its [`State`]
//! - **[`source`]**: The [`CommandRunner`] trait, its implementations, and
//!   [`MkrClient`] which builds the `mkr` invocations
//! - **[`data`]**: [`Host`] records, the fixed [`Metric`] catalogue, and unit formatting
//! - **[`ui`]**: Plain-text table rendering
//! - **[`config`]**: [`Settings`] assembled from command-line flags
//! - **[`error`]**: [`PollError`]
//!
//! ## Usage
//!
//! ### As a CLI tool
//!
//! ```bash
//! # Refresh every 5 seconds
//! mkr-top -s blog -r app
//!
//! # Every 10 seconds, for the ens5 interface
//! mkr-top -s blog -r db -i 10 --interface ens5
//! ```
//!
//! ### As a library
//!
//! ```
//! use mkr_top::{Poller, ScriptedRunner, Settings};
//!
//! # tokio_test::block_on(async {
//! let runner = ScriptedRunner::new()
//!     .with_stdout(r#"[{"id":"h1","name":"web1","isRetired":false}]"#)
//!     .with_stdout(r#"{"h1":{"loadavg5":{"value":0.5}}}"#);
//!
//! let mut poller = Poller::new(runner, Settings::new("blog", "app").with_once(true));
//! let mut out = Vec::<u8>::new();
//! poller.run(&mut out).await.unwrap();
//!
//! let table = String::from_utf8(out).unwrap();
//! assert!(table.lines().any(|line| line.starts_with("h1 0.50")));
//! # });
//! ```

pub mod app;
pub mod config;
pub mod data;
pub mod error;
pub mod source;
pub mod ui;

// Re-export main types for convenience
pub use app::{Poller, State};
pub use config::Settings;
pub use data::{Cpu, Host, Interface, LoadAverage, Memory, Metric, MetricCatalog};
pub use error::PollError;
pub use source::{CommandRunner, Invocation, MkrClient, ProcessRunner, ScriptedRunner};

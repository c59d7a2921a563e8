//! Host records and their metric groups.

use serde::Deserialize;

/// A host returned by `mkr hosts`, plus the metrics fetched for it.
///
/// Only `id`, `name` and `isRetired` are read from the inventory output;
/// the metric groups start at zero and are filled in by
/// [`MetricCatalog::apply`](super::MetricCatalog::apply). A fresh set of
/// hosts is decoded every cycle.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Host {
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub is_retired: bool,

    #[serde(skip)]
    pub load: LoadAverage,
    #[serde(skip)]
    pub cpu: Cpu,
    #[serde(skip)]
    pub memory: Memory,
    #[serde(skip)]
    pub interface: Interface,
}

impl Host {
    /// Create a host with zeroed metrics.
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            ..Self::default()
        }
    }

    /// Mark the host as retired.
    pub fn retired(mut self) -> Self {
        self.is_retired = true;
        self
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct LoadAverage {
    /// Five-minute load average.
    pub avg5: f64,
}

/// CPU time breakdown in percent.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Cpu {
    pub user: f64,
    pub nice: f64,
    pub system: f64,
    pub irq: f64,
    pub soft_irq: f64,
    pub io_wait: f64,
    pub steal: f64,
    pub guest: f64,
    pub idle: f64,
}

/// Memory breakdown in bytes.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Memory {
    pub used: f64,
    pub buffers: f64,
    pub cached: f64,
    pub total: f64,
    pub free: f64,
}

/// Bytes received/transmitted on one interface during the last interval.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Interface {
    pub rx_bytes: f64,
    pub tx_bytes: f64,
}

//! The fixed metric catalogue and the mapping from `mkr fetch` output onto
//! [`Host`] fields.
//!
//! `mkr fetch` prints an object keyed by host id, each holding an object
//! keyed by metric name:
//!
//! ```text
//! {
//!   "2eQGEaLxibb": {
//!     "loadavg5": { "time": 1435000000, "value": 0.52 },
//!     "memory.used": { "time": 1435000000, "value": 1234567 },
//!     ...
//!   }
//! }
//! ```
//!
//! The top-level keys are dynamic, so the response is kept as a
//! [`serde_json::Value`] and walked here instead of being decoded into a
//! struct.

use serde_json::Value;
use tracing::debug;

use super::host::Host;

/// Interface whose traffic is fetched when none is configured.
pub const DEFAULT_INTERFACE: &str = "eth0";

/// One of the metrics requested for every host.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Metric {
    LoadAvg5,
    CpuUser,
    CpuNice,
    CpuSystem,
    CpuIrq,
    CpuSoftIrq,
    CpuIoWait,
    CpuSteal,
    CpuGuest,
    CpuIdle,
    MemoryUsed,
    MemoryBuffers,
    MemoryCached,
    MemoryTotal,
    MemoryFree,
    InterfaceRx,
    InterfaceTx,
}

impl Metric {
    /// Every metric, in the order they are requested.
    pub const ALL: [Metric; 17] = [
        Metric::LoadAvg5,
        Metric::CpuUser,
        Metric::CpuNice,
        Metric::CpuSystem,
        Metric::CpuIrq,
        Metric::CpuSoftIrq,
        Metric::CpuIoWait,
        Metric::CpuSteal,
        Metric::CpuGuest,
        Metric::CpuIdle,
        Metric::MemoryUsed,
        Metric::MemoryBuffers,
        Metric::MemoryCached,
        Metric::MemoryTotal,
        Metric::MemoryFree,
        Metric::InterfaceRx,
        Metric::InterfaceTx,
    ];

    /// Metric name as understood by `mkr fetch -n`.
    pub fn name(self, interface: &str) -> String {
        let fixed = match self {
            Metric::LoadAvg5 => "loadavg5",
            Metric::CpuUser => "cpu.user.percentage",
            Metric::CpuNice => "cpu.nice.percentage",
            Metric::CpuSystem => "cpu.system.percentage",
            Metric::CpuIrq => "cpu.irq.percentage",
            Metric::CpuSoftIrq => "cpu.softirq.percentage",
            Metric::CpuIoWait => "cpu.iowait.percentage",
            Metric::CpuSteal => "cpu.steal.percentage",
            Metric::CpuGuest => "cpu.guest.percentage",
            Metric::CpuIdle => "cpu.idle.percentage",
            Metric::MemoryUsed => "memory.used",
            Metric::MemoryBuffers => "memory.buffers",
            Metric::MemoryCached => "memory.cached",
            Metric::MemoryTotal => "memory.total",
            Metric::MemoryFree => "memory.free",
            Metric::InterfaceRx => return format!("interface.{}.rxBytes.delta", interface),
            Metric::InterfaceTx => return format!("interface.{}.txBytes.delta", interface),
        };
        fixed.to_string()
    }

    /// The host field this metric is stored in.
    fn slot(self, host: &mut Host) -> &mut f64 {
        match self {
            Metric::LoadAvg5 => &mut host.load.avg5,
            Metric::CpuUser => &mut host.cpu.user,
            Metric::CpuNice => &mut host.cpu.nice,
            Metric::CpuSystem => &mut host.cpu.system,
            Metric::CpuIrq => &mut host.cpu.irq,
            Metric::CpuSoftIrq => &mut host.cpu.soft_irq,
            Metric::CpuIoWait => &mut host.cpu.io_wait,
            Metric::CpuSteal => &mut host.cpu.steal,
            Metric::CpuGuest => &mut host.cpu.guest,
            Metric::CpuIdle => &mut host.cpu.idle,
            Metric::MemoryUsed => &mut host.memory.used,
            Metric::MemoryBuffers => &mut host.memory.buffers,
            Metric::MemoryCached => &mut host.memory.cached,
            Metric::MemoryTotal => &mut host.memory.total,
            Metric::MemoryFree => &mut host.memory.free,
            Metric::InterfaceRx => &mut host.interface.rx_bytes,
            Metric::InterfaceTx => &mut host.interface.tx_bytes,
        }
    }
}

/// The metric names to request, bound to one network interface.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MetricCatalog {
    interface: String,
}

impl Default for MetricCatalog {
    fn default() -> Self {
        Self::new(DEFAULT_INTERFACE)
    }
}

impl MetricCatalog {
    pub fn new(interface: impl Into<String>) -> Self {
        Self {
            interface: interface.into(),
        }
    }

    /// The network interface traffic is read from.
    pub fn interface(&self) -> &str {
        &self.interface
    }

    /// All metric names, in request order.
    pub fn names(&self) -> Vec<String> {
        Metric::ALL.iter().map(|m| m.name(&self.interface)).collect()
    }

    /// Copy metric values from a `mkr fetch` response onto `hosts`.
    ///
    /// Hosts missing from the response, or whose entry is not an object,
    /// are left untouched. A metric that is missing or has no numeric
    /// `value` is skipped the same way; this never fails.
    pub fn apply(&self, hosts: &mut [Host], response: &Value) {
        for host in hosts.iter_mut() {
            let Some(entry) = response.get(&host.id).and_then(Value::as_object) else {
                debug!(host = %host.id, "no metrics returned for host");
                continue;
            };

            for metric in Metric::ALL {
                let name = metric.name(&self.interface);
                match entry.get(&name).and_then(|m| m.get("value")).and_then(Value::as_f64) {
                    Some(value) => *metric.slot(host) = value,
                    None => debug!(host = %host.id, metric = %name, "metric missing or not numeric"),
                }
            }
        }
    }
}

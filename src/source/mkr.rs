//! `mkr hosts` and `mkr fetch` invocations.

use serde_json::Value;
use tracing::debug;

use super::{run_json, CommandRunner};
use crate::data::Host;
use crate::error::PollError;

/// Executable invoked when none is configured.
pub const DEFAULT_PROGRAM: &str = "mkr";

/// Arguments for listing the hosts of a service/role pair.
pub fn hosts_args(service: &str, role: &str) -> Vec<String> {
    ["hosts", "--service", service, "--role", role]
        .iter()
        .map(|s| s.to_string())
        .collect()
}

/// Arguments for fetching `metrics` for every non-retired host.
///
/// Produces `fetch -n <m1> -n <m2> ... <id1> <id2> ...`.
pub fn fetch_args(hosts: &[Host], metrics: &[String]) -> Vec<String> {
    let mut args = vec!["fetch".to_string()];
    for metric in metrics {
        args.push("-n".to_string());
        args.push(metric.clone());
    }
    args.extend(hosts.iter().filter(|h| !h.is_retired).map(|h| h.id.clone()));
    args
}

/// Client for the `mkr` command-line tool.
#[derive(Debug)]
pub struct MkrClient<R> {
    runner: R,
    program: String,
}

impl<R: CommandRunner> MkrClient<R> {
    pub fn new(runner: R, program: impl Into<String>) -> Self {
        Self {
            runner,
            program: program.into(),
        }
    }

    /// The executable being invoked.
    pub fn program(&self) -> &str {
        &self.program
    }

    pub fn runner(&self) -> &R {
        &self.runner
    }

    /// List the hosts of `service`/`role`, with metrics zeroed.
    pub async fn hosts(&self, service: &str, role: &str) -> Result<Vec<Host>, PollError> {
        let hosts: Vec<Host> =
            run_json(&self.runner, &self.program, &hosts_args(service, role)).await?;
        debug!(service, role, count = hosts.len(), "listed hosts");
        Ok(hosts)
    }

    /// Fetch the latest value of each of `metrics` for the active `hosts`.
    ///
    /// The response is returned undecoded because its keys are host ids.
    /// If every host is retired nothing is run and an empty object is
    /// returned, so every row renders with zeroed metrics.
    pub async fn fetch(&self, hosts: &[Host], metrics: &[String]) -> Result<Value, PollError> {
        let active = hosts.iter().filter(|h| !h.is_retired).count();
        if active == 0 {
            debug!("all hosts retired, skipping fetch");
            return Ok(Value::Object(Default::default()));
        }

        let response = run_json(&self.runner, &self.program, &fetch_args(hosts, metrics)).await?;
        debug!(hosts = active, metrics = metrics.len(), "fetched metrics");
        Ok(response)
    }
}

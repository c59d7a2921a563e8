//! The poll loop: list hosts, fetch metrics, render, sleep, repeat.

use std::io::Write;

use chrono::Local;
use tracing::{debug, error, info, warn};

use crate::config::Settings;
use crate::data::{Host, MetricCatalog};
use crate::error::PollError;
use crate::source::{CommandRunner, MkrClient};
use crate::ui::render_table;

/// Where the poll loop is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum State {
    /// Cycles are still being run.
    Polling,
    /// The loop has stopped, either on an error or after `--once`.
    Terminated,
}

/// Drives the list → fetch → map → render cycle.
///
/// Hosts are rebuilt from scratch every cycle; nothing is carried over.
#[derive(Debug)]
pub struct Poller<R> {
    client: MkrClient<R>,
    catalog: MetricCatalog,
    metric_names: Vec<String>,
    settings: Settings,
    state: State,
    cycles: u64,
}

impl<R: CommandRunner> Poller<R> {
    /// Create a poller that runs commands through `runner`.
    pub fn new(runner: R, settings: Settings) -> Self {
        let catalog = MetricCatalog::new(settings.interface.clone());
        let metric_names = catalog.names();
        Self {
            client: MkrClient::new(runner, settings.program.clone()),
            catalog,
            metric_names,
            settings,
            state: State::Polling,
            cycles: 0,
        }
    }

    pub fn state(&self) -> State {
        self.state
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Number of cycles rendered so far.
    pub fn cycles(&self) -> u64 {
        self.cycles
    }

    pub fn runner(&self) -> &R {
        self.client.runner()
    }

    /// List the hosts and fill in their metrics.
    ///
    /// Fails with [`PollError::NoHosts`] when the inventory is empty, in
    /// which case no fetch is attempted.
    pub async fn collect(&self) -> Result<Vec<Host>, PollError> {
        let Settings { service, role, .. } = &self.settings;

        let mut hosts = self.client.hosts(service, role).await?;
        if hosts.is_empty() {
            warn!(service = %service, role = %role, "inventory returned no hosts");
            return Err(PollError::NoHosts {
                service: service.clone(),
                role: role.clone(),
            });
        }

        let response = self.client.fetch(&hosts, &self.metric_names).await?;
        self.catalog.apply(&mut hosts, &response);
        Ok(hosts)
    }

    /// Run one cycle and print its table to `out`.
    pub async fn cycle<W: Write + ?Sized>(&mut self, out: &mut W) -> Result<(), PollError> {
        let hosts = self.collect().await?;
        render_table(out, &hosts, &Local::now(), self.catalog.interface())?;
        self.cycles += 1;
        debug!(cycle = self.cycles, hosts = hosts.len(), "rendered");
        Ok(())
    }

    /// Run cycles until one fails, sleeping the configured interval between
    /// them.
    ///
    /// Returns `Ok(())` only in `--once` mode. The first error ends the loop
    /// and is returned as is.
    pub async fn run<W: Write + ?Sized>(&mut self, out: &mut W) -> Result<(), PollError> {
        info!(
            service = %self.settings.service,
            role = %self.settings.role,
            interval = ?self.settings.interval,
            "polling"
        );

        while self.state == State::Polling {
            if let Err(err) = self.cycle(out).await {
                self.state = State::Terminated;
                error!(cycles = self.cycles, error = %err, "poll loop terminated");
                return Err(err);
            }

            if self.settings.once {
                self.state = State::Terminated;
                break;
            }

            tokio::time::sleep(self.settings.interval).await;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::ScriptedRunner;
    use std::time::Duration;

    const ONE_HOST: &str = r#"[{"id":"h1","name":"web1","isRetired":false}]"#;
    const METRICS: &str = r#"{"h1":{"loadavg5":{"value":1.25}}}"#;

    fn poller(runner: ScriptedRunner) -> Poller<ScriptedRunner> {
        Poller::new(runner, Settings::new("blog", "app"))
    }

    #[tokio::test]
    async fn test_empty_host_list_skips_fetch() {
        let mut poller = poller(ScriptedRunner::new().with_stdout("[]"));
        let mut out = Vec::<u8>::new();

        let err = poller.run(&mut out).await.unwrap_err();

        assert!(matches!(err, PollError::NoHosts { .. }));
        assert_eq!(poller.state(), State::Terminated);
        assert_eq!(poller.runner().invocations().len(), 1);
        assert_eq!(poller.runner().invocations()[0].args[0], "hosts");
        assert!(out.is_empty());
    }

    #[tokio::test]
    async fn test_host_listing_failure_terminates() {
        let mut poller = poller(ScriptedRunner::new().with_failure(1, "unauthorized"));
        let err = poller.run(&mut Vec::<u8>::new()).await.unwrap_err();
        assert!(matches!(err, PollError::Exit { .. }));
        assert_eq!(poller.state(), State::Terminated);
        assert_eq!(poller.cycles(), 0);
    }

    #[tokio::test]
    async fn test_fetch_failure_terminates_without_output() {
        let runner = ScriptedRunner::new()
            .with_stdout(ONE_HOST)
            .with_stdout("not json");
        let mut poller = poller(runner);
        let mut out = Vec::<u8>::new();

        let err = poller.run(&mut out).await.unwrap_err();

        assert!(matches!(err, PollError::Decode { .. }));
        assert!(out.is_empty());
    }

    #[tokio::test]
    async fn test_collect_maps_metrics() {
        let poller = poller(ScriptedRunner::new().with_stdout(ONE_HOST).with_stdout(METRICS));
        let hosts = poller.collect().await.unwrap();
        assert_eq!(hosts[0].load.avg5, 1.25);
        assert_eq!(hosts[0].cpu.user, 0.0);

        let fetch = &poller.runner().invocations()[1];
        assert_eq!(fetch.args[0], "fetch");
        assert_eq!(fetch.args.last().map(String::as_str), Some("h1"));
        assert_eq!(fetch.args.iter().filter(|a| *a == "-n").count(), 17);
    }

    #[tokio::test]
    async fn test_once_renders_a_single_table() {
        let runner = ScriptedRunner::new().with_stdout(ONE_HOST).with_stdout(METRICS);
        let mut poller = Poller::new(runner, Settings::new("blog", "app").with_once(true));
        let mut out = Vec::<u8>::new();

        poller.run(&mut out).await.unwrap();

        let output = String::from_utf8(out).unwrap();
        assert!(poller.settings().once);
        assert_eq!(poller.state(), State::Terminated);
        assert_eq!(poller.cycles(), 1);
        assert!(output.lines().any(|l| l.starts_with("h1 1.25")));
    }

    #[tokio::test(start_paused = true)]
    async fn test_sleeps_interval_between_cycles() {
        let runner = ScriptedRunner::new()
            .with_stdout(ONE_HOST)
            .with_stdout(METRICS)
            .with_stdout(ONE_HOST)
            .with_stdout(METRICS);
        let settings = Settings::new("blog", "app").with_interval(Duration::from_secs(7));
        let mut poller = Poller::new(runner, settings);
        let mut out = Vec::<u8>::new();

        let started = tokio::time::Instant::now();
        let err = poller.run(&mut out).await.unwrap_err();

        // third host listing finds the script exhausted
        assert!(matches!(err, PollError::Launch { .. }));
        assert_eq!(poller.cycles(), 2);
        assert_eq!(poller.runner().invocations().len(), 5);
        let elapsed = started.elapsed();
        assert!(elapsed >= Duration::from_secs(14));
        assert!(elapsed < Duration::from_secs(15));

        let output = String::from_utf8(out).unwrap();
        assert_eq!(output.lines().filter(|l| l.starts_with("# ")).count(), 2);
    }

    #[derive(Clone, Default)]
    struct CapturedLogs(std::sync::Arc<parking_lot::Mutex<Vec<u8>>>);

    impl std::io::Write for CapturedLogs {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            self.0.lock().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    impl CapturedLogs {
        fn text(&self) -> String {
            String::from_utf8_lossy(&self.0.lock()).to_string()
        }
    }

    #[tokio::test]
    async fn test_termination_is_logged_at_default_level() {
        use tracing_subscriber::{layer::SubscriberExt, EnvFilter};

        let logs = CapturedLogs::default();
        let writer = logs.clone();
        let subscriber = tracing_subscriber::registry()
            .with(EnvFilter::new("mkr_top=warn"))
            .with(
                tracing_subscriber::fmt::layer()
                    .with_ansi(false)
                    .with_writer(move || writer.clone()),
            );
        let _guard = tracing::subscriber::set_default(subscriber);

        let mut poller = poller(ScriptedRunner::new().with_stdout("[]"));
        let err = poller.run(&mut Vec::<u8>::new()).await.unwrap_err();
        assert!(matches!(err, PollError::NoHosts { .. }));

        let text = logs.text();
        assert!(text.contains("WARN"));
        assert!(text.contains("inventory returned no hosts"));
        assert!(text.contains("ERROR"));
        assert!(text.contains("poll loop terminated"));
        assert!(text.contains("couldn't find hosts in service(blog):role(app)"));
        assert!(!text.contains("polling"));
    }
}

use std::io;
use std::process::ExitCode;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::builder::NonEmptyStringValueParser;
use clap::error::ErrorKind;
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use mkr_top::data::DEFAULT_INTERFACE;
use mkr_top::source::DEFAULT_PROGRAM;
use mkr_top::{Poller, ProcessRunner, Settings};

#[derive(Parser, Debug)]
#[command(name = "mkr-top")]
#[command(about = "Refreshing table of load, CPU, memory and network metrics for a mkr service/role")]
#[command(version)]
struct Args {
    /// The service name (required)
    #[arg(short, long, value_parser = NonEmptyStringValueParser::new())]
    service: String,

    /// The role name (required)
    #[arg(short, long, value_parser = NonEmptyStringValueParser::new())]
    role: String,

    /// The interval in seconds
    #[arg(short, long, default_value = "5", value_parser = clap::value_parser!(u64).range(1..))]
    interval: u64,

    /// The mkr executable to run
    #[arg(long, default_value = DEFAULT_PROGRAM)]
    mkr: String,

    /// Network interface whose traffic is shown
    #[arg(long, default_value = DEFAULT_INTERFACE)]
    interface: String,

    /// Print one table and exit
    #[arg(long)]
    once: bool,

    /// Log more (-v info, -vv debug, -vvv trace); logs go to stderr
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

impl From<Args> for Settings {
    fn from(args: Args) -> Self {
        Settings::new(args.service, args.role)
            .with_interval(Duration::from_secs(args.interval))
            .with_program(args.mkr)
            .with_interface(args.interface)
            .with_once(args.once)
    }
}

fn main() -> ExitCode {
    let args = match Args::try_parse() {
        Ok(args) => args,
        Err(e) if is_informational(&e) => e.exit(),
        Err(e) => {
            // Usage errors exit the same way as runtime failures
            let _ = e.print();
            return ExitCode::FAILURE;
        }
    };

    init_tracing(args.verbose);

    match run(args.into()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{:#}", e);
            ExitCode::FAILURE
        }
    }
}

/// `--help` and `--version` are reported through clap's error type too.
fn is_informational(e: &clap::Error) -> bool {
    matches!(e.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion)
}

fn run(settings: Settings) -> Result<()> {
    // Cycles run one after another; a single-threaded runtime is enough
    let rt = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .context("failed to start runtime")?;

    let mut poller = Poller::new(ProcessRunner::new(), settings);
    let mut stdout = io::stdout().lock();
    rt.block_on(poller.run(&mut stdout))?;
    Ok(())
}

fn init_tracing(verbosity: u8) {
    let level = match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    tracing_subscriber::registry()
        .with(EnvFilter::new(format!("{}={}", env!("CARGO_CRATE_NAME"), level)))
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();
}

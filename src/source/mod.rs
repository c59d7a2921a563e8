//! Command execution abstraction for talking to `mkr`.
//!
//! All data comes from running an external command and reading what it
//! prints. The [`CommandRunner`] trait is the seam: [`ProcessRunner`]
//! spawns real processes, [`ScriptedRunner`] replays canned output for tests
//! and demos, and [`MkrClient`] builds the `mkr hosts` / `mkr fetch`
//! invocations on top of either.

mod mkr;
mod process;
mod scripted;

pub use mkr::{fetch_args, hosts_args, MkrClient, DEFAULT_PROGRAM};
pub use process::ProcessRunner;
pub use scripted::{Invocation, ScriptedRunner};

use std::fmt::Debug;
use std::io::Write;

use async_trait::async_trait;
use serde::de::DeserializeOwned;

use crate::error::PollError;

/// Trait for running an external command and capturing its standard output.
///
/// # Example
///
/// ```
/// use mkr_top::{CommandRunner, ScriptedRunner};
///
/// # tokio_test::block_on(async {
/// let runner = ScriptedRunner::new().with_stdout("[]");
/// let out = runner.run("mkr", &["hosts".to_string()]).await.unwrap();
/// assert_eq!(out, b"[]");
/// # });
/// ```
#[async_trait]
pub trait CommandRunner: Send + Sync + Debug {
    /// Run `program` with `args` and return everything it wrote to stdout.
    ///
    /// Fails if the process cannot be started or exits unsuccessfully.
    async fn run(&self, program: &str, args: &[String]) -> Result<Vec<u8>, PollError>;
}

/// Run a command and decode its output as JSON.
///
/// `T` may be a typed struct, a `Vec` of them, or [`serde_json::Value`] when
/// the shape is dynamic.
pub async fn run_json<R, T>(runner: &R, program: &str, args: &[String]) -> Result<T, PollError>
where
    R: CommandRunner + ?Sized,
    T: DeserializeOwned,
{
    let stdout = runner.run(program, args).await?;
    serde_json::from_slice(&stdout).map_err(|source| PollError::Decode {
        program: program.to_string(),
        source,
    })
}

/// Run a command and copy its raw output into `sink`.
pub async fn run_into<R, W>(
    runner: &R,
    program: &str,
    args: &[String],
    sink: &mut W,
) -> Result<(), PollError>
where
    R: CommandRunner + ?Sized,
    W: Write + ?Sized,
{
    let stdout = runner.run(program, args).await?;
    sink.write_all(&stdout)?;
    Ok(())
}

//! Runner that replays canned output.
//!
//! Useful for tests and for driving the poller without a real `mkr`
//! installation.

use std::collections::VecDeque;
use std::fmt;

use async_trait::async_trait;
use parking_lot::Mutex;

use super::CommandRunner;
use crate::error::PollError;

/// A recorded command invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    pub program: String,
    pub args: Vec<String>,
}

impl fmt::Display for Invocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.program)?;
        for arg in &self.args {
            write!(f, " {}", arg)?;
        }
        Ok(())
    }
}

#[derive(Debug)]
enum Reply {
    Stdout(Vec<u8>),
    Exit { code: i32, stderr: String },
}

/// A [`CommandRunner`] that answers each call with the next queued reply
/// and records what was invoked.
///
/// Once the queue is empty every call fails with a launch error.
///
/// # Example
///
/// ```
/// use mkr_top::{CommandRunner, ScriptedRunner};
///
/// # tokio_test::block_on(async {
/// let runner = ScriptedRunner::new()
///     .with_stdout(r#"[{"id":"h1","name":"web1","isRetired":false}]"#)
///     .with_failure(1, "unauthorized");
///
/// assert!(runner.run("mkr", &[]).await.is_ok());
/// assert!(runner.run("mkr", &[]).await.is_err());
/// assert_eq!(runner.invocations().len(), 2);
/// # });
/// ```
#[derive(Debug, Default)]
pub struct ScriptedRunner {
    replies: Mutex<VecDeque<Reply>>,
    invocations: Mutex<Vec<Invocation>>,
}

impl ScriptedRunner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a successful reply printing `stdout`.
    pub fn with_stdout(self, stdout: impl Into<String>) -> Self {
        self.replies
            .lock()
            .push_back(Reply::Stdout(stdout.into().into_bytes()));
        self
    }

    /// Queue a reply that exits with `code` and prints `stderr`.
    pub fn with_failure(self, code: i32, stderr: impl Into<String>) -> Self {
        self.replies.lock().push_back(Reply::Exit {
            code,
            stderr: stderr.into(),
        });
        self
    }

    /// Every invocation seen so far, oldest first.
    pub fn invocations(&self) -> Vec<Invocation> {
        self.invocations.lock().clone()
    }

    /// Number of replies not yet consumed.
    pub fn remaining(&self) -> usize {
        self.replies.lock().len()
    }
}

#[async_trait]
impl CommandRunner for ScriptedRunner {
    async fn run(&self, program: &str, args: &[String]) -> Result<Vec<u8>, PollError> {
        self.invocations.lock().push(Invocation {
            program: program.to_string(),
            args: args.to_vec(),
        });

        match self.replies.lock().pop_front() {
            Some(Reply::Stdout(stdout)) => Ok(stdout),
            Some(Reply::Exit { code, stderr }) => Err(PollError::Exit {
                program: program.to_string(),
                code: Some(code),
                stderr,
            }),
            None => Err(PollError::Launch {
                program: program.to_string(),
                source: std::io::Error::new(
                    std::io::ErrorKind::NotFound,
                    "no scripted reply left",
                ),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_replies_in_order() {
        let runner = ScriptedRunner::new()
            .with_stdout("first")
            .with_failure(2, "boom")
            .with_stdout("third");

        assert_eq!(runner.run("a", &[]).await.unwrap(), b"first");
        assert!(matches!(
            runner.run("b", &[]).await,
            Err(PollError::Exit { code: Some(2), .. })
        ));
        assert_eq!(runner.run("c", &[]).await.unwrap(), b"third");
        assert_eq!(runner.remaining(), 0);
    }

    #[tokio::test]
    async fn test_records_invocations() {
        let runner = ScriptedRunner::new().with_stdout("{}");
        runner
            .run("mkr", &["fetch".to_string(), "h1".to_string()])
            .await
            .unwrap();

        let calls = runner.invocations();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].program, "mkr");
        assert_eq!(calls[0].to_string(), "mkr fetch h1");
    }

    #[tokio::test]
    async fn test_exhausted_queue_fails_to_launch() {
        let runner = ScriptedRunner::new();
        let err = runner.run("mkr", &[]).await.unwrap_err();
        assert!(matches!(err, PollError::Launch { .. }));
        assert_eq!(runner.invocations().len(), 1);
    }
}

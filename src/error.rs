//! Error types for a poll cycle.

use thiserror::Error;

/// Errors that end the poll loop.
///
/// None of these are recovered from; the binary reports the error and exits
/// the same way whichever variant it is.
#[derive(Debug, Error)]
pub enum PollError {
    /// The external command could not be started.
    #[error("failed to run `{program}`: {source}")]
    Launch {
        program: String,
        #[source]
        source: std::io::Error,
    },

    /// The external command ran but exited unsuccessfully.
    #[error("`{program}` exited with {}: {stderr}", exit_label(.code))]
    Exit {
        program: String,
        code: Option<i32>,
        stderr: String,
    },

    /// The command's output was not the JSON we expected.
    #[error("failed to decode output of `{program}`: {source}")]
    Decode {
        program: String,
        #[source]
        source: serde_json::Error,
    },

    /// The inventory returned no hosts for the service/role pair.
    #[error("couldn't find hosts in service({service}):role({role})")]
    NoHosts { service: String, role: String },

    /// Writing the rendered table failed.
    #[error("failed to write output: {0}")]
    Output(#[from] std::io::Error),
}

fn exit_label(code: &Option<i32>) -> String {
    match code {
        Some(code) => format!("status {}", code),
        None => "no status (killed by signal)".to_string(),
    }
}

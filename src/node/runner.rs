//! Process execution for the node CLI.

use async_trait::async_trait;
use std::path::{Path, PathBuf};
use std::process::Stdio;
use tokio::process::Command;

use crate::node::types::{NodeError, NodeResult};

/// Executes one node CLI invocation and returns its stdout.
#[async_trait]
pub trait CommandRunner: Send + Sync {
    /// Run with `args` and return stdout, or an error if the command failed.
    async fn output(&self, args: &[String]) -> NodeResult<String>;
}

/// Runs the node CLI as a child process.
#[derive(Debug, Clone)]
pub struct ProcessRunner {
    path: PathBuf,
}

impl ProcessRunner {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl CommandRunner for ProcessRunner {
    async fn output(&self, args: &[String]) -> NodeResult<String> {
        let output = Command::new(&self.path)
            .args(args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .output()
            .await?;

        if !output.status.success() {
            return Err(NodeError::ProcessFailed {
                code: output.status.code(),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}

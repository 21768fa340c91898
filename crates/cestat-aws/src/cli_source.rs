//! `aws` CLI subprocess backend
//!
//! The binary is resolved on `PATH` before anything runs, so a missing AWS
//! CLI fails before any request is attempted. Failures of the CLI itself
//! (credentials, throttling, access denied) are passed through with the
//! CLI's own stderr. There is no retry.

use async_trait::async_trait;
use cestat_core::error::{CestatError, Result};
use cestat_core::query::CostQuery;
use cestat_core::source::CostSource;
use std::path::PathBuf;
use std::process::Stdio;
use std::time::Instant;
use tokio::process::Command;
use tracing::{debug, instrument, warn};

/// Binary looked up when no override is given
pub const DEFAULT_AWS_BIN: &str = "aws";

/// Runs Cost Explorer queries through the AWS CLI.
#[derive(Debug, Clone)]
pub struct AwsCliSource {
    binary: String,
    profile: Option<String>,
    region: Option<String>,
    echo_command: bool,
}

impl Default for AwsCliSource {
    fn default() -> Self {
        Self::new(DEFAULT_AWS_BIN)
    }
}

impl AwsCliSource {
    /// Create a source using `binary` (a name on `PATH` or a path)
    pub fn new(binary: impl Into<String>) -> Self {
        Self {
            binary: binary.into(),
            profile: None,
            region: None,
            echo_command: false,
        }
    }

    /// Named profile passed as `--profile`
    pub fn with_profile(mut self, profile: Option<String>) -> Self {
        self.profile = profile;
        self
    }

    /// Region passed as `--region`
    pub fn with_region(mut self, region: Option<String>) -> Self {
        self.region = region;
        self
    }

    /// Print the command line to stderr before running it
    pub fn with_echo(mut self, echo: bool) -> Self {
        self.echo_command = echo;
        self
    }

    /// Resolve the binary, failing if it is not installed
    pub fn locate(&self) -> Result<PathBuf> {
        which::which(&self.binary).map_err(|e| {
            warn!(binary = %self.binary, error = %e, "AWS CLI not found");
            CestatError::MissingDependency(self.binary.clone())
        })
    }

    /// Arguments passed to the binary for `query`
    pub fn arguments(&self, query: &CostQuery) -> Result<Vec<String>> {
        let mut args = query.to_cli_args()?;
        if let Some(profile) = &self.profile {
            args.push("--profile".to_string());
            args.push(profile.clone());
        }
        if let Some(region) = &self.region {
            args.push("--region".to_string());
            args.push(region.clone());
        }
        Ok(args)
    }

    /// Shell-quoted command line, as echoed by `--debug`
    pub fn display_command(&self, args: &[String]) -> String {
        std::iter::once(self.binary.as_str())
            .chain(args.iter().map(String::as_str))
            .map(shell_quote)
            .collect::<Vec<_>>()
            .join(" ")
    }
}

#[async_trait]
impl CostSource for AwsCliSource {
    #[instrument(skip_all)]
    async fn fetch(&self, query: &CostQuery) -> Result<String> {
        let path = self.locate()?;
        let args = self.arguments(query)?;

        if self.echo_command {
            eprintln!("+ {}", self.display_command(&args));
        }
        debug!(binary = %self.binary, path = %path.display(), args = ?args, "Running AWS CLI");

        let start = Instant::now();
        let output = Command::new(&path)
            .args(&args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .output()
            .await?;
        let elapsed = start.elapsed();

        let stdout = String::from_utf8_lossy(&output.stdout).into_owned();
        let stderr = String::from_utf8_lossy(&output.stderr).into_owned();
        debug!(
            status = ?output.status,
            elapsed = ?elapsed,
            stdout_len = stdout.len(),
            stderr_len = stderr.len(),
            "AWS CLI finished"
        );

        if !output.status.success() {
            return Err(CestatError::ApiCall {
                code: output.status.code().unwrap_or(-1),
                stderr: stderr.trim_end().to_string(),
            });
        }

        Ok(stdout)
    }
}

fn shell_quote(arg: &str) -> String {
    let plain = !arg.is_empty()
        && arg
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || "-_=,./:@+".contains(c));
    if plain {
        arg.to_string()
    } else {
        format!("'{}'", arg.replace('\'', r"'\''"))
    }
}

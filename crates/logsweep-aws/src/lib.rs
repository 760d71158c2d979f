//! Logsweep AWS Layer
//!
//! Implements the LogStore trait for CloudWatch Logs by invoking the `aws` CLI.
//!
//! # Architecture
//!
//! - Every store call runs one `aws logs ...` subprocess and waits for it
//! - JSON output is decoded with serde into wire types, then into domain views
//! - Credentials, pagination and timeouts are the CLI's business
//!
//! # Examples
//!
//! ```no_run
//! use logsweep_aws::AwsCliStore;
//! use logsweep_domain::LogStore;
//!
//! let mut store = AwsCliStore::new().with_region("eu-central-1");
//! let groups = store.list_log_groups().unwrap();
//! println!("{} groups", groups.len());
//! ```

#![warn(missing_docs)]

mod wire;

use logsweep_domain::{LogGroup, LogStore, LogStream, StoreError};
use serde::de::DeserializeOwned;
use std::ffi::OsString;
use std::process::Command;
use thiserror::Error;
use wire::{DescribeLogGroups, DescribeLogStreams};

/// Errors that can occur while running the `aws` CLI
#[derive(Error, Debug)]
pub enum AwsError {
    /// The CLI could not be started
    #[error("Failed to run {program}: {source}")]
    Spawn {
        /// Program that was invoked
        program: String,
        /// Underlying I/O error
        source: std::io::Error,
    },

    /// The CLI exited with a non-zero status
    #[error("{stderr}")]
    Exit {
        /// Exit status
        code: i32,
        /// Captured standard error
        stderr: String,
    },

    /// The CLI was terminated without an exit status
    #[error("{program} was terminated by a signal")]
    Terminated {
        /// Program that was invoked
        program: String,
    },

    /// The CLI output was not the expected JSON
    #[error("Invalid response: {0}")]
    Decode(#[from] serde_json::Error),
}

impl From<AwsError> for StoreError {
    fn from(err: AwsError) -> Self {
        match err {
            AwsError::Exit { code, stderr } => StoreError::reported(code, stderr),
            other => StoreError::unexpected(other.to_string()),
        }
    }
}

/// CloudWatch Logs store backed by the `aws` command line interface
///
/// Stream listings are requested with `--order-by LastEventTime --descending`,
/// which yields the newest-first order the sweep relies on.
#[derive(Debug, Clone)]
pub struct AwsCliStore {
    program: OsString,
    leading_args: Vec<OsString>,
    profile: Option<String>,
    region: Option<String>,
}

impl Default for AwsCliStore {
    fn default() -> Self {
        Self::new()
    }
}

impl AwsCliStore {
    /// Create a store that runs `aws` from `PATH`
    pub fn new() -> Self {
        Self {
            program: OsString::from("aws"),
            leading_args: Vec::new(),
            profile: None,
            region: None,
        }
    }

    /// Run a different executable instead of `aws`
    pub fn with_program(mut self, program: impl Into<OsString>) -> Self {
        self.program = program.into();
        self
    }

    /// Arguments placed before `logs`
    ///
    /// For credential wrappers, e.g. program `aws-vault` with
    /// `["exec", "prod", "--", "aws"]`. The CLI fills this from `--aws-arg`.
    pub fn with_leading_args<I, A>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = A>,
        A: Into<OsString>,
    {
        self.leading_args = args.into_iter().map(Into::into).collect();
        self
    }

    /// Use a named credentials profile
    pub fn with_profile(mut self, profile: impl Into<String>) -> Self {
        self.profile = Some(profile.into());
        self
    }

    /// Target a specific region
    pub fn with_region(mut self, region: impl Into<String>) -> Self {
        self.region = Some(region.into());
        self
    }

    fn command(&self, subcommand: &str, args: &[&str]) -> Command {
        let mut cmd = Command::new(&self.program);
        cmd.args(&self.leading_args)
            .arg("logs")
            .arg(subcommand)
            .args(args)
            .args(["--output", "json"]);

        if let Some(profile) = &self.profile {
            cmd.args(["--profile", profile.as_str()]);
        }
        if let Some(region) = &self.region {
            cmd.args(["--region", region.as_str()]);
        }
        cmd
    }

    /// Run one `aws logs` subcommand and return its standard output
    fn run(&self, subcommand: &str, args: &[&str]) -> Result<String, AwsError> {
        let program = self.program.to_string_lossy().into_owned();
        tracing::debug!("Running {} logs {} {:?}", program, subcommand, args);

        let output = self
            .command(subcommand, args)
            .output()
            .map_err(|source| AwsError::Spawn {
                program: program.clone(),
                source,
            })?;

        match output.status.code() {
            Some(0) => Ok(String::from_utf8_lossy(&output.stdout).into_owned()),
            Some(code) => Err(AwsError::Exit {
                code,
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            }),
            None => Err(AwsError::Terminated { program }),
        }
    }

    fn run_json<T>(&self, subcommand: &str, args: &[&str]) -> Result<T, AwsError>
    where
        T: DeserializeOwned,
    {
        let stdout = self.run(subcommand, args)?;
        Ok(serde_json::from_str(&stdout)?)
    }
}

impl LogStore for AwsCliStore {
    fn list_log_groups(&mut self) -> Result<Vec<LogGroup>, StoreError> {
        let response: DescribeLogGroups = self.run_json("describe-log-groups", &[])?;
        Ok(response.log_groups.into_iter().map(Into::into).collect())
    }

    fn list_log_streams(&mut self, group: &str) -> Result<Vec<LogStream>, StoreError> {
        let response: DescribeLogStreams = self.run_json(
            "describe-log-streams",
            &[
                "--log-group-name",
                group,
                "--order-by",
                "LastEventTime",
                "--descending",
            ],
        )?;
        Ok(response.log_streams.into_iter().map(Into::into).collect())
    }

    fn delete_log_group(&mut self, group: &str) -> Result<(), StoreError> {
        self.run("delete-log-group", &["--log-group-name", group])?;
        Ok(())
    }

    fn delete_log_stream(&mut self, group: &str, stream: &str) -> Result<(), StoreError> {
        self.run(
            "delete-log-stream",
            &["--log-group-name", group, "--log-stream-name", stream],
        )?;
        Ok(())
    }
}

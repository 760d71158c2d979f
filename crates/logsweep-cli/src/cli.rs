//! CLI command definitions and argument parsing.

use clap::{ArgAction, Parser};
use logsweep_aws::AwsCliStore;
use logsweep_janitor::JanitorConfig;

const DESCRIPTION: &str = "\
Cleans up your messy crime scene inside CloudWatch :)

Before execution, the aws-cli must be installed and your credentials must
be sourced by the shell - alternatively, the cli must be 'aws configure'd.

This tool runs through all your log groups and their corresponding log
streams and searches for log entries older than the specified number of
days. If the newest stream of a log group contains no entries younger than
that number, the whole group is considered outdated and gets deleted.

When finished, the total number of deleted groups and streams is
displayed and the log size before and after the run is presented.";

const EXAMPLES: &str = "\
Examples:

Delete all log groups whose newest stream is older than 10 days:
  logsweep -r 10
  logsweep --retention=10

Perform a dry-run to see what would happen:
  logsweep -d -r 10
  logsweep --dry --retention=10";

/// Logsweep - retention-based cleanup for CloudWatch log groups.
#[derive(Debug, Parser)]
#[command(name = "logsweep")]
#[command(version, about, long_about = DESCRIPTION, after_help = EXAMPLES)]
pub struct Cli {
    /// Number of days to keep; streams without younger entries are outdated
    #[arg(
        short,
        long,
        value_name = "DAYS",
        value_parser = clap::value_parser!(u32).range(1..)
    )]
    pub retention: u32,

    /// Perform a "dry run" to simulate what would happen without deleting anything
    #[arg(short, long)]
    pub dry: bool,

    /// Also delete outdated streams of groups whose newest stream is still live
    #[arg(long)]
    pub prune_streams: bool,

    /// AWS credentials profile
    #[arg(long, env = "AWS_PROFILE")]
    pub profile: Option<String>,

    /// AWS region
    #[arg(long, env = "AWS_REGION")]
    pub region: Option<String>,

    /// Path to the aws executable
    #[arg(long, value_name = "PATH", default_value = "aws")]
    pub aws_bin: String,

    /// Argument placed before `logs` when running the aws executable (repeatable),
    /// e.g. `--aws-bin aws-vault --aws-arg exec --aws-arg prod --aws-arg=-- --aws-arg aws`
    #[arg(long = "aws-arg", value_name = "ARG", allow_hyphen_values = true)]
    pub aws_args: Vec<String>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "table")]
    pub format: CliFormat,

    /// Disable colored output
    #[arg(long)]
    pub no_color: bool,

    /// Log diagnostics to stderr (default: warnings, -v: info, -vv: debug)
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,
}

/// Output format options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum CliFormat {
    /// Progress lines and a summary table (default)
    Table,
    /// JSON summary only
    Json,
    /// One summary line only
    Quiet,
}

impl Cli {
    /// Sweep configuration for these arguments.
    pub fn janitor_config(&self) -> JanitorConfig {
        JanitorConfig {
            prune_tail_streams: self.prune_streams,
            ..JanitorConfig::with_retention(self.retention).dry_run(self.dry)
        }
    }

    /// Log store client for these arguments.
    pub fn store(&self) -> AwsCliStore {
        let mut store = AwsCliStore::new()
            .with_program(&self.aws_bin)
            .with_leading_args(&self.aws_args);
        if let Some(profile) = &self.profile {
            store = store.with_profile(profile);
        }
        if let Some(region) = &self.region {
            store = store.with_region(region);
        }
        store
    }

    /// Default tracing filter for the requested verbosity.
    pub fn log_filter(&self) -> &'static str {
        match self.verbose {
            0 => "warn",
            1 => "info",
            _ => "debug",
        }
    }
}

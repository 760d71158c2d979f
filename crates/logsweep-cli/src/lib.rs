//! Logsweep CLI library.
//!
//! Argument parsing, progress and summary formatting, and the glue that runs
//! one sweep against the AWS CLI.

pub mod cli;
pub mod error;
pub mod output;
pub mod sweep;

pub use cli::{Cli, CliFormat};
pub use error::{CliError, Result};
pub use output::Formatter;
pub use sweep::execute;

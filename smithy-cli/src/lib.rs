/*!
Shared types between [`command_line`] (argument parsing) and [`actions`]
(the work each subcommand does): a top-level `Command`/`Options` split
so argument parsing never has to know how a subcommand is executed.
*/

#![warn(
    future_incompatible,
    nonstandard_style,
    rust_2018_idioms,
    missing_debug_implementations,
    unreachable_pub
)]

use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::PathBuf;
use std::str::FromStr;

pub mod actions;
pub mod command_line;
pub mod report;

/// Global flags shared by every subcommand.
#[derive(Debug)]
pub struct Options {
    pub use_color: bool,
}

/// A fully parsed invocation, ready for [`actions`] to execute.
#[derive(Debug)]
pub enum Command {
    Validate(ValidateCommand, Options),
    Select(SelectCommand, Options),
    Convert(ConvertCommand, Options),
    Build(BuildCommand, Options),
}

/// `smithy validate` — assemble a model from one or more paths and run
/// the standard validator registry over it.
#[derive(Debug)]
pub struct ValidateCommand {
    pub inputs: Vec<PathBuf>,
}

/// `smithy select` — assemble a model and run a selector expression
/// against it, printing the matching shape IDs.
#[derive(Debug)]
pub struct SelectCommand {
    pub inputs: Vec<PathBuf>,
    pub expression: String,
}

/// `smithy convert` — assemble a model and write it back out in a
/// different representation.
#[derive(Debug)]
pub struct ConvertCommand {
    pub inputs: Vec<PathBuf>,
    pub out_file: Option<PathBuf>,
    pub write_format: FileFormat,
}

/// `smithy build` — run the full build pipeline described by a build
/// configuration file.
#[derive(Debug)]
pub struct BuildCommand {
    pub config_file: PathBuf,
    pub base_dir: Option<PathBuf>,
}

/// The representation a model is read from or written to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileFormat {
    Json,
    Idl,
}

impl Display for FileFormat {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}",
            match self {
                FileFormat::Json => "json",
                FileFormat::Idl => "idl",
            }
        )
    }
}

impl FromStr for FileFormat {
    type Err = FormatStringError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "json" => Ok(FileFormat::Json),
            "idl" | "smithy" => Ok(FileFormat::Idl),
            _ => Err(FormatStringError::new(s)),
        }
    }
}

/// Raised when a `--*-format` argument names an unknown representation.
#[derive(Debug)]
pub struct FormatStringError {
    failed: String,
}

impl Display for FormatStringError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "'{}' is not a known format, expecting 'json' or 'idl'", self.failed)
    }
}

impl Error for FormatStringError {}

impl FormatStringError {
    pub fn new(failed: &str) -> Self {
        Self { failed: failed.to_string() }
    }
}

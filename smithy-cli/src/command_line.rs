/*!
`structopt`-derived argument parsing, translating the process's argv
into a [`crate::Command`] for [`crate::actions`] to run.
*/

use crate::{BuildCommand, Command, ConvertCommand, FileFormat, Options, SelectCommand, ValidateCommand};
use std::error::Error;
use std::path::PathBuf;
use structopt::StructOpt;

#[derive(Debug, StructOpt)]
#[structopt(name = "smithy", about = "Tools for the Smithy IDL.")]
pub(crate) struct CommandLine {
    /// The level of logging to perform; from off to trace
    #[structopt(long, short = "v", parse(from_occurrences))]
    verbose: i8,

    #[cfg(feature = "color")]
    /// Turn off color in the output
    #[structopt(long, short)]
    no_color: bool,

    #[structopt(subcommand)]
    cmd: SubCommand,
}

#[derive(Debug, StructOpt)]
pub(crate) enum SubCommand {
    /// Run standard validators on a model assembled from one or more files/directories
    Validate {
        /// Model files or directories to assemble
        #[structopt(required = true)]
        inputs: Vec<PathBuf>,
    },
    /// Run a selector expression over a model assembled from one or more files/directories
    Select {
        /// The selector expression to evaluate
        expression: String,

        /// Model files or directories to assemble
        #[structopt(required = true)]
        inputs: Vec<PathBuf>,
    },
    /// Convert a model from one representation to another
    Convert {
        /// Model files or directories to assemble
        #[structopt(required = true)]
        inputs: Vec<PathBuf>,

        /// The file to write to [default: <stdout>]
        #[structopt(long, short)]
        out_file: Option<PathBuf>,

        /// The representation of the output file
        #[structopt(short, long, default_value = "json")]
        write_format: FileFormat,
    },
    /// Run the build pipeline described by a build configuration file
    Build {
        /// The build configuration file (defaults to `smithy-build.json`)
        #[structopt(long, short, default_value = "smithy-build.json")]
        config: PathBuf,

        /// Directory source/import paths in the config are resolved against
        /// [default: the config file's own directory]
        #[structopt(long, short)]
        base_dir: Option<PathBuf>,
    },
}

pub fn parse() -> Result<Command, Box<dyn Error>> {
    let args = CommandLine::from_args();

    let options = Options {
        #[cfg(feature = "color")]
        use_color: !args.no_color,
        #[cfg(not(feature = "color"))]
        use_color: false,
    };

    Ok(match args.cmd {
        SubCommand::Validate { inputs } => Command::Validate(ValidateCommand { inputs }, options),
        SubCommand::Select { expression, inputs } => Command::Select(SelectCommand { inputs, expression }, options),
        SubCommand::Convert { inputs, out_file, write_format } => {
            Command::Convert(ConvertCommand { inputs, out_file, write_format }, options)
        }
        SubCommand::Build { config, base_dir } => Command::Build(BuildCommand { config_file: config, base_dir }, options),
    })
}

pub(crate) mod value;

use crate::command::{
    self, chunk::ChunkCommand, complete::CompleteCommand, embed::EmbedCommand,
    extract::ExtractCommand, info::InfoCommand, strip::StripCommand,
};
use clap::{ArgAction, Args, Parser, Subcommand, ValueHint};
use log::LevelFilter;
use std::{io, path::PathBuf};
pub(crate) use value::{AssetArg, CardVersionArg, LogLevel};

#[derive(Parser, Clone, Debug)]
#[command(
    name = "ccpng",
    version,
    about = "Read and write character cards embedded in PNG images",
    propagate_version = true,
    arg_required_else_help = true
)]
pub struct Cli {
    #[command(subcommand)]
    pub(crate) commands: Commands,
    #[command(flatten)]
    pub(crate) verbosity: VerbosityArgs,
}

impl Cli {
    /// Installs the stderr logger at the level selected by the verbosity flags.
    pub fn init_logger(&self) -> io::Result<()> {
        fern::Dispatch::new()
            .format(|out, message, record| {
                out.finish(format_args!(
                    "{}: {}",
                    record.level().as_str().to_ascii_lowercase(),
                    message
                ))
            })
            .level(self.verbosity.level_filter())
            .chain(io::stderr())
            .apply()
            .map_err(io::Error::other)
    }

    #[inline]
    pub fn execute(self) -> anyhow::Result<()> {
        command::entry(self)
    }
}

#[derive(Args, Clone, Copy, Eq, PartialEq, Hash, Debug)]
pub(crate) struct VerbosityArgs {
    #[arg(
        long,
        global = true,
        value_enum,
        default_value_t,
        help = "Log level, overridden by --quiet and --verbose"
    )]
    log_level: LogLevel,
    #[arg(short, long, global = true, help = "Make some output more quiet")]
    quiet: bool,
    #[arg(
        short,
        long,
        global = true,
        action = ArgAction::Count,
        help = "Make some output more verbose, repeat for more"
    )]
    verbose: u8,
}

impl VerbosityArgs {
    #[inline]
    pub(crate) fn level_filter(&self) -> LevelFilter {
        match (self.quiet, self.verbose) {
            (true, _) => LevelFilter::Off,
            (false, 0) => self.log_level.into(),
            (false, 1) => LevelFilter::Info,
            (false, 2) => LevelFilter::Debug,
            (false, _) => LevelFilter::Trace,
        }
    }
}

#[derive(Subcommand, Clone, Debug)]
pub(crate) enum Commands {
    #[command(about = "Embed a character card into a PNG image")]
    Embed(EmbedCommand),
    #[command(about = "Extract the character card from a PNG image")]
    Extract(ExtractCommand),
    #[command(about = "Show a summary of the embedded character card")]
    Info(InfoCommand),
    #[command(about = "Remove character card chunks from a PNG image")]
    Strip(StripCommand),
    #[command(about = "Chunk level operations")]
    Chunk(ChunkCommand),
    #[command(about = "Generate shell auto complete")]
    Complete(CompleteCommand),
}

#[derive(Args, Clone, Eq, PartialEq, Hash, Debug)]
pub(crate) struct FileArgs {
    #[arg(short, long, help = "PNG file path", value_hint = ValueHint::FilePath)]
    pub(crate) file: PathBuf,
}

#[derive(Args, Clone, Eq, PartialEq, Hash, Debug)]
pub(crate) struct OutputArgs {
    #[arg(
        short,
        long,
        help = "Output file path. Without it the input file is replaced",
        value_hint = ValueHint::FilePath
    )]
    pub(crate) output: Option<PathBuf>,
    #[arg(long, help = "Overwrite the output file if it exists")]
    pub(crate) overwrite: bool,
}

use crate::{
    cli::{FileArgs, OutputArgs},
    command::{Command, read_png},
    utils,
};
use anyhow::Context;
use clap::Parser;

#[derive(Parser, Clone, Eq, PartialEq, Hash, Debug)]
pub(crate) struct StripCommand {
    #[command(flatten)]
    pub(crate) file: FileArgs,
    #[command(flatten)]
    pub(crate) output: OutputArgs,
}

impl Command for StripCommand {
    #[inline]
    fn execute(self) -> anyhow::Result<()> {
        strip_card(self)
    }
}

fn strip_card(args: StripCommand) -> anyhow::Result<()> {
    let png = read_png(&args.file.file)?;
    let out = libccpng::strip(&png)
        .with_context(|| format!("failed to strip {}", args.file.file.display()))?;
    if out.len() == png.len() {
        log::info!("no character card chunks in {}", args.file.file.display());
    } else {
        log::info!("removed {} bytes of card data", png.len() - out.len());
    }
    utils::fs::write_or_replace(
        &args.file.file,
        args.output.output.as_deref(),
        args.output.overwrite,
        &out,
    )?;
    Ok(())
}

pub mod chunk;
pub mod complete;
pub mod embed;
pub mod extract;
pub mod info;
pub mod strip;

use crate::cli::{Cli, Commands};
use anyhow::Context;
use std::{fs, path::Path};

pub fn entry(cli: Cli) -> anyhow::Result<()> {
    match cli.commands {
        Commands::Embed(cmd) => cmd.execute(),
        Commands::Extract(cmd) => cmd.execute(),
        Commands::Info(cmd) => cmd.execute(),
        Commands::Strip(cmd) => cmd.execute(),
        Commands::Chunk(cmd) => cmd.execute(),
        Commands::Complete(cmd) => cmd.execute(),
    }
}

pub(crate) trait Command {
    fn execute(self) -> anyhow::Result<()>;
}

/// Reads a whole PNG file. A missing signature is only reported, the codec
/// does not depend on it.
fn read_png(path: &Path) -> anyhow::Result<Vec<u8>> {
    let png = fs::read(path).with_context(|| format!("failed to read {}", path.display()))?;
    if !libccpng::has_png_signature(&png) {
        log::warn!("{} does not start with a PNG signature", path.display());
    }
    Ok(png)
}

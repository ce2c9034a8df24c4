use crate::{
    cli::FileArgs,
    command::{Command, read_png},
    utils::{self, fs::file_create},
};
use anyhow::Context;
use base64::{Engine, engine::general_purpose::STANDARD};
use clap::{Parser, ValueHint};
use libccpng::Card;
use std::{
    borrow::Cow,
    collections::HashSet,
    fs,
    io::{self, Write},
    path::{Path, PathBuf},
};

#[derive(Parser, Clone, Eq, PartialEq, Hash, Debug)]
pub(crate) struct ExtractCommand {
    #[command(flatten)]
    pub(crate) file: FileArgs,
    #[arg(
        short,
        long,
        help = "Write the card data to this file instead of stdout",
        value_hint = ValueHint::FilePath
    )]
    pub(crate) output: Option<PathBuf>,
    #[arg(long, help = "Overwrite existing output files")]
    pub(crate) overwrite: bool,
    #[arg(long, help = "Pretty print the card data when it is JSON")]
    pub(crate) pretty: bool,
    #[arg(
        long,
        conflicts_with = "pretty",
        help = "Output the payload as stored in the chunk, without Base64 decoding"
    )]
    pub(crate) raw: bool,
    #[arg(
        long,
        help = "Write embedded assets under this directory",
        value_hint = ValueHint::DirPath
    )]
    pub(crate) assets_dir: Option<PathBuf>,
    #[arg(
        long,
        requires = "assets_dir",
        help = "Base64 decode asset text before writing it"
    )]
    pub(crate) decode_assets: bool,
}

impl Command for ExtractCommand {
    #[inline]
    fn execute(self) -> anyhow::Result<()> {
        extract_card(self)
    }
}

fn extract_card(args: ExtractCommand) -> anyhow::Result<()> {
    let png = read_png(&args.file.file)?;
    let card = libccpng::parse(&png)
        .with_context(|| format!("failed to read card from {}", args.file.file.display()))?;
    log::info!(
        "found {} card with {} asset(s)",
        card.kind(),
        card.assets().len()
    );

    let text = card_text(&card, args.pretty, args.raw);
    match &args.output {
        Some(path) => {
            let mut file = file_create(path, args.overwrite)
                .with_context(|| format!("failed to create {}", path.display()))?;
            file.write_all(text.as_bytes())?;
        }
        None => {
            let mut stdout = io::stdout().lock();
            stdout.write_all(text.as_bytes())?;
            stdout.write_all(b"\n")?;
        }
    }

    if let Some(dir) = &args.assets_dir {
        write_assets(&card, dir, args.decode_assets, args.overwrite)?;
    } else if !card.assets().is_empty() {
        log::info!("pass --assets-dir to write the embedded assets");
    }
    Ok(())
}

fn card_text(card: &Card, pretty: bool, raw: bool) -> Cow<'_, str> {
    if raw {
        return Cow::Borrowed(card.raw());
    }
    if pretty {
        match card.json() {
            Ok(value) => match serde_json::to_string_pretty(&value) {
                Ok(text) => return Cow::Owned(text),
                Err(e) => log::warn!("failed to pretty print card data: {e}"),
            },
            Err(e) => log::warn!("card data is not JSON, writing it as is: {e}"),
        }
    }
    Cow::Borrowed(card.text())
}

/// Writes each asset under `dir`. When several asset paths land on the same
/// file (e.g. `./a` and `a`), only the first one is written.
fn write_assets(card: &Card, dir: &Path, decode: bool, overwrite: bool) -> anyhow::Result<()> {
    let mut written = HashSet::new();
    for (name, text) in card.assets() {
        let Some(relative) = utils::sanitize_asset_path(name) else {
            log::warn!("skipping asset with unsafe path {name:?}");
            continue;
        };
        if !written.insert(relative.clone()) {
            log::warn!(
                "skipping asset {name:?}, {} was already written",
                relative.display()
            );
            continue;
        }
        let path = dir.join(relative);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let bytes = if decode {
            Cow::Owned(
                STANDARD
                    .decode(text)
                    .with_context(|| format!("asset {name:?} is not valid Base64"))?,
            )
        } else {
            Cow::Borrowed(text.as_bytes())
        };
        let mut file = file_create(&path, overwrite)
            .with_context(|| format!("failed to create {}", path.display()))?;
        file.write_all(&bytes)?;
        log::debug!("wrote asset {name:?} to {}", path.display());
    }
    Ok(())
}

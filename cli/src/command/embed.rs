use crate::{
    cli::{AssetArg, CardVersionArg, FileArgs, OutputArgs},
    command::{Command, read_png},
    utils,
};
use anyhow::Context;
use base64::{Engine, engine::general_purpose::STANDARD};
use clap::{Parser, ValueHint};
use libccpng::{CardVersion, GenerateOptions, Latin1Mode};
use std::{
    fs,
    io::{self, Read},
    path::{Path, PathBuf},
};

#[derive(Parser, Clone, Eq, PartialEq, Hash, Debug)]
pub(crate) struct EmbedCommand {
    #[command(flatten)]
    pub(crate) file: FileArgs,
    #[arg(
        long,
        help = "Character card data file, `-` reads from stdin",
        value_hint = ValueHint::FilePath
    )]
    pub(crate) card: PathBuf,
    #[arg(long, value_enum, default_value_t, help = "Card format to write")]
    pub(crate) card_version: CardVersionArg,
    #[arg(
        long,
        value_name = "PATH=FILE",
        help = "Embed the text of FILE as asset PATH (v3 only), may be repeated"
    )]
    pub(crate) asset: Vec<AssetArg>,
    #[arg(long, help = "Base64 encode asset files before embedding")]
    pub(crate) encode_assets: bool,
    #[arg(
        long,
        help = "Fail on characters outside Latin-1 instead of truncating them"
    )]
    pub(crate) strict_latin1: bool,
    #[arg(long, help = "Skip re-reading the written card")]
    pub(crate) no_verify: bool,
    #[command(flatten)]
    pub(crate) output: OutputArgs,
}

impl Command for EmbedCommand {
    #[inline]
    fn execute(self) -> anyhow::Result<()> {
        embed_card(self)
    }
}

fn embed_card(args: EmbedCommand) -> anyhow::Result<()> {
    let png = read_png(&args.file.file)?;
    let card = read_card(&args.card)?;
    if serde_json::from_str::<serde_json::Value>(&card).is_err() {
        log::warn!("card data is not valid JSON, embedding it as is");
    }
    let version = CardVersion::from(args.card_version);
    if version == CardVersion::V2 && !args.asset.is_empty() {
        log::warn!(
            "{} asset(s) ignored, assets are only written for v3 cards",
            args.asset.len()
        );
    }

    let mut builder = GenerateOptions::builder();
    builder
        .version(version)
        .verify(!args.no_verify)
        .latin1_mode(if args.strict_latin1 {
            Latin1Mode::Strict
        } else {
            Latin1Mode::Lossy
        });
    for asset in &args.asset {
        let text = read_asset(&asset.file, args.encode_assets)?;
        log::debug!("asset {} from {}", asset.path, asset.file.display());
        builder.asset(asset.path.as_str(), text);
    }

    let out = libccpng::generate(&png, &card, &builder.build())
        .with_context(|| format!("failed to embed card into {}", args.file.file.display()))?;
    utils::fs::write_or_replace(
        &args.file.file,
        args.output.output.as_deref(),
        args.output.overwrite,
        &out,
    )?;
    log::info!(
        "embedded {} card into {}",
        version.kind(),
        args.output
            .output
            .as_deref()
            .unwrap_or(&args.file.file)
            .display()
    );
    Ok(())
}

fn read_card(path: &Path) -> anyhow::Result<String> {
    if path == Path::new("-") {
        let mut card = String::new();
        io::stdin()
            .lock()
            .read_to_string(&mut card)
            .context("failed to read card data from stdin")?;
        return Ok(card);
    }
    fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))
}

fn read_asset(path: &Path, encode: bool) -> anyhow::Result<String> {
    let bytes = fs::read(path).with_context(|| format!("failed to read {}", path.display()))?;
    if encode {
        return Ok(STANDARD.encode(bytes));
    }
    String::from_utf8(bytes).with_context(|| {
        format!(
            "asset {} is not UTF-8 text, pass --encode-assets to embed binary files",
            path.display()
        )
    })
}

use crate::{
    cli::FileArgs,
    command::{Command, read_png},
};
use clap::Parser;
use libccpng::{Chunks, TextChunk, prelude::*};
use tabled::{builder::Builder as TableBuilder, settings::Style as TableStyle};

#[derive(Parser, Clone, Eq, PartialEq, Hash, Debug)]
#[command(args_conflicts_with_subcommands = true, arg_required_else_help = true)]
pub(crate) struct ChunkCommand {
    #[command(subcommand)]
    command: ChunkCommands,
}

impl Command for ChunkCommand {
    #[inline]
    fn execute(self) -> anyhow::Result<()> {
        match self.command {
            ChunkCommands::List(cmd) => cmd.execute(),
        }
    }
}

#[derive(Parser, Clone, Eq, PartialEq, Hash, Debug)]
pub(crate) enum ChunkCommands {
    #[command(about = "List chunks")]
    List(ListCommand),
}

#[derive(Parser, Clone, Eq, PartialEq, Hash, Debug)]
pub(crate) struct ListCommand {
    #[arg(short, long, help = "Display the keyword of tEXt chunks")]
    pub(crate) long: bool,
    #[arg(short = 'H', long, help = "Add a header row to each column")]
    pub(crate) header: bool,
    #[command(flatten)]
    pub(crate) file: FileArgs,
}

impl Command for ListCommand {
    #[inline]
    fn execute(self) -> anyhow::Result<()> {
        list_png_chunks(self)
    }
}

fn list_png_chunks(args: ListCommand) -> anyhow::Result<()> {
    let png = read_png(&args.file.file)?;
    let mut builder = TableBuilder::new();
    if args.header {
        builder.push_record(
            ["Index", "Type", "Size", "Offset", "CRC"]
                .into_iter()
                .chain(args.long.then_some("Keyword")),
        )
    }
    for (idx, chunk) in Chunks::new(&png)?.enumerate() {
        let (offset, chunk) = chunk?;
        builder.push_record(
            [
                (idx + 1).to_string(),
                chunk.ty().to_string(),
                chunk.length().to_string(),
                format!("{offset:#06x}"),
                if chunk.is_crc_valid() { "ok" } else { "bad" }.to_string(),
            ]
            .into_iter()
            .chain(args.long.then(|| {
                TextChunk::from_chunk(&chunk)
                    .map(|text| text.keyword().into_owned())
                    .unwrap_or_default()
            })),
        );
    }
    let mut table = builder.build();
    table.with(TableStyle::empty());
    println!("{table}");
    Ok(())
}

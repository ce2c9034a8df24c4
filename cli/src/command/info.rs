use crate::{
    cli::FileArgs,
    command::{Command, read_png},
};
use anyhow::Context;
use clap::Parser;
use libccpng::Card;
use tabled::{builder::Builder as TableBuilder, settings::Style as TableStyle};

#[derive(Parser, Clone, Eq, PartialEq, Hash, Debug)]
pub(crate) struct InfoCommand {
    #[command(flatten)]
    pub(crate) file: FileArgs,
}

impl Command for InfoCommand {
    #[inline]
    fn execute(self) -> anyhow::Result<()> {
        show_card_info(self)
    }
}

fn show_card_info(args: InfoCommand) -> anyhow::Result<()> {
    let png = read_png(&args.file.file)?;
    let card = libccpng::parse(&png)
        .with_context(|| format!("failed to read card from {}", args.file.file.display()))?;
    let mut builder = TableBuilder::new();
    for row in card_summary(&card) {
        builder.push_record(row);
    }
    let mut table = builder.build();
    table.with(TableStyle::empty());
    println!("{table}");
    Ok(())
}

fn card_summary(card: &Card) -> Vec<[String; 2]> {
    let mut rows = vec![
        ["Kind".into(), card.kind().to_string()],
        ["Size".into(), format!("{} bytes", card.text().len())],
    ];
    match card.character() {
        Ok(character) => {
            let data = &character.data;
            rows.extend([
                ["Spec".into(), character.spec.clone()],
                ["Spec version".into(), character.spec_version.clone()],
                ["Name".into(), data.name.clone()],
                ["Creator".into(), data.creator.clone()],
                ["Version".into(), data.character_version.clone()],
                ["Tags".into(), data.tags.join(", ")],
                [
                    "Greetings".into(),
                    (usize::from(!data.first_mes.is_empty()) + data.alternate_greetings.len())
                        .to_string(),
                ],
                [
                    "Lorebook".into(),
                    data.character_book
                        .as_ref()
                        .map_or_else(|| "-".into(), |book| format!("{} entries", book.entries.len())),
                ],
            ]);
        }
        Err(e) => log::warn!("card data is not a character card document: {e}"),
    }
    rows.push(["Assets".into(), card.assets().len().to_string()]);
    rows.extend(
        card.assets()
            .iter()
            .map(|(path, text)| [format!("  {path}"), format!("{} bytes", text.len())]),
    );
    rows
}

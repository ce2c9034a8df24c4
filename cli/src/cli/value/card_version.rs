use clap::ValueEnum;
use libccpng::CardVersion;

#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Debug, Default, ValueEnum)]
pub(crate) enum CardVersionArg {
    /// `chara` chunk, assets are not written
    #[default]
    V2,
    /// `ccv3` chunk followed by asset chunks
    V3,
}

impl From<CardVersionArg> for CardVersion {
    #[inline]
    fn from(value: CardVersionArg) -> Self {
        match value {
            CardVersionArg::V2 => CardVersion::V2,
            CardVersionArg::V3 => CardVersion::V3,
        }
    }
}

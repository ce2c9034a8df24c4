mod asset_arg;
mod card_version;
mod log_level;

pub(crate) use asset_arg::AssetArg;
pub(crate) use card_version::CardVersionArg;
pub(crate) use log_level::LogLevel;

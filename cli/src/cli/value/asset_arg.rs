use std::{path::PathBuf, str::FromStr};

/// `<path>=<file>` pair naming an asset and the file its text is read from.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub(crate) struct AssetArg {
    pub(crate) path: String,
    pub(crate) file: PathBuf,
}

impl FromStr for AssetArg {
    type Err = AssetArgParseError;

    /// Splits on the first `=`, so the asset path itself cannot contain one but the file may.
    #[inline]
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (path, file) = s
            .split_once('=')
            .ok_or_else(|| AssetArgParseError::MissingSeparator(s.into()))?;
        if path.is_empty() {
            return Err(AssetArgParseError::EmptyPath);
        }
        if file.is_empty() {
            return Err(AssetArgParseError::EmptyFile);
        }
        Ok(Self {
            path: path.into(),
            file: file.into(),
        })
    }
}

#[derive(thiserror::Error, Clone, Eq, PartialEq, Debug)]
pub(crate) enum AssetArgParseError {
    #[error("expected <path>=<file>, got {0:?}")]
    MissingSeparator(String),
    #[error("asset path must not be empty")]
    EmptyPath,
    #[error("asset file must not be empty")]
    EmptyFile,
}

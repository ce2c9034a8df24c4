use std::{
    error::Error,
    fmt::{self, Display, Formatter},
    io,
};

/// A character that has no single-byte Latin-1 representation.
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Debug)]
pub struct Latin1Error {
    pub(crate) index: usize,
    pub(crate) ch: char,
}

impl Latin1Error {
    /// Character index of the offending character.
    #[inline]
    pub const fn index(&self) -> usize {
        self.index
    }

    /// The offending character.
    #[inline]
    pub const fn char(&self) -> char {
        self.ch
    }
}

impl Display for Latin1Error {
    #[inline]
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "character {:?} (U+{:04X}) at index {} is not representable in Latin-1",
            self.ch, self.ch as u32, self.index
        )
    }
}

impl Error for Latin1Error {}

/// Errors returned by the card codec.
#[derive(Debug)]
pub enum CardError {
    /// Neither a `ccv3` nor a `chara` payload was found in the chunk stream.
    NotFound,
    /// The rewritten chunk stream broke a structural invariant, e.g. it does
    /// not end with `IEND`.
    InvalidStructure(&'static str),
    /// A keyword or text could not be encoded as Latin-1 in strict mode.
    Latin1(Latin1Error),
    /// A `tEXt` keyword held a null byte once encoded, which would move the
    /// keyword/text boundary. Carries the offending keyword.
    NulInKeyword(String),
    /// The buffer ended in the middle of the signature or a chunk.
    Io(io::Error),
}

impl Display for CardError {
    #[inline]
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotFound => f.write_str("no character data found in PNG"),
            Self::InvalidStructure(reason) => write!(f, "invalid chunk structure: {reason}"),
            Self::Latin1(e) => Display::fmt(e, f),
            Self::NulInKeyword(keyword) => {
                write!(f, "keyword {keyword:?} contains a null byte once encoded")
            }
            Self::Io(e) => Display::fmt(e, f),
        }
    }
}

impl Error for CardError {
    #[inline]
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Latin1(e) => Some(e),
            Self::Io(e) => Some(e),
            Self::NotFound | Self::InvalidStructure(_) | Self::NulInKeyword(_) => None,
        }
    }
}

impl From<io::Error> for CardError {
    #[inline]
    fn from(value: io::Error) -> Self {
        Self::Io(value)
    }
}

impl From<Latin1Error> for CardError {
    #[inline]
    fn from(value: Latin1Error) -> Self {
        Self::Latin1(value)
    }
}

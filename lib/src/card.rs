mod v2;

pub use self::v2::*;
use crate::{
    chunk::Chunk,
    error::CardError,
    png::Chunks,
    text::{TextChunk, decode_latin1},
};
use base64::{
    Engine, alphabet,
    engine::{DecodePaddingMode, GeneralPurpose, GeneralPurposeConfig},
};
use indexmap::IndexMap;
use std::fmt::{self, Display, Formatter};

/// `tEXt` keyword of a v2 card.
pub const CHARA_KEYWORD: &str = "chara";
/// `tEXt` keyword of a v3 card.
pub const CCV3_KEYWORD: &str = "ccv3";
/// `tEXt` keyword prefix of a side-car asset; the asset path follows it.
pub const ASSET_KEYWORD_PREFIX: &str = "chara-ext-asset_:";

/// Which keyword a card payload was read from.
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Debug)]
pub enum CardKind {
    /// `ccv3`, preferred when present.
    Ccv3,
    /// Legacy `chara`.
    Chara,
}

impl CardKind {
    /// Returns the `tEXt` keyword for this kind.
    #[inline]
    pub const fn keyword(self) -> &'static str {
        match self {
            Self::Ccv3 => CCV3_KEYWORD,
            Self::Chara => CHARA_KEYWORD,
        }
    }
}

impl Display for CardKind {
    #[inline]
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(self.keyword())
    }
}

/// A reserved keyword in the `tEXt` namespace.
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub(crate) enum CardKeyword<'k> {
    Card(CardKind),
    Asset(&'k str),
}

impl<'k> CardKeyword<'k> {
    #[inline]
    pub(crate) fn classify(keyword: &'k str) -> Option<Self> {
        match keyword {
            CCV3_KEYWORD => Some(Self::Card(CardKind::Ccv3)),
            CHARA_KEYWORD => Some(Self::Card(CardKind::Chara)),
            _ => keyword.strip_prefix(ASSET_KEYWORD_PREFIX).map(Self::Asset),
        }
    }
}

/// Character card recovered from a PNG.
#[derive(Clone, Eq, PartialEq, Debug)]
pub struct Card {
    kind: CardKind,
    text: String,
    raw: String,
    assets: IndexMap<String, String>,
}

impl Card {
    /// The keyword the payload was read from.
    #[inline]
    pub fn kind(&self) -> CardKind {
        self.kind
    }

    /// The decoded payload, normally card JSON.
    #[inline]
    pub fn text(&self) -> &str {
        &self.text
    }

    /// The chunk text exactly as stored, normally Base64.
    ///
    /// Equal to [`Card::text`] for a legacy `chara` chunk holding raw JSON.
    #[inline]
    pub fn raw(&self) -> &str {
        &self.raw
    }

    /// Side-car assets keyed by path, in chunk order.
    #[inline]
    pub fn assets(&self) -> &IndexMap<String, String> {
        &self.assets
    }

    /// Consumes the card, returning the decoded payload.
    #[inline]
    pub fn into_text(self) -> String {
        self.text
    }

    /// Deserializes the payload as a generic JSON value.
    #[inline]
    pub fn json(&self) -> serde_json::Result<serde_json::Value> {
        serde_json::from_str(&self.text)
    }

    /// Deserializes the payload into the typed card model.
    ///
    /// # Examples
    /// ```
    /// # fn main() -> Result<(), Box<dyn std::error::Error>> {
    /// let png = include_bytes!("../../resources/test/chara.png");
    /// let card = libccpng::parse(png)?.character()?;
    /// assert_eq!(card.data.name, "Alice");
    /// # Ok(())
    /// # }
    /// ```
    #[inline]
    pub fn character(&self) -> serde_json::Result<CharacterCard> {
        serde_json::from_str(&self.text)
    }
}

struct Payload {
    text: String,
    raw: String,
}

/// Standard alphabet, padding optional.
const LENIENT: GeneralPurpose = GeneralPurpose::new(
    &alphabet::STANDARD,
    GeneralPurposeConfig::new().with_decode_padding_mode(DecodePaddingMode::Indifferent),
);

/// Decodes a payload written by any of the common exporters: padded or not,
/// wrapped across lines, or in the URL-safe alphabet.
fn decode_payload(raw: &[u8]) -> Result<String, String> {
    let normalized = raw
        .iter()
        .filter(|b| !b.is_ascii_whitespace())
        .map(|b| match b {
            b'-' => b'+',
            b'_' => b'/',
            b => *b,
        })
        .collect::<Vec<_>>();
    let bytes = LENIENT.decode(normalized).map_err(|e| e.to_string())?;
    String::from_utf8(bytes).map_err(|e| e.to_string())
}

/// Reads the character card from a PNG buffer.
///
/// Every `tEXt` chunk is inspected. A `ccv3` payload wins over a `chara`
/// payload. Assets (`chara-ext-asset_:<path>`) are collected verbatim.
///
/// Payload Base64 is read leniently: padding may be missing, ASCII whitespace
/// is ignored and the URL-safe `-`/`_` are accepted. A `ccv3` chunk whose text
/// still is not Base64 of UTF-8 is skipped. A `chara` chunk in the same state
/// is taken as raw text, which older exporters wrote.
///
/// # Errors
///
/// Returns [`CardError::NotFound`] if neither keyword carries a payload, or
/// [`CardError::Io`] if the buffer ends inside the signature or a chunk.
///
/// # Examples
/// ```
/// use libccpng::CardKind;
///
/// let png = include_bytes!("../../resources/test/chara.png");
/// let card = libccpng::parse(png).unwrap();
/// assert_eq!(card.kind(), CardKind::Chara);
/// assert!(card.text().starts_with('{'));
/// ```
pub fn parse(png: &[u8]) -> Result<Card, CardError> {
    let mut ccv3 = None;
    let mut chara = None;
    let mut assets = IndexMap::new();

    for chunk in Chunks::new(png)? {
        let (offset, chunk) = chunk?;
        let Some(text) = TextChunk::from_chunk(&chunk) else {
            continue;
        };
        let keyword = text.keyword();
        match CardKeyword::classify(&keyword) {
            Some(CardKeyword::Card(CardKind::Ccv3)) => match decode_payload(text.text_bytes()) {
                Ok(decoded) => {
                    ccv3 = Some(Payload {
                        text: decoded,
                        raw: text.text().into_owned(),
                    })
                }
                Err(e) => log::warn!("Skipping ccv3 chunk at {offset:#x}: {e}"),
            },
            Some(CardKeyword::Card(CardKind::Chara)) => {
                let raw = text.text().into_owned();
                let decoded = decode_payload(text.text_bytes()).unwrap_or_else(|e| {
                    log::warn!("chara chunk at {offset:#x} is not Base64 ({e}), using raw text");
                    raw.clone()
                });
                chara = Some(Payload { text: decoded, raw });
            }
            Some(CardKeyword::Asset(path)) => {
                log::trace!("Asset `{path}` at {offset:#x}, {} bytes", chunk.length());
                assets.insert(path.to_owned(), decode_latin1(text.text_bytes()));
            }
            None => (),
        }
    }

    let (kind, payload) = match (ccv3, chara) {
        (Some(payload), _) => (CardKind::Ccv3, payload),
        (None, Some(payload)) => (CardKind::Chara, payload),
        (None, None) => return Err(CardError::NotFound),
    };
    Ok(Card {
        kind,
        text: payload.text,
        raw: payload.raw,
        assets,
    })
}

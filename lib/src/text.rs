use crate::{
    chunk::{Chunk, ChunkExt, ChunkType, RawChunk},
    error::{CardError, Latin1Error},
};
use std::borrow::Cow;

/// How characters outside Latin-1 are handled when writing `tEXt` chunks.
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Debug, Default)]
pub enum Latin1Mode {
    /// Keep only the low byte of each code point. Matches the bytes written by
    /// earlier exporters, at the cost of corrupting characters above U+00FF.
    #[default]
    Lossy,
    /// Reject any character above U+00FF.
    Strict,
}

impl Latin1Mode {
    #[inline]
    pub(crate) fn encode(self, s: &str) -> Result<Vec<u8>, Latin1Error> {
        match self {
            Self::Lossy => Ok(encode_latin1_lossy(s)),
            Self::Strict => encode_latin1(s),
        }
    }
}

/// Masks every character to its low byte.
#[inline]
pub(crate) fn encode_latin1_lossy(s: &str) -> Vec<u8> {
    s.chars().map(|c| (c as u32 & 0xFF) as u8).collect()
}

#[inline]
pub(crate) fn encode_latin1(s: &str) -> Result<Vec<u8>, Latin1Error> {
    s.chars()
        .enumerate()
        .map(|(index, ch)| u8::try_from(ch).map_err(|_| Latin1Error { index, ch }))
        .collect()
}

/// Maps each byte to the character with the same code point.
#[inline]
pub(crate) fn decode_latin1(bytes: &[u8]) -> String {
    bytes.iter().copied().map(char::from).collect()
}

fn build_text_chunk(keyword: &[u8], text: &[u8]) -> RawChunk {
    let mut data = Vec::with_capacity(keyword.len() + 1 + text.len());
    data.extend_from_slice(keyword);
    data.push(0);
    data.extend_from_slice(text);
    RawChunk::from_data(ChunkType::tEXt, data)
}

/// Builds a `tEXt` chunk holding `keyword ‖ 0x00 ‖ text`, masking every
/// character to its low byte.
///
/// The returned bytes are a complete chunk: big-endian length, `tEXt`, the
/// data, and the CRC-32 over type and data.
///
/// # Examples
/// ```
/// let chunk = libccpng::encode_text_chunk("chara", "e30=");
/// assert_eq!(&chunk[..4], &[0, 0, 0, 10]);
/// assert_eq!(&chunk[4..8], b"tEXt");
/// assert_eq!(&chunk[8..18], b"chara\0e30=");
/// assert_eq!(chunk.len(), 22);
/// ```
#[inline]
pub fn encode_text_chunk(keyword: &str, text: &str) -> Vec<u8> {
    build_text_chunk(&encode_latin1_lossy(keyword), &encode_latin1_lossy(text)).to_bytes()
}

/// Like [`encode_text_chunk`] but fails on characters above U+00FF instead of
/// masking them, and on a keyword holding a null byte.
///
/// # Errors
///
/// Returns [`CardError::Latin1`] or [`CardError::NulInKeyword`].
///
/// # Examples
/// ```
/// assert!(libccpng::try_encode_text_chunk("chara-ext-asset_:bg.png", "abcd").is_ok());
/// assert!(libccpng::try_encode_text_chunk("chara-ext-asset_:背景.png", "abcd").is_err());
/// assert!(libccpng::try_encode_text_chunk("chara\0x", "abcd").is_err());
/// ```
#[inline]
pub fn try_encode_text_chunk(keyword: &str, text: &str) -> Result<Vec<u8>, CardError> {
    text_chunk(keyword, text, Latin1Mode::Strict).map(|it| it.to_bytes())
}

/// Builds a `tEXt` chunk for writing. The keyword is checked after encoding,
/// so a lossy mask landing on 0x00 (e.g. U+0100) is caught too.
#[inline]
pub(crate) fn text_chunk(
    keyword: &str,
    text: &str,
    mode: Latin1Mode,
) -> Result<RawChunk, CardError> {
    let encoded = mode.encode(keyword)?;
    if encoded.contains(&0) {
        return Err(CardError::NulInKeyword(keyword.to_owned()));
    }
    Ok(build_text_chunk(&encoded, &mode.encode(text)?))
}

/// Contents of a `tEXt` chunk.
#[derive(Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Debug)]
pub struct TextChunk<'d> {
    keyword: &'d [u8],
    text: &'d [u8],
}

impl<'d> TextChunk<'d> {
    /// Reads a `tEXt` chunk, returning `None` for any other chunk type.
    ///
    /// The keyword runs up to the first null byte. Without a null byte the
    /// whole data is taken as the keyword and the text is empty.
    #[inline]
    pub fn from_chunk(chunk: &RawChunk<&'d [u8]>) -> Option<Self> {
        (chunk.ty() == ChunkType::tEXt).then(|| Self::from_data(chunk.data))
    }

    #[inline]
    pub(crate) fn from_data(data: &'d [u8]) -> Self {
        match data.iter().position(|b| *b == 0) {
            Some(nul) => Self {
                keyword: &data[..nul],
                text: &data[nul + 1..],
            },
            None => Self {
                keyword: data,
                text: &[],
            },
        }
    }

    /// Raw keyword bytes.
    #[inline]
    pub fn keyword_bytes(&self) -> &'d [u8] {
        self.keyword
    }

    /// Raw text bytes.
    #[inline]
    pub fn text_bytes(&self) -> &'d [u8] {
        self.text
    }

    /// Keyword decoded as Latin-1.
    #[inline]
    pub fn keyword(&self) -> Cow<'d, str> {
        latin1_str(self.keyword)
    }

    /// Text decoded as Latin-1.
    #[inline]
    pub fn text(&self) -> Cow<'d, str> {
        latin1_str(self.text)
    }
}

/// ASCII is the common case and borrows.
#[inline]
fn latin1_str(bytes: &[u8]) -> Cow<'_, str> {
    if bytes.is_ascii() {
        // ASCII is valid UTF-8.
        Cow::Borrowed(std::str::from_utf8(bytes).unwrap_or_default())
    } else {
        Cow::Owned(decode_latin1(bytes))
    }
}

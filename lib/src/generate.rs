use crate::{
    card::{ASSET_KEYWORD_PREFIX, CardKeyword, CardKind, parse},
    chunk::{Chunk, ChunkType, ChunkWriter, RawChunk},
    error::CardError,
    png::{Chunks, split_signature},
    text::{Latin1Mode, TextChunk, text_chunk},
};
use base64::{Engine, engine::general_purpose::STANDARD};
use indexmap::IndexMap;
use serde_json::Value;

/// Card format written by [`generate`].
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Debug, Default)]
pub enum CardVersion {
    /// A single `chara` chunk. Assets are not written.
    #[default]
    V2,
    /// A `ccv3` chunk followed by one chunk per asset.
    V3,
}

impl CardVersion {
    /// The kind of chunk that carries the card for this version.
    #[inline]
    pub const fn kind(self) -> CardKind {
        match self {
            Self::V2 => CardKind::Chara,
            Self::V3 => CardKind::Ccv3,
        }
    }
}

/// Options for [`generate`].
///
/// The default writes a v2 card without assets, masks non-Latin-1 characters
/// and verifies the result.
#[derive(Clone, Eq, PartialEq, Debug)]
pub struct GenerateOptions {
    version: CardVersion,
    assets: IndexMap<String, String>,
    latin1_mode: Latin1Mode,
    verify: bool,
}

impl Default for GenerateOptions {
    #[inline]
    fn default() -> Self {
        Self::builder().build()
    }
}

impl GenerateOptions {
    /// Returns a builder for [GenerateOptions].
    ///
    /// # Examples
    ///
    /// ```rust
    /// use libccpng::{CardVersion, GenerateOptions};
    ///
    /// let options = GenerateOptions::builder()
    ///     .version(CardVersion::V3)
    ///     .asset("bg.png", "iVBORw0KGgo=")
    ///     .build();
    /// assert_eq!(options.assets().len(), 1);
    /// ```
    #[inline]
    pub fn builder() -> GenerateOptionsBuilder {
        GenerateOptionsBuilder::new()
    }

    /// Converts [GenerateOptions] into a [GenerateOptionsBuilder].
    #[inline]
    pub fn into_builder(self) -> GenerateOptionsBuilder {
        self.into()
    }

    #[inline]
    pub fn version(&self) -> CardVersion {
        self.version
    }

    #[inline]
    pub fn assets(&self) -> &IndexMap<String, String> {
        &self.assets
    }

    #[inline]
    pub fn latin1_mode(&self) -> Latin1Mode {
        self.latin1_mode
    }

    #[inline]
    pub fn verify(&self) -> bool {
        self.verify
    }
}

/// A builder for creating [`GenerateOptions`].
#[derive(Clone, Eq, PartialEq, Debug)]
pub struct GenerateOptionsBuilder {
    version: CardVersion,
    assets: IndexMap<String, String>,
    latin1_mode: Latin1Mode,
    verify: bool,
}

impl Default for GenerateOptionsBuilder {
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

impl From<GenerateOptions> for GenerateOptionsBuilder {
    #[inline]
    fn from(value: GenerateOptions) -> Self {
        Self {
            version: value.version,
            assets: value.assets,
            latin1_mode: value.latin1_mode,
            verify: value.verify,
        }
    }
}

impl GenerateOptionsBuilder {
    fn new() -> Self {
        Self {
            version: CardVersion::V2,
            assets: IndexMap::new(),
            latin1_mode: Latin1Mode::Lossy,
            verify: true,
        }
    }

    /// Sets the [`CardVersion`].
    #[inline]
    pub fn version(&mut self, version: CardVersion) -> &mut Self {
        self.version = version;
        self
    }

    /// Adds an asset, replacing any earlier asset with the same path.
    #[inline]
    pub fn asset<P: Into<String>, T: Into<String>>(&mut self, path: P, text: T) -> &mut Self {
        self.assets.insert(path.into(), text.into());
        self
    }

    /// Adds every asset of `assets`.
    #[inline]
    pub fn assets<I, P, T>(&mut self, assets: I) -> &mut Self
    where
        I: IntoIterator<Item = (P, T)>,
        P: Into<String>,
        T: Into<String>,
    {
        self.assets
            .extend(assets.into_iter().map(|(p, t)| (p.into(), t.into())));
        self
    }

    /// Sets the [`Latin1Mode`] used for asset keywords and texts.
    #[inline]
    pub fn latin1_mode(&mut self, mode: Latin1Mode) -> &mut Self {
        self.latin1_mode = mode;
        self
    }

    /// Whether to read the output back and compare it with the input card.
    #[inline]
    pub fn verify(&mut self, verify: bool) -> &mut Self {
        self.verify = verify;
        self
    }

    /// Creates a new [`GenerateOptions`] from this builder.
    #[inline]
    pub fn build(&self) -> GenerateOptions {
        GenerateOptions {
            version: self.version,
            assets: self.assets.clone(),
            latin1_mode: self.latin1_mode,
            verify: self.verify,
        }
    }
}

#[inline]
fn is_card_chunk(chunk: &RawChunk<&[u8]>) -> bool {
    TextChunk::from_chunk(chunk).is_some_and(|it| CardKeyword::classify(&it.keyword()).is_some())
}

fn card_chunks(card_data: &str, options: &GenerateOptions) -> Result<Vec<RawChunk>, CardError> {
    let encoded = STANDARD.encode(card_data.as_bytes());
    let mode = options.latin1_mode;
    match options.version {
        CardVersion::V3 => {
            let mut chunks = Vec::with_capacity(1 + options.assets.len());
            chunks.push(text_chunk(CardKind::Ccv3.keyword(), &encoded, mode)?);
            for (path, text) in &options.assets {
                let keyword = format!("{ASSET_KEYWORD_PREFIX}{path}");
                chunks.push(text_chunk(&keyword, text, mode)?);
            }
            Ok(chunks)
        }
        CardVersion::V2 => {
            if !options.assets.is_empty() {
                log::debug!("Ignoring {} asset(s) for a v2 card", options.assets.len());
            }
            Ok(vec![text_chunk(CardKind::Chara.keyword(), &encoded, mode)?])
        }
    }
}

struct Rewritten {
    bytes: Vec<u8>,
    /// Signature included.
    staged: usize,
    /// Type and data length of the last chunk written.
    last: Option<(ChunkType, u32)>,
}

/// Copies `png` without card chunks, placing `inject` before the first `IEND`.
fn rewrite(png: &[u8], inject: &[RawChunk]) -> Result<Rewritten, CardError> {
    let (signature, _) = split_signature(png)?;
    let extra = inject.iter().map(|it| it.bytes_len()).sum::<usize>();
    let mut writer = ChunkWriter::new(Vec::with_capacity(png.len() + extra));
    writer.write_signature(signature)?;
    let mut last = None;
    let mut injected = false;

    for chunk in Chunks::new(png)? {
        let (offset, chunk) = chunk?;
        if is_card_chunk(&chunk) {
            log::debug!("Dropping existing card chunk at {offset:#x}");
            continue;
        }
        if chunk.ty() == ChunkType::IEND && !injected {
            for new in inject {
                writer.write_raw_chunk(new)?;
            }
            injected = true;
        }
        writer.write_raw_chunk(&chunk)?;
        last = Some((chunk.ty(), chunk.length()));
    }
    if !injected && !inject.is_empty() {
        log::debug!("No IEND chunk, card chunks were not written");
    }
    Ok(Rewritten {
        staged: 1 + writer.chunks(),
        bytes: writer.into_inner(),
        last,
    })
}

/// Embeds `card_data` into a copy of `png`.
///
/// Existing card chunks (`chara`, `ccv3` and `chara-ext-asset_:*`) are dropped,
/// then the new ones are placed right before `IEND`. Every other chunk is copied
/// byte for byte in its original order, so re-exporting never piles up stale
/// cards.
///
/// `card_data` is Base64 encoded from its UTF-8 bytes. With
/// [`GenerateOptions::verify`] set, the output is parsed back and compared with
/// `card_data`; a mismatch is only logged as a warning.
///
/// # Errors
///
/// Returns [`CardError::InvalidStructure`] if the output does not end with
/// an empty `IEND` (e.g. the source has no `IEND`), [`CardError::Latin1`] for
/// unrepresentable asset text in [`Latin1Mode::Strict`],
/// [`CardError::NulInKeyword`] for an asset path that encodes to a null byte,
/// and [`CardError::Io`] for a truncated source.
///
/// # Examples
/// ```
/// use libccpng::{CardKind, CardVersion, GenerateOptions};
///
/// # fn main() -> Result<(), libccpng::CardError> {
/// let png = include_bytes!("../../resources/test/plain.png");
/// let options = GenerateOptions::builder()
///     .version(CardVersion::V3)
///     .asset("bg.png", "abcd")
///     .build();
/// let exported = libccpng::generate(png, r#"{"name":"A"}"#, &options)?;
///
/// let card = libccpng::parse(&exported)?;
/// assert_eq!(card.kind(), CardKind::Ccv3);
/// assert_eq!(card.assets()["bg.png"], "abcd");
/// # Ok(())
/// # }
/// ```
pub fn generate(
    png: &[u8],
    card_data: &str,
    options: &GenerateOptions,
) -> Result<Vec<u8>, CardError> {
    let chunks = card_chunks(card_data, options)?;
    let output = rewrite(png, &chunks)?;
    log::debug!(
        "Generated {} chunks, last {}, version {:?}",
        output.staged,
        output
            .last
            .map_or_else(|| "none".to_owned(), |(ty, _)| ty.to_string()),
        options.version
    );
    if output.staged < 2 {
        return Err(CardError::InvalidStructure("fewer than 2 chunks"));
    }
    match output.last {
        Some((ChunkType::IEND, 0)) => {}
        Some((ChunkType::IEND, _)) => {
            return Err(CardError::InvalidStructure("IEND must be empty"));
        }
        _ => return Err(CardError::InvalidStructure("IEND must be last chunk")),
    }
    if options.verify {
        if let Err(reason) = verify(&output.bytes, card_data, options.version) {
            log::warn!("Card verification failed, PNG was still generated: {reason}");
        }
    }
    Ok(output.bytes)
}

/// Removes every card chunk from a copy of `png`.
///
/// Uses the same rule as [`generate`] for what counts as a card chunk; nothing
/// is added and every other chunk is kept byte for byte.
///
/// # Examples
/// ```
/// # fn main() -> Result<(), libccpng::CardError> {
/// let png = include_bytes!("../../resources/test/chara.png");
/// let stripped = libccpng::strip(png)?;
/// assert!(matches!(libccpng::parse(&stripped), Err(libccpng::CardError::NotFound)));
/// # Ok(())
/// # }
/// ```
#[inline]
pub fn strip(png: &[u8]) -> Result<Vec<u8>, CardError> {
    rewrite(png, &[]).map(|it| it.bytes)
}

/// Weak check for payloads that are not JSON.
#[inline]
fn looks_like_object(text: &str) -> bool {
    !text.is_empty() && text.contains('{') && text.contains('}')
}

fn verify(output: &[u8], card_data: &str, version: CardVersion) -> Result<(), String> {
    let card = parse(output).map_err(|e| format!("could not read the card back: {e}"))?;
    if card.kind() != version.kind() {
        return Err(format!(
            "expected a {} chunk, found {}",
            version.kind(),
            card.kind()
        ));
    }
    let recovered = card.text();
    match (
        serde_json::from_str::<Value>(card_data),
        serde_json::from_str::<Value>(recovered),
    ) {
        (Ok(expected), Ok(actual)) if expected == actual => Ok(()),
        (Ok(_), Ok(_)) => Err("recovered JSON differs from the input".into()),
        _ if recovered == card_data || looks_like_object(recovered) => Ok(()),
        _ => Err(format!(
            "recovered payload ({} bytes) does not match the input ({} bytes)",
            recovered.len(),
            card_data.len()
        )),
    }
}

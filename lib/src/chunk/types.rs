use std::fmt::{self, Display, Formatter};

/// A 4-byte chunk type code.
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Debug)]
pub struct ChunkType(pub [u8; 4]);

impl ChunkType {
    // -- Critical chunks --
    /// Image header
    pub const IHDR: ChunkType = ChunkType(*b"IHDR");
    /// Palette
    pub const PLTE: ChunkType = ChunkType(*b"PLTE");
    /// Image data
    pub const IDAT: ChunkType = ChunkType(*b"IDAT");
    /// Image end
    pub const IEND: ChunkType = ChunkType(*b"IEND");

    // -- Ancillary chunks --
    /// Latin-1 textual data
    #[allow(non_upper_case_globals)]
    pub const tEXt: ChunkType = ChunkType(*b"tEXt");
    /// Compressed textual data
    #[allow(non_upper_case_globals)]
    pub const zTXt: ChunkType = ChunkType(*b"zTXt");
    /// International textual data
    #[allow(non_upper_case_globals)]
    pub const iTXt: ChunkType = ChunkType(*b"iTXt");

    /// Returns the byte length of a chunk type code, always 4.
    #[allow(clippy::len_without_is_empty)]
    #[inline]
    pub const fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns `true` if the chunk is ancillary, i.e. a decoder may ignore it.
    ///
    /// ```
    /// use libccpng::ChunkType;
    ///
    /// assert!(ChunkType::tEXt.is_ancillary());
    /// assert!(!ChunkType::IEND.is_ancillary());
    /// ```
    #[inline]
    pub const fn is_ancillary(&self) -> bool {
        self.0[0] & 0x20 != 0
    }
}

impl Display for ChunkType {
    #[inline]
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        for b in self.0 {
            if b.is_ascii_graphic() {
                write!(f, "{}", b as char)?;
            } else {
                write!(f, "\\x{b:02x}")?;
            }
        }
        Ok(())
    }
}

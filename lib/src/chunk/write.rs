use crate::chunk::{Chunk, ChunkExt};
use std::io::{self, Write};

/// Writes a PNG stream chunk by chunk, counting what it emits.
pub(crate) struct ChunkWriter<W> {
    w: W,
    chunks: usize,
}

impl<W: Write> ChunkWriter<W> {
    #[inline]
    pub(crate) const fn new(w: W) -> Self {
        Self { w, chunks: 0 }
    }

    #[inline]
    pub(crate) fn write_signature(&mut self, signature: &[u8]) -> io::Result<()> {
        self.w.write_all(signature)
    }

    /// Writes a chunk as it reports itself, stored CRC included.
    #[inline]
    pub(crate) fn write_raw_chunk<C: Chunk>(&mut self, chunk: C) -> io::Result<usize> {
        let written = chunk.write_chunk_in(&mut self.w)?;
        self.chunks += 1;
        Ok(written)
    }

    /// Number of chunks written so far, signature excluded.
    #[inline]
    pub(crate) const fn chunks(&self) -> usize {
        self.chunks
    }

    #[inline]
    pub(crate) fn into_inner(self) -> W {
        self.w
    }
}

use crate::chunk::{RawChunk, read_chunk_from_slice};
use std::{io, iter::FusedIterator};

/// The magic number of PNG
pub const PNG_SIGNATURE: &[u8; 8] = b"\x89PNG\r\n\x1A\n";

/// Returns `true` if `bytes` starts with [`PNG_SIGNATURE`].
///
/// ```
/// assert!(libccpng::has_png_signature(b"\x89PNG\r\n\x1A\n\0\0\0\0IEND"));
/// assert!(!libccpng::has_png_signature(b"GIF89a"));
/// ```
#[inline]
pub fn has_png_signature(bytes: &[u8]) -> bool {
    bytes.starts_with(PNG_SIGNATURE)
}

/// Splits the 8-byte signature from the chunk stream.
///
/// The signature bytes are not compared against [`PNG_SIGNATURE`]; the
/// caller is trusted to pass a PNG.
#[inline]
pub(crate) fn split_signature(bytes: &[u8]) -> io::Result<(&[u8; 8], &[u8])> {
    bytes
        .split_first_chunk::<{ PNG_SIGNATURE.len() }>()
        .ok_or_else(|| io::ErrorKind::UnexpectedEof.into())
}

/// An iterator over the chunks of a PNG buffer.
///
/// Yields each chunk together with its byte offset from the start of the
/// buffer. Iteration ends when the buffer is exhausted; `IEND` gets no special
/// treatment. A truncated chunk yields one error and then ends.
///
/// # Examples
/// ```
/// use libccpng::{prelude::*, ChunkType, Chunks};
///
/// # fn main() -> std::io::Result<()> {
/// let png = include_bytes!("../../resources/test/plain.png");
/// let types = Chunks::new(png)?
///     .map(|it| it.map(|(_, chunk)| chunk.ty()))
///     .collect::<std::io::Result<Vec<_>>>()?;
/// assert_eq!(types.last(), Some(&ChunkType::IEND));
/// # Ok(())
/// # }
/// ```
#[derive(Clone, Debug)]
pub struct Chunks<'d> {
    rest: &'d [u8],
    offset: usize,
    failed: bool,
}

impl<'d> Chunks<'d> {
    /// Creates an iterator over the chunks following the signature of `png`.
    ///
    /// # Errors
    ///
    /// Returns an error of kind [`io::ErrorKind::UnexpectedEof`] if `png` is
    /// shorter than the signature.
    #[inline]
    pub fn new(png: &'d [u8]) -> io::Result<Self> {
        let (_, rest) = split_signature(png)?;
        Ok(Self {
            rest,
            offset: PNG_SIGNATURE.len(),
            failed: false,
        })
    }
}

impl<'d> Iterator for Chunks<'d> {
    type Item = io::Result<(usize, RawChunk<&'d [u8]>)>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed || self.rest.is_empty() {
            return None;
        }
        match read_chunk_from_slice(self.rest) {
            Ok((chunk, rest)) => {
                let offset = self.offset;
                self.offset += chunk.bytes_len();
                self.rest = rest;
                Some(Ok((offset, chunk)))
            }
            Err(e) => {
                self.failed = true;
                Some(Err(io::Error::new(
                    e.kind(),
                    format!("truncated chunk at offset {:#x}", self.offset),
                )))
            }
        }
    }
}

impl FusedIterator for Chunks<'_> {}

use crc32fast::Hasher;

/// Incremental CRC-32 (ISO-HDLC), the checksum used by PNG chunks.
#[derive(Clone, Default, Debug)]
pub(crate) struct Crc32(Hasher);

impl Crc32 {
    #[inline]
    pub(crate) fn new() -> Self {
        Self(Hasher::new())
    }

    #[inline]
    pub(crate) fn update(&mut self, buf: &[u8]) {
        self.0.update(buf)
    }

    #[inline]
    pub(crate) fn finalize(self) -> u32 {
        self.0.finalize()
    }
}

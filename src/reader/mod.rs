#![doc = r#"
A forward-only cursor over the bytes of a Standard MIDI File.

Every multi-byte read is big-endian, as mandated by the file format, and every
read fails with [`ReaderErrorKind::OutOfBounds`] instead of reading past the
end of the buffer. Delta times and meta lengths use MIDI's variable-length
quantity encoding, which is capped at 28 significant bits (four bytes).
"#]

mod error;
pub use error::*;

/// Largest value a variable-length quantity may carry.
pub const MAX_VARLEN: u32 = 0x0FFF_FFFF;

/// Sequential reader over an immutable byte buffer.
#[derive(Debug, Clone)]
pub struct Reader<'slc> {
    data: &'slc [u8],
    position: usize,
}

impl<'slc> Reader<'slc> {
    /// Create a reader positioned at the first byte of `data`.
    pub const fn from_byte_slice(data: &'slc [u8]) -> Self {
        Self { data, position: 0 }
    }

    /// The offset of the next byte to be read.
    #[inline]
    pub const fn buffer_position(&self) -> usize {
        self.position
    }

    /// Total length of the underlying buffer.
    #[inline]
    pub const fn buffer_len(&self) -> usize {
        self.data.len()
    }

    /// Bytes left to read.
    #[inline]
    pub const fn remaining(&self) -> usize {
        self.data.len() - self.position
    }

    /// True once every byte has been consumed.
    #[inline]
    pub const fn is_at_end(&self) -> bool {
        self.position >= self.data.len()
    }

    /// Returns the next byte without consuming it.
    pub fn peek_u8(&self) -> ReadResult<u8> {
        self.data
            .get(self.position)
            .copied()
            .ok_or(ReaderError::oob(self.position))
    }

    /// Reads one byte.
    pub fn read_u8(&mut self) -> ReadResult<u8> {
        let byte = self.peek_u8()?;
        self.position += 1;
        Ok(byte)
    }

    /// Reads a big-endian `u16`.
    pub fn read_be16(&mut self) -> ReadResult<u16> {
        self.read_exact_size().map(u16::from_be_bytes)
    }

    /// Reads a big-endian `u32`.
    pub fn read_be32(&mut self) -> ReadResult<u32> {
        self.read_exact_size().map(u32::from_be_bytes)
    }

    /// Reads a four byte chunk tag such as `MThd` or `MTrk`.
    pub fn read_tag(&mut self) -> ReadResult<[u8; 4]> {
        self.read_exact_size()
    }

    /// Reads exactly `N` bytes into an array.
    pub fn read_exact_size<const N: usize>(&mut self) -> ReadResult<[u8; N]> {
        let slice = self.read_slice(N)?;
        let mut out = [0; N];
        out.copy_from_slice(slice);
        Ok(out)
    }

    /// Reads `len` bytes, borrowing them from the underlying buffer.
    pub fn read_slice(&mut self, len: usize) -> ReadResult<&'slc [u8]> {
        let end = self
            .position
            .checked_add(len)
            .filter(|end| *end <= self.data.len())
            .ok_or(ReaderError::oob(self.position))?;
        let slice = &self.data[self.position..end];
        self.position = end;
        Ok(slice)
    }

    /// Advances the cursor by `len` bytes.
    pub fn skip(&mut self, len: usize) -> ReadResult<()> {
        self.read_slice(len).map(|_| ())
    }

    /// Reads a MIDI variable-length quantity.
    ///
    /// Each byte contributes its low seven bits, most significant group first;
    /// a clear high bit ends the quantity. A fourth byte that still has its
    /// continuation bit set would push the value past 28 bits and is rejected
    /// with [`ReaderErrorKind::MalformedVlq`].
    pub fn read_varlen(&mut self) -> ReadResult<u32> {
        let start = self.position;
        let mut value: u32 = 0;
        for _ in 0..4 {
            let byte = self.read_u8()?;
            value = (value << 7) | u32::from(byte & 0x7F);
            if byte & 0x80 == 0 {
                return Ok(value);
            }
        }
        Err(ReaderError::new(start, ReaderErrorKind::MalformedVlq))
    }
}

/// Encodes `value` as a MIDI variable-length quantity.
///
/// Values above [`MAX_VARLEN`] would need a fifth byte and are rejected.
pub fn encode_varlen(value: u32) -> Result<Vec<u8>, ReaderErrorKind> {
    if value > MAX_VARLEN {
        return Err(ReaderErrorKind::MalformedVlq);
    }
    let mut groups = vec![(value & 0x7F) as u8];
    let mut rest = value >> 7;
    while rest > 0 {
        groups.push(0x80 | (rest & 0x7F) as u8);
        rest >>= 7;
    }
    groups.reverse();
    Ok(groups)
}

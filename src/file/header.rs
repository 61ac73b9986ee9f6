use crate::{
    ChunkError,
    file::Timing,
    reader::{ReadResult, Reader, ReaderError, ReaderErrorKind, inv_data},
};
use num_enum::TryFromPrimitive;

/// Tag of the header chunk.
pub const HEADER_TAG: [u8; 4] = *b"MThd";

#[doc = r#"
The header chunk exactly as it appears in the file.

```text
"MThd" <chunk_size: u32> <format_type: u16> <track_count: u16> <time_division: u16>
```
"#]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RawHeader {
    /// Always `MThd`
    pub chunk_id: [u8; 4],
    /// Declared length of the chunk body, normally 6
    pub chunk_size: u32,
    /// 0, 1 or 2
    pub format_type: u16,
    /// Number of track chunks that follow
    pub track_count: u16,
    /// Ticks per quarter note, or SMPTE frames when bit 15 is set
    pub time_division: u16,
}

impl RawHeader {
    /// Reads the header chunk. Bytes beyond the six defined fields are skipped.
    pub(crate) fn read(reader: &mut Reader<'_>) -> ReadResult<Self> {
        let start = reader.buffer_position();
        let chunk_id = reader.read_tag()?;
        if chunk_id != HEADER_TAG {
            return Err(ReaderError::new(
                start,
                ReaderErrorKind::chunk(ChunkError::InvalidHeaderTag(chunk_id)),
            ));
        }
        let chunk_size = reader.read_be32()?;
        if chunk_size < 6 {
            return Err(inv_data(reader, ChunkError::HeaderLength(chunk_size)));
        }
        let format_type = reader.read_be16()?;
        let track_count = reader.read_be16()?;
        let time_division = reader.read_be16()?;
        reader.skip((chunk_size - 6) as usize)?;

        Ok(Self {
            chunk_id,
            chunk_size,
            format_type,
            track_count,
            time_division,
        })
    }
}

/// How the tracks of a file relate to each other.
#[derive(Debug, Clone, Copy, PartialEq, Eq, TryFromPrimitive)]
#[repr(u16)]
pub enum FormatType {
    /// Format 0: one track carrying every channel
    SingleMultiChannel = 0,
    /// Format 1: tracks play simultaneously
    Simultaneous = 1,
    /// Format 2: tracks are independent sequences.
    ///
    /// They are still merged as if they played together.
    SequentiallyIndependent = 2,
}

#[doc = r#"
Interpreted header information of a MIDI file
"#]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Header {
    format: FormatType,
    track_count: u16,
    timing: Timing,
}

impl Header {
    /// Create a new header
    pub fn new(format: FormatType, track_count: u16, timing: Timing) -> Self {
        Self {
            format,
            track_count,
            timing,
        }
    }

    /// Reads and interprets the header chunk.
    pub(crate) fn read(reader: &mut Reader<'_>) -> ReadResult<Self> {
        let raw = RawHeader::read(reader)?;
        let format = FormatType::try_from(raw.format_type)
            .map_err(|_| inv_data(reader, ChunkError::InvalidFormat(raw.format_type)))?;
        let timing = Timing::from_division(raw.time_division).map_err(|e| inv_data(reader, e))?;

        tracing::debug!(
            ?format,
            track_count = raw.track_count,
            ?timing,
            "decoded MIDI header"
        );
        if format == FormatType::SequentiallyIndependent {
            tracing::warn!("format 2 file: independent sequences will be merged as concurrent tracks");
        }

        Ok(Self::new(format, raw.track_count, timing))
    }

    /// The file format
    pub fn format(&self) -> FormatType {
        self.format
    }

    /// Number of track chunks declared by the header
    pub fn track_count(&self) -> u16 {
        self.track_count
    }

    /// Get the timing props
    pub fn timing(&self) -> &Timing {
        &self.timing
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ParseError;

    fn header_bytes(size: u32, format: u16, tracks: u16, division: u16) -> Vec<u8> {
        let mut bytes = b"MThd".to_vec();
        bytes.extend_from_slice(&size.to_be_bytes());
        bytes.extend_from_slice(&format.to_be_bytes());
        bytes.extend_from_slice(&tracks.to_be_bytes());
        bytes.extend_from_slice(&division.to_be_bytes());
        bytes
    }

    #[test]
    fn reads_raw_fields() {
        let bytes = header_bytes(6, 1, 3, 384);
        let mut reader = Reader::from_byte_slice(&bytes);
        let header = Header::read(&mut reader).unwrap();
        assert_eq!(header.format(), FormatType::Simultaneous);
        assert_eq!(header.track_count(), 3);
        assert_eq!(header.timing().ticks_per_quarter_note(), Some(384));
        assert!(reader.is_at_end());
    }

    #[test]
    fn skips_extended_header_bytes() {
        let mut bytes = header_bytes(8, 0, 1, 96);
        bytes.extend_from_slice(&[0xAA, 0xBB]);
        let mut reader = Reader::from_byte_slice(&bytes);
        let raw = RawHeader::read(&mut reader).unwrap();
        assert_eq!(raw.chunk_size, 8);
        assert!(reader.is_at_end());
    }

    #[test]
    fn rejects_wrong_tag() {
        let mut bytes = header_bytes(6, 0, 1, 96);
        bytes[..4].copy_from_slice(b"RIFF");
        let mut reader = Reader::from_byte_slice(&bytes);
        let err = Header::read(&mut reader).unwrap_err();
        assert_eq!(err.position(), 0);
        assert_eq!(
            err.error_kind(),
            &ReaderErrorKind::ParseError(ParseError::Chunk(ChunkError::InvalidHeaderTag(
                *b"RIFF"
            )))
        );
    }

    #[test]
    fn rejects_unknown_format() {
        let bytes = header_bytes(6, 3, 1, 96);
        let mut reader = Reader::from_byte_slice(&bytes);
        let err = Header::read(&mut reader).unwrap_err();
        assert_eq!(
            err.error_kind(),
            &ReaderErrorKind::chunk(ChunkError::InvalidFormat(3))
        );
    }

    #[test]
    fn rejects_short_header() {
        let bytes = header_bytes(4, 0, 1, 96);
        let mut reader = Reader::from_byte_slice(&bytes);
        let err = Header::read(&mut reader).unwrap_err();
        assert_eq!(
            err.error_kind(),
            &ReaderErrorKind::chunk(ChunkError::HeaderLength(4))
        );
    }
}

#![doc = r#"
Track chunks (`MTrk`)

A track chunk is a length-prefixed run of events. Each event starts with a
delta time in ticks, relative to the previous event on the same track.
Chunks with any other tag are skipped whole and read as an empty track.
"#]

mod event;
pub use event::*;

use crate::{
    ChunkError,
    reader::{ReadResult, Reader, ReaderError, ReaderErrorKind},
};

/// Chunk tag of a track
pub const TRACK_TAG: [u8; 4] = *b"MTrk";

/// The decoded events of one track chunk, in file order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Track {
    events: Vec<TrackEvent>,
}

impl Track {
    /// Create a track from a list of events
    pub fn new(events: Vec<TrackEvent>) -> Self {
        Self { events }
    }

    /// Reads one chunk.
    pub(crate) fn read(reader: &mut Reader<'_>) -> ReadResult<Self> {
        let tag = reader.read_tag()?;
        let chunk_size = reader.read_be32()? as usize;

        if tag != TRACK_TAG {
            tracing::trace!(
                tag = %String::from_utf8_lossy(&tag),
                chunk_size,
                "skipping unknown chunk"
            );
            reader.skip(chunk_size)?;
            return Ok(Self::default());
        }

        let start = reader.buffer_position();
        let end = start.saturating_add(chunk_size);
        let mut events = Vec::new();
        let mut running_status = None;
        while reader.buffer_position() < end {
            let (event, status) = TrackEvent::read(reader, running_status)?;
            running_status = status;
            events.push(event);
        }

        let actual = reader.buffer_position() - start;
        if actual != chunk_size {
            return Err(ReaderError::new(
                reader.buffer_position(),
                ReaderErrorKind::chunk(ChunkError::TruncatedTrack {
                    expected: chunk_size,
                    actual,
                }),
            ));
        }
        tracing::trace!(events = events.len(), "decoded track");

        Ok(Self { events })
    }

    /// The events of the track
    pub fn events(&self) -> &[TrackEvent] {
        &self.events
    }

    /// Number of events
    pub fn len(&self) -> usize {
        self.events.len()
    }

    /// True for tracks without events, such as skipped chunks.
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Total length of the track in ticks
    pub fn duration_ticks(&self) -> u64 {
        self.events
            .iter()
            .map(|event| u64::from(event.delta_ticks()))
            .sum()
    }
}

impl IntoIterator for Track {
    type Item = TrackEvent;
    type IntoIter = std::vec::IntoIter<TrackEvent>;

    fn into_iter(self) -> Self::IntoIter {
        self.events.into_iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::message::TrackMessage;

    fn chunk(tag: &[u8; 4], body: &[u8]) -> Vec<u8> {
        let mut bytes = tag.to_vec();
        bytes.extend_from_slice(&(body.len() as u32).to_be_bytes());
        bytes.extend_from_slice(body);
        bytes
    }

    #[test]
    fn reads_track_chunk() {
        let bytes = chunk(
            &TRACK_TAG,
            &[0x00, 0x90, 0x3C, 0x40, 0x60, 0x3C, 0x00, 0x00, 0xFF, 0x2F, 0x00],
        );
        let mut reader = Reader::from_byte_slice(&bytes);
        let track = Track::read(&mut reader).unwrap();
        assert!(reader.is_at_end());
        assert_eq!(track.len(), 3);
        assert_eq!(track.duration_ticks(), 0x60);
        assert!(matches!(
            track.events()[1].message(),
            TrackMessage::NoteOff { .. }
        ));
        assert!(track.events()[2].is_end_of_track());
    }

    #[test]
    fn skips_vendor_chunk() {
        let mut bytes = chunk(b"XFIH", &[1, 2, 3, 4, 5]);
        bytes.push(0xAA);
        let mut reader = Reader::from_byte_slice(&bytes);
        let track = Track::read(&mut reader).unwrap();
        assert!(track.is_empty());
        assert_eq!(reader.buffer_position(), 13);
    }

    #[test]
    fn event_overrunning_chunk_is_truncated() {
        // declared length cuts the note on in half
        let mut bytes = chunk(&TRACK_TAG, &[0x00, 0x90]);
        bytes.extend_from_slice(&[0x3C, 0x40]);
        let mut reader = Reader::from_byte_slice(&bytes);
        let err = Track::read(&mut reader).unwrap_err();
        assert_eq!(
            err.error_kind(),
            &ReaderErrorKind::chunk(ChunkError::TruncatedTrack {
                expected: 2,
                actual: 4
            })
        );
    }

    #[test]
    fn short_buffer_is_out_of_bounds() {
        let mut bytes = chunk(&TRACK_TAG, &[0x00, 0x90, 0x3C, 0x40]);
        bytes.truncate(bytes.len() - 1);
        let mut reader = Reader::from_byte_slice(&bytes);
        assert!(Track::read(&mut reader).unwrap_err().is_out_of_bounds());
    }
}

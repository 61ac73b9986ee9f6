#![doc = r#"
Rusty representation of a Standard MIDI File

```text
[Header Chunk: "MThd"]
[Track Chunk 1: "MTrk"]
...
[Track Chunk N: "MTrk"]
```

[`MidiFile::parse`] reads the header, then exactly as many chunks as the
header declares. Any byte left over afterwards is an error: a file that
does not account for all of its bytes is most likely corrupt.
"#]

mod header;
pub use header::*;

mod track;
pub use track::*;

mod timing;
pub use timing::*;

mod meta;
pub use meta::*;

use crate::{
    ChunkError,
    reader::{ReadResult, Reader, ReaderError, ReaderErrorKind},
    timeline::{MergedEvent, merge_tracks},
};

#[doc = r#"
A decoded MIDI file: its header and one [`Track`] per declared chunk.

# Example
```rust
# use midi_degrees::prelude::*;
let bytes = [
    b'M', b'T', b'h', b'd', 0, 0, 0, 6, 0, 0, 0, 1, 0, 96,
    b'M', b'T', b'r', b'k', 0, 0, 0, 4, 0x00, 0xFF, 0x2F, 0x00,
];
let file = MidiFile::parse(&bytes).unwrap();
assert_eq!(file.header().format(), FormatType::SingleMultiChannel);
assert_eq!(file.tracks().len(), 1);
assert!(file.tracks()[0].events()[0].is_end_of_track());
```
"#]
#[derive(Clone, Debug, PartialEq)]
pub struct MidiFile {
    header: Header,
    tracks: Vec<Track>,
}

impl MidiFile {
    /// Create a file from its parts
    pub fn new(header: Header, tracks: Vec<Track>) -> Self {
        Self { header, tracks }
    }

    /// Parse a set of bytes into a file struct
    pub fn parse(bytes: &[u8]) -> ReadResult<Self> {
        let mut reader = Reader::from_byte_slice(bytes);
        let header = Header::read(&mut reader)?;

        let tracks = (0..header.track_count())
            .map(|_| Track::read(&mut reader))
            .collect::<ReadResult<Vec<_>>>()?;

        if !reader.is_at_end() {
            return Err(ReaderError::new(
                reader.buffer_position(),
                ReaderErrorKind::chunk(ChunkError::TrailingData(reader.remaining())),
            ));
        }
        tracing::debug!(
            tracks = tracks.len(),
            events = tracks.iter().map(Track::len).sum::<usize>(),
            "decoded MIDI file"
        );

        Ok(Self { header, tracks })
    }

    /// Returns header info
    pub fn header(&self) -> &Header {
        &self.header
    }

    /// Returns the timing of the file
    pub fn timing(&self) -> &Timing {
        self.header.timing()
    }

    /// Returns the track list, in chunk order
    pub fn tracks(&self) -> &[Track] {
        &self.tracks
    }

    /// Splits the file into its header and tracks.
    pub fn into_parts(self) -> (Header, Vec<Track>) {
        (self.header, self.tracks)
    }

    /// Merges every track into one stream ordered by time in seconds.
    pub fn into_timeline(self) -> Vec<MergedEvent> {
        let timing = *self.header.timing();
        merge_tracks(self.tracks, &timing)
    }
}

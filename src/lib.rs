#![warn(missing_docs)]
#![doc = r#"
# midi-degrees

Turns a Standard MIDI File into a timeline of scale-degree targets for a
rhythm game.

```text
bytes ──► MidiFile::parse ──► merge_tracks ──► TargetProjector ──► Vec<TimelineEvent>
          (chunks, events)    (seconds, tempo)  (degree, accidental)
```

- [`file`] decodes the header and track chunks, including variable-length
  quantities, running status, meta and system exclusive events.
- [`timeline`] interleaves the tracks into one stream ordered by time in
  seconds, following tempo changes as they happen.
- [`scale`] maps notes to degrees of a key and back, and spells key
  signatures.
- [`target`] projects the merged stream onto the key in effect.
- [`session`] holds the caller's configuration and the game-side state.

# Example
```rust
use midi_degrees::prelude::*;

let bytes = [
    b'M', b'T', b'h', b'd', 0, 0, 0, 6, 0, 0, 0, 1, 0, 96,
    b'M', b'T', b'r', b'k', 0, 0, 0, 12,
    0x00, 0x90, 60, 64, // note on
    0x60, 0x80, 60, 0,  // note off, one beat later
    0x00, 0xFF, 0x2F, 0x00,
];
let timeline = decode_timeline(&bytes, &SessionConfig::default()).unwrap();
assert_eq!(timeline.len(), 2);
assert_eq!(timeline[1].timestamp_seconds, 0.5);
assert_eq!(timeline[1].event_type(), EventType::NoteOff);
```
"#]

mod error;
pub use error::*;

pub mod file;
pub mod message;
pub mod note;
pub mod reader;
pub mod scale;
pub mod session;
pub mod target;
pub mod timeline;

use crate::{file::MidiFile, session::SessionConfig, target::TargetProjector};

/// Decodes a file, merges its tracks and projects every event onto the
/// configured key.
///
/// Fails on the first malformed byte; no partial timeline is returned.
pub fn decode_timeline(
    bytes: &[u8],
    config: &SessionConfig,
) -> Result<Vec<target::TimelineEvent>> {
    let merged = MidiFile::parse(bytes)?.into_timeline();
    let targets = TargetProjector::new(config).project_all(&merged)?;
    tracing::debug!(
        merged = merged.len(),
        targets = targets.len(),
        "projected timeline"
    );
    Ok(targets)
}

/// Commonly re-exported types
pub mod prelude {
    pub use crate::{
        ChunkError, Error, EventError, ParseError, ScaleError, TimingError, decode_timeline,
        file::{
            EventKind, FormatType, Header, KeySignature, MetaType, MidiFile, SmpteFps,
            SmpteHeader, Tempo, Timing, Track, TrackEvent,
        },
        message::{TrackMessage, channel::ChannelMessageType},
        note::Note,
        reader::{ReadResult, Reader, ReaderError, ReaderErrorKind},
        scale::{
            Degrees, Key, KeySignatureSpelling, Letter, Mode, Scale, SpelledAccidental, Tonic,
        },
        session::{Session, SessionConfig},
        target::{EventType, TargetKind, TargetProjector, TimelineEvent},
        timeline::{MergedEvent, TempoMap, merge_tracks},
    };
}

#![doc = r#"
Track messages, resolved once when an event is decoded.

```text
                 |--------------|
                 | TrackMessage |
                 |--------------|
      /        /        |          \          \
 NoteOn   NoteOff   TempoChange  KeySignature  Other
```

Note On with a velocity of zero is a Note Off. Everything without a meaning
for the timeline (controllers, text, sysex, unknown meta types...) is kept as
[`TrackMessage::Other`] so that no event is ever dropped.
"#]

pub mod channel;

use crate::{
    file::{KeySignature, Tempo},
    note::Note,
};

/// The meaning of a track event for the timeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrackMessage {
    /// A key was pressed
    NoteOn {
        /// 0-15
        channel: u8,
        /// The pressed key
        note: Note,
        /// Always above zero
        velocity: u8,
    },
    /// A key was released
    NoteOff {
        /// 0-15
        channel: u8,
        /// The released key
        note: Note,
        /// Release velocity
        velocity: u8,
    },
    /// Set Tempo meta event with a usable payload
    TempoChange(Tempo),
    /// Key Signature meta event
    KeySignature(KeySignature),
    /// Any other event
    Other,
}

impl TrackMessage {
    /// True for note on and note off messages.
    pub const fn is_note(&self) -> bool {
        matches!(self, Self::NoteOn { .. } | Self::NoteOff { .. })
    }

    /// The note of a note message.
    pub const fn note(&self) -> Option<Note> {
        match self {
            Self::NoteOn { note, .. } | Self::NoteOff { note, .. } => Some(*note),
            _ => None,
        }
    }
}

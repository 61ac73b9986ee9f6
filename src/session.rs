#![doc = r#"
Caller-owned configuration and game-side state.

[`SessionConfig`] is everything the host supplies before a file is decoded:
the starting key and octave, the transpose lock and a few output filters.
[`Session`] is the state the game loop keeps while consuming the timeline.
The decoded timeline itself never depends on the transpose lock: key
signatures are always reported, and only the session decides whether they
change what the player sees.
"#]

use crate::{
    note::{Note, frequency_of},
    scale::{Key, KeySignatureSpelling, MIDDLE_OCTAVE, Mode, Scale, Tonic},
    target::{TargetKind, TimelineEvent},
};

#[doc = r#"
Configuration of one decode and play-through.

# Example
```rust
# use midi_degrees::prelude::*;
let config = SessionConfig::default()
    .with_key(Tonic::D, Mode::Dorian)
    .with_octave(4)
    .with_transpose_lock(true);
assert_eq!(config.key(), Key::new(Tonic::D, Mode::Dorian));
assert!(config.transpose_lock);
```
"#]
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SessionConfig {
    /// Tonic notes are mapped in until the first key signature
    pub tonic: Tonic,
    /// Mode notes are mapped in until the first key signature
    pub mode: Mode,
    /// Octave the player is asked to play degree 0 in. Octave 5 puts C on
    /// MIDI note 60; file notes are always mapped from octave 5.
    pub octave: i32,
    /// Keep the displayed key when the file changes key
    pub transpose_lock: bool,
    /// Report events without a target as [`TargetKind::Other`]
    pub emit_other_events: bool,
    /// Tracks whose notes the player does not have to play
    pub muted_tracks: Vec<u32>,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            tonic: Tonic::C,
            mode: Mode::Ionian,
            octave: MIDDLE_OCTAVE,
            transpose_lock: false,
            emit_other_events: false,
            muted_tracks: Vec::new(),
        }
    }
}

impl SessionConfig {
    /// The starting key
    pub fn key(&self) -> Key {
        Key::new(self.tonic, self.mode)
    }

    /// Set the starting key
    pub fn with_key(mut self, tonic: Tonic, mode: Mode) -> Self {
        self.tonic = tonic;
        self.mode = mode;
        self
    }

    /// Set the octave the player plays degree 0 in
    pub fn with_octave(mut self, octave: i32) -> Self {
        self.octave = octave;
        self
    }

    /// Set the transpose lock
    pub fn with_transpose_lock(mut self, locked: bool) -> Self {
        self.transpose_lock = locked;
        self
    }

    /// Report events without a target
    pub fn with_other_events(mut self, emit: bool) -> Self {
        self.emit_other_events = emit;
        self
    }

    /// Mute the notes of a track
    pub fn with_muted_track(mut self, track: u32) -> Self {
        if !self.muted_tracks.contains(&track) {
            self.muted_tracks.push(track);
        }
        self
    }
}

#[doc = r#"
State of the game while it consumes a timeline.

The session owns the key shown to the player. Key signature targets passed
to [`Session::observe`] replace it unless the transpose lock is set, in
which case the player keeps playing degrees of the starting key.

# Example
```rust
# use midi_degrees::prelude::*;
let mut session = Session::new(SessionConfig::default());
assert_eq!(session.expected_note(0), 60);
assert_eq!(session.expected_note(-1), 59);

session.observe(&TimelineEvent {
    timestamp_seconds: 0.,
    source_track: 0,
    kind: TargetKind::KeySignature(Key::new(Tonic::G, Mode::Ionian)),
});
assert_eq!(session.expected_note(0), 67);
```
"#]
#[derive(Debug, Clone)]
pub struct Session {
    config: SessionConfig,
    display_key: Key,
    scale: Scale,
}

impl Session {
    /// Start a session in the configured key
    pub fn new(config: SessionConfig) -> Self {
        let display_key = config.key();
        Self {
            scale: Scale::new(display_key),
            display_key,
            config,
        }
    }

    /// The configuration the session was started with
    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    /// The key currently shown to the player
    pub fn display_key(&self) -> Key {
        self.display_key
    }

    /// Sharps and flats to draw for the displayed key
    pub fn display_spelling(&self) -> KeySignatureSpelling {
        KeySignatureSpelling::compute(self.display_key)
    }

    /// Updates the session with a target as the game reaches it.
    ///
    /// Returns true if the displayed key changed.
    pub fn observe(&mut self, event: &TimelineEvent) -> bool {
        let TargetKind::KeySignature(key) = event.kind else {
            return false;
        };
        if self.config.transpose_lock {
            tracing::debug!(%key, "transpose lock keeps {}", self.display_key);
            return false;
        }
        if key == self.display_key {
            return false;
        }
        self.display_key = key;
        self.scale = Scale::new(key);
        true
    }

    /// The note the player must press for `degree` in the displayed key.
    pub fn expected_note(&self, degree: i32) -> i32 {
        self.scale.degree_to_note(self.config.octave, degree)
    }

    /// Frequency in hertz of [`Session::expected_note`].
    pub fn expected_frequency(&self, degree: i32) -> f64 {
        frequency_of(self.expected_note(degree))
    }

    /// True if `played` hits a Note On target.
    ///
    /// The target's degree and accidental are read in the displayed key, so
    /// under the transpose lock a transposed file is played in the starting
    /// key.
    pub fn matches(&self, target: &TimelineEvent, played: Note) -> bool {
        match target.kind {
            TargetKind::NoteOn {
                degree, accidental, ..
            } => self.expected_note(degree) + accidental == played.number(),
            _ => false,
        }
    }

    /// True for note targets of a muted track.
    pub fn is_muted(&self, target: &TimelineEvent) -> bool {
        target.note().is_some() && self.config.muted_tracks.contains(&target.source_track)
    }
}

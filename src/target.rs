#![doc = r#"
Game targets projected from the merged timeline.

Each note event is mapped onto the degrees of the key in effect at its
timestamp. A note that falls between two degrees yields two targets, one
per candidate degree, each with the accidental that reaches the note from
it. Key signatures change the key for every later event and are reported
as targets of their own.
"#]

use crate::{
    ScaleError,
    message::TrackMessage,
    note::Note,
    scale::{Key, MIDDLE_OCTAVE, Scale},
    session::SessionConfig,
    timeline::MergedEvent,
};

/// The category of a [`TimelineEvent`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum EventType {
    /// A note starts
    NoteOn,
    /// A note ends
    NoteOff,
    /// The key changes
    KeySignature,
    /// Anything else
    Other,
}

/// What a [`TimelineEvent`] asks of the player.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TargetKind {
    /// A note to start playing
    NoteOn {
        /// The note in the file
        note: Note,
        /// Scale degree, counted from the tonic of octave 5
        degree: i32,
        /// Semitones from the degree to the note: -1, 0 or 1
        accidental: i32,
    },
    /// A note to stop playing
    NoteOff {
        /// The note in the file
        note: Note,
        /// Scale degree, counted from the tonic of octave 5
        degree: i32,
        /// Semitones from the degree to the note: -1, 0 or 1
        accidental: i32,
    },
    /// The key every later note is mapped in
    KeySignature(Key),
    /// An event without a target
    Other,
}

/// One entry of the timeline handed to the game loop.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TimelineEvent {
    /// Seconds since the start of the file
    pub timestamp_seconds: f64,
    /// Index of the track chunk the event came from
    pub source_track: u32,
    /// What the event asks of the player
    pub kind: TargetKind,
}

impl TimelineEvent {
    /// The category of the event
    pub fn event_type(&self) -> EventType {
        match self.kind {
            TargetKind::NoteOn { .. } => EventType::NoteOn,
            TargetKind::NoteOff { .. } => EventType::NoteOff,
            TargetKind::KeySignature(_) => EventType::KeySignature,
            TargetKind::Other => EventType::Other,
        }
    }

    /// The scale degree of a note target
    pub fn degree(&self) -> Option<i32> {
        match self.kind {
            TargetKind::NoteOn { degree, .. } | TargetKind::NoteOff { degree, .. } => {
                Some(degree)
            }
            _ => None,
        }
    }

    /// The accidental of a note target
    pub fn accidental(&self) -> Option<i32> {
        match self.kind {
            TargetKind::NoteOn { accidental, .. } | TargetKind::NoteOff { accidental, .. } => {
                Some(accidental)
            }
            _ => None,
        }
    }

    /// The note of a note target
    pub fn note(&self) -> Option<Note> {
        match self.kind {
            TargetKind::NoteOn { note, .. } | TargetKind::NoteOff { note, .. } => Some(note),
            _ => None,
        }
    }

    /// The key announced by a key signature target
    pub fn key(&self) -> Option<Key> {
        match self.kind {
            TargetKind::KeySignature(key) => Some(key),
            _ => None,
        }
    }
}

#[doc = r#"
Turns merged events into [`TimelineEvent`]s, tracking the current key.

Feed it the merged stream in order; key signature events update the key
used for every later note.

# Example
```rust
# use midi_degrees::prelude::*;
let config = SessionConfig::default().with_key(Tonic::G, Mode::Ionian);
let mut projector = TargetProjector::new(&config);

// F natural in G major sits between E (degree 5) and F# (degree 6)
let event = TrackEvent::channel(0, 0x90, &[77, 100]).unwrap();
let targets = projector.project(&MergedEvent::new(0., 1, event)).unwrap();
assert_eq!(targets.len(), 2);
assert_eq!((targets[0].degree(), targets[0].accidental()), (Some(5), Some(1)));
assert_eq!((targets[1].degree(), targets[1].accidental()), (Some(6), Some(-1)));
```
"#]
#[derive(Debug, Clone)]
pub struct TargetProjector {
    key: Key,
    scale: Scale,
    emit_other_events: bool,
}

impl TargetProjector {
    /// Create a projector starting in the configured key.
    ///
    /// Notes are always mapped with degree 0 in [`MIDDLE_OCTAVE`]; the
    /// configured octave only moves the notes the player is asked for.
    pub fn new(config: &SessionConfig) -> Self {
        let key = config.key();
        Self {
            key,
            scale: Scale::new(key),
            emit_other_events: config.emit_other_events,
        }
    }

    /// The key notes are currently mapped in
    pub fn key(&self) -> Key {
        self.key
    }

    /// Projects one merged event.
    ///
    /// Returns no target for events without one (tempo changes, and any
    /// other event unless configured otherwise), one target for exact notes
    /// and key signatures, and two for notes between degrees.
    pub fn project(&mut self, merged: &MergedEvent) -> Result<Vec<TimelineEvent>, ScaleError> {
        let at = |kind: TargetKind| TimelineEvent {
            timestamp_seconds: merged.timestamp_seconds(),
            source_track: merged.track_index() as u32,
            kind,
        };

        let targets = match *merged.message() {
            TrackMessage::NoteOn { note, .. } => self
                .note_targets(note, |note, degree, accidental| TargetKind::NoteOn {
                    note,
                    degree,
                    accidental,
                })?
                .into_iter()
                .map(at)
                .collect(),
            TrackMessage::NoteOff { note, .. } => self
                .note_targets(note, |note, degree, accidental| TargetKind::NoteOff {
                    note,
                    degree,
                    accidental,
                })?
                .into_iter()
                .map(at)
                .collect(),
            TrackMessage::KeySignature(signature) => {
                self.key = signature.key();
                self.scale = Scale::new(self.key);
                tracing::debug!(
                    timestamp = merged.timestamp_seconds(),
                    key = %self.key,
                    "key change"
                );
                vec![at(TargetKind::KeySignature(self.key))]
            }
            TrackMessage::TempoChange(_) => Vec::new(),
            TrackMessage::Other if self.emit_other_events => vec![at(TargetKind::Other)],
            TrackMessage::Other => Vec::new(),
        };
        Ok(targets)
    }

    /// Projects a whole merged stream, in order.
    pub fn project_all<'a, I>(&mut self, merged: I) -> Result<Vec<TimelineEvent>, ScaleError>
    where
        I: IntoIterator<Item = &'a MergedEvent>,
    {
        let mut targets = Vec::new();
        for event in merged {
            targets.extend(self.project(event)?);
        }
        Ok(targets)
    }

    fn note_targets(
        &self,
        note: Note,
        kind: impl Fn(Note, i32, i32) -> TargetKind,
    ) -> Result<Vec<TargetKind>, ScaleError> {
        let number = note.number();
        self.scale
            .note_to_degrees(MIDDLE_OCTAVE, number)
            .iter()
            .map(|degree| {
                let accidental = self.scale.accidental(MIDDLE_OCTAVE, degree, number)?;
                Ok(kind(note, degree, accidental))
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        file::{KeySignature, MetaType, TrackEvent},
        scale::{Mode, Tonic},
    };

    fn merged(event: TrackEvent) -> MergedEvent {
        MergedEvent::new(1.25, 2, event)
    }

    fn note_on(key: u8) -> MergedEvent {
        merged(TrackEvent::channel(0, 0x90, &[key, 100]).unwrap())
    }

    #[test]
    fn exact_note_yields_one_target() {
        let mut projector = TargetProjector::new(&SessionConfig::default());
        let targets = projector.project(&note_on(64)).unwrap();
        assert_eq!(
            targets,
            vec![TimelineEvent {
                timestamp_seconds: 1.25,
                source_track: 2,
                kind: TargetKind::NoteOn {
                    note: Note::new(64),
                    degree: 2,
                    accidental: 0
                }
            }]
        );
    }

    #[test]
    fn chromatic_note_yields_both_neighbours() {
        let mut projector = TargetProjector::new(&SessionConfig::default());
        let targets = projector.project(&note_on(61)).unwrap();
        let pairs: Vec<_> = targets
            .iter()
            .map(|t| (t.degree().unwrap(), t.accidental().unwrap()))
            .collect();
        assert_eq!(pairs, vec![(0, 1), (1, -1)]);
    }

    #[test]
    fn notes_below_the_octave_get_negative_degrees() {
        let mut projector = TargetProjector::new(&SessionConfig::default());
        let targets = projector.project(&note_on(59)).unwrap();
        assert_eq!(targets[0].degree(), Some(-1));
        assert_eq!(targets[0].accidental(), Some(0));
    }

    #[test]
    fn velocity_zero_projects_note_off() {
        let mut projector = TargetProjector::new(&SessionConfig::default());
        let event = merged(TrackEvent::channel(0, 0x90, &[60, 0]).unwrap());
        let targets = projector.project(&event).unwrap();
        assert_eq!(targets[0].event_type(), EventType::NoteOff);
        assert_eq!(targets[0].degree(), Some(0));
    }

    #[test]
    fn key_signature_changes_later_mappings() {
        let mut projector = TargetProjector::new(&SessionConfig::default());
        // F# is chromatic in C
        assert_eq!(projector.project(&note_on(66)).unwrap().len(), 2);

        let signature = TrackEvent::meta(0, MetaType::KeySignature, &[1, 0]).unwrap();
        let targets = projector.project(&merged(signature)).unwrap();
        let g_major = Key::new(Tonic::G, Mode::Ionian);
        assert_eq!(targets[0].key(), Some(g_major));
        assert_eq!(projector.key(), g_major);
        assert_eq!(
            KeySignature::from_payload(&[1, 0]).unwrap().key(),
            projector.key()
        );

        // F# is the seventh degree of G, below the tonic octave
        let targets = projector.project(&note_on(66)).unwrap();
        assert_eq!(targets.len(), 1);
        assert_eq!(targets[0].degree(), Some(-1));
    }

    #[test]
    fn other_events_are_opt_in() {
        let end = merged(TrackEvent::end_of_track(0));
        let tempo = merged(TrackEvent::tempo(0, 400_000));

        let mut projector = TargetProjector::new(&SessionConfig::default());
        assert!(projector.project(&end).unwrap().is_empty());
        assert!(projector.project(&tempo).unwrap().is_empty());

        let config = SessionConfig::default().with_other_events(true);
        let mut projector = TargetProjector::new(&config);
        let targets = projector.project(&end).unwrap();
        assert_eq!(targets[0].event_type(), EventType::Other);
        assert_eq!(targets[0].degree(), None);
        assert!(projector.project(&tempo).unwrap().is_empty());
    }

    #[test]
    fn configured_octave_does_not_move_degrees() {
        for octave in [3, 4, 6] {
            let config = SessionConfig::default().with_octave(octave);
            let mut projector = TargetProjector::new(&config);
            let targets = projector.project(&note_on(60)).unwrap();
            assert_eq!(targets[0].degree(), Some(0));
            assert_eq!(targets[0].accidental(), Some(0));
        }
    }

    #[test]
    fn project_all_keeps_order() {
        let mut projector = TargetProjector::new(&SessionConfig::default());
        let events = [note_on(60), note_on(62), note_on(63)];
        let degrees: Vec<_> = projector
            .project_all(&events)
            .unwrap()
            .iter()
            .filter_map(TimelineEvent::degree)
            .collect();
        assert_eq!(degrees, vec![0, 1, 1, 2]);
    }
}

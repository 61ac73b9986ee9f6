use crate::file::{Tempo, Timing};

#[doc = r#"
Converts tick counts to seconds.

The variant is chosen once from the header timing and never changes. Under
ticks-per-quarter-note timing the conversion follows the current tempo,
which starts at 120 beats per minute. Under SMPTE timing the rate is fixed
by the frame rate and tempo changes are ignored.

# Example
```rust
# use midi_degrees::prelude::*;
let mut tempo = TempoMap::new(&Timing::new_ticks_per_quarter_note(96));
assert_eq!(tempo.ticks_to_seconds(96), 0.5);

tempo.set_tempo(Tempo::new(1_000_000));
assert_eq!(tempo.ticks_to_seconds(96), 1.0);
```
"#]
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TempoMap {
    /// Musical timing, rescaled by Set Tempo events
    TicksPerQuarterNote {
        /// Ticks per quarter note, from the header
        ticks_per_beat: f64,
        /// Quarter notes per second, from the latest Set Tempo
        beats_per_second: f64,
    },
    /// Timecode timing
    Smpte {
        /// Ticks per frame, from the header
        ticks_per_frame: f64,
        /// Frames per second, 29.97 for drop frame
        frames_per_second: f64,
    },
}

impl TempoMap {
    /// Selects the conversion for a file's timing, at the default tempo.
    pub fn new(timing: &Timing) -> Self {
        match timing {
            Timing::TicksPerQuarterNote(tpqn) => Self::TicksPerQuarterNote {
                ticks_per_beat: f64::from(tpqn.ticks_per_quarter_note()),
                beats_per_second: Tempo::default().beats_per_second(),
            },
            Timing::Smpte(smpte) => Self::Smpte {
                ticks_per_frame: f64::from(smpte.ticks_per_frame()),
                frames_per_second: smpte.frames_per_second(),
            },
        }
    }

    /// Number of ticks elapsing per second at the current tempo.
    pub fn ticks_per_second(&self) -> f64 {
        match *self {
            Self::TicksPerQuarterNote {
                ticks_per_beat,
                beats_per_second,
            } => ticks_per_beat * beats_per_second,
            Self::Smpte {
                ticks_per_frame,
                frames_per_second,
            } => ticks_per_frame * frames_per_second,
        }
    }

    /// Duration of `ticks` at the current tempo.
    pub fn ticks_to_seconds(&self, ticks: u32) -> f64 {
        f64::from(ticks) / self.ticks_per_second()
    }

    /// Current quarter notes per second, if the timing is musical.
    pub fn beats_per_second(&self) -> Option<f64> {
        match self {
            Self::TicksPerQuarterNote {
                beats_per_second, ..
            } => Some(*beats_per_second),
            Self::Smpte { .. } => None,
        }
    }

    /// Applies a Set Tempo event.
    ///
    /// Returns false when the timing is SMPTE based, in which case the
    /// conversion is left untouched.
    pub fn set_tempo(&mut self, tempo: Tempo) -> bool {
        match self {
            Self::TicksPerQuarterNote {
                beats_per_second, ..
            } => {
                *beats_per_second = tempo.beats_per_second();
                true
            }
            Self::Smpte { .. } => {
                tracing::warn!(
                    micros_per_quarter_note = tempo.micros_per_quarter_note(),
                    "ignoring Set Tempo in an SMPTE timed file"
                );
                false
            }
        }
    }
}

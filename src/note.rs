#![doc = r#"
MIDI note numbers and their pitch.

[`Note`] wraps the key number of Note On / Note Off messages and
converts it to an equal-tempered frequency tuned to A 440.
"#]

use core::fmt;

#[doc = r#"
An absolute pitch, as carried by Note On / Note Off messages.

The value is the MIDI note number: 60 is middle C, 69 is concert A.

# Example
```rust
# use midi_degrees::prelude::*;
let a = Note::new(69);
assert_eq!(a.frequency(), 440.);
assert_eq!(a.pitch_class_name(), "A");
```
"#]
#[derive(Copy, Clone, PartialEq, Eq, Ord, PartialOrd, Debug, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Note(u8);

/// Pitch class names. Black keys are named by the two white keys around them.
const PITCH_CLASS_NAMES: [&str; 12] = [
    "C", "CD", "D", "DE", "E", "F", "FG", "G", "GA", "A", "AB", "B",
];

impl Note {
    /// Create a note from its MIDI number.
    pub const fn new(number: u8) -> Self {
        Self(number)
    }

    /// Returns the underlying byte of the note
    #[inline]
    pub const fn byte(&self) -> u8 {
        self.0
    }

    /// The note number widened for scale arithmetic.
    #[inline]
    pub const fn number(&self) -> i32 {
        self.0 as i32
    }

    /// Equal-tempered frequency in hertz, A4 = 440.
    pub fn frequency(&self) -> f64 {
        frequency_of(self.number())
    }

    /// Name of the pitch class, e.g. `"C"` or `"FG"` for the key between F and G.
    pub fn pitch_class_name(&self) -> &'static str {
        PITCH_CLASS_NAMES[(self.0 % 12) as usize]
    }
}

/// Equal-tempered frequency of any (possibly out of MIDI range) note number.
pub fn frequency_of(note: i32) -> f64 {
    440. * 2f64.powf(f64::from(note - 69) / 12.)
}

impl From<u8> for Note {
    fn from(value: u8) -> Self {
        Self(value)
    }
}

impl fmt::Display for Note {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}\t{}\t{}hz",
            self.0,
            self.pitch_class_name(),
            self.frequency() as u32
        )
    }
}

#[test]
fn concert_pitch() {
    assert_eq!(Note::new(69).frequency(), 440.);
    assert_eq!(Note::new(81).frequency(), 880.);
    assert!((Note::new(60).frequency() - 261.6256).abs() < 1e-3);
}

#[test]
fn pitch_class_names() {
    assert_eq!(Note::new(60).pitch_class_name(), "C");
    assert_eq!(Note::new(61).pitch_class_name(), "CD");
    assert_eq!(Note::new(71).pitch_class_name(), "B");
}

#[test]
fn describes_note() {
    assert_eq!(Note::new(69).to_string(), "69\tA\t440hz");
}

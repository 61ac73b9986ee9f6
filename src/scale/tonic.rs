use core::{fmt, str::FromStr};

use crate::{ScaleError, scale::Mode};

/// A natural note letter, in staff order starting from C.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[allow(missing_docs)]
pub enum Letter {
    C,
    D,
    E,
    F,
    G,
    A,
    B,
}

impl Letter {
    /// All letters in staff order.
    pub const ALL: [Letter; 7] = [
        Letter::C,
        Letter::D,
        Letter::E,
        Letter::F,
        Letter::G,
        Letter::A,
        Letter::B,
    ];

    /// Staff position of the letter within an octave, C = 0.
    pub const fn index(&self) -> usize {
        *self as usize
    }

    /// The letter `steps` staff positions above this one, wrapping at B.
    pub const fn offset(&self, steps: usize) -> Letter {
        Self::ALL[(self.index() + steps) % 7]
    }

    /// The natural tonic with this letter.
    pub const fn natural(&self) -> Tonic {
        match self {
            Self::C => Tonic::C,
            Self::D => Tonic::D,
            Self::E => Tonic::E,
            Self::F => Tonic::F,
            Self::G => Tonic::G,
            Self::A => Tonic::A,
            Self::B => Tonic::B,
        }
    }

    /// The mode whose scale starting on this letter uses only white keys.
    pub const fn white_key_mode(&self) -> Mode {
        match self {
            Self::C => Mode::Ionian,
            Self::D => Mode::Dorian,
            Self::E => Mode::Phrygian,
            Self::F => Mode::Lydian,
            Self::G => Mode::Mixolydian,
            Self::A => Mode::Aeolian,
            Self::B => Mode::Locrian,
        }
    }
}

impl fmt::Display for Letter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.natural().name())
    }
}

#[doc = r#"
The pitch-class name anchoring a scale.

Every natural, single sharp and single flat spelling is available, including
the edge spellings `E#`, `Fb`, `B#` and `Cb`. `B#` sits a full octave above
`C` and `Cb` just below it, so scales on those tonics start one semitone
outside the C to B range.

# Example
```rust
# use midi_degrees::prelude::*;
let tonic: Tonic = "F#".parse().unwrap();
assert_eq!(tonic.semitone(), 6);
assert_eq!(tonic.letter(), Letter::F);
```
"#]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "String", into = "String"))]
#[allow(missing_docs)]
pub enum Tonic {
    C,
    CSharp,
    DFlat,
    D,
    DSharp,
    EFlat,
    E,
    ESharp,
    FFlat,
    F,
    FSharp,
    GFlat,
    G,
    GSharp,
    AFlat,
    A,
    ASharp,
    BFlat,
    B,
    BSharp,
    CFlat,
}

impl Tonic {
    /// Every spelling, in the order of the enharmonic table.
    pub const ALL: [Tonic; 21] = [
        Tonic::C,
        Tonic::CSharp,
        Tonic::DFlat,
        Tonic::D,
        Tonic::DSharp,
        Tonic::EFlat,
        Tonic::E,
        Tonic::ESharp,
        Tonic::FFlat,
        Tonic::F,
        Tonic::FSharp,
        Tonic::GFlat,
        Tonic::G,
        Tonic::GSharp,
        Tonic::AFlat,
        Tonic::A,
        Tonic::ASharp,
        Tonic::BFlat,
        Tonic::B,
        Tonic::BSharp,
        Tonic::CFlat,
    ];

    /// Semitone offset of the tonic above C.
    pub const fn semitone(&self) -> i32 {
        match self {
            Self::C => 0,
            Self::CSharp | Self::DFlat => 1,
            Self::D => 2,
            Self::DSharp | Self::EFlat => 3,
            Self::E | Self::FFlat => 4,
            Self::ESharp | Self::F => 5,
            Self::FSharp | Self::GFlat => 6,
            Self::G => 7,
            Self::GSharp | Self::AFlat => 8,
            Self::A => 9,
            Self::ASharp | Self::BFlat => 10,
            Self::B | Self::CFlat => 11,
            Self::BSharp => 12,
        }
    }

    /// The bare letter of the spelling.
    pub const fn letter(&self) -> Letter {
        match self {
            Self::C | Self::CSharp | Self::CFlat => Letter::C,
            Self::D | Self::DSharp | Self::DFlat => Letter::D,
            Self::E | Self::ESharp | Self::EFlat => Letter::E,
            Self::F | Self::FSharp | Self::FFlat => Letter::F,
            Self::G | Self::GSharp | Self::GFlat => Letter::G,
            Self::A | Self::ASharp | Self::AFlat => Letter::A,
            Self::B | Self::BSharp | Self::BFlat => Letter::B,
        }
    }

    /// Canonical spelling, e.g. `"Db"`.
    pub const fn name(&self) -> &'static str {
        match self {
            Self::C => "C",
            Self::CSharp => "C#",
            Self::DFlat => "Db",
            Self::D => "D",
            Self::DSharp => "D#",
            Self::EFlat => "Eb",
            Self::E => "E",
            Self::ESharp => "E#",
            Self::FFlat => "Fb",
            Self::F => "F",
            Self::FSharp => "F#",
            Self::GFlat => "Gb",
            Self::G => "G",
            Self::GSharp => "G#",
            Self::AFlat => "Ab",
            Self::A => "A",
            Self::ASharp => "A#",
            Self::BFlat => "Bb",
            Self::B => "B",
            Self::BSharp => "B#",
            Self::CFlat => "Cb",
        }
    }
}

impl FromStr for Tonic {
    type Err = ScaleError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|tonic| tonic.name() == s)
            .ok_or_else(|| ScaleError::UnknownTonic(s.to_owned()))
    }
}

impl TryFrom<String> for Tonic {
    type Error = ScaleError;
    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Tonic> for String {
    fn from(value: Tonic) -> Self {
        value.name().to_owned()
    }
}

impl fmt::Display for Tonic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[test]
fn enharmonic_table() {
    let expected = [
        ("C", 0),
        ("C#", 1),
        ("Db", 1),
        ("D", 2),
        ("D#", 3),
        ("Eb", 3),
        ("E", 4),
        ("E#", 5),
        ("Fb", 4),
        ("F", 5),
        ("F#", 6),
        ("Gb", 6),
        ("G", 7),
        ("G#", 8),
        ("Ab", 8),
        ("A", 9),
        ("A#", 10),
        ("Bb", 10),
        ("B", 11),
        ("B#", 12),
        ("Cb", 11),
    ];
    for (name, semitone) in expected {
        let tonic: Tonic = name.parse().unwrap();
        assert_eq!(tonic.semitone(), semitone, "{name}");
        assert_eq!(tonic.to_string(), name);
    }
}

#[test]
fn unknown_tonic_is_rejected() {
    assert_eq!(
        "H".parse::<Tonic>(),
        Err(ScaleError::UnknownTonic("H".to_owned()))
    );
    assert!("c".parse::<Tonic>().is_err());
}

#[test]
fn letters_wrap() {
    assert_eq!(Letter::A.offset(2), Letter::C);
    assert_eq!(Tonic::CFlat.letter(), Letter::C);
    assert_eq!(Letter::D.white_key_mode(), Mode::Dorian);
}

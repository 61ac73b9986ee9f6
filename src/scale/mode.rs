use core::{fmt, str::FromStr};

use crate::ScaleError;

/// One of the seven rotations of the major scale's interval pattern.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
#[allow(missing_docs)]
pub enum Mode {
    Ionian,
    Dorian,
    Phrygian,
    Lydian,
    Mixolydian,
    Aeolian,
    Locrian,
}

impl Mode {
    /// All modes, starting from ionian.
    pub const ALL: [Mode; 7] = [
        Mode::Ionian,
        Mode::Dorian,
        Mode::Phrygian,
        Mode::Lydian,
        Mode::Mixolydian,
        Mode::Aeolian,
        Mode::Locrian,
    ];

    /// Whole (2) and half (1) steps between consecutive degrees.
    pub const fn steps(&self) -> [i32; 7] {
        match self {
            Self::Ionian => [2, 2, 1, 2, 2, 2, 1],
            Self::Dorian => [2, 1, 2, 2, 2, 1, 2],
            Self::Phrygian => [1, 2, 2, 2, 1, 2, 2],
            Self::Lydian => [2, 2, 2, 1, 2, 2, 1],
            Self::Mixolydian => [2, 2, 1, 2, 2, 1, 2],
            Self::Aeolian => [2, 1, 2, 2, 1, 2, 2],
            Self::Locrian => [1, 2, 2, 1, 2, 2, 2],
        }
    }

    /// Lowercase mode name.
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Ionian => "ionian",
            Self::Dorian => "dorian",
            Self::Phrygian => "phrygian",
            Self::Lydian => "lydian",
            Self::Mixolydian => "mixolydian",
            Self::Aeolian => "aeolian",
            Self::Locrian => "locrian",
        }
    }
}

impl FromStr for Mode {
    type Err = ScaleError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|mode| mode.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| ScaleError::UnknownMode(s.to_owned()))
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[test]
fn every_mode_spans_an_octave() {
    for mode in Mode::ALL {
        assert_eq!(mode.steps().iter().sum::<i32>(), 12, "{mode}");
    }
}

#[test]
fn parses_names() {
    assert_eq!("aeolian".parse::<Mode>(), Ok(Mode::Aeolian));
    assert_eq!("Dorian".parse::<Mode>(), Ok(Mode::Dorian));
    assert_eq!(
        "major".parse::<Mode>(),
        Err(ScaleError::UnknownMode("major".to_owned()))
    );
}

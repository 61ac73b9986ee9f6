#![doc = r#"
Diatonic scales and the degree ⟷ note mapping.

A [`Scale`] stores, for each of the seven degrees plus the closing octave, the
semitone offset of that degree above C. Degrees are zero based and unbounded:
degree 7 is the tonic one octave up and degree -1 is the leading tone below.

Mapping a note back to degrees is not always unique. A note that falls
between two scale degrees is reported as [`Degrees::Between`], and callers are
expected to handle both candidates.
"#]

mod mode;
pub use mode::*;

mod tonic;
pub use tonic::*;

mod spelling;
pub use spelling::*;

use core::fmt;

use crate::ScaleError;

/// Octave that places note 60 on the tonic of a C scale.
pub const MIDDLE_OCTAVE: i32 = 5;

/// Number of degrees in one octave of a diatonic scale.
pub const DEGREES_PER_OCTAVE: i32 = 7;

/// A tonic together with a mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Key {
    /// The pitch class the scale starts on
    pub tonic: Tonic,
    /// The interval pattern
    pub mode: Mode,
}

impl Key {
    /// Create a new key
    pub const fn new(tonic: Tonic, mode: Mode) -> Self {
        Self { tonic, mode }
    }
}

impl Default for Key {
    fn default() -> Self {
        Self::new(Tonic::C, Mode::Ionian)
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.tonic, self.mode)
    }
}

/// Semitone offsets of the seven degrees of a key, plus the closing octave.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Scale {
    offsets: [i32; 8],
}

/// The degree (or pair of degrees) a note maps onto.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Degrees {
    /// The note is exactly this degree.
    Exact(i32),
    /// The note lies strictly between two adjacent degrees.
    Between {
        /// The degree just below the note
        below: i32,
        /// The degree just above the note
        above: i32,
    },
}

impl Degrees {
    /// True if `degree` is one of the candidates.
    pub fn contains(&self, degree: i32) -> bool {
        match *self {
            Self::Exact(d) => d == degree,
            Self::Between { below, above } => below == degree || above == degree,
        }
    }

    /// The candidate degrees in ascending order.
    pub fn iter(&self) -> impl Iterator<Item = i32> + use<> {
        let (first, second) = match *self {
            Self::Exact(d) => (d, None),
            Self::Between { below, above } => (below, Some(above)),
        };
        core::iter::once(first).chain(second)
    }
}

impl Scale {
    /// Builds the scale of `key` by walking the mode's steps up from the tonic.
    pub fn new(key: Key) -> Self {
        let mut offsets = [key.tonic.semitone(); 8];
        for (i, step) in key.mode.steps().into_iter().enumerate() {
            offsets[i + 1] = offsets[i] + step;
        }
        Self { offsets }
    }

    /// Creates a scale from explicit offsets.
    ///
    /// The offsets must rise strictly and the eighth must close the octave
    /// above the first; the reverse mapping depends on both.
    pub fn from_offsets(offsets: [i32; 8]) -> Result<Self, ScaleError> {
        let ascending = offsets.windows(2).all(|pair| pair[0] < pair[1]);
        if !ascending || offsets[7] != offsets[0] + 12 {
            return Err(ScaleError::NonMonotonic(offsets));
        }
        Ok(Self { offsets })
    }

    /// The eight offsets, tonic first.
    pub const fn offsets(&self) -> [i32; 8] {
        self.offsets
    }

    /// The note of `degree` when degree 0 lies in `octave`.
    ///
    /// Negative degrees borrow whole octaves: degree -1 is the seventh degree
    /// of the octave below.
    pub const fn degree_to_note(&self, octave: i32, degree: i32) -> i32 {
        let octaves = degree.div_euclid(DEGREES_PER_OCTAVE);
        let index = degree.rem_euclid(DEGREES_PER_OCTAVE) as usize;
        12 * octave + 12 * octaves + self.offsets[index]
    }

    /// The degree(s) of `note` when degree 0 lies in `octave`.
    ///
    /// Notes below the tonic are first lifted by whole octaves, then the
    /// degrees of the note's own octave are scanned upwards until one
    /// reaches it.
    pub fn note_to_degrees(&self, octave: i32, note: i32) -> Degrees {
        let anchor = 12 * octave + self.offsets[0];
        let lift = (anchor - note + 11).div_euclid(12).max(0);
        let note = note + 12 * lift;
        let borrowed = -DEGREES_PER_OCTAVE * lift;

        // the tonic of this octave is at or below the note
        let mut degree = (note - anchor).div_euclid(12) * DEGREES_PER_OCTAVE;
        while self.degree_to_note(octave, degree) < note {
            degree += 1;
        }
        if self.degree_to_note(octave, degree) == note {
            Degrees::Exact(borrowed + degree)
        } else {
            Degrees::Between {
                below: borrowed + degree - 1,
                above: borrowed + degree,
            }
        }
    }

    /// Signed semitone distance of `note` from `degree`, checked to be a
    /// single sharp or flat at most.
    pub fn accidental(&self, octave: i32, degree: i32, note: i32) -> Result<i32, ScaleError> {
        let accidental = note - self.degree_to_note(octave, degree);
        if !(-1..=1).contains(&accidental) {
            return Err(ScaleError::OutOfRangeAccidental {
                note,
                degree,
                accidental,
            });
        }
        Ok(accidental)
    }
}

impl From<Key> for Scale {
    fn from(value: Key) -> Self {
        Self::new(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scale(tonic: Tonic, mode: Mode) -> Scale {
        Scale::new(Key::new(tonic, mode))
    }

    #[test]
    fn builds_c_major() {
        assert_eq!(
            scale(Tonic::C, Mode::Ionian).offsets(),
            [0, 2, 4, 5, 7, 9, 11, 12]
        );
    }

    #[test]
    fn builds_from_tonic_offset() {
        assert_eq!(
            scale(Tonic::FSharp, Mode::Aeolian).offsets(),
            [6, 8, 9, 11, 13, 14, 16, 18]
        );
        assert_eq!(
            scale(Tonic::CFlat, Mode::Ionian).offsets(),
            [11, 13, 15, 16, 18, 20, 22, 23]
        );
    }

    #[test]
    fn degree_to_note_spans_octaves() {
        let c = scale(Tonic::C, Mode::Ionian);
        assert_eq!(c.degree_to_note(MIDDLE_OCTAVE, 0), 60);
        assert_eq!(c.degree_to_note(MIDDLE_OCTAVE, 4), 67);
        assert_eq!(c.degree_to_note(MIDDLE_OCTAVE, 7), 72);
        assert_eq!(c.degree_to_note(MIDDLE_OCTAVE, -1), 59);
        assert_eq!(c.degree_to_note(MIDDLE_OCTAVE, -7), 48);
        assert_eq!(c.degree_to_note(MIDDLE_OCTAVE, -8), 47);
        assert_eq!(c.degree_to_note(MIDDLE_OCTAVE, -14), 36);
    }

    #[test]
    fn exact_notes_map_to_one_degree() {
        let c = scale(Tonic::C, Mode::Ionian);
        assert_eq!(c.note_to_degrees(MIDDLE_OCTAVE, 60), Degrees::Exact(0));
        assert_eq!(c.note_to_degrees(MIDDLE_OCTAVE, 71), Degrees::Exact(6));
        assert_eq!(c.note_to_degrees(MIDDLE_OCTAVE, 59), Degrees::Exact(-1));
        assert_eq!(c.note_to_degrees(MIDDLE_OCTAVE, 36), Degrees::Exact(-14));
    }

    #[test]
    fn chromatic_notes_map_between_degrees() {
        let c = scale(Tonic::C, Mode::Ionian);
        let sharp = c.note_to_degrees(MIDDLE_OCTAVE, 61);
        assert_eq!(sharp, Degrees::Between { below: 0, above: 1 });
        assert_eq!(sharp.iter().collect::<Vec<_>>(), vec![0, 1]);
        assert_eq!(c.accidental(MIDDLE_OCTAVE, 0, 61), Ok(1));
        assert_eq!(c.accidental(MIDDLE_OCTAVE, 1, 61), Ok(-1));

        assert_eq!(
            c.note_to_degrees(MIDDLE_OCTAVE, 58),
            Degrees::Between {
                below: -2,
                above: -1
            }
        );
    }

    #[test]
    fn round_trip_every_key() {
        for tonic in Tonic::ALL {
            for mode in Mode::ALL {
                let s = scale(tonic, mode);
                for octave in [3, MIDDLE_OCTAVE, 7] {
                    for degree in -14..=14 {
                        let note = s.degree_to_note(octave, degree);
                        let degrees = s.note_to_degrees(octave, note);
                        assert!(
                            degrees.contains(degree),
                            "{tonic} {mode} octave {octave} degree {degree} -> {degrees:?}"
                        );
                    }
                }
            }
        }
    }

    #[test]
    fn far_notes_start_in_their_own_octave() {
        let c = scale(Tonic::C, Mode::Ionian);
        assert_eq!(
            c.note_to_degrees(MIDDLE_OCTAVE, 60 + 12 * 100_000),
            Degrees::Exact(700_000)
        );
        assert_eq!(
            c.note_to_degrees(MIDDLE_OCTAVE, 61 + 12 * 100_000),
            Degrees::Between {
                below: 700_000,
                above: 700_001
            }
        );
        assert_eq!(c.note_to_degrees(MIDDLE_OCTAVE, 127), Degrees::Exact(39));
        assert_eq!(c.note_to_degrees(MIDDLE_OCTAVE, 0), Degrees::Exact(-35));
    }

    #[test]
    fn accidental_out_of_range() {
        let c = scale(Tonic::C, Mode::Ionian);
        assert_eq!(
            c.accidental(MIDDLE_OCTAVE, 0, 63),
            Err(ScaleError::OutOfRangeAccidental {
                note: 63,
                degree: 0,
                accidental: 3
            })
        );
    }

    #[test]
    fn rejects_non_monotonic_offsets() {
        let offsets = [0, 2, 1, 5, 7, 9, 11, 12];
        assert_eq!(
            Scale::from_offsets(offsets),
            Err(ScaleError::NonMonotonic(offsets))
        );
        let open = [0, 2, 4, 5, 7, 9, 11, 13];
        assert!(Scale::from_offsets(open).is_err());
        assert!(Scale::from_offsets([0, 2, 4, 5, 7, 9, 11, 12]).is_ok());
    }

    #[test]
    fn mode_scales_are_monotonic() {
        for tonic in Tonic::ALL {
            for mode in Mode::ALL {
                let s = scale(tonic, mode);
                assert_eq!(Scale::from_offsets(s.offsets()), Ok(s));
            }
        }
    }
}

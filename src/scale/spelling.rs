use crate::scale::{Key, Letter, MIDDLE_OCTAVE, Scale};

/// A single letter of a key signature that is raised or lowered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SpelledAccidental {
    /// The staff letter the accidental applies to
    pub letter: Letter,
    /// Positive for sharps, negative for flats. Two means a double sharp.
    pub semitones: i32,
}

impl SpelledAccidental {
    /// True for sharps.
    pub const fn is_sharp(&self) -> bool {
        self.semitones > 0
    }

    /// Number of accidental glyphs drawn for this letter.
    pub const fn count(&self) -> u32 {
        self.semitones.unsigned_abs()
    }

    /// Left-to-right column of the glyph in a key signature, following the
    /// circle of fifths (F C G D A E B for sharps, B E A D G C F for flats).
    pub const fn column(&self) -> u8 {
        let sharp_order = match self.letter {
            Letter::F => 0,
            Letter::C => 1,
            Letter::G => 2,
            Letter::D => 3,
            Letter::A => 4,
            Letter::E => 5,
            Letter::B => 6,
        };
        if self.is_sharp() { sharp_order } else { 6 - sharp_order }
    }

    /// Vertical staff step of the glyph, counted in half line spacings.
    pub const fn staff_step(&self) -> u8 {
        match (self.letter, self.is_sharp()) {
            (Letter::A, _) => 5,
            (Letter::B, _) => 6,
            (Letter::C, _) => 7,
            (Letter::D, _) => 8,
            (Letter::E, _) => 9,
            (Letter::F, true) => 10,
            (Letter::G, true) => 11,
            (Letter::F, false) => 3,
            (Letter::G, false) => 4,
        }
    }

    /// ASCII rendering, e.g. `"#"`, `"bb"`.
    pub fn symbol(&self) -> String {
        let atom = if self.is_sharp() { "#" } else { "b" };
        atom.repeat(self.count() as usize)
    }

    /// Musical glyph rendering, e.g. `"♯"`, `"♭♭"`.
    pub fn glyphs(&self) -> String {
        let atom = if self.is_sharp() { '\u{266F}' } else { '\u{266D}' };
        core::iter::repeat_n(atom, self.count() as usize).collect()
    }
}

#[doc = r#"
The accidentals a key signature needs, in scale order from the tonic letter.

Each degree of the key is compared against the white-key scale that starts
on the same letter (D is compared against D dorian, F against F lydian, and
so on). Any difference is spelled as that many sharps or flats on the letter.

# Example
```rust
# use midi_degrees::prelude::*;
let spelling = KeySignatureSpelling::compute(Key::new(Tonic::D, Mode::Ionian));
assert_eq!(spelling.sharps(), 2);
assert_eq!(spelling.flats(), 0);
```
"#]
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct KeySignatureSpelling {
    accidentals: Vec<SpelledAccidental>,
}

impl KeySignatureSpelling {
    /// Computes the spelling of `key`.
    pub fn compute(key: Key) -> Self {
        let letter = key.tonic.letter();
        let scale = Scale::new(key);
        let white = Scale::new(Key::new(letter.natural(), letter.white_key_mode()));

        // A tonic spelled below its own letter (Cb) sits an octave under the
        // letter's white-key scale; compare against the next octave up.
        let reference_octave =
            if key.tonic.semitone() - letter.natural().semitone() > 6 {
                MIDDLE_OCTAVE + 1
            } else {
                MIDDLE_OCTAVE
            };

        let accidentals = (0..7)
            .filter_map(|degree| {
                let expected = white.degree_to_note(reference_octave, degree);
                let observed = scale.degree_to_note(MIDDLE_OCTAVE, degree);
                (observed != expected).then(|| SpelledAccidental {
                    letter: letter.offset(degree as usize),
                    semitones: observed - expected,
                })
            })
            .collect();
        Self { accidentals }
    }

    /// The spelled letters, in scale order.
    pub fn accidentals(&self) -> &[SpelledAccidental] {
        &self.accidentals
    }

    /// The accidental on `letter`, if any.
    pub fn get(&self, letter: Letter) -> Option<&SpelledAccidental> {
        self.accidentals.iter().find(|acc| acc.letter == letter)
    }

    /// Number of sharpened letters.
    pub fn sharps(&self) -> usize {
        self.accidentals.iter().filter(|acc| acc.is_sharp()).count()
    }

    /// Number of flattened letters.
    pub fn flats(&self) -> usize {
        self.accidentals.iter().filter(|acc| !acc.is_sharp()).count()
    }

    /// True for keys without accidentals.
    pub fn is_empty(&self) -> bool {
        self.accidentals.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scale::{Mode, Tonic};

    fn spell(tonic: Tonic, mode: Mode) -> KeySignatureSpelling {
        KeySignatureSpelling::compute(Key::new(tonic, mode))
    }

    #[test]
    fn white_key_modes_have_no_accidentals() {
        for letter in Letter::ALL {
            assert!(spell(letter.natural(), letter.white_key_mode()).is_empty());
        }
    }

    #[test]
    fn d_major_has_f_and_c_sharp() {
        let spelling = spell(Tonic::D, Mode::Ionian);
        assert_eq!(spelling.sharps(), 2);
        let f = spelling.get(Letter::F).unwrap();
        assert_eq!(f.semitones, 1);
        assert_eq!(f.column(), 0);
        assert_eq!(f.staff_step(), 10);
        assert_eq!(spelling.get(Letter::C).unwrap().column(), 1);
        assert!(spelling.get(Letter::G).is_none());
    }

    #[test]
    fn b_flat_major_has_two_flats() {
        let spelling = spell(Tonic::BFlat, Mode::Ionian);
        assert_eq!(spelling.flats(), 2);
        assert_eq!(spelling.sharps(), 0);
        let b = spelling.get(Letter::B).unwrap();
        assert_eq!(b.symbol(), "b");
        assert_eq!(b.glyphs(), "\u{266D}");
        assert_eq!(b.column(), 0);
        assert_eq!(spelling.get(Letter::E).unwrap().column(), 1);
    }

    #[test]
    fn c_flat_major_has_seven_single_flats() {
        let spelling = spell(Tonic::CFlat, Mode::Ionian);
        assert_eq!(spelling.flats(), 7);
        assert!(spelling.accidentals().iter().all(|acc| acc.semitones == -1));
        assert_eq!(spelling.accidentals()[0].letter, Letter::C);
    }

    #[test]
    fn c_sharp_major_has_seven_sharps() {
        let spelling = spell(Tonic::CSharp, Mode::Ionian);
        assert_eq!(spelling.sharps(), 7);
        assert!(spelling.accidentals().iter().all(|acc| acc.semitones == 1));
    }

    #[test]
    fn minor_keys_follow_relative_major() {
        assert_eq!(spell(Tonic::E, Mode::Aeolian).sharps(), 1);
        assert_eq!(spell(Tonic::D, Mode::Aeolian).flats(), 1);
        assert_eq!(
            spell(Tonic::D, Mode::Aeolian).get(Letter::B).unwrap().semitones,
            -1
        );
    }

    #[test]
    fn b_sharp_major_needs_double_sharps() {
        let spelling = spell(Tonic::BSharp, Mode::Ionian);
        assert_eq!(spelling.sharps(), 7);
        let c = spelling.get(Letter::C).unwrap();
        assert_eq!(c.semitones, 2);
        assert_eq!(c.symbol(), "##");
    }
}

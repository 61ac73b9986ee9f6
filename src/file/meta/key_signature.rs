use crate::{
    EventError,
    scale::{Key, Mode, Tonic},
};

const SHARP_MAJOR: [Tonic; 8] = [
    Tonic::C,
    Tonic::G,
    Tonic::D,
    Tonic::A,
    Tonic::E,
    Tonic::B,
    Tonic::FSharp,
    Tonic::CSharp,
];
const FLAT_MAJOR: [Tonic; 8] = [
    Tonic::CFlat,
    Tonic::GFlat,
    Tonic::DFlat,
    Tonic::AFlat,
    Tonic::EFlat,
    Tonic::BFlat,
    Tonic::F,
    Tonic::C,
];
const SHARP_MINOR: [Tonic; 8] = [
    Tonic::A,
    Tonic::E,
    Tonic::B,
    Tonic::FSharp,
    Tonic::CSharp,
    Tonic::GSharp,
    Tonic::DSharp,
    Tonic::ASharp,
];
const FLAT_MINOR: [Tonic; 8] = [
    Tonic::AFlat,
    Tonic::EFlat,
    Tonic::BFlat,
    Tonic::F,
    Tonic::C,
    Tonic::G,
    Tonic::D,
    Tonic::A,
];

#[doc = r#"
A Key Signature meta event (`FF 59 02 sf mi`).

`sf` is a signed count of sharps (positive) or flats (negative), `mi` is 0
for a major key and 1 for a minor key. Major keys map to the ionian mode and
minor keys to aeolian.

# Example
```rust
# use midi_degrees::prelude::*;
// two flats, major
let sig = KeySignature::from_meta_parameters(&[2, 0xFE, 0]).unwrap();
assert_eq!(sig.key(), Key::new(Tonic::BFlat, Mode::Ionian));
```
"#]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct KeySignature {
    sharps_or_flats: i8,
    minor: bool,
}

impl KeySignature {
    /// Create a key signature from its decoded fields.
    ///
    /// `sharps_or_flats` must lie within -7..=7.
    pub fn new(sharps_or_flats: i8, minor: bool) -> Result<Self, EventError> {
        if !(-7..=7).contains(&sharps_or_flats) {
            return Err(EventError::InvalidKeySignature(vec![
                sharps_or_flats as u8,
                u8::from(minor),
            ]));
        }
        Ok(Self {
            sharps_or_flats,
            minor,
        })
    }

    /// Decodes the two data bytes of the event, `[sf, mi]`.
    pub fn from_payload(payload: &[u8]) -> Result<Self, EventError> {
        let invalid = || EventError::InvalidKeySignature(payload.to_vec());
        let &[sf, mi] = payload else {
            return Err(invalid());
        };
        let minor = match mi {
            0 => false,
            1 => true,
            _ => return Err(invalid()),
        };
        Self::new(sf as i8, minor).map_err(|_| invalid())
    }

    /// Decodes the length-prefixed parameter block `[2, sf, mi]`.
    pub fn from_meta_parameters(parameters: &[u8]) -> Result<Self, EventError> {
        match parameters {
            [2, payload @ ..] => Self::from_payload(payload),
            _ => Err(EventError::InvalidKeySignature(parameters.to_vec())),
        }
    }

    /// Signed number of sharps (positive) or flats (negative).
    pub const fn sharps_or_flats(&self) -> i8 {
        self.sharps_or_flats
    }

    /// True for minor keys.
    pub const fn is_minor(&self) -> bool {
        self.minor
    }

    /// The tonic named by the signature.
    pub fn tonic(&self) -> Tonic {
        let raw = self.sharps_or_flats as u8;
        let (sharps, flats) = if self.minor {
            (&SHARP_MINOR, &FLAT_MINOR)
        } else {
            (&SHARP_MAJOR, &FLAT_MAJOR)
        };
        if raw & 0x80 != 0 {
            flats[usize::from(raw.wrapping_add(7))]
        } else {
            sharps[usize::from(raw)]
        }
    }

    /// The mode named by the signature: ionian or aeolian.
    pub const fn mode(&self) -> Mode {
        if self.minor {
            Mode::Aeolian
        } else {
            Mode::Ionian
        }
    }

    /// Tonic and mode together.
    pub fn key(&self) -> Key {
        Key::new(self.tonic(), self.mode())
    }
}

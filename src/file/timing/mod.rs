mod smpte;
pub use smpte::*;

use crate::TimingError;

/// The header timing type.
///
/// This is either the number of ticks per quarter note or
/// the alternative SMPTE format, selected by bit 15 of the header's
/// time division word. See [`RawHeader`](crate::file::RawHeader).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Timing {
    /// The midi file's delta times are defined using a tick rate per quarter note
    TicksPerQuarterNote(TicksPerQuarterNote),

    /// The midi file's delta times are defined using an SMPTE frame rate
    Smpte(SmpteHeader),
}

impl Timing {
    /// The tickrate per quarter note defines what a "quarter note" means.
    ///
    /// The leading bit of the u16 is disregarded, so 1-32767
    pub const fn new_ticks_per_quarter_note(tpqn: u16) -> Self {
        Self::TicksPerQuarterNote(TicksPerQuarterNote {
            inner: tpqn & 0x7FFF,
        })
    }

    /// Define the timing in terms of fps and ticks per frame
    pub const fn new_smpte(fps: SmpteFps, ticks_per_frame: u8) -> Self {
        Self::Smpte(SmpteHeader {
            fps,
            ticks_per_frame,
        })
    }

    /// Interprets the raw time division word of a header chunk.
    pub fn from_division(division: u16) -> Result<Self, TimingError> {
        let [msb, lsb] = division.to_be_bytes();
        match msb >> 7 {
            0 => {
                //this is ticks per quarter_note
                let timing = Self::new_ticks_per_quarter_note(division);
                if division == 0 {
                    return Err(TimingError::ZeroTicks);
                }
                Ok(timing)
            }
            _ => SmpteHeader::new([msb, lsb]).map(Self::Smpte),
        }
    }

    /// Returns Some if the midi timing is defined
    /// as ticks per quarter note
    pub const fn ticks_per_quarter_note(&self) -> Option<u16> {
        match self {
            Self::TicksPerQuarterNote(t) => Some(t.ticks_per_quarter_note()),
            _ => None,
        }
    }

    /// Returns Some if the midi timing is SMPTE based
    pub const fn smpte(&self) -> Option<SmpteHeader> {
        match self {
            Self::Smpte(s) => Some(*s),
            _ => None,
        }
    }
}

/// A representation of the `tpqn` timing for a MIDI file
#[derive(Debug, Clone, PartialEq, Eq, Copy)]
pub struct TicksPerQuarterNote {
    pub(crate) inner: u16,
}
impl TicksPerQuarterNote {
    /// Returns the ticks per quarter note for the file.
    pub const fn ticks_per_quarter_note(&self) -> u16 {
        self.inner
    }
}

#[test]
fn division_selects_ticks_per_quarter_note() {
    let timing = Timing::from_division(96).unwrap();
    assert_eq!(timing.ticks_per_quarter_note(), Some(96));
    assert_eq!(timing.smpte(), None);
}

#[test]
fn division_selects_smpte() {
    // -25 fps, 40 ticks per frame
    let timing = Timing::from_division(0xE728).unwrap();
    let smpte = timing.smpte().unwrap();
    assert_eq!(smpte.fps(), SmpteFps::TwentyFive);
    assert_eq!(smpte.ticks_per_frame(), 40);
    assert_eq!(timing.ticks_per_quarter_note(), None);
}

#[test]
fn zero_division_is_rejected() {
    assert_eq!(Timing::from_division(0), Err(TimingError::ZeroTicks));
    assert_eq!(Timing::from_division(0xE800), Err(TimingError::ZeroTicks));
}

#[test]
fn unknown_frame_rate_is_rejected() {
    // -20 fps is not an SMPTE rate
    assert_eq!(
        Timing::from_division(0xEC04),
        Err(TimingError::SmpteFrameRate(-20))
    );
}

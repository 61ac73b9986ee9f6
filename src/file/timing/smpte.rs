#![doc = r#"
SMPTE frame based timing.

When bit 15 of the header's time division is set, delta times count
subdivisions of SMPTE frames instead of fractions of a quarter note. The high
byte holds the negated frame rate (-24, -25, -29 or -30) and the low byte the
number of ticks per frame. Tempo has no meaning under this timing.
"#]

use crate::TimingError;

/// The possible FPS (Frames Per Second) for a MIDI file
///
/// The MIDI specification defines only four possible frame types:
/// - 24 fps: Standard film rate
/// - 25 fps: PAL/SECAM television standard
/// - 29.97 fps: NTSC color television (drop-frame timecode)
/// - 30 fps: NTSC black & white, some digital video formats
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SmpteFps {
    /// 24 frames per second
    TwentyFour,
    /// 25 frames per second
    TwentyFive,
    /// 29.97 frames per second, encoded as 29 (drop frame)
    TwentyNine,
    /// 30 frames per second
    Thirty,
}

impl SmpteFps {
    /// The frame rate as written in the header, without the sign.
    pub const fn as_division(&self) -> u8 {
        match self {
            Self::TwentyFour => 24,
            Self::TwentyFive => 25,
            Self::TwentyNine => 29,
            Self::Thirty => 30,
        }
    }

    /// Frames per second used for tick conversion.
    ///
    /// The drop-frame rate is 29.97 by definition.
    pub const fn as_f64(&self) -> f64 {
        match self {
            Self::TwentyFour => 24.,
            Self::TwentyFive => 25.,
            Self::TwentyNine => DROP_FRAME,
            Self::Thirty => 30.,
        }
    }
}

const DROP_FRAME: f64 = 29.97;

/// A representation of the `smpte` timing for a MIDI file
#[derive(Debug, Clone, PartialEq, Eq, Copy)]
pub struct SmpteHeader {
    pub(crate) fps: SmpteFps,
    pub(crate) ticks_per_frame: u8,
}

impl SmpteHeader {
    pub(crate) fn new(bytes: [u8; 2]) -> Result<Self, TimingError> {
        //first bit is known to be 1 when calling this
        //Bits 14 thru 8 contain one of the four values -24, -25, -29, or -30
        let byte = bytes[0] as i8;

        let fps = match byte {
            -24 => SmpteFps::TwentyFour,
            -25 => SmpteFps::TwentyFive,
            -29 => SmpteFps::TwentyNine,
            -30 => SmpteFps::Thirty,
            _ => return Err(TimingError::SmpteFrameRate(byte)),
        };
        if bytes[1] == 0 {
            return Err(TimingError::ZeroTicks);
        }
        Ok(Self {
            fps,
            ticks_per_frame: bytes[1],
        })
    }

    /// Returns the frames per second
    pub const fn fps(&self) -> SmpteFps {
        self.fps
    }

    /// Returns the ticks per frame
    pub const fn ticks_per_frame(&self) -> u8 {
        self.ticks_per_frame
    }

    /// Frames per second as a float, 29.97 for drop frame.
    pub const fn frames_per_second(&self) -> f64 {
        self.fps.as_f64()
    }
}

#[test]
fn drop_frame_is_special_cased() {
    let header = SmpteHeader::new([(-29i8) as u8, 4]).unwrap();
    assert_eq!(header.fps(), SmpteFps::TwentyNine);
    assert_eq!(header.frames_per_second(), 29.97);
    assert_eq!(header.fps().as_division(), 29);
}

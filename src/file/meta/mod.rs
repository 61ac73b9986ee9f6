#![doc = r#"
Meta events (`0xFF <type> <length> <data>`)

Only two meta types influence the timeline: Set Tempo rescales the
conversion of ticks to seconds, and Key Signature changes the key notes are
mapped in. Every other meta type is kept as an opaque event.
"#]

mod tempo;
pub use tempo::*;

mod key_signature;
pub use key_signature::*;

use core::fmt;
use num_enum::FromPrimitive;

/// The type byte of a meta event
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, FromPrimitive)]
#[repr(u8)]
pub enum MetaType {
    /// `FF 00`
    SequenceNumber = 0x00,
    /// `FF 01`
    Text = 0x01,
    /// `FF 02`
    Copyright = 0x02,
    /// `FF 03`
    TrackName = 0x03,
    /// `FF 04`
    InstrumentName = 0x04,
    /// `FF 05`
    Lyric = 0x05,
    /// `FF 06`
    Marker = 0x06,
    /// `FF 07`
    CuePoint = 0x07,
    /// `FF 08`
    ProgramName = 0x08,
    /// `FF 09`
    DeviceName = 0x09,
    /// `FF 20`
    ChannelPrefix = 0x20,
    /// `FF 21`
    Port = 0x21,
    /// `FF 2F`
    EndOfTrack = 0x2F,
    /// `FF 51`
    Tempo = 0x51,
    /// `FF 54`
    SmpteOffset = 0x54,
    /// `FF 58`
    TimeSignature = 0x58,
    /// `FF 59`
    KeySignature = 0x59,
    /// `FF 7F`
    SequencerSpecific = 0x7F,
    /// Any type byte without a defined meaning
    #[num_enum(catch_all)]
    Unknown(u8),
}

impl MetaType {
    /// The raw type byte
    pub fn byte(&self) -> u8 {
        match *self {
            Self::Unknown(b) => b,
            Self::SequenceNumber => 0x00,
            Self::Text => 0x01,
            Self::Copyright => 0x02,
            Self::TrackName => 0x03,
            Self::InstrumentName => 0x04,
            Self::Lyric => 0x05,
            Self::Marker => 0x06,
            Self::CuePoint => 0x07,
            Self::ProgramName => 0x08,
            Self::DeviceName => 0x09,
            Self::ChannelPrefix => 0x20,
            Self::Port => 0x21,
            Self::EndOfTrack => 0x2F,
            Self::Tempo => 0x51,
            Self::SmpteOffset => 0x54,
            Self::TimeSignature => 0x58,
            Self::KeySignature => 0x59,
            Self::SequencerSpecific => 0x7F,
        }
    }
}

impl fmt::Display for MetaType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::SequenceNumber => "Sequence Number",
            Self::Text => "General Text",
            Self::Copyright => "Copyright Text",
            Self::TrackName => "Sequence Name / Track Name",
            Self::InstrumentName => "Instrument Name",
            Self::Lyric => "Lyric Text",
            Self::Marker => "Marker Text",
            Self::CuePoint => "Cue Point Text",
            Self::ProgramName => "Program Name",
            Self::DeviceName => "Device Name",
            Self::ChannelPrefix => "Channel Prefix",
            Self::Port => "Port",
            Self::EndOfTrack => "End of Track",
            Self::Tempo => "Tempo",
            Self::SmpteOffset => "SMPTE Offset",
            Self::TimeSignature => "Time Signature",
            Self::KeySignature => "Key Signature",
            Self::SequencerSpecific => "Sequencer Specific Event",
            Self::Unknown(b) => return write!(f, "Meta: Unknown (0x{b:02X})"),
        };
        write!(f, "Meta: {name}")
    }
}

#[test]
fn meta_types_from_bytes() {
    assert_eq!(MetaType::from(0x51), MetaType::Tempo);
    assert_eq!(MetaType::from(0x59), MetaType::KeySignature);
    assert_eq!(MetaType::from(0x2F), MetaType::EndOfTrack);
    assert_eq!(MetaType::from(0x60), MetaType::Unknown(0x60));
    assert_eq!(MetaType::from(0x60).byte(), 0x60);
    assert_eq!(MetaType::KeySignature.byte(), 0x59);
}

#[test]
fn meta_type_names() {
    assert_eq!(MetaType::Tempo.to_string(), "Meta: Tempo");
    assert_eq!(MetaType::Unknown(0x60).to_string(), "Meta: Unknown (0x60)");
}

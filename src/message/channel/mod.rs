#![doc = r#"
Channel message types

The upper nibble of a channel status byte selects the message type and the
lower nibble the channel (0-15). Every type but Program Change and Channel
Pressure carries two data bytes.
"#]
use core::fmt;
use num_enum::TryFromPrimitive;

#[doc = r#"
The set of possible Channel messages, keyed by status nibble
"#]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, TryFromPrimitive)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(u8)]
pub enum ChannelMessageType {
    /// `0x8n`
    NoteOff = 0x8,
    /// `0x9n`
    NoteOn = 0x9,
    /// `0xAn`
    PolyphonicKeyPressure = 0xA,
    /// `0xBn`
    ControlChange = 0xB,
    /// `0xCn`
    ProgramChange = 0xC,
    /// `0xDn`
    ChannelPressure = 0xD,
    /// `0xEn`
    PitchBend = 0xE,
}

impl ChannelMessageType {
    /// Decodes the type from a channel status byte (`0x80..=0xEF`).
    pub fn from_status(status: u8) -> Option<Self> {
        Self::try_from(status >> 4).ok()
    }

    /// Number of data bytes following the status.
    pub const fn data_len(&self) -> usize {
        match self {
            Self::ProgramChange | Self::ChannelPressure => 1,
            _ => 2,
        }
    }
}

impl fmt::Display for ChannelMessageType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::NoteOff => "Note Off",
            Self::NoteOn => "Note On",
            Self::PolyphonicKeyPressure => "Polyphonic Key Pressure (Aftertouch)",
            Self::ControlChange => "Control Change",
            Self::ProgramChange => "Program Change",
            Self::ChannelPressure => "Channel Pressure (Aftertouch)",
            Self::PitchBend => "Pitch Bend Change",
        })
    }
}

#[test]
fn status_nibble_selects_type() {
    assert_eq!(
        ChannelMessageType::from_status(0x93),
        Some(ChannelMessageType::NoteOn)
    );
    assert_eq!(
        ChannelMessageType::from_status(0xC0),
        Some(ChannelMessageType::ProgramChange)
    );
    assert_eq!(ChannelMessageType::from_status(0xF0), None);
    assert_eq!(ChannelMessageType::from_status(0x40), None);
}

#[test]
fn data_lengths() {
    assert_eq!(ChannelMessageType::ProgramChange.data_len(), 1);
    assert_eq!(ChannelMessageType::ChannelPressure.data_len(), 1);
    assert_eq!(ChannelMessageType::NoteOn.data_len(), 2);
    assert_eq!(ChannelMessageType::PitchBend.data_len(), 2);
}

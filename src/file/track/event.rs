use crate::{
    EventError, ParseError,
    file::{KeySignature, MetaType, Tempo},
    message::{TrackMessage, channel::ChannelMessageType},
    note::Note,
    reader::{ReadResult, Reader, ReaderError, ReaderErrorKind, inv_data},
};

/// Status byte of meta events
pub const META_STATUS: u8 = 0xFF;
/// Status byte starting a system exclusive message
pub const SYSEX_STATUS: u8 = 0xF0;
/// Status byte ending a system exclusive message, or starting an escape
pub const SYSEX_END: u8 = 0xF7;

/// Structural category of a track event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventKind {
    /// Channel voice or mode message (`0x80..=0xEF`)
    Channel {
        /// Upper nibble of the status
        message_type: ChannelMessageType,
        /// Lower nibble of the status
        channel: u8,
    },
    /// Meta event (`0xFF`)
    Meta {
        /// The type byte following `0xFF`
        meta_type: MetaType,
    },
    /// System exclusive message or escape (`0xF0`, `0xF7`)
    Sysex,
    /// Other system common message (`0xF1..=0xFE`)
    System,
}

#[doc = r#"
One event of a track.

`parameters` holds the data bytes after the status: the one or two data
bytes of a channel message, the payload of a meta event (without its type
and length), or the body of a system exclusive message up to and including
its closing `0xF7`.
"#]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrackEvent {
    delta_ticks: u32,
    status: u8,
    parameters: Vec<u8>,
    kind: EventKind,
    message: TrackMessage,
}

impl TrackEvent {
    /// Create an event from its status byte and data bytes.
    ///
    /// For meta events pass the meta type in `kind`; the status is `0xFF`.
    pub fn new(
        delta_ticks: u32,
        status: u8,
        kind: EventKind,
        parameters: Vec<u8>,
    ) -> Result<Self, EventError> {
        let message = resolve(kind, &parameters)?;
        Ok(Self {
            delta_ticks,
            status,
            parameters,
            kind,
            message,
        })
    }

    /// A channel message from a channel status byte (`0x80..=0xEF`).
    ///
    /// Returns `None` for system status bytes.
    pub fn channel(delta_ticks: u32, status: u8, data: &[u8]) -> Option<Self> {
        let message_type = ChannelMessageType::from_status(status)?;
        let kind = EventKind::Channel {
            message_type,
            channel: status & 0x0F,
        };
        Self::new(delta_ticks, status, kind, data.to_vec()).ok()
    }

    /// A meta event with the given payload.
    pub fn meta(delta_ticks: u32, meta_type: MetaType, payload: &[u8]) -> Result<Self, EventError> {
        Self::new(
            delta_ticks,
            META_STATUS,
            EventKind::Meta { meta_type },
            payload.to_vec(),
        )
    }

    /// A Set Tempo meta event.
    pub fn tempo(delta_ticks: u32, micros_per_quarter_note: u32) -> Self {
        let [_, b0, b1, b2] = micros_per_quarter_note.to_be_bytes();
        let message = TrackMessage::TempoChange(Tempo::new(micros_per_quarter_note));
        Self {
            delta_ticks,
            status: META_STATUS,
            parameters: vec![b0, b1, b2],
            kind: EventKind::Meta {
                meta_type: MetaType::Tempo,
            },
            message,
        }
    }

    /// The End of Track meta event.
    pub fn end_of_track(delta_ticks: u32) -> Self {
        Self {
            delta_ticks,
            status: META_STATUS,
            parameters: Vec::new(),
            kind: EventKind::Meta {
                meta_type: MetaType::EndOfTrack,
            },
            message: TrackMessage::Other,
        }
    }

    /// Decodes one event.
    ///
    /// `running_status` is the last channel status byte seen on the track.
    /// The returned status is the running status for the next event: meta,
    /// sysex and system events leave it unchanged.
    pub fn read(
        reader: &mut Reader<'_>,
        running_status: Option<u8>,
    ) -> ReadResult<(Self, Option<u8>)> {
        let delta_ticks = reader.read_varlen()?;
        let status_position = reader.buffer_position();
        let byte = reader.peek_u8()?;

        let (status, running_status) = if byte & 0x80 != 0 {
            reader.read_u8()?;
            if byte & 0xF0 == 0xF0 {
                (byte, running_status)
            } else {
                (byte, Some(byte))
            }
        } else {
            // data byte: reuse the previous channel status
            match running_status {
                Some(status) => (status, running_status),
                None => {
                    return Err(ReaderError::new(
                        status_position,
                        ReaderErrorKind::event(EventError::MissingInitialStatus),
                    ));
                }
            }
        };

        let (kind, parameters) = match status {
            META_STATUS => {
                let meta_type = MetaType::from(reader.read_u8()?);
                let len = reader.read_varlen()?;
                let payload = reader.read_slice(len as usize)?;
                (EventKind::Meta { meta_type }, payload.to_vec())
            }
            SYSEX_STATUS => (EventKind::Sysex, read_sysex_body(reader)?),
            SYSEX_END => {
                let len = reader.read_varlen()?;
                (EventKind::Sysex, reader.read_slice(len as usize)?.to_vec())
            }
            0xF1 | 0xF3 => (EventKind::System, reader.read_slice(1)?.to_vec()),
            0xF2 => (EventKind::System, reader.read_slice(2)?.to_vec()),
            status => match ChannelMessageType::from_status(status) {
                Some(message_type) => {
                    let kind = EventKind::Channel {
                        message_type,
                        channel: status & 0x0F,
                    };
                    (kind, reader.read_slice(message_type.data_len())?.to_vec())
                }
                // 0xF4..=0xFE carry no data
                None => (EventKind::System, Vec::new()),
            },
        };

        let event = Self::new(delta_ticks, status, kind, parameters)
            .map_err(|e| inv_data(reader, ParseError::Event(e)))?;
        Ok((event, running_status))
    }

    /// Ticks since the previous event on the same track
    pub const fn delta_ticks(&self) -> u32 {
        self.delta_ticks
    }

    /// The status byte, explicit or implied by running status
    pub const fn status(&self) -> u8 {
        self.status
    }

    /// The data bytes of the event
    pub fn parameters(&self) -> &[u8] {
        &self.parameters
    }

    /// The structural category of the event
    pub const fn kind(&self) -> EventKind {
        self.kind
    }

    /// What the event means for the timeline
    pub const fn message(&self) -> &TrackMessage {
        &self.message
    }

    /// True for the End of Track meta event
    pub fn is_end_of_track(&self) -> bool {
        matches!(
            self.kind,
            EventKind::Meta {
                meta_type: MetaType::EndOfTrack
            }
        )
    }
}

/// Reads a system exclusive body up to and including the closing `0xF7`.
fn read_sysex_body(reader: &mut Reader<'_>) -> ReadResult<Vec<u8>> {
    let mut body = Vec::new();
    loop {
        let byte = reader
            .read_u8()
            .map_err(|_| inv_data(reader, EventError::UnterminatedSysex))?;
        body.push(byte);
        if byte == SYSEX_END {
            return Ok(body);
        }
    }
}

fn resolve(kind: EventKind, parameters: &[u8]) -> Result<TrackMessage, EventError> {
    let message = match kind {
        EventKind::Channel {
            message_type,
            channel,
        } => match (message_type, parameters) {
            (ChannelMessageType::NoteOn, &[note, velocity]) if velocity > 0 => {
                TrackMessage::NoteOn {
                    channel,
                    note: Note::new(note),
                    velocity,
                }
            }
            (ChannelMessageType::NoteOn | ChannelMessageType::NoteOff, &[note, velocity]) => {
                TrackMessage::NoteOff {
                    channel,
                    note: Note::new(note),
                    velocity,
                }
            }
            _ => TrackMessage::Other,
        },
        EventKind::Meta {
            meta_type: MetaType::Tempo,
        } => match Tempo::from_payload(parameters) {
            Some(tempo) => TrackMessage::TempoChange(tempo),
            None => {
                tracing::warn!(?parameters, "ignoring unusable Set Tempo payload");
                TrackMessage::Other
            }
        },
        EventKind::Meta {
            meta_type: MetaType::KeySignature,
        } => TrackMessage::KeySignature(KeySignature::from_payload(parameters)?),
        EventKind::Meta { .. } | EventKind::Sysex | EventKind::System => TrackMessage::Other,
    };
    Ok(message)
}

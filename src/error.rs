use crate::reader::ReaderError;
use thiserror::Error;

/// Structural errors raised while decoding a file.
#[derive(Debug, Error, PartialEq)]
pub enum ParseError {
    /// Chunk layout violations
    #[error("chunk: {0}")]
    Chunk(#[from] ChunkError),
    /// Malformed track events
    #[error("event: {0}")]
    Event(#[from] EventError),
    /// Unusable time division
    #[error("timing: {0}")]
    Timing(#[from] TimingError),
}

/// Errors in the chunk framing of a file.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ChunkError {
    /// The file does not start with `MThd`.
    #[error("expected MThd, found {0:?}")]
    InvalidHeaderTag([u8; 4]),
    /// The header chunk is too short to hold format, track count and division.
    #[error("header chunk declares {0} bytes, at least 6 are required")]
    HeaderLength(u32),
    /// The format word is not 0, 1 or 2.
    #[error("unknown file format {0}")]
    InvalidFormat(u16),
    /// The events of a track did not end exactly at the chunk boundary.
    #[error("track chunk declares {expected} bytes, its events span {actual}")]
    TruncatedTrack {
        /// Length the chunk header promised
        expected: usize,
        /// Length the decoded events actually took
        actual: usize,
    },
    /// Bytes remain after the last declared track chunk.
    #[error("{0} trailing bytes after the last track chunk")]
    TrailingData(usize),
}

/// Errors in individual track events.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum EventError {
    /// A data byte appeared before any channel status byte on the track.
    #[error("running status used before any status byte")]
    MissingInitialStatus,
    /// A system exclusive message ran to the end of the buffer without `0xF7`.
    #[error("system exclusive message is missing its 0xF7 terminator")]
    UnterminatedSysex,
    /// A key signature meta event whose bytes cannot be interpreted.
    #[error("invalid key signature data {0:?}")]
    InvalidKeySignature(Vec<u8>),
}

/// Errors in the header's time division word.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TimingError {
    /// SMPTE division with a frame rate other than 24, 25, 29 or 30.
    #[error("invalid SMPTE frame rate {0}")]
    SmpteFrameRate(i8),
    /// A division of zero ticks cannot be converted to time.
    #[error("time division of zero ticks")]
    ZeroTicks,
}

/// Errors produced by the scale engine.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ScaleError {
    /// The tonic name is not one of the 21 known spellings.
    #[error("unknown tonic {0:?}")]
    UnknownTonic(String),
    /// The mode name is not one of the seven diatonic modes.
    #[error("unknown mode {0:?}")]
    UnknownMode(String),
    /// Degree offsets must rise strictly and close on the octave.
    #[error("scale offsets {0:?} are not strictly ascending within one octave")]
    NonMonotonic([i32; 8]),
    /// A note sits further than one semitone from the degree it was mapped to.
    #[error("note {note} is {accidental} semitones away from degree {degree}")]
    OutOfRangeAccidental {
        /// The absolute note
        note: i32,
        /// The degree it was mapped onto
        degree: i32,
        /// The offending offset
        accidental: i32,
    },
}

/// Any error the decode-merge-project pipeline can surface.
#[derive(Debug, Error, PartialEq)]
pub enum Error {
    /// Decoding the file failed
    #[error(transparent)]
    Read(#[from] ReaderError),
    /// Mapping notes onto the scale failed
    #[error(transparent)]
    Scale(#[from] ScaleError),
}

/// Result type for the full pipeline (see [`Error`])
pub type Result<T> = core::result::Result<T, Error>;

/// Tempo of a file, in microseconds per quarter note (beat).
///
/// Files without a Set Tempo event play at 120 beats per minute.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Tempo(u32);

impl Default for Tempo {
    fn default() -> Self {
        Self(500_000)
    }
}

impl Tempo {
    /// Create a tempo from microseconds per quarter note.
    pub const fn new(micros_per_quarter_note: u32) -> Self {
        Self(micros_per_quarter_note)
    }

    /// Reads the big-endian payload of a Set Tempo event.
    ///
    /// The payload is normally three bytes. Empty payloads, payloads longer
    /// than four bytes and a tempo of zero have no usable meaning and yield
    /// `None`.
    pub fn from_payload(payload: &[u8]) -> Option<Self> {
        if payload.is_empty() || payload.len() > 4 {
            return None;
        }
        let micros = payload
            .iter()
            .fold(0u32, |acc, byte| (acc << 8) | u32::from(*byte));
        (micros > 0).then_some(Self(micros))
    }

    /// Microseconds per quarter note
    pub const fn micros_per_quarter_note(&self) -> u32 {
        self.0
    }

    /// Quarter notes per second
    pub fn beats_per_second(&self) -> f64 {
        1_000_000. / f64::from(self.0)
    }
}

#[test]
fn default_is_120_bpm() {
    assert_eq!(Tempo::default().beats_per_second(), 2.);
}

#[test]
fn reads_three_byte_payload() {
    let tempo = Tempo::from_payload(&[0x0F, 0x42, 0x40]).unwrap();
    assert_eq!(tempo.micros_per_quarter_note(), 1_000_000);
    assert_eq!(tempo.beats_per_second(), 1.);
}

#[test]
fn rejects_unusable_payloads() {
    assert_eq!(Tempo::from_payload(&[]), None);
    assert_eq!(Tempo::from_payload(&[0, 0, 0]), None);
    assert_eq!(Tempo::from_payload(&[1, 2, 3, 4, 5]), None);
}

use midi_degrees::prelude::*;
use pretty_assertions::assert_eq;

/// Helper function to create a minimal SMPTE timed MIDI file.
///
/// The track holds a Set Tempo event, which must not change anything, and
/// middle C held for `note_ticks`.
fn create_midi_with_smpte_timing(fps: SmpteFps, ticks_per_frame: u8, note_ticks: u8) -> Vec<u8> {
    let mut bytes = Vec::new();

    // MIDI Header
    bytes.extend_from_slice(b"MThd");
    bytes.extend_from_slice(&[0x00, 0x00, 0x00, 0x06]);
    bytes.extend_from_slice(&[0x00, 0x00]); // Format 0
    bytes.extend_from_slice(&[0x00, 0x01]); // One track

    // High bit set indicates SMPTE timing
    let fps_byte = match fps {
        SmpteFps::TwentyFour => 0xE8, // -24 in two's complement
        SmpteFps::TwentyFive => 0xE7, // -25 in two's complement
        SmpteFps::TwentyNine => 0xE3, // -29 in two's complement
        SmpteFps::Thirty => 0xE2,     // -30 in two's complement
    };
    bytes.push(fps_byte);
    bytes.push(ticks_per_frame);

    // Track Header
    bytes.extend_from_slice(b"MTrk");
    let track_length_pos = bytes.len();
    bytes.extend_from_slice(&[0x00, 0x00, 0x00, 0x00]); // Placeholder for length
    let track_start = bytes.len();

    // Set Tempo, 60 bpm
    bytes.extend_from_slice(&[0x00, 0xFF, 0x51, 0x03, 0x0F, 0x42, 0x40]);

    bytes.push(0x00); // Delta time
    bytes.push(0x90); // Note On, channel 0
    bytes.push(0x3C); // Middle C (60)
    bytes.push(0x64); // Velocity 100

    bytes.push(note_ticks); // Delta time
    bytes.push(0x80); // Note Off, channel 0
    bytes.push(0x3C); // Middle C
    bytes.push(0x40); // Release velocity 64

    // End of Track
    bytes.extend_from_slice(&[0x00, 0xFF, 0x2F, 0x00]);

    let track_length = bytes.len() - track_start;
    bytes[track_length_pos..track_length_pos + 4]
        .copy_from_slice(&(track_length as u32).to_be_bytes());

    bytes
}

fn note_off_seconds(bytes: &[u8]) -> f64 {
    let timeline = decode_timeline(bytes, &SessionConfig::default()).unwrap();
    assert_eq!(timeline.len(), 2);
    assert_eq!(timeline[0].timestamp_seconds, 0.);
    assert_eq!(timeline[1].event_type(), EventType::NoteOff);
    timeline[1].timestamp_seconds
}

#[test]
fn test_smpte_header_24fps() {
    let midi_data = create_midi_with_smpte_timing(SmpteFps::TwentyFour, 40, 96);
    let file = MidiFile::parse(&midi_data).unwrap();

    match file.timing() {
        Timing::Smpte(smpte) => {
            assert_eq!(smpte.fps(), SmpteFps::TwentyFour);
            assert_eq!(smpte.ticks_per_frame(), 40);
        }
        _ => panic!("Expected SMPTE timing"),
    }
    assert_eq!(file.timing().ticks_per_quarter_note(), None);
}

#[test]
fn test_smpte_24fps_ignores_tempo() {
    // 960 ticks per second
    let midi_data = create_midi_with_smpte_timing(SmpteFps::TwentyFour, 40, 96);
    assert_eq!(note_off_seconds(&midi_data), 0.1);
}

#[test]
fn test_smpte_25fps_pal() {
    // 100 ticks per second
    let midi_data = create_midi_with_smpte_timing(SmpteFps::TwentyFive, 4, 50);
    assert_eq!(note_off_seconds(&midi_data), 0.5);
}

#[test]
fn test_smpte_29_97_drop_frame() {
    let midi_data = create_midi_with_smpte_timing(SmpteFps::TwentyNine, 10, 100);
    let file = MidiFile::parse(&midi_data).unwrap();
    let smpte = file.timing().smpte().unwrap();
    assert_eq!(smpte.fps().as_division(), 29);
    assert!((smpte.frames_per_second() - 29.97).abs() < 1e-9);

    let expected = 100. / (10. * 29.97);
    assert!((note_off_seconds(&midi_data) - expected).abs() < 1e-9);
}

#[test]
fn test_smpte_30fps() {
    // 30 ticks per second
    let midi_data = create_midi_with_smpte_timing(SmpteFps::Thirty, 1, 15);
    assert_eq!(note_off_seconds(&midi_data), 0.5);
}

#[test]
fn test_smpte_tempo_event_is_kept() {
    let midi_data = create_midi_with_smpte_timing(SmpteFps::TwentyFive, 40, 96);
    let merged = MidiFile::parse(&midi_data).unwrap().into_timeline();
    assert_eq!(merged.len(), 4);
    assert_eq!(
        merged[0].message(),
        &TrackMessage::TempoChange(Tempo::new(1_000_000))
    );
}

#[test]
fn test_invalid_smpte_frame_rate() {
    let mut midi_data = create_midi_with_smpte_timing(SmpteFps::TwentyFour, 40, 96);
    midi_data[12] = 0xE6; // -26
    let err = MidiFile::parse(&midi_data).unwrap_err();
    assert_eq!(
        err.error_kind(),
        &ReaderErrorKind::ParseError(ParseError::Timing(TimingError::SmpteFrameRate(-26)))
    );
}

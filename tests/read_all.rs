use midi_degrees::prelude::*;
use pretty_assertions::assert_eq;

const GREENSLEEVES: &[u8] = include_bytes!("./test-asset/greensleeves.mid");

fn approx(actual: f64, expected: f64) {
    assert!(
        (actual - expected).abs() < 1e-9,
        "expected {expected}s, got {actual}s"
    );
}

#[test]
fn read_greensleeves_header() {
    let file = MidiFile::parse(GREENSLEEVES).unwrap();
    let header = file.header();
    assert_eq!(header.format(), FormatType::Simultaneous);
    assert_eq!(header.track_count(), 3);
    assert_eq!(header.timing(), &Timing::new_ticks_per_quarter_note(384));

    let lengths: Vec<_> = file.tracks().iter().map(Track::len).collect();
    assert_eq!(lengths, vec![6, 251, 233]);
    for track in file.tracks() {
        assert!(track.events().last().unwrap().is_end_of_track());
    }
}

#[test]
fn read_greensleeves_control_track() {
    let file = MidiFile::parse(GREENSLEEVES).unwrap();
    let control = &file.tracks()[0];

    assert_eq!(
        control.events()[0].kind(),
        EventKind::Meta {
            meta_type: MetaType::TrackName
        }
    );
    assert_eq!(control.events()[0].parameters(), b"control track");
    assert_eq!(
        control.events()[4].message(),
        &TrackMessage::TempoChange(Tempo::new(1_000_000))
    );
}

#[test]
fn read_greensleeves_key_signatures() {
    let file = MidiFile::parse(GREENSLEEVES).unwrap();
    for track in &file.tracks()[1..] {
        let TrackMessage::KeySignature(signature) = track.events()[5].message() else {
            panic!("expected a key signature, got {:?}", track.events()[5]);
        };
        assert_eq!(signature.key(), Key::new(Tonic::G, Mode::Ionian));
    }
}

#[test]
fn merge_greensleeves() {
    let merged = MidiFile::parse(GREENSLEEVES).unwrap().into_timeline();
    assert_eq!(merged.len(), 490);

    // the control track owns every event at zero until its end of track
    let first_tracks: Vec<_> = merged[..7].iter().map(MergedEvent::track_index).collect();
    assert_eq!(first_tracks, vec![0, 0, 0, 0, 0, 0, 1]);

    assert!(
        merged
            .windows(2)
            .all(|pair| pair[0].timestamp_seconds() <= pair[1].timestamp_seconds())
    );
    approx(merged.last().unwrap().timestamp_seconds(), 48.);

    let note_ons = merged
        .iter()
        .filter(|e| matches!(e.message(), TrackMessage::NoteOn { .. }))
        .count();
    let note_offs = merged
        .iter()
        .filter(|e| matches!(e.message(), TrackMessage::NoteOff { .. }))
        .count();
    assert_eq!((note_ons, note_offs), (235, 235));

    // one beat per second at 384 ticks per beat
    let first_off = merged
        .iter()
        .find(|e| e.track_index() == 1 && matches!(e.message(), TrackMessage::NoteOff { .. }))
        .unwrap();
    approx(first_off.timestamp_seconds(), 0.5);
}

#[test]
fn project_greensleeves() {
    let timeline = decode_timeline(GREENSLEEVES, &SessionConfig::default()).unwrap();

    // 470 notes, 30 of them chromatic in G, plus one key signature per voice
    assert_eq!(timeline.len(), 502);
    let key_changes: Vec<_> = timeline.iter().filter_map(TimelineEvent::key).collect();
    assert_eq!(key_changes, vec![Key::new(Tonic::G, Mode::Ionian); 2]);
    assert_eq!(timeline[0].event_type(), EventType::KeySignature);

    let first_note = timeline[1];
    assert_eq!(first_note.event_type(), EventType::NoteOn);
    assert_eq!(first_note.source_track, 1);
    assert_eq!(first_note.note(), Some(Note::new(64)));
    assert_eq!(first_note.degree(), Some(-2));
    assert_eq!(first_note.accidental(), Some(0));

    assert!(
        timeline
            .iter()
            .filter_map(TimelineEvent::accidental)
            .all(|accidental| (-1..=1).contains(&accidental))
    );
}

#[test]
fn project_greensleeves_with_other_events() {
    let config = SessionConfig::default().with_other_events(true);
    let timeline = decode_timeline(GREENSLEEVES, &config).unwrap();
    // every event but the tempo change now has a target
    let others = timeline
        .iter()
        .filter(|e| e.event_type() == EventType::Other)
        .count();
    assert_eq!(others, 490 - 470 - 2 - 1);
    assert_eq!(timeline.len(), 502 + others);
}

#![doc = r#"
Merges the tracks of a file into one stream ordered by time.

Every track keeps exactly one pending candidate in a priority queue. The
earliest candidate is emitted and replaced by the next event of its track,
timed from the emitted event. Candidates with equal timestamps leave in
track order, so a tempo change or key signature is always seen before
notes of higher tracks sounding at the same instant.

A tempo change takes effect at the instant it is emitted. Candidates still
pending past that instant are re-timed: the part of their delta already
elapsed keeps the old rate and the rest is converted at the new one.
"#]

mod tempo_map;
pub use tempo_map::*;

use crate::{
    file::{Timing, Track, TrackEvent},
    message::TrackMessage,
};
use std::{cmp::Ordering, collections::BinaryHeap};

/// A track event placed on the global timeline.
#[derive(Debug, Clone, PartialEq)]
pub struct MergedEvent {
    timestamp_seconds: f64,
    track_index: usize,
    event: TrackEvent,
}

impl MergedEvent {
    /// Create a merged event
    pub fn new(timestamp_seconds: f64, track_index: usize, event: TrackEvent) -> Self {
        Self {
            timestamp_seconds,
            track_index,
            event,
        }
    }

    /// Seconds since the start of the file
    pub fn timestamp_seconds(&self) -> f64 {
        self.timestamp_seconds
    }

    /// Index of the track chunk the event came from
    pub fn track_index(&self) -> usize {
        self.track_index
    }

    /// The decoded event
    pub fn event(&self) -> &TrackEvent {
        &self.event
    }

    /// Shorthand for `self.event().message()`
    pub fn message(&self) -> &TrackMessage {
        self.event.message()
    }

    /// Takes the decoded event out of the merged event.
    pub fn into_event(self) -> TrackEvent {
        self.event
    }
}

struct Candidate {
    timestamp: f64,
    track_index: usize,
    /// Time from which `remaining_ticks` are still to elapse
    anchor_seconds: f64,
    remaining_ticks: f64,
    event: TrackEvent,
}

impl Candidate {
    fn new(track_index: usize, after_seconds: f64, event: TrackEvent, tempo: &TempoMap) -> Self {
        Self {
            timestamp: after_seconds + tempo.ticks_to_seconds(event.delta_ticks()),
            track_index,
            anchor_seconds: after_seconds,
            remaining_ticks: f64::from(event.delta_ticks()),
            event,
        }
    }

    fn retime(&mut self, at_seconds: f64, old_ticks_per_second: f64, new_ticks_per_second: f64) {
        let elapsed = (at_seconds - self.anchor_seconds) * old_ticks_per_second;
        self.remaining_ticks = (self.remaining_ticks - elapsed).max(0.);
        self.anchor_seconds = at_seconds;
        self.timestamp = at_seconds + self.remaining_ticks / new_ticks_per_second;
    }
}

// BinaryHeap is a max-heap: the earliest timestamp, then the lowest track,
// must compare greatest.
impl Ord for Candidate {
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .timestamp
            .total_cmp(&self.timestamp)
            .then_with(|| other.track_index.cmp(&self.track_index))
    }
}

impl PartialOrd for Candidate {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for Candidate {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Candidate {}

#[doc = r#"
Interleaves `tracks` into a single list ordered by timestamp, then track
index. Every event of every track appears exactly once.

# Example
```rust
# use midi_degrees::prelude::*;
let tracks = vec![
    Track::new(vec![TrackEvent::tempo(96, 1_000_000)]),
    Track::new(vec![TrackEvent::end_of_track(192)]),
];
let merged = merge_tracks(tracks, &Timing::new_ticks_per_quarter_note(96));
assert_eq!(merged[0].timestamp_seconds(), 0.5);
// half a beat at 120 bpm, then one beat at 60 bpm
assert_eq!(merged[1].timestamp_seconds(), 1.5);
```
"#]
pub fn merge_tracks(tracks: Vec<Track>, timing: &Timing) -> Vec<MergedEvent> {
    let mut tempo = TempoMap::new(timing);
    let mut merged = Vec::with_capacity(tracks.iter().map(Track::len).sum());
    let mut sources: Vec<_> = tracks.into_iter().map(Track::into_iter).collect();

    let mut queue = BinaryHeap::with_capacity(sources.len());
    for (track_index, source) in sources.iter_mut().enumerate() {
        if let Some(event) = source.next() {
            queue.push(Candidate::new(track_index, 0., event, &tempo));
        }
    }

    while let Some(Candidate {
        timestamp,
        track_index,
        event,
        ..
    }) = queue.pop()
    {
        if let TrackMessage::TempoChange(new_tempo) = event.message() {
            let old_rate = tempo.ticks_per_second();
            if tempo.set_tempo(*new_tempo) {
                tracing::debug!(
                    timestamp,
                    track_index,
                    micros_per_quarter_note = new_tempo.micros_per_quarter_note(),
                    "tempo change"
                );
                queue = retime(queue, timestamp, old_rate, tempo.ticks_per_second());
            }
        }

        if let Some(next) = sources[track_index].next() {
            queue.push(Candidate::new(track_index, timestamp, next, &tempo));
        }
        merged.push(MergedEvent::new(timestamp, track_index, event));
    }

    merged
}

fn retime(
    queue: BinaryHeap<Candidate>,
    at_seconds: f64,
    old_rate: f64,
    new_rate: f64,
) -> BinaryHeap<Candidate> {
    let mut pending = queue.into_vec();
    for candidate in pending.iter_mut().filter(|c| c.timestamp > at_seconds) {
        candidate.retime(at_seconds, old_rate, new_rate);
    }
    BinaryHeap::from(pending)
}

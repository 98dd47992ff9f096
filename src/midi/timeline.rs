use super::{KeySignature, MetaMessage, MidiFile, Tempo, TimeSignature, Timing, TrackMessage};

/// One event of an [`EventTimeline`]
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TimelineEvent {
    /// Ticks since the start of the sequence
    pub ticks: u64,
    /// Index of the track the event came from
    pub track: usize,
    /// The message
    pub message: TrackMessage,
}

#[doc = r#"
Every event of a MIDI file, merged across tracks and ordered by tick.

Events that share a tick keep the order of their tracks, and within a track, the
order of the file. Times stay in ticks; they are never converted to seconds.
"#]
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EventTimeline {
    timing: Timing,
    events: Vec<TimelineEvent>,
}

impl EventTimeline {
    pub(super) fn new(file: MidiFile) -> Self {
        let size = file.tracks.iter().fold(0, |acc, t| acc + t.events().len());
        let mut events = Vec::with_capacity(size);
        for (track, t) in file.tracks.into_iter().enumerate() {
            events.extend(t.into_events().into_iter().map(|e| TimelineEvent {
                ticks: e.accumulated_ticks(),
                track,
                message: e.into_event(),
            }));
        }
        // stable, so equal ticks stay in track order
        events.sort_by_key(|e| e.ticks);
        Self {
            timing: file.timing,
            events,
        }
    }

    /// The header division the tick values are expressed in
    pub fn timing(&self) -> Timing {
        self.timing
    }

    /// All events
    pub fn events(&self) -> &[TimelineEvent] {
        &self.events
    }

    /// Number of events
    pub fn len(&self) -> usize {
        self.events.len()
    }

    /// True if no track contained an event
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    fn meta_events(&self) -> impl Iterator<Item = (u64, &MetaMessage)> + '_ {
        self.events.iter().filter_map(|e| match &e.message {
            TrackMessage::Meta(meta) => Some((e.ticks, meta)),
            _ => None,
        })
    }

    /// Tempo changes in time order
    pub fn tempo_events(&self) -> impl Iterator<Item = (u64, Tempo)> + '_ {
        self.meta_events().filter_map(|(t, m)| match m {
            MetaMessage::Tempo(tempo) => Some((t, *tempo)),
            _ => None,
        })
    }

    /// Time signature changes in time order
    pub fn time_signature_events(&self) -> impl Iterator<Item = (u64, TimeSignature)> + '_ {
        self.meta_events().filter_map(|(t, m)| match m {
            MetaMessage::TimeSignature(sig) => Some((t, *sig)),
            _ => None,
        })
    }

    /// Key signature changes in time order
    pub fn key_signature_events(&self) -> impl Iterator<Item = (u64, KeySignature)> + '_ {
        self.meta_events().filter_map(|(t, m)| match m {
            MetaMessage::KeySignature(sig) => Some((t, *sig)),
            _ => None,
        })
    }
}

#[cfg(test)]
fn tempo_event(ticks: u64, micros_per_quarter: u32) -> super::Ticked<TrackMessage> {
    super::Ticked::new(
        ticks,
        TrackMessage::Meta(MetaMessage::Tempo(Tempo::new(micros_per_quarter))),
    )
}

#[test]
fn test_empty_file_has_empty_timeline() {
    let file = MidiFile {
        format: super::FormatType::Simultaneous,
        timing: Timing::TicksPerQuarterNote(480),
        tracks: vec![],
    };
    let timeline = file.into_timeline();
    assert!(timeline.is_empty());
    assert_eq!(timeline.tempo_events().count(), 0);
}

#[test]
fn test_tracks_are_merged_by_tick() {
    use super::Track;

    let track1 = Track::new(vec![tempo_event(0, 500_000), tempo_event(960, 400_000)]);
    let track2 = Track::new(vec![
        super::Ticked::new(
            480,
            TrackMessage::Meta(MetaMessage::TimeSignature(TimeSignature::new(3, 2, 24, 8))),
        ),
        tempo_event(960, 300_000),
    ]);
    let file = MidiFile {
        format: super::FormatType::Simultaneous,
        timing: Timing::TicksPerQuarterNote(480),
        tracks: vec![track1, track2],
    };

    let timeline = file.into_timeline();
    let ticks: Vec<_> = timeline.events().iter().map(|e| (e.ticks, e.track)).collect();
    assert_eq!(ticks, vec![(0, 0), (480, 1), (960, 0), (960, 1)]);

    let tempos: Vec<_> = timeline
        .tempo_events()
        .map(|(t, tempo)| (t, tempo.micros_per_quarter_note()))
        .collect();
    assert_eq!(tempos, vec![(0, 500_000), (960, 400_000), (960, 300_000)]);
    assert_eq!(timeline.time_signature_events().count(), 1);
    assert_eq!(timeline.key_signature_events().count(), 0);
}

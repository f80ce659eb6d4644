#![forbid(unsafe_code)]

//! Mock-data collaborator.
//!
//! The dialog never produces transcript text or insights itself. It asks a
//! [`MockData`] implementation for the seed transcript, the insight payload,
//! and one synthetic entry per feed tick. [`CannedData`] is the stock
//! implementation: two speakers, canned text, seeded randomness so tests and
//! demos are reproducible.

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use web_time::Duration;

use crate::insight::{InsightData, Participant, Sentiment, TimelineEvent};
use crate::transcript::EntryDraft;

/// Source of transcript and insight payloads.
pub trait MockData {
    /// Entries present when the dialog opens.
    fn initial_transcript(&self) -> Vec<EntryDraft>;

    /// Insight payload for the panels.
    fn insights(&self) -> &InsightData;

    /// One simulated entry, `elapsed` into the active call.
    fn next_entry(&mut self, elapsed: Duration) -> EntryDraft;
}

/// Format seconds-of-day as `HH:MM:SS`.
#[must_use]
pub fn clock_label(seconds_of_day: u64) -> String {
    let s = seconds_of_day % 86_400;
    format!("{:02}:{:02}:{:02}", s / 3600, (s / 60) % 60, s % 60)
}

/// Format a duration as `MM:SS` (minutes keep counting past 59).
#[must_use]
pub fn duration_label(d: Duration) -> String {
    let secs = d.as_secs();
    format!("{:02}:{:02}", secs / 60, secs % 60)
}

const CLOCK_BASE: u64 = 10 * 3600 + 31 * 60;

/// Canned two-speaker quarterly review.
#[derive(Debug, Clone)]
pub struct CannedData {
    rng: SmallRng,
    speakers: [&'static str; 2],
    insights: InsightData,
}

impl CannedData {
    /// Create with a seed for speaker and confidence choices.
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            rng: SmallRng::seed_from_u64(seed),
            speakers: ["John Doe", "Sarah Smith"],
            insights: InsightData {
                sentiment: Sentiment::Positive,
                keywords: ["revenue", "quarterly", "results", "growth", "performance"]
                    .map(String::from)
                    .to_vec(),
                topics: ["Financial Performance", "Quarterly Review", "Revenue Growth"]
                    .map(String::from)
                    .to_vec(),
                action_items: [
                    "Follow up on Q4 projections",
                    "Schedule team meeting for next week",
                    "Prepare detailed revenue breakdown",
                ]
                .map(String::from)
                .to_vec(),
                summary: "Positive quarterly review discussing 23% revenue growth and planning next steps."
                    .into(),
                participants: vec![
                    Participant {
                        name: "John Doe".into(),
                        speaking_share: 0.6,
                    },
                    Participant {
                        name: "Sarah Smith".into(),
                        speaking_share: 0.4,
                    },
                ],
                timeline: vec![
                    TimelineEvent {
                        at: "10:30:15".into(),
                        label: "Call opened".into(),
                    },
                    TimelineEvent {
                        at: "10:30:45".into(),
                        label: "Revenue results shared".into(),
                    },
                ],
            },
        }
    }
}

impl MockData for CannedData {
    fn initial_transcript(&self) -> Vec<EntryDraft> {
        vec![
            EntryDraft {
                speaker: "John Doe".into(),
                text: "Hello everyone, thanks for joining today's call. Let's start by reviewing the quarterly results.".into(),
                timestamp: "10:30:15".into(),
                confidence: 0.95,
            },
            EntryDraft {
                speaker: "Sarah Smith".into(),
                text: "Great! I have the numbers ready. Our revenue increased by 23% this quarter.".into(),
                timestamp: "10:30:45".into(),
                confidence: 0.92,
            },
        ]
    }

    fn insights(&self) -> &InsightData {
        &self.insights
    }

    fn next_entry(&mut self, elapsed: Duration) -> EntryDraft {
        let speaker = if self.rng.random_bool(0.5) {
            self.speakers[0]
        } else {
            self.speakers[1]
        };
        let confidence = 0.85 + self.rng.random::<f32>() * 0.15;
        EntryDraft {
            speaker: speaker.into(),
            text: "This is a simulated live transcription entry...".into(),
            timestamp: clock_label(CLOCK_BASE + elapsed.as_secs()),
            confidence,
        }
    }
}

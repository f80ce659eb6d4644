#![forbid(unsafe_code)]

//! Insight panel kinds and the opaque insight payload.
//!
//! The payload is produced by the mock-data collaborator and only read by
//! panel renderers; nothing in the core interprets it beyond the few derived
//! numbers the panels show (sentiment gauge, speaking shares).

use std::fmt;
use std::str::FromStr;

#[cfg(feature = "config-file")]
use serde::{Deserialize, Serialize};

/// The closed set of insight panel kinds. Each kind appears at most once.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "config-file", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "config-file", serde(rename_all = "snake_case"))]
pub enum PanelKind {
    Sentiment,
    Analytics,
    Keywords,
    Actions,
    Summary,
    Participants,
    Timeline,
}

impl PanelKind {
    /// Every kind, in menu order.
    pub const ALL: [PanelKind; 7] = [
        PanelKind::Sentiment,
        PanelKind::Analytics,
        PanelKind::Keywords,
        PanelKind::Actions,
        PanelKind::Summary,
        PanelKind::Participants,
        PanelKind::Timeline,
    ];

    /// Stable lowercase name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Sentiment => "sentiment",
            Self::Analytics => "analytics",
            Self::Keywords => "keywords",
            Self::Actions => "actions",
            Self::Summary => "summary",
            Self::Participants => "participants",
            Self::Timeline => "timeline",
        }
    }

    /// Panel header text.
    #[must_use]
    pub const fn title(self) -> &'static str {
        match self {
            Self::Sentiment => "Sentiment",
            Self::Analytics => "Analytics",
            Self::Keywords => "Keywords",
            Self::Actions => "Action Items",
            Self::Summary => "AI Summary",
            Self::Participants => "Speaking Time",
            Self::Timeline => "Timeline",
        }
    }
}

impl fmt::Display for PanelKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returned when parsing an unknown panel kind name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownPanelKind(pub String);

impl fmt::Display for UnknownPanelKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown panel kind: {}", self.0)
    }
}

impl std::error::Error for UnknownPanelKind {}

impl FromStr for PanelKind {
    type Err = UnknownPanelKind;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        PanelKind::ALL
            .into_iter()
            .find(|k| k.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| UnknownPanelKind(s.to_string()))
    }
}

/// Overall call sentiment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sentiment {
    Positive,
    Neutral,
    Negative,
}

impl Sentiment {
    /// Capitalized label for the sentiment badge.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Positive => "Positive",
            Self::Neutral => "Neutral",
            Self::Negative => "Negative",
        }
    }

    /// Fill fraction of the sentiment gauge.
    #[must_use]
    pub const fn gauge_fraction(self) -> f32 {
        match self {
            Self::Positive => 0.75,
            Self::Neutral | Self::Negative => 0.45,
        }
    }
}

/// One participant's share of speaking time.
#[derive(Debug, Clone, PartialEq)]
pub struct Participant {
    pub name: String,
    /// Fraction in [0, 1].
    pub speaking_share: f32,
}

impl Participant {
    /// Share as a whole percentage.
    #[must_use]
    pub fn percent(&self) -> u8 {
        (self.speaking_share.clamp(0.0, 1.0) * 100.0).round() as u8
    }
}

/// A notable moment in the call.
#[derive(Debug, Clone, PartialEq)]
pub struct TimelineEvent {
    /// Display timestamp, as supplied.
    pub at: String,
    pub label: String,
}

/// Insight payload consumed read-only by panel renderers.
#[derive(Debug, Clone, PartialEq)]
pub struct InsightData {
    pub sentiment: Sentiment,
    pub keywords: Vec<String>,
    pub topics: Vec<String>,
    pub action_items: Vec<String>,
    pub summary: String,
    pub participants: Vec<Participant>,
    pub timeline: Vec<TimelineEvent>,
}

impl InsightData {
    /// Participant count shown in the quick stats.
    #[must_use]
    pub fn participant_count(&self) -> usize {
        self.participants.len()
    }
}

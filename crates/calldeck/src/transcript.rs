#![forbid(unsafe_code)]

//! Append-only transcript.

/// Unique id of a transcript entry within one dialog session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct EntryId(u64);

impl EntryId {
    #[must_use]
    pub const fn get(self) -> u64 {
        self.0
    }
}

/// Entry contents as supplied by the mock-data collaborator.
#[derive(Debug, Clone, PartialEq)]
pub struct EntryDraft {
    pub speaker: String,
    pub text: String,
    pub timestamp: String,
    pub confidence: f32,
}

/// One transcribed utterance. Never mutated after insertion.
#[derive(Debug, Clone, PartialEq)]
pub struct TranscriptionEntry {
    id: EntryId,
    speaker: String,
    text: String,
    timestamp: String,
    confidence: f32,
}

impl TranscriptionEntry {
    #[must_use]
    pub fn id(&self) -> EntryId {
        self.id
    }

    #[must_use]
    pub fn speaker(&self) -> &str {
        &self.speaker
    }

    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    #[must_use]
    pub fn timestamp(&self) -> &str {
        &self.timestamp
    }

    /// Recognition confidence in [0, 1].
    #[must_use]
    pub fn confidence(&self) -> f32 {
        self.confidence
    }

    /// Confidence as a whole percentage for the entry badge.
    #[must_use]
    pub fn confidence_percent(&self) -> u8 {
        (self.confidence * 100.0).round() as u8
    }
}

/// Ordered, append-only sequence of entries.
#[derive(Debug, Clone)]
pub struct Transcript {
    entries: Vec<TranscriptionEntry>,
    next_id: u64,
}

impl Default for Transcript {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
            next_id: 1,
        }
    }
}

impl Transcript {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a transcript from initial drafts.
    #[must_use]
    pub fn with_entries(drafts: impl IntoIterator<Item = EntryDraft>) -> Self {
        let mut t = Self::new();
        for draft in drafts {
            t.append(draft);
        }
        t
    }

    /// Append an entry, assigning it a fresh id.
    ///
    /// Confidence is clamped into [0, 1]; a NaN confidence becomes 0.
    pub fn append(&mut self, draft: EntryDraft) -> EntryId {
        let id = EntryId(self.next_id);
        self.next_id += 1;
        let confidence = if draft.confidence.is_nan() {
            0.0
        } else {
            draft.confidence.clamp(0.0, 1.0)
        };
        self.entries.push(TranscriptionEntry {
            id,
            speaker: draft.speaker,
            text: draft.text,
            timestamp: draft.timestamp,
            confidence,
        });
        id
    }

    #[must_use]
    pub fn entries(&self) -> &[TranscriptionEntry] {
        &self.entries
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    #[must_use]
    pub fn last(&self) -> Option<&TranscriptionEntry> {
        self.entries.last()
    }
}

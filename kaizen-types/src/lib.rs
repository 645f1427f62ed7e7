//! Core data types for the Kaizen journaling core.
//!
//! Every persisted record is plain JSON. Field names stay camelCase on the
//! wire so that backups written by earlier builds of the app import cleanly.

use chrono::{DateTime, Local, NaiveDate};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Storage/key format for calendar dates: `yyyy-mm-dd`.
pub const DATE_KEY_FORMAT: &str = "%Y-%m-%d";

/// Render a date as a `yyyy-mm-dd` storage key.
pub fn date_key(date: NaiveDate) -> String {
    date.format(DATE_KEY_FORMAT).to_string()
}

/// Parse a `yyyy-mm-dd` storage key back into a date.
pub fn parse_date_key(key: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(key, DATE_KEY_FORMAT).ok()
}

/// Mood/category label attached to every note.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum NoteTag {
    Motivation,
    Insight,
    Overthinking,
    Planning,
    EmotionalRelease,
}

impl NoteTag {
    /// All tags, in the order they are offered to the user.
    pub const ALL: [NoteTag; 5] = [
        NoteTag::Motivation,
        NoteTag::Insight,
        NoteTag::Overthinking,
        NoteTag::Planning,
        NoteTag::EmotionalRelease,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Motivation => "Motivation",
            Self::Insight => "Insight",
            Self::Overthinking => "Overthinking",
            Self::Planning => "Planning",
            Self::EmotionalRelease => "Emotional Release",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "Motivation" => Some(Self::Motivation),
            "Insight" => Some(Self::Insight),
            "Overthinking" => Some(Self::Overthinking),
            "Emotional Release" | "EmotionalRelease" => Some(Self::EmotionalRelease),
            "Planning" => Some(Self::Planning),
            _ => None,
        }
    }
}

impl std::fmt::Display for NoteTag {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A reflective journal note. Created once, deleted by id, never edited.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Note {
    /// Unique id derived from the creation timestamp (millis since epoch).
    pub id: String,
    /// `yyyy-mm-dd` creation date, used for all grouping and score checks.
    pub raw_date: String,
    /// Human-readable creation stamp for display.
    pub date: String,
    pub text: String,
    pub tag: NoteTag,
}

impl Note {
    /// Build a note stamped with the given creation instant.
    pub fn new(text: impl Into<String>, tag: NoteTag, created: DateTime<Local>) -> Self {
        Self {
            id: created.timestamp_millis().to_string(),
            raw_date: date_key(created.date_naive()),
            date: created.format("%a %d %b, %H:%M").to_string(),
            text: text.into(),
            tag,
        }
    }
}

/// The active 21-day target protocol. At most one instance exists.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProtocolSetup {
    pub priority: String,
    pub why: String,
    pub actions: Vec<String>,
    #[serde(default)]
    pub avoid: Vec<String>,
}

/// A vault entry. Shaped like a note but untagged, and `text` holds the
/// reversibly-encoded form of the plaintext, never the plaintext itself.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VaultNote {
    pub id: String,
    pub raw_date: String,
    pub date: String,
    pub text: String,
}

/// Daily check-in state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProgressState {
    pub streak: u32,
    /// `yyyy-mm-dd` of the most recent accepted check-in.
    pub last_check_in: String,
}

/// Score history: `yyyy-mm-dd` → score (0–100). BTreeMap keeps export
/// output date-ordered and deterministic.
pub type ScoreHistory = BTreeMap<String, u32>;

/// The unit of export/import. Any field may be absent in an imported file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Backup {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<Vec<Note>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub protocol: Option<ProtocolSetup>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub score_log: Option<ScoreHistory>,
}

/// Derived daily focus card. Cached once per calendar day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DailyTarget {
    pub title: String,
    /// `yyyy-mm-dd` the card was generated for; a stale value forces
    /// regeneration.
    pub generated_for: String,
    pub description: String,
    pub focus_area: String,
    pub motivation: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subtitle: Option<String>,
}

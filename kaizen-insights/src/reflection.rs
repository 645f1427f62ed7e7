//! Reflection summary over the trailing 14 days of notes.
//!
//! Tag and word frequency plus a crude tone classification. The tone is a
//! vocabulary-ratio heuristic, not sentiment analysis; the thresholds and
//! word lists mirror long-standing app behavior and are part of the
//! contract.

use chrono::NaiveDate;
use kaizen_types::{parse_date_key, Note, NoteTag};

/// Words excluded from the frequency count.
const STOPWORDS: [&str; 27] = [
    "i", "the", "and", "a", "to", "in", "on", "of", "my", "is", "that", "was", "it", "for",
    "this", "at", "with", "but", "me", "so", "just", "now", "been", "am", "are", "not", "very",
];

/// Vocabulary that signals a low-energy stretch.
const LOW_ENERGY_WORDS: [&str; 5] = ["tired", "low", "guilty", "stuck", "sad"];

/// Vocabulary that signals momentum.
const HIGH_ENERGY_WORDS: [&str; 5] = ["progress", "built", "launched", "completed", "happy"];

/// Ratio of marker-vocabulary words that flips the tone.
const TONE_THRESHOLD: f64 = 0.10;

/// How many days of notes feed the summary.
const WINDOW_DAYS: i64 = 14;

/// How many top words to surface.
const TOP_WORDS: usize = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tone {
    LowEnergy,
    Driven,
    Balanced,
}

impl Tone {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::LowEnergy => "low-energy",
            Self::Driven => "driven",
            Self::Balanced => "balanced",
        }
    }

    /// The fixed suggestion paired with each tone.
    pub fn suggestion(&self) -> &'static str {
        match self {
            Self::LowEnergy => "Prioritize rest & self-care this week.",
            Self::Driven => "Ride the momentum — keep shipping!",
            Self::Balanced => "Balance creation and reflection over the next week.",
        }
    }
}

/// Frequencies plus tone for the last 14 days of notes.
#[derive(Debug, Clone, PartialEq)]
pub struct ReflectionSummary {
    /// Notes inside the window.
    pub total: usize,
    /// Count per tag, in the fixed tag order, zero-count tags omitted.
    pub tag_frequency: Vec<(NoteTag, usize)>,
    /// Top words by count; ties keep first-encountered order.
    pub top_words: Vec<String>,
    pub tone: Tone,
}

/// Summarize the notes written in the 14 days up to `today`.
pub fn summarize(notes: &[Note], today: NaiveDate) -> ReflectionSummary {
    let recent: Vec<&Note> = notes
        .iter()
        .filter(|n| {
            parse_date_key(&n.raw_date)
                .map_or(false, |d| (today - d).num_days() <= WINDOW_DAYS)
        })
        .collect();

    let tag_frequency = NoteTag::ALL
        .iter()
        .map(|&tag| (tag, recent.iter().filter(|n| n.tag == tag).count()))
        .filter(|&(_, count)| count > 0)
        .collect();

    // Lower-cased whitespace tokens, dropping short tokens and stopwords.
    let words: Vec<String> = recent
        .iter()
        .flat_map(|n| n.text.to_lowercase().split_whitespace().map(str::to_owned).collect::<Vec<_>>())
        .filter(|w| w.len() > 2 && !STOPWORDS.contains(&w.as_str()))
        .collect();

    // Count in encounter order; a stable sort then preserves that order
    // among equal counts.
    let mut freq: Vec<(String, usize)> = Vec::new();
    for word in &words {
        match freq.iter_mut().find(|(w, _)| w == word) {
            Some((_, count)) => *count += 1,
            None => freq.push((word.clone(), 1)),
        }
    }
    freq.sort_by(|a, b| b.1.cmp(&a.1));
    let top_words = freq.into_iter().take(TOP_WORDS).map(|(w, _)| w).collect();

    let tone = classify_tone(&words);

    ReflectionSummary {
        total: recent.len(),
        tag_frequency,
        top_words,
        tone,
    }
}

fn classify_tone(words: &[String]) -> Tone {
    if words.is_empty() {
        return Tone::Balanced;
    }
    let total = words.len() as f64;
    let low = words
        .iter()
        .filter(|w| LOW_ENERGY_WORDS.contains(&w.as_str()))
        .count() as f64;
    if low / total > TONE_THRESHOLD {
        return Tone::LowEnergy;
    }
    let high = words
        .iter()
        .filter(|w| HIGH_ENERGY_WORDS.contains(&w.as_str()))
        .count() as f64;
    if high / total > TONE_THRESHOLD {
        return Tone::Driven;
    }
    Tone::Balanced
}

//! Grouping and filtering of the note collection.

use chrono::{Datelike, Days, NaiveDate};
use kaizen_types::{parse_date_key, Note, NoteTag};
use std::collections::BTreeMap;

/// Group notes by calendar month.
///
/// Key is the `yyyy-mm` prefix of `raw_date`. Notes keep their insertion
/// order within each bucket; buckets come back most recent month first.
pub fn group_by_month(notes: &[Note]) -> Vec<(String, Vec<&Note>)> {
    let mut grouped: BTreeMap<String, Vec<&Note>> = BTreeMap::new();
    for note in notes {
        let key = note.raw_date.chars().take(7).collect::<String>();
        grouped.entry(key).or_default().push(note);
    }
    grouped.into_iter().rev().collect()
}

/// "2024-03" → "March 2024". Unparseable keys come back unchanged.
pub fn month_title(key: &str) -> String {
    let Some(date) = parse_date_key(&format!("{key}-01")) else {
        return key.to_string();
    };
    const MONTHS: [&str; 12] = [
        "January", "February", "March", "April", "May", "June", "July", "August", "September",
        "October", "November", "December",
    ];
    format!("{} {}", MONTHS[date.month0() as usize], date.year())
}

/// Monday of the ISO week containing the date.
///
/// Sunday belongs to the *previous* Monday's bucket: a week runs Monday
/// through Sunday, so Sunday is the end of a week, never the start of one.
pub fn week_start(raw_date: &str) -> Option<NaiveDate> {
    let date = parse_date_key(raw_date)?;
    date.checked_sub_days(Days::new(u64::from(date.weekday().num_days_from_monday())))
}

/// Notes-per-week counts, ascending by week start for chronological charts.
/// Notes with unparseable dates are skipped.
pub fn weekly_counts(notes: &[Note]) -> Vec<(NaiveDate, usize)> {
    let mut counts: BTreeMap<NaiveDate, usize> = BTreeMap::new();
    for note in notes {
        if let Some(start) = week_start(&note.raw_date) {
            *counts.entry(start).or_default() += 1;
        }
    }
    counts.into_iter().collect()
}

/// Search/filter predicate over the archive view.
#[derive(Debug, Clone, Default)]
pub struct NoteFilter {
    /// Case-insensitive substring of the note text. Empty matches all.
    pub search: String,
    /// When set, the note's tag must match exactly.
    pub tag: Option<NoteTag>,
}

/// Apply the archive filter: text match AND tag match.
pub fn filter_notes<'a>(notes: &'a [Note], filter: &NoteFilter) -> Vec<&'a Note> {
    let needle = filter.search.to_lowercase();
    notes
        .iter()
        .filter(|n| n.text.to_lowercase().contains(&needle))
        .filter(|n| filter.tag.map_or(true, |t| n.tag == t))
        .collect()
}

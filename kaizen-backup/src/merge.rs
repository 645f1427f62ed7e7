//! Per-field merge rules for combining two backups.
//!
//! Notes and score log merge commutatively (id-union with newest-wins, and
//! date-union with max). Protocol is the exception: incoming wins whenever
//! present, so merge order matters and callers apply existing-then-incoming.

use kaizen_types::{Backup, Note, ProtocolSetup, ScoreHistory};
use std::collections::BTreeMap;

/// Union by id; when both sides carry an id, the note with the strictly
/// later `raw_date` wins. Dates compare at day granularity, so two
/// conflicting copies written on the same day tie and keep the existing
/// side. Every unique id appears exactly once; order beyond that is
/// unspecified.
pub fn merge_notes(existing: Vec<Note>, incoming: Vec<Note>) -> Vec<Note> {
    let mut by_id: BTreeMap<String, Note> = BTreeMap::new();
    for note in existing {
        by_id.insert(note.id.clone(), note);
    }
    for note in incoming {
        match by_id.get(&note.id) {
            // ISO date strings compare chronologically as strings
            Some(kept) if note.raw_date <= kept.raw_date => {}
            _ => {
                by_id.insert(note.id.clone(), note);
            }
        }
    }
    by_id.into_values().collect()
}

/// Incoming wins unconditionally when present.
pub fn merge_protocol(
    existing: Option<ProtocolSetup>,
    incoming: Option<ProtocolSetup>,
) -> Option<ProtocolSetup> {
    incoming.or(existing)
}

/// Union of dates; a date present on both sides keeps the higher score.
/// Merging never lowers a recorded score.
pub fn merge_score_log(existing: ScoreHistory, incoming: ScoreHistory) -> ScoreHistory {
    let mut result = existing;
    for (date, score) in incoming {
        result
            .entry(date)
            .and_modify(|kept| *kept = (*kept).max(score))
            .or_insert(score);
    }
    result
}

/// Merge a full backup, field by field. Absent fields are treated as
/// empty collections (and as "no protocol").
pub fn merge_backup(existing: Backup, incoming: Backup) -> Backup {
    Backup {
        notes: Some(merge_notes(
            existing.notes.unwrap_or_default(),
            incoming.notes.unwrap_or_default(),
        )),
        protocol: merge_protocol(existing.protocol, incoming.protocol),
        score_log: Some(merge_score_log(
            existing.score_log.unwrap_or_default(),
            incoming.score_log.unwrap_or_default(),
        )),
    }
}

use kaizen_backup::{merge_backup, merge_notes, merge_protocol, merge_score_log};
use kaizen_types::{Backup, Note, NoteTag, ProtocolSetup, ScoreHistory};
use pretty_assertions::assert_eq;

fn note(id: &str, raw_date: &str, text: &str) -> Note {
    Note {
        id: id.into(),
        raw_date: raw_date.into(),
        date: "display".into(),
        text: text.into(),
        tag: NoteTag::Insight,
    }
}

fn protocol(priority: &str) -> ProtocolSetup {
    ProtocolSetup {
        priority: priority.into(),
        why: "why".into(),
        actions: vec![],
        avoid: vec![],
    }
}

fn score_log(entries: &[(&str, u32)]) -> ScoreHistory {
    entries.iter().map(|&(d, s)| (d.to_string(), s)).collect()
}

// ── Notes ────────────────────────────────────────────────────────

#[test]
fn disjoint_ids_union() {
    let merged = merge_notes(
        vec![note("1", "2024-01-01", "a")],
        vec![note("2", "2024-01-02", "b")],
    );
    assert_eq!(merged.len(), 2);
}

#[test]
fn same_id_later_date_wins() {
    let merged = merge_notes(
        vec![note("1", "2024-01-01", "old")],
        vec![note("1", "2024-01-02", "new")],
    );
    assert_eq!(merged.len(), 1);
    assert_eq!(merged[0].text, "new");

    // And in the other direction the newer note still wins
    let merged = merge_notes(
        vec![note("1", "2024-01-02", "new")],
        vec![note("1", "2024-01-01", "old")],
    );
    assert_eq!(merged.len(), 1);
    assert_eq!(merged[0].text, "new");
}

#[test]
fn same_id_same_date_keeps_existing() {
    let merged = merge_notes(
        vec![note("1", "2024-01-01", "mine")],
        vec![note("1", "2024-01-01", "theirs")],
    );
    assert_eq!(merged.len(), 1);
    assert_eq!(merged[0].text, "mine");
}

// ── Protocol ─────────────────────────────────────────────────────

#[test]
fn incoming_protocol_wins_when_present() {
    let merged = merge_protocol(Some(protocol("old")), Some(protocol("new")));
    assert_eq!(merged.unwrap().priority, "new");
}

#[test]
fn absent_incoming_keeps_existing_protocol() {
    let merged = merge_protocol(Some(protocol("old")), None);
    assert_eq!(merged.unwrap().priority, "old");
}

// ── Score log ────────────────────────────────────────────────────

#[test]
fn score_conflict_takes_max_commutatively() {
    let a = score_log(&[("2024-01-01", 50)]);
    let b = score_log(&[("2024-01-01", 70)]);

    assert_eq!(
        merge_score_log(a.clone(), b.clone()),
        score_log(&[("2024-01-01", 70)])
    );
    assert_eq!(merge_score_log(b, a), score_log(&[("2024-01-01", 70)]));
}

#[test]
fn score_dates_union() {
    let merged = merge_score_log(
        score_log(&[("2024-01-01", 50)]),
        score_log(&[("2024-01-02", 30)]),
    );
    assert_eq!(merged, score_log(&[("2024-01-01", 50), ("2024-01-02", 30)]));
}

// ── Full backup ──────────────────────────────────────────────────

#[test]
fn full_backup_merges_field_by_field() {
    let existing = Backup {
        notes: Some(vec![note("1", "2024-01-01", "a")]),
        protocol: Some(protocol("old")),
        score_log: Some(score_log(&[("2024-01-01", 50)])),
    };
    let incoming = Backup {
        notes: Some(vec![note("2", "2024-01-02", "b")]),
        protocol: None,
        score_log: Some(score_log(&[("2024-01-01", 70)])),
    };

    let merged = merge_backup(existing, incoming);
    assert_eq!(merged.notes.as_ref().unwrap().len(), 2);
    assert_eq!(merged.protocol.unwrap().priority, "old");
    assert_eq!(merged.score_log.unwrap(), score_log(&[("2024-01-01", 70)]));
}

#[test]
fn merging_with_empty_backup_is_identity_for_notes_and_scores() {
    let existing = Backup {
        notes: Some(vec![note("1", "2024-01-01", "a")]),
        protocol: Some(protocol("keep")),
        score_log: Some(score_log(&[("2024-01-01", 50)])),
    };
    let merged = merge_backup(existing.clone(), Backup::default());
    assert_eq!(merged.notes, existing.notes);
    assert_eq!(merged.protocol, existing.protocol);
    assert_eq!(merged.score_log, existing.score_log);
}

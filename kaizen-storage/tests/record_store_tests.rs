use kaizen_storage::{DuckDbStore, MemoryStore, RecordKey, RecordStore, Repository};
use kaizen_types::{Note, NoteTag, ProgressState, ProtocolSetup};
use pretty_assertions::assert_eq;
use std::sync::Arc;

fn memory_repo() -> (Repository, Arc<MemoryStore>) {
    let store = Arc::new(MemoryStore::new());
    (Repository::new(store.clone()), store)
}

fn sample_note(id: &str, raw_date: &str, text: &str) -> Note {
    Note {
        id: id.into(),
        raw_date: raw_date.into(),
        date: "Tue 05 Mar, 09:14".into(),
        text: text.into(),
        tag: NoteTag::Insight,
    }
}

// ── Raw store behavior ───────────────────────────────────────────

#[test]
fn absent_key_is_none() {
    let store = MemoryStore::new();
    assert_eq!(store.get(RecordKey::Notes).unwrap(), None);
}

#[test]
fn put_get_remove() {
    let store = MemoryStore::new();
    store.put(RecordKey::Protocol, "{}").unwrap();
    assert_eq!(store.get(RecordKey::Protocol).unwrap().as_deref(), Some("{}"));
    store.remove(RecordKey::Protocol).unwrap();
    assert_eq!(store.get(RecordKey::Protocol).unwrap(), None);
}

#[test]
fn remove_absent_key_is_noop() {
    let store = MemoryStore::new();
    store.remove(RecordKey::ScoreHistory).unwrap();
}

#[test]
fn duckdb_store_round_trips() {
    let store = DuckDbStore::open_in_memory().unwrap();
    assert_eq!(store.get(RecordKey::Notes).unwrap(), None);

    store.put(RecordKey::Notes, r#"[{"a":1}]"#).unwrap();
    assert_eq!(
        store.get(RecordKey::Notes).unwrap().as_deref(),
        Some(r#"[{"a":1}]"#)
    );

    // Upsert overwrites
    store.put(RecordKey::Notes, "[]").unwrap();
    assert_eq!(store.get(RecordKey::Notes).unwrap().as_deref(), Some("[]"));

    store.remove(RecordKey::Notes).unwrap();
    assert_eq!(store.get(RecordKey::Notes).unwrap(), None);
}

#[test]
fn duckdb_store_persists_across_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("records.duckdb");

    {
        let store = DuckDbStore::open(&path).unwrap();
        store.put(RecordKey::Progress, r#"{"streak":3,"lastCheckIn":"2024-03-05"}"#).unwrap();
    }

    let store = DuckDbStore::open(&path).unwrap();
    assert_eq!(
        store.get(RecordKey::Progress).unwrap().as_deref(),
        Some(r#"{"streak":3,"lastCheckIn":"2024-03-05"}"#)
    );
}

// ── Repository: typed loads with malformed-JSON tolerance ────────

#[test]
fn notes_round_trip_most_recent_first() {
    let (repo, _) = memory_repo();
    repo.add_note(sample_note("1", "2024-03-05", "first")).unwrap();
    repo.add_note(sample_note("2", "2024-03-06", "second")).unwrap();

    let notes = repo.load_notes().unwrap();
    assert_eq!(notes.len(), 2);
    assert_eq!(notes[0].id, "2");
    assert_eq!(notes[1].id, "1");
}

#[test]
fn delete_note_by_id() {
    let (repo, _) = memory_repo();
    repo.add_note(sample_note("1", "2024-03-05", "keep")).unwrap();
    repo.add_note(sample_note("2", "2024-03-05", "drop")).unwrap();

    assert!(repo.delete_note("2").unwrap());
    assert!(!repo.delete_note("2").unwrap());
    assert_eq!(repo.load_notes().unwrap().len(), 1);
}

#[test]
fn malformed_notes_record_loads_as_empty() {
    let (repo, store) = memory_repo();
    store.put(RecordKey::Notes, "{definitely not json").unwrap();
    assert!(repo.load_notes().unwrap().is_empty());
}

#[test]
fn malformed_progress_record_loads_as_none() {
    let (repo, store) = memory_repo();
    store.put(RecordKey::Progress, "[1,2,3]").unwrap();
    assert_eq!(repo.load_progress().unwrap(), None);
}

#[test]
fn progress_round_trips() {
    let (repo, _) = memory_repo();
    let state = ProgressState {
        streak: 4,
        last_check_in: "2024-03-05".into(),
    };
    repo.save_progress(&state).unwrap();
    assert_eq!(repo.load_progress().unwrap(), Some(state));
}

#[test]
fn score_history_round_trips() {
    let (repo, _) = memory_repo();
    let mut history = kaizen_types::ScoreHistory::new();
    history.insert("2024-03-05".into(), 70);
    repo.save_score_history(&history).unwrap();
    assert_eq!(repo.load_score_history().unwrap(), history);
}

#[test]
fn reset_clears_every_record() {
    let (repo, store) = memory_repo();
    repo.add_note(sample_note("1", "2024-03-05", "x")).unwrap();
    repo.save_vault_pin("1234").unwrap();
    repo.save_progress(&ProgressState {
        streak: 1,
        last_check_in: "2024-03-05".into(),
    })
    .unwrap();

    repo.reset().unwrap();

    for key in RecordKey::ALL {
        assert_eq!(store.get(key).unwrap(), None, "{key} should be cleared");
    }
}

// ── Protocol normalization through the repository ────────────────

#[test]
fn legacy_array_protocol_normalizes() {
    let (repo, store) = memory_repo();
    store
        .put(
            RecordKey::Protocol,
            r#"["launch","momentum","define success","daily writing","no distractions"]"#,
        )
        .unwrap();

    let p = repo.load_protocol().unwrap().unwrap();
    assert_eq!(p.priority, "launch");
    assert_eq!(p.why, "momentum");
    assert_eq!(p.actions, vec!["define success", "daily writing", "no distractions"]);
    assert_eq!(p.avoid, Vec::<String>::new());
}

#[test]
fn malformed_protocol_is_none_not_error() {
    let (repo, store) = memory_repo();
    store.put(RecordKey::Protocol, "{oops").unwrap();
    assert_eq!(repo.load_protocol().unwrap(), None);
}

#[test]
fn saved_protocol_reads_back_canonical() {
    let (repo, _) = memory_repo();
    let p = ProtocolSetup {
        priority: "health".into(),
        why: "energy".into(),
        actions: vec!["run".into()],
        avoid: vec!["sugar".into()],
    };
    repo.save_protocol(&p).unwrap();
    assert_eq!(repo.load_protocol().unwrap(), Some(p));
}

use chrono::NaiveDate;
use kaizen_insights::{compute_score, verdict};
use kaizen_storage::{MemoryStore, Repository};
use kaizen_types::{Note, NoteTag, ProgressState, ProtocolSetup, VaultNote};
use pretty_assertions::assert_eq;
use std::sync::Arc;

fn repo() -> Repository {
    Repository::new(Arc::new(MemoryStore::new()))
}

fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 3, 5).unwrap()
}

fn protocol() -> ProtocolSetup {
    ProtocolSetup {
        priority: "ship".into(),
        why: "momentum".into(),
        actions: vec!["write daily".into()],
        avoid: vec![],
    }
}

fn note_on(raw_date: &str) -> Note {
    Note {
        id: "1".into(),
        raw_date: raw_date.into(),
        date: "Tue 05 Mar, 09:14".into(),
        text: "note".into(),
        tag: NoteTag::Insight,
    }
}

fn vault_entry_on(raw_date: &str) -> VaultNote {
    VaultNote {
        id: "2".into(),
        raw_date: raw_date.into(),
        date: "Tue 05 Mar, 09:20".into(),
        text: "c2VjcmV0".into(),
    }
}

fn checked_in_today(repo: &Repository) {
    repo.save_progress(&ProgressState {
        streak: 1,
        last_check_in: "2024-03-05".into(),
    })
    .unwrap();
}

// ── Scoring table ────────────────────────────────────────────────

#[test]
fn empty_storage_scores_zero() {
    let repo = repo();
    let score = compute_score(&repo, today()).unwrap();
    assert_eq!(score.total, 0);
    assert!(!score.protocol && !score.progress && !score.note && !score.vault && !score.bonus);
}

#[test]
fn protocol_progress_and_note_without_vault_is_seventy() {
    let repo = repo();
    repo.save_protocol(&protocol()).unwrap();
    checked_in_today(&repo);
    repo.save_notes(&[note_on("2024-03-05")]).unwrap();

    let score = compute_score(&repo, today()).unwrap();
    assert_eq!(score.total, 70);
    assert!(!score.bonus, "bonus needs progress + note + vault");
}

#[test]
fn all_four_conditions_score_exactly_one_hundred() {
    let repo = repo();
    repo.save_protocol(&protocol()).unwrap();
    checked_in_today(&repo);
    repo.save_notes(&[note_on("2024-03-05")]).unwrap();
    repo.save_vault_entries(&[vault_entry_on("2024-03-05")]).unwrap();

    let score = compute_score(&repo, today()).unwrap();
    assert_eq!(score.total, 100);
    assert!(score.bonus);
}

#[test]
fn bonus_does_not_require_protocol() {
    let repo = repo();
    checked_in_today(&repo);
    repo.save_notes(&[note_on("2024-03-05")]).unwrap();
    repo.save_vault_entries(&[vault_entry_on("2024-03-05")]).unwrap();

    let score = compute_score(&repo, today()).unwrap();
    assert_eq!(score.total, 80); // 30 + 20 + 20 + 10
    assert!(score.bonus);
}

#[test]
fn yesterdays_activity_does_not_count() {
    let repo = repo();
    repo.save_notes(&[note_on("2024-03-04")]).unwrap();
    repo.save_vault_entries(&[vault_entry_on("2024-03-04")]).unwrap();
    repo.save_progress(&ProgressState {
        streak: 3,
        last_check_in: "2024-03-04".into(),
    })
    .unwrap();

    let score = compute_score(&repo, today()).unwrap();
    assert_eq!(score.total, 0);
}

// ── History side effect ──────────────────────────────────────────

#[test]
fn score_is_recorded_under_todays_key() {
    let repo = repo();
    repo.save_protocol(&protocol()).unwrap();
    compute_score(&repo, today()).unwrap();

    let history = repo.load_score_history().unwrap();
    assert_eq!(history.get("2024-03-05"), Some(&20));
}

#[test]
fn same_day_recompute_overwrites_not_appends() {
    let repo = repo();
    compute_score(&repo, today()).unwrap();

    repo.save_protocol(&protocol()).unwrap();
    compute_score(&repo, today()).unwrap();

    let history = repo.load_score_history().unwrap();
    assert_eq!(history.len(), 1);
    assert_eq!(history.get("2024-03-05"), Some(&20));
}

#[test]
fn history_keeps_other_days() {
    let repo = repo();
    let mut history = kaizen_types::ScoreHistory::new();
    history.insert("2024-03-01".into(), 50);
    repo.save_score_history(&history).unwrap();

    compute_score(&repo, today()).unwrap();

    let history = repo.load_score_history().unwrap();
    assert_eq!(history.get("2024-03-01"), Some(&50));
    assert_eq!(history.get("2024-03-05"), Some(&0));
}

// ── Verdict strings ──────────────────────────────────────────────

#[test]
fn verdict_tiers() {
    assert_eq!(verdict(100), "Outstanding focus & clarity!");
    assert_eq!(verdict(90), "Outstanding focus & clarity!");
    assert_eq!(verdict(70), "Solid progress — keep pushing!");
    assert_eq!(verdict(60), "Solid progress — keep pushing!");
    assert_eq!(verdict(59), "Let's refocus tomorrow. You've got this!");
    assert_eq!(verdict(0), "Let's refocus tomorrow. You've got this!");
}

//! Daily discipline score (0–100).
//!
//! Additive table, evaluated in a fixed order:
//!
//! | Condition                              | Points |
//! |----------------------------------------|--------|
//! | Target protocol active                 | +20    |
//! | Progress marked today                  | +30    |
//! | ≥1 note written today                  | +20    |
//! | ≥1 vault entry added today             | +20    |
//! | Progress + note + vault all done       | +10    |

use chrono::NaiveDate;
use kaizen_storage::{Repository, StorageResult};
use kaizen_types::date_key;
use serde::Serialize;

/// The computed score plus which conditions contributed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ScoreBreakdown {
    pub protocol: bool,
    pub progress: bool,
    pub note: bool,
    pub vault: bool,
    pub bonus: bool,
    pub total: u32,
}

/// Compute today's score from storage and record it in the score history.
///
/// Recomputing on the same day overwrites that day's entry with the fresh
/// total, so repeated runs are idempotent.
pub fn compute_score(repo: &Repository, today: NaiveDate) -> StorageResult<ScoreBreakdown> {
    let today_key = date_key(today);
    let mut total = 0u32;

    let protocol = repo.load_protocol()?.is_some();
    if protocol {
        total += 20;
    }

    let progress = repo
        .load_progress()?
        .is_some_and(|p| p.last_check_in == today_key);
    if progress {
        total += 30;
    }

    let note = repo
        .load_notes()?
        .iter()
        .any(|n| n.raw_date.starts_with(&today_key));
    if note {
        total += 20;
    }

    let vault = repo
        .load_vault_entries()?
        .iter()
        .any(|v| v.raw_date.starts_with(&today_key));
    if vault {
        total += 20;
    }

    let bonus = progress && note && vault;
    if bonus {
        total += 10;
    }

    let mut history = repo.load_score_history()?;
    history.insert(today_key, total);
    repo.save_score_history(&history)?;

    tracing::debug!(total, protocol, progress, note, vault, bonus, "score computed");

    Ok(ScoreBreakdown {
        protocol,
        progress,
        note,
        vault,
        bonus,
        total,
    })
}

/// One-line reading of a score, shown beneath the number.
pub fn verdict(total: u32) -> &'static str {
    if total >= 90 {
        "Outstanding focus & clarity!"
    } else if total >= 60 {
        "Solid progress — keep pushing!"
    } else {
        "Let's refocus tomorrow. You've got this!"
    }
}

//! Consecutive check-in streak tracking.

use chrono::{Days, NaiveDate};
use kaizen_storage::{Repository, StorageResult};
use kaizen_types::{date_key, ProgressState};

/// Result of a "mark today done" attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MarkOutcome {
    /// The streak after the attempt.
    pub streak: u32,
    /// True when today had already been marked; the attempt was a no-op.
    pub already_marked: bool,
}

/// The streak to display before any mark action.
///
/// A streak whose last check-in is neither today nor yesterday is broken
/// and shows as zero until the user marks again.
pub fn displayed_streak(state: Option<&ProgressState>, today: NaiveDate) -> u32 {
    let Some(state) = state else { return 0 };
    if state.last_check_in == date_key(today) || is_yesterday(&state.last_check_in, today) {
        state.streak
    } else {
        0
    }
}

/// Accept at most one check-in per calendar day.
///
/// - already marked today: no-op;
/// - last check-in was yesterday: streak increments;
/// - anything else (including no prior state): streak restarts at 1.
pub fn mark_today(repo: &Repository, today: NaiveDate) -> StorageResult<MarkOutcome> {
    let today_key = date_key(today);
    let state = repo.load_progress()?;

    if let Some(state) = &state {
        if state.last_check_in == today_key {
            return Ok(MarkOutcome {
                streak: state.streak,
                already_marked: true,
            });
        }
    }

    let streak = match &state {
        Some(s) if is_yesterday(&s.last_check_in, today) => s.streak + 1,
        _ => 1,
    };

    repo.save_progress(&ProgressState {
        streak,
        last_check_in: today_key,
    })?;

    Ok(MarkOutcome {
        streak,
        already_marked: false,
    })
}

fn is_yesterday(check_in: &str, today: NaiveDate) -> bool {
    today
        .checked_sub_days(Days::new(1))
        .is_some_and(|yesterday| check_in == date_key(yesterday))
}

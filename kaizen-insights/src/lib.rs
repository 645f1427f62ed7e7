//! Derivation layer: every value the app computes from stored records.
//!
//! All functions here are either pure over typed inputs or take an injected
//! [`kaizen_storage::Repository`] plus an explicit "today", so each
//! derivation is unit-testable against the in-memory store with a pinned
//! clock.

mod aggregate;
mod reflection;
mod score;
mod streak;
mod target;

pub use aggregate::{
    filter_notes, group_by_month, month_title, week_start, weekly_counts, NoteFilter,
};
pub use reflection::{summarize, ReflectionSummary, Tone};
pub use score::{compute_score, verdict, ScoreBreakdown};
pub use streak::{displayed_streak, mark_today, MarkOutcome};
pub use target::{generate_target, today_target};

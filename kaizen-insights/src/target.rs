//! Daily focus card generation and its once-per-day cache.

use chrono::NaiveDate;
use kaizen_storage::{Repository, StorageResult};
use kaizen_types::{date_key, DailyTarget, Note, ProtocolSetup};

const TITLE: &str = "Today's Focus";
const DEFAULT_FOCUS: &str = "Self-awareness + Simplicity";
const DEFAULT_MOTIVATION: &str = "You're one decision away from a different life.";
const NO_PROTOCOL_PROMPT: &str =
    "No protocol found. You can reflect, review past notes, or set a small habit today.";

/// Characters of the most recent note quoted as motivation.
const EXCERPT_LEN: usize = 60;

/// Synthesize the focus card from the current protocol and most recent
/// note. Pure; the caller decides what "today" is.
pub fn generate_target(
    protocol: Option<&ProtocolSetup>,
    most_recent_note: Option<&Note>,
    today: NaiveDate,
) -> DailyTarget {
    let description = match protocol {
        Some(p) => format!("Priority: {} — {}", p.priority, p.why),
        None => NO_PROTOCOL_PROMPT.to_string(),
    };

    let focus_area = match protocol {
        Some(p) if !p.actions.is_empty() => p.actions.join(", "),
        _ => DEFAULT_FOCUS.to_string(),
    };

    let motivation = match most_recent_note {
        Some(note) if !note.text.is_empty() => {
            let excerpt: String = note.text.chars().take(EXCERPT_LEN).collect();
            format!("Inspired by your recent note: \"{excerpt}...\"")
        }
        _ => DEFAULT_MOTIVATION.to_string(),
    };

    DailyTarget {
        title: TITLE.to_string(),
        generated_for: date_key(today),
        description,
        focus_area,
        motivation,
        subtitle: None,
    }
}

/// Today's focus card, cached once per calendar day.
///
/// A cached card generated for a different day is stale and replaced.
/// `force` bypasses the cache entirely (the explicit regenerate action)
/// and always recomputes from current storage.
pub fn today_target(
    repo: &Repository,
    today: NaiveDate,
    force: bool,
) -> StorageResult<DailyTarget> {
    if !force {
        if let Some(cached) = repo.load_cached_target()? {
            if cached.generated_for == date_key(today) {
                return Ok(cached);
            }
        }
    }

    let protocol = repo.load_protocol()?;
    let notes = repo.load_notes()?;
    let target = generate_target(protocol.as_ref(), notes.first(), today);
    repo.save_cached_target(&target)?;
    Ok(target)
}

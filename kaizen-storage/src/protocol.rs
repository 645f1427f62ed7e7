//! Legacy-shape tolerance for the stored target protocol.
//!
//! Two persisted shapes exist in the wild: the current object form, and an
//! older positional array of the five setup answers. Both decode here,
//! once, at the storage boundary; nothing outside this module ever sees
//! the array shape.

use kaizen_types::ProtocolSetup;
use serde::Deserialize;

/// Raw stored value: either the canonical object or the legacy answer
/// array. Order matters: serde tries the object first so an array never
/// shadows a valid object.
#[derive(Deserialize)]
#[serde(untagged)]
enum StoredProtocol {
    Canonical(ProtocolSetup),
    Legacy(Vec<String>),
}

impl StoredProtocol {
    fn normalize(self) -> ProtocolSetup {
        match self {
            Self::Canonical(p) => p,
            // Positional answers: 0 = priority, 1 = why, everything after
            // becomes an action. The legacy setup never captured avoidances.
            Self::Legacy(answers) => {
                let mut it = answers.into_iter();
                ProtocolSetup {
                    priority: it.next().unwrap_or_default(),
                    why: it.next().unwrap_or_default(),
                    actions: it.collect(),
                    avoid: Vec::new(),
                }
            }
        }
    }
}

/// Decode a raw stored protocol value into the canonical shape.
///
/// Malformed JSON is logged and treated as absence, never an error.
pub fn decode_protocol(raw: &str) -> Option<ProtocolSetup> {
    match serde_json::from_str::<StoredProtocol>(raw) {
        Ok(stored) => Some(stored.normalize()),
        Err(e) => {
            tracing::warn!(error = %e, "stored protocol is malformed, ignoring");
            None
        }
    }
}

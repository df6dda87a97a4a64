//! Timeline event kinds and field coercion.
//!
//! Events carry a free-form kind tag; the kinds with typed payloads
//! (`growth_phase`, `fertilization`) are known variants, everything else
//! is carried verbatim and stores only the common fields.

use crate::types::DbId;

/// Maximum title length derived from a description, in characters.
pub const TITLE_MAX_CHARS: usize = 50;

/// Kind tag of a timeline event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EventKind {
    GrowthPhase,
    Fertilization,
    Watering,
    Note,
    /// Any other kind tag, stored verbatim with common fields only.
    Other(String),
}

impl EventKind {
    /// Parse a kind tag. Unknown tags are preserved as [`EventKind::Other`].
    pub fn parse(s: &str) -> Self {
        match s {
            "growth_phase" => Self::GrowthPhase,
            "fertilization" => Self::Fertilization,
            "watering" => Self::Watering,
            "note" => Self::Note,
            other => Self::Other(other.to_string()),
        }
    }

    /// The kind tag as stored in the database.
    pub fn as_str(&self) -> &str {
        match self {
            Self::GrowthPhase => "growth_phase",
            Self::Fertilization => "fertilization",
            Self::Watering => "watering",
            Self::Note => "note",
            Self::Other(tag) => tag,
        }
    }

    /// Human-readable label ("growth_phase" -> "Growth Phase").
    pub fn label(&self) -> String {
        humanize_kind(self.as_str())
    }
}

impl std::fmt::Display for EventKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Title-case each underscore-separated word of a kind tag.
pub fn humanize_kind(kind: &str) -> String {
    kind.split('_')
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Derive an event title from its description, kind, and date string.
///
/// A non-blank description becomes the title, truncated to
/// [`TITLE_MAX_CHARS`] characters with a trailing `...` when it was
/// longer. A blank description falls back to
/// `"<Kind Label> - <date as submitted>"`.
pub fn derive_title(kind: &EventKind, event_date: &str, description: &str) -> String {
    if description.trim().is_empty() {
        return format!("{} - {event_date}", kind.label());
    }
    if description.chars().count() > TITLE_MAX_CHARS {
        let truncated: String = description.chars().take(TITLE_MAX_CHARS).collect();
        format!("{truncated}...")
    } else {
        description.to_string()
    }
}

/// Coerce a raw growth-phase reference from a form value.
///
/// Missing, empty, whitespace-only, and unparseable values all degrade to
/// "no phase" rather than an error.
pub fn parse_phase_ref(raw: Option<&str>) -> Option<DbId> {
    raw.map(str::trim)
        .filter(|value| !value.is_empty())
        .and_then(|value| value.parse::<DbId>().ok())
}

/// Normalize a fertilization amount: blank values become absent.
pub fn normalize_amount(raw: Option<&str>) -> Option<String> {
    raw.filter(|value| !value.trim().is_empty())
        .map(str::to_string)
}

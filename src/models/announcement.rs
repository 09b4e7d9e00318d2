use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Persisted announcement. Timestamps are kept as the ISO-8601 strings the
/// client supplied; `start_date` of `None` means "always started".
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Announcement {
    pub id: Uuid,
    pub message: String,
    pub start_date: Option<String>,
    pub end_date: String,
    pub created_by: String,
    pub created_at: String,
}

impl Announcement {
    /// Visible at `now` iff it has started and not yet ended.
    /// Comparison is lexicographic over UTC ISO-8601 strings.
    pub fn is_active(&self, now: &str) -> bool {
        let started = self
            .start_date
            .as_deref()
            .map_or(true, |start| start <= now);
        started && self.end_date.as_str() >= now
    }
}

/// Record handed to the store on insert; the store assigns the id.
#[derive(Debug, Clone)]
pub struct NewAnnouncement {
    pub message: String,
    pub start_date: Option<String>,
    pub end_date: String,
    pub created_by: String,
    pub created_at: String,
}

/// Three-way update of an optional field: leave it, overwrite it, or remove it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum FieldPatch<T> {
    #[default]
    Keep,
    Set(T),
    Unset,
}

impl<T> FieldPatch<T> {
    /// `Some` sets the field, `None` removes it.
    pub fn set_or_unset(value: Option<T>) -> Self {
        match value {
            Some(v) => FieldPatch::Set(v),
            None => FieldPatch::Unset,
        }
    }

    pub fn apply(self, field: &mut Option<T>) {
        match self {
            FieldPatch::Keep => {}
            FieldPatch::Set(v) => *field = Some(v),
            FieldPatch::Unset => *field = None,
        }
    }
}

/// Fields replaced by a single update.
#[derive(Debug, Clone)]
pub struct AnnouncementChanges {
    pub message: String,
    pub end_date: String,
    pub start_date: FieldPatch<String>,
}

/// Optional fields that can be removed from a record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnnouncementField {
    StartDate,
}

impl AnnouncementField {
    pub fn column(self) -> &'static str {
        match self {
            AnnouncementField::StartDate => "start_date",
        }
    }
}

/// Restricts a listing to announcements active at the given instant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActiveAt(pub String);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortOrder {
    /// `created_at` descending.
    NewestFirst,
    OldestFirst,
}

/// Query params for POST /announcements and PUT /announcements/{id}.
/// Missing values deserialize as empty so validation can report them.
#[derive(Debug, Default, Deserialize)]
pub struct AnnouncementParams {
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub end_date: String,
    pub start_date: Option<String>,
}

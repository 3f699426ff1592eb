//! Collaborator interfaces the stamping core is driven through.
//!
//! The core never reaches for a global clock, editor or settings file;
//! callers hand in implementations of these traits.

use chrono::{DateTime, FixedOffset};

use crate::error::{AppError, FormatError};
use crate::settings::StampSettings;

/// Source of the instant a stamp is rendered for.
pub(crate) trait Clock {
    fn now(&self) -> DateTime<FixedOffset>;
}

/// Renders an instant through a user pattern.
pub(crate) trait Formatter {
    fn format(&self, instant: &DateTime<FixedOffset>, pattern: &str)
    -> Result<String, FormatError>;
}

/// The document being edited.
pub(crate) trait Editor {
    /// Replace the current selection with `text`, or insert it at the caret
    /// when nothing is selected.
    fn replace_selection(&mut self, text: &str) -> Result<(), AppError>;

    /// Bring the caret back into view after an edit.
    fn scroll_to_cursor(&mut self);
}

/// Persistent home of [`StampSettings`].
pub(crate) trait SettingsStore {
    /// Load settings with defaults filled in for every field not persisted.
    fn load(&self) -> Result<StampSettings, AppError>;

    fn save(&self, settings: &StampSettings) -> Result<(), AppError>;
}

//! Stamp settings
//!
//! The persisted record is flat JSON with camelCase keys. Every field is
//! optional on disk; `#[serde(default)]` lays the persisted values over
//! [`StampSettings::default`] field by field.

use serde::{Deserialize, Serialize};
use tracing::{info, trace};

use crate::error::AppError;
use crate::stamp::{SettingsStore, StampStyle};

pub(crate) const DEFAULT_TIME_FORMAT: &str = "hh:mm:ss";
pub(crate) const DEFAULT_DATE_FORMAT: &str = "YYYY-MM-DD";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub(crate) struct StampSettings {
    pub(crate) time_stamp_format: String,
    pub(crate) date_stamp_format: String,
    pub(crate) last_format: String,
    pub(crate) new_line: bool,
    pub(crate) make_bold: bool,
    pub(crate) extra_string: String,
}

impl Default for StampSettings {
    fn default() -> Self {
        StampSettings {
            time_stamp_format: DEFAULT_TIME_FORMAT.to_string(),
            date_stamp_format: DEFAULT_DATE_FORMAT.to_string(),
            last_format: String::new(),
            new_line: false,
            make_bold: false,
            extra_string: String::new(),
        }
    }
}

/// A user-editable field, named the way the command line spells it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub(crate) enum SettingKey {
    /// Pattern of the preconfigured time stamp
    TimeFormat,
    /// Pattern of the preconfigured date stamp
    DateFormat,
    /// Pattern pre-filled in the custom stamp prompt
    LastFormat,
    /// Add a line break after the stamp
    NewLine,
    /// Wrap the stamp in **bold** markup
    Bold,
    /// Literal text appended after the stamp
    Extra,
}

impl SettingKey {
    /// Persisted field name.
    pub(crate) fn field(self) -> &'static str {
        match self {
            SettingKey::TimeFormat => "timeStampFormat",
            SettingKey::DateFormat => "dateStampFormat",
            SettingKey::LastFormat => "lastFormat",
            SettingKey::NewLine => "newLine",
            SettingKey::Bold => "makeBold",
            SettingKey::Extra => "extraString",
        }
    }
}

impl StampSettings {
    pub(crate) fn style(&self) -> StampStyle<'_> {
        StampStyle {
            make_bold: self.make_bold,
            extra: &self.extra_string,
            new_line: self.new_line,
        }
    }

    /// Set one field from its textual form. Patterns are taken verbatim.
    pub(crate) fn apply(&mut self, key: SettingKey, raw: &str) -> Result<(), AppError> {
        match key {
            SettingKey::TimeFormat => self.time_stamp_format = raw.to_string(),
            SettingKey::DateFormat => self.date_stamp_format = raw.to_string(),
            SettingKey::LastFormat => self.last_format = raw.to_string(),
            SettingKey::Extra => self.extra_string = raw.to_string(),
            SettingKey::NewLine => self.new_line = parse_bool(key, raw)?,
            SettingKey::Bold => self.make_bold = parse_bool(key, raw)?,
        }
        Ok(())
    }

    pub(crate) fn log_fields(&self) {
        trace!(target: "settings", "  - timeStampFormat: {}", self.time_stamp_format);
        trace!(target: "settings", "  - dateStampFormat: {}", self.date_stamp_format);
        trace!(target: "settings", "  - lastFormat:      {}", self.last_format);
    }
}

fn parse_bool(key: SettingKey, raw: &str) -> Result<bool, AppError> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "true" | "yes" | "on" | "1" => Ok(true),
        "false" | "no" | "off" | "0" => Ok(false),
        _ => Err(AppError::InvalidSettingValue {
            key: key.field(),
            value: raw.to_string(),
        }),
    }
}

/// Change one setting and persist the result straight away.
pub(crate) fn update_and_persist(
    settings: &mut StampSettings,
    store: &dyn SettingsStore,
    key: SettingKey,
    raw: &str,
) -> Result<(), AppError> {
    settings.apply(key, raw)?;
    info!(target: "settings", "Settings update - {}: {}", key.field(), raw);
    store.save(settings)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;

    #[test]
    fn defaults_match_documented_values() {
        let s = StampSettings::default();
        assert_eq!(s.time_stamp_format, "hh:mm:ss");
        assert_eq!(s.date_stamp_format, "YYYY-MM-DD");
        assert_eq!(s.last_format, "");
        assert!(!s.new_line);
        assert!(!s.make_bold);
        assert_eq!(s.extra_string, "");
    }

    #[test]
    fn persisted_fields_override_defaults_individually() {
        let s: StampSettings = serde_json::from_str(r#"{"dateStampFormat":"DD.MM.YYYY"}"#).unwrap();
        assert_eq!(
            s,
            StampSettings {
                date_stamp_format: "DD.MM.YYYY".to_string(),
                ..StampSettings::default()
            }
        );
    }

    #[test]
    fn empty_record_is_all_defaults() {
        let s: StampSettings = serde_json::from_str("{}").unwrap();
        assert_eq!(s, StampSettings::default());
    }

    #[test]
    fn unknown_keys_are_ignored() {
        let s: StampSettings =
            serde_json::from_str(r#"{"makeBold":true,"somethingElse":42}"#).unwrap();
        assert!(s.make_bold);
    }

    #[test]
    fn serializes_with_persisted_key_names() {
        let json = serde_json::to_value(StampSettings::default()).unwrap();
        for key in [
            "timeStampFormat",
            "dateStampFormat",
            "lastFormat",
            "newLine",
            "makeBold",
            "extraString",
        ] {
            assert!(json.get(key).is_some(), "missing {key}");
        }
    }

    #[test]
    fn apply_takes_patterns_verbatim() {
        let mut s = StampSettings::default();
        s.apply(SettingKey::TimeFormat, " HH:mm ").unwrap();
        s.apply(SettingKey::Extra, "").unwrap();
        assert_eq!(s.time_stamp_format, " HH:mm ");
        assert_eq!(s.extra_string, "");
    }

    #[test]
    fn apply_parses_boolean_spellings() {
        let mut s = StampSettings::default();
        for (raw, expected) in [("true", true), ("OFF", false), ("yes", true), ("0", false), ("1", true)] {
            s.apply(SettingKey::Bold, raw).unwrap();
            assert_eq!(s.make_bold, expected, "{raw}");
        }
    }

    #[test]
    fn apply_rejects_non_boolean() {
        let mut s = StampSettings::default();
        let err = s.apply(SettingKey::NewLine, "maybe").unwrap_err();
        assert_eq!(err.to_string(), r#"Invalid value "maybe" for setting newLine"#);
        assert!(!s.new_line);
    }

    #[test]
    fn update_persists_immediately() {
        let store = MemoryStore::default();
        let mut s = StampSettings::default();
        update_and_persist(&mut s, &store, SettingKey::DateFormat, "DD.MM.YYYY").unwrap();
        let saved = store.saved();
        assert_eq!(saved.len(), 1);
        assert_eq!(saved[0].date_stamp_format, "DD.MM.YYYY");
    }

    #[test]
    fn invalid_update_is_not_persisted() {
        let store = MemoryStore::default();
        let mut s = StampSettings::default();
        assert!(update_and_persist(&mut s, &store, SettingKey::Bold, "bold!").is_err());
        assert!(store.saved().is_empty());
    }

    #[test]
    fn update_reports_save_failure() {
        let store = MemoryStore::failing();
        let mut s = StampSettings::default();
        let err = update_and_persist(&mut s, &store, SettingKey::Extra, " ok").unwrap_err();
        assert!(err.to_string().starts_with("Failed to write"));
        assert_eq!(s.extra_string, " ok");
    }
}

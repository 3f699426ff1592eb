use crate::error::AppError;
use crate::settings::StampSettings;

/// Settings as they are persisted, pretty-printed.
pub(crate) fn output_settings_json(settings: &StampSettings) -> Result<String, AppError> {
    Ok(serde_json::to_string_pretty(settings)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn json_uses_persisted_keys() {
        let json = output_settings_json(&StampSettings::default()).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["dateStampFormat"], "YYYY-MM-DD");
        assert_eq!(value["timeStampFormat"], "hh:mm:ss");
        assert_eq!(value["newLine"], false);
    }
}

use chrono::format::{Item, StrftimeItems};
use chrono::{DateTime, FixedOffset};

use crate::error::FormatError;
use crate::stamp::Formatter;

/// chrono's strftime dialect. Unknown specifiers are an error rather than
/// being passed through.
pub(crate) struct StrftimeFormatter;

impl Formatter for StrftimeFormatter {
    fn format(
        &self,
        instant: &DateTime<FixedOffset>,
        pattern: &str,
    ) -> Result<String, FormatError> {
        let items: Vec<Item<'_>> = StrftimeItems::new(pattern).collect();
        if items.iter().any(|item| matches!(item, Item::Error)) {
            return Err(FormatError::InvalidPattern {
                pattern: pattern.to_string(),
            });
        }
        Ok(instant.format_with_items(items.into_iter()).to_string())
    }
}

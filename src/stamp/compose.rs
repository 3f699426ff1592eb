use chrono::{DateTime, FixedOffset};

use crate::error::FormatError;

use super::Formatter;

const BOLD_MARKER: &str = "**";
const LINE_TERMINATOR: char = '\n';

/// Decoration applied around a rendered stamp.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct StampStyle<'a> {
    pub(crate) make_bold: bool,
    pub(crate) extra: &'a str,
    pub(crate) new_line: bool,
}

/// Build the exact text to insert for `instant`.
///
/// The stamp is bolded on its own; `extra` always follows outside the bold
/// markers and the line terminator comes last. Formatter errors are passed
/// back untouched.
pub(crate) fn compose(
    instant: &DateTime<FixedOffset>,
    pattern: &str,
    style: StampStyle<'_>,
    formatter: &dyn Formatter,
) -> Result<String, FormatError> {
    let stamp = formatter.format(instant, pattern)?;

    let mut text = String::with_capacity(stamp.len() + style.extra.len() + 5);
    if style.make_bold {
        text.push_str(BOLD_MARKER);
        text.push_str(&stamp);
        text.push_str(BOLD_MARKER);
    } else {
        text.push_str(&stamp);
    }
    text.push_str(style.extra);
    if style.new_line {
        text.push(LINE_TERMINATOR);
    }
    Ok(text)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::format::{MomentFormatter, StrftimeFormatter};

    const PLAIN: StampStyle<'static> = StampStyle {
        make_bold: false,
        extra: "",
        new_line: false,
    };

    fn instant() -> DateTime<FixedOffset> {
        DateTime::parse_from_rfc3339("2024-01-05T09:03:07+00:00").unwrap()
    }

    fn moment(pattern: &str, style: StampStyle<'_>) -> String {
        compose(&instant(), pattern, style, &MomentFormatter).unwrap()
    }

    #[test]
    fn plain_style_is_the_bare_stamp() {
        for pattern in ["YYYY-MM-DD", "hh:mm:ss", "", "[literal]", "dddd"] {
            let expected = MomentFormatter.format(&instant(), pattern).unwrap();
            assert_eq!(moment(pattern, PLAIN), expected, "{pattern:?}");
        }
    }

    #[test]
    fn extra_is_appended_verbatim() {
        let style = StampStyle {
            extra: " - **note**",
            ..PLAIN
        };
        assert_eq!(moment("YYYY", style), "2024 - **note**");
    }

    #[test]
    fn bold_wraps_the_stamp_but_not_extra() {
        let style = StampStyle {
            make_bold: true,
            extra: " (logged)",
            ..PLAIN
        };
        assert_eq!(moment("hh:mm:ss", style), "**09:03:07** (logged)");
    }

    #[test]
    fn bold_with_empty_stamp_still_emits_markers() {
        let style = StampStyle {
            make_bold: true,
            ..PLAIN
        };
        let out = compose(&instant(), "", style, &StrftimeFormatter).unwrap();
        assert_eq!(out, "****");
    }

    #[test]
    fn newline_comes_after_everything_else() {
        let newline = StampStyle {
            new_line: true,
            ..PLAIN
        };
        assert_eq!(moment("YYYY", newline), "2024\n");

        let everything = StampStyle {
            make_bold: true,
            extra: " done",
            new_line: true,
        };
        assert_eq!(moment("YYYY", everything), "**2024** done\n");
    }

    #[test]
    fn default_date_scenario() {
        assert_eq!(moment("YYYY-MM-DD", PLAIN), "2024-01-05");
    }

    #[test]
    fn formatter_errors_propagate() {
        let err = compose(&instant(), "%Q", PLAIN, &StrftimeFormatter).unwrap_err();
        assert!(matches!(err, FormatError::InvalidPattern { ref pattern } if pattern == "%Q"));
    }

    #[test]
    fn special_characters_are_not_escaped() {
        let style = StampStyle {
            extra: " <b>&</b>",
            ..PLAIN
        };
        assert_eq!(moment("[*_`]", style), "*_` <b>&</b>");
    }
}

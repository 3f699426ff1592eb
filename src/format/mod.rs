//! Pattern formatters
//!
//! `moment` is the default and understands the token grammar existing user
//! patterns are written in; `strftime` is available for `%`-style patterns.

mod moment;
mod strftime;

use serde::Deserialize;

use crate::stamp::Formatter;

pub(crate) use moment::MomentFormatter;
pub(crate) use strftime::StrftimeFormatter;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub(crate) enum FormatSyntax {
    /// moment.js tokens: YYYY-MM-DD, hh:mm:ss, [literal] (default)
    #[default]
    Moment,
    /// strftime specifiers: %Y-%m-%d, %H:%M:%S
    Strftime,
}

impl FormatSyntax {
    pub(crate) fn formatter(self) -> Box<dyn Formatter> {
        match self {
            FormatSyntax::Moment => Box::new(MomentFormatter),
            FormatSyntax::Strftime => Box::new(StrftimeFormatter),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{DateTime, FixedOffset};

    fn instant() -> DateTime<FixedOffset> {
        DateTime::parse_from_rfc3339("2024-01-05T09:03:07+00:00").unwrap()
    }

    #[test]
    fn each_syntax_builds_its_formatter() {
        let t = instant();
        let moment = FormatSyntax::Moment.formatter();
        assert_eq!(moment.format(&t, "YYYY-MM-DD").unwrap(), "2024-01-05");
        let strftime = FormatSyntax::Strftime.formatter();
        assert_eq!(strftime.format(&t, "%Y-%m-%d").unwrap(), "2024-01-05");
    }
}

//! moment.js compatible `format()` for the English locale.
//!
//! Patterns are tokenized the same way moment does it: bracketed text is
//! literal, a backslash escapes the following token, anything that is not a
//! token is copied through and line terminators outside brackets vanish.

use std::borrow::Cow;

use chrono::{DateTime, Datelike, FixedOffset, NaiveDate, Timelike};

use crate::error::FormatError;
use crate::stamp::Formatter;

/// What an empty pattern renders as.
const DEFAULT_FORMAT: &str = "YYYY-MM-DDTHH:mm:ssZ";

const MONTHS: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

const WEEKDAYS: [&str; 7] = [
    "Sunday",
    "Monday",
    "Tuesday",
    "Wednesday",
    "Thursday",
    "Friday",
    "Saturday",
];

const WEEKDAYS_MIN: [&str; 7] = ["Su", "Mo", "Tu", "We", "Th", "Fr", "Sa"];

/// Locale week rules (first day of week, day of year that fixes week 1).
const LOCALE_WEEK: (i64, i64) = (0, 6);
const ISO_WEEK: (i64, i64) = (1, 4);

pub(crate) struct MomentFormatter;

impl Formatter for MomentFormatter {
    fn format(
        &self,
        instant: &DateTime<FixedOffset>,
        pattern: &str,
    ) -> Result<String, FormatError> {
        Ok(format_moment(instant, pattern))
    }
}

pub(crate) fn format_moment(instant: &DateTime<FixedOffset>, pattern: &str) -> String {
    let pattern = if pattern.is_empty() {
        DEFAULT_FORMAT
    } else {
        pattern
    };
    let expanded = expand_long_formats(pattern);

    let mut out = String::with_capacity(expanded.len() + 8);
    let mut rest: &str = &expanded;
    while let Some(c) = rest.chars().next() {
        if c == '['
            && let Some(len) = bracket_len(rest)
        {
            out.push_str(&rest[1..len - 1]);
            rest = &rest[len..];
            continue;
        }
        if c == '\\'
            && let Some(token) = match_token(&rest[1..])
        {
            push_literal(&mut out, token);
            rest = &rest[1 + token.len()..];
            continue;
        }
        match match_token(rest) {
            Some(token) => {
                render_token(token, instant, &mut out);
                rest = &rest[token.len()..];
            }
            None => rest = &rest[c.len_utf8()..],
        }
    }
    out
}

/// Length of a `[...]` literal starting at `rest`, brackets included.
/// The literal runs to the last `]` before the next `[`.
fn bracket_len(rest: &str) -> Option<usize> {
    let body = &rest[1..];
    let run = body.find('[').unwrap_or(body.len());
    body[..run].rfind(']').map(|close| close + 2)
}

fn push_literal(out: &mut String, token: &str) {
    out.extend(token.chars().filter(|&ch| ch != '\\'));
}

fn is_line_terminator(c: char) -> bool {
    matches!(c, '\n' | '\r' | '\u{2028}' | '\u{2029}')
}

/// Longest token at the start of `rest`, honouring moment's alternation
/// order. `None` at end of input or on a line terminator.
fn match_token(rest: &str) -> Option<&str> {
    let first = rest.chars().next()?;
    if is_line_terminator(first) {
        return None;
    }
    let bytes = rest.as_bytes();
    let run = bytes.iter().take_while(|&&b| b == bytes[0]).count();
    let next = bytes.get(1).copied();

    let len = match first {
        'H' | 'h' if rest.get(1..3) == Some("mm") => {
            if rest.get(3..5) == Some("ss") {
                5
            } else {
                3
            }
        }
        'M' if next == Some(b'o') => 2,
        'M' => run.min(4),
        'D' if next == Some(b'o') => 2,
        'D' if rest.starts_with("DDDo") => 4,
        'D' => run.min(4),
        'd' if run >= 2 => run.min(4),
        'd' | 'Q' | 'y' if next == Some(b'o') && run == 1 => 2,
        'y' if run >= 2 => run.min(4),
        'w' if matches!(next, Some(b'o' | b'|' | b'w')) => 2,
        'W' if matches!(next, Some(b'o' | b'|' | b'W')) => 2,
        'N' => run.min(5),
        'Y' => match run {
            _ if run >= 6 => 6,
            5 => 5,
            4 => 4,
            2 | 3 => 2,
            _ => 1,
        },
        'g' | 'G' => match run {
            _ if run >= 5 => 5,
            4 => 4,
            2 | 3 => 2,
            _ => 1,
        },
        'H' | 'h' | 'k' | 'm' | 's' | 'z' | 'Z' => run.min(2),
        'S' => run.min(9),
        _ => first.len_utf8(),
    };
    Some(&rest[..len])
}

/// Expand the localized shorthands (`LT`, `LL`, `llll`, ...) before
/// tokenizing. Bracketed and escaped occurrences are left untouched.
fn expand_long_formats(pattern: &str) -> Cow<'_, str> {
    if !pattern.contains(['L', 'l']) {
        return Cow::Borrowed(pattern);
    }
    let mut out = String::with_capacity(pattern.len() * 2);
    let mut rest = pattern;
    while let Some(c) = rest.chars().next() {
        if c == '['
            && let Some(len) = bracket_len(rest)
        {
            out.push_str(&rest[..len]);
            rest = &rest[len..];
            continue;
        }
        if c == '\\'
            && let Some(token) = match_long_format(&rest[1..])
        {
            out.push('\\');
            out.push_str(token);
            rest = &rest[1 + token.len()..];
            continue;
        }
        if let Some(token) = match_long_format(rest) {
            out.push_str(long_format(token));
            rest = &rest[token.len()..];
            continue;
        }
        out.push(c);
        rest = &rest[c.len_utf8()..];
    }
    Cow::Owned(out)
}

fn match_long_format(rest: &str) -> Option<&str> {
    if rest.starts_with("LTS") {
        return Some(&rest[..3]);
    }
    if rest.starts_with("LT") {
        return Some(&rest[..2]);
    }
    let first = *rest.as_bytes().first()?;
    if first != b'L' && first != b'l' {
        return None;
    }
    let run = rest.bytes().take_while(|&b| b == first).count();
    Some(&rest[..run.min(4)])
}

fn long_format(token: &str) -> &'static str {
    match token {
        "LTS" => "h:mm:ss A",
        "LT" => "h:mm A",
        "L" => "MM/DD/YYYY",
        "LL" => "MMMM D, YYYY",
        "LLL" => "MMMM D, YYYY h:mm A",
        "LLLL" => "dddd, MMMM D, YYYY h:mm A",
        "l" => "M/D/YYYY",
        "ll" => "MMM D, YYYY",
        "lll" => "MMM D, YYYY h:mm A",
        _ => "ddd, MMM D, YYYY h:mm A",
    }
}

fn render_token(token: &str, t: &DateTime<FixedOffset>, out: &mut String) {
    let year = i64::from(t.year());
    let month = i64::from(t.month());
    let day = i64::from(t.day());
    let weekday = i64::from(t.weekday().num_days_from_sunday());
    let hour = i64::from(t.hour());
    let minute = i64::from(t.minute());
    let second = i64::from(t.second());
    let millis = i64::from(t.nanosecond() % 1_000_000_000 / 1_000_000);
    let hour12 = if hour % 12 == 0 { 12 } else { hour % 12 };
    let era_year = if year >= 1 { year } else { 1 - year };

    let rendered: Cow<'static, str> = match token {
        "M" => month.to_string().into(),
        "Mo" => ordinal(month).into(),
        "MM" => zero_fill(month, 2, false).into(),
        "MMM" => MONTHS[month as usize - 1][..3].into(),
        "MMMM" => MONTHS[month as usize - 1].into(),
        "Q" => ((month + 2) / 3).to_string().into(),
        "Qo" => ordinal((month + 2) / 3).into(),
        "D" => day.to_string().into(),
        "Do" => ordinal(day).into(),
        "DD" => zero_fill(day, 2, false).into(),
        "DDD" => t.ordinal().to_string().into(),
        "DDDo" => ordinal(i64::from(t.ordinal())).into(),
        "DDDD" => zero_fill(i64::from(t.ordinal()), 3, false).into(),
        "d" | "e" => weekday.to_string().into(),
        "do" => ordinal(weekday).into(),
        "dd" => WEEKDAYS_MIN[weekday as usize].into(),
        "ddd" => WEEKDAYS[weekday as usize][..3].into(),
        "dddd" => WEEKDAYS[weekday as usize].into(),
        "E" => i64::from(t.weekday().number_from_monday()).to_string().into(),
        "w" | "wo" | "ww" | "W" | "Wo" | "WW" => {
            let rules = if token.starts_with('w') {
                LOCALE_WEEK
            } else {
                ISO_WEEK
            };
            let (week, _) = week_of_year(t.date_naive(), rules);
            let text = match token.len() {
                1 => week.to_string(),
                _ if token.ends_with('o') => ordinal(week),
                _ => zero_fill(week, 2, false),
            };
            text.into()
        }
        "gg" | "gggg" | "ggggg" | "GG" | "GGGG" | "GGGGG" => {
            let rules = if token.starts_with('g') {
                LOCALE_WEEK
            } else {
                ISO_WEEK
            };
            let (_, week_year) = week_of_year(t.date_naive(), rules);
            let week_year = i64::from(week_year);
            let text = match token.len() {
                2 => zero_fill(week_year % 100, 2, false),
                width => zero_fill(week_year, width, false),
            };
            text.into()
        }
        "Y" if year <= 9999 => zero_fill(year, 4, false).into(),
        "Y" => format!("+{year}").into(),
        "YY" => zero_fill(year % 100, 2, false).into(),
        "YYYY" => zero_fill(year, 4, false).into(),
        "YYYYY" => zero_fill(year, 5, false).into(),
        "YYYYYY" => zero_fill(year, 6, true).into(),
        "y" => era_year.to_string().into(),
        "yo" => ordinal(era_year).into(),
        "yy" | "yyy" | "yyyy" => zero_fill(era_year, token.len(), false).into(),
        "N" | "NN" | "NNN" | "NNNNN" => (if year >= 1 { "AD" } else { "BC" }).into(),
        "NNNN" => (if year >= 1 { "Anno Domini" } else { "Before Christ" }).into(),
        "a" => (if hour > 11 { "pm" } else { "am" }).into(),
        "A" => (if hour > 11 { "PM" } else { "AM" }).into(),
        "H" => hour.to_string().into(),
        "HH" => zero_fill(hour, 2, false).into(),
        "h" => hour12.to_string().into(),
        "hh" => zero_fill(hour12, 2, false).into(),
        "k" => (if hour == 0 { 24 } else { hour }).to_string().into(),
        "kk" => zero_fill(if hour == 0 { 24 } else { hour }, 2, false).into(),
        "hmm" => format!("{hour12}{}", zero_fill(minute, 2, false)).into(),
        "hmmss" => format!(
            "{hour12}{}{}",
            zero_fill(minute, 2, false),
            zero_fill(second, 2, false)
        )
        .into(),
        "Hmm" => format!("{hour}{}", zero_fill(minute, 2, false)).into(),
        "Hmmss" => format!(
            "{hour}{}{}",
            zero_fill(minute, 2, false),
            zero_fill(second, 2, false)
        )
        .into(),
        "m" => minute.to_string().into(),
        "mm" => zero_fill(minute, 2, false).into(),
        "s" => second.to_string().into(),
        "ss" => zero_fill(second, 2, false).into(),
        "S" => (millis / 100).to_string().into(),
        "SS" => zero_fill(millis / 10, 2, false).into(),
        _ if token.starts_with('S') && token.bytes().all(|b| b == b'S') => {
            let width = token.len();
            let scaled = millis * 10_i64.pow(width as u32 - 3);
            zero_fill(scaled, width, false).into()
        }
        "X" => t.timestamp().to_string().into(),
        "x" => t.timestamp_millis().to_string().into(),
        "z" | "zz" => "".into(),
        "Z" => utc_offset(t, ":").into(),
        "ZZ" => utc_offset(t, "").into(),
        _ => {
            push_literal(out, token);
            return;
        }
    };
    out.push_str(&rendered);
}

/// Pad `value` with zeros to `width` digits; the sign does not count
/// towards the width.
fn zero_fill(value: i64, width: usize, force_sign: bool) -> String {
    let sign = if value < 0 {
        "-"
    } else if force_sign {
        "+"
    } else {
        ""
    };
    format!("{sign}{:0>width$}", value.unsigned_abs())
}

fn ordinal(n: i64) -> String {
    let suffix = if (n % 100) / 10 == 1 {
        "th"
    } else {
        match n % 10 {
            1 => "st",
            2 => "nd",
            3 => "rd",
            _ => "th",
        }
    };
    format!("{n}{suffix}")
}

fn utc_offset(t: &DateTime<FixedOffset>, separator: &str) -> String {
    let offset_minutes = i64::from(t.offset().local_minus_utc()) / 60;
    let sign = if offset_minutes < 0 { '-' } else { '+' };
    let abs = offset_minutes.abs();
    format!(
        "{sign}{}{separator}{}",
        zero_fill(abs / 60, 2, false),
        zero_fill(abs % 60, 2, false)
    )
}

fn days_in_year(year: i32) -> i64 {
    if NaiveDate::from_ymd_opt(year, 2, 29).is_some() {
        366
    } else {
        365
    }
}

fn first_week_offset(year: i32, (dow, doy): (i64, i64)) -> i64 {
    let fwd = 7 + dow - doy;
    let fwd_weekday = NaiveDate::from_ymd_opt(year, 1, fwd as u32)
        .map(|d| i64::from(d.weekday().num_days_from_sunday()))
        .unwrap_or(0);
    let fwdlw = (7 + fwd_weekday - dow) % 7;
    -fwdlw + fwd - 1
}

fn weeks_in_year(year: i32, rules: (i64, i64)) -> i64 {
    let offset = first_week_offset(year, rules);
    let next = first_week_offset(year + 1, rules);
    (days_in_year(year) - offset + next) / 7
}

/// Week number and week-based year of `date` under the given week rules.
fn week_of_year(date: NaiveDate, rules: (i64, i64)) -> (i64, i32) {
    let year = date.year();
    let offset = first_week_offset(year, rules);
    let week = (i64::from(date.ordinal()) - offset - 1).div_euclid(7) + 1;
    if week < 1 {
        (week + weeks_in_year(year - 1, rules), year - 1)
    } else if week > weeks_in_year(year, rules) {
        (week - weeks_in_year(year, rules), year + 1)
    } else {
        (week, year)
    }
}

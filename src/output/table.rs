use comfy_table::{Cell, Color, Table};

use crate::output::format::{create_styled_table, header_cell, quoted, styled_cell};
use crate::settings::{SettingKey, StampSettings};

const ROWS: [SettingKey; 6] = [
    SettingKey::DateFormat,
    SettingKey::TimeFormat,
    SettingKey::LastFormat,
    SettingKey::NewLine,
    SettingKey::Bold,
    SettingKey::Extra,
];

fn describe(key: SettingKey) -> &'static str {
    match key {
        SettingKey::DateFormat => "Date stamp template",
        SettingKey::TimeFormat => "Time stamp template",
        SettingKey::LastFormat => "Last custom format",
        SettingKey::NewLine => "Insert line break",
        SettingKey::Bold => "Make bold",
        SettingKey::Extra => "Extra string",
    }
}

fn value_of(settings: &StampSettings, key: SettingKey) -> String {
    match key {
        SettingKey::DateFormat => quoted(&settings.date_stamp_format),
        SettingKey::TimeFormat => quoted(&settings.time_stamp_format),
        SettingKey::LastFormat => quoted(&settings.last_format),
        SettingKey::Extra => quoted(&settings.extra_string),
        SettingKey::NewLine => settings.new_line.to_string(),
        SettingKey::Bold => settings.make_bold.to_string(),
    }
}

fn key_name(key: SettingKey) -> String {
    clap::ValueEnum::to_possible_value(&key)
        .map(|v| v.get_name().to_string())
        .unwrap_or_else(|| key.field().to_string())
}

pub(crate) fn build_settings_table(settings: &StampSettings, use_color: bool) -> Table {
    let mut table = create_styled_table();
    table.set_header(vec![
        header_cell("Setting", use_color),
        header_cell("Key", use_color),
        header_cell("Value", use_color),
    ]);

    let key_color = use_color.then_some(Color::DarkGrey);
    for key in ROWS {
        table.add_row(vec![
            Cell::new(describe(key)),
            styled_cell(&key_name(key), key_color, false),
            styled_cell(&value_of(settings, key), None, true),
        ]);
    }
    table
}

pub(crate) fn print_settings_table(settings: &StampSettings, use_color: bool) {
    println!("\n  Stamp Settings\n");
    println!("{}", build_settings_table(settings, use_color));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn table_lists_every_setting() {
        let settings = StampSettings {
            extra_string: " (logged)".to_string(),
            make_bold: true,
            ..StampSettings::default()
        };
        let rendered = build_settings_table(&settings, false).to_string();
        for needle in [
            "Date stamp template",
            "\"YYYY-MM-DD\"",
            "time-format",
            "\"hh:mm:ss\"",
            "last-format",
            "new-line",
            "\" (logged)\"",
        ] {
            assert!(rendered.contains(needle), "missing {needle}:\n{rendered}");
        }
    }

    #[test]
    fn key_names_match_the_command_line() {
        assert_eq!(key_name(SettingKey::DateFormat), "date-format");
        assert_eq!(key_name(SettingKey::Bold), "bold");
    }
}

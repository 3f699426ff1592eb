//! CLI subcommand definitions

use clap::Subcommand;

use crate::settings::SettingKey;
use crate::stamp::StampKind;

/// Main CLI commands
#[derive(Subcommand)]
pub(crate) enum Commands {
    /// Insert preconfigured time stamp
    Time,
    /// Insert preconfigured date stamp
    Date,
    /// Insert custom time/date stamp (prompts for the pattern)
    Custom {
        /// Use this pattern instead of prompting
        #[arg(short, long, allow_hyphen_values = true)]
        pattern: Option<String>,
    },
    /// Show or change stamp settings
    Settings {
        #[command(subcommand)]
        command: SettingsCommand,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Subcommand)]
pub(crate) enum SettingsCommand {
    /// Show the current settings
    Show {
        /// Output as JSON
        #[arg(short, long)]
        json: bool,
    },
    /// Change one setting and save it
    Set {
        #[arg(value_enum)]
        key: SettingKey,
        #[arg(allow_hyphen_values = true)]
        value: String,
    },
    /// Print the settings file location
    Path,
}

/// What a parsed command asks for
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Action {
    Stamp(StampKind),
    Custom(Option<String>),
    Settings(SettingsCommand),
}

impl From<&Commands> for Action {
    fn from(cmd: &Commands) -> Self {
        match cmd {
            Commands::Time => Action::Stamp(StampKind::Time),
            Commands::Date => Action::Stamp(StampKind::Date),
            Commands::Custom { pattern } => Action::Custom(pattern.clone()),
            Commands::Settings { command } => Action::Settings(command.clone()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stamp_commands_map_to_kinds() {
        assert_eq!(Action::from(&Commands::Time), Action::Stamp(StampKind::Time));
        assert_eq!(Action::from(&Commands::Date), Action::Stamp(StampKind::Date));
    }

    #[test]
    fn custom_keeps_its_pattern() {
        let cmd = Commands::Custom {
            pattern: Some("[W]W".to_string()),
        };
        assert_eq!(Action::from(&cmd), Action::Custom(Some("[W]W".to_string())));
    }

    #[test]
    fn settings_subcommand_is_carried_over() {
        let cmd = Commands::Settings {
            command: SettingsCommand::Show { json: true },
        };
        assert_eq!(
            Action::from(&cmd),
            Action::Settings(SettingsCommand::Show { json: true })
        );
    }
}

//! CLI argument definitions
//!
//! Global options and configuration merging logic.

use std::io::IsTerminal;
use std::path::PathBuf;

use clap::Parser;

use crate::config::Config;
use crate::format::FormatSyntax;
use crate::host::CursorSpec;

use super::commands::Commands;

#[derive(Parser)]
#[command(name = "timestamper")]
#[command(about = "Insert formatted time and date stamps at the cursor", version)]
pub(crate) struct Cli {
    #[command(subcommand)]
    pub(crate) command: Commands,

    /// Document to insert into (the stamp goes to stdout when omitted)
    #[arg(short, long, global = true, value_name = "PATH")]
    pub(crate) file: Option<PathBuf>,

    /// Caret position in the document: LINE:COL (1-based) or "end"
    #[arg(long, global = true, value_name = "POS", default_value = "end")]
    pub(crate) at: CursorSpec,

    /// Select from the caret to this position; the stamp replaces the selection
    #[arg(long, global = true, value_name = "POS")]
    pub(crate) select_to: Option<CursorSpec>,

    /// Settings file (default: <config dir>/timestamper/data.json)
    #[arg(long, global = true, value_name = "PATH")]
    pub(crate) settings: Option<PathBuf>,

    /// Timezone for stamps (e.g., "Europe/Berlin", "UTC"; default: local)
    #[arg(long, global = true, value_name = "TZ")]
    pub(crate) timezone: Option<String>,

    /// Pattern syntax
    #[arg(long, global = true, value_enum)]
    pub(crate) syntax: Option<FormatSyntax>,

    /// Enable debug logging on stderr
    #[arg(long, global = true)]
    pub(crate) debug: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub(crate) no_color: bool,
}

impl Cli {
    /// Merge config file values into CLI (CLI args take precedence)
    pub(crate) fn with_config(mut self, config: &Config) -> Self {
        if !self.debug && config.debug {
            self.debug = true;
        }
        if !self.no_color && config.no_color {
            self.no_color = true;
        }
        if self.timezone.is_none() {
            self.timezone = config.timezone.clone();
        }
        if self.syntax.is_none() {
            self.syntax = config.syntax;
        }
        if self.settings.is_none() {
            self.settings = config.settings_path.clone();
        }
        self
    }

    pub(crate) fn syntax(&self) -> FormatSyntax {
        self.syntax.unwrap_or_default()
    }

    pub(crate) fn use_color(&self) -> bool {
        !self.no_color && std::io::stdout().is_terminal()
    }

    pub(crate) fn log_color(&self) -> bool {
        !self.no_color && std::io::stderr().is_terminal()
    }
}

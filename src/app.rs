use tracing::debug;

use crate::cli::{Action, Cli, SettingsCommand};
use crate::consts::VERSION;
use crate::error::AppError;
use crate::host::{FileDocument, LinePrompt, StdoutEditor, SubmitPrompt, SystemClock, Timezone};
use crate::output::{output_settings_json, print_settings_table};
use crate::settings::{StampSettings, update_and_persist};
use crate::stamp::{
    AdHocOutcome, Editor, Host, SettingsStore, insert_ad_hoc, insert_preconfigured,
};
use crate::store::{JsonFileStore, default_settings_path};

fn settings_store(cli: &Cli) -> Result<JsonFileStore, AppError> {
    cli.settings
        .clone()
        .or_else(default_settings_path)
        .map(JsonFileStore::new)
        .ok_or(AppError::NoSettingsPath)
}

fn open_editor(cli: &Cli) -> Result<Box<dyn Editor>, AppError> {
    match &cli.file {
        Some(path) => Ok(Box::new(FileDocument::open(path, cli.at, cli.select_to)?)),
        None => Ok(Box::new(StdoutEditor)),
    }
}

/// Assemble the clock, formatter and editor for one stamping command.
fn with_host<T>(
    cli: &Cli,
    store: &JsonFileStore,
    f: impl FnOnce(&mut Host<'_>) -> Result<T, AppError>,
) -> Result<T, AppError> {
    let clock = SystemClock::new(Timezone::parse(cli.timezone.as_deref())?);
    let formatter = cli.syntax().formatter();
    let mut editor = open_editor(cli)?;
    let mut host = Host {
        clock: &clock,
        formatter: formatter.as_ref(),
        editor: editor.as_mut(),
        store,
    };
    f(&mut host)
}

pub(crate) fn run(cli: &Cli) -> Result<(), AppError> {
    debug!("Loading timestamper v{VERSION}");

    let store = settings_store(cli)?;
    debug!(path = %store.path().display(), "settings store");
    let mut settings = store.load()?;

    match Action::from(&cli.command) {
        Action::Stamp(kind) => {
            with_host(cli, &store, |host| insert_preconfigured(kind, &settings, host))?;
        }
        Action::Custom(pattern) => {
            let outcome = with_host(cli, &store, |host| match pattern {
                Some(pattern) => insert_ad_hoc(&mut settings, host, &mut SubmitPrompt::new(pattern)),
                None => {
                    let mut prompt = LinePrompt::new(std::io::stdin().lock(), std::io::stderr());
                    insert_ad_hoc(&mut settings, host, &mut prompt)
                }
            })?;
            if outcome == AdHocOutcome::Cancelled {
                eprintln!("Cancelled.");
            }
        }
        Action::Settings(command) => handle_settings(command, &mut settings, &store, cli)?,
    }
    Ok(())
}

fn handle_settings(
    command: SettingsCommand,
    settings: &mut StampSettings,
    store: &JsonFileStore,
    cli: &Cli,
) -> Result<(), AppError> {
    match command {
        SettingsCommand::Show { json } => {
            if json {
                println!("{}", output_settings_json(settings)?);
            } else {
                print_settings_table(settings, cli.use_color());
            }
        }
        SettingsCommand::Set { key, value } => {
            update_and_persist(settings, store, key, &value)?;
            println!("{} = {:?}", key.field(), value);
        }
        SettingsCommand::Path => println!("{}", store.path().display()),
    }
    Ok(())
}

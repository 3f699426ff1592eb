use tracing::{debug, warn};

use crate::error::AppError;
use crate::settings::StampSettings;

use super::compose::compose;
use super::dialog::{AdHocDialog, ConfirmTrigger, DialogState, Prompt};
use super::{Clock, Editor, Formatter, SettingsStore};

/// Which preconfigured pattern a command stamps with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum StampKind {
    Time,
    Date,
}

impl StampKind {
    pub(crate) fn pattern(self, settings: &StampSettings) -> &str {
        match self {
            StampKind::Time => &settings.time_stamp_format,
            StampKind::Date => &settings.date_stamp_format,
        }
    }

    pub(crate) fn name(self) -> &'static str {
        match self {
            StampKind::Time => "time",
            StampKind::Date => "date",
        }
    }
}

/// Capabilities a stamping command runs against.
pub(crate) struct Host<'a> {
    pub(crate) clock: &'a dyn Clock,
    pub(crate) formatter: &'a dyn Formatter,
    pub(crate) editor: &'a mut dyn Editor,
    pub(crate) store: &'a dyn SettingsStore,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum AdHocOutcome {
    Inserted {
        text: String,
        trigger: ConfirmTrigger,
    },
    Cancelled,
}

/// Stamp with the time or date pattern from `settings`.
/// Returns the inserted text.
pub(crate) fn insert_preconfigured(
    kind: StampKind,
    settings: &StampSettings,
    host: &mut Host<'_>,
) -> Result<String, AppError> {
    let instant = host.clock.now();
    let text = compose(&instant, kind.pattern(settings), settings.style(), host.formatter)?;
    host.editor.replace_selection(&text)?;
    debug!(
        target: "stamp",
        kind = kind.name(),
        new_line = settings.new_line,
        "inserted preconfigured stamp"
    );
    Ok(text)
}

/// Ask the operator for a pattern, stamp with it, and remember it as the
/// next prompt's default.
///
/// On confirmation the steps run in a fixed order: compose, insert, record
/// `lastFormat`, persist, close the prompt, scroll to the caret. A failed
/// save is logged and leaves the insertion in place.
pub(crate) fn insert_ad_hoc(
    settings: &mut StampSettings,
    host: &mut Host<'_>,
    prompt: &mut dyn Prompt,
) -> Result<AdHocOutcome, AppError> {
    let mut dialog = AdHocDialog::open(&settings.last_format);
    while !dialog.is_finished() {
        let event = prompt.next_event(dialog.value())?;
        dialog.handle(event);
    }

    let DialogState::Confirmed { value, trigger } = dialog.into_state() else {
        debug!(target: "stamp", "custom stamp cancelled");
        prompt.close();
        return Ok(AdHocOutcome::Cancelled);
    };

    let instant = host.clock.now();
    let text = compose(&instant, &value, settings.style(), host.formatter)?;
    host.editor.replace_selection(&text)?;

    settings.last_format = value;
    if let Err(e) = host.store.save(settings) {
        warn!(target: "settings", "Could not remember custom format: {e}");
    }

    prompt.close();
    host.editor.scroll_to_cursor();
    debug!(target: "stamp", ?trigger, "inserted custom stamp");

    Ok(AdHocOutcome::Inserted { text, trigger })
}

use crate::error::AppError;

/// How an open prompt was confirmed. Both triggers behave identically.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ConfirmTrigger {
    Submit,
    EnterKey,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Key {
    Enter,
    Escape,
    Char(char),
}

/// Something the operator did while the prompt was up.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum DialogEvent {
    /// The field now holds this text.
    Input(String),
    KeyPress(Key),
    /// The submit button was activated.
    Submit,
    /// The prompt was dismissed without confirming.
    Dismiss,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum DialogState {
    Open {
        value: String,
    },
    Confirmed {
        value: String,
        trigger: ConfirmTrigger,
    },
    Cancelled,
}

/// Source of operator events for the custom stamp prompt.
pub(crate) trait Prompt {
    /// Wait for the next event. `current` is the field's present value.
    fn next_event(&mut self, current: &str) -> Result<DialogEvent, AppError>;

    /// Tear the prompt down once the dialog has finished.
    fn close(&mut self) {}
}

/// The ad-hoc pattern prompt: `Open` until confirmed or cancelled.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct AdHocDialog {
    state: DialogState,
}

impl AdHocDialog {
    pub(crate) fn open(prefill: &str) -> Self {
        AdHocDialog {
            state: DialogState::Open {
                value: prefill.to_string(),
            },
        }
    }

    #[cfg(test)]
    pub(crate) fn state(&self) -> &DialogState {
        &self.state
    }

    pub(crate) fn into_state(self) -> DialogState {
        self.state
    }

    pub(crate) fn is_finished(&self) -> bool {
        !matches!(self.state, DialogState::Open { .. })
    }

    /// Current field value; empty once cancelled.
    pub(crate) fn value(&self) -> &str {
        match &self.state {
            DialogState::Open { value } | DialogState::Confirmed { value, .. } => value,
            DialogState::Cancelled => "",
        }
    }

    pub(crate) fn handle(&mut self, event: DialogEvent) -> &DialogState {
        if self.is_finished() {
            return &self.state;
        }
        match event {
            DialogEvent::Input(text) => {
                if let DialogState::Open { value } = &mut self.state {
                    *value = text;
                }
            }
            DialogEvent::KeyPress(Key::Enter) => self.confirm(ConfirmTrigger::EnterKey),
            DialogEvent::Submit => self.confirm(ConfirmTrigger::Submit),
            DialogEvent::KeyPress(Key::Escape) | DialogEvent::Dismiss => {
                self.state = DialogState::Cancelled;
            }
            DialogEvent::KeyPress(Key::Char(_)) => {}
        }
        &self.state
    }

    fn confirm(&mut self, trigger: ConfirmTrigger) {
        if let DialogState::Open { value } = &mut self.state {
            let value = std::mem::take(value);
            self.state = DialogState::Confirmed { value, trigger };
        }
    }
}

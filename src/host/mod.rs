//! Reference host
//!
//! Stand-ins for what an editor application provides to the stamping core:
//! a zoned wall clock, a document with a caret, and an operator prompt.

mod clock;
mod document;
mod prompt;

pub(crate) use clock::{SystemClock, Timezone};
pub(crate) use document::{CursorSpec, FileDocument, StdoutEditor};
pub(crate) use prompt::{LinePrompt, SubmitPrompt};

//! Stamp composition and insertion
//!
//! Pure composition lives in `compose`, the ad-hoc prompt state machine in
//! `dialog`, and the commands that tie them to an editor in `dispatch`.
//! Everything here talks to the outside world only through the traits in
//! `capabilities`.

mod capabilities;
mod compose;
mod dialog;
mod dispatch;

pub(crate) use capabilities::{Clock, Editor, Formatter, SettingsStore};
pub(crate) use compose::StampStyle;
pub(crate) use dialog::{DialogEvent, Key, Prompt};
pub(crate) use dispatch::{AdHocOutcome, Host, StampKind, insert_ad_hoc, insert_preconfigured};

mod message;

pub mod home;
pub mod withdraw;

pub use message::*;

use custody_ui::{
    component::text,
    theme,
    widget::*,
};

use super::error::Error;

/// Error of the last step action, if any.
pub fn error_message<'a>(error: Option<&'a String>) -> Option<Text<'a>> {
    error.map(|e| text::p2_regular(e).style(theme::text::error))
}

/// User facing text of an error surfaced outside of a form.
pub fn warning_title(error: &Error) -> &'static str {
    match error {
        Error::Backend(_) => "Custody service error",
        Error::Amount(_) | Error::InsufficientFunds(_) => "Invalid amount",
        Error::Missing(_) | Error::UnknownBeneficiary(_) => "Missing information",
    }
}

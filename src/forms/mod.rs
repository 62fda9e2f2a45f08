pub mod appointment_form;
pub mod multi_select;
pub mod participant_form;

pub use appointment_form::{AppointmentDraft, AppointmentField};
pub use multi_select::SelectOption;
pub use participant_form::{ParticipantDraft, ParticipantField};

use crate::error::ValidationError;

fn require(value: &str, label: &'static str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        Err(ValidationError::Required(label))
    } else {
        Ok(())
    }
}

/// Same shape check a browser applies to `type="email"` inputs.
pub fn is_valid_email(value: &str) -> bool {
    let value = value.trim();
    let Some((local, domain)) = value.split_once('@') else {
        return false;
    };
    !local.is_empty()
        && !domain.is_empty()
        && !domain.contains('@')
        && !domain.starts_with('.')
        && !domain.ends_with('.')
        && !value.chars().any(char::is_whitespace)
}

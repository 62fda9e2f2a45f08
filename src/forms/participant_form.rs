use std::str::FromStr;

use super::{is_valid_email, require};
use crate::error::ValidationError;
use crate::models::ParticipantPayload;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParticipantField {
    Name,
    Email,
}

impl ParticipantField {
    pub fn label(&self) -> &'static str {
        match self {
            ParticipantField::Name => "Name",
            ParticipantField::Email => "Email",
        }
    }
}

impl FromStr for ParticipantField {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "name" => Ok(ParticipantField::Name),
            "email" => Ok(ParticipantField::Email),
            other => Err(format!("Unknown participant field {other}")),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParticipantDraft {
    pub name: String,
    pub email: String,
}

impl ParticipantDraft {
    pub fn set_field(&mut self, field: ParticipantField, value: impl Into<String>) {
        match field {
            ParticipantField::Name => self.name = value.into(),
            ParticipantField::Email => self.email = value.into(),
        }
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        require(&self.name, ParticipantField::Name.label())?;
        require(&self.email, ParticipantField::Email.label())?;
        if !is_valid_email(&self.email) {
            return Err(ValidationError::InvalidEmail(ParticipantField::Email.label()));
        }
        Ok(())
    }

    pub fn to_payload(&self) -> ParticipantPayload {
        ParticipantPayload {
            name: self.name.clone(),
            email: self.email.clone(),
        }
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

use std::str::FromStr;

use chrono::NaiveDateTime;

use super::{is_valid_email, require};
use crate::clock::{format_local, local_to_wire, parse_local, wire_to_local};
use crate::error::ValidationError;
use crate::models::{Appointment, AppointmentPayload, EntityId};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppointmentField {
    Title,
    Description,
    SchedulerName,
    SchedulerEmail,
    StartAt,
    EndAt,
}

impl AppointmentField {
    pub const ALL: [AppointmentField; 6] = [
        AppointmentField::Title,
        AppointmentField::Description,
        AppointmentField::SchedulerName,
        AppointmentField::SchedulerEmail,
        AppointmentField::StartAt,
        AppointmentField::EndAt,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            AppointmentField::Title => "Title",
            AppointmentField::Description => "Description",
            AppointmentField::SchedulerName => "Scheduler Name",
            AppointmentField::SchedulerEmail => "Scheduler Email",
            AppointmentField::StartAt => "Start Date",
            AppointmentField::EndAt => "End Date",
        }
    }
}

impl FromStr for AppointmentField {
    type Err = String;

    /// Accepts the form input names as well as the wire names.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "title" => Ok(AppointmentField::Title),
            "description" => Ok(AppointmentField::Description),
            "schedulerName" | "scheduler_name" => Ok(AppointmentField::SchedulerName),
            "schedulerEmail" | "scheduler_email" => Ok(AppointmentField::SchedulerEmail),
            "startAt" | "start_at" => Ok(AppointmentField::StartAt),
            "endAt" | "end_at" => Ok(AppointmentField::EndAt),
            other => Err(format!("Unknown appointment field {other}")),
        }
    }
}

/// Editable appointment. `start_at`/`end_at` hold date-time-local text (`2030-01-01T09:00`).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AppointmentDraft {
    pub title: String,
    pub description: String,
    pub scheduler_name: String,
    pub scheduler_email: String,
    pub start_at: String,
    pub end_at: String,
    pub participants: Vec<EntityId>,
}

impl AppointmentDraft {
    pub fn from_appointment(appointment: &Appointment) -> Self {
        Self {
            title: appointment.title.clone(),
            description: appointment.description.clone(),
            scheduler_name: appointment.scheduler_name.clone(),
            scheduler_email: appointment.scheduler_email.clone(),
            start_at: wire_to_local(&appointment.start_at),
            end_at: wire_to_local(&appointment.end_at),
            participants: appointment.participants.iter().map(|p| p.id).collect(),
        }
    }

    pub fn field(&self, field: AppointmentField) -> &str {
        match field {
            AppointmentField::Title => &self.title,
            AppointmentField::Description => &self.description,
            AppointmentField::SchedulerName => &self.scheduler_name,
            AppointmentField::SchedulerEmail => &self.scheduler_email,
            AppointmentField::StartAt => &self.start_at,
            AppointmentField::EndAt => &self.end_at,
        }
    }

    pub fn set_field(&mut self, field: AppointmentField, value: impl Into<String>) {
        let value = value.into();
        match field {
            AppointmentField::Title => self.title = value,
            AppointmentField::Description => self.description = value,
            AppointmentField::SchedulerName => self.scheduler_name = value,
            AppointmentField::SchedulerEmail => self.scheduler_email = value,
            AppointmentField::StartAt => self.start_at = value,
            AppointmentField::EndAt => self.end_at = value,
        }
    }

    pub fn set_participants(&mut self, ids: Vec<EntityId>) {
        self.participants = ids;
    }

    /// Floor for the start input.
    pub fn min_start_date(now: NaiveDateTime) -> String {
        format_local(&now)
    }

    /// Floor for the end input; absent until a start has been entered.
    pub fn min_end_date(&self) -> Option<&str> {
        Some(self.start_at.as_str()).filter(|start| !start.trim().is_empty())
    }

    pub fn min_for(&self, field: AppointmentField, now: NaiveDateTime) -> Option<String> {
        match field {
            AppointmentField::StartAt => Some(Self::min_start_date(now)),
            AppointmentField::EndAt => self.min_end_date().map(str::to_string),
            _ => None,
        }
    }

    pub fn to_payload(&self) -> AppointmentPayload {
        AppointmentPayload {
            title: self.title.clone(),
            description: self.description.clone(),
            scheduler_name: self.scheduler_name.clone(),
            scheduler_email: self.scheduler_email.clone(),
            participants: self.participants.clone(),
            start_at: local_to_wire(&self.start_at),
            end_at: local_to_wire(&self.end_at),
        }
    }

    /// Input-level constraints: all fields required, email shape, start not before `now`,
    /// end not before start. Participants are optional.
    pub fn validate(&self, now: NaiveDateTime) -> Result<(), ValidationError> {
        for field in AppointmentField::ALL {
            require(self.field(field), field.label())?;
        }

        let email_label = AppointmentField::SchedulerEmail.label();
        if !is_valid_email(&self.scheduler_email) {
            return Err(ValidationError::InvalidEmail(email_label));
        }

        let start = parse_local(&self.start_at)
            .ok_or(ValidationError::InvalidDateTime(AppointmentField::StartAt.label()))?;
        let end = parse_local(&self.end_at)
            .ok_or(ValidationError::InvalidDateTime(AppointmentField::EndAt.label()))?;

        if start < now {
            return Err(ValidationError::StartInPast {
                min: Self::min_start_date(now),
            });
        }
        if end < start {
            return Err(ValidationError::EndBeforeStart {
                min: self.start_at.clone(),
            });
        }
        Ok(())
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ParticipantRef;
    use chrono::NaiveDate;

    fn now() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2029, 12, 31)
            .unwrap()
            .and_hms_opt(12, 0, 0)
            .unwrap()
    }

    fn standup() -> AppointmentDraft {
        AppointmentDraft {
            title: "Standup".into(),
            description: "daily".into(),
            scheduler_name: "A".into(),
            scheduler_email: "a@x.com".into(),
            start_at: "2030-01-01T09:00".into(),
            end_at: "2030-01-01T09:30".into(),
            participants: vec![1, 2],
        }
    }

    #[test]
    fn payload_maps_names_and_separator() {
        let payload = standup().to_payload();
        assert_eq!(
            serde_json::to_value(&payload).unwrap(),
            serde_json::json!({
                "title": "Standup",
                "description": "daily",
                "scheduler_name": "A",
                "scheduler_email": "a@x.com",
                "participants": [1, 2],
                "start_at": "2030-01-01 09:00",
                "end_at": "2030-01-01 09:30",
            })
        );
        assert_eq!(standup().to_payload(), payload);
    }

    #[test]
    fn set_field_touches_one_field() {
        let mut draft = standup();
        let field: AppointmentField = "schedulerName".parse().unwrap();
        draft.set_field(field, "Bea");
        assert_eq!(draft.scheduler_name, "Bea");
        assert_eq!(draft.title, "Standup");
        assert_eq!(draft.participants, vec![1, 2]);
        assert!("colour".parse::<AppointmentField>().is_err());
    }

    #[test]
    fn update_draft_flattens_participants() {
        let appointment = Appointment {
            id: 7,
            title: "Review".into(),
            description: "weekly".into(),
            scheduler_name: "A".into(),
            scheduler_email: "a@x.com".into(),
            start_at: "2030-02-01 10:00:00".into(),
            end_at: "2030-02-01 11:00:00".into(),
            participants: vec![
                ParticipantRef { id: 4, name: "D".into(), email: "d@x.com".into() },
                ParticipantRef { id: 9, name: "I".into(), email: "i@x.com".into() },
            ],
        };
        let draft = AppointmentDraft::from_appointment(&appointment);
        assert_eq!(draft.participants, vec![4, 9]);
        assert_eq!(draft.start_at, "2030-02-01T10:00");
        assert_eq!(draft.to_payload().end_at, "2030-02-01 11:00");
    }

    #[test]
    fn end_floor_follows_start() {
        let mut draft = AppointmentDraft::default();
        assert_eq!(draft.min_end_date(), None);
        draft.set_field(AppointmentField::StartAt, "2030-01-01T09:00");
        assert_eq!(draft.min_end_date(), Some("2030-01-01T09:00"));
        assert_eq!(
            draft.min_for(AppointmentField::StartAt, now()),
            Some("2029-12-31T12:00".to_string())
        );
        assert_eq!(draft.min_for(AppointmentField::Title, now()), None);
    }

    #[test]
    fn validate_accepts_complete_draft() {
        assert_eq!(standup().validate(now()), Ok(()));
    }

    #[test]
    fn validate_requires_every_field() {
        let mut draft = standup();
        draft.set_field(AppointmentField::Description, "   ");
        assert_eq!(
            draft.validate(now()),
            Err(ValidationError::Required("Description"))
        );
        assert_eq!(
            AppointmentDraft::default().validate(now()),
            Err(ValidationError::Required("Title"))
        );
    }

    #[test]
    fn validate_checks_date_range() {
        let mut draft = standup();
        draft.set_field(AppointmentField::EndAt, "2030-01-01T08:59");
        assert!(matches!(
            draft.validate(now()),
            Err(ValidationError::EndBeforeStart { .. })
        ));

        let mut draft = standup();
        draft.set_field(AppointmentField::StartAt, "2029-12-31T11:59");
        assert_eq!(
            draft.validate(now()),
            Err(ValidationError::StartInPast { min: "2029-12-31T12:00".into() })
        );

        let mut draft = standup();
        draft.set_field(AppointmentField::EndAt, draft.start_at.clone());
        assert_eq!(draft.validate(now()), Ok(()));
    }

    #[test]
    fn validate_checks_email_and_format() {
        let mut draft = standup();
        draft.set_field(AppointmentField::SchedulerEmail, "not-an-email");
        assert_eq!(
            draft.validate(now()),
            Err(ValidationError::InvalidEmail("Scheduler Email"))
        );

        let mut draft = standup();
        draft.set_field(AppointmentField::StartAt, "tomorrow");
        assert_eq!(
            draft.validate(now()),
            Err(ValidationError::InvalidDateTime("Start Date"))
        );
    }

    #[test]
    fn empty_selection_clears_participants() {
        let mut draft = standup();
        draft.set_participants(Vec::new());
        assert!(draft.participants.is_empty());
        draft.reset();
        assert_eq!(draft, AppointmentDraft::default());
    }
}

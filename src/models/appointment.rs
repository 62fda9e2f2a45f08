use serde::{Deserialize, Serialize};

use super::EntityId;

/// Participant as embedded in an appointment listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParticipantRef {
    pub id: EntityId,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Appointment {
    pub id: EntityId,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub scheduler_name: String,
    #[serde(default)]
    pub scheduler_email: String,
    #[serde(default)]
    pub start_at: String,
    #[serde(default)]
    pub end_at: String,
    #[serde(default, deserialize_with = "super::null_as_empty")]
    pub participants: Vec<ParticipantRef>,
}

/// `GET /appointments` body. A missing or `null` key decodes to an empty list.
#[derive(Debug, Default, Deserialize)]
pub struct AppointmentList {
    #[serde(default, deserialize_with = "super::null_as_empty")]
    pub appointments: Vec<Appointment>,
}

/// Body of `POST /appointments` and of the update call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppointmentPayload {
    pub title: String,
    pub description: String,
    pub scheduler_name: String,
    pub scheduler_email: String,
    pub participants: Vec<EntityId>,
    pub start_at: String,
    pub end_at: String,
}

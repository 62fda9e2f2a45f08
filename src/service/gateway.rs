use async_trait::async_trait;

use crate::error::GatewayError;
use crate::models::{Appointment, AppointmentPayload, EntityId, Participant, ParticipantPayload};

/// Backend collections the client talks to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resource {
    Appointments,
    Participants,
}

impl Resource {
    pub fn path(&self) -> &'static str {
        match self {
            Resource::Appointments => "appointments",
            Resource::Participants => "participants",
        }
    }

    /// Key wrapping a single entity in a create/update response.
    pub fn singular(&self) -> &'static str {
        match self {
            Resource::Appointments => "appointment",
            Resource::Participants => "participant",
        }
    }
}

/// The only component allowed to issue backend requests.
///
/// Create and update return `None` when the backend answers 2xx without an entity body;
/// callers refetch the collection either way.
#[async_trait]
pub trait Gateway: Send + Sync {
    async fn list_appointments(&self) -> Result<Vec<Appointment>, GatewayError>;
    async fn create_appointment(
        &self,
        payload: &AppointmentPayload,
    ) -> Result<Option<Appointment>, GatewayError>;
    async fn update_appointment(
        &self,
        id: EntityId,
        payload: &AppointmentPayload,
    ) -> Result<Option<Appointment>, GatewayError>;
    async fn delete_appointment(&self, id: EntityId) -> Result<(), GatewayError>;

    async fn list_participants(&self) -> Result<Vec<Participant>, GatewayError>;
    async fn create_participant(
        &self,
        payload: &ParticipantPayload,
    ) -> Result<Option<Participant>, GatewayError>;
    async fn delete_participant(&self, id: EntityId) -> Result<(), GatewayError>;
}

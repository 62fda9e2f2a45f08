#![allow(dead_code)]

use std::sync::Mutex;

use appointmentDesk::error::GatewayError;
use appointmentDesk::models::{
    Appointment, AppointmentPayload, EntityId, Participant, ParticipantPayload, ParticipantRef,
};
use appointmentDesk::service::gateway::Gateway;
use appointmentDesk::service::prompter::Prompter;
use async_trait::async_trait;
use chrono::{NaiveDate, NaiveDateTime};

#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    ListAppointments,
    CreateAppointment(AppointmentPayload),
    UpdateAppointment(EntityId, AppointmentPayload),
    DeleteAppointment(EntityId),
    ListParticipants,
    CreateParticipant(ParticipantPayload),
    DeleteParticipant(EntityId),
}

/// In-memory backend that records every call.
#[derive(Default)]
pub struct FakeGateway {
    pub calls: Mutex<Vec<Call>>,
    pub appointments: Mutex<Vec<Appointment>>,
    pub participants: Mutex<Vec<Participant>>,
    /// Returned by the next mutation instead of applying it.
    pub fail_mutation: Mutex<Option<GatewayError>>,
    /// Returned by every list call while set.
    pub fail_lists: Mutex<Option<GatewayError>>,
}

impl FakeGateway {
    pub fn with_participants(participants: Vec<Participant>) -> Self {
        let gateway = Self::default();
        *gateway.participants.lock().unwrap() = participants;
        gateway
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    pub fn fail_next_mutation(&self, err: GatewayError) {
        *self.fail_mutation.lock().unwrap() = Some(err);
    }

    fn record(&self, call: Call) {
        self.calls.lock().unwrap().push(call);
    }

    fn take_failure(&self) -> Result<(), GatewayError> {
        match self.fail_mutation.lock().unwrap().take() {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }

    fn list_failure(&self) -> Result<(), GatewayError> {
        match self.fail_lists.lock().unwrap().clone() {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }

    fn to_appointment(&self, id: EntityId, payload: &AppointmentPayload) -> Appointment {
        let participants = self.participants.lock().unwrap();
        Appointment {
            id,
            title: payload.title.clone(),
            description: payload.description.clone(),
            scheduler_name: payload.scheduler_name.clone(),
            scheduler_email: payload.scheduler_email.clone(),
            start_at: format!("{}:00", payload.start_at),
            end_at: format!("{}:00", payload.end_at),
            participants: payload
                .participants
                .iter()
                .filter_map(|pid| participants.iter().find(|p| p.id == *pid))
                .map(|p| ParticipantRef {
                    id: p.id,
                    name: p.name.clone(),
                    email: p.email.clone(),
                })
                .collect(),
        }
    }
}

#[async_trait]
impl Gateway for FakeGateway {
    async fn list_appointments(&self) -> Result<Vec<Appointment>, GatewayError> {
        self.record(Call::ListAppointments);
        self.list_failure()?;
        Ok(self.appointments.lock().unwrap().clone())
    }

    async fn create_appointment(
        &self,
        payload: &AppointmentPayload,
    ) -> Result<Option<Appointment>, GatewayError> {
        self.record(Call::CreateAppointment(payload.clone()));
        self.take_failure()?;
        let id = self.appointments.lock().unwrap().len() as EntityId + 1;
        let appointment = self.to_appointment(id, payload);
        self.appointments.lock().unwrap().push(appointment.clone());
        Ok(Some(appointment))
    }

    async fn update_appointment(
        &self,
        id: EntityId,
        payload: &AppointmentPayload,
    ) -> Result<Option<Appointment>, GatewayError> {
        self.record(Call::UpdateAppointment(id, payload.clone()));
        self.take_failure()?;
        let updated = self.to_appointment(id, payload);
        let mut appointments = self.appointments.lock().unwrap();
        if let Some(existing) = appointments.iter_mut().find(|a| a.id == id) {
            *existing = updated.clone();
        }
        Ok(Some(updated))
    }

    async fn delete_appointment(&self, id: EntityId) -> Result<(), GatewayError> {
        self.record(Call::DeleteAppointment(id));
        self.take_failure()?;
        self.appointments.lock().unwrap().retain(|a| a.id != id);
        Ok(())
    }

    async fn list_participants(&self) -> Result<Vec<Participant>, GatewayError> {
        self.record(Call::ListParticipants);
        self.list_failure()?;
        Ok(self.participants.lock().unwrap().clone())
    }

    async fn create_participant(
        &self,
        payload: &ParticipantPayload,
    ) -> Result<Option<Participant>, GatewayError> {
        self.record(Call::CreateParticipant(payload.clone()));
        self.take_failure()?;
        let mut participants = self.participants.lock().unwrap();
        let participant = Participant {
            id: participants.len() as EntityId + 1,
            name: payload.name.clone(),
            email: payload.email.clone(),
            created_at: "2030-01-01 00:00:00".to_string(),
        };
        participants.push(participant.clone());
        Ok(Some(participant))
    }

    async fn delete_participant(&self, id: EntityId) -> Result<(), GatewayError> {
        self.record(Call::DeleteParticipant(id));
        self.take_failure()?;
        self.participants.lock().unwrap().retain(|p| p.id != id);
        Ok(())
    }
}

/// Answers confirmations with a fixed value and keeps every message it was shown.
pub struct ScriptedPrompter {
    answer: bool,
    pub confirms: Mutex<Vec<String>>,
    pub alerts: Mutex<Vec<String>>,
}

impl ScriptedPrompter {
    pub fn answering(answer: bool) -> Self {
        Self {
            answer,
            confirms: Mutex::new(Vec::new()),
            alerts: Mutex::new(Vec::new()),
        }
    }

    pub fn alerts(&self) -> Vec<String> {
        self.alerts.lock().unwrap().clone()
    }

    pub fn confirms(&self) -> Vec<String> {
        self.confirms.lock().unwrap().clone()
    }
}

#[async_trait]
impl Prompter for ScriptedPrompter {
    async fn confirm(&self, message: &str) -> bool {
        self.confirms.lock().unwrap().push(message.to_string());
        self.answer
    }

    async fn alert(&self, message: &str) {
        self.alerts.lock().unwrap().push(message.to_string());
    }
}

pub fn participant(id: EntityId, name: &str) -> Participant {
    Participant {
        id,
        name: name.to_string(),
        email: format!("{}@x.com", name.to_lowercase()),
        created_at: "2029-06-01 08:00:00".to_string(),
    }
}

pub fn before_standup() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2029, 12, 31)
        .unwrap()
        .and_hms_opt(8, 0, 0)
        .unwrap()
}

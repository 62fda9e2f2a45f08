use tracing::{debug, info};

use super::DeleteOutcome;
use crate::app::Route;
use crate::controllers::{CloseReason, Drawer, ListView, Row, SubmitTicket};
use crate::error::{GatewayError, SubmitError};
use crate::forms::{ParticipantDraft, ParticipantField};
use crate::models::{EntityId, Participant, ParticipantPayload};
use crate::render;
use crate::service::gateway::Gateway;
use crate::service::prompter::Prompter;

/// Participant listing with its create panel.
#[derive(Debug, Default)]
pub struct ParticipantsPage {
    list: ListView<Participant>,
    drawer: Drawer<ParticipantDraft>,
}

impl ParticipantsPage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn list(&self) -> &ListView<Participant> {
        &self.list
    }

    pub fn drawer(&self) -> &Drawer<ParticipantDraft> {
        &self.drawer
    }

    pub async fn load(&mut self, gateway: &dyn Gateway) -> Result<(), GatewayError> {
        self.list.load(gateway.list_participants()).await
    }

    /// Reload after a mutation. A failure is already recorded on the list view.
    async fn refetch(&mut self, gateway: &dyn Gateway) {
        if let Err(err) = self.load(gateway).await {
            debug!(error = %err, "refetch after mutation failed");
        }
    }

    pub fn open_create(&mut self) {
        self.drawer.open_create();
    }

    pub fn set_field(&mut self, field: ParticipantField, value: impl Into<String>) -> bool {
        match self.drawer.draft_mut() {
            Some(draft) => {
                draft.set_field(field, value);
                true
            }
            None => false,
        }
    }

    pub fn close(&mut self, reason: CloseReason) {
        self.drawer.close(reason);
    }

    pub fn prepare_submit(&mut self) -> Result<(SubmitTicket, ParticipantPayload), SubmitError> {
        let Some(ticket) = self.drawer.begin_submit() else {
            return Err(if self.drawer.is_open() {
                SubmitError::InFlight
            } else {
                SubmitError::NotOpen
            });
        };
        if let Err(err) = self.drawer.draft().validate() {
            self.drawer.finish_submit(&ticket);
            self.drawer.set_error(err.to_string());
            return Err(err.into());
        }
        Ok((ticket, self.drawer.draft().to_payload()))
    }

    pub async fn complete_submit(
        &mut self,
        gateway: &dyn Gateway,
        ticket: SubmitTicket,
        result: Result<Option<Participant>, GatewayError>,
    ) -> Result<Option<Route>, SubmitError> {
        let current = self.drawer.finish_submit(&ticket);
        match result {
            Ok(saved) => {
                info!(id = ?saved.map(|p| p.id), "participant created");
                if current {
                    self.drawer.close(CloseReason::Submitted);
                }
                self.refetch(gateway).await;
                Ok(current.then_some(Route::Participants))
            }
            Err(err) => {
                if current {
                    self.drawer.set_error(err.to_string());
                } else {
                    debug!(error = %err, "discarding failure for a closed panel");
                }
                Err(err.into())
            }
        }
    }

    pub async fn submit(&mut self, gateway: &dyn Gateway) -> Result<Option<Route>, SubmitError> {
        let (ticket, payload) = self.prepare_submit()?;
        let result = gateway.create_participant(&payload).await;
        self.complete_submit(gateway, ticket, result).await
    }

    pub async fn remove(
        &mut self,
        gateway: &dyn Gateway,
        prompter: &dyn Prompter,
        id: EntityId,
    ) -> Result<DeleteOutcome, GatewayError> {
        let message = match self.list.find(id) {
            Some(row) => format!(
                "Are you sure you want to delete this participant \"{}\"?",
                row.display_name()
            ),
            None => format!("Are you sure you want to delete participant #{id}?"),
        };
        if !prompter.confirm(&message).await {
            return Ok(DeleteOutcome::Declined);
        }
        if let Err(err) = gateway.delete_participant(id).await {
            prompter.alert(&err.to_string()).await;
            return Err(err);
        }
        info!(id, "participant deleted");
        self.refetch(gateway).await;
        Ok(DeleteOutcome::Deleted)
    }

    pub fn render(&self) -> String {
        render::participants_view(&self.list)
    }
}

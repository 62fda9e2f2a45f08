use chrono::NaiveDateTime;
use tracing::{debug, info, warn};

use super::DeleteOutcome;
use crate::app::Route;
use crate::controllers::{CloseReason, Drawer, ListView, PanelMode, Row, SubmitTicket};
use crate::error::{GatewayError, SubmitError};
use crate::forms::multi_select::{self, SelectOption};
use crate::forms::{AppointmentDraft, AppointmentField};
use crate::models::{Appointment, AppointmentPayload, EntityId};
use crate::render;
use crate::service::gateway::Gateway;
use crate::service::prompter::Prompter;

const PARTICIPANTS_LOAD_FAILED: &str = "Failed to load participants.";

/// Appointment listing with its create/update panel.
#[derive(Debug, Default)]
pub struct AppointmentsPage {
    list: ListView<Appointment>,
    drawer: Drawer<AppointmentDraft>,
    options: Vec<SelectOption>,
    options_loading: bool,
}

impl AppointmentsPage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn list(&self) -> &ListView<Appointment> {
        &self.list
    }

    pub fn drawer(&self) -> &Drawer<AppointmentDraft> {
        &self.drawer
    }

    pub fn options(&self) -> &[SelectOption] {
        &self.options
    }

    pub fn options_loading(&self) -> bool {
        self.options_loading
    }

    /// Widget value for the current draft.
    pub fn selected_options(&self) -> Vec<SelectOption> {
        multi_select::selected_options(&self.drawer.draft().participants, &self.options)
    }

    pub async fn load(&mut self, gateway: &dyn Gateway) -> Result<(), GatewayError> {
        self.list.load(gateway.list_appointments()).await
    }

    /// Reload after a mutation. A failure is already recorded on the list view.
    async fn refetch(&mut self, gateway: &dyn Gateway) {
        if let Err(err) = self.load(gateway).await {
            debug!(error = %err, "refetch after mutation failed");
        }
    }

    pub async fn open_create(&mut self, gateway: &dyn Gateway) {
        self.drawer.open_create();
        self.load_options(gateway).await;
    }

    /// Opens the panel pre-filled from a listed appointment. `false` if it is not listed.
    pub async fn open_update(&mut self, gateway: &dyn Gateway, id: EntityId) -> bool {
        let Some(appointment) = self.list.find(id) else {
            warn!(id, "update requested for an appointment that is not listed");
            return false;
        };
        let draft = AppointmentDraft::from_appointment(appointment);
        self.drawer.open_update(id, draft);
        self.load_options(gateway).await;
        true
    }

    async fn load_options(&mut self, gateway: &dyn Gateway) {
        self.options.clear();
        self.options_loading = true;
        match gateway.list_participants().await {
            Ok(participants) => {
                self.options = multi_select::to_options(&participants);
            }
            Err(err) => {
                warn!(error = %err, "participant options unavailable");
                self.drawer.set_error(PARTICIPANTS_LOAD_FAILED);
            }
        }
        self.options_loading = false;
    }

    /// Returns `false` when the panel is closed and the edit was dropped.
    pub fn set_field(&mut self, field: AppointmentField, value: impl Into<String>) -> bool {
        match self.drawer.draft_mut() {
            Some(draft) => {
                draft.set_field(field, value);
                true
            }
            None => false,
        }
    }

    pub fn set_participants(&mut self, selection: Option<&[SelectOption]>) -> bool {
        match self.drawer.draft_mut() {
            Some(draft) => {
                draft.set_participants(multi_select::on_selection_change(selection));
                true
            }
            None => false,
        }
    }

    /// Sets participant ids directly, bypassing the widget.
    pub fn set_participant_ids(&mut self, ids: Vec<EntityId>) -> bool {
        match self.drawer.draft_mut() {
            Some(draft) => {
                draft.set_participants(ids);
                true
            }
            None => false,
        }
    }

    pub fn close(&mut self, reason: CloseReason) {
        self.drawer.close(reason);
    }

    /// Validates the draft and claims the submit control.
    pub fn prepare_submit(
        &mut self,
        now: NaiveDateTime,
    ) -> Result<(SubmitTicket, AppointmentPayload), SubmitError> {
        let Some(ticket) = self.drawer.begin_submit() else {
            return Err(if self.drawer.is_open() {
                SubmitError::InFlight
            } else {
                SubmitError::NotOpen
            });
        };
        if let Err(err) = self.drawer.draft().validate(now) {
            self.drawer.finish_submit(&ticket);
            self.drawer.set_error(err.to_string());
            return Err(err.into());
        }
        Ok((ticket, self.drawer.draft().to_payload()))
    }

    /// Applies the mutation result. On success the panel closes and the collection is
    /// refetched before the navigation target is returned. A result for a panel that was
    /// closed in the meantime never touches the panel.
    pub async fn complete_submit(
        &mut self,
        gateway: &dyn Gateway,
        ticket: SubmitTicket,
        result: Result<Option<Appointment>, GatewayError>,
    ) -> Result<Option<Route>, SubmitError> {
        let current = self.drawer.finish_submit(&ticket);
        match result {
            Ok(saved) => {
                info!(mode = ?ticket.mode(), id = ?saved.map(|a| a.id), "appointment saved");
                if current {
                    self.drawer.close(CloseReason::Submitted);
                }
                self.refetch(gateway).await;
                Ok(current.then_some(Route::Appointments))
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

    pub async fn submit(
        &mut self,
        gateway: &dyn Gateway,
        now: NaiveDateTime,
    ) -> Result<Option<Route>, SubmitError> {
        let (ticket, payload) = self.prepare_submit(now)?;
        let result = match ticket.mode() {
            PanelMode::Create => gateway.create_appointment(&payload).await,
            PanelMode::Update(id) => gateway.update_appointment(id, &payload).await,
        };
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
                "Are you sure you want to delete this appointment \"{}\"?",
                row.display_name()
            ),
            None => format!("Are you sure you want to delete appointment #{id}?"),
        };
        if !prompter.confirm(&message).await {
            return Ok(DeleteOutcome::Declined);
        }
        if let Err(err) = gateway.delete_appointment(id).await {
            prompter.alert(&err.to_string()).await;
            return Err(err);
        }
        info!(id, "appointment deleted");
        self.refetch(gateway).await;
        Ok(DeleteOutcome::Deleted)
    }

    pub fn render(&self) -> String {
        render::appointments_view(&self.list)
    }
}

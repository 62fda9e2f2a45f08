use std::sync::Arc;

use chrono::NaiveDateTime;
use chrono_tz::Tz;
use tracing::info;

use crate::clock;
use crate::error::{GatewayError, SubmitError};
use crate::models::EntityId;
use crate::pages::{AppointmentsPage, DeleteOutcome, ParticipantsPage};
use crate::render;
use crate::service::gateway::Gateway;
use crate::service::prompter::Prompter;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    Home,
    Appointments,
    Participants,
}

impl Route {
    pub fn path(&self) -> &'static str {
        match self {
            Route::Home => "/",
            Route::Appointments => "/appointments",
            Route::Participants => "/participants",
        }
    }
}

/// Owns the current route and both pages. Entering a page mounts it afresh and fetches
/// its collection; nothing is cached across navigations.
pub struct App {
    gateway: Arc<dyn Gateway>,
    prompter: Arc<dyn Prompter>,
    timezone: Tz,
    route: Route,
    appointments: AppointmentsPage,
    participants: ParticipantsPage,
}

impl App {
    pub fn new(gateway: Arc<dyn Gateway>, prompter: Arc<dyn Prompter>, timezone: Tz) -> Self {
        Self {
            gateway,
            prompter,
            timezone,
            route: Route::Home,
            appointments: AppointmentsPage::new(),
            participants: ParticipantsPage::new(),
        }
    }

    pub fn route(&self) -> Route {
        self.route
    }

    pub fn now(&self) -> NaiveDateTime {
        clock::local_now(self.timezone)
    }

    pub fn gateway(&self) -> &dyn Gateway {
        self.gateway.as_ref()
    }

    pub fn appointments(&self) -> &AppointmentsPage {
        &self.appointments
    }

    pub fn appointments_mut(&mut self) -> &mut AppointmentsPage {
        &mut self.appointments
    }

    pub fn participants(&self) -> &ParticipantsPage {
        &self.participants
    }

    pub fn participants_mut(&mut self) -> &mut ParticipantsPage {
        &mut self.participants
    }

    /// Switches route. Navigating to the current route keeps the mounted page.
    pub async fn navigate(&mut self, route: Route) {
        if route == self.route {
            return;
        }
        info!(path = route.path(), "navigate");
        self.route = route;
        match route {
            Route::Home => {}
            Route::Appointments => {
                self.appointments = AppointmentsPage::new();
                let _ = self.appointments.load(self.gateway.as_ref()).await;
            }
            Route::Participants => {
                self.participants = ParticipantsPage::new();
                let _ = self.participants.load(self.gateway.as_ref()).await;
            }
        }
    }

    /// Refetches the collection of the current page.
    pub async fn refresh(&mut self) {
        let gateway = self.gateway.as_ref();
        match self.route {
            Route::Home => {}
            Route::Appointments => {
                let _ = self.appointments.load(gateway).await;
            }
            Route::Participants => {
                let _ = self.participants.load(gateway).await;
            }
        }
    }

    pub async fn open_create_appointment(&mut self) {
        self.appointments.open_create(self.gateway.as_ref()).await;
    }

    pub async fn open_update_appointment(&mut self, id: EntityId) -> bool {
        self.appointments
            .open_update(self.gateway.as_ref(), id)
            .await
    }

    pub async fn submit_appointment(&mut self) -> Result<(), SubmitError> {
        let now = self.now();
        let target = self.appointments.submit(self.gateway.as_ref(), now).await?;
        if let Some(route) = target {
            self.navigate(route).await;
        }
        Ok(())
    }

    pub async fn submit_participant(&mut self) -> Result<(), SubmitError> {
        let target = self.participants.submit(self.gateway.as_ref()).await?;
        if let Some(route) = target {
            self.navigate(route).await;
        }
        Ok(())
    }

    pub async fn delete_appointment(&mut self, id: EntityId) -> Result<DeleteOutcome, GatewayError> {
        self.appointments
            .remove(self.gateway.as_ref(), self.prompter.as_ref(), id)
            .await
    }

    pub async fn delete_participant(&mut self, id: EntityId) -> Result<DeleteOutcome, GatewayError> {
        self.participants
            .remove(self.gateway.as_ref(), self.prompter.as_ref(), id)
            .await
    }

    pub fn render(&self) -> String {
        match self.route {
            Route::Home => render::dashboard(),
            Route::Appointments => self.appointments.render(),
            Route::Participants => self.participants.render(),
        }
    }
}

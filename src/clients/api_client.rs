use async_trait::async_trait;
use reqwest::{Method, RequestBuilder};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{debug, warn};

use crate::config::{Settings, UpdateMethod};
use crate::error::GatewayError;
use crate::models::{
    Appointment, AppointmentList, AppointmentPayload, EntityId, Participant, ParticipantList,
    ParticipantPayload,
};
use crate::service::gateway::{Gateway, Resource};

#[derive(Debug, Deserialize)]
struct ErrorBody {
    message: Option<String>,
}

/// `reqwest`-backed gateway. All URLs are built from the configured base URL.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
    update_method: UpdateMethod,
}

impl ApiClient {
    pub fn new(settings: &Settings) -> Result<Self, GatewayError> {
        let http = reqwest::Client::builder()
            .timeout(settings.request_timeout)
            .build()
            .map_err(|err| GatewayError::Network(format!("Failed to build HTTP client: {err}")))?;
        Ok(Self {
            http,
            base_url: settings.api_url.trim_end_matches('/').to_string(),
            update_method: settings.update_method,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, resource: Resource, id: Option<EntityId>) -> String {
        match id {
            Some(id) => format!("{}/{}/{}", self.base_url, resource.path(), id),
            None => format!("{}/{}", self.base_url, resource.path()),
        }
    }

    fn request(&self, method: Method, url: &str) -> RequestBuilder {
        debug!(%method, url, "backend request");
        self.http
            .request(method, url)
            .header("Content-Type", "application/json")
            .header("Accept", "application/json")
    }

    /// Sends the request and returns the body of a 2xx response.
    async fn execute(&self, request: RequestBuilder, fallback: &str) -> Result<String, GatewayError> {
        let response = request.send().await.map_err(|err| {
            warn!(error = %err, "request did not complete");
            GatewayError::Network(fallback.to_string())
        })?;

        let status = response.status();
        let text = response.text().await.map_err(|err| {
            warn!(error = %err, %status, "failed to read response body");
            GatewayError::Network(fallback.to_string())
        })?;

        if !status.is_success() {
            let message = error_message(&text).unwrap_or_else(|| fallback.to_string());
            warn!(%status, reason = %message, "backend rejected request");
            return Err(GatewayError::Http {
                status: status.as_u16(),
                message,
            });
        }
        Ok(text)
    }

    async fn list<T: DeserializeOwned + Default>(
        &self,
        resource: Resource,
        fallback: &str,
    ) -> Result<T, GatewayError> {
        let url = self.url(resource, None);
        let text = self.execute(self.request(Method::GET, &url), fallback).await?;
        if text.trim().is_empty() {
            return Ok(T::default());
        }
        serde_json::from_str(&text).map_err(|err| {
            warn!(error = %err, url, "undecodable list response");
            GatewayError::Decode(err.to_string())
        })
    }

    async fn send<B, T>(
        &self,
        method: Method,
        resource: Resource,
        id: Option<EntityId>,
        body: &B,
        fallback: &str,
    ) -> Result<Option<T>, GatewayError>
    where
        B: serde::Serialize + ?Sized + Sync,
        T: DeserializeOwned,
    {
        let url = self.url(resource, id);
        let text = self
            .execute(self.request(method, &url).json(body), fallback)
            .await?;
        Ok(decode_entity(&text, resource.singular()))
    }

    async fn delete(&self, resource: Resource, id: EntityId, fallback: &str) -> Result<(), GatewayError> {
        let url = self.url(resource, Some(id));
        self.execute(self.request(Method::DELETE, &url), fallback)
            .await
            .map(|_| ())
    }
}

fn error_message(body: &str) -> Option<String> {
    serde_json::from_str::<ErrorBody>(body)
        .ok()
        .and_then(|parsed| parsed.message)
        .map(|message| message.trim().to_string())
        .filter(|message| !message.is_empty())
}

/// Accepts either the bare entity or `{"<singular>": {...}}`.
fn decode_entity<T: DeserializeOwned>(body: &str, key: &str) -> Option<T> {
    if body.trim().is_empty() {
        return None;
    }
    let value: Value = serde_json::from_str(body).ok()?;
    let inner = match value.get(key) {
        Some(inner) if inner.is_object() => inner.clone(),
        _ => value,
    };
    match serde_json::from_value(inner) {
        Ok(entity) => Some(entity),
        Err(err) => {
            debug!(error = %err, "mutation response carried no entity");
            None
        }
    }
}

#[async_trait]
impl Gateway for ApiClient {
    async fn list_appointments(&self) -> Result<Vec<Appointment>, GatewayError> {
        let list: AppointmentList = self
            .list(Resource::Appointments, "Failed to load appointments.")
            .await?;
        Ok(list.appointments)
    }

    async fn create_appointment(
        &self,
        payload: &AppointmentPayload,
    ) -> Result<Option<Appointment>, GatewayError> {
        self.send(
            Method::POST,
            Resource::Appointments,
            None,
            payload,
            "Failed to create appointment.",
        )
        .await
    }

    async fn update_appointment(
        &self,
        id: EntityId,
        payload: &AppointmentPayload,
    ) -> Result<Option<Appointment>, GatewayError> {
        let method = match self.update_method {
            UpdateMethod::Put => Method::PUT,
            UpdateMethod::Patch => Method::PATCH,
        };
        self.send(
            method,
            Resource::Appointments,
            Some(id),
            payload,
            "Failed to update appointment.",
        )
        .await
    }

    async fn delete_appointment(&self, id: EntityId) -> Result<(), GatewayError> {
        self.delete(Resource::Appointments, id, "Failed to delete appointment.")
            .await
    }

    async fn list_participants(&self) -> Result<Vec<Participant>, GatewayError> {
        let list: ParticipantList = self
            .list(Resource::Participants, "Failed to load participants.")
            .await?;
        Ok(list.participants)
    }

    async fn create_participant(
        &self,
        payload: &ParticipantPayload,
    ) -> Result<Option<Participant>, GatewayError> {
        self.send(
            Method::POST,
            Resource::Participants,
            None,
            payload,
            "Failed to create participant.",
        )
        .await
    }

    async fn delete_participant(&self, id: EntityId) -> Result<(), GatewayError> {
        self.delete(Resource::Participants, id, "Failed to delete participant.")
            .await
    }
}

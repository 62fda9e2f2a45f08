use std::future::Future;

use tracing::{info, warn};

use crate::error::GatewayError;
use crate::models::{Appointment, EntityId, Participant};

/// Rows that can be looked up and named in a confirmation prompt.
pub trait Row {
    fn id(&self) -> EntityId;
    fn display_name(&self) -> &str;
}

impl Row for Appointment {
    fn id(&self) -> EntityId {
        self.id
    }

    fn display_name(&self) -> &str {
        &self.title
    }
}

impl Row for Participant {
    fn id(&self) -> EntityId {
        self.id
    }

    fn display_name(&self) -> &str {
        &self.name
    }
}

/// Fetched collection plus its loading flag and last error.
#[derive(Debug)]
pub struct ListView<T> {
    rows: Vec<T>,
    loading: bool,
    error: Option<String>,
}

impl<T> Default for ListView<T> {
    fn default() -> Self {
        Self {
            rows: Vec::new(),
            loading: false,
            error: None,
        }
    }
}

impl<T: Row> ListView<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn rows(&self) -> &[T] {
        &self.rows
    }

    pub fn find(&self, id: EntityId) -> Option<&T> {
        self.rows.iter().find(|row| row.id() == id)
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn set_error(&mut self, message: impl Into<String>) {
        self.error = Some(message.into());
    }

    /// Runs `fetch` and replaces the rows wholesale on success. On failure the previous
    /// rows stay and the error is recorded. `loading` is false again either way.
    pub async fn load<F>(&mut self, fetch: F) -> Result<(), GatewayError>
    where
        F: Future<Output = Result<Vec<T>, GatewayError>>,
    {
        self.loading = true;
        let result = fetch.await;
        self.loading = false;
        match result {
            Ok(rows) => {
                info!(count = rows.len(), "collection refreshed");
                self.rows = rows;
                self.error = None;
                Ok(())
            }
            Err(err) => {
                warn!(error = %err, "collection refresh failed");
                self.error = Some(err.to_string());
                Err(err)
            }
        }
    }
}

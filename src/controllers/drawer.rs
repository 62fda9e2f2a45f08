use tracing::debug;

use crate::models::EntityId;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PanelMode {
    Create,
    Update(EntityId),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PanelState {
    #[default]
    Closed,
    Open(PanelMode),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CloseReason {
    Cancel,
    Backdrop,
    Submitted,
}

/// Proof that a submission started against a particular opening of the panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SubmitTicket {
    generation: u64,
    mode: PanelMode,
}

impl SubmitTicket {
    pub fn mode(&self) -> PanelMode {
        self.mode
    }
}

/// Side panel holding one form draft.
///
/// Every close resets the draft to `D::default()` and clears the error, so nothing from
/// one opening leaks into the next. The generation counter lets a response that arrives
/// after the panel was closed be recognised and dropped.
#[derive(Debug, Default)]
pub struct Drawer<D> {
    state: PanelState,
    draft: D,
    error: Option<String>,
    submitting: bool,
    generation: u64,
}

impl<D: Default> Drawer<D> {
    pub fn new() -> Self {
        Self {
            state: PanelState::Closed,
            draft: D::default(),
            error: None,
            submitting: false,
            generation: 0,
        }
    }

    pub fn state(&self) -> PanelState {
        self.state
    }

    pub fn is_open(&self) -> bool {
        matches!(self.state, PanelState::Open(_))
    }

    pub fn mode(&self) -> Option<PanelMode> {
        match self.state {
            PanelState::Open(mode) => Some(mode),
            PanelState::Closed => None,
        }
    }

    pub fn draft(&self) -> &D {
        &self.draft
    }

    /// Mutable draft access; `None` while closed so late edits cannot land on a reset draft.
    pub fn draft_mut(&mut self) -> Option<&mut D> {
        if self.is_open() { Some(&mut self.draft) } else { None }
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn is_submitting(&self) -> bool {
        self.submitting
    }

    pub fn open_create(&mut self) {
        self.open(PanelMode::Create, D::default());
    }

    pub fn open_update(&mut self, id: EntityId, draft: D) {
        self.open(PanelMode::Update(id), draft);
    }

    fn open(&mut self, mode: PanelMode, draft: D) {
        self.generation += 1;
        self.state = PanelState::Open(mode);
        self.draft = draft;
        self.error = None;
        self.submitting = false;
        debug!(?mode, generation = self.generation, "panel opened");
    }

    pub fn close(&mut self, reason: CloseReason) {
        if self.is_open() {
            debug!(?reason, generation = self.generation, "panel closed");
        }
        self.generation += 1;
        self.state = PanelState::Closed;
        self.draft = D::default();
        self.error = None;
        self.submitting = false;
    }

    /// Shows `message` in the panel. Ignored while closed.
    pub fn set_error(&mut self, message: impl Into<String>) {
        if self.is_open() {
            self.error = Some(message.into());
        }
    }

    pub fn clear_error(&mut self) {
        self.error = None;
    }

    /// Starts a submission. `None` while closed or while another submission is running,
    /// which is the disabled submit button.
    pub fn begin_submit(&mut self) -> Option<SubmitTicket> {
        let PanelState::Open(mode) = self.state else {
            return None;
        };
        if self.submitting {
            return None;
        }
        self.submitting = true;
        self.error = None;
        Some(SubmitTicket {
            generation: self.generation,
            mode,
        })
    }

    /// Whether `ticket` still belongs to the current opening.
    pub fn is_current(&self, ticket: &SubmitTicket) -> bool {
        self.is_open() && ticket.generation == self.generation
    }

    /// Ends a submission. Returns `false` for a stale ticket, which callers drop silently.
    pub fn finish_submit(&mut self, ticket: &SubmitTicket) -> bool {
        if !self.is_current(ticket) {
            debug!("dropping result for a panel that is no longer open");
            return false;
        }
        self.submitting = false;
        true
    }
}

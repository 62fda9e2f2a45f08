pub mod appointments;
pub mod participants;

pub use appointments::AppointmentsPage;
pub use participants::ParticipantsPage;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeleteOutcome {
    Declined,
    Deleted,
}

pub mod appointment;
pub mod participant;

use serde::{Deserialize, Deserializer};

pub use appointment::{Appointment, AppointmentList, AppointmentPayload, ParticipantRef};
pub use participant::{Participant, ParticipantList, ParticipantPayload};

/// Backend primary key.
pub type EntityId = u64;

/// Collections the backend may send as `null` or leave out; both decode to empty.
pub(crate) fn null_as_empty<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Ok(Option::<Vec<T>>::deserialize(deserializer)?.unwrap_or_default())
}

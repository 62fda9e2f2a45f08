use serde::{Deserialize, Serialize};

use super::EntityId;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Participant {
    pub id: EntityId,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default, alias = "createdAt")]
    pub created_at: String,
}

/// `GET /participants` body. A missing or `null` key decodes to an empty list.
#[derive(Debug, Default, Deserialize)]
pub struct ParticipantList {
    #[serde(default, deserialize_with = "super::null_as_empty")]
    pub participants: Vec<Participant>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParticipantPayload {
    pub name: String,
    pub email: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn null_or_missing_participants_are_empty() {
        for body in ["{}", r#"{"participants":null}"#] {
            let list: ParticipantList = serde_json::from_str(body).unwrap();
            assert!(list.participants.is_empty());
        }
    }

    #[test]
    fn accepts_camel_case_timestamp() {
        let participant: Participant =
            serde_json::from_str(r#"{"id":2,"name":"Bo","createdAt":"2030-01-01 08:00:00"}"#).unwrap();
        assert_eq!(participant.created_at, "2030-01-01 08:00:00");
        assert_eq!(participant.email, "");
    }
}

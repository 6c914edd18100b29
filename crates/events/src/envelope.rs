use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::Event;

/// Envelope for an event, carrying the metadata an audit consumer needs.
///
/// - `event_id` is a UUIDv7, so ids sort by emission time.
/// - `event_type` / `schema_version` are copied from the payload so consumers
///   can route without deserializing it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventEnvelope<E> {
    event_id: Uuid,
    event_type: String,
    schema_version: u32,
    payload: E,
}

impl<E: Event> EventEnvelope<E> {
    /// Wrap `payload` with a fresh event id.
    pub fn wrap(payload: E) -> Self {
        Self::with_id(Uuid::now_v7(), payload)
    }

    pub fn with_id(event_id: Uuid, payload: E) -> Self {
        Self {
            event_id,
            event_type: payload.event_type().to_string(),
            schema_version: payload.version(),
            payload,
        }
    }
}

impl<E> EventEnvelope<E> {
    pub fn event_id(&self) -> Uuid {
        self.event_id
    }

    pub fn event_type(&self) -> &str {
        &self.event_type
    }

    pub fn schema_version(&self) -> u32 {
        self.schema_version
    }

    pub fn payload(&self) -> &E {
        &self.payload
    }

    pub fn into_payload(self) -> E {
        self.payload
    }
}

//! Audit events emitted after committed role changes.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use rolegate_core::{RoleName, UserId};
use rolegate_events::{Event, EventBus, EventEnvelope};

/// Emitted when a new role is added to the catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoleCreated {
    pub role: RoleName,
    pub permissions: Vec<String>,
    pub occurred_at: DateTime<Utc>,
}

/// Emitted when a role is bound to a user through `assign_role`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoleAssigned {
    pub user_id: UserId,
    pub previous_role: Option<RoleName>,
    pub role: RoleName,
    pub occurred_at: DateTime<Utc>,
}

/// Emitted when an administrator changes a user's role.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserRoleChanged {
    pub actor_id: UserId,
    pub user_id: UserId,
    pub previous_role: Option<RoleName>,
    pub new_role: RoleName,
    pub occurred_at: DateTime<Utc>,
}

/// All access-control audit events.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum AccessEvent {
    RoleCreated(RoleCreated),
    RoleAssigned(RoleAssigned),
    UserRoleChanged(UserRoleChanged),
}

impl Event for AccessEvent {
    fn event_type(&self) -> &'static str {
        match self {
            AccessEvent::RoleCreated(_) => "access.role.created",
            AccessEvent::RoleAssigned(_) => "access.user.role_assigned",
            AccessEvent::UserRoleChanged(_) => "access.user.role_changed",
        }
    }

    fn version(&self) -> u32 {
        1
    }

    fn occurred_at(&self) -> DateTime<Utc> {
        match self {
            AccessEvent::RoleCreated(e) => e.occurred_at,
            AccessEvent::RoleAssigned(e) => e.occurred_at,
            AccessEvent::UserRoleChanged(e) => e.occurred_at,
        }
    }
}

/// Envelope type carried on the audit bus.
pub type AccessEnvelope = EventEnvelope<AccessEvent>;

/// Object-safe view of any `EventBus<AccessEnvelope>`.
///
/// Lets the service hold a bus without becoming generic over its error type.
pub trait AuditPublisher: Send + Sync {
    fn publish_event(&self, envelope: AccessEnvelope) -> Result<(), String>;
}

impl<B> AuditPublisher for B
where
    B: EventBus<AccessEnvelope>,
{
    fn publish_event(&self, envelope: AccessEnvelope) -> Result<(), String> {
        self.publish(envelope).map_err(|e| e.to_string())
    }
}

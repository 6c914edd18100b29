//! `rolegate-auth` — roles, users and the access-control service.
//!
//! This crate is intentionally decoupled from storage and transport: the
//! service talks to a [`RoleCatalog`] and a [`UserDirectory`] it is handed.

pub mod authorize;
pub mod catalog;
pub mod config;
pub mod directory;
pub mod events;
pub mod permissions;
pub mod roles;
pub mod service;
pub mod session;
pub mod user;

pub use authorize::{AccessExplanation, DenialKind, DenialReason, explain_access, permits};
pub use catalog::RoleCatalog;
pub use config::AccessControlConfig;
pub use directory::UserDirectory;
pub use events::{AccessEnvelope, AccessEvent, AuditPublisher, RoleAssigned, RoleCreated, UserRoleChanged};
pub use permissions::Permission;
pub use roles::Role;
pub use service::AccessControlService;
pub use session::Session;
pub use user::User;

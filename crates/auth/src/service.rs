//! Access-control service: role creation, assignment, permission checks and
//! administrator-gated role updates.

use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use chrono::Utc;
use tracing::{debug, info, instrument, warn};

use rolegate_core::{DomainError, DomainResult, Entity, RoleName, UserId};

use crate::authorize::{self, AccessExplanation};
use crate::events::{
    AccessEnvelope, AccessEvent, AuditPublisher, RoleAssigned, RoleCreated, UserRoleChanged,
};
use crate::{AccessControlConfig, Role, RoleCatalog, User, UserDirectory};

/// Orchestrates role transitions over an injected catalog and directory.
///
/// # Concurrency
///
/// Every mutating operation runs its whole read-check-mutate sequence under
/// the write half of `gate`; read operations take the read half. Two
/// concurrent demotions of the last two administrators therefore cannot both
/// pass the admin-count check.
///
/// The gate only serializes callers going through *this* service instance.
/// Other writers to the same storage must share the instance (or provide
/// their own transaction).
pub struct AccessControlService<C, D> {
    catalog: C,
    directory: D,
    config: AccessControlConfig,
    audit: Option<Arc<dyn AuditPublisher>>,
    gate: RwLock<()>,
}

impl<C, D> AccessControlService<C, D>
where
    C: RoleCatalog,
    D: UserDirectory,
{
    pub fn new(catalog: C, directory: D) -> Self {
        Self::with_config(catalog, directory, AccessControlConfig::default())
    }

    pub fn with_config(catalog: C, directory: D, config: AccessControlConfig) -> Self {
        Self {
            catalog,
            directory,
            config,
            audit: None,
            gate: RwLock::new(()),
        }
    }

    /// Publish an audit event for every committed change.
    pub fn with_audit_bus<B>(mut self, bus: B) -> Self
    where
        B: AuditPublisher + 'static,
    {
        self.audit = Some(Arc::new(bus));
        self
    }

    pub fn config(&self) -> &AccessControlConfig {
        &self.config
    }

    pub fn catalog(&self) -> &C {
        &self.catalog
    }

    pub fn directory(&self) -> &D {
        &self.directory
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Mutating operations
    // ─────────────────────────────────────────────────────────────────────────

    /// Add `role` to the catalog.
    ///
    /// Returns `Ok(false)` when a role with the same name (any casing) already
    /// exists; the existing role is left untouched.
    #[instrument(skip(self, role), fields(role = %role.name()))]
    pub fn create_role(&self, role: Role) -> DomainResult<bool> {
        let _guard = self.write_gate()?;

        if self.catalog.role_exists(role.name())? {
            debug!("role already exists");
            return Ok(false);
        }

        let event = RoleCreated {
            role: role.name().clone(),
            permissions: role.permissions().map(|p| p.as_str().to_string()).collect(),
            occurred_at: Utc::now(),
        };
        self.catalog.add_role(role)?;

        info!("role created");
        self.publish(AccessEvent::RoleCreated(event));
        Ok(true)
    }

    /// Bind a catalog role to a user (first-time assignment).
    ///
    /// - `InvalidArgument` for a blank `user_id`
    /// - `Ok(false)` if the role is not in the catalog (nothing changes)
    /// - `NotFound` if the user does not exist
    ///
    /// Not admin-gated and not subject to the last-admin rule.
    #[instrument(skip(self, role), fields(role = %role.name()))]
    pub fn assign_role(&self, user_id: &str, role: &Role) -> DomainResult<bool> {
        let user_id = UserId::new(user_id)?;
        let _guard = self.write_gate()?;

        let Some(role) = self.resolve_role(role.name())? else {
            debug!("role not in catalog");
            return Ok(false);
        };

        let mut user = self.directory.get_user(&user_id)?;
        let previous_role = user.assign_role(role.name().clone());
        self.directory.update_user(user)?;

        info!(user_id = %user_id, previous_role = ?previous_role, "role assigned");
        self.publish(AccessEvent::RoleAssigned(RoleAssigned {
            user_id,
            previous_role,
            role: role.name().clone(),
            occurred_at: Utc::now(),
        }));
        Ok(true)
    }

    /// Change `target_user_id`'s role on behalf of administrator `admin_id`.
    ///
    /// Checks run in this order, each with the previous ones satisfied:
    /// 1. actor exists (`NotFound`)
    /// 2. actor holds the admin role (`Unauthorized`)
    /// 3. `new_role` is in the catalog (`Ok(false)`)
    /// 4. target exists (`NotFound`)
    /// 5. a target holding the admin role is not the last one (`InvariantViolation`)
    #[instrument(skip(self, new_role), fields(new_role = %new_role.name()))]
    pub fn update_user_role(
        &self,
        admin_id: &str,
        target_user_id: &str,
        new_role: &Role,
    ) -> DomainResult<bool> {
        let admin_id = UserId::new(admin_id)?;
        let _guard = self.write_gate()?;

        let actor = self.directory.get_user(&admin_id)?;
        if !actor.holds_role(&self.config.admin_role) {
            let err = DomainError::unauthorized("only admins can update roles");
            warn!(
                actor = %admin_id,
                kind = err.kind(),
                "role update refused: actor is not an administrator"
            );
            return Err(err);
        }

        let Some(role) = self.resolve_role(new_role.name())? else {
            debug!("role not in catalog");
            return Ok(false);
        };

        let target_id = UserId::new(target_user_id)?;
        let mut target = self.directory.get_user(&target_id)?;

        if target.holds_role(&self.config.admin_role) {
            let admins = self.count_admins()?;
            if admins <= 1 {
                let err = DomainError::invariant("cannot demote the last remaining admin");
                warn!(
                    actor = %admin_id,
                    target = %target_id,
                    admins,
                    kind = err.kind(),
                    "role update refused: target is the last remaining admin"
                );
                return Err(err);
            }
        }

        let previous_role = target.assign_role(role.name().clone());
        self.directory.update_user(target)?;

        info!(
            actor = %admin_id,
            target = %target_id,
            previous_role = ?previous_role,
            "user role updated"
        );
        self.publish(AccessEvent::UserRoleChanged(UserRoleChanged {
            actor_id: admin_id,
            user_id: target_id,
            previous_role,
            new_role: role.name().clone(),
            occurred_at: Utc::now(),
        }));
        Ok(true)
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Read operations
    // ─────────────────────────────────────────────────────────────────────────

    /// Whether the user's role grants `feature` (case-insensitive).
    ///
    /// Permissions are read from the catalog at check time. A user with no
    /// role, or whose role has left the catalog, is simply denied.
    #[instrument(skip(self))]
    pub fn has_access(&self, user_id: &str, feature: &str) -> DomainResult<bool> {
        let (_, role) = self.load_for_check(user_id, feature)?;
        Ok(authorize::permits(role.as_ref(), feature))
    }

    /// Same checks as [`has_access`](Self::has_access), with the reasoning.
    pub fn explain_access(&self, user_id: &str, feature: &str) -> DomainResult<AccessExplanation> {
        let (user, role) = self.load_for_check(user_id, feature)?;
        Ok(authorize::explain_access(&user, role.as_ref(), feature))
    }

    /// Whether a role with this name exists in the catalog.
    pub fn is_role_valid(&self, role_name: &str) -> DomainResult<bool> {
        let name = RoleName::new(role_name)?;
        let _guard = self.read_gate()?;
        self.catalog.role_exists(&name)
    }

    /// The user's current role as it stands in the catalog, if any.
    pub fn user_role(&self, user_id: &str) -> DomainResult<Option<Role>> {
        let user_id = UserId::new(user_id)?;
        let _guard = self.read_gate()?;
        let user = self.directory.get_user(&user_id)?;
        self.role_of(&user)
    }

    /// Number of users currently holding the admin role.
    pub fn admin_count(&self) -> DomainResult<usize> {
        let _guard = self.read_gate()?;
        self.count_admins()
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Internals
    // ─────────────────────────────────────────────────────────────────────────

    /// Load the user and its catalog role under one read guard, so the pair
    /// is consistent with a single committed state.
    fn load_for_check(&self, user_id: &str, feature: &str) -> DomainResult<(User, Option<Role>)> {
        let user_id = UserId::new(user_id)?;
        if feature.trim().is_empty() {
            return Err(DomainError::invalid_argument("feature name cannot be empty"));
        }

        let _guard = self.read_gate()?;
        let user = self.directory.get_user(&user_id)?;
        let role = self.role_of(&user)?;
        Ok((user, role))
    }

    fn role_of(&self, user: &User) -> DomainResult<Option<Role>> {
        let Some(name) = user.role_name() else {
            return Ok(None);
        };
        let role = self.resolve_role(name)?;
        if role.is_none() {
            debug!(user_id = %user.id(), role = %name, "assigned role is not in the catalog");
        }
        Ok(role)
    }

    /// Catalog lookup where a missing role is a business outcome, not an error.
    fn resolve_role(&self, name: &RoleName) -> DomainResult<Option<Role>> {
        match self.catalog.get_role(name) {
            Ok(role) => Ok(Some(role)),
            Err(DomainError::NotFound(_)) => Ok(None),
            Err(e) => Err(e),
        }
    }

    fn count_admins(&self) -> DomainResult<usize> {
        Ok(self
            .directory
            .list_users()?
            .iter()
            .filter(|u| u.holds_role(&self.config.admin_role))
            .count())
    }

    fn publish(&self, event: AccessEvent) {
        let Some(audit) = &self.audit else {
            return;
        };
        let envelope = AccessEnvelope::wrap(event);
        let event_id = envelope.event_id();
        if let Err(e) = audit.publish_event(envelope) {
            warn!(%event_id, error = %e, "failed to publish access audit event");
        }
    }

    fn read_gate(&self) -> DomainResult<RwLockReadGuard<'_, ()>> {
        self.gate
            .read()
            .map_err(|_| DomainError::invariant("state lock poisoned"))
    }

    fn write_gate(&self) -> DomainResult<RwLockWriteGuard<'_, ()>> {
        self.gate
            .write()
            .map_err(|_| DomainError::invariant("state lock poisoned"))
    }
}

impl<C, D> core::fmt::Debug for AccessControlService<C, D> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("AccessControlService")
            .field("config", &self.config)
            .field("audit", &self.audit.is_some())
            .finish_non_exhaustive()
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

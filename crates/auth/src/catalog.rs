//! Role catalog contract.

use std::sync::Arc;

use rolegate_core::{DomainResult, RoleName};

use crate::Role;

/// Lookup and insertion of roles by name.
///
/// Names compare case-insensitively (`RoleName` already normalizes). Backing
/// storage (an in-memory map, a database table) is up to the implementation.
pub trait RoleCatalog: Send + Sync {
    fn role_exists(&self, name: &RoleName) -> DomainResult<bool>;

    /// Insert a new role. Implementations reject duplicates with
    /// `InvariantViolation`; callers check `role_exists` first.
    fn add_role(&self, role: Role) -> DomainResult<()>;

    /// Fetch a role, or `NotFound`.
    fn get_role(&self, name: &RoleName) -> DomainResult<Role>;

    fn list_roles(&self) -> DomainResult<Vec<Role>>;

    /// Remove a role, returning it, or `NotFound`.
    ///
    /// Users still holding the role by name are denied every feature until
    /// they are reassigned.
    fn remove_role(&self, name: &RoleName) -> DomainResult<Role>;
}

impl<S> RoleCatalog for Arc<S>
where
    S: RoleCatalog + ?Sized,
{
    fn role_exists(&self, name: &RoleName) -> DomainResult<bool> {
        (**self).role_exists(name)
    }

    fn add_role(&self, role: Role) -> DomainResult<()> {
        (**self).add_role(role)
    }

    fn get_role(&self, name: &RoleName) -> DomainResult<Role> {
        (**self).get_role(name)
    }

    fn list_roles(&self) -> DomainResult<Vec<Role>> {
        (**self).list_roles()
    }

    fn remove_role(&self, name: &RoleName) -> DomainResult<Role> {
        (**self).remove_role(name)
    }
}

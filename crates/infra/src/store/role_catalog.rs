use tracing::debug;

use rolegate_auth::{Role, RoleCatalog};
use rolegate_core::{DomainError, DomainResult, RoleName};

use super::KeyedStore;

/// In-memory role catalog for tests/dev.
#[derive(Debug, Default)]
pub struct InMemoryRoleCatalog {
    roles: KeyedStore<RoleName, Role>,
}

impl InMemoryRoleCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a catalog, rejecting duplicate names.
    pub fn with_roles(roles: impl IntoIterator<Item = Role>) -> DomainResult<Self> {
        let catalog = Self::new();
        for role in roles {
            catalog.add_role(role)?;
        }
        Ok(catalog)
    }

    /// Edit a stored role's permission set in place.
    ///
    /// Users hold roles by name, so the edit applies to every current holder
    /// on their next permission check.
    pub fn update_permissions<F>(&self, name: &RoleName, edit: F) -> DomainResult<Role>
    where
        F: FnOnce(&mut Role),
    {
        let role = self.roles.update(name, "role", edit)?;
        debug!(role = %role.name(), "catalog permissions edited");
        Ok(role)
    }
}

impl RoleCatalog for InMemoryRoleCatalog {
    fn role_exists(&self, name: &RoleName) -> DomainResult<bool> {
        self.roles.contains(name)
    }

    fn add_role(&self, role: Role) -> DomainResult<()> {
        debug!(role = %role.name(), "catalog insert");
        self.roles.insert_new(role.name().clone(), role, "role")
    }

    fn get_role(&self, name: &RoleName) -> DomainResult<Role> {
        self.roles
            .get(name)?
            .ok_or_else(|| DomainError::not_found(format!("role '{name}'")))
    }

    fn list_roles(&self) -> DomainResult<Vec<Role>> {
        self.roles.list()
    }

    fn remove_role(&self, name: &RoleName) -> DomainResult<Role> {
        self.roles.remove(name, "role")
    }
}

#[cfg(test)]
mod tests {
    use rolegate_auth::Permission;

    use super::*;

    fn name(s: &str) -> RoleName {
        RoleName::new(s).unwrap()
    }

    #[test]
    fn lookups_ignore_case() {
        let catalog =
            InMemoryRoleCatalog::with_roles([Role::named("Staff", ["ParkingAccess"]).unwrap()]).unwrap();

        assert!(catalog.role_exists(&name("staff")).unwrap());
        assert_eq!(catalog.get_role(&name("STAFF")).unwrap().name().as_str(), "Staff");
        assert!(matches!(catalog.get_role(&name("Tutor")), Err(DomainError::NotFound(_))));
    }

    #[test]
    fn duplicate_insert_is_rejected() {
        let catalog = InMemoryRoleCatalog::new();
        catalog.add_role(Role::named("Admin", ["ModifyRoles"]).unwrap()).unwrap();

        let err = catalog.add_role(Role::named("admin", Vec::<&str>::new()).unwrap()).unwrap_err();

        assert!(matches!(err, DomainError::InvariantViolation(_)));
        assert!(catalog.get_role(&name("Admin")).unwrap().has_permission("ModifyRoles"));
    }

    #[test]
    fn list_and_remove() {
        let catalog = InMemoryRoleCatalog::with_roles([
            Role::named("Student", ["Read"]).unwrap(),
            Role::named("Admin", ["ModifyRoles"]).unwrap(),
        ])
        .unwrap();

        let names: Vec<String> = catalog.list_roles().unwrap().iter().map(|r| r.name().to_string()).collect();
        assert_eq!(names, vec!["Admin", "Student"]);

        catalog.remove_role(&name("student")).unwrap();
        assert!(!catalog.role_exists(&name("Student")).unwrap());
    }

    #[test]
    fn update_permissions_edits_stored_role() {
        let catalog =
            InMemoryRoleCatalog::with_roles([Role::named("Staff", ["ParkingAccess"]).unwrap()]).unwrap();

        let updated = catalog
            .update_permissions(&name("staff"), |role| {
                role.add_permission(Permission::new("ViewReports").unwrap());
                role.remove_permission("parkingaccess");
            })
            .unwrap();

        assert!(updated.has_permission("ViewReports"));
        let stored = catalog.get_role(&name("Staff")).unwrap();
        assert!(!stored.has_permission("ParkingAccess"));
        assert!(matches!(
            catalog.update_permissions(&name("Tutor"), |_| {}),
            Err(DomainError::NotFound(_))
        ));
    }

    #[test]
    fn poisoned_catalog_is_an_invariant_violation_not_a_missing_role() {
        let catalog =
            InMemoryRoleCatalog::with_roles([Role::named("Staff", ["ParkingAccess"]).unwrap()]).unwrap();
        crate::store::keyed::tests::poison(&catalog.roles);

        assert!(matches!(catalog.get_role(&name("Staff")), Err(DomainError::InvariantViolation(_))));
        assert!(matches!(catalog.role_exists(&name("Staff")), Err(DomainError::InvariantViolation(_))));
        assert!(matches!(catalog.list_roles(), Err(DomainError::InvariantViolation(_))));
    }
}

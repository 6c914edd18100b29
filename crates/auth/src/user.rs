//! User entity as seen by access control.
//!
//! Account creation, credentials and profile data live with the registration
//! flow. This module only models what authorization needs: an identity, a
//! display name and at most one role.

use serde::{Deserialize, Serialize};

use rolegate_core::{Entity, RoleName, UserId};

/// A user bound to zero or one role.
///
/// The user refers to its role by name; permissions are always read from the
/// catalog, so editing a catalog role changes what every holder may do.
///
/// # Invariants
/// - `id` is immutable.
/// - The role is only changed through the access-control service, which only
///   ever assigns roles that exist in the catalog at the time of assignment.
/// - There is no transition back to "no role" inside this crate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    id: UserId,
    display_name: String,
    role: Option<RoleName>,
}

impl User {
    pub fn new(id: UserId, display_name: impl Into<String>) -> Self {
        Self {
            id,
            display_name: display_name.into(),
            role: None,
        }
    }

    /// Seed a user with a role (used by directories when loading records).
    pub fn with_role(mut self, role: RoleName) -> Self {
        self.role = Some(role);
        self
    }

    pub fn display_name(&self) -> &str {
        &self.display_name
    }

    pub fn role_name(&self) -> Option<&RoleName> {
        self.role.as_ref()
    }

    /// Whether the user currently holds the role called `name`.
    pub fn holds_role(&self, name: &RoleName) -> bool {
        self.role_name() == Some(name)
    }

    /// Replace the current role, returning the previous one.
    pub(crate) fn assign_role(&mut self, role: RoleName) -> Option<RoleName> {
        self.role.replace(role)
    }
}

impl Entity for User {
    type Id = UserId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn uid(s: &str) -> UserId {
        UserId::new(s).unwrap()
    }

    fn role(s: &str) -> RoleName {
        RoleName::new(s).unwrap()
    }

    #[test]
    fn new_user_has_no_role() {
        let user = User::new(uid("12345"), "Nat");
        assert!(user.role_name().is_none());
        assert_eq!(user.display_name(), "Nat");
    }

    #[test]
    fn holds_role_is_case_insensitive() {
        let user = User::new(uid("admin1"), "Ada").with_role(role("Admin"));
        assert!(user.holds_role(&role("ADMIN")));
        assert!(!user.holds_role(&role("Staff")));
    }

    #[test]
    fn assign_role_returns_previous() {
        let mut user = User::new(uid("u1"), "Sam").with_role(role("Student"));
        let previous = user.assign_role(role("Staff"));

        assert_eq!(previous.unwrap().as_str(), "Student");
        assert_eq!(user.role_name().unwrap().as_str(), "Staff");
    }

    #[test]
    fn identity_survives_role_changes() {
        let before = User::new(uid("U1"), "Sam");
        let mut after = before.clone();
        after.assign_role(role("Staff"));

        assert_ne!(before, after);
        assert!(before.same_identity_as(&after));
        assert_eq!(after.id(), &uid("u1"));
    }

    #[test]
    fn serializes_role_as_its_name() {
        let user = User::new(uid("staff1"), "Jane").with_role(role("Staff"));
        let json = serde_json::to_value(&user).unwrap();
        assert_eq!(json["role"], "Staff");
    }
}

use tracing::debug;

use rolegate_auth::{User, UserDirectory};
use rolegate_core::{DomainError, DomainResult, Entity, UserId};

use super::KeyedStore;

/// In-memory user directory for tests/dev.
#[derive(Debug, Default)]
pub struct InMemoryUserDirectory {
    users: KeyedStore<UserId, User>,
}

impl InMemoryUserDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_users(users: impl IntoIterator<Item = User>) -> DomainResult<Self> {
        let directory = Self::new();
        for user in users {
            directory.add_user(user)?;
        }
        Ok(directory)
    }
}

impl UserDirectory for InMemoryUserDirectory {
    fn get_user(&self, id: &UserId) -> DomainResult<User> {
        self.users
            .get(id)?
            .ok_or_else(|| DomainError::not_found(format!("user '{id}'")))
    }

    fn user_exists(&self, id: &UserId) -> DomainResult<bool> {
        self.users.contains(id)
    }

    fn list_users(&self) -> DomainResult<Vec<User>> {
        self.users.list()
    }

    fn add_user(&self, user: User) -> DomainResult<()> {
        debug!(user_id = %user.id(), "directory insert");
        self.users.insert_new(user.id().clone(), user, "user")
    }

    fn update_user(&self, user: User) -> DomainResult<()> {
        self.users.replace(user.id().clone(), user, "user")
    }

    fn remove_user(&self, id: &UserId) -> DomainResult<User> {
        self.users.remove(id, "user")
    }
}

#[cfg(test)]
mod tests {
    use rolegate_core::RoleName;

    use super::*;

    fn uid(s: &str) -> UserId {
        UserId::new(s).unwrap()
    }

    #[test]
    fn ids_compare_case_insensitively() {
        let directory = InMemoryUserDirectory::with_users([User::new(uid("Admin1"), "Ada")]).unwrap();

        assert!(directory.user_exists(&uid("admin1")).unwrap());
        assert_eq!(directory.get_user(&uid("ADMIN1")).unwrap().display_name(), "Ada");
        assert!(matches!(directory.get_user(&uid("nobody")), Err(DomainError::NotFound(_))));
    }

    #[test]
    fn duplicate_ids_are_rejected() {
        let directory = InMemoryUserDirectory::new();
        directory.add_user(User::new(uid("u1"), "One")).unwrap();

        let err = directory.add_user(User::new(uid("U1"), "Other")).unwrap_err();
        assert!(matches!(err, DomainError::InvariantViolation(_)));
        assert_eq!(directory.list_users().unwrap().len(), 1);
    }

    #[test]
    fn update_replaces_whole_record() {
        let directory = InMemoryUserDirectory::with_users([User::new(uid("u1"), "One")]).unwrap();
        let staff = RoleName::new("Staff").unwrap();

        directory
            .update_user(User::new(uid("u1"), "One").with_role(staff))
            .unwrap();

        let stored = directory.get_user(&uid("u1")).unwrap();
        assert_eq!(stored.role_name().unwrap().as_str(), "Staff");

        let missing = directory.update_user(User::new(uid("u2"), "Two"));
        assert!(matches!(missing, Err(DomainError::NotFound(_))));
    }

    #[test]
    fn remove_and_list() {
        let directory = InMemoryUserDirectory::with_users([
            User::new(uid("b"), "B"),
            User::new(uid("a"), "A"),
        ])
        .unwrap();

        assert_eq!(directory.list_users().unwrap().len(), 2);
        directory.remove_user(&uid("A")).unwrap();
        assert!(!directory.user_exists(&uid("a")).unwrap());
        assert_eq!(directory.list_users().unwrap().len(), 1);
    }

    #[test]
    fn poisoned_directory_is_an_invariant_violation_not_a_missing_user() {
        let directory = InMemoryUserDirectory::with_users([User::new(uid("admin1"), "Ada")]).unwrap();
        crate::store::keyed::tests::poison(&directory.users);

        assert!(matches!(directory.get_user(&uid("admin1")), Err(DomainError::InvariantViolation(_))));
        assert!(matches!(directory.list_users(), Err(DomainError::InvariantViolation(_))));
        assert!(matches!(directory.user_exists(&uid("admin1")), Err(DomainError::InvariantViolation(_))));
    }
}

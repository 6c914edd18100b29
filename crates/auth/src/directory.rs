//! User directory contract.

use std::sync::Arc;

use rolegate_core::{DomainResult, UserId};

use crate::User;

/// Lookup, enumeration and whole-record replacement of users.
///
/// Ids compare case-insensitively. `update_user` must replace the stored
/// record atomically so readers never observe a partially updated user.
pub trait UserDirectory: Send + Sync {
    /// Fetch a user, or `NotFound`.
    fn get_user(&self, id: &UserId) -> DomainResult<User>;

    fn user_exists(&self, id: &UserId) -> DomainResult<bool>;

    /// Snapshot of all users (used for the admin-count scan).
    fn list_users(&self) -> DomainResult<Vec<User>>;

    /// Insert a new user; duplicates are an `InvariantViolation`.
    fn add_user(&self, user: User) -> DomainResult<()>;

    /// Replace an existing user record, or `NotFound`.
    fn update_user(&self, user: User) -> DomainResult<()>;

    fn remove_user(&self, id: &UserId) -> DomainResult<User>;
}

impl<S> UserDirectory for Arc<S>
where
    S: UserDirectory + ?Sized,
{
    fn get_user(&self, id: &UserId) -> DomainResult<User> {
        (**self).get_user(id)
    }

    fn user_exists(&self, id: &UserId) -> DomainResult<bool> {
        (**self).user_exists(id)
    }

    fn list_users(&self) -> DomainResult<Vec<User>> {
        (**self).list_users()
    }

    fn add_user(&self, user: User) -> DomainResult<()> {
        (**self).add_user(user)
    }

    fn update_user(&self, user: User) -> DomainResult<()> {
        (**self).update_user(user)
    }

    fn remove_user(&self, id: &UserId) -> DomainResult<User> {
        (**self).remove_user(id)
    }
}

//! Session view of a user's current role.

use serde::{Deserialize, Serialize};

use rolegate_core::{DomainResult, RoleName, UserId};

use crate::{AccessControlService, RoleCatalog, UserDirectory};

/// What a session layer caches about a signed-in user.
///
/// The cached role is only a hint for display; permission checks still go
/// through [`AccessControlService::has_access`]. Call [`Session::refresh`]
/// after a role update so the session reflects the new role.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    user_id: UserId,
    current_role: Option<RoleName>,
}

impl Session {
    /// Open a session for an existing user (`NotFound` otherwise).
    pub fn open<C, D>(service: &AccessControlService<C, D>, user_id: &str) -> DomainResult<Self>
    where
        C: RoleCatalog,
        D: UserDirectory,
    {
        let current_role = service.user_role(user_id)?.map(|r| r.name().clone());
        Ok(Self {
            user_id: UserId::new(user_id)?,
            current_role,
        })
    }

    pub fn user_id(&self) -> &UserId {
        &self.user_id
    }

    pub fn current_role(&self) -> Option<&RoleName> {
        self.current_role.as_ref()
    }

    /// Re-read the user's role. Returns `true` if it changed.
    pub fn refresh<C, D>(&mut self, service: &AccessControlService<C, D>) -> DomainResult<bool>
    where
        C: RoleCatalog,
        D: UserDirectory,
    {
        let latest = service
            .user_role(self.user_id.as_str())?
            .map(|r| r.name().clone());
        let changed = latest != self.current_role;
        self.current_role = latest;
        Ok(changed)
    }
}

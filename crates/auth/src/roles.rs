use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use rolegate_core::{DomainResult, RoleName};

use crate::Permission;

/// A named bundle of permissions.
///
/// The name is the role's identity and never changes after creation. The
/// permission set may be edited by whoever owns the catalog entry; the
/// access-control service itself only reads it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Role {
    name: RoleName,
    permissions: BTreeSet<Permission>,
}

impl Role {
    pub fn new(name: RoleName, permissions: impl IntoIterator<Item = Permission>) -> Self {
        Self {
            name,
            permissions: permissions.into_iter().collect(),
        }
    }

    /// Build a role from raw strings, validating the name and every permission.
    pub fn named<I, S>(name: &str, permissions: I) -> DomainResult<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let name = RoleName::new(name)?;
        let permissions = permissions
            .into_iter()
            .map(Permission::new)
            .collect::<DomainResult<BTreeSet<_>>>()?;
        Ok(Self { name, permissions })
    }

    pub fn name(&self) -> &RoleName {
        &self.name
    }

    pub fn permissions(&self) -> impl Iterator<Item = &Permission> {
        self.permissions.iter()
    }

    /// Case-insensitive membership test. Blank features are never granted.
    pub fn has_permission(&self, feature: &str) -> bool {
        let key = feature.trim().to_lowercase();
        !key.is_empty() && self.permissions.iter().any(|p| p.key() == key)
    }

    /// Returns `false` if the permission was already present (in any casing).
    pub fn add_permission(&mut self, permission: Permission) -> bool {
        self.permissions.insert(permission)
    }

    /// Returns `false` if the permission was not present.
    pub fn remove_permission(&mut self, feature: &str) -> bool {
        match Permission::new(feature) {
            Ok(p) => self.permissions.remove(&p),
            Err(_) => false,
        }
    }
}

impl core::fmt::Display for Role {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        core::fmt::Display::fmt(&self.name, f)
    }
}

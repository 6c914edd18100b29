use serde::Serialize;

use rolegate_core::{Entity, UserId};

use crate::{Role, User};

/// Decide whether a holder of `role` may use `feature`.
///
/// `role` is the catalog entry for the user's role, or `None` when the user
/// has no role or the role has since left the catalog.
///
/// - No IO
/// - No panics
/// - A missing role is denied, never an error
pub fn permits(role: Option<&Role>, feature: &str) -> bool {
    role.is_some_and(|role| role.has_permission(feature))
}

// ─────────────────────────────────────────────────────────────────────────────
// Access Explanation (Audit Trail)
// ─────────────────────────────────────────────────────────────────────────────

/// Detailed explanation of an access decision.
///
/// Answers "why was this user allowed/denied this feature?" for admin
/// consoles and audit logs. `granted` always agrees with [`permits`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AccessExplanation {
    pub user_id: UserId,
    pub feature: String,
    pub granted: bool,
    pub role: Option<String>,
    /// Permissions of the user's role, sorted case-insensitively.
    pub effective_permissions: Vec<String>,
    pub reason: String,
    pub denial: Option<DenialReason>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DenialReason {
    pub kind: DenialKind,
    pub suggestions: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DenialKind {
    NoRoleAssigned,
    RoleNotInCatalog,
    MissingPermission,
}

/// Explain the decision [`permits`] makes for `user`, whose role resolved to
/// `role` in the catalog.
pub fn explain_access(user: &User, role: Option<&Role>, feature: &str) -> AccessExplanation {
    let feature = feature.trim();
    let user_id = user.id().clone();

    let Some(role_name) = user.role_name() else {
        return AccessExplanation {
            user_id,
            feature: feature.to_string(),
            granted: false,
            role: None,
            effective_permissions: Vec::new(),
            reason: format!("User '{}' has no role assigned", user.id()),
            denial: Some(DenialReason {
                kind: DenialKind::NoRoleAssigned,
                suggestions: vec![format!(
                    "Assign a role that grants the '{feature}' permission"
                )],
            }),
        };
    };

    let Some(role) = role else {
        return AccessExplanation {
            user_id,
            feature: feature.to_string(),
            granted: false,
            role: Some(role_name.to_string()),
            effective_permissions: Vec::new(),
            reason: format!("Role '{role_name}' is no longer in the catalog"),
            denial: Some(DenialReason {
                kind: DenialKind::RoleNotInCatalog,
                suggestions: vec![
                    format!("Assign a role that grants the '{feature}' permission"),
                    format!("Recreate role '{role_name}'"),
                ],
            }),
        };
    };

    let effective_permissions: Vec<String> =
        role.permissions().map(|p| p.as_str().to_string()).collect();

    if role.has_permission(feature) {
        AccessExplanation {
            user_id,
            feature: feature.to_string(),
            granted: true,
            role: Some(role.name().to_string()),
            effective_permissions,
            reason: format!("Role '{}' grants '{feature}'", role.name()),
            denial: None,
        }
    } else {
        AccessExplanation {
            user_id,
            feature: feature.to_string(),
            granted: false,
            role: Some(role.name().to_string()),
            reason: format!(
                "Role '{}' does not grant '{feature}'. Current permissions: {:?}",
                role.name(),
                effective_permissions
            ),
            effective_permissions,
            denial: Some(DenialReason {
                kind: DenialKind::MissingPermission,
                suggestions: vec![
                    format!("Assign a role that grants the '{feature}' permission"),
                    format!("Add '{feature}' to role '{}'", role.name()),
                ],
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user_with(role: Option<&Role>) -> User {
        let user = User::new(UserId::new("staff1").unwrap(), "Jane");
        match role {
            Some(r) => user.with_role(r.name().clone()),
            None => user,
        }
    }

    fn staff() -> Role {
        Role::named("Staff", ["ParkingAccess"]).unwrap()
    }

    #[test]
    fn no_role_is_denied_with_reason() {
        let user = user_with(None);
        assert!(!permits(None, "ParkingAccess"));

        let explanation = explain_access(&user, None, "ParkingAccess");
        assert!(!explanation.granted);
        assert_eq!(explanation.denial.unwrap().kind, DenialKind::NoRoleAssigned);
    }

    #[test]
    fn granted_feature_is_explained() {
        let role = staff();
        let user = user_with(Some(&role));
        assert!(permits(Some(&role), "parkingaccess"));

        let explanation = explain_access(&user, Some(&role), "parkingaccess");
        assert!(explanation.granted);
        assert_eq!(explanation.role.as_deref(), Some("Staff"));
        assert_eq!(explanation.effective_permissions, vec!["ParkingAccess".to_string()]);
        assert!(explanation.denial.is_none());
    }

    #[test]
    fn missing_permission_lists_what_the_role_has() {
        let role = staff();
        let user = user_with(Some(&role));
        assert!(!permits(Some(&role), "ModifyRoles"));

        let explanation = explain_access(&user, Some(&role), "ModifyRoles");
        assert!(!explanation.granted);
        assert!(explanation.reason.contains("ParkingAccess"));

        let denial = explanation.denial.unwrap();
        assert_eq!(denial.kind, DenialKind::MissingPermission);
        assert_eq!(denial.suggestions.len(), 2);
    }

    #[test]
    fn role_missing_from_catalog_is_denied() {
        let user = user_with(Some(&staff()));
        assert!(!permits(None, "ParkingAccess"));

        let explanation = explain_access(&user, None, "ParkingAccess");
        assert!(!explanation.granted);
        assert_eq!(explanation.role.as_deref(), Some("Staff"));
        assert!(explanation.effective_permissions.is_empty());
        assert_eq!(explanation.denial.unwrap().kind, DenialKind::RoleNotInCatalog);
    }

    #[test]
    fn explanation_serializes_denial_kind_in_snake_case() {
        let explanation = explain_access(&user_with(None), None, "Read");
        let json = serde_json::to_value(&explanation).unwrap();
        assert_eq!(json["denial"]["kind"], "no_role_assigned");
        assert_eq!(json["user_id"], "staff1");
    }
}

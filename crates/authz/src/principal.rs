//! The authenticated actor a decision is made for.
//!
//! Construction is decoupled from storage and transport: request handlers
//! derive a `Principal` from already-verified session/token data. This engine
//! never re-validates credentials.

use serde::{Deserialize, Serialize};

use motorlot_core::{DomainError, DomainResult, PrincipalId, TenantId};

use crate::role::Role;

/// A fully resolved principal for authorization decisions.
///
/// # Invariants
/// - A `Superadmin` carries no tenant: platform staff exist outside every
///   tenant and are barred from tenant business resources.
/// - Every other role belongs to exactly one tenant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Principal {
    pub id: PrincipalId,
    pub role: Role,
    pub tenant_id: Option<TenantId>,
}

impl Principal {
    /// Build a principal, enforcing the role/tenant invariant.
    pub fn new(id: PrincipalId, role: Role, tenant_id: Option<TenantId>) -> DomainResult<Self> {
        match (role, tenant_id) {
            (Role::Superadmin, Some(_)) => Err(DomainError::invariant(
                "superadmin principals are platform-scoped and carry no tenant",
            )),
            (Role::Superadmin, None) => Ok(Self {
                id,
                role,
                tenant_id: None,
            }),
            (_, None) => Err(DomainError::invariant(format!(
                "role {role} requires a tenant"
            ))),
            (_, Some(tenant)) => Ok(Self {
                id,
                role,
                tenant_id: Some(tenant),
            }),
        }
    }

    /// A platform-scoped super-role principal.
    pub fn platform(id: PrincipalId) -> Self {
        Self {
            id,
            role: Role::Superadmin,
            tenant_id: None,
        }
    }

    /// Tenant-scoped constructor for tests; generates a fresh tenant.
    #[cfg(test)]
    pub(crate) fn for_tests(id: PrincipalId, role: Role) -> Self {
        Self::new(id, role, Some(TenantId::new())).unwrap()
    }
}

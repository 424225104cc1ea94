//! Per-module permission matrix.
//!
//! The matrix is data, not code: it maps (module, role) to a [`Capability`]
//! set, and adding a module or role means adding rows, never touching the
//! decision logic. Lookups are total; an absent pair answers with the
//! all-false capability (fail closed). Totality over the *declared* module
//! set is enforced eagerly by [`PermissionMatrix::validate`].

use std::borrow::Cow;
use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::capability::{Action, Capability};
use crate::error::ConfigError;
use crate::role::{ALL_ROLES, Role};

/// Name of a business area subject to coarse-grained RBAC.
///
/// Modeled as an opaque string so policy layers may declare modules without
/// this crate knowing them, with constants for the modules the platform
/// ships with.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ModuleName(Cow<'static, str>);

impl ModuleName {
    pub fn new(name: impl Into<Cow<'static, str>>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl core::fmt::Display for ModuleName {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&'static str> for ModuleName {
    fn from(value: &'static str) -> Self {
        Self::new(value)
    }
}

// Lets the map be queried with plain `&str` keys.
impl std::borrow::Borrow<str> for ModuleName {
    fn borrow(&self) -> &str {
        self.as_str()
    }
}

/// Module name constants for the shipped platform.
pub mod modules {
    pub const CUSTOMERS: &str = "customers";
    pub const VEHICLES: &str = "vehicles";
    pub const SALES: &str = "sales";
    pub const CONSIGNMENTS: &str = "consignments";
    pub const LOCATIONS: &str = "locations";
    pub const USERS: &str = "users";
    pub const TENANTS: &str = "tenants";
}

/// Every module the platform declares. The matrix must carry an entry
/// (possibly all-false) for each of these, for each role.
pub const DECLARED_MODULES: [&str; 7] = [
    modules::CUSTOMERS,
    modules::VEHICLES,
    modules::SALES,
    modules::CONSIGNMENTS,
    modules::LOCATIONS,
    modules::USERS,
    modules::TENANTS,
];

/// Tenant business modules: the areas the platform super-role is barred from.
pub const BUSINESS_MODULES: [&str; 4] = [
    modules::CUSTOMERS,
    modules::VEHICLES,
    modules::SALES,
    modules::CONSIGNMENTS,
];

/// True for modules that hold tenant business data (customers, vehicles,
/// sales, consignments) as opposed to platform administration.
pub fn is_business_module(module: &str) -> bool {
    BUSINESS_MODULES.contains(&module)
}

/// Immutable (module, role) → capability table.
///
/// Constructed once at process start (code-embedded via [`MatrixBuilder`], or
/// deserialized from JSON/YAML, since the shapes all derive serde) and validated
/// before any query is answered. After construction it is read-only, so it
/// is safe to share across threads without synchronization.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PermissionMatrix {
    entries: HashMap<ModuleName, HashMap<Role, Capability>>,
}

impl PermissionMatrix {
    pub fn builder() -> MatrixBuilder {
        MatrixBuilder::default()
    }

    /// The capability set for a (module, role) pair.
    ///
    /// Never fails: an absent pair is a valid "no rights" answer, not an
    /// error.
    pub fn capabilities(&self, module: &str, role: Role) -> Capability {
        self.entries
            .get(module)
            .and_then(|by_role| by_role.get(&role))
            .copied()
            .unwrap_or(Capability::NONE)
    }

    pub fn can_view(&self, module: &str, role: Role) -> bool {
        self.capabilities(module, role).view
    }

    pub fn can_create(&self, module: &str, role: Role) -> bool {
        self.capabilities(module, role).create
    }

    pub fn can_edit(&self, module: &str, role: Role) -> bool {
        self.capabilities(module, role).edit
    }

    pub fn can_delete(&self, module: &str, role: Role) -> bool {
        self.capabilities(module, role).delete
    }

    pub fn can_assign(&self, module: &str, role: Role) -> bool {
        self.capabilities(module, role).assign
    }

    pub fn can_approve(&self, module: &str, role: Role) -> bool {
        self.capabilities(module, role).approve
    }

    /// Modules this matrix carries entries for, in unspecified order.
    pub fn module_names(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(|m| m.as_str())
    }

    /// Startup validation; must pass before the matrix serves queries.
    ///
    /// Checks that the matrix is total over [`DECLARED_MODULES`] × all roles,
    /// and that no business module grants the platform super-role anything.
    pub fn validate(&self) -> Result<(), ConfigError> {
        for module in DECLARED_MODULES {
            for role in ALL_ROLES {
                let present = self
                    .entries
                    .get(module)
                    .is_some_and(|by_role| by_role.contains_key(&role));
                if !present {
                    return Err(ConfigError::IncompleteMatrix {
                        module: module.to_string(),
                        role,
                    });
                }
            }
        }

        for module in BUSINESS_MODULES {
            let cap = self.capabilities(module, Role::Superadmin);
            if !cap.is_none() {
                let action = [
                    (cap.view, Action::View),
                    (cap.create, Action::Create),
                    (cap.edit, Action::Edit),
                    (cap.delete, Action::Delete),
                    (cap.assign, Action::Assign),
                    (cap.approve, Action::Approve),
                ]
                .into_iter()
                .find_map(|(granted, action)| granted.then_some(action))
                .map(|action| action.to_string())
                .unwrap_or_default();
                return Err(ConfigError::SuperadminBusinessGrant {
                    module: module.to_string(),
                    role: Role::Superadmin,
                    action,
                });
            }
        }

        tracing::debug!(modules = self.entries.len(), "permission matrix validated");
        Ok(())
    }

    /// The matrix the platform ships with.
    pub fn standard() -> Self {
        use Role::*;

        let full = Capability {
            view: true,
            create: true,
            edit: true,
            delete: true,
            assign: false,
            approve: false,
        };
        let read = Capability {
            view: true,
            ..Capability::NONE
        };

        Self::builder()
            // CRM / customers. Leaders and sellers are further scoped by
            // ownership at the resource gate.
            .grant(modules::CUSTOMERS, Superadmin, Capability::NONE)
            .grant(modules::CUSTOMERS, Admin, Capability { assign: true, ..full })
            .grant(
                modules::CUSTOMERS,
                SalesLeader,
                Capability {
                    view: true,
                    create: true,
                    edit: true,
                    delete: false,
                    assign: true,
                    approve: false,
                },
            )
            .grant(
                modules::CUSTOMERS,
                Seller,
                Capability {
                    view: true,
                    create: true,
                    edit: true,
                    ..Capability::NONE
                },
            )
            .grant(modules::CUSTOMERS, Auditor, read)
            // Vehicles / inventory.
            .grant(modules::VEHICLES, Superadmin, Capability::NONE)
            .grant(modules::VEHICLES, Admin, full)
            .grant(
                modules::VEHICLES,
                SalesLeader,
                Capability {
                    view: true,
                    create: true,
                    edit: true,
                    ..Capability::NONE
                },
            )
            .grant(modules::VEHICLES, Seller, read)
            .grant(modules::VEHICLES, Auditor, read)
            // Sales. Approval is a leader/admin capability.
            .grant(modules::SALES, Superadmin, Capability::NONE)
            .grant(modules::SALES, Admin, Capability { approve: true, ..full })
            .grant(
                modules::SALES,
                SalesLeader,
                Capability {
                    view: true,
                    create: true,
                    edit: true,
                    delete: false,
                    assign: false,
                    approve: true,
                },
            )
            .grant(
                modules::SALES,
                Seller,
                Capability {
                    view: true,
                    create: true,
                    edit: true,
                    ..Capability::NONE
                },
            )
            .grant(modules::SALES, Auditor, read)
            // Consignments.
            .grant(modules::CONSIGNMENTS, Superadmin, Capability::NONE)
            .grant(modules::CONSIGNMENTS, Admin, full)
            .grant(modules::CONSIGNMENTS, SalesLeader, full)
            .grant(modules::CONSIGNMENTS, Seller, read)
            .grant(modules::CONSIGNMENTS, Auditor, read)
            // Locations are platform infrastructure; the super-role manages
            // them alongside tenant admins.
            .grant(modules::LOCATIONS, Superadmin, full)
            .grant(modules::LOCATIONS, Admin, full)
            .grant(modules::LOCATIONS, SalesLeader, read)
            .grant(modules::LOCATIONS, Seller, read)
            .grant(modules::LOCATIONS, Auditor, read)
            // User management. The super-role provisions tenant admins;
            // admins manage their own staff.
            .grant(modules::USERS, Superadmin, full)
            .grant(modules::USERS, Admin, full)
            .grant(modules::USERS, SalesLeader, read)
            .grant(modules::USERS, Seller, Capability::NONE)
            .grant(modules::USERS, Auditor, read)
            // Tenant administration is super-role-only; tenant deletion is a
            // soft-delete flow outside this engine, so delete stays false.
            .grant(
                modules::TENANTS,
                Superadmin,
                Capability {
                    view: true,
                    create: true,
                    edit: true,
                    ..Capability::NONE
                },
            )
            .grant(modules::TENANTS, Admin, Capability::NONE)
            .grant(modules::TENANTS, SalesLeader, Capability::NONE)
            .grant(modules::TENANTS, Seller, Capability::NONE)
            .grant(modules::TENANTS, Auditor, Capability::NONE)
            .build()
    }
}

/// Accumulates (module, role) → capability rows into a [`PermissionMatrix`].
#[derive(Debug, Default)]
pub struct MatrixBuilder {
    entries: HashMap<ModuleName, HashMap<Role, Capability>>,
}

impl MatrixBuilder {
    pub fn grant(
        mut self,
        module: impl Into<ModuleName>,
        role: Role,
        capability: Capability,
    ) -> Self {
        self.entries
            .entry(module.into())
            .or_default()
            .insert(role, capability);
        self
    }

    /// Build without validating; call [`PermissionMatrix::validate`] (or go
    /// through `AuthorizationEngine::new`) before serving queries.
    pub fn build(self) -> PermissionMatrix {
        PermissionMatrix {
            entries: self.entries,
        }
    }
}

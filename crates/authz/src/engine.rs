//! The composed authorization decision point.
//!
//! Two gates, cheapest first:
//! 1. module gate (static matrix lookup): may this *role* do this action in
//!    this *module* at all;
//! 2. resource gate (ownership resolution): may this *principal* touch this
//!    *resource instance*.
//!
//! Every decision function is total and returns a bool. Denial is a value,
//! never an error, so calling code structurally cannot fail open by letting
//! an exception bypass a deny.

use motorlot_core::PrincipalId;

use crate::capability::Capability;
use crate::error::ConfigError;
use crate::matrix::PermissionMatrix;
use crate::ownership::{self, AccessKind, OwnedResource};
use crate::principal::Principal;
use crate::role::Role;

/// Why a request was (or would be) denied.
///
/// A locale-agnostic taxonomy; the `Display` strings are default English
/// copy for logs and admin tooling, and presentation layers are expected to
/// map the codes to their own user-facing text. Reasons are advisory UX
/// only; decisions never consult them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DenialReason {
    /// No authenticated principal on the request.
    SignInRequired,
    /// The principal's role is read-only.
    ReadOnlyRole,
    /// The principal may only act on resources assigned to them.
    OwnResourcesOnly,
    /// The principal may only act on their team's resources.
    TeamResourcesOnly,
    /// Catch-all: the role simply lacks the capability.
    NotPermitted,
}

impl core::fmt::Display for DenialReason {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let msg = match self {
            DenialReason::SignInRequired => "You must sign in to access this resource",
            DenialReason::ReadOnlyRole => "Auditors have read-only access",
            DenialReason::OwnResourcesOnly => "You can only access your own resources",
            DenialReason::TeamResourcesOnly => "You can only access your team's resources",
            DenialReason::NotPermitted => "You do not have permission to perform this action",
        };
        f.write_str(msg)
    }
}

/// The single composed decision surface.
///
/// Holds an eagerly validated, immutable [`PermissionMatrix`]; after
/// construction the engine is pure and lock-free, safe to share across any
/// number of threads.
#[derive(Debug, Clone)]
pub struct AuthorizationEngine {
    matrix: PermissionMatrix,
}

impl AuthorizationEngine {
    /// Build an engine over `matrix`, validating it first.
    ///
    /// An invalid matrix is a startup-fatal configuration error; the engine
    /// refuses to exist (and therefore to answer queries) with one.
    pub fn new(matrix: PermissionMatrix) -> Result<Self, ConfigError> {
        matrix.validate()?;
        Ok(Self { matrix })
    }

    /// Engine over the matrix the platform ships with.
    pub fn standard() -> Self {
        // The standard matrix is covered by tests; validation cannot fail.
        Self::new(PermissionMatrix::standard()).expect("standard matrix must validate")
    }

    pub fn matrix(&self) -> &PermissionMatrix {
        &self.matrix
    }

    // ── Module gate ─────────────────────────────────────────────────────

    fn module_capabilities(&self, principal: &Principal, module: &str) -> Capability {
        if module.trim().is_empty() {
            // Caller misuse; fail closed rather than crash the request path.
            tracing::warn!(principal = %principal.id, "capability query with empty module name");
            return Capability::NONE;
        }
        self.matrix.capabilities(module, principal.role)
    }

    pub fn can_view_module(&self, principal: &Principal, module: &str) -> bool {
        self.module_capabilities(principal, module).view
    }

    pub fn can_create_in_module(&self, principal: &Principal, module: &str) -> bool {
        self.module_capabilities(principal, module).create
    }

    pub fn can_edit_in_module(&self, principal: &Principal, module: &str) -> bool {
        self.module_capabilities(principal, module).edit
    }

    pub fn can_delete_in_module(&self, principal: &Principal, module: &str) -> bool {
        self.module_capabilities(principal, module).delete
    }

    pub fn can_assign_in_module(&self, principal: &Principal, module: &str) -> bool {
        self.module_capabilities(principal, module).assign
    }

    pub fn can_approve_in_module(&self, principal: &Principal, module: &str) -> bool {
        self.module_capabilities(principal, module).approve
    }

    // ── Resource gate ───────────────────────────────────────────────────

    /// Ownership-only check (view class); does not consult the matrix.
    /// Callers compose the two gates explicitly, or use the `*_resource`
    /// helpers below.
    pub fn can_access_resource(
        &self,
        principal: &Principal,
        owner: Option<PrincipalId>,
        subordinates: &[PrincipalId],
    ) -> bool {
        ownership::resolve(principal, owner, subordinates, AccessKind::View)
    }

    /// Module gate AND mutate-class ownership gate. Short-circuits on the
    /// module gate, which is the cheaper of the two.
    pub fn can_edit_resource(
        &self,
        principal: &Principal,
        module: &str,
        owner: Option<PrincipalId>,
        subordinates: &[PrincipalId],
    ) -> bool {
        self.can_edit_in_module(principal, module)
            && ownership::resolve(principal, owner, subordinates, AccessKind::Mutate)
    }

    pub fn can_delete_resource(
        &self,
        principal: &Principal,
        module: &str,
        owner: Option<PrincipalId>,
        subordinates: &[PrincipalId],
    ) -> bool {
        self.can_delete_in_module(principal, module)
            && ownership::resolve(principal, owner, subordinates, AccessKind::Mutate)
    }

    /// Keep the items the principal may see, preserving input order.
    pub fn filter_by_ownership<T: OwnedResource>(
        &self,
        principal: &Principal,
        items: Vec<T>,
        subordinates: &[PrincipalId],
    ) -> Vec<T> {
        ownership::filter_owned(principal, items, subordinates)
    }

    // ── UX helpers ──────────────────────────────────────────────────────

    /// Role-appropriate denial reason for display. Advisory only; never part
    /// of the decision.
    pub fn denied_reason(&self, principal: Option<&Principal>) -> DenialReason {
        match principal {
            None => DenialReason::SignInRequired,
            Some(p) => match p.role {
                Role::Auditor => DenialReason::ReadOnlyRole,
                Role::Seller => DenialReason::OwnResourcesOnly,
                Role::SalesLeader => DenialReason::TeamResourcesOnly,
                Role::Superadmin | Role::Admin => DenialReason::NotPermitted,
            },
        }
    }

    // ── Fixed surface guards (navigation-level, not matrix-driven) ──────

    /// Platform/tenant administration menu.
    pub fn can_access_admin_menu(&self, principal: &Principal) -> bool {
        matches!(principal.role, Role::Superadmin | Role::Admin)
    }

    /// Settings area: admins and team leads.
    pub fn can_access_settings(&self, principal: &Principal) -> bool {
        matches!(
            principal.role,
            Role::Superadmin | Role::Admin | Role::SalesLeader
        )
    }

    /// Reports/analytics area: everyone except individual sellers.
    pub fn can_access_reports(&self, principal: &Principal) -> bool {
        matches!(
            principal.role,
            Role::Superadmin | Role::Admin | Role::SalesLeader | Role::Auditor
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::matrix::{DECLARED_MODULES, MatrixBuilder, modules};
    use crate::role::ALL_ROLES;

    fn engine() -> AuthorizationEngine {
        AuthorizationEngine::standard()
    }

    fn principal(role: Role) -> Principal {
        Principal::for_tests(PrincipalId::new(), role)
    }

    #[test]
    fn new_rejects_an_incomplete_matrix() {
        let matrix = MatrixBuilder::default()
            .grant(modules::SALES, Role::Admin, Capability::NONE)
            .build();
        assert!(matches!(
            AuthorizationEngine::new(matrix),
            Err(ConfigError::IncompleteMatrix { .. })
        ));
    }

    #[test]
    fn unregistered_module_denies_every_role() {
        let engine = engine();
        for role in ALL_ROLES {
            let p = if role == Role::Superadmin {
                Principal::platform(PrincipalId::new())
            } else {
                principal(role)
            };
            assert!(!engine.can_view_module(&p, "unregistered_module"));
            assert!(!engine.can_create_in_module(&p, "unregistered_module"));
        }
    }

    #[test]
    fn empty_module_name_fails_closed() {
        let engine = engine();
        let p = principal(Role::Admin);
        assert!(!engine.can_view_module(&p, ""));
        assert!(!engine.can_edit_in_module(&p, "   "));
    }

    #[test]
    fn auditor_cannot_edit_even_with_a_misconfigured_matrix() {
        // Deliberately grant the auditor edit rights everywhere; the
        // ownership resolver still refuses the write.
        let mut builder = MatrixBuilder::default();
        for module in DECLARED_MODULES {
            for role in ALL_ROLES {
                let cap = if role == Role::Auditor {
                    Capability {
                        view: true,
                        edit: true,
                        ..Capability::NONE
                    }
                } else {
                    Capability::NONE
                };
                builder = builder.grant(module, role, cap);
            }
        }
        let engine = AuthorizationEngine::new(builder.build()).unwrap();
        let auditor = principal(Role::Auditor);

        assert!(engine.can_edit_in_module(&auditor, modules::SALES));
        assert!(!engine.can_edit_resource(&auditor, modules::SALES, None, &[]));
        assert!(!engine.can_edit_resource(
            &auditor,
            modules::SALES,
            Some(PrincipalId::new()),
            &[]
        ));
    }

    #[test]
    fn two_gate_composition_is_a_logical_and() {
        let engine = engine();
        let seller = principal(Role::Seller);
        let own = Some(seller.id);
        let foreign = Some(PrincipalId::new());

        // gate1 && gate2
        assert!(engine.can_edit_resource(&seller, modules::CUSTOMERS, own, &[]));
        // gate1 && !gate2
        assert!(!engine.can_edit_resource(&seller, modules::CUSTOMERS, foreign, &[]));
        // !gate1 && gate2 (sellers cannot edit vehicles at module level)
        assert!(engine.can_access_resource(&seller, own, &[]));
        assert!(!engine.can_edit_resource(&seller, modules::VEHICLES, own, &[]));
        // !gate1 && !gate2
        assert!(!engine.can_edit_resource(&seller, modules::VEHICLES, foreign, &[]));
    }

    #[test]
    fn composition_implies_both_gates() {
        let engine = engine();
        let leader = principal(Role::SalesLeader);
        let report = PrincipalId::new();
        let subs = vec![report];

        for module in DECLARED_MODULES {
            for owner in [None, Some(leader.id), Some(report), Some(PrincipalId::new())] {
                if engine.can_edit_resource(&leader, module, owner, &subs) {
                    assert!(engine.can_edit_in_module(&leader, module));
                    assert!(engine.can_access_resource(&leader, owner, &subs));
                }
                if engine.can_delete_resource(&leader, module, owner, &subs) {
                    assert!(engine.can_delete_in_module(&leader, module));
                }
            }
        }
    }

    #[test]
    fn superadmin_never_reaches_business_resources() {
        let engine = engine();
        let p = Principal::platform(PrincipalId::new());
        let owner = Some(PrincipalId::new());

        assert!(!engine.can_access_resource(&p, owner, &[]));
        assert!(!engine.can_edit_resource(&p, modules::CUSTOMERS, owner, &[]));
        // Platform modules stay available at the module level.
        assert!(engine.can_create_in_module(&p, modules::TENANTS));
    }

    #[test]
    fn denied_reason_matches_the_role() {
        let engine = engine();
        assert_eq!(engine.denied_reason(None), DenialReason::SignInRequired);
        assert_eq!(
            engine.denied_reason(Some(&principal(Role::Auditor))),
            DenialReason::ReadOnlyRole
        );
        assert_eq!(
            engine.denied_reason(Some(&principal(Role::Seller))),
            DenialReason::OwnResourcesOnly
        );
        assert_eq!(
            engine.denied_reason(Some(&principal(Role::SalesLeader))),
            DenialReason::TeamResourcesOnly
        );
        assert_eq!(
            engine.denied_reason(Some(&principal(Role::Admin))),
            DenialReason::NotPermitted
        );
    }

    #[test]
    fn surface_guards_follow_role_sets() {
        let engine = engine();
        assert!(engine.can_access_admin_menu(&principal(Role::Admin)));
        assert!(!engine.can_access_admin_menu(&principal(Role::SalesLeader)));
        assert!(engine.can_access_settings(&principal(Role::SalesLeader)));
        assert!(!engine.can_access_settings(&principal(Role::Seller)));
        assert!(engine.can_access_reports(&principal(Role::Auditor)));
        assert!(!engine.can_access_reports(&principal(Role::Seller)));
    }
}

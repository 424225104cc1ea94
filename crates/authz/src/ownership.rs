//! Resource-level ownership resolution.
//!
//! The module-level matrix answers "may this role do this in this module at
//! all"; this module answers "may this principal touch *this particular*
//! resource". The two gates compose in `engine`.
//!
//! The whole policy is one precedence table, written as a single exhaustive
//! match so the compiler checks that every role reaches a terminal decision:
//!
//! 1. Superadmin: deny, always (platform staff never touch tenant business
//!    resources, no matter what the rest of the configuration says);
//! 2. Admin: allow (full-tenant scope);
//! 3. Auditor: allow reads, deny writes (enforced here as well as in the
//!    matrix, so a misconfigured matrix entry cannot grant writes);
//! 4. unassigned resource (no owner): allow team leads only;
//! 5. Seller: allow only their own resources;
//! 6. SalesLeader: allow their own and their direct reports' resources.

use motorlot_core::PrincipalId;

use crate::principal::Principal;
use crate::role::Role;

/// Whether the access being resolved reads or mutates the resource.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccessKind {
    View,
    Mutate,
}

/// Anything with a declared owner, as far as this engine is concerned.
///
/// `None` means unassigned (sitting in the pool waiting for a lead to pick
/// it up or assign it).
pub trait OwnedResource {
    fn owner_id(&self) -> Option<PrincipalId>;
}

impl OwnedResource for Option<PrincipalId> {
    fn owner_id(&self) -> Option<PrincipalId> {
        *self
    }
}

/// Decide whether `principal` may access a resource owned by `owner`.
///
/// Total over every (role, owner, subordinates) combination; first matching
/// rule wins. `subordinates` is the caller-supplied flat set of the
/// principal's direct reports; this engine never resolves the manager graph
/// itself, and membership is not transitive.
pub fn resolve(
    principal: &Principal,
    owner: Option<PrincipalId>,
    subordinates: &[PrincipalId],
    kind: AccessKind,
) -> bool {
    match principal.role {
        // Absolute platform/tenant separation, independent of everything else.
        Role::Superadmin => false,

        Role::Admin => true,

        Role::Auditor => kind == AccessKind::View,

        Role::Seller => match owner {
            // Unassigned pool is lead territory.
            None => false,
            Some(owner) => owner == principal.id,
        },

        Role::SalesLeader => match owner {
            None => true,
            Some(owner) => owner == principal.id || subordinates.contains(&owner),
        },
    }
}

/// Keep the items of `items` the principal may see, preserving input order.
///
/// Applies the same precedence table as [`resolve`] (view kind) to each
/// item's owner. For the platform super-role the result is always empty.
pub fn filter_owned<T: OwnedResource>(
    principal: &Principal,
    items: Vec<T>,
    subordinates: &[PrincipalId],
) -> Vec<T> {
    items
        .into_iter()
        .filter(|item| resolve(principal, item.owner_id(), subordinates, AccessKind::View))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use motorlot_core::TenantId;

    fn principal(role: Role) -> Principal {
        Principal::for_tests(PrincipalId::new(), role)
    }

    #[test]
    fn superadmin_is_denied_everything() {
        let p = Principal::platform(PrincipalId::new());
        let someone = PrincipalId::new();
        for kind in [AccessKind::View, AccessKind::Mutate] {
            assert!(!resolve(&p, None, &[], kind));
            assert!(!resolve(&p, Some(p.id), &[], kind));
            assert!(!resolve(&p, Some(someone), &[someone], kind));
        }
    }

    #[test]
    fn admin_has_full_tenant_scope() {
        let p = principal(Role::Admin);
        assert!(resolve(&p, Some(PrincipalId::new()), &[], AccessKind::Mutate));
        assert!(resolve(&p, None, &[], AccessKind::View));
    }

    #[test]
    fn auditor_reads_everything_writes_nothing() {
        let p = principal(Role::Auditor);
        let owner = Some(PrincipalId::new());
        assert!(resolve(&p, owner, &[], AccessKind::View));
        assert!(!resolve(&p, owner, &[], AccessKind::Mutate));
        assert!(!resolve(&p, None, &[], AccessKind::Mutate));
    }

    #[test]
    fn seller_is_scoped_to_own_resources() {
        let p = principal(Role::Seller);
        assert!(resolve(&p, Some(p.id), &[], AccessKind::Mutate));
        assert!(!resolve(&p, Some(PrincipalId::new()), &[], AccessKind::View));
        // Unassigned pool is not seller territory.
        assert!(!resolve(&p, None, &[], AccessKind::View));
    }

    #[test]
    fn leader_covers_self_team_and_unassigned() {
        let p = principal(Role::SalesLeader);
        let report = PrincipalId::new();
        let stranger = PrincipalId::new();
        let subs = vec![report];

        assert!(resolve(&p, Some(p.id), &subs, AccessKind::Mutate));
        assert!(resolve(&p, Some(report), &subs, AccessKind::Mutate));
        assert!(resolve(&p, None, &subs, AccessKind::View));
        assert!(!resolve(&p, Some(stranger), &subs, AccessKind::View));
    }

    #[test]
    fn subordinate_membership_is_flat_not_transitive() {
        // u3 reports to u2 who reports to the leader; unless the caller
        // flattens the chain, u3's resources stay out of reach.
        let leader = principal(Role::SalesLeader);
        let u2 = PrincipalId::new();
        let u3 = PrincipalId::new();
        assert!(!resolve(&leader, Some(u3), &[u2], AccessKind::View));
        assert!(resolve(&leader, Some(u3), &[u2, u3], AccessKind::View));
    }

    #[test]
    fn filter_preserves_order_and_drops_foreign_items() {
        let p = principal(Role::Seller);
        let other = PrincipalId::new();
        let items = vec![Some(p.id), Some(other), None, Some(p.id)];
        let kept = filter_owned(&p, items, &[]);
        assert_eq!(kept, vec![Some(p.id), Some(p.id)]);
    }

    #[test]
    fn filter_for_superadmin_is_always_empty() {
        let p = Principal::platform(PrincipalId::new());
        let items = vec![Some(PrincipalId::new()), None];
        assert!(filter_owned(&p, items, &[]).is_empty());
    }

    use proptest::prelude::*;

    fn arb_principal_id() -> impl Strategy<Value = PrincipalId> {
        // Small id space so generated owners/subordinates actually collide.
        (0u128..8).prop_map(|n| PrincipalId::from_uuid(uuid::Uuid::from_u128(n)))
    }

    fn arb_owner() -> impl Strategy<Value = Option<PrincipalId>> {
        proptest::option::of(arb_principal_id())
    }

    proptest! {
        #![proptest_config(ProptestConfig {
            cases: 256,
            ..ProptestConfig::default()
        })]

        /// Property: the platform super-role is excluded from every owner and
        /// subordinate-set combination, both kinds of access.
        #[test]
        fn superadmin_exclusion_is_universal(
            owner in arb_owner(),
            subs in prop::collection::vec(arb_principal_id(), 0..6)
        ) {
            let p = Principal::platform(PrincipalId::new());
            prop_assert!(!resolve(&p, owner, &subs, AccessKind::View));
            prop_assert!(!resolve(&p, owner, &subs, AccessKind::Mutate));
        }

        /// Property: filtering is idempotent and preserves relative order.
        #[test]
        fn filter_is_idempotent_and_order_preserving(
            role_idx in 0usize..5,
            owners in prop::collection::vec(arb_owner(), 0..12),
            subs in prop::collection::vec(arb_principal_id(), 0..4)
        ) {
            let role = crate::role::ALL_ROLES[role_idx];
            let p = if role == Role::Superadmin {
                Principal::platform(PrincipalId::new())
            } else {
                principal(role)
            };

            let once = filter_owned(&p, owners.clone(), &subs);
            let twice = filter_owned(&p, once.clone(), &subs);
            prop_assert_eq!(&once, &twice);

            // Survivors appear in their original relative order.
            let mut cursor = owners.iter();
            for kept in &once {
                prop_assert!(cursor.any(|o| o == kept));
            }
        }

        /// Property: every resolution terminates in exactly one boolean and
        /// a mutate allowance implies a view allowance for the same inputs.
        #[test]
        fn mutate_access_never_exceeds_view_access(
            role_idx in 0usize..5,
            owner in arb_owner(),
            subs in prop::collection::vec(arb_principal_id(), 0..4)
        ) {
            let role = crate::role::ALL_ROLES[role_idx];
            let p = if role == Role::Superadmin {
                Principal::platform(PrincipalId::new())
            } else {
                principal(role)
            };
            if resolve(&p, owner, &subs, AccessKind::Mutate) {
                prop_assert!(resolve(&p, owner, &subs, AccessKind::View));
            }
        }
    }

    #[test]
    fn tenant_id_plays_no_part_in_resolution() {
        // Tenant scoping happens upstream of this engine; two principals that
        // differ only by tenant resolve identically.
        let id = PrincipalId::new();
        let a = Principal::new(id, Role::Seller, Some(TenantId::new())).unwrap();
        let b = Principal::new(id, Role::Seller, Some(TenantId::new())).unwrap();
        let owner = Some(id);
        assert_eq!(
            resolve(&a, owner, &[], AccessKind::View),
            resolve(&b, owner, &[], AccessKind::View)
        );
    }
}

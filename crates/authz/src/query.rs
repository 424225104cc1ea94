//! Plain-data query surface for external callers.
//!
//! Request handlers, RPC interceptors and UI guards talk to the engine
//! through these shapes. Everything is plain serde data (no framework
//! types), so the same engine sits behind HTTP middleware or runs in-process.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use motorlot_core::PrincipalId;

use crate::capability::Action;
use crate::engine::{AuthorizationEngine, DenialReason};
use crate::principal::Principal;

/// What an [`AccessRequest`] is aimed at.
///
/// Distinguishes "the module as a whole" (navigation guards, list pages,
/// create forms) from "this specific resource instance", whose owner may
/// legitimately be absent (unassigned pool).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum AccessTarget {
    Module,
    Resource { owner: Option<PrincipalId> },
}

/// A single authorization question.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccessRequest {
    pub principal: Principal,
    pub module: String,
    pub action: Action,
    pub target: AccessTarget,
    /// Flat set of the principal's direct reports, resolved by the caller's
    /// user directory. Ignored for module-level targets.
    #[serde(default)]
    pub subordinates: Vec<PrincipalId>,
}

/// The answer to an [`AccessRequest`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccessDecision {
    pub allowed: bool,
    /// Populated only on denial.
    pub reason: Option<DenialReason>,
    pub evaluated_at: DateTime<Utc>,
}

impl AccessDecision {
    fn allow() -> Self {
        Self {
            allowed: true,
            reason: None,
            evaluated_at: Utc::now(),
        }
    }

    fn deny(reason: DenialReason) -> Self {
        Self {
            allowed: false,
            reason: Some(reason),
            evaluated_at: Utc::now(),
        }
    }
}

/// Answer one authorization question.
///
/// Total: malformed requests (empty module name) are caller misuse and fail
/// closed with [`DenialReason::NotPermitted`] rather than erroring, so a
/// broken caller can never fail open.
pub fn decide(engine: &AuthorizationEngine, request: &AccessRequest) -> AccessDecision {
    if request.module.trim().is_empty() {
        tracing::warn!(
            principal = %request.principal.id,
            action = %request.action,
            "access request with empty module name"
        );
        return AccessDecision::deny(DenialReason::NotPermitted);
    }

    let principal = &request.principal;
    let module = request.module.as_str();

    let module_gate = match request.action {
        Action::View => engine.can_view_module(principal, module),
        Action::Create => engine.can_create_in_module(principal, module),
        Action::Edit => engine.can_edit_in_module(principal, module),
        Action::Delete => engine.can_delete_in_module(principal, module),
        Action::Assign => engine.can_assign_in_module(principal, module),
        Action::Approve => engine.can_approve_in_module(principal, module),
    };
    if !module_gate {
        return AccessDecision::deny(engine.denied_reason(Some(principal)));
    }

    // Ownership is consulted only for resource-scoped actions against a
    // concrete resource; everything else stops at the module gate.
    let owner = match &request.target {
        AccessTarget::Module => return AccessDecision::allow(),
        AccessTarget::Resource { owner } => *owner,
    };
    if !request.action.is_resource_scoped() {
        return AccessDecision::allow();
    }

    let resource_gate = match request.action {
        Action::View => engine.can_access_resource(principal, owner, &request.subordinates),
        Action::Edit => {
            engine.can_edit_resource(principal, module, owner, &request.subordinates)
        }
        Action::Delete => {
            engine.can_delete_resource(principal, module, owner, &request.subordinates)
        }
        // Unreachable: is_resource_scoped() is false for the rest.
        _ => true,
    };

    if resource_gate {
        AccessDecision::allow()
    } else {
        AccessDecision::deny(engine.denied_reason(Some(principal)))
    }
}

//! `motorlot-authz` — pure authorization engine for the Motorlot platform.
//!
//! Decides, for a given principal, module, action and target resource,
//! whether access is permitted. Three layers compose:
//!
//! - a fixed role hierarchy ([`Role`]),
//! - a data-driven per-module permission matrix ([`PermissionMatrix`]),
//! - an ownership resolver that accounts for manager/subordinate teams and
//!   the strict platform/tenant separation of the super-role.
//!
//! This crate is intentionally decoupled from HTTP, storage and session
//! handling: it consumes an already-authenticated [`Principal`] and
//! caller-resolved subordinate sets, and everything it returns is plain
//! data. All state is immutable after startup validation, so a single
//! engine value can serve concurrent requests without locking.

pub mod capability;
pub mod engine;
pub mod error;
pub mod matrix;
pub mod ownership;
pub mod principal;
pub mod query;
pub mod role;

pub use capability::{Action, Capability};
pub use engine::{AuthorizationEngine, DenialReason};
pub use error::ConfigError;
pub use matrix::{
    BUSINESS_MODULES, DECLARED_MODULES, MatrixBuilder, ModuleName, PermissionMatrix,
    is_business_module, modules,
};
pub use ownership::{AccessKind, OwnedResource};
pub use principal::Principal;
pub use query::{AccessDecision, AccessRequest, AccessTarget, decide};
pub use role::{ALL_ROLES, Role};

//! Configuration-time errors.
//!
//! These are the only hard failures in the crate. They are raised during
//! startup validation and must abort process start; per-request outcomes are
//! always values, never errors.

use thiserror::Error;

use crate::role::Role;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// A declared (module, role) pair is missing from the permission matrix.
    ///
    /// The matrix must be total over the declared module set so that "no
    /// capability" is always an intentional deny rather than an oversight.
    #[error("incomplete permission matrix: module '{module}' has no entry for role {role}")]
    IncompleteMatrix { module: String, role: Role },

    /// The matrix grants the platform super-role a capability in a tenant
    /// business module, which the platform/tenant separation forbids.
    #[error("matrix grants {role} '{action}' in business module '{module}'")]
    SuperadminBusinessGrant {
        module: String,
        role: Role,
        action: String,
    },
}

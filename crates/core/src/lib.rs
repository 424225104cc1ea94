//! `motorlot-core` — domain foundation building blocks.
//!
//! This crate contains **pure domain** primitives shared across the platform
//! (no infrastructure concerns): strongly-typed identifiers and the domain
//! error model.

pub mod error;
pub mod id;

pub use error::{DomainError, DomainResult};
pub use id::{PrincipalId, TenantId};

//! Role catalog: the fixed set of platform roles and their hierarchy.
//!
//! Roles are a closed enumeration, not user-extensible at runtime. Strings
//! coming off the wire go through exactly one validated parse step
//! ([`Role::from_str`]); decision logic only ever sees the enum.

use core::str::FromStr;
use serde::{Deserialize, Serialize};

use motorlot_core::DomainError;

/// Platform capability tier of a principal.
///
/// Declaration order is the hierarchy, highest platform privilege first.
/// The order is used only for hierarchy comparisons; module permissions are
/// matrix-driven independently (see `matrix`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Role {
    /// SaaS provider staff. Manages tenants, locations and admin accounts;
    /// has **no** access to any tenant's business resources.
    Superadmin,
    /// Dealership owner/general manager. Full control within the tenant.
    Admin,
    /// Branch/team lead. Supervises sellers; acts on their team's resources.
    SalesLeader,
    /// Individual seller. Acts only on resources assigned to them.
    Seller,
    /// Read-only access across the tenant.
    Auditor,
}

/// All roles, in hierarchy order (highest privilege first).
pub const ALL_ROLES: [Role; 5] = [
    Role::Superadmin,
    Role::Admin,
    Role::SalesLeader,
    Role::Seller,
    Role::Auditor,
];

impl Role {
    /// Position in the hierarchy; 0 is the highest platform privilege.
    pub fn rank(self) -> usize {
        match self {
            Role::Superadmin => 0,
            Role::Admin => 1,
            Role::SalesLeader => 2,
            Role::Seller => 3,
            Role::Auditor => 4,
        }
    }

    /// True iff `self` sits at or above `threshold` in the hierarchy.
    pub fn at_least(self, threshold: Role) -> bool {
        self.rank() <= threshold.rank()
    }

    /// Wire/storage name of the role.
    pub fn as_str(self) -> &'static str {
        match self {
            Role::Superadmin => "SUPERADMIN",
            Role::Admin => "ADMIN",
            Role::SalesLeader => "SALES_LEADER",
            Role::Seller => "SELLER",
            Role::Auditor => "AUDITOR",
        }
    }

    /// Short human-readable label (default English copy; callers may localize).
    pub fn label(self) -> &'static str {
        match self {
            Role::Superadmin => "Super Administrator",
            Role::Admin => "Administrator",
            Role::SalesLeader => "Sales Leader",
            Role::Seller => "Seller",
            Role::Auditor => "Auditor",
        }
    }

    /// One-line description of the role's scope.
    pub fn description(self) -> &'static str {
        match self {
            Role::Superadmin => "SaaS platform management: tenants, locations and admin accounts",
            Role::Admin => "Full control of the dealership",
            Role::SalesLeader => "Manages the seller team at their branch",
            Role::Seller => "Manages their own sales and customers",
            Role::Auditor => "Read-only view of reports and records",
        }
    }

    /// Roles allowed to write in business modules.
    ///
    /// Superadmin is excluded: it manages the platform, never tenant business.
    pub fn can_write(self) -> bool {
        matches!(self, Role::Admin | Role::SalesLeader | Role::Seller)
    }

    /// Read-only roles.
    pub fn is_read_only(self) -> bool {
        matches!(self, Role::Auditor)
    }

    /// Roles that manage a team of sellers (may act on subordinates'
    /// resources and on the unassigned pool).
    pub fn manages_team(self) -> bool {
        matches!(self, Role::Admin | Role::SalesLeader)
    }
}

impl core::fmt::Display for Role {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = DomainError;

    /// The single validated parse step at the system boundary; unknown role
    /// strings never reach decision logic.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "SUPERADMIN" => Ok(Role::Superadmin),
            "ADMIN" => Ok(Role::Admin),
            "SALES_LEADER" => Ok(Role::SalesLeader),
            "SELLER" => Ok(Role::Seller),
            "AUDITOR" => Ok(Role::Auditor),
            other => Err(DomainError::unknown_role(other)),
        }
    }
}

impl TryFrom<&str> for Role {
    type Error = DomainError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        value.parse()
    }
}

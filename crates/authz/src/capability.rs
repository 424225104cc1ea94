//! Capability sets and the actions they gate.

use serde::{Deserialize, Serialize};

/// An action a caller may request against a module or resource.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Action {
    View,
    Create,
    Edit,
    Delete,
    Assign,
    Approve,
}

impl Action {
    /// Actions that change state. Used by the ownership resolver to enforce
    /// read-only roles even against a misconfigured matrix entry.
    pub fn is_mutating(self) -> bool {
        !matches!(self, Action::View)
    }

    /// Actions that target a specific resource instance (and therefore go
    /// through the ownership gate in addition to the module gate).
    pub fn is_resource_scoped(self) -> bool {
        matches!(self, Action::View | Action::Edit | Action::Delete)
    }
}

impl core::fmt::Display for Action {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let s = match self {
            Action::View => "view",
            Action::Create => "create",
            Action::Edit => "edit",
            Action::Delete => "delete",
            Action::Assign => "assign",
            Action::Approve => "approve",
        };
        f.write_str(s)
    }
}

/// The capability booleans attached to a (module, role) pair.
///
/// `Default` is the all-false set: a pair absent from the matrix has no
/// capability whatsoever (fail closed).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Capability {
    pub view: bool,
    pub create: bool,
    pub edit: bool,
    pub delete: bool,
    #[serde(default)]
    pub assign: bool,
    #[serde(default)]
    pub approve: bool,
}

impl Capability {
    /// The deny-everything capability.
    pub const NONE: Capability = Capability {
        view: false,
        create: false,
        edit: false,
        delete: false,
        assign: false,
        approve: false,
    };

    pub fn allows(&self, action: Action) -> bool {
        match action {
            Action::View => self.view,
            Action::Create => self.create,
            Action::Edit => self.edit,
            Action::Delete => self.delete,
            Action::Assign => self.assign,
            Action::Approve => self.approve,
        }
    }

    /// True if this capability grants nothing at all.
    pub fn is_none(&self) -> bool {
        *self == Self::NONE
    }
}

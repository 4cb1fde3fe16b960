use serde::{Deserialize, Serialize};

use crate::domain::errors::{InventoryError, InventoryResult};

/// Caller role, supplied by the (out-of-scope) authentication layer.
///
/// Roles share a common record shape upstream; here only the tag matters and
/// allowed operations are capability checks on it, not virtual dispatch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Role {
    Admin,
    Supervisor,
    Employee,
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Role::Admin => write!(f, "admin"),
            Role::Supervisor => write!(f, "supervisor"),
            Role::Employee => write!(f, "employee"),
        }
    }
}

impl Role {
    /// Only admins create products or fan them out across units.
    pub fn can_manage_catalog(&self) -> bool {
        matches!(self, Role::Admin)
    }

    /// Supervisors observe; admins and employees move stock.
    pub fn can_transact(&self) -> bool {
        matches!(self, Role::Admin | Role::Employee)
    }

    /// Admins see every unit; other roles are scoped to their own.
    pub fn sees_all_units(&self) -> bool {
        matches!(self, Role::Admin)
    }
}

/// Explicit caller context passed into every service call.
///
/// Non-admin actors carry the unit they are assigned to; the core never reads
/// identity or session state on its own.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActorContext {
    pub role: Role,
    pub unit_id: Option<String>,
}

impl ActorContext {
    pub fn admin() -> Self {
        ActorContext {
            role: Role::Admin,
            unit_id: None,
        }
    }

    pub fn supervisor(unit_id: &str) -> Self {
        ActorContext {
            role: Role::Supervisor,
            unit_id: Some(unit_id.to_string()),
        }
    }

    pub fn employee(unit_id: &str) -> Self {
        ActorContext {
            role: Role::Employee,
            unit_id: Some(unit_id.to_string()),
        }
    }

    /// Unit filter for queries: `None` means a global search.
    pub fn search_scope(&self) -> Option<&str> {
        if self.role.sees_all_units() {
            None
        } else {
            self.unit_id.as_deref()
        }
    }

    /// Whether this actor may act on stock stored in `unit_id`.
    pub fn can_touch_unit(&self, unit_id: &str) -> bool {
        if self.role.sees_all_units() {
            return true;
        }
        self.unit_id.as_deref() == Some(unit_id)
    }

    pub(crate) fn require(&self, allowed: bool, action: &str) -> InventoryResult<()> {
        if allowed {
            Ok(())
        } else {
            Err(InventoryError::NotPermitted {
                role: self.role.to_string(),
                action: action.to_string(),
            })
        }
    }
}

//! Session context passed explicitly into each screen
//!
//! Screens never read the signed-in user from global state. Whoever builds a
//! screen hands it a [`Session`], and role checks go through it.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Console role of the signed-in user
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    /// Manages every hostel
    SuperAdmin,
    /// Manages one hostel
    Warden,
    /// Front-desk staff: can edit, cannot delete
    Staff,
    /// Read-only
    Student,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::SuperAdmin => "super_admin",
            Role::Warden => "warden",
            Role::Staff => "staff",
            Role::Student => "student",
        }
    }

    /// Parse role from string (for YAML config and stored profiles).
    /// Unknown roles get the least privilege.
    pub fn parse_role(s: &str) -> Self {
        match s.trim().to_ascii_lowercase().as_str() {
            "super_admin" | "superadmin" | "admin" => Role::SuperAdmin,
            "warden" => Role::Warden,
            "staff" => Role::Staff,
            _ => Role::Student,
        }
    }
}

/// Who is using the console, and within which hostel
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Session {
    pub user_id: Uuid,
    pub display_name: String,
    pub role: Role,
    /// Hostel the session is scoped to. `None` means every hostel.
    pub hostel_id: Option<Uuid>,
}

impl Session {
    pub fn new(display_name: impl Into<String>, role: Role, hostel_id: Option<Uuid>) -> Self {
        Self {
            user_id: Uuid::new_v4(),
            display_name: display_name.into(),
            role,
            hostel_id,
        }
    }

    /// Unscoped super admin session
    pub fn super_admin(display_name: impl Into<String>) -> Self {
        Self::new(display_name, Role::SuperAdmin, None)
    }

    /// May create and edit records
    pub fn can_write(&self) -> bool {
        matches!(self.role, Role::SuperAdmin | Role::Warden | Role::Staff)
    }

    /// May delete records
    pub fn can_delete(&self) -> bool {
        matches!(self.role, Role::SuperAdmin | Role::Warden)
    }

    /// Whether a record belonging to `hostel_id` is visible to this session.
    ///
    /// Unscoped sessions see everything; scoped sessions see their own
    /// hostel plus records not tied to any hostel.
    pub fn scope_allows(&self, hostel_id: Option<Uuid>) -> bool {
        match (self.hostel_id, hostel_id) {
            (None, _) => true,
            (Some(_), None) => true,
            (Some(mine), Some(theirs)) => mine == theirs,
        }
    }
}

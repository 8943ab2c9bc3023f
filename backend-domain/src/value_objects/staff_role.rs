// Staff role value object

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::errors::ValidationError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum StaffRole {
    Owner,
    Manager,
    Staff,
}

impl StaffRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            StaffRole::Owner => "OWNER",
            StaffRole::Manager => "MANAGER",
            StaffRole::Staff => "STAFF",
        }
    }

    pub fn parse(raw: &str) -> Result<Self, ValidationError> {
        match raw.trim().to_lowercase().as_str() {
            "owner" => Ok(StaffRole::Owner),
            "manager" => Ok(StaffRole::Manager),
            "staff" => Ok(StaffRole::Staff),
            other => Err(ValidationError::new(
                "managers_and_staff",
                format!("invalid role '{}'", other),
            )),
        }
    }

    /// Update and duplicate rights.
    pub fn can_manage(&self) -> bool {
        matches!(self, StaffRole::Owner | StaffRole::Manager)
    }

    pub fn can_delete(&self) -> bool {
        matches!(self, StaffRole::Owner)
    }
}

impl fmt::Display for StaffRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

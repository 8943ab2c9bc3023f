// Attendance mode value object

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::errors::ValidationError;

/// Per-event policy selecting how eligibility is determined.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AttendanceMode {
    All,
    Whitelist,
    Faculties,
}

impl AttendanceMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            AttendanceMode::All => "all",
            AttendanceMode::Whitelist => "whitelist",
            AttendanceMode::Faculties => "faculties",
        }
    }

    pub fn parse(raw: &str) -> Result<Self, ValidationError> {
        match raw.trim().to_lowercase().as_str() {
            "all" => Ok(AttendanceMode::All),
            "whitelist" => Ok(AttendanceMode::Whitelist),
            "faculties" => Ok(AttendanceMode::Faculties),
            other => Err(ValidationError::new(
                "attendance_type",
                format!("invalid attendance_type '{}'", other),
            )),
        }
    }

    /// Whether check-ins need an eligibility lookup at all.
    pub fn requires_access_check(&self) -> bool {
        !matches!(self, AttendanceMode::All)
    }
}

impl FromStr for AttendanceMode {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for AttendanceMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_is_case_insensitive() {
        assert_eq!(AttendanceMode::parse(" WhiteList ").expect("mode"), AttendanceMode::Whitelist);
        assert_eq!("faculties".parse::<AttendanceMode>().expect("mode"), AttendanceMode::Faculties);
    }

    #[test]
    fn parse_rejects_unknown_modes() {
        let err = AttendanceMode::parse("everyone").expect_err("reject");
        assert_eq!(err.field, "attendance_type");
    }

    #[test]
    fn only_all_skips_access_check() {
        assert!(!AttendanceMode::All.requires_access_check());
        assert!(AttendanceMode::Whitelist.requires_access_check());
        assert!(AttendanceMode::Faculties.requires_access_check());
    }
}

// Revealed field value object

use serde::{Deserialize, Serialize};

use crate::errors::ValidationError;

/// Participant data a scanner is allowed to see.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum RevealedField {
    #[serde(rename = "name")]
    Name,
    #[serde(rename = "organization")]
    Organization,
    #[serde(rename = "refid")]
    RefId,
    #[serde(rename = "photo")]
    Photo,
}

impl RevealedField {
    pub fn as_str(&self) -> &'static str {
        match self {
            RevealedField::Name => "name",
            RevealedField::Organization => "organization",
            RevealedField::RefId => "refid",
            RevealedField::Photo => "photo",
        }
    }

    pub fn parse(raw: &str) -> Result<Self, ValidationError> {
        match raw.trim().to_lowercase().as_str() {
            "name" => Ok(RevealedField::Name),
            "organization" => Ok(RevealedField::Organization),
            "refid" => Ok(RevealedField::RefId),
            "photo" => Ok(RevealedField::Photo),
            other => Err(ValidationError::new(
                "revealed_fields",
                format!("invalid participant field '{}'", other),
            )),
        }
    }

    /// Parses a non-empty list, dropping repeats while keeping first-seen order.
    pub fn parse_list(raw: &[String]) -> Result<Vec<Self>, ValidationError> {
        if raw.is_empty() {
            return Err(ValidationError::new("revealed_fields", "at least one field is required"));
        }
        let mut out = Vec::with_capacity(raw.len());
        for item in raw {
            let field = Self::parse(item)?;
            if !out.contains(&field) {
                out.push(field);
            }
        }
        Ok(out)
    }
}

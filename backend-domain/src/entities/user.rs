// User entity
// Local identity record keyed by the external ref-id

use serde::{Deserialize, Serialize};

use crate::value_objects::{OrgCode, RefId, RevealedField, UserId};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersonName {
    pub title: String,
    pub first_name: String,
    pub surname: String,
}

impl PersonName {
    pub fn is_blank(&self) -> bool {
        self.title.trim().is_empty()
            && self.first_name.trim().is_empty()
            && self.surname.trim().is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: UserId,
    pub ref_id: RefId,
    pub name_th: PersonName,
    pub name_en: PersonName,
}

impl User {
    pub fn from_identity(id: UserId, identity: &Identity) -> Self {
        Self {
            id,
            ref_id: identity.ref_id,
            name_th: identity.name_th.clone(),
            name_en: identity.name_en.clone(),
        }
    }
}

/// What the identity provider knows about a scanned person.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    pub ref_id: RefId,
    pub org_code: OrgCode,
    #[serde(default)]
    pub name_th: PersonName,
    #[serde(default)]
    pub name_en: PersonName,
    #[serde(default)]
    pub photo_url: Option<String>,
}

impl Identity {
    /// Identity known only by its credentials, for callers that resolved it themselves.
    pub fn bare(ref_id: RefId, org_code: OrgCode) -> Self {
        Self {
            ref_id,
            org_code,
            name_th: PersonName::default(),
            name_en: PersonName::default(),
            photo_url: None,
        }
    }
}

/// The subset of a participant's data an event lets its scanners see.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RevealedParticipant {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name_th: Option<PersonName>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name_en: Option<PersonName>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub organization: Option<OrgCode>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ref_id: Option<RefId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub photo_url: Option<String>,
}

impl RevealedParticipant {
    pub fn from_identity(identity: &Identity, fields: &[RevealedField]) -> Self {
        let mut out = Self::default();
        for field in fields {
            match field {
                RevealedField::Name => {
                    out.name_th = Some(identity.name_th.clone());
                    out.name_en = Some(identity.name_en.clone());
                }
                RevealedField::Organization => out.organization = Some(identity.org_code),
                RevealedField::RefId => out.ref_id = Some(identity.ref_id),
                RevealedField::Photo => out.photo_url = identity.photo_url.clone(),
            }
        }
        out
    }
}

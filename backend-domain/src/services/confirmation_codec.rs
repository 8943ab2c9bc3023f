// Reference code handed to scanners as a check-in receipt
// Wire format: base64("<rfc3339 nanos>.<checkin uuid>")

use base64::prelude::*;
use chrono::{DateTime, SecondsFormat, Utc};
use uuid::Uuid;

use crate::errors::CodecError;
use crate::value_objects::CheckinId;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConfirmationCode {
    pub scanned_at: DateTime<Utc>,
    pub checkin_id: CheckinId,
}

pub struct ConfirmationCodec;

impl ConfirmationCodec {
    pub fn encode(scanned_at: DateTime<Utc>, checkin_id: CheckinId) -> String {
        let plain = format!(
            "{}.{}",
            scanned_at.to_rfc3339_opts(SecondsFormat::Nanos, true),
            checkin_id
        );
        BASE64_STANDARD.encode(plain)
    }

    pub fn decode(code: &str) -> Result<ConfirmationCode, CodecError> {
        let bytes = BASE64_STANDARD
            .decode(code.trim())
            .map_err(|_| CodecError::InvalidEncoding)?;
        let plain = String::from_utf8(bytes).map_err(|_| CodecError::InvalidEncoding)?;
        // The timestamp itself contains a '.', so split on the last one.
        let (timestamp, id) = plain.rsplit_once('.').ok_or(CodecError::MissingSeparator)?;
        let scanned_at = DateTime::parse_from_rfc3339(timestamp)
            .map_err(|err| CodecError::InvalidTimestamp(err.to_string()))?
            .with_timezone(&Utc);
        let checkin_id = Uuid::parse_str(id)
            .map(CheckinId)
            .map_err(|err| CodecError::InvalidRecordId(err.to_string()))?;
        Ok(ConfirmationCode {
            scanned_at,
            checkin_id,
        })
    }
}

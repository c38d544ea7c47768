use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use crate::{Identity, Role, SubjectId, VerificationError};

/// Token payload as it travels on the wire.
///
/// `iat`/`exp` are NumericDate values with a millisecond fraction
/// (e.g. `1700000000.125`); whole-second integers are accepted on decode.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenClaims {
    /// Subject identifier.
    pub id: SubjectId,

    /// Display name.
    pub name: String,

    pub role: Role,

    /// Issued-at timestamp.
    #[serde(with = "numeric_date")]
    pub iat: DateTime<Utc>,

    /// Expiration timestamp.
    #[serde(with = "numeric_date")]
    pub exp: DateTime<Utc>,
}

impl TokenClaims {
    pub fn new(identity: Identity, issued_at: DateTime<Utc>, ttl: Duration) -> Self {
        let iat = truncate_to_millis(issued_at);
        let exp = iat
            .checked_add_signed(Duration::milliseconds(ttl.num_milliseconds()))
            .unwrap_or(DateTime::<Utc>::MAX_UTC);
        Self {
            id: identity.id,
            name: identity.name,
            role: identity.role,
            iat,
            exp: truncate_to_millis(exp),
        }
    }

    pub fn identity(&self) -> Identity {
        Identity {
            id: self.id,
            name: self.name.clone(),
            role: self.role.clone(),
        }
    }

    pub fn into_identity(self) -> Identity {
        Identity {
            id: self.id,
            name: self.name,
            role: self.role,
        }
    }
}

/// Check the expiry window of already signature-verified claims.
///
/// Valid up to and including the `exp` instant, expired from the next
/// millisecond on.
pub fn check_expiry(claims: &TokenClaims, now: DateTime<Utc>) -> Result<(), VerificationError> {
    if now.timestamp_millis() > claims.exp.timestamp_millis() {
        return Err(VerificationError::Expired);
    }
    Ok(())
}

fn truncate_to_millis(t: DateTime<Utc>) -> DateTime<Utc> {
    DateTime::from_timestamp_millis(t.timestamp_millis()).unwrap_or(t)
}

/// Fractional NumericDate (seconds since the epoch) at millisecond precision.
mod numeric_date {
    use chrono::{DateTime, Utc};
    use serde::{Deserialize, Deserializer, Serializer, de::Error};

    pub fn serialize<S: Serializer>(t: &DateTime<Utc>, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_f64(t.timestamp_millis() as f64 / 1000.0)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<DateTime<Utc>, D::Error> {
        let secs = f64::deserialize(d)?;
        if !secs.is_finite() {
            return Err(D::Error::custom("non-finite NumericDate"));
        }
        DateTime::from_timestamp_millis((secs * 1000.0).round() as i64)
            .ok_or_else(|| D::Error::custom("NumericDate out of range"))
    }
}

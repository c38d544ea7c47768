use serde::{Deserialize, Serialize};

use crate::Role;

/// Numeric subject identifier of an authenticated caller.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SubjectId(u64);

impl SubjectId {
    pub const fn new(id: u64) -> Self {
        Self(id)
    }

    pub fn get(&self) -> u64 {
        self.0
    }
}

impl core::fmt::Display for SubjectId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        core::fmt::Display::fmt(&self.0, f)
    }
}

impl From<u64> for SubjectId {
    fn from(value: u64) -> Self {
        Self(value)
    }
}

impl From<SubjectId> for u64 {
    fn from(value: SubjectId) -> Self {
        value.0
    }
}

/// Identity payload embedded in a token: who the caller is.
///
/// Serializes as `{ "id", "name", "role" }`, the same shape handed back to
/// clients at login.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    pub id: SubjectId,
    pub name: String,
    pub role: Role,
}

impl Identity {
    pub fn new(id: impl Into<SubjectId>, name: impl Into<String>, role: Role) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            role,
        }
    }
}

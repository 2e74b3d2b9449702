//! User domain types.

use serde::{Deserialize, Serialize};

/// User permission level.
///
/// Wire format on REST payloads is the snake_case name; storage uses the
/// numeric value (0 = Candidate, 1 = Recruiter, 2 = Admin). Ordering follows
/// privilege, so role gates can be written as `role >= UserRole::Admin`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UserRole {
    Candidate = 0,
    Recruiter = 1,
    Admin = 2,
}

impl UserRole {
    /// Convert from the stored numeric value. Returns `None` for unknown values.
    pub fn from_i16(v: i16) -> Option<Self> {
        match v {
            0 => Some(Self::Candidate),
            1 => Some(Self::Recruiter),
            2 => Some(Self::Admin),
            _ => None,
        }
    }

    /// Convert to the stored numeric value.
    pub fn as_i16(self) -> i16 {
        self as i16
    }

    /// Roles a self-service signup may request. Admin accounts are
    /// provisioned out of band and log in through the TOTP path.
    pub fn assignable_at_signup(self) -> bool {
        matches!(self, Self::Candidate | Self::Recruiter)
    }
}

impl PartialOrd for UserRole {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for UserRole {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.as_i16().cmp(&other.as_i16())
    }
}

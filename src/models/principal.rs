use std::fmt;

use serde::{Deserialize, Serialize};

use crate::models::user::User;
use crate::models::vendor::Vendor;

/// The two principal kinds the service knows. A hard separation, not a
/// hierarchy: a token minted for one kind never authorizes the other.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PrincipalKind {
    Vendor,
    User,
}

impl PrincipalKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            PrincipalKind::Vendor => "vendor",
            PrincipalKind::User => "user",
        }
    }
}

impl fmt::Display for PrincipalKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A (kind, id) pair naming a principal without loading its row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PrincipalRef {
    Vendor(i64),
    User(i64),
}

impl PrincipalRef {
    pub fn kind(&self) -> PrincipalKind {
        match self {
            PrincipalRef::Vendor(_) => PrincipalKind::Vendor,
            PrincipalRef::User(_) => PrincipalKind::User,
        }
    }

    pub fn id(&self) -> i64 {
        match self {
            PrincipalRef::Vendor(id) | PrincipalRef::User(id) => *id,
        }
    }

    /// Subject string embedded in signed tokens, e.g. `vendor:42`.
    pub fn subject(&self) -> String {
        format!("{}:{}", self.kind().as_str(), self.id())
    }

    /// Parses a token subject. `None` for anything that is not exactly
    /// `<kind>:<id>` with a known kind and an integer id.
    pub fn parse_subject(subject: &str) -> Option<Self> {
        let (kind, id) = subject.split_once(':')?;
        let id: i64 = id.parse().ok()?;
        match kind {
            "vendor" => Some(PrincipalRef::Vendor(id)),
            "user" => Some(PrincipalRef::User(id)),
            _ => None,
        }
    }
}

/// A fully loaded authenticated actor.
#[derive(Debug, Clone)]
pub enum Principal {
    Vendor(Vendor),
    User(User),
}

impl Principal {
    pub fn kind(&self) -> PrincipalKind {
        match self {
            Principal::Vendor(_) => PrincipalKind::Vendor,
            Principal::User(_) => PrincipalKind::User,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn subject_round_trips_for_both_kinds() {
        let vendor = PrincipalRef::Vendor(42);
        assert_eq!(vendor.subject(), "vendor:42");
        assert_eq!(PrincipalRef::parse_subject("vendor:42"), Some(vendor));

        let user = PrincipalRef::User(7);
        assert_eq!(user.subject(), "user:7");
        assert_eq!(PrincipalRef::parse_subject("user:7"), Some(user));
    }

    #[test]
    fn malformed_subjects_do_not_parse() {
        assert_eq!(PrincipalRef::parse_subject(""), None);
        assert_eq!(PrincipalRef::parse_subject("vendor"), None);
        assert_eq!(PrincipalRef::parse_subject("vendor:"), None);
        assert_eq!(PrincipalRef::parse_subject("vendor:abc"), None);
        assert_eq!(PrincipalRef::parse_subject("admin:1"), None);
    }
}

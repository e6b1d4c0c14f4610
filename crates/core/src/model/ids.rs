use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Error type for parsing an ID from a string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseIdError {
    kind: &'static str,
}

impl fmt::Display for ParseIdError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} cannot be empty", self.kind)
    }
}

impl std::error::Error for ParseIdError {}

macro_rules! string_id {
    ($(#[$meta:meta])* $name:ident, $prefix:literal) => {
        $(#[$meta])*
        #[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Wraps an existing identifier.
            #[must_use]
            pub fn new(id: impl Into<String>) -> Self {
                Self(id.into())
            }

            /// Creates a fresh identifier for a record created at runtime.
            #[must_use]
            pub fn generate() -> Self {
                Self(format!("{}_{}", $prefix, uuid::Uuid::new_v4().simple()))
            }

            #[must_use]
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Debug for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}({})", stringify!($name), self.0)
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl FromStr for $name {
            type Err = ParseIdError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                let trimmed = s.trim();
                if trimmed.is_empty() {
                    return Err(ParseIdError {
                        kind: stringify!($name),
                    });
                }
                Ok(Self(trimmed.to_owned()))
            }
        }

        impl From<&str> for $name {
            fn from(value: &str) -> Self {
                Self::new(value)
            }
        }
    };
}

string_id!(
    /// Unique identifier for a client account.
    ClientId,
    "client"
);
string_id!(
    /// Identifier shared by a phase template and the phases cloned from it.
    PhaseId,
    "phase"
);
string_id!(
    /// Identifier shared by a step template and the steps cloned from it.
    StepId,
    "step"
);
string_id!(
    /// Unique identifier for an uploaded file record.
    FileId,
    "file"
);
string_id!(
    /// Unique identifier for a meeting link.
    MeetingId,
    "meeting"
);

// ─── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn client_id_display_is_raw_value() {
        let id = ClientId::new("client1");
        assert_eq!(id.to_string(), "client1");
        assert_eq!(format!("{id:?}"), "ClientId(client1)");
    }

    #[test]
    fn parse_trims_and_rejects_blank() {
        let id: PhaseId = "  vetting ".parse().unwrap();
        assert_eq!(id, PhaseId::new("vetting"));
        assert!("   ".parse::<StepId>().is_err());
    }

    #[test]
    fn generated_ids_are_prefixed_and_unique() {
        let a = ClientId::generate();
        let b = ClientId::generate();
        assert!(a.as_str().starts_with("client_"));
        assert_ne!(a, b);
    }

    #[test]
    fn serializes_as_plain_string() {
        let json = serde_json::to_string(&StepId::new("v1")).unwrap();
        assert_eq!(json, "\"v1\"");
    }
}

//! Domain primitives shared by every record type.
//!
//! Identifiers follow the Newtype pattern so an employee id can never be
//! passed where a department id is expected.

pub mod events;

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Why a user-supplied id string was refused.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseIdError {
    #[error("not a whole number: {0}")]
    Invalid(String),

    #[error("ids cannot be negative: {0}")]
    Negative(i64),
}

macro_rules! record_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
        pub struct $name(i64);

        impl $name {
            /// Wraps an id as storage reported it; no range check.
            #[must_use]
            pub const fn new(id: i64) -> Self {
                Self(id)
            }

            /// Returns the underlying storage id.
            #[must_use]
            pub const fn value(&self) -> i64 {
                self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<$name> for i64 {
            fn from(id: $name) -> Self {
                id.0
            }
        }

        impl From<i64> for $name {
            fn from(id: i64) -> Self {
                Self::new(id)
            }
        }

        impl FromStr for $name {
            type Err = ParseIdError;

            /// Parses user input; negative ids are refused.
            fn from_str(s: &str) -> Result<Self, Self::Err> {
                let raw = s.trim();
                match raw.parse::<i64>() {
                    Ok(id) if id < 0 => Err(ParseIdError::Negative(id)),
                    Ok(id) => Ok(Self(id)),
                    Err(_) => Err(ParseIdError::Invalid(raw.to_string())),
                }
            }
        }

        impl Serialize for $name {
            fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
            where
                S: serde::Serializer,
            {
                serializer.serialize_i64(self.0)
            }
        }

        impl<'de> Deserialize<'de> for $name {
            fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
            where
                D: serde::Deserializer<'de>,
            {
                i64::deserialize(deserializer).map(Self)
            }
        }
    };
}

record_id!(
    /// Storage-assigned identifier of an employee record.
    EmployeeId
);
record_id!(
    /// Storage-assigned identifier of a department record.
    DepartmentId
);
record_id!(
    /// Storage-assigned identifier of a log entry.
    LogEntryId
);

/// Sort direction for table views.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOrder {
    #[default]
    Ascending,
    Descending,
}

impl SortOrder {
    #[must_use]
    pub const fn is_ascending(&self) -> bool {
        matches!(self, Self::Ascending)
    }

    /// Clicking the same column header flips the direction.
    #[must_use]
    pub const fn toggled(self) -> Self {
        match self {
            Self::Ascending => Self::Descending,
            Self::Descending => Self::Ascending,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn employee_id_conversions() {
        let id = EmployeeId::new(42);
        assert_eq!(id.value(), 42);
        assert_eq!(id.to_string(), "42");
        assert_eq!(i64::from(id), 42);
        assert_eq!(EmployeeId::from(42), id);
        assert_eq!(" 42 ".parse::<EmployeeId>().unwrap(), id);
        assert!("forty".parse::<EmployeeId>().is_err());
    }

    #[test]
    fn negative_ids_are_refused_from_input_but_kept_from_storage() {
        assert_eq!("-3".parse::<EmployeeId>(), Err(ParseIdError::Negative(-3)));
        assert_eq!(
            "4.5".parse::<DepartmentId>(),
            Err(ParseIdError::Invalid("4.5".to_string()))
        );
        assert_eq!(LogEntryId::new(-1).value(), -1);
        let wire: EmployeeId = serde_json::from_str("-2").unwrap();
        assert_eq!(wire.value(), -2);
    }

    #[test]
    fn sort_order_toggle() {
        assert!(SortOrder::Ascending.is_ascending());
        assert_eq!(SortOrder::Ascending.toggled(), SortOrder::Descending);
        assert_eq!(SortOrder::Descending.toggled(), SortOrder::Ascending);
    }

    #[test]
    fn id_serialization() {
        let id = DepartmentId::new(7);
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, "7");
        let back: DepartmentId = serde_json::from_str(&json).unwrap();
        assert_eq!(back, id);
    }
}

use std::fmt;
use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Whole-payload decode failure. Decoding is all-or-nothing: none of these
/// ever produce a partial candidate sequence.
#[derive(Debug, Error)]
pub enum DecodeError {
    #[error("Malformed payload at byte {offset}: {reason}")]
    Malformed {
        offset: usize,
        reason: String
    },
    #[error("Payload root must be an array of account objects")]
    RootNotArray
}

/// Failure reported by the account store.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Store rejected record: {0}")]
    Constraint(String),
    #[error("Store unavailable: {0}")]
    Unavailable(String)
}

/// One field-level schema violation, addressed by field path.
///
/// An empty `field` refers to the candidate as a whole (e.g. the candidate
/// is not an object at all).
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct FieldViolation {
    pub field: String,
    pub reason: String
}

impl FieldViolation {
    pub fn new(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            reason: reason.into()
        }
    }
}

impl Display for FieldViolation {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> fmt::Result {
        if self.field.is_empty() {
            write!(formatter, "{}", self.reason)
        } else {
            write!(formatter, "{}: {}", self.field, self.reason)
        }
    }
}

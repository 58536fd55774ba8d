use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::models::{Account, AccountStatus, FieldViolation, StoreError};

/// One rejected import candidate, carrying the original untyped input so an
/// operator can inspect exactly what was uploaded.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImportFailure {
    pub account: Value,
    pub message: String,
    /// Structured per-field violations. Empty when the failure came from the
    /// store rather than the validator.
    pub violations: Vec<FieldViolation>
}

impl ImportFailure {
    pub fn from_violations(account: Value, violations: Vec<FieldViolation>) -> Self {
        let message = violations
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join("; ");

        Self {
            account,
            message,
            violations
        }
    }

    pub fn from_store_error(account: Value, error: &StoreError) -> Self {
        Self {
            account,
            message: error.to_string(),
            violations: Vec::new()
        }
    }
}

/// Outcome of one bulk import request.
///
/// `accounts` and `error_details` partition the candidate sequence in input
/// order: `imported + errors` always equals the number of candidates
/// processed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImportReport {
    pub imported: usize,
    pub errors: usize,
    pub accounts: Vec<Account>,
    #[serde(rename = "errorDetails")]
    pub error_details: Vec<ImportFailure>
}

/// Per-status account counts. Every defined status appears as a key, zero
/// counts included, and the counts sum to `total`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatsSummary {
    pub total: usize,
    #[serde(rename = "byStatus")]
    pub by_status: BTreeMap<AccountStatus, usize>
}

//! Schema validation for untyped account candidates.
//!
//! Validation is strict: unknown fields are rejected rather than silently
//! dropped, and every violation for a candidate is collected before the
//! candidate is refused. Pure functions, no side effects.


use serde_json::Value;

use crate::models::{AccountStatus, FieldViolation, NewAccount};

const KNOWN_FIELDS: [&str; 3] = ["name", "email", "status"];

/// Validates one untyped candidate against the account schema.
///
/// Returns the normalized creation payload, or every violation found.
/// `status` defaults to `active` when absent.
pub fn validate(candidate: &Value) -> Result<NewAccount, Vec<FieldViolation>> {
    let Some(object) = candidate.as_object() else {
        return Err(vec![FieldViolation::new("", "candidate must be an object")]);
    };

    let mut violations = Vec::new();

    for key in object.keys() {
        if !KNOWN_FIELDS.contains(&key.as_str()) {
            violations.push(FieldViolation::new(key, "unknown field"));
        }
    }

    let name = match object.get("name") {
        Some(Value::String(name)) if !name.trim().is_empty() => Some(name.trim().to_string()),
        Some(Value::String(_)) => {
            violations.push(FieldViolation::new("name", "must not be empty"));
            None
        }
        Some(_) => {
            violations.push(FieldViolation::new("name", "must be a string"));
            None
        }
        None => {
            violations.push(FieldViolation::new("name", "required field is missing"));
            None
        }
    };

    let email = match object.get("email") {
        Some(Value::String(email)) if looks_like_email(email) => Some(email.clone()),
        Some(Value::String(_)) => {
            violations.push(FieldViolation::new("email", "must be a valid email address"));
            None
        }
        Some(_) => {
            violations.push(FieldViolation::new("email", "must be a string"));
            None
        }
        None => None
    };

    let status = match object.get("status") {
        Some(value) => parse_status(value, &mut violations),
        None => AccountStatus::Active
    };

    if let Some(name) = name {
        if violations.is_empty() {
            return Ok(NewAccount {
                name,
                email,
                status
            });
        }
    }

    Err(violations)
}

/// Validates a status-update body of the shape `{"status": "..."}`.
pub fn validate_status_update(body: &Value) -> Result<AccountStatus, Vec<FieldViolation>> {
    let Some(object) = body.as_object() else {
        return Err(vec![FieldViolation::new("", "request body must be an object")]);
    };

    let mut violations = Vec::new();

    for key in object.keys() {
        if key != "status" {
            violations.push(FieldViolation::new(key, "unknown field"));
        }
    }

    let status = match object.get("status") {
        Some(value) => parse_status(value, &mut violations),
        None => {
            violations.push(FieldViolation::new("status", "required field is missing"));
            AccountStatus::Active
        }
    };

    if violations.is_empty() {
        Ok(status)
    } else {
        Err(violations)
    }
}

/// Interprets a candidate `status` value, recording a violation when it is
/// not one of the defined variants. The fallback value is only reached when
/// a violation was recorded, so it never leaks into a success result.
fn parse_status(value: &Value, violations: &mut Vec<FieldViolation>) -> AccountStatus {
    match value {
        Value::String(raw) => raw.parse().unwrap_or_else(|_| {
            violations.push(FieldViolation::new(
                "status",
                format!("must be one of active, inactive, pending (got \"{raw}\")")
            ));
            AccountStatus::Active
        }),
        _ => {
            violations.push(FieldViolation::new("status", "must be a string"));
            AccountStatus::Active
        }
    }
}

fn looks_like_email(value: &str) -> bool {
    match value.split_once('@') {
        Some((local, domain)) => {
            !local.is_empty() && !domain.is_empty() && domain.contains('.') && !domain.contains('@')
        }
        None => false
    }
}

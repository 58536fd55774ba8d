use std::fmt;
use std::fmt::{Display, Formatter};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Lifecycle state of an account. Persisted accounts always carry one of
/// these values, never free-form text.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Ord, PartialOrd, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AccountStatus {
    Active,
    Inactive,
    Pending
}

impl AccountStatus {
    /// Every defined status, in canonical order. Stats reporting seeds its
    /// counters from this list so absent statuses still show up as zero.
    pub const ALL: [AccountStatus; 3] = [
        AccountStatus::Active,
        AccountStatus::Inactive,
        AccountStatus::Pending
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            AccountStatus::Active => "active",
            AccountStatus::Inactive => "inactive",
            AccountStatus::Pending => "pending"
        }
    }
}

impl Display for AccountStatus {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> fmt::Result {
        formatter.write_str(self.as_str())
    }
}

impl FromStr for AccountStatus {
    type Err = ();

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "active" => Ok(AccountStatus::Active),
            "inactive" => Ok(AccountStatus::Inactive),
            "pending" => Ok(AccountStatus::Pending),
            _ => Err(())
        }
    }
}

/// A persisted account record.
///
/// The `id` is assigned by the store at creation time; callers never supply
/// one. Mutation happens only through the explicit status-update operation.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct Account {
    pub id: u64,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    pub status: AccountStatus
}

/// A validated account creation payload.
///
/// Only the record validator constructs these, so holding one is proof the
/// candidate passed the schema.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct NewAccount {
    pub name: String,
    pub email: Option<String>,
    pub status: AccountStatus
}

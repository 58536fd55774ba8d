use std::collections::BTreeMap;
use std::sync::Arc;

use serde_json::Value;
use tracing::{debug, warn};

use crate::models::{AccountStatus, ImportFailure, ImportReport, StatsSummary, StoreError};
use crate::storage::AccountStore;
use crate::validator;

/// Orchestrates bulk imports and aggregate queries over the account store.
pub struct ImportEngine<S: AccountStore> {
    storage: Arc<S>
}

impl<S: AccountStore> ImportEngine<S> {
    /// Creates a new engine instance over the provided storage.
    pub fn new(storage: Arc<S>) -> Self {
        Self {
            storage
        }
    }

    /// Processes candidates sequentially in input order.
    ///
    /// Each candidate is validated and persisted on its own: a rejected or
    /// store-refused candidate becomes a report entry and the loop moves on,
    /// so no single record can abort the batch. Records created before a
    /// later failure stay persisted; there is no batch rollback.
    pub fn import(&self, candidates: Vec<Value>) -> ImportReport {
        let mut accounts = Vec::new();
        let mut error_details = Vec::new();

        for candidate in candidates {
            match validator::validate(&candidate) {
                Ok(payload) => match self.storage.create(payload) {
                    Ok(account) => {
                        debug!("Imported account [{}] \"{}\"", account.id, account.name);
                        accounts.push(account);
                    }
                    Err(error) => {
                        warn!("Store rejected import candidate: {error}");
                        error_details.push(ImportFailure::from_store_error(candidate, &error));
                    }
                },
                Err(violations) => {
                    warn!("Import candidate failed validation with {} violation(s)", violations.len());
                    error_details.push(ImportFailure::from_violations(candidate, violations));
                }
            }
        }

        ImportReport {
            imported: accounts.len(),
            errors: error_details.len(),
            accounts,
            error_details
        }
    }

    /// Computes per-status counts over the current account set.
    ///
    /// Counters are seeded from the full status enumeration first, so a
    /// status with no accounts reports 0 instead of going missing. Computed
    /// fresh on every call.
    pub fn stats(&self) -> Result<StatsSummary, StoreError> {
        let accounts = self.storage.get_all()?;

        let mut by_status: BTreeMap<AccountStatus, usize> =
            AccountStatus::ALL.iter().map(|status| (*status, 0)).collect();

        for account in &accounts {
            if let Some(count) = by_status.get_mut(&account.status) {
                *count += 1;
            }
        }

        Ok(StatsSummary {
            total: accounts.len(),
            by_status
        })
    }
}

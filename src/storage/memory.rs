use std::sync::atomic::{AtomicU64, Ordering};

use dashmap::DashMap;

use crate::models::{Account, AccountStatus, NewAccount, StoreError};
use crate::storage::AccountStore;

/// In-memory account store backed by a concurrent map.
///
/// Each operation touches a single map entry, so concurrent requests stay
/// independently atomic without any explicit locking here.
pub struct MemoryAccountStore {
    accounts: DashMap<u64, Account>,
    next_id: AtomicU64
}

impl MemoryAccountStore {
    pub fn new() -> Self {
        Self {
            accounts: DashMap::new(),
            next_id: AtomicU64::new(1)
        }
    }
}

impl Default for MemoryAccountStore {
    fn default() -> Self {
        Self::new()
    }
}

impl AccountStore for MemoryAccountStore {
    fn create(&self, payload: NewAccount) -> Result<Account, StoreError> {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);

        let account = Account {
            id,
            name: payload.name,
            email: payload.email,
            status: payload.status
        };

        self.accounts.insert(id, account.clone());

        Ok(account)
    }

    fn get_all(&self) -> Result<Vec<Account>, StoreError> {
        let mut accounts: Vec<Account> = self
            .accounts
            .iter()
            .map(|entry| entry.value().clone())
            .collect();

        accounts.sort_by_key(|account| account.id);

        Ok(accounts)
    }

    fn update_status(&self, id: u64, status: AccountStatus) -> Result<Option<Account>, StoreError> {
        Ok(self.accounts.get_mut(&id).map(|mut entry| {
            entry.status = status;
            entry.clone()
        }))
    }

    fn delete(&self, id: u64) -> Result<bool, StoreError> {
        Ok(self.accounts.remove(&id).is_some())
    }
}

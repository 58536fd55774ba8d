mod memory;

use crate::models::{Account, AccountStatus, NewAccount, StoreError};

pub use memory::MemoryAccountStore;

/// Contract the import engine and API depend on.
///
/// Every operation is fallible at the boundary and each call is atomic on
/// its own; nothing here promises transactional behavior across calls.
pub trait AccountStore: Send + Sync + 'static {
    /// Persists a validated payload, assigning the new record's id.
    fn create(&self, payload: NewAccount) -> Result<Account, StoreError>;

    /// Returns every account, ordered by ascending id.
    fn get_all(&self) -> Result<Vec<Account>, StoreError>;

    /// Updates the status of one account. `None` when the id is unknown.
    fn update_status(&self, id: u64, status: AccountStatus) -> Result<Option<Account>, StoreError>;

    /// Removes one account, reporting whether it existed.
    fn delete(&self, id: u64) -> Result<bool, StoreError>;
}

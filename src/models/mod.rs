mod account;
mod errors;
mod report;

pub use account::{Account, AccountStatus, NewAccount};
pub use errors::{DecodeError, FieldViolation, StoreError};
pub use report::{ImportFailure, ImportReport, StatsSummary};

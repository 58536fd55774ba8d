use super::ImportEngine;

use std::sync::Arc;

use anyhow::Result;
use serde_json::json;

use crate::models::{Account, AccountStatus, NewAccount, StoreError};
use crate::storage::{AccountStore, MemoryAccountStore};

/// Store stub whose `create` always fails, for exercising per-record
/// store-failure degradation.
struct RejectingStore;

impl AccountStore for RejectingStore {
    fn create(&self, _payload: NewAccount) -> Result<Account, StoreError> {
        Err(StoreError::Constraint("duplicate name".to_string()))
    }

    fn get_all(&self) -> Result<Vec<Account>, StoreError> {
        Ok(Vec::new())
    }

    fn update_status(&self, _id: u64, _status: AccountStatus) -> Result<Option<Account>, StoreError> {
        Ok(None)
    }

    fn delete(&self, _id: u64) -> Result<bool, StoreError> {
        Ok(false)
    }
}

fn memory_engine() -> (Arc<MemoryAccountStore>, ImportEngine<MemoryAccountStore>) {
    let storage = Arc::new(MemoryAccountStore::new());
    let engine = ImportEngine::new(storage.clone());

    (storage, engine)
}

#[test]
fn test_import_of_all_valid_candidates_reports_no_errors() {
    let (_, engine) = memory_engine();

    let report = engine.import(vec![
        json!({"name": "Acme"}),
        json!({"name": "Beta", "status": "inactive"}),
        json!({"name": "Gamma", "email": "ops@gamma.io"})
    ]);

    assert_eq!(report.imported, 3);
    assert_eq!(report.errors, 0);
    assert_eq!(report.accounts.len(), 3);
    assert!(report.error_details.is_empty());
}

#[test]
fn test_import_isolates_invalid_candidates_from_valid_ones() {
    let (_, engine) = memory_engine();

    let report = engine.import(vec![
        json!({"name": "Acme", "status": "active"}),
        json!({"name": ""}),
        json!({"name": "Beta", "status": "bogus"})
    ]);

    assert_eq!(report.imported, 1);
    assert_eq!(report.errors, 2);
    assert_eq!(report.accounts[0].name, "Acme");
    assert_eq!(report.accounts[0].status, AccountStatus::Active);

    assert_eq!(report.error_details[0].violations[0].field, "name");
    assert_eq!(report.error_details[1].violations[0].field, "status");
    // Rejected candidates keep their original input for inspection.
    assert_eq!(report.error_details[1].account["name"], json!("Beta"));
}

#[test]
fn test_import_counts_partition_the_candidate_sequence() {
    let (_, engine) = memory_engine();

    let candidates = vec![
        json!({"name": "Acme"}),
        json!(17),
        json!({"name": "Beta"}),
        json!({"unknown": true}),
        json!({"name": "Gamma"})
    ];
    let total = candidates.len();

    let report = engine.import(candidates);

    assert_eq!(report.imported + report.errors, total);
    assert_eq!(report.imported, report.accounts.len());
    assert_eq!(report.errors, report.error_details.len());
}

#[test]
fn test_import_preserves_input_order_in_both_sequences() {
    let (_, engine) = memory_engine();

    let report = engine.import(vec![
        json!({"name": "Gamma"}),
        json!({"name": ""}),
        json!({"name": "Acme"}),
        json!({"name": "", "status": "bogus"})
    ]);

    let names: Vec<&str> = report.accounts.iter().map(|account| account.name.as_str()).collect();

    assert_eq!(names, vec!["Gamma", "Acme"]);
    assert_eq!(report.error_details[0].violations.len(), 1);
    assert_eq!(report.error_details[1].violations.len(), 2);
}

#[test]
fn test_import_never_updates_existing_records() {
    let (storage, engine) = memory_engine();

    engine.import(vec![json!({"name": "Acme"})]);
    engine.import(vec![json!({"name": "Acme", "status": "inactive"})]);

    let accounts = storage.get_all().expect("memory store cannot fail");

    assert_eq!(accounts.len(), 2);
    assert_eq!(accounts[0].status, AccountStatus::Active);
}

#[test]
fn test_store_failure_degrades_to_report_entry() {
    let engine = ImportEngine::new(Arc::new(RejectingStore));

    let report = engine.import(vec![
        json!({"name": "Acme"}),
        json!({"name": "Beta"})
    ]);

    assert_eq!(report.imported, 0);
    assert_eq!(report.errors, 2);
    assert!(report.error_details[0].message.contains("duplicate name"));
    assert!(report.error_details[0].violations.is_empty());
}

#[test]
fn test_stats_on_empty_store_reports_every_status_as_zero() -> Result<()> {
    let (_, engine) = memory_engine();

    let summary = engine.stats()?;

    assert_eq!(summary.total, 0);
    assert_eq!(summary.by_status.len(), AccountStatus::ALL.len());
    assert!(summary.by_status.values().all(|count| *count == 0));

    Ok(())
}

#[test]
fn test_stats_counts_sum_to_total_and_include_zero_statuses() -> Result<()> {
    let (_, engine) = memory_engine();

    engine.import(vec![
        json!({"name": "Acme", "status": "active"}),
        json!({"name": "Beta", "status": "active"}),
        json!({"name": "Gamma", "status": "inactive"})
    ]);

    let summary = engine.stats()?;

    assert_eq!(summary.total, 3);
    assert_eq!(summary.by_status[&AccountStatus::Active], 2);
    assert_eq!(summary.by_status[&AccountStatus::Inactive], 1);
    // Absent is not the same as zero: pending must still be present.
    assert_eq!(summary.by_status[&AccountStatus::Pending], 0);
    assert_eq!(summary.by_status.values().sum::<usize>(), summary.total);

    Ok(())
}

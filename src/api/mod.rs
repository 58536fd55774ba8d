//! HTTP surface for the account service.
//!
//! Thin handlers: schema checks live in `validator`, payload decoding in
//! `decoder` and batch semantics in `engine`. Handlers only translate
//! between HTTP and those collaborators.

mod error;

use std::sync::Arc;

use axum::extract::{Multipart, Path, State};
use axum::http::StatusCode;
use axum::routing::{delete, get, patch, post};
use axum::{Json, Router};
use serde_json::Value;
use tower_http::trace::TraceLayer;

use crate::decoder;
use crate::engine::ImportEngine;
use crate::models::{Account, ImportReport, StatsSummary};
use crate::storage::{AccountStore, MemoryAccountStore};
use crate::validator;

pub use error::ApiError;

#[derive(Clone)]
pub struct AppState {
    storage: Arc<MemoryAccountStore>
}

impl AppState {
    pub fn new() -> Self {
        Self {
            storage: Arc::new(MemoryAccountStore::new())
        }
    }

    fn engine(&self) -> ImportEngine<MemoryAccountStore> {
        ImportEngine::new(self.storage.clone())
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}

pub fn app_router(state: AppState) -> Router {
    Router::new()
        .route("/api/accounts", get(list_accounts).post(create_account))
        .route("/api/accounts/stats", get(account_stats))
        .route("/api/accounts/import", post(import_accounts))
        .route("/api/accounts/{id}/status", patch(update_account_status))
        .route("/api/accounts/{id}", delete(delete_account))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn list_accounts(State(state): State<AppState>) -> Result<Json<Vec<Account>>, ApiError> {
    Ok(Json(state.storage.get_all()?))
}

async fn create_account(
    State(state): State<AppState>,
    Json(body): Json<Value>
) -> Result<(StatusCode, Json<Account>), ApiError> {
    let payload = validator::validate(&body).map_err(ApiError::Validation)?;
    let account = state.storage.create(payload)?;

    Ok((StatusCode::CREATED, Json(account)))
}

/// Resolves a raw path segment to an account id. A segment that is not a
/// valid id can never name a stored account, so it maps to the same JSON
/// 404 as a missing record rather than an extractor-level rejection.
fn parse_account_id(raw: &str) -> Result<u64, ApiError> {
    raw.parse().map_err(|_| ApiError::NotFound("Account not found"))
}

async fn update_account_status(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(body): Json<Value>
) -> Result<Json<Account>, ApiError> {
    let status = validator::validate_status_update(&body).map_err(ApiError::Validation)?;
    let id = parse_account_id(&id)?;

    match state.storage.update_status(id, status)? {
        Some(account) => Ok(Json(account)),
        None => Err(ApiError::NotFound("Account not found"))
    }
}

async fn delete_account(
    State(state): State<AppState>,
    Path(id): Path<String>
) -> Result<StatusCode, ApiError> {
    let id = parse_account_id(&id)?;

    if state.storage.delete(id)? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(ApiError::NotFound("Account not found"))
    }
}

/// Bulk import. Decode failure is all-or-nothing and maps to 400; a batch
/// with record-level failures still returns 200 with those failures embedded
/// in the report.
async fn import_accounts(
    State(state): State<AppState>,
    mut multipart: Multipart
) -> Result<Json<ImportReport>, ApiError> {
    let mut payload: Option<String> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|error| ApiError::BadRequest(format!("Invalid multipart body: {error}")))?
    {
        if field.name() == Some("file") {
            let bytes = field
                .bytes()
                .await
                .map_err(|error| ApiError::BadRequest(format!("Failed to read file: {error}")))?;

            payload = Some(String::from_utf8_lossy(&bytes).into_owned());
            break;
        }
    }

    let Some(payload) = payload else {
        return Err(ApiError::BadRequest("No file provided".to_string()));
    };

    let candidates = decoder::decode(&payload)?;

    Ok(Json(state.engine().import(candidates)))
}

async fn account_stats(State(state): State<AppState>) -> Result<Json<StatsSummary>, ApiError> {
    Ok(Json(state.engine().stats()?))
}

//! Account service with a bulk-import pipeline.
//!
//! Uploaded payloads flow through `decoder` (non-executing parse into
//! untyped candidates), then `engine` drives `validator` and `storage` per
//! candidate, isolating failures into a deterministic report. `api` exposes
//! the whole thing over HTTP+JSON.

pub mod api;
pub mod config;
pub mod decoder;
pub mod engine;
pub mod models;
pub mod storage;
pub mod validator;

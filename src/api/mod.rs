//! API client for the onetimesecret.com HTTP API.
//!
//! The client translates typed method calls into authenticated
//! form-encoded `POST` requests and decodes the JSON responses into the
//! types in [`types`]. Construction performs no I/O; every operation is
//! one synchronous request/response exchange.

pub mod client;
pub mod options;
pub mod types;

pub use client::{Client, RequestHook, RequestSnapshot, ResponseHook, ResponseSnapshot};
pub use options::{Params, SecretOption};
pub use types::{GeneratedSecret, Metadata, SecretStatus, Timestamp};

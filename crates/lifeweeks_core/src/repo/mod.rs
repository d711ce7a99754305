//! Key-value persistence contracts and backends.
//!
//! # Responsibility
//! - Define the minimal string get/set contract the memory store relies on.
//! - Provide in-memory and SQLite implementations of that contract.
//!
//! # Invariants
//! - A missing key is `Ok(None)`, never an error.
//! - Backends store values verbatim; they never interpret them.

pub mod kv_repo;

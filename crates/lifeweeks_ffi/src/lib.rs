//! Flutter-facing bindings for the life calendar core.

pub mod api;

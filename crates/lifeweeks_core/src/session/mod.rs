//! Headless presentation layer.
//!
//! # Responsibility
//! - Hold the view snapshot as an immutable record updated by a pure reducer.
//! - Perform memory load/save effects around the reducer in the controller.
//! - Re-derive stats and grid from the clock on every render pass.
//!
//! # Invariants
//! - At most one overlay (day picker or memory editor) is open.
//! - Start over discards view state but never persisted memories.

pub mod controller;
pub mod state;
pub mod view;

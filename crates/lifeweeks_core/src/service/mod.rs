//! Core use-case services.
//!
//! # Responsibility
//! - Orchestrate key-value persistence into memory use-cases.
//! - Keep CLI/FFI layers decoupled from storage details.

pub mod memory_service;

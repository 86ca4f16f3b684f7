//! Schemas and client boundary for the Tallybot ledger service.
//!
//! The ledger service owns all persistent state: user accounts and balances,
//! consumable goods, and the transaction log. This crate provides:
//!
//! - [`schemas`] - The data model the service exchanges
//! - [`client`] - The async [`ApiClient`] boundary trait
//! - [`http`] - The HTTP implementation used against a deployed service
//! - [`memory`] - An in-memory implementation for tests and local sessions
//! - [`permissions`] - Permission levels and the shared permission check

pub mod client;
pub mod error;
pub mod http;
pub mod memory;
pub mod permissions;
pub mod schemas;

// Re-export main types for convenience
pub use client::{ApiClient, SharedApiClient};
pub use error::ApiError;
pub use http::HttpApiClient;
pub use memory::MemoryApiClient;
pub use permissions::{PermissionLevel, ensure_permissions};
pub use schemas::{Alias, Consumable, Transaction, User};

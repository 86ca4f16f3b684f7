//! The async client boundary toward the ledger service.

use std::sync::Arc;

use async_trait::async_trait;

use crate::error::ApiError;
use crate::schemas::{Consumable, Transaction, User};

/// Operations the bot needs from the ledger service.
///
/// Implementations must be safe to share across concurrent message handlers.
/// Every failure is an [`ApiError`]; implementations never panic on remote
/// misbehavior.
#[async_trait]
pub trait ApiClient: Send + Sync {
    /// Resolves a user by one of their application aliases (e.g. a chat
    /// handle).
    async fn get_user_by_alias(&self, alias: &str) -> Result<User, ApiError>;

    /// Fetches a user by id.
    async fn get_user_by_id(&self, id: u64) -> Result<User, ApiError>;

    /// Lists every user account.
    async fn get_users(&self) -> Result<Vec<User>, ApiError>;

    /// The community account central funds are booked against.
    async fn get_community_user(&self) -> Result<User, ApiError>;

    /// Lists the consumable goods currently offered.
    async fn get_consumables(&self) -> Result<Vec<Consumable>, ApiError>;

    /// All transactions the user was part of, oldest first.
    async fn get_transactions_of_user(&self, user: &User) -> Result<Vec<Transaction>, ApiError>;

    /// Creates a fresh account linked to the given alias.
    async fn create_user(&self, alias: &str, name: Option<&str>) -> Result<User, ApiError>;

    /// Books a transfer between two users.
    async fn make_transaction(
        &self,
        sender: &User,
        receiver: &User,
        amount: i64,
        reason: &str,
    ) -> Result<Transaction, ApiError>;

    /// Books the consumption of `number` units of a consumable.
    async fn consume(
        &self,
        consumable: &Consumable,
        number: u32,
        consumer: &User,
    ) -> Result<Transaction, ApiError>;
}

/// A shareable handle to an [`ApiClient`] implementation.
pub type SharedApiClient = Arc<dyn ApiClient>;

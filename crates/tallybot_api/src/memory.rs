//! In-memory implementation of the client boundary.
//!
//! Backs the command tests and the local console session. State lives
//! behind a plain `RwLock`; no lock is ever held across an await point.

use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use async_trait::async_trait;
use chrono::Utc;

use crate::client::ApiClient;
use crate::error::ApiError;
use crate::schemas::{Alias, Consumable, Transaction, User};

/// Application id this bot registers aliases under.
const APPLICATION_ID: u64 = 1;

struct Ledger {
    community: User,
    users: Vec<User>,
    consumables: Vec<Consumable>,
    transactions: Vec<Transaction>,
    next_user_id: u64,
    next_alias_id: u64,
    next_transaction_id: u64,
}

/// Self-contained ledger holding its state in memory.
pub struct MemoryApiClient {
    state: RwLock<Ledger>,
    respect_stock: bool,
}

impl MemoryApiClient {
    /// Creates an empty ledger with a zero-balance community account.
    #[must_use]
    pub fn new() -> Self {
        let community = User {
            id: 0,
            name: Some("community".to_string()),
            balance: 0,
            permission: false,
            external: false,
            voucher_id: None,
            aliases: Vec::new(),
            created: Utc::now(),
            accessed: Utc::now(),
        };
        Self {
            state: RwLock::new(Ledger {
                community,
                users: Vec::new(),
                consumables: Vec::new(),
                transactions: Vec::new(),
                next_user_id: 1,
                next_alias_id: 1,
                next_transaction_id: 1,
            }),
            respect_stock: true,
        }
    }

    /// Disables the stock check on consumption.
    #[must_use]
    pub fn with_respect_stock(mut self, respect: bool) -> Self {
        self.respect_stock = respect;
        self
    }

    /// Seeds an internal user with vote permissions.
    pub fn seed_user(&self, alias: &str, name: Option<&str>, balance: i64) -> User {
        self.insert_user(alias, name, balance, false, true, None)
    }

    /// Seeds an external user, optionally vouched for by an internal one.
    pub fn seed_external_user(&self, alias: &str, voucher_id: Option<u64>) -> User {
        self.insert_user(alias, None, 0, true, false, voucher_id)
    }

    /// Seeds a consumable good.
    pub fn seed_consumable(
        &self,
        name: &str,
        price: i64,
        symbol: &str,
        stock: u32,
        messages: &[&str],
    ) -> Consumable {
        let mut ledger = self.write();
        let consumable = Consumable {
            id: ledger.consumables.len() as u64 + 1,
            name: name.to_string(),
            description: String::new(),
            price,
            symbol: symbol.to_string(),
            stock,
            messages: messages.iter().map(ToString::to_string).collect(),
        };
        ledger.consumables.push(consumable.clone());
        consumable
    }

    fn insert_user(
        &self,
        alias: &str,
        name: Option<&str>,
        balance: i64,
        external: bool,
        permission: bool,
        voucher_id: Option<u64>,
    ) -> User {
        let mut ledger = self.write();
        let user_id = ledger.next_user_id;
        ledger.next_user_id += 1;
        let alias_id = ledger.next_alias_id;
        ledger.next_alias_id += 1;

        let user = User {
            id: user_id,
            name: name.map(str::to_string),
            balance,
            permission,
            external,
            voucher_id,
            aliases: vec![Alias {
                id: alias_id,
                user_id,
                application_id: APPLICATION_ID,
                app_username: alias.to_string(),
                confirmed: true,
            }],
            created: Utc::now(),
            accessed: Utc::now(),
        };
        ledger.users.push(user.clone());
        user
    }

    fn read(&self) -> RwLockReadGuard<'_, Ledger> {
        self.state.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, Ledger> {
        self.state.write().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Default for MemoryApiClient {
    fn default() -> Self {
        Self::new()
    }
}

fn unknown_user(alias: &str) -> ApiError {
    ApiError::User(format!("Unknown user: {alias}"))
}

#[async_trait]
impl ApiClient for MemoryApiClient {
    async fn get_user_by_alias(&self, alias: &str) -> Result<User, ApiError> {
        let ledger = self.read();
        let mut matches = ledger.users.iter().filter(|user| {
            user.aliases
                .iter()
                .any(|a| a.app_username.eq_ignore_ascii_case(alias))
                || user
                    .name
                    .as_deref()
                    .is_some_and(|name| name.eq_ignore_ascii_case(alias))
        });

        let found = matches.next().ok_or_else(|| unknown_user(alias))?;
        if matches.next().is_some() {
            return Err(ApiError::User(format!("Ambiguous user reference: {alias}")));
        }
        Ok(found.clone())
    }

    async fn get_user_by_id(&self, id: u64) -> Result<User, ApiError> {
        let ledger = self.read();
        if ledger.community.id == id {
            return Ok(ledger.community.clone());
        }
        ledger
            .users
            .iter()
            .find(|user| user.id == id)
            .cloned()
            .ok_or_else(|| unknown_user(&id.to_string()))
    }

    async fn get_users(&self) -> Result<Vec<User>, ApiError> {
        Ok(self.read().users.clone())
    }

    async fn get_community_user(&self) -> Result<User, ApiError> {
        Ok(self.read().community.clone())
    }

    async fn get_consumables(&self) -> Result<Vec<Consumable>, ApiError> {
        Ok(self.read().consumables.clone())
    }

    async fn get_transactions_of_user(&self, user: &User) -> Result<Vec<Transaction>, ApiError> {
        Ok(self
            .read()
            .transactions
            .iter()
            .filter(|t| t.sender.id == user.id || t.receiver.id == user.id)
            .cloned()
            .collect())
    }

    async fn create_user(&self, alias: &str, name: Option<&str>) -> Result<User, ApiError> {
        {
            let ledger = self.read();
            let taken = ledger.users.iter().any(|user| {
                user.aliases
                    .iter()
                    .any(|a| a.app_username.eq_ignore_ascii_case(alias))
            });
            if taken {
                return Err(ApiError::User(format!(
                    "The alias {alias} is already registered"
                )));
            }
        }
        Ok(self.insert_user(alias, name, 0, false, false, None))
    }

    async fn make_transaction(
        &self,
        sender: &User,
        receiver: &User,
        amount: i64,
        reason: &str,
    ) -> Result<Transaction, ApiError> {
        if amount <= 0 {
            return Err(ApiError::User("The amount must be positive".to_string()));
        }
        if sender.id == receiver.id {
            return Err(ApiError::User(
                "You can't send money to yourself".to_string(),
            ));
        }

        let mut ledger = self.write();
        let now = Utc::now();

        let sender_idx = ledger
            .users
            .iter()
            .position(|user| user.id == sender.id)
            .ok_or_else(|| unknown_user(&sender.display_name()))?;
        let receiver_idx = ledger
            .users
            .iter()
            .position(|user| user.id == receiver.id)
            .ok_or_else(|| unknown_user(&receiver.display_name()))?;

        if ledger.users[sender_idx].external && ledger.users[sender_idx].voucher_id.is_none() {
            return Err(ApiError::User(
                "You are an external user without voucher and can't send money".to_string(),
            ));
        }

        ledger.users[sender_idx].balance -= amount;
        ledger.users[sender_idx].accessed = now;
        ledger.users[receiver_idx].balance += amount;
        ledger.users[receiver_idx].accessed = now;

        let transaction = Transaction {
            id: ledger.next_transaction_id,
            sender: ledger.users[sender_idx].clone(),
            receiver: ledger.users[receiver_idx].clone(),
            amount,
            reason: Some(reason.to_string()),
            timestamp: now,
        };
        ledger.next_transaction_id += 1;
        ledger.transactions.push(transaction.clone());
        Ok(transaction)
    }

    async fn consume(
        &self,
        consumable: &Consumable,
        number: u32,
        consumer: &User,
    ) -> Result<Transaction, ApiError> {
        if number == 0 {
            return Err(ApiError::User("The number must be positive".to_string()));
        }

        let mut ledger = self.write();
        let now = Utc::now();

        let consumable_idx = ledger
            .consumables
            .iter()
            .position(|c| c.id == consumable.id)
            .ok_or_else(|| ApiError::User(format!("Unknown consumable: {}", consumable.name)))?;

        if self.respect_stock && ledger.consumables[consumable_idx].stock < number {
            return Err(ApiError::User(format!(
                "Not enough {} in stock, only {} left",
                ledger.consumables[consumable_idx].name, ledger.consumables[consumable_idx].stock
            )));
        }

        let consumer_idx = ledger
            .users
            .iter()
            .position(|user| user.id == consumer.id)
            .ok_or_else(|| unknown_user(&consumer.display_name()))?;

        let price = ledger.consumables[consumable_idx]
            .price
            .checked_mul(i64::from(number))
            .ok_or_else(|| ApiError::User("The total price is too large".to_string()))?;
        let name = ledger.consumables[consumable_idx].name.clone();

        let stock = ledger.consumables[consumable_idx].stock;
        ledger.consumables[consumable_idx].stock = stock.saturating_sub(number);
        ledger.users[consumer_idx].balance -= price;
        ledger.users[consumer_idx].accessed = now;
        ledger.community.balance += price;

        let transaction = Transaction {
            id: ledger.next_transaction_id,
            sender: ledger.users[consumer_idx].clone(),
            receiver: ledger.community.clone(),
            amount: price,
            reason: Some(format!("consume: {number}x {name}")),
            timestamp: now,
        };
        ledger.next_transaction_id += 1;
        ledger.transactions.push(transaction.clone());
        Ok(transaction)
    }
}

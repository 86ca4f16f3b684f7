//! Data model exchanged with the ledger service.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A user account known to the ledger service.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct User {
    /// Service-wide user id.
    pub id: u64,
    /// Chosen username, if the user set one.
    pub name: Option<String>,
    /// Wallet balance in minor currency units; may be negative.
    pub balance: i64,
    /// Whether the user may vote on community operations.
    pub permission: bool,
    /// Whether the user is external to the community.
    pub external: bool,
    /// Internal user vouching for this external user, if any.
    pub voucher_id: Option<u64>,
    /// Per-application aliases linked to this account.
    pub aliases: Vec<Alias>,
    /// Account creation time.
    pub created: DateTime<Utc>,
    /// Time of the last transaction touching this account.
    pub accessed: DateTime<Utc>,
}

impl User {
    /// The name shown to other users: the username if set, otherwise the
    /// first linked alias, otherwise the numeric id.
    #[must_use]
    pub fn display_name(&self) -> String {
        if let Some(name) = &self.name {
            return name.clone();
        }
        if let Some(alias) = self.aliases.first() {
            return alias.app_username.clone();
        }
        format!("user {}", self.id)
    }
}

/// One application-specific alias of a user account.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Alias {
    /// Alias id.
    pub id: u64,
    /// Owning user id.
    pub user_id: u64,
    /// Application this alias belongs to.
    pub application_id: u64,
    /// The username within that application, e.g. a chat handle.
    pub app_username: String,
    /// Whether the alias has been confirmed from the owning application.
    pub confirmed: bool,
}

/// A consumable good the community stocks.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Consumable {
    /// Consumable id.
    pub id: u64,
    /// Lookup name, e.g. `mate`.
    pub name: String,
    /// Optional longer description for listings.
    #[serde(default)]
    pub description: String,
    /// Price per unit in minor currency units.
    pub price: i64,
    /// Symbol appended to consumption replies, once per consumed unit.
    pub symbol: String,
    /// Units currently in stock.
    pub stock: u32,
    /// Reply messages the bot picks from on consumption.
    pub messages: Vec<String>,
}

/// One booked transaction between two accounts.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    /// Transaction id.
    pub id: u64,
    /// Paying account at booking time.
    pub sender: User,
    /// Receiving account at booking time.
    pub receiver: User,
    /// Transferred amount in minor currency units; always positive.
    pub amount: i64,
    /// Free-text reason attached by the sender.
    pub reason: Option<String>,
    /// Booking time.
    pub timestamp: DateTime<Utc>,
}

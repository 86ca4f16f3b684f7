//! Command executor tests.

use std::sync::Arc;

use tallybot_api::MemoryApiClient;
use tallybot_commands::{ChatEvent, CommandRegistry, RoomInfo};
use tallybot_parsing::Message;
use tallybot_runtime::Dispatcher;

const ALICE: &str = "@alice:example.org";
const BOB: &str = "@bob:example.org";

struct Fixture {
    api: Arc<MemoryApiClient>,
    dispatcher: Dispatcher,
}

impl Fixture {
    fn new() -> Self {
        let api = Arc::new(MemoryApiClient::new());
        let registry = Arc::new(CommandRegistry::with_defaults());
        let dispatcher = Dispatcher::new(api.clone(), registry, "!");
        Self { api, dispatcher }
    }

    async fn send_as(&self, sender: &str, body: &str) -> Option<String> {
        let event = ChatEvent::new(sender, RoomInfo::new("!room:example.org", 2), Message::plain(body));
        self.dispatcher.handle(&event).await
    }

    async fn send_formatted(&self, sender: &str, plain: &str, formatted: &str) -> Option<String> {
        let event = ChatEvent::new(
            sender,
            RoomInfo::new("!room:example.org", 2),
            Message::plain(plain).with_formatted(formatted),
        );
        self.dispatcher.handle(&event).await
    }

    async fn send_in_group(&self, sender: &str, body: &str) -> Option<String> {
        let event = ChatEvent::new(sender, RoomInfo::new("!group:example.org", 12), Message::plain(body));
        self.dispatcher.handle(&event).await
    }
}

#[tokio::test]
async fn balance_reports_own_and_other_wallets() {
    let fixture = Fixture::new();
    fixture.api.seed_user(ALICE, Some("alice"), 1250);
    fixture.api.seed_user(BOB, Some("bob"), -300);

    let reply = fixture.send_as(ALICE, "!balance").await.unwrap();
    assert_eq!(reply, "Your balance is: 12.50€");

    let reply = fixture.send_as(ALICE, "!balance bob").await.unwrap();
    assert_eq!(reply, "Balance of bob is: -3.00€");
}

#[tokio::test]
async fn balance_resolves_mention_tokens() {
    let fixture = Fixture::new();
    fixture.api.seed_user(ALICE, Some("alice"), 0);
    fixture.api.seed_user(BOB, Some("bob"), 500);

    let reply = fixture
        .send_formatted(
            ALICE,
            "!balance Bob",
            r#"!balance <a href="https://matrix.to/#/@bob:example.org">Bob</a>"#,
        )
        .await
        .unwrap();
    assert_eq!(reply, "Balance of bob is: 5.00€");
}

#[tokio::test]
async fn send_transfers_and_confirms() {
    let fixture = Fixture::new();
    fixture.api.seed_user(ALICE, Some("alice"), 1000);
    fixture.api.seed_user(BOB, Some("bob"), 0);

    let reply = fixture
        .send_as(ALICE, "!send 2.50 bob for the crate")
        .await
        .unwrap();
    assert_eq!(reply, "<i>Okay, you sent 2.50€ to bob</i>");

    let reply = fixture.send_as(BOB, "!balance").await.unwrap();
    assert_eq!(reply, "Your balance is: 2.50€");

    // The reason words were recorded on the transaction.
    let reply = fixture.send_as(ALICE, "!history").await.unwrap();
    assert!(reply.contains("send: for the crate"));
}

#[tokio::test]
async fn send_rejects_bad_arguments_with_usage_lines() {
    let fixture = Fixture::new();
    fixture.api.seed_user(ALICE, Some("alice"), 1000);

    let reply = fixture.send_as(ALICE, "!send twelve bob").await.unwrap();
    assert!(reply.contains("`!send <amount> <receiver> [<reason> ...]`"));

    let reply = fixture.send_as(ALICE, "!send 0 bob").await.unwrap();
    assert!(reply.contains("An amount can't be zero"));
}

#[tokio::test]
async fn send_refusal_keeps_the_money() {
    let fixture = Fixture::new();
    fixture.api.seed_user(ALICE, Some("alice"), 1000);
    fixture.api.seed_user(BOB, Some("bob"), 0);
    fixture.api.seed_external_user("@eve:example.org", None);

    let reply = fixture
        .send_as("@eve:example.org", "!send 1 bob")
        .await
        .unwrap();
    assert!(reply.contains("No money has been transferred"));

    let reply = fixture.send_as(BOB, "!balance").await.unwrap();
    assert_eq!(reply, "Your balance is: 0.00€");
}

#[tokio::test]
async fn consume_books_against_the_community() {
    let fixture = Fixture::new();
    fixture.api.seed_user(ALICE, Some("alice"), 1000);
    fixture
        .api
        .seed_consumable("mate", 150, "x", 10, &["Cheers!"]);

    let reply = fixture.send_as(ALICE, "!consume mate 2").await.unwrap();
    assert_eq!(reply, "Cheers!xx");

    let reply = fixture.send_as(ALICE, "!balance").await.unwrap();
    assert_eq!(reply, "Your balance is: 7.00€");

    let reply = fixture.send_as(ALICE, "!funds").await.unwrap();
    assert!(reply.contains("3.00€"));
}

#[tokio::test]
async fn consume_wildcard_lists_the_goods() {
    let fixture = Fixture::new();
    fixture.api.seed_user(ALICE, Some("alice"), 0);
    fixture
        .api
        .seed_consumable("mate", 150, "x", 10, &["Cheers!"]);
    fixture.api.seed_consumable("coffee", 80, "c", 5, &["Ahh."]);

    let reply = fixture.send_as(ALICE, "!consume ?").await.unwrap();
    assert!(reply.contains("<b>mate</b>"));
    assert!(reply.contains("<b>coffee</b>"));
    assert!(reply.contains("price: 1.50€"));
}

#[tokio::test]
async fn consume_unknown_good_lists_the_usage() {
    let fixture = Fixture::new();
    fixture.api.seed_user(ALICE, Some("alice"), 0);

    let reply = fixture.send_as(ALICE, "!consume club").await.unwrap();
    assert!(reply.contains("club is not a consumable"));
}

#[tokio::test]
async fn consume_respects_stock() {
    let fixture = Fixture::new();
    fixture.api.seed_user(ALICE, Some("alice"), 1000);
    fixture.api.seed_consumable("mate", 150, "x", 1, &["Cheers!"]);

    let reply = fixture.send_as(ALICE, "!consume mate 5").await.unwrap();
    assert!(reply.contains("Not enough mate in stock"));
}

#[tokio::test]
async fn history_selects_the_export_usage_by_fallthrough() {
    let fixture = Fixture::new();
    fixture.api.seed_user(ALICE, Some("alice"), 1000);
    fixture.api.seed_user(BOB, Some("bob"), 0);

    fixture.send_as(ALICE, "!send 1 bob").await.unwrap();

    // Numeric argument: the report usage wins.
    let reply = fixture.send_as(ALICE, "!history 5").await.unwrap();
    assert!(reply.contains("Transaction history for alice"));

    // Non-numeric argument from the choice set: the export usage wins.
    let reply = fixture.send_as(ALICE, "!history json").await.unwrap();
    assert!(reply.contains("\"amount\": 100"));

    let reply = fixture.send_as(ALICE, "!history csv").await.unwrap();
    assert!(reply.contains("not implemented"));

    // Outside the choice set: both usages push the token back unconsumed
    // and report it as unrecognized, one line per usage.
    let reply = fixture.send_as(ALICE, "!history xml").await.unwrap();
    assert_eq!(reply.matches("Unrecognized argument: xml").count(), 2);
    assert!(reply.contains("`!history [<length>]`"));
    assert!(reply.contains("`!history [<export>]`"));
}

#[tokio::test]
async fn history_export_needs_a_private_room() {
    let fixture = Fixture::new();
    fixture.api.seed_user(ALICE, Some("alice"), 0);

    let reply = fixture
        .send_in_group(ALICE, "!history json")
        .await
        .unwrap();
    assert_eq!(reply, "This command can only be used in private chat.");
}

#[tokio::test]
async fn blame_names_the_deepest_debtors() {
    let fixture = Fixture::new();
    fixture.api.seed_user(ALICE, Some("alice"), 100);
    fixture.api.seed_user(BOB, Some("bob"), -500);

    let reply = fixture.send_as(ALICE, "!blame").await.unwrap();
    assert!(reply.contains("The user with the highest debt is:"));
    assert!(reply.contains("bob"));
}

#[tokio::test]
async fn blame_is_internal_only() {
    let fixture = Fixture::new();
    fixture.api.seed_user(ALICE, Some("alice"), 0);
    fixture.api.seed_external_user("@eve:example.org", None);

    let reply = fixture.send_as("@eve:example.org", "!blame").await.unwrap();
    assert!(reply.contains("You can't perform blame"));
}

#[tokio::test]
async fn blame_with_arguments_is_rejected() {
    let fixture = Fixture::new();
    fixture.api.seed_user(ALICE, Some("alice"), 0);

    let reply = fixture.send_as(ALICE, "!blame bob").await.unwrap();
    assert!(reply.contains("allows at most 0 arguments."));
}

#[tokio::test]
async fn funds_reports_surplus_and_debt() {
    let fixture = Fixture::new();
    fixture.api.seed_user(ALICE, Some("alice"), 1000);

    let reply = fixture.send_as(ALICE, "!funds").await.unwrap();
    assert!(reply.contains("currently holds 0.00€"));
}

#[tokio::test]
async fn start_creates_an_account_once() {
    let fixture = Fixture::new();

    let reply = fixture
        .send_as("@carol:example.org", "!start new carol")
        .await
        .unwrap();
    assert!(reply.contains("Welcome carol!"));

    let reply = fixture
        .send_as("@carol:example.org", "!balance")
        .await
        .unwrap();
    assert_eq!(reply, "Your balance is: 0.00€");

    // A second registration is refused by the ledger.
    let reply = fixture
        .send_as("@carol:example.org", "!start new carol")
        .await
        .unwrap();
    assert!(reply.contains("already registered"));
}

#[tokio::test]
async fn start_existing_usage_parses_but_declines() {
    let fixture = Fixture::new();

    let reply = fixture
        .send_as("@carol:example.org", "!start existing alias-from-elsewhere")
        .await
        .unwrap();
    assert!(reply.contains("not available"));
}

#[tokio::test]
async fn start_rejects_other_keywords_with_both_usages() {
    let fixture = Fixture::new();

    let reply = fixture
        .send_as("@carol:example.org", "!start maybe")
        .await
        .unwrap();
    assert!(reply.contains("`!start <new> [<username>]`"));
    assert!(reply.contains("`!start <existing> <alias>`"));
}

#[tokio::test]
async fn data_is_private_room_only() {
    let fixture = Fixture::new();
    fixture.api.seed_user(ALICE, Some("alice"), 420);

    let reply = fixture.send_in_group(ALICE, "!data").await.unwrap();
    assert_eq!(reply, "This command can only be used in private chat.");

    let reply = fixture.send_as(ALICE, "!data").await.unwrap();
    assert!(reply.contains("Balance: 4.20€"));
    assert!(reply.contains(ALICE));
}

#[tokio::test]
async fn unregistered_sender_gets_the_lookup_refusal() {
    let fixture = Fixture::new();

    let reply = fixture
        .send_as("@ghost:example.org", "!balance")
        .await
        .unwrap();
    assert!(reply.contains("Unknown user: @ghost:example.org"));
}

//! Help command tests.

use std::sync::Arc;

use tallybot_api::MemoryApiClient;
use tallybot_commands::{ChatEvent, CommandRegistry, RoomInfo};
use tallybot_parsing::Message;
use tallybot_runtime::Dispatcher;

const ALICE: &str = "@alice:example.org";

fn fixture() -> (Arc<MemoryApiClient>, Dispatcher) {
    let api = Arc::new(MemoryApiClient::new());
    let registry = Arc::new(CommandRegistry::with_defaults());
    let dispatcher = Dispatcher::new(api.clone(), registry, "!");
    (api, dispatcher)
}

async fn ask(dispatcher: &Dispatcher, sender: &str, body: &str) -> String {
    let event = ChatEvent::new(sender, RoomInfo::new("!room:example.org", 2), Message::plain(body));
    dispatcher.handle(&event).await.unwrap()
}

#[tokio::test]
async fn global_help_lists_every_command() {
    let (api, dispatcher) = fixture();
    api.seed_user(ALICE, Some("alice"), 0);

    let reply = ask(&dispatcher, ALICE, "!help").await;
    for name in [
        "balance", "blame", "consume", "data", "funds", "help", "history", "send", "start",
    ] {
        assert!(reply.contains(&format!("<b>{name}</b>")), "missing {name}");
    }
}

#[tokio::test]
async fn global_help_flags_unregistered_senders() {
    let (_api, dispatcher) = fixture();

    let reply = ask(&dispatcher, "@ghost:example.org", "!help").await;
    assert!(reply.contains("You are currently not registered."));
}

#[tokio::test]
async fn global_help_warns_unvouched_externals() {
    let (api, dispatcher) = fixture();
    api.seed_external_user("@eve:example.org", None);

    let reply = ask(&dispatcher, "@eve:example.org", "!help").await;
    assert!(reply.contains("You are an external user."));
    assert!(reply.contains("You don't have any voucher."));
}

#[tokio::test]
async fn command_help_shows_every_usage() {
    let (api, dispatcher) = fixture();
    api.seed_user(ALICE, Some("alice"), 0);

    let reply = ask(&dispatcher, ALICE, "!help history").await;
    assert!(reply.contains("Help on command <b>history</b>"));
    assert!(reply.contains("<code>!history [<length>]</code>"));
    assert!(reply.contains("<code>!history [<export>]</code>"));
}

#[tokio::test]
async fn help_for_unknown_name_falls_back_to_the_listing() {
    // The catchall slot swallows whatever the command coercer rejected, so
    // an unknown name still gets the global listing.
    let (api, dispatcher) = fixture();
    api.seed_user(ALICE, Some("alice"), 0);

    let reply = ask(&dispatcher, ALICE, "!help frobnicate").await;
    assert!(reply.contains("List of commands:"));
}

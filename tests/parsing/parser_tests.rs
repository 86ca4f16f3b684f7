//! Full parser pipeline tests.

use async_trait::async_trait;

use tallybot_parsing::action::{Action, Arity};
use tallybot_parsing::coerce::{self, CoerceAsync, Coercer};
use tallybot_parsing::error::{CoercionError, ParseError};
use tallybot_parsing::parser::CommandParser;
use tallybot_parsing::token::Token;
use tallybot_parsing::tokenizer::Message;

/// A slot that accepts any plain word.
fn word(dest: &str) -> Action<String, ()> {
    Action::new(dest, Coercer::sync(|token, _| coerce::string(token)))
}

/// A slot that accepts numbers only, rendered back as strings.
fn number(dest: &str) -> Action<String, ()> {
    Action::new(
        dest,
        Coercer::sync(|token, _| coerce::natural(token).map(|n| n.to_string())),
    )
}

fn tokens(words: &[&str]) -> Vec<Token> {
    words.iter().copied().map(Token::text).collect()
}

#[test]
fn multi_usage_disambiguation_falls_through_on_coercion() {
    // Usage A: one optional numeric length. Usage B: one export format from
    // a closed choice set. "json" must reject A and select B.
    let mut parser = CommandParser::new("history");
    parser.add_argument(number("length").with_arity(Arity::Optional));
    parser.new_usage().add_argument(
        word("export")
            .with_arity(Arity::Optional)
            .with_choices(vec!["json".to_string(), "csv".to_string()]),
    );

    let runtime = tokio::runtime::Runtime::new().unwrap();

    let args = runtime
        .block_on(parser.parse_arguments(tokens(&["json"]), &()))
        .unwrap();
    assert_eq!(args.single("export"), Some(&"json".to_string()));
    assert!(!args.contains("length"));

    let args = runtime
        .block_on(parser.parse_arguments(tokens(&["25"]), &()))
        .unwrap();
    assert_eq!(args.single("length"), Some(&"25".to_string()));
    assert!(!args.contains("export"));
}

#[test]
fn declaration_order_is_the_only_tie_break() {
    // Both usages would match a single word; the first declared wins.
    let mut parser = CommandParser::new("pick");
    parser.add_argument(word("first"));
    parser.new_usage().add_argument(word("second"));

    let runtime = tokio::runtime::Runtime::new().unwrap();
    let args = runtime
        .block_on(parser.parse_arguments(tokens(&["value"]), &()))
        .unwrap();
    assert_eq!(args.single("first"), Some(&"value".to_string()));
    assert!(!args.contains("second"));
}

#[test]
fn arity_mismatch_lists_every_usage() {
    let mut parser = CommandParser::new("start");
    parser.add_argument(word("new"));
    parser
        .new_usage()
        .add_argument(word("existing"))
        .add_argument(word("alias"));

    let runtime = tokio::runtime::Runtime::new().unwrap();
    let err = runtime
        .block_on(parser.parse_arguments(tokens(&["a", "b", "c"]), &()))
        .unwrap_err();

    assert!(err.message.contains("`!start <new>`"));
    assert!(err.message.contains("allows at most 1 argument."));
    assert!(err.message.contains("`!start <existing> <alias>`"));
    assert!(err.message.contains("allows at most 2 arguments."));
}

#[test]
fn reparsing_yields_equal_namespaces() {
    let mut parser = CommandParser::new("send");
    parser
        .add_argument(number("amount"))
        .add_argument(word("receiver"))
        .add_argument(word("reason").with_arity(Arity::Many));

    let runtime = tokio::runtime::Runtime::new().unwrap();
    let input = tokens(&["12", "bob", "for", "mate"]);
    let first = runtime
        .block_on(parser.parse_arguments(input.clone(), &()))
        .unwrap();
    let second = runtime
        .block_on(parser.parse_arguments(input, &()))
        .unwrap();
    assert_eq!(first, second);
}

#[test]
fn rendered_syntax_round_trips_into_its_usage() {
    let mut parser = CommandParser::new("demo");
    parser
        .add_argument(word("target"))
        .add_argument(word("mode").with_arity(Arity::Optional))
        .add_argument(word("notes").with_arity(Arity::Many));

    assert_eq!(
        parser.default_usage().syntax(),
        "<target> [<mode>] [<notes> ...]"
    );

    let runtime = tokio::runtime::Runtime::new().unwrap();

    // Minimum shape: required slots only.
    let args = runtime
        .block_on(parser.parse_arguments(tokens(&["x"]), &()))
        .unwrap();
    assert_eq!(args.single("target"), Some(&"x".to_string()));

    // Full shape: every slot satisfied.
    let args = runtime
        .block_on(parser.parse_arguments(tokens(&["x", "y", "n1", "n2"]), &()))
        .unwrap();
    assert_eq!(args.single("mode"), Some(&"y".to_string()));
    assert_eq!(
        args.seq("notes"),
        Some(&["n1".to_string(), "n2".to_string()][..])
    );
}

#[test]
fn exactly_n_binds_a_sequence() {
    let mut parser = CommandParser::new("link");
    parser.add_argument(word("alias").with_arity(Arity::Exactly(1)));

    let runtime = tokio::runtime::Runtime::new().unwrap();
    let args = runtime
        .block_on(parser.parse_arguments(tokens(&["abc"]), &()))
        .unwrap();
    assert_eq!(args.seq("alias"), Some(&["abc".to_string()][..]));
}

#[test]
fn parse_drops_the_command_name_token() {
    let mut parser = CommandParser::new("echo");
    parser.add_argument(word("word"));

    let runtime = tokio::runtime::Runtime::new().unwrap();
    let args = runtime
        .block_on(parser.parse(&Message::plain("!echo hello"), &()))
        .unwrap();
    assert_eq!(args.single("word"), Some(&"hello".to_string()));
}

#[test]
fn corrupt_markup_is_not_a_parsing_error() {
    let parser: CommandParser<String, ()> = CommandParser::new("echo");
    let message = Message::plain("!echo").with_formatted("!echo <a>oops");

    let runtime = tokio::runtime::Runtime::new().unwrap();
    let err = runtime.block_on(parser.parse(&message, &())).unwrap_err();
    assert!(matches!(err, ParseError::Tokenize(_)));
}

/// Directory standing in for the remote lookup a mention resolution needs.
struct Directory {
    known: Vec<&'static str>,
}

/// Lookup resolving a handle through the directory.
struct DirectoryLookup;

#[async_trait]
impl CoerceAsync<String, Directory> for DirectoryLookup {
    async fn coerce(&self, token: &Token, directory: &Directory) -> Result<String, CoercionError> {
        let handle = match token {
            Token::Text(text) => text.clone(),
            Token::Mention { target, .. } => target.clone(),
        };
        if directory.known.contains(&handle.as_str()) {
            Ok(handle)
        } else {
            Err(CoercionError::new(format!("Unknown user: {handle}")))
        }
    }
}

/// Async slot resolving a handle through the directory.
fn member(dest: &str) -> Action<String, Directory> {
    Action::new(dest, Coercer::asynchronous(DirectoryLookup))
}

#[test]
fn async_lookup_failures_drive_the_same_aggregation() {
    let mut parser = CommandParser::new("balance");
    parser.add_argument(member("user").with_arity(Arity::Optional));

    let directory = Directory {
        known: vec!["@alice:x.yz"],
    };
    let runtime = tokio::runtime::Runtime::new().unwrap();

    let args = runtime
        .block_on(parser.parse_arguments(tokens(&["@alice:x.yz"]), &directory))
        .unwrap();
    assert_eq!(args.single("user"), Some(&"@alice:x.yz".to_string()));

    let err = runtime
        .block_on(parser.parse_arguments(tokens(&["@nobody:x.yz"]), &directory))
        .unwrap_err();
    assert!(err.message.contains("Unknown user: @nobody:x.yz"));
}

#[test]
fn mention_tokens_reach_async_coercers_atomically() {
    let mut parser = CommandParser::new("balance");
    parser.add_argument(member("user"));

    let directory = Directory {
        known: vec!["@bob:x.yz"],
    };
    let message = Message::plain("!balance Bob")
        .with_formatted(r#"!balance <a href="@bob:x.yz">Bob the Builder</a>"#);

    let runtime = tokio::runtime::Runtime::new().unwrap();
    let args = runtime.block_on(parser.parse(&message, &directory)).unwrap();
    assert_eq!(args.single("user"), Some(&"@bob:x.yz".to_string()));
}

//! Tokenizer tests.
//!
//! Tests for converting message bodies into token streams.

use tallybot_parsing::error::TokenizeError;
use tallybot_parsing::token::Token;
use tallybot_parsing::tokenizer::{Message, Tokenizer};

#[test]
fn plain_body_splits_on_whitespace_runs() {
    let tokens = Tokenizer::tokenize(&Message::plain("10.5 @alice  reason\twords")).unwrap();
    assert_eq!(
        tokens,
        vec![
            Token::text("10.5"),
            Token::text("@alice"),
            Token::text("reason"),
            Token::text("words"),
        ]
    );
}

#[test]
fn empty_body_yields_no_tokens() {
    assert!(Tokenizer::tokenize(&Message::plain("")).unwrap().is_empty());
    assert!(Tokenizer::tokenize(&Message::plain("   ")).unwrap().is_empty());
}

#[test]
fn formatted_body_wins_over_plain() {
    let message = Message::plain("plain text").with_formatted("<b>rich</b> text");
    let tokens = Tokenizer::tokenize(&message).unwrap();
    assert_eq!(tokens, vec![Token::text("rich"), Token::text("text")]);
}

#[test]
fn mention_element_becomes_one_atomic_token() {
    let tokens = Tokenizer::tokenize_formatted(
        r#"<a href="https://matrix.to/#/@bob:x.yz">Bob</a> 5"#,
    )
    .unwrap();
    assert_eq!(
        tokens,
        vec![
            Token::mention("https://matrix.to/#/@bob:x.yz", "Bob"),
            Token::text("5"),
        ]
    );
}

#[test]
fn mention_label_whitespace_does_not_split() {
    let tokens = Tokenizer::tokenize_formatted(
        r#"pay <a href="https://matrix.to/#/@bob:x.yz">Bob the Builder</a> now"#,
    )
    .unwrap();
    assert_eq!(tokens.len(), 3);
    assert_eq!(
        tokens[1],
        Token::mention("https://matrix.to/#/@bob:x.yz", "Bob the Builder")
    );
}

#[test]
fn interleaving_keeps_document_order() {
    let tokens = Tokenizer::tokenize_formatted(
        r##"a <a href="#/@x:y.zz">X</a> b <a href="#/@w:y.zz">W</a> c"##,
    )
    .unwrap();
    assert_eq!(
        tokens,
        vec![
            Token::text("a"),
            Token::mention("#/@x:y.zz", "X"),
            Token::text("b"),
            Token::mention("#/@w:y.zz", "W"),
            Token::text("c"),
        ]
    );
}

#[test]
fn decorative_markup_is_dropped() {
    let tokens =
        Tokenizer::tokenize_formatted("<b>bold</b> <i>italic</i><br/><code>code</code>").unwrap();
    assert_eq!(
        tokens,
        vec![Token::text("bold"), Token::text("italic"), Token::text("code")]
    );
}

#[test]
fn nested_mentions_keep_the_innermost_text() {
    // Documented surprising edge case: text buffered before a nested
    // mention opens is discarded, and the outer element closes with the
    // text event seen last.
    let tokens = Tokenizer::tokenize_formatted("<a>1<a>2</a>3</a>").unwrap();
    assert_eq!(tokens, vec![Token::mention("", "2"), Token::mention("", "3")]);
}

#[test]
fn text_after_inner_markup_replaces_the_label() {
    // Each text event replaces the open element's buffer outright.
    let tokens = Tokenizer::tokenize_formatted("<a href=\"#/@b:x\">Bob <b>x</b> Smith</a>").unwrap();
    assert_eq!(tokens, vec![Token::mention("#/@b:x", " Smith")]);
}

#[test]
fn unclosed_mention_is_corrupt_input() {
    assert_eq!(
        Tokenizer::tokenize_formatted("<a href=\"#/@b:x\">Bob"),
        Err(TokenizeError::UnclosedMention)
    );
}

#[test]
fn unmatched_closing_tag_is_corrupt_input() {
    assert_eq!(
        Tokenizer::tokenize_formatted("hello</a>"),
        Err(TokenizeError::UnmatchedClose)
    );
}

#[test]
fn attribute_quoting_protects_angle_brackets() {
    let tokens = Tokenizer::tokenize_formatted(r#"<a href="x>y">B</a>"#).unwrap();
    assert_eq!(tokens, vec![Token::mention("x>y", "B")]);
}

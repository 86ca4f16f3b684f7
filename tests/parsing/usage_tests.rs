//! Usage grammar tests.

use tallybot_parsing::action::{Action, Arity};
use tallybot_parsing::coerce::{self, Coercer};
use tallybot_parsing::usage::Usage;

fn word(dest: &str, arity: Arity) -> Action<String, ()> {
    Action::new(dest, Coercer::sync(|token, _| coerce::string(token))).with_arity(arity)
}

#[test]
fn bounds_sum_over_actions() {
    let mut usage = Usage::new();
    usage
        .add_argument(word("amount", Arity::One))
        .add_argument(word("receiver", Arity::One))
        .add_argument(word("reason", Arity::Many));

    assert_eq!(usage.min_arguments(), 2);
    assert_eq!(usage.max_arguments(), None);
}

#[test]
fn exactly_n_contributes_n_both_ways() {
    let mut usage = Usage::new();
    usage
        .add_argument(word("keyword", Arity::One))
        .add_argument(word("alias", Arity::Exactly(2)));

    assert_eq!(usage.min_arguments(), 3);
    assert_eq!(usage.max_arguments(), Some(3));
}

#[test]
fn empty_usage_accepts_nothing() {
    let usage: Usage<String, ()> = Usage::new();
    assert_eq!(usage.min_arguments(), 0);
    assert_eq!(usage.max_arguments(), Some(0));
    assert_eq!(usage.syntax(), "");
}

#[test]
fn syntax_brackets_optional_and_marks_repetition() {
    let mut usage = Usage::new();
    usage
        .add_argument(word("amount", Arity::One))
        .add_argument(word("receiver", Arity::Optional))
        .add_argument(word("reason", Arity::Many));

    assert_eq!(usage.syntax(), "<amount> [<receiver>] [<reason> ...]");
    assert_eq!(usage.to_string(), usage.syntax());
}

#[test]
#[should_panic(expected = "duplicate destination key `user`")]
fn duplicate_destination_is_a_registration_error() {
    let mut usage = Usage::new();
    usage
        .add_argument(word("user", Arity::One))
        .add_argument(word("user", Arity::Optional));
}

//! Standard coercer tests.

use proptest::prelude::*;

use tallybot_parsing::coerce;
use tallybot_parsing::token::Token;

#[test]
fn amount_accepts_the_documented_shapes() {
    assert_eq!(coerce::amount(&Token::text("123")), Ok(12300));
    assert_eq!(coerce::amount(&Token::text("1.23")), Ok(123));
    assert_eq!(coerce::amount(&Token::text("1,2")), Ok(120));
    assert_eq!(coerce::amount(&Token::text("12.5")), Ok(1250));
}

#[test]
fn amount_rejects_zero() {
    assert!(coerce::amount(&Token::text("0")).is_err());
    assert!(coerce::amount(&Token::text("0.0")).is_err());
    assert!(coerce::amount(&Token::text("0,00")).is_err());
}

#[test]
fn amount_rejects_more_than_two_fractional_digits() {
    assert!(coerce::amount(&Token::text("12.345")).is_err());
    assert!(coerce::amount(&Token::text("1,234")).is_err());
}

#[test]
fn amount_rejects_signs_and_separators() {
    assert!(coerce::amount(&Token::text("-1")).is_err());
    assert!(coerce::amount(&Token::text("+1")).is_err());
    assert!(coerce::amount(&Token::text("1 000")).is_err());
    assert!(coerce::amount(&Token::text("1.2.3")).is_err());
}

#[test]
fn natural_is_strictly_positive() {
    assert_eq!(coerce::natural(&Token::text("7")), Ok(7));
    assert!(coerce::natural(&Token::text("0")).is_err());
    assert!(coerce::natural(&Token::text("-1")).is_err());
    assert!(coerce::natural(&Token::text("seven")).is_err());
}

#[test]
fn text_coercers_reject_mentions() {
    let mention = Token::mention("https://matrix.to/#/@bob:x.yz", "12");
    assert!(coerce::string(&mention).is_err());
    assert!(coerce::lowercase(&mention).is_err());
    assert!(coerce::amount(&mention).is_err());
    assert!(coerce::natural(&mention).is_err());
}

proptest! {
    /// Rendering any minor-unit value and coercing it back is lossless.
    #[test]
    fn amount_round_trips_minor_units(minor in 1i64..=99_999_999) {
        let rendered = format!("{}.{:02}", minor / 100, minor % 100);
        prop_assert_eq!(coerce::amount(&Token::text(rendered)), Ok(minor));
    }

    /// Every strictly positive u32 parses as a natural number.
    #[test]
    fn natural_accepts_all_positive_integers(value in 1u32..) {
        prop_assert_eq!(coerce::natural(&Token::text(value.to_string())), Ok(value));
    }

    /// Whole-unit inputs scale by one hundred.
    #[test]
    fn amount_scales_whole_units(units in 1i64..=1_000_000) {
        prop_assert_eq!(coerce::amount(&Token::text(units.to_string())), Ok(units * 100));
    }
}

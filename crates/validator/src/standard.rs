//! Standard rules for common flight-configuration fields.
//!
//! Pattern regexes are compiled once per process and shared by every rule
//! built from them.
//!
//! Each rule carries a fixed message describing the field kind it checks
//! (`required`, `invalid city code`, ...). These rules are built outside any
//! validator, so [`ValidatorConfig`](crate::ValidatorConfig) messages do not
//! apply to them; use `with_message` to replace one.

use std::sync::LazyLock;

use fieldkit_descriptor::Value;
use regex::Regex;

use crate::config;
use crate::rules::{CustomRule, PatternRule};

static CITY_CODE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[a-zA-Z]{3}$").expect("valid city-code regex"));

static AIRLINE_CODE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[a-zA-Z0-9]{2}$").expect("valid airline-code regex"));

static AIRLINE_CODES: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[a-zA-Z0-9]{2}(,[a-zA-Z0-9]{2})*$").expect("valid airline-code list regex")
});

static FLIGHT_NUMBER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[a-zA-Z0-9]{2}\d{3,4}[a-zA-Z]?$").expect("valid flight-number regex")
});

/// Fails on null.
pub fn not_null() -> CustomRule {
    CustomRule::new(|value| !value.is_null()).with_message(config::REQUIRED)
}

/// Fails on null and on empty text. Whitespace-only text passes.
pub fn not_null_or_empty() -> CustomRule {
    CustomRule::new(|value| match value {
        Value::Null => false,
        Value::Text(text) => !text.is_empty(),
        _ => true,
    })
    .with_message(config::REQUIRED)
}

/// Three-letter city code, e.g. `SHA`.
pub fn city_code() -> PatternRule {
    PatternRule::from_regex(CITY_CODE.clone()).with_message("invalid city code")
}

/// Two-character airline code, e.g. `MU`.
pub fn airline_code() -> PatternRule {
    PatternRule::from_regex(AIRLINE_CODE.clone()).with_message("invalid airline code")
}

/// Comma-separated airline codes, e.g. `MU,FM`.
pub fn airline_codes() -> PatternRule {
    PatternRule::from_regex(AIRLINE_CODES.clone()).with_message("invalid airline code")
}

/// Airline code, three or four digits and an optional letter, e.g. `MU5101`.
pub fn flight_number() -> PatternRule {
    PatternRule::from_regex(FLIGHT_NUMBER.clone()).with_message("invalid flight number")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rule::Rule;
    use rstest::rstest;

    #[rstest]
    #[case(Value::Null, false, false)]
    #[case(Value::from(""), true, false)]
    #[case(Value::from("   "), true, true)]
    #[case(Value::Int(0), true, true)]
    fn required_rules(#[case] value: Value, #[case] not_null_ok: bool, #[case] non_empty_ok: bool) {
        assert_eq!(not_null().is_valid(&value), not_null_ok);
        assert_eq!(not_null_or_empty().is_valid(&value), non_empty_ok);
        assert_eq!(not_null_or_empty().error_message(), "required");
    }

    #[test]
    fn messages_are_fixed_per_rule_and_replaceable() {
        assert_eq!(not_null().error_message(), "required");
        assert_eq!(city_code().error_message(), "invalid city code");
        assert_eq!(airline_code().error_message(), "invalid airline code");
        assert_eq!(airline_codes().error_message(), "invalid airline code");
        assert_eq!(flight_number().error_message(), "invalid flight number");
        assert_eq!(
            city_code().with_message("城市三字码格式错误").error_message(),
            "城市三字码格式错误"
        );
    }

    #[test]
    fn shared_regexes_compile() {
        for regex in [&*CITY_CODE, &*AIRLINE_CODE, &*AIRLINE_CODES, &*FLIGHT_NUMBER] {
            assert!(regex.as_str().starts_with('^') && regex.as_str().ends_with('$'));
        }
    }

    #[rstest]
    #[case("SHA", true)]
    #[case("ABC1", false)]
    #[case("AB", false)]
    fn city_codes(#[case] text: &str, #[case] expected: bool) {
        assert_eq!(city_code().is_valid(&Value::from(text)), expected);
    }

    #[rstest]
    #[case("MU", true)]
    #[case("3U", true)]
    #[case("MUX", false)]
    fn airline(#[case] text: &str, #[case] expected: bool) {
        assert_eq!(airline_code().is_valid(&Value::from(text)), expected);
    }

    #[rstest]
    #[case("MU", true)]
    #[case("MU,FM,3U", true)]
    #[case("MU,", false)]
    #[case("MU FM", false)]
    fn airline_lists(#[case] text: &str, #[case] expected: bool) {
        assert_eq!(airline_codes().is_valid(&Value::from(text)), expected);
    }

    #[rstest]
    #[case("MU510", true)]
    #[case("MU5101", true)]
    #[case("MU5101A", true)]
    #[case("MU51", false)]
    #[case("MU51012", false)]
    #[case("MU5101AB", false)]
    fn flight_numbers(#[case] text: &str, #[case] expected: bool) {
        assert_eq!(flight_number().is_valid(&Value::from(text)), expected);
    }
}

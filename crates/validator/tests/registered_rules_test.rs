//! Validators configured through explicitly registered rule chains.

use chrono::{Duration, NaiveDate, NaiveDateTime};
use fieldkit_validator::prelude::*;
use pretty_assertions::assert_eq;
use rstest::{fixture, rstest};

#[derive(Debug, Clone)]
struct RuleEntity {
    id: i32,
    city: Option<String>,
    age: i32,
    date: Option<NaiveDateTime>,
}

impl_entity! {
    RuleEntity {
        id: i32,
        city: Option<String>,
        age: i32,
        date: Option<NaiveDateTime>,
    }
}

fn midnight(y: i32, m: u32, d: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(y, m, d)
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .unwrap()
}

impl RuleEntity {
    fn create() -> Self {
        Self {
            id: 1,
            city: Some("SHA".into()),
            age: 50,
            date: Some(midnight(1998, 5, 2)),
        }
    }
}

#[fixture]
fn validator() -> EntityValidator<RuleEntity> {
    let mut validator = EntityValidator::<RuleEntity>::new().unwrap();

    validator.rules(field!(RuleEntity, id)).add_rule(
        CustomRule::new(|value| value.as_i64().is_some_and(|id| id >= 0))
            .with_message("ID不能小于0"),
    );
    validator
        .rules(field!(RuleEntity, city))
        .add_rule(standard::not_null_or_empty())
        .add_rule(standard::city_code());
    validator
        .rules(field!(RuleEntity, age))
        .add_rule(RangeRule::new(1, 99).unwrap().with_message("年龄范围1-99"));
    validator.rules(field!(RuleEntity, date)).add_rule(
        RangeRule::new(midnight(1995, 1, 1), midnight(2000, 12, 31))
            .unwrap()
            .with_message("日期范围错误"),
    );

    validator
}

fn failure(field: &str, message: &str) -> ValidationResult {
    ValidationResult::failure(field, message)
}

#[rstest]
fn null_entity_fails(validator: EntityValidator<RuleEntity>) {
    let result = validator.validate(None);
    assert!(!result.is_valid());
    assert_eq!(result.message(), "entity is null");
}

#[rstest]
fn valid_entity_passes(validator: EntityValidator<RuleEntity>) {
    assert_eq!(validator.check(&RuleEntity::create()), ValidationResult::success());
}

#[rstest]
#[case(-1, Some(failure("id", "ID不能小于0")))]
#[case(0, None)]
fn id_rule(
    validator: EntityValidator<RuleEntity>,
    #[case] id: i32,
    #[case] expected: Option<ValidationResult>,
) {
    let entity = RuleEntity {
        id,
        ..RuleEntity::create()
    };
    assert_eq!(validator.check(&entity), expected.unwrap_or_default());
}

#[rstest]
#[case(None, "required")]
#[case(Some(""), "required")]
#[case(Some("   "), "invalid city code")]
#[case(Some("ABC1"), "invalid city code")]
fn city_rules_apply_in_registration_order(
    validator: EntityValidator<RuleEntity>,
    #[case] city: Option<&str>,
    #[case] message: &str,
) {
    let entity = RuleEntity {
        city: city.map(str::to_owned),
        ..RuleEntity::create()
    };
    assert_eq!(validator.check(&entity), failure("city", message));
}

#[rstest]
#[case(0, false)]
#[case(1, true)]
#[case(99, true)]
#[case(100, false)]
fn age_range(validator: EntityValidator<RuleEntity>, #[case] age: i32, #[case] valid: bool) {
    let entity = RuleEntity {
        age,
        ..RuleEntity::create()
    };
    let expected = if valid {
        ValidationResult::success()
    } else {
        failure("age", "年龄范围1-99")
    };
    assert_eq!(validator.check(&entity), expected);
}

#[rstest]
#[case(None, true)]
#[case(Some(midnight(1995, 1, 1) - Duration::minutes(1)), false)]
#[case(Some(midnight(1995, 1, 1)), true)]
#[case(Some(midnight(2000, 12, 31)), true)]
#[case(Some(midnight(2000, 12, 31) + Duration::minutes(1)), false)]
fn date_range_lets_null_through(
    validator: EntityValidator<RuleEntity>,
    #[case] date: Option<NaiveDateTime>,
    #[case] valid: bool,
) {
    let entity = RuleEntity {
        date,
        ..RuleEntity::create()
    };
    let expected = if valid {
        ValidationResult::success()
    } else {
        failure("date", "日期范围错误")
    };
    assert_eq!(validator.check(&entity), expected);
}

#[rstest]
fn declaration_order_beats_registration_order(mut validator: EntityValidator<RuleEntity>) {
    // Registered last, but `id` is declared first.
    validator
        .rules_for("id")
        .unwrap()
        .add_rule(CustomRule::new(|_| false).with_message("id rejected"));

    let entity = RuleEntity {
        id: 5,
        age: 0,
        ..RuleEntity::create()
    };
    assert_eq!(validator.check(&entity), failure("id", "id rejected"));
}

#[rstest]
fn validation_is_repeatable(validator: EntityValidator<RuleEntity>) {
    let entity = RuleEntity {
        age: 100,
        ..RuleEntity::create()
    };
    let first = validator.check(&entity);
    assert_eq!(validator.check(&entity), first);
    assert_eq!(validator.validate(Some(&entity)), first);
}

#[test]
fn validators_are_independent() {
    let mut strict = EntityValidator::<RuleEntity>::new().unwrap();
    strict.add_rule("age", RangeRule::new(18, 65).unwrap());
    let lenient = EntityValidator::<RuleEntity>::new().unwrap();

    let entity = RuleEntity {
        age: 10,
        ..RuleEntity::create()
    };
    assert_eq!(strict.check(&entity), failure("age", "valid range 18-65"));
    assert!(lenient.check(&entity).is_valid());
    assert!(std::ptr::eq(strict.descriptor(), lenient.descriptor()));
}

#[test]
fn required_then_format_then_range() {
    let mut validator = EntityValidator::<RuleEntity>::new().unwrap();
    validator
        .rules(field!(RuleEntity, city))
        .add_rule(standard::not_null().with_message("required"))
        .add_rule(PatternRule::new("[A-Za-z]{3}").unwrap().with_message("bad format"));
    validator
        .rules(field!(RuleEntity, age))
        .add_rule(RangeRule::new(1, 99).unwrap().with_message("out of range"));

    let with = |city: Option<&str>, age: i32| RuleEntity {
        city: city.map(str::to_owned),
        age,
        ..RuleEntity::create()
    };
    assert_eq!(validator.check(&with(Some("SHA"), 50)), ValidationResult::success());
    assert_eq!(validator.check(&with(None, 50)), failure("city", "required"));
    assert_eq!(validator.check(&with(Some("AB1"), 50)), failure("city", "bad format"));
    assert_eq!(validator.check(&with(Some("SHA"), 0)), failure("age", "out of range"));
    assert_eq!(validator.check(&with(Some("SHA"), 100)), failure("age", "out of range"));
    assert_eq!(validator.check(&with(None, 0)), failure("city", "required"));
}

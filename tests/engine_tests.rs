use bigdecimal_engine::prelude::*;
use bigdecimal_engine::{config_derive, config_set, decimal, is_decimal, pow, Config, Error, Input};

use std::sync::{Mutex, MutexGuard};

// Every test in this file mutates the process-wide default engine.
static LOCK: Mutex<()> = Mutex::new(());

struct Defaults<'a> {
    _guard: MutexGuard<'a, ()>,
}

impl Drop for Defaults<'_> {
    fn drop(&mut self) {
        let defaults = Config::default();
        let options = ConfigOptions::new()
            .precision(defaults.precision() as i64)
            .rounding(defaults.rounding())
            .modulo(defaults.modulo())
            .min_exponent(defaults.min_exponent())
            .max_exponent(defaults.max_exponent())
            .exp_notation_neg_threshold(defaults.exp_notation_neg_threshold())
            .exp_notation_pos_threshold(defaults.exp_notation_pos_threshold())
            .secure_random(defaults.secure_random());
        config_set(&options).unwrap();
    }
}

fn defaults() -> Defaults<'static> {
    let _ = tracing_subscriber::fmt().with_test_writer().try_init();
    Defaults {
        _guard: LOCK.lock().unwrap_or_else(|poisoned| poisoned.into_inner()),
    }
}

// Configuration

#[test]
fn it_starts_with_the_documented_defaults() {
    let _defaults = defaults();
    let config = *default_engine().config();
    assert_eq!(config, Config::default());
    assert_eq!(20, config.precision());
    assert_eq!(RoundingMode::HalfUp, config.rounding());
    assert_eq!(ModuloMode::Down, config.modulo());
    assert_eq!(-7, config.exp_notation_neg_threshold());
    assert_eq!(20, config.exp_notation_pos_threshold());
    assert!(!config.secure_random());
}

#[test]
fn it_changes_operator_precision_globally() {
    let _defaults = defaults();
    config_set(&ConfigOptions::new().precision(5)).unwrap();
    let third = Decimal::from(1) / Decimal::from(3);
    assert_eq!("0.33333", third.to_string());

    config_set(&ConfigOptions::new().rounding(RoundingMode::Up)).unwrap();
    let two_thirds = Decimal::from(2) / Decimal::from(3);
    assert_eq!("0.66667", two_thirds.to_string());
    assert_eq!(5, default_engine().config().precision());
}

#[test]
fn it_rejects_out_of_domain_precision() {
    let _defaults = defaults();
    config_set(&ConfigOptions::new().precision(30)).unwrap();
    for precision in [0, -1, 1_000_000_001, 10_000_000_000] {
        let err = config_set(&ConfigOptions::new().precision(precision)).unwrap_err();
        assert_eq!(
            Error::InvalidConfig {
                field: "precision",
                value: precision.to_string()
            },
            err
        );
        assert_eq!(30, default_engine().config().precision());
    }
}

#[test]
fn it_rejects_a_partially_invalid_update_atomically() {
    let _defaults = defaults();
    let options = ConfigOptions::new().precision(7).rounding("sideways");
    assert!(config_set(&options).is_err());
    assert_eq!(Config::default(), *default_engine().config());
}

#[test]
fn it_rejects_euclid_as_a_rounding_mode() {
    let _defaults = defaults();
    assert!(matches!(
        config_set(&ConfigOptions::new().rounding("euclid")),
        Err(Error::InvalidConfig { field: "rounding", .. })
    ));
    assert!(config_set(&ConfigOptions::new().rounding(9i64)).is_err());
    config_set(&ConfigOptions::new().modulo("euclid")).unwrap();
    assert_eq!(ModuloMode::Euclid, default_engine().config().modulo());
    assert_eq!("2", (Decimal::from(-7) % Decimal::from(3)).to_string());
}

#[test]
fn it_accepts_mode_names_and_codes() {
    let _defaults = defaults();
    config_set(&ConfigOptions::new().rounding("ROUND_HALF_EVEN").modulo(3i64)).unwrap();
    let config = *default_engine().config();
    assert_eq!(RoundingMode::HalfEven, config.rounding());
    assert_eq!(ModuloMode::Floor, config.modulo());
    config_set(&ConfigOptions::new().rounding(2i64)).unwrap();
    assert_eq!(RoundingMode::Ceil, default_engine().config().rounding());
}

// Derived engines

#[test]
fn it_isolates_derived_engines_from_the_default() {
    let _defaults = defaults();
    let derived = config_derive(&ConfigOptions::new().precision(3)).unwrap();
    assert_eq!(20, default_engine().config().precision());

    let one = Decimal::from(1);
    let three = Decimal::from(3);
    assert_eq!("0.333", derived.to_string(&derived.div(&one, &three)));

    config_set(&ConfigOptions::new().precision(8)).unwrap();
    assert_eq!(3, derived.config().precision());
    assert_eq!("0.333", derived.to_string(&derived.div(&one, &three)));
    assert_eq!("0.33333333", (&one / &three).to_string());
}

#[test]
fn it_derives_from_the_current_defaults() {
    let _defaults = defaults();
    config_set(&ConfigOptions::new().rounding(RoundingMode::Floor)).unwrap();
    let derived = config_derive(&ConfigOptions::new().precision(2)).unwrap();
    assert_eq!(RoundingMode::Floor, derived.config().rounding());
    assert_eq!("-0.34", derived.to_string(&derived.div(&Decimal::from(-1), &Decimal::from(3))));
    assert!(config_derive(&ConfigOptions::new().precision(0)).is_err());
}

#[test]
fn it_sets_an_owned_engine_in_place() {
    let _defaults = defaults();
    let mut engine = default_engine();
    engine.set(&ConfigOptions::new().precision(4)).unwrap();
    assert!(engine.set(&ConfigOptions::new().precision(0)).is_err());
    assert_eq!(4, engine.config().precision());
    assert_eq!(20, default_engine().config().precision());
}

// Formatting thresholds

#[test]
fn it_formats_with_configured_thresholds() {
    let _defaults = defaults();
    let value = decimal("123456").unwrap();
    assert_eq!("123456", value.to_string());

    config_set(&ConfigOptions::new().exp_notation_pos_threshold(5)).unwrap();
    assert_eq!("1.23456e+5", value.to_string());
    assert_eq!("12345", decimal("12345").unwrap().to_string());

    config_set(&ConfigOptions::new().exp_notation_neg_threshold(0)).unwrap();
    assert_eq!("1.5", decimal("1.5").unwrap().to_string());
    assert_eq!("1.5e-1", decimal("0.15").unwrap().to_string());

    config_set(&ConfigOptions::new().exp_notation_pos_threshold(0)).unwrap();
    assert_eq!("1.5e+0", decimal("1.5").unwrap().to_string());
    assert!(config_set(&ConfigOptions::new().exp_notation_pos_threshold(-1)).is_err());
}

// Exponent limits

#[test]
fn it_overflows_and_underflows_at_the_exponent_limits() {
    let _defaults = defaults();
    config_set(&ConfigOptions::new().max_exponent(10).min_exponent(-10)).unwrap();
    let big = decimal("1e10").unwrap();
    assert_eq!("10000000000", big.to_string());

    let overflow = &big * &Decimal::from(10);
    assert!(overflow.is_infinite() && !overflow.is_sign_negative());
    let negative = &big * &Decimal::from(-10);
    assert!(negative.is_infinite() && negative.is_sign_negative());

    let tiny = decimal("1e-10").unwrap();
    let underflow = &tiny / &Decimal::from(-10);
    assert!(underflow.is_zero() && underflow.is_sign_negative());

    assert!(decimal("1e11").unwrap().is_infinite());
    assert!(decimal("1e-11").unwrap().is_zero());
    assert!(config_set(&ConfigOptions::new().max_exponent(-1)).is_err());
    assert!(config_set(&ConfigOptions::new().min_exponent(1)).is_err());
}

// Construction

#[test]
fn it_constructs_from_every_input_kind() {
    let _defaults = defaults();
    config_set(&ConfigOptions::new().precision(3)).unwrap();
    assert_eq!("123456", decimal("123456").unwrap().to_string());
    assert_eq!("-42", decimal(-42i64).unwrap().to_string());
    assert_eq!("0.1", decimal(0.1f64).unwrap().to_string());
    assert_eq!("2.5", decimal(2.5f32).unwrap().to_string());
    assert!(decimal(f64::NAN).unwrap().is_nan());
    assert!(decimal(f64::NEG_INFINITY).unwrap().is_infinite());

    let existing = Decimal::from_str("1.23456").unwrap();
    assert_eq!(existing, decimal(&existing).unwrap());
    assert_eq!(existing, decimal(Input::Decimal(std::borrow::Cow::Borrowed(&existing))).unwrap());
    assert!(decimal("1e").is_err());
}

#[test]
fn it_identifies_decimal_values() {
    let _defaults = defaults();
    assert!(is_decimal(&Decimal::from(1)));
    assert!(!is_decimal(&1.5f64));
    assert!(!is_decimal(&"1.5"));
}

#[test]
fn it_computes_pow_through_the_default_engine() {
    let _defaults = defaults();
    assert_eq!("1024", pow(2, 10).unwrap().to_string());
    config_set(&ConfigOptions::new().precision(4)).unwrap();
    assert_eq!("1.414", pow(2, "0.5").unwrap().to_string());
    assert!(pow("x", 2).is_err());
}

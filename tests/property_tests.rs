use bigdecimal_engine::prelude::*;
use proptest::prelude::*;

fn decimal_strategy() -> impl Strategy<Value = Decimal> {
    (any::<i64>(), -40i64..40).prop_map(|(coefficient, exponent)| Decimal::new(coefficient, exponent))
}

fn rounding_strategy() -> impl Strategy<Value = RoundingMode> {
    (0i64..9).prop_map(|code| RoundingMode::from_code(code).unwrap())
}

proptest! {
    #[test]
    fn it_keeps_results_within_precision(
        a in decimal_strategy(),
        b in decimal_strategy(),
        precision in 1i64..50,
        rounding in rounding_strategy(),
    ) {
        let engine = Engine::new(&ConfigOptions::new().precision(precision).rounding(rounding)).unwrap();
        for result in [engine.add(&a, &b), engine.sub(&a, &b), engine.mul(&a, &b), engine.div(&a, &b)] {
            prop_assert!(result.significant_digits() <= precision as u64);
        }
    }

    #[test]
    fn it_round_trips_through_strings(value in decimal_strategy()) {
        let rendered = value.to_string();
        prop_assert_eq!(&value, &Decimal::from_str(&rendered).unwrap());
        let exponential = default_engine().to_exponential(&value, None);
        prop_assert_eq!(&value, &Decimal::from_str(&exponential).unwrap());
    }

    #[test]
    fn it_adds_commutatively(a in decimal_strategy(), b in decimal_strategy()) {
        prop_assert_eq!(&a + &b, &b + &a);
        prop_assert_eq!(&a * &b, &b * &a);
    }

    #[test]
    fn it_adds_exactly_within_precision(a in any::<i32>(), b in any::<i32>()) {
        let sum = Decimal::from(a) + Decimal::from(b);
        prop_assert_eq!(Some(a as i64 + b as i64), sum.to_i64());
    }

    #[test]
    fn it_matches_integer_remainder(a in any::<i64>(), b in any::<i64>().prop_filter("non-zero", |b| *b != 0)) {
        let rem = Decimal::from(a) % Decimal::from(b);
        prop_assert_eq!(Some(a.wrapping_rem(b)), rem.to_i64());
        let euclid = default_engine().modulo_with(&Decimal::from(a), &Decimal::from(b), ModuloMode::Euclid);
        prop_assert_eq!(Some((a as i128).rem_euclid((b as i128).abs())), euclid.to_i128());
    }

    #[test]
    fn it_orders_consistently_with_subtraction(a in decimal_strategy(), b in decimal_strategy()) {
        let difference = Engine::new(&ConfigOptions::new().precision(200)).unwrap().sub(&a, &b);
        let expected = if difference.is_zero() {
            std::cmp::Ordering::Equal
        } else if difference.is_sign_negative() {
            std::cmp::Ordering::Less
        } else {
            std::cmp::Ordering::Greater
        };
        prop_assert_eq!(Some(expected), a.partial_cmp(&b));
    }

    #[test]
    fn it_rounds_to_decimal_places_within_half_an_ulp(value in decimal_strategy(), dp in 0u64..10) {
        let engine = Engine::new(&ConfigOptions::new().precision(200)).unwrap();
        let rounded = engine.to_decimal_places(&value, dp, Some(RoundingMode::HalfEven)).unwrap();
        let error = engine.abs(&engine.sub(&rounded, &value));
        let half_ulp = Decimal::new(5, -(dp as i64) - 1);
        prop_assert!(error <= half_ulp);
    }
}

use crate::config::RoundingMode;
use crate::constants::LOG10_2;
use crate::decimal::{Decimal, Kind};

use core::cmp::Ordering;
use num_bigint::BigUint;
use num_integer::Integer;
use num_traits::{One, Pow, Zero};

const POWERS_10: [u64; 20] = [
    1,
    10,
    100,
    1_000,
    10_000,
    100_000,
    1_000_000,
    10_000_000,
    100_000_000,
    1_000_000_000,
    10_000_000_000,
    100_000_000_000,
    1_000_000_000_000,
    10_000_000_000_000,
    100_000_000_000_000,
    1_000_000_000_000_000,
    10_000_000_000_000_000,
    100_000_000_000_000_000,
    1_000_000_000_000_000_000,
    10_000_000_000_000_000_000,
];

/// `10^exp`. Callers keep `exp` bounded by a precision-derived quantity.
pub(crate) fn ten_pow(exp: u64) -> BigUint {
    match POWERS_10.get(exp as usize) {
        Some(power) => BigUint::from(*power),
        None => Pow::pow(BigUint::from(10u32), exp),
    }
}

/// Number of base 10 digits in `n`. Zero has one digit.
pub(crate) fn digit_count(n: &BigUint) -> u64 {
    if n.is_zero() {
        return 1;
    }
    // Digits of 2^(bits - 1); the true count is that or one more.
    let mut digits = ((n.bits() - 1) as f64 * LOG10_2) as u64 + 1;
    if *n >= ten_pow(digits) {
        digits += 1;
    } else if digits > 1 && *n < ten_pow(digits - 1) {
        digits -= 1;
    }
    digits
}

/// The working context of a single calculation: significant digits plus the rounding discipline
/// applied when digits are discarded.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct Context {
    pub precision: u64,
    pub rounding: RoundingMode,
}

impl Context {
    pub const fn new(precision: u64, rounding: RoundingMode) -> Context {
        Context { precision, rounding }
    }

    pub fn round(&self, value: Decimal) -> Decimal {
        if value.kind() != Kind::Finite || digit_count(value.coefficient()) <= self.precision {
            return value;
        }
        round_sd(&value, self.precision, self.rounding)
    }
}

fn increments(mode: RoundingMode, negative: bool, half: Ordering, inexact: bool, odd: bool) -> bool {
    if !inexact {
        return false;
    }
    match mode {
        RoundingMode::Up => true,
        RoundingMode::Down => false,
        RoundingMode::Ceil => !negative,
        RoundingMode::Floor => negative,
        RoundingMode::HalfUp => half != Ordering::Less,
        RoundingMode::HalfDown => half == Ordering::Greater,
        RoundingMode::HalfEven => half == Ordering::Greater || (half == Ordering::Equal && odd),
        RoundingMode::HalfCeil => half == Ordering::Greater || (half == Ordering::Equal && !negative),
        RoundingMode::HalfFloor => half == Ordering::Greater || (half == Ordering::Equal && negative),
    }
}

/// Discards every digit of `coefficient * 10^exponent` below `10^position`.
///
/// Returns the kept coefficient together with its new scale exponent. The coefficient is not
/// normalized; a carry may leave a trailing zero.
pub(crate) fn round_coefficient(
    negative: bool,
    coefficient: &BigUint,
    exponent: i64,
    position: i64,
    mode: RoundingMode,
) -> (BigUint, i64) {
    let shift = position.saturating_sub(exponent);
    if shift <= 0 {
        return (coefficient.clone(), exponent);
    }
    let shift = shift as u64;
    let (quotient, half, inexact) = if shift > digit_count(coefficient) {
        // Every digit is discarded and the leading one sits below the rounding digit.
        (BigUint::zero(), Ordering::Less, !coefficient.is_zero())
    } else {
        let modulus = ten_pow(shift);
        let (quotient, remainder) = coefficient.div_rem(&modulus);
        let half = (&remainder << 1usize).cmp(&modulus);
        (quotient, half, !remainder.is_zero())
    };
    if increments(mode, negative, half, inexact, quotient.is_odd()) {
        (quotient + BigUint::one(), position)
    } else {
        (quotient, position)
    }
}

/// Rounds `value` so no digit below `10^position` remains. Zero, infinities and NaN are returned
/// unchanged; a finite value that rounds away entirely keeps its sign as a zero.
pub(crate) fn round_at(value: &Decimal, position: i64, mode: RoundingMode) -> Decimal {
    if value.kind() != Kind::Finite {
        return value.clone();
    }
    let negative = value.is_sign_negative();
    let (coefficient, exponent) =
        round_coefficient(negative, value.coefficient(), value.scale_exponent(), position, mode);
    Decimal::from_parts(negative, coefficient, exponent)
}

/// Rounds `value` to at most `sd` significant digits.
pub(crate) fn round_sd(value: &Decimal, sd: u64, mode: RoundingMode) -> Decimal {
    if value.kind() != Kind::Finite {
        return value.clone();
    }
    let digits = digit_count(value.coefficient());
    if digits <= sd {
        return value.clone();
    }
    let position = value.scale_exponent() + (digits - sd) as i64;
    round_at(value, position, mode)
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn it_counts_digits() {
        let tests = [
            (0u64, 1),
            (9, 1),
            (10, 2),
            (99, 2),
            (100, 3),
            (999_999_999_999, 12),
            (1_000_000_000_000, 13),
            (u64::MAX, 20),
        ];
        for &(n, expected) in &tests {
            assert_eq!(expected, digit_count(&BigUint::from(n)), "{}", n);
        }
        assert_eq!(101, digit_count(&ten_pow(100)));
        assert_eq!(100, digit_count(&(ten_pow(100) - BigUint::one())));
    }

    #[test]
    fn it_builds_powers_of_ten_past_the_table() {
        assert_eq!(BigUint::from(10_000_000_000_000_000_000u64), ten_pow(19));
        assert_eq!(BigUint::from(100_000_000_000_000_000_000u128), ten_pow(20));
        assert_eq!(ten_pow(19) * ten_pow(19), ten_pow(38));
    }

    #[test]
    fn it_rounds_with_every_mode() {
        let inputs = [55, 25, 16, 11, 10, -10, -11, -16, -25, -55];
        let tests: [(RoundingMode, [i64; 10]); 9] = [
            (RoundingMode::Up, [6, 3, 2, 2, 1, -1, -2, -2, -3, -6]),
            (RoundingMode::Down, [5, 2, 1, 1, 1, -1, -1, -1, -2, -5]),
            (RoundingMode::Ceil, [6, 3, 2, 2, 1, -1, -1, -1, -2, -5]),
            (RoundingMode::Floor, [5, 2, 1, 1, 1, -1, -2, -2, -3, -6]),
            (RoundingMode::HalfUp, [6, 3, 2, 1, 1, -1, -1, -2, -3, -6]),
            (RoundingMode::HalfDown, [5, 2, 2, 1, 1, -1, -1, -2, -2, -5]),
            (RoundingMode::HalfEven, [6, 2, 2, 1, 1, -1, -1, -2, -2, -6]),
            (RoundingMode::HalfCeil, [6, 3, 2, 1, 1, -1, -1, -2, -2, -5]),
            (RoundingMode::HalfFloor, [5, 2, 2, 1, 1, -1, -1, -2, -3, -6]),
        ];
        for (mode, expected) in tests {
            for (input, expected) in inputs.iter().zip(expected.iter()) {
                let rounded = round_at(&Decimal::new(*input, -1), 0, mode);
                assert_eq!(Decimal::from(*expected), rounded, "{} {}", mode, input);
            }
        }
    }

    #[test]
    fn it_rounds_far_below_the_coefficient() {
        let tiny = Decimal::new(3, -40);
        assert_eq!(Decimal::one(), round_at(&tiny, 0, RoundingMode::Up));
        assert!(round_at(&tiny, 0, RoundingMode::HalfUp).is_zero());
        let negative = round_at(&Decimal::new(-3, -40), 0, RoundingMode::Down);
        assert!(negative.is_zero() && negative.is_sign_negative());
        assert_eq!(Decimal::new(-1, 0), round_at(&Decimal::new(-3, -40), 0, RoundingMode::Floor));
    }

    #[test]
    fn it_carries_into_a_new_digit() {
        let rounded = round_sd(&Decimal::new(9996, -3), 3, RoundingMode::HalfUp);
        assert_eq!(Decimal::new(10, 0), rounded);
        assert_eq!(rounded.coefficient(), &BigUint::one());
        assert_eq!(rounded.scale_exponent(), 1);
    }

    #[test]
    fn it_limits_significant_digits() {
        let value = Decimal::new(123_456_789, -4);
        let rounded = round_sd(&value, 4, RoundingMode::HalfEven);
        assert_eq!(Decimal::new(12350, 0), rounded);
        assert_eq!(4, rounded.significant_digits());
        let context = Context::new(30, RoundingMode::Down);
        assert_eq!(value, context.round(value.clone()));
    }

    #[test]
    fn it_leaves_specials_alone() {
        assert!(round_at(&Decimal::nan(), 0, RoundingMode::Up).is_nan());
        let inf = round_sd(&Decimal::infinity(true), 1, RoundingMode::Up);
        assert!(inf.is_infinite() && inf.is_sign_negative());
    }
}

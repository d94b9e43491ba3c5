use crate::decimal::{Decimal, Kind};
use crate::round::{digit_count, ten_pow, Context};

use num_bigint::BigUint;
use num_integer::Integer;
use num_traits::{One, Zero};

pub(crate) fn div_impl(d1: &Decimal, d2: &Decimal, context: &Context) -> Decimal {
    let negative = d1.is_sign_negative() ^ d2.is_sign_negative();
    match (d1.kind(), d2.kind()) {
        (Kind::NaN, _) | (_, Kind::NaN) => Decimal::nan(),
        (Kind::Infinity, Kind::Infinity) | (Kind::Zero, Kind::Zero) => Decimal::nan(),
        (Kind::Infinity, _) | (_, Kind::Zero) => Decimal::infinity(negative),
        (_, Kind::Infinity) | (Kind::Zero, _) => Decimal::signed_zero(negative),
        (Kind::Finite, Kind::Finite) => div_finite(d1, d2, negative, context),
    }
}

fn div_finite(d1: &Decimal, d2: &Decimal, negative: bool, context: &Context) -> Decimal {
    let d1_digits = digit_count(d1.coefficient()) as i64;
    let d2_digits = digit_count(d2.coefficient()) as i64;
    // Enough digits for the result plus a rounding digit and one guard digit.
    let shift = (context.precision as i64 + 2 + d2_digits - d1_digits).max(0) as u64;

    let dividend = d1.coefficient() * ten_pow(shift);
    let (mut quotient, remainder) = dividend.div_rem(d2.coefficient());
    let mut exponent = d1.scale_exponent() - d2.scale_exponent() - shift as i64;
    if !remainder.is_zero() {
        // Sticky digit: marks the quotient as inexact without touching the kept digits.
        quotient = quotient * BigUint::from(10u32) + BigUint::one();
        exponent -= 1;
    }
    context.round(Decimal::from_parts(negative, quotient, exponent))
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::config::RoundingMode;

    #[test]
    fn it_divides_to_precision() {
        let context = Context::new(20, RoundingMode::HalfUp);
        let third = div_impl(&Decimal::new(1, 0), &Decimal::new(3, 0), &context);
        assert_eq!(20, third.significant_digits());
        assert_eq!(Some(-1), third.exponent());
        assert_eq!(Decimal::new(25, -2), div_impl(&Decimal::new(1, 0), &Decimal::new(4, 0), &context));
        let twothirds = div_impl(&Decimal::new(2, 0), &Decimal::new(3, 0), &context);
        assert_eq!(Decimal::from_parts(false, BigUint::from(66_666_666_666_666_666_667u128), -20), twothirds);
    }

    #[test]
    fn it_rounds_inexact_quotients_by_mode() {
        // 1/8 = 0.125 is exact, 1/6 = 0.1666.. is not.
        let down = Context::new(2, RoundingMode::HalfDown);
        assert_eq!(Decimal::new(12, -2), div_impl(&Decimal::new(1, 0), &Decimal::new(8, 0), &down));
        let up = Context::new(1, RoundingMode::Up);
        assert_eq!(Decimal::new(2, -1), div_impl(&Decimal::new(1, 0), &Decimal::new(6, 0), &up));
        let floor = Context::new(1, RoundingMode::Floor);
        assert_eq!(Decimal::new(-2, -1), div_impl(&Decimal::new(-1, 0), &Decimal::new(6, 0), &floor));
    }

    #[test]
    fn it_follows_the_special_value_table() {
        let context = Context::new(20, RoundingMode::HalfUp);
        assert!(div_impl(&Decimal::signed_zero(false), &Decimal::signed_zero(false), &context).is_nan());
        let inf = div_impl(&Decimal::new(-1, 0), &Decimal::signed_zero(false), &context);
        assert!(inf.is_infinite() && inf.is_sign_negative());
        let zero = div_impl(&Decimal::new(-1, 0), &Decimal::infinity(false), &context);
        assert!(zero.is_zero() && zero.is_sign_negative());
        assert!(div_impl(&Decimal::infinity(true), &Decimal::infinity(false), &context).is_nan());
    }
}

use crate::config::ModuloMode;
use crate::decimal::{Decimal, Kind};
use crate::ops::{add_impl, cmp_abs};
use crate::round::{ten_pow, Context};

use core::cmp::Ordering;
use num_bigint::BigUint;
use num_traits::Zero;

/// `d1 - d2 * q` where the integer quotient `q` is chosen by `mode`. The remainder is exact before
/// the final rounding.
pub(crate) fn rem_impl(d1: &Decimal, d2: &Decimal, mode: ModuloMode, context: &Context) -> Decimal {
    match (d1.kind(), d2.kind()) {
        (Kind::NaN, _) | (_, Kind::NaN) | (Kind::Infinity, _) | (_, Kind::Infinity) | (_, Kind::Zero) => {
            Decimal::nan()
        }
        (Kind::Zero, _) => d1.clone(),
        (Kind::Finite, Kind::Finite) => {
            if cmp_abs(d1, d2) == Ordering::Less {
                rem_small_dividend(d1, d2, mode, context)
            } else {
                rem_finite(d1, d2, mode, context)
            }
        }
    }
}

// Whether a non-zero remainder `r` of the truncated quotient is replaced by `r - divisor`
// (carrying the opposite sign of the dividend).
fn flips(mode: ModuloMode, dividend_negative: bool, signs_differ: bool, half: Ordering, odd: bool) -> bool {
    match mode {
        ModuloMode::Up => true,
        ModuloMode::Down => false,
        ModuloMode::Floor => signs_differ,
        ModuloMode::HalfEven => half == Ordering::Greater || (half == Ordering::Equal && odd),
        ModuloMode::Euclid => dividend_negative,
    }
}

// |d1| < |d2|: the truncated quotient is zero and the remainder is `d1` itself. The exponent gap
// may be arbitrary, so an adjustment goes through the rounding add.
fn rem_small_dividend(d1: &Decimal, d2: &Decimal, mode: ModuloMode, context: &Context) -> Decimal {
    let negative = d1.is_sign_negative();
    let signs_differ = negative != d2.is_sign_negative();
    let half = if mode == ModuloMode::HalfEven {
        let twice = Decimal::from_parts(false, d1.coefficient() << 1usize, d1.scale_exponent());
        cmp_abs(&twice, d2)
    } else {
        Ordering::Less
    };
    if flips(mode, negative, signs_differ, half, false) {
        add_impl(d1, &d2.abs().with_sign(!negative), context)
    } else {
        context.round(d1.clone())
    }
}

fn rem_finite(d1: &Decimal, d2: &Decimal, mode: ModuloMode, context: &Context) -> Decimal {
    let negative = d1.is_sign_negative();
    let signs_differ = negative != d2.is_sign_negative();
    let e1 = d1.scale_exponent();
    let e2 = d2.scale_exponent();
    let exponent = e1.min(e2);

    // |d1| >= |d2| bounds the divisor scaling; the dividend scaling is done modulo 2 * divisor
    // so the parity of the quotient survives.
    let divisor = if e2 > e1 {
        d2.coefficient() * ten_pow((e2 - e1) as u64)
    } else {
        d2.coefficient().clone()
    };
    let modulus: BigUint = &divisor << 1usize;
    let reduced = if e1 > e2 {
        let scale = BigUint::from(10u32).modpow(&BigUint::from((e1 - e2) as u64), &modulus);
        (d1.coefficient() % &modulus) * scale % &modulus
    } else {
        d1.coefficient() % &modulus
    };
    let (odd, remainder) = if reduced >= divisor {
        (true, reduced - &divisor)
    } else {
        (false, reduced)
    };
    if remainder.is_zero() {
        return Decimal::signed_zero(negative);
    }

    let half = (&remainder << 1usize).cmp(&divisor);
    let result = if flips(mode, negative, signs_differ, half, odd) {
        Decimal::from_parts(!negative, divisor - remainder, exponent)
    } else {
        Decimal::from_parts(negative, remainder, exponent)
    };
    context.round(result)
}

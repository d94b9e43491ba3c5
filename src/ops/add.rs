use crate::config::RoundingMode;
use crate::decimal::{Decimal, Kind};
use crate::ops::align;
use crate::round::Context;

use core::cmp::Ordering;
use num_bigint::BigUint;
use num_traits::One;

pub(crate) fn add_impl(d1: &Decimal, d2: &Decimal, context: &Context) -> Decimal {
    match (d1.kind(), d2.kind()) {
        (Kind::NaN, _) | (_, Kind::NaN) => Decimal::nan(),
        (Kind::Infinity, Kind::Infinity) => {
            if d1.is_sign_negative() == d2.is_sign_negative() {
                d1.clone()
            } else {
                Decimal::nan()
            }
        }
        (Kind::Infinity, _) => d1.clone(),
        (_, Kind::Infinity) => d2.clone(),
        (Kind::Zero, Kind::Zero) => {
            let negative = if d1.is_sign_negative() == d2.is_sign_negative() {
                d1.is_sign_negative()
            } else {
                context.rounding == RoundingMode::Floor
            };
            Decimal::signed_zero(negative)
        }
        (Kind::Zero, _) => context.round(d2.clone()),
        (_, Kind::Zero) => context.round(d1.clone()),
        (Kind::Finite, Kind::Finite) => add_finite(d1, d2, context),
    }
}

pub(crate) fn sub_impl(d1: &Decimal, d2: &Decimal, context: &Context) -> Decimal {
    add_impl(d1, &-d2, context)
}

fn add_finite(d1: &Decimal, d2: &Decimal, context: &Context) -> Decimal {
    let (big, small) = if d1.e() >= d2.e() { (d1, d2) } else { (d2, d1) };

    // Nothing at or below `sticky` can influence the rounding digit of the result, so an operand
    // living entirely down there is replaced by a single non-zero digit of the same sign.
    let floor = big.e() - context.precision as i64 - 2;
    let sticky = big.scale_exponent().min(floor) - 1;
    let replacement;
    let small = if small.e() <= sticky {
        replacement = Decimal::from_parts(small.is_sign_negative(), BigUint::one(), sticky);
        &replacement
    } else {
        small
    };

    let (c1, c2, exponent) = align(big, small);
    let sum = if big.is_sign_negative() == small.is_sign_negative() {
        Decimal::from_parts(big.is_sign_negative(), c1 + c2, exponent)
    } else {
        match c1.cmp(&c2) {
            Ordering::Greater => Decimal::from_parts(big.is_sign_negative(), c1 - c2, exponent),
            Ordering::Less => Decimal::from_parts(small.is_sign_negative(), c2 - c1, exponent),
            Ordering::Equal => Decimal::signed_zero(context.rounding == RoundingMode::Floor),
        }
    };
    context.round(sum)
}

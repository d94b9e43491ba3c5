// Every operation here is exact up to a single final rounding through the supplied `Context`.
// Exponent limits are applied by the caller.

mod add;
mod cmp;
mod div;
mod mul;
mod rem;

pub(crate) use add::{add_impl, sub_impl};
pub(crate) use cmp::{cmp_abs, cmp_impl};
pub(crate) use div::div_impl;
pub(crate) use mul::mul_impl;
pub(crate) use rem::rem_impl;

use crate::decimal::Decimal;
use crate::round::ten_pow;
use num_bigint::BigUint;

// Scales both coefficients to the smaller of the two scale exponents. The gap must be bounded
// by the callers.
pub(in crate::ops) fn align(d1: &Decimal, d2: &Decimal) -> (BigUint, BigUint, i64) {
    let e1 = d1.scale_exponent();
    let e2 = d2.scale_exponent();
    if e1 == e2 {
        (d1.coefficient().clone(), d2.coefficient().clone(), e1)
    } else if e1 > e2 {
        (d1.coefficient() * ten_pow((e1 - e2) as u64), d2.coefficient().clone(), e2)
    } else {
        (d1.coefficient().clone(), d2.coefficient() * ten_pow((e2 - e1) as u64), e1)
    }
}

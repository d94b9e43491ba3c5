use crate::decimal::{Decimal, Kind};
use crate::ops::align;

use core::cmp::Ordering;

fn sign_rank(d: &Decimal) -> i8 {
    match (d.kind(), d.is_sign_negative()) {
        (Kind::Zero, _) => 0,
        (_, true) => -1,
        (_, false) => 1,
    }
}

/// Numeric comparison. `None` when either operand is NaN; `-0` equals `0`.
pub(crate) fn cmp_impl(d1: &Decimal, d2: &Decimal) -> Option<Ordering> {
    if d1.is_nan() || d2.is_nan() {
        return None;
    }
    let (r1, r2) = (sign_rank(d1), sign_rank(d2));
    // If the sign is different, then it's an easy answer
    if r1 != r2 || r1 == 0 {
        return Some(r1.cmp(&r2));
    }
    // Negative magnitudes order in reverse. i.e. 0.5 > 0.01 however -0.5 < -0.01
    let ordering = cmp_abs(d1, d2);
    Some(if r1 < 0 { ordering.reverse() } else { ordering })
}

/// Compares magnitudes of two non-NaN values.
pub(crate) fn cmp_abs(d1: &Decimal, d2: &Decimal) -> Ordering {
    match (d1.kind(), d2.kind()) {
        (Kind::Infinity, Kind::Infinity) | (Kind::Zero, Kind::Zero) => Ordering::Equal,
        (Kind::Infinity, _) | (_, Kind::Zero) => Ordering::Greater,
        (_, Kind::Infinity) | (Kind::Zero, _) => Ordering::Less,
        _ => match d1.e().cmp(&d2.e()) {
            // Same leading power of ten, so the scale gap is bounded by the coefficient lengths.
            Ordering::Equal => {
                let (c1, c2, _) = align(d1, d2);
                c1.cmp(&c2)
            }
            ordering => ordering,
        },
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn it_orders_mixed_kinds() {
        let ordered = [
            Decimal::infinity(true),
            Decimal::new(-12, 3),
            Decimal::new(-5, -1),
            Decimal::new(-1, -2),
            Decimal::signed_zero(true),
            Decimal::new(1, -30),
            Decimal::new(999, -3),
            Decimal::new(1, 0),
            Decimal::new(1001, -3),
            Decimal::infinity(false),
        ];
        for (i, a) in ordered.iter().enumerate() {
            for (j, b) in ordered.iter().enumerate() {
                assert_eq!(Some(i.cmp(&j)), cmp_impl(a, b), "{:?} vs {:?}", a, b);
            }
        }
    }

    #[test]
    fn it_treats_nan_as_unordered() {
        assert_eq!(None, cmp_impl(&Decimal::nan(), &Decimal::new(1, 0)));
        assert_eq!(None, cmp_impl(&Decimal::signed_zero(false), &Decimal::nan()));
    }

    #[test]
    fn it_compares_equal_values_with_different_scales() {
        assert_eq!(Ordering::Equal, cmp_abs(&Decimal::new(-15, -1), &Decimal::new(150, -2)));
        assert_eq!(Ordering::Less, cmp_abs(&Decimal::new(149, -2), &Decimal::new(15, -1)));
    }
}

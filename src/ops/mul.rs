use crate::decimal::{Decimal, Kind};
use crate::round::Context;

pub(crate) fn mul_impl(d1: &Decimal, d2: &Decimal, context: &Context) -> Decimal {
    let negative = d1.is_sign_negative() ^ d2.is_sign_negative();
    match (d1.kind(), d2.kind()) {
        (Kind::NaN, _) | (_, Kind::NaN) => Decimal::nan(),
        (Kind::Infinity, Kind::Zero) | (Kind::Zero, Kind::Infinity) => Decimal::nan(),
        (Kind::Infinity, _) | (_, Kind::Infinity) => Decimal::infinity(negative),
        (Kind::Zero, _) | (_, Kind::Zero) => Decimal::signed_zero(negative),
        (Kind::Finite, Kind::Finite) => {
            let product = Decimal::from_parts(
                negative,
                d1.coefficient() * d2.coefficient(),
                d1.scale_exponent() + d2.scale_exponent(),
            );
            context.round(product)
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::config::RoundingMode;

    #[test]
    fn it_multiplies_and_rounds() {
        let context = Context::new(4, RoundingMode::HalfEven);
        assert_eq!(Decimal::new(-15, -2), mul_impl(&Decimal::new(-5, -1), &Decimal::new(3, -1), &context));
        assert_eq!(Decimal::new(1234, 0), mul_impl(&Decimal::new(12345, -1), &Decimal::new(1, 0), &context));
        assert_eq!(Decimal::new(1234, -3), mul_impl(&Decimal::new(12345, -4), &Decimal::new(1, 0), &context));
    }

    #[test]
    fn it_follows_the_special_value_table() {
        let context = Context::new(20, RoundingMode::HalfUp);
        assert!(mul_impl(&Decimal::infinity(false), &Decimal::signed_zero(true), &context).is_nan());
        let product = mul_impl(&Decimal::infinity(false), &Decimal::new(-2, 0), &context);
        assert!(product.is_infinite() && product.is_sign_negative());
        let product = mul_impl(&Decimal::signed_zero(true), &Decimal::new(-2, 0), &context);
        assert!(product.is_zero() && !product.is_sign_negative());
    }
}

use crate::Decimal;

use proptest::arbitrary::{Arbitrary, StrategyFor};
use proptest::prelude::*;
use proptest::strategy::Map;

fn from_tuple((coefficient, exponent): (i64, i8)) -> Decimal {
    Decimal::new(coefficient, exponent as i64)
}

impl Arbitrary for Decimal {
    type Parameters = ();
    type Strategy = Map<StrategyFor<(i64, i8)>, fn((i64, i8)) -> Self>;

    fn arbitrary_with(_parameters: Self::Parameters) -> Self::Strategy {
        // an arbitrary signed coefficient scaled by 10^-128..10^127
        any::<(i64, i8)>().prop_map(from_tuple as fn((i64, i8)) -> Self)
    }
}

use crate::constants::MAX_PRECISION;
use crate::engine::{default_engine, Engine};
use crate::error::Error;
use crate::Decimal;

use num_bigint::BigUint;
use num_traits::Zero;
use rand::{
    distributions::{Distribution, Standard},
    rngs::OsRng,
    thread_rng, Rng,
};

// Largest digit group drawn per sample: 10^9 fits a u32.
const DIGITS_PER_DRAW: u64 = 9;

impl Engine {
    /// A uniformly distributed value in `[0, 1)` with up to `dp` decimal places (the configured
    /// precision when omitted). Draws from the operating system RNG when `secure_random` is set.
    ///
    /// ```
    /// use bigdecimal_engine::default_engine;
    ///
    /// let engine = default_engine();
    /// let value = engine.random(Some(5)).unwrap();
    /// assert!(value >= 0.into() && value < 1.into());
    /// assert!(engine.random(Some(0)).is_err());
    /// ```
    pub fn random(&self, dp: Option<u64>) -> Result<Decimal, Error> {
        let dp = match dp {
            None => self.config().precision(),
            Some(dp) if (1..=MAX_PRECISION).contains(&dp) => dp,
            Some(dp) => return Err(Error::invalid_argument("dp", dp)),
        };
        if self.config().secure_random() {
            Ok(random_decimal(&mut OsRng, dp))
        } else {
            Ok(random_decimal(&mut thread_rng(), dp))
        }
    }
}

fn random_decimal<R>(rng: &mut R, dp: u64) -> Decimal
where
    R: Rng + ?Sized,
{
    let mut coefficient = BigUint::zero();
    let mut remaining = dp;
    while remaining > 0 {
        let chunk = remaining.min(DIGITS_PER_DRAW);
        let limit = 10u32.pow(chunk as u32);
        coefficient = coefficient * BigUint::from(limit) + BigUint::from(rng.gen_range(0..limit));
        remaining -= chunk;
    }
    Decimal::from_parts(false, coefficient, -(dp as i64))
}

/// Samples `[0, 1)` with as many decimal places as the default precision.
impl Distribution<Decimal> for Standard {
    fn sample<R>(&self, rng: &mut R) -> Decimal
    where
        R: Rng + ?Sized,
    {
        random_decimal(rng, default_engine().config().precision())
    }
}

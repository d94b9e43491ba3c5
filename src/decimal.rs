use crate::config::RoundingMode;
use crate::engine::{default_engine, Input};
use crate::error::Error;
use crate::round::{digit_count, round_at, round_sd, ten_pow};

use alloc::{string::String, vec::Vec};
use core::{
    cmp::Ordering,
    fmt,
    ops::{Add, AddAssign, Div, DivAssign, Mul, MulAssign, Neg, Rem, RemAssign, Sub, SubAssign},
    str::FromStr,
};
use num_bigint::BigUint;
use num_integer::Integer;
use num_traits::{One, ToPrimitive, Zero};

/// The class of a [`Decimal`] value.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Kind {
    Zero,
    Finite,
    Infinity,
    NaN,
}

/// `Decimal` represents an arbitrary-precision base 10 number.
///
/// Finite values are of the form `(-1)^s * c * 10^x` where `c` is a non-zero integer coefficient
/// without trailing zero digits. Zeros and infinities are signed; NaN is not.
///
/// Values are immutable: every operation returns a new `Decimal`. The arithmetic operators use
/// the process-wide default [`Engine`](crate::Engine); use an explicit engine handle to control
/// precision and rounding per call site.
#[derive(Clone, Debug)]
pub struct Decimal {
    kind: Kind,
    negative: bool,
    // Zero for every kind other than Finite.
    coefficient: BigUint,
    // Power of ten of the least significant coefficient digit.
    exponent: i64,
}

impl Decimal {
    /// Returns a `Decimal` from a signed coefficient and a power of ten.
    ///
    /// # Example
    ///
    /// ```
    /// use bigdecimal_engine::Decimal;
    /// let pi = Decimal::new(3141, -3);
    /// assert_eq!("3.141", pi.to_string());
    /// ```
    pub fn new(num: i64, exponent: i64) -> Decimal {
        Decimal::from_parts(num < 0, BigUint::from(num.unsigned_abs()), exponent)
    }

    /// Builds a normalized value. A zero coefficient produces a (signed) zero.
    pub fn from_parts(negative: bool, coefficient: BigUint, exponent: i64) -> Decimal {
        if coefficient.is_zero() {
            return Decimal::signed_zero(negative);
        }
        let (coefficient, exponent) = strip_trailing_zeros(coefficient, exponent);
        Decimal {
            kind: Kind::Finite,
            negative,
            coefficient,
            exponent,
        }
    }

    pub fn nan() -> Decimal {
        Decimal {
            kind: Kind::NaN,
            negative: false,
            coefficient: BigUint::zero(),
            exponent: 0,
        }
    }

    pub fn infinity(negative: bool) -> Decimal {
        Decimal {
            kind: Kind::Infinity,
            negative,
            coefficient: BigUint::zero(),
            exponent: 0,
        }
    }

    pub fn signed_zero(negative: bool) -> Decimal {
        Decimal {
            kind: Kind::Zero,
            negative,
            coefficient: BigUint::zero(),
            exponent: 0,
        }
    }

    pub const fn kind(&self) -> Kind {
        self.kind
    }

    /// The integer coefficient. Zero unless the value is finite and non-zero.
    pub fn coefficient(&self) -> &BigUint {
        &self.coefficient
    }

    /// The power of ten applied to the coefficient, i.e. `value = coefficient * 10^scale_exponent`.
    pub const fn scale_exponent(&self) -> i64 {
        self.exponent
    }

    /// The decimal exponent: the power of ten of the most significant digit.
    /// Zero reports `0`; infinities and NaN have none.
    pub fn exponent(&self) -> Option<i64> {
        match self.kind {
            Kind::Finite => Some(self.e()),
            Kind::Zero => Some(0),
            Kind::Infinity | Kind::NaN => None,
        }
    }

    // Callers guarantee the value is finite.
    pub(crate) fn e(&self) -> i64 {
        self.exponent.saturating_add(digit_count(&self.coefficient) as i64 - 1)
    }

    /// The significant digits, most significant first. Zero yields `[0]`, non-finite values
    /// yield an empty sequence.
    pub fn digits(&self) -> Vec<u8> {
        match self.kind {
            Kind::Zero => vec![0],
            Kind::Finite => self.coefficient.to_radix_be(10),
            Kind::Infinity | Kind::NaN => Vec::new(),
        }
    }

    /// The number of significant digits. Zero has one.
    pub fn significant_digits(&self) -> u64 {
        match self.kind {
            Kind::Zero => 1,
            Kind::Finite => digit_count(&self.coefficient),
            Kind::Infinity | Kind::NaN => 0,
        }
    }

    #[inline]
    pub const fn is_nan(&self) -> bool {
        matches!(self.kind, Kind::NaN)
    }

    #[inline]
    pub const fn is_infinite(&self) -> bool {
        matches!(self.kind, Kind::Infinity)
    }

    /// Returns `true` for zero and finite values.
    #[inline]
    pub const fn is_finite(&self) -> bool {
        matches!(self.kind, Kind::Zero | Kind::Finite)
    }

    #[inline]
    pub const fn is_zero(&self) -> bool {
        matches!(self.kind, Kind::Zero)
    }

    /// Returns `true` if the sign bit is set, including `-0` and `-Infinity`.
    #[inline]
    pub const fn is_sign_negative(&self) -> bool {
        self.negative
    }

    /// Returns `true` if the sign bit is clear. NaN reports `false`.
    #[inline]
    pub const fn is_sign_positive(&self) -> bool {
        !self.negative && !self.is_nan()
    }

    pub fn is_integer(&self) -> bool {
        match self.kind {
            Kind::Zero => true,
            Kind::Finite => self.exponent >= 0,
            Kind::Infinity | Kind::NaN => false,
        }
    }

    // Only meaningful for integers; a positive scale exponent always carries a factor of ten.
    pub(crate) fn is_odd_integer(&self) -> bool {
        self.kind == Kind::Finite && self.exponent == 0 && self.coefficient.is_odd()
    }

    pub(crate) fn is_one(&self) -> bool {
        self.kind == Kind::Finite && !self.negative && self.exponent == 0 && self.coefficient.is_one()
    }

    /// Returns the absolute value.
    #[must_use]
    pub fn abs(&self) -> Decimal {
        let mut result = self.clone();
        result.negative = false;
        result
    }

    pub(crate) fn with_sign(mut self, negative: bool) -> Decimal {
        if !self.is_nan() {
            self.negative = negative;
        }
        self
    }

    /// Rounds to `dp` decimal places using the supplied strategy. Negative `dp` rounds to tens,
    /// hundreds and so on.
    ///
    /// # Example
    ///
    /// ```
    /// use bigdecimal_engine::{Decimal, RoundingMode};
    /// let value: Decimal = "2.5".parse().unwrap();
    /// assert_eq!("2", value.round_dp_with_strategy(0, RoundingMode::HalfEven).to_string());
    /// ```
    #[must_use]
    pub fn round_dp_with_strategy(&self, dp: i64, strategy: RoundingMode) -> Decimal {
        round_at(self, -dp, strategy)
    }

    /// Rounds to `dp` decimal places using "Bankers Rounding". e.g. 6.5 -> 6, 7.5 -> 8
    #[must_use]
    pub fn round_dp(&self, dp: i64) -> Decimal {
        self.round_dp_with_strategy(dp, RoundingMode::HalfEven)
    }

    /// Keeps at most `digits` significant digits, rounding the rest away with the supplied strategy.
    /// Returns `None` when `digits` is zero.
    #[must_use]
    pub fn round_sf_with_strategy(&self, digits: u64, strategy: RoundingMode) -> Option<Decimal> {
        if digits == 0 {
            return None;
        }
        Some(round_sd(self, digits, strategy))
    }

    /// Returns the integral part, discarding any fraction.
    #[must_use]
    pub fn trunc(&self) -> Decimal {
        round_at(self, 0, RoundingMode::Down)
    }

    /// Returns the fractional part. `-1.25` gives `-0.25`.
    #[must_use]
    pub fn fract(&self) -> Decimal {
        if !self.is_finite() {
            return Decimal::nan();
        }
        if self.is_integer() {
            return Decimal::signed_zero(self.negative);
        }
        let shift = self.exponent.unsigned_abs();
        if shift >= digit_count(&self.coefficient) {
            return self.clone();
        }
        let (_, fraction) = self.coefficient.div_rem(&ten_pow(shift));
        Decimal::from_parts(self.negative, fraction, self.exponent)
    }

    /// Returns the largest integer less than or equal to the value.
    #[must_use]
    pub fn floor(&self) -> Decimal {
        round_at(self, 0, RoundingMode::Floor)
    }

    /// Returns the smallest integer greater than or equal to the value.
    #[must_use]
    pub fn ceil(&self) -> Decimal {
        round_at(self, 0, RoundingMode::Ceil)
    }
}

fn strip_trailing_zeros(mut coefficient: BigUint, mut exponent: i64) -> (BigUint, i64) {
    const BILLION: u32 = 1_000_000_000;
    loop {
        let (quotient, remainder) = coefficient.div_rem(&BigUint::from(BILLION));
        if !remainder.is_zero() {
            break;
        }
        coefficient = quotient;
        exponent = exponent.saturating_add(9);
    }
    loop {
        let (quotient, remainder) = coefficient.div_rem(&BigUint::from(10u32));
        if !remainder.is_zero() {
            break;
        }
        coefficient = quotient;
        exponent = exponent.saturating_add(1);
    }
    (coefficient, exponent)
}

impl Default for Decimal {
    fn default() -> Self {
        Decimal::zero()
    }
}

impl Zero for Decimal {
    fn zero() -> Decimal {
        Decimal::signed_zero(false)
    }

    fn is_zero(&self) -> bool {
        Decimal::is_zero(self)
    }
}

impl One for Decimal {
    fn one() -> Decimal {
        Decimal::from_parts(false, BigUint::one(), 0)
    }
}

impl FromStr for Decimal {
    type Err = Error;

    fn from_str(value: &str) -> Result<Decimal, Self::Err> {
        default_engine().decimal(Input::Text(value))
    }
}

macro_rules! impl_from_int {
    ($($T:ty),*) => {
        $(
            impl From<$T> for Decimal {
                #[inline]
                fn from(t: $T) -> Decimal {
                    let negative = t < 0 as $T;
                    Decimal::from_parts(negative, BigUint::from(t.unsigned_abs()), 0)
                }
            }
        )*
    }
}

macro_rules! impl_from_uint {
    ($($T:ty),*) => {
        $(
            impl From<$T> for Decimal {
                #[inline]
                fn from(t: $T) -> Decimal {
                    Decimal::from_parts(false, BigUint::from(t), 0)
                }
            }
        )*
    }
}

impl_from_int!(i8, i16, i32, i64, i128, isize);
impl_from_uint!(u8, u16, u32, u64, u128, usize);

impl TryFrom<f64> for Decimal {
    type Error = Error;

    fn try_from(value: f64) -> Result<Self, Error> {
        default_engine().decimal(Input::Float(value))
    }
}

impl TryFrom<f32> for Decimal {
    type Error = Error;

    fn try_from(value: f32) -> Result<Self, Error> {
        default_engine().decimal(Input::from(value))
    }
}

impl ToPrimitive for Decimal {
    fn to_i64(&self) -> Option<i64> {
        self.to_i128().and_then(|n| n.to_i64())
    }

    fn to_i128(&self) -> Option<i128> {
        let magnitude = self.integral_magnitude()?.to_i128()?;
        Some(if self.negative { -magnitude } else { magnitude })
    }

    fn to_u64(&self) -> Option<u64> {
        self.to_u128().and_then(|n| n.to_u64())
    }

    fn to_u128(&self) -> Option<u128> {
        let magnitude = self.integral_magnitude()?;
        if self.negative && !magnitude.is_zero() {
            return None;
        }
        magnitude.to_u128()
    }

    fn to_f64(&self) -> Option<f64> {
        Some(match self.kind {
            Kind::NaN => f64::NAN,
            Kind::Infinity if self.negative => f64::NEG_INFINITY,
            Kind::Infinity => f64::INFINITY,
            Kind::Zero if self.negative => -0.0,
            Kind::Zero => 0.0,
            Kind::Finite => approximate_f64(self),
        })
    }
}

impl Decimal {
    // Truncated magnitude, bounded so absurd exponents do not allocate.
    fn integral_magnitude(&self) -> Option<BigUint> {
        match self.kind {
            Kind::Zero => Some(BigUint::zero()),
            Kind::Finite if self.exponent >= 0 => {
                if self.e() > 40 {
                    None
                } else {
                    Some(&self.coefficient * ten_pow(self.exponent as u64))
                }
            }
            Kind::Finite => {
                let shift = (-self.exponent) as u64;
                if shift >= digit_count(&self.coefficient) {
                    Some(BigUint::zero())
                } else {
                    Some(&self.coefficient / ten_pow(shift))
                }
            }
            Kind::Infinity | Kind::NaN => None,
        }
    }
}

/// Approximates a finite value using its leading 17 digits.
pub(crate) fn approximate_f64(value: &Decimal) -> f64 {
    let digits = digit_count(&value.coefficient);
    let (leading, exponent) = if digits > 17 {
        let drop = digits - 17;
        (&value.coefficient / ten_pow(drop), value.exponent.saturating_add(drop as i64))
    } else {
        (value.coefficient.clone(), value.exponent)
    };
    let sign = if value.negative { "-" } else { "" };
    format!("{}{}e{}", sign, leading, exponent)
        .parse::<f64>()
        .unwrap_or(f64::NAN)
}

impl fmt::Display for Decimal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let engine = default_engine();
        let rep = match f.precision() {
            Some(dp) => engine.to_fixed(self, Some(dp as u64)),
            None => engine.to_string(self),
        };
        f.pad(&rep)
    }
}

impl fmt::LowerExp for Decimal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rep = default_engine().to_exponential(self, f.precision().map(|dp| dp as u64));
        f.pad(&rep)
    }
}

impl fmt::UpperExp for Decimal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rep: String = default_engine()
            .to_exponential(self, f.precision().map(|dp| dp as u64))
            .replace('e', "E");
        f.pad(&rep)
    }
}

impl PartialEq for Decimal {
    #[inline]
    fn eq(&self, other: &Decimal) -> bool {
        self.partial_cmp(other) == Some(Ordering::Equal)
    }
}

impl PartialOrd for Decimal {
    #[inline]
    fn partial_cmp(&self, other: &Decimal) -> Option<Ordering> {
        crate::ops::cmp_impl(self, other)
    }
}

impl Neg for Decimal {
    type Output = Decimal;

    fn neg(self) -> Decimal {
        let negative = !self.negative;
        self.with_sign(negative)
    }
}

impl<'a> Neg for &'a Decimal {
    type Output = Decimal;

    fn neg(self) -> Decimal {
        self.clone().with_sign(!self.negative)
    }
}

macro_rules! forward_val_val_binop {
    (impl $imp:ident for $res:ty, $method:ident) => {
        impl $imp<$res> for $res {
            type Output = $res;

            #[inline]
            fn $method(self, other: $res) -> $res {
                (&self).$method(&other)
            }
        }
    };
}

macro_rules! forward_ref_val_binop {
    (impl $imp:ident for $res:ty, $method:ident) => {
        impl<'a> $imp<$res> for &'a $res {
            type Output = $res;

            #[inline]
            fn $method(self, other: $res) -> $res {
                self.$method(&other)
            }
        }
    };
}

macro_rules! forward_val_ref_binop {
    (impl $imp:ident for $res:ty, $method:ident) => {
        impl<'a> $imp<&'a $res> for $res {
            type Output = $res;

            #[inline]
            fn $method(self, other: &$res) -> $res {
                (&self).$method(other)
            }
        }
    };
}

macro_rules! forward_all_binop {
    (impl $imp:ident for $res:ty, $method:ident) => {
        forward_val_val_binop!(impl $imp for $res, $method);
        forward_ref_val_binop!(impl $imp for $res, $method);
        forward_val_ref_binop!(impl $imp for $res, $method);
    };
}

macro_rules! impl_engine_binop {
    (impl $imp:ident, $method:ident, $engine_method:ident, impl $assign_imp:ident, $assign_method:ident) => {
        forward_all_binop!(impl $imp for Decimal, $method);

        impl<'a, 'b> $imp<&'b Decimal> for &'a Decimal {
            type Output = Decimal;

            #[inline]
            fn $method(self, other: &Decimal) -> Decimal {
                default_engine().$engine_method(self, other)
            }
        }

        impl $assign_imp<Decimal> for Decimal {
            #[inline]
            fn $assign_method(&mut self, other: Decimal) {
                *self = (&*self).$method(&other);
            }
        }

        impl<'a> $assign_imp<&'a Decimal> for Decimal {
            #[inline]
            fn $assign_method(&mut self, other: &Decimal) {
                *self = (&*self).$method(other);
            }
        }
    };
}

impl_engine_binop!(impl Add, add, add, impl AddAssign, add_assign);
impl_engine_binop!(impl Sub, sub, sub, impl SubAssign, sub_assign);
impl_engine_binop!(impl Mul, mul, mul, impl MulAssign, mul_assign);
impl_engine_binop!(impl Div, div, div, impl DivAssign, div_assign);
impl_engine_binop!(impl Rem, rem, modulo, impl RemAssign, rem_assign);

impl num_traits::Pow<Decimal> for Decimal {
    type Output = Decimal;

    fn pow(self, exponent: Decimal) -> Decimal {
        default_engine().pow(&self, &exponent)
    }
}

impl<'a> num_traits::Pow<&'a Decimal> for &'a Decimal {
    type Output = Decimal;

    fn pow(self, exponent: &Decimal) -> Decimal {
        default_engine().pow(self, exponent)
    }
}

impl num_traits::Pow<i64> for Decimal {
    type Output = Decimal;

    fn pow(self, exponent: i64) -> Decimal {
        default_engine().pow(&self, &Decimal::from(exponent))
    }
}

impl core::iter::Sum for Decimal {
    fn sum<I: Iterator<Item = Decimal>>(iter: I) -> Self {
        let engine = default_engine();
        iter.fold(Decimal::zero(), |sum, value| engine.add(&sum, &value))
    }
}

#[cfg(test)]
mod test {
    // Tests on private methods.
    //
    // All public tests should go under `tests/`.

    use super::*;

    #[test]
    fn it_normalizes_trailing_zeros() {
        let value = Decimal::from_parts(false, BigUint::from(1_230_000_000_000u64), -4);
        assert_eq!(value.coefficient(), &BigUint::from(123u32));
        assert_eq!(value.scale_exponent(), 6);
        assert_eq!(value.exponent(), Some(8));
    }

    #[test]
    fn it_collapses_zero_coefficients() {
        let value = Decimal::from_parts(true, BigUint::zero(), 12);
        assert!(value.is_zero());
        assert!(value.is_sign_negative());
        assert_eq!(value.exponent(), Some(0));
    }

    #[test]
    fn it_reports_digits() {
        let value = Decimal::new(-1205, -2);
        assert_eq!(value.digits(), vec![1, 2, 0, 5]);
        assert_eq!(value.significant_digits(), 4);
        assert_eq!(value.exponent(), Some(1));
        assert!(Decimal::nan().digits().is_empty());
        assert_eq!(Decimal::zero().digits(), vec![0]);
    }

    #[test]
    fn it_detects_integers_and_parity() {
        assert!(Decimal::new(120, 0).is_integer());
        assert!(!Decimal::new(12, -1).is_integer());
        assert!(Decimal::new(7, 0).is_odd_integer());
        assert!(!Decimal::new(70, 0).is_odd_integer());
        assert!(!Decimal::infinity(false).is_integer());
    }

    #[test]
    fn it_splits_fractions() {
        let value = Decimal::new(-125, -2);
        assert_eq!(value.fract(), Decimal::new(-25, -2));
        assert_eq!(value.trunc(), Decimal::new(-1, 0));
        assert_eq!(value.floor(), Decimal::new(-2, 0));
        assert_eq!(value.ceil(), Decimal::new(-1, 0));
    }

    #[test]
    fn it_keeps_tiny_values_whole_as_fractions() {
        let tiny = Decimal::new(-7, -200_000_000);
        assert_eq!(tiny, tiny.fract());
        let edge = Decimal::new(123, -3);
        assert_eq!(edge, edge.fract());
        assert_eq!(Decimal::new(23, -3), Decimal::new(1023, -3).fract());
    }

    #[test]
    fn it_saturates_extreme_exponents() {
        let value = Decimal::new(12, i64::MAX);
        assert_eq!(value.exponent(), Some(i64::MAX));
        let value = Decimal::new(10, i64::MAX);
        assert_eq!(value.scale_exponent(), i64::MAX);
        assert_eq!(value.exponent(), Some(i64::MAX));
    }

    #[test]
    fn it_converts_to_primitives() {
        assert_eq!(Decimal::new(-12345, -2).to_i64(), Some(-123));
        assert_eq!(Decimal::new(-1, 0).to_u64(), None);
        assert_eq!(Decimal::new(15, 30).to_i64(), None);
        assert_eq!(Decimal::new(125, -2).to_f64(), Some(1.25));
        assert!(Decimal::nan().to_f64().unwrap().is_nan());
    }

    #[test]
    fn it_compares_by_value() {
        assert_eq!(Decimal::new(10, -1), Decimal::new(100, -2));
        assert_eq!(Decimal::signed_zero(true), Decimal::signed_zero(false));
        assert_ne!(Decimal::nan(), Decimal::nan());
        assert!(Decimal::new(-5, -1) < Decimal::new(-1, -2));
        assert!(Decimal::infinity(false) > Decimal::new(1, 100));
    }
}

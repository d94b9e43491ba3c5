use crate::config::{Config, ConfigOptions, ModuloMode, RoundingMode};
use crate::constants::{GUARD_DIGITS, MAX_PRECISION};
use crate::decimal::{Decimal, Kind};
use crate::error::Error;
use crate::maths::{exp_impl, ln_impl, pow_impl, sqrt_impl};
use crate::ops::{add_impl, cmp_impl, div_impl, mul_impl, rem_impl, sub_impl};
use crate::round::{round_at, round_sd, Context};
use crate::str::{parse_str, to_exponential_internal, to_fixed_internal, to_str_internal};

use alloc::{borrow::Cow, string::String};
use core::{any::Any, cmp::Ordering};
use parking_lot::RwLock;
use tracing::{debug, warn};

lazy_static! {
    static ref DEFAULT_ENGINE: RwLock<Engine> = RwLock::new(Engine::default());
}

/// The closed set of inputs a [`Decimal`] can be constructed from.
#[derive(Clone, Debug)]
pub enum Input<'a> {
    /// Base 10 text, `Infinity` or `NaN`.
    Text(&'a str),
    /// A binary float, read through its shortest round-trip decimal form.
    Float(f64),
    Integer(i128),
    /// An existing value, passed through unchanged.
    Decimal(Cow<'a, Decimal>),
}

impl<'a> From<&'a str> for Input<'a> {
    fn from(value: &'a str) -> Self {
        Input::Text(value)
    }
}

impl<'a> From<&'a String> for Input<'a> {
    fn from(value: &'a String) -> Self {
        Input::Text(value.as_str())
    }
}

impl From<f64> for Input<'_> {
    fn from(value: f64) -> Self {
        Input::Float(value)
    }
}

impl From<f32> for Input<'_> {
    fn from(value: f32) -> Self {
        // Widening directly would expose the binary error of the f32 (0.1 -> 0.100000001490116...).
        Input::Float(value.to_string().parse().unwrap_or(f64::NAN))
    }
}

macro_rules! impl_input_from_int {
    ($($T:ty),*) => {
        $(
            impl From<$T> for Input<'_> {
                #[inline]
                fn from(value: $T) -> Self {
                    Input::Integer(value as i128)
                }
            }
        )*
    }
}

impl_input_from_int!(i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, usize);

impl From<Decimal> for Input<'_> {
    fn from(value: Decimal) -> Self {
        Input::Decimal(Cow::Owned(value))
    }
}

impl<'a> From<&'a Decimal> for Input<'a> {
    fn from(value: &'a Decimal) -> Self {
        Input::Decimal(Cow::Borrowed(value))
    }
}

/// A handle onto one configuration snapshot.
///
/// Every operation reads precision, rounding, exponent limits and formatting thresholds from the
/// handle it is invoked on; handles never observe each other. The process-wide default handle is
/// reached through [`default_engine`] and replaced through [`config_set`].
///
/// # Example
///
/// ```
/// use bigdecimal_engine::{ConfigOptions, Engine};
///
/// let engine = Engine::new(&ConfigOptions::new().precision(5)).unwrap();
/// let third = engine.div(&engine.decimal(1).unwrap(), &engine.decimal(3).unwrap());
/// assert_eq!("0.33333", engine.to_string(&third));
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Engine {
    config: Config,
}

impl Engine {
    /// Creates a handle from the defaults with `options` applied.
    pub fn new(options: &ConfigOptions) -> Result<Engine, Error> {
        Ok(Engine {
            config: Config::default().merge(options)?,
        })
    }

    pub const fn with_config(config: Config) -> Engine {
        Engine { config }
    }

    pub const fn config(&self) -> &Config {
        &self.config
    }

    /// Validates `options` and replaces the configuration as a whole. On error nothing changes.
    pub fn set(&mut self, options: &ConfigOptions) -> Result<(), Error> {
        self.config = self.config.merge(options)?;
        debug!(config = ?self.config, "engine configuration replaced");
        Ok(())
    }

    /// Returns an independent handle with `options` applied on top of this configuration.
    pub fn derive(&self, options: &ConfigOptions) -> Result<Engine, Error> {
        let config = self.config.merge(options)?;
        debug!(config = ?config, "engine derived");
        Ok(Engine { config })
    }

    fn context(&self) -> Context {
        Context::new(self.config.precision(), self.config.rounding())
    }

    // Applies the exponent limits of this configuration.
    fn finish(&self, value: Decimal) -> Decimal {
        if value.kind() != Kind::Finite {
            return value;
        }
        let e = value.e();
        if e > self.config.max_exponent() {
            Decimal::infinity(value.is_sign_negative())
        } else if e < self.config.min_exponent() {
            Decimal::signed_zero(value.is_sign_negative())
        } else {
            value
        }
    }

    /// Constructs a value. Text and float inputs are not rounded to precision but are subject to
    /// the exponent limits. An existing `Decimal` is returned unchanged.
    ///
    /// ```
    /// use bigdecimal_engine::{default_engine, Input};
    ///
    /// let engine = default_engine();
    /// assert_eq!("0.1", engine.to_string(&engine.decimal(0.1).unwrap()));
    /// assert!(engine.decimal("1.2.3").is_err());
    /// assert!(engine.decimal(Input::Text("-Infinity")).unwrap().is_infinite());
    /// ```
    pub fn decimal<'a>(&self, value: impl Into<Input<'a>>) -> Result<Decimal, Error> {
        match value.into() {
            Input::Text(text) => parse_str(text).map(|d| self.finish(d)),
            Input::Float(float) => Ok(self.finish(from_f64(float)?)),
            Input::Integer(integer) => Ok(self.finish(Decimal::from(integer))),
            Input::Decimal(decimal) => Ok(decimal.into_owned()),
        }
    }

    #[must_use]
    pub fn add(&self, x: &Decimal, y: &Decimal) -> Decimal {
        self.finish(add_impl(x, y, &self.context()))
    }

    #[must_use]
    pub fn sub(&self, x: &Decimal, y: &Decimal) -> Decimal {
        self.finish(sub_impl(x, y, &self.context()))
    }

    #[must_use]
    pub fn mul(&self, x: &Decimal, y: &Decimal) -> Decimal {
        self.finish(mul_impl(x, y, &self.context()))
    }

    /// Division. A finite dividend over zero gives a signed infinity and `0 / 0` gives NaN.
    #[must_use]
    pub fn div(&self, x: &Decimal, y: &Decimal) -> Decimal {
        self.finish(div_impl(x, y, &self.context()))
    }

    /// Division, failing with [`Error::DivisionByZero`] for a finite non-zero dividend over zero.
    pub fn checked_div(&self, x: &Decimal, y: &Decimal) -> Result<Decimal, Error> {
        if y.is_zero() && x.kind() == Kind::Finite {
            return Err(Error::DivisionByZero);
        }
        Ok(self.div(x, y))
    }

    /// Modulo using the configured [`ModuloMode`].
    #[must_use]
    pub fn modulo(&self, x: &Decimal, y: &Decimal) -> Decimal {
        self.modulo_with(x, y, self.config.modulo())
    }

    #[must_use]
    pub fn modulo_with(&self, x: &Decimal, y: &Decimal, mode: ModuloMode) -> Decimal {
        self.finish(rem_impl(x, y, mode, &self.context()))
    }

    /// Modulo, failing with [`Error::DivisionByZero`] for a finite non-zero dividend and a zero
    /// divisor.
    pub fn checked_rem(&self, x: &Decimal, y: &Decimal) -> Result<Decimal, Error> {
        if y.is_zero() && x.kind() == Kind::Finite {
            return Err(Error::DivisionByZero);
        }
        Ok(self.modulo(x, y))
    }

    /// Numeric comparison; `None` if either operand is NaN.
    pub fn cmp(&self, x: &Decimal, y: &Decimal) -> Option<Ordering> {
        cmp_impl(x, y)
    }

    /// The smaller operand, or NaN if either is NaN.
    #[must_use]
    pub fn min(&self, x: &Decimal, y: &Decimal) -> Decimal {
        match cmp_impl(x, y) {
            None => Decimal::nan(),
            Some(Ordering::Greater) => y.clone(),
            Some(_) => x.clone(),
        }
    }

    /// The larger operand, or NaN if either is NaN.
    #[must_use]
    pub fn max(&self, x: &Decimal, y: &Decimal) -> Decimal {
        match cmp_impl(x, y) {
            None => Decimal::nan(),
            Some(Ordering::Less) => y.clone(),
            Some(_) => x.clone(),
        }
    }

    #[must_use]
    pub fn neg(&self, x: &Decimal) -> Decimal {
        self.finish(self.context().round(-x))
    }

    #[must_use]
    pub fn abs(&self, x: &Decimal) -> Decimal {
        self.finish(self.context().round(x.abs()))
    }

    /// x<sup>y</sup> rounded to precision.
    ///
    /// ```
    /// use bigdecimal_engine::default_engine;
    ///
    /// let engine = default_engine();
    /// let two = engine.decimal(2).unwrap();
    /// assert_eq!("1024", engine.to_string(&engine.pow(&two, &engine.decimal(10).unwrap())));
    /// ```
    #[must_use]
    pub fn pow(&self, x: &Decimal, y: &Decimal) -> Decimal {
        self.finish(pow_impl(x, y, &self.config))
    }

    #[must_use]
    pub fn exp(&self, x: &Decimal) -> Decimal {
        let working = self.config.precision() + GUARD_DIGITS;
        self.finish(self.context().round(exp_impl(x, working)))
    }

    /// Natural logarithm. `ln(0)` is `-Infinity` and negative values give NaN.
    #[must_use]
    pub fn ln(&self, x: &Decimal) -> Decimal {
        let working = self.config.precision() + GUARD_DIGITS;
        self.finish(self.context().round(ln_impl(x, working)))
    }

    #[must_use]
    pub fn sqrt(&self, x: &Decimal) -> Decimal {
        self.finish(sqrt_impl(x, &self.context()))
    }

    /// Rounds to an integer using the configured rounding mode.
    #[must_use]
    pub fn round(&self, x: &Decimal) -> Decimal {
        self.finish(round_at(x, 0, self.config.rounding()))
    }

    #[must_use]
    pub fn floor(&self, x: &Decimal) -> Decimal {
        self.finish(x.floor())
    }

    #[must_use]
    pub fn ceil(&self, x: &Decimal) -> Decimal {
        self.finish(x.ceil())
    }

    #[must_use]
    pub fn trunc(&self, x: &Decimal) -> Decimal {
        self.finish(x.trunc())
    }

    /// Rounds to `dp` decimal places, using `mode` or the configured rounding mode.
    /// `dp` must not exceed 1e9.
    pub fn to_decimal_places(&self, x: &Decimal, dp: u64, mode: Option<RoundingMode>) -> Result<Decimal, Error> {
        if dp > MAX_PRECISION {
            return Err(Error::invalid_argument("dp", dp));
        }
        let mode = mode.unwrap_or(self.config.rounding());
        Ok(self.finish(round_at(x, -(dp as i64), mode)))
    }

    /// Rounds to `sd` significant digits, using `mode` or the configured rounding mode.
    /// `sd` must be in `1..=1e9`.
    pub fn to_significant_digits(&self, x: &Decimal, sd: u64, mode: Option<RoundingMode>) -> Result<Decimal, Error> {
        if sd == 0 || sd > MAX_PRECISION {
            return Err(Error::invalid_argument("sd", sd));
        }
        let mode = mode.unwrap_or(self.config.rounding());
        Ok(self.finish(round_sd(x, sd, mode)))
    }

    /// Renders `x` using this engine's exponential notation thresholds.
    pub fn to_string(&self, x: &Decimal) -> String {
        to_str_internal(
            x,
            self.config.exp_notation_neg_threshold(),
            self.config.exp_notation_pos_threshold(),
        )
    }

    /// Plain notation, rounded to exactly `dp` decimal places when given.
    pub fn to_fixed(&self, x: &Decimal, dp: Option<u64>) -> String {
        to_fixed_internal(x, dp, self.config.rounding())
    }

    /// Exponential notation with exactly `dp` fraction digits when given.
    pub fn to_exponential(&self, x: &Decimal, dp: Option<u64>) -> String {
        to_exponential_internal(x, dp, self.config.rounding())
    }
}

fn from_f64(value: f64) -> Result<Decimal, Error> {
    if value.is_nan() {
        return Ok(Decimal::nan());
    }
    if value.is_infinite() {
        return Ok(Decimal::infinity(value.is_sign_negative()));
    }
    if value == 0.0 {
        return Ok(Decimal::signed_zero(value.is_sign_negative()));
    }
    parse_str(&value.to_string())
}

/// A snapshot of the process-wide default engine.
pub fn default_engine() -> Engine {
    *DEFAULT_ENGINE.read()
}

/// Validates `options` and replaces the default configuration. On error the default
/// configuration is left untouched.
pub fn config_set(options: &ConfigOptions) -> Result<(), Error> {
    let mut engine = DEFAULT_ENGINE.write();
    engine.set(options).map_err(|err| {
        warn!(error = %err, "rejected default engine configuration");
        err
    })
}

/// Returns an independent engine configured from the current defaults plus `options`.
pub fn config_derive(options: &ConfigOptions) -> Result<Engine, Error> {
    default_engine().derive(options)
}

/// Constructs a value through the default engine.
pub fn decimal<'a>(value: impl Into<Input<'a>>) -> Result<Decimal, Error> {
    default_engine().decimal(value)
}

/// Returns `true` if `value` is a [`Decimal`].
pub fn is_decimal(value: &dyn Any) -> bool {
    value.is::<Decimal>()
}

/// x<sup>y</sup> through the default engine, constructing both operands first.
pub fn pow<'a, 'b>(x: impl Into<Input<'a>>, y: impl Into<Input<'b>>) -> Result<Decimal, Error> {
    let engine = default_engine();
    let x = engine.decimal(x)?;
    let y = engine.decimal(y)?;
    Ok(engine.pow(&x, &y))
}

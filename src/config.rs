use crate::constants::{
    DEFAULT_EXP_NOTATION_NEG, DEFAULT_EXP_NOTATION_POS, DEFAULT_MAX_EXPONENT, DEFAULT_MIN_EXPONENT, DEFAULT_PRECISION,
    EXPONENT_LIMIT, MAX_PRECISION, MIN_PRECISION,
};
use crate::error::Error;

use alloc::string::{String, ToString};
use core::{fmt, str::FromStr};

// Canonical names indexed by wire code.
const MODE_NAMES: [&str; 10] = [
    "up",
    "down",
    "ceil",
    "floor",
    "half-up",
    "half-down",
    "half-even",
    "half-ceil",
    "half-floor",
    "euclid",
];

/// The discipline used to discard digits beyond the configured precision.
///
/// The wire codes (`0..=8`) follow the canonical order: up, down, ceil, floor, half-up,
/// half-down, half-even, half-ceil, half-floor.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum RoundingMode {
    /// Away from zero.
    Up,
    /// Towards zero (truncation).
    Down,
    /// Towards positive infinity.
    Ceil,
    /// Towards negative infinity.
    Floor,
    /// Nearest neighbour, ties away from zero.
    #[default]
    HalfUp,
    /// Nearest neighbour, ties towards zero.
    HalfDown,
    /// Nearest neighbour, ties to the even neighbour. Also known as "Bankers Rounding".
    HalfEven,
    /// Nearest neighbour, ties towards positive infinity.
    HalfCeil,
    /// Nearest neighbour, ties towards negative infinity.
    HalfFloor,
}

impl RoundingMode {
    pub const fn code(self) -> u8 {
        match self {
            RoundingMode::Up => 0,
            RoundingMode::Down => 1,
            RoundingMode::Ceil => 2,
            RoundingMode::Floor => 3,
            RoundingMode::HalfUp => 4,
            RoundingMode::HalfDown => 5,
            RoundingMode::HalfEven => 6,
            RoundingMode::HalfCeil => 7,
            RoundingMode::HalfFloor => 8,
        }
    }

    pub const fn name(self) -> &'static str {
        MODE_NAMES[self.code() as usize]
    }

    pub fn from_code(code: i64) -> Result<Self, Error> {
        Ok(match code {
            0 => RoundingMode::Up,
            1 => RoundingMode::Down,
            2 => RoundingMode::Ceil,
            3 => RoundingMode::Floor,
            4 => RoundingMode::HalfUp,
            5 => RoundingMode::HalfDown,
            6 => RoundingMode::HalfEven,
            7 => RoundingMode::HalfCeil,
            8 => RoundingMode::HalfFloor,
            _ => return Err(Error::invalid_config("rounding", code)),
        })
    }
}

impl fmt::Display for RoundingMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.name())
    }
}

impl FromStr for RoundingMode {
    type Err = Error;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        mode_code(value)
            .and_then(|code| RoundingMode::from_code(code).ok())
            .ok_or_else(|| Error::invalid_config("rounding", value))
    }
}

/// The discipline used to pick the integer quotient `q` in `a - b * q` when computing a modulo.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum ModuloMode {
    /// The remainder takes the opposite sign of the dividend.
    Up,
    /// The remainder takes the sign of the dividend (truncated division).
    #[default]
    Down,
    /// The remainder takes the sign of the divisor.
    Floor,
    /// The IEEE 754 remainder: nearest quotient, ties to even.
    HalfEven,
    /// The remainder is never negative.
    Euclid,
}

impl ModuloMode {
    pub const fn code(self) -> u8 {
        match self {
            ModuloMode::Up => 0,
            ModuloMode::Down => 1,
            ModuloMode::Floor => 3,
            ModuloMode::HalfEven => 6,
            ModuloMode::Euclid => 9,
        }
    }

    pub const fn name(self) -> &'static str {
        MODE_NAMES[self.code() as usize]
    }

    pub fn from_code(code: i64) -> Result<Self, Error> {
        Ok(match code {
            0 => ModuloMode::Up,
            1 => ModuloMode::Down,
            3 => ModuloMode::Floor,
            6 => ModuloMode::HalfEven,
            9 => ModuloMode::Euclid,
            _ => return Err(Error::invalid_config("modulo", code)),
        })
    }
}

impl fmt::Display for ModuloMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.name())
    }
}

impl FromStr for ModuloMode {
    type Err = Error;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        mode_code(value)
            .and_then(|code| ModuloMode::from_code(code).ok())
            .ok_or_else(|| Error::invalid_config("modulo", value))
    }
}

// Resolves "HALF_EVEN", "round-half-even", "Half_Even" etc. to the canonical wire code.
fn mode_code(name: &str) -> Option<i64> {
    let normalized = name.trim().to_ascii_lowercase().replace('_', "-");
    let normalized = normalized.strip_prefix("round-").unwrap_or(&normalized);
    let normalized = if normalized == "ceiling" { "ceil" } else { normalized };
    MODE_NAMES.iter().position(|n| *n == normalized).map(|code| code as i64)
}

/// The wire form of a mode: either a symbolic name or a numeric code.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize), serde(untagged))]
pub enum ModeValue {
    Name(String),
    Code(i64),
}

impl ModeValue {
    pub(crate) fn to_rounding(&self) -> Result<RoundingMode, Error> {
        match self {
            ModeValue::Name(name) => name.parse(),
            ModeValue::Code(code) => RoundingMode::from_code(*code),
        }
    }

    pub(crate) fn to_modulo(&self) -> Result<ModuloMode, Error> {
        match self {
            ModeValue::Name(name) => name.parse(),
            ModeValue::Code(code) => ModuloMode::from_code(*code),
        }
    }
}

impl From<RoundingMode> for ModeValue {
    fn from(mode: RoundingMode) -> Self {
        ModeValue::Code(mode.code() as i64)
    }
}

impl From<ModuloMode> for ModeValue {
    fn from(mode: ModuloMode) -> Self {
        ModeValue::Code(mode.code() as i64)
    }
}

impl From<&str> for ModeValue {
    fn from(name: &str) -> Self {
        ModeValue::Name(name.to_string())
    }
}

impl From<String> for ModeValue {
    fn from(name: String) -> Self {
        ModeValue::Name(name)
    }
}

impl From<i64> for ModeValue {
    fn from(code: i64) -> Self {
        ModeValue::Code(code)
    }
}

/// A validated engine configuration.
///
/// A `Config` can only be produced by [`Config::default`] or by merging [`ConfigOptions`] into an
/// existing configuration, both of which guarantee every field is inside its domain.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Config {
    precision: u64,
    rounding: RoundingMode,
    modulo: ModuloMode,
    min_exponent: i64,
    max_exponent: i64,
    exp_notation_neg_threshold: i64,
    exp_notation_pos_threshold: i64,
    secure_random: bool,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            precision: DEFAULT_PRECISION,
            rounding: RoundingMode::HalfUp,
            modulo: ModuloMode::Down,
            min_exponent: DEFAULT_MIN_EXPONENT,
            max_exponent: DEFAULT_MAX_EXPONENT,
            exp_notation_neg_threshold: DEFAULT_EXP_NOTATION_NEG,
            exp_notation_pos_threshold: DEFAULT_EXP_NOTATION_POS,
            secure_random: false,
        }
    }
}

impl Config {
    /// The maximum number of significant digits of a calculated result.
    pub const fn precision(&self) -> u64 {
        self.precision
    }

    pub const fn rounding(&self) -> RoundingMode {
        self.rounding
    }

    pub const fn modulo(&self) -> ModuloMode {
        self.modulo
    }

    /// Results with a decimal exponent below this collapse to zero.
    pub const fn min_exponent(&self) -> i64 {
        self.min_exponent
    }

    /// Results with a decimal exponent above this collapse to infinity.
    pub const fn max_exponent(&self) -> i64 {
        self.max_exponent
    }

    pub const fn exp_notation_neg_threshold(&self) -> i64 {
        self.exp_notation_neg_threshold
    }

    pub const fn exp_notation_pos_threshold(&self) -> i64 {
        self.exp_notation_pos_threshold
    }

    pub const fn secure_random(&self) -> bool {
        self.secure_random
    }

    /// Validates `options` and returns a new configuration with the supplied fields replaced.
    /// Omitted fields keep the value from `self`; `self` is never modified.
    pub fn merge(&self, options: &ConfigOptions) -> Result<Config, Error> {
        let mut config = *self;
        if let Some(precision) = options.precision {
            if precision < MIN_PRECISION as i64 || precision > MAX_PRECISION as i64 {
                return Err(Error::invalid_config("precision", precision));
            }
            config.precision = precision as u64;
        }
        if let Some(ref rounding) = options.rounding {
            config.rounding = rounding.to_rounding()?;
        }
        if let Some(ref modulo) = options.modulo {
            config.modulo = modulo.to_modulo()?;
        }
        if let Some(min_exponent) = options.min_exponent {
            config.min_exponent = within("min_exponent", min_exponent, -EXPONENT_LIMIT, 0)?;
        }
        if let Some(max_exponent) = options.max_exponent {
            config.max_exponent = within("max_exponent", max_exponent, 0, EXPONENT_LIMIT)?;
        }
        if let Some(threshold) = options.exp_notation_neg_threshold {
            config.exp_notation_neg_threshold = within("exp_notation_neg_threshold", threshold, -EXPONENT_LIMIT, 0)?;
        }
        if let Some(threshold) = options.exp_notation_pos_threshold {
            config.exp_notation_pos_threshold = within("exp_notation_pos_threshold", threshold, 0, EXPONENT_LIMIT)?;
        }
        if let Some(secure_random) = options.secure_random {
            config.secure_random = secure_random;
        }
        Ok(config)
    }
}

fn within(field: &'static str, value: i64, min: i64, max: i64) -> Result<i64, Error> {
    if value < min || value > max {
        Err(Error::invalid_config(field, value))
    } else {
        Ok(value)
    }
}

/// A partial configuration. Every `None` field keeps its current value when merged.
///
/// With the `serde` feature this deserializes from a mapping with optional keys; unknown keys
/// are ignored. Modes may be given as names (`"half-even"`, `"ROUND_HALF_EVEN"`) or wire codes.
///
/// ```
/// use bigdecimal_engine::{ConfigOptions, RoundingMode};
///
/// let options = ConfigOptions::new()
///     .precision(30)
///     .rounding(RoundingMode::HalfEven)
///     .modulo("euclid");
/// assert_eq!(options.precision, Some(30));
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize), serde(default))]
pub struct ConfigOptions {
    pub precision: Option<i64>,
    pub rounding: Option<ModeValue>,
    pub modulo: Option<ModeValue>,
    pub min_exponent: Option<i64>,
    pub max_exponent: Option<i64>,
    pub exp_notation_neg_threshold: Option<i64>,
    pub exp_notation_pos_threshold: Option<i64>,
    pub secure_random: Option<bool>,
}

impl ConfigOptions {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn precision(mut self, precision: i64) -> Self {
        self.precision = Some(precision);
        self
    }

    #[must_use]
    pub fn rounding(mut self, rounding: impl Into<ModeValue>) -> Self {
        self.rounding = Some(rounding.into());
        self
    }

    #[must_use]
    pub fn modulo(mut self, modulo: impl Into<ModeValue>) -> Self {
        self.modulo = Some(modulo.into());
        self
    }

    #[must_use]
    pub fn min_exponent(mut self, min_exponent: i64) -> Self {
        self.min_exponent = Some(min_exponent);
        self
    }

    #[must_use]
    pub fn max_exponent(mut self, max_exponent: i64) -> Self {
        self.max_exponent = Some(max_exponent);
        self
    }

    #[must_use]
    pub fn exp_notation_neg_threshold(mut self, threshold: i64) -> Self {
        self.exp_notation_neg_threshold = Some(threshold);
        self
    }

    #[must_use]
    pub fn exp_notation_pos_threshold(mut self, threshold: i64) -> Self {
        self.exp_notation_pos_threshold = Some(threshold);
        self
    }

    #[must_use]
    pub fn secure_random(mut self, secure_random: bool) -> Self {
        self.secure_random = Some(secure_random);
        self
    }
}

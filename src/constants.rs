// Configuration domains
pub const MIN_PRECISION: u64 = 1;
pub const MAX_PRECISION: u64 = 1_000_000_000;
pub const EXPONENT_LIMIT: i64 = 9_000_000_000_000_000;

// Defaults
pub const DEFAULT_PRECISION: u64 = 20;
pub const DEFAULT_MIN_EXPONENT: i64 = -EXPONENT_LIMIT;
pub const DEFAULT_MAX_EXPONENT: i64 = EXPONENT_LIMIT;
pub const DEFAULT_EXP_NOTATION_NEG: i64 = -7;
pub const DEFAULT_EXP_NOTATION_POS: i64 = 20;

// Largest integer exponent that takes the binary exponentiation path of `pow`.
pub const MAX_SAFE_INTEGER: u64 = 9_007_199_254_740_991;

// Extra significant digits carried by working-precision calculations.
pub const GUARD_DIGITS: u64 = 10;
// Extra digits used when a non-integer power lands too close to a rounding boundary.
pub const RETRY_DIGITS: u64 = 15;

// Once an intermediate exponent passes this magnitude the final value can never be represented,
// not even after taking a reciprocal.
pub const EXPONENT_SATURATION: i64 = 2 * EXPONENT_LIMIT;

pub const LOG10_2: f64 = core::f64::consts::LOG10_2;
pub const LOG10_E: f64 = core::f64::consts::LOG10_E;

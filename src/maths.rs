use crate::config::{Config, RoundingMode};
use crate::constants::{
    EXPONENT_SATURATION, GUARD_DIGITS, LOG10_2, LOG10_E, MAX_SAFE_INTEGER, RETRY_DIGITS,
};
use crate::decimal::{approximate_f64, Decimal, Kind};
use crate::engine::default_engine;
use crate::ops::{add_impl, cmp_abs, div_impl, mul_impl, sub_impl};
use crate::round::{digit_count, round_sd, Context};
use crate::str::parse_str;

use core::cmp::Ordering;
use num_bigint::BigUint;
use num_traits::{One, ToPrimitive, Zero};
use tracing::trace;

// Newton iterations double the correct digits, so this covers any permitted precision.
const SQRT_MAX_ITERATIONS: usize = 64;

/// Trait exposing the mathematical operations of the default engine on a `Decimal`. Results use
/// the default precision and rounding at the time of the call.
pub trait MathematicalOps {
    /// The exponential function, e<sup>x</sup>.
    fn exp(&self) -> Decimal;

    /// The natural logarithm. `ln(0)` is `-Infinity`, negative values give NaN.
    fn ln(&self) -> Decimal;

    /// The square root. Negative values give NaN.
    fn sqrt(&self) -> Decimal;

    /// Raise self to the given integer exponent: x<sup>y</sup>
    fn powi(&self, exp: i64) -> Decimal;

    /// Raise self to the given decimal exponent: x<sup>y</sup>
    fn powd(&self, exp: &Decimal) -> Decimal;
}

impl MathematicalOps for Decimal {
    fn exp(&self) -> Decimal {
        default_engine().exp(self)
    }

    fn ln(&self) -> Decimal {
        default_engine().ln(self)
    }

    fn sqrt(&self) -> Decimal {
        default_engine().sqrt(self)
    }

    fn powi(&self, exp: i64) -> Decimal {
        default_engine().pow(self, &Decimal::from(exp))
    }

    fn powd(&self, exp: &Decimal) -> Decimal {
        default_engine().pow(self, exp)
    }
}

/// x<sup>y</sup> rounded to the configured precision. Exponent limits are applied by the caller.
pub(crate) fn pow_impl(x: &Decimal, y: &Decimal, config: &Config) -> Decimal {
    let context = Context::new(config.precision(), config.rounding());
    if x.is_nan() || y.is_nan() {
        return Decimal::nan();
    }
    if y.is_zero() {
        return if x.is_infinite() { Decimal::nan() } else { Decimal::one() };
    }
    if y.is_infinite() {
        let grows = match cmp_abs(x, &Decimal::one()) {
            Ordering::Equal => return Decimal::nan(),
            Ordering::Greater => !y.is_sign_negative(),
            Ordering::Less => y.is_sign_negative(),
        };
        return if grows { Decimal::infinity(false) } else { Decimal::zero() };
    }
    if x.is_zero() || x.is_infinite() {
        let negative = x.is_sign_negative() && y.is_odd_integer();
        // 0^-y and Infinity^y grow, 0^y and Infinity^-y vanish.
        let grows = x.is_zero() == y.is_sign_negative();
        return if grows {
            Decimal::infinity(negative)
        } else {
            Decimal::signed_zero(negative)
        };
    }
    if x.is_one() {
        return Decimal::one();
    }

    if let Some(k) = safe_integer(y) {
        trace!(exponent = k, "pow by binary exponentiation");
        return pow_integer(x, k, &context);
    }
    trace!("pow by exp(y * ln(x))");
    pow_general(x, y, config)
}

fn safe_integer(y: &Decimal) -> Option<i64> {
    if !y.is_integer() {
        return None;
    }
    let k = y.to_i64()?;
    if k.unsigned_abs() > MAX_SAFE_INTEGER {
        None
    } else {
        Some(k)
    }
}

fn saturated(value: &Decimal) -> bool {
    value.kind() == Kind::Finite && value.e().abs() > EXPONENT_SATURATION
}

// Repeated squaring at `precision + GUARD_DIGITS` truncated digits.
fn pow_integer(x: &Decimal, k: i64, context: &Context) -> Decimal {
    let negative = x.is_sign_negative() && k % 2 != 0;
    let working = Context::new(context.precision + GUARD_DIGITS, RoundingMode::Down);

    let saturate = |overflowing: &Decimal| {
        // A growing magnitude and a positive exponent (or the reverse) overflow.
        if (overflowing.e() > 0) == (k > 0) {
            Decimal::infinity(negative)
        } else {
            Decimal::signed_zero(negative)
        }
    };

    let mut base = x.abs();
    let mut acc = Decimal::one();
    let mut n = k.unsigned_abs();
    loop {
        if n & 1 == 1 {
            acc = mul_impl(&acc, &base, &working);
            if saturated(&acc) {
                return saturate(&acc);
            }
        }
        n >>= 1;
        if n == 0 {
            break;
        }
        base = mul_impl(&base, &base, &working);
        if saturated(&base) {
            return saturate(&base);
        }
    }

    let result = if k < 0 {
        div_impl(
            &Decimal::one(),
            &acc,
            &Context::new(working.precision, RoundingMode::HalfEven),
        )
    } else {
        acc
    };
    context.round(result.with_sign(negative))
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Boundary {
    Zeros,
    Nines,
    BelowHalf,
    Half,
}

fn pow_general(x: &Decimal, y: &Decimal, config: &Config) -> Decimal {
    let negative = if x.is_sign_negative() {
        if !y.is_integer() {
            return Decimal::nan();
        }
        y.is_odd_integer()
    } else {
        false
    };
    let x = x.abs();

    let estimate = approximate_f64(y) * log10_estimate(&x);
    if estimate > (config.max_exponent() + 1) as f64 {
        return Decimal::infinity(negative);
    }
    if estimate < (config.min_exponent() - 1) as f64 {
        return Decimal::signed_zero(negative);
    }
    // Digits in the integer part of y * ln(x), needed on top of the working precision.
    let magnitude = (estimate / LOG10_E).abs();
    let extra = if magnitude >= 1.0 {
        magnitude.log10() as u64 + 2
    } else {
        0
    };

    let precision = config.precision();
    let mode = config.rounding();
    let mut working = precision + GUARD_DIGITS;
    let mut result = exp_ln(&x, y, working, extra);
    if boundary(&result, precision, working, mode).is_some() {
        working += RETRY_DIGITS;
        trace!(precision = working, "pow result close to a rounding boundary, retrying");
        result = exp_ln(&x, y, working, extra);
        result = match boundary(&result, precision, working, mode) {
            Some(Boundary::Nines) => round_sd(&result, precision, RoundingMode::Up),
            Some(Boundary::Zeros) => round_sd(&result, precision, RoundingMode::Down),
            Some(Boundary::BelowHalf) => round_sd(&result, precision + 1, RoundingMode::Up),
            Some(Boundary::Half) => round_sd(&result, precision + 1, RoundingMode::Down),
            None => result,
        };
    }
    Context::new(precision, mode).round(result.with_sign(negative))
}

fn exp_ln(x: &Decimal, y: &Decimal, working: u64, extra: u64) -> Decimal {
    let context = Context::new(working + extra, RoundingMode::HalfEven);
    let product = mul_impl(y, &ln_impl(x, working + extra), &context);
    exp_impl(&product, working)
}

fn log10_estimate(x: &Decimal) -> f64 {
    let digits = digit_count(x.coefficient());
    let mantissa = Decimal::from_parts(false, x.coefficient().clone(), 1 - digits as i64);
    approximate_f64(&mantissa).log10() + x.e() as f64
}

// Looks at the digits that the final rounding to `precision` discards, ignoring the two least
// significant working digits.
fn boundary(value: &Decimal, precision: u64, working: u64, mode: RoundingMode) -> Option<Boundary> {
    if value.kind() != Kind::Finite {
        return None;
    }
    let mut digits = value.coefficient().to_str_radix(10);
    while (digits.len() as u64) < working {
        digits.push('0');
    }
    let tail = digits.get(precision as usize..(working - 2) as usize)?;
    let (first, rest) = tail.split_at(1);
    let all = |s: &str, c: char| s.chars().all(|d| d == c);
    match mode {
        RoundingMode::Up | RoundingMode::Down | RoundingMode::Ceil | RoundingMode::Floor => {
            if all(tail, '0') {
                Some(Boundary::Zeros)
            } else if all(tail, '9') {
                Some(Boundary::Nines)
            } else {
                None
            }
        }
        _ => {
            if first == "4" && all(rest, '9') {
                Some(Boundary::BelowHalf)
            } else if first == "5" && all(rest, '0') {
                Some(Boundary::Half)
            } else {
                None
            }
        }
    }
}

/// e<sup>x</sup> to `precision` significant digits (half-even). Exponent limits are not applied.
pub(crate) fn exp_impl(x: &Decimal, precision: u64) -> Decimal {
    match x.kind() {
        Kind::NaN => return Decimal::nan(),
        Kind::Infinity if x.is_sign_negative() => return Decimal::zero(),
        Kind::Infinity => return Decimal::infinity(false),
        Kind::Zero => return Decimal::one(),
        Kind::Finite => {}
    }
    let estimate = approximate_f64(x);
    if estimate * LOG10_E > EXPONENT_SATURATION as f64 {
        return Decimal::infinity(false);
    }
    if estimate * LOG10_E < -(EXPONENT_SATURATION as f64) {
        return Decimal::zero();
    }

    // Halve the argument until the series converges quickly, then square the sum back up.
    let mut halvings: u32 = 0;
    let mut reduced = estimate.abs();
    while reduced >= 0.01 {
        reduced /= 2.0;
        halvings += 1;
    }
    let working = precision + (halvings as f64 * LOG10_2).ceil() as u64 + 8;
    let context = Context::new(working, RoundingMode::HalfEven);

    // x / 2^k == x * 5^k / 10^k exactly.
    let scale = Decimal::from_parts(false, BigUint::from(5u32).pow(halvings), -(halvings as i64));
    let r = mul_impl(x, &scale, &context);

    let mut sum = add_impl(&Decimal::one(), &r, &context);
    let mut term = r.clone();
    let mut n: u64 = 2;
    loop {
        term = div_impl(&mul_impl(&term, &r, &context), &Decimal::from(n), &context);
        if term.is_zero() || term.e() < sum.e() - working as i64 - 2 {
            break;
        }
        sum = add_impl(&sum, &term, &context);
        n += 1;
    }
    for _ in 0..halvings {
        sum = mul_impl(&sum, &sum, &context);
    }
    Context::new(precision, RoundingMode::HalfEven).round(sum)
}

// atanh(t) = t + t^3/3 + t^5/5 + ... for |t| < 1/3.
fn atanh(t: &Decimal, context: &Context) -> Decimal {
    if t.is_zero() {
        return Decimal::zero();
    }
    let t2 = mul_impl(t, t, context);
    let mut power = t.clone();
    let mut sum = t.clone();
    let mut n: u64 = 3;
    loop {
        power = mul_impl(&power, &t2, context);
        let term = div_impl(&power, &Decimal::from(n), context);
        if term.is_zero() || term.e() < sum.e() - context.precision as i64 - 2 {
            break;
        }
        sum = add_impl(&sum, &term, context);
        n += 2;
    }
    sum
}

// 2 * atanh((m - 1) / (m + 1)) == ln(m)
fn ln_series(m: &Decimal, context: &Context) -> Decimal {
    let one = Decimal::one();
    let t = div_impl(&sub_impl(m, &one, context), &add_impl(m, &one, context), context);
    let two = Decimal::from(2);
    mul_impl(&two, &atanh(&t, context), context)
}

/// ln(x) to `precision` significant digits (half-even).
pub(crate) fn ln_impl(x: &Decimal, precision: u64) -> Decimal {
    match x.kind() {
        Kind::NaN => return Decimal::nan(),
        Kind::Zero => return Decimal::infinity(true),
        _ if x.is_sign_negative() => return Decimal::nan(),
        Kind::Infinity => return Decimal::infinity(false),
        Kind::Finite if x.is_one() => return Decimal::zero(),
        Kind::Finite => {}
    }
    let e10 = x.e();
    let guard = precision + 4 + digit_count(&BigUint::from(e10.unsigned_abs()));
    let context = Context::new(guard, RoundingMode::HalfEven);
    let result_context = Context::new(precision, RoundingMode::HalfEven);
    let one = Decimal::one();
    let two = Decimal::from(2);

    let exact = Context::new(guard + digit_count(x.coefficient()), RoundingMode::HalfEven);
    let distance = sub_impl(x, &one, &exact);
    if cmp_abs(&distance, &Decimal::new(5, -1)) == Ordering::Less {
        return result_context.round(ln_series(x, &context));
    }

    // x = m * 10^e10 * 2^j with m in [1, 2). Halving is exact: m / 2 == m * 5 / 10.
    let mut m = Decimal::from_parts(false, x.coefficient().clone(), x.scale_exponent() - e10);
    let mut j: i64 = 0;
    while cmp_abs(&m, &two) != Ordering::Less {
        m = Decimal::from_parts(false, m.coefficient() * BigUint::from(5u32), m.scale_exponent() - 1);
        j += 1;
    }
    let mut result = ln_series(&m, &context);
    if j != 0 || e10 != 0 {
        let third = div_impl(&one, &Decimal::from(3), &context);
        let ln2 = mul_impl(&two, &atanh(&third, &context), &context);
        let mut adjustment = mul_impl(&Decimal::from(j), &ln2, &context);
        if e10 != 0 {
            let ninth = div_impl(&one, &Decimal::from(9), &context);
            let ln10 = add_impl(
                &mul_impl(&Decimal::from(3), &ln2, &context),
                &mul_impl(&two, &atanh(&ninth, &context), &context),
                &context,
            );
            adjustment = add_impl(&adjustment, &mul_impl(&Decimal::from(e10), &ln10, &context), &context);
        }
        result = add_impl(&result, &adjustment, &context);
    }
    result_context.round(result)
}

/// Square root rounded to `context`. Exponent limits are not applied.
pub(crate) fn sqrt_impl(x: &Decimal, context: &Context) -> Decimal {
    match x.kind() {
        Kind::NaN => return Decimal::nan(),
        Kind::Zero => return x.clone(),
        _ if x.is_sign_negative() => return Decimal::nan(),
        Kind::Infinity => return Decimal::infinity(false),
        Kind::Finite => {}
    }
    let working = Context::new(context.precision + 4, RoundingMode::HalfEven);

    // Seed from the f64 root of the mantissa scaled by an even power of ten.
    let half_e = x.e().div_euclid(2);
    let mantissa = Decimal::from_parts(false, x.coefficient().clone(), x.scale_exponent() - 2 * half_e);
    let seed = parse_str(&format!("{:e}", approximate_f64(&mantissa).sqrt()))
        .unwrap_or_else(|_| Decimal::one());
    let mut y = Decimal::from_parts(false, seed.coefficient().clone(), seed.scale_exponent() + half_e);

    let half = Decimal::new(5, -1);
    let mut previous = Decimal::zero();
    for _ in 0..SQRT_MAX_ITERATIONS {
        let next = mul_impl(&add_impl(&y, &div_impl(x, &y, &working), &working), &half, &working);
        if next == y || next == previous {
            y = next;
            break;
        }
        previous = core::mem::replace(&mut y, next);
    }
    context.round(y)
}

use crate::{
    config::RoundingMode,
    decimal::{Decimal, Kind},
    error::Error,
    round::{round_at, round_sd},
};

use alloc::{
    format,
    string::{String, ToString},
};
use num_bigint::BigUint;

/// Parses the base 10 grammar `[+-]? (digits [. digits?]? | . digits) ([eE] [+-]? digits)?` as well
/// as `[+-]?Infinity` and `[+-]?NaN`. No rounding or exponent limits are applied.
pub(crate) fn parse_str(value: &str) -> Result<Decimal, Error> {
    let invalid = || Error::InvalidNumber(value.to_string());

    let bytes = value.as_bytes();
    let (negative, rest) = match bytes.first() {
        Some(b'-') => (true, &bytes[1..]),
        Some(b'+') => (false, &bytes[1..]),
        Some(_) => (false, bytes),
        None => return Err(invalid()),
    };
    match rest {
        b"Infinity" => return Ok(Decimal::infinity(negative)),
        b"NaN" => return Ok(Decimal::nan()),
        _ => {}
    }

    let mut digits = String::with_capacity(rest.len());
    let mut fraction_digits: i64 = 0;
    let mut point = false;
    let mut offset = 0;
    while let Some(&b) = rest.get(offset) {
        match b {
            b'0'..=b'9' => {
                digits.push(b as char);
                if point {
                    fraction_digits += 1;
                }
            }
            b'.' if !point => point = true,
            b'e' | b'E' => break,
            _ => return Err(invalid()),
        }
        offset += 1;
    }
    if digits.is_empty() {
        return Err(invalid());
    }

    let mut exponent: i64 = 0;
    if offset < rest.len() {
        exponent = parse_exponent(&rest[offset + 1..]).ok_or_else(invalid)?;
    }
    let exponent = exponent.checked_sub(fraction_digits).ok_or_else(invalid)?;
    // The leading digit's power of ten must be representable as well.
    let significant = digits.trim_start_matches('0').len() as i64;
    if significant > 0 {
        exponent.checked_add(significant - 1).ok_or_else(invalid)?;
    }

    let coefficient = BigUint::parse_bytes(digits.as_bytes(), 10).ok_or_else(invalid)?;
    Ok(Decimal::from_parts(negative, coefficient, exponent))
}

fn parse_exponent(bytes: &[u8]) -> Option<i64> {
    let (negative, digits) = match bytes.first() {
        Some(b'-') => (true, &bytes[1..]),
        Some(b'+') => (false, &bytes[1..]),
        _ => (false, bytes),
    };
    if digits.is_empty() {
        return None;
    }
    let mut exponent: i64 = 0;
    for &b in digits {
        if !b.is_ascii_digit() {
            return None;
        }
        let digit = (b - b'0') as i64;
        exponent = exponent.checked_mul(10)?;
        exponent = if negative {
            exponent.checked_sub(digit)?
        } else {
            exponent.checked_add(digit)?
        };
    }
    Some(exponent)
}

fn special_str(value: &Decimal) -> Option<&'static str> {
    match value.kind() {
        Kind::NaN => Some("NaN"),
        Kind::Infinity if value.is_sign_negative() => Some("-Infinity"),
        Kind::Infinity => Some("Infinity"),
        Kind::Zero | Kind::Finite => None,
    }
}

// Renders `0.ddd`, `ddd.ddd` or `ddd000` for significant `digits` whose leading digit has the
// power of ten `e`, padding the fraction with zeros to at least `min_fraction` digits.
fn plain(digits: &str, e: i64, min_fraction: u64) -> String {
    let len = digits.len() as i64;
    let mut rep = String::with_capacity(digits.len() + 2);
    let fraction_len = if e < 0 {
        rep.push_str("0.");
        rep.extend(core::iter::repeat('0').take((-e - 1) as usize));
        rep.push_str(digits);
        len - e - 1
    } else if e + 1 >= len {
        rep.push_str(digits);
        rep.extend(core::iter::repeat('0').take((e + 1 - len) as usize));
        0
    } else {
        let (whole, fraction) = digits.split_at((e + 1) as usize);
        rep.push_str(whole);
        rep.push('.');
        rep.push_str(fraction);
        len - e - 1
    } as u64;
    if min_fraction > fraction_len {
        if fraction_len == 0 {
            rep.push('.');
        }
        rep.extend(core::iter::repeat('0').take((min_fraction - fraction_len) as usize));
    }
    rep
}

// `d[.ddd]e(+|-)N` with the fraction padded to at least `min_fraction` digits.
fn exponential(digits: &str, e: i64, min_fraction: u64) -> String {
    let (lead, fraction) = digits.split_at(1);
    let mut rep = String::with_capacity(digits.len() + 8);
    rep.push_str(lead);
    if !fraction.is_empty() || min_fraction > 0 {
        rep.push('.');
        rep.push_str(fraction);
    }
    let fraction_len = fraction.len() as u64;
    if min_fraction > fraction_len {
        rep.extend(core::iter::repeat('0').take((min_fraction - fraction_len) as usize));
    }
    rep.push('e');
    if e >= 0 {
        rep.push('+');
    }
    rep.push_str(&e.to_string());
    rep
}

fn with_sign(negative: bool, rep: String) -> String {
    if negative {
        format!("-{}", rep)
    } else {
        rep
    }
}

/// Renders a value, switching to exponential notation when the decimal exponent is below
/// `neg_threshold` or at least `pos_threshold`.
pub(crate) fn to_str_internal(value: &Decimal, neg_threshold: i64, pos_threshold: i64) -> String {
    if let Some(special) = special_str(value) {
        return special.to_string();
    }
    if value.is_zero() {
        return "0".to_string();
    }
    let digits = value.coefficient().to_str_radix(10);
    let e = value.e();
    let rep = if e < neg_threshold || e >= pos_threshold {
        exponential(&digits, e, 0)
    } else {
        plain(&digits, e, 0)
    };
    with_sign(value.is_sign_negative(), rep)
}

/// Plain notation. With `dp` the value is rounded to exactly `dp` decimal places.
pub(crate) fn to_fixed_internal(value: &Decimal, dp: Option<u64>, mode: RoundingMode) -> String {
    if let Some(special) = special_str(value) {
        return special.to_string();
    }
    let rounded = match dp {
        Some(dp) => round_at(value, -(dp as i64), mode),
        None => value.clone(),
    };
    let min_fraction = dp.unwrap_or(0);
    let rep = if rounded.is_zero() {
        plain("0", 0, min_fraction)
    } else {
        plain(&rounded.coefficient().to_str_radix(10), rounded.e(), min_fraction)
    };
    // A negative value keeps its sign even when it rounds to zero.
    with_sign(value.is_sign_negative() && !value.is_zero(), rep)
}

/// Exponential notation. With `dp` the value is rounded to `dp + 1` significant digits and the
/// fraction is padded to exactly `dp` digits.
pub(crate) fn to_exponential_internal(value: &Decimal, dp: Option<u64>, mode: RoundingMode) -> String {
    if let Some(special) = special_str(value) {
        return special.to_string();
    }
    let min_fraction = dp.unwrap_or(0);
    if value.is_zero() {
        return exponential("0", 0, min_fraction);
    }
    let rounded = match dp {
        Some(dp) => round_sd(value, dp.saturating_add(1), mode),
        None => value.clone(),
    };
    let rep = exponential(&rounded.coefficient().to_str_radix(10), rounded.e(), min_fraction);
    with_sign(value.is_sign_negative(), rep)
}

//! Scalar literals: the text written after `key: ` or `- `.
//!
//! | Kind | Written as | Parsed from |
//! |------|------------|-------------|
//! | bool | `true` / `false` | exactly `true` or `false` |
//! | integers | decimal digits | decimal, range checked against the bit width |
//! | floats | six decimal places, `1.230000` | any decimal float |
//! | string | verbatim | verbatim, no escaping |
//! | duration | `1h2m3.5s`, `20ms`, `0s` | sequence of number + unit |
//!
//! Strings cannot contain line breaks, since every value ends at the end of
//! its line.

use crate::{Error, Kind, Result, Value};
use std::fmt::Write as _;
use std::num::IntErrorKind;
use std::time::Duration;

const NANOS_PER_SEC: u128 = 1_000_000_000;

/// Formats a scalar value of the given kind.
///
/// # Examples
///
/// ```rust
/// use sconf::literal::format_scalar;
/// use sconf::{Kind, Value};
///
/// assert_eq!(format_scalar(&Value::Float(1.23), &Kind::Float(64)).unwrap(), "1.230000");
/// assert!(format_scalar(&Value::from("a\nb"), &Kind::String).is_err());
/// ```
pub fn format_scalar(value: &Value, kind: &Kind) -> Result<String> {
    match (kind, value) {
        (Kind::Bool, Value::Bool(b)) => Ok(b.to_string()),
        (Kind::Int(_) | Kind::Uint(_), Value::Int(i)) => Ok(i.to_string()),
        (Kind::Int(_) | Kind::Uint(_), Value::Uint(u)) => Ok(u.to_string()),
        (Kind::Float(_), Value::Float(f)) => Ok(format!("{:.6}", f)),
        (Kind::String, Value::String(s)) => {
            if s.contains(['\n', '\r']) {
                return Err(Error::UnsupportedValue("multiline string".to_string()));
            }
            Ok(s.clone())
        }
        (Kind::Duration, Value::Duration(d)) => Ok(format_duration(*d)),
        (kind, value) => Err(Error::type_mismatch(kind, value.kind_name())),
    }
}

/// Parses a scalar literal for the given kind.
///
/// # Examples
///
/// ```rust
/// use sconf::literal::parse_scalar;
/// use sconf::{Error, Kind, Value};
///
/// assert_eq!(parse_scalar(&Kind::Int(8), "-128").unwrap(), Value::Int(-128));
/// assert!(matches!(parse_scalar(&Kind::Int(8), "128"), Err(Error::Overflow { .. })));
/// assert!(matches!(parse_scalar(&Kind::Bool, "yes"), Err(Error::MalformedLiteral { .. })));
/// ```
pub fn parse_scalar(kind: &Kind, text: &str) -> Result<Value> {
    match kind {
        Kind::Bool => match text {
            "true" => Ok(Value::Bool(true)),
            "false" => Ok(Value::Bool(false)),
            _ => Err(Error::malformed(text, kind)),
        },
        Kind::Int(bits) => {
            let n: i64 = text.parse().map_err(|e: std::num::ParseIntError| {
                int_error(e.kind(), text, kind)
            })?;
            if *bits < 64 {
                let max = (1i64 << (bits - 1)) - 1;
                let min = -max - 1;
                if n < min || n > max {
                    return Err(Error::overflow(text, kind));
                }
            }
            Ok(Value::Int(n))
        }
        Kind::Uint(bits) => {
            let n: u64 = text.parse().map_err(|e: std::num::ParseIntError| {
                int_error(e.kind(), text, kind)
            })?;
            if *bits < 64 && n >> bits != 0 {
                return Err(Error::overflow(text, kind));
            }
            Ok(Value::Uint(n))
        }
        Kind::Float(bits) => {
            let f: f64 = text.parse().map_err(|_| Error::malformed(text, kind))?;
            if *bits == 32 && f.is_finite() && (f as f32).is_infinite() {
                return Err(Error::overflow(text, kind));
            }
            Ok(Value::Float(f))
        }
        Kind::String => Ok(Value::String(text.to_string())),
        Kind::Duration => parse_duration(text).map(Value::Duration),
        Kind::Reference(inner) => {
            let target = parse_scalar(inner, text)?;
            Ok(Value::Reference(Some(Box::new(target))))
        }
        _ => Err(Error::UnsupportedType(kind.to_string())),
    }
}

fn int_error(kind: &IntErrorKind, text: &str, ty: &Kind) -> Error {
    match kind {
        IntErrorKind::PosOverflow | IntErrorKind::NegOverflow => Error::overflow(text, ty),
        _ => Error::malformed(text, ty),
    }
}

/// Formats a duration in its canonical short form.
///
/// Durations under a second use a single unit (`ns`, `µs`, `ms`), longer ones
/// are written as hours, minutes and seconds, leaving out leading zero units.
///
/// # Examples
///
/// ```rust
/// use sconf::literal::format_duration;
/// use std::time::Duration;
///
/// assert_eq!(format_duration(Duration::ZERO), "0s");
/// assert_eq!(format_duration(Duration::from_secs(1)), "1s");
/// assert_eq!(format_duration(Duration::from_millis(1500)), "1.5s");
/// assert_eq!(format_duration(Duration::from_secs(90)), "1m30s");
/// assert_eq!(format_duration(Duration::from_secs(3600)), "1h0m0s");
/// assert_eq!(format_duration(Duration::from_micros(1500)), "1.5ms");
/// ```
#[must_use]
pub fn format_duration(d: Duration) -> String {
    let nanos = d.as_nanos();
    if nanos == 0 {
        return "0s".to_string();
    }
    if nanos < 1_000 {
        return format!("{}ns", nanos);
    }
    if nanos < 1_000_000 {
        return format!("{}µs", decimal(nanos, 1_000, 3));
    }
    if nanos < NANOS_PER_SEC {
        return format!("{}ms", decimal(nanos, 1_000_000, 6));
    }

    let secs = nanos / NANOS_PER_SEC;
    let (hours, minutes, seconds) = (secs / 3600, secs / 60 % 60, secs % 60);
    let mut out = String::new();
    if hours > 0 {
        let _ = write!(out, "{}h", hours);
    }
    if hours > 0 || minutes > 0 {
        let _ = write!(out, "{}m", minutes);
    }
    let whole = seconds * NANOS_PER_SEC + nanos % NANOS_PER_SEC;
    let _ = write!(out, "{}s", decimal(whole, NANOS_PER_SEC, 9));
    out
}

/// `n / unit` with up to `digits` fraction digits, trailing zeros removed.
fn decimal(n: u128, unit: u128, digits: usize) -> String {
    let (whole, frac) = (n / unit, n % unit);
    if frac == 0 {
        return whole.to_string();
    }
    let frac = format!("{:0width$}", frac, width = digits);
    format!("{}.{}", whole, frac.trim_end_matches('0'))
}

/// Parses a duration such as `1h30m`, `1.5s` or `250ms`.
///
/// Accepted units are `ns`, `us` (or `µs`), `ms`, `s`, `m` and `h`. A bare
/// `0` is accepted; any other number needs a unit. Negative durations are
/// rejected.
///
/// # Examples
///
/// ```rust
/// use sconf::literal::parse_duration;
/// use std::time::Duration;
///
/// assert_eq!(parse_duration("1m30s").unwrap(), Duration::from_secs(90));
/// assert_eq!(parse_duration("1.5µs").unwrap(), Duration::from_nanos(1500));
/// assert_eq!(parse_duration("0").unwrap(), Duration::ZERO);
/// assert!(parse_duration("10").is_err());
/// assert!(parse_duration("-1s").is_err());
/// ```
pub fn parse_duration(text: &str) -> Result<Duration> {
    let malformed = || Error::malformed(text, "duration");
    let mut s = text.strip_prefix('+').unwrap_or(text);
    if s == "0" {
        return Ok(Duration::ZERO);
    }
    if s.is_empty() {
        return Err(malformed());
    }

    let mut total: u128 = 0;
    while !s.is_empty() {
        let int_len = s.bytes().take_while(u8::is_ascii_digit).count();
        let (int_part, rest) = s.split_at(int_len);
        let (frac_part, rest) = match rest.strip_prefix('.') {
            Some(after) => {
                let n = after.bytes().take_while(u8::is_ascii_digit).count();
                after.split_at(n)
            }
            None => ("", rest),
        };
        if int_part.is_empty() && frac_part.is_empty() {
            return Err(malformed());
        }

        let unit_len = rest
            .find(|c: char| c.is_ascii_digit() || c == '.')
            .unwrap_or(rest.len());
        let (unit, rest) = rest.split_at(unit_len);
        let scale: u128 = match unit {
            "ns" => 1,
            "us" | "µs" | "μs" => 1_000,
            "ms" => 1_000_000,
            "s" => NANOS_PER_SEC,
            "m" => 60 * NANOS_PER_SEC,
            "h" => 3600 * NANOS_PER_SEC,
            _ => return Err(malformed()),
        };

        let whole: u128 = if int_part.is_empty() {
            0
        } else {
            int_part
                .parse()
                .map_err(|_| Error::overflow(text, "duration"))?
        };
        let part = whole
            .checked_mul(scale)
            .ok_or_else(|| Error::overflow(text, "duration"))?;

        // Digits beyond nanosecond precision cannot change the result.
        let mut divisor: u128 = 1;
        let mut frac: u128 = 0;
        for digit in frac_part.bytes().take(18) {
            frac = frac * 10 + u128::from(digit - b'0');
            divisor *= 10;
        }
        let part = part
            .checked_add(frac * scale / divisor)
            .ok_or_else(|| Error::overflow(text, "duration"))?;

        total = total
            .checked_add(part)
            .ok_or_else(|| Error::overflow(text, "duration"))?;
        s = rest;
    }

    let secs = u64::try_from(total / NANOS_PER_SEC).map_err(|_| Error::overflow(text, "duration"))?;
    Ok(Duration::new(secs, (total % NANOS_PER_SEC) as u32))
}

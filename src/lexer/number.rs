//! Numeric literal grammar.
//!
//! Accepts exactly the strings a strict 64-bit floating point literal parser
//! accepts: optional sign, `NaN`, `Infinity`, decimal forms with an optional
//! exponent, hexadecimal forms with a mandatory binary exponent, and an
//! optional `f`/`F`/`d`/`D` type suffix. Surrounding ASCII control and space
//! characters are tolerated.

use lazy_static::lazy_static;
use regex::{Captures, Regex};

lazy_static! {
    static ref DOUBLE_LITERAL: Regex = Regex::new(concat!(
        r"^[\x00-\x20]*",
        r"(?P<sign>[+-]?)",
        r"(?:",
        r"(?P<nan>NaN)",
        r"|(?P<inf>Infinity)",
        r"|(?:",
        r"(?:(?P<int>[0-9]+)\.?(?P<frac>[0-9]*)(?:[eE](?P<exp>[+-]?[0-9]+))?)",
        r"|(?:\.(?P<dfrac>[0-9]+)(?:[eE](?P<dexp>[+-]?[0-9]+))?)",
        r"|(?:0[xX](?:(?P<hint>[0-9a-fA-F]+)\.?|(?P<hlead>[0-9a-fA-F]*)\.(?P<hfrac>[0-9a-fA-F]+))",
        r"[pP](?P<hexp>[+-]?[0-9]+))",
        r")[fFdD]?",
        r")",
        r"[\x00-\x20]*$",
    ))
    .unwrap();
}

/// Hex digits kept in the significand before the rest only feed the sticky bit.
const MAX_HEX_DIGITS: u32 = 15;

const MANTISSA_BITS: i64 = 53;
const EXPONENT_BIAS: i64 = 1023;
const MAX_EXPONENT: i64 = 1023;
const MIN_NORMAL_EXPONENT: i64 = -1022;
const MIN_SUBNORMAL_EXPONENT: i64 = -1074;

/// Parses `text` against the numeric grammar, `None` when it does not match.
pub fn parse_double(text: &str) -> Option<f64> {
    let captures = DOUBLE_LITERAL.captures(text)?;
    let negative = &captures["sign"] == "-";

    let magnitude = if captures.name("nan").is_some() {
        f64::NAN
    } else if captures.name("inf").is_some() {
        f64::INFINITY
    } else if let Some(hexp) = captures.name("hexp") {
        let (int, frac) = match captures.name("hint") {
            Some(int) => (int.as_str(), ""),
            None => (group(&captures, "hlead"), group(&captures, "hfrac")),
        };
        parse_hex(int, frac, hexp.as_str())
    } else {
        let (int, frac, exp) = match captures.name("int") {
            Some(int) => (int.as_str(), group(&captures, "frac"), group(&captures, "exp")),
            None => ("0", group(&captures, "dfrac"), group(&captures, "dexp")),
        };
        parse_decimal(int, frac, exp)?
    };

    Some(if negative { -magnitude } else { magnitude })
}

fn group<'t>(captures: &Captures<'t>, name: &str) -> &'t str {
    captures.name(name).map_or("", |m| m.as_str())
}

fn parse_decimal(int: &str, frac: &str, exp: &str) -> Option<f64> {
    let mut normalized = String::with_capacity(int.len() + frac.len() + exp.len() + 4);
    normalized.push_str(int);
    normalized.push('.');
    normalized.push_str(if frac.is_empty() { "0" } else { frac });
    if !exp.is_empty() {
        normalized.push('e');
        normalized.push_str(exp);
    }

    normalized.parse::<f64>().ok()
}

fn parse_hex(int: &str, frac: &str, exp: &str) -> f64 {
    let mut significand: u64 = 0;
    let mut kept: u32 = 0;
    let mut binary_exponent: i64 = 0;
    let mut sticky = false;

    let digits = int
        .chars()
        .map(|c| (c, false))
        .chain(frac.chars().map(|c| (c, true)));

    for (c, fractional) in digits {
        let digit = c.to_digit(16).unwrap_or(0) as u64;

        if significand == 0 && digit == 0 {
            if fractional {
                binary_exponent -= 4;
            }
            continue;
        }

        if kept < MAX_HEX_DIGITS {
            significand = (significand << 4) | digit;
            kept += 1;
            if fractional {
                binary_exponent -= 4;
            }
        } else {
            sticky |= digit != 0;
            if !fractional {
                binary_exponent += 4;
            }
        }
    }

    if significand == 0 {
        return 0.0;
    }

    let exponent = exp.parse::<i64>().unwrap_or(if exp.starts_with('-') {
        i64::MIN / 2
    } else {
        i64::MAX / 2
    });

    round_to_double(significand, exponent.saturating_add(binary_exponent), sticky)
}

/// Rounds `significand * 2^exponent` (plus a sticky remainder below it) to the
/// nearest double, ties to even, in a single step.
fn round_to_double(significand: u64, exponent: i64, sticky: bool) -> f64 {
    let width = 64 - significand.leading_zeros() as i64;
    let top = exponent.saturating_add(width - 1);

    if top > MAX_EXPONENT {
        return f64::INFINITY;
    }

    // Exponent of the last mantissa bit: 52 below the top bit for normal
    // results, pinned to the smallest subnormal below that.
    let lsb = if top >= MIN_NORMAL_EXPONENT {
        top - (MANTISSA_BITS - 1)
    } else {
        MIN_SUBNORMAL_EXPONENT
    };
    let shift = lsb - exponent;

    let mut mantissa = if shift <= 0 {
        significand << (-shift)
    } else if shift >= 128 {
        0
    } else {
        let wide = significand as u128;
        let kept = wide >> shift;
        let half = (wide >> (shift - 1)) & 1 == 1;
        let rest = wide & ((1u128 << (shift - 1)) - 1) != 0 || sticky;

        if half && (rest || kept & 1 == 1) {
            (kept + 1) as u64
        } else {
            kept as u64
        }
    };

    let mut lsb = lsb;
    if mantissa >> MANTISSA_BITS != 0 {
        mantissa >>= 1;
        lsb += 1;
    }

    if mantissa >> (MANTISSA_BITS - 1) == 0 {
        // Subnormal, or zero after rounding.
        return f64::from_bits(mantissa);
    }

    let biased = lsb + (MANTISSA_BITS - 1) + EXPONENT_BIAS;
    if biased >= 0x7FF {
        return f64::INFINITY;
    }

    let fraction = mantissa & ((1u64 << (MANTISSA_BITS - 1)) - 1);
    f64::from_bits(((biased as u64) << (MANTISSA_BITS - 1)) | fraction)
}

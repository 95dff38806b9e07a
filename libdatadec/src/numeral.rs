//! Numeral base conversion.
//!
//! Text is reinterpreted between binary, octal, decimal and hexadecimal in
//! one of two modes:
//!
//! - **Whole value**: the input is one integer of any size. Output has no
//!   prefix and no leading zeros.
//! - **Per byte**: the input is whitespace-separated tokens. Every token is
//!   re-emitted zero-padded to a minimum width (8 binary digits, 3 octal,
//!   2 hex; decimal is unpadded) and the results are joined with a single
//!   space. Values past 255 simply come out wider, and a `-` sign counts
//!   toward the width: `-5` in binary is `-0000101`.
//!
//! Input tokens follow the usual integer literal rules: an optional sign, an
//! optional prefix matching the input base (`0b`, `0o`, `0x`), and single
//! underscores between digits.

use crate::error::{ConversionError, Result};
use num_bigint::BigInt;
use num_traits::Signed;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use tracing::debug;

/// One of the four supported numeral bases.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Base {
    Bin,
    Oct,
    Dec,
    Hex,
}

impl Base {
    /// Every supported base, in ascending radix order.
    pub const ALL: [Base; 4] = [Base::Bin, Base::Oct, Base::Dec, Base::Hex];

    pub fn radix(self) -> u32 {
        match self {
            Base::Bin => 2,
            Base::Oct => 8,
            Base::Dec => 10,
            Base::Hex => 16,
        }
    }

    /// Short name used on the command line and in settings.
    pub fn name(self) -> &'static str {
        match self {
            Base::Bin => "bin",
            Base::Oct => "oct",
            Base::Dec => "dec",
            Base::Hex => "hex",
        }
    }

    fn prefix(self) -> Option<&'static str> {
        match self {
            Base::Bin => Some("0b"),
            Base::Oct => Some("0o"),
            Base::Dec => None,
            Base::Hex => Some("0x"),
        }
    }

    /// Render an integer in this base: lowercase, unprefixed, no padding.
    pub fn format_value(self, n: &BigInt) -> String {
        n.to_str_radix(self.radix())
    }

    /// Minimum digit count in per-byte output.
    pub fn byte_width(self) -> usize {
        match self {
            Base::Bin => 8,
            Base::Oct => 3,
            Base::Dec => 0,
            Base::Hex => 2,
        }
    }

    /// Render one per-byte token, zero-padded to `byte_width`.
    ///
    /// The sign sits before the zeros and counts toward the width.
    pub fn format_byte(self, n: &BigInt) -> String {
        let digits = n.magnitude().to_str_radix(self.radix());
        let sign = if n.is_negative() { "-" } else { "" };
        let pad = self.byte_width().saturating_sub(sign.len() + digits.len());
        format!("{}{}{}", sign, "0".repeat(pad), digits)
    }
}

impl FromStr for Base {
    type Err = ConversionError;

    fn from_str(s: &str) -> Result<Self> {
        let name = s.trim();
        Base::ALL
            .into_iter()
            .find(|b| b.name().eq_ignore_ascii_case(name))
            .ok_or_else(|| ConversionError::UnsupportedBase(name.to_string()))
    }
}

impl fmt::Display for Base {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Convert numeral text given base names (`bin`, `oct`, `dec`, `hex`).
///
/// Both names are checked before any input is looked at.
///
/// # Example
///
/// ```
/// use libdatadec::convert;
///
/// assert_eq!(convert("255", "hex", "dec", false).unwrap(), "ff");
/// assert_eq!(convert("FF 0A", "bin", "hex", true).unwrap(), "11111111 00001010");
/// ```
pub fn convert(text: &str, base_out: &str, base_in: &str, per_byte: bool) -> Result<String> {
    let base_out: Base = base_out.parse()?;
    let base_in: Base = base_in.parse()?;
    convert_bases(text, base_out, base_in, per_byte)
}

/// Convert numeral text between two bases.
pub fn convert_bases(text: &str, base_out: Base, base_in: Base, per_byte: bool) -> Result<String> {
    if per_byte {
        let values = parse_tokens(text, base_in)?;
        let out: Vec<String> = values.iter().map(|n| base_out.format_byte(n)).collect();
        Ok(out.join(" "))
    } else {
        let n = parse_numeral(text, base_in)?;
        Ok(base_out.format_value(&n))
    }
}

/// Split text on whitespace and parse every token.
pub fn parse_tokens(text: &str, base: Base) -> Result<Vec<BigInt>> {
    let tokens: Vec<&str> = text.split_whitespace().collect();
    if tokens.is_empty() {
        return Err(ConversionError::NumeralParseFailure {
            token: text.trim().to_string(),
            base: base.name(),
        });
    }

    tokens
        .into_iter()
        .map(|token| parse_numeral(token, base))
        .collect()
}

/// Parse one integer literal in `base`.
pub fn parse_numeral(token: &str, base: Base) -> Result<BigInt> {
    let trimmed = token.trim();
    let fail = || ConversionError::NumeralParseFailure {
        token: trimmed.to_string(),
        base: base.name(),
    };

    let (negative, unsigned) = match trimmed.as_bytes().first() {
        Some(b'-') => (true, &trimmed[1..]),
        Some(b'+') => (false, &trimmed[1..]),
        _ => (false, trimmed),
    };

    // A prefix may be followed by one underscore: `0x_ff`.
    let digits = match base.prefix().and_then(|p| strip_prefix_ignore_case(unsigned, p)) {
        Some(rest) => rest.strip_prefix('_').unwrap_or(rest),
        None => unsigned,
    };

    if digits.is_empty()
        || digits.starts_with('_')
        || digits.ends_with('_')
        || digits.contains("__")
    {
        return Err(fail());
    }

    let radix = base.radix();
    let cleaned: String = digits.chars().filter(|&c| c != '_').collect();
    if !cleaned.chars().all(|c| c.is_digit(radix)) {
        return Err(fail());
    }

    let magnitude = BigInt::parse_bytes(cleaned.as_bytes(), radix).ok_or_else(fail)?;
    Ok(if negative { -magnitude } else { magnitude })
}

fn strip_prefix_ignore_case<'a>(s: &'a str, prefix: &str) -> Option<&'a str> {
    let head = s.get(..prefix.len())?;
    if head.eq_ignore_ascii_case(prefix) {
        Some(&s[prefix.len()..])
    } else {
        None
    }
}

/// A line that could not be converted.
#[derive(Debug, Clone, PartialEq)]
pub struct LineFailure {
    /// One-based line number.
    pub line_num: usize,
    /// The trimmed line text.
    pub line: String,
    pub error: ConversionError,
}

/// Outcome of converting a batch of lines.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LineReport {
    /// Converted lines, in input order.
    pub converted: Vec<String>,
    pub failures: Vec<LineFailure>,
}

/// Convert each non-blank line on its own.
///
/// A failing line is recorded and the rest still convert.
pub fn convert_lines<I, S>(lines: I, base_out: Base, base_in: Base, per_byte: bool) -> LineReport
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut report = LineReport::default();

    for (i, raw) in lines.into_iter().enumerate() {
        let line = raw.as_ref().trim();
        if line.is_empty() {
            continue;
        }
        match convert_bases(line, base_out, base_in, per_byte) {
            Ok(out) => report.converted.push(out),
            Err(error) => {
                debug!(line = i + 1, %error, "numeral conversion failed");
                report.failures.push(LineFailure {
                    line_num: i + 1,
                    line: line.to_string(),
                    error,
                });
            }
        }
    }

    report
}

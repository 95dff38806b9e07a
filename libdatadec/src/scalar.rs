//! Scalar normalization.
//!
//! Every raw token maps to exactly one scalar node. The checks run in a
//! fixed order and the first match wins:
//!
//! 1. empty -> null
//! 2. `null` / `true` / `false`, any case
//! 3. ASCII digits only -> integer
//! 4. anything `f64` accepts (sign, point, exponent, `inf`, `nan`) -> float,
//!    with single underscores allowed between digits (`1_000`)
//! 5. wrapped in matching quotes -> the inner text, unescaped
//! 6. otherwise the trimmed token as a string
//!
//! A leading `-` fails the digits check, so `-3` becomes the float `-3.0`.

use crate::value::Node;
use num_bigint::BigInt;

/// Infer a typed scalar from a raw token.
pub fn normalize(raw: &str) -> Node {
    let token = raw.trim();

    if token.is_empty() {
        return Node::Null;
    }

    if let Some(node) = parse_keyword(token) {
        return node;
    }

    if is_all_digits(token) {
        if let Ok(n) = token.parse::<BigInt>() {
            return Node::Int(n);
        }
    }

    if let Some(f) = parse_float(token) {
        return Node::Float(f);
    }

    if let Some(inner) = strip_quotes(token) {
        return Node::String(inner.to_string());
    }

    Node::String(token.to_string())
}

fn parse_keyword(s: &str) -> Option<Node> {
    if s.eq_ignore_ascii_case("null") {
        Some(Node::Null)
    } else if s.eq_ignore_ascii_case("true") {
        Some(Node::Bool(true))
    } else if s.eq_ignore_ascii_case("false") {
        Some(Node::Bool(false))
    } else {
        None
    }
}

fn is_all_digits(s: &str) -> bool {
    !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit())
}

/// `f64` parse that also takes digit separators: every `_` must sit
/// between two ASCII digits.
fn parse_float(token: &str) -> Option<f64> {
    if !token.contains('_') {
        return token.parse().ok();
    }
    let bytes = token.as_bytes();
    let separated = bytes.iter().enumerate().all(|(i, &b)| {
        b != b'_'
            || (i > 0
                && i + 1 < bytes.len()
                && bytes[i - 1].is_ascii_digit()
                && bytes[i + 1].is_ascii_digit())
    });
    if !separated {
        return None;
    }
    token.replace('_', "").parse().ok()
}

/// Inner text of a token that starts and ends with the same quote.
/// A lone quote character yields the empty string.
fn strip_quotes(s: &str) -> Option<&str> {
    for quote in ['"', '\''] {
        if s.starts_with(quote) && s.ends_with(quote) {
            return Some(s.get(1..s.len() - 1).unwrap_or(""));
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_is_null() {
        assert_eq!(normalize(""), Node::Null);
        assert_eq!(normalize("   "), Node::Null);
    }

    #[test]
    fn test_keywords_any_case() {
        assert_eq!(normalize("null"), Node::Null);
        assert_eq!(normalize("NULL"), Node::Null);
        assert_eq!(normalize("TRUE"), Node::Bool(true));
        assert_eq!(normalize(" True "), Node::Bool(true));
        assert_eq!(normalize("fAlSe"), Node::Bool(false));
    }

    #[test]
    fn test_integers() {
        assert_eq!(normalize("42"), Node::Int(42.into()));
        assert_eq!(normalize("007"), Node::Int(7.into()));
        assert_eq!(
            normalize("123456789012345678901234567890"),
            Node::Int("123456789012345678901234567890".parse().unwrap())
        );
    }

    #[test]
    fn test_signed_integers_become_floats() {
        assert_eq!(normalize("-3"), Node::Float(-3.0));
        assert_eq!(normalize("+7"), Node::Float(7.0));
    }

    #[test]
    fn test_floats() {
        assert_eq!(normalize("1.5"), Node::Float(1.5));
        assert_eq!(normalize(".5"), Node::Float(0.5));
        assert_eq!(normalize("1."), Node::Float(1.0));
        assert_eq!(normalize("1e3"), Node::Float(1000.0));
        assert_eq!(normalize("-2.5E-1"), Node::Float(-0.25));
        assert_eq!(normalize("inf"), Node::Float(f64::INFINITY));
        assert_eq!(normalize("-Infinity"), Node::Float(f64::NEG_INFINITY));
        assert!(normalize("nan").as_float().unwrap().is_nan());
    }

    #[test]
    fn test_underscore_separated_floats() {
        assert_eq!(normalize("1_000"), Node::Float(1000.0));
        assert_eq!(normalize("1_0.5"), Node::Float(10.5));
        assert_eq!(normalize("-2_5"), Node::Float(-25.0));
        assert_eq!(normalize("1.0_1"), Node::Float(1.01));
        assert_eq!(normalize("1e1_0"), Node::Float(1e10));
    }

    #[test]
    fn test_misplaced_underscores_stay_strings() {
        for token in ["_1", "1_", "1__0", "1_.5", "1._5", "1_e5", "1e_5", "-_1", "in_f"] {
            assert_eq!(normalize(token), Node::from(token), "{}", token);
        }
    }

    #[test]
    fn test_quoted_strings() {
        assert_eq!(normalize("\"hello\""), Node::from("hello"));
        assert_eq!(normalize("'hello world'"), Node::from("hello world"));
        assert_eq!(normalize("\"42\""), Node::from("42"));
        assert_eq!(normalize("'a\\nb'"), Node::from("a\\nb"));
        assert_eq!(normalize("\"\""), Node::from(""));
        assert_eq!(normalize("\""), Node::from(""));
    }

    #[test]
    fn test_mismatched_quotes_kept() {
        assert_eq!(normalize("\"hello'"), Node::from("\"hello'"));
        assert_eq!(normalize("'open"), Node::from("'open"));
    }

    #[test]
    fn test_plain_strings() {
        assert_eq!(normalize("hello"), Node::from("hello"));
        assert_eq!(normalize("  spaced out  "), Node::from("spaced out"));
        assert_eq!(normalize("1.2.3"), Node::from("1.2.3"));
        assert_eq!(normalize("0x1F"), Node::from("0x1F"));
        assert_eq!(normalize("localhost:8080"), Node::from("localhost:8080"));
    }
}

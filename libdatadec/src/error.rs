//! Error types for numeral conversion.
//!
//! Decoding never fails: malformed lines are skipped and scalars that match
//! no other shape become strings. Only the numeral engine reports errors.

use thiserror::Error;

/// Result type for numeral conversion.
pub type Result<T> = std::result::Result<T, ConversionError>;

/// Error type for numeral conversion.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConversionError {
    /// Base name outside of bin, oct, dec, hex.
    #[error("Unsupported number type \"{0}\" (valid types are: bin, oct, dec, hex)")]
    UnsupportedBase(String),

    /// Token is not a valid numeral in the declared base.
    #[error("Invalid {base} number \"{token}\"")]
    NumeralParseFailure { token: String, base: &'static str },
}

impl ConversionError {
    /// The offending token, if the error concerns one.
    pub fn token(&self) -> Option<&str> {
        match self {
            ConversionError::UnsupportedBase(_) => None,
            ConversionError::NumeralParseFailure { token, .. } => Some(token),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages() {
        let err = ConversionError::UnsupportedBase("qux".into());
        assert_eq!(
            err.to_string(),
            "Unsupported number type \"qux\" (valid types are: bin, oct, dec, hex)"
        );
        let err = ConversionError::NumeralParseFailure {
            token: "zz".into(),
            base: "hex",
        };
        assert_eq!(err.to_string(), "Invalid hex number \"zz\"");
        assert_eq!(err.token(), Some("zz"));
    }

    #[test]
    fn test_base_error_has_no_token() {
        assert_eq!(ConversionError::UnsupportedBase("x".into()).token(), None);
    }
}

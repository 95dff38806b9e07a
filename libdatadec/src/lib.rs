//! Data decoder core.
//!
//! Two independent pieces live here:
//!
//! - An indentation-driven decoder that reads a YAML-like dialect
//!   (`key: value`, `key:` blocks, `- item` lists, `#` comments) into a
//!   [`Node`] tree, inferring null, boolean, integer, float and string
//!   scalars along the way.
//! - A numeral engine that rewrites numbers between binary, octal, decimal
//!   and hexadecimal, either as one whole value or byte by byte.
//!
//! # Decoding Pipeline
//!
//! 1. **Scanner**: Strips comments, drops blank lines, measures indentation
//!    and extracts the `- ` list marker from each physical line.
//!
//! 2. **Decoder**: Attaches each scan line to the container on top of an
//!    indent stack, opening and closing maps and lists as the indent moves.
//!
//! 3. **Normalizer**: Turns every leaf token into a typed scalar.
//!
//! Nothing is shared between calls; every function here is pure and safe to
//! call from any number of threads.

mod decoder;
mod encode;
mod error;
mod numeral;
mod scalar;
mod scanner;
mod value;

pub use decoder::{decode, decode_str};
pub use encode::to_json;
pub use error::{ConversionError, Result};
pub use numeral::{
    convert, convert_bases, convert_lines, parse_numeral, parse_tokens, Base, LineFailure,
    LineReport,
};
pub use scalar::normalize;
pub use value::Node;

/// Decode a document and render it as sorted, indented JSON.
///
/// # Example
///
/// ```
/// let json = libdatadec::decode_to_json("b: 2\na:\n  - x\n");
/// assert_eq!(json, "{\n  \"a\": [\n    \"x\"\n  ],\n  \"b\": 2\n}");
/// ```
pub fn decode_to_json(source: &str) -> String {
    to_json(&decode_str(source))
}

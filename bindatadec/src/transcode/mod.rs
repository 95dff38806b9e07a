//! Output formats for decoded trees.

pub mod cbor;
pub mod toml;
pub mod yaml;

use anyhow::Result;
use clap::ValueEnum;
use libdatadec::{to_json, Node};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Format {
    Json,
    Yaml,
    Toml,
    Cbor,
}

impl Format {
    /// File extension used for `--write`.
    pub fn extension(self) -> &'static str {
        match self {
            Format::Json => "json",
            Format::Yaml => "yaml",
            Format::Toml => "toml",
            Format::Cbor => "cbor",
        }
    }
}

/// A rendered document.
pub enum Rendered {
    Text(String),
    Binary(Vec<u8>),
}

impl Rendered {
    pub fn into_bytes(self) -> Vec<u8> {
        match self {
            Rendered::Text(s) => s.into_bytes(),
            Rendered::Binary(b) => b,
        }
    }
}

pub fn render(node: &Node, format: Format) -> Result<Rendered> {
    Ok(match format {
        Format::Json => Rendered::Text(to_json(node)),
        Format::Yaml => Rendered::Text(yaml::encode(node)?),
        Format::Toml => Rendered::Text(toml::encode(node)?),
        Format::Cbor => Rendered::Binary(cbor::encode(node)?),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use libdatadec::decode_str;

    #[test]
    fn test_every_format_renders() {
        let tree = decode_str("name: x\nitems:\n  - 1\n  - 2\n");
        for format in Format::value_variants() {
            assert!(render(&tree, *format).is_ok(), "{:?}", format);
        }
    }

    #[test]
    fn test_json_has_no_trailing_newline() {
        let tree = decode_str("a: 1\n");
        match render(&tree, Format::Json).unwrap() {
            Rendered::Text(s) => assert_eq!(s, "{\n  \"a\": 1\n}"),
            Rendered::Binary(_) => panic!("JSON should be text"),
        }
    }
}

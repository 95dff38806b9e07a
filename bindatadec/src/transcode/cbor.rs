//! CBOR rendering of decoded trees.
//!
//! Mapping:
//!   - Node::Null    -> CBOR null (simple value 22)
//!   - Node::Bool    -> CBOR bool (simple values 20/21)
//!   - Node::Int     -> CBOR integer (smallest encoding that fits)
//!   - Node::Float   -> CBOR float64 (always 9 bytes, never downgraded)
//!   - Node::String  -> CBOR text string
//!   - Node::List    -> CBOR array
//!   - Node::Map     -> CBOR map, text string keys sorted
//!
//! Integers outside -2^64 to 2^64-1 produce an error rather than bignum
//! tags.

use anyhow::{anyhow, Result};
use libdatadec::Node;
use num_bigint::{BigInt, Sign};
use num_traits::ToPrimitive;

// ---------------------------------------------------------------------------
// Encode
//
// Written by hand: ciborium's serializer shrinks float64 to float16/float32
// whenever the value fits, and every float here stays 8 bytes wide.
// ---------------------------------------------------------------------------

/// Encode a node as CBOR bytes.
pub fn encode(node: &Node) -> Result<Vec<u8>> {
    let mut buf = Vec::new();
    write_node(&mut buf, node)?;
    Ok(buf)
}

fn write_node(buf: &mut Vec<u8>, node: &Node) -> Result<()> {
    match node {
        Node::Null => buf.push(0xf6),
        Node::Bool(b) => buf.push(if *b { 0xf5 } else { 0xf4 }),
        Node::Int(n) => write_integer(buf, n)?,
        Node::Float(f) => {
            buf.push(0xfb);
            buf.extend_from_slice(&f.to_be_bytes());
        }
        Node::String(s) => write_text(buf, s),
        Node::List(items) => {
            write_type_and_length(buf, 4, items.len() as u64);
            for item in items {
                write_node(buf, item)?;
            }
        }
        Node::Map(entries) => {
            let mut sorted: Vec<&(String, Node)> = entries.iter().collect();
            sorted.sort_by(|a, b| a.0.cmp(&b.0));
            write_type_and_length(buf, 5, sorted.len() as u64);
            for (key, value) in sorted {
                write_text(buf, key);
                write_node(buf, value)?;
            }
        }
    }
    Ok(())
}

fn write_text(buf: &mut Vec<u8>, s: &str) {
    write_type_and_length(buf, 3, s.len() as u64);
    buf.extend_from_slice(s.as_bytes());
}

/// Write a CBOR major type with its length or value argument.
///
/// The low 5 bits hold arguments up to 23; 24..27 announce a following
/// 1, 2, 4 or 8 byte argument.
fn write_type_and_length(buf: &mut Vec<u8>, major: u8, val: u64) {
    let high = major << 5;
    match val {
        0..=23 => buf.push(high | val as u8),
        24..=0xff => {
            buf.push(high | 24);
            buf.push(val as u8);
        }
        0x100..=0xffff => {
            buf.push(high | 25);
            buf.extend_from_slice(&(val as u16).to_be_bytes());
        }
        0x10000..=0xffff_ffff => {
            buf.push(high | 26);
            buf.extend_from_slice(&(val as u32).to_be_bytes());
        }
        _ => {
            buf.push(high | 27);
            buf.extend_from_slice(&val.to_be_bytes());
        }
    }
}

/// Major 0 carries n, major 1 carries -1 - n.
fn write_integer(buf: &mut Vec<u8>, n: &BigInt) -> Result<()> {
    let out_of_range = || anyhow!("integer {} exceeds CBOR's native integer range", n);
    if n.sign() == Sign::Minus {
        let arg = ((-n) - BigInt::from(1)).to_u64().ok_or_else(out_of_range)?;
        write_type_and_length(buf, 1, arg);
    } else {
        let arg = n.to_u64().ok_or_else(out_of_range)?;
        write_type_and_length(buf, 0, arg);
    }
    Ok(())
}

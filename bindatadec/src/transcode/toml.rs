//! TOML rendering of decoded trees.
//!
//! Mapping:
//!   - Node::Null    -> error (TOML has no null)
//!   - Node::Bool    -> TOML boolean
//!   - Node::Int     -> TOML integer (must fit in i64)
//!   - Node::Float   -> TOML float
//!   - Node::String  -> TOML string
//!   - Node::List    -> TOML array (maps inside become inline tables)
//!   - Node::Map     -> TOML table, keys sorted
//!
//! TOML requires the top-level value to be a table, so a document decoded
//! as a list cannot be rendered.

use anyhow::{anyhow, bail, Result};
use libdatadec::Node;
use num_traits::ToPrimitive;
use toml_edit::{Array, DocumentMut, Formatted, InlineTable, Item, Table, Value};

/// Encode a node as a TOML string.
pub fn encode(node: &Node) -> Result<String> {
    let entries = match node {
        Node::Map(entries) => entries,
        _ => bail!("TOML requires the top-level value to be a table"),
    };
    let mut doc = DocumentMut::new();
    for (key, value) in sorted(entries) {
        doc.insert(key, node_to_item(value)?);
    }
    Ok(doc.to_string())
}

fn sorted(entries: &[(String, Node)]) -> Vec<&(String, Node)> {
    let mut sorted: Vec<&(String, Node)> = entries.iter().collect();
    sorted.sort_by(|a, b| a.0.cmp(&b.0));
    sorted
}

fn node_to_item(node: &Node) -> Result<Item> {
    match node {
        Node::Map(entries) => {
            let mut table = Table::new();
            for (key, value) in sorted(entries) {
                table.insert(key, node_to_item(value)?);
            }
            Ok(Item::Table(table))
        }
        other => Ok(Item::Value(node_to_value(other)?)),
    }
}

fn node_to_value(node: &Node) -> Result<Value> {
    match node {
        Node::Null => bail!("TOML has no null type"),
        Node::Bool(b) => Ok(Value::Boolean(Formatted::new(*b))),
        Node::Int(n) => {
            let i = n
                .to_i64()
                .ok_or_else(|| anyhow!("Integer {} too large for TOML (i64)", n))?;
            Ok(Value::Integer(Formatted::new(i)))
        }
        Node::Float(f) => Ok(Value::Float(Formatted::new(*f))),
        Node::String(s) => Ok(Value::String(Formatted::new(s.clone()))),
        Node::List(items) => {
            let mut arr = Array::new();
            for item in items {
                arr.push(node_to_value(item)?);
            }
            Ok(Value::Array(arr))
        }
        Node::Map(entries) => {
            let mut inline = InlineTable::new();
            for (key, value) in sorted(entries) {
                inline.insert(key, node_to_value(value)?);
            }
            Ok(Value::InlineTable(inline))
        }
    }
}

//! YAML rendering of decoded trees.
//!
//! Mapping:
//!   - Node::Null    -> YAML null
//!   - Node::Bool    -> YAML bool
//!   - Node::Int     -> YAML integer (as a string when beyond i64/u64)
//!   - Node::Float   -> YAML float (including .nan, .inf, -.inf)
//!   - Node::String  -> YAML string
//!   - Node::List    -> YAML sequence
//!   - Node::Map     -> YAML mapping, keys sorted

use anyhow::{Context, Result};
use libdatadec::Node;
use num_traits::ToPrimitive;

/// Encode a node as a YAML string.
pub fn encode(node: &Node) -> Result<String> {
    serde_yaml::to_string(&node_to_yaml(node)).context("YAML encode error")
}

fn node_to_yaml(node: &Node) -> serde_yaml::Value {
    match node {
        Node::Null => serde_yaml::Value::Null,
        Node::Bool(b) => serde_yaml::Value::Bool(*b),
        Node::Int(n) => {
            if let Some(i) = n.to_i64() {
                serde_yaml::Value::Number(serde_yaml::Number::from(i))
            } else if let Some(u) = n.to_u64() {
                serde_yaml::Value::Number(serde_yaml::Number::from(u))
            } else {
                serde_yaml::Value::String(n.to_string())
            }
        }
        Node::Float(f) => serde_yaml::Value::Number(serde_yaml::Number::from(*f)),
        Node::String(s) => serde_yaml::Value::String(s.clone()),
        Node::List(items) => serde_yaml::Value::Sequence(items.iter().map(node_to_yaml).collect()),
        Node::Map(entries) => {
            let mut sorted: Vec<&(String, Node)> = entries.iter().collect();
            sorted.sort_by(|a, b| a.0.cmp(&b.0));
            let mut map = serde_yaml::Mapping::new();
            for (k, v) in sorted {
                map.insert(serde_yaml::Value::String(k.clone()), node_to_yaml(v));
            }
            serde_yaml::Value::Mapping(map)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use libdatadec::decode_str;

    #[test]
    fn test_sorted_mapping() {
        let tree = decode_str("b: 2\na:\n  - x\n  - 1.5\n");
        assert_eq!(encode(&tree).unwrap(), "a:\n- x\n- 1.5\nb: 2\n");
    }

    #[test]
    fn test_big_integer_becomes_string() {
        let tree = decode_str("n: 123456789012345678901234567890\n");
        let text = encode(&tree).unwrap();
        assert!(text.contains("'123456789012345678901234567890'"), "{}", text);
    }

    #[test]
    fn test_scalars() {
        let tree = decode_str("t: TRUE\nz: null\ns: hello\n");
        assert_eq!(encode(&tree).unwrap(), "s: hello\nt: true\nz: null\n");
    }
}

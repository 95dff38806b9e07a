//! Decoded tree representation.

use num_bigint::BigInt;
use std::fmt;

/// A node of a decoded document.
#[derive(Clone, PartialEq)]
pub enum Node {
    /// Null value (`null`, or an empty scalar).
    Null,
    /// Boolean value.
    Bool(bool),
    /// Arbitrary-precision integer.
    Int(BigInt),
    /// 64-bit floating-point number.
    Float(f64),
    /// UTF-8 string.
    String(String),
    /// Ordered sequence of nodes.
    List(Vec<Node>),
    /// Mapping from keys to nodes, in insertion order.
    ///
    /// Keys are unique: re-inserting a key replaces the value where the key
    /// already sits.
    Map(Vec<(String, Node)>),
}

impl Node {
    /// An empty map.
    pub fn empty_map() -> Self {
        Node::Map(Vec::new())
    }

    /// Returns `true` if this node is null.
    pub fn is_null(&self) -> bool {
        matches!(self, Node::Null)
    }

    /// Returns the boolean value if this is a `Bool`.
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Node::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// Returns a reference to the integer if this is an `Int`.
    pub fn as_int(&self) -> Option<&BigInt> {
        match self {
            Node::Int(n) => Some(n),
            _ => None,
        }
    }

    /// Returns the float value if this is a `Float`.
    pub fn as_float(&self) -> Option<f64> {
        match self {
            Node::Float(f) => Some(*f),
            _ => None,
        }
    }

    /// Returns a reference to the string if this is a `String`.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Node::String(s) => Some(s),
            _ => None,
        }
    }

    /// Returns the items if this is a `List`.
    pub fn as_list(&self) -> Option<&[Node]> {
        match self {
            Node::List(items) => Some(items),
            _ => None,
        }
    }

    /// Returns the entries if this is a `Map`.
    pub fn as_map(&self) -> Option<&[(String, Node)]> {
        match self {
            Node::Map(entries) => Some(entries),
            _ => None,
        }
    }

    /// Look up `key` if this is a `Map`.
    pub fn get(&self, key: &str) -> Option<&Node> {
        self.as_map()?
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v)
    }

    /// Insert into a `Map`, replacing an existing key in place.
    ///
    /// Returns `false` (and does nothing) when this node is not a map.
    pub fn insert(&mut self, key: impl Into<String>, value: Node) -> bool {
        let Node::Map(entries) = self else {
            return false;
        };
        let key = key.into();
        match entries.iter_mut().find(|(k, _)| *k == key) {
            Some((_, slot)) => *slot = value,
            None => entries.push((key, value)),
        }
        true
    }
}

impl fmt::Debug for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Node::Null => write!(f, "null"),
            Node::Bool(b) => write!(f, "{}", b),
            Node::Int(n) => write!(f, "{}", n),
            Node::Float(n) => {
                if n.is_nan() {
                    write!(f, "NaN")
                } else if n.is_infinite() {
                    if *n > 0.0 {
                        write!(f, "Infinity")
                    } else {
                        write!(f, "-Infinity")
                    }
                } else {
                    write!(f, "{:?}", n)
                }
            }
            Node::String(s) => write!(f, "{:?}", s),
            Node::List(items) => f.debug_list().entries(items).finish(),
            Node::Map(entries) => f
                .debug_map()
                .entries(entries.iter().map(|(k, v)| (k, v)))
                .finish(),
        }
    }
}

impl From<bool> for Node {
    fn from(b: bool) -> Self {
        Node::Bool(b)
    }
}

impl From<BigInt> for Node {
    fn from(n: BigInt) -> Self {
        Node::Int(n)
    }
}

impl From<i64> for Node {
    fn from(n: i64) -> Self {
        Node::Int(BigInt::from(n))
    }
}

impl From<f64> for Node {
    fn from(f: f64) -> Self {
        Node::Float(f)
    }
}

impl From<String> for Node {
    fn from(s: String) -> Self {
        Node::String(s)
    }
}

impl From<&str> for Node {
    fn from(s: &str) -> Self {
        Node::String(s.to_string())
    }
}

impl From<Vec<Node>> for Node {
    fn from(items: Vec<Node>) -> Self {
        Node::List(items)
    }
}

impl From<Vec<(String, Node)>> for Node {
    fn from(entries: Vec<(String, Node)>) -> Self {
        Node::Map(entries)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_replaces_in_place() {
        let mut map = Node::empty_map();
        assert!(map.insert("a", Node::from(1i64)));
        assert!(map.insert("b", Node::from(2i64)));
        assert!(map.insert("a", Node::from(3i64)));
        let keys: Vec<&str> = map
            .as_map()
            .unwrap()
            .iter()
            .map(|(k, _)| k.as_str())
            .collect();
        assert_eq!(keys, vec!["a", "b"]);
        assert_eq!(map.get("a"), Some(&Node::from(3i64)));
    }

    #[test]
    fn test_insert_into_non_map() {
        let mut list = Node::List(vec![]);
        assert!(!list.insert("a", Node::Null));
        assert_eq!(list, Node::List(vec![]));
    }

    #[test]
    fn test_value_accessor_coverage() {
        let tree = crate::decode_str("on: TRUE\nn: 42\nf: 1.5\ns: hi\nz: null\nl:\n  - 1\n");

        assert_eq!(tree.get("on").and_then(Node::as_bool), Some(true));
        assert_eq!(tree.get("n").and_then(Node::as_int), Some(&BigInt::from(42)));
        assert_eq!(tree.get("f").and_then(Node::as_float), Some(1.5));
        assert_eq!(tree.get("s").and_then(Node::as_str), Some("hi"));
        assert!(tree.get("z").is_some_and(Node::is_null));
        assert_eq!(tree.get("l").and_then(Node::as_list).map(<[Node]>::len), Some(1));
        assert_eq!(tree.get("missing"), None);

        // Wrong-kind accessors answer None.
        let n = Node::from(42i64);
        assert_eq!(n.as_bool(), None);
        assert_eq!(n.as_float(), None);
        assert_eq!(n.as_str(), None);
        assert_eq!(n.as_list(), None);
        assert_eq!(n.as_map(), None);
        assert_eq!(n.get("a"), None);
        assert_eq!(Node::Bool(false).as_int(), None);
        assert!(!n.is_null());
    }

    #[test]
    fn test_debug() {
        let node = Node::Map(vec![
            ("a".into(), Node::from(1i64)),
            ("b".into(), Node::List(vec![Node::from("x"), Node::Null])),
        ]);
        assert_eq!(format!("{:?}", node), r#"{"a": 1, "b": ["x", null]}"#);
    }
}

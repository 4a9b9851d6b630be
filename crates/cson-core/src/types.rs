//! The decoded CSON value tree.
//!
//! CSON elements are unlabeled, so `Object` and `Array` carry the same payload
//! (an ordered `Vec<Node>`) and differ only in their tag. Child order always
//! matches the left-to-right order of the source line.
//!
//! Equality and drop walk the tree with an explicit work list, so a node
//! nested arbitrarily deep can be compared and freed without exhausting the
//! call stack. `to_json`, `Serialize`, `Clone` and `Debug` still recurse.

use serde::ser::{Serialize, SerializeSeq, Serializer};
use serde_json::{Number, Value};
use std::fmt;

/// One decoded CSON value.
#[derive(Debug, Clone)]
pub enum Node {
    Integer(i64),
    Float(f64),
    String(String),
    Bool(bool),
    /// `{...}` when nested; also the implicit container of every line.
    Object(Vec<Node>),
    /// `[...]`, always explicitly delimited.
    Array(Vec<Node>),
}

/// Fieldless mirror of [`Node`]'s variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeKind {
    Integer,
    Float,
    String,
    Bool,
    Object,
    Array,
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            NodeKind::Integer => "integer",
            NodeKind::Float => "float",
            NodeKind::String => "string",
            NodeKind::Bool => "bool",
            NodeKind::Object => "object",
            NodeKind::Array => "array",
        };
        f.write_str(name)
    }
}

impl Node {
    pub fn kind(&self) -> NodeKind {
        match self {
            Node::Integer(_) => NodeKind::Integer,
            Node::Float(_) => NodeKind::Float,
            Node::String(_) => NodeKind::String,
            Node::Bool(_) => NodeKind::Bool,
            Node::Object(_) => NodeKind::Object,
            Node::Array(_) => NodeKind::Array,
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Node::Integer(n) => Some(*n),
            _ => None,
        }
    }

    /// Floats as-is; integers are widened.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Node::Float(f) => Some(*f),
            Node::Integer(n) => Some(*n as f64),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Node::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Node::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// Children of an `Object` or `Array`; `None` for scalars.
    pub fn as_list(&self) -> Option<&[Node]> {
        match self {
            Node::Object(items) | Node::Array(items) => Some(items),
            _ => None,
        }
    }

    pub fn is_object(&self) -> bool {
        matches!(self, Node::Object(_))
    }

    pub fn is_array(&self) -> bool {
        matches!(self, Node::Array(_))
    }

    /// Number of children. Scalars have none.
    pub fn len(&self) -> usize {
        self.as_list().map_or(0, <[Node]>::len)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Convert to a `serde_json::Value`.
    ///
    /// Objects and arrays both become JSON arrays since CSON has no keys.
    /// Non-finite floats have no JSON representation and become `null`.
    pub fn to_json(&self) -> Value {
        match self {
            Node::Integer(n) => Value::Number((*n).into()),
            Node::Float(f) => Number::from_f64(*f).map_or(Value::Null, Value::Number),
            Node::String(s) => Value::String(s.clone()),
            Node::Bool(b) => Value::Bool(*b),
            Node::Object(items) | Node::Array(items) => {
                Value::Array(items.iter().map(Node::to_json).collect())
            }
        }
    }
}

impl PartialEq for Node {
    fn eq(&self, other: &Self) -> bool {
        let mut pending = vec![(self, other)];
        while let Some(pair) = pending.pop() {
            match pair {
                (Node::Integer(a), Node::Integer(b)) if a == b => {}
                (Node::Float(a), Node::Float(b)) if a == b => {}
                (Node::String(a), Node::String(b)) if a == b => {}
                (Node::Bool(a), Node::Bool(b)) if a == b => {}
                (Node::Object(a), Node::Object(b)) | (Node::Array(a), Node::Array(b))
                    if a.len() == b.len() =>
                {
                    pending.extend(a.iter().zip(b));
                }
                _ => return false,
            }
        }
        true
    }
}

impl Drop for Node {
    fn drop(&mut self) {
        let mut pending = match self {
            Node::Object(items) | Node::Array(items) => std::mem::take(items),
            _ => return,
        };
        // Detach grandchildren before each child drops, so every recursive
        // drop sees an empty list.
        while let Some(mut node) = pending.pop() {
            if let Node::Object(items) | Node::Array(items) = &mut node {
                pending.append(items);
            }
        }
    }
}

impl Serialize for Node {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        match self {
            Node::Integer(n) => serializer.serialize_i64(*n),
            Node::Float(f) if f.is_finite() => serializer.serialize_f64(*f),
            Node::Float(_) => serializer.serialize_unit(),
            Node::String(s) => serializer.serialize_str(s),
            Node::Bool(b) => serializer.serialize_bool(*b),
            Node::Object(items) | Node::Array(items) => {
                let mut seq = serializer.serialize_seq(Some(items.len()))?;
                for item in items {
                    seq.serialize_element(item)?;
                }
                seq.end()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn accessors_match_variant() {
        assert_eq!(Node::Integer(7).as_i64(), Some(7));
        assert_eq!(Node::Integer(7).as_f64(), Some(7.0));
        assert_eq!(Node::Float(1.5).as_i64(), None);
        assert_eq!(Node::String("x".into()).as_str(), Some("x"));
        assert_eq!(Node::Bool(true).as_bool(), Some(true));
        assert!(Node::Bool(true).as_list().is_none());
    }

    #[test]
    fn container_len() {
        let node = Node::Array(vec![Node::Integer(1), Node::Integer(2)]);
        assert_eq!(node.len(), 2);
        assert!(!node.is_empty());
        assert!(Node::Object(vec![]).is_empty());
        assert_eq!(Node::Integer(3).len(), 0);
    }

    #[test]
    fn kind_display() {
        assert_eq!(Node::Object(vec![]).kind().to_string(), "object");
        assert_eq!(Node::Float(0.5).kind().to_string(), "float");
    }

    #[test]
    fn to_json_flattens_containers_to_arrays() {
        let node = Node::Object(vec![
            Node::Integer(1),
            Node::Array(vec![Node::String("a".into()), Node::Bool(false)]),
            Node::Float(2.5),
        ]);
        assert_eq!(node.to_json(), json!([1, ["a", false], 2.5]));
    }

    #[test]
    fn serialize_agrees_with_to_json() {
        let node = Node::Object(vec![
            Node::Object(vec![Node::Integer(-3)]),
            Node::Float(f64::NAN),
        ]);
        let serialized = serde_json::to_value(&node).unwrap();
        assert_eq!(serialized, node.to_json());
        assert_eq!(serialized, json!([[-3], null]));
    }

    fn nested(depth: usize, wrap: fn(Vec<Node>) -> Node) -> Node {
        let mut node = Node::Integer(1);
        for _ in 0..depth {
            node = wrap(vec![node]);
        }
        node
    }

    #[test]
    fn equality_distinguishes_tag_and_length() {
        assert_eq!(Node::Object(vec![]), Node::Object(vec![]));
        assert_ne!(Node::Object(vec![]), Node::Array(vec![]));
        assert_ne!(
            Node::Array(vec![Node::Integer(1)]),
            Node::Array(vec![Node::Integer(1), Node::Integer(2)])
        );
        assert_ne!(Node::Integer(1), Node::Float(1.0));
        assert_ne!(Node::Float(f64::NAN), Node::Float(f64::NAN));
    }

    #[test]
    fn very_deep_trees_compare_and_drop() {
        let a = nested(200_000, Node::Array);
        let b = nested(200_000, Node::Array);
        assert!(a == b);
        let c = nested(200_000, Node::Object);
        assert!(a != c);
        drop((a, b, c));
    }
}

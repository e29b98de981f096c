//! Immutable predicate trees.

use std::fmt;
use std::hash::{Hash, Hasher};
use std::ops::Index;

use hashbrown::HashSet;
use rustc_hash::FxHasher;

use crate::name::encode;

/// One node of a ground predicate tree: a name plus ordered arguments.
///
/// Predicates are plain immutable values. Equality and hashing are structural
/// over the name and the child sequence (child order is argument position and
/// is significant); the hash is computed once at construction and cached.
///
/// Guarantees:
/// - Structurally equal predicates compare equal and hash identically
/// - `strings()` holds this node's name plus every descendant's name
/// - No mutation after construction
#[derive(Debug, Clone)]
pub struct Predicate {
    name: String,
    children: Vec<Predicate>,
    strings: HashSet<String>,
    hash: u64,
}

impl Predicate {
    /// Create a leaf predicate (arity 0).
    pub fn leaf(name: impl Into<String>) -> Self {
        Self::new(name, Vec::new())
    }

    /// Create a predicate with the given arguments, in order.
    pub fn new(name: impl Into<String>, children: Vec<Predicate>) -> Self {
        let name = name.into();
        let mut strings = HashSet::new();
        strings.insert(name.clone());
        for child in &children {
            for s in &child.strings {
                if !strings.contains(s) {
                    strings.insert(s.clone());
                }
            }
        }
        let hash = structural_hash(&name, &children);
        Self {
            name,
            children,
            strings,
            hash,
        }
    }

    /// This predicate's name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// This predicate's arguments, in order.
    pub fn children(&self) -> &[Predicate] {
        &self.children
    }

    /// Number of direct arguments.
    pub fn arity(&self) -> usize {
        self.children.len()
    }

    /// Same as [`arity`](Self::arity).
    pub fn len(&self) -> usize {
        self.children.len()
    }

    /// True for leaf predicates.
    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }

    /// The argument at `index`, or `None` when out of range.
    pub fn child(&self, index: usize) -> Option<&Predicate> {
        self.children.get(index)
    }

    /// Names of this predicate and of every predicate nested inside it,
    /// without repeats. Backs the nested-name index on answer sets.
    pub fn strings(&self) -> &HashSet<String> {
        &self.strings
    }
}

fn structural_hash(name: &str, children: &[Predicate]) -> u64 {
    let mut hasher = FxHasher::default();
    name.hash(&mut hasher);
    for child in children {
        hasher.write_u64(child.hash);
    }
    hasher.finish()
}

impl PartialEq for Predicate {
    fn eq(&self, other: &Self) -> bool {
        self.hash == other.hash && self.name == other.name && self.children == other.children
    }
}

impl Eq for Predicate {}

impl Hash for Predicate {
    fn hash<H: Hasher>(&self, state: &mut H) {
        state.write_u64(self.hash);
    }
}

impl Index<usize> for Predicate {
    type Output = Predicate;

    fn index(&self, index: usize) -> &Predicate {
        &self.children[index]
    }
}

impl fmt::Display for Predicate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&encode(&self.name))?;
        if !self.children.is_empty() {
            f.write_str("(")?;
            for (i, child) in self.children.iter().enumerate() {
                if i > 0 {
                    f.write_str(",")?;
                }
                write!(f, "{}", child)?;
            }
            f.write_str(")")?;
        }
        Ok(())
    }
}

#[cfg(feature = "serde")]
mod serde_impl {
    use serde::de::Deserializer;
    use serde::ser::{SerializeStruct, Serializer};
    use serde::{Deserialize, Serialize};

    use super::Predicate;

    // Only the defining fields cross the wire; arity, the name set, and the
    // hash cache are rebuilt by the constructor on the way back in.
    impl Serialize for Predicate {
        fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
            let mut s = serializer.serialize_struct("Predicate", 2)?;
            s.serialize_field("name", self.name())?;
            s.serialize_field("children", self.children())?;
            s.end()
        }
    }

    #[derive(Deserialize)]
    struct PredicateData {
        name: String,
        #[serde(default)]
        children: Vec<Predicate>,
    }

    impl<'de> Deserialize<'de> for Predicate {
        fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
            let data = PredicateData::deserialize(deserializer)?;
            Ok(Predicate::new(data.name, data.children))
        }
    }
}

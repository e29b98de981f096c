//! Indexed, immutable answer sets.

use std::fmt;
use std::hash::{Hash, Hasher};

use hashbrown::HashMap;
use smallvec::SmallVec;

use crate::predicate::Predicate;

/// Positions into `predicates`; most names occur only a handful of times.
type Bucket = SmallVec<[u32; 4]>;

/// One solver answer: an ordered collection of top-level predicates, with
/// name-based lookup indexes built once at construction.
///
/// Iteration yields predicates in the order they were passed in; subsets
/// returned by [`lookup`](Self::lookup) do not promise to preserve that
/// ordering across index iteration. Equality and hashing consider only the
/// predicate sequence, never the indexes or the set number.
#[derive(Debug, Clone)]
pub struct AnswerSet {
    predicates: Vec<Predicate>,
    set_number: i64,
    by_name: HashMap<String, Bucket>,
    by_strings: HashMap<String, Bucket>,
}

impl AnswerSet {
    /// Build an answer set (and its indexes) from a predicate list.
    pub fn new(predicates: Vec<Predicate>) -> Self {
        Self::with_set_number(predicates, 0)
    }

    /// [`new`](Self::new), tagged with the solver's answer number.
    pub fn with_set_number(predicates: Vec<Predicate>, set_number: i64) -> Self {
        let mut by_name: HashMap<String, Bucket> = HashMap::new();
        let mut by_strings: HashMap<String, Bucket> = HashMap::new();
        for (pos, p) in predicates.iter().enumerate() {
            let pos = pos as u32;
            by_name
                .entry(p.name().to_string())
                .or_default()
                .push(pos);
            for s in p.strings() {
                by_strings.entry(s.clone()).or_default().push(pos);
            }
        }
        Self {
            predicates,
            set_number,
            by_name,
            by_strings,
        }
    }

    /// The top-level predicates, in original input order.
    pub fn predicates(&self) -> &[Predicate] {
        &self.predicates
    }

    /// Which solver answer this set came from (0 when untagged).
    pub fn set_number(&self) -> i64 {
        self.set_number
    }

    /// Number of top-level predicates.
    pub fn len(&self) -> usize {
        self.predicates.len()
    }

    /// True when the set holds no predicates.
    pub fn is_empty(&self) -> bool {
        self.predicates.is_empty()
    }

    /// Structural membership test against the top-level predicates.
    pub fn contains(&self, predicate: &Predicate) -> bool {
        self.predicates.contains(predicate)
    }

    /// Iterate the top-level predicates in input order.
    pub fn iter(&self) -> std::slice::Iter<'_, Predicate> {
        self.predicates.iter()
    }

    /// Look up predicates by name, returning a fresh answer set.
    ///
    /// With both flags off this is an exact match against top-level names.
    /// `any_nested` switches to the nested-name index, so `bar(foo)` matches
    /// a search for either `bar` or `foo`. `fuzzy` matches every indexed name
    /// that contains the search string as a substring instead of requiring
    /// key equality.
    ///
    /// Fuzzy matching runs over individual indexed names only; the textual
    /// form of a predicate is not stored anywhere, so with `any_nested` a
    /// search like `r(f` against `bar(foo)` finds nothing. A predicate
    /// reachable through several matching keys appears once per key, and
    /// fuzzy result order follows index iteration, which is unspecified.
    ///
    /// The receiver is never mutated; the result carries set number 0.
    pub fn lookup(&self, name: &str, any_nested: bool, fuzzy: bool) -> AnswerSet {
        let index = if any_nested {
            &self.by_strings
        } else {
            &self.by_name
        };
        if fuzzy {
            let mut matched = Vec::new();
            for (key, bucket) in index {
                if key.contains(name) {
                    matched.extend(bucket.iter().map(|&pos| self.predicates[pos as usize].clone()));
                }
            }
            AnswerSet::new(matched)
        } else {
            match index.get(name) {
                Some(bucket) => AnswerSet::new(
                    bucket
                        .iter()
                        .map(|&pos| self.predicates[pos as usize].clone())
                        .collect(),
                ),
                None => AnswerSet::default(),
            }
        }
    }
}

impl Default for AnswerSet {
    fn default() -> Self {
        Self::new(Vec::new())
    }
}

impl PartialEq for AnswerSet {
    fn eq(&self, other: &Self) -> bool {
        self.predicates == other.predicates
    }
}

impl Eq for AnswerSet {}

impl Hash for AnswerSet {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.predicates.hash(state);
    }
}

impl fmt::Display for AnswerSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, p) in self.predicates.iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            write!(f, "{}", p)?;
        }
        Ok(())
    }
}

impl<'a> IntoIterator for &'a AnswerSet {
    type Item = &'a Predicate;
    type IntoIter = std::slice::Iter<'a, Predicate>;

    fn into_iter(self) -> Self::IntoIter {
        self.predicates.iter()
    }
}

impl IntoIterator for AnswerSet {
    type Item = Predicate;
    type IntoIter = std::vec::IntoIter<Predicate>;

    fn into_iter(self) -> Self::IntoIter {
        self.predicates.into_iter()
    }
}

impl FromIterator<Predicate> for AnswerSet {
    fn from_iter<I: IntoIterator<Item = Predicate>>(iter: I) -> Self {
        AnswerSet::new(iter.into_iter().collect())
    }
}

#[cfg(feature = "serde")]
mod serde_impl {
    use serde::de::Deserializer;
    use serde::ser::{SerializeStruct, Serializer};
    use serde::{Deserialize, Serialize};

    use super::AnswerSet;
    use crate::predicate::Predicate;

    impl Serialize for AnswerSet {
        fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
            let mut s = serializer.serialize_struct("AnswerSet", 2)?;
            s.serialize_field("set_number", &self.set_number())?;
            s.serialize_field("predicates", self.predicates())?;
            s.end()
        }
    }

    #[derive(Deserialize)]
    struct AnswerSetData {
        #[serde(default)]
        set_number: i64,
        #[serde(default)]
        predicates: Vec<Predicate>,
    }

    impl<'de> Deserialize<'de> for AnswerSet {
        fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
            let data = AnswerSetData::deserialize(deserializer)?;
            Ok(AnswerSet::with_set_number(data.predicates, data.set_number))
        }
    }
}

#[cfg(test)]
mod tests;

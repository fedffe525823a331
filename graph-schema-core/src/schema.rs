//! Schema accumulator: a commutative monoid over property observations.
//!
//! A [`Schema`] maps grouping keys (label combinations for nodes,
//! relationship types for relationships) to the properties observed under
//! that key and the lattice join of every type observation per property.
//!
//! `merge` is associative and commutative with [`Schema::empty`] as the
//! identity, which is what permits arbitrary batch/parallel decomposition
//! of the entity set without affecting the final result. Merge takes both
//! operands by value: a partial schema is owned by exactly one unit of
//! work until it is folded in, so reduction needs no locks.

use crate::cypher_type::CypherType;
use serde::{Deserialize, Serialize};
use std::collections::btree_map::Entry;
use std::collections::BTreeMap;
use std::fmt;

/// Normalized set of node labels, usable as a grouping key.
///
/// Sorted and deduplicated on construction so equality, ordering, and
/// hashing never depend on the order labels were attached to a node. The
/// empty set is the key for unlabeled nodes.
#[derive(Debug, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LabelSet(Vec<String>);

impl LabelSet {
    /// Build a label set from any label iterator; sorts and dedups.
    pub fn new<I, S>(labels: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut labels: Vec<String> = labels.into_iter().map(Into::into).collect();
        labels.sort();
        labels.dedup();
        LabelSet(labels)
    }

    /// The key for unlabeled nodes.
    pub fn empty() -> Self {
        LabelSet(Vec::new())
    }

    /// Labels in canonical (sorted) order.
    pub fn as_slice(&self) -> &[String] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<Vec<String>> for LabelSet {
    fn from(labels: Vec<String>) -> Self {
        LabelSet::new(labels)
    }
}

impl fmt::Display for LabelSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for label in &self.0 {
            write!(f, ":{}", label)?;
        }
        Ok(())
    }
}

/// Properties recorded under one grouping key: name → joined type.
pub type PropertyTypes = BTreeMap<String, CypherType>;

/// Aggregate schema keyed by grouping key.
///
/// BTreeMap-backed so iteration order is deterministic regardless of the
/// (unspecified) order partial schemas were folded in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Schema<K> {
    entries: BTreeMap<K, PropertyTypes>,
}

/// Schema over node label combinations.
pub type NodeSchema = Schema<LabelSet>;

/// Schema over relationship type names.
pub type RelationshipSchema = Schema<String>;

impl<K: Ord> Schema<K> {
    /// The identity element: no grouping keys.
    pub fn empty() -> Self {
        Schema {
            entries: BTreeMap::new(),
        }
    }

    /// Singleton schema holding one entity's observations.
    ///
    /// Duplicate property names in `props` are joined on insert. An empty
    /// `props` still records the key, required so a grouping key whose
    /// entities carry no properties at all surfaces in the output.
    pub fn with_properties<I>(key: K, props: I) -> Self
    where
        I: IntoIterator<Item = (String, CypherType)>,
    {
        let mut types = PropertyTypes::new();
        for (name, ty) in props {
            types
                .entry(name)
                .and_modify(|t| *t = t.join(ty))
                .or_insert(ty);
        }
        let mut entries = BTreeMap::new();
        entries.insert(key, types);
        Schema { entries }
    }

    /// Key-wise union; shared (key, property) pairs reconcile via the
    /// lattice join. Total, and by taking both operands by value it cannot
    /// observe or cause shared mutation.
    pub fn merge(mut self, other: Self) -> Self {
        for (key, props) in other.entries {
            match self.entries.entry(key) {
                Entry::Vacant(slot) => {
                    slot.insert(props);
                }
                Entry::Occupied(mut slot) => {
                    let mine = slot.get_mut();
                    for (name, ty) in props {
                        mine.entry(name)
                            .and_modify(|t| *t = t.join(ty))
                            .or_insert(ty);
                    }
                }
            }
        }
        self
    }

    /// Iterate (key, properties) in deterministic key order.
    pub fn entries(&self) -> impl Iterator<Item = (&K, &PropertyTypes)> {
        self.entries.iter()
    }

    /// Recorded type for one (key, property) pair, if any.
    pub fn property_type(&self, key: &K, property: &str) -> Option<CypherType> {
        self.entries.get(key).and_then(|props| props.get(property)).copied()
    }

    /// Number of grouping keys.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<K: Ord> Default for Schema<K> {
    fn default() -> Self {
        Schema::empty()
    }
}

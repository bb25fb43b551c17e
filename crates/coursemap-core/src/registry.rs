//! Undirected edge registry keyed by the sorted endpoint pair

use crate::model::Edge;
use std::collections::btree_map::Entry;
use std::collections::{BTreeMap, BTreeSet};

/// Outcome of a single [`EdgeRegistry::insert`] call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Insertion {
    /// A new record was created for the pair.
    Created,
    /// The pair already existed; its tags were unioned.
    Merged,
    /// An endpoint was empty; nothing changed.
    Skipped,
}

/// Sort two endpoint ids into the canonical `(source, target)` key.
pub fn canonical_pair(a: &str, b: &str) -> (String, String) {
    if a <= b {
        (a.to_string(), b.to_string())
    } else {
        (b.to_string(), a.to_string())
    }
}

/// At most one record per unordered pair. Iteration is ordered by key, so flattening is stable.
#[derive(Debug, Clone, Default)]
pub struct EdgeRegistry {
    edges: BTreeMap<(String, String), BTreeSet<String>>,
}

impl EdgeRegistry {
    pub fn new() -> Self {
        EdgeRegistry {
            edges: BTreeMap::new(),
        }
    }

    /// Insert the pair `{a, b}` or union `tags` into its existing record.
    /// Tags are trimmed; empty tags are dropped.
    pub fn insert<I, S>(&mut self, a: &str, b: &str, tags: I) -> Insertion
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        if a.is_empty() || b.is_empty() {
            tracing::warn!("Skipping edge with empty endpoint ({:?}, {:?})", a, b);
            return Insertion::Skipped;
        }

        let key = canonical_pair(a, b);
        let (record, outcome) = match self.edges.entry(key) {
            Entry::Occupied(e) => (e.into_mut(), Insertion::Merged),
            Entry::Vacant(e) => (e.insert(BTreeSet::new()), Insertion::Created),
        };

        for tag in tags {
            let clean = tag.as_ref().trim();
            if !clean.is_empty() {
                record.insert(clean.to_string());
            }
        }

        outcome
    }

    pub fn contains(&self, a: &str, b: &str) -> bool {
        self.edges.contains_key(&canonical_pair(a, b))
    }

    /// Tag set of the pair, in either endpoint order.
    pub fn tags(&self, a: &str, b: &str) -> Option<&BTreeSet<String>> {
        self.edges.get(&canonical_pair(a, b))
    }

    pub fn len(&self) -> usize {
        self.edges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }

    /// Iterate over `(source, target, tags)` in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str, &BTreeSet<String>)> {
        self.edges
            .iter()
            .map(|((s, t), tags)| (s.as_str(), t.as_str(), tags))
    }

    /// Consume the registry into output edges with sorted tag lists.
    pub fn flatten(self) -> Vec<Edge> {
        self.edges
            .into_iter()
            .map(|((source, target), tags)| Edge {
                source,
                target,
                tags: tags.into_iter().collect(),
            })
            .collect()
    }
}

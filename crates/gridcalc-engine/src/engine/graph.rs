//! Dependency graph between named cells.
//!
//! The graph is a set of ordered pairs `(s, t)` of strings. For a pair
//! `(s, t)`, `t` is a *dependent* of `s` and `s` is a *dependee* of `t`.
//!
//! Both directions are stored: a forward index (`s` → dependents) and a
//! reverse index (`t` → dependees). Every mutation updates the two in
//! lock-step so that `t ∈ dependents(s)` exactly when `s ∈ dependees(t)`.
//! Keys whose set becomes empty are removed from their index.
//!
//! Sets keep insertion order, so iteration is deterministic and
//! `replace_*` preserves the order of the replacement sequence.

use indexmap::{IndexMap, IndexSet};

/// Bidirectional multimap of "depends on" relations.
#[derive(Clone, Debug, Default)]
pub struct DependencyGraph {
    dependents: IndexMap<String, IndexSet<String>>,
    dependees: IndexMap<String, IndexSet<String>>,
    size: usize,
}

impl DependencyGraph {
    /// Create an empty graph.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of ordered pairs in the graph.
    pub fn size(&self) -> usize {
        self.size
    }

    /// Number of dependees of `s`.
    pub fn dependee_count(&self, s: &str) -> usize {
        self.dependees.get(s).map_or(0, IndexSet::len)
    }

    pub fn has_dependents(&self, s: &str) -> bool {
        self.dependents.get(s).is_some_and(|set| !set.is_empty())
    }

    pub fn has_dependees(&self, s: &str) -> bool {
        self.dependees.get(s).is_some_and(|set| !set.is_empty())
    }

    /// Dependents of `s`, in insertion order. Empty for unknown keys.
    pub fn dependents<'a>(&'a self, s: &str) -> impl Iterator<Item = &'a str> + use<'a> {
        self.dependents
            .get(s)
            .into_iter()
            .flatten()
            .map(String::as_str)
    }

    /// Dependees of `s`, in insertion order. Empty for unknown keys.
    pub fn dependees<'a>(&'a self, s: &str) -> impl Iterator<Item = &'a str> + use<'a> {
        self.dependees
            .get(s)
            .into_iter()
            .flatten()
            .map(String::as_str)
    }

    /// Add the pair `(s, t)`. No-op if it is already present.
    pub fn add_dependency(&mut self, s: &str, t: &str) {
        let inserted = self
            .dependents
            .entry(s.to_string())
            .or_default()
            .insert(t.to_string());
        if inserted {
            self.dependees
                .entry(t.to_string())
                .or_default()
                .insert(s.to_string());
            self.size += 1;
        }
    }

    /// Remove the pair `(s, t)`. No-op if it is not present.
    pub fn remove_dependency(&mut self, s: &str, t: &str) {
        if remove_from(&mut self.dependents, s, t) {
            let mirrored = remove_from(&mut self.dependees, t, s);
            debug_assert!(mirrored, "reverse index missing ({s}, {t})");
            self.size -= 1;
        }
    }

    /// Replace every pair `(s, *)` with `(s, t)` for each `t` in `new_dependents`.
    pub fn replace_dependents<I>(&mut self, s: &str, new_dependents: I)
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        let old: Vec<String> = self.dependents(s).map(str::to_owned).collect();
        for t in &old {
            self.remove_dependency(s, t);
        }
        for t in new_dependents {
            self.add_dependency(s, t.as_ref());
        }
    }

    /// Replace every pair `(*, s)` with `(t, s)` for each `t` in `new_dependees`.
    pub fn replace_dependees<I>(&mut self, s: &str, new_dependees: I)
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        let old: Vec<String> = self.dependees(s).map(str::to_owned).collect();
        for t in &old {
            self.remove_dependency(t, s);
        }
        for t in new_dependees {
            self.add_dependency(t.as_ref(), s);
        }
    }
}

/// Remove `value` from `index[key]`, dropping the key once its set is empty.
fn remove_from(index: &mut IndexMap<String, IndexSet<String>>, key: &str, value: &str) -> bool {
    let Some(set) = index.get_mut(key) else {
        return false;
    };
    let removed = set.shift_remove(value);
    if set.is_empty() {
        index.shift_remove(key);
    }
    removed
}

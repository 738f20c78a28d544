//! Shared-string table
//!
//! The container format stores cell text in a single deduplicated pool;
//! cells reference entries by 0-based index. Indices are stable for the
//! life of the table: new entries only ever append.

/// A deduplicated, insertion-ordered pool of string values.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SharedStringTable {
    entries: Vec<String>,
}

impl SharedStringTable {
    /// Create an empty table
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a table from already-deduplicated entries (used when loading
    /// an existing container; the on-disk order is the index order)
    pub fn from_entries(entries: Vec<String>) -> Self {
        Self { entries }
    }

    /// Return the index of `value`, interning it first if absent.
    ///
    /// Lookup is a linear scan on exact string equality (no normalization,
    /// no case folding). Tables stay small in practice, bounded by the
    /// distinct strings actually written, so the O(n) scan is an accepted
    /// trade-off; a hash index could be layered on without changing this
    /// contract.
    pub fn intern(&mut self, value: &str) -> usize {
        if let Some(index) = self.position(value) {
            return index;
        }
        self.entries.push(value.to_string());
        self.entries.len() - 1
    }

    /// Index of an existing entry equal to `value`, if any
    pub fn position(&self, value: &str) -> Option<usize> {
        self.entries.iter().position(|e| e == value)
    }

    /// Entry at `index`, if present
    pub fn get(&self, index: usize) -> Option<&str> {
        self.entries.get(index).map(String::as_str)
    }

    /// Number of entries
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the table has no entries
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate entries in index order
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_intern_dedups() {
        let mut table = SharedStringTable::new();

        let first = table.intern("User Name");
        let second = table.intern("User Name");
        assert_eq!(first, second);
        assert_eq!(table.len(), 1);
    }

    #[test]
    fn test_intern_distinct_values_get_increasing_indices() {
        let mut table = SharedStringTable::new();

        let a = table.intern("Ann");
        let b = table.intern("Bo");
        let c = table.intern("Cy");
        assert_eq!((a, b, c), (0, 1, 2));
        assert_eq!(table.len(), 3);
    }

    #[test]
    fn test_indices_are_stable() {
        let mut table = SharedStringTable::new();

        let ann = table.intern("Ann");
        table.intern("Bo");
        table.intern("Cy");
        // Interning again after growth still returns the original index
        assert_eq!(table.intern("Ann"), ann);
        assert_eq!(table.get(ann), Some("Ann"));
    }

    #[test]
    fn test_equality_is_exact() {
        let mut table = SharedStringTable::new();

        table.intern("Ann");
        // Case and whitespace differences are distinct entries
        assert_eq!(table.intern("ann"), 1);
        assert_eq!(table.intern("Ann "), 2);
        assert_eq!(table.len(), 3);
    }

    #[test]
    fn test_from_entries_preserves_order() {
        let table =
            SharedStringTable::from_entries(vec!["x".to_string(), "y".to_string()]);
        assert_eq!(table.get(0), Some("x"));
        assert_eq!(table.get(1), Some("y"));
        assert_eq!(table.iter().collect::<Vec<_>>(), vec!["x", "y"]);
    }
}

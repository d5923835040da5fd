//! In-memory table primitive backing the repositories
//!
//! Rows live in a `BTreeMap` keyed by a sequential `i32` id. Because ids
//! are assigned monotonically, iterating the map in key order yields rows
//! in insertion order, which the catalog listing contract relies on.

use std::collections::BTreeMap;

/// A single in-memory table with a sequential id counter.
///
/// The table itself is not synchronized; repositories wrap it in an async
/// lock and own the critical sections.
#[derive(Debug)]
pub struct Table<T> {
    rows: BTreeMap<i32, T>,
    next_id: i32,
}

impl<T> Table<T> {
    /// Create an empty table with ids starting at 1
    pub fn new() -> Self {
        Self {
            rows: BTreeMap::new(),
            next_id: 1,
        }
    }

    /// Insert a new row, handing the fresh id to the row constructor
    pub fn insert(&mut self, build: impl FnOnce(i32) -> T) -> &T {
        let id = self.next_id;
        self.next_id += 1;
        let row = build(id);
        self.rows.entry(id).or_insert(row)
    }

    /// Look up a row by id
    pub fn get(&self, id: i32) -> Option<&T> {
        self.rows.get(&id)
    }

    /// Look up a row by id for in-place mutation
    pub fn get_mut(&mut self, id: i32) -> Option<&mut T> {
        self.rows.get_mut(&id)
    }

    /// Iterate rows in insertion order
    pub fn values(&self) -> impl Iterator<Item = &T> {
        self.rows.values()
    }

    /// Iterate rows in insertion order with mutable access
    pub fn values_mut(&mut self) -> impl Iterator<Item = &mut T> {
        self.rows.values_mut()
    }

    /// Number of rows in the table
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Whether the table holds no rows
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

impl<T> Default for Table<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, PartialEq)]
    struct Row {
        id: i32,
        label: &'static str,
    }

    #[test]
    fn test_insert_assigns_sequential_ids() {
        let mut table = Table::new();
        let first = table.insert(|id| Row { id, label: "a" }).id;
        let second = table.insert(|id| Row { id, label: "b" }).id;

        assert_eq!(first, 1);
        assert_eq!(second, 2);
        assert_eq!(table.get(1).map(|r| r.label), Some("a"));
        assert_eq!(table.get(2).map(|r| r.label), Some("b"));
    }

    #[test]
    fn test_values_iterates_in_insertion_order() {
        let mut table = Table::new();
        for label in ["first", "second", "third"] {
            table.insert(|id| Row { id, label });
        }

        let labels: Vec<_> = table.values().map(|r| r.label).collect();
        assert_eq!(labels, vec!["first", "second", "third"]);
    }

    #[test]
    fn test_get_mut_updates_in_place() {
        let mut table = Table::new();
        table.insert(|id| Row { id, label: "before" });

        if let Some(row) = table.get_mut(1) {
            row.label = "after";
        }

        assert_eq!(table.get(1).map(|r| r.label), Some("after"));
    }

    #[test]
    fn test_missing_id_returns_none() {
        let table: Table<Row> = Table::new();
        assert!(table.get(42).is_none());
        assert!(table.is_empty());
    }
}

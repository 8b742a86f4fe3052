//! Merge order adapters.
//!
//! Every front end for picking an order (a drag list, up/down buttons,
//! numeric positions) ends up as a [`MergeOrder`]. The merge core only ever
//! sees a validated permutation of the current file names.

use std::collections::{HashMap, HashSet};

use crate::error::{MergeError, MergeResult};

/// An ordered sequence of file names defining row-block order in the output.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MergeOrder(Vec<String>);

impl MergeOrder {
    /// Upload order.
    pub fn identity<S: AsRef<str>>(names: &[S]) -> Self {
        MergeOrder(names.iter().map(|n| n.as_ref().to_string()).collect())
    }

    /// An explicit sequence, e.g. the result of a drag-and-drop list.
    pub fn from_sequence<S: AsRef<str>>(sequence: &[S], names: &[S]) -> MergeResult<Self> {
        let order = MergeOrder::identity(sequence);
        order.validate(names)?;
        Ok(order)
    }

    /// Assign each uploaded file a numeric position and sort by it.
    ///
    /// The sort is stable: files sharing a position keep upload order, so
    /// the one uploaded earlier comes first.
    pub fn from_positions<S: AsRef<str>>(names: &[S], positions: &[i64]) -> MergeResult<Self> {
        if names.len() != positions.len() {
            return Err(MergeError::OrderMismatch {
                missing: names
                    .iter()
                    .skip(positions.len())
                    .map(|n| n.as_ref().to_string())
                    .collect(),
                unknown: positions
                    .iter()
                    .enumerate()
                    .skip(names.len())
                    .map(|(i, p)| format!("position #{} ({p})", i + 1))
                    .collect(),
                duplicated: Vec::new(),
            });
        }

        let mut indices: Vec<usize> = (0..names.len()).collect();
        indices.sort_by_key(|&i| positions[i]);
        Ok(MergeOrder(
            indices
                .into_iter()
                .map(|i| names[i].as_ref().to_string())
                .collect(),
        ))
    }

    /// Swap the entry at `index` with the one before it. No-op at the top.
    pub fn move_up(&mut self, index: usize) {
        if index > 0 && index < self.0.len() {
            self.0.swap(index, index - 1);
        }
    }

    /// Swap the entry at `index` with the one after it. No-op at the bottom.
    pub fn move_down(&mut self, index: usize) {
        if index + 1 < self.0.len() {
            self.0.swap(index, index + 1);
        }
    }

    /// Check that this order is exactly a permutation of `names`.
    pub fn validate<S: AsRef<str>>(&self, names: &[S]) -> MergeResult<()> {
        let available: HashSet<&str> = names.iter().map(|n| n.as_ref()).collect();

        let mut seen: HashMap<&str, usize> = HashMap::new();
        for name in &self.0 {
            *seen.entry(name.as_str()).or_default() += 1;
        }

        let mut missing = Vec::new();
        for name in names {
            let name = name.as_ref();
            if !seen.contains_key(name) && !missing.iter().any(|m: &String| m == name) {
                missing.push(name.to_string());
            }
        }

        let mut unknown = Vec::new();
        let mut duplicated = Vec::new();
        let mut reported: HashSet<&str> = HashSet::new();
        for name in &self.0 {
            if !reported.insert(name.as_str()) {
                continue;
            }
            if !available.contains(name.as_str()) {
                unknown.push(name.clone());
            } else if seen[name.as_str()] > 1 {
                duplicated.push(name.clone());
            }
        }

        if missing.is_empty() && unknown.is_empty() && duplicated.is_empty() {
            Ok(())
        } else {
            Err(MergeError::OrderMismatch {
                missing,
                unknown,
                duplicated,
            })
        }
    }

    pub fn names(&self) -> &[String] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<Vec<String>> for MergeOrder {
    fn from(names: Vec<String>) -> Self {
        MergeOrder(names)
    }
}

impl<'a> IntoIterator for &'a MergeOrder {
    type Item = &'a String;
    type IntoIter = std::slice::Iter<'a, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

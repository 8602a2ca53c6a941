//! Layout mapping for selector entries
//! Separates selectable entries from blank separator rows and maps logical
//! indices to physical row offsets

/// ## layout/ Invariants
///
/// - Logical indices address real entries only, never separator rows.
/// - The separator set is built once and never mutated.
/// - `physical_row` is the only place blank-row offsets are computed.
use std::collections::BTreeSet;

use crate::error::{ClikitError, Result};

/// One raw input entry
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Entry {
    /// A selectable item
    Item(String),
    /// A blank row inserted after the previous item
    Separator,
}

impl Entry {
    /// Classify a raw string: empty strings mark separators
    pub fn parse(raw: impl Into<String>) -> Self {
        let text = raw.into();
        if text.is_empty() {
            Entry::Separator
        } else {
            Entry::Item(text)
        }
    }

    #[must_use]
    pub fn is_selectable(&self) -> bool {
        matches!(self, Entry::Item(_))
    }
}

/// Logical indices after which a blank row is drawn
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SeparatorSet {
    indices: BTreeSet<usize>,
}

impl SeparatorSet {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, index: usize) -> bool {
        self.indices.contains(&index)
    }

    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    pub fn len(&self) -> usize {
        self.indices.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = usize> + '_ {
        self.indices.iter().copied()
    }

    /// Number of separators strictly before `logical`
    fn count_before(&self, logical: usize) -> usize {
        self.indices.range(..logical).count()
    }
}

impl FromIterator<usize> for SeparatorSet {
    fn from_iter<I: IntoIterator<Item = usize>>(iter: I) -> Self {
        SeparatorSet {
            indices: iter.into_iter().collect(),
        }
    }
}

/// Physical row offset from the anchor for a logical entry index
#[must_use]
pub fn physical_row(logical: usize, separators: &SeparatorSet) -> usize {
    if separators.is_empty() {
        return logical;
    }
    logical + separators.count_before(logical)
}

/// Real entries plus the separator bookkeeping derived from them
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntryList {
    items: Vec<String>,
    separators: SeparatorSet,
}

impl EntryList {
    /// Split raw strings into items and separators.
    ///
    /// Blank strings before the first item are dropped; runs of blank strings
    /// collapse into a single blank row.
    ///
    /// # Errors
    ///
    /// Fails when no selectable item remains.
    pub fn from_raw<I, S>(raw: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut items = Vec::new();
        let mut separators = BTreeSet::new();

        for entry in raw.into_iter().map(Entry::parse) {
            match entry {
                Entry::Item(text) => items.push(text),
                Entry::Separator => {
                    if let Some(last) = items.len().checked_sub(1) {
                        separators.insert(last);
                    }
                }
            }
        }

        if items.is_empty() {
            return Err(ClikitError::construction(
                "NO_ENTRIES",
                "A selector needs at least one non-empty entry",
            ));
        }

        Ok(EntryList {
            items,
            separators: SeparatorSet { indices: separators },
        })
    }

    pub fn items(&self) -> &[String] {
        &self.items
    }

    pub fn separators(&self) -> &SeparatorSet {
        &self.separators
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Always false: construction rejects empty lists
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Highest valid logical index
    pub fn highest_index(&self) -> usize {
        self.items.len() - 1
    }

    pub fn get(&self, index: usize) -> Option<&str> {
        self.items.get(index).map(String::as_str)
    }

    /// Physical row of a logical index within this list
    pub fn physical_row(&self, logical: usize) -> usize {
        physical_row(logical, &self.separators)
    }

    /// Rows occupied when the whole list is drawn, separators included
    pub fn total_rows(&self) -> usize {
        self.items.len() + self.separators.len()
    }
}

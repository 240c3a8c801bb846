// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Free-text search over the reference tables.

use crate::models::exercise::ExerciseEntry;
use crate::models::nutrition::NutritionEntry;
use crate::services::reference::{canonical_name, ReferenceTables};

/// Queries shorter than this (after trimming) match nothing.
pub const MIN_QUERY_LEN: usize = 2;
/// Upper bound on returned entries.
pub const MAX_SEARCH_RESULTS: usize = 25;

/// An entry that can be found by free text.
pub trait Searchable {
    /// Canonical name.
    fn key(&self) -> &str;

    /// Whether a lowercase needle occurs in any searchable field.
    fn contains(&self, needle: &str) -> bool;
}

impl Searchable for NutritionEntry {
    fn key(&self) -> &str {
        &self.name
    }

    fn contains(&self, needle: &str) -> bool {
        self.name.to_lowercase().contains(needle)
    }
}

impl Searchable for ExerciseEntry {
    fn key(&self) -> &str {
        &self.name
    }

    fn contains(&self, needle: &str) -> bool {
        self.name.to_lowercase().contains(needle)
            || self.category.as_str().contains(needle)
            || self.notes.to_lowercase().contains(needle)
    }
}

/// Case-insensitive substring search in table order, capped at
/// [`MAX_SEARCH_RESULTS`].
pub fn search<'a, T: Searchable>(query: &str, table: &'a [T]) -> Vec<&'a T> {
    let needle = canonical_name(query);
    if needle.chars().count() < MIN_QUERY_LEN {
        return Vec::new();
    }

    table
        .iter()
        .filter(|entry| entry.contains(&needle))
        .take(MAX_SEARCH_RESULTS)
        .collect()
}

/// Exact (case-insensitive) name match, else the first search hit.
pub fn exact_or_closest<'a, T: Searchable>(name: &str, table: &'a [T]) -> Option<&'a T> {
    let wanted = canonical_name(name);
    table
        .iter()
        .find(|entry| entry.key() == wanted)
        .or_else(|| search(name, table).into_iter().next())
}

pub fn search_nutrition<'a>(tables: &'a ReferenceTables, query: &str) -> Vec<&'a NutritionEntry> {
    search(query, tables.nutrition())
}

pub fn search_exercise<'a>(tables: &'a ReferenceTables, query: &str) -> Vec<&'a ExerciseEntry> {
    search(query, tables.exercises())
}

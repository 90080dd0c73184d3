//! Predicate Builder — free-text query AND facet equality.

use std::collections::BTreeMap;

use crate::models::Record;

/// Facet value that places no constraint on its field.
pub const ALL: &str = "all";

/// Facet selections keyed by field name.
pub type Facets = BTreeMap<String, String>;

/// A composed, side-effect-free filter over records.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Predicate {
    query: String,
    searchable: Vec<String>,
    facets: Vec<(String, String)>,
}

/// Builds a predicate for records of type `R`.
///
/// The query is trimmed and lower-cased; an empty query matches everything.
/// Facets set to `"all"` and facet keys that are not fields of `R` are dropped.
pub fn build<R: Record>(query: &str, facets: &Facets, searchable_fields: &[&str]) -> Predicate {
    let facets = facets
        .iter()
        .filter(|(key, value)| value.as_str() != ALL && R::FIELDS.contains(&key.as_str()))
        .map(|(key, value)| (key.clone(), value.clone()))
        .collect();

    Predicate {
        query: query.trim().to_lowercase(),
        searchable: searchable_fields.iter().map(|f| f.to_string()).collect(),
        facets,
    }
}

impl Predicate {
    /// The normalized query text.
    #[cfg(test)]
    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn matches<R: Record>(&self, record: &R) -> bool {
        self.matches_text(record) && self.matches_facets(record)
    }

    fn matches_text<R: Record>(&self, record: &R) -> bool {
        if self.query.is_empty() {
            return true;
        }
        self.searchable.iter().any(|name| {
            record
                .field(name)
                .map(|value| value.to_lowercase().contains(&self.query))
                .unwrap_or(false)
        })
    }

    fn matches_facets<R: Record>(&self, record: &R) -> bool {
        self.facets
            .iter()
            .all(|(key, expected)| record.field(key).as_deref() == Some(expected.as_str()))
    }
}

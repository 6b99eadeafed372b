// SPDX-License-Identifier: BSD-3-Clause
// Copyright (c) 2026 Aleksandr Ptakhin

//! Typed object queries for the content backend and the translation of
//! [`SearchFilters`] into them.
//!
//! A query is a type restriction plus a conjunction of [`Constraint`]s. The
//! same descriptor is encoded to the backend's JSON query language by
//! [`ObjectQuery::to_filter_json`] and evaluated in-process by
//! [`ObjectQuery::matches`].

use crate::models::search::SearchFilters;
use serde_json::{json, Map, Value};
use thiserror::Error;

/// Object type holding indexed pages in the content bucket.
pub const RESULT_TYPE: &str = "search-results";

/// Properties requested for every result query.
pub const RESULT_PROPS: &[&str] = &["id", "title", "slug", "metadata"];

pub const STATUS_PATH: &str = "metadata.status.key";
pub const DOMAIN_PATH: &str = "metadata.domain";
pub const SLUG_PATH: &str = "slug";

/// Fields scanned by free-text search, in the order they are sent.
pub const SEARCHABLE_FIELDS: [&str; 5] = [
    "title",
    "metadata.page_title",
    "metadata.description",
    "metadata.keywords",
    "metadata.content_preview",
];

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConstraintError {
    #[error("constraint on '{0}' has a blank value")]
    BlankValue(String),
    #[error("substring constraint needs at least one field")]
    NoFields,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConstraintKind {
    /// Field at `path` equals `value` exactly
    Equals { path: String, value: String },
    /// Case-insensitive `needle` occurs in at least one of `paths`
    ContainsAny { paths: Vec<String>, needle: String },
}

/// A single validated query predicate. Never matches only the empty string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Constraint {
    kind: ConstraintKind,
}

impl Constraint {
    pub fn equals(path: &str, value: &str) -> Result<Self, ConstraintError> {
        if value.trim().is_empty() {
            return Err(ConstraintError::BlankValue(path.to_string()));
        }
        Ok(Self {
            kind: ConstraintKind::Equals {
                path: path.to_string(),
                value: value.to_string(),
            },
        })
    }

    /// Substring constraint over `paths`; the needle is trimmed first.
    pub fn contains_any(paths: &[&str], needle: &str) -> Result<Self, ConstraintError> {
        if paths.is_empty() {
            return Err(ConstraintError::NoFields);
        }
        let needle = needle.trim();
        if needle.is_empty() {
            return Err(ConstraintError::BlankValue(paths.join("|")));
        }
        Ok(Self {
            kind: ConstraintKind::ContainsAny {
                paths: paths.iter().map(|p| p.to_string()).collect(),
                needle: needle.to_string(),
            },
        })
    }

    pub fn kind(&self) -> &ConstraintKind {
        &self.kind
    }

    pub fn matches(&self, object: &Value) -> bool {
        match &self.kind {
            ConstraintKind::Equals { path, value } => match lookup(object, path) {
                Some(Value::String(s)) => s == value,
                Some(Value::Number(n)) => n.to_string() == *value,
                Some(Value::Bool(b)) => b.to_string() == *value,
                _ => false,
            },
            ConstraintKind::ContainsAny { paths, needle } => {
                let needle = needle.to_lowercase();
                paths.iter().any(|path| {
                    lookup(object, path)
                        .and_then(Value::as_str)
                        .is_some_and(|text| text.to_lowercase().contains(&needle))
                })
            }
        }
    }

    fn or_clause(paths: &[String], needle: &str) -> Value {
        let pattern = regex::escape(needle);
        let alternatives: Vec<Value> = paths
            .iter()
            .map(|path| {
                let mut clause = Map::new();
                clause.insert(
                    path.clone(),
                    json!({ "$regex": pattern, "$options": "i" }),
                );
                Value::Object(clause)
            })
            .collect();
        Value::Array(alternatives)
    }
}

/// Backend query descriptor restricted to a single object type
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ObjectQuery {
    object_type: String,
    constraints: Vec<Constraint>,
    props: Vec<String>,
    depth: u8,
    limit: Option<usize>,
}

impl ObjectQuery {
    pub fn of_type(object_type: &str) -> Self {
        Self {
            object_type: object_type.to_string(),
            constraints: Vec::new(),
            props: Vec::new(),
            depth: 0,
            limit: None,
        }
    }

    pub fn with(mut self, constraint: Constraint) -> Self {
        self.constraints.push(constraint);
        self
    }

    pub fn props(mut self, props: &[&str]) -> Self {
        self.props = props.iter().map(|p| p.to_string()).collect();
        self
    }

    /// Levels of object references the backend expands inline.
    pub fn depth(mut self, depth: u8) -> Self {
        self.depth = depth;
        self
    }

    pub fn limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }

    pub fn object_type(&self) -> &str {
        &self.object_type
    }

    pub fn constraints(&self) -> &[Constraint] {
        &self.constraints
    }

    pub fn requested_props(&self) -> &[String] {
        &self.props
    }

    pub fn expansion_depth(&self) -> u8 {
        self.depth
    }

    pub fn max_results(&self) -> Option<usize> {
        self.limit
    }

    /// Encode as the backend's JSON query document.
    ///
    /// Equality constraints become `"path": value` pairs. A single substring
    /// constraint becomes an `$or` of case-insensitive `$regex` clauses; more
    /// than one is wrapped in `$and` so none overwrites another.
    pub fn to_filter_json(&self) -> Value {
        let mut doc = Map::new();
        doc.insert("type".to_string(), Value::String(self.object_type.clone()));

        let mut or_clauses = Vec::new();
        for constraint in &self.constraints {
            match constraint.kind() {
                ConstraintKind::Equals { path, value } => {
                    doc.insert(path.clone(), Value::String(value.clone()));
                }
                ConstraintKind::ContainsAny { paths, needle } => {
                    or_clauses.push(Constraint::or_clause(paths, needle));
                }
            }
        }

        match or_clauses.len() {
            0 => {}
            1 => {
                doc.insert("$or".to_string(), or_clauses.remove(0));
            }
            _ => {
                let all: Vec<Value> = or_clauses
                    .into_iter()
                    .map(|clause| json!({ "$or": clause }))
                    .collect();
                doc.insert("$and".to_string(), Value::Array(all));
            }
        }

        Value::Object(doc)
    }

    /// Evaluate the query against a raw backend object.
    pub fn matches(&self, object: &Value) -> bool {
        object.get("type").and_then(Value::as_str) == Some(self.object_type.as_str())
            && self.constraints.iter().all(|c| c.matches(object))
    }
}

/// Resolve a dotted field path such as `metadata.status.key`.
pub fn lookup<'a>(object: &'a Value, path: &str) -> Option<&'a Value> {
    path.split('.')
        .try_fold(object, |current, segment| current.get(segment))
}

/// Translate list filters into the result query.
///
/// Status and domain add equality constraints; a non-blank free-text query
/// adds one substring constraint across [`SEARCHABLE_FIELDS`]. Blank or absent
/// filters add nothing.
pub fn build_query(filters: &SearchFilters) -> ObjectQuery {
    let mut query = ObjectQuery::of_type(RESULT_TYPE)
        .props(RESULT_PROPS)
        .depth(1);

    if let Some(status) = filters.status {
        if let Ok(constraint) = Constraint::equals(STATUS_PATH, status.as_str()) {
            query = query.with(constraint);
        }
    }

    if let Some(domain) = filters.domain.as_deref() {
        if let Ok(constraint) = Constraint::equals(DOMAIN_PATH, domain) {
            query = query.with(constraint);
        }
    }

    if let Some(text) = filters.query.as_deref() {
        if let Ok(constraint) = Constraint::contains_any(&SEARCHABLE_FIELDS, text) {
            query = query.with(constraint);
        }
    }

    query
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::search::SearchStatus;

    fn page(title: &str, metadata: Value) -> Value {
        json!({
            "id": "id",
            "slug": "slug",
            "type": RESULT_TYPE,
            "title": title,
            "metadata": metadata,
        })
    }

    #[test]
    fn test_empty_filters_build_type_only_query() {
        let query = build_query(&SearchFilters::default());

        assert!(query.constraints().is_empty());
        assert_eq!(query.to_filter_json(), json!({ "type": "search-results" }));
        assert_eq!(query.requested_props(), RESULT_PROPS);
        assert_eq!(query.expansion_depth(), 1);
    }

    #[test]
    fn test_blank_query_adds_no_constraint() {
        let filters = SearchFilters {
            query: Some("   ".to_string()),
            domain: Some(String::new()),
            ..SearchFilters::default()
        };
        assert!(build_query(&filters).constraints().is_empty());
    }

    #[test]
    fn test_status_and_domain_become_equality() {
        let filters = SearchFilters {
            status: Some(SearchStatus::Active),
            domain: Some("example.com".to_string()),
            ..SearchFilters::default()
        };

        assert_eq!(
            build_query(&filters).to_filter_json(),
            json!({
                "type": "search-results",
                "metadata.status.key": "active",
                "metadata.domain": "example.com",
            })
        );
    }

    #[test]
    fn test_text_query_is_or_across_five_fields() {
        let filters = SearchFilters {
            query: Some("  Rust  ".to_string()),
            ..SearchFilters::default()
        };
        let doc = build_query(&filters).to_filter_json();

        let clauses = doc["$or"].as_array().unwrap();
        assert_eq!(clauses.len(), 5);
        for (clause, field) in clauses.iter().zip(SEARCHABLE_FIELDS) {
            assert_eq!(clause[field]["$regex"], "Rust");
            assert_eq!(clause[field]["$options"], "i");
        }
    }

    #[test]
    fn test_regex_metacharacters_are_escaped() {
        let filters = SearchFilters {
            query: Some("c++ (draft)".to_string()),
            ..SearchFilters::default()
        };
        let doc = build_query(&filters).to_filter_json();
        assert_eq!(doc["$or"][0]["title"]["$regex"], r"c\+\+ \(draft\)");
    }

    #[test]
    fn test_multiple_substring_constraints_use_and() {
        let query = ObjectQuery::of_type(RESULT_TYPE)
            .with(Constraint::contains_any(&["title"], "a").unwrap())
            .with(Constraint::contains_any(&["slug"], "b").unwrap());
        let doc = query.to_filter_json();

        assert!(doc.get("$or").is_none());
        assert_eq!(doc["$and"].as_array().unwrap().len(), 2);
    }

    #[test]
    fn test_constraints_reject_blank_values() {
        assert_eq!(
            Constraint::equals(DOMAIN_PATH, " "),
            Err(ConstraintError::BlankValue(DOMAIN_PATH.to_string()))
        );
        assert!(Constraint::contains_any(&SEARCHABLE_FIELDS, "\t").is_err());
        assert_eq!(
            Constraint::contains_any(&[], "rust"),
            Err(ConstraintError::NoFields)
        );
    }

    #[test]
    fn test_text_query_matches_any_searchable_field() {
        let filters = SearchFilters {
            query: Some(" WIDGET ".to_string()),
            ..SearchFilters::default()
        };
        let query = build_query(&filters);

        assert!(query.matches(&page("Widget shop", json!({}))));
        assert!(query.matches(&page("x", json!({ "page_title": "Best widgets" }))));
        assert!(query.matches(&page("x", json!({ "description": "a widget." }))));
        assert!(query.matches(&page("x", json!({ "keywords": "tools,widget" }))));
        assert!(query.matches(&page("x", json!({ "content_preview": "...widget..." }))));
        assert!(!query.matches(&page("x", json!({ "domain": "widget.com" }))));
        assert!(!query.matches(&page("x", json!({ "url": "https://widget.com" }))));
    }

    #[test]
    fn test_equality_and_text_are_conjunctive() {
        let filters = SearchFilters {
            query: Some("guide".to_string()),
            status: Some(SearchStatus::Active),
            ..SearchFilters::default()
        };
        let query = build_query(&filters);

        let active = page("Guide", json!({ "status": { "key": "active", "value": "Active" } }));
        let pending = page("Guide", json!({ "status": { "key": "pending", "value": "Pending" } }));
        let other = page("Intro", json!({ "status": { "key": "active", "value": "Active" } }));

        assert!(query.matches(&active));
        assert!(!query.matches(&pending));
        assert!(!query.matches(&other));
    }

    #[test]
    fn test_type_restriction() {
        let query = build_query(&SearchFilters::default());
        let mut object = page("Anything", json!({}));
        assert!(query.matches(&object));

        object["type"] = json!("authors");
        assert!(!query.matches(&object));
    }

    #[test]
    fn test_lookup_nested_path() {
        let object = json!({ "metadata": { "status": { "key": "blocked" } } });
        assert_eq!(lookup(&object, STATUS_PATH), Some(&json!("blocked")));
        assert_eq!(lookup(&object, "metadata.domain"), None);
    }
}

//! Schema-aware extraction of movie records from JSON exports, without any
//! external call.
//!
//! Field names vary between exports (English keys from the collection
//! script, Portuguese keys from the site's own dumps), so every target field
//! is read through an ordered alias table where the first usable key wins.

use crate::domain::model::{ListType, MovieRecord, Rating};
use serde_json::{Map, Value};

/// Wrapper fields that may hold the candidate list when the root is an object.
const COLLECTION_FIELDS: &[&str] = &["movies", "results"];

const TITLE_ALIASES: &[&str] = &["title", "name", "titulo"];
const YEAR_ALIASES: &[&str] = &["year", "ano"];
/// Consulted only when `rating` itself is absent or null.
const RATING_FALLBACK_ALIASES: &[&str] = &["nota", "score"];
const FAVORITE_ALIASES: &[&str] = &["isFavorite", "favorito", "favorite"];
const COMMENT_ALIASES: &[&str] = &["comment", "comentario"];
const LIST_TYPE_ALIASES: &[&str] = &["listType"];

/// Interprets `raw_text` as one or more movie records.
///
/// Never fails: unparseable text, a root with no candidate list, or a list
/// whose entries all lack a title all produce an empty vector, which callers
/// treat as the signal to try the AI fallback.
pub fn extract_structural(raw_text: &str) -> Vec<MovieRecord> {
    let parsed: Value = match serde_json::from_str(raw_text) {
        Ok(value) => value,
        Err(e) => {
            tracing::debug!("Structural JSON parse failed: {}", e);
            return Vec::new();
        }
    };

    candidates(&parsed)
        .iter()
        .filter_map(Value::as_object)
        .filter_map(record_from_object)
        .collect()
}

fn candidates(parsed: &Value) -> &[Value] {
    if let Value::Array(items) = parsed {
        return items;
    }

    COLLECTION_FIELDS
        .iter()
        .find_map(|field| parsed.get(field).filter(|value| is_truthy(value)))
        .and_then(Value::as_array)
        .map(Vec::as_slice)
        .unwrap_or(&[])
}

/// Builds a record from one candidate object, or `None` when it has no usable title.
pub(crate) fn record_from_object(object: &Map<String, Value>) -> Option<MovieRecord> {
    let title = first_truthy(object, TITLE_ALIASES).and_then(scalar_text)?;

    let record = MovieRecord {
        title,
        year: first_truthy(object, YEAR_ALIASES).and_then(scalar_text),
        rating: read_rating(object),
        is_favorite: FAVORITE_ALIASES
            .iter()
            .any(|alias| object.get(*alias).is_some_and(is_truthy)),
        comment: first_truthy(object, COMMENT_ALIASES).and_then(scalar_text),
        watched_date: None,
        list_type: first_truthy(object, LIST_TYPE_ALIASES)
            .and_then(Value::as_str)
            .map(ListType::from_label)
            .unwrap_or_default(),
    };

    record.has_title().then_some(record)
}

fn read_rating(object: &Map<String, Value>) -> Option<Rating> {
    match object.get("rating") {
        Some(value) if !value.is_null() => rating_from_value(value),
        _ => first_truthy(object, RATING_FALLBACK_ALIASES).and_then(rating_from_value),
    }
}

fn rating_from_value(value: &Value) -> Option<Rating> {
    match value {
        Value::Number(number) => Some(Rating::Number(number.clone())),
        Value::String(text) if text.trim().is_empty() => None,
        Value::String(text) => Some(Rating::Text(text.clone())),
        Value::Bool(flag) => Some(Rating::Text(flag.to_string())),
        _ => None,
    }
}

fn first_truthy<'a>(object: &'a Map<String, Value>, aliases: &[&str]) -> Option<&'a Value> {
    aliases
        .iter()
        .filter_map(|alias| object.get(*alias))
        .find(|value| is_truthy(value))
}

/// Loose truthiness of the exporting site's data: null, false, 0 and "" are empty.
fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(flag) => *flag,
        Value::Number(number) => number.as_f64().map_or(true, |n| n != 0.0 && !n.is_nan()),
        Value::String(text) => !text.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

/// Stringifies scalars; arrays and objects carry no usable text.
fn scalar_text(value: &Value) -> Option<String> {
    match value {
        Value::String(text) => Some(text.clone()),
        Value::Number(number) => Some(Rating::Number(number.clone()).to_string()),
        Value::Bool(flag) => Some(flag.to_string()),
        Value::Null | Value::Array(_) | Value::Object(_) => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extracts_array_preserving_order() {
        let raw = r#"[
            {"title": "Inception", "year": "2010", "rating": "9"},
            {"title": "Matrix", "year": 1999},
            {"title": "Alien"}
        ]"#;

        let records = extract_structural(raw);

        assert_eq!(records.len(), 3);
        assert_eq!(records[0].title, "Inception");
        assert_eq!(records[0].rating, Some(Rating::from("9")));
        assert_eq!(records[1].title, "Matrix");
        assert_eq!(records[1].year.as_deref(), Some("1999"));
        assert_eq!(records[2].title, "Alien");
        assert_eq!(records[2].year, None);
        assert_eq!(records[2].list_type, ListType::Watched);
    }

    #[test]
    fn test_resolves_portuguese_aliases() {
        let raw = r#"[{
            "titulo": "Cidade de Deus",
            "ano": "2002",
            "nota": "8",
            "favorito": true,
            "comentario": "Obra-prima"
        }]"#;

        let records = extract_structural(raw);

        assert_eq!(records.len(), 1);
        let record = &records[0];
        assert_eq!(record.title, "Cidade de Deus");
        assert_eq!(record.year.as_deref(), Some("2002"));
        assert_eq!(record.rating, Some(Rating::from("8")));
        assert!(record.is_favorite);
        assert_eq!(record.comment.as_deref(), Some("Obra-prima"));
    }

    #[test]
    fn test_alias_order_first_match_wins() {
        let raw = r#"[{"title": "", "name": "From Name", "titulo": "From Titulo", "nota": 0, "score": 7}]"#;

        let records = extract_structural(raw);

        assert_eq!(records[0].title, "From Name");
        assert_eq!(records[0].rating, Some(Rating::from(7)));
    }

    #[test]
    fn test_present_rating_takes_precedence_over_aliases() {
        let raw = r#"[{"title": "Up", "rating": 0, "nota": "9"}, {"title": "Her", "rating": null, "nota": "6"}]"#;

        let records = extract_structural(raw);

        assert_eq!(records[0].rating, Some(Rating::from(0)));
        assert_eq!(records[1].rating, Some(Rating::from("6")));
    }

    #[test]
    fn test_console_script_favorite_field() {
        let raw = r#"[{"title": "Amélie", "rating": "4.5", "favorite": true, "comment": "Lindo \"demais\""}]"#;

        let records = extract_structural(raw);

        assert!(records[0].is_favorite);
        assert_eq!(records[0].comment.as_deref(), Some("Lindo \"demais\""));
    }

    #[test]
    fn test_reads_movies_then_results_wrappers() {
        let wrapped = r#"{"movies": [{"title": "Heat"}], "results": [{"title": "Ignored"}]}"#;
        let results_only = r#"{"results": [{"name": "Ran", "listType": "watchlist"}]}"#;

        let from_movies = extract_structural(wrapped);
        let from_results = extract_structural(results_only);

        assert_eq!(from_movies.len(), 1);
        assert_eq!(from_movies[0].title, "Heat");
        assert_eq!(from_results[0].title, "Ran");
        assert_eq!(from_results[0].list_type, ListType::Watchlist);
    }

    #[test]
    fn test_no_candidates_yield_empty() {
        assert!(extract_structural(r#"{"films": [{"title": "Heat"}]}"#).is_empty());
        assert!(extract_structural(r#"{"movies": {"title": "Heat"}}"#).is_empty());
        assert!(extract_structural(r#""just a string""#).is_empty());
        assert!(extract_structural("[]").is_empty());
    }

    #[test]
    fn test_invalid_json_yields_empty() {
        assert!(extract_structural("Title: Heat, 1995").is_empty());
        assert!(extract_structural("").is_empty());
        assert!(extract_structural("[{\"title\": \"Heat\"").is_empty());
    }

    #[test]
    fn test_drops_entries_without_title() {
        let raw = r#"[
            {"title": "   "},
            {"name": ""},
            {"rating": "8"},
            {"title": {"pt": "Nested"}},
            "not an object",
            {"title": "Kept"}
        ]"#;

        let records = extract_structural(raw);

        assert_eq!(records.len(), 1);
        assert_eq!(records[0].title, "Kept");
    }

    #[test]
    fn test_numeric_title_is_stringified() {
        let records = extract_structural(r#"[{"title": 1917, "year": 2019}]"#);

        assert_eq!(records[0].title, "1917");
        assert_eq!(records[0].year.as_deref(), Some("2019"));
    }
}

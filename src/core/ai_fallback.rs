use crate::domain::model::{ExtractionRequest, ListType, MovieRecord, Rating};
use crate::domain::ports::ExtractionService;
use serde::Deserialize;
use serde_json::json;

/// Upper bound, in characters, of the raw text sent to the extraction service.
pub const MAX_FALLBACK_CHARS: usize = 15_000;

const INSTRUCTION: &str = "Extract the movies from the data below: titles, years, ratings (0-10), \
whether each one is a favorite (boolean), the user's comments, and the list type \
(watched or watchlist). Return only JSON shaped as \
{\"movies\": [{\"title\": \"String\", \"year\": \"String\", \"rating\": \"String\", \
\"isFavorite\": boolean, \"comment\": \"String\", \"listType\": \"watched|watchlist\"}]}.";

#[derive(Debug, Deserialize)]
struct ServiceResponse {
    movies: Vec<serde_json::Value>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ServiceMovie {
    title: String,
    year: Option<String>,
    rating: Option<String>,
    is_favorite: Option<bool>,
    comment: Option<String>,
    list_type: Option<String>,
}

impl From<ServiceMovie> for MovieRecord {
    fn from(movie: ServiceMovie) -> Self {
        MovieRecord {
            title: movie.title,
            year: movie.year.filter(|year| !year.trim().is_empty()),
            rating: movie
                .rating
                .filter(|rating| !rating.trim().is_empty())
                .map(Rating::Text),
            is_favorite: movie.is_favorite.unwrap_or(false),
            comment: movie.comment.filter(|comment| !comment.is_empty()),
            watched_date: None,
            list_type: movie
                .list_type
                .as_deref()
                .map(ListType::from_label)
                .unwrap_or_default(),
        }
    }
}

/// Output schema declared to the extraction service.
pub fn response_schema() -> serde_json::Value {
    json!({
        "type": "OBJECT",
        "properties": {
            "movies": {
                "type": "ARRAY",
                "items": {
                    "type": "OBJECT",
                    "properties": {
                        "title": { "type": "STRING" },
                        "year": { "type": "STRING" },
                        "rating": { "type": "STRING" },
                        "isFavorite": { "type": "BOOLEAN" },
                        "comment": { "type": "STRING" },
                        "listType": {
                            "type": "STRING",
                            "description": "Either 'watched' or 'watchlist'"
                        }
                    },
                    "required": ["title"]
                }
            }
        },
        "required": ["movies"]
    })
}

/// First `max_chars` characters of `text`, never splitting a code point.
pub fn truncate_chars(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((byte_index, _)) => &text[..byte_index],
        None => text,
    }
}

/// Best-effort extraction through an external structured-extraction service.
///
/// Only meant to run when structural extraction found nothing. Every failure
/// (transport, status, unparseable or non-conforming response) is logged and
/// absorbed into an empty result; nothing is retried.
pub struct AiFallbackExtractor<X: ExtractionService> {
    service: X,
}

impl<X: ExtractionService> AiFallbackExtractor<X> {
    pub fn new(service: X) -> Self {
        Self { service }
    }

    pub fn build_request(raw_text: &str) -> ExtractionRequest {
        ExtractionRequest {
            instruction: INSTRUCTION.to_string(),
            data: truncate_chars(raw_text, MAX_FALLBACK_CHARS).to_string(),
            schema: response_schema(),
        }
    }

    pub async fn extract(&self, raw_text: &str) -> Vec<MovieRecord> {
        let request = Self::build_request(raw_text);
        tracing::debug!(
            "Sending {} characters to the extraction service",
            request.data.chars().count()
        );

        let text = match self.service.extract(&request).await {
            Ok(text) => text,
            Err(e) => {
                tracing::warn!("AI extraction failed: {}", e);
                return Vec::new();
            }
        };

        parse_response(&text)
    }
}

/// Reads the service's JSON text; anything off-contract becomes an empty result.
pub fn parse_response(text: &str) -> Vec<MovieRecord> {
    let text = if text.trim().is_empty() {
        r#"{"movies": []}"#
    } else {
        text
    };

    let response: ServiceResponse = match serde_json::from_str(text) {
        Ok(response) => response,
        Err(e) => {
            tracing::warn!("AI extraction returned a malformed response: {}", e);
            return Vec::new();
        }
    };

    let total = response.movies.len();
    let records: Vec<MovieRecord> = response
        .movies
        .into_iter()
        .filter_map(|movie| serde_json::from_value::<ServiceMovie>(movie).ok())
        .map(MovieRecord::from)
        .filter(MovieRecord::has_title)
        .collect();

    if records.len() < total {
        tracing::debug!(
            "Discarded {} AI-extracted entries without a usable title",
            total - records.len()
        );
    }

    records
}

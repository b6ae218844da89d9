use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

use crate::domain::MovieId;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MovieStatus {
    #[default]
    Draft,
    Published,
}

impl MovieStatus {
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Draft => "draft",
            Self::Published => "published",
        }
    }
}

impl fmt::Display for MovieStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MovieStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "draft" => Ok(Self::Draft),
            "published" => Ok(Self::Published),
            other => Err(format!(
                "Invalid status: {other}. Use 'draft' or 'published'"
            )),
        }
    }
}

/// A reviewed movie as stored and served.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MovieRecord {
    pub id: MovieId,
    pub slug: String,
    pub title: String,
    #[serde(default)]
    pub genre: String,
    #[serde(default)]
    pub director: String,
    #[serde(default)]
    pub year: Option<i32>,
    #[serde(default)]
    pub rating: Option<f64>,
    #[serde(default)]
    pub duration: String,
    #[serde(default)]
    pub poster: Option<String>,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub review: String,
    #[serde(default)]
    pub reviewer: String,
    #[serde(default)]
    pub reviewer_title: String,
    #[serde(default)]
    pub reviewer_email: String,
    #[serde(default)]
    pub status: MovieStatus,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub featured: bool,
    #[serde(default)]
    pub views: u64,
    #[serde(default)]
    pub likes: u64,
    pub published_at: DateTime<Utc>,
    #[serde(default)]
    pub meta_description: String,
    #[serde(default)]
    pub meta_keywords: Vec<String>,
}

impl MovieRecord {
    #[must_use]
    pub fn is_published(&self) -> bool {
        self.status == MovieStatus::Published
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("Invalid value for '{field}': {reason}")]
pub struct FieldError {
    pub field: &'static str,
    pub reason: String,
}

impl FieldError {
    fn new(field: &'static str, reason: impl Into<String>) -> Self {
        Self {
            field,
            reason: reason.into(),
        }
    }
}

/// The editable fields of a movie as sent by a client.
///
/// A `None` means the key was absent from the request and the stored value
/// must be kept. Nullable fields use a nested option so that an explicit
/// empty value clears them.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MovieFields {
    pub title: Option<String>,
    pub genre: Option<String>,
    pub director: Option<String>,
    pub year: Option<Option<i32>>,
    pub rating: Option<Option<f64>>,
    pub duration: Option<String>,
    pub poster: Option<Option<String>>,
    pub description: Option<String>,
    pub review: Option<String>,
    pub reviewer: Option<String>,
    pub reviewer_title: Option<String>,
    pub reviewer_email: Option<String>,
    pub status: Option<MovieStatus>,
    pub tags: Option<Vec<String>>,
    pub featured: Option<bool>,
    pub likes: Option<u64>,
    pub meta_description: Option<String>,
    pub meta_keywords: Option<Vec<String>>,
}

impl MovieFields {
    /// Decodes fields from either a JSON object or the text fields of a
    /// multipart form, where every value arrives as a string.
    ///
    /// Keys the record does not allow clients to set (`id`, `slug`, `views`,
    /// `publishedAt`) and unknown keys are ignored.
    pub fn from_wire(map: &Map<String, Value>) -> Result<Self, FieldError> {
        let text = |key: &'static str| map.get(key).map(|v| coerce_text(key, v)).transpose();

        Ok(Self {
            title: text("title")?,
            genre: text("genre")?,
            director: text("director")?,
            year: map.get("year").map(|v| coerce_i32("year", v)).transpose()?,
            rating: map
                .get("rating")
                .map(|v| coerce_f64("rating", v))
                .transpose()?,
            duration: text("duration")?,
            poster: text("poster")?.map(|p| Some(p).filter(|p| !p.is_empty())),
            description: text("description")?,
            review: text("review")?,
            reviewer: text("reviewer")?,
            reviewer_title: text("reviewerTitle")?,
            reviewer_email: text("reviewerEmail")?,
            status: map.get("status").map(coerce_status).transpose()?,
            tags: map
                .get("tags")
                .map(|v| coerce_string_list("tags", v))
                .transpose()?,
            featured: map
                .get("featured")
                .map(|v| coerce_bool("featured", v))
                .transpose()?,
            likes: map
                .get("likes")
                .map(|v| coerce_u64("likes", v))
                .transpose()?,
            meta_description: text("metaDescription")?,
            meta_keywords: map
                .get("metaKeywords")
                .map(|v| coerce_string_list("metaKeywords", v))
                .transpose()?,
        })
    }

    /// Overwrites every present field on `record`, leaving absent ones untouched.
    ///
    /// The slug is not derived here; callers that change the title own the
    /// slug recomputation and its uniqueness check.
    pub fn merge_into(self, record: &mut MovieRecord) {
        fn set<T>(target: &mut T, value: Option<T>) {
            if let Some(value) = value {
                *target = value;
            }
        }

        set(&mut record.title, self.title);
        set(&mut record.genre, self.genre);
        set(&mut record.director, self.director);
        set(&mut record.year, self.year);
        set(&mut record.rating, self.rating);
        set(&mut record.duration, self.duration);
        set(&mut record.poster, self.poster);
        set(&mut record.description, self.description);
        set(&mut record.review, self.review);
        set(&mut record.reviewer, self.reviewer);
        set(&mut record.reviewer_title, self.reviewer_title);
        set(&mut record.reviewer_email, self.reviewer_email);
        set(&mut record.status, self.status);
        set(&mut record.tags, self.tags);
        set(&mut record.featured, self.featured);
        set(&mut record.likes, self.likes);
        set(&mut record.meta_description, self.meta_description);
        set(&mut record.meta_keywords, self.meta_keywords);
    }
}

fn coerce_text(field: &'static str, value: &Value) -> Result<String, FieldError> {
    match value {
        Value::String(s) => Ok(s.clone()),
        Value::Null => Ok(String::new()),
        Value::Number(n) => Ok(n.to_string()),
        Value::Bool(b) => Ok(b.to_string()),
        _ => Err(FieldError::new(field, "expected a string")),
    }
}

fn coerce_i32(field: &'static str, value: &Value) -> Result<Option<i32>, FieldError> {
    match value {
        Value::Null => Ok(None),
        Value::Number(n) => n
            .as_i64()
            .and_then(|n| i32::try_from(n).ok())
            .map(Some)
            .ok_or_else(|| FieldError::new(field, "expected a whole number")),
        Value::String(s) if s.trim().is_empty() => Ok(None),
        Value::String(s) => s
            .trim()
            .parse::<i32>()
            .map(Some)
            .map_err(|_| FieldError::new(field, format!("'{s}' is not a whole number"))),
        _ => Err(FieldError::new(field, "expected a whole number")),
    }
}

fn coerce_f64(field: &'static str, value: &Value) -> Result<Option<f64>, FieldError> {
    let parsed = match value {
        Value::Null => return Ok(None),
        Value::Number(n) => n.as_f64(),
        Value::String(s) if s.trim().is_empty() => return Ok(None),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    };

    parsed
        .filter(|n| n.is_finite())
        .map(Some)
        .ok_or_else(|| FieldError::new(field, "expected a number"))
}

fn coerce_u64(field: &'static str, value: &Value) -> Result<u64, FieldError> {
    match value {
        Value::Number(n) => n
            .as_u64()
            .ok_or_else(|| FieldError::new(field, "expected a non-negative whole number")),
        Value::String(s) => s
            .trim()
            .parse::<u64>()
            .map_err(|_| FieldError::new(field, "expected a non-negative whole number")),
        _ => Err(FieldError::new(field, "expected a non-negative whole number")),
    }
}

/// Booleans arrive either as JSON booleans or as the strings `"true"`/`"false"`.
/// Any other string counts as `false`.
fn coerce_bool(field: &'static str, value: &Value) -> Result<bool, FieldError> {
    match value {
        Value::Bool(b) => Ok(*b),
        Value::String(s) => Ok(s.trim() == "true"),
        Value::Null => Ok(false),
        _ => Err(FieldError::new(field, "expected true or false")),
    }
}

/// Lists arrive either as JSON arrays or as a JSON-encoded array inside a string.
fn coerce_string_list(field: &'static str, value: &Value) -> Result<Vec<String>, FieldError> {
    match value {
        Value::Null => Ok(Vec::new()),
        Value::String(s) if s.trim().is_empty() => Ok(Vec::new()),
        Value::String(s) => serde_json::from_str::<Vec<String>>(s)
            .map_err(|_| FieldError::new(field, "expected a JSON array of strings")),
        Value::Array(items) => items
            .iter()
            .map(|item| match item {
                Value::String(s) => Ok(s.clone()),
                _ => Err(FieldError::new(field, "expected an array of strings")),
            })
            .collect(),
        _ => Err(FieldError::new(field, "expected an array of strings")),
    }
}

fn coerce_status(value: &Value) -> Result<MovieStatus, FieldError> {
    match value {
        Value::String(s) => s
            .parse::<MovieStatus>()
            .map_err(|e| FieldError::new("status", e)),
        _ => Err(FieldError::new("status", "expected 'draft' or 'published'")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn as_map(value: Value) -> Map<String, Value> {
        match value {
            Value::Object(map) => map,
            _ => panic!("expected object"),
        }
    }

    fn sample_record() -> MovieRecord {
        MovieRecord {
            id: MovieId::new(1),
            slug: "heat".to_string(),
            title: "Heat".to_string(),
            genre: "Crime".to_string(),
            director: "Michael Mann".to_string(),
            year: Some(1995),
            rating: Some(8.3),
            duration: "170 min".to_string(),
            poster: None,
            description: String::new(),
            review: String::new(),
            reviewer: "Alex".to_string(),
            reviewer_title: String::new(),
            reviewer_email: String::new(),
            status: MovieStatus::Draft,
            tags: vec!["heist".to_string()],
            featured: false,
            views: 3,
            likes: 1,
            published_at: Utc::now(),
            meta_description: String::new(),
            meta_keywords: vec![],
        }
    }

    #[test]
    fn multipart_strings_are_coerced() {
        let fields = MovieFields::from_wire(&as_map(json!({
            "title": "Heat",
            "year": "1995",
            "rating": "8.3",
            "featured": "true",
            "tags": "[\"crime\",\"heist\"]",
            "status": "published",
            "likes": "4"
        })))
        .unwrap();

        assert_eq!(fields.title.as_deref(), Some("Heat"));
        assert_eq!(fields.year, Some(Some(1995)));
        assert_eq!(fields.rating, Some(Some(8.3)));
        assert_eq!(fields.featured, Some(true));
        assert_eq!(
            fields.tags,
            Some(vec!["crime".to_string(), "heist".to_string()])
        );
        assert_eq!(fields.status, Some(MovieStatus::Published));
        assert_eq!(fields.likes, Some(4));
    }

    #[test]
    fn json_values_are_accepted_as_is() {
        let fields = MovieFields::from_wire(&as_map(json!({
            "year": 2008,
            "rating": 9.0,
            "featured": true,
            "tags": ["superhero"],
            "metaKeywords": ["Batman"]
        })))
        .unwrap();

        assert_eq!(fields.year, Some(Some(2008)));
        assert_eq!(fields.rating, Some(Some(9.0)));
        assert_eq!(fields.featured, Some(true));
        assert_eq!(fields.tags, Some(vec!["superhero".to_string()]));
        assert_eq!(fields.meta_keywords, Some(vec!["Batman".to_string()]));
        assert_eq!(fields.title, None);
    }

    #[test]
    fn featured_strings_other_than_true_are_false() {
        let fields = MovieFields::from_wire(&as_map(json!({ "featured": "false" }))).unwrap();
        assert_eq!(fields.featured, Some(false));

        let fields = MovieFields::from_wire(&as_map(json!({ "featured": "yes" }))).unwrap();
        assert_eq!(fields.featured, Some(false));
    }

    #[test]
    fn malformed_values_are_rejected() {
        let err = MovieFields::from_wire(&as_map(json!({ "tags": "not json" }))).unwrap_err();
        assert_eq!(err.field, "tags");

        let err = MovieFields::from_wire(&as_map(json!({ "year": "nineteen" }))).unwrap_err();
        assert_eq!(err.field, "year");

        let err = MovieFields::from_wire(&as_map(json!({ "status": "archived" }))).unwrap_err();
        assert_eq!(err.field, "status");

        let err = MovieFields::from_wire(&as_map(json!({ "rating": "NaN" }))).unwrap_err();
        assert_eq!(err.field, "rating");
    }

    #[test]
    fn protected_keys_are_ignored() {
        let fields = MovieFields::from_wire(&as_map(json!({
            "id": 99,
            "slug": "forged",
            "views": 1000,
            "publishedAt": "2001-01-01T00:00:00Z"
        })))
        .unwrap();

        assert_eq!(fields, MovieFields::default());
    }

    #[test]
    fn merge_only_touches_present_fields() {
        let mut record = sample_record();
        let fields = MovieFields::from_wire(&as_map(json!({
            "rating": 8.5,
            "featured": "true",
            "year": ""
        })))
        .unwrap();

        fields.merge_into(&mut record);

        assert_eq!(record.rating, Some(8.5));
        assert!(record.featured);
        assert_eq!(record.year, None);
        assert_eq!(record.title, "Heat");
        assert_eq!(record.director, "Michael Mann");
        assert_eq!(record.tags, vec!["heist".to_string()]);
        assert_eq!(record.views, 3);
    }

    #[test]
    fn record_uses_camel_case_on_the_wire() {
        let value = serde_json::to_value(sample_record()).unwrap();
        assert!(value.get("reviewerTitle").is_some());
        assert!(value.get("publishedAt").is_some());
        assert_eq!(value["status"], "draft");
    }
}

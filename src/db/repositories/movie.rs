//! Record rules for the movie collection.
//!
//! These functions run while the caller holds the store's write lock, so the
//! slug check and id assignment below are never interleaved with another
//! mutation.

use chrono::{DateTime, Utc};
use thiserror::Error;

use crate::domain::MovieId;
use crate::models::{MovieFields, MovieRecord, MovieStatus};
use crate::services::slug::slugify;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum RecordError {
    #[error("Title is required")]
    TitleRequired,

    #[error("Movie with this title already exists")]
    DuplicateSlug(String),

    #[error("Movie not found")]
    NotFound(MovieId),
}

pub type Result<T> = std::result::Result<T, RecordError>;

/// Lookup key for public single-record retrieval.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MovieKey {
    /// A numeric identifier. Slugs can be numeric too ("1917"), so it
    /// matches either field.
    IdOrSlug(MovieId, String),
    Slug(String),
}

impl MovieKey {
    #[must_use]
    pub fn parse(raw: &str) -> Self {
        raw.parse::<MovieId>().map_or_else(
            |_| Self::Slug(raw.to_string()),
            |id| Self::IdOrSlug(id, raw.to_string()),
        )
    }

    fn matches(&self, movie: &MovieRecord) -> bool {
        match self {
            Self::IdOrSlug(id, slug) => movie.id == *id || movie.slug == *slug,
            Self::Slug(slug) => movie.slug == *slug,
        }
    }
}

#[must_use]
pub fn next_id(movies: &[MovieRecord]) -> MovieId {
    movies
        .iter()
        .map(|m| m.id)
        .max()
        .map_or(MovieId::new(1), |id| id.next())
}

/// True when a record other than `except` already owns `slug`.
#[must_use]
pub fn slug_taken(movies: &[MovieRecord], slug: &str, except: Option<MovieId>) -> bool {
    movies
        .iter()
        .any(|m| m.slug == slug && Some(m.id) != except)
}

/// The slug `create` would assign, or the error it would fail with.
///
/// Lets callers reject a request before doing side effects such as storing
/// an attachment.
pub fn check_create(movies: &[MovieRecord], fields: &MovieFields) -> Result<String> {
    let title = fields
        .title
        .as_deref()
        .filter(|t| !t.is_empty())
        .ok_or(RecordError::TitleRequired)?;

    let slug = slugify(title);
    if slug_taken(movies, &slug, None) {
        return Err(RecordError::DuplicateSlug(slug));
    }
    Ok(slug)
}

/// The slug `update` would leave on the record, or the error it would fail with.
pub fn check_update(movies: &[MovieRecord], id: MovieId, fields: &MovieFields) -> Result<String> {
    let current = find_by_id(movies, id).ok_or(RecordError::NotFound(id))?;

    match fields.title.as_deref() {
        Some("") => Err(RecordError::TitleRequired),
        Some(title) if title != current.title => {
            let slug = slugify(title);
            if slug_taken(movies, &slug, Some(id)) {
                return Err(RecordError::DuplicateSlug(slug));
            }
            Ok(slug)
        }
        _ => Ok(current.slug.clone()),
    }
}

/// Appends a new record built from `fields` and returns a copy of it.
///
/// Nothing is mutated when the title is missing or its slug is taken.
pub fn create(
    movies: &mut Vec<MovieRecord>,
    fields: MovieFields,
    now: DateTime<Utc>,
) -> Result<MovieRecord> {
    let slug = check_create(movies, &fields)?;

    let mut movie = MovieRecord {
        id: next_id(movies),
        slug,
        title: String::new(),
        genre: String::new(),
        director: String::new(),
        year: None,
        rating: None,
        duration: String::new(),
        poster: None,
        description: String::new(),
        review: String::new(),
        reviewer: String::new(),
        reviewer_title: String::new(),
        reviewer_email: String::new(),
        status: MovieStatus::Draft,
        tags: Vec::new(),
        featured: false,
        views: 0,
        likes: 0,
        published_at: now,
        meta_description: String::new(),
        meta_keywords: Vec::new(),
    };
    fields.merge_into(&mut movie);

    movies.push(movie.clone());
    Ok(movie)
}

/// Merges `fields` into the record with `id`.
///
/// A changed title recomputes the slug; a title equal to the current one, or
/// a patch without a title, keeps it. An empty title is rejected.
pub fn update(movies: &mut [MovieRecord], id: MovieId, fields: MovieFields) -> Result<MovieRecord> {
    let slug = check_update(movies, id, &fields)?;

    let movie = movies
        .iter_mut()
        .find(|m| m.id == id)
        .ok_or(RecordError::NotFound(id))?;

    fields.merge_into(movie);
    movie.slug = slug;
    Ok(movie.clone())
}

/// Removes the record with `id` and returns it.
pub fn delete(movies: &mut Vec<MovieRecord>, id: MovieId) -> Result<MovieRecord> {
    let index = movies
        .iter()
        .position(|m| m.id == id)
        .ok_or(RecordError::NotFound(id))?;
    Ok(movies.remove(index))
}

#[must_use]
pub fn find_by_id(movies: &[MovieRecord], id: MovieId) -> Option<&MovieRecord> {
    movies.iter().find(|m| m.id == id)
}

#[must_use]
pub fn find_by_key<'a>(movies: &'a [MovieRecord], key: &MovieKey) -> Option<&'a MovieRecord> {
    movies.iter().find(|m| key.matches(m))
}

/// Increments the view count of the published record matching `key`.
///
/// Drafts are invisible here and keep their count.
pub fn record_view(movies: &mut [MovieRecord], key: &MovieKey) -> Option<MovieRecord> {
    let movie = movies
        .iter_mut()
        .find(|m| m.is_published() && key.matches(m))?;
    movie.views = movie.views.saturating_add(1);
    Some(movie.clone())
}

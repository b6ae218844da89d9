//! Listing pipeline over a snapshot of the movie collection.
//!
//! Stages run in a fixed order: visibility, attribute filters, free-text
//! search, sort, paginate. Every stage is a plain function over borrowed
//! records so it can be exercised on its own; [`query`] composes them.

use serde::Serialize;
use std::cmp::Ordering;
use std::str::FromStr;

use crate::constants::pagination;
use crate::domain::SortOrder;
use crate::models::{MovieRecord, MovieStatus};

/// Which records a caller may see before any filter runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Visibility {
    /// Published records only.
    Public,
    /// Every record, optionally restricted to one status.
    Admin { status: Option<MovieStatus> },
}

impl Default for Visibility {
    fn default() -> Self {
        Self::Public
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortField {
    #[default]
    PublishedAt,
    Title,
    Rating,
    Year,
    Views,
    Likes,
    Genre,
    Director,
    Reviewer,
    Id,
}

impl FromStr for SortField {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "publishedAt" | "published_at" => Ok(Self::PublishedAt),
            "title" => Ok(Self::Title),
            "rating" => Ok(Self::Rating),
            "year" => Ok(Self::Year),
            "views" => Ok(Self::Views),
            "likes" => Ok(Self::Likes),
            "genre" => Ok(Self::Genre),
            "director" => Ok(Self::Director),
            "reviewer" => Ok(Self::Reviewer),
            "id" => Ok(Self::Id),
            other => Err(format!("Invalid sort field: {other}")),
        }
    }
}

/// Attribute filters, combined with logical AND. `None` disables a filter.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MovieFilters {
    /// Case-insensitive exact genre.
    pub genre: Option<String>,
    /// Minimum rating, inclusive.
    pub min_rating: Option<f64>,
    pub year: Option<i32>,
    pub featured_only: bool,
    /// Case-insensitive substring searched across text fields and tags.
    pub search: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct QueryOptions {
    pub visibility: Visibility,
    pub filters: MovieFilters,
    pub sort: SortField,
    pub order: SortOrder,
    /// 1-indexed.
    pub page: usize,
    pub limit: usize,
}

impl Default for QueryOptions {
    fn default() -> Self {
        Self {
            visibility: Visibility::Public,
            filters: MovieFilters::default(),
            sort: SortField::default(),
            order: SortOrder::Descending,
            page: pagination::DEFAULT_PAGE,
            limit: pagination::DEFAULT_LIMIT,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PageInfo {
    pub current_page: usize,
    pub total_pages: usize,
    #[serde(rename = "totalMovies")]
    pub total_items: usize,
    pub has_next_page: bool,
    pub has_prev_page: bool,
    pub limit: usize,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub pagination: PageInfo,
}

/// Runs the whole pipeline and clones the records of the requested page.
#[must_use]
pub fn query(records: &[MovieRecord], options: &QueryOptions) -> Page<MovieRecord> {
    let mut selected: Vec<&MovieRecord> = records
        .iter()
        .filter(|m| is_visible(m, options.visibility))
        .filter(|m| matches_filters(m, &options.filters))
        .filter(|m| {
            options
                .filters
                .search
                .as_deref()
                .is_none_or(|term| matches_search(m, term))
        })
        .collect();

    sort_records(&mut selected, options.sort, options.order);

    let page = paginate(&selected, options.page, options.limit);
    Page {
        items: page.items.into_iter().cloned().collect(),
        pagination: page.pagination,
    }
}

#[must_use]
pub fn is_visible(movie: &MovieRecord, visibility: Visibility) -> bool {
    match visibility {
        Visibility::Public => movie.is_published(),
        Visibility::Admin { status: None } => true,
        Visibility::Admin {
            status: Some(status),
        } => movie.status == status,
    }
}

#[must_use]
pub fn matches_filters(movie: &MovieRecord, filters: &MovieFilters) -> bool {
    if let Some(genre) = &filters.genre
        && movie.genre.to_lowercase() != genre.to_lowercase()
    {
        return false;
    }

    if let Some(min_rating) = filters.min_rating
        && movie.rating.is_none_or(|rating| rating < min_rating)
    {
        return false;
    }

    if let Some(year) = filters.year
        && movie.year != Some(year)
    {
        return false;
    }

    !filters.featured_only || movie.featured
}

/// True when `term` occurs in the title, description, genre, director,
/// reviewer or any tag, ignoring case. An empty term matches everything.
#[must_use]
pub fn matches_search(movie: &MovieRecord, term: &str) -> bool {
    let term = term.to_lowercase();
    let contains = |field: &str| field.to_lowercase().contains(&term);

    contains(&movie.title)
        || contains(&movie.description)
        || contains(&movie.genre)
        || contains(&movie.director)
        || contains(&movie.reviewer)
        || movie.tags.iter().any(|tag| contains(tag))
}

/// Stable sort; records with equal keys keep their relative order in either
/// direction. Missing values order below any present value.
pub fn sort_records(records: &mut [&MovieRecord], field: SortField, order: SortOrder) {
    records.sort_by(|a, b| {
        let ordering = compare_by(a, b, field);
        if order.is_ascending() {
            ordering
        } else {
            ordering.reverse()
        }
    });
}

fn compare_by(a: &MovieRecord, b: &MovieRecord, field: SortField) -> Ordering {
    match field {
        SortField::PublishedAt => a.published_at.cmp(&b.published_at),
        SortField::Title => compare_text(&a.title, &b.title),
        SortField::Rating => compare_optional_f64(a.rating, b.rating),
        SortField::Year => a.year.cmp(&b.year),
        SortField::Views => a.views.cmp(&b.views),
        SortField::Likes => a.likes.cmp(&b.likes),
        SortField::Genre => compare_text(&a.genre, &b.genre),
        SortField::Director => compare_text(&a.director, &b.director),
        SortField::Reviewer => compare_text(&a.reviewer, &b.reviewer),
        SortField::Id => a.id.cmp(&b.id),
    }
}

fn compare_text(a: &str, b: &str) -> Ordering {
    a.to_lowercase().cmp(&b.to_lowercase())
}

fn compare_optional_f64(a: Option<f64>, b: Option<f64>) -> Ordering {
    match (a, b) {
        (None, None) => Ordering::Equal,
        (None, Some(_)) => Ordering::Less,
        (Some(_), None) => Ordering::Greater,
        (Some(a), Some(b)) => a.total_cmp(&b),
    }
}

/// Slices `[(page-1)*limit, page*limit)`. Pages past the end are empty.
///
/// `page` and `limit` are expected to be at least 1; zero values are clamped.
#[must_use]
pub fn paginate<T: Clone>(items: &[T], page: usize, limit: usize) -> Page<T> {
    let page = page.max(1);
    let limit = limit.max(1);
    let total_items = items.len();
    let total_pages = total_items.div_ceil(limit);
    let offset = (page - 1).saturating_mul(limit);

    let slice = items.iter().skip(offset).take(limit).cloned().collect();

    Page {
        items: slice,
        pagination: PageInfo {
            current_page: page,
            total_pages,
            total_items,
            has_next_page: page < total_pages,
            has_prev_page: page > 1,
            limit,
        },
    }
}

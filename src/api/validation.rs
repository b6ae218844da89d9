//! Query-string normalisation for movie listings.
//!
//! Parameters arrive as raw strings and are parsed to their declared types
//! once, here. An empty parameter counts as absent.

use serde::Deserialize;

use super::ApiError;
use crate::constants::pagination;
use crate::domain::SortOrder;
use crate::models::MovieStatus;
use crate::services::query::{MovieFilters, QueryOptions, SortField, Visibility};

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct MovieListQuery {
    pub page: Option<String>,
    pub limit: Option<String>,
    pub genre: Option<String>,
    pub rating: Option<String>,
    pub year: Option<String>,
    pub search: Option<String>,
    pub sort: Option<String>,
    pub order: Option<String>,
    pub featured: Option<String>,
    /// Admin listings only.
    pub status: Option<String>,
}

/// Which listing the query is for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListScope {
    Public,
    Admin,
}

impl MovieListQuery {
    pub fn into_options(self, scope: ListScope) -> Result<QueryOptions, ApiError> {
        let visibility = match scope {
            ListScope::Public => Visibility::Public,
            ListScope::Admin => Visibility::Admin {
                status: present(self.status.as_deref())
                    .map(validate_status_filter)
                    .transpose()?
                    .flatten(),
            },
        };

        let genre = present(self.genre.as_deref())
            .filter(|g| !g.eq_ignore_ascii_case("all"))
            .map(str::to_string);

        Ok(QueryOptions {
            visibility,
            filters: MovieFilters {
                genre,
                min_rating: present(self.rating.as_deref())
                    .map(validate_min_rating)
                    .transpose()?,
                year: present(self.year.as_deref())
                    .map(validate_year)
                    .transpose()?,
                featured_only: self.featured.as_deref() == Some("true"),
                search: present(self.search.as_deref()).map(str::to_string),
            },
            sort: present(self.sort.as_deref())
                .map(validate_sort)
                .transpose()?
                .unwrap_or_default(),
            order: present(self.order.as_deref())
                .map(validate_order)
                .transpose()?
                .unwrap_or_default(),
            page: present(self.page.as_deref())
                .map(validate_page)
                .transpose()?
                .unwrap_or(pagination::DEFAULT_PAGE),
            limit: present(self.limit.as_deref())
                .map(validate_limit)
                .transpose()?
                .unwrap_or(pagination::DEFAULT_LIMIT),
        })
    }
}

fn present(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

pub fn validate_page(raw: &str) -> Result<usize, ApiError> {
    match raw.trim().parse::<usize>() {
        Ok(page) if page >= 1 => Ok(page),
        _ => Err(ApiError::validation(format!(
            "Invalid page: {raw}. Page must be a positive integer"
        ))),
    }
}

pub fn validate_limit(raw: &str) -> Result<usize, ApiError> {
    const MIN_LIMIT: usize = 1;

    match raw.trim().parse::<usize>() {
        Ok(limit) if (MIN_LIMIT..=pagination::MAX_LIMIT).contains(&limit) => Ok(limit),
        _ => Err(ApiError::validation(format!(
            "Invalid limit: {}. Limit must be between {} and {}",
            raw,
            MIN_LIMIT,
            pagination::MAX_LIMIT
        ))),
    }
}

/// Minimum rating, accepting a trailing `+` as in `9+`.
pub fn validate_min_rating(raw: &str) -> Result<f64, ApiError> {
    let trimmed = raw.trim();
    let number = trimmed.strip_suffix('+').unwrap_or(trimmed).trim();

    number
        .parse::<f64>()
        .ok()
        .filter(|r| r.is_finite())
        .ok_or_else(|| ApiError::validation(format!("Invalid rating: {raw}")))
}

pub fn validate_year(raw: &str) -> Result<i32, ApiError> {
    raw.trim()
        .parse::<i32>()
        .map_err(|_| ApiError::validation(format!("Invalid year: {raw}")))
}

pub fn validate_sort(raw: &str) -> Result<SortField, ApiError> {
    raw.parse::<SortField>().map_err(ApiError::validation)
}

pub fn validate_order(raw: &str) -> Result<SortOrder, ApiError> {
    raw.parse::<SortOrder>().map_err(ApiError::validation)
}

/// `all` disables the filter.
pub fn validate_status_filter(raw: &str) -> Result<Option<MovieStatus>, ApiError> {
    if raw.eq_ignore_ascii_case("all") {
        return Ok(None);
    }
    raw.parse::<MovieStatus>()
        .map(Some)
        .map_err(ApiError::validation)
}

//! Read-only aggregates over the movie collection.

use serde::Serialize;

use crate::constants;
use crate::models::{MovieRecord, MovieStatus};

/// Aggregates over the published subset, shown on the public site.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PublicStats {
    pub total_movies: usize,
    pub total_genres: usize,
    pub total_reviewers: usize,
    pub average_rating: f64,
    /// Distinct non-empty genres in first-seen order.
    pub genres: Vec<String>,
    pub reviewers: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Dashboard {
    pub total_movies: usize,
    pub published_movies: usize,
    pub draft_movies: usize,
    pub featured_movies: usize,
    pub total_views: u64,
    pub total_likes: u64,
    pub recent_movies: Vec<MovieRecord>,
}

#[must_use]
pub fn public_stats(movies: &[MovieRecord]) -> PublicStats {
    let published: Vec<&MovieRecord> = movies.iter().filter(|m| m.is_published()).collect();

    // unrated movies do not drag the mean down; none rated gives 0.0
    let ratings: Vec<f64> = published.iter().filter_map(|m| m.rating).collect();
    let average_rating = if ratings.is_empty() {
        0.0
    } else {
        round_to_tenth(ratings.iter().sum::<f64>() / ratings.len() as f64)
    };

    let genres = distinct(published.iter().map(|m| m.genre.as_str()));
    let reviewers = distinct(published.iter().map(|m| m.reviewer.as_str()));

    PublicStats {
        total_movies: published.len(),
        total_genres: genres.len(),
        total_reviewers: reviewers.len(),
        average_rating,
        genres,
        reviewers,
    }
}

#[must_use]
pub fn dashboard(movies: &[MovieRecord]) -> Dashboard {
    let count_status = |status: MovieStatus| movies.iter().filter(|m| m.status == status).count();

    let mut recent: Vec<&MovieRecord> = movies.iter().collect();
    recent.sort_by(|a, b| b.published_at.cmp(&a.published_at));

    Dashboard {
        total_movies: movies.len(),
        published_movies: count_status(MovieStatus::Published),
        draft_movies: count_status(MovieStatus::Draft),
        featured_movies: movies.iter().filter(|m| m.featured).count(),
        total_views: movies.iter().map(|m| m.views).sum(),
        total_likes: movies.iter().map(|m| m.likes).sum(),
        recent_movies: recent
            .into_iter()
            .take(constants::stats::RECENT_MOVIES)
            .cloned()
            .collect(),
    }
}

/// Published featured movies in collection order.
#[must_use]
pub fn featured(movies: &[MovieRecord]) -> Vec<MovieRecord> {
    movies
        .iter()
        .filter(|m| m.is_published() && m.featured)
        .cloned()
        .collect()
}

fn distinct<'a>(values: impl Iterator<Item = &'a str>) -> Vec<String> {
    let mut seen: Vec<String> = Vec::new();
    for value in values {
        if !value.is_empty() && !seen.iter().any(|s| s == value) {
            seen.push(value.to_string());
        }
    }
    seen
}

fn round_to_tenth(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

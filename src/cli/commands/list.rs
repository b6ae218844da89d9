//! List movies command handler

use anyhow::Context;

use crate::config::Config;
use crate::db::{JsonFilePersistence, SnapshotPersistence};

pub async fn cmd_list_movies(config: &Config, include_drafts: bool) -> anyhow::Result<()> {
    let persistence = JsonFilePersistence::new(&config.general.data_path);
    let stored = persistence
        .load()
        .await
        .with_context(|| format!("Failed to read {}", config.general.data_path))?;

    let Some(movies) = stored.and_then(|s| s.movies) else {
        println!("No data file at {}.", config.general.data_path);
        println!();
        println!("Start the server once to seed it: cinereview serve");
        return Ok(());
    };

    let movies: Vec<_> = movies
        .into_iter()
        .filter(|m| include_drafts || m.is_published())
        .collect();

    if movies.is_empty() {
        println!("No movies.");
        return Ok(());
    }

    println!("Movies ({} total)", movies.len());
    println!("{:-<70}", "");

    for movie in movies {
        let year = movie.year.map_or_else(|| "?".to_string(), |y| y.to_string());
        let rating = movie
            .rating
            .map_or_else(|| "-".to_string(), |r| format!("{r:.1}"));
        let featured = if movie.featured { " ★" } else { "" };

        println!("{} ({}) [{}]{}", movie.title, year, rating, featured);
        println!(
            "  ID: {} | Slug: {} | Status: {} | Views: {}",
            movie.id,
            movie.slug,
            movie.status.as_str(),
            movie.views
        );
    }

    Ok(())
}

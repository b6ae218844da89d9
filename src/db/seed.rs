//! Built-in dataset used when nothing has been persisted yet.

use chrono::{TimeZone, Utc};
use serde_json::json;

use crate::auth::password::{PasswordError, hash_password_blocking};
use crate::domain::UserId;
use crate::models::{MovieRecord, Role, Settings, UserRecord};

/// Credentials of the administrator created on first boot.
#[derive(Debug, Clone)]
pub struct AdminSeed {
    pub email: String,
    pub password: String,
}

impl From<&crate::config::AuthConfig> for AdminSeed {
    fn from(config: &crate::config::AuthConfig) -> Self {
        Self {
            email: config.default_admin_email.clone(),
            password: config.default_admin_password.clone(),
        }
    }
}

pub fn default_movies() -> Result<Vec<MovieRecord>, serde_json::Error> {
    serde_json::from_value(json!([
        {
            "id": 1,
            "title": "The Dark Knight",
            "slug": "the-dark-knight",
            "genre": "Action",
            "rating": 9.0,
            "year": 2008,
            "director": "Christopher Nolan",
            "duration": "152 min",
            "poster": "https://images.unsplash.com/photo-1489599162993-6c5c82dfee8a?w=400&h=600&fit=crop",
            "description": "When the menace known as the Joker emerges, Batman must accept one of the greatest psychological and physical tests of his ability to fight injustice.",
            "review": "Christopher Nolan's masterpiece delivers a gripping tale of heroism and chaos that transcends the superhero genre. Heath Ledger's portrayal of the Joker is absolutely phenomenal, bringing a terrifying yet captivating energy to every scene he dominates...",
            "reviewer": "Alex Thompson",
            "reviewerTitle": "Senior Film Critic",
            "reviewerEmail": "alex@cinereview.com",
            "publishedAt": "2024-01-15T10:00:00Z",
            "status": "published",
            "tags": ["superhero", "psychological thriller", "masterpiece"],
            "featured": true,
            "views": 1520,
            "likes": 89,
            "metaDescription": "Expert review of The Dark Knight - Christopher Nolan's superhero masterpiece",
            "metaKeywords": ["Dark Knight", "Batman", "Joker", "Heath Ledger", "Christopher Nolan"]
        },
        {
            "id": 2,
            "title": "Pulp Fiction",
            "slug": "pulp-fiction",
            "genre": "Drama",
            "rating": 8.9,
            "year": 1994,
            "director": "Quentin Tarantino",
            "duration": "154 min",
            "poster": "https://images.unsplash.com/photo-1440404653325-ab127d49abc1?w=400&h=600&fit=crop",
            "description": "The lives of two mob hitmen, a boxer, a gangster and his wife, and a pair of diner bandits intertwine in four tales of violence and redemption.",
            "review": "Quentin Tarantino's non-linear narrative creates a unique cinematic experience that keeps viewers engaged from start to finish. The dialogue is sharp, witty, and memorable...",
            "reviewer": "Sarah Martinez",
            "reviewerTitle": "Film Studies Professor",
            "reviewerEmail": "sarah@cinereview.com",
            "publishedAt": "2024-01-10T14:30:00Z",
            "status": "published",
            "tags": ["crime", "nonlinear", "classic"],
            "featured": false,
            "views": 983,
            "likes": 67,
            "metaDescription": "Professional review of Pulp Fiction - Tarantino's crime masterpiece",
            "metaKeywords": ["Pulp Fiction", "Tarantino", "John Travolta", "Samuel L Jackson"]
        }
    ]))
}

/// The administrator account, with its password hashed off the async runtime.
pub async fn default_users(admin: &AdminSeed) -> Result<Vec<UserRecord>, PasswordError> {
    let password = hash_password_blocking(admin.password.clone()).await?;

    Ok(vec![UserRecord {
        id: UserId::new(1),
        email: admin.email.clone(),
        password,
        role: Role::Admin,
        name: "Admin User".to_string(),
        created_at: Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).single(),
    }])
}

#[must_use]
pub fn default_settings() -> Settings {
    Settings::default()
}

use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode, header},
};
use cinereview::api::AppState;
use cinereview::auth::JwtConfig;
use cinereview::auth::jwt::issue_token;
use cinereview::config::Config;
use cinereview::db::MemoryPersistence;
use cinereview::domain::UserId;
use cinereview::models::{Role, UserRecord};
use http_body_util::BodyExt;
use serde_json::{Value, json};
use std::path::PathBuf;
use std::sync::Arc;
use tower::ServiceExt;

const ADMIN_EMAIL: &str = "admin@cinereview.com";
const ADMIN_PASSWORD: &str = "admin123";
const BOUNDARY: &str = "cinereview-test-boundary";

struct TestApp {
    router: Router,
    state: Arc<AppState>,
    persistence: Arc<MemoryPersistence>,
    uploads: PathBuf,
}

impl Drop for TestApp {
    fn drop(&mut self) {
        let _ = std::fs::remove_dir_all(&self.uploads);
    }
}

async fn spawn_app() -> TestApp {
    spawn_app_with(|_| {}).await
}

async fn spawn_app_with(configure: impl FnOnce(&mut Config)) -> TestApp {
    let uploads = std::env::temp_dir().join(format!("cinereview-uploads-{}", uuid::Uuid::new_v4()));

    let mut config = Config::default();
    config.general.uploads_path = uploads.to_string_lossy().into_owned();
    configure(&mut config);

    let persistence = Arc::new(MemoryPersistence::new());
    let state = cinereview::api::create_app_state(config, persistence.clone(), None)
        .await
        .expect("Failed to create app state");

    TestApp {
        router: cinereview::api::router(state.clone()),
        state,
        persistence,
        uploads,
    }
}

impl TestApp {
    async fn send(&self, request: Request<Body>) -> (StatusCode, Value) {
        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let body = response.into_body().collect().await.unwrap().to_bytes();
        let json = if body.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&body).unwrap_or(Value::Null)
        };
        (status, json)
    }

    async fn get(&self, uri: &str) -> (StatusCode, Value) {
        self.send(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
    }

    async fn get_as(&self, uri: &str, token: &str) -> (StatusCode, Value) {
        self.send(
            Request::builder()
                .uri(uri)
                .header(header::AUTHORIZATION, format!("Bearer {token}"))
                .body(Body::empty())
                .unwrap(),
        )
        .await
    }

    async fn json_as(
        &self,
        method: &str,
        uri: &str,
        token: &str,
        body: &Value,
    ) -> (StatusCode, Value) {
        self.send(
            Request::builder()
                .method(method)
                .uri(uri)
                .header(header::AUTHORIZATION, format!("Bearer {token}"))
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
        )
        .await
    }

    async fn multipart_as(
        &self,
        method: &str,
        uri: &str,
        token: &str,
        body: Vec<u8>,
    ) -> (StatusCode, Value) {
        self.send(
            Request::builder()
                .method(method)
                .uri(uri)
                .header(header::AUTHORIZATION, format!("Bearer {token}"))
                .header(
                    header::CONTENT_TYPE,
                    format!("multipart/form-data; boundary={BOUNDARY}"),
                )
                .body(Body::from(body))
                .unwrap(),
        )
        .await
    }

    async fn login(&self, email: &str, password: &str) -> (StatusCode, Value) {
        self.send(
            Request::builder()
                .method("POST")
                .uri("/api/auth/login")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(
                    json!({ "email": email, "password": password }).to_string(),
                ))
                .unwrap(),
        )
        .await
    }

    async fn admin_token(&self) -> String {
        let (status, body) = self.login(ADMIN_EMAIL, ADMIN_PASSWORD).await;
        assert_eq!(status, StatusCode::OK, "{body}");
        body["data"]["token"].as_str().unwrap().to_string()
    }

    fn viewer_token(&self) -> String {
        let viewer = UserRecord {
            id: UserId::new(2),
            email: "viewer@cinereview.com".to_string(),
            password: String::new(),
            role: Role::Viewer,
            name: "Viewer".to_string(),
            created_at: None,
        };
        issue_token(&viewer, &JwtConfig::from(&self.state.config.auth)).unwrap()
    }
}

/// Builds a multipart body from text fields and `(field, filename, content type, bytes)` files.
fn multipart_body(fields: &[(&str, &str)], files: &[(&str, &str, &str, &[u8])]) -> Vec<u8> {
    let mut body = Vec::new();
    for (name, value) in fields {
        body.extend_from_slice(
            format!(
                "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"{name}\"\r\n\r\n{value}\r\n"
            )
            .as_bytes(),
        );
    }
    for (name, filename, content_type, bytes) in files {
        body.extend_from_slice(
            format!(
                "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"{name}\"; filename=\"{filename}\"\r\nContent-Type: {content_type}\r\n\r\n"
            )
            .as_bytes(),
        );
        body.extend_from_slice(bytes);
        body.extend_from_slice(b"\r\n");
    }
    body.extend_from_slice(format!("--{BOUNDARY}--\r\n").as_bytes());
    body
}

fn slugs(body: &Value) -> Vec<String> {
    body["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|m| m["slug"].as_str().unwrap().to_string())
        .collect()
}

// ============================================================================
// Authentication
// ============================================================================

#[tokio::test]
async fn test_login_and_verify() {
    let app = spawn_app().await;

    let (status, body) = app.login(ADMIN_EMAIL, ADMIN_PASSWORD).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], json!(true));
    assert_eq!(body["data"]["user"]["role"], json!("admin"));
    assert_eq!(body["data"]["user"]["email"], json!(ADMIN_EMAIL));
    assert!(body["data"]["user"].get("password").is_none());

    let token = body["data"]["token"].as_str().unwrap();
    let (status, body) = app.get_as("/api/auth/verify", token).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["id"], json!(1));
    assert_eq!(body["data"]["role"], json!("admin"));
    assert!(body["data"]["exp"].as_i64().unwrap() > body["data"]["iat"].as_i64().unwrap());
}

#[tokio::test]
async fn test_login_failures_are_indistinguishable() {
    let app = spawn_app().await;

    let (wrong_password_status, wrong_password) = app.login(ADMIN_EMAIL, "nope").await;
    let (unknown_email_status, unknown_email) =
        app.login("ghost@cinereview.com", ADMIN_PASSWORD).await;

    assert_eq!(wrong_password_status, StatusCode::UNAUTHORIZED);
    assert_eq!(unknown_email_status, StatusCode::UNAUTHORIZED);
    assert_eq!(wrong_password, unknown_email);
    assert_eq!(wrong_password["error"], json!("Invalid credentials"));
}

#[tokio::test]
async fn test_access_gate() {
    let app = spawn_app().await;

    let (status, body) = app.get("/api/admin/dashboard").await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"], json!("Access token required"));

    let (status, body) = app.get("/api/auth/verify").await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"], json!("Access token required"));

    let (status, body) = app.get_as("/api/admin/dashboard", "not-a-token").await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["error"], json!("Invalid or expired token"));

    let viewer = app.viewer_token();
    let (status, body) = app.get_as("/api/admin/dashboard", &viewer).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["error"], json!("Admin access required"));

    // viewers may still verify their own identity
    let (status, body) = app.get_as("/api/auth/verify", &viewer).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["role"], json!("viewer"));

    // a token signed with another secret is rejected
    let other = spawn_app_with(|c| c.auth.jwt_secret = "another-secret".to_string()).await;
    let foreign = other.admin_token().await;
    let (status, _) = app.get_as("/api/admin/dashboard", &foreign).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
}

// ============================================================================
// Public reads
// ============================================================================

#[tokio::test]
async fn test_public_listing() {
    let app = spawn_app().await;

    let (status, body) = app.get("/api/movies").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(slugs(&body), vec!["the-dark-knight", "pulp-fiction"]);
    assert_eq!(
        body["pagination"],
        json!({
            "currentPage": 1,
            "totalPages": 1,
            "totalMovies": 2,
            "hasNextPage": false,
            "hasPrevPage": false,
            "limit": 12
        })
    );

    let (status, body) = app
        .get("/api/movies?genre=Action&rating=9%2B&sort=rating&order=desc&page=1&limit=1")
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(slugs(&body), vec!["the-dark-knight"]);
    assert_eq!(body["pagination"]["totalMovies"], json!(1));

    let (_, body) = app.get("/api/movies?sort=title&order=asc").await;
    assert_eq!(slugs(&body), vec!["pulp-fiction", "the-dark-knight"]);

    let (_, body) = app.get("/api/movies?search=tarantino").await;
    assert_eq!(slugs(&body), vec!["pulp-fiction"]);

    let (_, body) = app.get("/api/movies?limit=1&page=2").await;
    assert_eq!(slugs(&body), vec!["pulp-fiction"]);
    assert_eq!(body["pagination"]["hasPrevPage"], json!(true));
    assert_eq!(body["pagination"]["hasNextPage"], json!(false));
}

#[tokio::test]
async fn test_invalid_query_parameters() {
    let app = spawn_app().await;

    for query in [
        "sort=password",
        "order=sideways",
        "limit=0",
        "limit=500",
        "page=0",
        "rating=great",
        "year=nineteen",
    ] {
        let (status, body) = app.get(&format!("/api/movies?{query}")).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "{query}");
        assert_eq!(body["success"], json!(false));
    }
}

#[tokio::test]
async fn test_get_movie_counts_views() {
    let app = spawn_app().await;

    let (status, body) = app.get("/api/movies/the-dark-knight").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["views"], json!(1521));

    let (status, body) = app.get("/api/movies/1").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["views"], json!(1522));

    let (status, body) = app.get("/api/movies/no-such-movie").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], json!("Movie not found"));
}

#[tokio::test]
async fn test_get_movie_with_numeric_slug() {
    let app = spawn_app().await;
    let token = app.admin_token().await;

    let (status, created) = app
        .json_as(
            "POST",
            "/api/admin/movies",
            &token,
            &json!({ "title": "1917", "status": "published" }),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(created["data"]["slug"], json!("1917"));

    let (status, body) = app.get("/api/movies/1917").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["id"], created["data"]["id"]);
    assert_eq!(body["data"]["views"], json!(1));
}

#[tokio::test]
async fn test_stats_and_featured_routes() {
    let app = spawn_app().await;

    let (status, body) = app.get("/api/movies/stats").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["totalMovies"], json!(2));
    assert_eq!(body["data"]["totalGenres"], json!(2));
    assert_eq!(body["data"]["averageRating"], json!(9.0));

    let (status, body) = app.get("/api/movies/featured").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(slugs(&body), vec!["the-dark-knight"]);

    // neither lookup counted as a view
    let (_, body) = app.get("/api/movies/the-dark-knight").await;
    assert_eq!(body["data"]["views"], json!(1521));
}

#[tokio::test]
async fn test_settings() {
    let app = spawn_app().await;
    let token = app.admin_token().await;

    let (status, body) = app.get("/api/settings").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["siteName"], json!("CineReview Pro"));

    let (status, body) = app
        .json_as(
            "PUT",
            "/api/admin/settings",
            &token,
            &json!({ "siteName": "CineReview", "theme": "dark" }),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["siteName"], json!("CineReview"));
    assert_eq!(body["data"]["theme"], json!("dark"));
    assert_eq!(body["data"]["contactEmail"], json!("contact@cinereview.com"));

    let (_, body) = app.get("/api/settings").await;
    assert_eq!(body["data"]["siteName"], json!("CineReview"));

    let (status, _) = app
        .json_as("PUT", "/api/admin/settings", &token, &json!(["not", "an", "object"]))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_unknown_route() {
    let app = spawn_app().await;

    let (status, body) = app.get("/api/does-not-exist").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, json!({ "success": false, "error": "Endpoint not found" }));

    let (status, _) = app.get("/elsewhere").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

// ============================================================================
// Admin writes
// ============================================================================

#[tokio::test]
async fn test_draft_lifecycle() {
    let app = spawn_app().await;
    let token = app.admin_token().await;

    let (status, body) = app
        .json_as(
            "POST",
            "/api/admin/movies",
            &token,
            &json!({ "title": "Inception!", "rating": 8.8, "genre": "Sci-Fi" }),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED, "{body}");
    assert_eq!(body["data"]["id"], json!(3));
    assert_eq!(body["data"]["slug"], json!("inception"));
    assert_eq!(body["data"]["status"], json!("draft"));
    assert_eq!(body["data"]["views"], json!(0));

    let (_, body) = app.get("/api/movies").await;
    assert!(!slugs(&body).contains(&"inception".to_string()));
    let (status, _) = app.get("/api/movies/inception").await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (_, body) = app.get_as("/api/admin/movies?status=draft", &token).await;
    assert_eq!(slugs(&body), vec!["inception"]);

    let (status, body) = app
        .json_as(
            "PUT",
            "/api/admin/movies/3",
            &token,
            &json!({ "status": "published" }),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["slug"], json!("inception"));

    let (_, body) = app.get("/api/movies?genre=Sci-Fi").await;
    assert_eq!(slugs(&body), vec!["inception"]);
}

#[tokio::test]
async fn test_title_changes_and_collisions() {
    let app = spawn_app().await;
    let token = app.admin_token().await;

    let (status, body) = app
        .json_as(
            "POST",
            "/api/admin/movies",
            &token,
            &json!({ "title": "the dark knight" }),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], json!("Movie with this title already exists"));

    let (status, body) = app
        .json_as("POST", "/api/admin/movies", &token, &json!({ "genre": "Drama" }))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], json!("Title is required"));

    let (status, _) = app
        .json_as(
            "PUT",
            "/api/admin/movies/2",
            &token,
            &json!({ "title": "The Dark Knight" }),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    for title in [json!(""), json!(null)] {
        let (status, body) = app
            .json_as("PUT", "/api/admin/movies/2", &token, &json!({ "title": title }))
            .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], json!("Title is required"));
    }

    let (status, body) = app
        .json_as(
            "PUT",
            "/api/admin/movies/2",
            &token,
            &json!({ "title": "Pulp Fiction: Redux", "id": 99, "views": 0 }),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["id"], json!(2));
    assert_eq!(body["data"]["slug"], json!("pulp-fiction-redux"));
    assert_eq!(body["data"]["views"], json!(983));

    let (status, _) = app
        .json_as("PUT", "/api/admin/movies/42", &token, &json!({ "title": "X" }))
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = app
        .json_as("PUT", "/api/admin/movies/abc", &token, &json!({ "title": "X" }))
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_malformed_bodies() {
    let app = spawn_app().await;
    let token = app.admin_token().await;

    let (status, _) = app
        .send(
            Request::builder()
                .method("POST")
                .uri("/api/admin/movies")
                .header(header::AUTHORIZATION, format!("Bearer {token}"))
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from("{ not json"))
                .unwrap(),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, body) = app
        .json_as(
            "POST",
            "/api/admin/movies",
            &token,
            &json!({ "title": "Heat", "rating": "excellent" }),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["success"], json!(false));
}

#[tokio::test]
async fn test_delete_movie() {
    let app = spawn_app().await;
    let token = app.admin_token().await;

    let request = |uri: &str| {
        Request::builder()
            .method("DELETE")
            .uri(uri)
            .header(header::AUTHORIZATION, format!("Bearer {token}"))
            .body(Body::empty())
            .unwrap()
    };

    let (status, body) = app.send(request("/api/admin/movies/2")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!({ "success": true, "message": "Movie deleted successfully" })
    );

    let (status, _) = app.send(request("/api/admin/movies/2")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (_, body) = app.get("/api/movies").await;
    assert_eq!(slugs(&body), vec!["the-dark-knight"]);

    // the next id follows the current maximum
    let (_, body) = app
        .json_as("POST", "/api/admin/movies", &token, &json!({ "title": "Heat" }))
        .await;
    assert_eq!(body["data"]["id"], json!(2));
}

#[tokio::test]
async fn test_dashboard() {
    let app = spawn_app().await;
    let token = app.admin_token().await;

    app.json_as("POST", "/api/admin/movies", &token, &json!({ "title": "Heat" }))
        .await;

    let (status, body) = app.get_as("/api/admin/dashboard", &token).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["totalMovies"], json!(3));
    assert_eq!(body["data"]["publishedMovies"], json!(2));
    assert_eq!(body["data"]["draftMovies"], json!(1));
    assert_eq!(body["data"]["featuredMovies"], json!(1));
    assert_eq!(body["data"]["totalViews"], json!(1520 + 983));
    assert_eq!(body["data"]["recentMovies"][0]["title"], json!("Heat"));

    let (_, body) = app.get_as("/api/admin/movies?sort=id&order=asc", &token).await;
    assert_eq!(body["pagination"]["totalMovies"], json!(3));
}

#[tokio::test]
async fn test_mutations_are_persisted() {
    let app = spawn_app().await;
    let token = app.admin_token().await;

    app.json_as("POST", "/api/admin/movies", &token, &json!({ "title": "Heat" }))
        .await;
    app.get("/api/movies/the-dark-knight").await;
    app.state.store.flush().await;

    let saved = app.persistence.last_saved().await.unwrap();
    assert_eq!(saved.movies.len(), 3);
    assert_eq!(saved.movies[0].views, 1521);
    assert_eq!(saved.movies[2].slug, "heat");
    assert_eq!(saved.users.len(), 1);
}

// ============================================================================
// Uploads
// ============================================================================

#[tokio::test]
async fn test_upload() {
    let app = spawn_app().await;
    let token = app.admin_token().await;

    let png: &[u8] = b"\x89PNG\r\n\x1a\nfake";
    let body = multipart_body(&[], &[("file", "cover.png", "image/png", png)]);
    let (status, body) = app
        .multipart_as("POST", "/api/admin/upload", &token, body)
        .await;
    assert_eq!(status, StatusCode::OK, "{body}");
    assert_eq!(body["data"]["originalName"], json!("cover.png"));
    assert_eq!(body["data"]["size"], json!(png.len()));

    let url = body["data"]["url"].as_str().unwrap().to_string();
    assert!(url.starts_with("/uploads/file-"));
    assert!(url.ends_with(".png"));

    let response = app
        .router
        .clone()
        .oneshot(Request::builder().uri(&url).body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let served = response.into_body().collect().await.unwrap().to_bytes();
    assert_eq!(&served[..], png);
}

#[tokio::test]
async fn test_upload_rejections() {
    let app = spawn_app_with(|c| c.uploads.max_file_size_bytes = 1024).await;
    let token = app.admin_token().await;

    let body = multipart_body(&[], &[("file", "notes.txt", "text/plain", &b"hello"[..])]);
    let (status, body) = app
        .multipart_as("POST", "/api/admin/upload", &token, body)
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], json!("Only image files are allowed"));

    let big = vec![0u8; 2048];
    let body = multipart_body(&[], &[("file", "big.jpg", "image/jpeg", big.as_slice())]);
    let (status, body) = app
        .multipart_as("POST", "/api/admin/upload", &token, body)
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], json!("File too large"));

    let body = multipart_body(&[("note", "no attachment")], &[]);
    let (status, body) = app
        .multipart_as("POST", "/api/admin/upload", &token, body)
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], json!("No file uploaded"));

    // nothing was written for the rejected uploads
    let written = std::fs::read_dir(&app.uploads).map_or(0, |d| d.count());
    assert_eq!(written, 0);
}

#[tokio::test]
async fn test_create_with_poster() {
    let app = spawn_app().await;
    let token = app.admin_token().await;

    let body = multipart_body(
        &[
            ("title", "Heat"),
            ("rating", "8.3"),
            ("year", "1995"),
            ("featured", "true"),
            ("status", "published"),
            ("tags", r#"["crime","heist"]"#),
        ],
        &[("poster", "heat.jpg", "image/jpeg", &b"jpeg-bytes"[..])],
    );
    let (status, body) = app
        .multipart_as("POST", "/api/admin/movies", &token, body)
        .await;
    assert_eq!(status, StatusCode::CREATED, "{body}");
    assert_eq!(body["data"]["slug"], json!("heat"));
    assert_eq!(body["data"]["rating"], json!(8.3));
    assert_eq!(body["data"]["year"], json!(1995));
    assert_eq!(body["data"]["featured"], json!(true));
    assert_eq!(body["data"]["tags"], json!(["crime", "heist"]));
    assert!(
        body["data"]["poster"]
            .as_str()
            .unwrap()
            .starts_with("/uploads/poster-")
    );

    // a colliding title leaves no orphaned poster behind
    let before = std::fs::read_dir(&app.uploads).unwrap().count();
    let body = multipart_body(
        &[("title", "HEAT")],
        &[("poster", "heat2.jpg", "image/jpeg", &b"jpeg-bytes"[..])],
    );
    let (status, _) = app
        .multipart_as("POST", "/api/admin/movies", &token, body)
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(std::fs::read_dir(&app.uploads).unwrap().count(), before);
}

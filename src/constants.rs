pub const IMAGE_MIME_PREFIX: &str = "image/";

pub mod pagination {

    pub const DEFAULT_PAGE: usize = 1;

    pub const DEFAULT_LIMIT: usize = 12;

    pub const MAX_LIMIT: usize = 100;
}

pub mod uploads {

    pub const DEFAULT_MAX_FILE_SIZE_BYTES: usize = 5 * 1024 * 1024;

    /// Public URL prefix the uploads directory is served under.
    pub const URL_PREFIX: &str = "/uploads";

    /// Extra request body headroom so oversized attachments reach our own check.
    pub const BODY_LIMIT_HEADROOM_BYTES: usize = 1024 * 1024;
}

pub mod stats {

    pub const RECENT_MOVIES: usize = 5;
}

pub mod auth {

    pub const DEFAULT_TOKEN_TTL_HOURS: i64 = 24;

    pub const DEFAULT_JWT_SECRET: &str = "change-me-in-production";

    pub const DEFAULT_ADMIN_EMAIL: &str = "admin@cinereview.com";

    pub const DEFAULT_ADMIN_PASSWORD: &str = "admin123";
}

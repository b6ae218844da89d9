pub mod auth_service;
pub use auth_service::{AuthError, AuthService, LoginResult};

pub mod auth_service_impl;
pub use auth_service_impl::StoreAuthService;

pub mod blob;
pub use blob::{BlobError, BlobStore, LocalBlobStore, StoredBlob, Upload};

pub mod movie_service;
pub use movie_service::{MovieError, MovieService};

pub mod movie_service_impl;
pub use movie_service_impl::StoreMovieService;

pub mod query;
pub mod slug;
pub mod stats;

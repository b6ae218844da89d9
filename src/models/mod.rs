pub mod movie;
pub mod settings;
pub mod user;

pub use movie::{FieldError, MovieFields, MovieRecord, MovieStatus};
pub use settings::Settings;
pub use user::{Role, UserRecord, UserSummary};

mod hash_password;
mod list;

pub use hash_password::cmd_hash_password;
pub use list::cmd_list_movies;

pub mod backup_post;
pub mod user;

pub use backup_post::BackupPost;
pub use user::{Plan, User};

pub mod grouping;
pub mod store;
mod tests;

pub use grouping::{date_bucket, group_conversations, DateBucket};
pub use store::{ChatStore, SENTINEL_TITLE, WELCOME_TEXT};

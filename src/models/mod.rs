pub mod cache;
pub mod error;
pub mod favorite;
pub mod news;

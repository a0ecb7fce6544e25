pub mod favorites;
pub mod news;

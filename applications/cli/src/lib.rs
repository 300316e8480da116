/// Shelf - custom list client
pub mod app;
pub mod config;

pub mod api;
pub mod app;
pub mod error;
pub mod genre_fallback;
pub mod genres;
pub mod models;
pub mod terminal;
pub mod ticket;
pub mod utils;
pub mod view;

//! HTTP route handlers.

pub mod health;
pub mod heroes;
pub mod scrape;

pub use health::health_handler;
pub use heroes::{get_hero_handler, get_metadata_handler, list_heroes_handler};
pub use scrape::scrape_handler;

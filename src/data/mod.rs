//! Data ingestion and storage
//!
//! Roster page scraping and the JSON files shared by the extractor and merger.

pub mod scrapers;
pub mod store;

pub use scrapers::nba::NbaRosterScraper;
pub use store::{append_to_accumulator, load_json, load_or_default, save_json};

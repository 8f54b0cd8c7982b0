//! Player name matching
//!
//! Fills the team field of the draft player list from scraped roster records.

pub mod merge;
pub mod normalize;
pub mod strategy;

pub use merge::{merge_file, merge_teams, MergeOptions, MergeReport};
pub use normalize::normalize_name;
pub use strategy::{find_player, MatchStrategy, PlayerIndex, PlayerMatch};

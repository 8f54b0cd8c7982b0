//! Fantasy basketball draft data tools
//!
//! Scrapes player images and teams out of a saved roster page and merges the
//! team field into the draft's player list by fuzzy name matching.

pub mod data;
pub mod matching;

use matching::MatchStrategy;
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// One scraped roster row
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerImageRecord {
    /// Headshot URL
    #[serde(default)]
    pub src: Option<String>,
    pub name: String,
    #[serde(default)]
    pub team: Option<String>,
}

impl PlayerImageRecord {
    pub fn new(name: impl Into<String>, src: Option<String>, team: Option<String>) -> Self {
        PlayerImageRecord {
            src,
            name: name.into(),
            team,
        }
    }
}

impl fmt::Display for PlayerImageRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.team {
            Some(team) => write!(f, "{} ({})", self.name, team),
            None => write!(f, "{}", self.name),
        }
    }
}

/// Application-wide errors
#[derive(Debug, Error)]
pub enum FantaError {
    #[error("Scraper failed for {url}: {message}")]
    Scraper { url: String, message: String },

    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Invalid selector `{selector}`: {message}")]
    Selector { selector: String, message: String },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    Parse(String),
}

pub type Result<T> = std::result::Result<T, FantaError>;

/// Application configuration loaded from config.toml
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub paths: PathsConfig,
    pub selectors: SelectorConfig,
    pub merge: MergeConfig,
    pub fetch: FetchConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PathsConfig {
    /// Saved roster page read by `extract`
    pub roster_html: String,
    /// Accumulated scrape output, also the players input of `merge`
    pub player_images: String,
    /// Draft player list rewritten by `merge`
    pub converted: String,
    /// Roster page to download instead of reading `roster_html`
    pub roster_url: Option<String>,
}

/// CSS selectors describing the roster table
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SelectorConfig {
    pub row: String,
    pub player_link: String,
    pub name_container: String,
    pub name_part: String,
    pub image: String,
    pub team_link: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct MergeConfig {
    pub strategy: MatchStrategy,
    /// Also copy the matched player's image URL into field 3
    pub fill_images: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FetchConfig {
    pub user_agent: String,
    pub timeout_secs: u64,
}

impl Default for PathsConfig {
    fn default() -> Self {
        PathsConfig {
            roster_html: "players.html".to_string(),
            player_images: "nba_player_images.json".to_string(),
            converted: "converted_with_img.json".to_string(),
            roster_url: None,
        }
    }
}

impl Default for SelectorConfig {
    fn default() -> Self {
        SelectorConfig {
            row: "tr.RosterRow_row__2_hNz".to_string(),
            player_link: "a.Anchor_anchor__cSc3P.RosterRow_playerLink__qw1vG".to_string(),
            name_container: "div.RosterRow_playerName__G28lg".to_string(),
            name_part: "p".to_string(),
            image: "img.PlayerImage_image__wH_YX.PlayerImage_round__bIjPr".to_string(),
            team_link: "a.Anchor_anchor__cSc3P.RosterRow_team__AunTP".to_string(),
        }
    }
}

impl Default for MergeConfig {
    fn default() -> Self {
        MergeConfig {
            strategy: MatchStrategy::Containment,
            fill_images: false,
        }
    }
}

impl Default for FetchConfig {
    fn default() -> Self {
        FetchConfig {
            user_agent: "fantabasket/0.1".to_string(),
            timeout_secs: 30,
        }
    }
}

impl Config {
    pub fn load(path: &str) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            FantaError::Config(format!("Failed to read config file {}: {}", path, e))
        })?;
        toml::from_str(&content)
            .map_err(|e| FantaError::Config(format!("Failed to parse config: {}", e)))
    }

    pub fn save(&self, path: &str) -> Result<()> {
        let content = toml::to_string_pretty(self)
            .map_err(|e| FantaError::Config(format!("Failed to serialize config: {}", e)))?;
        std::fs::write(path, content)?;
        Ok(())
    }
}

//! NBA roster page scraper
//!
//! Pulls headshot URL, player name and team out of the roster table of a
//! saved (or downloaded) players page. Rows that do not carry a player link
//! are ignored.

use crate::{FantaError, FetchConfig, PlayerImageRecord, Result, SelectorConfig};
use scraper::{ElementRef, Html, Selector};
use std::path::{Path, PathBuf};

/// Compiled roster selectors
#[derive(Debug, Clone)]
pub struct RosterSelectors {
    row: Selector,
    player_link: Selector,
    name_container: Selector,
    name_part: Selector,
    image: Selector,
    team_link: Selector,
}

impl RosterSelectors {
    pub fn compile(config: &SelectorConfig) -> Result<Self> {
        Ok(RosterSelectors {
            row: parse_selector(&config.row)?,
            player_link: parse_selector(&config.player_link)?,
            name_container: parse_selector(&config.name_container)?,
            name_part: parse_selector(&config.name_part)?,
            image: parse_selector(&config.image)?,
            team_link: parse_selector(&config.team_link)?,
        })
    }
}

fn parse_selector(selector: &str) -> Result<Selector> {
    Selector::parse(selector).map_err(|e| FantaError::Selector {
        selector: selector.to_string(),
        message: e.to_string(),
    })
}

/// Scraper for the nba.com players roster table
pub struct NbaRosterScraper {
    selectors: RosterSelectors,
    client: Option<reqwest::blocking::Client>,
    /// Where downloaded pages are saved for offline runs
    cache_path: Option<PathBuf>,
}

impl NbaRosterScraper {
    pub fn new(selectors: &SelectorConfig) -> Result<Self> {
        Ok(NbaRosterScraper {
            selectors: RosterSelectors::compile(selectors)?,
            client: None,
            cache_path: None,
        })
    }

    /// Enable downloads with the given HTTP settings
    pub fn with_fetch(mut self, fetch: &FetchConfig) -> Result<Self> {
        self.client = Some(super::http_client(fetch)?);
        Ok(self)
    }

    /// Save downloaded pages to `path`
    pub fn with_cache<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.cache_path = Some(path.as_ref().to_path_buf());
        self
    }

    /// Parse a saved roster page
    pub fn parse_file<P: AsRef<Path>>(&self, path: P) -> Result<Vec<PlayerImageRecord>> {
        let html = std::fs::read_to_string(path.as_ref())?;
        Ok(self.parse_page(&html))
    }

    /// Download a roster page and return its HTML
    pub fn fetch_page(&self, url: &str) -> Result<String> {
        let client = self.client.as_ref().ok_or_else(|| {
            FantaError::Config("HTTP client not configured for roster downloads".to_string())
        })?;

        log::info!("Fetching roster page {}", url);

        let response = client.get(url).send()?;
        if !response.status().is_success() {
            return Err(FantaError::Scraper {
                url: url.to_string(),
                message: format!("HTTP {}", response.status()),
            });
        }
        let html = response.text()?;

        if let Err(e) = self.save_to_cache(&html) {
            log::warn!("Failed to save roster page: {}", e);
        }

        Ok(html)
    }

    fn save_to_cache(&self, html: &str) -> Result<()> {
        if let Some(path) = &self.cache_path {
            if let Some(parent) = path.parent() {
                if !parent.as_os_str().is_empty() {
                    std::fs::create_dir_all(parent)?;
                }
            }
            std::fs::write(path, html)?;
            log::debug!("Saved roster page to {}", path.display());
        }
        Ok(())
    }

    /// Parse roster rows out of a page
    pub fn parse_page(&self, html: &str) -> Vec<PlayerImageRecord> {
        let document = Html::parse_document(html);
        let mut records = Vec::new();
        let mut skipped = 0usize;

        for row in document.select(&self.selectors.row) {
            match self.parse_row(&row) {
                Some(record) => {
                    log::debug!("  {}", record);
                    records.push(record);
                }
                None => skipped += 1,
            }
        }

        log::info!(
            "Parsed {} players ({} rows without a player link)",
            records.len(),
            skipped
        );
        records
    }

    fn parse_row(&self, row: &ElementRef) -> Option<PlayerImageRecord> {
        let link = row.select(&self.selectors.player_link).next()?;

        // Names are split over several <p> tags (first / last name)
        let name = match link.select(&self.selectors.name_container).next() {
            Some(container) => container
                .select(&self.selectors.name_part)
                .map(|part| stripped_text(&part))
                .collect::<Vec<_>>()
                .join(" "),
            None => link.text().collect::<String>().trim().to_string(),
        };

        let src = link
            .select(&self.selectors.image)
            .next()
            .and_then(|img| img.value().attr("src"))
            .map(str::to_string);

        let team = row
            .select(&self.selectors.team_link)
            .next()
            .map(|a| a.text().collect::<String>().trim().to_string());

        Some(PlayerImageRecord { src, name, team })
    }
}

/// Text of an element with each text node trimmed and glued together
fn stripped_text(element: &ElementRef) -> String {
    element
        .text()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .collect()
}

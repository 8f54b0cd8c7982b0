//! Web scrapers for roster data

pub mod nba;

use crate::{FetchConfig, Result};

/// Build the blocking HTTP client used for page downloads
pub fn http_client(config: &FetchConfig) -> Result<reqwest::blocking::Client> {
    let client = reqwest::blocking::Client::builder()
        .user_agent(config.user_agent.as_str())
        .timeout(std::time::Duration::from_secs(config.timeout_secs))
        .build()?;
    Ok(client)
}

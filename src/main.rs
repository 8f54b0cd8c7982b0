//! Fantasy basketball draft data CLI
//!
//! Scrapes player images and teams from the NBA roster page and merges the
//! team field into the draft player list.

use clap::{Parser, Subcommand};
use fantabasket::matching::MatchStrategy;
use fantabasket::{Config, Result};

#[derive(Parser)]
#[command(name = "fantabasket")]
#[command(about = "Roster scraping and team merge tools for the fantabasket draft", long_about = None)]
struct Cli {
    /// Config file path
    #[arg(short, long, default_value = "config.toml")]
    config: String,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Scrape the roster page and append players to the image list
    Extract {
        /// Saved roster page
        #[arg(long)]
        input: Option<String>,
        /// Image list to append to
        #[arg(long)]
        output: Option<String>,
        /// Download the roster page instead of reading the saved copy
        #[arg(long)]
        url: Option<String>,
    },
    /// Fill the team field of the draft list from the image list
    Merge {
        /// Draft list rewritten in place
        #[arg(long)]
        converted: Option<String>,
        /// Scraped players to match against
        #[arg(long)]
        players: Option<String>,
        /// Matching strategy: containment or exact
        #[arg(long)]
        strategy: Option<MatchStrategy>,
        /// Also copy the player image URL into the draft list
        #[arg(long)]
        fill_images: bool,
    },
    /// Write a default config file
    Init,
}

fn main() {
    let cli = Cli::parse();

    // Initialize logging
    let log_level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level))
        .format_timestamp(None)
        .init();

    // Load or create config
    let config = if std::path::Path::new(&cli.config).exists() {
        match Config::load(&cli.config) {
            Ok(c) => c,
            Err(e) => {
                eprintln!("Error loading config: {}", e);
                std::process::exit(1);
            }
        }
    } else {
        Config::default()
    };

    let result = match cli.command {
        Commands::Extract { input, output, url } => commands::extract(&config, input, output, url),
        Commands::Merge {
            converted,
            players,
            strategy,
            fill_images,
        } => commands::merge(&config, converted, players, strategy, fill_images),
        Commands::Init => commands::init(&cli.config),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

mod commands {
    use super::*;
    use fantabasket::data::{append_to_accumulator, NbaRosterScraper};
    use fantabasket::matching::{merge_file, MergeOptions};

    pub fn init(config_path: &str) -> Result<()> {
        let config = Config::default();
        config.save(config_path)?;
        println!("Created default config at {}", config_path);

        println!("\nNext steps:");
        println!("  1. Save the NBA players page as {}", config.paths.roster_html);
        println!("  2. Run 'fantabasket extract' to collect player images and teams");
        println!("  3. Run 'fantabasket merge' to fill teams into {}", config.paths.converted);

        Ok(())
    }

    pub fn extract(
        config: &Config,
        input: Option<String>,
        output: Option<String>,
        url: Option<String>,
    ) -> Result<()> {
        let input = input.unwrap_or_else(|| config.paths.roster_html.clone());
        let output = output.unwrap_or_else(|| config.paths.player_images.clone());
        let scraper = NbaRosterScraper::new(&config.selectors)?;

        let records = match url.or_else(|| config.paths.roster_url.clone()) {
            Some(url) => {
                let scraper = scraper.with_fetch(&config.fetch)?.with_cache(&input);
                let html = scraper.fetch_page(&url)?;
                scraper.parse_page(&html)
            }
            None => {
                log::info!("Reading roster page {}", input);
                scraper.parse_file(&input)?
            }
        };

        let total = append_to_accumulator(&output, records)?;
        println!("Total images in {}: {}", output, total);

        Ok(())
    }

    pub fn merge(
        config: &Config,
        converted: Option<String>,
        players: Option<String>,
        strategy: Option<MatchStrategy>,
        fill_images: bool,
    ) -> Result<()> {
        let converted = converted.unwrap_or_else(|| config.paths.converted.clone());
        let players = players.unwrap_or_else(|| config.paths.player_images.clone());

        let mut options = MergeOptions::from(&config.merge);
        if let Some(strategy) = strategy {
            options.strategy = strategy;
        }
        options.fill_images |= fill_images;

        merge_file(&converted, &players, &options)?;
        Ok(())
    }
}

//! CLI commands and handlers
use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};

use crate::app::{load_catalogue, App};
use crate::domain::price::StorefrontScraper;
use crate::infrastructure::{GreenManGamingScraper, HttpClient, NuuvemScraper, SteamScraper};
use crate::shared::config::DEFAULT_CONFIG_PATH;
use crate::shared::types::{AppConfig, Storefront};

#[derive(Parser)]
#[command(name = "gamedeal")]
#[command(version, about = "Track game prices across storefronts and alert on price drops")]
pub struct Cli {
    /// Path to config file
    #[arg(long, global = true, default_value = DEFAULT_CONFIG_PATH)]
    pub config: String,

    /// Log level (overrides config file)
    #[arg(long, global = true)]
    pub log_level: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Monitor prices of every configured game
    Run {
        /// Run a single round and exit
        #[arg(long)]
        once: bool,

        /// Seconds between rounds (overrides config file)
        #[arg(short, long)]
        interval_secs: Option<u64>,
    },

    /// Scrape one product page and print its price
    Scrape {
        /// Storefront the URL belongs to
        #[arg(short, long, value_enum)]
        storefront: StorefrontArg,

        /// Product page URL
        url: String,
    },

    /// List the configured games
    Games,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum StorefrontArg {
    Steam,
    Nuuvem,
    Gmg,
}

impl From<StorefrontArg> for Storefront {
    fn from(arg: StorefrontArg) -> Self {
        match arg {
            StorefrontArg::Steam => Storefront::Steam,
            StorefrontArg::Nuuvem => Storefront::Nuuvem,
            StorefrontArg::Gmg => Storefront::GreenManGaming,
        }
    }
}

/// Command executor
pub struct CommandExecutor {
    config: AppConfig,
}

impl CommandExecutor {
    pub fn new(config: AppConfig) -> Self {
        Self { config }
    }

    pub async fn execute(self, command: Commands) -> Result<()> {
        match command {
            Commands::Run {
                once,
                interval_secs,
            } => self.run(once, interval_secs).await,
            Commands::Scrape { storefront, url } => self.scrape(storefront.into(), &url).await,
            Commands::Games => self.games(),
        }
    }

    async fn run(mut self, once: bool, interval_secs: Option<u64>) -> Result<()> {
        if let Some(interval_secs) = interval_secs {
            self.config.monitor.interval_secs = interval_secs;
        }
        App::build(self.config).await?.run(once).await
    }

    async fn scrape(&self, storefront: Storefront, url: &str) -> Result<()> {
        let http = HttpClient::new(&self.config.http).context("build HTTP client")?;
        let scraper: Box<dyn StorefrontScraper> = match storefront {
            Storefront::Steam => Box::new(SteamScraper::new(http)?),
            Storefront::Nuuvem => Box::new(NuuvemScraper::new(http)?),
            Storefront::GreenManGaming => Box::new(GreenManGamingScraper::new(http)?),
        };

        match scraper.scrape(url).await? {
            Some(price) => println!("{}: {}", storefront, self.config.currency.format(price)),
            None => println!("{}: no price available", storefront),
        }
        Ok(())
    }

    fn games(&self) -> Result<()> {
        let games = load_catalogue(&self.config)?;
        println!("📋 {} game(s) configured", games.len());
        for game in games {
            println!("  • {} [{}]", game.title, game.id);
            for storefront in Storefront::ALL {
                if let Some(url) = game.url_for(storefront) {
                    println!("      {:<15} {}", storefront.as_str(), url);
                }
            }
        }
        Ok(())
    }
}

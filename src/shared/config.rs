use std::env;
use std::fs;
use std::path::Path;
use crate::shared::types::{AppConfig, TelegramConfig};
use crate::shared::errors::ConfigError;

/// Default configuration file name
pub const DEFAULT_CONFIG_PATH: &str = "Config.toml";

/// Configuration loader
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration from a TOML file, then apply environment overrides
    pub fn load_config<P: AsRef<Path>>(path: P) -> Result<AppConfig, ConfigError> {
        let config_content = fs::read_to_string(path.as_ref())?;
        let mut config = Self::parse(&config_content)?;
        Self::apply_env_overrides(&mut config);
        Ok(config)
    }

    /// Like `load_config`, but falls back to defaults when the file does not exist
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> Result<AppConfig, ConfigError> {
        if path.as_ref().exists() {
            return Self::load_config(path);
        }
        let mut config = AppConfig::default();
        Self::apply_env_overrides(&mut config);
        Ok(config)
    }

    /// Parse configuration from a TOML string
    pub fn parse(content: &str) -> Result<AppConfig, ConfigError> {
        let config: AppConfig = toml::from_str(content)?;
        Ok(config)
    }

    /// `TELEGRAM_BOT_TOKEN` and `TELEGRAM_CHAT_ID` take precedence over the file
    fn apply_env_overrides(config: &mut AppConfig) {
        let token = env::var("TELEGRAM_BOT_TOKEN").ok().filter(|t| !t.is_empty());
        let chat_id = env::var("TELEGRAM_CHAT_ID")
            .ok()
            .and_then(|c| c.trim().parse::<i64>().ok());

        if token.is_none() && chat_id.is_none() {
            return;
        }

        let telegram = config.telegram.get_or_insert_with(|| TelegramConfig {
            bot_token: None,
            chat_id: None,
            api_url: "https://api.telegram.org".to_string(),
        });
        if token.is_some() {
            telegram.bot_token = token;
        }
        if chat_id.is_some() {
            telegram.chat_id = chat_id;
        }
    }
}

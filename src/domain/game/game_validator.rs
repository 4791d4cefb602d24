//! Catalogue entry validation

use regex::Regex;
use crate::shared::errors::ConfigError;
use crate::shared::types::{Game, GameEntry};
use crate::shared::utils::stable_id;

const STEAM_URL_PATTERN: &str = r"^https://store\.steampowered\.com/app/[0-9]{1,7}/\S+";
const NUUVEM_URL_PATTERN: &str = r"^https://www\.nuuvem\.com/br-en/item/\S+";
const GREEN_MAN_GAMING_URL_PATTERN: &str = r"^https://www\.greenmangaming\.com/games/\S+";

/// Validates catalogue entries and turns them into [`Game`]s
pub struct GameValidator {
    steam: Regex,
    nuuvem: Regex,
    green_man_gaming: Regex,
}

impl GameValidator {
    pub fn new() -> Result<Self, regex::Error> {
        Ok(Self {
            steam: Regex::new(STEAM_URL_PATTERN)?,
            nuuvem: Regex::new(NUUVEM_URL_PATTERN)?,
            green_man_gaming: Regex::new(GREEN_MAN_GAMING_URL_PATTERN)?,
        })
    }

    /// Check titles and storefront URLs. Entries without an id get one derived from their Steam URL.
    pub fn validate(&self, entry: &GameEntry) -> Result<Game, ConfigError> {
        let invalid = |reason: &str| ConfigError::InvalidGame {
            title: entry.title.clone(),
            reason: reason.to_string(),
        };

        if entry.title.trim().is_empty() {
            return Err(invalid("title is empty"));
        }
        if !self.steam.is_match(&entry.steam_url) {
            return Err(invalid("steam_url is not a Steam store page"));
        }
        if let Some(url) = &entry.nuuvem_url {
            if !self.nuuvem.is_match(url) {
                return Err(invalid("nuuvem_url is not a Nuuvem item page"));
            }
        }
        if let Some(url) = &entry.green_man_gaming_url {
            if !self.green_man_gaming.is_match(url) {
                return Err(invalid("green_man_gaming_url is not a GreenManGaming game page"));
            }
        }

        Ok(Game {
            id: entry.id.clone().unwrap_or_else(|| stable_id(&entry.steam_url)),
            title: entry.title.trim().to_string(),
            steam_url: entry.steam_url.clone(),
            nuuvem_url: entry.nuuvem_url.clone(),
            green_man_gaming_url: entry.green_man_gaming_url.clone(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry() -> GameEntry {
        GameEntry {
            id: None,
            title: "God of War".to_string(),
            steam_url: "https://store.steampowered.com/app/1593500/God_of_War/".to_string(),
            nuuvem_url: Some("https://www.nuuvem.com/br-en/item/god-of-war".to_string()),
            green_man_gaming_url: Some("https://www.greenmangaming.com/games/god-of-war-pc/".to_string()),
        }
    }

    #[test]
    fn test_valid_entry() {
        let validator = GameValidator::new().unwrap();
        let game = validator.validate(&entry()).unwrap();
        assert_eq!(game.title, "God of War");
        assert!(!game.id.is_empty());
    }

    #[test]
    fn test_generated_id_is_stable_across_runs() {
        let first = GameValidator::new().unwrap().validate(&entry()).unwrap();
        let second = GameValidator::new().unwrap().validate(&entry()).unwrap();
        assert_eq!(first.id, second.id);

        let mut other = entry();
        other.steam_url = "https://store.steampowered.com/app/2322010/God_of_War_Ragnarok/".to_string();
        assert_ne!(GameValidator::new().unwrap().validate(&other).unwrap().id, first.id);
    }

    #[test]
    fn test_keeps_configured_id() {
        let validator = GameValidator::new().unwrap();
        let mut entry = entry();
        entry.id = Some("gow".to_string());
        assert_eq!(validator.validate(&entry).unwrap().id, "gow");
    }

    #[test]
    fn test_rejects_non_store_steam_url() {
        let validator = GameValidator::new().unwrap();
        let mut entry = entry();
        entry.steam_url = "https://steamcommunity.com/id/godofwar".to_string();
        assert!(matches!(
            validator.validate(&entry),
            Err(ConfigError::InvalidGame { .. })
        ));
    }

    #[test]
    fn test_rejects_wrong_nuuvem_region() {
        let validator = GameValidator::new().unwrap();
        let mut entry = entry();
        entry.nuuvem_url = Some("https://www.nuuvem.com/us-en/item/god-of-war".to_string());
        assert!(validator.validate(&entry).is_err());
    }

    #[test]
    fn test_optional_urls_may_be_missing() {
        let validator = GameValidator::new().unwrap();
        let mut entry = entry();
        entry.nuuvem_url = None;
        entry.green_man_gaming_url = None;
        assert!(validator.validate(&entry).is_ok());
    }

    #[test]
    fn test_rejects_empty_title() {
        let validator = GameValidator::new().unwrap();
        let mut entry = entry();
        entry.title = "  ".to_string();
        assert!(validator.validate(&entry).is_err());
    }
}

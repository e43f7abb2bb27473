use crate::error::AppError;
use std::env;
use std::path::PathBuf;

const APP_DIR: &str = "dota_draft";

#[derive(Debug, Clone)]
pub struct Config {
    pub data_dir: PathBuf,
    pub heroes_source: Option<String>,
    pub matrix_source: Option<String>,
    pub roles_source: Option<String>,
    /// Raw hero pool entries (ids or names), resolved against the catalog later
    pub hero_pool: Vec<String>,
}

impl Config {
    pub fn from_env() -> Result<Self, AppError> {
        dotenvy::dotenv().ok();

        let data_dir = match env::var("DOTA_DATA_DIR") {
            Ok(dir) if !dir.trim().is_empty() => PathBuf::from(dir),
            Ok(_) => {
                return Err(AppError::ConfigError(
                    "DOTA_DATA_DIR is set but empty".to_string(),
                ))
            }
            Err(_) => Self::default_data_dir(),
        };

        Ok(Config {
            data_dir,
            heroes_source: non_empty_var("DOTA_HEROES_SOURCE"),
            matrix_source: non_empty_var("DOTA_MATRIX_SOURCE"),
            roles_source: non_empty_var("DOTA_ROLES_SOURCE"),
            hero_pool: non_empty_var("DOTA_HERO_POOL")
                .map(|raw| split_list(&raw))
                .unwrap_or_default(),
        })
    }

    pub fn default_data_dir() -> PathBuf {
        dirs::data_dir()
            .or_else(dirs::home_dir)
            .unwrap_or_else(|| PathBuf::from("."))
            .join(APP_DIR)
            .join("datasets")
    }
}

fn non_empty_var(key: &str) -> Option<String> {
    env::var(key).ok().filter(|v| !v.trim().is_empty())
}

/// Splits a comma-separated list, dropping blank entries.
pub fn split_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|part| part.trim())
        .filter(|part| !part.is_empty())
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn split_list_drops_blanks() {
        assert_eq!(split_list(" 1, Axe ,,  ,Lion"), vec!["1", "Axe", "Lion"]);
        assert!(split_list("").is_empty());
    }

    #[test]
    fn default_data_dir_ends_in_datasets() {
        let dir = Config::default_data_dir();
        assert!(dir.ends_with("dota_draft/datasets"));
    }
}

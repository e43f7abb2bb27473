use super::models::{RawMatrix, RawRoleMap};
use super::Dataset;
use crate::analysis::positions::HeroPositions;
use crate::catalog::{merge_aliases, HeroCatalog, HeroId, HeroRecord};
use crate::config::Config;
use crate::error::AppError;
use crate::matchup::MatchupIndex;
use indicatif::{ProgressBar, ProgressStyle};
use serde::de::DeserializeOwned;
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{debug, info, warn};

pub const HEROES_FILE: &str = "heroes.json";
pub const MATRIX_FILE: &str = "synergyMatrix.json";
pub const ROLES_FILE: &str = "hero-roles.json";

#[derive(Debug, Clone, Default)]
pub struct RefreshReport {
    pub files_updated: Vec<&'static str>,
    pub aliases_merged: usize,
    pub heroes_appended: usize,
}

/// Reads the three dataset files from the local data directory, seeding any
/// missing file from its configured source first.
pub struct DatasetLoader {
    config: Config,
}

impl DatasetLoader {
    pub fn new(config: Config) -> Self {
        DatasetLoader { config }
    }

    pub fn path(&self, file: &str) -> PathBuf {
        self.config.data_dir.join(file)
    }

    pub fn load(&self) -> Result<Dataset, AppError> {
        fs::create_dir_all(&self.config.data_dir).map_err(|e| {
            AppError::IoError(format!(
                "Failed to create {}: {}",
                self.config.data_dir.display(),
                e
            ))
        })?;

        self.seed_if_missing(HEROES_FILE, self.config.heroes_source.as_deref())?;
        self.seed_if_missing(MATRIX_FILE, self.config.matrix_source.as_deref())?;
        self.seed_if_missing(ROLES_FILE, self.config.roles_source.as_deref())?;

        let heroes: Vec<HeroRecord> = read_json(&self.path(HEROES_FILE))?;
        let catalog = HeroCatalog::new(heroes)?;

        let matrix: RawMatrix = read_json(&self.path(MATRIX_FILE))?;
        let matchups = MatchupIndex::from_raw(matrix)?;

        let roles_path = self.path(ROLES_FILE);
        let positions = if roles_path.exists() {
            parse_role_map(read_json(&roles_path)?)?
        } else {
            warn!(path = %roles_path.display(), "no lane data, enemy positions will be unknown");
            HashMap::new()
        };

        info!(
            heroes = catalog.len(),
            matchups = matchups.len(),
            positions = positions.len(),
            "dataset loaded"
        );

        Ok(Dataset::new(catalog, matchups, positions))
    }

    /// Re-fetches every configured source and overwrites the local copies.
    /// Aliases from the current hero list are carried into the new one.
    pub fn refresh(&self) -> Result<RefreshReport, AppError> {
        let mut report = RefreshReport::default();

        if let Some(source) = self.config.heroes_source.as_deref() {
            let fresh: Vec<HeroRecord> = parse_json(&fetch_source(source)?, source)?;
            let local = self.path(HEROES_FILE);
            let existing: Vec<HeroRecord> = if local.exists() {
                read_json(&local)?
            } else {
                Vec::new()
            };

            let merge = merge_aliases(&existing, fresh);
            if merge.heroes_appended > 0 {
                warn!(
                    count = merge.heroes_appended,
                    "local hero list had heroes missing from the source, keeping them"
                );
            }
            // Validate before anything touches the disk
            HeroCatalog::new(merge.heroes.clone())?;
            write_json(&local, &merge.heroes)?;

            report.aliases_merged = merge.aliases_merged;
            report.heroes_appended = merge.heroes_appended;
            report.files_updated.push(HEROES_FILE);
        }

        if let Some(source) = self.config.matrix_source.as_deref() {
            let text = fetch_source(source)?;
            let raw: RawMatrix = parse_json(&text, source)?;
            MatchupIndex::from_raw(raw)?;
            write_text(&self.path(MATRIX_FILE), &text)?;
            report.files_updated.push(MATRIX_FILE);
        }

        if let Some(source) = self.config.roles_source.as_deref() {
            let text = fetch_source(source)?;
            let raw: RawRoleMap = parse_json(&text, source)?;
            parse_role_map(raw)?;
            write_text(&self.path(ROLES_FILE), &text)?;
            report.files_updated.push(ROLES_FILE);
        }

        Ok(report)
    }

    fn seed_if_missing(&self, file: &'static str, source: Option<&str>) -> Result<(), AppError> {
        let path = self.path(file);
        if path.exists() {
            return Ok(());
        }

        match source {
            Some(source) => {
                let text = fetch_source(source)?;
                write_text(&path, &text)?;
                info!(file, source, "seeded local dataset file");
                Ok(())
            }
            // Lane data is optional
            None if file == ROLES_FILE => Ok(()),
            None => Err(AppError::ConfigError(format!(
                "{} not found in {} and no source configured",
                file,
                self.config.data_dir.display()
            ))),
        }
    }
}

/// Fetches a dataset file from an http(s) URL or a local path.
pub fn fetch_source(source: &str) -> Result<String, AppError> {
    if source.starts_with("http://") || source.starts_with("https://") {
        fetch_url(source)
    } else {
        debug!(source, "reading dataset source from disk");
        fs::read_to_string(source)
            .map_err(|e| AppError::IoError(format!("Failed to read {}: {}", source, e)))
    }
}

fn fetch_url(url: &str) -> Result<String, AppError> {
    let pb = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::with_template("{spinner} {msg}") {
        pb.set_style(style);
    }
    pb.set_message(format!("Downloading {}", url));
    pb.enable_steady_tick(Duration::from_millis(100));

    let response = ureq::get(url)
        .set("User-Agent", concat!("dota_draft/", env!("CARGO_PKG_VERSION")))
        .call();
    pb.finish_and_clear();

    match response {
        Ok(resp) => resp
            .into_string()
            .map_err(|e| AppError::HttpError(e.to_string())),
        Err(ureq::Error::Status(code, _)) => Err(AppError::HttpError(format!(
            "{} returned status {}",
            url, code
        ))),
        Err(e) => Err(AppError::HttpError(e.to_string())),
    }
}

pub fn parse_role_map(raw: RawRoleMap) -> Result<HashMap<HeroId, HeroPositions>, AppError> {
    raw.into_iter()
        .map(|(key, positions)| {
            let id: HeroId = key.parse().map_err(|_| {
                AppError::InvalidDataset(format!("lane data key '{}' is not a hero id", key))
            })?;
            if positions.primary.is_empty() {
                return Err(AppError::InvalidDataset(format!(
                    "hero {} has no primary position",
                    id
                )));
            }
            Ok((id, positions))
        })
        .collect()
}

fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T, AppError> {
    let content = fs::read_to_string(path)
        .map_err(|e| AppError::IoError(format!("Failed to read {}: {}", path.display(), e)))?;
    parse_json(&content, &path.display().to_string())
}

fn parse_json<T: DeserializeOwned>(content: &str, origin: &str) -> Result<T, AppError> {
    serde_json::from_str(content)
        .map_err(|e| AppError::JsonError(format!("Failed to parse {}: {}", origin, e)))
}

fn write_json<T: serde::Serialize>(path: &Path, value: &T) -> Result<(), AppError> {
    let json = serde_json::to_string_pretty(value)
        .map_err(|e| AppError::JsonError(format!("Failed to serialize {}: {}", path.display(), e)))?;
    write_text(path, &json)
}

fn write_text(path: &Path, text: &str) -> Result<(), AppError> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|e| {
            AppError::IoError(format!("Failed to create {}: {}", parent.display(), e))
        })?;
    }
    fs::write(path, text)
        .map_err(|e| AppError::IoError(format!("Failed to write {}: {}", path.display(), e)))
}

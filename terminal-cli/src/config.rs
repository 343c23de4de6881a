use std::path::PathBuf;

use anyhow::{anyhow, Result};
use directories::ProjectDirs;
use fakecoin_execution::{Rules, Variant};
use serde::{Deserialize, Serialize};
use tracing::Level;

use crate::Args;

/// Preferences remembered between runs. Game progress is never persisted.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersistedConfig {
    pub variant: Option<Variant>,
    /// Explicit weigh limit overriding the variant's.
    pub weigh_limit: Option<u32>,
    /// Explicitly unlimited, overriding the variant's limit.
    pub unlimited: Option<bool>,
    pub verbose: Option<bool>,
    pub log_level: Option<String>,
}

/// Effective settings after CLI flags are layered over persisted preferences.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub variant: Variant,
    pub rules: Rules,
    pub verbose: bool,
    pub log_level: Level,
    pub seed: Option<u64>,
}

/// Merge `args` over `cfg`, updating `cfg` with the values to write back.
pub fn resolve(args: &Args, cfg: &mut PersistedConfig) -> Result<Settings> {
    let variant = args.variant.or(cfg.variant).unwrap_or_default();
    cfg.variant = Some(variant);

    if args.no_weigh_limit {
        cfg.weigh_limit = None;
        cfg.unlimited = Some(true);
    } else if let Some(limit) = args.weigh_limit {
        cfg.weigh_limit = Some(limit);
        cfg.unlimited = None;
    }
    let mut rules = variant.rules();
    if cfg.unlimited == Some(true) {
        rules = rules.with_weigh_limit(None);
    } else if let Some(limit) = cfg.weigh_limit {
        rules = rules.with_weigh_limit(Some(limit));
    }

    let verbose = args.verbose || cfg.verbose.unwrap_or(false);
    cfg.verbose = Some(verbose);

    let level_name = args
        .log_level
        .clone()
        .or_else(|| cfg.log_level.clone())
        .unwrap_or_else(|| "info".to_string());
    let log_level = level_name
        .parse::<Level>()
        .map_err(|_| anyhow!("invalid log level {level_name:?} (expected trace|debug|info|warn|error)"))?;
    cfg.log_level = Some(level_name.to_lowercase());

    Ok(Settings {
        variant,
        rules,
        verbose,
        log_level,
        seed: args.seed,
    })
}

pub fn load_config() -> Option<PersistedConfig> {
    let path = config_path()?;
    let data = std::fs::read(path).ok()?;
    serde_json::from_slice(&data).ok()
}

pub fn save_config(cfg: &PersistedConfig) -> Result<()> {
    if let Some(path) = config_path() {
        if let Some(dir) = path.parent() {
            std::fs::create_dir_all(dir)?;
        }
        let data = serde_json::to_vec_pretty(cfg)?;
        std::fs::write(path, data)?;
    }
    Ok(())
}

fn project_dirs() -> Option<ProjectDirs> {
    ProjectDirs::from("dev", "fakecoin", "fakecoin")
}

fn config_path() -> Option<PathBuf> {
    project_dirs().map(|d| d.config_dir().join("config.json"))
}

pub fn default_log_path() -> Option<PathBuf> {
    project_dirs().map(|d| d.data_dir().join("fakecoin.log"))
}

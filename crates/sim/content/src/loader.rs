//! Loading content tables from RON files.
//!
//! Each table lives in its own file (`stats.ron`, `effects.ron`,
//! `skills.ron`). [`load_catalogs`] assembles a full [`Catalogs`] from a
//! directory, falling back to the built-in table for any file that is
//! absent.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;

use sim_core::{Catalogs, EffectCatalog, SkillCatalog, StatDefaults};

use crate::builtin;

pub const STATS_FILE: &str = "stats.ron";
pub const EFFECTS_FILE: &str = "effects.ron";
pub const SKILLS_FILE: &str = "skills.ron";

#[derive(Debug, Error)]
pub enum ContentError {
    #[error("failed to read content file {path}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to parse content file {path}")]
    Parse {
        path: PathBuf,
        #[source]
        source: ron::error::SpannedError,
    },
}

fn load_ron<T: serde::de::DeserializeOwned>(path: &Path) -> Result<T, ContentError> {
    let text = fs::read_to_string(path).map_err(|source| ContentError::Io {
        path: path.to_owned(),
        source,
    })?;
    ron::from_str(&text).map_err(|source| ContentError::Parse {
        path: path.to_owned(),
        source,
    })
}

pub fn load_stat_defaults(path: &Path) -> Result<StatDefaults, ContentError> {
    load_ron(path)
}

pub fn load_effect_catalog(path: &Path) -> Result<EffectCatalog, ContentError> {
    load_ron(path)
}

pub fn load_skill_catalog(path: &Path) -> Result<SkillCatalog, ContentError> {
    load_ron(path)
}

/// Loads all three tables from `dir`. Missing files fall back to the
/// built-in tables; present-but-broken files are hard errors.
pub fn load_catalogs(dir: &Path) -> Result<Catalogs, ContentError> {
    let stats_path = dir.join(STATS_FILE);
    let stat_defaults = if stats_path.is_file() {
        load_stat_defaults(&stats_path)?
    } else {
        tracing::debug!(path = %stats_path.display(), "no stat table, using built-ins");
        builtin::stat_defaults()
    };

    let effects_path = dir.join(EFFECTS_FILE);
    let effects = if effects_path.is_file() {
        load_effect_catalog(&effects_path)?
    } else {
        tracing::debug!(path = %effects_path.display(), "no effect table, using built-ins");
        builtin::effects()
    };

    let skills_path = dir.join(SKILLS_FILE);
    let skills = if skills_path.is_file() {
        load_skill_catalog(&skills_path)?
    } else {
        tracing::debug!(path = %skills_path.display(), "no skill table, using built-ins");
        builtin::skills()
    };

    Ok(Catalogs {
        stat_defaults,
        effects,
        skills,
    })
}

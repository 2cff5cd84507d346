//! Content tables for the simulation core: stock tuning plus RON loading.
//!
//! Games either call [`builtin::catalogs`] for the stock tables or point
//! [`loader::load_catalogs`] at a directory of RON files that override
//! them table by table.

pub mod builtin;
pub mod loader;

pub use builtin::catalogs;
pub use loader::{load_catalogs, load_effect_catalog, load_skill_catalog, load_stat_defaults, ContentError};

mod basic;
mod catalog;

pub use basic::BasicConfig;
pub use catalog::CatalogConfig;

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::CatalogError;

/// Application configuration managed by Figment.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct Config {
    /// Core server configuration (see `basic` table in config.toml).
    #[serde(default)]
    pub basic: BasicConfig,

    /// List view and export settings (see `catalog` table in config.toml).
    #[serde(default)]
    pub catalog: CatalogConfig,
}

pub const DEFAULT_CONFIG_FILE: &str = "config.toml";

/// Environment overrides, e.g. `CATALOG_BASIC__LISTEN_PORT=9000`.
const ENV_PREFIX: &str = "CATALOG_";

impl Config {
    /// Builds a Figment that merges defaults, the TOML file (when present) and
    /// `CATALOG_`-prefixed environment variables, in that order.
    pub fn figment(path: &Path) -> Figment {
        let figment = Figment::new().merge(Serialized::defaults(Config::default()));
        let figment = if path.is_file() {
            figment.merge(Toml::file(path))
        } else {
            figment
        };
        figment.merge(Env::prefixed(ENV_PREFIX).split("__"))
    }

    /// Loads and validates configuration.
    ///
    /// An explicitly requested file must exist; the default `config.toml` is optional.
    pub fn load(path: Option<&Path>) -> Result<Self, CatalogError> {
        let path = match path {
            Some(p) if !p.is_file() => {
                return Err(CatalogError::Config(format!(
                    "config file not found: {}",
                    p.display()
                )));
            }
            Some(p) => p.to_path_buf(),
            None => PathBuf::from(DEFAULT_CONFIG_FILE),
        };

        let cfg: Self = Self::figment(&path).extract().map_err(|err| {
            CatalogError::Config(format!(
                "failed to extract configuration from {}: {err}",
                path.display()
            ))
        })?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn validate(&self) -> Result<(), CatalogError> {
        if self.catalog.page_size == 0 {
            return Err(CatalogError::Config(
                "catalog.page_size must be at least 1".to_string(),
            ));
        }
        if self.basic.database_url.trim().is_empty() {
            return Err(CatalogError::Config(
                "basic.database_url must be set and non-empty".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_documented_values() {
        let cfg = Config::default();
        assert_eq!(cfg.catalog.page_size, 15);
        assert_eq!(cfg.basic.listen_port, 8188);
        assert_eq!(cfg.catalog.export_path, PathBuf::from("data.json"));
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn zero_page_size_is_rejected() {
        let mut cfg = Config::default();
        cfg.catalog.page_size = 0;
        assert!(matches!(cfg.validate(), Err(CatalogError::Config(_))));
    }

    #[test]
    fn explicit_missing_file_is_an_error() {
        let missing = std::env::temp_dir().join("catalog-no-such-config.toml");
        assert!(Config::load(Some(&missing)).is_err());
    }
}

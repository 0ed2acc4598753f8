use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Catalog presentation settings.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CatalogConfig {
    /// Rows per page on the list view.
    /// TOML: `catalog.page_size`. Default: `15`.
    #[serde(default = "default_page_size")]
    pub page_size: u32,

    /// File written by `GET /export`.
    /// TOML: `catalog.export_path`. Default: `data.json`.
    #[serde(default = "default_export_path")]
    pub export_path: PathBuf,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            page_size: default_page_size(),
            export_path: default_export_path(),
        }
    }
}

fn default_page_size() -> u32 {
    15
}

fn default_export_path() -> PathBuf {
    PathBuf::from("data.json")
}

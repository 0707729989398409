//! Theme library configuration.

use serde::{Deserialize, Serialize};

/// Settings applied to themes that do not override them.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ThemesConfig {
    /// Archive subfolder name used when a theme does not configure one.
    #[serde(default = "default_archive_folder")]
    pub default_archive_folder: String,
}

impl Default for ThemesConfig {
    fn default() -> Self {
        Self {
            default_archive_folder: default_archive_folder(),
        }
    }
}

/// Default archive folder name.
pub fn default_archive_folder() -> String {
    "published".to_string()
}

//! Resource library entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use themehub_core::error::AppError;
use themehub_core::result::AppResult;

/// Storage backend type serving a library.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[sqlx(rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum LibraryProvider {
    /// Local filesystem.
    Local,
    /// Remote WebDAV server.
    Webdav,
}

/// A configured resource library.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Library {
    /// Unique library identifier.
    pub id: Uuid,
    /// Human-readable name.
    pub name: String,
    /// Description of this library.
    pub description: Option<String>,
    /// The storage backend type.
    pub provider: LibraryProvider,
    /// Provider-specific configuration (JSON).
    pub config: serde_json::Value,
    /// When the library was created.
    pub created_at: DateTime<Utc>,
    /// When the library was last updated.
    pub updated_at: DateTime<Utc>,
}

/// Local filesystem library configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LocalLibraryConfig {
    /// Root directory all library paths resolve under.
    pub root_path: String,
}

/// WebDAV library configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WebdavLibraryConfig {
    /// Base URL of the WebDAV collection (e.g. `https://dav.example.com/remote.php/dav`).
    pub base_url: String,
    /// Basic auth username.
    pub username: String,
    /// Basic auth password.
    pub password: String,
}

impl Library {
    /// Parse the config JSON as a local filesystem configuration.
    pub fn local_config(&self) -> AppResult<LocalLibraryConfig> {
        serde_json::from_value(self.config.clone()).map_err(|e| {
            AppError::configuration(format!("Invalid local config for library {}: {e}", self.id))
        })
    }

    /// Parse the config JSON as a WebDAV configuration.
    pub fn webdav_config(&self) -> AppResult<WebdavLibraryConfig> {
        serde_json::from_value(self.config.clone()).map_err(|e| {
            AppError::configuration(format!("Invalid WebDAV config for library {}: {e}", self.id))
        })
    }
}

/// Data required to register a new library.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateLibrary {
    /// Human-readable name.
    pub name: String,
    /// Description.
    pub description: Option<String>,
    /// Storage backend type.
    pub provider: LibraryProvider,
    /// Provider-specific config (JSON).
    pub config: serde_json::Value,
}

/// Data for updating a library.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateLibrary {
    /// New name.
    pub name: Option<String>,
    /// New description.
    pub description: Option<String>,
    /// New provider-specific config (JSON).
    pub config: Option<serde_json::Value>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn library(provider: LibraryProvider, config: serde_json::Value) -> Library {
        Library {
            id: Uuid::new_v4(),
            name: "lib".to_string(),
            description: None,
            provider,
            config,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_local_config_parse() {
        let lib = library(
            LibraryProvider::Local,
            serde_json::json!({"rootPath": "/srv/videos"}),
        );
        assert_eq!(lib.local_config().unwrap().root_path, "/srv/videos");
    }

    #[test]
    fn test_webdav_config_rejects_missing_fields() {
        let lib = library(
            LibraryProvider::Webdav,
            serde_json::json!({"baseUrl": "https://dav.example.com"}),
        );
        assert!(lib.webdav_config().is_err());
    }
}

//! Theme registry service: CRUD plus account and resource root relations.

use std::sync::Arc;

use tracing::info;
use uuid::Uuid;

use themehub_core::config::ThemesConfig;
use themehub_core::error::AppError;
use themehub_core::result::AppResult;
use themehub_core::traits::store::ResourceStoreSource;
use themehub_database::repositories::{AccountRepository, LibraryRepository, ThemeRepository};
use themehub_entity::theme::{CreateTheme, ResourceRoot, Theme, ThemeDetail, UpdateTheme};

/// Service for theme registry operations.
#[derive(Debug, Clone)]
pub struct ThemeService {
    themes: ThemeRepository,
    accounts: AccountRepository,
    libraries: LibraryRepository,
    source: Arc<dyn ResourceStoreSource>,
    config: ThemesConfig,
}

impl ThemeService {
    /// Create a new theme service.
    pub fn new(
        themes: ThemeRepository,
        accounts: AccountRepository,
        libraries: LibraryRepository,
        source: Arc<dyn ResourceStoreSource>,
        config: ThemesConfig,
    ) -> Self {
        Self {
            themes,
            accounts,
            libraries,
            source,
            config,
        }
    }

    /// Create a theme, falling back to the configured archive folder name.
    pub async fn create(&self, data: &CreateTheme) -> AppResult<Theme> {
        if data.name.trim().is_empty() {
            return Err(AppError::validation("Theme name must not be empty"));
        }
        let archive_folder_name = match &data.archive_folder_name {
            Some(name) => validate_archive_folder_name(name)?,
            None => self.config.default_archive_folder.clone(),
        };

        let theme = self
            .themes
            .create(
                data.name.trim(),
                data.description.as_deref(),
                &archive_folder_name,
            )
            .await?;
        info!(theme_id = %theme.id, name = %theme.name, "Created theme");
        Ok(theme)
    }

    /// List all themes.
    pub async fn list(&self) -> AppResult<Vec<Theme>> {
        self.themes.find_all().await
    }

    /// Load a theme with its relations, failing if it does not exist.
    pub async fn detail(&self, id: Uuid) -> AppResult<ThemeDetail> {
        self.themes
            .find_detail(id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Theme not found: {id}")))
    }

    /// Update a theme's mutable fields.
    pub async fn update(&self, id: Uuid, data: &UpdateTheme) -> AppResult<Theme> {
        let mut theme = self
            .themes
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Theme not found: {id}")))?;

        if let Some(name) = &data.name {
            if name.trim().is_empty() {
                return Err(AppError::validation("Theme name must not be empty"));
            }
            theme.name = name.trim().to_string();
        }
        if let Some(description) = &data.description {
            theme.description = Some(description.clone());
        }
        if let Some(archive_folder_name) = &data.archive_folder_name {
            theme.archive_folder_name = validate_archive_folder_name(archive_folder_name)?;
        }

        self.themes.update(&theme).await?;
        self.themes
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Theme not found: {id}")))
    }

    /// Delete a theme. Relations cascade; files and accounts are untouched.
    pub async fn delete(&self, id: Uuid) -> AppResult<()> {
        if !self.themes.delete(id).await? {
            return Err(AppError::not_found(format!("Theme not found: {id}")));
        }
        info!(theme_id = %id, "Deleted theme");
        Ok(())
    }

    /// Link an existing account to a theme.
    pub async fn link_account(&self, theme_id: Uuid, account_id: Uuid) -> AppResult<()> {
        self.detail(theme_id).await?;
        self.accounts
            .find_by_id(account_id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Account not found: {account_id}")))?;
        self.themes.add_account(theme_id, account_id).await
    }

    /// Unlink an account from a theme.
    pub async fn unlink_account(&self, theme_id: Uuid, account_id: Uuid) -> AppResult<()> {
        if !self.themes.remove_account(theme_id, account_id).await? {
            return Err(AppError::not_found(
                "Account is not linked to this theme".to_string(),
            ));
        }
        Ok(())
    }

    /// Add a resource root, validating that the folder currently exists in
    /// the library. The folder is not re-validated afterwards.
    pub async fn add_resource_root(
        &self,
        theme_id: Uuid,
        library_id: Uuid,
        folder_path: &str,
    ) -> AppResult<ResourceRoot> {
        self.detail(theme_id).await?;
        self.libraries
            .find_by_id(library_id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Library not found: {library_id}")))?;

        let store = self.source.store_for(library_id).await?;
        let info = store.get_info(folder_path).await.map_err(|_| {
            AppError::validation(format!(
                "Folder does not exist in the library: {folder_path}"
            ))
        })?;
        if !info.is_directory {
            return Err(AppError::validation(format!(
                "Path is not a directory: {folder_path}"
            )));
        }

        let root = self
            .themes
            .add_resource_root(theme_id, library_id, folder_path)
            .await?;
        info!(theme_id = %theme_id, library_id = %library_id, folder_path, "Added resource root");
        Ok(root)
    }

    /// Remove a resource root.
    pub async fn remove_resource_root(&self, theme_id: Uuid, root_id: Uuid) -> AppResult<()> {
        if !self.themes.remove_resource_root(theme_id, root_id).await? {
            return Err(AppError::not_found(format!(
                "Resource root not found: {root_id}"
            )));
        }
        Ok(())
    }
}

/// An archive folder name is a single path component.
fn validate_archive_folder_name(name: &str) -> AppResult<String> {
    let name = name.trim();
    if name.is_empty() {
        return Err(AppError::validation(
            "Archive folder name must not be empty",
        ));
    }
    if name.contains('/') || name == "." || name == ".." {
        return Err(AppError::validation(
            "Archive folder name must be a single folder name",
        ));
    }
    Ok(name.to_string())
}

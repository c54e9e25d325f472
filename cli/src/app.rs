//! Shared wiring for every command: config, token store, API client.

use anyhow::{Context, Result};
use api::{ApiClient, FileTokenStore, NotesController, SessionController};
use config::ClientConfig;
use ink_core::TokenStore;
use std::path::{Path, PathBuf};
use std::sync::Arc;

pub struct App {
    pub config: ClientConfig,
    api: Arc<ApiClient>,
}

impl App {
    pub fn new(config_file: Option<&Path>) -> Result<Self> {
        let config = ClientConfig::load(config_file).context("failed to load configuration")?;

        let token_path = match &config.token_file {
            Some(path) => path.clone(),
            None => default_token_path()?,
        };
        tracing::debug!(path = %token_path.display(), "Using token file");
        let store: Arc<dyn TokenStore> = Arc::new(FileTokenStore::new(token_path));

        let api = Arc::new(
            ApiClient::new(&config, store).context("failed to build HTTP client")?,
        );
        Ok(Self { config, api })
    }

    pub fn session(&self) -> SessionController {
        SessionController::new(Arc::clone(&self.api))
    }

    pub fn notes(&self) -> NotesController {
        self.notes_with(ink_core::NoteQuery {
            page_size: self.config.page_size,
            ..Default::default()
        })
    }

    pub fn notes_with(&self, query: ink_core::NoteQuery) -> NotesController {
        NotesController::with_query(Arc::clone(&self.api), query)
    }
}

fn default_token_path() -> Result<PathBuf> {
    let base = dirs::config_dir().context("could not determine the user config directory")?;
    Ok(base.join("inkpad").join("tokens.json"))
}

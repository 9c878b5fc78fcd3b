pub mod check;
pub mod delete;
pub mod init;
pub mod list;
pub mod serve;
pub mod show;
pub mod submit;

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Args;

use formcraft_client::HttpFormsApi;
use formcraft_core::Form;

/// Options shared by every command that talks to a running server.
#[derive(Args)]
pub struct Remote {
    /// Base URL of the forms API (overrides config)
    #[arg(long)]
    api_url: Option<String>,

    /// Config file path
    #[arg(long)]
    config: Option<PathBuf>,
}

impl Remote {
    pub fn connect(&self) -> Result<HttpFormsApi> {
        let config = formcraft_core::config::load_config_from(self.config.as_deref())?;
        let base_url = self
            .api_url
            .clone()
            .unwrap_or_else(|| config.client.base_url.clone());
        HttpFormsApi::new(&base_url, config.client.timeout())
    }
}

pub fn read_form(path: &Path) -> Result<Form> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read form file: {}", path.display()))?;
    serde_json::from_str(&content)
        .with_context(|| format!("failed to parse form file: {}", path.display()))
}

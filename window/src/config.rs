//! Window descriptors loaded from TOML.
//!
//! A descriptor lists the shreds of one window over a host file:
//!
//! ```toml
//! one_line = true
//!
//! [[shreds]]
//! prefix = "SELECT "
//! host_range = { start = 9, end = 17 }
//!
//! [[shreds]]
//! host_range = { start = 22, end = 29 }
//! suffix = ";"
//! ```

use crate::{
    document::{Shred, WindowedDocument},
    error::WindowError,
};
use anyhow::{Context, Result};
use docwin_text::{HostBuffer, SharedBuffer};
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct WindowConfig {
    /// Strip line breaks from everything written through the window.
    pub one_line: bool,

    /// Fragments in host order.
    pub shreds: Vec<Shred>,
}

impl WindowConfig {
    /// Read and deserialize a TOML window descriptor from the given path.
    pub fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read window config: {}", path.display()))?;

        Self::from_toml_str(&contents)
            .with_context(|| format!("Failed to parse window config: {}", path.display()))
    }

    pub fn from_toml_str(source: &str) -> Result<Self> {
        toml::from_str(source).context("Failed to parse window config")
    }

    /// Build the described window over `host`.
    pub fn open<B: HostBuffer>(
        &self,
        host: SharedBuffer<B>,
    ) -> Result<WindowedDocument<B>, WindowError> {
        WindowedDocument::new(host, self.one_line, self.shreds.clone())
    }
}

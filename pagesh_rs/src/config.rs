//! Configuration file support for pagesh.
//!
//! Loads optional `pagesh.toml` from the project root so CI can run a
//! bare `pagesh` with no flags. CLI flags always win over config values.

use serde::Deserialize;
use std::path::{Path, PathBuf};

pub const CONFIG_FILE: &str = "pagesh.toml";

/// Root configuration structure
#[derive(Debug, Default, Clone, Deserialize)]
#[serde(default)]
pub struct PageshConfig {
    /// Built HTML document, relative to the config file's directory.
    pub html: Option<PathBuf>,
    /// Installer script, relative to the config file's directory.
    pub script: Option<PathBuf>,
    /// Output path; defaults to `html` (in-place overwrite).
    pub out: Option<PathBuf>,
    /// Fixed heredoc delimiter instead of the content-derived token.
    pub sentinel: Option<String>,
}

impl PageshConfig {
    /// Load config from `pagesh.toml` in the given root directory.
    /// Returns default config if the file doesn't exist or is invalid.
    pub fn load(root: &Path) -> Self {
        Self::load_from_path(&root.join(CONFIG_FILE))
    }

    /// Load config from a specific path, resolving relative path values
    /// against that file's parent directory.
    pub fn load_from_path(path: &Path) -> Self {
        if !path.exists() {
            return Self::default();
        }

        let config = match std::fs::read_to_string(path) {
            Ok(content) => match toml::from_str::<Self>(&content) {
                Ok(config) => config,
                Err(e) => {
                    eprintln!("[pagesh][warn] Failed to parse {}: {}", path.display(), e);
                    Self::default()
                }
            },
            Err(e) => {
                eprintln!("[pagesh][warn] Failed to read {}: {}", path.display(), e);
                Self::default()
            }
        };

        match path.parent() {
            Some(base) => config.resolved_against(base),
            None => config,
        }
    }

    fn resolved_against(mut self, base: &Path) -> Self {
        let resolve = |p: PathBuf| {
            if p.is_absolute() {
                p
            } else {
                base.join(p)
            }
        };
        self.html = self.html.map(resolve);
        self.script = self.script.map(resolve);
        self.out = self.out.map(resolve);
        self
    }
}

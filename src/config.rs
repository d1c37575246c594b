//! TOML config file (C11): every field optional via `serde(default)`, so a
//! partial file is valid. CLI flags explicitly passed by the caller always
//! win; this module only ever supplies the *fallback* for flags the user
//! didn't type. Mirrors the CLI-overrides-config-file layering of
//! `core-config` in the retrieval pack's `freddiehaddad-oxidized` workspace.

use std::path::Path;

use serde::Deserialize;

use crate::grid::Layout;

#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct Config {
    pub init_value: f64,
    pub size: usize,
    pub max_iters: u32,
    pub tol: f64,
    pub threads: usize,
    pub layout: ConfigLayout,
    pub top: f64,
    pub bottom: f64,
    pub left: f64,
    pub right: f64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            init_value: 0.5,
            size: 16,
            max_iters: 1000,
            tol: 1e-4,
            threads: 1,
            layout: ConfigLayout::Contiguous,
            top: 1.0,
            bottom: 0.0,
            left: 1.0,
            right: 1.0,
        }
    }
}

/// TOML-friendly spelling of [`Layout`]'s two physical engines (`rows` /
/// `contiguous`); `OneDim` has no config-file spelling since it's an alias of
/// `contiguous`, not a distinct engine (see `grid::Layout`'s doc comment).
#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum ConfigLayout {
    #[default]
    Contiguous,
    Rows,
}

impl From<ConfigLayout> for Layout {
    fn from(value: ConfigLayout) -> Self {
        match value {
            ConfigLayout::Contiguous => Layout::TwoDimContiguous,
            ConfigLayout::Rows => Layout::TwoDimDivided,
        }
    }
}

/// Load a config file, falling back to [`Config::default`] both when the
/// path doesn't exist and when the file fails to parse — an explicitly
/// passed `--config` that's missing is a CLI-level concern the caller
/// reports separately; this function only handles TOML content.
pub fn load(path: &Path) -> Config {
    match std::fs::read_to_string(path) {
        Ok(content) => toml::from_str(&content).unwrap_or_else(|err| {
            tracing::warn!(path = %path.display(), error = %err, "failed to parse config, using defaults");
            Config::default()
        }),
        Err(_) => Config::default(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_when_file_missing() {
        let cfg = load(Path::new("__jacobi_heat_nonexistent__.toml"));
        assert_eq!(cfg, Config::default());
    }

    #[test]
    fn partial_file_fills_remaining_fields_with_defaults() {
        let tmp = tempfile::NamedTempFile::new().unwrap();
        std::fs::write(tmp.path(), "size = 64\nthreads = 4\n").unwrap();
        let cfg = load(tmp.path());
        assert_eq!(cfg.size, 64);
        assert_eq!(cfg.threads, 4);
        assert_eq!(cfg.tol, Config::default().tol);
        assert_eq!(cfg.layout, ConfigLayout::Contiguous);
    }

    #[test]
    fn layout_parses_case_insensitively_lowercase() {
        let tmp = tempfile::NamedTempFile::new().unwrap();
        std::fs::write(tmp.path(), "layout = \"rows\"\n").unwrap();
        let cfg = load(tmp.path());
        assert_eq!(cfg.layout, ConfigLayout::Rows);
    }

    #[test]
    fn malformed_toml_falls_back_to_defaults() {
        let tmp = tempfile::NamedTempFile::new().unwrap();
        std::fs::write(tmp.path(), "size = [this is not valid").unwrap();
        let cfg = load(tmp.path());
        assert_eq!(cfg, Config::default());
    }
}

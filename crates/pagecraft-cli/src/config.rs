//! RON configuration for the `pagecraft` binary.
//!
//! Loaded from `~/.config/pagecraft/pagecraft.ron` unless `--config` names a
//! file. Every field is optional:
//!
//! ```ron
//! (
//!     default_breakpoint: sm,
//!     pretty: true,
//!     tree_depth: Some(3),
//! )
//! ```

use std::path::{Path, PathBuf};

use pagecraft_tree::Breakpoint;
use serde::{Deserialize, Serialize};

/// Settings that flags can override per invocation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CliConfig {
    /// Breakpoint for `css` when `--breakpoint` is not given.
    pub default_breakpoint: Breakpoint,
    /// Pretty-print JSON output and written documents.
    pub pretty: bool,
    /// Depth limit for `tree` when `--depth` is not given.
    pub tree_depth: Option<usize>,
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            default_breakpoint: Breakpoint::BASE,
            pretty: true,
            tree_depth: None,
        }
    }
}

/// Error type for config loading.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("RON parse error in {path:?}: {source}")]
    Ron {
        path: PathBuf,
        #[source]
        source: ron::error::SpannedError,
    },
}

/// Default config location (`~/.config/pagecraft/pagecraft.ron`).
pub fn config_file_path() -> Option<PathBuf> {
    dirs::config_dir().map(|p| p.join("pagecraft").join("pagecraft.ron"))
}

/// Parse config text.
pub fn parse_config(text: &str, path: &Path) -> Result<CliConfig, ConfigError> {
    ron::from_str(text).map_err(|source| ConfigError::Ron {
        path: path.to_path_buf(),
        source,
    })
}

/// Load the config.
///
/// An explicit path must exist. The default path is optional: when the file
/// is absent (or there is no config directory) defaults are used.
pub fn load_config(explicit: Option<&Path>) -> Result<CliConfig, ConfigError> {
    let path = match explicit {
        Some(p) => p.to_path_buf(),
        None => match config_file_path() {
            Some(p) if p.exists() => p,
            Some(p) => {
                tracing::info!("no config at {:?}, using defaults", p);
                return Ok(CliConfig::default());
            }
            None => {
                tracing::info!("no config directory available, using defaults");
                return Ok(CliConfig::default());
            }
        },
    };

    let text = std::fs::read_to_string(&path).map_err(|source| ConfigError::Io {
        path: path.clone(),
        source,
    })?;
    let config = parse_config(&text, &path)?;
    tracing::debug!("loaded config from {:?}: {:?}", path, config);
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let config = CliConfig::default();
        assert_eq!(config.default_breakpoint, Breakpoint::Md);
        assert!(config.pretty);
        assert_eq!(config.tree_depth, None);
    }

    #[test]
    fn test_parse_full_config() {
        let text = "(default_breakpoint: xs, pretty: false, tree_depth: Some(2))";
        let config = parse_config(text, Path::new("test.ron")).unwrap();
        assert_eq!(
            config,
            CliConfig {
                default_breakpoint: Breakpoint::Xs,
                pretty: false,
                tree_depth: Some(2),
            }
        );
    }

    #[test]
    fn test_parse_partial_config_fills_defaults() {
        let config = parse_config("(default_breakpoint: sm)", Path::new("test.ron")).unwrap();
        assert_eq!(config.default_breakpoint, Breakpoint::Sm);
        assert!(config.pretty);
        assert_eq!(config.tree_depth, None);
    }

    #[test]
    fn test_parse_error() {
        let err = parse_config("(default_breakpoint: xl)", Path::new("bad.ron")).unwrap_err();
        assert!(matches!(err, ConfigError::Ron { .. }));
        assert!(err.to_string().contains("bad.ron"));
    }

    #[test]
    fn test_load_explicit_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "(pretty: false)").unwrap();
        let config = load_config(Some(file.path())).unwrap();
        assert!(!config.pretty);
    }

    #[test]
    fn test_load_explicit_missing_file_is_error() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nope.ron");
        assert!(matches!(load_config(Some(&missing)), Err(ConfigError::Io { .. })));
    }
}

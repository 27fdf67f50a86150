//! Configuration file support
//!
//! Loads project-specific configuration from JSON files.
//!
//! Search order:
//! 1. Explicit path (--config CLI flag)
//! 2. `.bigorc.json` in project root
//! 3. `bigo.config.json` in project root
//!
//! All fields are optional. CLI flags take precedence over config file values.

use anyhow::{Context, Result};
use globset::{Glob, GlobSet, GlobSetBuilder};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Default exclude patterns applied when no config is specified
const DEFAULT_EXCLUDES: &[&str] = &[
    "**/__pycache__/**",
    "**/venv/**",
    "**/.venv/**",
    "**/node_modules/**",
    "**/build/**",
    "**/dist/**",
    "**/target/**",
];

/// Configuration loaded from a JSON config file
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct BigoConfig {
    /// Glob patterns for files to include (default: all supported extensions)
    #[serde(default)]
    pub include: Vec<String>,

    /// Glob patterns for files to exclude (default: caches and build output)
    #[serde(default)]
    pub exclude: Vec<String>,
}

/// Config with compiled glob sets, ready for filtering
#[derive(Debug)]
pub struct ResolvedConfig {
    include: Option<GlobSet>,
    exclude: GlobSet,
    root: PathBuf,
}

impl BigoConfig {
    /// Load config from an explicit path or by auto-discovery under `root`.
    ///
    /// Returns `Ok(None)` when no config file exists (defaults apply).
    pub fn load(explicit: Option<&Path>, root: &Path) -> Result<Option<Self>> {
        let path = match explicit {
            Some(path) => {
                if !path.exists() {
                    anyhow::bail!("Config file not found: {}", path.display());
                }
                path.to_path_buf()
            }
            None => {
                let candidates = [root.join(".bigorc.json"), root.join("bigo.config.json")];
                match candidates.into_iter().find(|p| p.exists()) {
                    Some(path) => path,
                    None => return Ok(None),
                }
            }
        };

        let contents = std::fs::read_to_string(&path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        let config: BigoConfig = serde_json::from_str(&contents)
            .with_context(|| format!("Invalid config file: {}", path.display()))?;
        Ok(Some(config))
    }

    /// Compile glob patterns for filtering paths relative to `root`
    pub fn resolve(self, root: &Path) -> Result<ResolvedConfig> {
        let include = if self.include.is_empty() {
            None
        } else {
            Some(build_glob_set(&self.include).context("Invalid include pattern")?)
        };

        let exclude_patterns: Vec<String> = if self.exclude.is_empty() {
            DEFAULT_EXCLUDES.iter().map(|s| s.to_string()).collect()
        } else {
            self.exclude
        };
        let exclude = build_glob_set(&exclude_patterns).context("Invalid exclude pattern")?;

        Ok(ResolvedConfig {
            include,
            exclude,
            root: root.to_path_buf(),
        })
    }
}

impl ResolvedConfig {
    /// Defaults: include everything supported, exclude caches and build output
    pub fn default_for(root: &Path) -> Result<Self> {
        BigoConfig::default().resolve(root)
    }

    /// Whether a file passes the include/exclude filter
    pub fn should_include(&self, path: &Path) -> bool {
        let relative = path.strip_prefix(&self.root).unwrap_or(path);

        if self.exclude.is_match(relative) {
            return false;
        }
        match &self.include {
            Some(include) => include.is_match(relative),
            None => true,
        }
    }
}

fn build_glob_set(patterns: &[String]) -> Result<GlobSet> {
    let mut builder = GlobSetBuilder::new();
    for pattern in patterns {
        let glob =
            Glob::new(pattern).with_context(|| format!("Invalid glob pattern: {pattern}"))?;
        builder.add(glob);
    }
    builder.build().context("Failed to build glob set")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_excludes_caches() {
        let config = ResolvedConfig::default_for(Path::new("/repo")).unwrap();
        assert!(config.should_include(Path::new("/repo/src/app.py")));
        assert!(!config.should_include(Path::new("/repo/pkg/__pycache__/app.py")));
        assert!(!config.should_include(Path::new("/repo/build/gen.c")));
    }

    #[test]
    fn include_patterns_narrow_the_set() {
        let config = BigoConfig {
            include: vec!["src/**/*.py".to_string()],
            exclude: vec![],
        }
        .resolve(Path::new("/repo"))
        .unwrap();
        assert!(config.should_include(Path::new("/repo/src/app.py")));
        assert!(!config.should_include(Path::new("/repo/tools/gen.py")));
    }

    #[test]
    fn explicit_excludes_replace_defaults() {
        let config = BigoConfig {
            include: vec![],
            exclude: vec!["**/generated/**".to_string()],
        }
        .resolve(Path::new("/repo"))
        .unwrap();
        assert!(!config.should_include(Path::new("/repo/src/generated/x.py")));
        // Default excludes no longer apply once replaced
        assert!(config.should_include(Path::new("/repo/build/x.py")));
    }

    #[test]
    fn unknown_config_fields_are_rejected() {
        let parsed: Result<BigoConfig, _> =
            serde_json::from_str(r#"{"include": [], "surprise": true}"#);
        assert!(parsed.is_err());
    }

    #[test]
    fn missing_explicit_config_is_an_error() {
        let err = BigoConfig::load(Some(Path::new("/no/such/file.json")), Path::new("/repo"));
        assert!(err.is_err());
    }
}

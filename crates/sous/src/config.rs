//! Configuration for sous.
//!
//! Loads config from:
//! 1. Global: ~/.config/sous/config.toml
//! 2. Per-project: .sous/config.toml (overrides global)
//!
//! Command-line flags override both.
//!
//! Example config.toml:
//! ```toml
//! [schema]
//! path = "schema/kitchen.yaml"
//!
//! [generate]
//! bindings = ["java", "typescript"]
//! out_dir = "build/sous"
//! format = "json"
//! ```

use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Output directory used when neither config nor flags name one.
pub const DEFAULT_OUT_DIR: &str = "generated";

/// Renderer for generated records.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// One JSON file per record
    #[default]
    Json,
}

/// Generation defaults.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GenerateConfig {
    /// Bindings to generate for. All built-in bindings when unset.
    pub bindings: Option<Vec<String>>,
    pub out_dir: Option<PathBuf>,
    pub format: Option<OutputFormat>,
}

/// Where the cookbook lives.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SchemaConfig {
    /// Schema path, relative to the project root.
    pub path: Option<PathBuf>,
}

/// Root configuration structure.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SousConfig {
    pub generate: GenerateConfig,
    pub schema: SchemaConfig,
}

impl SousConfig {
    /// Load configuration for a project rooted at `root`.
    pub fn load(root: &Path) -> Self {
        let mut config = Self::default();

        if let Some(global) = Self::global_config_path().and_then(|p| Self::load_file(&p)) {
            config = config.merge(global);
        }

        let project_path = root.join(".sous").join("config.toml");
        if let Some(mut project) = Self::load_file(&project_path) {
            if let Some(path) = project.schema.path.take() {
                project.schema.path = Some(root.join(path));
            }
            config = config.merge(project);
        }

        config
    }

    /// Get the global config path.
    fn global_config_path() -> Option<PathBuf> {
        let config_home = std::env::var("XDG_CONFIG_HOME")
            .map(PathBuf::from)
            .ok()
            .or_else(|| dirs::home_dir().map(|h| h.join(".config")))?;
        Some(config_home.join("sous").join("config.toml"))
    }

    /// Load config from a file path. Missing files are silently skipped;
    /// malformed ones are skipped with a warning.
    fn load_file(path: &Path) -> Option<Self> {
        let content = std::fs::read_to_string(path).ok()?;
        match toml::from_str(&content) {
            Ok(config) => {
                tracing::debug!(path = %path.display(), "loaded config");
                Some(config)
            }
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "ignoring malformed config");
                None
            }
        }
    }

    /// Merge another config into this one; keys set in `other` win.
    fn merge(self, other: Self) -> Self {
        Self {
            generate: GenerateConfig {
                bindings: other.generate.bindings.or(self.generate.bindings),
                out_dir: other.generate.out_dir.or(self.generate.out_dir),
                format: other.generate.format.or(self.generate.format),
            },
            schema: SchemaConfig {
                path: other.schema.path.or(self.schema.path),
            },
        }
    }

    pub fn out_dir(&self) -> PathBuf {
        self.generate
            .out_dir
            .clone()
            .unwrap_or_else(|| PathBuf::from(DEFAULT_OUT_DIR))
    }

    pub fn format(&self) -> OutputFormat {
        self.generate.format.unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::TempDir;

    fn write_project_config(dir: &TempDir, contents: &str) {
        let sous_dir = dir.path().join(".sous");
        std::fs::create_dir_all(&sous_dir).unwrap();
        let mut file = std::fs::File::create(sous_dir.join("config.toml")).unwrap();
        writeln!(file, "{contents}").unwrap();
    }

    #[test]
    fn test_defaults() {
        let config = SousConfig::default();
        assert_eq!(config.out_dir(), PathBuf::from("generated"));
        assert_eq!(config.format(), OutputFormat::Json);
        assert!(config.generate.bindings.is_none());
    }

    #[test]
    fn test_load_project_config() {
        let dir = TempDir::new().unwrap();
        write_project_config(
            &dir,
            r#"
[schema]
path = "kitchen.yaml"

[generate]
bindings = ["java"]
out_dir = "out"
"#,
        );

        let config = SousConfig::load(dir.path());
        assert_eq!(config.generate.bindings, Some(vec!["java".to_string()]));
        assert_eq!(config.out_dir(), PathBuf::from("out"));
        assert_eq!(config.schema.path, Some(dir.path().join("kitchen.yaml")));
    }

    #[test]
    fn test_malformed_config_is_ignored() {
        let dir = TempDir::new().unwrap();
        write_project_config(&dir, "[generate]\nbindngs = [\"java\"]\n");
        let config = SousConfig::load(dir.path());
        assert!(config.generate.bindings.is_none());
    }

    #[test]
    fn test_merge_keeps_unset_keys() {
        let global = SousConfig {
            generate: GenerateConfig {
                bindings: Some(vec!["kotlin".into()]),
                out_dir: Some("global-out".into()),
                format: None,
            },
            schema: SchemaConfig::default(),
        };
        let project = SousConfig {
            generate: GenerateConfig {
                out_dir: Some("project-out".into()),
                ..GenerateConfig::default()
            },
            schema: SchemaConfig::default(),
        };
        let merged = global.merge(project);
        assert_eq!(merged.generate.bindings, Some(vec!["kotlin".to_string()]));
        assert_eq!(merged.out_dir(), PathBuf::from("project-out"));
    }
}

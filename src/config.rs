use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::session::keymap::Keymap;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("key '{key}' is bound to both {first} and {second}")]
    DuplicateKey {
        key: char,
        first: &'static str,
        second: &'static str,
    },
    #[error("{action} must be bound to a visible character, got {key:?}")]
    InvisibleKey { action: &'static str, key: char },
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeatureKeys {
    #[serde(default = "default_feature_a_key")]
    pub a: char,
    #[serde(default = "default_feature_b_key")]
    pub b: char,
    #[serde(default = "default_feature_c_key")]
    pub c: char,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "default_start_key")]
    pub start_key: char,
    #[serde(default = "default_stats_key")]
    pub stats_key: char,
    #[serde(default = "default_quit_key")]
    pub quit_key: char,
    #[serde(default)]
    pub seed: Option<u64>,
    #[serde(default)]
    pub feature_keys: FeatureKeys,
}

fn default_start_key() -> char {
    Keymap::default().start
}
fn default_stats_key() -> char {
    Keymap::default().stats
}
fn default_quit_key() -> char {
    Keymap::default().quit
}
fn default_feature_a_key() -> char {
    Keymap::default().features[0]
}
fn default_feature_b_key() -> char {
    Keymap::default().features[1]
}
fn default_feature_c_key() -> char {
    Keymap::default().features[2]
}

impl Default for FeatureKeys {
    fn default() -> Self {
        Self {
            a: default_feature_a_key(),
            b: default_feature_b_key(),
            c: default_feature_c_key(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            start_key: default_start_key(),
            stats_key: default_stats_key(),
            quit_key: default_quit_key(),
            seed: None,
            feature_keys: FeatureKeys::default(),
        }
    }
}

impl Config {
    /// Load from the default location, falling back to defaults when no file exists.
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path())
    }

    /// Load from `path`, or the default location when none is given, then let
    /// a command-line seed take precedence over the file's.
    pub fn resolve(path: Option<&Path>, seed: Option<u64>) -> Result<Self> {
        let mut config = match path {
            Some(path) => Self::load_from(path)?,
            None => Self::load()?,
        };
        if seed.is_some() {
            config.seed = seed;
        }
        Ok(config)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            log::info!("no config at {}, using defaults", path.display());
            return Ok(Config::default());
        }
        let content = fs::read_to_string(path)
            .with_context(|| format!("reading config {}", path.display()))?;
        let config: Config = toml::from_str(&content)
            .with_context(|| format!("parsing config {}", path.display()))?;
        Ok(config)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        fs::write(path, content)?;
        Ok(())
    }

    pub fn config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("stonecut")
            .join("config.toml")
    }

    /// Check the bindings and build the keymap from them.
    ///
    /// Keys only need to be unique among actions that can be live on the same
    /// screen, plus the quit key, which the driver intercepts everywhere.
    pub fn keymap(&self) -> Result<Keymap, ConfigError> {
        let bindings = [
            ("quit", self.quit_key),
            ("start", self.start_key),
            ("stats", self.stats_key),
            ("feature A", self.feature_keys.a),
            ("feature B", self.feature_keys.b),
            ("feature C", self.feature_keys.c),
        ];

        for (action, key) in bindings {
            if key.is_whitespace() || key.is_control() {
                return Err(ConfigError::InvisibleKey { action, key });
            }
        }

        let groups: [&[(&'static str, char)]; 2] = [&bindings[1..3], &bindings[3..]];
        for group in groups {
            let scoped: Vec<(&'static str, char)> =
                std::iter::once(bindings[0]).chain(group.iter().copied()).collect();
            for (i, &(first, key)) in scoped.iter().enumerate() {
                if let Some(&(second, _)) = scoped[i + 1..].iter().find(|(_, k)| *k == key) {
                    return Err(ConfigError::DuplicateKey { key, first, second });
                }
            }
        }

        Ok(Keymap {
            start: self.start_key,
            stats: self.stats_key,
            quit: self.quit_key,
            features: [self.feature_keys.a, self.feature_keys.b, self.feature_keys.c],
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_serde_defaults_from_empty() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.keymap().unwrap(), Keymap::default());
        assert_eq!(config.seed, None);
    }

    #[test]
    fn test_config_partial_feature_table() {
        let toml_str = r#"
start_key = "n"
seed = 1234

[feature_keys]
b = "x"
"#;
        let config: Config = toml::from_str(toml_str).unwrap();
        assert_eq!(config.start_key, 'n');
        assert_eq!(config.stats_key, 't');
        assert_eq!(config.seed, Some(1234));
        assert_eq!(config.feature_keys.a, 'a');
        assert_eq!(config.feature_keys.b, 'x');
        assert_eq!(config.keymap().unwrap().features, ['a', 'x', 'c']);
    }

    #[test]
    fn test_config_serde_roundtrip() {
        let mut config = Config::default();
        config.seed = Some(9);
        let serialized = toml::to_string_pretty(&config).unwrap();
        let deserialized: Config = toml::from_str(&serialized).unwrap();
        assert_eq!(config, deserialized);
    }

    #[test]
    fn test_quit_key_must_be_unique() {
        let config = Config {
            quit_key: 'b',
            ..Config::default()
        };
        assert_eq!(
            config.keymap(),
            Err(ConfigError::DuplicateKey {
                key: 'b',
                first: "quit",
                second: "feature B",
            })
        );
    }

    #[test]
    fn test_start_and_stats_must_differ() {
        let config = Config {
            stats_key: 's',
            ..Config::default()
        };
        assert!(matches!(
            config.keymap(),
            Err(ConfigError::DuplicateKey { key: 's', .. })
        ));
    }

    #[test]
    fn test_keys_may_repeat_across_screens() {
        let config = Config {
            feature_keys: FeatureKeys {
                a: 's',
                b: 't',
                c: 'u',
            },
            ..Config::default()
        };
        assert!(config.keymap().is_ok());
    }

    #[test]
    fn test_whitespace_binding_rejected() {
        let config = Config {
            start_key: ' ',
            ..Config::default()
        };
        assert_eq!(
            config.keymap(),
            Err(ConfigError::InvisibleKey {
                action: "start",
                key: ' ',
            })
        );
    }

    #[test]
    fn test_load_missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::load_from(&dir.path().join("nope.toml")).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "quit_key = \"x\"\n").unwrap();
        let config = Config::load_from(&path).unwrap();
        assert_eq!(config.quit_key, 'x');
    }

    #[test]
    fn test_save_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");
        let config = Config {
            seed: Some(77),
            ..Config::default()
        };
        config.save_to(&path).unwrap();
        assert_eq!(Config::load_from(&path).unwrap(), config);
    }

    #[test]
    fn test_resolve_seed_override_written_back() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "seed = 5\nstats_key = \"r\"\n").unwrap();

        let kept = Config::resolve(Some(&path), None).unwrap();
        assert_eq!(kept.seed, Some(5));

        let config = Config::resolve(Some(&path), Some(42)).unwrap();
        assert_eq!(config.seed, Some(42));
        assert_eq!(config.stats_key, 'r');

        let out = dir.path().join("written").join("config.toml");
        config.save_to(&out).unwrap();
        let reloaded = Config::resolve(Some(&out), None).unwrap();
        assert_eq!(reloaded, config);
        assert!(reloaded.keymap().is_ok());
    }

    #[test]
    fn test_load_invalid_file_errors() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "start_key = 12\n").unwrap();
        assert!(Config::load_from(&path).is_err());
    }
}

use std::{collections::HashMap, path::PathBuf};

use config::{Config, ConfigError, Environment};
use serde::Deserialize;

pub struct GitsnapConfig {
    pub clone_dir: Option<PathBuf>,
}

impl GitsnapConfig {
    pub fn load() -> anyhow::Result<Self> {
        let raw_config = RawConfig::load(None)?;

        Ok(Self {
            clone_dir: raw_config.clone.dir,
        })
    }
}

#[derive(Default, Debug, Deserialize, PartialEq, Eq)]
struct RawConfig {
    #[serde(default)]
    clone: CloneConfig,
}

#[derive(Default, Debug, Deserialize, PartialEq, Eq)]
struct CloneConfig {
    dir: Option<PathBuf>,
}

impl RawConfig {
    fn load(env: Option<HashMap<String, String>>) -> Result<Self, ConfigError> {
        Config::builder()
            .add_source(
                Environment::with_prefix("GITSNAP")
                    .separator("_")
                    .source(env),
            )
            .build()?
            .try_deserialize()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use pretty_assertions::assert_eq;

    #[test]
    fn load_empty() {
        let env = HashMap::from([]);
        let config = RawConfig::load(Some(env)).unwrap();
        assert_eq!(
            config,
            RawConfig {
                clone: CloneConfig { dir: None }
            }
        )
    }

    #[test]
    fn load_environment() {
        let env = HashMap::from([(
            "GITSNAP_CLONE_DIR".to_owned(),
            "/workspaces".to_owned(),
        )]);
        let config = RawConfig::load(Some(env)).unwrap();
        assert_eq!(
            config,
            RawConfig {
                clone: CloneConfig {
                    dir: Some("/workspaces".into())
                }
            }
        )
    }
}

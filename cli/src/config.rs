//! CLI Configuration

use crate::output::OutputFormat;
use clap::ValueEnum;
use lde_entitlement::{EngineConfig, PersistScope};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

#[derive(Debug, Default, Serialize, Deserialize)]
pub struct Config {
    pub state_file: Option<PathBuf>,
    pub persist_scope: Option<PersistScope>,
    pub default_format: Option<String>,
}

impl Config {
    pub fn load(profile: Option<&str>) -> anyhow::Result<Self> {
        let path = Self::config_path(profile)?;
        if path.exists() {
            let content = fs::read_to_string(&path)?;
            Ok(toml::from_str(&content)?)
        } else {
            Ok(Self::default())
        }
    }

    pub fn save(&self, profile: Option<&str>) -> anyhow::Result<PathBuf> {
        let path = Self::config_path(profile)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&path, toml::to_string_pretty(self)?)?;
        Ok(path)
    }

    pub fn config_path(profile: Option<&str>) -> anyhow::Result<PathBuf> {
        let home = dirs::home_dir().ok_or_else(|| anyhow::anyhow!("Cannot find home directory"))?;
        let filename = match profile {
            Some(p) => format!("config.{}.toml", p),
            None => "config.toml".to_string(),
        };
        Ok(home.join(".lde").join(filename))
    }

    /// Configured default output format, if valid
    pub fn format(&self) -> Option<OutputFormat> {
        self.default_format
            .as_deref()
            .and_then(|f| OutputFormat::from_str(f, true).ok())
    }

    /// Engine settings; explicit overrides win over the file
    pub fn engine_config(
        &self,
        state_file: Option<PathBuf>,
        persist_scope: Option<PersistScope>,
    ) -> EngineConfig {
        let mut config = EngineConfig::default();
        if let Some(path) = state_file.or_else(|| self.state_file.clone()) {
            config.state_path = path;
        }
        if let Some(scope) = persist_scope.or(self.persist_scope) {
            config.persist_scope = scope;
        }
        config
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_config_file() {
        let config: Config = toml::from_str(
            r#"
            state_file = "/tmp/lde/state.json"
            persist_scope = "full"
            default_format = "JSON"
            "#,
        )
        .unwrap();

        assert_eq!(config.format(), Some(OutputFormat::Json));
        let engine = config.engine_config(None, None);
        assert_eq!(engine.state_path, PathBuf::from("/tmp/lde/state.json"));
        assert_eq!(engine.persist_scope, PersistScope::Full);
    }

    #[test]
    fn test_overrides_win() {
        let config = Config {
            state_file: Some("a.json".into()),
            persist_scope: Some(PersistScope::Full),
            default_format: Some("bogus".into()),
        };
        let engine = config.engine_config(Some("b.json".into()), Some(PersistScope::Ledger));
        assert_eq!(engine.state_path, PathBuf::from("b.json"));
        assert_eq!(engine.persist_scope, PersistScope::Ledger);
        assert_eq!(config.format(), None);
    }

    #[test]
    fn test_empty_config_uses_engine_defaults() {
        let engine = Config::default().engine_config(None, None);
        assert_eq!(engine, EngineConfig::default());
    }
}

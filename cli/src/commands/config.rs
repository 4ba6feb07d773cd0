//! Config commands

use crate::config::Config;
use crate::ConfigCommands;
use lde_entitlement::PersistScope;

const KEYS: &[&str] = &["state_file", "persist_scope", "default_format"];

pub fn handle(action: ConfigCommands, profile: Option<&str>) -> anyhow::Result<()> {
    match action {
        ConfigCommands::Init => {
            let path = Config::default().save(profile)?;
            println!("Configuration initialized at {}", path.display());
        }
        ConfigCommands::Set { key, value } => {
            let mut config = Config::load(profile)?;
            set(&mut config, &key, value)?;
            config.save(profile)?;
            println!("Set {} successfully", key);
        }
        ConfigCommands::Get { key } => {
            let config = Config::load(profile)?;
            println!("{}: {}", key, get(&config, &key)?.unwrap_or_else(|| "(not set)".into()));
        }
        ConfigCommands::List => {
            let config = Config::load(profile)?;
            for key in KEYS {
                let value = get(&config, key)?.unwrap_or_else(|| "(not set)".into());
                println!("{}: {}", key, value);
            }
        }
    }
    Ok(())
}

fn set(config: &mut Config, key: &str, value: String) -> anyhow::Result<()> {
    match key {
        "state_file" => config.state_file = Some(value.into()),
        "persist_scope" => config.persist_scope = Some(value.parse::<PersistScope>()?),
        "default_format" => {
            config.default_format = Some(value);
            if config.format().is_none() {
                anyhow::bail!("Unknown format (expected table, json or yaml)");
            }
        }
        _ => anyhow::bail!("Unknown config key: {}", key),
    }
    Ok(())
}

fn get(config: &Config, key: &str) -> anyhow::Result<Option<String>> {
    Ok(match key {
        "state_file" => config.state_file.as_ref().map(|p| p.display().to_string()),
        "persist_scope" => config.persist_scope.map(|s| s.to_string()),
        "default_format" => config.default_format.clone(),
        _ => anyhow::bail!("Unknown config key: {}", key),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_set_and_get() {
        let mut config = Config::default();
        set(&mut config, "state_file", "/tmp/x.json".into()).unwrap();
        set(&mut config, "persist_scope", "Full".into()).unwrap();
        set(&mut config, "default_format", "yaml".into()).unwrap();

        assert_eq!(config.state_file, Some(PathBuf::from("/tmp/x.json")));
        assert_eq!(get(&config, "persist_scope").unwrap().as_deref(), Some("full"));
        assert_eq!(get(&config, "default_format").unwrap().as_deref(), Some("yaml"));
    }

    #[test]
    fn test_rejects_bad_values() {
        let mut config = Config::default();
        assert!(set(&mut config, "persist_scope", "everything".into()).is_err());
        assert!(set(&mut config, "default_format", "xml".into()).is_err());
        assert!(set(&mut config, "api_key", "x".into()).is_err());
        assert!(get(&config, "api_key").is_err());
        assert_eq!(get(&config, "state_file").unwrap(), None);
    }
}

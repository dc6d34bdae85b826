//! Config file maintenance: detect and backfill keys added after the
//! config file was first written.

use crate::errors::{AppError, AppResult};
use crate::ui::messages::{info, success};
use serde_yaml::Value;
use std::fs;

const EXPECTED_KEYS: &[(&str, &str)] = &[
    ("database", ""),
    ("avg_speed_mph", "60.0"),
    ("warn_drive", "1h"),
    ("warn_duty", "2h"),
    ("warn_weekly", "5h"),
];

/// Return the expected keys missing from the config file on disk.
pub fn missing_fields() -> AppResult<Vec<&'static str>> {
    let path = super::Config::config_file();
    if !path.exists() {
        return Ok(EXPECTED_KEYS.iter().map(|(k, _)| *k).collect());
    }

    let content = fs::read_to_string(&path)?;
    let yaml: Value =
        serde_yaml::from_str(&content).map_err(|e| AppError::Config(e.to_string()))?;

    let map = match yaml.as_mapping() {
        Some(m) => m,
        None => return Ok(EXPECTED_KEYS.iter().map(|(k, _)| *k).collect()),
    };

    Ok(EXPECTED_KEYS
        .iter()
        .filter(|(k, _)| !map.contains_key(Value::String((*k).to_string())))
        .map(|(k, _)| *k)
        .collect())
}

/// Add any missing keys with their default values, preserving the rest of
/// the file. No-op when the file is already complete.
pub fn migrate_missing_fields() -> AppResult<()> {
    let path = super::Config::config_file();
    if !path.exists() {
        info("No config file found; run `eldlog init` first.");
        return Ok(());
    }

    let content = fs::read_to_string(&path)?;
    let mut yaml: Value =
        serde_yaml::from_str(&content).map_err(|e| AppError::Config(e.to_string()))?;

    let map = yaml
        .as_mapping_mut()
        .ok_or_else(|| AppError::Config("config file is not a YAML mapping".into()))?;

    let mut added = Vec::new();
    for (key, default) in EXPECTED_KEYS {
        let k = Value::String((*key).to_string());
        if map.contains_key(&k) {
            continue;
        }

        let value = match *key {
            "database" => Value::String(
                super::Config::database_file().to_string_lossy().to_string(),
            ),
            "avg_speed_mph" => Value::Number(serde_yaml::Number::from(
                default.parse::<f64>().unwrap_or(60.0),
            )),
            _ => Value::String((*default).to_string()),
        };

        map.insert(k, value);
        added.push(*key);
    }

    if added.is_empty() {
        success("Config file is up to date.");
        return Ok(());
    }

    let serialized =
        serde_yaml::to_string(&yaml).map_err(|e| AppError::Config(e.to_string()))?;
    fs::write(&path, serialized)?;

    success(format!("Added missing config keys: {}", added.join(", ")));
    Ok(())
}

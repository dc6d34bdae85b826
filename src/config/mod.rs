use crate::core::detector::WarningMargins;
use crate::utils::time::parse_duration_str;
use serde::{Deserialize, Serialize};
use std::fs;
use std::io::{self, Write};
use std::path::PathBuf;

pub mod migrate; // use submodule at src/config/migrate.rs

#[derive(Debug, Serialize, Deserialize)]
pub struct Config {
    pub database: String,
    /// Average highway speed assumed by the trip planner, mph.
    #[serde(default = "default_avg_speed")]
    pub avg_speed_mph: f64,
    /// Soft-warning margins ("1h", "30m", "1h30m").
    #[serde(default = "default_warn_drive")]
    pub warn_drive: String,
    #[serde(default = "default_warn_duty")]
    pub warn_duty: String,
    #[serde(default = "default_warn_weekly")]
    pub warn_weekly: String,
}

fn default_avg_speed() -> f64 {
    60.0
}
fn default_warn_drive() -> String {
    "1h".to_string()
}
fn default_warn_duty() -> String {
    "2h".to_string()
}
fn default_warn_weekly() -> String {
    "5h".to_string()
}

impl Default for Config {
    fn default() -> Self {
        let db_path = Self::database_file();
        Self {
            database: db_path.to_string_lossy().to_string(),
            avg_speed_mph: default_avg_speed(),
            warn_drive: default_warn_drive(),
            warn_duty: default_warn_duty(),
            warn_weekly: default_warn_weekly(),
        }
    }
}

impl Config {
    /// Return the standard configuration directory depending on the platform
    pub fn config_dir() -> PathBuf {
        if cfg!(target_os = "windows") {
            let appdata = std::env::var("APPDATA").unwrap_or_else(|_| ".".to_string());
            PathBuf::from(appdata).join("eldlog")
        } else {
            let home = dirs::home_dir().unwrap_or_else(|| PathBuf::from("."));
            home.join(".eldlog")
        }
    }

    /// Return the full path of the config file
    pub fn config_file() -> PathBuf {
        Self::config_dir().join("eldlog.conf")
    }

    /// Return the full path of the SQLite database
    pub fn database_file() -> PathBuf {
        Self::config_dir().join("eldlog.sqlite")
    }

    /// Load configuration from file, or return defaults if not found
    pub fn load() -> Self {
        let path = Self::config_file();

        if path.exists() {
            match fs::read_to_string(&path) {
                Ok(content) => serde_yaml::from_str(&content).unwrap_or_default(),
                Err(_) => Config::default(),
            }
        } else {
            Config::default()
        }
    }

    /// Warning margins parsed from the config strings; malformed values
    /// fall back to the built-in margins rather than failing the command.
    pub fn warning_margins(&self) -> WarningMargins {
        let defaults = WarningMargins::default();
        WarningMargins {
            drive: parse_duration_str(&self.warn_drive).unwrap_or(defaults.drive),
            duty: parse_duration_str(&self.warn_duty).unwrap_or(defaults.duty),
            weekly: parse_duration_str(&self.warn_weekly).unwrap_or(defaults.weekly),
        }
    }

    /// Initialize configuration and database files
    pub fn init_all(custom_name: Option<String>, is_test: bool) -> io::Result<()> {
        let dir = Self::config_dir();
        fs::create_dir_all(&dir)?;

        // DB name: user provided or default
        let db_path = if let Some(name) = custom_name {
            let p = std::path::Path::new(&name);
            if p.is_absolute() {
                p.to_path_buf()
            } else {
                dir.join(p)
            }
        } else {
            Self::database_file()
        };

        let config = Config {
            database: db_path.to_string_lossy().to_string(),
            ..Config::default()
        };

        // Write config file
        if !is_test {
            let yaml = serde_yaml::to_string(&config)
                .map_err(|e| io::Error::other(format!("serialize config: {e}")))?;
            let mut file = fs::File::create(Self::config_file())?;
            file.write_all(yaml.as_bytes())?;
            println!("✅ Config file: {:?}", Self::config_file());
        }

        // Create empty DB file if not exists
        if !db_path.exists() {
            fs::File::create(&db_path)?;
        }

        println!("✅ Database:    {:?}", db_path);

        Ok(())
    }
}

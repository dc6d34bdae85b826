use crate::cli::parser::Commands;
use crate::config::{Config, migrate};
use crate::errors::AppResult;
use crate::ui::messages::{info, success, warning};
use std::fs;

pub fn handle(cmd: &Commands, _cfg: &Config) -> AppResult<()> {
    if let Commands::Config {
        print_config,
        check,
        migrate: do_migrate,
    } = cmd
    {
        if *print_config {
            let path = Config::config_file();
            if path.exists() {
                println!("{}", fs::read_to_string(&path)?);
            } else {
                info(format!("No config file at {:?}; defaults are in effect.", path));
            }
        }

        if *check {
            let missing = migrate::missing_fields()?;
            if missing.is_empty() {
                success("Config file is complete.");
            } else {
                warning(format!("Missing config keys: {}", missing.join(", ")));
                info("Run `eldlog config --migrate` to add them with defaults.");
            }
        }

        if *do_migrate {
            migrate::migrate_missing_fields()?;
        }
    }
    Ok(())
}

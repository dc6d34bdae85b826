use crate::cli::parser::Commands;
use crate::config::Config;
use crate::db::pool::DbPool;
use crate::db::queries::{insert_driver, list_drivers};
use crate::errors::{AppError, AppResult};
use crate::ui::messages::success;
use crate::utils::table::Table;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Driver {
        add,
        name,
        license,
        list,
    } = cmd
    {
        let pool = DbPool::new(&cfg.database)?;

        if *add {
            let name = name
                .as_deref()
                .ok_or_else(|| AppError::Validation("--add requires --name".into()))?;
            let license = license
                .as_deref()
                .ok_or_else(|| AppError::Validation("--add requires --license".into()))?;

            let driver = insert_driver(&pool.conn, name, license)?;
            success(format!(
                "Registered driver #{}: {} ({})",
                driver.id, driver.name, driver.license_number
            ));
        }

        if *list {
            let drivers = list_drivers(&pool.conn)?;
            if drivers.is_empty() {
                println!("No drivers registered.");
                return Ok(());
            }

            let mut table = Table::new(&["ID", "NAME", "LICENSE", "SINCE"]);
            for d in drivers {
                table.add_row(vec![
                    d.id.to_string(),
                    d.name,
                    d.license_number,
                    d.created_at,
                ]);
            }
            print!("{}", table.render());
        }
    }
    Ok(())
}

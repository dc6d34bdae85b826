use crate::cli::parser::Commands;
use crate::config::Config;
use crate::db::pool::DbPool;
use crate::errors::AppResult;
use crate::export::run_export;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Export {
        format,
        file,
        driver,
        days,
        force,
    } = cmd
    {
        let mut pool = DbPool::new(&cfg.database)?;
        run_export(&mut pool, driver, format, file, *days, *force)?;
    }
    Ok(())
}

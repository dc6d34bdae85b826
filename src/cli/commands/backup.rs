use crate::cli::parser::Commands;
use crate::config::Config;
use crate::errors::AppResult;
use crate::ui::messages::{success, warning};
use flate2::Compression;
use flate2::write::GzEncoder;
use rusqlite::Connection;
use std::fs;
use std::io::{Write, stdin, stdout};
use std::path::{Path, PathBuf};

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Backup { file, compress } = cmd {
        backup(cfg, file, *compress)?;
    }
    Ok(())
}

fn backup(cfg: &Config, dest_file: &str, compress: bool) -> AppResult<()> {
    let src = Path::new(&cfg.database);
    let dest = Path::new(dest_file);

    if !src.exists() {
        return Err(std::io::Error::new(
            std::io::ErrorKind::NotFound,
            format!("Database not found: {}", src.display()),
        )
        .into());
    }

    if let Some(parent) = dest.parent() {
        fs::create_dir_all(parent)?;
    }

    // Existing destination requires explicit confirmation.
    if dest.exists() {
        warning(format!(
            "The file '{}' already exists. Overwrite it? [y/N]:",
            dest.display()
        ));

        let mut answer = String::new();
        print!("> ");
        stdout().flush().ok();
        stdin().read_line(&mut answer)?;

        let answer = answer.trim().to_lowercase();
        if !(answer == "y" || answer == "yes") {
            println!("Backup cancelled.");
            return Ok(());
        }
    }

    fs::copy(src, dest)?;

    let final_path = if compress {
        let gz_path = compress_backup(dest)?;
        if let Err(e) = fs::remove_file(dest) {
            warning(format!("Failed to remove uncompressed backup: {}", e));
        }
        gz_path
    } else {
        dest.to_path_buf()
    };

    success(format!("Backup created: {}", final_path.display()));

    // Leave a trace in the audit log.
    if let Ok(conn) = Connection::open(src) {
        let _ = crate::db::log::record(
            &conn,
            "backup",
            &final_path.to_string_lossy(),
            if compress {
                "Backup created and compressed"
            } else {
                "Backup created"
            },
        );
    }

    Ok(())
}

/// Compress a backup in place to `<file>.gz`.
fn compress_backup(path: &Path) -> AppResult<PathBuf> {
    let gz_path = PathBuf::from(format!("{}.gz", path.display()));

    let mut input = fs::File::open(path)?;
    let output = fs::File::create(&gz_path)?;
    let mut encoder = GzEncoder::new(output, Compression::default());

    std::io::copy(&mut input, &mut encoder)?;
    encoder.finish()?;

    Ok(gz_path)
}

use crate::config::Config;
use crate::db::log::{AuditOp, ttlog};
use crate::db::pool::DbPool;
use crate::errors::{AppError, AppResult};
use crate::ui::messages::{info, success, warning};
use crate::utils::path::absolute_output_path;
use chrono::{DateTime, Utc};
use flate2::Compression;
use flate2::write::GzEncoder;
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use zip::ZipWriter;
use zip::write::FileOptions;

pub struct BackupLogic;

impl BackupLogic {
    /// Copy the database file to `dest_file`, optionally compressing it.
    /// Returns the path of the file actually written.
    pub fn backup(
        pool: &mut DbPool,
        cfg: &Config,
        dest_file: &str,
        compress: bool,
        now: DateTime<Utc>,
    ) -> AppResult<Option<PathBuf>> {
        let src = Path::new(&cfg.database);
        let dest = absolute_output_path(dest_file)?;

        if !src.exists() {
            return Err(io::Error::new(
                io::ErrorKind::NotFound,
                format!("Database not found: {}", src.display()),
            )
            .into());
        }

        if let Some(parent) = dest.parent() {
            fs::create_dir_all(parent)?;
        }

        if dest.exists() && !confirm_overwrite(&dest)? {
            warning("Backup cancelled by user.");
            return Ok(None);
        }

        fs::copy(src, &dest)?;

        let final_path = if compress {
            let compressed = compress_backup(&dest)?;
            if compressed != dest
                && let Err(e) = fs::remove_file(&dest)
            {
                warning(format!("Failed to remove uncompressed backup: {}", e));
            }
            compressed
        } else {
            dest
        };

        success(format!("Backup created: {}", final_path.display()));

        ttlog(
            &pool.conn,
            &now,
            AuditOp::Backup,
            &final_path.to_string_lossy(),
            if compress {
                "Backup created and compressed"
            } else {
                "Backup created"
            },
        )?;

        Ok(Some(final_path))
    }
}

fn confirm_overwrite(dest: &Path) -> AppResult<bool> {
    warning(format!(
        "The file '{}' already exists. Overwrite it? [y/N]",
        dest.display()
    ));
    print!("> ");
    io::stdout().flush()?;

    let mut answer = String::new();
    io::stdin().read_line(&mut answer)?;
    let answer = answer.trim().to_lowercase();
    Ok(answer == "y" || answer == "yes")
}

/// `.zip` on Windows, `.tar.gz` elsewhere.
fn compress_backup(path: &Path) -> AppResult<PathBuf> {
    if cfg!(target_os = "windows") {
        let zip_path = path.with_extension("zip");
        zip_file(path, &zip_path)?;
        info(format!("Compressed: {}", zip_path.display()));
        Ok(zip_path)
    } else {
        let gz_path = PathBuf::from(format!("{}.tar.gz", path.display()));
        tar_gz_file(path, &gz_path)?;
        info(format!("Compressed: {}", gz_path.display()));
        Ok(gz_path)
    }
}

fn entry_name(src: &Path) -> AppResult<String> {
    src.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .ok_or_else(|| AppError::Other(format!("not a file: {}", src.display())))
}

/// Store `src` as the single deflated member of a new zip archive.
pub fn zip_file(src: &Path, dest: &Path) -> AppResult<()> {
    let name = entry_name(src)?;
    let file = fs::File::create(dest)?;
    let mut zip = ZipWriter::new(file);

    let options: FileOptions<'_, ()> =
        FileOptions::default().compression_method(zip::CompressionMethod::Deflated);

    zip.start_file(name, options).map_err(io::Error::other)?;
    let mut f = fs::File::open(src)?;
    io::copy(&mut f, &mut zip)?;
    zip.finish().map_err(io::Error::other)?;
    Ok(())
}

pub fn tar_gz_file(src: &Path, dest: &Path) -> AppResult<()> {
    let name = entry_name(src)?;
    let file = fs::File::create(dest)?;
    let encoder = GzEncoder::new(file, Compression::default());
    let mut archive = tar::Builder::new(encoder);

    archive.append_path_with_name(src, name)?;
    archive.into_inner()?.finish()?;
    Ok(())
}

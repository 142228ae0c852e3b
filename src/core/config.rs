use crate::config::Config;
use crate::config::migrate::{migrate_config_file, missing_keys};
use crate::errors::{AppError, AppResult};
use crate::ui::messages::{info, success, warning};
use std::path::Path;
use std::process::Command;

pub struct ConfigLogic;

fn default_editor() -> String {
    std::env::var("EDITOR")
        .or_else(|_| std::env::var("VISUAL"))
        .unwrap_or_else(|_| {
            if cfg!(target_os = "windows") {
                "notepad".to_string()
            } else {
                "nano".to_string()
            }
        })
}

impl ConfigLogic {
    /// Print the effective configuration (file values merged with defaults).
    pub fn print(cfg: &Config) -> AppResult<()> {
        let yaml = serde_yaml::to_string(cfg).map_err(|e| AppError::Config(e.to_string()))?;
        println!("📄 Current configuration:\n");
        println!("{}", yaml);
        Ok(())
    }

    /// Report keys missing from the file and validate the values that need parsing.
    pub fn check(path: &Path, cfg: &Config) -> AppResult<()> {
        if !path.exists() {
            warning(format!(
                "No configuration file at {} (defaults in use). Run `init` to create one.",
                path.display()
            ));
        } else {
            let missing = missing_keys(path)?;
            if missing.is_empty() {
                success("All configuration keys are present.");
            } else {
                warning(format!(
                    "Missing keys: {} (run `config --migrate`)",
                    missing.join(", ")
                ));
            }
        }

        cfg.weekly_target_ms()
            .map_err(|e| AppError::Config(format!("weekly_target: {}", e)))?;
        success(format!("weekly_target = {}", cfg.weekly_target));
        Ok(())
    }

    pub fn migrate(path: &Path) -> AppResult<Vec<String>> {
        if !path.exists() {
            info(format!("No configuration file at {}", path.display()));
            return Ok(Vec::new());
        }
        migrate_config_file(path)
    }

    /// Open the config file in `editor`, falling back to `$EDITOR`/`$VISUAL`.
    pub fn edit(path: &Path, editor: Option<&str>) -> AppResult<()> {
        let fallback = default_editor();
        let requested = editor.map(str::to_string).unwrap_or_else(|| fallback.clone());

        match Command::new(&requested).arg(path).status() {
            Ok(s) if s.success() => {
                success(format!("Configuration file edited using '{}'", requested));
                return Ok(());
            }
            _ => warning(format!(
                "Editor '{}' not available, falling back to '{}'",
                requested, fallback
            )),
        }

        match Command::new(&fallback).arg(path).status() {
            Ok(s) if s.success() => {
                success(format!("Configuration file edited using '{}'", fallback));
                Ok(())
            }
            Ok(s) => Err(AppError::Config(format!("editor '{}' exited with {}", fallback, s))),
            Err(e) => Err(AppError::Config(format!("cannot run '{}': {}", fallback, e))),
        }
    }
}

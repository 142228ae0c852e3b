//! Configuration file upgrades.
//!
//! Older config files lack keys added in later releases. `missing_keys`
//! reports them, `migrate_config_file` fills them with their defaults while
//! leaving every value already present untouched.

use super::Config;
use crate::errors::{AppError, AppResult};
use crate::ui::messages::{info, success};
use serde_yaml::{Mapping, Value};
use std::fs;
use std::path::Path;

const SHOW_WEEKDAY_DOC: &str = "  # show_weekday options:\n\
                                #   None   → do not show weekday\n\
                                #   Short  → Mo, Tu, We, Th, Fr, Sa, Su\n\
                                #   Medium → Mon, Tue, Wed, Thu, Fri, Sat, Sun\n\
                                #   Long   → Monday, Tuesday, ...\n";

const PERIOD_MATCH_DOC: &str = "  # period_match options:\n\
                                #   exact         → timesheet period must equal the week instant-for-instant\n\
                                #   calendar_date → compare only the calendar dates of the period bounds\n";

/// Every key a current config file is expected to carry, with its default.
fn expected_keys() -> AppResult<Mapping> {
    let defaults = serde_yaml::to_value(Config::default())
        .map_err(|e| AppError::Config(format!("cannot serialize defaults: {e}")))?;

    match defaults {
        Value::Mapping(m) => Ok(m),
        _ => Err(AppError::Config("defaults are not a mapping".into())),
    }
}

fn read_mapping(path: &Path) -> AppResult<Mapping> {
    let content = fs::read_to_string(path).map_err(|_| AppError::ConfigLoad)?;
    match serde_yaml::from_str::<Value>(&content) {
        Ok(Value::Mapping(m)) => Ok(m),
        Ok(Value::Null) => Ok(Mapping::new()),
        Ok(_) => Err(AppError::Config(format!("{} is not a YAML mapping", path.display()))),
        Err(e) => Err(AppError::Config(format!("{}: {}", path.display(), e))),
    }
}

/// Keys missing from the config file at `path`.
pub fn missing_keys(path: &Path) -> AppResult<Vec<String>> {
    let current = read_mapping(path)?;
    let expected = expected_keys()?;

    Ok(expected
        .keys()
        .filter(|k| !current.contains_key(*k))
        .filter_map(|k| k.as_str().map(str::to_string))
        .collect())
}

/// Add missing keys with their default values. Returns the keys that were added.
pub fn migrate_config_file(path: &Path) -> AppResult<Vec<String>> {
    let mut current = read_mapping(path)?;
    let expected = expected_keys()?;

    let mut added = Vec::new();
    for (k, v) in expected.iter() {
        if !current.contains_key(k) {
            current.insert(k.clone(), v.clone());
            if let Some(name) = k.as_str() {
                added.push(name.to_string());
            }
        }
    }

    if added.is_empty() {
        info("Configuration is up to date.");
        return Ok(added);
    }

    let serialized = serde_yaml::to_string(&Value::Mapping(current))
        .map_err(|_| AppError::ConfigSave)?;

    // Inject documentation comments right after the documented keys
    let mut new_content = String::new();
    for line in serialized.lines() {
        new_content.push_str(line);
        new_content.push('\n');

        if line.starts_with("show_weekday:") && added.iter().any(|k| k == "show_weekday") {
            new_content.push_str(SHOW_WEEKDAY_DOC);
        }
        if line.starts_with("period_match:") && added.iter().any(|k| k == "period_match") {
            new_content.push_str(PERIOD_MATCH_DOC);
        }
    }

    fs::write(path, new_content).map_err(|_| AppError::ConfigSave)?;

    success(format!("Configuration migrated: added {}", added.join(", ")));
    Ok(added)
}

use crate::error::{DumpscopeError, Result};
use crate::types::config::DumpscopeConfig;
use std::path::{Path, PathBuf};
use toml::map::Map;
use toml::Value;

pub const DEFAULT_CONFIG_FILE: &str = "dumpscope.toml";
pub const DEFAULT_GLOBAL_CONFIG_FILE: &str = ".config/dumpscope/config.toml";

/// Load configuration for a dump at `dump_path`, layering the global file,
/// `dumpscope.toml` next to the dump, then an explicit `--config` file.
pub fn load_config(dump_path: &Path, explicit: Option<&Path>) -> Result<DumpscopeConfig> {
    let global = std::env::var_os("HOME")
        .map(PathBuf::from)
        .map(|home| home.join(DEFAULT_GLOBAL_CONFIG_FILE));
    load_config_with_global(dump_path, explicit, global.as_deref())
}

pub(crate) fn load_config_with_global(
    dump_path: &Path,
    explicit: Option<&Path>,
    global_path: Option<&Path>,
) -> Result<DumpscopeConfig> {
    let dump_dir = if dump_path.is_dir() {
        Some(dump_path)
    } else {
        dump_path.parent()
    };

    let mut merged = Value::Table(Map::new());
    if let Some(path) = global_path {
        merge_file_if_exists(&mut merged, path)?;
    }
    if let Some(dir) = dump_dir {
        merge_file_if_exists(&mut merged, &dir.join(DEFAULT_CONFIG_FILE))?;
    }
    if let Some(path) = explicit {
        if !path.exists() {
            return Err(DumpscopeError::PathNotFound(path.display().to_string()));
        }
        merge_file_if_exists(&mut merged, path)?;
    }

    let cfg: DumpscopeConfig = merged.try_into()?;
    Ok(cfg)
}

fn merge_file_if_exists(merged: &mut Value, path: &Path) -> Result<()> {
    if !path.exists() {
        return Ok(());
    }
    tracing::debug!(path = %path.display(), "merging config layer");
    let value = read_toml_value(path)?;
    merge_toml(merged, value);
    Ok(())
}

fn read_toml_value(path: &Path) -> Result<Value> {
    let content = std::fs::read_to_string(path)?;
    toml::from_str(&content)
        .map_err(|e| DumpscopeError::ConfigParse(format!("{}: {}", path.display(), e)))
}

fn merge_toml(base: &mut Value, overlay: Value) {
    match (base, overlay) {
        (Value::Table(base_table), Value::Table(overlay_table)) => {
            for (key, value) in overlay_table {
                match base_table.get_mut(&key) {
                    Some(existing) => merge_toml(existing, value),
                    None => {
                        base_table.insert(key, value);
                    }
                }
            }
        }
        (slot, value) => {
            *slot = value;
        }
    }
}

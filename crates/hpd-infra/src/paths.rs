//! XDG locations.

use std::path::PathBuf;

use anyhow::anyhow;

fn xdg_dir(var: &str, fallback: &str) -> anyhow::Result<PathBuf> {
    if let Some(v) = std::env::var_os(var).filter(|v| !v.is_empty()) {
        return Ok(PathBuf::from(v));
    }
    let home = std::env::var_os("HOME").ok_or_else(|| anyhow!("HOME not set"))?;
    Ok(PathBuf::from(home).join(fallback))
}

pub fn config_home() -> anyhow::Result<PathBuf> {
    xdg_dir("XDG_CONFIG_HOME", ".config")
}

pub fn state_home() -> anyhow::Result<PathBuf> {
    xdg_dir("XDG_STATE_HOME", ".local/state")
}

/// `$XDG_CONFIG_HOME/hpd/hpd.conf`.
pub fn default_config_path() -> anyhow::Result<PathBuf> {
    Ok(config_home()?.join("hpd").join("hpd.conf"))
}

pub fn log_file_path() -> anyhow::Result<PathBuf> {
    Ok(state_home()?.join("hpd").join("hpd.log"))
}

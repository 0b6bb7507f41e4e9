//! Wallpaper backends.
//!
//! Each backend shells out to the desktop's own tool. A spawn error or a
//! non-zero exit status is reported as an error; the rotation loop logs it and
//! moves on.

use std::path::Path;
use std::process::Command;

use anyhow::{Context, anyhow};

use hpd_core::WallpaperSetter;

use crate::env_detect::{DesktopKind, detect_desktop};

mod gnome;
mod hyprland;
mod kde;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Backend {
    /// Pick from the running desktop, Hyprland otherwise.
    #[default]
    Auto,
    Hyprland,
    Gnome,
    Kde,
}

impl Backend {
    /// Replaces `Auto` with a concrete backend.
    pub fn resolve(self) -> Self {
        match self {
            Self::Auto => match detect_desktop() {
                DesktopKind::Gnome => Self::Gnome,
                DesktopKind::Kde => Self::Kde,
                DesktopKind::Hyprland | DesktopKind::Other => Self::Hyprland,
            },
            concrete => concrete,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::Auto => "auto",
            Self::Hyprland => "hyprland",
            Self::Gnome => "gnome",
            Self::Kde => "kde",
        }
    }
}

impl WallpaperSetter for Backend {
    fn apply(&self, path: &Path) -> anyhow::Result<()> {
        match self.resolve() {
            Self::Gnome => gnome::set_wallpaper(path).context("GNOME wallpaper"),
            Self::Kde => kde::set_wallpaper(path).context("KDE wallpaper"),
            Self::Hyprland | Self::Auto => {
                hyprland::set_wallpaper(path).context("Hyprland wallpaper")
            }
        }
    }
}

fn run(cmd: &mut Command) -> anyhow::Result<()> {
    let program = cmd.get_program().to_string_lossy().into_owned();
    let status = cmd
        .status()
        .with_context(|| format!("run {program}"))?;
    if !status.success() {
        return Err(anyhow!("{program} failed ({status})"));
    }
    Ok(())
}

fn file_uri(path: &Path) -> anyhow::Result<String> {
    let abs = std::path::absolute(path).with_context(|| format!("absolute {path:?}"))?;
    let s = abs
        .to_str()
        .ok_or_else(|| anyhow!("path is not valid UTF-8"))?;
    Ok(format!("file://{s}"))
}

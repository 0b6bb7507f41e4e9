use std::path::Path;
use std::process::Command;

/// `hyprctl hyprpaper set <path>`; hyprpaper must already be running.
pub fn set_wallpaper(path: &Path) -> anyhow::Result<()> {
    super::run(Command::new("hyprctl").args(["hyprpaper", "set"]).arg(path))
}

use std::path::Path;
use std::process::{Command, Stdio};

const SCHEMA: &str = "org.gnome.desktop.background";

fn gsettings(key: &str, value: &str) -> Command {
    let mut cmd = Command::new("gsettings");
    cmd.args(["set", SCHEMA, key, value]);
    cmd
}

pub fn set_wallpaper(path: &Path) -> anyhow::Result<()> {
    let uri = super::file_uri(path)?;

    super::run(&mut gsettings("picture-uri", &uri))?;

    // GNOME 42+ only; older versions reject the key.
    let dark = gsettings("picture-uri-dark", &uri)
        .stderr(Stdio::null())
        .status();
    if !dark.is_ok_and(|s| s.success()) {
        tracing::debug!("picture-uri-dark not set");
    }

    Ok(())
}

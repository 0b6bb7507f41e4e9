use std::path::Path;
use std::process::{Command, Stdio};

use anyhow::anyhow;

fn find_qdbus() -> Option<&'static str> {
    // Plasma 6 ships qdbus6, Plasma 5 qdbus.
    ["qdbus6", "qdbus"].into_iter().find(|exe| {
        Command::new(exe)
            .arg("--version")
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status()
            .is_ok()
    })
}

fn plasma_script(uri: &str) -> String {
    format!(
        "desktops().forEach(function (d) {{\n\
           d.wallpaperPlugin = 'org.kde.image';\n\
           d.currentConfigGroup = ['Wallpaper', 'org.kde.image', 'General'];\n\
           d.writeConfig('Image', '{uri}');\n\
         }});\n"
    )
}

pub fn set_wallpaper(path: &Path) -> anyhow::Result<()> {
    let qdbus = find_qdbus().ok_or_else(|| anyhow!("qdbus not found (qdbus6/qdbus)"))?;
    let uri = super::file_uri(path)?;

    super::run(
        Command::new(qdbus)
            .args([
                "org.kde.plasmashell",
                "/PlasmaShell",
                "org.kde.PlasmaShell.evaluateScript",
            ])
            .arg(plasma_script(&uri)),
    )
}

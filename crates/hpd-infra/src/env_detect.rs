//! Desktop detection.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DesktopKind {
    Hyprland,
    Gnome,
    Kde,
    Other,
}

pub fn detect_desktop() -> DesktopKind {
    if std::env::var_os("HYPRLAND_INSTANCE_SIGNATURE").is_some() {
        return DesktopKind::Hyprland;
    }

    let current = std::env::var("XDG_CURRENT_DESKTOP").unwrap_or_default();
    classify(&current)
}

/// `XDG_CURRENT_DESKTOP` is a colon-separated list, e.g. `ubuntu:GNOME`.
fn classify(current: &str) -> DesktopKind {
    for part in current.split(':') {
        match part.trim().to_ascii_lowercase().as_str() {
            "hyprland" => return DesktopKind::Hyprland,
            "gnome" => return DesktopKind::Gnome,
            "kde" => return DesktopKind::Kde,
            _ => {}
        }
    }
    DesktopKind::Other
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classifies_desktop_lists() {
        assert_eq!(classify("Hyprland"), DesktopKind::Hyprland);
        assert_eq!(classify("ubuntu:GNOME"), DesktopKind::Gnome);
        assert_eq!(classify("KDE"), DesktopKind::Kde);
        assert_eq!(classify("sway"), DesktopKind::Other);
        assert_eq!(classify(""), DesktopKind::Other);
    }
}

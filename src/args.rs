//! CLI argument definitions.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

use hpd_infra::wallpaper::Backend;

#[derive(Debug, Parser)]
#[command(name = "hpd")]
#[command(about = "Rotate wallpapers on an interval, reload config on SIGHUP", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub cmd: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Start the rotation daemon.
    Run {
        #[command(flatten)]
        config: ConfigArg,

        /// Tool used to apply wallpapers.
        #[arg(long, value_enum, default_value_t = BackendArg::Auto)]
        backend: BackendArg,

        /// Stay attached to the terminal (use under a service manager).
        #[arg(long)]
        foreground: bool,
    },

    /// Ask the running daemon to re-read its config.
    Reload,

    /// Check if the daemon is running.
    Status,

    /// Parse the config and print what the daemon would rotate through.
    Check {
        #[command(flatten)]
        config: ConfigArg,
    },
}

#[derive(Debug, Args)]
pub struct ConfigArg {
    /// Config file (default: $XDG_CONFIG_HOME/hpd/hpd.conf).
    #[arg(long, short, env = "HPD_CONFIG")]
    pub config: Option<PathBuf>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum BackendArg {
    Auto,
    Hyprland,
    Gnome,
    Kde,
}

impl From<BackendArg> for Backend {
    fn from(arg: BackendArg) -> Self {
        match arg {
            BackendArg::Auto => Self::Auto,
            BackendArg::Hyprland => Self::Hyprland,
            BackendArg::Gnome => Self::Gnome,
            BackendArg::Kde => Self::Kde,
        }
    }
}

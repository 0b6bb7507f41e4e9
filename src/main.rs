mod args;
mod output;

use std::ffi::OsString;
use std::path::PathBuf;

use anyhow::Context;
use tracing::info;

use hpd_core::{ConfigStore, ReloadSignal, RotationController, ThreadSleeper};
use hpd_infra::wallpaper::Backend;

fn main() {
    output::init_logging();

    if let Err(err) = real_main() {
        output::print_error(&err);
        std::process::exit(1);
    }
}

fn real_main() -> anyhow::Result<()> {
    use clap::Parser as _;

    let cli = args::Cli::parse();

    match cli.cmd {
        args::Command::Run {
            config,
            backend,
            foreground,
        } => run(config.config, backend.into(), foreground),
        args::Command::Reload => {
            println!("{}", hpd_infra::ipc::client::reload()?);
            Ok(())
        }
        args::Command::Status => {
            println!("{}", hpd_infra::ipc::client::status()?);
            Ok(())
        }
        args::Command::Check { config } => check(config.config),
    }
}

fn config_path(arg: Option<PathBuf>) -> anyhow::Result<PathBuf> {
    let path = match arg {
        Some(p) => p,
        None => hpd_infra::paths::default_config_path()?,
    };
    std::path::absolute(&path).with_context(|| format!("resolve {path:?}"))
}

fn run(config: Option<PathBuf>, backend: Backend, foreground: bool) -> anyhow::Result<()> {
    let path = config_path(config)?;

    if !foreground {
        // Fail in the terminal, not in the log file.
        ConfigStore::new(&path).load()?;

        let args: [OsString; 5] = [
            "run".into(),
            "--config".into(),
            path.into_os_string(),
            "--backend".into(),
            backend.name().into(),
        ];
        let pid = hpd_infra::daemon::detach(args)?;
        info!(pid, "daemon started");
        return Ok(());
    }

    let signal = ReloadSignal::new();
    hpd_infra::signals::register_reload(&signal)?;

    let backend = backend.resolve();
    let mut controller =
        RotationController::start(ConfigStore::new(&path), backend, ThreadSleeper, signal.clone())?;

    // Reload still works through SIGHUP without the socket.
    if let Err(err) = hpd_infra::ipc::server::spawn(signal) {
        tracing::warn!("control socket unavailable: {err:#}");
    }

    info!(backend = backend.name(), "rotating wallpapers");
    controller.run()
}

fn check(config: Option<PathBuf>) -> anyhow::Result<()> {
    let path = config_path(config)?;
    let config = ConfigStore::new(&path).load()?;

    println!("config: {}", path.display());
    println!("interval: {}s", config.interval().as_secs());
    println!("wallpapers: {}", config.wallpapers().len());
    for (i, p) in config.wallpapers().iter().enumerate() {
        println!("  {i:>4}  {}", p.display());
    }
    Ok(())
}

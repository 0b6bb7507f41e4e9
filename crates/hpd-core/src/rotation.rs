//! Rotation control loop.
//!
//! Each tick runs, in order: reload check, select + apply, wait.
//! Only this loop touches the configuration and the cursor; the outside world
//! reaches in through [`ReloadSignal`] alone.

use std::path::{Path, PathBuf};
use std::time::Duration;

use tracing::{debug, info, warn};

use crate::config::{ConfigError, ConfigStore, Configuration};
use crate::reload::ReloadSignal;

/// Applies a wallpaper. Best-effort from the loop's point of view.
pub trait WallpaperSetter {
    fn apply(&self, path: &Path) -> anyhow::Result<()>;
}

impl<T: WallpaperSetter + ?Sized> WallpaperSetter for Box<T> {
    fn apply(&self, path: &Path) -> anyhow::Result<()> {
        (**self).apply(path)
    }
}

pub trait Sleeper {
    fn sleep(&self, duration: Duration);
}

#[derive(Debug, Clone, Copy, Default)]
pub struct ThreadSleeper;

impl Sleeper for ThreadSleeper {
    fn sleep(&self, duration: Duration) {
        std::thread::sleep(duration);
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReloadOutcome {
    NotRequested,
    Reloaded,
    /// Previous configuration kept.
    Failed,
}

/// What a single [`RotationController::step`] did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TickReport {
    pub reload: ReloadOutcome,
    pub applied: Option<PathBuf>,
    pub apply_failed: bool,
}

pub struct RotationController<S, Z = ThreadSleeper> {
    store: ConfigStore,
    setter: S,
    sleeper: Z,
    signal: ReloadSignal,
    config: Configuration,
    current_index: usize,
}

impl<S: WallpaperSetter, Z: Sleeper> RotationController<S, Z> {
    /// Loads the initial configuration. A missing source here is fatal.
    pub fn start(
        store: ConfigStore,
        setter: S,
        sleeper: Z,
        signal: ReloadSignal,
    ) -> Result<Self, ConfigError> {
        let config = store.load()?;
        info!(
            path = %store.path().display(),
            interval = config.interval().as_secs(),
            wallpapers = config.wallpapers().len(),
            "config loaded"
        );
        Ok(Self::with_config(store, setter, sleeper, signal, config))
    }

    pub fn with_config(
        store: ConfigStore,
        setter: S,
        sleeper: Z,
        signal: ReloadSignal,
        config: Configuration,
    ) -> Self {
        Self {
            store,
            setter,
            sleeper,
            signal,
            config,
            current_index: 0,
        }
    }

    pub fn config(&self) -> &Configuration {
        &self.config
    }

    pub fn current_index(&self) -> usize {
        self.current_index
    }

    pub fn signal(&self) -> &ReloadSignal {
        &self.signal
    }

    pub fn run(&mut self) -> ! {
        loop {
            self.tick();
        }
    }

    /// One full iteration, including the wait.
    pub fn tick(&mut self) -> TickReport {
        let report = self.step();
        // Read after a possible reload so a new interval applies right away.
        self.sleeper.sleep(self.config.interval());
        report
    }

    /// Reload check plus select/apply, without waiting.
    pub fn step(&mut self) -> TickReport {
        let reload = self.reload_if_pending();

        let Some(path) = self.select_next() else {
            return TickReport {
                reload,
                applied: None,
                apply_failed: false,
            };
        };

        let apply_failed = match self.setter.apply(&path) {
            Ok(()) => {
                debug!(path = %path.display(), "wallpaper applied");
                false
            }
            Err(err) => {
                warn!(path = %path.display(), "failed to apply wallpaper: {err:#}");
                true
            }
        };

        TickReport {
            reload,
            applied: Some(path),
            apply_failed,
        }
    }

    fn reload_if_pending(&mut self) -> ReloadOutcome {
        if !self.signal.take() {
            return ReloadOutcome::NotRequested;
        }

        match self.store.load() {
            Ok(config) => {
                info!(
                    interval = config.interval().as_secs(),
                    wallpapers = config.wallpapers().len(),
                    "config reloaded"
                );
                self.config = config;
                self.current_index = 0;
                ReloadOutcome::Reloaded
            }
            Err(err) => {
                warn!("reload failed, keeping previous config: {:#}", anyhow::Error::from(err));
                ReloadOutcome::Failed
            }
        }
    }

    /// Advances the cursor whenever something is selected, regardless of what
    /// happens to the apply afterwards.
    fn select_next(&mut self) -> Option<PathBuf> {
        let wallpapers = self.config.wallpapers();
        if wallpapers.is_empty() {
            return None;
        }
        let path = wallpapers[self.current_index].clone();
        self.current_index = (self.current_index + 1) % wallpapers.len();
        Some(path)
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use anyhow::anyhow;

    use super::*;

    #[derive(Default, Clone)]
    struct Recorder {
        applied: Rc<RefCell<Vec<PathBuf>>>,
        fail_on: Option<PathBuf>,
    }

    impl WallpaperSetter for Recorder {
        fn apply(&self, path: &Path) -> anyhow::Result<()> {
            self.applied.borrow_mut().push(path.to_path_buf());
            if self.fail_on.as_deref() == Some(path) {
                return Err(anyhow!("hyprctl exited with status 1"));
            }
            Ok(())
        }
    }

    #[derive(Default, Clone)]
    struct RecordingSleeper {
        waits: Rc<RefCell<Vec<Duration>>>,
    }

    impl Sleeper for RecordingSleeper {
        fn sleep(&self, duration: Duration) {
            self.waits.borrow_mut().push(duration);
        }
    }

    struct Harness {
        _dir: tempfile::TempDir,
        conf: PathBuf,
        applied: Rc<RefCell<Vec<PathBuf>>>,
        waits: Rc<RefCell<Vec<Duration>>>,
        ctl: RotationController<Recorder, RecordingSleeper>,
    }

    fn harness(text: &str, fail_on: Option<&str>) -> Harness {
        let dir = tempfile::tempdir().unwrap();
        let conf = dir.path().join("hpd.conf");
        std::fs::write(&conf, text).unwrap();

        let setter = Recorder {
            fail_on: fail_on.map(PathBuf::from),
            ..Recorder::default()
        };
        let sleeper = RecordingSleeper::default();
        let applied = Rc::clone(&setter.applied);
        let waits = Rc::clone(&sleeper.waits);

        let ctl = RotationController::start(
            ConfigStore::new(&conf),
            setter,
            sleeper,
            ReloadSignal::new(),
        )
        .unwrap();

        Harness {
            _dir: dir,
            conf,
            applied,
            waits,
            ctl,
        }
    }

    fn pb(items: &[&str]) -> Vec<PathBuf> {
        items.iter().map(PathBuf::from).collect()
    }

    #[test]
    fn ticks_cycle_through_list_and_wrap() {
        let mut h = harness("interval=5\n/a.png\n/b.png\n#comment\n/c.png\n", None);

        let selected: Vec<_> = (0..4).map(|_| h.ctl.tick().applied.unwrap()).collect();

        assert_eq!(selected, pb(&["/a.png", "/b.png", "/c.png", "/a.png"]));
        assert_eq!(*h.waits.borrow(), vec![Duration::from_secs(5); 4]);
    }

    #[test]
    fn full_cycle_visits_every_entry_once() {
        let mut h = harness("/1\n/2\n/3\n/2\n/5\n", None);
        for _ in 0..5 {
            h.ctl.step();
        }
        assert_eq!(*h.applied.borrow(), pb(&["/1", "/2", "/3", "/2", "/5"]));
        assert_eq!(h.ctl.current_index(), 0);
        assert_eq!(h.ctl.step().applied, Some(PathBuf::from("/1")));
    }

    #[test]
    fn successful_reload_restarts_from_first_entry() {
        let mut h = harness("/a\n/b\n/c\n", None);
        h.ctl.step();
        h.ctl.step();
        assert_eq!(h.ctl.current_index(), 2);

        std::fs::write(&h.conf, "interval=9\n/x\n/y\n").unwrap();
        h.ctl.signal().trigger();

        let report = h.ctl.tick();
        assert_eq!(report.reload, ReloadOutcome::Reloaded);
        assert_eq!(report.applied, Some(PathBuf::from("/x")));
        assert_eq!(h.ctl.config().wallpapers(), pb(&["/x", "/y"]));
        assert_eq!(h.waits.borrow().last(), Some(&Duration::from_secs(9)));
    }

    #[test]
    fn reload_removes_entries() {
        let mut h = harness("/a\n/b\n", None);
        std::fs::write(&h.conf, "/b\n").unwrap();
        h.ctl.signal().trigger();
        h.ctl.step();
        h.ctl.step();
        assert_eq!(*h.applied.borrow(), pb(&["/b", "/b"]));
    }

    #[test]
    fn failed_reload_keeps_config_and_position() {
        let mut h = harness("interval=3\n/a\n/b\n/c\n", None);
        h.ctl.step();
        let before = h.ctl.config().clone();
        assert_eq!(h.ctl.current_index(), 1);

        std::fs::remove_file(&h.conf).unwrap();
        h.ctl.signal().trigger();

        let report = h.ctl.step();
        assert_eq!(report.reload, ReloadOutcome::Failed);
        assert_eq!(report.applied, Some(PathBuf::from("/b")));
        assert_eq!(h.ctl.config(), &before);
        assert!(!h.ctl.signal().is_pending());
    }

    #[test]
    fn empty_list_never_applies() {
        let mut h = harness("interval=2\n# nothing here\n", None);
        for _ in 0..3 {
            let report = h.ctl.tick();
            assert_eq!(report.applied, None);
            assert!(!report.apply_failed);
        }
        assert!(h.applied.borrow().is_empty());
        assert_eq!(*h.waits.borrow(), vec![Duration::from_secs(2); 3]);
    }

    #[test]
    fn apply_failure_still_advances() {
        let mut h = harness("/bad\n/good\n", Some("/bad"));

        let first = h.ctl.step();
        assert!(first.apply_failed);
        assert_eq!(h.ctl.current_index(), 1);

        let second = h.ctl.step();
        assert!(!second.apply_failed);
        assert_eq!(second.applied, Some(PathBuf::from("/good")));
        // No retry within a tick.
        assert_eq!(*h.applied.borrow(), pb(&["/bad", "/good"]));
    }

    #[test]
    fn no_reload_without_trigger() {
        let mut h = harness("/a\n/b\n", None);
        std::fs::write(&h.conf, "/z\n").unwrap();
        assert_eq!(h.ctl.step().reload, ReloadOutcome::NotRequested);
        assert_eq!(h.ctl.step().applied, Some(PathBuf::from("/b")));
    }

    #[test]
    fn start_fails_without_source() {
        let dir = tempfile::tempdir().unwrap();
        let res = RotationController::start(
            ConfigStore::new(dir.path().join("missing.conf")),
            Recorder::default(),
            RecordingSleeper::default(),
            ReloadSignal::new(),
        );
        assert!(matches!(res, Err(ConfigError::SourceUnavailable { .. })));
    }
}

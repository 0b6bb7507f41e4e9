//! Line-oriented config parsing.
//!
//! ```text
//! # comment
//! interval=30
//! /home/me/walls/a.png
//! walls/b.png
//! ```
//!
//! Every parse starts from scratch: default interval, empty list.

use std::ffi::OsStr;
use std::io::{BufRead, BufReader};
use std::os::unix::ffi::OsStrExt;
use std::path::{Path, PathBuf};
use std::time::Duration;

use thiserror::Error;

pub const DEFAULT_INTERVAL: Duration = Duration::from_secs(60);

const INTERVAL_PREFIX: &[u8] = b"interval=";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("config source unavailable: {path}")]
    SourceUnavailable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Only produced while parsing `interval=`; recovered inside the parser.
    #[error("malformed interval: {0:?}")]
    MalformedInterval(String),
}

/// Resource bounds applied while parsing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Limits {
    pub max_wallpapers: usize,
    /// In bytes.
    pub max_path_len: usize,
}

impl Limits {
    pub const DEFAULT: Self = Self {
        max_wallpapers: 1024,
        max_path_len: 512,
    };
}

impl Default for Limits {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// Parsed configuration. Immutable; replaced wholesale on reload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Configuration {
    interval: Duration,
    wallpapers: Vec<PathBuf>,
}

impl Configuration {
    /// Fails with `None` on a zero interval.
    pub fn new(interval: Duration, wallpapers: Vec<PathBuf>) -> Option<Self> {
        if interval.is_zero() {
            return None;
        }
        Some(Self {
            interval,
            wallpapers,
        })
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Rotation order.
    pub fn wallpapers(&self) -> &[PathBuf] {
        &self.wallpapers
    }
}

impl Default for Configuration {
    fn default() -> Self {
        Self {
            interval: DEFAULT_INTERVAL,
            wallpapers: Vec::new(),
        }
    }
}

/// Knows where the config lives and how to turn it into a [`Configuration`].
#[derive(Debug, Clone)]
pub struct ConfigStore {
    path: PathBuf,
    limits: Limits,
}

impl ConfigStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            limits: Limits::DEFAULT,
        }
    }

    pub fn with_limits(mut self, limits: Limits) -> Self {
        self.limits = limits;
        self
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn limits(&self) -> Limits {
        self.limits
    }

    /// Reads and parses the well-known source.
    pub fn load(&self) -> Result<Configuration, ConfigError> {
        let file = std::fs::File::open(&self.path).map_err(|source| self.unavailable(source))?;
        self.parse(BufReader::new(file))
            .map_err(|source| self.unavailable(source))
    }

    pub fn parse_str(&self, text: &str) -> Configuration {
        // Reading from a byte slice cannot fail.
        self.parse(text.as_bytes()).unwrap_or_default()
    }

    pub fn parse<R: BufRead>(&self, mut reader: R) -> std::io::Result<Configuration> {
        let mut config = Configuration::default();
        let mut buf = Vec::new();

        loop {
            buf.clear();
            if reader.read_until(b'\n', &mut buf)? == 0 {
                break;
            }
            self.apply_line(&mut config, &buf);
        }

        Ok(config)
    }

    fn apply_line(&self, config: &mut Configuration, raw: &[u8]) {
        let line = raw.trim_ascii();
        if line.is_empty() || line[0] == b'#' {
            return;
        }

        if let Some(rest) = line.strip_prefix(INTERVAL_PREFIX) {
            config.interval = parse_interval(rest).unwrap_or_else(|err| {
                tracing::trace!("{err}, using default");
                DEFAULT_INTERVAL
            });
            return;
        }

        if line.len() > self.limits.max_path_len {
            tracing::trace!(len = line.len(), "skipping overlong path");
            return;
        }
        if config.wallpapers.len() >= self.limits.max_wallpapers {
            tracing::trace!(max = self.limits.max_wallpapers, "wallpaper list full");
            return;
        }

        config
            .wallpapers
            .push(PathBuf::from(OsStr::from_bytes(line)));
    }

    fn unavailable(&self, source: std::io::Error) -> ConfigError {
        ConfigError::SourceUnavailable {
            path: self.path.clone(),
            source,
        }
    }
}

fn parse_interval(raw: &[u8]) -> Result<Duration, ConfigError> {
    let text = String::from_utf8_lossy(raw);
    match text.trim().parse::<u64>() {
        Ok(secs) if secs > 0 => Ok(Duration::from_secs(secs)),
        _ => Err(ConfigError::MalformedInterval(text.into_owned())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store() -> ConfigStore {
        ConfigStore::new("/nonexistent/hpd.conf")
    }

    fn paths(config: &Configuration) -> Vec<&str> {
        config
            .wallpapers()
            .iter()
            .map(|p| p.to_str().unwrap())
            .collect()
    }

    #[test]
    fn parses_interval_paths_and_comments() {
        let c = store().parse_str("interval=5\n/a.png\n/b.png\n#comment\n/c.png\n");
        assert_eq!(c.interval(), Duration::from_secs(5));
        assert_eq!(paths(&c), ["/a.png", "/b.png", "/c.png"]);
    }

    #[test]
    fn same_text_parses_to_equal_values() {
        let text = "interval=12\n/x.jpg\n\n/y.jpg\n/x.jpg\n";
        assert_eq!(store().parse_str(text), store().parse_str(text));
    }

    #[test]
    fn malformed_interval_falls_back_to_default() {
        let c = store().parse_str("interval=notanumber\n");
        assert_eq!(c.interval(), DEFAULT_INTERVAL);
        assert!(c.wallpapers().is_empty());

        for bad in ["interval=0", "interval=-3", "interval=", "interval=99999999999999999999999"] {
            assert_eq!(store().parse_str(bad).interval(), DEFAULT_INTERVAL, "{bad}");
        }
    }

    #[test]
    fn malformed_interval_after_valid_one_resets_to_default() {
        let c = store().parse_str("interval=10\ninterval=abc\n");
        assert_eq!(c.interval(), DEFAULT_INTERVAL);
    }

    #[test]
    fn interval_tolerates_surrounding_whitespace() {
        let c = store().parse_str("  interval= 30 \r\n");
        assert_eq!(c.interval(), Duration::from_secs(30));
    }

    #[test]
    fn missing_interval_uses_default() {
        let c = store().parse_str("/only.png");
        assert_eq!(c.interval(), DEFAULT_INTERVAL);
        assert_eq!(paths(&c), ["/only.png"]);
    }

    #[test]
    fn trims_whitespace_and_crlf_from_paths() {
        let c = store().parse_str("  /a b.png  \r\n\t\n   # indented comment\n");
        assert_eq!(paths(&c), ["/a b.png"]);
    }

    #[test]
    fn keeps_duplicates_in_order() {
        let c = store().parse_str("b\na\nb\n");
        assert_eq!(paths(&c), ["b", "a", "b"]);
    }

    #[test]
    fn extra_wallpapers_beyond_capacity_are_ignored() {
        let limits = Limits {
            max_wallpapers: 2,
            ..Limits::DEFAULT
        };
        let c = store().with_limits(limits).parse_str("/1\n/2\n/3\n/4\n");
        assert_eq!(paths(&c), ["/1", "/2"]);
    }

    #[test]
    fn overlong_paths_are_skipped() {
        let limits = Limits {
            max_path_len: 4,
            ..Limits::DEFAULT
        };
        let c = store().with_limits(limits).parse_str("/abc\n/abcdef\n/xy\n");
        assert_eq!(paths(&c), ["/abc", "/xy"]);
    }

    #[test]
    fn non_utf8_paths_survive() {
        let c = store().parse(&b"/w/\xffimg.png\n"[..]).unwrap();
        assert_eq!(c.wallpapers()[0].as_os_str().as_bytes(), b"/w/\xffimg.png");
    }

    #[test]
    fn load_reads_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("hpd.conf");
        std::fs::write(&path, "interval=7\n/a.png\n").unwrap();

        let c = ConfigStore::new(&path).load().unwrap();
        assert_eq!(c.interval(), Duration::from_secs(7));
        assert_eq!(paths(&c), ["/a.png"]);
    }

    #[test]
    fn load_reports_missing_source() {
        let err = store().load().unwrap_err();
        match err {
            ConfigError::SourceUnavailable { path, .. } => {
                assert_eq!(path, Path::new("/nonexistent/hpd.conf"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn configuration_rejects_zero_interval() {
        assert!(Configuration::new(Duration::ZERO, vec![]).is_none());
        assert!(Configuration::new(Duration::from_secs(1), vec![]).is_some());
    }
}

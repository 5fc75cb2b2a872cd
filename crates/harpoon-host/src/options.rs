//! Command-line options and loading of the JSON inputs they point at.
//!
//! ```text
//! harpoon-host [--seed N] [--seconds S] [--fast]
//!              [--tuning FILE] [--definitions FILE] [--script FILE]
//! ```

use std::path::{Path, PathBuf};

use harpoon_core::config::TuningConfig;
use harpoon_core::definitions::{DefinitionError, DefinitionTable};
use harpoon_sim::SimConfig;

use crate::game_loop::{LoopConfig, TICK_RATE};
use crate::script::{self, Script};

#[derive(Debug, thiserror::Error)]
pub enum HostError {
    #[error("{0} needs a value")]
    MissingValue(String),
    #[error("invalid value {value:?} for {flag}")]
    BadValue { flag: String, value: String },
    #[error("unknown option {0}")]
    UnknownOption(String),
    #[error("cannot read {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("invalid tuning file: {0}")]
    Tuning(serde_json::Error),
    #[error("invalid definition table: {0}")]
    Definitions(#[from] DefinitionError),
    #[error("invalid script: {0}")]
    Script(serde_json::Error),
    #[error("could not start the game loop: {0}")]
    Spawn(#[from] std::io::Error),
    #[error("game loop panicked")]
    LoopPanicked,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Options {
    pub seed: u64,
    pub seconds: f64,
    pub fast: bool,
    pub tuning: Option<PathBuf>,
    pub definitions: Option<PathBuf>,
    pub script: Option<PathBuf>,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            seed: SimConfig::default().seed,
            seconds: 60.0,
            fast: false,
            tuning: None,
            definitions: None,
            script: None,
        }
    }
}

impl Options {
    pub fn from_args(args: impl IntoIterator<Item = String>) -> Result<Self, HostError> {
        let mut options = Options::default();
        let mut args = args.into_iter();
        while let Some(flag) = args.next() {
            match flag.as_str() {
                "--fast" => options.fast = true,
                "--seed" => options.seed = parse(&flag, args.next())?,
                "--seconds" => {
                    let seconds: f64 = parse(&flag, args.next())?;
                    if !seconds.is_finite() || seconds < 0.0 {
                        return Err(HostError::BadValue {
                            flag,
                            value: seconds.to_string(),
                        });
                    }
                    options.seconds = seconds;
                }
                "--tuning" => options.tuning = Some(path(&flag, args.next())?),
                "--definitions" => options.definitions = Some(path(&flag, args.next())?),
                "--script" => options.script = Some(path(&flag, args.next())?),
                _ => return Err(HostError::UnknownOption(flag)),
            }
        }
        Ok(options)
    }

    /// Read every referenced file and build the loop configuration. Missing
    /// files fall back to built-in defaults and the demo script.
    pub fn load(&self) -> Result<LoopConfig, HostError> {
        let tuning = match &self.tuning {
            Some(path) => TuningConfig::from_json(&read(path)?).map_err(HostError::Tuning)?,
            None => TuningConfig::default(),
        };
        let definitions = match &self.definitions {
            Some(path) => DefinitionTable::from_json(&read(path)?)?,
            None => DefinitionTable::builtin(),
        };
        let script = match &self.script {
            Some(path) => Script::from_json(&read(path)?).map_err(HostError::Script)?,
            None => script::demo(self.seconds),
        };
        Ok(LoopConfig {
            sim: SimConfig { seed: self.seed },
            tuning,
            definitions,
            script,
            max_ticks: Some((self.seconds * TICK_RATE as f64).round() as u64),
            realtime: !self.fast,
        })
    }
}

fn parse<T: std::str::FromStr>(flag: &str, value: Option<String>) -> Result<T, HostError> {
    let value = value.ok_or_else(|| HostError::MissingValue(flag.to_string()))?;
    value.parse().map_err(|_| HostError::BadValue {
        flag: flag.to_string(),
        value,
    })
}

fn path(flag: &str, value: Option<String>) -> Result<PathBuf, HostError> {
    value
        .map(PathBuf::from)
        .ok_or_else(|| HostError::MissingValue(flag.to_string()))
}

fn read(path: &Path) -> Result<String, HostError> {
    std::fs::read_to_string(path).map_err(|source| HostError::Read {
        path: path.to_path_buf(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|arg| arg.to_string()).collect()
    }

    #[test]
    fn test_defaults_without_args() {
        let options = Options::from_args(Vec::new()).unwrap();
        assert_eq!(options, Options::default());
        let config = options.load().unwrap();
        assert_eq!(config.max_ticks, Some(3_600));
        assert!(config.realtime);
        assert!(!config.script.is_empty());
    }

    #[test]
    fn test_parses_flags() {
        let options = Options::from_args(args(&["--seed", "7", "--seconds", "2.5", "--fast"])).unwrap();
        assert_eq!(options.seed, 7);
        assert_eq!(options.seconds, 2.5);
        assert!(options.fast);
        assert_eq!(options.load().unwrap().max_ticks, Some(150));
    }

    #[test]
    fn test_rejects_bad_input() {
        assert!(matches!(
            Options::from_args(args(&["--seed"])),
            Err(HostError::MissingValue(_))
        ));
        assert!(matches!(
            Options::from_args(args(&["--seed", "many"])),
            Err(HostError::BadValue { .. })
        ));
        assert!(matches!(
            Options::from_args(args(&["--seconds", "-1"])),
            Err(HostError::BadValue { .. })
        ));
        assert!(matches!(
            Options::from_args(args(&["--turbo"])),
            Err(HostError::UnknownOption(_))
        ));
    }

    #[test]
    fn test_missing_file_reported() {
        let options = Options {
            tuning: Some(PathBuf::from("/nonexistent/tuning.json")),
            ..Options::default()
        };
        assert!(matches!(options.load(), Err(HostError::Read { .. })));
    }
}

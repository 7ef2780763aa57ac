use std::env;
use std::fmt;
use std::path::{Path, PathBuf};

use crate::logger::logger::DEFAULT_LOG_FILE;
use crate::play::handshake::RESULT_FILE_NAME;

pub const GAMES_DIR_VAR: &str = "LAUNCHER_GAMES_DIR";
pub const PYTHON_VAR: &str = "LAUNCHER_PYTHON";
pub const RESULT_FILE_VAR: &str = "LAUNCHER_RESULT_FILE";
pub const REGISTRY_VAR: &str = "LAUNCHER_REGISTRY";
pub const LOG_FILE_VAR: &str = "LAUNCHER_LOG";
pub const SEED_VAR: &str = "LAUNCHER_SEED";

pub const DEFAULT_PYTHON: &str = "python3";
pub const DEFAULT_REGISTRY_FILE: &str = "games.csv";

#[derive(Debug)]
pub enum ConfigError {
    CurrentDir(std::io::Error),
    MissingGamesDir(PathBuf),
    MissingRegistry(PathBuf),
    EmptyValue(&'static str),
    InvalidSeed(String),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::CurrentDir(e) => write!(f, "cannot resolve current directory: {}", e),
            ConfigError::MissingGamesDir(path) => {
                write!(f, "games directory {} does not exist", path.display())
            }
            ConfigError::MissingRegistry(path) => {
                write!(f, "registry file {} does not exist", path.display())
            }
            ConfigError::EmptyValue(var) => write!(f, "{} is set but empty", var),
            ConfigError::InvalidSeed(raw) => write!(f, "{} is not a valid seed: {:?}", SEED_VAR, raw),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::CurrentDir(e) => Some(e),
            _ => None,
        }
    }
}

/// Launcher settings, resolved once at startup.
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    /// Root the minigame folders live under; the launcher's own working directory by default.
    pub games_dir: PathBuf,
    /// Interpreter substituted for the `python` program placeholder.
    pub python: String,
    pub result_file: PathBuf,
    /// CSV override for the built-in game registry.
    pub registry_file: Option<PathBuf>,
    pub log_file: PathBuf,
    /// Fixed roulette seed for reproducible sessions.
    pub seed: Option<u64>,
}

impl Settings {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let value = |key: &'static str| -> Result<Option<String>, ConfigError> {
            match lookup(key) {
                Some(raw) if raw.trim().is_empty() => Err(ConfigError::EmptyValue(key)),
                Some(raw) => Ok(Some(raw.trim().to_string())),
                None => Ok(None),
            }
        };

        // paths handed to children must be absolute
        let cwd = env::current_dir().map_err(ConfigError::CurrentDir)?;

        let games_dir = match value(GAMES_DIR_VAR)? {
            Some(dir) => resolve(&cwd, dir),
            None => cwd.clone(),
        };
        if !games_dir.is_dir() {
            return Err(ConfigError::MissingGamesDir(games_dir));
        }

        let python = value(PYTHON_VAR)?.unwrap_or_else(|| DEFAULT_PYTHON.to_string());

        let result_file = value(RESULT_FILE_VAR)?
            .map(|path| resolve(&cwd, path))
            .unwrap_or_else(|| games_dir.join(RESULT_FILE_NAME));

        // An explicit registry must exist; the default one is optional
        let registry_file = match value(REGISTRY_VAR)? {
            Some(path) => {
                let path = resolve(&cwd, path);
                if !path.is_file() {
                    return Err(ConfigError::MissingRegistry(path));
                }
                Some(path)
            }
            None => {
                let path = games_dir.join(DEFAULT_REGISTRY_FILE);
                path.is_file().then_some(path)
            }
        };

        let log_file = value(LOG_FILE_VAR)?
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_LOG_FILE));

        let seed = match value(SEED_VAR)? {
            Some(raw) => Some(raw.parse::<u64>().map_err(|_| ConfigError::InvalidSeed(raw))?),
            None => None,
        };

        Ok(Settings {
            games_dir,
            python,
            result_file,
            registry_file,
            log_file,
            seed,
        })
    }
}

// Joining onto an absolute path replaces it, so absolute values pass through
fn resolve(cwd: &Path, raw: String) -> PathBuf {
    cwd.join(raw)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults_use_games_dir_for_result_file() {
        let dir = env::temp_dir();
        let dir_str = dir.to_string_lossy().to_string();
        let settings = Settings::from_lookup(lookup_from(&[(GAMES_DIR_VAR, dir_str.as_str())])).unwrap();

        assert_eq!(settings.games_dir, dir);
        assert_eq!(settings.python, DEFAULT_PYTHON);
        assert_eq!(settings.result_file, dir.join(RESULT_FILE_NAME));
        assert_eq!(settings.log_file, PathBuf::from(DEFAULT_LOG_FILE));
        assert_eq!(settings.seed, None);
    }

    #[test]
    fn test_overrides_are_applied() {
        let dir = env::temp_dir();
        let dir_str = dir.to_string_lossy().to_string();
        let settings = Settings::from_lookup(lookup_from(&[
            (GAMES_DIR_VAR, dir_str.as_str()),
            (PYTHON_VAR, "/usr/bin/python3.12"),
            (RESULT_FILE_VAR, "/tmp/showdown_result.txt"),
            (LOG_FILE_VAR, "showdown.log"),
            (SEED_VAR, "42"),
        ]))
        .unwrap();

        assert_eq!(settings.python, "/usr/bin/python3.12");
        assert_eq!(settings.result_file, PathBuf::from("/tmp/showdown_result.txt"));
        assert_eq!(settings.log_file, PathBuf::from("showdown.log"));
        assert_eq!(settings.seed, Some(42));
    }

    #[test]
    fn test_relative_games_dir_gives_absolute_result_file() {
        let settings = Settings::from_lookup(lookup_from(&[(GAMES_DIR_VAR, ".")])).unwrap();

        assert!(settings.games_dir.is_absolute(), "games dir {:?}", settings.games_dir);
        assert!(settings.result_file.is_absolute(), "result file {:?}", settings.result_file);
        assert_eq!(settings.games_dir, env::current_dir().unwrap().join("."));
        assert!(settings.result_file.ends_with(RESULT_FILE_NAME));
    }

    #[test]
    fn test_relative_result_file_is_made_absolute() {
        let settings = Settings::from_lookup(lookup_from(&[(RESULT_FILE_VAR, "results/out.txt")])).unwrap();

        assert!(settings.result_file.is_absolute());
        assert_eq!(settings.result_file, env::current_dir().unwrap().join("results/out.txt"));
    }

    #[test]
    fn test_missing_games_dir_is_rejected() {
        let result = Settings::from_lookup(lookup_from(&[(GAMES_DIR_VAR, "/definitely/not/here/showdown")]));
        assert!(matches!(result, Err(ConfigError::MissingGamesDir(_))));
    }

    #[test]
    fn test_empty_value_is_rejected() {
        let dir = env::temp_dir();
        let dir_str = dir.to_string_lossy().to_string();
        let result = Settings::from_lookup(lookup_from(&[(GAMES_DIR_VAR, dir_str.as_str()), (PYTHON_VAR, "  ")]));
        assert!(matches!(result, Err(ConfigError::EmptyValue(PYTHON_VAR))));
    }

    #[test]
    fn test_bad_seed_is_rejected() {
        let dir = env::temp_dir();
        let dir_str = dir.to_string_lossy().to_string();
        let result = Settings::from_lookup(lookup_from(&[(GAMES_DIR_VAR, dir_str.as_str()), (SEED_VAR, "lucky")]));
        assert!(matches!(result, Err(ConfigError::InvalidSeed(_))));
    }

    #[test]
    fn test_explicit_registry_must_exist() {
        let dir = env::temp_dir();
        let dir_str = dir.to_string_lossy().to_string();
        let result = Settings::from_lookup(lookup_from(&[
            (GAMES_DIR_VAR, dir_str.as_str()),
            (REGISTRY_VAR, "/definitely/not/here/games.csv"),
        ]));
        assert!(matches!(result, Err(ConfigError::MissingRegistry(_))));
    }
}

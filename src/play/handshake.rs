use std::ffi::OsString;
use std::fmt;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use crate::logger::logger;
use crate::play::scoreboard::Player;

pub const RESULT_FILE_NAME: &str = "game_result.txt";
// Set in every child's environment so it knows where to report
pub const RESULT_FILE_ENV: &str = "GAME_RESULT_FILE";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchResult {
    Player1,
    Player2,
    Draw,
    // no file, or nothing we could read in it
    Unknown,
}

impl MatchResult {
    /// Accepts the tokens a minigame may write: `1`, `2`, `0` or `tie`.
    pub fn from_token(token: &str) -> Option<MatchResult> {
        match token.trim() {
            "1" => Some(MatchResult::Player1),
            "2" => Some(MatchResult::Player2),
            "0" | "tie" => Some(MatchResult::Draw),
            _ => None,
        }
    }

    pub fn parse(content: &str) -> MatchResult {
        MatchResult::from_token(content).unwrap_or(MatchResult::Unknown)
    }

    pub fn token(self) -> Option<&'static str> {
        match self {
            MatchResult::Player1 => Some("1"),
            MatchResult::Player2 => Some("2"),
            MatchResult::Draw => Some("0"),
            MatchResult::Unknown => None,
        }
    }

    pub fn winner(self) -> Option<Player> {
        match self {
            MatchResult::Player1 => Some(Player::One),
            MatchResult::Player2 => Some(Player::Two),
            MatchResult::Draw | MatchResult::Unknown => None,
        }
    }
}

impl fmt::Display for MatchResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MatchResult::Player1 => write!(f, "Player 1 wins"),
            MatchResult::Player2 => write!(f, "Player 2 wins"),
            MatchResult::Draw => write!(f, "Tie"),
            MatchResult::Unknown => write!(f, "no result"),
        }
    }
}

#[derive(Debug)]
pub enum HandshakeError {
    Read { path: PathBuf, source: std::io::Error },
    Write { path: PathBuf, source: std::io::Error },
    Remove { path: PathBuf, source: std::io::Error },
    Unreportable,
    BadToken(String),
}

impl fmt::Display for HandshakeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HandshakeError::Read { path, source } => {
                write!(f, "failed to read result file {}: {}", path.display(), source)
            }
            HandshakeError::Write { path, source } => {
                write!(f, "failed to write result file {}: {}", path.display(), source)
            }
            HandshakeError::Remove { path, source } => {
                write!(f, "failed to remove result file {}: {}", path.display(), source)
            }
            HandshakeError::Unreportable => write!(f, "an unknown result cannot be reported"),
            HandshakeError::BadToken(token) => {
                write!(f, "unrecognised result {:?}, expected 1, 2, 0 or tie", token)
            }
        }
    }
}

impl std::error::Error for HandshakeError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            HandshakeError::Read { source, .. }
            | HandshakeError::Write { source, .. }
            | HandshakeError::Remove { source, .. } => Some(source),
            HandshakeError::Unreportable | HandshakeError::BadToken(_) => None,
        }
    }
}

/// The one-line file a finished minigame leaves behind for the launcher.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HandshakeFile {
    path: PathBuf,
}

impl HandshakeFile {
    pub fn new(path: PathBuf) -> Self {
        HandshakeFile { path }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Reads the result and deletes the file.
    ///
    /// A missing file or unrecognised content gives `Unknown`. The file is
    /// removed whatever it held; a failed removal is logged, not returned,
    /// since the result itself was read fine.
    pub fn consume(&self) -> Result<MatchResult, HandshakeError> {
        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                logger::warning(&format!(
                    "Result file {} not found, game may not have ended normally",
                    self.path.display()
                ));
                return Ok(MatchResult::Unknown);
            }
            Err(source) => {
                return Err(HandshakeError::Read {
                    path: self.path.clone(),
                    source,
                })
            }
        };

        let result = MatchResult::parse(&content);
        if result == MatchResult::Unknown {
            logger::warning(&format!("Unrecognised result file content: {:?}", content.trim()));
        } else {
            logger::info(&format!("Read from result file: {}", result));
        }

        if let Err(e) = self.remove() {
            logger::warning(&e.to_string());
        }

        Ok(result)
    }

    /// Removes a leftover file from an earlier round. Returns whether one existed.
    pub fn clear_stale(&self) -> Result<bool, HandshakeError> {
        match self.remove() {
            Ok(()) => {
                logger::warning(&format!("Removed stale result file {}", self.path.display()));
                Ok(true)
            }
            Err(HandshakeError::Remove { source, .. }) if source.kind() == ErrorKind::NotFound => Ok(false),
            Err(e) => Err(e),
        }
    }

    pub fn write(&self, result: MatchResult) -> Result<(), HandshakeError> {
        let token = result.token().ok_or(HandshakeError::Unreportable)?;
        fs::write(&self.path, token).map_err(|source| HandshakeError::Write {
            path: self.path.clone(),
            source,
        })
    }

    fn remove(&self) -> Result<(), HandshakeError> {
        fs::remove_file(&self.path).map_err(|source| HandshakeError::Remove {
            path: self.path.clone(),
            source,
        })
    }
}

/// Where a reporting minigame writes: the path its launcher handed it in
/// `GAME_RESULT_FILE`, otherwise whatever `fallback` resolves.
pub fn report_target<F, E>(handed: Option<OsString>, fallback: F) -> Result<PathBuf, E>
where
    F: FnOnce() -> Result<PathBuf, E>,
{
    match handed {
        Some(path) if !path.is_empty() => Ok(PathBuf::from(path)),
        _ => fallback(),
    }
}

/// Writes a result token for the launcher to pick up.
pub fn report(token: &str, target: &Path) -> Result<MatchResult, HandshakeError> {
    let result = MatchResult::from_token(token).ok_or_else(|| HandshakeError::BadToken(token.to_string()))?;
    HandshakeFile::new(target.to_path_buf()).write(result)?;
    Ok(result)
}

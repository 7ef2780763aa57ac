use std::fmt;
use std::io;
use std::path::{self, PathBuf};
use std::process::Command;
use std::thread;
use std::time::Duration;

use console::Term;

use crate::config::settings::Settings;
use crate::logger::logger;
use crate::play::handshake::RESULT_FILE_ENV;
use crate::registry::games::GameEntry;

#[derive(Debug)]
pub enum LaunchError {
    MissingDirectory(PathBuf),
    Spawn { program: String, source: io::Error },
}

impl fmt::Display for LaunchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LaunchError::MissingDirectory(path) => {
                write!(f, "game directory not found: {}", path.display())
            }
            LaunchError::Spawn { program, source } => {
                write!(f, "failed to launch {}: {}", program, source)
            }
        }
    }
}

impl std::error::Error for LaunchError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            LaunchError::Spawn { source, .. } => Some(source),
            LaunchError::MissingDirectory(_) => None,
        }
    }
}

/// How a minigame process ended. `code` is `None` when it was killed by a signal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExitSummary {
    pub code: Option<i32>,
}

/// Runs one minigame to completion. Blocks until it exits.
pub trait GameRunner {
    fn run(&mut self, game: &GameEntry) -> Result<ExitSummary, LaunchError>;
}

/// Something only one process may hold at a time. The launcher lets go of
/// it for as long as a minigame runs.
pub trait ExclusiveDevice {
    fn release(&mut self) -> io::Result<()>;
    fn reacquire(&mut self) -> io::Result<()>;
}

pub struct ProcessRunner {
    games_dir: PathBuf,
    python: String,
    result_file: PathBuf,
}

impl ProcessRunner {
    pub fn new(settings: &Settings) -> Self {
        ProcessRunner {
            games_dir: settings.games_dir.clone(),
            python: settings.python.clone(),
            // children run elsewhere, a relative path would point into their folder
            result_file: path::absolute(&settings.result_file).unwrap_or_else(|e| {
                logger::warning(&format!(
                    "Could not make {} absolute: {}",
                    settings.result_file.display(),
                    e
                ));
                settings.result_file.clone()
            }),
        }
    }

    fn command_for(&self, game: &GameEntry) -> Result<Command, LaunchError> {
        let dir = self.games_dir.join(&game.launch.dir);
        if !dir.is_dir() {
            return Err(LaunchError::MissingDirectory(dir));
        }

        let program = if game.launch.uses_python() {
            self.python.clone()
        } else {
            game.launch.program.clone()
        };

        // Child resolves its own assets relative to its folder
        let mut command = Command::new(program);
        command
            .args(&game.launch.args)
            .current_dir(&dir)
            .env(RESULT_FILE_ENV, &self.result_file);
        Ok(command)
    }
}

impl GameRunner for ProcessRunner {
    fn run(&mut self, game: &GameEntry) -> Result<ExitSummary, LaunchError> {
        let mut command = self.command_for(game)?;
        logger::info(&format!("Launching game: {} ({:?})", game.display_name, command));

        let output = command.output().map_err(|source| LaunchError::Spawn {
            program: command.get_program().to_string_lossy().to_string(),
            source,
        })?;

        // child output is kept for diagnostics only
        let stdout = String::from_utf8_lossy(&output.stdout);
        let stderr = String::from_utf8_lossy(&output.stderr);
        if !stdout.trim().is_empty() {
            logger::info(&format!("[{} stdout]\n{}", game.id, stdout.trim_end()));
        }
        if !stderr.trim().is_empty() {
            logger::warning(&format!("[{} stderr]\n{}", game.id, stderr.trim_end()));
        }

        let summary = ExitSummary { code: output.status.code() };
        logger::info(&format!("{} exited with {:?}", game.display_name, summary.code));
        Ok(summary)
    }
}

/// Hands the terminal over to the child and takes it back afterwards.
pub struct TerminalDevice {
    term: Term,
}

impl TerminalDevice {
    pub fn new() -> Self {
        TerminalDevice { term: Term::stdout() }
    }
}

impl Default for TerminalDevice {
    fn default() -> Self {
        Self::new()
    }
}

impl ExclusiveDevice for TerminalDevice {
    fn release(&mut self) -> io::Result<()> {
        self.term.show_cursor()?;
        clearscreen::clear().map_err(|e| io::Error::new(io::ErrorKind::Other, e.to_string()))
    }

    fn reacquire(&mut self) -> io::Result<()> {
        clearscreen::clear().map_err(|e| io::Error::new(io::ErrorKind::Other, e.to_string()))?;
        self.term.hide_cursor()
    }
}

/// Pauses around a device handoff.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Handoff {
    pub settle_before: Duration,
    pub settle_after: Duration,
    pub reacquire_attempts: u32,
}

impl Default for Handoff {
    fn default() -> Self {
        Handoff {
            settle_before: Duration::from_millis(150),
            settle_after: Duration::from_millis(100),
            reacquire_attempts: 3,
        }
    }
}

impl Handoff {
    #[cfg(test)]
    pub fn immediate() -> Self {
        Handoff {
            settle_before: Duration::ZERO,
            settle_after: Duration::ZERO,
            reacquire_attempts: 3,
        }
    }

    /// release, run, reacquire. Device trouble is logged and never stops the round.
    pub fn run<G, D>(&self, runner: &mut G, device: &mut D, game: &GameEntry) -> Result<ExitSummary, LaunchError>
    where
        G: GameRunner + ?Sized,
        D: ExclusiveDevice + ?Sized,
    {
        if let Err(e) = device.release() {
            logger::warning(&format!("Failed to release device before launch: {}", e));
        }
        thread::sleep(self.settle_before);

        let outcome = runner.run(game);

        thread::sleep(self.settle_after);
        self.reacquire(device);

        outcome
    }

    fn reacquire<D: ExclusiveDevice + ?Sized>(&self, device: &mut D) {
        for attempt in 1..=self.reacquire_attempts.max(1) {
            match device.reacquire() {
                Ok(()) => return,
                Err(e) => {
                    logger::warning(&format!("Device reacquire attempt {} failed: {}", attempt, e));
                    thread::sleep(self.settle_after);
                }
            }
        }
        logger::error("Giving up on reacquiring the device, continuing without it");
    }
}

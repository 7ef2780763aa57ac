use std::env;

use anyhow::{anyhow, bail, Context, Result};
use colored::*;
use rand::SeedableRng;
use rand_chacha::ChaCha20Rng;

mod config;
mod interfaces;
mod logger;
mod play;
mod registry;
mod session;
mod validation;

use config::settings::Settings;
use logger::logger as log;
use play::handshake::{self, HandshakeFile, RESULT_FILE_ENV};
use play::launch::{ProcessRunner, TerminalDevice};
use play::orchestrator::MatchOrchestrator;
use session::GameSession;

fn main() -> Result<()> {
    let args: Vec<String> = env::args().skip(1).collect();

    match args.first().map(String::as_str) {
        None => launch(),
        Some("report") => report(&args[1..]),
        Some("help") | Some("--help") | Some("-h") => {
            print_usage();
            Ok(())
        }
        Some(other) => {
            print_usage();
            bail!("unknown command: {}", other)
        }
    }
}

fn print_usage() {
    println!("{}", "Two Player Mini Games Showdown".bright_cyan().bold());
    println!("  showdown                 start the launcher");
    println!("  showdown report <1|2|0|tie>");
    println!("                           write a minigame result for the launcher");
}

fn launch() -> Result<()> {
    let settings = Settings::from_env().context("invalid launcher configuration")?;
    log::set_log_path(settings.log_file.clone());
    log::info(&format!("Launcher starting in {}", settings.games_dir.display()));

    let games = registry::loader::load_registry(settings.registry_file.as_deref())
        .context("failed to load the game registry")?;

    let rng = match settings.seed {
        Some(seed) => {
            log::info(&format!("Using fixed roulette seed {}", seed));
            ChaCha20Rng::seed_from_u64(seed)
        }
        None => ChaCha20Rng::from_rng(&mut rand::rng()),
    };

    let handshake = HandshakeFile::new(settings.result_file.clone());
    log::info(&format!("Minigames report to {}", handshake.path().display()));

    let mut orchestrator = MatchOrchestrator::new(
        GameSession::new(games),
        rng,
        ProcessRunner::new(&settings),
        TerminalDevice::new(),
        handshake,
    );

    let outcome = interfaces::launcher::run_launcher(&mut orchestrator);
    if let Err(e) = &outcome {
        log::critical(&format!("Launcher stopped: {:#}", e));
    }
    log::info("Launcher exiting");
    outcome
}

// Called by a minigame (or its wrapper) right before it exits
fn report(args: &[String]) -> Result<()> {
    let token = args.first().ok_or_else(|| anyhow!("report needs a result: 1, 2, 0 or tie"))?;

    let path = handshake::report_target(env::var_os(RESULT_FILE_ENV), || {
        Settings::from_env().map(|settings| settings.result_file)
    })
    .context("invalid launcher configuration")?;

    let result = handshake::report(token, &path).with_context(|| format!("could not report {:?}", token))?;
    println!("[RESULT] Written: {} -> {}", result, path.display());
    Ok(())
}

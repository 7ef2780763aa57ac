use std::io::{self, Write};
use std::thread;
use std::time::Duration;

use colored::*;
use rand::Rng;

use crate::interfaces::board;
use crate::interfaces::menus::menu_generator;
use crate::logger::logger;
use crate::play::orchestrator::{LauncherState, MatchOrchestrator, RoundReport};
use crate::play::launch::{ExclusiveDevice, GameRunner};
use crate::session::GameSession;

const FRAME: Duration = Duration::from_millis(16);
const LOADING_PAUSE: Duration = Duration::from_millis(1000);

fn clear() {
    if let Err(e) = clearscreen::clear() {
        logger::warning(&format!("Failed to clear screen: {}", e));
    }
}

fn wait_for_enter(prompt: &str) {
    println!("\n{}", prompt.dimmed());
    io::stdout().flush().ok();
    let mut input = String::new();
    io::stdin().read_line(&mut input).ok();
}

fn show_round(session: &GameSession, report: &RoundReport) {
    match session.games.get(report.game_index) {
        Some(game) => println!("\n{}", board::game_banner(game).bold()),
        None => println!("\n{}", format!("═══ {} ═══", report.game_name).bright_cyan().bold()),
    }

    if let Some(e) = &report.launch_error {
        println!("{} {}", "⚠ Could not start the game:".red().bold(), e);
        println!("{}", "The round counts as played with no winner.".yellow());
    }

    match report.winner {
        Some(player) => println!("{} {}", board::crown_row(1).yellow(), format!("{} wins!", player).green().bold()),
        None => println!("{}", format!("{}. Nobody scores this round.", report.result).yellow()),
    }
}

// Main entry point for a match
pub fn run_launcher<R, G, D>(orchestrator: &mut MatchOrchestrator<R, G, D>) -> anyhow::Result<()>
where
    R: Rng,
    G: GameRunner,
    D: ExclusiveDevice,
{
    loop {
        match orchestrator.state() {
            LauncherState::Menu => {
                clear();
                board::render_board(orchestrator.session(), orchestrator.state());
                let session = orchestrator.session();
                println!(
                    "{} {}  {} {}",
                    "Round".white(),
                    (session.scoreboard.rounds() + 1).to_string().yellow(),
                    session.unplayed_count().to_string().yellow(),
                    "games left to play".white()
                );

                match menu_generator("Spin the roulette!", &["Spin", "Quit"])? {
                    0 => {
                        orchestrator.request_spin();
                    }
                    _ => {
                        logger::info("Player quit from the menu");
                        return Ok(());
                    }
                }
            }
            LauncherState::Spinning => {
                orchestrator.tick();
                clear();
                board::render_board(orchestrator.session(), orchestrator.state());
                println!("{}", "Spinning...".bright_yellow().bold());
                thread::sleep(FRAME);
            }
            LauncherState::Waiting => {
                clear();
                board::render_board(orchestrator.session(), orchestrator.state());
                if let Some(game) = orchestrator.selected_game() {
                    println!("{} {}", "Next game:".green().bold(), game.display_name.bright_white().bold());
                }
                wait_for_enter("Press ENTER to start the game...");
                orchestrator.confirm();
            }
            LauncherState::Playing => {
                clear();
                if let Some(game) = orchestrator.selected_game() {
                    println!("\n{}", "LOADING...".bright_yellow().bold());
                    println!("{}", game.display_name.white());
                }
                io::stdout().flush().ok();
                thread::sleep(LOADING_PAUSE);

                if let Some(report) = orchestrator.play() {
                    show_round(orchestrator.session(), &report);
                    if report.next_state == LauncherState::Final {
                        wait_for_enter("Press ENTER to see the final results...");
                    } else {
                        wait_for_enter("Press ENTER to continue...");
                    }
                }
            }
            LauncherState::Final => {
                clear();
                board::render_final(orchestrator.session(), orchestrator.history());

                match menu_generator("Play again?", &["New match", "Quit"])? {
                    0 => {
                        orchestrator.reset();
                    }
                    _ => return Ok(()),
                }
            }
        }
    }
}

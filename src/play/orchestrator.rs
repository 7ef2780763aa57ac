use rand::Rng;

use crate::logger::logger;
use crate::play::handshake::{HandshakeFile, MatchResult};
use crate::play::launch::{ExclusiveDevice, GameRunner, Handoff, LaunchError};
use crate::play::scoreboard::Player;
use crate::registry::games::GameEntry;
use crate::session::GameSession;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LauncherState {
    Menu,
    Spinning,
    Waiting,
    Playing,
    Final,
}

/// What happened in one played round.
#[derive(Debug)]
pub struct RoundReport {
    pub game_index: usize,
    pub game_name: String,
    pub result: MatchResult,
    pub winner: Option<Player>,
    pub launch_error: Option<LaunchError>,
    pub next_state: LauncherState,
}

/// Drives a match: spin, wait for confirmation, run the picked game, record
/// the result. Every round makes progress, whatever the minigame does.
pub struct MatchOrchestrator<R, G, D> {
    session: GameSession,
    rng: R,
    runner: G,
    device: D,
    handshake: HandshakeFile,
    handoff: Handoff,
    state: LauncherState,
    selected: Option<usize>,
    history: Vec<String>,
}

impl<R, G, D> MatchOrchestrator<R, G, D>
where
    R: Rng,
    G: GameRunner,
    D: ExclusiveDevice,
{
    pub fn new(session: GameSession, rng: R, runner: G, device: D, handshake: HandshakeFile) -> Self {
        MatchOrchestrator {
            session,
            rng,
            runner,
            device,
            handshake,
            handoff: Handoff::default(),
            state: LauncherState::Menu,
            selected: None,
            history: Vec::new(),
        }
    }

    #[cfg(test)]
    pub fn with_handoff(mut self, handoff: Handoff) -> Self {
        self.handoff = handoff;
        self
    }

    pub fn state(&self) -> LauncherState {
        self.state
    }

    pub fn session(&self) -> &GameSession {
        &self.session
    }

    /// One line per round of the current match, oldest first.
    pub fn history(&self) -> &[String] {
        &self.history
    }

    pub fn selected_game(&self) -> Option<&GameEntry> {
        self.selected.and_then(|i| self.session.games.get(i))
    }

    /// Menu → Spinning, or Menu → Final once every game has been played.
    pub fn request_spin(&mut self) -> LauncherState {
        if self.state != LauncherState::Menu {
            return self.state;
        }

        match self.session.roulette.start_spin(&self.session.games, &mut self.rng) {
            Some(index) => {
                self.selected = Some(index);
                self.state = LauncherState::Spinning;
            }
            None => {
                logger::info("All games played, showing final results");
                self.selected = None;
                self.state = LauncherState::Final;
            }
        }

        self.state
    }

    /// One animation frame. Returns true on the frame the pointer settles.
    pub fn tick(&mut self) -> bool {
        if self.state != LauncherState::Spinning {
            return false;
        }

        if !self.session.roulette.update() {
            return false;
        }

        if let Some(game) = self.selected_game() {
            logger::info(&format!("Pointer stopped at {}", game.display_name));
        }
        self.state = LauncherState::Waiting;
        true
    }

    /// Waiting → Playing.
    pub fn confirm(&mut self) -> bool {
        if self.state != LauncherState::Waiting {
            return false;
        }
        self.state = LauncherState::Playing;
        true
    }

    /// Runs the picked game (blocking), consumes its result and moves on to
    /// Menu or Final. Launch and result-file failures count as a round with
    /// no result; the game is marked played either way.
    pub fn play(&mut self) -> Option<RoundReport> {
        if self.state != LauncherState::Playing {
            return None;
        }
        let index = self.selected?;

        if let Err(e) = self.handshake.clear_stale() {
            logger::warning(&e.to_string());
        }

        let game = &self.session.games[index];
        let launch = self.handoff.run(&mut self.runner, &mut self.device, game);

        let (result, launch_error) = match launch {
            Ok(_) => {
                let result = self.handshake.consume().unwrap_or_else(|e| {
                    logger::error(&e.to_string());
                    MatchResult::Unknown
                });
                (result, None)
            }
            Err(e) => {
                logger::error(&format!("{}: {}", game.display_name, e));
                (MatchResult::Unknown, Some(e))
            }
        };

        let game_name = game.display_name.clone();
        let winner = self.session.scoreboard.record(result);
        self.session.games[index].mark_played();
        self.selected = None;

        let board = &self.session.scoreboard;
        let line = format!(
            "{}: {} | P1 {} ({} crowns) P2 {} ({} crowns)",
            game_name,
            result,
            board.tally(Player::One).score,
            board.tally(Player::One).crowns,
            board.tally(Player::Two).score,
            board.tally(Player::Two).crowns,
        );
        logger::round(&line);
        self.history.push(line);

        self.state = if self.session.all_played() {
            LauncherState::Final
        } else {
            LauncherState::Menu
        };

        Some(RoundReport {
            game_index: index,
            game_name,
            result,
            winner,
            launch_error,
            next_state: self.state,
        })
    }

    /// Starts a whole new match. The only way out of Final.
    pub fn reset(&mut self) {
        logger::info("Starting a new match");
        self.session = self.session.restarted();
        self.selected = None;
        self.history.clear();
        self.state = LauncherState::Menu;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::play::launch::ExitSummary;
    use crate::registry::games::default_registry;
    use rand::SeedableRng;
    use rand_chacha::ChaCha20Rng;
    use std::collections::VecDeque;
    use std::fs;
    use std::io;
    use std::path::PathBuf;

    // What the fake minigame does when it runs
    enum Script {
        Report(&'static str),
        Silent,
        FailLaunch,
    }

    struct ScriptedRunner {
        result_file: PathBuf,
        script: VecDeque<Script>,
        launched: Vec<String>,
    }

    impl GameRunner for ScriptedRunner {
        fn run(&mut self, game: &GameEntry) -> Result<ExitSummary, LaunchError> {
            self.launched.push(game.id.clone());
            match self.script.pop_front().unwrap_or(Script::Silent) {
                Script::Report(token) => {
                    fs::write(&self.result_file, token).unwrap();
                    Ok(ExitSummary { code: Some(0) })
                }
                Script::Silent => Ok(ExitSummary { code: Some(1) }),
                Script::FailLaunch => Err(LaunchError::MissingDirectory(game.launch.dir.clone())),
            }
        }
    }

    #[derive(Default)]
    struct CountingDevice {
        releases: u32,
        reacquires: u32,
    }

    impl ExclusiveDevice for CountingDevice {
        fn release(&mut self) -> io::Result<()> {
            self.releases += 1;
            Ok(())
        }

        fn reacquire(&mut self) -> io::Result<()> {
            self.reacquires += 1;
            Ok(())
        }
    }

    type TestOrchestrator = MatchOrchestrator<ChaCha20Rng, ScriptedRunner, CountingDevice>;

    fn orchestrator(name: &str, script: Vec<Script>) -> TestOrchestrator {
        let result_file = std::env::temp_dir().join(format!("showdown_orch_{}_{}.txt", name, std::process::id()));
        let _ = fs::remove_file(&result_file);
        let runner = ScriptedRunner {
            result_file: result_file.clone(),
            script: script.into(),
            launched: Vec::new(),
        };
        MatchOrchestrator::new(
            GameSession::new(default_registry()),
            ChaCha20Rng::seed_from_u64(2024),
            runner,
            CountingDevice::default(),
            HandshakeFile::new(result_file),
        )
        .with_handoff(Handoff::immediate())
    }

    // Menu through to the end of one round
    fn play_round(orch: &mut TestOrchestrator) -> RoundReport {
        assert_eq!(orch.request_spin(), LauncherState::Spinning);
        let mut ticks = 0;
        while !orch.tick() {
            ticks += 1;
            assert!(ticks < 10_000, "roulette never settled");
        }
        assert_eq!(orch.state(), LauncherState::Waiting);
        assert!(orch.confirm());
        orch.play().expect("round should be played")
    }

    #[test]
    fn test_player_two_win_is_recorded_and_file_consumed() {
        let mut orch = orchestrator("p2win", vec![Script::Report("2")]);
        let report = play_round(&mut orch);

        assert_eq!(report.result, MatchResult::Player2);
        assert_eq!(report.winner, Some(Player::Two));
        assert!(report.launch_error.is_none());
        assert_eq!(report.next_state, LauncherState::Menu);

        let board = &orch.session().scoreboard;
        assert_eq!(board.tally(Player::Two).score, 5);
        assert_eq!(board.tally(Player::Two).crowns, 1);
        assert_eq!(board.tally(Player::One).score, 0);

        assert!(!orch.handshake.path().exists(), "result file must be deleted");
        assert_eq!(orch.handshake.consume().unwrap(), MatchResult::Unknown);
        assert!(orch.session().games[report.game_index].is_played());
    }

    #[test]
    fn test_missing_result_file_still_consumes_turn() {
        let mut orch = orchestrator("silent", vec![Script::Silent]);
        let report = play_round(&mut orch);

        assert_eq!(report.result, MatchResult::Unknown);
        assert_eq!(report.winner, None);
        assert_eq!(orch.state(), LauncherState::Menu);
        assert!(orch.session().games[report.game_index].is_played());
        assert_eq!(orch.session().scoreboard.tally(Player::One).score, 0);
        assert_eq!(orch.session().scoreboard.tally(Player::Two).score, 0);
    }

    #[test]
    fn test_failed_launch_still_consumes_turn() {
        let mut orch = orchestrator("faillaunch", vec![Script::FailLaunch]);
        let report = play_round(&mut orch);

        assert_eq!(report.result, MatchResult::Unknown);
        assert!(matches!(report.launch_error, Some(LaunchError::MissingDirectory(_))));
        assert!(orch.session().games[report.game_index].is_played());
        assert_eq!(orch.session().unplayed_count(), 3);
        assert_eq!(orch.device.releases, 1);
        assert_eq!(orch.device.reacquires, 1);
    }

    #[test]
    fn test_full_match_reaches_final_after_four_rounds() {
        let mut orch = orchestrator(
            "full",
            vec![
                Script::Report("1"),
                Script::Report("tie"),
                Script::Report("1"),
                Script::Report("garbage"),
            ],
        );

        let mut played = Vec::new();
        for round in 0..4 {
            let report = play_round(&mut orch);
            assert!(!played.contains(&report.game_index), "game {} played twice", report.game_index);
            played.push(report.game_index);
            let expected = if round < 3 { LauncherState::Menu } else { LauncherState::Final };
            assert_eq!(report.next_state, expected);
        }

        let board = &orch.session().scoreboard;
        assert_eq!(board.tally(Player::One).crowns, 2);
        assert_eq!(board.tally(Player::One).score, 10);
        assert_eq!(board.tally(Player::Two).crowns, 0);
        assert_eq!(board.rounds(), 4);
        assert_eq!(board.leader(), Some(Player::One));
        assert_eq!(orch.runner.launched.len(), 4);
        assert_eq!(orch.device.releases, 4);

        let history = orch.history();
        assert_eq!(history.len(), 4);
        assert!(history[0].contains("Player 1 wins"), "first round: {}", history[0]);
        assert!(history[1].contains("Tie"), "second round: {}", history[1]);
        assert!(history[3].contains("no result"), "last round: {}", history[3]);
        assert!(history[3].ends_with("P1 10 (2 crowns) P2 0 (0 crowns)"), "last round: {}", history[3]);
    }

    #[test]
    fn test_reset_starts_a_fresh_history() {
        let mut orch = orchestrator("history", vec![Script::Report("2"), Script::Report("1")]);
        let first = play_round(&mut orch);
        assert_eq!(orch.history().len(), 1);
        assert!(orch.history()[0].starts_with(&first.game_name));

        orch.reset();
        assert!(orch.history().is_empty(), "history leaked into the new match");

        play_round(&mut orch);
        assert_eq!(orch.history().len(), 1);
        assert!(orch.history()[0].contains("Player 1 wins"));
    }

    #[test]
    fn test_final_is_terminal_until_reset() {
        let mut orch = orchestrator("terminal", vec![]);
        for game in orch.session.games.iter_mut() {
            game.mark_played();
        }

        assert_eq!(orch.request_spin(), LauncherState::Final);
        assert_eq!(orch.request_spin(), LauncherState::Final);
        assert!(!orch.tick());
        assert!(!orch.confirm());
        assert!(orch.play().is_none());
        assert_eq!(orch.state(), LauncherState::Final);

        orch.reset();
        assert_eq!(orch.state(), LauncherState::Menu);
        assert_eq!(orch.session().unplayed_count(), 4);
        assert_eq!(orch.request_spin(), LauncherState::Spinning);
    }

    #[test]
    fn test_out_of_order_inputs_are_ignored() {
        let mut orch = orchestrator("order", vec![Script::Report("1")]);

        assert!(!orch.confirm(), "confirm in Menu");
        assert!(orch.play().is_none(), "play in Menu");
        assert!(!orch.tick(), "tick in Menu");
        assert_eq!(orch.state(), LauncherState::Menu);

        orch.request_spin();
        assert!(!orch.confirm(), "confirm while spinning");
        assert!(orch.play().is_none(), "play while spinning");
        assert_eq!(orch.request_spin(), LauncherState::Spinning, "second spin request is ignored");
        assert!(orch.runner.launched.is_empty());
    }

    #[test]
    fn test_selection_is_fixed_before_animation() {
        let mut orch = orchestrator("fixed", vec![Script::Report("0")]);
        orch.request_spin();
        let picked = orch.selected_game().map(|g| g.id.clone());
        assert!(picked.is_some());

        while !orch.tick() {}
        assert_eq!(orch.selected_game().map(|g| g.id.clone()), picked);
        assert_eq!(orch.session().roulette.pointed_slot(), orch.selected_game().unwrap().slot);

        orch.confirm();
        let report = orch.play().unwrap();
        assert_eq!(Some(orch.session().games[report.game_index].id.clone()), picked);
        assert_eq!(report.result, MatchResult::Draw);
    }

    #[test]
    fn test_stale_result_file_is_ignored() {
        let mut orch = orchestrator("stale", vec![Script::Silent]);
        fs::write(orch.handshake.path(), "1").unwrap();

        let report = play_round(&mut orch);
        assert_eq!(report.result, MatchResult::Unknown, "leftover file must not score");
        assert_eq!(orch.session().scoreboard.tally(Player::One).score, 0);
    }
}

use colored::*;

use crate::play::orchestrator::LauncherState;
use crate::play::scoreboard::{Player, ScoreBoard};
use crate::registry::games::{BoxColor, GameEntry, Slot};
use crate::session::GameSession;

const BOX_WIDTH: usize = 28;
const CROWN: &str = "♛";

// Eight-way arrow for the pointer, 0° pointing right
pub fn pointer_glyph(angle: f64) -> &'static str {
    const ARROWS: [&str; 8] = ["→", "↗", "↑", "↖", "←", "↙", "↓", "↘"];
    let sector = ((angle.rem_euclid(360.0) + 22.5) / 45.0).floor() as usize % ARROWS.len();
    ARROWS[sector]
}

pub fn crown_row(crowns: u32) -> String {
    CROWN.repeat(crowns as usize)
}

pub fn box_label(game: &GameEntry) -> String {
    format!("[ {:<width$} ]", game.display_name, width = BOX_WIDTH - 4)
}

fn tint(text: String, color: BoxColor) -> ColoredString {
    match color {
        BoxColor::Yellow => text.yellow(),
        BoxColor::Red => text.red(),
        BoxColor::Blue => text.blue(),
        BoxColor::Pink => text.magenta(),
    }
}

// Round title in the game's own box color
pub fn game_banner(game: &GameEntry) -> ColoredString {
    tint(format!("═══ {} ═══", game.display_name), game.color)
}

fn paint(game: &GameEntry, highlighted: bool) -> ColoredString {
    let label = box_label(game);

    // played boxes go grey
    let painted = if game.is_played() {
        label.bright_black()
    } else {
        tint(label, game.color)
    };

    if highlighted {
        painted.bold().reversed()
    } else {
        painted
    }
}

fn game_in(session: &GameSession, slot: Slot) -> Option<&GameEntry> {
    session.games.iter().find(|g| g.slot == slot)
}

fn paint_slot(session: &GameSession, slot: Slot, highlighted: Option<Slot>) -> String {
    match game_in(session, slot) {
        Some(game) => paint(game, highlighted == Some(slot)).to_string(),
        None => " ".repeat(BOX_WIDTH),
    }
}

pub fn score_line(board: &ScoreBoard) -> String {
    let p1 = board.tally(Player::One);
    let p2 = board.tally(Player::Two);
    format!(
        "{}: {:<3} {:<8}    {}: {:<3} {}",
        Player::One.short_name().blue().bold(),
        p1.score,
        crown_row(p1.crowns).yellow(),
        Player::Two.short_name().red().bold(),
        p2.score,
        crown_row(p2.crowns).yellow(),
    )
}

pub fn render_board(session: &GameSession, state: LauncherState) {
    let roulette = session.roulette.state();
    let highlighted = match state {
        LauncherState::Spinning | LauncherState::Waiting => Some(session.roulette.pointed_slot()),
        _ => None,
    };

    println!("\n{}", "═══ ♛ Two Player Mini Games Showdown ♛ ═══".bright_cyan().bold());
    println!();
    println!(
        "  {}      {}",
        paint_slot(session, Slot::TopLeft, highlighted),
        paint_slot(session, Slot::TopRight, highlighted)
    );
    println!();
    println!("  {:^width$}", pointer_glyph(roulette.pointer_angle).bright_white().bold(), width = BOX_WIDTH * 2 + 6);
    println!();
    println!(
        "  {}      {}",
        paint_slot(session, Slot::BottomLeft, highlighted),
        paint_slot(session, Slot::BottomRight, highlighted)
    );
    println!();
    println!("  {}", score_line(&session.scoreboard));
    println!();
}

pub fn render_final(session: &GameSession, history: &[String]) {
    let board = &session.scoreboard;

    println!("\n{}", "═══ ♛ FINAL RESULTS ♛ ═══".bright_magenta().bold());
    println!();
    match board.leader() {
        Some(Player::One) => println!("  {} {}", crown_row(1).yellow(), "PLAYER 1 WIN!".blue().bold()),
        Some(Player::Two) => println!("  {} {}", crown_row(1).yellow(), "PLAYER 2 WIN!".red().bold()),
        None => println!("  {}", "TIE GAME!".yellow().bold()),
    }
    println!();
    println!(
        "  Final Score - P1: {}  P2: {}",
        board.tally(Player::One).score,
        board.tally(Player::Two).score
    );

    if !history.is_empty() {
        println!("\n  {}", "Rounds".bright_white().bold());
        for (i, line) in history.iter().enumerate() {
            println!("  {}. {}", (i + 1).to_string().yellow(), line);
        }
    }
    println!();
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::games::default_registry;

    #[test]
    fn test_pointer_glyph_for_slot_angles() {
        assert_eq!(pointer_glyph(135.0), "↖");
        assert_eq!(pointer_glyph(45.0), "↗");
        assert_eq!(pointer_glyph(225.0), "↙");
        assert_eq!(pointer_glyph(315.0), "↘");
    }

    #[test]
    fn test_pointer_glyph_wraps_unbounded_angles() {
        assert_eq!(pointer_glyph(0.0), "→");
        assert_eq!(pointer_glyph(359.0), "→");
        assert_eq!(pointer_glyph(1800.0 + 90.0), "↑");
        assert_eq!(pointer_glyph(-90.0), "↓");
    }

    #[test]
    fn test_crown_row_stacks() {
        assert_eq!(crown_row(0), "");
        assert_eq!(crown_row(3), "♛♛♛");
    }

    #[test]
    fn test_game_banner_names_the_game() {
        let game = default_registry().remove(2);
        let banner = game_banner(&game).to_string();
        assert!(banner.contains(&format!("═══ {} ═══", game.display_name)), "banner {:?}", banner);
    }

    #[test]
    fn test_box_label_is_fixed_width() {
        for game in default_registry() {
            assert_eq!(box_label(&game).chars().count(), BOX_WIDTH, "label for {}", game.id);
        }
    }
}

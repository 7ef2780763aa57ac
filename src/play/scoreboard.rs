use std::fmt;

use crate::play::handshake::MatchResult;

// Score added to the winner of a round, alongside one crown
pub const POINTS_PER_WIN: u32 = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Player {
    One,
    Two,
}

impl Player {
    pub fn short_name(self) -> &'static str {
        match self {
            Player::One => "P1",
            Player::Two => "P2",
        }
    }
}

impl fmt::Display for Player {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Player::One => write!(f, "Player 1"),
            Player::Two => write!(f, "Player 2"),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Tally {
    pub score: u32,
    pub crowns: u32,
}

/// Running totals for the two players. Only ever grows.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScoreBoard {
    player1: Tally,
    player2: Tally,
    rounds: u32,
}

impl ScoreBoard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn tally(&self, player: Player) -> Tally {
        match player {
            Player::One => self.player1,
            Player::Two => self.player2,
        }
    }

    pub fn rounds(&self) -> u32 {
        self.rounds
    }

    // Draws and unknown results count as a round but score nothing
    pub fn record(&mut self, result: MatchResult) -> Option<Player> {
        self.rounds += 1;

        let winner = result.winner()?;
        let tally = match winner {
            Player::One => &mut self.player1,
            Player::Two => &mut self.player2,
        };
        tally.score += POINTS_PER_WIN;
        tally.crowns += 1;

        Some(winner)
    }

    /// Player ahead on score, `None` when level.
    pub fn leader(&self) -> Option<Player> {
        if self.player1.score > self.player2.score {
            Some(Player::One)
        } else if self.player2.score > self.player1.score {
            Some(Player::Two)
        } else {
            None
        }
    }
}

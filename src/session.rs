use crate::play::roulette::RouletteSelector;
use crate::play::scoreboard::ScoreBoard;
use crate::registry::games::GameEntry;

/// Everything one match mutates: the games and their played flags, the
/// roulette pointer and the scores.
#[derive(Debug, Clone)]
pub struct GameSession {
    pub games: Vec<GameEntry>,
    pub roulette: RouletteSelector,
    pub scoreboard: ScoreBoard,
}

impl GameSession {
    pub fn new(games: Vec<GameEntry>) -> Self {
        GameSession {
            games,
            roulette: RouletteSelector::new(),
            scoreboard: ScoreBoard::new(),
        }
    }

    pub fn unplayed_count(&self) -> usize {
        self.games.iter().filter(|g| !g.is_played()).count()
    }

    pub fn all_played(&self) -> bool {
        self.unplayed_count() == 0
    }

    // Same registry, nothing played, scores at zero
    pub fn restarted(&self) -> Self {
        GameSession::new(self.games.iter().map(GameEntry::fresh).collect())
    }
}

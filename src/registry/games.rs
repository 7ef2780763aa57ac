use std::path::PathBuf;

// Program name that is swapped for the configured interpreter at launch time
pub const PYTHON_PLACEHOLDER: &str = "python";

/// One of the four fixed box positions around the roulette pointer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Slot {
    TopLeft,
    TopRight,
    BottomLeft,
    BottomRight,
}

impl Slot {
    pub const ALL: [Slot; 4] = [Slot::TopLeft, Slot::TopRight, Slot::BottomLeft, Slot::BottomRight];

    pub fn from_index(index: usize) -> Option<Slot> {
        Slot::ALL.get(index).copied()
    }

    pub fn index(self) -> usize {
        match self {
            Slot::TopLeft => 0,
            Slot::TopRight => 1,
            Slot::BottomLeft => 2,
            Slot::BottomRight => 3,
        }
    }

    /// Pointer angle in degrees, counter-clockwise from the positive x axis.
    pub fn angle(self) -> f64 {
        match self {
            Slot::TopLeft => 135.0,
            Slot::TopRight => 45.0,
            Slot::BottomLeft => 225.0,
            Slot::BottomRight => 315.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BoxColor {
    Yellow,
    Red,
    Blue,
    Pink,
}

impl BoxColor {
    pub const KEYS: [&'static str; 4] = ["yellow", "red", "blue", "pink"];

    pub fn from_key(key: &str) -> Option<BoxColor> {
        match key.trim().to_lowercase().as_str() {
            "yellow" => Some(BoxColor::Yellow),
            "red" => Some(BoxColor::Red),
            "blue" => Some(BoxColor::Blue),
            "pink" => Some(BoxColor::Pink),
            _ => None,
        }
    }

    pub fn key(self) -> &'static str {
        match self {
            BoxColor::Yellow => "yellow",
            BoxColor::Red => "red",
            BoxColor::Blue => "blue",
            BoxColor::Pink => "pink",
        }
    }
}

/// How to start a minigame: run `program args..` from `dir` (relative to the games root).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LaunchSpec {
    pub dir: PathBuf,
    pub program: String,
    pub args: Vec<String>,
}

impl LaunchSpec {
    pub fn python<I, S>(dir: &str, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        LaunchSpec {
            dir: PathBuf::from(dir),
            program: PYTHON_PLACEHOLDER.to_string(),
            args: args.into_iter().map(Into::into).collect(),
        }
    }

    pub fn uses_python(&self) -> bool {
        self.program == PYTHON_PLACEHOLDER
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct GameEntry {
    pub id: String,
    pub display_name: String,
    pub color: BoxColor,
    pub slot: Slot,
    pub launch: LaunchSpec,
    played: bool,
}

impl GameEntry {
    pub fn new(id: &str, display_name: &str, color: BoxColor, slot: Slot, launch: LaunchSpec) -> Self {
        GameEntry {
            id: id.to_string(),
            display_name: display_name.to_string(),
            color,
            slot,
            launch,
            played: false,
        }
    }

    pub fn is_played(&self) -> bool {
        self.played
    }

    // Returns false when the entry was already played
    pub fn mark_played(&mut self) -> bool {
        if self.played {
            return false;
        }
        self.played = true;
        true
    }

    /// Same game, not yet played. Used when a whole new match is started.
    pub fn fresh(&self) -> Self {
        GameEntry {
            played: false,
            ..self.clone()
        }
    }
}

// The four minigames shipped next to the launcher, in slot order
pub fn default_registry() -> Vec<GameEntry> {
    vec![
        GameEntry::new(
            "counting_butterfly",
            "Counting Butterfly",
            BoxColor::Yellow,
            Slot::TopLeft,
            LaunchSpec::python("Counting-Butterfly-Two-Player-Game-fresh", ["-u", "counting_butterfly.py"]),
        ),
        GameEntry::new(
            "double_maze",
            "Double Maze",
            BoxColor::Red,
            Slot::TopRight,
            LaunchSpec::python("Double-Maze", ["-u", "maze_game.py"]),
        ),
        GameEntry::new(
            "coin_collectors",
            "Coin Collectors",
            BoxColor::Blue,
            Slot::BottomLeft,
            LaunchSpec::python("pixel-coin-collectors", ["-u", "-m", "game.main"]),
        ),
        // Tug Of War resolves "src/assets/..." so it runs from the folder above src
        GameEntry::new(
            "tug_of_war",
            "Tug Of War",
            BoxColor::Pink,
            Slot::BottomRight,
            LaunchSpec::python("Tug-Of-War-Game", ["-u", "src/main.py"]),
        ),
    ]
}

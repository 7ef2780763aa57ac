use rand::Rng;

use crate::logger::logger;
use crate::registry::games::{GameEntry, Slot};

// Degrees per tick right after a spin starts
pub const INITIAL_SPIN_SPEED: f64 = 25.0;
// Floor on the per-tick step so the spin always finishes
pub const MIN_SPIN_SPEED: f64 = 0.5;
// Per-tick step is the remaining distance divided by this
pub const DECELERATION: f64 = 40.0;
pub const MIN_EXTRA_TURNS: u32 = 3;
pub const MAX_EXTRA_TURNS: u32 = 5;

const FULL_TURN: f64 = 360.0;

/// Pointer state. Angles are degrees and never wrapped, the pointer only
/// ever moves forward.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RouletteState {
    pub pointer_angle: f64,
    pub target_angle: f64,
    pub spin_speed: f64,
    pub spinning: bool,
    pub selected: Option<usize>,
}

#[derive(Debug, Clone, Default)]
pub struct RouletteSelector {
    state: RouletteState,
}

impl RouletteSelector {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &RouletteState {
        &self.state
    }

    #[cfg(test)]
    pub fn is_spinning(&self) -> bool {
        self.state.spinning
    }

    /// Picks an unplayed game and aims the pointer at its slot.
    ///
    /// The pick is final: the animation that follows only has to land on it.
    /// Returns `None` without touching the state when every game is played.
    pub fn start_spin<R: Rng>(&mut self, games: &[GameEntry], rng: &mut R) -> Option<usize> {
        let available: Vec<usize> = games
            .iter()
            .enumerate()
            .filter(|(_, g)| !g.is_played())
            .map(|(i, _)| i)
            .collect();

        if available.is_empty() {
            logger::info("Spin requested with no unplayed games left");
            return None;
        }

        let selected = available[rng.random_range(0..available.len())];
        let slot_angle = games[selected].slot.angle();

        let extra_turns = rng.random_range(MIN_EXTRA_TURNS..=MAX_EXTRA_TURNS);
        let pointer = self.state.pointer_angle;
        let mut target = pointer + FULL_TURN * f64::from(extra_turns) + (slot_angle - pointer.rem_euclid(FULL_TURN));

        // forward only
        if target - pointer < 0.0 {
            target += FULL_TURN;
        }

        self.state = RouletteState {
            pointer_angle: pointer,
            target_angle: target,
            spin_speed: INITIAL_SPIN_SPEED,
            spinning: true,
            selected: Some(selected),
        };

        logger::info(&format!(
            "Roulette picked {} ({} box, slot {}, {} extra turns, target {:.1}°)",
            games[selected].display_name,
            games[selected].color.key(),
            games[selected].slot.index(),
            extra_turns,
            target
        ));

        Some(selected)
    }

    /// Advances the pointer by one tick. Returns true on the tick the pointer
    /// lands on the target, false on every other call.
    pub fn update(&mut self) -> bool {
        if !self.state.spinning {
            return false;
        }

        let remaining = self.state.target_angle - self.state.pointer_angle;
        self.state.spin_speed = (remaining / DECELERATION).max(MIN_SPIN_SPEED);
        self.state.pointer_angle += self.state.spin_speed;

        if self.state.pointer_angle >= self.state.target_angle {
            self.state.pointer_angle = self.state.target_angle;
            self.state.spin_speed = 0.0;
            self.state.spinning = false;
            return true;
        }

        false
    }

    /// Slot whose angle is closest to where the pointer currently points.
    pub fn pointed_slot(&self) -> Slot {
        let angle = self.state.pointer_angle.rem_euclid(FULL_TURN);
        let distance = |slot: &Slot| {
            let d = (slot.angle() - angle).abs();
            d.min(FULL_TURN - d)
        };

        Slot::ALL
            .iter()
            .copied()
            .min_by(|a, b| distance(a).total_cmp(&distance(b)))
            .unwrap_or(Slot::TopLeft)
    }
}

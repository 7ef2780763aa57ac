use crate::registry::games::{BoxColor, GameEntry, Slot};

// Registry validation result
pub type RegistryValidationResult = Result<(), String>;

// The roulette has exactly one box per slot
pub const REGISTRY_SIZE: usize = Slot::ALL.len();

// Limits for registry fields
const MAX_ID_LENGTH: usize = 32;
const MAX_DISPLAY_NAME_LENGTH: usize = 24;

// Validate a game id: lowercase ascii, digits and underscores only
pub fn validate_game_id(id: &str) -> RegistryValidationResult {
    if id.trim().is_empty() {
        return Err("❌ Game id cannot be empty!".to_string());
    }

    if id.len() > MAX_ID_LENGTH {
        return Err(format!("❌ Game id cannot exceed {} characters!", MAX_ID_LENGTH));
    }

    if !id.chars().all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '_') {
        return Err(format!("❌ Invalid game id '{}'! Use lowercase letters, digits and '_'", id));
    }

    Ok(())
}

// Validate the name printed inside a roulette box
pub fn validate_display_name(name: &str) -> RegistryValidationResult {
    if name.trim().is_empty() {
        return Err("❌ Display name cannot be empty!".to_string());
    }

    if name.chars().count() > MAX_DISPLAY_NAME_LENGTH {
        return Err(format!(
            "❌ Display name '{}' cannot exceed {} characters!",
            name, MAX_DISPLAY_NAME_LENGTH
        ));
    }

    Ok(())
}

// Validate a color key against the known box colors
pub fn validate_color_key(key: &str) -> RegistryValidationResult {
    if BoxColor::from_key(key).is_none() {
        return Err(format!(
            "❌ Invalid box color '{}'! Allowed colors: {}",
            key,
            BoxColor::KEYS.join(", ")
        ));
    }

    Ok(())
}

// Validate a slot index read from configuration
pub fn validate_slot_index(index: usize) -> RegistryValidationResult {
    if Slot::from_index(index).is_none() {
        return Err(format!("❌ Slot must be between 0 and {}!", REGISTRY_SIZE - 1));
    }

    Ok(())
}

// Validate the full registry: one game per slot, unique ids, runnable launch specs
pub fn validate_registry(games: &[GameEntry]) -> RegistryValidationResult {
    if games.len() != REGISTRY_SIZE {
        return Err(format!(
            "❌ Registry must list exactly {} games, found {}!",
            REGISTRY_SIZE,
            games.len()
        ));
    }

    for slot in Slot::ALL {
        let count = games.iter().filter(|g| g.slot == slot).count();
        if count != 1 {
            return Err(format!("❌ Slot {} must hold exactly one game, found {}!", slot.index(), count));
        }
    }

    for (i, game) in games.iter().enumerate() {
        validate_game_id(&game.id)?;
        validate_display_name(&game.display_name)?;

        if games[..i].iter().any(|other| other.id == game.id) {
            return Err(format!("❌ Duplicate game id '{}'!", game.id));
        }

        if game.launch.program.trim().is_empty() {
            return Err(format!("❌ Game '{}' has no program to launch!", game.id));
        }

        if game.launch.dir.as_os_str().is_empty() {
            return Err(format!("❌ Game '{}' has no working directory!", game.id));
        }
    }

    Ok(())
}

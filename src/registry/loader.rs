use std::fmt;
use std::fs::File;
use std::path::{Path, PathBuf};

use csv::{ReaderBuilder, StringRecord};

use crate::logger::logger;
use crate::registry::games::{default_registry, BoxColor, GameEntry, LaunchSpec, Slot};
use crate::validation::registry_validation;

// slot,id,display_name,color,dir,program,args
const COLUMNS: usize = 7;

#[derive(Debug)]
pub enum RegistryError {
    Open { path: PathBuf, source: std::io::Error },
    Csv(csv::Error),
    Row { line: u64, message: String },
    Invalid(String),
}

impl fmt::Display for RegistryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RegistryError::Open { path, source } => {
                write!(f, "cannot open registry {}: {}", path.display(), source)
            }
            RegistryError::Csv(e) => write!(f, "malformed registry csv: {}", e),
            RegistryError::Row { line, message } => write!(f, "registry line {}: {}", line, message),
            RegistryError::Invalid(message) => write!(f, "invalid registry: {}", message),
        }
    }
}

impl std::error::Error for RegistryError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            RegistryError::Open { source, .. } => Some(source),
            RegistryError::Csv(e) => Some(e),
            _ => None,
        }
    }
}

impl From<csv::Error> for RegistryError {
    fn from(e: csv::Error) -> Self {
        RegistryError::Csv(e)
    }
}

// Built-in registry unless a CSV override is configured
pub fn load_registry(path: Option<&Path>) -> Result<Vec<GameEntry>, RegistryError> {
    match path {
        Some(path) => {
            let games = load_registry_csv(path)?;
            logger::info(&format!("Loaded game registry from {}", path.display()));
            Ok(games)
        }
        None => {
            let games = default_registry();
            registry_validation::validate_registry(&games).map_err(RegistryError::Invalid)?;
            Ok(games)
        }
    }
}

pub fn load_registry_csv(path: &Path) -> Result<Vec<GameEntry>, RegistryError> {
    let file = File::open(path).map_err(|source| RegistryError::Open {
        path: path.to_path_buf(),
        source,
    })?;

    let mut rdr = ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_reader(file);

    let mut games = Vec::new();
    for result in rdr.records() {
        let record = result?;
        games.push(parse_row(&record)?);
    }

    registry_validation::validate_registry(&games).map_err(RegistryError::Invalid)?;

    // Registry index doubles as slot index from here on
    games.sort_by_key(|g| g.slot.index());
    Ok(games)
}

fn parse_row(record: &StringRecord) -> Result<GameEntry, RegistryError> {
    let line = record.position().map(|p| p.line()).unwrap_or(0);
    let row_error = |message: String| RegistryError::Row { line, message };

    if record.len() < COLUMNS {
        return Err(row_error(format!("expected {} columns, found {}", COLUMNS, record.len())));
    }

    let field = |i: usize| record.get(i).unwrap_or("");

    let slot_index: usize = field(0)
        .parse()
        .map_err(|_| row_error(format!("slot '{}' is not a number", field(0))))?;
    registry_validation::validate_slot_index(slot_index).map_err(row_error)?;
    let slot = Slot::from_index(slot_index).ok_or_else(|| row_error(format!("no slot {}", slot_index)))?;

    registry_validation::validate_color_key(field(3)).map_err(row_error)?;
    let color = BoxColor::from_key(field(3)).ok_or_else(|| row_error(format!("no color '{}'", field(3))))?;

    let launch = LaunchSpec {
        dir: PathBuf::from(field(4)),
        program: field(5).to_string(),
        args: field(6).split_whitespace().map(str::to_string).collect(),
    };

    Ok(GameEntry::new(field(1), field(2), color, slot, launch))
}

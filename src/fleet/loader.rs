//! Load fleet definitions from TOML files

use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::core::error::Result;
use crate::model::Ship;

#[derive(Debug, Deserialize)]
struct FleetFile {
    ships: Vec<Ship>,
}

/// Load an ordered fleet from a TOML file
///
/// Every ship is validated after parsing; a bad stat or malformed battery
/// dice aborts the run before the battle starts.
pub fn load_fleet(path: &Path) -> Result<Vec<Ship>> {
    let content = fs::read_to_string(path)?;
    let file: FleetFile = toml::from_str(&content)?;
    for ship in &file.ships {
        ship.validate()?;
    }
    Ok(file.ships)
}

//! Species and move lookups.
//!
//! The engine only ever sees the `Catalog` trait. `RonCatalog` is the bundled
//! implementation, backed by a RON document such as `data/catalog.ron`.

use crate::errors::{CatalogError, CatalogResult};
use schema::{MoveData, SpeciesData};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;
use tracing::debug;

/// Name-based lookup of immutable species and move definitions.
/// Names are matched case-insensitively.
pub trait Catalog {
    fn species(&self, name: &str) -> CatalogResult<SpeciesData>;
    fn move_data(&self, name: &str) -> CatalogResult<MoveData>;
}

/// On-disk layout of a catalog file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CatalogFile {
    pub species: Vec<SpeciesData>,
    pub moves: Vec<MoveData>,
}

#[derive(Debug, Clone, Default)]
pub struct RonCatalog {
    species: HashMap<String, SpeciesData>,
    moves: HashMap<String, MoveData>,
}

fn key(name: &str) -> String {
    name.trim().to_lowercase()
}

impl RonCatalog {
    pub fn from_ron_str(source: &str) -> CatalogResult<Self> {
        let file: CatalogFile =
            ron::from_str(source).map_err(|err| CatalogError::Parse(err.to_string()))?;
        Self::from_file(file)
    }

    pub fn load(path: impl AsRef<Path>) -> CatalogResult<Self> {
        let path = path.as_ref();
        let source = std::fs::read_to_string(path)
            .map_err(|err| CatalogError::Io(format!("{}: {}", path.display(), err)))?;
        let catalog = Self::from_ron_str(&source)?;
        debug!(
            path = %path.display(),
            species = catalog.species.len(),
            moves = catalog.moves.len(),
            "catalog loaded"
        );
        Ok(catalog)
    }

    /// Build a catalog from already-parsed records, validating each one.
    pub fn from_file(file: CatalogFile) -> CatalogResult<Self> {
        let mut catalog = RonCatalog::default();

        for move_data in file.moves {
            let name = key(&move_data.name);
            if catalog.moves.contains_key(&name) {
                return Err(CatalogError::MalformedData(format!(
                    "duplicate move '{}'",
                    move_data.name
                )));
            }
            catalog.moves.insert(name, move_data);
        }

        for species in file.species {
            validate_species(&species)?;
            let name = key(&species.name);
            if catalog.species.contains_key(&name) {
                return Err(CatalogError::MalformedData(format!(
                    "duplicate species '{}'",
                    species.name
                )));
            }
            catalog.species.insert(name, species);
        }

        Ok(catalog)
    }

    /// Species names in alphabetical order.
    pub fn species_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.species.values().map(|s| s.name.as_str()).collect();
        names.sort_unstable();
        names
    }
}

fn validate_species(species: &SpeciesData) -> CatalogResult<()> {
    if species.types.is_empty() || species.types.len() > 2 {
        return Err(CatalogError::MalformedData(format!(
            "{} must have one or two types, found {}",
            species.name,
            species.types.len()
        )));
    }
    if species.base_stats.hp == 0 {
        return Err(CatalogError::MalformedData(format!(
            "{} has an hp base stat of 0",
            species.name
        )));
    }
    if species.moves.is_empty() {
        return Err(CatalogError::MalformedData(format!(
            "{} knows no moves",
            species.name
        )));
    }
    Ok(())
}

impl Catalog for RonCatalog {
    fn species(&self, name: &str) -> CatalogResult<SpeciesData> {
        self.species
            .get(&key(name))
            .cloned()
            .ok_or_else(|| CatalogError::UnknownCreature(name.to_string()))
    }

    fn move_data(&self, name: &str) -> CatalogResult<MoveData> {
        self.moves
            .get(&key(name))
            .cloned()
            .ok_or_else(|| CatalogError::UnknownMove(name.to_string()))
    }
}

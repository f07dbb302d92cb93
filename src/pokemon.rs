use crate::catalog::Catalog;
use crate::errors::{CatalogError, CatalogResult};
use schema::{BaseStats, MoveData, PokemonType, StatusType};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::num::NonZeroU8;

/// Most moves a Pokemon can know in battle.
pub const MAX_MOVES: usize = 4;

/// A non-volatile status together with its countdown.
///
/// A countdown without a status cannot be expressed. A status may have no
/// countdown, in which case it never expires on its own.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusCondition {
    pub kind: StatusType,
    pub turns_remaining: Option<NonZeroU8>,
}

impl StatusCondition {
    pub fn new(kind: StatusType, turns: u8) -> Self {
        Self {
            kind,
            turns_remaining: NonZeroU8::new(turns),
        }
    }

    pub fn indefinite(kind: StatusType) -> Self {
        Self {
            kind,
            turns_remaining: None,
        }
    }
}

impl fmt::Display for StatusCondition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.turns_remaining {
            Some(turns) => write!(f, "{} ({} turns)", self.kind, turns),
            None => write!(f, "{}", self.kind),
        }
    }
}

/// A combatant snapshot: one Pokemon as it exists for the length of an encounter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PokemonInst {
    pub name: String,
    pub level: u8,
    pub base_stats: BaseStats,
    current_hp: u16,
    pub types: Vec<PokemonType>,
    pub moves: Vec<MoveData>,
    pub status: Option<StatusCondition>,
    pub experience: u32,
    pub base_catch_rate: u8,
}

impl PokemonInst {
    /// Build a full-health snapshot from catalog data.
    /// The species' first four moves are resolved; any missing move aborts.
    pub fn from_catalog(catalog: &dyn Catalog, name: &str, level: u8) -> CatalogResult<Self> {
        let species = catalog.species(name)?;
        let moves = species
            .moves
            .iter()
            .take(MAX_MOVES)
            .map(|move_name| catalog.move_data(move_name))
            .collect::<CatalogResult<Vec<_>>>()?;

        if moves.is_empty() {
            return Err(CatalogError::MalformedData(format!(
                "{} knows no moves",
                species.name
            )));
        }

        Ok(Self {
            name: species.name,
            level: level.max(1),
            base_stats: species.base_stats,
            current_hp: species.base_stats.hp,
            types: species.types,
            moves,
            status: None,
            experience: 0,
            base_catch_rate: species.capture_rate,
        })
    }

    /// Rebuild a snapshot from a stored capture record.
    /// A record without moves cannot battle and is rejected.
    pub fn from_record(record: &CaughtPokemon) -> CatalogResult<Self> {
        if record.moves.is_empty() {
            return Err(CatalogError::MalformedData(format!(
                "{} knows no moves",
                record.name
            )));
        }

        let mut pokemon = Self {
            name: record.name.clone(),
            level: record.level.max(1),
            base_stats: record.stats,
            current_hp: 0,
            types: record.types.clone(),
            moves: record.moves.iter().take(MAX_MOVES).cloned().collect(),
            status: record.status,
            experience: record.experience,
            base_catch_rate: record.base_catch_rate,
        };
        pokemon.set_hp(record.current_hp);
        Ok(pokemon)
    }

    /// Persistence record for this snapshot.
    pub fn to_record(&self) -> CaughtPokemon {
        CaughtPokemon {
            name: self.name.clone(),
            level: self.level,
            experience: self.experience,
            base_catch_rate: self.base_catch_rate,
            stats: self.base_stats,
            types: self.types.clone(),
            moves: self.moves.clone(),
            current_hp: self.current_hp,
            status: self.status,
        }
    }

    /// The hp base stat, fixed for the battle.
    pub fn max_hp(&self) -> u16 {
        self.base_stats.hp
    }

    pub fn current_hp(&self) -> u16 {
        self.current_hp
    }

    /// Set HP, clamped to `0..=max_hp`.
    pub fn set_hp(&mut self, hp: u16) {
        self.current_hp = hp.min(self.max_hp());
    }

    /// Apply damage, clamping at zero. Returns true if this caused the Pokemon to faint.
    pub fn take_damage(&mut self, damage: u16) -> bool {
        let was_fainted = self.is_fainted();
        self.current_hp = self.current_hp.saturating_sub(damage);
        !was_fainted && self.is_fainted()
    }

    pub fn is_fainted(&self) -> bool {
        self.current_hp == 0
    }

    pub fn has_type(&self, pokemon_type: PokemonType) -> bool {
        self.types.contains(&pokemon_type)
    }

    /// Zero-based lookup of a known move.
    pub fn move_at(&self, index: usize) -> Option<&MoveData> {
        self.moves.get(index)
    }
}

/// Everything needed to store a caught Pokemon and rebuild it later.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CaughtPokemon {
    pub name: String,
    pub level: u8,
    pub experience: u32,
    pub base_catch_rate: u8,
    pub stats: BaseStats,
    pub types: Vec<PokemonType>,
    pub moves: Vec<MoveData>,
    pub current_hp: u16,
    pub status: Option<StatusCondition>,
}

impl CaughtPokemon {
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    pub fn from_json(source: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(source)
    }
}

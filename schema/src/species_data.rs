use crate::pokemon_types::PokemonType;
use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StatType {
    Hp,
    Attack,
    Defense,
    SpecialAttack,
    SpecialDefense,
    Speed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct BaseStats {
    pub hp: u16,
    pub attack: u16,
    pub defense: u16,
    pub special_attack: u16,
    pub special_defense: u16,
    pub speed: u16,
}

impl BaseStats {
    pub fn get(&self, stat: StatType) -> u16 {
        match stat {
            StatType::Hp => self.hp,
            StatType::Attack => self.attack,
            StatType::Defense => self.defense,
            StatType::SpecialAttack => self.special_attack,
            StatType::SpecialDefense => self.special_defense,
            StatType::Speed => self.speed,
        }
    }
}

/// Species-level record supplied by the catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpeciesData {
    pub name: String,
    pub types: Vec<PokemonType>,
    pub base_stats: BaseStats,
    pub capture_rate: u8,
    /// Used as a proxy for experience when spawning wild Pokemon.
    pub base_happiness: u16,
    /// Move names in learn order. Only the first four are used in battle.
    pub moves: Vec<String>,
}

use serde::{Deserialize, Serialize};
use std::fmt;
use strum::{EnumIter, EnumString};

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Hash, EnumString, EnumIter,
)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum PokemonType {
    Normal,
    Fighting,
    Flying,
    Poison,
    Ground,
    Rock,
    Bug,
    Ghost,
    Steel,
    Fire,
    Water,
    Grass,
    Electric,
    Psychic,
    Ice,
    Dragon,
    Dark,
    Fairy,
}

impl fmt::Display for PokemonType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self)
    }
}

impl PokemonType {
    /// Chart entry for an attacking type against a single defending type.
    /// Returns: 2.0 = Super Effective, 1.0 = Normal, 0.5 = Not Very Effective, 0.0 = No Effect
    ///
    /// Pairs without an entry are neutral.
    pub fn type_effectiveness(attacking: PokemonType, defending: PokemonType) -> f64 {
        use PokemonType::*;

        match (attacking, defending) {
            // Normal
            (Normal, Ghost) => 0.0,
            (Normal, Rock) | (Normal, Steel) => 0.5,
            (Normal, _) => 1.0,

            // Fire
            (Fire, Fire) | (Fire, Water) | (Fire, Dragon) => 0.5,
            (Fire, Grass) | (Fire, Ice) | (Fire, Bug) | (Fire, Fairy) => 2.0,
            (Fire, _) => 1.0,

            // Water
            (Water, Water) | (Water, Grass) | (Water, Dragon) => 0.5,
            (Water, Fire) | (Water, Ground) | (Water, Rock) => 2.0,
            (Water, _) => 1.0,

            // Grass
            (Grass, Fire)
            | (Grass, Grass)
            | (Grass, Poison)
            | (Grass, Flying)
            | (Grass, Bug)
            | (Grass, Dragon)
            | (Grass, Steel) => 0.5,
            (Grass, Water) | (Grass, Ground) | (Grass, Rock) => 2.0,
            (Grass, _) => 1.0,

            // Electric
            (Electric, Electric) | (Electric, Grass) | (Electric, Dragon) => 0.5,
            (Electric, Ground) => 0.0,
            (Electric, Water) => 2.0,
            (Electric, _) => 1.0,

            // Ice
            (Ice, Fire) | (Ice, Water) | (Ice, Ice) | (Ice, Steel) => 0.5,
            (Ice, Grass) | (Ice, Ground) | (Ice, Flying) | (Ice, Dragon) => 2.0,
            (Ice, _) => 1.0,

            // Fighting
            (Fighting, Flying) | (Fighting, Psychic) | (Fighting, Fairy) => 0.5,
            (Fighting, Normal) | (Fighting, Rock) | (Fighting, Dark) => 2.0,
            (Fighting, _) => 1.0,

            // Poison
            (Poison, Poison) | (Poison, Ground) | (Poison, Rock) | (Poison, Ghost) => 0.5,
            (Poison, Grass) => 2.0,
            (Poison, _) => 1.0,

            // Ground
            (Ground, Grass) | (Ground, Rock) | (Ground, Bug) => 0.5,
            (Ground, Flying) => 0.0,
            (Ground, Fire) | (Ground, Electric) | (Ground, Poison) => 2.0,
            (Ground, _) => 1.0,

            // Flying
            (Flying, Electric) | (Flying, Rock) | (Flying, Steel) => 0.5,
            (Flying, Fighting) | (Flying, Grass) | (Flying, Bug) => 2.0,
            (Flying, _) => 1.0,

            // Psychic
            (Psychic, Dark) => 0.5,
            (Psychic, Fighting) | (Psychic, Poison) => 2.0,
            (Psychic, _) => 1.0,

            // Bug
            (Bug, Fire)
            | (Bug, Fighting)
            | (Bug, Flying)
            | (Bug, Rock)
            | (Bug, Ghost)
            | (Bug, Steel)
            | (Bug, Fairy) => 0.5,
            (Bug, _) => 1.0,

            // Rock
            (Rock, Water) | (Rock, Fighting) | (Rock, Ground) | (Rock, Steel) => 0.5,
            (Rock, Normal) | (Rock, Fire) | (Rock, Flying) | (Rock, Bug) => 2.0,
            (Rock, _) => 1.0,

            // Ghost
            (Ghost, Normal) => 0.0,
            (Ghost, Dark) => 0.5,
            (Ghost, Ghost) | (Ghost, Psychic) => 2.0,
            (Ghost, _) => 1.0,

            // Dragon
            (Dragon, Grass) | (Dragon, Fairy) => 0.5,
            (Dragon, Fire)
            | (Dragon, Water)
            | (Dragon, Electric)
            | (Dragon, Ice)
            | (Dragon, Dragon) => 2.0,
            (Dragon, _) => 1.0,

            // Dark
            (Dark, Fighting) | (Dark, Dark) | (Dark, Fairy) => 0.5,
            (Dark, Ghost) => 2.0,
            (Dark, _) => 1.0,

            // Steel
            (Steel, Fire) | (Steel, Water) | (Steel, Electric) | (Steel, Steel) => 0.5,
            (Steel, Ice) | (Steel, Rock) | (Steel, Fairy) => 2.0,
            (Steel, _) => 1.0,

            // Fairy
            (Fairy, Poison) | (Fairy, Fire) | (Fairy, Steel) => 0.5,
            (Fairy, Fighting) | (Fairy, Dark) | (Fairy, Dragon) => 2.0,
            (Fairy, _) => 1.0,
        }
    }

    /// Combined multiplier of an attacking type against every type of a defender.
    /// An empty type list is neutral.
    pub fn effectiveness(attacking: PokemonType, defending: &[PokemonType]) -> f64 {
        defending
            .iter()
            .fold(1.0, |total, &defender| {
                total * Self::type_effectiveness(attacking, defender)
            })
    }

    pub fn is_immune(attacking: PokemonType, defending: &[PokemonType]) -> bool {
        Self::effectiveness(attacking, defending) == 0.0
    }
}

use crate::pokemon_types::PokemonType;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, EnumString, Display)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum MoveCategory {
    Physical,
    Special,
    Status,
}

/// Immutable definition of a move as supplied by the catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MoveData {
    pub name: String,
    /// `None` for moves that deal no direct damage.
    #[serde(default)]
    pub power: Option<u16>,
    pub move_type: PokemonType,
    pub category: MoveCategory,
    /// Percent chance to hit; `None` means the move never misses.
    #[serde(default)]
    pub accuracy: Option<u8>,
}

impl MoveData {
    /// Power usable by the damage formula. Zero power counts as no power.
    pub fn damaging_power(&self) -> Option<u16> {
        self.power.filter(|&power| power > 0)
    }

    pub fn is_damaging(&self) -> bool {
        self.damaging_power().is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_move(power: Option<u16>) -> MoveData {
        MoveData {
            name: "test-move".to_string(),
            power,
            move_type: PokemonType::Normal,
            category: MoveCategory::Physical,
            accuracy: Some(100),
        }
    }

    #[test]
    fn test_zero_power_is_not_damaging() {
        assert!(!make_move(None).is_damaging());
        assert!(!make_move(Some(0)).is_damaging());
        assert_eq!(make_move(Some(40)).damaging_power(), Some(40));
    }
}

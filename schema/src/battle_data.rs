use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};

/// Non-volatile status conditions. Only one can be active at a time.
#[derive(
    Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, EnumIter,
)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum StatusType {
    Poisoned,
    Paralyzed,
    Asleep,
    Burned,
    Frozen,
}

/// The built-in capture devices.
#[derive(
    Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, EnumIter,
)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum BallType {
    Pokeball,
    Greatball,
    Ultraball,
}

impl BallType {
    pub fn catch_rate_modifier(self) -> f64 {
        match self {
            BallType::Pokeball => 1.0,
            BallType::Greatball => 1.5,
            BallType::Ultraball => 2.0,
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            BallType::Pokeball => "Standard effectiveness",
            BallType::Greatball => "Better than standard",
            BallType::Ultraball => "Highest effectiveness",
        }
    }

    pub fn pokeball(self) -> Pokeball {
        Pokeball {
            name: self.to_string(),
            catch_rate_modifier: self.catch_rate_modifier(),
            description: Some(self.description().to_string()),
        }
    }
}

/// A capture device as seen by the catch calculator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Pokeball {
    pub name: String,
    pub catch_rate_modifier: f64,
    #[serde(default)]
    pub description: Option<String>,
}

impl From<BallType> for Pokeball {
    fn from(ball: BallType) -> Self {
        ball.pokeball()
    }
}

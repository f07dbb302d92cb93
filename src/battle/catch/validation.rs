use crate::battle::state::{BattleState, Side};
use crate::errors::CatchError;
use schema::BallType;
use std::str::FromStr;

/// Resolve a ball name typed by the player.
pub fn parse_ball(name: &str) -> Result<BallType, CatchError> {
    BallType::from_str(name.trim())
        .map_err(|_| CatchError::InvalidCaptureDevice(name.trim().to_string()))
}

/// Validate if a catch attempt can be made.
///
/// A ball can be thrown once per encounter, after the battle has stopped for
/// any reason, as long as the wild Pokemon is still standing.
pub fn can_attempt_catch(battle_state: &BattleState) -> Result<(), CatchError> {
    if battle_state.is_ongoing() {
        return Err(CatchError::BattleInProgress);
    }

    if battle_state.catch_attempted {
        return Err(CatchError::AlreadyAttempted);
    }

    let target = battle_state.pokemon(Side::Opponent);
    if target.is_fainted() {
        return Err(CatchError::TargetFainted {
            pokemon: target.name.clone(),
        });
    }

    Ok(())
}

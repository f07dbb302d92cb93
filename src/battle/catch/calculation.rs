use crate::battle::rng::BattleRng;
use crate::errors::CatchError;
use crate::pokemon::{PokemonInst, StatusCondition};
use schema::{Pokeball, StatusType};

/// Highest possible catch score.
pub const MAX_CATCH_RATE: f64 = 255.0;

/// Calculate the catch score for a target, in `[0, 255]`.
///
/// Formula: `(41 * base_catch_rate * 255) / (255 * experience) * ball * level_factor * status`
///
/// Zero experience or a zero base catch rate cannot produce a meaningful score
/// and is reported instead of clamped. So is a ball whose modifier is not a
/// finite number of at least 1.
pub fn calculate_catch_rate(target: &PokemonInst, ball: &Pokeball) -> Result<f64, CatchError> {
    if !(ball.catch_rate_modifier.is_finite() && ball.catch_rate_modifier >= 1.0) {
        return Err(CatchError::InvalidCaptureDevice(ball.name.clone()));
    }
    if target.experience == 0 || target.base_catch_rate == 0 {
        return Err(CatchError::DegenerateCatchInput {
            experience: target.experience,
            base_catch_rate: target.base_catch_rate,
        });
    }

    let base_catch_rate = target.base_catch_rate as f64;
    let experience = target.experience as f64;
    let status_multiplier = calculate_status_multiplier(&target.status);

    let raw = (41.0 * base_catch_rate * 255.0) / (255.0 * experience)
        * ball.catch_rate_modifier
        * level_factor(target.level)
        * status_multiplier;

    Ok(raw.clamp(0.0, MAX_CATCH_RATE))
}

/// Higher levels are harder to catch: `100 / (100 + level)`.
pub fn level_factor(level: u8) -> f64 {
    100.0 / (100.0 + level as f64)
}

/// Calculate status condition multiplier for catch rate
pub fn calculate_status_multiplier(status: &Option<StatusCondition>) -> f64 {
    match status.map(|s| s.kind) {
        Some(StatusType::Asleep) | Some(StatusType::Frozen) => 2.0,
        Some(StatusType::Paralyzed) | Some(StatusType::Poisoned) | Some(StatusType::Burned) => 1.5,
        None => 1.0,
    }
}

/// Roll for catch success using the calculated catch rate
/// Returns true if the catch succeeds
pub fn roll_catch_success(catch_rate: f64, rng: &mut dyn BattleRng) -> bool {
    let roll = rng.next_roll("catch roll") * MAX_CATCH_RATE;
    roll < catch_rate
}

/// Get a descriptive catch rate category for display purposes
pub fn catch_rate_description(catch_rate: f64) -> &'static str {
    match catch_rate {
        r if r >= 200.0 => "Excellent",
        r if r >= 150.0 => "Very Good",
        r if r >= 100.0 => "Good",
        r if r >= 50.0 => "Fair",
        r if r >= 25.0 => "Poor",
        _ => "Very Poor",
    }
}

use crate::battle::catch::{calculate_catch_rate, can_attempt_catch, roll_catch_success};
use crate::battle::rng::BattleRng;
use crate::battle::state::{BattleEvent, BattleState, EventBus, Side};
use crate::errors::CatchError;
use crate::pokemon::{CaughtPokemon, PokemonInst};
use schema::Pokeball;
use serde::{Deserialize, Serialize};
use tracing::info;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum CatchOutcome {
    /// The record to hand to storage.
    Caught(CaughtPokemon),
    BrokeFree { catch_rate: f64 },
}

/// Throw a ball at the wild Pokemon once the battle has stopped.
///
/// Validation and degenerate inputs are reported without using up the
/// encounter's single attempt.
pub fn attempt_catch(
    battle_state: &mut BattleState,
    ball: &Pokeball,
    rng: &mut dyn BattleRng,
) -> Result<(CatchOutcome, EventBus), CatchError> {
    can_attempt_catch(battle_state)?;

    let target = battle_state.pokemon(Side::Opponent);
    let catch_rate = calculate_catch_rate(target, ball)?;

    let mut bus = EventBus::new();
    bus.push(BattleEvent::CatchAttempted {
        ball: ball.name.clone(),
        catch_rate,
    });

    let outcome = resolve_throw(target, catch_rate, rng);
    match &outcome {
        CatchOutcome::Caught(_) => bus.push(BattleEvent::CatchSucceeded),
        CatchOutcome::BrokeFree { catch_rate } => bus.push(BattleEvent::CatchFailed {
            catch_rate: *catch_rate,
        }),
    }

    battle_state.catch_attempted = true;
    Ok((outcome, bus))
}

/// Throw a ball at a wild Pokemon without battling it first.
pub fn attempt_wild_catch(
    target: &PokemonInst,
    ball: &Pokeball,
    rng: &mut dyn BattleRng,
) -> Result<CatchOutcome, CatchError> {
    if target.is_fainted() {
        return Err(CatchError::TargetFainted {
            pokemon: target.name.clone(),
        });
    }
    let catch_rate = calculate_catch_rate(target, ball)?;
    Ok(resolve_throw(target, catch_rate, rng))
}

fn resolve_throw(target: &PokemonInst, catch_rate: f64, rng: &mut dyn BattleRng) -> CatchOutcome {
    let caught = roll_catch_success(catch_rate, rng);
    info!(pokemon = %target.name, catch_rate, caught, "ball thrown");
    if caught {
        CatchOutcome::Caught(target.to_record())
    } else {
        CatchOutcome::BrokeFree { catch_rate }
    }
}

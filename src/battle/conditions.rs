//! Turn-start handling of non-volatile status conditions.
//!
//! Paralysis may cost the Pokemon its action, poison and burns drain a fixed
//! fraction of max HP, and sleep and freeze do nothing here. They only matter
//! to the catch calculator.

use crate::battle::rng::BattleRng;
use crate::battle::state::{ActionFailureReason, BattleEvent, EventBus, Side};
use crate::config::EncounterRules;
use crate::pokemon::{PokemonInst, StatusCondition};
use schema::StatusType;
use std::num::NonZeroU8;
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TurnStartOutcome {
    /// The Pokemon may not act this turn.
    pub action_prevented: bool,
    pub fainted: bool,
}

/// `floor(max_hp * fraction)`
pub fn status_damage(max_hp: u16, fraction: f64) -> u16 {
    (max_hp as f64 * fraction).floor().max(0.0) as u16
}

/// Resolve one Pokemon's status at the start of its turn.
///
/// Order: the status effect, then the countdown (clearing the status when it
/// reaches zero), then the faint check.
pub fn apply_turn_start_status(
    pokemon: &mut PokemonInst,
    side: Side,
    rules: &EncounterRules,
    rng: &mut dyn BattleRng,
    bus: &mut EventBus,
) -> TurnStartOutcome {
    let mut outcome = TurnStartOutcome::default();

    if let Some(status) = pokemon.status {
        match status.kind {
            StatusType::Paralyzed => {
                if rng.next_roll("paralysis check") < rules.paralysis_skip_chance {
                    outcome.action_prevented = true;
                    bus.push(BattleEvent::ActionFailed {
                        side,
                        reason: ActionFailureReason::IsParalyzed,
                    });
                }
            }
            StatusType::Poisoned => {
                let damage = status_damage(pokemon.max_hp(), rules.poison_damage_fraction);
                deal_status_damage(pokemon, side, status.kind, damage, bus);
            }
            StatusType::Burned => {
                let damage = status_damage(pokemon.max_hp(), rules.burn_damage_fraction);
                deal_status_damage(pokemon, side, status.kind, damage, bus);
            }
            StatusType::Asleep | StatusType::Frozen => {}
        }

        tick_status_countdown(pokemon, side, status, bus);
    }

    if pokemon.is_fainted() {
        outcome.fainted = true;
        bus.push(BattleEvent::PokemonFainted { side });
    }

    debug!(
        pokemon = %pokemon.name,
        ?side,
        action_prevented = outcome.action_prevented,
        fainted = outcome.fainted,
        "turn start status resolved"
    );

    outcome
}

fn deal_status_damage(
    pokemon: &mut PokemonInst,
    side: Side,
    status: StatusType,
    damage: u16,
    bus: &mut EventBus,
) {
    if damage == 0 {
        return;
    }
    pokemon.take_damage(damage);
    bus.push(BattleEvent::PokemonStatusDamage {
        target: side,
        status,
        damage,
        remaining_hp: pokemon.current_hp(),
    });
}

fn tick_status_countdown(
    pokemon: &mut PokemonInst,
    side: Side,
    status: StatusCondition,
    bus: &mut EventBus,
) {
    let Some(turns) = status.turns_remaining else {
        return;
    };

    match NonZeroU8::new(turns.get() - 1) {
        Some(left) => {
            pokemon.status = Some(StatusCondition {
                kind: status.kind,
                turns_remaining: Some(left),
            });
        }
        None => {
            pokemon.status = None;
            bus.push(BattleEvent::PokemonStatusRemoved {
                target: side,
                status: status.kind,
            });
        }
    }
}

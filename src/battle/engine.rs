use crate::battle::calculators::calculate_damage;
use crate::battle::conditions::apply_turn_start_status;
use crate::battle::rng::BattleRng;
use crate::battle::state::{
    ActionFailureReason, BattleEvent, BattleState, EventBus, GameState, Side, TurnPhase,
};
use crate::battle::stats::move_hits;
use crate::errors::{ActionError, BattleResult};
use tracing::{debug, info};

/// What the engine needs from the caller before it can continue.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PendingDecision {
    /// The player must choose one of their moves via `apply_move`.
    PlayerMove,
    /// Nothing to choose: call `begin_turn`, or the battle is over.
    None,
}

pub fn pending_decision(battle_state: &BattleState) -> PendingDecision {
    if battle_state.is_ongoing() && battle_state.phase == TurnPhase::AwaitingPlayerMove {
        PendingDecision::PlayerMove
    } else {
        PendingDecision::None
    }
}

/// Start the next turn: resolve both Pokemon's statuses, player first.
///
/// A faint from status ends the battle before anyone moves. If paralysis stops
/// the player, the opponent acts and the turn closes without a decision;
/// otherwise the battle waits for `apply_move`. Calling this while a move is
/// already awaited does nothing.
pub fn begin_turn(battle_state: &mut BattleState, rng: &mut dyn BattleRng) -> BattleResult<EventBus> {
    let mut bus = EventBus::new();

    if !battle_state.is_ongoing() {
        return Err(ActionError::BattleOver.into());
    }
    if battle_state.phase == TurnPhase::AwaitingPlayerMove {
        return Ok(bus);
    }

    // 1. Initialization
    debug!(
        battle_id = %battle_state.battle_id,
        turn = battle_state.turn_number,
        "turn started"
    );
    bus.push(BattleEvent::TurnStarted {
        turn_number: battle_state.turn_number,
    });
    battle_state.skipped = [false, false];

    // 2. Status conditions, player then opponent
    for side in [Side::Player, Side::Opponent] {
        let rules = &battle_state.rules;
        let pokemon = &mut battle_state.combatants[side.index()];
        let outcome = apply_turn_start_status(pokemon, side, rules, rng, &mut bus);
        battle_state.skipped[side.index()] = outcome.action_prevented;

        if outcome.fainted {
            check_win_conditions(battle_state, &mut bus);
            return Ok(bus);
        }
    }

    // 3. Either wait for the player or play out the opponent's half
    if battle_state.skipped[Side::Player.index()] {
        opponent_turn(battle_state, rng, &mut bus);
        check_win_conditions(battle_state, &mut bus);
        finalize_turn(battle_state, &mut bus);
    } else {
        battle_state.phase = TurnPhase::AwaitingPlayerMove;
    }

    Ok(bus)
}

/// Resolve the player's chosen move (1-based) and the opponent's reply.
///
/// An out-of-range number is rejected and leaves the battle untouched.
pub fn apply_move(
    battle_state: &mut BattleState,
    move_number: usize,
    rng: &mut dyn BattleRng,
) -> BattleResult<EventBus> {
    validate_move_selection(battle_state, move_number)?;
    let mut bus = EventBus::new();

    // 1. Player attacks
    execute_attack(battle_state, Side::Player, move_number - 1, rng, &mut bus);
    check_win_conditions(battle_state, &mut bus);

    // 2. Opponent replies if still standing and not held by paralysis
    if battle_state.is_ongoing() {
        opponent_turn(battle_state, rng, &mut bus);
        check_win_conditions(battle_state, &mut bus);
    }

    // 3. Cleanup & Finalization
    finalize_turn(battle_state, &mut bus);

    Ok(bus)
}

/// Stop an ongoing encounter at the caller's request.
pub fn end_encounter(battle_state: &mut BattleState) -> BattleResult<EventBus> {
    if !battle_state.is_ongoing() {
        return Err(ActionError::BattleOver.into());
    }

    let mut bus = EventBus::new();
    battle_state.game_state = GameState::EncounterEnded;
    battle_state.phase = TurnPhase::TurnStart;
    info!(battle_id = %battle_state.battle_id, "encounter ended by caller");
    bus.push(BattleEvent::BattleEnded {
        outcome: GameState::EncounterEnded,
    });
    Ok(bus)
}

pub fn validate_move_selection(battle_state: &BattleState, move_number: usize) -> BattleResult<()> {
    if !battle_state.is_ongoing() {
        return Err(ActionError::BattleOver.into());
    }
    if battle_state.phase != TurnPhase::AwaitingPlayerMove {
        return Err(ActionError::NotAwaitingMove.into());
    }

    let available = battle_state.pokemon(Side::Player).moves.len();
    if move_number == 0 || move_number > available {
        return Err(ActionError::InvalidMoveSelection {
            index: move_number,
            available,
        }
        .into());
    }
    Ok(())
}

fn opponent_turn(battle_state: &mut BattleState, rng: &mut dyn BattleRng, bus: &mut EventBus) {
    if battle_state.skipped[Side::Opponent.index()] {
        return;
    }

    let behavior = battle_state.rules.opponent_policy.behavior();
    let choice = behavior.choose_move(
        battle_state.pokemon(Side::Opponent),
        battle_state.pokemon(Side::Player),
        &battle_state.rules,
    );

    match choice {
        Some(move_index) => execute_attack(battle_state, Side::Opponent, move_index, rng, bus),
        None => bus.push(BattleEvent::ActionFailed {
            side: Side::Opponent,
            reason: ActionFailureReason::NoDamagingMove,
        }),
    }
}

/// One move use: hit check, then damage. Emits every observable step.
pub fn execute_attack(
    battle_state: &mut BattleState,
    attacker_side: Side,
    move_index: usize,
    rng: &mut dyn BattleRng,
    bus: &mut EventBus,
) {
    let rules = &battle_state.rules;
    let [player, opponent] = &mut battle_state.combatants;
    let (attacker, defender) = match attacker_side {
        Side::Player => (&*player, opponent),
        Side::Opponent => (&*opponent, player),
    };
    let defender_side = attacker_side.opponent();

    let Some(move_data) = attacker.move_at(move_index) else {
        return;
    };

    bus.push(BattleEvent::MoveUsed {
        side: attacker_side,
        move_name: move_data.name.clone(),
    });

    if !move_hits(move_data, rng) {
        debug!(attacker = %attacker.name, move_name = %move_data.name, "move missed");
        bus.push(BattleEvent::MoveMissed {
            side: attacker_side,
            move_name: move_data.name.clone(),
        });
        return;
    }

    bus.push(BattleEvent::MoveHit {
        side: attacker_side,
        move_name: move_data.name.clone(),
    });

    if !move_data.is_damaging() {
        return;
    }

    let outcome = calculate_damage(attacker, defender, move_data, rules, rng);

    if outcome.critical {
        bus.push(BattleEvent::CriticalHit {
            side: attacker_side,
        });
    }
    if outcome.effectiveness != 1.0 {
        bus.push(BattleEvent::AttackTypeEffectiveness {
            multiplier: outcome.effectiveness,
        });
    }

    let fainted = defender.take_damage(outcome.damage);
    bus.push(BattleEvent::DamageDealt {
        target: defender_side,
        damage: outcome.damage,
        remaining_hp: defender.current_hp(),
    });
    if fainted {
        bus.push(BattleEvent::PokemonFainted {
            side: defender_side,
        });
    }
}

/// Close out the turn if the battle is still running.
fn finalize_turn(battle_state: &mut BattleState, bus: &mut EventBus) {
    battle_state.phase = TurnPhase::TurnStart;
    battle_state.skipped = [false, false];

    if battle_state.is_ongoing() {
        battle_state.turn_number += 1;
        bus.push(BattleEvent::TurnEnded);
    }
}

/// Check win conditions and update battle state accordingly.
fn check_win_conditions(battle_state: &mut BattleState, bus: &mut EventBus) {
    if !battle_state.is_ongoing() {
        return;
    }

    let outcome = if battle_state.pokemon(Side::Opponent).is_fainted() {
        GameState::PlayerWon
    } else if battle_state.pokemon(Side::Player).is_fainted() {
        GameState::PlayerLost
    } else {
        return;
    };

    info!(
        battle_id = %battle_state.battle_id,
        turn = battle_state.turn_number,
        ?outcome,
        "battle finished"
    );
    battle_state.game_state = outcome;
    battle_state.phase = TurnPhase::TurnStart;
    bus.push(BattleEvent::BattleEnded { outcome });
}

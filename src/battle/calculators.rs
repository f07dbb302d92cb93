use crate::battle::rng::BattleRng;
use crate::battle::stats::attack_and_defense;
use crate::config::EncounterRules;
use crate::pokemon::PokemonInst;
use schema::{MoveData, PokemonType};
use tracing::debug;

/// Result of one damage calculation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DamageOutcome {
    pub damage: u16,
    pub critical: bool,
    /// Type effectiveness multiplier against the defender.
    pub effectiveness: f64,
}

impl DamageOutcome {
    fn none(effectiveness: f64) -> Self {
        Self {
            damage: 0,
            critical: false,
            effectiveness,
        }
    }
}

/// Level/power/stat part of the formula, before any multiplier.
/// A defensive stat of 0 is treated as 1.
pub fn base_damage(level: u8, power: u16, attack: u16, defense: u16) -> f64 {
    let level = level as f64;
    let ratio = attack as f64 / defense.max(1) as f64;
    (((2.0 * level / 5.0 + 2.0) * power as f64 * ratio) / 50.0) + 2.0
}

/// Same-type attack bonus for this attacker and move.
pub fn stab_multiplier(attacker: &PokemonInst, move_data: &MoveData, rules: &EncounterRules) -> f64 {
    if attacker.has_type(move_data.move_type) {
        rules.stab_multiplier
    } else {
        1.0
    }
}

/// Damage before critical hits and variance, unfloored.
/// Returns `None` for moves without power.
pub fn expected_damage(
    attacker: &PokemonInst,
    defender: &PokemonInst,
    move_data: &MoveData,
    rules: &EncounterRules,
) -> Option<f64> {
    let power = move_data.damaging_power()?;
    let (attack, defense) = attack_and_defense(attacker, defender, move_data);
    let effectiveness = PokemonType::effectiveness(move_data.move_type, &defender.types);
    Some(
        base_damage(attacker.level, power, attack, defense)
            * stab_multiplier(attacker, move_data, rules)
            * effectiveness,
    )
}

/// Roll the full damage of a move that has already hit.
///
/// Moves without power and moves the defender is immune to deal 0 and
/// consume no rolls. Otherwise one roll decides a critical hit and a second
/// picks the variance factor.
pub fn calculate_damage(
    attacker: &PokemonInst,
    defender: &PokemonInst,
    move_data: &MoveData,
    rules: &EncounterRules,
    rng: &mut dyn BattleRng,
) -> DamageOutcome {
    let effectiveness = PokemonType::effectiveness(move_data.move_type, &defender.types);

    let Some(damage) = expected_damage(attacker, defender, move_data, rules) else {
        return DamageOutcome::none(effectiveness);
    };
    if PokemonType::is_immune(move_data.move_type, &defender.types) {
        return DamageOutcome::none(effectiveness);
    }

    let critical = rng.next_roll("critical hit check") < rules.critical_hit_chance;
    let crit_multiplier = if critical {
        rules.critical_hit_multiplier
    } else {
        1.0
    };

    let spread = rules.damage_variance_max - rules.damage_variance_min;
    let variance = rng.next_roll("damage variance") * spread + rules.damage_variance_min;

    let total = (damage * crit_multiplier * variance).floor().max(0.0);
    let damage = total.min(u16::MAX as f64) as u16;

    debug!(
        attacker = %attacker.name,
        defender = %defender.name,
        move_name = %move_data.name,
        effectiveness,
        critical,
        variance,
        damage,
        "damage calculated"
    );

    DamageOutcome {
        damage,
        critical,
        effectiveness,
    }
}

//! Wild encounter setup.

use crate::battle::rng::BattleRng;
use crate::battle::state::BattleState;
use crate::catalog::Catalog;
use crate::config::EncounterRules;
use crate::errors::BattleResult;
use crate::pokemon::{PokemonInst, StatusCondition};
use tracing::info;

/// Uniform integer in `min..=max` from one roll.
fn roll_in_range(rng: &mut dyn BattleRng, (min, max): (u8, u8), reason: &str) -> u8 {
    let span = (max.saturating_sub(min) as f64) + 1.0;
    let offset = (rng.next_roll(reason) * span).floor() as u8;
    min.saturating_add(offset).min(max)
}

/// Create a wild Pokemon with a random level and, sometimes, a status.
///
/// Its experience is the species' base happiness scaled by
/// `experience_per_happiness`.
pub fn spawn_wild_pokemon(
    catalog: &dyn Catalog,
    name: &str,
    rules: &EncounterRules,
    rng: &mut dyn BattleRng,
) -> BattleResult<PokemonInst> {
    let species = catalog.species(name)?;
    let level = roll_in_range(rng, rules.wild_level_range, "wild level");
    let mut pokemon = PokemonInst::from_catalog(catalog, name, level)?;
    pokemon.experience =
        (species.base_happiness as u32).saturating_mul(rules.experience_per_happiness);

    if rng.next_roll("wild status") < rules.wild_status_chance {
        let turns = roll_in_range(rng, rules.wild_status_turns, "wild status duration");
        pokemon.status = Some(StatusCondition::new(rules.wild_status, turns));
    }

    info!(
        pokemon = %pokemon.name,
        level = pokemon.level,
        status = ?pokemon.status,
        "wild pokemon appeared"
    );
    Ok(pokemon)
}

/// Spawn a wild Pokemon and pair it against the player's Pokemon.
pub fn start_wild_battle(
    catalog: &dyn Catalog,
    player_pokemon: PokemonInst,
    wild_name: &str,
    rules: EncounterRules,
    rng: &mut dyn BattleRng,
) -> BattleResult<BattleState> {
    rules.validate()?;
    let wild_pokemon = spawn_wild_pokemon(catalog, wild_name, &rules, rng)?;
    let battle_id = format!("wild-{}-{}", player_pokemon.name, wild_pokemon.name);
    Ok(BattleState::new(battle_id, player_pokemon, wild_pokemon, rules))
}

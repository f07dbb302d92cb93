use crate::battle::rng::TurnRng;
use crate::battle::state::BattleState;
use crate::catalog::{Catalog, RonCatalog};
use crate::config::EncounterRules;
use crate::errors::BattleResult;
use crate::pokemon::{PokemonInst, StatusCondition};

/// The bundled catalog, parsed fresh for each caller.
pub fn test_catalog() -> RonCatalog {
    match RonCatalog::from_ron_str(include_str!("../../../data/catalog.ron")) {
        Ok(catalog) => catalog,
        Err(err) => panic!("Bundled catalog failed to load: {}", err),
    }
}

/// A builder for creating test Pokemon instances with common defaults.
///
/// # Example
/// ```rust,ignore
/// let pokemon = TestPokemonBuilder::new("pikachu", 25)
///     .with_moves(&["tackle"])
///     .with_status(StatusCondition::indefinite(StatusType::Paralyzed))
///     .build();
/// ```
pub struct TestPokemonBuilder {
    species: String,
    level: u8,
    moves: Option<Vec<String>>,
    status: Option<StatusCondition>,
    current_hp: Option<u16>,
    catch_inputs: Option<(u32, u8)>,
}

impl TestPokemonBuilder {
    /// Creates a new builder for a given species and level.
    pub fn new(species: &str, level: u8) -> Self {
        Self {
            species: species.to_string(),
            level,
            moves: None,
            status: None,
            current_hp: None,
            catch_inputs: None,
        }
    }

    /// Replaces the species' moves with these catalog moves.
    pub fn with_moves(mut self, moves: &[&str]) -> Self {
        self.moves = Some(moves.iter().map(|name| name.to_string()).collect());
        self
    }

    /// Sets the status condition for the test Pokemon.
    pub fn with_status(mut self, status: StatusCondition) -> Self {
        self.status = Some(status);
        self
    }

    /// Sets the current HP for the test Pokemon. If not set, HP will be max.
    pub fn with_hp(mut self, hp: u16) -> Self {
        self.current_hp = Some(hp);
        self
    }

    /// Overrides experience and base catch rate.
    pub fn with_catch_inputs(mut self, experience: u32, base_catch_rate: u8) -> Self {
        self.catch_inputs = Some((experience, base_catch_rate));
        self
    }

    /// Builds the `PokemonInst`.
    pub fn build(self) -> PokemonInst {
        let catalog = test_catalog();
        let mut pokemon = match PokemonInst::from_catalog(&catalog, &self.species, self.level) {
            Ok(pokemon) => pokemon,
            Err(err) => panic!("Failed to build test Pokemon {}: {}", self.species, err),
        };

        // Wild experience rule, so catches work out of the box
        pokemon.experience = match catalog.species(&self.species) {
            Ok(species) => species.base_happiness as u32 * 10,
            Err(err) => panic!("Failed to load species data for {}: {}", self.species, err),
        };

        if let Some(moves) = self.moves {
            pokemon.moves = moves
                .iter()
                .map(|name| match catalog.move_data(name) {
                    Ok(move_data) => move_data,
                    Err(err) => panic!("Failed to load move {}: {}", name, err),
                })
                .collect();
        }

        pokemon.status = self.status;

        if let Some(hp) = self.current_hp {
            pokemon.set_hp(hp);
        }

        if let Some((experience, base_catch_rate)) = self.catch_inputs {
            pokemon.experience = experience;
            pokemon.base_catch_rate = base_catch_rate;
        }

        pokemon
    }
}

/// Creates a standard 1v1 battle state for testing.
pub fn create_test_battle(player_pokemon: PokemonInst, wild_pokemon: PokemonInst) -> BattleState {
    create_test_battle_with_rules(player_pokemon, wild_pokemon, EncounterRules::default())
}

pub fn create_test_battle_with_rules(
    player_pokemon: PokemonInst,
    wild_pokemon: PokemonInst,
    rules: EncounterRules,
) -> BattleState {
    BattleState::new("test_battle".to_string(), player_pokemon, wild_pokemon, rules)
}

/// Creates a `TurnRng` instance with a long list of middling values (0.5).
/// Every move with accuracy above 50 hits, no crits, no paralysis skips.
pub fn predictable_rng() -> TurnRng {
    TurnRng::new_for_test(vec![0.5; 100])
}

/// Helper function to assert that a Result is Ok and return the value.
pub fn assert_ok<T>(result: BattleResult<T>) -> T {
    match result {
        Ok(value) => value,
        Err(err) => panic!("Expected Ok but got error: {}", err),
    }
}

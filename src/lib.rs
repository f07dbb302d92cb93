//! Pokemon Encounter Engine
//!
//! Turn-based wild battles between two Pokemon, followed by a chance to catch
//! the wild one. The engine never blocks: callers ask what decision is pending,
//! supply it, and receive the events that followed.

// --- MODULE DECLARATIONS ---
pub mod battle;
pub mod catalog;
pub mod config;
pub mod encounter;
pub mod errors;
pub mod pokemon;

// --- PUBLIC API RE-EXPORTS ---

// --- From the `schema` crate ---
pub use schema::{
    BallType, BaseStats, MoveCategory, MoveData, Pokeball, PokemonType, SpeciesData, StatType,
    StatusType,
};

// --- From this crate's modules (`src/`) ---

// Core battle engine functions and state.
pub use battle::engine::{
    apply_move, begin_turn, end_encounter, pending_decision, PendingDecision,
};
pub use battle::rng::{BattleRng, RandomRng, TurnRng};
pub use battle::state::{BattleEvent, BattleState, EncounterExit, EventBus, GameState, Side};

// Capture.
pub use battle::catch::{
    attempt_catch, attempt_wild_catch, calculate_catch_rate, catch_rate_description, parse_ball,
    CatchOutcome,
};

// Setup and data access.
pub use catalog::{Catalog, RonCatalog};
pub use config::EncounterRules;
pub use encounter::{spawn_wild_pokemon, start_wild_battle};
pub use pokemon::{CaughtPokemon, PokemonInst, StatusCondition};

// Crate-specific error and result types.
pub use errors::{
    ActionError, BattleEngineError, BattleResult, CatalogError, CatalogResult, CatchError,
    ConfigError,
};

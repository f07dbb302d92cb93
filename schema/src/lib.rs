// Pokemon Encounter Schema - Shared type definitions
// This crate contains the static enums and data records shared between the
// encounter engine and anything that produces catalog data for it.

// Re-export the main types
pub use battle_data::*;
pub use move_types::*;
pub use pokemon_types::*;
pub use species_data::*;

pub mod battle_data;
pub mod move_types;
pub mod pokemon_types;
pub mod species_data;

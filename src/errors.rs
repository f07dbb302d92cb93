use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Main error type for the encounter engine
#[derive(Debug, Clone, PartialEq, Error)]
pub enum BattleEngineError {
    /// Error related to catalog lookup or loading
    #[error("Catalog error: {0}")]
    Catalog(#[from] CatalogError),
    /// Error related to invalid player actions
    #[error("Action error: {0}")]
    Action(#[from] ActionError),
    /// Error related to a capture attempt
    #[error("Catch error: {0}")]
    Catch(#[from] CatchError),
    /// Error related to encounter rules
    #[error("Config error: {0}")]
    Config(#[from] ConfigError),
}

/// Errors related to species and move lookups
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CatalogError {
    /// No species with this name exists in the catalog
    #[error("Unknown creature: {0}")]
    UnknownCreature(String),
    /// No move with this name exists in the catalog
    #[error("Unknown move: {0}")]
    UnknownMove(String),
    /// Catalog record violates a structural rule
    #[error("Malformed catalog data: {0}")]
    MalformedData(String),
    #[error("Could not read catalog: {0}")]
    Io(String),
    #[error("Could not parse catalog: {0}")]
    Parse(String),
}

/// Errors related to player actions
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ActionError {
    /// Move number is outside 1..=available
    #[error("Invalid move selection {index}: choose a number between 1 and {available}")]
    InvalidMoveSelection { index: usize, available: usize },
    /// A move was supplied while the battle was not waiting for one
    #[error("The battle is not waiting for a move")]
    NotAwaitingMove,
    #[error("The battle is already over")]
    BattleOver,
}

/// Errors related to capture attempts
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
pub enum CatchError {
    /// Ball name not recognized
    #[error("Invalid capture device: {0}")]
    InvalidCaptureDevice(String),
    /// Experience or base catch rate is zero, so no probability can be computed
    #[error("Cannot compute a catch rate from experience {experience} and base catch rate {base_catch_rate}")]
    DegenerateCatchInput { experience: u32, base_catch_rate: u8 },
    /// Capture is only offered once the battle has stopped
    #[error("Cannot throw a ball while the battle is in progress")]
    BattleInProgress,
    /// Target Pokemon is already fainted
    #[error("{pokemon} has fainted and cannot be caught")]
    TargetFainted { pokemon: String },
    #[error("A ball has already been thrown in this encounter")]
    AlreadyAttempted,
}

/// Errors related to loading or validating encounter rules
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("Could not read rules: {0}")]
    Io(String),
    #[error("Could not parse rules: {0}")]
    Parse(String),
    #[error("Invalid rules: {0}")]
    Invalid(String),
}

/// Type alias for Results using BattleEngineError
pub type BattleResult<T> = Result<T, BattleEngineError>;

/// Type alias for Results using CatalogError
pub type CatalogResult<T> = Result<T, CatalogError>;

//! A module for defining AI behaviors for battle opponents.

use crate::battle::calculators::expected_damage;
use crate::config::EncounterRules;
use crate::pokemon::PokemonInst;
use serde::{Deserialize, Serialize};

/// A trait for any system that can pick the opponent's move.
pub trait Behavior {
    /// Zero-based index of the move to use, or `None` to do nothing this turn.
    fn choose_move(
        &self,
        attacker: &PokemonInst,
        defender: &PokemonInst,
        rules: &EncounterRules,
    ) -> Option<usize>;
}

/// Which behavior drives the wild Pokemon.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum OpponentPolicy {
    #[default]
    FirstDamagingMove,
    Scoring,
}

impl OpponentPolicy {
    pub fn behavior(self) -> Box<dyn Behavior> {
        match self {
            OpponentPolicy::FirstDamagingMove => Box::new(FirstDamagingMove),
            OpponentPolicy::Scoring => Box::new(ScoringAI::new()),
        }
    }
}

/// Always uses the first known move with positive power.
pub struct FirstDamagingMove;

impl Behavior for FirstDamagingMove {
    fn choose_move(
        &self,
        attacker: &PokemonInst,
        _defender: &PokemonInst,
        _rules: &EncounterRules,
    ) -> Option<usize> {
        attacker.moves.iter().position(|move_data| move_data.is_damaging())
    }
}

/// Picks the move with the best expected damage, weighted by accuracy.
pub struct ScoringAI;

impl ScoringAI {
    pub fn new() -> Self {
        Self
    }

    fn score_move(
        &self,
        move_index: usize,
        attacker: &PokemonInst,
        defender: &PokemonInst,
        rules: &EncounterRules,
    ) -> Option<f64> {
        let move_data = attacker.move_at(move_index)?;
        let damage = expected_damage(attacker, defender, move_data, rules)?;

        // Sure-hit moves get a slight edge
        let accuracy = move_data.accuracy.map_or(101.0, f64::from);
        Some(damage * accuracy / 100.0)
    }
}

impl Default for ScoringAI {
    fn default() -> Self {
        Self::new()
    }
}

impl Behavior for ScoringAI {
    fn choose_move(
        &self,
        attacker: &PokemonInst,
        defender: &PokemonInst,
        rules: &EncounterRules,
    ) -> Option<usize> {
        // max_by_key keeps the last maximum, so walk in reverse to keep the earliest move on ties
        (0..attacker.moves.len())
            .rev()
            .filter_map(|index| {
                self.score_move(index, attacker, defender, rules)
                    .map(|score| (index, score))
            })
            .max_by_key(|(_, score)| ordered_float::OrderedFloat(*score))
            .map(|(index, _)| index)
    }
}

use crate::config::EncounterRules;
use crate::pokemon::PokemonInst;
use schema::StatusType;
use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, Copy)]
pub enum GameState {
    Ongoing,
    /// The wild Pokemon fainted.
    PlayerWon,
    /// The player's Pokemon fainted.
    PlayerLost,
    /// The caller stopped the encounter while both Pokemon were standing.
    EncounterEnded,
}

/// Where the current turn stands.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, Copy)]
pub enum TurnPhase {
    /// Status checks for the next turn have not run yet.
    TurnStart,
    /// Status checks ran and the player must pick a move.
    AwaitingPlayerMove,
}

/// Why an encounter stopped.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, Copy)]
pub enum EncounterExit {
    OpponentFainted,
    PlayerFainted,
    EndedByCaller,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, Copy, Hash)]
pub enum Side {
    Player,
    Opponent,
}

impl Side {
    pub fn index(self) -> usize {
        match self {
            Side::Player => 0,
            Side::Opponent => 1,
        }
    }

    pub fn opponent(self) -> Side {
        match self {
            Side::Player => Side::Opponent,
            Side::Opponent => Side::Player,
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub enum ActionFailureReason {
    IsParalyzed,
    /// The Pokemon knows no move with power.
    NoDamagingMove,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub enum BattleEvent {
    // Turn Management
    TurnStarted {
        turn_number: u32,
    },
    TurnEnded,

    // Pokemon Actions
    MoveUsed {
        side: Side,
        move_name: String,
    },
    MoveMissed {
        side: Side,
        move_name: String,
    },
    MoveHit {
        side: Side,
        move_name: String,
    },
    CriticalHit {
        side: Side,
    },
    AttackTypeEffectiveness {
        multiplier: f64,
    },
    DamageDealt {
        target: Side,
        damage: u16,
        remaining_hp: u16,
    },
    PokemonFainted {
        side: Side,
    },

    // Pokemon Status Conditions
    PokemonStatusDamage {
        target: Side,
        status: StatusType,
        damage: u16,
        remaining_hp: u16,
    },
    PokemonStatusRemoved {
        target: Side,
        status: StatusType,
    },

    // Action Failures
    ActionFailed {
        side: Side,
        reason: ActionFailureReason,
    },

    // Battle End
    BattleEnded {
        outcome: GameState,
    },

    // Capture
    CatchAttempted {
        ball: String,
        catch_rate: f64,
    },
    CatchSucceeded,
    CatchFailed {
        catch_rate: f64,
    },
}

impl BattleEvent {
    /// Formats the event into a human-readable string using battle context.
    /// Returns None for silent events that should not produce user-visible text.
    pub fn format(&self, battle_state: &BattleState) -> Option<String> {
        let name = |side: &Side| Self::format_owned_name(*side, battle_state);
        match self {
            BattleEvent::TurnStarted { turn_number } => {
                Some(format!("=== Turn {} ===", turn_number))
            }
            BattleEvent::TurnEnded => None,

            BattleEvent::MoveUsed { side, move_name } => Some(format!(
                "{} used {}!",
                name(side),
                Self::format_move_name(move_name)
            )),
            BattleEvent::MoveMissed { side, .. } => {
                Some(format!("{}'s attack missed!", name(side)))
            }
            BattleEvent::MoveHit { .. } => None,
            BattleEvent::CriticalHit { .. } => Some("A critical hit!".to_string()),
            BattleEvent::AttackTypeEffectiveness { multiplier } => match *multiplier {
                m if m == 0.0 => Some("It had no effect!".to_string()),
                m if m > 1.0 => Some("It's super effective!".to_string()),
                m if m < 1.0 => Some("It's not very effective...".to_string()),
                _ => None,
            },
            BattleEvent::DamageDealt {
                target,
                damage,
                remaining_hp,
            } => {
                let max_hp = battle_state.pokemon(*target).max_hp();
                Some(format!(
                    "{} took {} damage! ({}/{} HP)",
                    name(target),
                    damage,
                    remaining_hp,
                    max_hp
                ))
            }
            BattleEvent::PokemonFainted { side } => Some(format!("{} fainted!", name(side))),

            BattleEvent::PokemonStatusDamage {
                target,
                status,
                damage,
                ..
            } => Some(format!(
                "{} is hurt by {} and took {} damage!",
                name(target),
                Self::format_status_source(*status),
                damage
            )),
            BattleEvent::PokemonStatusRemoved { target, status } => Some(format!(
                "{} is no longer {}.",
                name(target),
                status
            )),

            BattleEvent::ActionFailed { side, reason } => Some(match reason {
                ActionFailureReason::IsParalyzed => {
                    format!("{} is fully paralyzed and can't move!", name(side))
                }
                ActionFailureReason::NoDamagingMove => {
                    format!("{} has no way to attack!", name(side))
                }
            }),

            BattleEvent::BattleEnded { outcome } => match outcome {
                GameState::PlayerWon => Some("You won the battle!".to_string()),
                GameState::PlayerLost => Some("You lost the battle...".to_string()),
                GameState::EncounterEnded => Some("You got away safely.".to_string()),
                GameState::Ongoing => None,
            },

            BattleEvent::CatchAttempted { ball, catch_rate } => Some(format!(
                "You threw a {}! (catch chance: {})",
                ball,
                crate::battle::catch::catch_rate_description(*catch_rate)
            )),
            BattleEvent::CatchSucceeded => Some(format!(
                "Gotcha! {} was caught!",
                Self::format_pokemon_name(&battle_state.pokemon(Side::Opponent).name)
            )),
            BattleEvent::CatchFailed { .. } => Some(format!(
                "Oh no! {} broke free!",
                Self::format_pokemon_name(&battle_state.pokemon(Side::Opponent).name)
            )),
        }
    }

    fn format_owned_name(side: Side, battle_state: &BattleState) -> String {
        let pokemon_name = Self::format_pokemon_name(&battle_state.pokemon(side).name);
        match side {
            Side::Player => pokemon_name,
            Side::Opponent => format!("The wild {}", pokemon_name),
        }
    }

    /// Capitalize the first letter: "pikachu" -> "Pikachu"
    fn format_pokemon_name(name: &str) -> String {
        let mut chars = name.chars();
        match chars.next() {
            Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
            None => String::new(),
        }
    }

    /// Title-case a hyphenated move name: "thunder-shock" -> "Thunder Shock"
    fn format_move_name(name: &str) -> String {
        name.split(['-', '_', ' '])
            .filter(|word| !word.is_empty())
            .map(Self::format_pokemon_name)
            .collect::<Vec<_>>()
            .join(" ")
    }

    fn format_status_source(status: StatusType) -> &'static str {
        match status {
            StatusType::Poisoned => "poison",
            StatusType::Burned => "its burn",
            StatusType::Paralyzed => "paralysis",
            StatusType::Asleep => "sleep",
            StatusType::Frozen => "the ice",
        }
    }
}

/// Event bus for collecting and managing battle events.
///
/// ```rust,ignore
/// event_bus.print_debug();
/// event_bus.print_formatted(&battle_state);
/// println!("{}", event_bus);
/// ```
#[derive(Debug, Clone, Default)]
pub struct EventBus {
    events: Vec<BattleEvent>,
}

impl EventBus {
    pub fn new() -> Self {
        Self { events: Vec::new() }
    }

    pub fn push(&mut self, event: BattleEvent) {
        self.events.push(event);
    }

    pub fn events(&self) -> &[BattleEvent] {
        &self.events
    }

    /// Print all events in debug format with indentation.
    pub fn print_debug(&self) {
        for event in &self.events {
            println!("  {:?}", event);
        }
    }

    /// Print all events in debug format with a custom prefix message.
    pub fn print_debug_with_message(&self, message: &str) {
        println!("{}", message);
        self.print_debug();
    }

    /// Print the formatted text of every non-silent event.
    pub fn print_formatted(&self, battle_state: &BattleState) {
        for line in self.formatted_lines(battle_state) {
            println!("  {}", line);
        }
    }

    pub fn formatted_lines(&self, battle_state: &BattleState) -> Vec<String> {
        self.events
            .iter()
            .filter_map(|event| event.format(battle_state))
            .collect()
    }

    /// Return true if the event bus contains no events.
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Return the number of events in the bus.
    pub fn len(&self) -> usize {
        self.events.len()
    }
}

impl std::fmt::Display for EventBus {
    /// Format the EventBus for printing. Shows debug format of all events.
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for event in &self.events {
            writeln!(f, "  {:?}", event)?;
        }
        Ok(())
    }
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct BattleState {
    pub battle_id: String,
    /// Indexed by `Side::index()`.
    pub combatants: [PokemonInst; 2],
    pub turn_number: u32,
    pub game_state: GameState,
    pub phase: TurnPhase,
    /// Sides whose action was prevented by a status this turn.
    pub skipped: [bool; 2],
    pub rules: EncounterRules,
    pub catch_attempted: bool,
}

impl BattleState {
    pub fn new(
        id: String,
        player: PokemonInst,
        opponent: PokemonInst,
        rules: EncounterRules,
    ) -> Self {
        Self {
            battle_id: id,
            combatants: [player, opponent],
            turn_number: 1,
            game_state: GameState::Ongoing,
            phase: TurnPhase::TurnStart,
            skipped: [false, false],
            rules,
            catch_attempted: false,
        }
    }

    pub fn pokemon(&self, side: Side) -> &PokemonInst {
        &self.combatants[side.index()]
    }

    pub fn pokemon_mut(&mut self, side: Side) -> &mut PokemonInst {
        &mut self.combatants[side.index()]
    }

    pub fn is_ongoing(&self) -> bool {
        self.game_state == GameState::Ongoing
    }

    pub fn exit_reason(&self) -> Option<EncounterExit> {
        match self.game_state {
            GameState::Ongoing => None,
            GameState::PlayerWon => Some(EncounterExit::OpponentFainted),
            GameState::PlayerLost => Some(EncounterExit::PlayerFainted),
            GameState::EncounterEnded => Some(EncounterExit::EndedByCaller),
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::battle::engine::{
        apply_move, begin_turn, end_encounter, pending_decision, PendingDecision,
    };
    use crate::battle::rng::TurnRng;
    use crate::battle::state::{BattleEvent, EncounterExit, GameState, Side, TurnPhase};
    use crate::battle::tests::common::{
        assert_ok, create_test_battle, predictable_rng, TestPokemonBuilder,
    };
    use crate::errors::{ActionError, BattleEngineError};
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    #[test]
    fn test_full_turn_exchange() {
        // Arrange
        let player = TestPokemonBuilder::new("pikachu", 10).build();
        let wild = TestPokemonBuilder::new("rattata", 5).build();
        let mut battle_state = create_test_battle(player, wild);
        let mut rng = predictable_rng();

        assert_eq!(pending_decision(&battle_state), PendingDecision::None);

        // Act
        let start_bus = assert_ok(begin_turn(&mut battle_state, &mut rng));
        assert_eq!(pending_decision(&battle_state), PendingDecision::PlayerMove);
        let bus = assert_ok(apply_move(&mut battle_state, 1, &mut rng));

        // Assert
        bus.print_debug_with_message("Events for test_full_turn_exchange:");
        assert_eq!(
            start_bus.events(),
            &[BattleEvent::TurnStarted { turn_number: 1 }]
        );

        // Thunder Shock: ((6 * 40 * 50/35) / 50 + 2) * 1.5 STAB * 0.925 = 12
        // Tackle: ((4 * 40 * 56/40) / 50 + 2) * 1.5 STAB * 0.925 = 8
        assert_eq!(battle_state.pokemon(Side::Opponent).current_hp(), 18);
        assert_eq!(battle_state.pokemon(Side::Player).current_hp(), 27);

        assert!(bus.events().contains(&BattleEvent::MoveUsed {
            side: Side::Player,
            move_name: "thunder-shock".to_string(),
        }));
        assert!(bus.events().contains(&BattleEvent::MoveUsed {
            side: Side::Opponent,
            move_name: "tackle".to_string(),
        }));
        assert_eq!(bus.events().last(), Some(&BattleEvent::TurnEnded));

        assert_eq!(battle_state.game_state, GameState::Ongoing);
        assert_eq!(battle_state.turn_number, 2);
        assert_eq!(battle_state.phase, TurnPhase::TurnStart);
        assert_eq!(pending_decision(&battle_state), PendingDecision::None);
    }

    #[rstest]
    #[case(0)]
    #[case(5)]
    #[case(99)]
    fn test_invalid_move_selection_changes_nothing(#[case] move_number: usize) {
        // Arrange
        let player = TestPokemonBuilder::new("pikachu", 10).build();
        let wild = TestPokemonBuilder::new("rattata", 5).build();
        let mut battle_state = create_test_battle(player, wild);
        let mut rng = TurnRng::new_for_test(vec![]);
        assert_ok(begin_turn(&mut battle_state, &mut rng));
        let before = battle_state.combatants.clone();

        // Act
        let result = apply_move(&mut battle_state, move_number, &mut rng);

        // Assert
        assert_eq!(
            result.err(),
            Some(BattleEngineError::Action(ActionError::InvalidMoveSelection {
                index: move_number,
                available: 4,
            }))
        );
        assert_eq!(battle_state.combatants, before);
        assert_eq!(battle_state.turn_number, 1);
        assert_eq!(pending_decision(&battle_state), PendingDecision::PlayerMove);
    }

    #[test]
    fn test_move_before_turn_start_is_rejected() {
        let player = TestPokemonBuilder::new("pikachu", 10).build();
        let wild = TestPokemonBuilder::new("rattata", 5).build();
        let mut battle_state = create_test_battle(player, wild);

        let result = apply_move(&mut battle_state, 1, &mut predictable_rng());

        assert_eq!(
            result.err(),
            Some(BattleEngineError::Action(ActionError::NotAwaitingMove))
        );
    }

    #[test]
    fn test_begin_turn_while_awaiting_move_is_a_no_op() {
        let player = TestPokemonBuilder::new("pikachu", 10).build();
        let wild = TestPokemonBuilder::new("rattata", 5).build();
        let mut battle_state = create_test_battle(player, wild);
        let mut rng = TurnRng::new_for_test(vec![]);

        assert_ok(begin_turn(&mut battle_state, &mut rng));
        let second = assert_ok(begin_turn(&mut battle_state, &mut rng));

        assert!(second.is_empty());
        assert_eq!(battle_state.turn_number, 1);
    }

    #[test]
    fn test_knockout_ends_turn_before_opponent_moves() {
        // Arrange
        let player = TestPokemonBuilder::new("pikachu", 10).build();
        let wild = TestPokemonBuilder::new("rattata", 5).with_hp(1).build();
        let mut battle_state = create_test_battle(player, wild);
        let mut rng = predictable_rng();

        // Act
        assert_ok(begin_turn(&mut battle_state, &mut rng));
        let bus = assert_ok(apply_move(&mut battle_state, 1, &mut rng));

        // Assert
        assert_eq!(battle_state.game_state, GameState::PlayerWon);
        assert_eq!(battle_state.exit_reason(), Some(EncounterExit::OpponentFainted));
        assert_eq!(battle_state.pokemon(Side::Opponent).current_hp(), 0);
        assert!(!bus
            .events()
            .iter()
            .any(|e| matches!(e, BattleEvent::MoveUsed { side: Side::Opponent, .. })));
        assert_eq!(
            bus.events().last(),
            Some(&BattleEvent::BattleEnded {
                outcome: GameState::PlayerWon
            })
        );
        assert_eq!(battle_state.turn_number, 1);
        assert_eq!(pending_decision(&battle_state), PendingDecision::None);
    }

    #[test]
    fn test_player_knocked_out_by_reply() {
        // Arrange
        let player = TestPokemonBuilder::new("pikachu", 10)
            .with_moves(&["growl"])
            .with_hp(1)
            .build();
        let wild = TestPokemonBuilder::new("rattata", 5).build();
        let mut battle_state = create_test_battle(player, wild);
        let mut rng = predictable_rng();

        // Act
        assert_ok(begin_turn(&mut battle_state, &mut rng));
        let bus = assert_ok(apply_move(&mut battle_state, 1, &mut rng));

        // Assert
        assert_eq!(battle_state.game_state, GameState::PlayerLost);
        assert_eq!(battle_state.exit_reason(), Some(EncounterExit::PlayerFainted));
        assert!(bus.events().contains(&BattleEvent::PokemonFainted {
            side: Side::Player
        }));
        // Growl hits but deals no damage
        assert_eq!(battle_state.pokemon(Side::Opponent).current_hp(), 30);
        assert!(!bus
            .events()
            .iter()
            .any(|e| matches!(e, BattleEvent::DamageDealt { target: Side::Opponent, .. })));
    }

    #[test]
    fn test_missed_move_deals_no_damage() {
        // Arrange: Rock Throw has 90 accuracy
        let player = TestPokemonBuilder::new("geodude", 10)
            .with_moves(&["rock-throw"])
            .build();
        let wild = TestPokemonBuilder::new("pidgey", 5).build();
        let mut battle_state = create_test_battle(player, wild);
        // player accuracy (miss), then pidgey's gust: accuracy, crit, variance
        let mut rng = TurnRng::new_for_test(vec![0.95, 0.5, 0.5, 0.5]);

        // Act
        assert_ok(begin_turn(&mut battle_state, &mut rng));
        let bus = assert_ok(apply_move(&mut battle_state, 1, &mut rng));

        // Assert
        assert!(bus.events().contains(&BattleEvent::MoveMissed {
            side: Side::Player,
            move_name: "rock-throw".to_string(),
        }));
        assert_eq!(
            battle_state.pokemon(Side::Opponent).current_hp(),
            battle_state.pokemon(Side::Opponent).max_hp()
        );
        assert_eq!(rng.remaining(), 0);
    }

    #[test]
    fn test_caller_can_end_the_encounter() {
        let player = TestPokemonBuilder::new("pikachu", 10).build();
        let wild = TestPokemonBuilder::new("rattata", 5).build();
        let mut battle_state = create_test_battle(player, wild);
        let mut rng = predictable_rng();
        assert_ok(begin_turn(&mut battle_state, &mut rng));

        let bus = assert_ok(end_encounter(&mut battle_state));

        assert_eq!(
            bus.events(),
            &[BattleEvent::BattleEnded {
                outcome: GameState::EncounterEnded
            }]
        );
        assert_eq!(battle_state.exit_reason(), Some(EncounterExit::EndedByCaller));
        assert_eq!(pending_decision(&battle_state), PendingDecision::None);
        assert_eq!(
            begin_turn(&mut battle_state, &mut rng).err(),
            Some(BattleEngineError::Action(ActionError::BattleOver))
        );
        assert_eq!(
            end_encounter(&mut battle_state).err(),
            Some(BattleEngineError::Action(ActionError::BattleOver))
        );
    }

    #[test]
    fn test_battle_runs_to_completion() {
        let player = TestPokemonBuilder::new("charmander", 10).build();
        let wild = TestPokemonBuilder::new("bulbasaur", 3).build();
        let mut battle_state = create_test_battle(player, wild);
        let mut rng = crate::battle::rng::RandomRng::seeded(11);

        let mut turns = 0;
        while battle_state.is_ongoing() {
            assert_ok(begin_turn(&mut battle_state, &mut rng));
            if pending_decision(&battle_state) == PendingDecision::PlayerMove {
                // Ember
                assert_ok(apply_move(&mut battle_state, 3, &mut rng));
            }
            turns += 1;
            assert!(turns < 100, "battle should finish");
        }

        assert_ne!(battle_state.game_state, GameState::Ongoing);
        let loser_fainted = battle_state.pokemon(Side::Opponent).is_fainted()
            || battle_state.pokemon(Side::Player).is_fainted();
        assert!(loser_fainted);
    }
}

use crate::battle::rng::BattleRng;
use crate::pokemon::PokemonInst;
use schema::{MoveCategory, MoveData, StatType};

/// Which stat pair a move is resolved with.
/// Physical moves use Attack against Defense, everything else the special pair.
pub fn stats_for_category(category: MoveCategory) -> (StatType, StatType) {
    match category {
        MoveCategory::Physical => (StatType::Attack, StatType::Defense),
        MoveCategory::Special | MoveCategory::Status => {
            (StatType::SpecialAttack, StatType::SpecialDefense)
        }
    }
}

/// Attacker's offensive stat and defender's defensive stat for this move.
pub fn attack_and_defense(
    attacker: &PokemonInst,
    defender: &PokemonInst,
    move_data: &MoveData,
) -> (u16, u16) {
    let (attack_stat, defense_stat) = stats_for_category(move_data.category);
    (
        attacker.base_stats.get(attack_stat),
        defender.base_stats.get(defense_stat),
    )
}

/// Calculate if a move hits based on its accuracy.
/// Returns true if the move hits, false if it misses
pub fn move_hits(move_data: &MoveData, rng: &mut dyn BattleRng) -> bool {
    // If move has no accuracy value, it never misses (like Swift)
    let Some(accuracy) = move_data.accuracy else {
        return true;
    };

    let roll = rng.next_roll("accuracy check") * 100.0;
    roll < accuracy as f64
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::battle::rng::TurnRng;
    use pretty_assertions::assert_eq;
    use rstest::rstest;
    use schema::PokemonType;

    fn make_move(accuracy: Option<u8>, category: MoveCategory) -> MoveData {
        MoveData {
            name: "test-move".to_string(),
            power: Some(50),
            move_type: PokemonType::Normal,
            category,
            accuracy,
        }
    }

    #[rstest]
    #[case(Some(100), 0.999, true)]
    #[case(Some(70), 0.69, true)]
    #[case(Some(70), 0.70, false)]
    #[case(Some(0), 0.0, false)]
    fn test_accuracy_threshold(#[case] accuracy: Option<u8>, #[case] roll: f64, #[case] hits: bool) {
        let mut rng = TurnRng::new_for_test(vec![roll]);
        let move_data = make_move(accuracy, MoveCategory::Physical);
        assert_eq!(move_hits(&move_data, &mut rng), hits);
    }

    #[test]
    fn test_sure_hit_move_consumes_no_roll() {
        let mut rng = TurnRng::new_for_test(vec![]);
        assert!(move_hits(&make_move(None, MoveCategory::Special), &mut rng));
        assert_eq!(rng.remaining(), 0);
    }

    #[test]
    fn test_status_moves_use_special_pair() {
        assert_eq!(
            stats_for_category(MoveCategory::Status),
            (StatType::SpecialAttack, StatType::SpecialDefense)
        );
        assert_eq!(
            stats_for_category(MoveCategory::Physical),
            (StatType::Attack, StatType::Defense)
        );
    }
}

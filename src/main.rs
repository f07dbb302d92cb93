use pokemon_encounter::battle::catch::can_attempt_catch;
use pokemon_encounter::{
    apply_move, attempt_catch, begin_turn, end_encounter, parse_ball, pending_decision,
    start_wild_battle, ActionError, BallType, BattleEngineError, BattleRng, BattleState,
    CatchError, CatchOutcome, EncounterRules, PendingDecision, PokemonInst, RandomRng,
    RonCatalog, Side,
};
use std::io::Write;
use std::path::Path;
use strum::IntoEnumIterator;
use tokio::io::{AsyncBufReadExt, BufReader, Lines, Stdin};
use tracing::warn;

const CATALOG_PATH: &str = "data/catalog.ron";
const RULES_PATH: &str = "data/rules.ron";
const PLAYER_LEVEL: u8 = 10;

type Input = Lines<BufReader<Stdin>>;

enum Reply {
    Line(String),
    /// Ctrl-C or end of input.
    Cancelled,
}

async fn prompt(input: &mut Input, message: &str) -> std::io::Result<Reply> {
    print!("{} ", message);
    std::io::stdout().flush()?;

    tokio::select! {
        line = input.next_line() => Ok(match line? {
            Some(line) => Reply::Line(line.trim().to_string()),
            None => Reply::Cancelled,
        }),
        _ = tokio::signal::ctrl_c() => {
            println!();
            Ok(Reply::Cancelled)
        }
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::WARN.into()),
        )
        .with_writer(std::io::stderr)
        .init();

    // Usage: pokemon-encounter [wild species] [player species] [rules file]
    let args: Vec<String> = std::env::args().skip(1).collect();

    let catalog = RonCatalog::load(CATALOG_PATH)?;
    let rules = match args.get(2) {
        Some(path) => EncounterRules::load(path)?,
        None if Path::new(RULES_PATH).exists() => EncounterRules::load(RULES_PATH)?,
        None => EncounterRules::default(),
    };
    let mut rng = RandomRng::new();

    let wild_name = match args.first() {
        Some(name) => name.clone(),
        None => {
            let names = catalog.species_names();
            let index = (rng.next_roll("wild species") * names.len() as f64) as usize;
            names
                .get(index.min(names.len().saturating_sub(1)))
                .map(|name| name.to_string())
                .ok_or("the catalog has no species")?
        }
    };
    let player_name = args.get(1).map(String::as_str).unwrap_or("pikachu");

    let player = PokemonInst::from_catalog(&catalog, player_name, PLAYER_LEVEL)?;
    let mut state = start_wild_battle(&catalog, player, &wild_name, rules, &mut rng)?;

    let wild = state.pokemon(Side::Opponent);
    match wild.status {
        Some(status) => println!(
            "A wild {} (level {}) appeared! It is {}.",
            wild.name, wild.level, status
        ),
        None => println!("A wild {} (level {}) appeared!", wild.name, wild.level),
    }

    let mut input = BufReader::new(tokio::io::stdin()).lines();

    run_battle(&mut state, &mut rng, &mut input).await?;
    offer_catch(&mut state, &mut rng, &mut input).await?;

    Ok(())
}

fn print_move_menu(state: &BattleState) {
    let player = state.pokemon(Side::Player);
    let wild = state.pokemon(Side::Opponent);
    println!(
        "{}: {}/{} HP    wild {}: {}/{} HP",
        player.name,
        player.current_hp(),
        player.max_hp(),
        wild.name,
        wild.current_hp(),
        wild.max_hp()
    );
    for (number, move_data) in player.moves.iter().enumerate() {
        let power = move_data
            .power
            .map_or("-".to_string(), |power| power.to_string());
        println!(
            "  {}. {} ({}, power {})",
            number + 1,
            move_data.name,
            move_data.move_type,
            power
        );
    }
}

async fn run_battle(
    state: &mut BattleState,
    rng: &mut RandomRng,
    input: &mut Input,
) -> Result<(), Box<dyn std::error::Error>> {
    while state.is_ongoing() {
        let bus = begin_turn(state, rng)?;
        bus.print_formatted(state);

        if pending_decision(state) != PendingDecision::PlayerMove {
            continue;
        }

        print_move_menu(state);
        loop {
            let line = match prompt(input, "Choose a move (or 'run'):").await? {
                Reply::Line(line) => line,
                Reply::Cancelled => {
                    end_encounter(state)?.print_formatted(state);
                    break;
                }
            };

            if line.eq_ignore_ascii_case("run") {
                end_encounter(state)?.print_formatted(state);
                break;
            }

            let Ok(number) = line.parse::<usize>() else {
                println!("Enter a move number or 'run'.");
                continue;
            };

            match apply_move(state, number, rng) {
                Ok(bus) => {
                    bus.print_formatted(state);
                    break;
                }
                Err(BattleEngineError::Action(err @ ActionError::InvalidMoveSelection { .. })) => {
                    println!("{}", err);
                }
                Err(err) => return Err(err.into()),
            }
        }
    }
    Ok(())
}

async fn offer_catch(
    state: &mut BattleState,
    rng: &mut RandomRng,
    input: &mut Input,
) -> Result<(), Box<dyn std::error::Error>> {
    if let Err(reason) = can_attempt_catch(state) {
        println!("{}", reason);
        return Ok(());
    }

    let balls: Vec<String> = BallType::iter()
        .map(|ball| format!("{} ({})", ball, ball.description()))
        .collect();
    println!("Throw a ball? {}", balls.join(", "));

    let ball = loop {
        let line = match prompt(input, "Ball name (or 'skip'):").await? {
            Reply::Line(line) => line,
            Reply::Cancelled => return Ok(()),
        };
        if line.eq_ignore_ascii_case("skip") {
            return Ok(());
        }
        match parse_ball(&line) {
            Ok(ball) => break ball,
            Err(err @ CatchError::InvalidCaptureDevice(_)) => println!("{}", err),
            Err(err) => return Err(err.into()),
        }
    };

    match attempt_catch(state, &ball.pokeball(), rng) {
        Ok((outcome, bus)) => {
            bus.print_formatted(state);
            if let CatchOutcome::Caught(record) = outcome {
                println!("{}", record.to_json()?);
            }
        }
        Err(err) => {
            warn!(%err, "catch attempt rejected");
            println!("{}", err);
        }
    }

    Ok(())
}

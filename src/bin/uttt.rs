//! uttt - Ultimate Tic-Tac-Toe self-play runner.
//!
//! Plays full games between the MCTS agent (as X) and a second agent
//! (MCTS or uniform random), logging every move.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use tracing::{info, warn};

use uttt_mcts::{
    apply_move, GameRng, MCTSConfig, MctsAgent, Player, UltimateMove, UltimateState,
};

#[derive(Parser, Debug)]
#[command(name = "uttt")]
#[command(about = "Monte Carlo Tree Search for Ultimate Tic-Tac-Toe")]
struct Cli {
    /// Log level (trace, debug, info, warn, error); RUST_LOG takes priority
    #[arg(long, global = true, default_value = "info")]
    log_level: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Play self-play games and report the results
    Play(PlayArgs),
}

#[derive(clap::Args, Debug)]
struct PlayArgs {
    /// Number of games to play
    #[arg(long, default_value_t = 1)]
    games: u32,

    /// MCTS iterations per move
    #[arg(long, default_value_t = 200)]
    iterations: u32,

    /// Agent playing O
    #[arg(long, value_enum, default_value_t = Opponent::Mcts)]
    opponent: Opponent,

    /// Base RNG seed
    #[arg(long, default_value_t = 42)]
    seed: u64,

    /// Wall-clock budget per move in milliseconds
    #[arg(long)]
    time_limit_ms: Option<u64>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum Opponent {
    Mcts,
    Random,
}

enum Agent {
    Mcts(MctsAgent),
    Random(GameRng),
}

impl Agent {
    fn choose(&mut self, state: &UltimateState) -> Result<Option<UltimateMove>> {
        match self {
            Agent::Mcts(agent) => Ok(agent.select_move(state, None)?),
            Agent::Random(rng) => Ok(rng.choose(&state.legal_moves()).copied()),
        }
    }
}

#[derive(Debug, Default)]
struct Summary {
    x_wins: u32,
    o_wins: u32,
    draws: u32,
}

fn init_tracing(level: &str) -> Result<()> {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(filter)
        .init();

    Ok(())
}

fn search_config(args: &PlayArgs, seed: u64) -> MCTSConfig {
    let mut config = MCTSConfig::default()
        .with_iterations(args.iterations)
        .with_seed(seed);
    if let Some(ms) = args.time_limit_ms {
        config = config.with_time_limit_ms(ms);
    }
    config
}

fn play_game(args: &PlayArgs, game: u32) -> Result<Option<Player>> {
    let game_seed = args.seed.wrapping_add(u64::from(game) * 1_000);
    let config = search_config(args, game_seed);
    config.validate().context("invalid search settings")?;

    let mut x = Agent::Mcts(MctsAgent::new(config.clone()));
    let mut o = match args.opponent {
        Opponent::Mcts => Agent::Mcts(MctsAgent::new(config.with_seed(game_seed.wrapping_add(500)))),
        Opponent::Random => Agent::Random(GameRng::new(game_seed.wrapping_add(500))),
    };

    let mut state = UltimateState::new();
    let mut ply = 0u32;
    while !state.is_game_over() {
        let agent = match state.to_move() {
            Player::X => &mut x,
            Player::O => &mut o,
        };
        let Some(mv) = agent.choose(&state)? else {
            warn!(game, ply, "no legal move for {}", state.to_move());
            break;
        };
        state = apply_move(&state, &mv).with_context(|| format!("agent chose illegal move {mv}"))?;
        ply += 1;
        info!(game, ply, mv = %mv, "move");
    }

    println!("{state}");
    let winner = state.global_winner();
    match winner {
        Some(p) => info!(game, plies = ply, winner = %p, "game over"),
        None => info!(game, plies = ply, "game over: draw"),
    }
    Ok(winner)
}

fn play(args: &PlayArgs) -> Result<Summary> {
    let mut summary = Summary::default();
    for game in 0..args.games {
        match play_game(args, game)? {
            Some(Player::X) => summary.x_wins += 1,
            Some(Player::O) => summary.o_wins += 1,
            None => summary.draws += 1,
        }
    }
    Ok(summary)
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(&cli.log_level)?;

    match cli.command {
        Command::Play(args) => {
            info!(
                games = args.games,
                iterations = args.iterations,
                opponent = ?args.opponent,
                seed = args.seed,
                "starting self-play"
            );
            let summary = play(&args)?;
            println!(
                "X (mcts) wins: {}  O ({:?}) wins: {}  draws: {}",
                summary.x_wins, args.opponent, summary.o_wins, summary.draws
            );
        }
    }

    Ok(())
}

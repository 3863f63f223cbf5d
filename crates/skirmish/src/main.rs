//! skirmish: run a single battle from the command line
//!
//! Builds a player and an opponent from the arguments, fights it out with
//! sk-core and prints the combat result as JSON on stdout. Logs go to stderr.

mod sources;

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{ArgAction, Parser};
use tracing::info;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

use sk_core::{
    BossKind, CombatResult, Combatant, EngineConfig, GameRng, Opponent, Personality, TurnEngine,
};

use sources::{AutoPilot, StdinPrompt};

/// Turn-based battle runner
#[derive(Parser, Debug)]
#[command(name = "skirmish")]
#[command(author, version, about = "Skirmish - fight one battle", long_about = None)]
struct Args {
    /// RNG seed; a random one is used when omitted
    #[arg(short = 's', long = "seed")]
    seed: Option<u64>,

    /// Player name
    #[arg(short = 'u', long = "name", default_value = "Hero")]
    name: String,

    /// Player level
    #[arg(short = 'l', long = "level", default_value_t = 1)]
    level: u32,

    /// Opponent name
    #[arg(short = 'e', long = "enemy", default_value = "Goblin")]
    enemy: String,

    /// Opponent base health
    #[arg(long = "health", default_value_t = 60)]
    health: i32,

    /// Opponent base attack
    #[arg(long = "attack", default_value_t = 12)]
    attack: i32,

    /// Make the opponent a boss (standard, dragon, lich, giant)
    #[arg(short = 'b', long = "boss")]
    boss: Option<String>,

    /// Opponent personality (aggressive, defensive, tactical, coward, berserker, cautious)
    #[arg(short = 'p', long = "personality")]
    personality: Option<String>,

    /// Engine configuration file (JSON)
    #[arg(short = 'c', long = "config")]
    config: Option<PathBuf>,

    /// Choose each action from a menu on stdin
    #[arg(short = 'i', long = "interactive")]
    interactive: bool,

    /// Pretty-print the result
    #[arg(long = "pretty")]
    pretty: bool,

    /// Verbose output (repeat for more)
    #[arg(short = 'v', long = "verbose", action = ArgAction::Count)]
    verbose: u8,
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_tracing(args.verbose)?;

    let config = match &args.config {
        Some(path) => load_config(path)?,
        None => EngineConfig::default(),
    };

    let mut rng = match args.seed {
        Some(seed) => GameRng::new(seed),
        None => GameRng::from_entropy(),
    };

    let personality = match &args.personality {
        Some(name) => name
            .parse::<Personality>()
            .with_context(|| format!("unknown personality '{name}'"))?,
        None => Personality::roll(&mut rng),
    };

    let player = Combatant::player(args.name.as_str()).with_level(args.level);
    let enemy = match &args.boss {
        Some(kind) => {
            let kind = kind
                .parse::<BossKind>()
                .with_context(|| format!("unknown boss kind '{kind}'"))?;
            Combatant::boss_from_base(args.enemy.as_str(), args.health, args.attack, kind)
        }
        None => Combatant::enemy(args.enemy.as_str(), args.health, args.attack),
    };

    info!(seed = rng.seed(), %personality, "starting skirmish");
    let opponent = Opponent::new(enemy, personality.profile(), &mut rng);
    let engine = TurnEngine::new(config);

    let result: CombatResult = if args.interactive {
        engine.run(player, opponent, &mut StdinPrompt::stdin(), &mut rng)
    } else {
        engine.run(player, opponent, &mut AutoPilot::default(), &mut rng)
    };

    let json = if args.pretty {
        serde_json::to_string_pretty(&result)?
    } else {
        serde_json::to_string(&result)?
    };
    println!("{json}");

    Ok(())
}

/// Install the stderr subscriber; `RUST_LOG` overrides the verbosity flag
fn init_tracing(verbose: u8) -> Result<()> {
    let default = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    let filter = match std::env::var(EnvFilter::DEFAULT_ENV) {
        Ok(_) => EnvFilter::try_from_default_env()?,
        Err(_) => EnvFilter::try_new(default)?,
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();
    Ok(())
}

fn load_config(path: &Path) -> Result<EngineConfig> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("reading config {}", path.display()))?;
    let config = EngineConfig::from_json_str(&text)
        .with_context(|| format!("loading config {}", path.display()))?;
    Ok(config)
}

use anyhow::{Context, Result, bail};
use clap::Parser;
use directories::ProjectDirs;
use dungeon_core::{Direction, Engine, EngineConfig};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

/// Plays a scripted dungeon run and prints the log, map, and top scores
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// TOML file with difficulty, seed, score_path, and moves
    #[arg(short, long)]
    config: Option<PathBuf>,
    #[arg(short, long)]
    seed: Option<u64>,
    #[arg(short, long)]
    difficulty: Option<i32>,
    /// Move script such as "UURRDL"
    #[arg(short, long)]
    moves: Option<String>,
    /// File holding a move script; `#` starts a comment
    #[arg(long)]
    moves_file: Option<PathBuf>,
    /// Resume from a save file instead of starting fresh
    #[arg(long)]
    load: Option<PathBuf>,
    /// Write a save file after the moves have been applied
    #[arg(long)]
    save: Option<PathBuf>,
    /// Score store location (defaults to the per-user data dir)
    #[arg(long)]
    scores: Option<PathBuf>,
    /// Keep the score ledger in memory only
    #[arg(long)]
    no_scores: bool,
}

#[derive(Debug, Default, Deserialize)]
struct FileConfig {
    #[serde(flatten)]
    engine: EngineConfig,
    moves: Option<String>,
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).with_target(false).compact().init();
}

fn default_score_path() -> Option<PathBuf> {
    ProjectDirs::from("", "", "MiniDungeon").map(|proj_dirs| {
        let mut path = proj_dirs.data_dir().to_path_buf();
        path.push("top_scores.json");
        path
    })
}

fn load_file_config(path: &Path) -> Result<FileConfig> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;
    toml::from_str(&raw).with_context(|| format!("Invalid config file: {}", path.display()))
}

/// Command-line flags win over file values.
fn resolve_config(args: &Args, mut config: EngineConfig) -> EngineConfig {
    if let Some(seed) = args.seed {
        config.seed = Some(seed);
    }
    if let Some(difficulty) = args.difficulty {
        config.difficulty = difficulty;
    }
    if args.no_scores {
        config.score_path = None;
    } else if let Some(scores) = &args.scores {
        config.score_path = Some(scores.clone());
    } else if config.score_path.is_none() {
        config.score_path = default_score_path();
    }
    config
}

fn parse_moves(script: &str) -> Result<Vec<Direction>> {
    let mut moves = Vec::new();
    for (line_no, line) in script.lines().enumerate() {
        let body = line.split('#').next().unwrap_or_default();
        for c in body.chars().filter(|c| !c.is_whitespace() && *c != ',') {
            match Direction::from_char(c) {
                Some(direction) => moves.push(direction),
                None => bail!("Unknown move '{c}' on line {}", line_no + 1),
            }
        }
    }
    Ok(moves)
}

fn collect_moves(args: &Args, from_config: Option<&str>) -> Result<Vec<Direction>> {
    let mut moves = Vec::new();
    if let Some(script) = from_config {
        moves.extend(parse_moves(script).context("Bad moves in config file")?);
    }
    if let Some(path) = &args.moves_file {
        let script = fs::read_to_string(path)
            .with_context(|| format!("Failed to read moves file: {}", path.display()))?;
        moves.extend(parse_moves(&script)?);
    }
    if let Some(script) = &args.moves {
        moves.extend(parse_moves(script)?);
    }
    Ok(moves)
}

fn main() -> Result<()> {
    init_tracing();
    let args = Args::parse();

    let file_config = match &args.config {
        Some(path) => load_file_config(path)?,
        None => FileConfig::default(),
    };
    let moves = collect_moves(&args, file_config.moves.as_deref())?;
    let config = resolve_config(&args, file_config.engine);

    let mut engine = match &args.load {
        Some(path) => Engine::load_game(path, config.score_path.clone())
            .with_context(|| format!("Failed to load save file: {}", path.display()))?,
        None => Engine::from_config(config),
    };
    info!(seed = engine.seed(), difficulty = engine.difficulty(), moves = moves.len(), "run ready");

    let mut accepted = 0;
    for direction in moves {
        if engine.is_over() {
            break;
        }
        if engine.move_player(direction) {
            accepted += 1;
        }
    }

    if let Some(path) = &args.save
        && !engine.save_game(path)
    {
        warn!(path = %path.display(), "save did not complete");
    }

    for line in engine.event_log() {
        println!("{line}");
    }
    println!();
    print!("{}", engine.render_ascii());
    println!();
    let player = engine.player();
    println!(
        "Status: {:?} | Level {} | HP {}/{} | Score {} | Steps left {} | Moves accepted {}",
        engine.status(),
        engine.level(),
        player.health(),
        player.max_health(),
        player.score(),
        engine.steps_remaining(),
        accepted
    );
    println!("Seed: {}", engine.seed());
    println!("Snapshot Hash: {:#018x}", engine.snapshot_hash());
    if engine.is_over() {
        println!("Top scores:");
        for line in engine.top_five() {
            println!("  {line}");
        }
    }

    Ok(())
}

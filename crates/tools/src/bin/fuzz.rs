use anyhow::{Result, ensure};
use clap::Parser;
use dungeon_core::seed::mix_seed_stream;
use dungeon_core::{CellKind, Direction, Engine, MAX_HEALTH, RunStatus};
use rand_chacha::{
    ChaCha8Rng,
    rand_core::{Rng, SeedableRng},
};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    #[arg(short, long, default_value_t = 42)]
    seed: u64,
    /// Number of independent runs
    #[arg(short, long, default_value_t = 200)]
    runs: u64,
    /// Move attempts per run, rejected ones included
    #[arg(short, long, default_value_t = 1000)]
    attempts: u32,
    #[arg(short, long, default_value_t = 3)]
    difficulty: i32,
}

fn choose<T: Copy>(rng: &mut ChaCha8Rng, slice: &[T]) -> T {
    let p = rng.next_u64() as usize % slice.len();
    slice[p]
}

fn check_invariants(engine: &Engine, run_seed: u64) -> Result<()> {
    let grid = engine.grid();
    for cell in grid.cells() {
        ensure!(
            !cell.pos().is_perimeter() || cell.kind().blocks_movement(),
            "Invariant failed: open perimeter at {:?} on seed {run_seed}",
            cell.pos()
        );
    }
    ensure!(grid.count(CellKind::Ladder) <= 1, "Invariant failed: extra ladder on seed {run_seed}");

    let player = engine.player();
    ensure!(
        player.pos().is_interior() && !grid.kind_at(player.pos()).blocks_movement(),
        "Invariant failed: player at {:?} on seed {run_seed}",
        player.pos()
    );
    ensure!(
        (0..=MAX_HEALTH).contains(&player.health()),
        "Invariant failed: health {} on seed {run_seed}",
        player.health()
    );
    Ok(())
}

fn run_one(run_seed: u64, difficulty: i32, attempts: u32) -> Result<RunStatus> {
    let mut engine = Engine::new(difficulty, Some(run_seed));
    let mut rng = ChaCha8Rng::seed_from_u64(run_seed);
    check_invariants(&engine, run_seed)?;

    for _ in 0..attempts {
        if engine.is_over() {
            break;
        }
        let steps_before = engine.steps_remaining();
        let accepted = engine.move_player(choose(&mut rng, &Direction::ALL));
        let spent = steps_before - engine.steps_remaining();
        ensure!(
            spent == u32::from(accepted),
            "Invariant failed: move cost {spent} steps on seed {run_seed}"
        );
        check_invariants(&engine, run_seed)?;
    }

    debug!(run_seed, status = ?engine.status(), score = engine.player().score(), "run done");
    Ok(engine.status())
}

fn main() -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).with_target(false).compact().init();
    let args = Args::parse();

    info!(seed = args.seed, runs = args.runs, "starting fuzz harness");
    let (mut won, mut lost, mut ongoing) = (0, 0, 0);
    for run in 0..args.runs {
        match run_one(mix_seed_stream(args.seed, run), args.difficulty, args.attempts)? {
            RunStatus::Won => won += 1,
            RunStatus::Lost => lost += 1,
            RunStatus::Ongoing => ongoing += 1,
        }
    }

    println!("Fuzzing completed successfully.");
    println!("Won {won} | Lost {lost} | Unfinished {ongoing}");
    Ok(())
}

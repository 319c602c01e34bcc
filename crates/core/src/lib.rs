pub mod cell;
pub mod config;
pub mod game;
pub mod ledger;
pub mod mapgen;
pub mod save;
pub mod seed;
pub mod state;
pub mod types;

pub use cell::{Cell, Effect};
pub use config::EngineConfig;
pub use game::Engine;
pub use ledger::{ScoreEntry, ScoreFileError, ScoreLedger};
pub use save::{EngineSnapshot, SaveError};
pub use state::{Grid, Player};
pub use types::*;

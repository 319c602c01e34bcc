//! Public data models for generated levels and their placement reports.

use crate::state::Grid;
use crate::types::{CellKind, Pos};

/// How many cells of one kind were asked for and how many fit.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Placement {
    pub kind: CellKind,
    pub requested: usize,
    pub placed: usize,
}

impl Placement {
    pub fn is_under_filled(&self) -> bool {
        self.placed < self.requested
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GeneratedLevel {
    pub level: u8,
    pub grid: Grid,
    pub player_start: Pos,
    pub ladder: Option<Pos>,
    pub placements: Vec<Placement>,
}

impl GeneratedLevel {
    pub fn placed(&self, kind: CellKind) -> usize {
        self.placements.iter().filter(|placement| placement.kind == kind).map(|p| p.placed).sum()
    }
}

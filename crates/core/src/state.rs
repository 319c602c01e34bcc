use serde::{Deserialize, Serialize};

use crate::cell::Cell;
use crate::types::*;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    pos: Pos,
    health: i32,
    score: u32,
}

impl Player {
    pub fn new(pos: Pos) -> Self {
        Self { pos, health: MAX_HEALTH, score: 0 }
    }

    pub fn pos(&self) -> Pos {
        self.pos
    }

    pub fn health(&self) -> i32 {
        self.health
    }

    pub fn max_health(&self) -> i32 {
        MAX_HEALTH
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn take_damage(&mut self, amount: i32) {
        self.health = (self.health - amount).max(0);
    }

    pub fn heal(&mut self, amount: i32) {
        self.health = (self.health + amount).min(MAX_HEALTH);
    }

    pub fn add_score(&mut self, points: u32) {
        self.score = self.score.saturating_add(points);
    }

    pub fn set_position(&mut self, pos: Pos) {
        self.pos = pos;
    }

    pub(crate) fn has_valid_health(&self) -> bool {
        (0..=MAX_HEALTH).contains(&self.health)
    }
}

/// Fixed 12x12 arrangement of cells, stored row-major.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Grid {
    cells: Vec<Cell>,
}

impl Grid {
    /// Wall ring around an all-empty interior.
    pub fn walled() -> Self {
        let mut cells = Vec::with_capacity(GRID_SIZE * GRID_SIZE);
        for y in 0..GRID_SIZE {
            for x in 0..GRID_SIZE {
                let pos = Pos { y: y as i32, x: x as i32 };
                let kind = if pos.is_perimeter() { CellKind::Wall } else { CellKind::Empty };
                cells.push(Cell::new(kind, pos));
            }
        }
        Self { cells }
    }

    pub fn size(&self) -> usize {
        GRID_SIZE
    }

    pub fn in_bounds(&self, pos: Pos) -> bool {
        pos.x >= 0 && pos.y >= 0 && (pos.x as usize) < GRID_SIZE && (pos.y as usize) < GRID_SIZE
    }

    pub fn cell_at(&self, pos: Pos) -> Option<&Cell> {
        if !self.in_bounds(pos) {
            return None;
        }
        self.cells.get(index(pos))
    }

    /// Out-of-bounds positions read as walls.
    pub fn kind_at(&self, pos: Pos) -> CellKind {
        self.cell_at(pos).map_or(CellKind::Wall, Cell::kind)
    }

    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    pub fn rows(&self) -> impl Iterator<Item = &[Cell]> {
        self.cells.chunks(GRID_SIZE)
    }

    pub fn positions_of(&self, kind: CellKind) -> impl Iterator<Item = Pos> + '_ {
        self.cells.iter().filter(move |cell| cell.kind() == kind).map(Cell::pos)
    }

    pub fn count(&self, kind: CellKind) -> usize {
        self.positions_of(kind).count()
    }

    pub(crate) fn set_kind(&mut self, pos: Pos, kind: CellKind) {
        if !self.in_bounds(pos) {
            return;
        }
        let idx = index(pos);
        self.cells[idx] = Cell::new(kind, pos);
    }

    /// Checks the shape of a grid that came from outside the engine (a save file).
    pub(crate) fn is_well_formed(&self) -> bool {
        self.cells.len() == GRID_SIZE * GRID_SIZE
            && self.cells.iter().enumerate().all(|(idx, cell)| {
                let pos = cell.pos();
                self.in_bounds(pos) && index(pos) == idx
            })
    }
}

fn index(pos: Pos) -> usize {
    (pos.y as usize) * GRID_SIZE + (pos.x as usize)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn walled_grid_has_ring_and_empty_interior() {
        let grid = Grid::walled();
        for cell in grid.cells() {
            let expected = if cell.pos().is_perimeter() { CellKind::Wall } else { CellKind::Empty };
            assert_eq!(cell.kind(), expected, "unexpected kind at {:?}", cell.pos());
        }
        assert_eq!(grid.count(CellKind::Wall), 4 * (GRID_SIZE - 1));
        assert!(grid.is_well_formed());
    }

    #[test]
    fn out_of_bounds_reads_as_wall() {
        let grid = Grid::walled();
        assert_eq!(grid.kind_at(Pos { y: -1, x: 3 }), CellKind::Wall);
        assert_eq!(grid.kind_at(Pos { y: 3, x: 12 }), CellKind::Wall);
        assert!(grid.cell_at(Pos { y: 12, x: 0 }).is_none());
    }

    #[test]
    fn set_kind_replaces_cell_at_same_coordinates() {
        let mut grid = Grid::walled();
        let pos = Pos { y: 4, x: 7 };
        grid.set_kind(pos, CellKind::Gold);
        let cell = grid.cell_at(pos).expect("in bounds");
        assert_eq!(cell.kind(), CellKind::Gold);
        assert_eq!(cell.pos(), pos);
        assert_eq!(grid.rows().nth(4).map(|row| row[7].kind()), Some(CellKind::Gold));
    }

    #[test]
    fn player_health_is_clamped_both_ways() {
        let mut player = Player::new(PLAYER_START);
        player.take_damage(25);
        assert_eq!(player.health(), 0);
        player.heal(40);
        assert_eq!(player.health(), MAX_HEALTH);
        assert!(player.has_valid_health());
    }

    #[test]
    fn shuffled_grid_is_not_well_formed() {
        let mut grid = Grid::walled();
        grid.cells.swap(13, 14);
        assert!(!grid.is_well_formed());
        grid.cells.pop();
        assert!(!grid.is_well_formed());
    }
}

//! Plain-text map dump for tools and test diagnostics.

use super::*;

const PLAYER_GLYPH: char = 'P';

impl Engine {
    /// One line per row, player drawn over whatever it stands on.
    pub fn render_ascii(&self) -> String {
        let player = self.player.pos();
        let mut out = String::with_capacity(self.grid.size() * (self.grid.size() + 1));
        for row in self.grid.rows() {
            for cell in row {
                let glyph = if cell.pos() == player { PLAYER_GLYPH } else { cell.kind().glyph() };
                out.push(glyph);
            }
            out.push('\n');
        }
        out
    }
}

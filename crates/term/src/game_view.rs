//! GameView: maps a [`GameInfo`] snapshot into terminal text lines.
//!
//! This module is pure (no I/O). It can be unit-tested.

use std::fmt::Write as _;

use crate::types::{
    GameInfo, GameKind, Preview, CELL_EMPTY, CELL_FOOD, FIELD_HEIGHT, FIELD_WIDTH,
};

/// Board row that carries the PAUSED / GAME OVER banner.
const BANNER_ROW: usize = FIELD_HEIGHT / 2 - 1;

/// A lightweight text renderer for both games.
pub struct GameView {
    kind: GameKind,
    /// Terminal columns per board cell.
    cell_w: usize,
}

impl GameView {
    pub fn new(kind: GameKind) -> Self {
        // 2x1 helps compensate for typical terminal glyph aspect ratio.
        Self { kind, cell_w: 2 }
    }

    pub fn kind(&self) -> GameKind {
        self.kind
    }

    /// Width of the framed board in columns.
    pub fn board_width(&self) -> usize {
        FIELD_WIDTH * self.cell_w + 2
    }

    pub fn render(&self, info: &GameInfo) -> Vec<String> {
        let mut lines = Vec::with_capacity(FIELD_HEIGHT + 2);
        self.render_into(info, &mut lines);
        lines
    }

    /// Render into `out`, reusing its line buffers across frames.
    pub fn render_into(&self, info: &GameInfo, out: &mut Vec<String>) {
        out.resize_with(FIELD_HEIGHT + 2, String::new);
        for line in out.iter_mut() {
            line.clear();
        }

        let border = format!("+{}+", "-".repeat(FIELD_WIDTH * self.cell_w));
        out[0].push_str(&border);
        out[FIELD_HEIGHT + 1].push_str(&border);

        let banner = if info.game_over {
            Some("GAME OVER")
        } else if info.paused {
            Some("PAUSED")
        } else {
            None
        };

        for (y, row) in info.field.iter().enumerate() {
            let line = &mut out[y + 1];
            line.push('|');
            match banner {
                Some(text) if y == BANNER_ROW => {
                    let _ = write!(line, "{:^w$}", text, w = FIELD_WIDTH * self.cell_w);
                }
                _ if info.game_over && y == BANNER_ROW + 1 => {
                    let _ = write!(line, "{:^w$}", "ENTER: NEW", w = FIELD_WIDTH * self.cell_w);
                }
                _ => {
                    for &cell in row {
                        line.push_str(cell_glyph(cell));
                    }
                }
            }
            line.push('|');
            self.side_panel(y, info, line);
        }
    }

    fn side_panel(&self, y: usize, info: &GameInfo, line: &mut String) {
        let has_preview = preview_filled(&info.next);
        let _ = match y {
            0 => write!(line, "  {}", self.kind.as_str().to_uppercase()),
            2 if has_preview => write!(line, "  NEXT"),
            3..=6 if has_preview => {
                line.push_str("  ");
                for &cell in &info.next[y - 3] {
                    line.push_str(cell_glyph(cell));
                }
                Ok(())
            }
            8 => write!(line, "  SCORE {:>6}", info.score),
            9 => write!(line, "  HIGH  {:>6}", info.high_score),
            10 => write!(line, "  LEVEL {:>6}", info.level),
            11 => write!(line, "  SPEED {:>4}ms", info.speed_ms),
            _ => Ok(()),
        };
    }
}

fn cell_glyph(cell: u8) -> &'static str {
    match cell {
        CELL_EMPTY => "  ",
        CELL_FOOD => "()",
        _ => "[]",
    }
}

fn preview_filled(next: &Preview) -> bool {
    next.iter().flatten().any(|&c| c != CELL_EMPTY)
}

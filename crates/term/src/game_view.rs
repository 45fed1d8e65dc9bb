//! GameView: maps a [`GameSnapshot`] into a terminal framebuffer.
//!
//! This module is pure (no I/O). It can be unit-tested.
//!
//! Layout, for a board `columns` wide and `rows` tall:
//!
//! ```text
//!            ╔═════════════╗
//!            ║ T E T R I S ║
//!            ╚═══╤═════╤═══╝
//!   ╔═╦═══════╧═════╧═══════╦═╗
//!   ╟╳╢ █▋█▋                ╟╳╢   <- one line per board row
//!   ...
//!   ╚═╩═════════════════════╩═╝
//! ```
//!
//! The board is centered horizontally and sits two lines above the bottom of
//! the viewport. Each board cell is two terminal columns wide.

use crate::core::GameSnapshot;
use crate::fb::{Cell, CellStyle, FrameBuffer, Rgb};

/// Terminal viewport dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub width: u16,
    pub height: u16,
}

impl Viewport {
    pub fn new(width: u16, height: u16) -> Self {
        Self { width, height }
    }
}

/// Screen position of board cell (0, 0).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BoardOrigin {
    pub x: i32,
    pub y: i32,
}

const WALL: &str = "╟╳╢";
const BLOCK: &str = "█▋";
const TITLE: [&str; 3] = ["╔═════════════╗", "║ T E T R I S ║", "╚═══╤═════╤═══╝"];
const LEGEND: [&str; 7] = [
    "        ╭───╮",
    "        │ W │─ drop",
    "left ┐  ╰───╯  ┌ right",
    "   ╭───╮╭───╮╭───╮",
    "   │ A ││ S ││ D │",
    "   ╰───╯╰───╯╰───╯",
    "          └ rotate",
];
/// Legend column offset left of the board.
const LEGEND_OFFSET: i32 = 26;

/// Terminal colors by color index (1..=7).
const PALETTE: [Rgb; 7] = [
    Rgb::new(80, 200, 90),   // green
    Rgb::new(220, 70, 70),   // red
    Rgb::new(235, 210, 70),  // yellow
    Rgb::new(200, 100, 210), // magenta
    Rgb::new(80, 210, 220),  // cyan
    Rgb::new(235, 235, 235), // white
    Rgb::new(80, 110, 230),  // blue
];

/// Style for a color index; `None` for 0 and unknown indices.
pub fn color_style(color_index: u8) -> Option<CellStyle> {
    let rgb = PALETTE.get((color_index as usize).checked_sub(1)?)?;
    Some(CellStyle::fg(*rgb))
}

/// A lightweight terminal renderer for the game.
#[derive(Debug, Clone, Copy)]
pub struct GameView {
    show_legend: bool,
}

impl Default for GameView {
    fn default() -> Self {
        Self::new()
    }
}

impl GameView {
    pub fn new() -> Self {
        Self { show_legend: true }
    }

    pub fn with_legend(mut self, show_legend: bool) -> Self {
        self.show_legend = show_legend;
        self
    }

    /// Where board cell (0, 0) lands for a given viewport.
    pub fn origin(&self, snap: &GameSnapshot, viewport: Viewport) -> BoardOrigin {
        BoardOrigin {
            x: viewport.width as i32 / 2 - snap.columns as i32,
            y: viewport.height as i32 - snap.rows as i32 - 2,
        }
    }

    /// Render the snapshot into an existing framebuffer.
    ///
    /// Callers can reuse a framebuffer across frames; it is only resized when
    /// the viewport changes.
    pub fn render_into(&self, snap: &GameSnapshot, viewport: Viewport, fb: &mut FrameBuffer) {
        fb.resize(viewport.width, viewport.height);
        fb.clear();

        let origin = self.origin(snap, viewport);
        let frame = CellStyle::default();

        self.draw_title(fb, snap, viewport, origin, frame);

        for y in 0..snap.rows {
            let sy = origin.y + y as i32;
            fb.put_str(origin.x - 4, sy, WALL, frame);
            fb.put_str(origin.x + snap.columns as i32 * 2, sy, WALL, frame);

            for x in 0..snap.columns {
                if let Some(style) = color_style(snap.board_cell(x, y)) {
                    fb.put_str(origin.x + x as i32 * 2, sy, BLOCK, style);
                }
            }
        }

        for cell in &snap.active {
            if cell.y < 0 || cell.y as i32 >= snap.rows as i32 {
                continue;
            }
            if let Some(style) = color_style(cell.kind.color_index()) {
                fb.put_str(
                    origin.x + cell.x as i32 * 2,
                    origin.y + cell.y as i32,
                    BLOCK,
                    style,
                );
            }
        }

        let bottom = self.wall_line(snap.columns, '╚', '╩', '╝', None);
        fb.put_str(origin.x - 4, origin.y + snap.rows as i32, &bottom, frame);

        if self.show_legend && origin.x - LEGEND_OFFSET >= 0 {
            let top = origin.y + snap.rows as i32 - LEGEND.len() as i32;
            for (i, line) in LEGEND.iter().enumerate() {
                fb.put_str(origin.x - LEGEND_OFFSET, top + i as i32, line, frame);
            }
        }

        if snap.game_over {
            self.draw_game_over(fb, snap, origin);
        }
    }

    /// Convenience helper that allocates a new framebuffer.
    pub fn render(&self, snap: &GameSnapshot, viewport: Viewport) -> FrameBuffer {
        let mut fb = FrameBuffer::new(viewport.width, viewport.height);
        self.render_into(snap, viewport, &mut fb);
        fb
    }

    fn draw_title(
        &self,
        fb: &mut FrameBuffer,
        snap: &GameSnapshot,
        viewport: Viewport,
        origin: BoardOrigin,
        style: CellStyle,
    ) {
        for (i, line) in TITLE.iter().enumerate() {
            let y = origin.y - 4 + i as i32;
            put_centered(fb, viewport, y, line, style.bold());
        }

        // The title box's two feet (╤) rest on the wall line.
        let feet = viewport.width as i32 / 2 - 1 - TITLE[2].chars().count() as i32 / 2;
        let left = origin.x - 4;
        let joins = [feet + 4 - left, feet + 10 - left];
        let top = self.wall_line(snap.columns, '╔', '╦', '╗', Some(joins));
        fb.put_str(left, origin.y - 1, &top, style);
    }

    /// `╔═╦════╦═╗` style wall line spanning both walls and the board.
    fn wall_line(
        &self,
        columns: u8,
        corner_l: char,
        post: char,
        corner_r: char,
        joins: Option<[i32; 2]>,
    ) -> String {
        let len = columns as usize * 2 + 7;
        let mut line: Vec<char> = vec!['═'; len];
        line[0] = corner_l;
        line[2] = post;
        line[len - 3] = post;
        line[len - 1] = corner_r;
        for pos in joins.into_iter().flatten() {
            if pos > 2 && (pos as usize) < len - 3 {
                line[pos as usize] = '╧';
            }
        }
        line.into_iter().collect()
    }

    fn draw_game_over(&self, fb: &mut FrameBuffer, snap: &GameSnapshot, origin: BoardOrigin) {
        let style = CellStyle::fg(Rgb::new(255, 255, 255)).bold();
        let center_x = origin.x + snap.columns as i32;
        let mid_y = origin.y + snap.rows as i32 / 2;
        fb.fill_rect(center_x - 6, mid_y - 1, 12, 4, Cell::default());
        for (dy, text) in [(0, "GAME OVER"), (1, "q to quit")] {
            let x = center_x - text.chars().count() as i32 / 2;
            fb.put_str(x, mid_y + dy, text, style);
        }
    }
}

/// Write `s` centered on row `y`, matching the title's one-column left bias.
fn put_centered(fb: &mut FrameBuffer, viewport: Viewport, y: i32, s: &str, style: CellStyle) {
    let x = viewport.width as i32 / 2 - s.chars().count() as i32 / 2 - 1;
    fb.put_str(x, y, s, style);
}

//! Off-screen character buffer with a few drawing helpers.

use crossterm::style::Color;

/// One terminal cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cell {
    pub ch: char,
    pub fg: Color,
    pub bg: Color,
}

impl Default for Cell {
    fn default() -> Self {
        Self {
            ch: ' ',
            fg: Color::Reset,
            bg: Color::Reset,
        }
    }
}

/// A rectangle in canvas coordinates (terminal columns and rows).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rect {
    pub x: u16,
    pub y: u16,
    pub width: u16,
    pub height: u16,
}

/// A `width x height` grid of [`Cell`]s, drawn into and then flushed to a
/// terminal as a whole.
#[derive(Debug, Clone)]
pub struct Canvas {
    width: u16,
    height: u16,
    cells: Vec<Cell>,
}

impl Canvas {
    pub fn new(width: u16, height: u16) -> Self {
        Self {
            width,
            height,
            cells: vec![Cell::default(); width as usize * height as usize],
        }
    }

    #[inline]
    pub fn width(&self) -> u16 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> u16 {
        self.height
    }

    /// Cell at `(x, y)`, or `None` outside the canvas.
    pub fn get(&self, x: u16, y: u16) -> Option<&Cell> {
        self.index(x, y).map(|i| &self.cells[i])
    }

    /// Rows of cells, top to bottom.
    pub fn rows(&self) -> impl Iterator<Item = &[Cell]> + '_ {
        self.cells.chunks(self.width.max(1) as usize)
    }

    /// Blank every cell with a solid background.
    pub fn clear(&mut self, bg: Color) {
        self.cells.fill(Cell {
            bg,
            ..Cell::default()
        });
    }

    /// Fill and/or outline a rectangle. Parts outside the canvas are
    /// clipped.
    ///
    /// A terminal cell cannot draw a hairline border, so the stroke is
    /// rendered as brackets in the left and right columns of each row.
    pub fn rect(&mut self, r: Rect, fill: Option<Color>, stroke: Option<Color>) {
        let right = r.x.saturating_add(r.width.saturating_sub(1));
        for y in r.y..r.y.saturating_add(r.height) {
            for x in r.x..r.x.saturating_add(r.width) {
                let Some(i) = self.index(x, y) else {
                    continue;
                };
                let cell = &mut self.cells[i];
                if let Some(bg) = fill {
                    cell.bg = bg;
                }
                if let Some(fg) = stroke {
                    if r.width >= 2 && x == r.x {
                        cell.ch = '[';
                        cell.fg = fg;
                    } else if r.width >= 2 && x == right {
                        cell.ch = ']';
                        cell.fg = fg;
                    }
                }
            }
        }
    }

    /// Write `s` starting at `(x, y)`, truncated at the right edge.
    pub fn text(&mut self, x: u16, y: u16, s: &str, fg: Color) {
        for (dx, ch) in s.chars().enumerate() {
            let Ok(dx) = u16::try_from(dx) else {
                break;
            };
            let Some(i) = self.index(x.saturating_add(dx), y) else {
                break;
            };
            self.cells[i].ch = ch;
            self.cells[i].fg = fg;
        }
    }

    fn index(&self, x: u16, y: u16) -> Option<usize> {
        (x < self.width && y < self.height)
            .then(|| y as usize * self.width as usize + x as usize)
    }
}

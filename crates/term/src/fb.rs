//! Framebuffer and style types for terminal rendering.
//!
//! Besides plain character cells the buffer exposes a pixel layer: every cell
//! holds two vertically stacked pixels drawn with an upper half block, the
//! top pixel as foreground and the bottom pixel as background.

/// Glyph used for two-pixel cells.
pub const HALF_BLOCK: char = '▀';

/// 24-bit RGB color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Multiply every channel by `factor`, saturating at 255.
    pub fn scale(self, factor: f32) -> Self {
        let f = |c: u8| (c as f32 * factor).clamp(0.0, 255.0) as u8;
        Self::new(f(self.r), f(self.g), f(self.b))
    }

    /// Linear mix towards `other`; `t = 0` is `self`.
    pub fn mix(self, other: Rgb, t: f32) -> Self {
        let t = t.clamp(0.0, 1.0);
        let f = |a: u8, b: u8| (a as f32 + (b as f32 - a as f32) * t).round() as u8;
        Self::new(f(self.r, other.r), f(self.g, other.g), f(self.b, other.b))
    }
}

/// Minimal per-cell styling.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CellStyle {
    pub fg: Rgb,
    pub bg: Rgb,
    pub bold: bool,
    pub dim: bool,
}

impl Default for CellStyle {
    fn default() -> Self {
        Self {
            fg: Rgb::new(220, 220, 220),
            bg: Rgb::new(0, 0, 0),
            bold: false,
            dim: false,
        }
    }
}

impl CellStyle {
    pub const fn new(fg: Rgb, bg: Rgb) -> Self {
        Self {
            fg,
            bg,
            bold: false,
            dim: false,
        }
    }

    pub const fn bold(mut self) -> Self {
        self.bold = true;
        self
    }

    pub fn into_cell(self, ch: char) -> Cell {
        Cell { ch, style: self }
    }
}

/// A single terminal cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cell {
    pub ch: char,
    pub style: CellStyle,
}

impl Default for Cell {
    fn default() -> Self {
        Self {
            ch: ' ',
            style: CellStyle::default(),
        }
    }
}

/// 2D framebuffer of styled character cells.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrameBuffer {
    width: u16,
    height: u16,
    cells: Vec<Cell>,
}

impl FrameBuffer {
    pub fn new(width: u16, height: u16) -> Self {
        let len = (width as usize) * (height as usize);
        Self {
            width,
            height,
            cells: vec![Cell::default(); len],
        }
    }

    pub fn width(&self) -> u16 {
        self.width
    }

    pub fn height(&self) -> u16 {
        self.height
    }

    /// Resize, keeping the allocation when possible. Contents are unspecified
    /// afterwards; callers clear before drawing.
    pub fn resize(&mut self, width: u16, height: u16) {
        if self.width == width && self.height == height {
            return;
        }
        self.width = width;
        self.height = height;
        let len = (width as usize) * (height as usize);
        self.cells.resize(len, Cell::default());
    }

    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    #[inline(always)]
    fn idx(&self, x: u16, y: u16) -> Option<usize> {
        if x >= self.width || y >= self.height {
            return None;
        }
        Some((y as usize) * (self.width as usize) + (x as usize))
    }

    pub fn get(&self, x: u16, y: u16) -> Option<Cell> {
        self.idx(x, y).map(|i| self.cells[i])
    }

    pub fn set(&mut self, x: u16, y: u16, cell: Cell) {
        if let Some(i) = self.idx(x, y) {
            self.cells[i] = cell;
        }
    }

    pub fn clear(&mut self, cell: Cell) {
        self.cells.fill(cell);
    }

    pub fn put_str(&mut self, x: u16, y: u16, s: &str, style: CellStyle) {
        for (dx, ch) in s.chars().enumerate() {
            let Ok(dx) = u16::try_from(dx) else {
                break;
            };
            let cx = x.saturating_add(dx);
            if cx >= self.width {
                break;
            }
            self.set(cx, y, Cell { ch, style });
        }
    }

    pub fn fill_row(&mut self, y: u16, style: CellStyle) {
        for x in 0..self.width {
            self.set(x, y, style.into_cell(' '));
        }
    }

    /// Pixel rows available (two per cell row).
    pub fn pixel_height(&self) -> u32 {
        self.height as u32 * 2
    }

    /// Paint one pixel. `py` counts half-rows from the top.
    pub fn set_pixel(&mut self, x: u16, py: u32, color: Rgb) {
        let Ok(y) = u16::try_from(py / 2) else {
            return;
        };
        let Some(i) = self.idx(x, y) else {
            return;
        };
        let cell = &mut self.cells[i];
        if cell.ch != HALF_BLOCK {
            // Both halves start as the cell's old background.
            let bg = cell.style.bg;
            *cell = CellStyle::new(bg, bg).into_cell(HALF_BLOCK);
        }
        if py % 2 == 0 {
            cell.style.fg = color;
        } else {
            cell.style.bg = color;
        }
    }

    /// Colour of a pixel, if the cell is in pixel mode.
    pub fn pixel(&self, x: u16, py: u32) -> Option<Rgb> {
        let y = u16::try_from(py / 2).ok()?;
        let cell = self.get(x, y)?;
        if cell.ch != HALF_BLOCK {
            return None;
        }
        Some(if py % 2 == 0 { cell.style.fg } else { cell.style.bg })
    }
}

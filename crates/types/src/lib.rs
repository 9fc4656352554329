//! Core types module - shared data structures and constants
//!
//! This module defines the fundamental types used throughout the application.
//! All types are plain data with no behaviour beyond small helpers, making them
//! usable in any context (core logic, input mapping, terminal rendering).
//!
//! # Grid Limits
//!
//! - **Rows / columns**: each in `[2, 20]`
//! - **Pool capacity**: 20 x 20 = 400 tiles, allocated once per session
//! - **Pixels per world unit**: 100 (a 300px wide image spans 3 world units)
//!
//! # Timing Constants
//!
//! Timing values are in milliseconds:
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `TICK_MS` | 16 | Fixed timestep interval (~60 FPS) |
//! | `TILE_MOVE_MS` | 300 | Animated tile move to a grid cell |
//! | `RETURN_MOVE_MS` | 200 | Dropped tile gliding back home |
//! | `SPAWN_BASE_MS` | 500 | Spawn animation tail |
//! | `SPAWN_ROW_DELAY_MS` | 100 | Extra spawn time per grid row |
//! | `SHUFFLE_SETTLE_MS` | 600 | Input lock after the shuffle |
//! | `SWAP_RESOLVE_MS` | 350 | Input lock after a swap |
//! | `WIN_HOLD_MS` | 3000 | Celebration hold before the level completes |
//!
//! # Examples
//!
//! ```
//! use tui_jigsaw_types::{Coordinate, GridConfiguration, PuzzleMode, SourceImage};
//!
//! let config = GridConfiguration::new(3, 4, Some(SourceImage::new(800, 600)), PuzzleMode::ClickAndSwap);
//! assert_eq!(config.tile_count(), 12);
//! assert!(config.fits_pool());
//!
//! let coord = Coordinate::new(2, 1);
//! assert_eq!(coord.index(config.columns), 6);
//!
//! assert_eq!(PuzzleMode::from_str("drag"), Some(PuzzleMode::DragAndDrop));
//! ```

use std::ops::{Add, Mul, Neg, Sub};

use serde::{Deserialize, Serialize};

/// Smallest allowed row/column count.
pub const MIN_GRID_DIMENSION: u8 = 2;

/// Largest allowed row/column count.
pub const MAX_GRID_DIMENSION: u8 = 20;

/// Number of tile slots preallocated by a session (20 x 20).
pub const POOL_CAPACITY: usize = MAX_GRID_DIMENSION as usize * MAX_GRID_DIMENSION as usize;

/// Image pixels per world unit.
pub const PIXELS_PER_UNIT: f32 = 100.0;

/// Fixed timestep interval in milliseconds (16ms ≈ 60 FPS)
pub const TICK_MS: u32 = 16;

/// Duration of an animated move between grid cells.
pub const TILE_MOVE_MS: u32 = 300;

/// Duration of the glide back when a drag is dropped on nothing.
pub const RETURN_MOVE_MS: u32 = 200;

/// Fixed tail of the spawn animation.
pub const SPAWN_BASE_MS: u32 = 500;

/// Spawn animation stagger per grid row.
pub const SPAWN_ROW_DELAY_MS: u32 = 100;

/// Input stays locked this long after the shuffle is applied.
pub const SHUFFLE_SETTLE_MS: u32 = 600;

/// Input stays locked this long after a swap.
pub const SWAP_RESOLVE_MS: u32 = 350;

/// Win celebration punch duration.
pub const WIN_PUNCH_MS: u32 = 500;

/// Hold after the celebration before the level reports completion.
pub const WIN_HOLD_MS: u32 = 3000;

/// Default gap factor between neighbouring tiles.
pub const DEFAULT_SPACING: f32 = 1.05;

/// Default fraction of the board the grid may cover.
pub const DEFAULT_BOARD_MARGIN: f32 = 0.9;

/// Allowed spacing factor range (inclusive).
pub const SPACING_RANGE: (f32, f32) = (1.0, 1.5);

/// Allowed board margin range (inclusive).
pub const BOARD_MARGIN_RANGE: (f32, f32) = (0.8, 1.0);

/// Default drop-target proximity threshold in world units.
pub const DEFAULT_SNAP_THRESHOLD: f32 = 1.0;

/// Draw order of a tile being dragged.
pub const DRAG_DRAW_ORDER: i32 = 100;

/// Draw order of a selected tile in click mode.
pub const SELECTED_DRAW_ORDER: i32 = 10;

/// Emphasis scale of a lifted (dragged) tile.
pub const DRAG_LIFT_SCALE: f32 = 1.1;

/// Duration of the lift scale tween.
pub const LIFT_MS: u32 = 150;

/// Peak extra scale of the selection punch.
pub const SELECT_PUNCH_SCALE: f32 = 0.15;

/// Duration of the selection punch.
pub const SELECT_PUNCH_MS: u32 = 200;

/// Peak extra scale of the win punch.
pub const WIN_PUNCH_SCALE: f32 = 0.2;

/// Time the session waits for the spawn animation of a grid with `rows` rows.
pub fn spawn_duration_ms(rows: u8) -> u32 {
    rows as u32 * SPAWN_ROW_DELAY_MS + SPAWN_BASE_MS
}

/// Time from solving until the level reports completion.
pub fn win_celebration_ms(rows: u8) -> u32 {
    rows as u32 * SPAWN_ROW_DELAY_MS + WIN_PUNCH_MS + WIN_HOLD_MS
}


/// A grid cell: `x` is the column, `y` is the row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Coordinate {
    pub x: u8,
    pub y: u8,
}

impl Coordinate {
    pub const fn new(x: u8, y: u8) -> Self {
        Self { x, y }
    }

    /// Row-major index in a grid with `columns` columns.
    pub fn index(&self, columns: u8) -> usize {
        self.y as usize * columns as usize + self.x as usize
    }

    /// Inverse of [`Coordinate::index`].
    pub fn from_index(index: usize, columns: u8) -> Self {
        let columns = columns.max(1) as usize;
        Self {
            x: (index % columns) as u8,
            y: (index / columns) as u8,
        }
    }
}

/// 2D vector in world or local space.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Vec2 {
    pub x: f32,
    pub y: f32,
}

impl Vec2 {
    pub const ZERO: Vec2 = Vec2 { x: 0.0, y: 0.0 };

    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    pub const fn splat(v: f32) -> Self {
        Self { x: v, y: v }
    }

    pub fn length(self) -> f32 {
        (self.x * self.x + self.y * self.y).sqrt()
    }

    pub fn distance(self, other: Vec2) -> f32 {
        (self - other).length()
    }

    /// Component-wise product.
    pub fn scale(self, other: Vec2) -> Vec2 {
        Vec2::new(self.x * other.x, self.y * other.y)
    }

    pub fn lerp(self, to: Vec2, t: f32) -> Vec2 {
        self + (to - self) * t
    }
}

impl Add for Vec2 {
    type Output = Vec2;

    fn add(self, rhs: Vec2) -> Vec2 {
        Vec2::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for Vec2 {
    type Output = Vec2;

    fn sub(self, rhs: Vec2) -> Vec2 {
        Vec2::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl Mul<f32> for Vec2 {
    type Output = Vec2;

    fn mul(self, rhs: f32) -> Vec2 {
        Vec2::new(self.x * rhs, self.y * rhs)
    }
}

impl Neg for Vec2 {
    type Output = Vec2;

    fn neg(self) -> Vec2 {
        Vec2::new(-self.x, -self.y)
    }
}

/// Axis-aligned box given by centre and size.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    pub center: Vec2,
    pub size: Vec2,
}

impl Rect {
    pub const fn from_center_size(center: Vec2, size: Vec2) -> Self {
        Self { center, size }
    }

    pub fn min(&self) -> Vec2 {
        self.center - self.size * 0.5
    }

    pub fn max(&self) -> Vec2 {
        self.center + self.size * 0.5
    }

    pub fn width(&self) -> f32 {
        self.size.x
    }

    pub fn height(&self) -> f32 {
        self.size.y
    }

    /// Edges count as inside.
    pub fn contains(&self, point: Vec2) -> bool {
        let min = self.min();
        let max = self.max();
        point.x >= min.x && point.x <= max.x && point.y >= min.y && point.y <= max.y
    }
}

/// Procedural picture used as the puzzle image.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ImagePattern {
    #[default]
    Gradient,
    Rings,
    Checker,
    Stripes,
}

impl ImagePattern {
    pub fn as_str(&self) -> &'static str {
        match self {
            ImagePattern::Gradient => "gradient",
            ImagePattern::Rings => "rings",
            ImagePattern::Checker => "checker",
            ImagePattern::Stripes => "stripes",
        }
    }
}

/// Source image description: pixel dimensions plus the pattern to paint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SourceImage {
    pub width: u32,
    pub height: u32,
    #[serde(default)]
    pub pattern: ImagePattern,
}

impl SourceImage {
    pub const fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            pattern: ImagePattern::Gradient,
        }
    }

    pub const fn with_pattern(mut self, pattern: ImagePattern) -> Self {
        self.pattern = pattern;
        self
    }
}

/// Pixel rectangle of the source image shown by one tile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct SpriteRegion {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

/// How the player rearranges tiles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum PuzzleMode {
    /// Drag a tile and drop it onto another to swap them.
    #[default]
    DragAndDrop,
    /// Click one tile, then another, to swap them.
    ClickAndSwap,
}

impl PuzzleMode {
    /// Parse mode from string (case-insensitive)
    ///
    /// # Examples
    ///
    /// ```
    /// use tui_jigsaw_types::PuzzleMode;
    ///
    /// assert_eq!(PuzzleMode::from_str("dragAndDrop"), Some(PuzzleMode::DragAndDrop));
    /// assert_eq!(PuzzleMode::from_str("CLICK"), Some(PuzzleMode::ClickAndSwap));
    /// assert_eq!(PuzzleMode::from_str("slide"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "drag" | "draganddrop" => Some(PuzzleMode::DragAndDrop),
            "click" | "clickandswap" => Some(PuzzleMode::ClickAndSwap),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            PuzzleMode::DragAndDrop => "dragAndDrop",
            PuzzleMode::ClickAndSwap => "clickAndSwap",
        }
    }
}

fn default_spacing() -> f32 {
    DEFAULT_SPACING
}

fn default_board_margin() -> f32 {
    DEFAULT_BOARD_MARGIN
}

/// One puzzle level.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GridConfiguration {
    pub rows: u8,
    pub columns: u8,
    /// `None` models a level whose image is missing; starting it is a no-op.
    #[serde(default)]
    pub image: Option<SourceImage>,
    #[serde(default = "default_spacing")]
    pub spacing: f32,
    #[serde(default = "default_board_margin")]
    pub board_margin: f32,
    #[serde(default)]
    pub mode: PuzzleMode,
}

impl GridConfiguration {
    pub fn new(rows: u8, columns: u8, image: Option<SourceImage>, mode: PuzzleMode) -> Self {
        Self {
            rows,
            columns,
            image,
            spacing: DEFAULT_SPACING,
            board_margin: DEFAULT_BOARD_MARGIN,
            mode,
        }
    }

    pub fn tile_count(&self) -> usize {
        self.rows as usize * self.columns as usize
    }

    pub fn fits_pool(&self) -> bool {
        self.tile_count() <= POOL_CAPACITY
    }
}

/// Lifecycle phase of a puzzle session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SessionPhase {
    /// Nothing started yet.
    #[default]
    Idle,
    /// Tiles placed in order, spawn animation running.
    SettingUp,
    /// Shuffled arrangement applied, waiting for it to settle.
    Shuffling,
    /// Accepting swaps.
    Ready,
    /// A swap is settling; input locked.
    Resolving,
    /// Solved; input locked until the next start.
    Complete,
}

impl SessionPhase {
    pub fn as_str(&self) -> &'static str {
        match self {
            SessionPhase::Idle => "idle",
            SessionPhase::SettingUp => "settingUp",
            SessionPhase::Shuffling => "shuffling",
            SessionPhase::Ready => "ready",
            SessionPhase::Resolving => "resolving",
            SessionPhase::Complete => "complete",
        }
    }
}

/// Raw pointer input, already converted to world space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PointerEvent {
    Pressed(Vec2),
    Moved(Vec2),
    Released(Vec2),
}

impl PointerEvent {
    pub fn position(&self) -> Vec2 {
        match *self {
            PointerEvent::Pressed(p) | PointerEvent::Moved(p) | PointerEvent::Released(p) => p,
        }
    }
}

/// Application-level commands outside the puzzle itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppAction {
    /// Start the current level again.
    RestartLevel,
    /// Advance the sequencer and start the next level.
    NextLevel,
    Quit,
}

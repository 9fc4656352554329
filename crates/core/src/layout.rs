//! Grid layout calculator.
//!
//! Maps image size, grid dimensions, spacing and board bounds to per-cell
//! local positions plus a uniform scale that fits the grid on the board.
//!
//! Local space is centred on the grid; world space is where pointer events
//! and the board live. `world = board_center + local * scale`.

use crate::types::{Coordinate, GridConfiguration, Rect, SourceImage, Vec2, PIXELS_PER_UNIT};

/// Derived layout for one puzzle setup. Pure data; recomputed per setup.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LayoutMetrics {
    /// Local size of one tile (no spacing).
    pub piece_size: Vec2,
    /// Distance between neighbouring cell centres.
    pub cell_step: Vec2,
    /// Extent of the whole grid, `cell_step * (columns, rows)`.
    pub total_size: Vec2,
    /// Local position of cell (0, 0).
    pub origin: Vec2,
    /// Uniform local-to-world scale.
    pub scale: f32,
    /// World position of the local origin.
    pub board_center: Vec2,
}

impl LayoutMetrics {
    /// Compute the layout.
    ///
    /// Precondition: `rows >= 1` and `columns >= 1`.
    ///
    /// # Examples
    ///
    /// ```
    /// use tui_jigsaw_core::layout::LayoutMetrics;
    /// use tui_jigsaw_core::types::{Coordinate, SourceImage, Vec2};
    ///
    /// let m = LayoutMetrics::compute(&SourceImage::new(300, 300), 3, 3, 1.0, 1.0, None);
    /// assert_eq!(m.cell_step, Vec2::new(1.0, 1.0));
    /// assert_eq!(m.local_position(Coordinate::new(1, 1)), Vec2::ZERO);
    /// ```
    pub fn compute(
        image: &SourceImage,
        rows: u8,
        columns: u8,
        spacing: f32,
        margin: f32,
        board: Option<Rect>,
    ) -> Self {
        let piece_size = Vec2::new(
            image.width as f32 / columns as f32 / PIXELS_PER_UNIT,
            image.height as f32 / rows as f32 / PIXELS_PER_UNIT,
        );
        let cell_step = piece_size * spacing;
        let total_size = Vec2::new(cell_step.x * columns as f32, cell_step.y * rows as f32);
        let origin = -(total_size * 0.5) + cell_step * 0.5;

        let (scale, board_center) = match board {
            Some(board) => {
                let ratio_x = board.width() / total_size.x;
                let ratio_y = board.height() / total_size.y;
                let scale = ratio_x.min(ratio_y) * margin;
                // Degenerate image or board: keep the grid at unit scale.
                let scale = if scale.is_finite() && scale > 0.0 { scale } else { 1.0 };
                (scale, board.center)
            }
            None => (1.0, Vec2::ZERO),
        };

        Self {
            piece_size,
            cell_step,
            total_size,
            origin,
            scale,
            board_center,
        }
    }

    /// Layout for a configuration, or `None` when it has no image.
    pub fn from_config(config: &GridConfiguration, board: Option<Rect>) -> Option<Self> {
        let image = config.image?;
        Some(Self::compute(
            &image,
            config.rows,
            config.columns,
            config.spacing,
            config.board_margin,
            board,
        ))
    }

    /// Local position of a cell centre.
    pub fn local_position(&self, coord: Coordinate) -> Vec2 {
        self.origin + Vec2::new(coord.x as f32 * self.cell_step.x, coord.y as f32 * self.cell_step.y)
    }

    pub fn to_world(&self, local: Vec2) -> Vec2 {
        self.board_center + local * self.scale
    }

    pub fn to_local(&self, world: Vec2) -> Vec2 {
        (world - self.board_center) * (1.0 / self.scale)
    }

    pub fn world_position(&self, coord: Coordinate) -> Vec2 {
        self.to_world(self.local_position(coord))
    }

    /// World size of one tile at rest.
    pub fn tile_world_size(&self) -> Vec2 {
        self.piece_size * self.scale
    }

    /// World rectangle covered by the grid.
    pub fn grid_world_rect(&self) -> Rect {
        Rect::from_center_size(self.board_center, self.total_size * self.scale)
    }
}

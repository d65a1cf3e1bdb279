// camera.rs - Pan/zoom mapping between screen pixels and grid cells

use egui::{Pos2, Rect, Vec2};

const ZOOM_STEP: f32 = 0.05;     // Fraction of the cell size per scroll notch
const MIN_CELL_PX: f32 = 1.0;

/// Screen placement of a `cols` x `rows` board inside a viewport.
///
/// The cell size is fitted to the viewport the first time it is seen and
/// only changes through [`zoom`](Camera::zoom) after that.
#[derive(Debug, Clone, Default)]
pub struct Camera {
    cell_px: Option<f32>,
    offset: Vec2,
}

impl Camera {
    pub fn cell_px(&self) -> Option<f32> {
        self.cell_px
    }

    /// Fits the cell size on first use so the whole board is visible.
    pub fn fit(&mut self, viewport: Rect, cols: usize, rows: usize) -> f32 {
        *self.cell_px.get_or_insert_with(|| {
            let across = viewport.width() / cols.max(1) as f32;
            let down = viewport.height() / rows.max(1) as f32;
            across.min(down).floor().max(MIN_CELL_PX)
        })
    }

    /// Forgets the fitted size, for when the board changes shape.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    pub fn pan(&mut self, delta: Vec2) {
        self.offset += delta;
    }

    /// Positive `notches` zoom in.
    pub fn zoom(&mut self, notches: f32) {
        if let Some(px) = self.cell_px.as_mut() {
            *px = (*px * (1.0 + ZOOM_STEP).powf(notches)).max(MIN_CELL_PX);
        }
    }

    /// Top-left pixel of cell `(0, 0)`: the board is centred, then panned.
    pub fn origin(&self, viewport: Rect, cols: usize, rows: usize) -> Pos2 {
        let px = self.cell_px.unwrap_or(MIN_CELL_PX);
        let board = Vec2::new(px * cols as f32, px * rows as f32);
        let centre = ((viewport.size() - board) / 2.0).floor();
        viewport.min + centre + self.offset
    }

    /// Cell under a screen position. May be off the board.
    pub fn cell_at(&self, pos: Pos2, viewport: Rect, cols: usize, rows: usize) -> (i32, i32) {
        let px = self.cell_px.unwrap_or(MIN_CELL_PX);
        let local = pos - self.origin(viewport, cols, rows);
        ((local.x / px).floor() as i32, (local.y / px).floor() as i32)
    }

    pub fn cell_rect(&self, x: usize, y: usize, viewport: Rect, cols: usize, rows: usize) -> Rect {
        let px = self.cell_px.unwrap_or(MIN_CELL_PX);
        let min = self.origin(viewport, cols, rows) + Vec2::new(x as f32 * px, y as f32 * px);
        Rect::from_min_size(min, Vec2::splat(px))
    }
}

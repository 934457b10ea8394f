/// Lazy image loading
///
/// Grid cells start with a placeholder and are "observed". Once an observed
/// cell intersects the viewport it is reported exactly once and dropped from
/// observation; the caller then swaps in the real image.
use std::collections::BTreeSet;

/// Answers whether a grid cell currently intersects the viewport
pub trait Visibility {
    fn is_visible(&self, cell: usize) -> bool;
}

/// Viewport over a grid of fixed-height rows
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridViewport {
    pub columns: usize,
    pub cell_height: f32,
    pub spacing: f32,
    /// Space above the first row inside the scrollable
    pub padding: f32,
    /// Scroll offset from the top of the grid content
    pub offset_y: f32,
    /// Visible height of the scrollable
    pub height: f32,
}

impl GridViewport {
    /// A viewport scrolled to the top
    pub fn new(columns: usize, cell_height: f32, spacing: f32, padding: f32, height: f32) -> Self {
        Self {
            columns: columns.max(1),
            cell_height,
            spacing,
            padding,
            offset_y: 0.0,
            height,
        }
    }

    pub fn scrolled(self, offset_y: f32, height: f32) -> Self {
        Self {
            offset_y: offset_y.max(0.0),
            height,
            ..self
        }
    }

    /// Vertical extent of the row holding `cell`
    fn row_bounds(&self, cell: usize) -> (f32, f32) {
        let row = (cell / self.columns) as f32;
        let top = self.padding + row * (self.cell_height + self.spacing);
        (top, top + self.cell_height)
    }
}

impl Visibility for GridViewport {
    fn is_visible(&self, cell: usize) -> bool {
        let (top, bottom) = self.row_bounds(cell);
        bottom > self.offset_y && top < self.offset_y + self.height
    }
}

/// Fire-once observer over grid cells
#[derive(Debug, Default, Clone)]
pub struct LazyLoader {
    observed: BTreeSet<usize>,
}

impl LazyLoader {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn observe_all(&mut self, cells: impl IntoIterator<Item = usize>) {
        self.observed.extend(cells);
    }

    pub fn pending(&self) -> usize {
        self.observed.len()
    }

    /// Observed cells that are visible now. They are unobserved before
    /// returning, so each cell is reported at most once.
    pub fn take_visible(&mut self, visibility: &impl Visibility) -> Vec<usize> {
        let visible: Vec<usize> = self
            .observed
            .iter()
            .copied()
            .filter(|cell| visibility.is_visible(*cell))
            .collect();

        for cell in &visible {
            self.observed.remove(cell);
        }

        visible
    }
}

/// Incremental reveal of an in-memory image list
///
/// Filtering and slicing both happen client side over the full list;
/// there is no server-side pagination.
use std::ops::Range;

use crate::manifest::ImageRecord;

/// Number of images revealed per "load more"
pub const PAGE_SIZE: usize = 20;

/// The list being rendered and how much of it is on screen
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RenderState {
    items: Vec<ImageRecord>,
    page_index: usize,
    page_size: usize,
}

impl RenderState {
    /// Build the state and reveal the first page right away
    pub fn first_page(items: Vec<ImageRecord>) -> Self {
        Self::first_page_with_size(items, PAGE_SIZE)
    }

    pub fn first_page_with_size(items: Vec<ImageRecord>, page_size: usize) -> Self {
        let mut state = Self {
            items,
            page_index: 0,
            page_size: page_size.max(1),
        };
        state.load_more();
        state
    }

    /// Reveal the next page. Returns the indices that became visible
    /// (empty once everything is rendered).
    pub fn load_more(&mut self) -> Range<usize> {
        let start = self.rendered_count();
        if start < self.items.len() {
            self.page_index += 1;
        }
        start..self.rendered_count()
    }

    pub fn rendered_count(&self) -> usize {
        (self.page_index * self.page_size).min(self.items.len())
    }

    pub fn rendered(&self) -> &[ImageRecord] {
        &self.items[..self.rendered_count()]
    }

    pub fn total(&self) -> usize {
        self.items.len()
    }

    pub fn get(&self, index: usize) -> Option<&ImageRecord> {
        self.rendered().get(index)
    }

    /// The load-more control is shown only while something is left
    pub fn show_load_more(&self) -> bool {
        self.rendered_count() < self.total()
    }
}

//! Pagination state.

use std::num::NonZeroUsize;

/// Default rows per page.
pub const DEFAULT_PAGE_SIZE: NonZeroUsize = match NonZeroUsize::new(25) {
    Some(size) => size,
    None => unreachable!(),
};

/// Page size and 1-based page index.
///
/// The index is kept within `[1, total_pages]`, where `total_pages` is
/// never less than 1, even for an empty result.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pager {
    size: NonZeroUsize,
    index: usize,
}

impl Default for Pager {
    fn default() -> Self {
        Self::new(DEFAULT_PAGE_SIZE)
    }
}

impl Pager {
    pub fn new(size: NonZeroUsize) -> Self {
        Self { size, index: 1 }
    }

    pub fn size(&self) -> usize {
        self.size.get()
    }

    pub fn index(&self) -> usize {
        self.index
    }

    /// `max(1, ceil(total / size))`.
    pub fn total_pages(&self, total: usize) -> usize {
        total.div_ceil(self.size.get()).max(1)
    }

    /// Pull the index back into range after `total` changed.
    pub fn clamp(&mut self, total: usize) {
        self.index = self.index.clamp(1, self.total_pages(total));
    }

    /// Jump to a page; out-of-range requests clamp.
    pub fn go_to(&mut self, index: usize, total: usize) {
        self.index = index;
        self.clamp(total);
    }

    pub fn next(&mut self, total: usize) {
        self.go_to(self.index.saturating_add(1), total);
    }

    pub fn previous(&mut self, total: usize) {
        self.go_to(self.index.saturating_sub(1), total);
    }

    pub fn first(&mut self) {
        self.index = 1;
    }

    /// Change the page size and return to the first page.
    pub fn set_size(&mut self, size: NonZeroUsize) {
        self.size = size;
        self.index = 1;
    }

    /// Positions `start..end` of the current page within `total` items.
    pub fn range(&self, total: usize) -> std::ops::Range<usize> {
        let start = (self.index - 1).saturating_mul(self.size.get()).min(total);
        let end = start.saturating_add(self.size.get()).min(total);
        start..end
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pager(size: usize) -> Pager {
        Pager::new(NonZeroUsize::new(size).unwrap())
    }

    #[test]
    fn test_total_pages() {
        let p = pager(25);
        assert_eq!(p.total_pages(0), 1);
        assert_eq!(p.total_pages(25), 1);
        assert_eq!(p.total_pages(26), 2);
        assert_eq!(p.total_pages(100), 4);
    }

    #[test]
    fn test_go_to_clamps() {
        let mut p = pager(10);
        p.go_to(99, 35);
        assert_eq!(p.index(), 4);
        assert_eq!(p.range(35), 30..35);
        p.go_to(0, 35);
        assert_eq!(p.index(), 1);
        assert_eq!(p.range(35), 0..10);
    }

    #[test]
    fn test_next_and_previous_stay_in_range() {
        let mut p = pager(10);
        p.previous(15);
        assert_eq!(p.index(), 1);
        p.next(15);
        p.next(15);
        assert_eq!(p.index(), 2);
    }

    #[test]
    fn test_set_size_resets_to_first_page() {
        let mut p = pager(10);
        p.go_to(3, 100);
        p.set_size(NonZeroUsize::new(50).unwrap());
        assert_eq!(p.index(), 1);
        assert_eq!(p.size(), 50);
    }

    #[test]
    fn test_shrinking_total_clamps() {
        let mut p = pager(10);
        p.go_to(5, 100);
        p.clamp(12);
        assert_eq!(p.index(), 2);
        assert_eq!(p.range(0), 0..0);
    }
}

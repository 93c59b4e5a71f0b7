//! Page arithmetic and the page-number window.
//!
//! The window shows at most three contiguous page numbers around the
//! current page, plus jump-to-first and jump-to-last affordances (each
//! followed or preceded by an ellipsis) when the edges are out of reach.

/// Number of pages needed for `count` items; never less than one.
pub fn total_pages(count: usize, page_size: usize) -> usize {
    count.div_ceil(page_size.max(1)).max(1)
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageWindow {
    pub current: usize,
    pub total: usize,
    /// Contiguous page numbers to render, always containing `current`.
    pub pages: Vec<usize>,
    /// Render "1 …" before the window.
    pub jump_first: bool,
    /// Render "… N" after the window.
    pub jump_last: bool,
    pub has_prev: bool,
    pub has_next: bool,
}

impl PageWindow {
    /// Compute the window for `current` out of `total` pages. Out-of-range
    /// inputs are clamped first.
    pub fn new(current: usize, total: usize) -> Self {
        let total = total.max(1);
        let current = current.clamp(1, total);
        let start = current
            .saturating_sub(1)
            .clamp(1, total.saturating_sub(2).max(1));
        let pages = (start..start + 3).filter(|p| *p <= total).collect();

        Self {
            current,
            total,
            pages,
            jump_first: current > 3,
            jump_last: current + 2 < total,
            has_prev: current > 1,
            has_next: current < total,
        }
    }

    /// Every page number the window lets the user jump to directly.
    pub fn reachable(&self) -> Vec<usize> {
        let mut pages = Vec::with_capacity(self.pages.len() + 2);
        if self.jump_first {
            pages.push(1);
        }
        pages.extend(&self.pages);
        if self.jump_last {
            pages.push(self.total);
        }
        pages
    }
}

/// 1-based inclusive range of the visible slice plus the filtered total,
/// as in "Showing 6 to 10 of 12 results". All zero when nothing matches.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Showing {
    pub first: usize,
    pub last: usize,
    pub total: usize,
}

impl Showing {
    pub fn new(current: usize, page_size: usize, total: usize) -> Self {
        if total == 0 {
            return Self {
                first: 0,
                last: 0,
                total: 0,
            };
        }
        let page_size = page_size.max(1);
        let first = (current.max(1) - 1) * page_size + 1;
        Self {
            first: first.min(total),
            last: (current.max(1) * page_size).min(total),
            total,
        }
    }
}

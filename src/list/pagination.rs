//! Pagination math: visible item range, page-number window and navigation

use std::fmt;

/// Page sizes a list can be shown with
pub const PAGE_SIZES: [u32; 4] = [10, 25, 50, 100];

/// Page counts up to this size show every page number
const MAX_FULL_WINDOW: u32 = 5;

/// One entry of the page-number window
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageItem {
    Page(u32),
    Ellipsis,
}

impl fmt::Display for PageItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PageItem::Page(page) => write!(f, "{}", page),
            PageItem::Ellipsis => write!(f, "..."),
        }
    }
}

/// Whether a page size is one of the supported sizes
pub fn is_valid_page_size(size: u32) -> bool {
    PAGE_SIZES.contains(&size)
}

/// The supported page size following `size`, wrapping around
pub fn next_page_size(size: u32) -> u32 {
    let idx = PAGE_SIZES.iter().position(|s| *s == size).unwrap_or(0);
    PAGE_SIZES[(idx + 1) % PAGE_SIZES.len()]
}

/// Number of pages needed for `total_items`
pub fn total_pages(total_items: u64, items_per_page: u32) -> u32 {
    if items_per_page == 0 {
        return 0;
    }
    let pages = total_items.div_ceil(u64::from(items_per_page));
    u32::try_from(pages).unwrap_or(u32::MAX)
}

/// 1-indexed inclusive range of items shown on `current_page`, `None` when there are no items
pub fn item_range(current_page: u32, items_per_page: u32, total_items: u64) -> Option<(u64, u64)> {
    if total_items == 0 {
        return None;
    }
    let page = u64::from(current_page.max(1));
    let per_page = u64::from(items_per_page);
    let start = (page - 1) * per_page + 1;
    let end = std::cmp::min(page * per_page, total_items);
    Some((start, end))
}

/// Page-number buttons to show for `current_page` out of `total_pages`
pub fn page_window(current_page: u32, total_pages: u32) -> Vec<PageItem> {
    if total_pages <= MAX_FULL_WINDOW {
        return (1..=total_pages).map(PageItem::Page).collect();
    }

    let mut items = Vec::with_capacity(7);
    if current_page <= 3 {
        items.extend((1..=4).map(PageItem::Page));
        items.push(PageItem::Ellipsis);
        items.push(PageItem::Page(total_pages));
    } else if current_page >= total_pages - 2 {
        items.push(PageItem::Page(1));
        items.push(PageItem::Ellipsis);
        items.extend((total_pages - 3..=total_pages).map(PageItem::Page));
    } else {
        items.push(PageItem::Page(1));
        items.push(PageItem::Ellipsis);
        items.extend((current_page - 1..=current_page + 1).map(PageItem::Page));
        items.push(PageItem::Ellipsis);
        items.push(PageItem::Page(total_pages));
    }
    items
}

/// Events emitted by the pagination control
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaginationEvent {
    PageChange(u32),
    ItemsPerPageChange(u32),
}

/// Snapshot of the pagination control for one render
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    pub current_page: u32,
    pub total_pages: u32,
    pub total_items: u64,
    pub items_per_page: u32,
}

impl Pagination {
    pub fn new(current_page: u32, items_per_page: u32, total_items: u64) -> Self {
        Self {
            current_page,
            total_pages: total_pages(total_items, items_per_page),
            total_items,
            items_per_page,
        }
    }

    pub fn window(&self) -> Vec<PageItem> {
        page_window(self.current_page, self.total_pages)
    }

    pub fn range(&self) -> Option<(u64, u64)> {
        item_range(self.current_page, self.items_per_page, self.total_items)
    }

    /// Text shown next to the page buttons, e.g. "Showing 41 to 47 of 47"
    pub fn range_label(&self) -> String {
        match self.range() {
            Some((start, end)) => format!("Showing {} to {} of {}", start, end, self.total_items),
            None => "No results".to_string(),
        }
    }

    pub fn can_go_previous(&self) -> bool {
        self.current_page > 1
    }

    pub fn can_go_next(&self) -> bool {
        self.current_page < self.total_pages
    }

    pub fn previous(&self) -> Option<PaginationEvent> {
        self.can_go_previous()
            .then(|| PaginationEvent::PageChange(self.current_page - 1))
    }

    pub fn next(&self) -> Option<PaginationEvent> {
        self.can_go_next()
            .then(|| PaginationEvent::PageChange(self.current_page + 1))
    }

    /// Select a page number; out-of-range and current pages emit nothing
    pub fn select_page(&self, page: u32) -> Option<PaginationEvent> {
        (page >= 1 && page <= self.total_pages && page != self.current_page)
            .then_some(PaginationEvent::PageChange(page))
    }

    pub fn last(&self) -> Option<PaginationEvent> {
        self.select_page(self.total_pages)
    }

    pub fn cycle_items_per_page(&self) -> PaginationEvent {
        PaginationEvent::ItemsPerPageChange(next_page_size(self.items_per_page))
    }
}

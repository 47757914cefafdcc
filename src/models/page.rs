//! One page of an offset/limit listing.

/// Items from a single page fetch.
#[derive(Debug, Clone)]
pub struct Page<T> {
    pub items: Vec<T>,
    /// True when the page came back full. The API does not report a total,
    /// so a full last page costs one extra (empty) fetch.
    pub has_more: bool,
}

impl<T> Page<T> {
    pub fn new(items: Vec<T>, page_size: u32) -> Self {
        let has_more = items.len() == page_size as usize;
        Self { items, has_more }
    }
}

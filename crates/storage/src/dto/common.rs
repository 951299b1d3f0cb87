pub const DEFAULT_PER_PAGE: u32 = 25;
pub const MAX_PER_PAGE: u32 = 100;

/// Window of an ordered result set
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    pub offset: u32,
    pub limit: u32,
}

impl PageRequest {
    pub fn new(offset: u32, limit: u32) -> Self {
        Self { offset, limit }
    }

    /// Request for a 1-based page number.
    pub fn for_page(page: u32, per_page: u32) -> Self {
        Self {
            offset: page.saturating_sub(1).saturating_mul(per_page),
            limit: per_page,
        }
    }

    pub fn next(&self) -> Self {
        Self {
            offset: self.offset.saturating_add(self.limit),
            limit: self.limit,
        }
    }

    pub fn previous(&self) -> Option<Self> {
        (self.offset > 0).then(|| Self {
            offset: self.offset.saturating_sub(self.limit),
            limit: self.limit,
        })
    }
}

#[derive(Debug, Clone)]
pub struct Page<T> {
    pub items: Vec<T>,
    /// Number of records matching the query, across all pages
    pub total: i64,
    pub request: PageRequest,
}

impl<T> Page<T> {
    pub fn new(items: Vec<T>, total: i64, request: PageRequest) -> Self {
        Self {
            items,
            total,
            request,
        }
    }

    pub fn empty(request: PageRequest) -> Self {
        Self::new(Vec::new(), 0, request)
    }

    pub fn has_next(&self) -> bool {
        i64::from(self.request.offset) + i64::from(self.request.limit) < self.total
    }

    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
        Page {
            items: self.items.into_iter().map(f).collect(),
            total: self.total,
            request: self.request,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_for_page_offsets() {
        assert_eq!(PageRequest::for_page(1, 25), PageRequest::new(0, 25));
        assert_eq!(PageRequest::for_page(3, 10), PageRequest::new(20, 10));
    }

    #[test]
    fn test_previous_clamps_at_zero() {
        assert_eq!(PageRequest::new(0, 10).previous(), None);
        assert_eq!(PageRequest::new(5, 10).previous(), Some(PageRequest::new(0, 10)));
        assert_eq!(PageRequest::new(20, 10).previous(), Some(PageRequest::new(10, 10)));
    }

    #[test]
    fn test_has_next_uses_total() {
        let request = PageRequest::new(0, 2);
        assert!(Page::new(vec![1, 2], 3, request).has_next());
        assert!(!Page::new(vec![1, 2], 2, request).has_next());
        assert!(!Page::<i32>::empty(PageRequest::new(40, 2)).has_next());
    }
}

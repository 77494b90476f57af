use serde::{Deserialize, Serialize};

use crate::{MediaError, MediaResult};

/// One slice of an ordered sequence.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Page<T> {
    #[serde(rename = "data")]
    pub items: Vec<T>,
    pub total: usize,
    pub per_page: usize,
    pub current_page: usize,
    pub last_page: usize,
}

/// Slices sequences into fixed-size, 1-based pages.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Paginator {
    per_page: usize,
}

impl Paginator {
    /// `per_page` of zero is a caller error, not a default.
    pub fn new(per_page: usize) -> MediaResult<Self> {
        if per_page == 0 {
            return Err(MediaError::InvalidPerPage(per_page));
        }
        Ok(Self { per_page })
    }

    pub fn per_page(&self) -> usize {
        self.per_page
    }

    /// Number of pages for `total` items; an empty sequence still has page 1.
    pub fn last_page(&self, total: usize) -> usize {
        total.div_ceil(self.per_page).max(1)
    }

    /// Items at offsets `(page-1)*per_page ..= page*per_page-1`, clamped.
    /// Pages past the end are empty.
    pub fn page<T: Clone>(&self, items: &[T], page: usize) -> MediaResult<Page<T>> {
        if page == 0 {
            return Err(MediaError::InvalidPage(page));
        }

        let total = items.len();
        let start = (page - 1).saturating_mul(self.per_page).min(total);
        let end = start.saturating_add(self.per_page).min(total);

        Ok(Page {
            items: items[start..end].to_vec(),
            total,
            per_page: self.per_page,
            current_page: page,
            last_page: self.last_page(total),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn fifth_page_of_120_by_25() {
        let items: Vec<usize> = (0..120).collect();
        let page = Paginator::new(25).unwrap().page(&items, 5).unwrap();

        assert_eq!(page.items, (100..120).collect::<Vec<_>>());
        assert_eq!(page.total, 120);
        assert_eq!(page.last_page, 5);
        assert_eq!(page.current_page, 5);
    }

    #[test]
    fn beyond_the_end_is_empty_not_an_error() {
        let items = vec!["a", "b", "c"];
        let page = Paginator::new(2).unwrap().page(&items, 9).unwrap();
        assert!(page.items.is_empty());
        assert_eq!(page.total, 3);

        let huge = Paginator::new(usize::MAX).unwrap().page(&items, usize::MAX).unwrap();
        assert!(huge.items.is_empty());
    }

    #[test]
    fn zero_is_rejected() {
        assert!(matches!(Paginator::new(0), Err(MediaError::InvalidPerPage(0))));
        let paginator = Paginator::new(10).unwrap();
        assert!(matches!(paginator.page(&[1, 2], 0), Err(MediaError::InvalidPage(0))));
    }

    #[test]
    fn serializes_items_as_data() {
        let page = Paginator::new(2).unwrap().page(&["x", "y", "z"], 1).unwrap();
        let json = serde_json::to_value(&page).unwrap();
        assert_eq!(json["data"], serde_json::json!(["x", "y"]));
        assert_eq!(json["last_page"], 2);
        assert!(json.get("items").is_none());
    }

    proptest! {
        #[test]
        fn pages_concatenate_to_the_whole(len in 0usize..300, per_page in 1usize..40) {
            let items: Vec<usize> = (0..len).collect();
            let paginator = Paginator::new(per_page).unwrap();

            let mut seen = Vec::new();
            for n in 1..=paginator.last_page(len) {
                let page = paginator.page(&items, n).unwrap();
                prop_assert!(page.items.len() <= per_page);
                prop_assert_eq!(page.total, len);
                seen.extend(page.items);
            }
            prop_assert_eq!(seen, items);
        }
    }
}

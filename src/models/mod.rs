pub mod image_items;
pub mod matches;
pub mod patch;
pub mod portfolio;
pub mod price_items;
pub mod quotations;
pub mod reviews;
pub mod users;

pub use patch::Patch;

use serde::Deserialize;

#[derive(Debug, Clone, Default, Deserialize)]
pub struct PaginationQuery {
    pub page: Option<u64>,
    pub limit: Option<u64>,
}

impl PaginationQuery {
    pub fn page(&self) -> u64 {
        self.page.unwrap_or(1).max(1)
    }

    pub fn limit(&self) -> u64 {
        self.limit.unwrap_or(20).clamp(1, 100)
    }

    /// Rows to skip for the requested page.
    pub fn offset(&self) -> u64 {
        (self.page() - 1) * self.limit()
    }
}

#[cfg(test)]
mod tests {
    use super::PaginationQuery;

    #[test]
    fn pagination_defaults_and_bounds() {
        let q = PaginationQuery::default();
        assert_eq!((q.page(), q.limit(), q.offset()), (1, 20, 0));

        let q = PaginationQuery {
            page: Some(0),
            limit: Some(500),
        };
        assert_eq!((q.page(), q.limit()), (1, 100));

        let q = PaginationQuery {
            page: Some(3),
            limit: Some(10),
        };
        assert_eq!(q.offset(), 20);
    }
}

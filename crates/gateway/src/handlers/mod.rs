//! Request handlers

pub mod admin;
pub mod auth;
pub mod carts;
pub mod deposits;
pub mod documents;
pub mod examinants;
pub mod folders;
pub mod health;
pub mod lectures;
pub mod print;

use serde::Deserialize;

/// Pagination query parameters shared by the list endpoints
#[derive(Debug, Deserialize)]
pub struct PageQuery {
    #[serde(default)]
    pub page: u64,

    #[serde(default = "default_per_page")]
    pub per_page: u64,
}

fn default_per_page() -> u64 {
    50
}

impl PageQuery {
    /// Page and a per-page size clamped to a sane range
    pub fn clamped(&self) -> (u64, u64) {
        (self.page, self.per_page.clamp(1, 200))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_query_defaults() {
        let query: PageQuery = serde_json::from_str("{}").unwrap();
        assert_eq!(query.clamped(), (0, 50));
    }

    #[test]
    fn test_per_page_is_clamped() {
        let query = PageQuery { page: 2, per_page: 100_000 };
        assert_eq!(query.clamped(), (2, 200));

        let query = PageQuery { page: 0, per_page: 0 };
        assert_eq!(query.clamped(), (0, 1));
    }
}

//! Paginated collection envelope returned by every list endpoint.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    pub content: Vec<T>,
    pub total_elements: u64,
    pub total_pages: u32,
    /// Zero-based page index.
    #[serde(default)]
    pub number: u32,
    #[serde(default)]
    pub size: u32,
}

impl<T> Default for Page<T> {
    fn default() -> Self {
        Self {
            content: Vec::new(),
            total_elements: 0,
            total_pages: 0,
            number: 0,
            size: 0,
        }
    }
}

impl<T> Page<T> {
    pub fn is_empty(&self) -> bool {
        self.content.is_empty()
    }

    pub fn has_next(&self) -> bool {
        self.number + 1 < self.total_pages
    }

    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
        Page {
            content: self.content.into_iter().map(f).collect(),
            total_elements: self.total_elements,
            total_pages: self.total_pages,
            number: self.number,
            size: self.size,
        }
    }
}

/// Common query parameters understood by list endpoints.
///
/// `sort` uses the backend's `field,asc|desc` form.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PageQuery {
    pub page: u32,
    pub size: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sort: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub search: Option<String>,
}

impl Default for PageQuery {
    fn default() -> Self {
        Self {
            page: 0,
            size: 20,
            sort: None,
            search: None,
        }
    }
}

impl PageQuery {
    pub fn new(page: u32, size: u32) -> Self {
        Self {
            page,
            size,
            ..Self::default()
        }
    }

    pub fn with_sort(mut self, field: &str, ascending: bool) -> Self {
        let direction = if ascending { "asc" } else { "desc" };
        self.sort = Some(format!("{},{}", field, direction));
        self
    }

    /// Blank search text is dropped so the backend sees no filter at all.
    pub fn with_search(mut self, search: &str) -> Self {
        let trimmed = search.trim();
        self.search = if trimmed.is_empty() {
            None
        } else {
            Some(trimmed.to_string())
        };
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserializes_backend_envelope() {
        let json = r#"{
            "content": [1, 2, 3],
            "totalElements": 23,
            "totalPages": 3,
            "number": 1,
            "size": 10
        }"#;
        let page: Page<u32> = serde_json::from_str(json).unwrap();
        assert_eq!(page.content, vec![1, 2, 3]);
        assert_eq!(page.total_elements, 23);
        assert!(page.has_next());
    }

    #[test]
    fn last_page_has_no_next() {
        let page = Page::<u8> {
            content: vec![],
            total_elements: 20,
            total_pages: 2,
            number: 1,
            size: 10,
        };
        assert!(!page.has_next());
    }

    #[test]
    fn sort_and_search_builders() {
        let query = PageQuery::new(2, 50).with_sort("name", false).with_search("  bolt ");
        assert_eq!(query.sort.as_deref(), Some("name,desc"));
        assert_eq!(query.search.as_deref(), Some("bolt"));

        let query = PageQuery::default().with_search("   ");
        assert_eq!(query.search, None);
    }
}

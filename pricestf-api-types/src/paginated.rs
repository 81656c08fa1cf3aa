use serde::{Deserialize, Serialize};

/// Page envelope returned by the history endpoint.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Paginated<T> {
    pub items: Vec<T>,
    pub meta: PageMeta,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageMeta {
    pub total_items: u32,
    pub item_count: u32,
    pub items_per_page: u32,
    pub total_pages: u32,
    pub current_page: u32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_page_meta() {
        let json = r#"{
            "items": [1, 2, 3],
            "meta": {
                "totalItems": 53,
                "itemCount": 3,
                "itemsPerPage": 25,
                "totalPages": 3,
                "currentPage": 1
            }
        }"#;
        let page: Paginated<i32> = serde_json::from_str(json).unwrap();
        assert_eq!(page.items, vec![1, 2, 3]);
        assert_eq!(page.meta.total_pages, 3);
        assert_eq!(page.meta.current_page, 1);
    }
}

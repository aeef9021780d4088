//! Paged list DTOs

use serde::{Deserialize, Serialize};

/// A page of items with paging details
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DataList<T> {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nodes: Option<Vec<T>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_count: Option<u64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page_info: Option<PageInfo>,
}

impl<T> Default for DataList<T> {
    fn default() -> Self {
        Self {
            nodes: None,
            total_count: None,
            page_info: None,
        }
    }
}

/// Position of a page within the full result set
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageInfo {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub has_previous_page: Option<bool>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub has_next_page: Option<bool>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page: Option<u64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page_size: Option<u64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_pages: Option<u64>,
}

impl PageInfo {
    /// Derive paging details for 1-based `page` of `page_size` items out of `total`
    pub fn for_page(page: u64, page_size: u64, total: u64) -> Self {
        let total_pages = if page_size == 0 {
            0
        } else {
            total.div_ceil(page_size)
        };
        Self {
            has_previous_page: Some(page > 1),
            has_next_page: Some(page < total_pages),
            page: Some(page),
            page_size: Some(page_size),
            total_pages: Some(total_pages),
        }
    }
}

/// Page of items serialized under a caller-chosen property name.
///
/// Serializes as `{"currentPage": .., "totalPage": .., "<property>": [..]}`.
#[derive(Debug, Clone, PartialEq)]
pub struct ListResponse<T> {
    pub current_page: u64,
    pub total_page: u64,
    pub property: String,
    pub items: Vec<T>,
}

impl<T: Serialize> Serialize for ListResponse<T> {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        use serde::ser::SerializeMap;

        let mut map = serializer.serialize_map(Some(3))?;
        map.serialize_entry("currentPage", &self.current_page)?;
        map.serialize_entry("totalPage", &self.total_page)?;
        map.serialize_entry(&self.property, &self.items)?;
        map.end()
    }
}

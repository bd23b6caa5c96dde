//! Records exchanged with the library server.
//!
//! Field names follow the server's camelCase JSON. The server is
//! authoritative; nothing here checks relationships between records.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Page {
    pub id: u64,
    pub filename: String,
    pub hash: String,
    pub page_number: u32,
    #[serde(default)]
    pub blocked: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComicBook {
    pub id: u64,
    pub filename: String,
    #[serde(default)]
    pub publisher: Option<String>,
    #[serde(default)]
    pub series: Option<String>,
    #[serde(default)]
    pub volume: Option<String>,
    #[serde(default)]
    pub issue_number: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub cover_date: Option<String>,
    #[serde(default)]
    pub deleted: bool,
    #[serde(default)]
    pub pages: Vec<Page>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BlockedPage {
    pub hash: String,
    #[serde(default)]
    pub label: String,
    /// Base64 thumbnail of the page.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub snapshot: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RestAuditLogEntry {
    pub id: u64,
    pub remote_ip: String,
    pub method: String,
    pub url: String,
    pub response_code: u16,
    #[serde(default)]
    pub successful: bool,
    /// Milliseconds since the epoch.
    pub started_at: u64,
    #[serde(default)]
    pub ended_at: Option<u64>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComicFile {
    pub filename: String,
    pub base_filename: String,
    pub size: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReadingList {
    /// `None` until the server has stored the list.
    #[serde(default)]
    pub id: Option<u64>,
    pub name: String,
    #[serde(default)]
    pub summary: Option<String>,
    #[serde(default)]
    pub comic_ids: Vec<u64>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScrapingVolume {
    pub id: u64,
    pub name: String,
    #[serde(default)]
    pub start_year: String,
    #[serde(default)]
    pub publisher: String,
    #[serde(default)]
    pub issue_count: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LastRead {
    pub id: u64,
    pub comic_id: u64,
    /// Milliseconds since the epoch.
    pub last_read: u64,
}


#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn comic_uses_camel_case_and_defaults() {
        let comic: ComicBook = serde_json::from_value(json!({
            "id": 4,
            "filename": "/library/a.cbz",
            "issueNumber": "12",
            "pages": [{"id": 1, "filename": "01.jpg", "hash": "abc", "pageNumber": 0}]
        }))
        .unwrap();
        assert_eq!(comic.issue_number.as_deref(), Some("12"));
        assert!(!comic.deleted);
        assert_eq!(comic.pages[0].page_number, 0);
        assert!(!comic.pages[0].blocked);
    }

    #[test]
    fn unsaved_reading_list_has_no_id() {
        let list: ReadingList = serde_json::from_value(json!({"name": "New"})).unwrap();
        assert_eq!(list.id, None);
        assert!(list.comic_ids.is_empty());
    }

    #[test]
    fn audit_entry_wire_names() {
        let value = serde_json::to_value(fixtures::audit_entry(1)).unwrap();
        assert_eq!(value["remoteIp"], "127.0.0.1");
        assert_eq!(value["responseCode"], 200);
    }
}

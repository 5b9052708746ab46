use serde::{Deserialize, Serialize};

/// Title given to notes created without one.
pub const UNTITLED: &str = "Untitled";

/// A single user note.
///
/// `id` is assigned by the store when the note is added and never changes.
/// Timestamps are Unix seconds (UTC) maintained by the store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Note {
    pub id: String,
    pub title: String,
    pub content: String,
    pub created_at: i64,
    pub modified_at: i64,
}

/// Returns [`UNTITLED`] for a blank title, otherwise the title unchanged.
pub fn resolve_title(title: &str) -> String {
    if title.trim().is_empty() {
        UNTITLED.to_string()
    } else {
        title.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_title_empty() {
        assert_eq!(resolve_title(""), "Untitled");
    }

    #[test]
    fn test_resolve_title_whitespace_only() {
        assert_eq!(resolve_title("   \t"), "Untitled");
    }

    #[test]
    fn test_resolve_title_keeps_text_verbatim() {
        assert_eq!(resolve_title("Groceries"), "Groceries");
        assert_eq!(resolve_title(" padded "), " padded ");
    }

    #[test]
    fn test_note_serializes_camel_case() {
        let note = Note {
            id: "n-1".to_string(),
            title: "Todo".to_string(),
            content: "buy milk".to_string(),
            created_at: 10,
            modified_at: 20,
        };
        let json = serde_json::to_string(&note).unwrap();
        assert!(json.contains("createdAt"));
        assert!(json.contains("modifiedAt"));
    }
}

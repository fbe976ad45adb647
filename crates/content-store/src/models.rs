//! Content Models
//!
//! Data structures matching the content API entities.
//!
//! The backend stores booleans as integers and timestamps in SQLite's text
//! format, so deserialization is lenient about both.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, NaiveDateTime, TimeZone, Utc};
use serde::de::{self, Deserializer};
use serde::{Deserialize, Serialize};

use crate::error::KeyParseError;

/// Title of the single note that mirrors the OS clipboard
pub const CLIPBOARD_NOTE_TITLE: &str = "Clipboard";

/// Content discriminator, serialized as the API's `type` tag
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContentType {
    Note,
    Checklist,
}

impl ContentType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ContentType::Note => "note",
            ContentType::Checklist => "checklist",
        }
    }
}

impl fmt::Display for ContentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ContentType {
    type Err = KeyParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "note" => Ok(ContentType::Note),
            "checklist" => Ok(ContentType::Checklist),
            other => Err(KeyParseError::UnknownType(other.to_string())),
        }
    }
}

/// Compound identity of a content item.
///
/// Note ids and checklist ids are independent sequences, so the id alone is
/// ambiguous. Serializes as `{"type": ..., "id": ...}`, the batch delete shape;
/// displays as `"<type>-<id>"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ContentKey {
    #[serde(rename = "type")]
    pub kind: ContentType,
    pub id: i64,
}

impl ContentKey {
    pub fn new(kind: ContentType, id: i64) -> Self {
        Self { kind, id }
    }

    pub fn note(id: i64) -> Self {
        Self::new(ContentType::Note, id)
    }

    pub fn checklist(id: i64) -> Self {
        Self::new(ContentType::Checklist, id)
    }
}

impl fmt::Display for ContentKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.kind, self.id)
    }
}

impl FromStr for ContentKey {
    type Err = KeyParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (kind, id) = s
            .split_once('-')
            .ok_or_else(|| KeyParseError::Malformed(s.to_string()))?;
        let kind = kind.parse::<ContentType>()?;
        let id = id
            .parse::<i64>()
            .map_err(|_| KeyParseError::InvalidId(id.to_string()))?;
        Ok(Self { kind, id })
    }
}

/// Free-text note
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Note {
    pub id: i64,
    pub title: String,
    #[serde(default)]
    pub content: String,
    #[serde(default, deserialize_with = "bool_ish")]
    pub pinned: bool,
    #[serde(default, deserialize_with = "bool_ish")]
    pub hidden: bool,
    #[serde(alias = "created_at", deserialize_with = "timestamp")]
    pub created_at: DateTime<Utc>,
    #[serde(alias = "updated_at", deserialize_with = "timestamp")]
    pub updated_at: DateTime<Utc>,
}

impl Note {
    pub fn is_clipboard_note(&self) -> bool {
        self.title == CLIPBOARD_NOTE_TITLE
    }
}

/// Single entry of a checklist
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChecklistItem {
    pub id: i64,
    #[serde(alias = "checklist_id")]
    pub checklist_id: i64,
    #[serde(default)]
    pub content: String,
    #[serde(default, deserialize_with = "bool_ish")]
    pub checked: bool,
    #[serde(default)]
    pub position: i64,
}

/// Titled, ordered list of checkable items
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Checklist {
    pub id: i64,
    pub title: String,
    #[serde(default, deserialize_with = "bool_ish")]
    pub pinned: bool,
    #[serde(default, deserialize_with = "bool_ish")]
    pub hidden: bool,
    #[serde(alias = "created_at", deserialize_with = "timestamp")]
    pub created_at: DateTime<Utc>,
    #[serde(alias = "updated_at", deserialize_with = "timestamp")]
    pub updated_at: DateTime<Utc>,
    #[serde(default, deserialize_with = "items_or_null")]
    pub items: Vec<ChecklistItem>,
}

/// A note or a checklist, discriminated by the `type` field
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Content {
    Note(Note),
    Checklist(Checklist),
}

impl Content {
    pub fn kind(&self) -> ContentType {
        match self {
            Content::Note(_) => ContentType::Note,
            Content::Checklist(_) => ContentType::Checklist,
        }
    }

    pub fn id(&self) -> i64 {
        match self {
            Content::Note(note) => note.id,
            Content::Checklist(checklist) => checklist.id,
        }
    }

    pub fn key(&self) -> ContentKey {
        ContentKey::new(self.kind(), self.id())
    }

    pub fn title(&self) -> &str {
        match self {
            Content::Note(note) => &note.title,
            Content::Checklist(checklist) => &checklist.title,
        }
    }

    pub fn pinned(&self) -> bool {
        match self {
            Content::Note(note) => note.pinned,
            Content::Checklist(checklist) => checklist.pinned,
        }
    }

    pub fn hidden(&self) -> bool {
        match self {
            Content::Note(note) => note.hidden,
            Content::Checklist(checklist) => checklist.hidden,
        }
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        match self {
            Content::Note(note) => note.created_at,
            Content::Checklist(checklist) => checklist.created_at,
        }
    }

    pub fn updated_at(&self) -> DateTime<Utc> {
        match self {
            Content::Note(note) => note.updated_at,
            Content::Checklist(checklist) => checklist.updated_at,
        }
    }

    /// Only notes can be the clipboard note; a checklist titled "Clipboard" is ordinary
    pub fn is_clipboard_note(&self) -> bool {
        matches!(self, Content::Note(note) if note.is_clipboard_note())
    }
}

impl From<Note> for Content {
    fn from(note: Note) -> Self {
        Content::Note(note)
    }
}

impl From<Checklist> for Content {
    fn from(checklist: Checklist) -> Self {
        Content::Checklist(checklist)
    }
}

// ========================
// Lenient Deserializers
// ========================

#[derive(Deserialize)]
#[serde(untagged)]
enum BoolIsh {
    Bool(bool),
    Int(i64),
    Text(String),
}

/// Accepts `true`/`false`, `0`/`1` and their string forms; `null` is false
pub(crate) fn bool_ish<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<BoolIsh>::deserialize(deserializer)? {
        None => Ok(false),
        Some(BoolIsh::Bool(value)) => Ok(value),
        Some(BoolIsh::Int(value)) => Ok(value != 0),
        Some(BoolIsh::Text(text)) => match text.trim() {
            "true" | "1" => Ok(true),
            "false" | "0" | "" => Ok(false),
            other => Err(de::Error::custom(format!("invalid boolean: {}", other))),
        },
    }
}

fn items_or_null<'de, D>(deserializer: D) -> Result<Vec<ChecklistItem>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Vec<ChecklistItem>>::deserialize(deserializer)?.unwrap_or_default())
}

fn timestamp<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    parse_timestamp(&raw).ok_or_else(|| de::Error::custom(format!("invalid timestamp: {}", raw)))
}

/// RFC 3339, or SQLite's `YYYY-MM-DD HH:MM:SS` taken as UTC
pub fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    if let Ok(parsed) = DateTime::parse_from_rfc3339(raw) {
        return Some(parsed.with_timezone(&Utc));
    }
    ["%Y-%m-%d %H:%M:%S", "%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M:%S%.f"]
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(raw, format).ok())
        .map(|naive| Utc.from_utc_datetime(&naive))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_content_key_display_and_parse() {
        let key = ContentKey::checklist(42);
        assert_eq!(key.to_string(), "checklist-42");
        assert_eq!("checklist-42".parse::<ContentKey>().unwrap(), key);
        assert_eq!("note-7".parse::<ContentKey>().unwrap(), ContentKey::note(7));
    }

    #[test]
    fn test_content_key_parse_errors() {
        assert!(matches!("note".parse::<ContentKey>(), Err(KeyParseError::Malformed(_))));
        assert!(matches!("todo-1".parse::<ContentKey>(), Err(KeyParseError::UnknownType(_))));
        assert!(matches!("note-x".parse::<ContentKey>(), Err(KeyParseError::InvalidId(_))));
    }

    #[test]
    fn test_tagged_content_from_api() {
        let raw = json!([
            {
                "type": "note",
                "id": 1,
                "title": "Groceries",
                "content": "milk",
                "pinned": 1,
                "hidden": 0,
                "createdAt": "2024-05-01 10:00:00",
                "updatedAt": "2024-05-01T10:05:00Z"
            },
            {
                "type": "checklist",
                "id": 1,
                "title": "Trip",
                "pinned": false,
                "hidden": "true",
                "createdAt": "2024-05-02T08:00:00.000Z",
                "updatedAt": "2024-05-02T08:00:00.000Z",
                "items": null
            }
        ]);

        let content: Vec<Content> = serde_json::from_value(raw).unwrap();
        assert_eq!(content.len(), 2);
        assert_eq!(content[0].key(), ContentKey::note(1));
        assert!(content[0].pinned());
        assert!(!content[0].hidden());
        assert_eq!(content[1].key(), ContentKey::checklist(1));
        assert!(content[1].hidden());
        match &content[1] {
            Content::Checklist(checklist) => assert!(checklist.items.is_empty()),
            other => panic!("expected checklist, got {:?}", other),
        }
    }

    #[test]
    fn test_untagged_create_response() {
        let raw = json!({
            "id": 9,
            "title": "A",
            "content": "x",
            "createdAt": "2024-05-01 10:00:00",
            "updatedAt": "2024-05-01 10:00:00"
        });
        let note: Note = serde_json::from_value(raw).unwrap();
        assert_eq!(note.id, 9);
        assert!(!note.pinned);
        assert!(!note.hidden);
    }

    #[test]
    fn test_checklist_item_snake_case_alias() {
        let raw = json!({ "id": 3, "checklist_id": 5, "content": "socks", "checked": 1, "position": 2 });
        let item: ChecklistItem = serde_json::from_value(raw).unwrap();
        assert_eq!(item.checklist_id, 5);
        assert!(item.checked);
    }

    #[test]
    fn test_invalid_timestamp_rejected() {
        let raw = json!({
            "id": 1, "title": "t", "createdAt": "yesterday", "updatedAt": "yesterday"
        });
        assert!(serde_json::from_value::<Note>(raw).is_err());
    }

    #[test]
    fn test_clipboard_note_detection() {
        let raw = json!({
            "type": "checklist", "id": 1, "title": CLIPBOARD_NOTE_TITLE,
            "createdAt": "2024-05-01 10:00:00", "updatedAt": "2024-05-01 10:00:00"
        });
        let checklist: Content = serde_json::from_value(raw).unwrap();
        assert!(!checklist.is_clipboard_note());
    }
}

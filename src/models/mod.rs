use serde::{Deserialize, Serialize};
use strum::Display;

#[derive(Serialize, Deserialize, Clone, Debug)]
#[serde(rename_all = "camelCase")]
pub(crate) struct Manuscript {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub created_at: String,
    pub updated_at: String,
}

/// Kind of document a binder node represents. Orthogonal to the structural
/// `is_folder` flag except that `Folder` nodes are always folders.
///
/// The backend owns this list; anything it adds later lands on `Other` so an
/// older client keeps rendering the tree instead of failing the whole fetch.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, Display)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "title_case")]
pub(crate) enum DocumentType {
    Chapter,
    Folder,
    CharacterSheet,
    Notes,
    TitlePage,
    #[serde(other)]
    Other,
}

impl Default for DocumentType {
    fn default() -> Self {
        DocumentType::Chapter
    }
}

/// One node of a manuscript's binder tree. The backend returns the whole
/// forest with children embedded, in display order.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub(crate) struct BinderNode {
    pub id: String,

    pub title: String,

    pub is_folder: bool,

    /// Sibling sort key persisted by the backend. Display order is the
    /// position inside `children`; on a move this must be rewritten to the
    /// node's position among its new siblings.
    pub order_index: i32,

    #[serde(default)]
    pub word_count: u32,

    #[serde(default)]
    pub document_type: DocumentType,

    /// Weak reference into the manuscript's codex. Never implies containment.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub linked_entity_id: Option<String>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<BinderNode>,
}

/// Full node payload from `GET /api/nodes/{id}`. Tree listings omit
/// `content`, so duplicate and the document pane fetch this one.
#[derive(Serialize, Deserialize, Clone, Debug)]
#[serde(rename_all = "camelCase")]
pub(crate) struct NodeDetail {
    pub id: String,
    pub title: String,
    pub is_folder: bool,
    pub order_index: i32,
    #[serde(default)]
    pub word_count: u32,
    #[serde(default)]
    pub document_type: DocumentType,
    #[serde(default)]
    pub linked_entity_id: Option<String>,
    #[serde(default)]
    pub content: String,
}

/// Story-bible entry (character, location, ...). Read-only on this side;
/// binder nodes may point at one via `linked_entity_id`.
#[derive(Serialize, Deserialize, Clone, Debug)]
#[serde(rename_all = "camelCase")]
pub(crate) struct CodexEntity {
    pub id: String,
    pub name: String,
    pub entity_type: String,
    #[serde(default)]
    pub description: String,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub(crate) struct RecentManuscript {
    pub id: String,
    pub title: String,
    pub last_opened_ms: i64,
}

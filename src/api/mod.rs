use crate::models::{BinderNode, CodexEntity, DocumentType, Manuscript, NodeDetail};
use serde::Serialize;

#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) enum ApiErrorKind {
    Network,
    Http,
    Parse,
}

#[derive(Clone, Debug)]
pub(crate) struct ApiError {
    pub kind: ApiErrorKind,
    pub message: String,
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl ApiError {
    fn network(e: reqwest::Error) -> Self {
        Self {
            kind: ApiErrorKind::Network,
            message: e.to_string(),
        }
    }

    fn parse(e: impl std::fmt::Display) -> Self {
        Self {
            kind: ApiErrorKind::Parse,
            message: e.to_string(),
        }
    }

    fn http(status: reqwest::StatusCode, body: String, ctx: &str) -> Self {
        Self {
            kind: ApiErrorKind::Http,
            message: format!("{ctx} ({status}): {body}"),
        }
    }
}

pub(crate) type ApiResult<T> = Result<T, ApiError>;

#[derive(Clone, Debug)]
pub(crate) struct EnvConfig {
    pub api_url: String,
}

impl EnvConfig {
    pub fn new() -> Self {
        let default_api_url = "http://localhost:8600".to_string();

        // We support BOTH `window.ENV.API_URL` (documented in README) and
        // `window.ENV.api_url` (legacy/implementation detail) for compatibility.
        if let Some(window) = web_sys::window() {
            if let Some(env) = window.get("ENV") {
                if !env.is_undefined() && env.is_object() {
                    if let Ok(api_url) = js_sys::Reflect::get(&env, &"API_URL".into()) {
                        if let Some(url_str) = api_url.as_string() {
                            return Self { api_url: url_str };
                        }
                    }

                    if let Ok(api_url) = js_sys::Reflect::get(&env, &"api_url".into()) {
                        if let Some(url_str) = api_url.as_string() {
                            return Self { api_url: url_str };
                        }
                    }
                }
            }
        }

        Self {
            api_url: default_api_url,
        }
    }
}

/// Partial update for a binder node. Absent fields leave the stored value
/// untouched.
#[derive(Serialize, Clone, Debug, Default)]
#[serde(rename_all = "camelCase")]
pub(crate) struct UpdateNodeRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    /// Outer `None` omits the field; `Some(None)` serializes an explicit
    /// `null`, which moves the node to the root level.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<Option<String>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub order_index: Option<i32>,

    /// Opaque to this client. Kept as raw JSON to avoid coupling to the
    /// backend's metadata schema.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub document_metadata: Option<serde_json::Value>,

    /// Same outer/inner split as `parent_id`: `Some(None)` clears the link.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub linked_entity_id: Option<Option<String>>,
}

#[derive(Serialize, Clone, Debug)]
#[serde(rename_all = "camelCase")]
pub(crate) struct CreateNodeRequest {
    pub manuscript_id: String,
    pub title: String,
    pub is_folder: bool,
    /// Position among the new siblings; the backend renumbers the rest.
    pub order_index: i32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub document_type: Option<DocumentType>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub initial_content: Option<String>,
}

#[derive(Clone)]
pub(crate) struct ApiClient {
    pub(crate) base_url: String,
}

impl ApiClient {
    pub fn new(base_url: String) -> Self {
        Self { base_url }
    }

    pub fn from_env() -> Self {
        Self::new(EnvConfig::new().api_url)
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn check(res: reqwest::Response, ctx: &str) -> ApiResult<reqwest::Response> {
        if res.status().is_success() {
            Ok(res)
        } else {
            let status = res.status();
            let body = res.text().await.unwrap_or_default();
            Err(ApiError::http(status, body, ctx))
        }
    }

    async fn get_json<T: serde::de::DeserializeOwned>(&self, path: &str) -> ApiResult<T> {
        let res = reqwest::Client::new()
            .get(self.url(path))
            .send()
            .await
            .map_err(ApiError::network)?;
        Self::check(res, "Request failed")
            .await?
            .json()
            .await
            .map_err(ApiError::parse)
    }

    async fn send_json<T: serde::de::DeserializeOwned>(
        &self,
        method: reqwest::Method,
        path: &str,
        body: &impl serde::Serialize,
    ) -> ApiResult<T> {
        let res = reqwest::Client::new()
            .request(method, self.url(path))
            .json(body)
            .send()
            .await
            .map_err(ApiError::network)?;
        Self::check(res, "Request failed")
            .await?
            .json()
            .await
            .map_err(ApiError::parse)
    }

    /// DELETE endpoints answer with an empty body, so no JSON decoding here.
    async fn delete(&self, path: &str) -> ApiResult<()> {
        let res = reqwest::Client::new()
            .delete(self.url(path))
            .send()
            .await
            .map_err(ApiError::network)?;
        Self::check(res, "Delete failed").await.map(|_| ())
    }

    pub async fn get_manuscripts(&self) -> ApiResult<Vec<Manuscript>> {
        self.get_json("/api/manuscripts").await
    }

    /// The whole binder forest, children embedded, in display order. Always
    /// the full structure; the backend never sends deltas.
    pub async fn get_manuscript_tree(&self, manuscript_id: &str) -> ApiResult<Vec<BinderNode>> {
        self.get_json(&format!("/api/manuscripts/{manuscript_id}/tree"))
            .await
    }

    pub async fn update_node(
        &self,
        node_id: &str,
        req: &UpdateNodeRequest,
    ) -> ApiResult<BinderNode> {
        self.send_json(reqwest::Method::PATCH, &format!("/api/nodes/{node_id}"), req)
            .await
    }

    pub async fn create_node(&self, req: &CreateNodeRequest) -> ApiResult<BinderNode> {
        self.send_json(reqwest::Method::POST, "/api/nodes", req).await
    }

    /// The backend cascades the delete to every descendant.
    pub async fn delete_node(&self, node_id: &str) -> ApiResult<()> {
        self.delete(&format!("/api/nodes/{node_id}")).await
    }

    /// Full node including `content`, which tree listings omit.
    pub async fn get_node_detail(&self, node_id: &str) -> ApiResult<NodeDetail> {
        self.get_json(&format!("/api/nodes/{node_id}")).await
    }

    pub async fn get_codex_entities(&self, manuscript_id: &str) -> ApiResult<Vec<CodexEntity>> {
        self.get_json(&format!("/api/manuscripts/{manuscript_id}/codex"))
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_client_new_keeps_base_url() {
        let client = ApiClient::new("http://localhost:8600".to_string());
        assert_eq!(client.base_url, "http://localhost:8600");
        assert_eq!(
            client.url("/api/manuscripts"),
            "http://localhost:8600/api/manuscripts"
        );
    }

    #[test]
    fn test_tree_response_contract_deserialize() {
        // Contract: GET /api/manuscripts/{id}/tree
        let json = r#"[
            {
                "id": "f1",
                "title": "Act I",
                "isFolder": true,
                "orderIndex": 0,
                "documentType": "FOLDER",
                "children": [
                    {
                        "id": "c1",
                        "title": "Chapter 1",
                        "isFolder": false,
                        "orderIndex": 0,
                        "wordCount": 1532,
                        "documentType": "CHAPTER",
                        "linkedEntityId": "char-9"
                    }
                ]
            },
            {
                "id": "n1",
                "title": "Scratch",
                "isFolder": false,
                "orderIndex": 1,
                "documentType": "NOTES"
            }
        ]"#;
        let tree: Vec<BinderNode> = serde_json::from_str(json).expect("tree should parse");
        assert_eq!(tree.len(), 2);
        assert!(tree[0].is_folder);
        assert_eq!(tree[0].document_type, DocumentType::Folder);
        assert_eq!(tree[0].children.len(), 1);
        let c1 = &tree[0].children[0];
        assert_eq!(c1.word_count, 1532);
        assert_eq!(c1.linked_entity_id.as_deref(), Some("char-9"));
        // Leaves may omit children and wordCount entirely.
        assert!(tree[1].children.is_empty());
        assert_eq!(tree[1].word_count, 0);
        assert_eq!(tree[1].document_type, DocumentType::Notes);
    }

    #[test]
    fn test_unknown_document_type_degrades_to_other() {
        let json = r#"{
            "id": "x1",
            "title": "Storyboard",
            "isFolder": false,
            "orderIndex": 3,
            "documentType": "STORYBOARD"
        }"#;
        let node: BinderNode = serde_json::from_str(json).expect("node should parse");
        assert_eq!(node.document_type, DocumentType::Other);
    }

    #[test]
    fn test_node_detail_contract_deserialize() {
        let json = r#"{
            "id": "c1",
            "title": "Chapter 1",
            "isFolder": false,
            "orderIndex": 0,
            "wordCount": 1532,
            "documentType": "CHAPTER",
            "linkedEntityId": null,
            "content": "It was a dark and stormy night."
        }"#;
        let detail: NodeDetail = serde_json::from_str(json).expect("detail should parse");
        assert_eq!(detail.content, "It was a dark and stormy night.");
        assert!(detail.linked_entity_id.is_none());
    }

    #[test]
    fn test_update_request_omits_absent_fields() {
        let req = UpdateNodeRequest::default();
        let v = serde_json::to_value(req).expect("should serialize");
        assert_eq!(v, serde_json::json!({}));
    }

    #[test]
    fn test_update_request_move_to_root_sends_explicit_null() {
        let req = UpdateNodeRequest {
            parent_id: Some(None),
            order_index: Some(2),
            ..Default::default()
        };
        let v = serde_json::to_value(req).expect("should serialize");
        assert!(v.get("parentId").is_some(), "parentId must be present");
        assert!(v["parentId"].is_null());
        assert_eq!(v["orderIndex"], 2);
        assert!(v.get("title").is_none());
    }

    #[test]
    fn test_update_request_reparent_sends_id() {
        let req = UpdateNodeRequest {
            parent_id: Some(Some("f1".to_string())),
            order_index: Some(0),
            ..Default::default()
        };
        let v = serde_json::to_value(req).expect("should serialize");
        assert_eq!(v["parentId"], "f1");
    }

    #[test]
    fn test_create_request_skips_optional_fields() {
        let req = CreateNodeRequest {
            manuscript_id: "m1".to_string(),
            title: "Chapter 5".to_string(),
            is_folder: false,
            order_index: 4,
            parent_id: None,
            document_type: None,
            initial_content: None,
        };
        let v = serde_json::to_value(req).expect("should serialize");
        assert_eq!(v["manuscriptId"], "m1");
        assert_eq!(v["orderIndex"], 4);
        assert!(v.get("parentId").is_none());
        assert!(v.get("initialContent").is_none());
    }

    #[test]
    fn test_create_request_carries_duplicate_payload() {
        let req = CreateNodeRequest {
            manuscript_id: "m1".to_string(),
            title: "Chapter 5 (Copy)".to_string(),
            is_folder: false,
            order_index: 5,
            parent_id: Some("f1".to_string()),
            document_type: Some(DocumentType::Chapter),
            initial_content: Some("Same words.".to_string()),
        };
        let v = serde_json::to_value(req).expect("should serialize");
        assert_eq!(v["parentId"], "f1");
        assert_eq!(v["documentType"], "CHAPTER");
        assert_eq!(v["initialContent"], "Same words.");
    }

    #[test]
    fn test_document_type_labels() {
        assert_eq!(DocumentType::CharacterSheet.to_string(), "Character Sheet");
        assert_eq!(DocumentType::TitlePage.to_string(), "Title Page");
        assert_eq!(DocumentType::Chapter.to_string(), "Chapter");
    }

    #[test]
    fn test_api_error_display_uses_message() {
        let err = ApiError {
            kind: ApiErrorKind::Http,
            message: "Request failed (500): boom".to_string(),
        };
        assert_eq!(err.to_string(), "Request failed (500): boom");
    }
}

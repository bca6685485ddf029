//! Axum route handlers for the document-store publishing API.

use axum::{extract::State, Json};
use serde::Deserialize;
use serde_json::{json, Value};
use tracing::info;

use crate::errors::AppError;
use crate::notion::blocks::build_document_blocks;
use crate::notion::NotionError;
use crate::state::AppState;

/// Inbound publish request. The form sends camelCase keys; the credential
/// and database id fall back to server configuration when absent.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PublishRequest {
    pub notion_token: Option<String>,
    pub notion_database_id: Option<String>,
    /// When set, blocks are appended to this page instead of creating one.
    pub notion_page_id: Option<String>,
    #[serde(default)]
    pub structured_data: Value,
}

const DEFAULT_PAGE_TITLE: &str = "UX Strategy Brief";

/// POST /api/notion
///
/// Publishes a generated document: appends to an existing page when
/// `notionPageId` is present, otherwise creates a page under the database.
/// A single call either way; upstream failures pass through, no retry.
pub async fn handle_publish(
    State(state): State<AppState>,
    Json(request): Json<PublishRequest>,
) -> Result<Json<Value>, AppError> {
    let token = request
        .notion_token
        .as_deref()
        .filter(|t| !t.trim().is_empty())
        .map(str::to_string)
        .or_else(|| state.config.notion_token.clone())
        .ok_or_else(|| {
            AppError::validation(
                "Missing Notion token",
                "Provide a Notion integration token",
            )
        })?;

    let database_id = request
        .notion_database_id
        .clone()
        .or_else(|| state.config.notion_database_id.clone());

    let blocks = build_document_blocks(&request.structured_data);

    match (request.notion_page_id.as_deref(), database_id) {
        (Some(page_id), _) => {
            state
                .notion
                .append_blocks(&token, page_id, blocks)
                .await
                .map_err(|e| document_store_error("Append", e))?;

            info!("Appended generated document to page {page_id}");
            Ok(Json(json!({
                "ok": true,
                "message": "Blocks added to page",
                "page": { "id": page_id }
            })))
        }
        (None, Some(database_id)) => {
            let title = request
                .structured_data
                .get("projectName")
                .and_then(Value::as_str)
                .filter(|s| !s.trim().is_empty())
                .unwrap_or(DEFAULT_PAGE_TITLE);

            let page = state
                .notion
                .create_page(&token, &database_id, title, blocks)
                .await
                .map_err(|e| document_store_error("Create Page", e))?;

            info!("Created page '{title}' in database {database_id}");
            Ok(Json(json!({ "ok": true, "page": page })))
        }
        (None, None) => Err(AppError::validation(
            "Missing Notion ID",
            "Provide the id of a page or database",
        )),
    }
}

fn document_store_error(operation: &'static str, err: NotionError) -> AppError {
    match err {
        NotionError::Api { status, body } => AppError::DocumentStore {
            operation,
            status,
            details: body,
        },
        NotionError::Http(e) => AppError::Internal(e.into()),
    }
}

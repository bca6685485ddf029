/// Notion client — the single point of entry for document-store calls.
///
/// Writes are a single request/response: no retry, no queue. Upstream
/// failures carry the Notion status and body so the handler can pass them
/// through to the form client.
use reqwest::Client;
use serde_json::{json, Value};
use thiserror::Error;
use tracing::debug;

pub mod blocks;
pub mod handlers;

const NOTION_API_URL: &str = "https://api.notion.com/v1";
const NOTION_VERSION: &str = "2022-06-28";

#[derive(Debug, Error)]
pub enum NotionError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error (status {status}): {body}")]
    Api { status: u16, body: String },
}

#[derive(Clone)]
pub struct NotionClient {
    client: Client,
}

impl NotionClient {
    pub fn new() -> Self {
        Self {
            client: Client::builder()
                .timeout(std::time::Duration::from_secs(30))
                .build()
                .expect("Failed to build HTTP client"),
        }
    }

    /// Creates a page under `database_id` with a title property and the
    /// given children blocks. Returns the created-page object as Notion
    /// reports it.
    pub async fn create_page(
        &self,
        token: &str,
        database_id: &str,
        title: &str,
        children: Vec<Value>,
    ) -> Result<Value, NotionError> {
        let body = json!({
            "parent": { "database_id": database_id },
            "properties": {
                "Name": {
                    "title": [{ "text": { "content": title } }],
                },
            },
            "children": children,
        });

        let response = self
            .client
            .post(format!("{NOTION_API_URL}/pages"))
            .bearer_auth(token)
            .header("Notion-Version", NOTION_VERSION)
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(NotionError::Api {
                status: status.as_u16(),
                body,
            });
        }

        debug!("Created Notion page in database {database_id}");
        Ok(response.json().await?)
    }

    /// Appends children blocks to an existing page.
    pub async fn append_blocks(
        &self,
        token: &str,
        page_id: &str,
        children: Vec<Value>,
    ) -> Result<(), NotionError> {
        let response = self
            .client
            .patch(format!("{NOTION_API_URL}/blocks/{page_id}/children"))
            .bearer_auth(token)
            .header("Notion-Version", NOTION_VERSION)
            .json(&json!({ "children": children }))
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(NotionError::Api {
                status: status.as_u16(),
                body,
            });
        }

        debug!("Appended blocks to Notion page {page_id}");
        Ok(())
    }
}

impl Default for NotionClient {
    fn default() -> Self {
        Self::new()
    }
}

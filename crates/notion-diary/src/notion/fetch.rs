use indicatif::ProgressBar;
use serde::de::DeserializeOwned;

use super::{create_notion_client, NotionConfig};
use crate::prelude::*;
use notion_diary_core::notion::blocks::{merge_block_pages, BlockChildrenResponse, ResultDocument};

/// Helper to set spinner message if spinner is present
fn set_spinner_msg(spinner: Option<&ProgressBar>, msg: impl Into<String>) {
    if let Some(s) = spinner {
        s.set_message(msg.into());
    }
}

/// GET `url` and decode the JSON body, turning any non-2xx status into
/// [`Error::Transport`].
async fn get_json<T: DeserializeOwned>(
    client: &reqwest::Client,
    url: &str,
    query: &[(&str, &str)],
) -> Result<T, Error> {
    log::debug!("GET {} {:?}", url, query);

    let response = client
        .get(url)
        .query(query)
        .send()
        .await
        .map_err(|e| Error::Request(format!("Failed to send request to Notion: {}", e)))?;

    if !response.status().is_success() {
        let status = response.status().as_u16();
        let body = response.text().await.unwrap_or_default();
        return Err(Error::Transport { status, body });
    }

    response
        .json()
        .await
        .map_err(|e| Error::Request(format!("Failed to parse Notion response: {}", e)))
}

/// Fetch every block of a page.
///
/// Requests the page metadata once, then walks the block-children endpoint
/// cursor by cursor. Any failure aborts the whole fetch; no partial document
/// is returned.
pub async fn fetch_page_data(
    config: &NotionConfig,
    page_id: &str,
    spinner: Option<&ProgressBar>,
) -> Result<ResultDocument, Error> {
    let client = create_notion_client(config.api_key.as_deref())?;
    let base_url = config.base_url.trim_end_matches('/');
    let page_id = urlencoding::encode(page_id);

    set_spinner_msg(spinner, format!("Fetching page {page_id}..."));
    let page_url = format!("{base_url}/pages/{page_id}");
    let _page: serde_json::Value = get_json(&client, &page_url, &[]).await?;

    let blocks_url = format!("{base_url}/blocks/{page_id}/children");
    let mut pages: Vec<BlockChildrenResponse> = Vec::new();
    let mut cursor: Option<String> = None;

    loop {
        set_spinner_msg(
            spinner,
            format!("Fetching blocks (batch {})...", pages.len() + 1),
        );

        let query: Vec<(&str, &str)> = cursor
            .as_deref()
            .map(|c| vec![("start_cursor", c)])
            .unwrap_or_default();

        let response: BlockChildrenResponse = get_json(&client, &blocks_url, &query).await?;
        log::debug!(
            "Received {} blocks (has_more: {})",
            response.results.len(),
            response.has_more
        );

        cursor = response.continuation().map(str::to_string);
        pages.push(response);

        if cursor.is_none() {
            break;
        }
    }

    Ok(merge_block_pages(pages))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::notion::NOTION_VERSION;
    use serde_json::json;
    use wiremock::matchers::{any, header, method, path, query_param, query_param_is_missing};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn config(server: &MockServer, api_key: Option<&str>) -> NotionConfig {
        NotionConfig {
            base_url: server.uri(),
            api_key: api_key.map(str::to_string),
            page_id: Some("page-1".to_string()),
        }
    }

    async fn mount_page(server: &MockServer) {
        Mock::given(method("GET"))
            .and(path("/pages/page-1"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "object": "page" })))
            .expect(1)
            .mount(server)
            .await;
    }

    #[tokio::test]
    async fn test_fetch_concatenates_paginated_blocks() {
        let server = MockServer::start().await;
        mount_page(&server).await;

        Mock::given(method("GET"))
            .and(path("/blocks/page-1/children"))
            .and(query_param_is_missing("start_cursor"))
            .and(header("authorization", "Bearer secret"))
            .and(header("notion-version", NOTION_VERSION))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "object": "list",
                "results": [{ "id": "a" }, { "id": "b" }],
                "has_more": true,
                "next_cursor": "cursor-2"
            })))
            .expect(1)
            .mount(&server)
            .await;

        Mock::given(method("GET"))
            .and(path("/blocks/page-1/children"))
            .and(query_param("start_cursor", "cursor-2"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "object": "list",
                "results": [{ "id": "c" }],
                "has_more": false,
                "next_cursor": null
            })))
            .expect(1)
            .mount(&server)
            .await;

        let document = fetch_page_data(&config(&server, Some("secret")), "page-1", None)
            .await
            .unwrap();

        assert_eq!(
            document.results,
            vec![json!({ "id": "a" }), json!({ "id": "b" }), json!({ "id": "c" })]
        );
        assert!(!document.has_more);
        assert_eq!(document.next_cursor, None);

        // page metadata + two block batches, nothing more
        let requests = server.received_requests().await.unwrap();
        assert_eq!(requests.len(), 3);
    }

    #[tokio::test]
    async fn test_fetch_stops_when_cursor_missing() {
        let server = MockServer::start().await;
        mount_page(&server).await;

        Mock::given(method("GET"))
            .and(path("/blocks/page-1/children"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "results": [{ "id": "a" }],
                "has_more": true,
                "next_cursor": null
            })))
            .expect(1)
            .mount(&server)
            .await;

        let document = fetch_page_data(&config(&server, Some("secret")), "page-1", None)
            .await
            .unwrap();

        assert_eq!(document.results.len(), 1);
    }

    #[tokio::test]
    async fn test_fetch_without_credential_makes_no_request() {
        let server = MockServer::start().await;

        Mock::given(any())
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&server)
            .await;

        let err = fetch_page_data(&config(&server, None), "page-1", None)
            .await
            .unwrap_err();

        assert!(matches!(err, Error::Configuration(_)));
    }

    #[tokio::test]
    async fn test_fetch_page_error_aborts() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/pages/page-1"))
            .respond_with(ResponseTemplate::new(404).set_body_string("object_not_found"))
            .mount(&server)
            .await;

        Mock::given(method("GET"))
            .and(path("/blocks/page-1/children"))
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&server)
            .await;

        let err = fetch_page_data(&config(&server, Some("secret")), "page-1", None)
            .await
            .unwrap_err();

        match err {
            Error::Transport { status, body } => {
                assert_eq!(status, 404);
                assert_eq!(body, "object_not_found");
            }
            other => panic!("expected transport error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_fetch_second_batch_error_returns_no_partial_document() {
        let server = MockServer::start().await;
        mount_page(&server).await;

        Mock::given(method("GET"))
            .and(path("/blocks/page-1/children"))
            .and(query_param_is_missing("start_cursor"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "results": [{ "id": "a" }],
                "has_more": true,
                "next_cursor": "cursor-2"
            })))
            .mount(&server)
            .await;

        Mock::given(method("GET"))
            .and(path("/blocks/page-1/children"))
            .and(query_param("start_cursor", "cursor-2"))
            .respond_with(ResponseTemplate::new(502).set_body_string("bad gateway"))
            .mount(&server)
            .await;

        let result = fetch_page_data(&config(&server, Some("secret")), "page-1", None).await;

        assert!(matches!(
            result,
            Err(Error::Transport { status: 502, .. })
        ));
    }
}

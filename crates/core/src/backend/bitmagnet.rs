//! Bitmagnet GraphQL backend implementation.

use std::time::{Duration, Instant};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use tracing::debug;

use crate::config::BackendConfig;
use crate::results::{ContentType, SearchHit, TorrentFile};

use super::{BackendError, SearchBackend, SearchPage, SearchRequest};

const SEARCH_QUERY: &str = r#"
query Search($query: String!, $limit: Int!, $offset: Int!) {
  torrentContent {
    search(input: { queryString: $query, limit: $limit, offset: $offset }) {
      items {
        infoHash
        title
        contentType
        seeders
        leechers
        publishedAt
        torrent {
          name
          size
          magnetUri
        }
      }
    }
  }
}
"#;

const FILES_QUERY: &str = r#"
query Files($query: String!) {
  torrentContent {
    search(input: { queryString: $query, limit: 1 }) {
      items {
        infoHash
        torrent {
          files {
            path
            size
          }
        }
      }
    }
  }
}
"#;

/// Bitmagnet GraphQL backend implementation.
pub struct BitmagnetClient {
    client: Client,
    config: BackendConfig,
}

impl BitmagnetClient {
    /// Create a new BitmagnetClient with the given configuration.
    pub fn new(config: BackendConfig) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs as u64))
            .build()
            .expect("Failed to create HTTP client");

        Self { client, config }
    }

    fn endpoint(&self) -> String {
        format!("{}/graphql", self.config.url.trim_end_matches('/'))
    }

    /// POST a GraphQL document and unwrap the response envelope.
    ///
    /// A non-2xx status and a non-empty `errors` list are both hard
    /// failures; per-item field gaps are handled by the decode types.
    async fn execute<T: DeserializeOwned>(
        &self,
        query: &str,
        variables: serde_json::Value,
    ) -> Result<T, BackendError> {
        let body = serde_json::json!({ "query": query, "variables": variables });

        let response = self
            .client
            .post(self.endpoint())
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    BackendError::Timeout
                } else if e.is_connect() {
                    BackendError::ConnectionFailed(e.to_string())
                } else {
                    BackendError::Api(e.to_string())
                }
            })?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            return Err(BackendError::HttpStatus {
                status,
                body: body.chars().take(200).collect(),
            });
        }

        let envelope: GraphqlResponse<T> = response
            .json()
            .await
            .map_err(|e| BackendError::Decode(e.to_string()))?;

        if let Some(err) = envelope.errors.first() {
            return Err(BackendError::Api(err.message.clone()));
        }

        envelope
            .data
            .ok_or_else(|| BackendError::Decode("response has no data".to_string()))
    }
}

#[async_trait]
impl SearchBackend for BitmagnetClient {
    fn name(&self) -> &str {
        "bitmagnet"
    }

    async fn search(&self, request: &SearchRequest) -> Result<SearchPage, BackendError> {
        let start = Instant::now();
        debug!(
            query = %request.query_string,
            limit = request.limit,
            offset = request.offset,
            "Searching index"
        );

        let data: SearchData = self
            .execute(
                SEARCH_QUERY,
                serde_json::json!({
                    "query": request.query_string,
                    "limit": request.limit,
                    "offset": request.offset,
                }),
            )
            .await?;

        let hits: Vec<SearchHit> = data
            .torrent_content
            .search
            .items
            .into_iter()
            .map(into_hit)
            .collect();

        let duration_ms = start.elapsed().as_millis() as u64;
        debug!(
            results = hits.len(),
            duration_ms = duration_ms,
            "Index search complete"
        );

        Ok(SearchPage { hits, duration_ms })
    }

    async fn files(&self, info_hash: &str) -> Result<Option<Vec<TorrentFile>>, BackendError> {
        debug!(info_hash = %info_hash, "Looking up indexed file listing");

        let data: SearchData = self
            .execute(FILES_QUERY, serde_json::json!({ "query": info_hash }))
            .await?;

        let files = data
            .torrent_content
            .search
            .items
            .into_iter()
            .find(|item| item.info_hash.eq_ignore_ascii_case(info_hash))
            .and_then(|item| item.torrent)
            .and_then(|torrent| torrent.files)
            .map(|files| {
                files
                    .into_iter()
                    .map(|f| TorrentFile {
                        path: f.path,
                        size_bytes: f.size,
                    })
                    .collect::<Vec<_>>()
            })
            .filter(|files| !files.is_empty());

        Ok(files)
    }
}

/// Convert a raw index item, defaulting every optional field so one
/// malformed item can never abort the page.
fn into_hit(raw: RawItem) -> SearchHit {
    let torrent = raw.torrent.unwrap_or_default();
    let magnet_uri = torrent
        .magnet_uri
        .unwrap_or_else(|| synthesize_magnet(&raw.info_hash, &raw.title));

    SearchHit {
        content_type: raw.content_type.as_deref().and_then(ContentType::parse),
        seeders: raw.seeders.unwrap_or(0).max(0) as u32,
        leechers: raw.leechers.unwrap_or(0).max(0) as u32,
        published_at: raw.published_at.as_deref().and_then(parse_publish_date),
        torrent_name: torrent.name,
        size_bytes: torrent.size.unwrap_or(0),
        info_hash: raw.info_hash.to_lowercase(),
        title: raw.title,
        magnet_uri,
    }
}

/// Build a magnet URI from an info hash and display name.
pub fn synthesize_magnet(info_hash: &str, title: &str) -> String {
    format!(
        "magnet:?xt=urn:btih:{}&dn={}",
        info_hash,
        urlencoding::encode(title)
    )
}

/// Parse the index's publish timestamp.
fn parse_publish_date(date_str: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(date_str)
        .ok()
        .map(|dt| dt.with_timezone(&Utc))
        .or_else(|| {
            // Try parsing without timezone
            chrono::NaiveDateTime::parse_from_str(date_str, "%Y-%m-%dT%H:%M:%S")
                .ok()
                .map(|ndt| ndt.and_utc())
        })
}

// GraphQL wire types
#[derive(Debug, Deserialize)]
#[serde(bound(deserialize = "T: DeserializeOwned"))]
struct GraphqlResponse<T> {
    #[serde(default)]
    data: Option<T>,
    #[serde(default)]
    errors: Vec<GraphqlError>,
}

#[derive(Debug, Deserialize)]
struct GraphqlError {
    message: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SearchData {
    torrent_content: TorrentContentData,
}

#[derive(Debug, Deserialize)]
struct TorrentContentData {
    search: SearchItems,
}

#[derive(Debug, Deserialize)]
struct SearchItems {
    #[serde(default)]
    items: Vec<RawItem>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawItem {
    #[serde(default)]
    info_hash: String,
    #[serde(default)]
    title: String,
    #[serde(default)]
    content_type: Option<String>,
    #[serde(default)]
    seeders: Option<i64>,
    #[serde(default)]
    leechers: Option<i64>,
    #[serde(default)]
    published_at: Option<String>,
    #[serde(default)]
    torrent: Option<RawTorrent>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawTorrent {
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    size: Option<u64>,
    #[serde(default)]
    magnet_uri: Option<String>,
    #[serde(default)]
    files: Option<Vec<RawFile>>,
}

#[derive(Debug, Deserialize)]
struct RawFile {
    path: String,
    #[serde(default)]
    size: Option<u64>,
}

//! REST implementation of [`VocabularyStore`].

use async_trait::async_trait;
use reqwest::{Client, Response, StatusCode, Url};
use std::sync::Arc;
use tracing::{debug, info, warn};
use vocab_core::{ParsedEntry, RecordId, VocabularyRecord};

use super::{StoreError, VocabularyStore};
use crate::config::ClientConfig;

struct HttpStoreInner {
    client: Client,
    api_url: String,
}

/// JSON client for a `/vocabulary` collection.
///
/// Cheap to clone; all clones share one connection pool.
#[derive(Clone)]
pub struct HttpStore {
    inner: Arc<HttpStoreInner>,
}

impl HttpStore {
    pub fn new(config: &ClientConfig) -> Result<Self, StoreError> {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| StoreError::Network(e.to_string()))?;

        Ok(Self {
            inner: Arc::new(HttpStoreInner {
                client,
                api_url: config.api_url.trim_end_matches('/').to_string(),
            }),
        })
    }

    pub fn api_url(&self) -> &str {
        &self.inner.api_url
    }

    /// Check if the collection endpoint answers.
    pub async fn check_connectivity(&self) -> Result<bool, StoreError> {
        match self.inner.client.get(self.collection_url()).send().await {
            Ok(resp) => Ok(resp.status().is_success()),
            Err(e) => Err(network_error(e)),
        }
    }

    fn collection_url(&self) -> String {
        format!("{}/vocabulary", self.inner.api_url)
    }

    fn record_url(&self, id: &RecordId) -> Result<Url, StoreError> {
        let mut url = Url::parse(&self.collection_url())
            .map_err(|e| StoreError::InvalidUrl(e.to_string()))?;
        url.path_segments_mut()
            .map_err(|_| StoreError::InvalidUrl(self.inner.api_url.clone()))?
            .push(&id.to_string());
        Ok(url)
    }
}

#[async_trait]
impl VocabularyStore for HttpStore {
    async fn list_all(&self) -> Result<Vec<VocabularyRecord>, StoreError> {
        debug!("GET {}", self.collection_url());
        let resp = self
            .inner
            .client
            .get(self.collection_url())
            .send()
            .await
            .map_err(network_error)?;

        if !resp.status().is_success() {
            return Err(status_error(resp, None).await);
        }

        let raw: Vec<serde_json::Value> = resp
            .json()
            .await
            .map_err(|e| StoreError::Parse(e.to_string()))?;

        let total = raw.len();
        let records: Vec<VocabularyRecord> = raw
            .into_iter()
            .filter_map(|value| match serde_json::from_value(value) {
                Ok(record) => Some(record),
                Err(e) => {
                    warn!("skipping malformed vocabulary record: {}", e);
                    None
                }
            })
            .collect();

        info!(count = records.len(), skipped = total - records.len(), "listed vocabulary");
        Ok(records)
    }

    async fn create(&self, entry: &ParsedEntry) -> Result<VocabularyRecord, StoreError> {
        let resp = self
            .inner
            .client
            .post(self.collection_url())
            .json(entry)
            .send()
            .await
            .map_err(network_error)?;

        if !resp.status().is_success() {
            return Err(status_error(resp, None).await);
        }

        let record: VocabularyRecord = resp
            .json()
            .await
            .map_err(|e| StoreError::Parse(e.to_string()))?;

        info!(id = ?record.id, word = record.word(), "created vocabulary record");
        Ok(record)
    }

    async fn update(
        &self,
        id: &RecordId,
        entry: &ParsedEntry,
    ) -> Result<VocabularyRecord, StoreError> {
        let resp = self
            .inner
            .client
            .put(self.record_url(id)?)
            .json(entry)
            .send()
            .await
            .map_err(network_error)?;

        if !resp.status().is_success() {
            return Err(status_error(resp, Some(id)).await);
        }

        info!(%id, "updated vocabulary record");

        // Some stores answer 204 with no body.
        let body = resp
            .bytes()
            .await
            .map_err(|e| StoreError::Network(e.to_string()))?;
        if body.iter().all(u8::is_ascii_whitespace) {
            return VocabularyRecord::try_from(entry.clone())
                .map(|record| record.with_id(id.clone()))
                .map_err(|e| StoreError::Parse(e.to_string()));
        }

        serde_json::from_slice(&body).map_err(|e| StoreError::Parse(e.to_string()))
    }

    async fn delete(&self, id: &RecordId) -> Result<(), StoreError> {
        let resp = self
            .inner
            .client
            .delete(self.record_url(id)?)
            .send()
            .await
            .map_err(network_error)?;

        if !resp.status().is_success() {
            return Err(status_error(resp, Some(id)).await);
        }

        info!(%id, "deleted vocabulary record");
        Ok(())
    }
}

fn network_error(e: reqwest::Error) -> StoreError {
    if e.is_timeout() {
        StoreError::Network(format!("request timed out: {}", e))
    } else {
        StoreError::Network(e.to_string())
    }
}

async fn status_error(resp: Response, id: Option<&RecordId>) -> StoreError {
    let status = resp.status();
    let message = resp.text().await.unwrap_or_default();

    match (status, id) {
        (StatusCode::NOT_FOUND, Some(id)) => StoreError::NotFound(id.clone()),
        (StatusCode::BAD_REQUEST | StatusCode::UNPROCESSABLE_ENTITY, _) => StoreError::Rejected {
            status: status.as_u16(),
            message,
        },
        _ => StoreError::Backend {
            status: status.as_u16(),
            message,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::time::Duration;
    use wiremock::matchers::{body_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn store_for(server: &MockServer) -> HttpStore {
        let config = ClientConfig::default()
            .with_api_url(&format!("{}/api", server.uri()))
            .unwrap();
        HttpStore::new(&config).unwrap()
    }

    #[tokio::test]
    async fn list_all_returns_records() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/vocabulary"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
                {"id": 1, "word": "sun", "meaning": "mặt trời", "difficulty": "easy"},
                {"id": 2, "word": "cat", "meaning": "con mèo"}
            ])))
            .mount(&server)
            .await;

        let records = store_for(&server).list_all().await.unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].word(), "sun");
        assert_eq!(records[0].difficulty.as_deref(), Some("easy"));
        assert_eq!(records[1].id, Some(RecordId::Int(2)));
    }

    #[tokio::test]
    async fn list_all_skips_records_breaking_the_invariant() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/vocabulary"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
                {"id": 1, "word": "  ", "meaning": "blank word"},
                {"id": 2, "word": "cat", "meaning": "con mèo"},
                {"id": 3, "word": "no meaning"}
            ])))
            .mount(&server)
            .await;

        let records = store_for(&server).list_all().await.unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].word(), "cat");
    }

    #[tokio::test]
    async fn create_posts_entry_and_returns_assigned_id() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/vocabulary"))
            .and(body_json(serde_json::json!({"word": "sun", "meaning": "mặt trời"})))
            .respond_with(ResponseTemplate::new(201).set_body_json(serde_json::json!(
                {"id": "abc123", "word": "sun", "meaning": "mặt trời"}
            )))
            .expect(1)
            .mount(&server)
            .await;

        let record = store_for(&server)
            .create(&ParsedEntry::new("sun", "mặt trời"))
            .await
            .unwrap();
        assert_eq!(record.id, Some(RecordId::Text("abc123".into())));
        assert_eq!(record.meaning(), "mặt trời");
    }

    #[tokio::test]
    async fn create_rejected_by_validation() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/vocabulary"))
            .respond_with(ResponseTemplate::new(422).set_body_string("word too long"))
            .mount(&server)
            .await;

        let err = store_for(&server)
            .create(&ParsedEntry::new("x", "y"))
            .await
            .unwrap_err();
        assert!(matches!(err, StoreError::Rejected { status: 422, ref message } if message == "word too long"));
    }

    #[tokio::test]
    async fn update_puts_to_record_url() {
        let server = MockServer::start().await;
        Mock::given(method("PUT"))
            .and(path("/api/vocabulary/7"))
            .and(body_json(serde_json::json!({"word": "dog", "meaning": "con chó"})))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!(
                {"id": 7, "word": "dog", "meaning": "con chó", "category": "noun"}
            )))
            .mount(&server)
            .await;

        let record = store_for(&server)
            .update(&RecordId::Int(7), &ParsedEntry::new("dog", "con chó"))
            .await
            .unwrap();
        assert_eq!(record.word(), "dog");
        assert_eq!(record.category.as_deref(), Some("noun"));
    }

    #[tokio::test]
    async fn update_with_empty_body_echoes_entry() {
        let server = MockServer::start().await;
        Mock::given(method("PUT"))
            .and(path("/api/vocabulary/7"))
            .respond_with(ResponseTemplate::new(204))
            .mount(&server)
            .await;

        let record = store_for(&server)
            .update(&RecordId::Int(7), &ParsedEntry::new("dog", "chó"))
            .await
            .unwrap();
        assert_eq!(record.id, Some(RecordId::Int(7)));
        assert_eq!(record.meaning(), "chó");
    }

    #[tokio::test]
    async fn update_missing_record_is_not_found() {
        let server = MockServer::start().await;
        Mock::given(method("PUT"))
            .and(path("/api/vocabulary/99999"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;

        let err = store_for(&server)
            .update(&RecordId::Int(99999), &ParsedEntry::new("a", "b"))
            .await
            .unwrap_err();
        assert!(matches!(err, StoreError::NotFound(RecordId::Int(99999))));
    }

    #[tokio::test]
    async fn delete_encodes_text_ids() {
        let server = MockServer::start().await;
        Mock::given(method("DELETE"))
            .and(path("/api/vocabulary/a%20b"))
            .respond_with(ResponseTemplate::new(204))
            .expect(1)
            .mount(&server)
            .await;

        store_for(&server)
            .delete(&RecordId::Text("a b".into()))
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn delete_missing_record_is_not_found() {
        let server = MockServer::start().await;
        Mock::given(method("DELETE"))
            .and(path("/api/vocabulary/5"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;

        let err = store_for(&server)
            .delete(&RecordId::Int(5))
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "Vocabulary record 5 not found");
    }

    #[tokio::test]
    async fn server_error_is_passed_through() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/vocabulary"))
            .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
            .mount(&server)
            .await;

        let err = store_for(&server).list_all().await.unwrap_err();
        assert!(matches!(err, StoreError::Backend { status: 500, ref message } if message == "boom"));
    }

    #[tokio::test]
    async fn malformed_json_is_a_parse_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/vocabulary"))
            .respond_with(ResponseTemplate::new(200).set_body_string("{not json"))
            .mount(&server)
            .await;

        let err = store_for(&server).list_all().await.unwrap_err();
        assert!(matches!(err, StoreError::Parse(_)));
    }

    #[tokio::test]
    async fn unreachable_server_is_a_network_error() {
        let config = ClientConfig {
            api_url: "http://127.0.0.1:9/api".into(),
            timeout: Duration::from_secs(2),
        };
        let store = HttpStore::new(&config).unwrap();
        let err = store.list_all().await.unwrap_err();
        assert!(matches!(err, StoreError::Network(_)));
    }

    #[tokio::test]
    async fn slow_server_times_out() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/vocabulary"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(serde_json::json!([]))
                    .set_delay(Duration::from_secs(3)),
            )
            .mount(&server)
            .await;

        let config = ClientConfig {
            api_url: format!("{}/api", server.uri()),
            timeout: Duration::from_millis(200),
        };
        let err = HttpStore::new(&config).unwrap().list_all().await.unwrap_err();
        assert!(matches!(err, StoreError::Network(ref msg) if msg.contains("timed out")));
    }

    #[tokio::test]
    async fn connectivity_check() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/vocabulary"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([])))
            .mount(&server)
            .await;

        assert!(store_for(&server).check_connectivity().await.unwrap());
    }
}

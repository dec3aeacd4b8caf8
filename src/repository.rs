//! Employee record repository
//!
//! Fetches a JSON array of records from a single HTTP endpoint and returns
//! it ordered by each record's numeric `id`. Every failure along the way
//! collapses into `None`: the caller gets either the sorted list or nothing.
//!
//! # Ordering
//!
//! Records are sorted ascending by `id` with a stable sort. A record without
//! a numeric `id` is keyed as positive infinity, so it sorts after every
//! numbered record and keeps its position relative to other unnumbered ones.

use anyhow::{Context, Result};
use async_trait::async_trait;
use log::{debug, warn};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::cmp::Ordering;
use std::time::Duration;

use crate::config::RepositoryConfig;
use crate::traits::RecordSource;

/// Request timeout used unless overridden (seconds)
pub const DEFAULT_TIMEOUT_SECS: u64 = 5;

/// Field used as the sort key
const ID_FIELD: &str = "id";

/// A single record returned by the endpoint
///
/// An open-ended JSON object. Only `id` is interpreted; every other
/// field passes through untouched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Record(Map<String, Value>);

impl Record {
    /// Wraps a JSON object as a record
    pub fn new(fields: Map<String, Value>) -> Self {
        Self(fields)
    }

    /// The raw `id` value, if present
    pub fn id(&self) -> Option<&Value> {
        self.0.get(ID_FIELD)
    }

    /// Looks up any field by name
    pub fn get(&self, field: &str) -> Option<&Value> {
        self.0.get(field)
    }

    /// Returns the underlying JSON object
    pub fn into_inner(self) -> Map<String, Value> {
        self.0
    }

    /// Sort key derived from `id`; absent or non-numeric ids yield [`SortKey::Missing`]
    pub fn sort_key(&self) -> SortKey {
        match self.id() {
            Some(Value::Number(n)) => {
                if let Some(i) = n.as_i64() {
                    SortKey::Int(i128::from(i))
                } else if let Some(u) = n.as_u64() {
                    SortKey::Int(i128::from(u))
                } else {
                    n.as_f64().map_or(SortKey::Missing, SortKey::Float)
                }
            }
            _ => SortKey::Missing,
        }
    }
}

/// Ordering key for a record's `id`
///
/// Integers compare exactly, whatever their magnitude. Floats compare with
/// `f64::total_cmp`, and a float against an integer compares as `f64`.
/// `Missing` behaves as positive infinity: it sorts after every number.
#[derive(Debug, Clone, Copy)]
pub enum SortKey {
    Int(i128),
    Float(f64),
    Missing,
}

impl Ord for SortKey {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self, other) {
            (SortKey::Int(a), SortKey::Int(b)) => a.cmp(b),
            (SortKey::Int(a), SortKey::Float(b)) => (*a as f64).total_cmp(b),
            (SortKey::Float(a), SortKey::Int(b)) => a.total_cmp(&(*b as f64)),
            (SortKey::Float(a), SortKey::Float(b)) => a.total_cmp(b),
            (SortKey::Missing, SortKey::Missing) => Ordering::Equal,
            (SortKey::Missing, _) => Ordering::Greater,
            (_, SortKey::Missing) => Ordering::Less,
        }
    }
}

impl PartialOrd for SortKey {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for SortKey {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for SortKey {}

/// Sorts records ascending by [`Record::sort_key`], preserving input order on ties
pub fn sort_records(mut records: Vec<Record>) -> Vec<Record> {
    records.sort_by_key(Record::sort_key);
    records
}

/// Client for the employee records endpoint
///
/// Holds the endpoint URL and an HTTP client configured with the request
/// timeout. Holds no other state between calls.
pub struct RecordRepository {
    /// HTTP client for making requests
    client: Client,
    /// Endpoint returning the JSON record array
    url: String,
    /// Whole-request timeout the client was built with
    timeout: Duration,
}

impl RecordRepository {
    /// Creates a repository with the default 5 second timeout
    ///
    /// # Errors
    /// Returns an error if the HTTP client cannot be built.
    pub fn new(url: impl Into<String>) -> Result<Self> {
        Self::with_timeout(url, Duration::from_secs(DEFAULT_TIMEOUT_SECS))
    }

    /// Creates a repository with a custom request timeout
    ///
    /// The timeout covers the whole request, from connecting to reading
    /// the body.
    ///
    /// # Errors
    /// Returns an error if the HTTP client cannot be built.
    pub fn with_timeout(url: impl Into<String>, timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .danger_accept_invalid_certs(false)
            .use_rustls_tls()
            .timeout(timeout)
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self {
            client,
            url: url.into(),
            timeout,
        })
    }

    /// Creates a repository from loaded configuration
    ///
    /// # Errors
    /// Returns an error if no endpoint is configured or the client cannot be built.
    pub fn from_config(config: &RepositoryConfig) -> Result<Self> {
        let url = config
            .endpoint
            .clone()
            .context("No endpoint configured")?;
        Self::with_timeout(url, config.timeout())
    }

    /// The endpoint this repository fetches from
    pub fn url(&self) -> &str {
        &self.url
    }

    /// The request timeout applied to each fetch
    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Fetches the records and returns them sorted by `id`
    ///
    /// Performs exactly one GET request. No retries.
    ///
    /// # Returns
    /// - `Some(records)` sorted ascending by `id`
    /// - `None` on a transport error or timeout, a non-success status,
    ///   a body that is not JSON, or JSON that is not an array of objects
    pub async fn fetch_sorted(&self) -> Option<Vec<Record>> {
        match self.fetch_records().await {
            Ok(records) => {
                debug!("Fetched {} records from {}", records.len(), self.url);
                Some(sort_records(records))
            }
            Err(e) => {
                warn!("Fetching records from {} failed: {:#}", self.url, e);
                None
            }
        }
    }

    async fn fetch_records(&self) -> Result<Vec<Record>> {
        let response = self
            .client
            .get(&self.url)
            .send()
            .await
            .context("Request failed")?;

        let status = response.status();
        if !status.is_success() {
            return Err(anyhow::anyhow!("Endpoint returned HTTP {}", status));
        }

        let body = response.text().await.context("Failed to read body")?;
        let parsed: Value = serde_json::from_str(&body).context("Body is not valid JSON")?;

        parse_records(parsed)
    }
}

/// Checks the top-level shape and converts it into records
fn parse_records(value: Value) -> Result<Vec<Record>> {
    let Value::Array(items) = value else {
        return Err(anyhow::anyhow!("Expected a JSON array at the top level"));
    };

    items
        .into_iter()
        .enumerate()
        .map(|(index, item)| match item {
            Value::Object(fields) => Ok(Record(fields)),
            _ => Err(anyhow::anyhow!("Element {} is not a JSON object", index)),
        })
        .collect()
}

#[async_trait]
impl RecordSource for RecordRepository {
    async fn fetch_sorted(&self) -> Option<Vec<Record>> {
        self.fetch_sorted().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn record(value: Value) -> Record {
        match value {
            Value::Object(fields) => Record::new(fields),
            other => panic!("not an object: {}", other),
        }
    }

    fn ids(records: &[Record]) -> Vec<Option<Value>> {
        records.iter().map(|r| r.id().cloned()).collect()
    }

    #[test]
    fn test_sort_by_id() {
        let sorted = sort_records(vec![
            record(json!({"id": 3, "name": "Alice"})),
            record(json!({"id": 1, "name": "Bob"})),
            record(json!({"id": 2, "name": "Charlie"})),
        ]);
        assert_eq!(ids(&sorted), vec![Some(json!(1)), Some(json!(2)), Some(json!(3))]);
        assert_eq!(sorted[0].get("name"), Some(&json!("Bob")));
    }

    #[test]
    fn test_missing_id_sorts_last_in_input_order() {
        let sorted = sort_records(vec![
            record(json!({"name": "first"})),
            record(json!({"id": 7})),
            record(json!({"name": "second"})),
            record(json!({"id": -1})),
        ]);
        assert_eq!(sorted[0].id(), Some(&json!(-1)));
        assert_eq!(sorted[1].id(), Some(&json!(7)));
        assert_eq!(sorted[2].get("name"), Some(&json!("first")));
        assert_eq!(sorted[3].get("name"), Some(&json!("second")));
    }

    #[test]
    fn test_equal_ids_keep_input_order() {
        let sorted = sort_records(vec![
            record(json!({"id": 2, "tag": "a"})),
            record(json!({"id": 1})),
            record(json!({"id": 2, "tag": "b"})),
        ]);
        assert_eq!(sorted[1].get("tag"), Some(&json!("a")));
        assert_eq!(sorted[2].get("tag"), Some(&json!("b")));
    }

    #[test]
    fn test_large_integer_ids_compare_exactly() {
        let sorted = sort_records(vec![
            record(json!({"id": 9007199254740993_u64, "n": "big"})),
            record(json!({"id": 9007199254740992_u64, "n": "small"})),
            record(json!({"id": u64::MAX, "n": "max"})),
            record(json!({"id": i64::MIN, "n": "min"})),
        ]);
        let order: Vec<_> = sorted.iter().map(|r| r.get("n").cloned()).collect();
        assert_eq!(
            order,
            vec![
                Some(json!("min")),
                Some(json!("small")),
                Some(json!("big")),
                Some(json!("max"))
            ]
        );
    }

    #[test]
    fn test_mixed_integer_and_float_ids() {
        let sorted = sort_records(vec![
            record(json!({"id": 2})),
            record(json!({"id": 1.5})),
            record(json!({"id": 1})),
        ]);
        assert_eq!(
            ids(&sorted),
            vec![Some(json!(1)), Some(json!(1.5)), Some(json!(2))]
        );
    }

    #[test]
    fn test_non_numeric_id_keyed_as_missing() {
        assert_eq!(record(json!({"id": "12"})).sort_key(), SortKey::Missing);
        assert_eq!(record(json!({"id": null})).sort_key(), SortKey::Missing);
        assert_eq!(record(json!({"name": "x"})).sort_key(), SortKey::Missing);
        assert_eq!(record(json!({"id": 1.5})).sort_key(), SortKey::Float(1.5));
        assert!(SortKey::Int(i128::from(i64::MAX)) < SortKey::Missing);
        assert!(SortKey::Float(f64::INFINITY) < SortKey::Missing);
    }

    #[test]
    fn test_default_timeout_is_five_seconds() {
        let repo = RecordRepository::new("http://localhost/employees").unwrap();
        assert_eq!(repo.timeout(), Duration::from_secs(5));

        let repo =
            RecordRepository::with_timeout("http://localhost/employees", Duration::from_secs(9))
                .unwrap();
        assert_eq!(repo.timeout(), Duration::from_secs(9));
    }

    #[test]
    fn test_parse_records_shape() {
        assert!(parse_records(json!({"id": 1})).is_err());
        assert!(parse_records(json!([{"id": 1}, 2])).is_err());
        assert_eq!(parse_records(json!([])).unwrap(), Vec::<Record>::new());
        assert_eq!(parse_records(json!([{"id": 1}])).unwrap().len(), 1);
    }

    #[test]
    fn test_from_config_requires_endpoint() {
        let config = RepositoryConfig::default();
        assert!(RecordRepository::from_config(&config).is_err());

        let config = RepositoryConfig {
            endpoint: Some("http://localhost/employees".to_string()),
            ..RepositoryConfig::default()
        };
        let repo = RecordRepository::from_config(&config).unwrap();
        assert_eq!(repo.url(), "http://localhost/employees");
    }
}

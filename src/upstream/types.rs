//! Upstream endpoint descriptors and error definitions.

use reqwest::StatusCode;
use thiserror::Error;
use url::form_urlencoded;

/// Optional search criteria taken from the inbound query string.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchFilter {
    pub title: Option<String>,
    pub author: Option<String>,
    pub genre: Option<String>,
}

impl SearchFilter {
    /// Parse an inbound query string (without the leading `?`).
    ///
    /// Values are percent-decoded. A repeated key keeps every value, joined
    /// with `,`. Unknown keys are ignored.
    pub fn from_query(query: Option<&str>) -> Self {
        let mut filter = Self::default();
        let Some(query) = query else {
            return filter;
        };

        for (key, value) in form_urlencoded::parse(query.as_bytes()) {
            let slot = match key.as_ref() {
                "title" => &mut filter.title,
                "author" => &mut filter.author,
                "genre" => &mut filter.genre,
                _ => continue,
            };
            let joined = match slot.take() {
                Some(mut existing) => {
                    existing.push(',');
                    existing.push_str(&value);
                    existing
                }
                None => value.into_owned(),
            };
            *slot = Some(joined);
        }
        filter
    }

    /// Render the filter as a query string.
    ///
    /// Only present, non-empty fields are emitted, in the order title, author,
    /// genre. Values are inserted verbatim. Returns `None` when nothing is set.
    pub fn query_string(&self) -> Option<String> {
        let pairs: Vec<String> = [
            ("title", &self.title),
            ("author", &self.author),
            ("genre", &self.genre),
        ]
        .into_iter()
        .filter_map(|(key, value)| match value.as_deref() {
            Some(v) if !v.is_empty() => Some(format!("{}={}", key, v)),
            _ => None,
        })
        .collect();

        if pairs.is_empty() {
            None
        } else {
            Some(pairs.join("&"))
        }
    }
}

/// One upstream operation and its path/query parameters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Endpoint {
    GetAll,
    GetById(i64),
    Create,
    Update(i64),
    Delete(i64),
    Search(SearchFilter),
}

impl Endpoint {
    /// Path suffix appended to the base URL.
    pub fn path(&self) -> String {
        match self {
            Endpoint::GetAll => "/getAll".to_string(),
            Endpoint::GetById(id) => format!("/getById/{}", id),
            Endpoint::Create => "/create".to_string(),
            Endpoint::Update(id) => format!("/update/{}", id),
            Endpoint::Delete(id) => format!("/delete/{}", id),
            Endpoint::Search(filter) => match filter.query_string() {
                Some(query) => format!("/search?{}", query),
                None => "/search".to_string(),
            },
        }
    }

    /// Full outbound URL for this endpoint.
    pub fn url(&self, base_url: &str) -> String {
        format!("{}{}", base_url, self.path())
    }

    /// Short operation name used in logs and metric labels.
    pub fn operation(&self) -> &'static str {
        match self {
            Endpoint::GetAll => "get_all",
            Endpoint::GetById(_) => "get_by_id",
            Endpoint::Create => "create",
            Endpoint::Update(_) => "update",
            Endpoint::Delete(_) => "delete",
            Endpoint::Search(_) => "search",
        }
    }
}

/// The upstream call failed.
///
/// Handlers treat every variant the same way; the split only shapes the message.
#[derive(Debug, Error)]
pub enum UpstreamError {
    /// Connection, timeout or body read failure.
    #[error("{0}")]
    Request(#[from] reqwest::Error),

    /// Upstream answered with a non-success status.
    #[error("{status}: {body}")]
    Status { status: StatusCode, body: String },
}

/// Result type for upstream calls.
pub type UpstreamResult<T> = Result<T, UpstreamError>;

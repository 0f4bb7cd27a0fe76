//! REST API extractor
//!
//! Extracts JSON records from an API-key protected REST endpoint via
//! `GET <endpoint>?select=*`

use crate::client::HttpClient;
use crate::error::Result;
use crate::etl::Extractor;
use crate::table::{InferenceOptions, Table};
use url::Url;

/// Extractor for a REST endpoint returning a JSON array of records
///
/// Sends the key as both an `apikey` header and a bearer token.
pub struct RestTableExtractor {
    client: HttpClient,
    url: Url,
    api_key: String,
    options: InferenceOptions,
}

impl RestTableExtractor {
    pub fn new(client: HttpClient, url: Url, api_key: impl Into<String>) -> Self {
        Self {
            client,
            url,
            api_key: api_key.into(),
            options: InferenceOptions::default(),
        }
    }

    /// Override the inference options (identifier columns)
    pub fn with_options(mut self, options: InferenceOptions) -> Self {
        self.options = options;
        self
    }
}

impl Extractor for RestTableExtractor {
    fn name(&self) -> &str {
        self.url.as_str()
    }

    async fn extract(&self) -> Result<Table> {
        log::debug!("Fetching records from {}", self.url);
        self.client
            .fetch_json_api(&self.url, &self.api_key, &self.options)
            .await
    }
}

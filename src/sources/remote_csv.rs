//! CSV-over-HTTP extractor

use crate::client::HttpClient;
use crate::error::Result;
use crate::etl::Extractor;
use crate::table::{InferenceOptions, Table};
use url::Url;

/// Extractor for a CSV file served over HTTP(S)
///
/// # Example
/// ```no_run
/// use behavioural_finance_datasets::client::{ClientOptions, HttpClient};
/// use behavioural_finance_datasets::etl::Extractor;
/// use behavioural_finance_datasets::sources::RemoteCsvExtractor;
/// use url::Url;
///
/// # async fn example() -> eyre::Result<()> {
/// let client = HttpClient::try_new(&ClientOptions::default())?;
/// let url = Url::parse("https://example.com/personality.csv")?;
/// let table = RemoteCsvExtractor::new(client, url).extract().await?;
/// # Ok(())
/// # }
/// ```
pub struct RemoteCsvExtractor {
    client: HttpClient,
    url: Url,
    options: InferenceOptions,
}

impl RemoteCsvExtractor {
    pub fn new(client: HttpClient, url: Url) -> Self {
        Self {
            client,
            url,
            options: InferenceOptions::default(),
        }
    }

    /// Override the inference options (identifier columns)
    pub fn with_options(mut self, options: InferenceOptions) -> Self {
        self.options = options;
        self
    }
}

impl Extractor for RemoteCsvExtractor {
    fn name(&self) -> &str {
        self.url.as_str()
    }

    async fn extract(&self) -> Result<Table> {
        log::debug!("Downloading CSV from {}", self.url);
        self.client.fetch_csv(&self.url, &self.options).await
    }
}

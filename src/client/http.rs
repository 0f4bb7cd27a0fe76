//! HTTP client module
//!
//! Provides `HttpClient` for downloading remote tables: a CSV file served over
//! plain HTTP(S) and a JSON record set behind an API-key protected REST
//! endpoint.

use super::Auth;
use crate::error::{FetchError, Result};
use crate::table::{InferenceOptions, Table, csv::read_csv, json::read_json_records};
use reqwest::Client;
use std::time::Duration;
use url::Url;

/// Request timeout applied to every download.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Settings for building an [`HttpClient`].
#[derive(Debug, Clone)]
pub struct ClientOptions {
    /// Total time allowed for a request, body included
    pub timeout: Duration,
    /// Honour `HTTP_PROXY`/`HTTPS_PROXY` from the environment
    pub system_proxy: bool,
}

impl Default for ClientOptions {
    fn default() -> Self {
        Self {
            timeout: DEFAULT_TIMEOUT,
            system_proxy: true,
        }
    }
}

/// HTTP client for downloading remote tables.
///
/// # Example
/// ```no_run
/// use behavioural_finance_datasets::client::{ClientOptions, HttpClient};
/// use behavioural_finance_datasets::table::InferenceOptions;
/// use url::Url;
///
/// # async fn example() -> eyre::Result<()> {
/// let client = HttpClient::try_new(&ClientOptions::default())?;
/// let url = Url::parse("https://example.com/personality.csv")?;
/// let table = client.fetch_csv(&url, &InferenceOptions::default()).await?;
/// println!("{} rows", table.num_rows());
/// # Ok(())
/// # }
/// ```
#[derive(Clone, Debug)]
pub struct HttpClient {
    client: Client,
    timeout: Duration,
}

impl HttpClient {
    /// Create a new client.
    ///
    /// # Errors
    /// Returns an error if the underlying HTTP client cannot be built
    pub fn try_new(options: &ClientOptions) -> std::result::Result<Self, FetchError> {
        let mut builder = Client::builder().timeout(options.timeout);
        if !options.system_proxy {
            builder = builder.no_proxy();
        }
        let client = builder.build().map_err(FetchError::Client)?;
        Ok(Self {
            client,
            timeout: options.timeout,
        })
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// GET a URL and return the body of a 2xx response.
    ///
    /// # Errors
    /// Returns [`FetchError::Timeout`] when the timeout elapses,
    /// [`FetchError::Status`] on a non-2xx status and [`FetchError::Request`]
    /// for any other transport failure
    pub async fn get(&self, url: &Url, auth: &Auth) -> std::result::Result<Vec<u8>, FetchError> {
        log::debug!("GET {} (auth: {})", url, auth);

        let response = self
            .client
            .get(url.clone())
            .headers(auth.headers()?)
            .send()
            .await
            .map_err(|e| self.request_error(url, e))?;

        let status = response.status();
        log::debug!("{} responded {}", url, status);
        if !status.is_success() {
            return Err(FetchError::Status {
                url: url.to_string(),
                status,
            });
        }

        let body = response
            .bytes()
            .await
            .map_err(|e| self.request_error(url, e))?;
        log::trace!("Received {} bytes from {}", body.len(), url);
        Ok(body.to_vec())
    }

    fn request_error(&self, url: &Url, source: reqwest::Error) -> FetchError {
        if source.is_timeout() {
            FetchError::Timeout {
                url: url.to_string(),
                timeout: self.timeout,
            }
        } else {
            FetchError::Request {
                url: url.to_string(),
                source,
            }
        }
    }

    /// Download a CSV file with a header row and parse it into a table.
    ///
    /// # Errors
    /// Returns a fetch error if the download fails and a parse error if the
    /// body is not well-formed CSV
    pub async fn fetch_csv(&self, url: &Url, options: &InferenceOptions) -> Result<Table> {
        let body = self.get(url, &Auth::None).await?;
        let table = read_csv(body.as_slice(), url.as_str(), options)?;
        Ok(table)
    }

    /// Download a JSON array of records from an API-key protected REST
    /// endpoint and parse it into a table.
    ///
    /// `select=*` is added to the query unless a `select` parameter is
    /// already present.
    ///
    /// # Errors
    /// Returns a fetch error if the download fails and a parse error if the
    /// body is not a JSON array of objects
    pub async fn fetch_json_api(
        &self,
        url: &Url,
        api_key: &str,
        options: &InferenceOptions,
    ) -> Result<Table> {
        let url = with_select_all(url);
        let body = self.get(&url, &Auth::Apikey(api_key.to_string())).await?;
        let table = read_json_records(&body, url.as_str(), options)?;
        Ok(table)
    }
}

/// Return `url` with `select=*` appended unless it already selects columns.
pub fn with_select_all(url: &Url) -> Url {
    if url.query_pairs().any(|(key, _)| key == "select") {
        return url.clone();
    }
    let mut url = url.clone();
    url.query_pairs_mut().append_pair("select", "*");
    url
}

impl std::fmt::Display for HttpClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "HttpClient (timeout: {}s)", self.timeout.as_secs_f64())
    }
}

use crate::error::FetchError;
use reqwest::header::{ACCEPT, AUTHORIZATION, HeaderMap, HeaderName, HeaderValue};

/// Authentication attached to a single request.
#[derive(Clone)]
pub enum Auth {
    /// REST gateway key, sent both as an `apikey` header and as a bearer token
    Apikey(String),
    /// Don't use any authentication
    None,
}

impl Auth {
    /// Headers for this scheme. API key requests also ask for JSON.
    pub fn headers(&self) -> Result<HeaderMap, FetchError> {
        let mut headers = HeaderMap::new();
        if let Self::Apikey(key) = self {
            let apikey =
                HeaderValue::from_str(key).map_err(|_| FetchError::InvalidApiKey)?;
            let bearer = HeaderValue::from_str(&format!("Bearer {}", key))
                .map_err(|_| FetchError::InvalidApiKey)?;
            headers.insert(HeaderName::from_static("apikey"), apikey);
            headers.insert(AUTHORIZATION, bearer);
            headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        }
        Ok(headers)
    }
}

impl std::fmt::Display for Auth {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Apikey(_) => write!(f, "Apikey"),
            Self::None => write!(f, "None"),
        }
    }
}

// Keeps the key out of debug logs.
impl std::fmt::Debug for Auth {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Apikey(_) => f.write_str("Apikey(***)"),
            Self::None => f.write_str("None"),
        }
    }
}

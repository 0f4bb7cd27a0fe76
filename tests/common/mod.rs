//! Minimal HTTP stub for integration tests
//!
//! Serves canned responses by path on a random local port and records the
//! head of every request it receives.

#![allow(dead_code)]

use behavioural_finance_datasets::client::{ClientOptions, HttpClient};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};
use url::Url;

#[derive(Clone)]
pub struct Route {
    pub status: u16,
    pub content_type: &'static str,
    pub body: String,
    pub delay: Option<Duration>,
}

impl Route {
    pub fn csv(body: &str) -> Self {
        Self {
            status: 200,
            content_type: "text/csv",
            body: body.to_string(),
            delay: None,
        }
    }

    pub fn json(body: &str) -> Self {
        Self {
            status: 200,
            content_type: "application/json",
            body: body.to_string(),
            delay: None,
        }
    }

    pub fn status(status: u16, body: &str) -> Self {
        Self {
            status,
            content_type: "application/json",
            body: body.to_string(),
            delay: None,
        }
    }

    pub fn delayed(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }
}

pub struct StubServer {
    base: Url,
    requests: Arc<Mutex<Vec<String>>>,
}

impl StubServer {
    /// Bind to a random port and serve `routes` until the runtime shuts down
    pub async fn start(routes: Vec<(&str, Route)>) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let routes: Arc<HashMap<String, Route>> = Arc::new(
            routes
                .into_iter()
                .map(|(path, route)| (path.to_string(), route))
                .collect(),
        );
        let requests = Arc::new(Mutex::new(Vec::new()));

        let recorded = requests.clone();
        tokio::spawn(async move {
            loop {
                let Ok((stream, _)) = listener.accept().await else {
                    break;
                };
                tokio::spawn(handle(stream, routes.clone(), recorded.clone()));
            }
        });

        Self {
            base: Url::parse(&format!("http://{}", addr)).unwrap(),
            requests,
        }
    }

    pub fn url(&self, path: &str) -> Url {
        self.base.join(path).unwrap()
    }

    /// Request heads received so far, lowercased
    pub fn requests(&self) -> Vec<String> {
        self.requests.lock().unwrap().clone()
    }
}

async fn handle(
    mut stream: TcpStream,
    routes: Arc<HashMap<String, Route>>,
    requests: Arc<Mutex<Vec<String>>>,
) {
    let mut head = Vec::new();
    let mut buf = [0u8; 1024];
    while !head.windows(4).any(|w| w == b"\r\n\r\n") {
        match stream.read(&mut buf).await {
            Ok(0) | Err(_) => return,
            Ok(n) => head.extend_from_slice(&buf[..n]),
        }
    }
    let head = String::from_utf8_lossy(&head).to_string();
    requests.lock().unwrap().push(head.to_lowercase());

    let path = head
        .split_whitespace()
        .nth(1)
        .unwrap_or("/")
        .split('?')
        .next()
        .unwrap_or("/")
        .to_string();
    let route = routes
        .get(&path)
        .cloned()
        .unwrap_or_else(|| Route::status(404, "{}"));

    if let Some(delay) = route.delay {
        tokio::time::sleep(delay).await;
    }

    let response = format!(
        "HTTP/1.1 {} Stub\r\nContent-Type: {}\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
        route.status,
        route.content_type,
        route.body.len(),
        route.body
    );
    let _ = stream.write_all(response.as_bytes()).await;
    let _ = stream.shutdown().await;
}

/// Client that never goes through a system proxy
pub fn client(timeout: Duration) -> HttpClient {
    HttpClient::try_new(&ClientOptions {
        timeout,
        system_proxy: false,
    })
    .unwrap()
}

pub const PERSONALITY_CSV: &str = "\
_id,confidence,risk_tolerance,composure
1,0.4,0.6,0.5
2,0.9,0.3,0.7
3,0.1,0.8,0.2
";

pub const ASSETS_JSON: &str = r#"[
  {"_id": "1", "asset_allocation_id": "10", "asset_value": 120.5, "asset_currency": "GBP", "asset_allocation": "Stocks", "created": "2025-05-21T10:00:00+00:00"},
  {"_id": "1", "asset_allocation_id": "11", "asset_value": 30, "asset_currency": "GBP", "asset_allocation": "Bonds", "created": "2025-05-21T11:00:00+00:00"},
  {"_id": "2", "asset_allocation_id": "12", "asset_value": 140, "asset_currency": "GBP", "asset_allocation": "Cash", "created": "2025-05-22T09:00:00+00:00"},
  {"_id": "2", "asset_allocation_id": "13", "asset_value": 900, "asset_currency": "USD", "asset_allocation": "Stocks", "created": "2025-05-22T09:30:00+00:00"},
  {"_id": "4", "asset_allocation_id": "14", "asset_value": 75, "asset_currency": "EUR", "asset_allocation": "Crypto", "created": "2025-05-23T12:00:00+00:00"}
]"#;

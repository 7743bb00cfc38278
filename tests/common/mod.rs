//! Shared utilities for integration testing against a local HTTP backend.

use std::future::Future;
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use mozillians::ClientConfig;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tokio::net::TcpListener;

/// A request as seen by the mock backend.
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub method: String,
    /// Path plus query string, as sent on the request line.
    pub target: String,
    /// Header names are lowercased.
    pub headers: Vec<(String, String)>,
}

#[allow(dead_code)]
impl RecordedRequest {
    pub fn header(&self, name: &str) -> Option<&str> {
        let name = name.to_ascii_lowercase();
        self.headers
            .iter()
            .find(|(k, _)| *k == name)
            .map(|(_, v)| v.as_str())
    }

    pub fn path(&self) -> &str {
        self.target.split('?').next().unwrap_or_default()
    }

    pub fn query_pairs(&self) -> Vec<(String, String)> {
        let url = url::Url::parse(&format!("http://localhost{}", self.target)).unwrap();
        url.query_pairs()
            .map(|(k, v)| (k.into_owned(), v.into_owned()))
            .collect()
    }

    pub fn query(&self, key: &str) -> Option<String> {
        self.query_pairs()
            .into_iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v)
    }
}

/// Status, extra headers and body the mock backend answers with.
#[derive(Debug, Clone)]
pub struct MockResponse {
    pub status: u16,
    pub headers: Vec<(String, String)>,
    pub body: String,
}

#[allow(dead_code)]
impl MockResponse {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            headers: Vec::new(),
            body: body.into(),
        }
    }

    pub fn header(mut self, name: &str, value: impl Into<String>) -> Self {
        self.headers.push((name.to_string(), value.into()));
        self
    }
}

/// Handle to a running mock backend.
pub struct MockBackend {
    pub addr: SocketAddr,
    requests: Arc<Mutex<Vec<RecordedRequest>>>,
}

#[allow(dead_code)]
impl MockBackend {
    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.requests.lock().unwrap().clone()
    }

    pub fn url(&self, path: &str) -> String {
        format!("http://{}{}", self.addr, path)
    }

    /// Client config pointed at this backend with fast retries.
    pub fn config(&self) -> ClientConfig {
        ClientConfig {
            scheme: "http".to_string(),
            hostname: self.addr.to_string(),
            timeout_ms: 2_000,
            retries: 2,
            delay_factor_ms: 1,
            max_delay_ms: 10,
            agent: Some(mozillians::http::client_builder().no_proxy().build().unwrap()),
            ..Default::default()
        }
    }
}

/// Start a programmable mock backend on a random port. `f` receives each
/// request (already recorded) and returns the status and body to send.
pub async fn start_programmable_backend<F, Fut>(f: F) -> MockBackend
where
    F: Fn(RecordedRequest) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = (u16, String)> + Send + 'static,
{
    start_responding_backend(move |req| {
        let reply = f(req);
        async move {
            let (status, body) = reply.await;
            MockResponse::new(status, body)
        }
    })
    .await
}

/// Like [`start_programmable_backend`], with control over response headers.
pub async fn start_responding_backend<F, Fut>(f: F) -> MockBackend
where
    F: Fn(RecordedRequest) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = MockResponse> + Send + 'static,
{
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let requests = Arc::new(Mutex::new(Vec::new()));
    let f = Arc::new(f);

    let recorded = requests.clone();
    tokio::spawn(async move {
        loop {
            match listener.accept().await {
                Ok((mut socket, _)) => {
                    let f = f.clone();
                    let recorded = recorded.clone();
                    tokio::spawn(async move {
                        let Some(request) = read_request(&mut socket).await else {
                            return;
                        };
                        recorded.lock().unwrap().push(request.clone());

                        let response = f(request).await;
                        let extra_headers: String = response
                            .headers
                            .iter()
                            .map(|(name, value)| format!("{}: {}\r\n", name, value))
                            .collect();

                        let response_str = format!(
                            "HTTP/1.1 {} {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\n{}Connection: close\r\n\r\n{}",
                            response.status,
                            reason_phrase(response.status),
                            response.body.len(),
                            extra_headers,
                            response.body
                        );
                        let _ = socket.write_all(response_str.as_bytes()).await;
                        let _ = socket.shutdown().await;
                        tokio::time::sleep(Duration::from_millis(10)).await;
                    });
                }
                Err(_) => break,
            }
        }
    });

    MockBackend { addr, requests }
}

fn reason_phrase(status: u16) -> &'static str {
    match status {
        200 => "OK",
        302 => "Found",
        403 => "Forbidden",
        404 => "Not Found",
        429 => "Too Many Requests",
        500 => "Internal Server Error",
        503 => "Service Unavailable",
        _ => "Status",
    }
}

async fn read_request(socket: &mut tokio::net::TcpStream) -> Option<RecordedRequest> {
    let mut reader = BufReader::new(socket);

    let mut request_line = String::new();
    reader.read_line(&mut request_line).await.ok()?;
    let mut parts = request_line.split_whitespace();
    let method = parts.next()?.to_string();
    let target = parts.next()?.to_string();

    let mut headers = Vec::new();
    loop {
        let mut line = String::new();
        if reader.read_line(&mut line).await.ok()? == 0 {
            break;
        }
        let line = line.trim_end();
        if line.is_empty() {
            break;
        }
        if let Some((name, value)) = line.split_once(':') {
            headers.push((name.trim().to_ascii_lowercase(), value.trim().to_string()));
        }
    }

    Some(RecordedRequest {
        method,
        target,
        headers,
    })
}

//! Outbound fetch.
//!
//! One GET per inbound POST. The client never keeps idle connections, so
//! each fetch opens its own connection and releases it when the response
//! is dropped, on success and error paths alike.

use std::time::{Duration, Instant};

use reqwest::header::USER_AGENT;
use reqwest::Client;
use url::Url;

use crate::config::UpstreamConfig;
use crate::observability::metrics;
use crate::relay::error::RelayError;

/// HTTP client wrapper that performs relay fetches.
#[derive(Debug, Clone)]
pub struct Fetcher {
    client: Client,
    user_agent: String,
}

impl Fetcher {
    /// Build a fetcher from the upstream configuration.
    pub fn new(config: &UpstreamConfig) -> Result<Self, reqwest::Error> {
        let mut builder = Client::builder().pool_max_idle_per_host(0);
        if let Some(secs) = config.timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }

        Ok(Self {
            client: builder.build()?,
            user_agent: config.user_agent.clone(),
        })
    }

    /// GET `url` and return its body decoded strictly as UTF-8.
    ///
    /// Upstream 4xx/5xx responses are errors. Redirects follow the client's
    /// default policy.
    pub async fn fetch(&self, url: &Url) -> Result<String, RelayError> {
        let start = Instant::now();
        let result = self.fetch_inner(url).await;
        metrics::record_upstream(start);
        result
    }

    async fn fetch_inner(&self, url: &Url) -> Result<String, RelayError> {
        let response = self
            .client
            .get(url.clone())
            .header(USER_AGENT, &self.user_agent)
            .send()
            .await?
            .error_for_status()?;

        let bytes = response.bytes().await?;
        Ok(String::from_utf8(bytes.to_vec())?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DEFAULT_USER_AGENT;
    use crate::relay::error::ErrorKind;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;

    /// Serve one canned HTTP response and hand back the raw request head.
    async fn one_shot_upstream(response: Vec<u8>) -> (Url, tokio::task::JoinHandle<String>) {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let handle = tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut buf = vec![0u8; 4096];
            let mut head = Vec::new();
            loop {
                let n = socket.read(&mut buf).await.unwrap();
                head.extend_from_slice(&buf[..n]);
                if n == 0 || head.windows(4).any(|w| w == b"\r\n\r\n") {
                    break;
                }
            }
            socket.write_all(&response).await.unwrap();
            let _ = socket.shutdown().await;
            String::from_utf8_lossy(&head).into_owned()
        });
        let url = Url::parse(&format!("http://{}/page", addr)).unwrap();
        (url, handle)
    }

    fn plain_text_response(status: &str, body: &[u8]) -> Vec<u8> {
        let mut out = format!(
            "HTTP/1.1 {}\r\nContent-Type: text/plain\r\nContent-Length: {}\r\nConnection: close\r\n\r\n",
            status,
            body.len()
        )
        .into_bytes();
        out.extend_from_slice(body);
        out
    }

    #[tokio::test]
    async fn test_fetch_text_sends_user_agent() {
        let (url, upstream) = one_shot_upstream(plain_text_response("200 OK", b"Hello, world!")).await;
        let fetcher = Fetcher::new(&UpstreamConfig::default()).unwrap();

        let body = fetcher.fetch(&url).await.unwrap();
        assert_eq!(body, "Hello, world!");

        let head = upstream.await.unwrap().to_ascii_lowercase();
        assert!(head.starts_with("get /page http/1.1"));
        assert!(head.contains(&format!("user-agent: {}", DEFAULT_USER_AGENT.to_ascii_lowercase())));

        // Only the user agent is ours; `accept` and `host` are the client's own.
        let mut names: Vec<&str> = head
            .lines()
            .skip(1)
            .filter_map(|line| line.split_once(':').map(|(name, _)| name.trim()))
            .collect();
        names.sort_unstable();
        assert_eq!(names, vec!["accept", "host", "user-agent"]);
    }

    #[tokio::test]
    async fn test_non_utf8_body_is_decode_error() {
        let (url, _upstream) = one_shot_upstream(plain_text_response("200 OK", &[0xff, 0xfe, 0x00])).await;
        let fetcher = Fetcher::new(&UpstreamConfig::default()).unwrap();

        let err = fetcher.fetch(&url).await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Decode);
    }

    #[tokio::test]
    async fn test_upstream_error_status_is_network_error() {
        let (url, _upstream) = one_shot_upstream(plain_text_response("404 Not Found", b"gone")).await;
        let fetcher = Fetcher::new(&UpstreamConfig::default()).unwrap();

        let err = fetcher.fetch(&url).await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Network);
        assert!(err.message().contains("404"));
    }

    #[tokio::test]
    async fn test_connection_refused() {
        let fetcher = Fetcher::new(&UpstreamConfig::default()).unwrap();
        let url = Url::parse("http://127.0.0.1:1/").unwrap();

        let err = fetcher.fetch(&url).await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Network);
        assert!(err.message().to_lowercase().contains("refused"), "{}", err.message());
    }

    #[tokio::test]
    async fn test_timeout_applies_when_configured() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        // Accept and never answer.
        let _silent = tokio::spawn(async move {
            let (_socket, _) = listener.accept().await.unwrap();
            tokio::time::sleep(Duration::from_secs(30)).await;
        });

        let config = UpstreamConfig {
            timeout_secs: Some(1),
            ..UpstreamConfig::default()
        };
        let fetcher = Fetcher::new(&config).unwrap();
        let url = Url::parse(&format!("http://{}/", addr)).unwrap();

        let err = fetcher.fetch(&url).await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Network);
    }
}

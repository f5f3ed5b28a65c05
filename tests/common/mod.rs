//! Shared helpers for integration tests.

#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use gitjira::{JiraClient, JiraConfig};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;

pub const AUTH_PATTERN: &str = "^Basic .*";

/// A client pointed at `base_url` with test credentials.
pub fn client_for(base_url: &str) -> JiraClient {
    let config = JiraConfig::new("username", "password", base_url);
    JiraClient::new(&config).expect("client build")
}

/// A server that accepts connections, reads the request and closes the
/// socket without answering.
///
/// Built with [`DroppingServer::answering_gets`] it instead answers GET
/// requests with 200 (an empty comment list for comment paths, `{}`
/// otherwise) and only drops the other methods.
pub struct DroppingServer {
    pub base_url: String,
    requests: Arc<Mutex<Vec<String>>>,
}

impl DroppingServer {
    pub async fn start() -> Self {
        Self::spawn(false).await
    }

    pub async fn answering_gets() -> Self {
        Self::spawn(true).await
    }

    async fn spawn(answer_gets: bool) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
        let addr = listener.local_addr().expect("local addr");
        let requests = Arc::new(Mutex::new(Vec::new()));
        let seen = Arc::clone(&requests);

        tokio::spawn(async move {
            while let Ok((mut socket, _)) = listener.accept().await {
                let mut buf = vec![0u8; 8192];
                let n = socket.read(&mut buf).await.unwrap_or(0);
                let request = String::from_utf8_lossy(&buf[..n]).to_string();
                let reply = if answer_gets && request.starts_with("GET ") {
                    Some(canned_reply(&request))
                } else {
                    None
                };
                seen.lock().unwrap().push(request);

                if let Some(reply) = reply {
                    let _ = socket.write_all(reply.as_bytes()).await;
                    let _ = socket.shutdown().await;
                }
                drop(socket);
            }
        });

        Self {
            base_url: format!("http://{}", addr),
            requests,
        }
    }

    /// Requests received so far, lowercased.
    pub fn requests(&self) -> Vec<String> {
        self.requests
            .lock()
            .unwrap()
            .iter()
            .map(|r| r.to_ascii_lowercase())
            .collect()
    }

    /// Whether some request hit `path` with a basic authorization header.
    pub fn saw_authorized_get(&self, path: &str) -> bool {
        let request_line = format!("get {} http/1.1", path.to_ascii_lowercase());
        self.requests().iter().any(|r| {
            r.starts_with(&request_line) && r.contains("\r\nauthorization: basic ")
        })
    }
}

fn canned_reply(request: &str) -> String {
    let target = request.split_whitespace().nth(1).unwrap_or("/");
    let body = if target.ends_with("/comment") {
        r#"{"comments":[]}"#
    } else {
        "{}"
    };
    format!(
        "HTTP/1.1 200 OK\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
        body.len(),
        body
    )
}

//! Minimal HTTP/1.1 server for integration tests.
//!
//! Serves fixed responses keyed by request path and counts every request it
//! receives. Unknown paths get 404.

use std::collections::HashMap;
use std::io::{Read, Write};
use std::net::{TcpListener, TcpStream};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

/// One canned response.
#[derive(Debug, Clone)]
pub struct Route {
    /// Status line after "HTTP/1.1 ", e.g. "200 OK".
    pub status: &'static str,
    pub extra_headers: Vec<String>,
    pub body: Vec<u8>,
    /// If set, advertise this Content-Length instead of the real one, then
    /// close the connection after sending `body` (simulates a dropped link).
    pub claimed_len: Option<usize>,
}

impl Route {
    pub fn ok(body: Vec<u8>) -> Self {
        Self::status("200 OK", body)
    }

    pub fn status(status: &'static str, body: Vec<u8>) -> Self {
        Self {
            status,
            extra_headers: Vec::new(),
            body,
            claimed_len: None,
        }
    }

    pub fn header(mut self, h: &str) -> Self {
        self.extra_headers.push(h.to_string());
        self
    }

    pub fn truncated(mut self, claimed_len: usize) -> Self {
        self.claimed_len = Some(claimed_len);
        self
    }
}

pub struct TestServer {
    base_url: String,
    hits: Arc<AtomicUsize>,
}

impl TestServer {
    /// Starts a server in a background thread. It runs until the process exits.
    pub fn start(routes: Vec<(&str, Route)>) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").expect("bind");
        let port = listener.local_addr().unwrap().port();
        let routes: Arc<HashMap<String, Route>> = Arc::new(
            routes
                .into_iter()
                .map(|(p, r)| (p.to_string(), r))
                .collect(),
        );
        let hits = Arc::new(AtomicUsize::new(0));
        let hits_srv = Arc::clone(&hits);
        thread::spawn(move || {
            for stream in listener.incoming().flatten() {
                hits_srv.fetch_add(1, Ordering::SeqCst);
                let routes = Arc::clone(&routes);
                thread::spawn(move || handle(stream, &routes));
            }
        });
        Self {
            base_url: format!("http://127.0.0.1:{}", port),
            hits,
        }
    }

    /// Full URL for `path` (which must start with '/').
    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    pub fn hits(&self) -> usize {
        self.hits.load(Ordering::SeqCst)
    }
}

fn handle(mut stream: TcpStream, routes: &HashMap<String, Route>) {
    let _ = stream.set_read_timeout(Some(Duration::from_secs(2)));
    let _ = stream.set_write_timeout(Some(Duration::from_secs(2)));
    let mut buf = [0u8; 8192];
    let n = match stream.read(&mut buf) {
        Ok(0) | Err(_) => return,
        Ok(n) => n,
    };
    let request = String::from_utf8_lossy(&buf[..n]);
    let path = request
        .lines()
        .next()
        .and_then(|l| l.split_whitespace().nth(1))
        .unwrap_or("/")
        .to_string();

    let not_found = Route::status("404 Not Found", b"not found".to_vec());
    let route = routes.get(&path).unwrap_or(&not_found);
    let len = route.claimed_len.unwrap_or(route.body.len());
    let mut head = format!(
        "HTTP/1.1 {}\r\nContent-Length: {}\r\nConnection: close\r\n",
        route.status, len
    );
    for h in &route.extra_headers {
        head.push_str(h);
        head.push_str("\r\n");
    }
    head.push_str("\r\n");
    let _ = stream.write_all(head.as_bytes());
    let _ = stream.write_all(&route.body);
    let _ = stream.flush();
}

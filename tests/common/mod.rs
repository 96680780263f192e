//! Shared utilities for integration testing: a scriptable SOAP backend and
//! a proxy instance on an ephemeral port.

use std::future::Future;
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};

use sclws_proxy::config::validation::validate_config;
use sclws_proxy::config::ProxyConfig;
use sclws_proxy::http::HttpServer;
use sclws_proxy::lifecycle::Shutdown;

/// Request bodies received by a mock backend, in arrival order.
pub type Captured = Arc<Mutex<Vec<String>>>;

/// Wrap `inner` in a SOAP response envelope the way the SearchCal server does.
#[allow(dead_code)]
pub fn soap_body(inner: &str) -> String {
    format!(
        "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n\
         <SOAP-ENV:Envelope xmlns:SOAP-ENV=\"http://schemas.xmlsoap.org/soap/envelope/\" \
         xmlns:ns=\"urn:sclws\"><SOAP-ENV:Body>{}</SOAP-ENV:Body></SOAP-ENV:Envelope>",
        inner
    )
}

/// A GetStar success reply carrying `output` (already XML-encoded).
#[allow(dead_code)]
pub fn soap_output(output: &str) -> String {
    soap_body(&format!(
        "<ns:GetStarResponse><output>{}</output></ns:GetStarResponse>",
        output
    ))
}

/// A SOAP fault reply.
#[allow(dead_code)]
pub fn soap_fault(message: &str) -> String {
    soap_body(&format!(
        "<SOAP-ENV:Fault><faultcode>SOAP-ENV:Server</faultcode>\
         <faultstring>{}</faultstring></SOAP-ENV:Fault>",
        message
    ))
}

/// Read one HTTP/1.1 request and return its body.
async fn read_request(socket: &mut TcpStream) -> String {
    let mut buf = Vec::new();
    let mut chunk = [0u8; 4096];

    let header_end = loop {
        match socket.read(&mut chunk).await {
            Ok(0) | Err(_) => return String::new(),
            Ok(n) => buf.extend_from_slice(&chunk[..n]),
        }
        if let Some(pos) = buf.windows(4).position(|w| w == b"\r\n\r\n") {
            break pos + 4;
        }
    };

    let head = String::from_utf8_lossy(&buf[..header_end]).to_ascii_lowercase();
    let content_length = head
        .lines()
        .find_map(|line| line.strip_prefix("content-length:"))
        .and_then(|v| v.trim().parse::<usize>().ok())
        .unwrap_or(0);

    while buf.len() < header_end + content_length {
        match socket.read(&mut chunk).await {
            Ok(0) | Err(_) => break,
            Ok(n) => buf.extend_from_slice(&chunk[..n]),
        }
    }

    String::from_utf8_lossy(&buf[header_end..]).into_owned()
}

/// Start a programmable mock backend on an ephemeral port.
///
/// `f` maps each request body to a `(status, body)` reply. Every request
/// body is also pushed to the returned capture list.
#[allow(dead_code)]
pub async fn start_programmable_backend<F, Fut>(f: F) -> (SocketAddr, Captured)
where
    F: Fn(String) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = (u16, String)> + Send + 'static,
{
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let captured: Captured = Arc::new(Mutex::new(Vec::new()));
    let f = Arc::new(f);
    let log = captured.clone();

    tokio::spawn(async move {
        loop {
            match listener.accept().await {
                Ok((mut socket, _)) => {
                    let f = f.clone();
                    let log = log.clone();
                    tokio::spawn(async move {
                        let request = read_request(&mut socket).await;
                        log.lock().unwrap().push(request.clone());
                        let (status, body) = f(request).await;
                        let status_text = match status {
                            200 => "200 OK",
                            500 => "500 Internal Server Error",
                            502 => "502 Bad Gateway",
                            503 => "503 Service Unavailable",
                            _ => "200 OK",
                        };

                        let response_str = format!(
                            "HTTP/1.1 {}\r\nContent-Type: text/xml; charset=utf-8\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                            status_text,
                            body.len(),
                            body
                        );
                        let _ = socket.write_all(response_str.as_bytes()).await;
                        let _ = socket.shutdown().await;
                    });
                }
                Err(_) => break,
            }
        }
    });

    (addr, captured)
}

/// Start a backend that always answers with the same reply.
#[allow(dead_code)]
pub async fn start_mock_backend(status: u16, body: String) -> (SocketAddr, Captured) {
    start_programmable_backend(move |_| {
        let body = body.clone();
        async move { (status, body) }
    })
    .await
}

/// Start a backend that accepts connections and never answers.
#[allow(dead_code)]
pub async fn start_stalled_backend() -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        let mut held = Vec::new();
        while let Ok((socket, _)) = listener.accept().await {
            held.push(socket);
        }
    });

    addr
}

/// An address with nothing listening on it.
#[allow(dead_code)]
pub async fn closed_port() -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    addr
}

/// Proxy configuration pointing at `backend`.
pub fn proxy_config(backend: SocketAddr) -> ProxyConfig {
    let mut config = ProxyConfig::default();
    config.listener.bind_address = "127.0.0.1:0".into();
    config.backend.url = format!("http://{}", backend);
    config
}

/// Serve the proxy on an ephemeral port; returns its base URL.
pub async fn start_proxy(config: ProxyConfig, shutdown: &Shutdown) -> String {
    validate_config(&config).expect("test config must pass validation");
    let server = HttpServer::new(config).unwrap();
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let server_shutdown = shutdown.subscribe();

    tokio::spawn(async move {
        let _ = server.run(listener, server_shutdown).await;
    });

    tokio::time::sleep(Duration::from_millis(50)).await;
    format!("http://{}", addr)
}

/// Client that bypasses system proxies and keeps no idle connections.
pub fn client() -> reqwest::Client {
    reqwest::Client::builder()
        .pool_max_idle_per_host(0)
        .no_proxy()
        .build()
        .unwrap()
}

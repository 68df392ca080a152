//! Minimal scripted HTTP backend for integration tests.

use std::collections::{HashMap, VecDeque};
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};
use vidgrab::utils::AppSettings;

#[derive(Clone)]
pub struct Reply {
    pub status: u16,
    pub content_type: &'static str,
    pub headers: Vec<(&'static str, String)>,
    pub body: Vec<u8>,
}

impl Reply {
    pub fn json(status: u16, body: serde_json::Value) -> Self {
        Self {
            status,
            content_type: "application/json",
            headers: Vec::new(),
            body: body.to_string().into_bytes(),
        }
    }

    pub fn file(content_type: &'static str, body: &[u8]) -> Self {
        Self {
            status: 200,
            content_type,
            headers: Vec::new(),
            body: body.to_vec(),
        }
    }

    pub fn with_header(mut self, name: &'static str, value: &str) -> Self {
        self.headers.push((name, value.to_string()));
        self
    }
}

/// A request seen by the server: request line and body
#[derive(Debug, Clone)]
pub struct Recorded {
    pub request_line: String,
    pub body: Vec<u8>,
}

impl Recorded {
    pub fn json(&self) -> serde_json::Value {
        serde_json::from_slice(&self.body).expect("request body is JSON")
    }
}

pub struct TestServer {
    pub addr: SocketAddr,
    pub requests: Arc<Mutex<Vec<Recorded>>>,
}

impl TestServer {
    /// Serve `routes` (keyed by path without query) until the test ends.
    ///
    /// A path listed more than once answers with its replies in order and
    /// keeps repeating the last one.
    pub async fn start(routes: Vec<(&'static str, Reply)>) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
        let addr = listener.local_addr().expect("local addr");
        let mut table: HashMap<&'static str, VecDeque<Reply>> = HashMap::new();
        for (path, reply) in routes {
            table.entry(path).or_default().push_back(reply);
        }
        let routes = Arc::new(Mutex::new(table));
        let requests = Arc::new(Mutex::new(Vec::new()));

        let recorded = requests.clone();
        tokio::spawn(async move {
            loop {
                let Ok((stream, _)) = listener.accept().await else {
                    break;
                };
                let routes = routes.clone();
                let recorded = recorded.clone();
                tokio::spawn(async move {
                    let _ = handle(stream, &routes, &recorded).await;
                });
            }
        });

        Self { addr, requests }
    }

    pub fn settings(&self) -> AppSettings {
        AppSettings {
            backend_url: format!("http://{}", self.addr),
            request_timeout_secs: 5,
            ..Default::default()
        }
    }

    pub fn recorded(&self) -> Vec<Recorded> {
        self.requests.lock().expect("lock").clone()
    }
}

async fn handle(
    mut stream: TcpStream,
    routes: &Mutex<HashMap<&'static str, VecDeque<Reply>>>,
    recorded: &Mutex<Vec<Recorded>>,
) -> std::io::Result<()> {
    let request = read_request(&mut stream).await?;
    let path = request
        .request_line
        .split_whitespace()
        .nth(1)
        .unwrap_or("/")
        .split('?')
        .next()
        .unwrap_or("/")
        .to_string();
    recorded.lock().expect("lock").push(request);

    let reply = {
        let mut routes = routes.lock().expect("lock");
        match routes.get_mut(path.as_str()) {
            Some(queue) if queue.len() > 1 => queue.pop_front(),
            Some(queue) => queue.front().cloned(),
            None => None,
        }
    }
    .unwrap_or_else(|| Reply::json(404, serde_json::json!({ "success": false })));

    let mut head = format!(
        "HTTP/1.1 {} Test\r\nContent-Type: {}\r\nContent-Length: {}\r\nConnection: close\r\n",
        reply.status,
        reply.content_type,
        reply.body.len()
    );
    for (name, value) in &reply.headers {
        head.push_str(&format!("{}: {}\r\n", name, value));
    }
    head.push_str("\r\n");

    stream.write_all(head.as_bytes()).await?;
    stream.write_all(&reply.body).await?;
    stream.shutdown().await
}

async fn read_request(stream: &mut TcpStream) -> std::io::Result<Recorded> {
    let mut buf = Vec::new();
    let mut chunk = [0u8; 4096];

    let header_end = loop {
        let n = stream.read(&mut chunk).await?;
        if n == 0 {
            return Err(std::io::ErrorKind::UnexpectedEof.into());
        }
        buf.extend_from_slice(&chunk[..n]);
        if let Some(pos) = buf.windows(4).position(|w| w == b"\r\n\r\n") {
            break pos + 4;
        }
    };

    let head = String::from_utf8_lossy(&buf[..header_end]).to_string();
    let content_length = head
        .lines()
        .filter_map(|line| line.split_once(':'))
        .find(|(name, _)| name.trim().eq_ignore_ascii_case("content-length"))
        .and_then(|(_, value)| value.trim().parse::<usize>().ok())
        .unwrap_or(0);

    while buf.len() < header_end + content_length {
        let n = stream.read(&mut chunk).await?;
        if n == 0 {
            break;
        }
        buf.extend_from_slice(&chunk[..n]);
    }

    let body_end = buf.len().min(header_end + content_length);
    Ok(Recorded {
        request_line: head.lines().next().unwrap_or_default().to_string(),
        body: buf[header_end..body_end].to_vec(),
    })
}

pub fn sample_preview() -> serde_json::Value {
    serde_json::json!({
        "success": true,
        "title": "Sample Video",
        "author": "Uploader",
        "thumbnail": "https://i.ytimg.com/vi/abc/hqdefault.jpg",
        "duration": 3725,
        "views": 1234567,
        "formats": [
            { "format_id": "140", "type": "audio", "ext": "m4a", "vcodec": "none",
              "acodec": "mp4a.40.2", "abr": 129.5, "filesize": 3400000 },
            { "format_id": "137", "type": "video", "ext": "mp4", "vcodec": "avc1.640028",
              "acodec": "none", "height": 1080, "fps": 30, "vbr": 4400.1 },
            { "format_id": "22", "type": "video", "ext": "mp4", "vcodec": "avc1.64001F",
              "acodec": "mp4a.40.2", "height": 720, "fps": 30, "filesize": null }
        ]
    })
}

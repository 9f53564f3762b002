#![allow(dead_code)]

use assert_cmd::Command;
use std::io::{Read, Write};
use std::net::TcpListener;
use std::path::Path;
use std::thread::JoinHandle;

pub type Result<A> = std::result::Result<A, Box<dyn std::error::Error>>;

/// The binary, isolated from the environment it runs in: no base url
/// from env and an empty config file.
pub fn mk_cmd_in(dir: &Path) -> Result<Command> {
    let config = dir.join("config.toml");
    if !config.exists() {
        std::fs::write(&config, "")?;
    }
    let mut cmd = Command::cargo_bin("kb")?;
    cmd.current_dir(dir)
        .env_remove("KB_CLI_BASE_URL")
        .env_remove("RUST_LOG")
        .arg("--config")
        .arg(&config);
    Ok(cmd)
}

pub fn mk_cmd() -> Result<Command> {
    let mut cmd = Command::cargo_bin("kb")?;
    cmd.env_remove("KB_CLI_BASE_URL").env_remove("RUST_LOG");
    Ok(cmd)
}

/// A request as it arrived at the server.
pub struct Captured {
    pub request_line: String,
    pub headers: Vec<(String, String)>,
    pub body: String,
}

impl Captured {
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(n, _)| n.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    pub fn json_body(&self) -> serde_json::Value {
        serde_json::from_str(&self.body).unwrap()
    }
}

/// Serves exactly one http request with a canned response and hands
/// back what was received.
pub struct OneShotServer {
    pub url: String,
    handle: JoinHandle<Captured>,
}

impl OneShotServer {
    pub fn start(status: &str, extra_headers: &[&str], body: &str) -> OneShotServer {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let url = format!("http://{}", listener.local_addr().unwrap());
        let mut response = format!(
            "HTTP/1.1 {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n",
            status,
            body.len()
        );
        for h in extra_headers {
            response.push_str(h);
            response.push_str("\r\n");
        }
        response.push_str("\r\n");
        response.push_str(body);

        let handle = std::thread::spawn(move || {
            let (mut stream, _) = listener.accept().unwrap();
            let captured = read_request(&mut stream);
            stream.write_all(response.as_bytes()).unwrap();
            stream.flush().unwrap();
            captured
        });
        OneShotServer { url, handle }
    }

    pub fn received(self) -> Captured {
        self.handle.join().unwrap()
    }
}

/// Accepts connections but never answers. Used to show that a command
/// did not contact the service at all.
pub struct QuietServer {
    pub url: String,
    listener: TcpListener,
}

impl QuietServer {
    pub fn start() -> QuietServer {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        listener.set_nonblocking(true).unwrap();
        let url = format!("http://{}", listener.local_addr().unwrap());
        QuietServer { url, listener }
    }

    pub fn assert_untouched(&self) {
        match self.listener.accept() {
            Ok((_, peer)) => panic!("unexpected connection from {}", peer),
            Err(e) => assert_eq!(e.kind(), std::io::ErrorKind::WouldBlock),
        }
    }
}

fn read_request<R: Read>(stream: &mut R) -> Captured {
    let mut buf = Vec::new();
    let mut chunk = [0u8; 1024];
    let head_end = loop {
        let n = stream.read(&mut chunk).unwrap();
        assert!(n > 0, "connection closed before headers were complete");
        buf.extend_from_slice(&chunk[..n]);
        if let Some(pos) = find(&buf, b"\r\n\r\n") {
            break pos;
        }
    };
    let head = String::from_utf8_lossy(&buf[..head_end]).to_string();
    let mut lines = head.split("\r\n");
    let request_line = lines.next().unwrap_or_default().to_string();
    let headers: Vec<(String, String)> = lines
        .filter_map(|l| l.split_once(':'))
        .map(|(n, v)| (n.trim().to_string(), v.trim().to_string()))
        .collect();
    let len = headers
        .iter()
        .find(|(n, _)| n.eq_ignore_ascii_case("content-length"))
        .and_then(|(_, v)| v.parse::<usize>().ok())
        .unwrap_or(0);

    let mut body = buf[head_end + 4..].to_vec();
    while body.len() < len {
        let n = stream.read(&mut chunk).unwrap();
        if n == 0 {
            break;
        }
        body.extend_from_slice(&chunk[..n]);
    }
    Captured {
        request_line,
        headers,
        body: String::from_utf8_lossy(&body).to_string(),
    }
}

fn find(haystack: &[u8], needle: &[u8]) -> Option<usize> {
    haystack.windows(needle.len()).position(|w| w == needle)
}

//! Shared test infrastructure for CLI integration tests.

use percent_encoding::percent_decode_str;
use std::io::{BufRead, BufReader, Write};
use std::net::{TcpListener, TcpStream};
use std::path::{Path, PathBuf};
use std::process::{Command, Output, Stdio};
use std::sync::{Arc, Mutex};
use std::thread;

/// Path to the built binary under test.
pub fn bin() -> &'static str {
    env!("CARGO_BIN_EXE_scry-check")
}

/// Write a card list into `dir` and return its path.
pub fn write_cards(dir: &Path, contents: &str) -> PathBuf {
    let path = dir.join("cards.txt");
    std::fs::write(&path, contents.as_bytes()).expect("write card list");
    path
}

/// Run the binary with `args`, isolated from the caller's environment config.
pub fn run(args: &[&str]) -> Output {
    Command::new(bin())
        .args(args)
        .env_remove("SCRY_CHECK_ENDPOINT")
        .env_remove("RUST_LOG")
        .stdin(Stdio::null())
        .output()
        .expect("run scry-check")
}

/// Minimal search endpoint serving cards whose lower-cased names appear in the
/// query's `!name` clauses. Requests whose query contains `fail` get a 500.
pub struct MockSearch {
    pub endpoint: String,
    pub requests: Arc<Mutex<Vec<String>>>,
}

impl MockSearch {
    pub fn start(catalog: &[&str]) -> MockSearch {
        let listener = TcpListener::bind("127.0.0.1:0").expect("bind mock endpoint");
        let addr = listener.local_addr().expect("mock endpoint address");
        let catalog: Vec<String> = catalog.iter().map(|s| s.to_string()).collect();
        let requests = Arc::new(Mutex::new(Vec::new()));
        let seen = Arc::clone(&requests);

        thread::spawn(move || {
            for stream in listener.incoming() {
                let Ok(stream) = stream else {
                    continue;
                };
                handle(stream, &catalog, &seen);
            }
        });

        MockSearch {
            endpoint: format!("http://{addr}/cards/search"),
            requests,
        }
    }

    pub fn request_count(&self) -> usize {
        self.requests.lock().expect("requests lock").len()
    }
}

fn handle(mut stream: TcpStream, catalog: &[String], seen: &Mutex<Vec<String>>) {
    let mut reader = BufReader::new(stream.try_clone().expect("clone stream"));
    let mut request_line = String::new();
    if reader.read_line(&mut request_line).is_err() {
        return;
    }
    loop {
        let mut header = String::new();
        match reader.read_line(&mut header) {
            Ok(0) | Err(_) => break,
            Ok(_) if header == "\r\n" || header == "\n" => break,
            Ok(_) => {}
        }
    }

    let target = request_line.split_whitespace().nth(1).unwrap_or_default();
    let encoded = target.split_once("?q=").map(|(_, q)| q).unwrap_or_default();
    let query = percent_decode_str(encoded).decode_utf8_lossy().into_owned();
    seen.lock().expect("requests lock").push(query.clone());

    let (status, body) = if query.contains("fail") {
        (
            "500 Internal Server Error",
            r#"{"object":"error","status":500,"details":"boom"}"#.to_string(),
        )
    } else {
        let cards: Vec<serde_json::Value> = catalog
            .iter()
            .filter(|name| query.contains(&format!("!{}", name.to_lowercase())))
            .map(|name| serde_json::json!({"object": "card", "name": name}))
            .collect();
        if cards.is_empty() {
            (
                "404 Not Found",
                r#"{"object":"error","code":"not_found","status":404,"details":"no cards"}"#
                    .to_string(),
            )
        } else {
            let body = serde_json::json!({
                "object": "list",
                "total_cards": cards.len(),
                "has_more": false,
                "data": cards,
            });
            ("200 OK", body.to_string())
        }
    };

    let response = format!(
        "HTTP/1.1 {status}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
        body.len()
    );
    let _ = stream.write_all(response.as_bytes());
    let _ = stream.flush();
}

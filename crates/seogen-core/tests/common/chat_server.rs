//! Minimal HTTP/1.1 server that answers chat-completion POSTs for integration tests.
//!
//! Each request is handed to a responder closure together with the topic
//! found in the prompt and how many times that topic was requested so far.

use std::collections::HashMap;
use std::io::{BufRead, BufReader, Read, Write};
use std::net::{TcpListener, TcpStream};
use std::sync::{Arc, Mutex};
use std::thread;
use std::time::Duration;

/// What the server sends back for one request.
pub enum Reply {
    /// 200 with a completion whose content is the given text.
    Completion(String),
    /// Arbitrary status and raw body.
    Status(u32, String),
    /// 301 pointing at the given location.
    Redirect(String),
    /// Sleep before answering with a completion (used to trigger client timeouts).
    Delayed(Duration, String),
}

/// One captured request.
#[derive(Debug, Clone)]
pub struct Seen {
    pub topic: String,
    pub authorization: Option<String>,
    pub body: String,
}

pub type Responder = dyn Fn(&str, usize) -> Reply + Send + Sync;

pub struct ChatServer {
    pub url: String,
    seen: Arc<Mutex<Vec<Seen>>>,
}

impl ChatServer {
    pub fn requests(&self) -> Vec<Seen> {
        self.seen.lock().unwrap().clone()
    }

    pub fn count_for(&self, topic: &str) -> usize {
        self.requests().iter().filter(|s| s.topic == topic).count()
    }
}

/// Starts a server in a background thread. The server runs until the process exits.
pub fn start<F>(responder: F) -> ChatServer
where
    F: Fn(&str, usize) -> Reply + Send + Sync + 'static,
{
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind");
    let port = listener.local_addr().unwrap().port();
    let responder: Arc<Responder> = Arc::new(responder);
    let seen = Arc::new(Mutex::new(Vec::new()));
    let counts = Arc::new(Mutex::new(HashMap::<String, usize>::new()));
    let seen_srv = Arc::clone(&seen);
    thread::spawn(move || {
        for stream in listener.incoming().flatten() {
            let responder = Arc::clone(&responder);
            let seen = Arc::clone(&seen_srv);
            let counts = Arc::clone(&counts);
            thread::spawn(move || handle(stream, &*responder, &seen, &counts));
        }
    });
    ChatServer {
        url: format!("http://127.0.0.1:{}/v1/chat/completions", port),
        seen,
    }
}

fn handle(
    stream: TcpStream,
    responder: &Responder,
    seen: &Mutex<Vec<Seen>>,
    counts: &Mutex<HashMap<String, usize>>,
) {
    let _ = stream.set_read_timeout(Some(Duration::from_secs(5)));
    let mut writer = match stream.try_clone() {
        Ok(w) => w,
        Err(_) => return,
    };
    let mut reader = BufReader::new(stream);

    let mut content_length = 0usize;
    let mut authorization = None;
    let mut expect_continue = false;
    let mut line = String::new();
    loop {
        line.clear();
        match reader.read_line(&mut line) {
            Ok(0) | Err(_) => return,
            Ok(_) => {}
        }
        let l = line.trim_end();
        if l.is_empty() {
            break;
        }
        if let Some((name, value)) = l.split_once(':') {
            let name = name.trim().to_ascii_lowercase();
            let value = value.trim();
            match name.as_str() {
                "content-length" => content_length = value.parse().unwrap_or(0),
                "authorization" => authorization = Some(value.to_string()),
                "expect" => expect_continue = value.eq_ignore_ascii_case("100-continue"),
                _ => {}
            }
        }
    }
    if expect_continue {
        let _ = writer.write_all(b"HTTP/1.1 100 Continue\r\n\r\n");
    }
    let mut body = vec![0u8; content_length];
    if reader.read_exact(&mut body).is_err() {
        return;
    }
    let body = String::from_utf8_lossy(&body).into_owned();
    let topic = topic_from_body(&body);

    let n = {
        let mut c = counts.lock().unwrap();
        let e = c.entry(topic.clone()).or_insert(0);
        *e += 1;
        *e
    };
    seen.lock().unwrap().push(Seen {
        topic: topic.clone(),
        authorization,
        body,
    });

    let mut extra = String::new();
    let (status, payload) = match responder(&topic, n) {
        Reply::Completion(text) => (200, completion_json(&text)),
        Reply::Status(code, raw) => (code, raw),
        Reply::Redirect(location) => {
            extra = format!("Location: {}\r\n", location);
            (301, String::new())
        }
        Reply::Delayed(d, text) => {
            thread::sleep(d);
            (200, completion_json(&text))
        }
    };
    let response = format!(
        "HTTP/1.1 {} Status\r\nContent-Type: application/json\r\n{}Content-Length: {}\r\nConnection: close\r\n\r\n{}",
        status,
        extra,
        payload.len(),
        payload
    );
    let _ = writer.write_all(response.as_bytes());
}

fn completion_json(text: &str) -> String {
    serde_json::json!({
        "choices": [{ "index": 0, "message": { "role": "assistant", "content": text } }]
    })
    .to_string()
}

/// Pulls the topic out of the user prompt (`... about: <topic>.\n...`).
fn topic_from_body(body: &str) -> String {
    let v: serde_json::Value = match serde_json::from_str(body) {
        Ok(v) => v,
        Err(_) => return String::new(),
    };
    let user = v["messages"][1]["content"].as_str().unwrap_or("");
    user.split_once("about: ")
        .and_then(|(_, rest)| rest.split_once(".\n"))
        .map(|(t, _)| t.to_string())
        .unwrap_or_default()
}

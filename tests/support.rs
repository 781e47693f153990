use std::ffi::OsStr;
use std::io::{Read, Write};
use std::net::{Shutdown, TcpListener, TcpStream};
use std::process::{Command, Output};
use std::sync::Arc;
use std::sync::mpsc;
use std::thread;
use std::time::Duration;

/// Requests to paths starting with this prefix are answered late.
pub const SLOW_PREFIX: &str = "/slow";
pub const SLOW_DELAY: Duration = Duration::from_millis(1500);
/// Requests to paths starting with this prefix get headers promising a
/// 100-byte body, 5 bytes of it, and then nothing for [`SLOW_DELAY`].
pub const STALL_PREFIX: &str = "/stall";
/// When a request carries this header, the echoed body also reports it along
/// with the request's `User-Agent` and `Accept` headers.
pub const ECHO_HEADER: &str = "x-probe";

pub struct ServerHandle {
    shutdown: mpsc::Sender<()>,
    thread: Option<thread::JoinHandle<()>>,
}

impl Drop for ServerHandle {
    fn drop(&mut self) {
        let _send_result = self.shutdown.send(());
        if let Some(handle) = self.thread.take() {
            drop(handle.join());
        }
    }
}

/// Spawn a lightweight HTTP server for tests.
///
/// `GET /openapi.json` returns the document built by `describe` from the
/// server's base URL. Every other request is answered with a two-line body
/// naming its method and path.
///
/// # Errors
///
/// Returns an error if the listener cannot be created or configured.
pub fn spawn_http_server<F>(describe: F) -> Result<(String, ServerHandle), String>
where
    F: FnOnce(&str) -> String,
{
    let listener = TcpListener::bind("127.0.0.1:0")
        .map_err(|err| format!("bind test server failed: {}", err))?;
    let addr = listener
        .local_addr()
        .map_err(|err| format!("server addr failed: {}", err))?;
    listener
        .set_nonblocking(true)
        .map_err(|err| format!("set_nonblocking failed: {}", err))?;

    let base = format!("http://{}", addr);
    let document: Arc<str> = Arc::from(describe(&base));
    let (shutdown_tx, shutdown_rx) = mpsc::channel();

    let handle = thread::spawn(move || {
        loop {
            if shutdown_rx.try_recv().is_ok() {
                break;
            }

            match listener.accept() {
                Ok((stream, _)) => {
                    let document = Arc::clone(&document);
                    thread::spawn(move || handle_client(stream, &document));
                }
                Err(err) if err.kind() == std::io::ErrorKind::WouldBlock => {
                    thread::sleep(Duration::from_millis(5));
                }
                Err(_) => break,
            }
        }
    });

    Ok((
        base,
        ServerHandle {
            shutdown: shutdown_tx,
            thread: Some(handle),
        },
    ))
}

/// Like [`spawn_http_server`], but skips when sockets are not permitted.
///
/// # Errors
///
/// Returns an error for any failure other than a sandbox restriction.
pub fn spawn_http_server_or_skip<F>(describe: F) -> Result<Option<(String, ServerHandle)>, String>
where
    F: FnOnce(&str) -> String,
{
    match spawn_http_server(describe) {
        Ok(result) => Ok(Some(result)),
        Err(err) if err.contains("Operation not permitted") => {
            eprintln!("Skipping e2e test: {}", err);
            Ok(None)
        }
        Err(err) => Err(err),
    }
}

fn handle_client(mut stream: TcpStream, document: &str) {
    if stream.set_nonblocking(false).is_err() {
        return;
    }
    let mut request = Vec::new();
    let mut buffer = [0u8; 1024];
    while !request.windows(4).any(|window| window == b"\r\n\r\n") {
        match stream.read(&mut buffer) {
            Ok(0) | Err(_) => return,
            Ok(read) => request.extend_from_slice(&buffer[..read]),
        }
    }

    let head = String::from_utf8_lossy(&request);
    let mut request_line = head.lines().next().unwrap_or_default().split_whitespace();
    let method = request_line.next().unwrap_or_default().to_owned();
    let path = request_line.next().unwrap_or_default().to_owned();

    if path.starts_with(STALL_PREFIX) {
        stall_body(stream);
        return;
    }

    let body = if path == "/openapi.json" {
        document.to_owned()
    } else {
        if path.starts_with(SLOW_PREFIX) {
            thread::sleep(SLOW_DELAY);
        }
        match header_value(&head, ECHO_HEADER) {
            Some(echo) => format!(
                "{} {}\r\nok\n{}={} user-agent={} accept={}\n",
                method,
                path,
                ECHO_HEADER,
                echo,
                header_value(&head, "user-agent").unwrap_or("-"),
                header_value(&head, "accept").unwrap_or("-")
            ),
            None => format!("{} {}\r\nok\n", method, path),
        }
    };

    let response = format!(
        "HTTP/1.1 200 OK\r\nContent-Type: text/plain\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
        body.len(),
        body
    );
    if stream.write_all(response.as_bytes()).is_err() {
        return;
    }
    if stream.flush().is_err() {
        return;
    }
    drop(stream.shutdown(Shutdown::Both));
}

fn header_value<'head>(head: &'head str, name: &str) -> Option<&'head str> {
    head.lines().skip(1).find_map(|line| {
        let (key, value) = line.split_once(':')?;
        key.trim()
            .eq_ignore_ascii_case(name)
            .then_some(value.trim())
    })
}

fn stall_body(mut stream: TcpStream) {
    let head = "HTTP/1.1 200 OK\r\nContent-Type: text/plain\r\nContent-Length: 100\r\nConnection: close\r\n\r\nhello";
    if stream.write_all(head.as_bytes()).is_err() || stream.flush().is_err() {
        return;
    }
    thread::sleep(SLOW_DELAY);
    drop(stream.shutdown(Shutdown::Both));
}

/// An OpenAPI 3 document with one templated route, one plain route, a route
/// that needs a request body, and a route with an unsupported parameter.
#[must_use]
pub fn sample_document(servers: &[&str]) -> String {
    let servers: Vec<String> = servers
        .iter()
        .map(|url| format!("{{\"url\": \"{}\"}}", url))
        .collect();
    format!(
        r##"{{
  "openapi": "3.0.0",
  "info": {{ "title": "Sample", "description": "Test API" }},
  "servers": [{}],
  "paths": {{
    "/health": {{ "get": {{}}, "delete": {{}} }},
    "/items/{{id}}": {{
      "get": {{
        "parameters": [
          {{ "name": "id", "in": "path", "required": true, "schema": {{ "type": "integer", "minimum": 1, "maximum": 1000000000 }} }}
        ]
      }}
    }},
    "/upload": {{ "post": {{ "requestBody": {{ "required": true }} }} }},
    "/flags/{{on}}": {{
      "get": {{
        "parameters": [ {{ "name": "on", "in": "path", "required": true, "schema": {{ "type": "boolean" }} }} ]
      }}
    }}
  }}
}}"##,
        servers.join(", ")
    )
}

/// Run the `apiping` binary and capture output.
///
/// # Errors
///
/// Returns an error if the binary cannot be executed.
pub fn run_apiping<I, S>(args: I) -> Result<Output, String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<OsStr>,
{
    let bin = apiping_bin()?;
    Command::new(bin)
        .args(args)
        .env("APIPING_LOG", "error")
        .env_remove("NO_COLOR")
        .output()
        .map_err(|err| format!("run apiping failed: {}", err))
}

fn apiping_bin() -> Result<String, String> {
    option_env!("CARGO_BIN_EXE_apiping").map_or_else(
        || Err("CARGO_BIN_EXE_apiping missing at compile time.".to_owned()),
        |path| Ok(path.to_owned()),
    )
}

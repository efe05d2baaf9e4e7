//! Shared utilities for integration testing.

use std::net::SocketAddr;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

use futures_util::SinkExt;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;
use tokio::sync::mpsc;
use tokio_tungstenite::tungstenite::Message;

/// Commands for the scripted feed server.
#[allow(dead_code)]
pub enum FeedCommand {
    /// Send a text frame to the currently connected client.
    Send(String),
    /// Drop the current connection without a close handshake.
    Drop,
}

/// Start a scripted feed server.
///
/// Each accepted connection consumes commands from the channel until a
/// `Drop` lands; subsequent commands go to the next accepted connection.
/// The returned counter tracks how many connections were accepted.
#[allow(dead_code)]
pub async fn start_feed_server() -> (SocketAddr, mpsc::UnboundedSender<FeedCommand>, Arc<AtomicUsize>) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let (tx, mut rx) = mpsc::unbounded_channel::<FeedCommand>();
    let accepts = Arc::new(AtomicUsize::new(0));
    let accepts_task = Arc::clone(&accepts);

    tokio::spawn(async move {
        loop {
            let Ok((stream, _)) = listener.accept().await else {
                break;
            };
            let Ok(mut ws) = tokio_tungstenite::accept_async(stream).await else {
                continue;
            };
            accepts_task.fetch_add(1, Ordering::SeqCst);

            loop {
                match rx.recv().await {
                    Some(FeedCommand::Send(text)) => {
                        if ws.send(Message::Text(text.into())).await.is_err() {
                            break;
                        }
                    }
                    Some(FeedCommand::Drop) => {
                        // Drop the socket without a close frame, like a
                        // failing transport would.
                        drop(ws);
                        break;
                    }
                    None => return,
                }
            }
        }
    });

    (addr, tx, accepts)
}

/// A POST captured by the mock submission endpoint.
#[allow(dead_code)]
pub struct CapturedRequest {
    /// Request line plus headers, as received.
    pub head: String,
    /// Request body.
    pub body: String,
}

/// Start a mock submission endpoint that captures request bodies and
/// answers every POST with the given status line.
#[allow(dead_code)]
pub async fn start_submit_endpoint(
    status: &'static str,
) -> (SocketAddr, mpsc::UnboundedReceiver<CapturedRequest>) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let (tx, rx) = mpsc::unbounded_channel();

    tokio::spawn(async move {
        loop {
            let Ok((mut socket, _)) = listener.accept().await else {
                break;
            };
            let tx = tx.clone();
            tokio::spawn(async move {
                let mut buf = Vec::new();
                let mut chunk = [0u8; 1024];

                // Read until the end of the headers.
                let (head, mut body) = loop {
                    let Ok(n) = socket.read(&mut chunk).await else {
                        return;
                    };
                    if n == 0 {
                        return;
                    }
                    buf.extend_from_slice(&chunk[..n]);
                    if let Some(end) = find_subsequence(&buf, b"\r\n\r\n") {
                        let head = String::from_utf8_lossy(&buf[..end]).into_owned();
                        let body = buf[end + 4..].to_vec();
                        break (head, body);
                    }
                };

                let content_length = head
                    .lines()
                    .find_map(|line| {
                        let (name, value) = line.split_once(':')?;
                        if name.eq_ignore_ascii_case("content-length") {
                            value.trim().parse::<usize>().ok()
                        } else {
                            None
                        }
                    })
                    .unwrap_or(0);
                while body.len() < content_length {
                    let Ok(n) = socket.read(&mut chunk).await else {
                        return;
                    };
                    if n == 0 {
                        break;
                    }
                    body.extend_from_slice(&chunk[..n]);
                }

                let _ = tx.send(CapturedRequest {
                    head,
                    body: String::from_utf8_lossy(&body).into_owned(),
                });

                let response = format!(
                    "HTTP/1.1 {}\r\nContent-Length: 2\r\nConnection: close\r\n\r\n{{}}",
                    status
                );
                let _ = socket.write_all(response.as_bytes()).await;
                let _ = socket.shutdown().await;
            });
        }
    });

    (addr, rx)
}

#[allow(dead_code)]
fn find_subsequence(haystack: &[u8], needle: &[u8]) -> Option<usize> {
    haystack.windows(needle.len()).position(|w| w == needle)
}

/// Poll `check` every 10ms until it passes or `deadline` elapses.
#[allow(dead_code)]
pub async fn wait_until(deadline: Duration, mut check: impl FnMut() -> bool) -> bool {
    let start = Instant::now();
    while start.elapsed() < deadline {
        if check() {
            return true;
        }
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
    false
}

//! In-memory collaborators shared by unit tests.

use std::sync::Mutex;

use async_trait::async_trait;
use serde_json::Value;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;
use tokio::sync::oneshot;

use crate::chat::{Messenger, OutgoingImage};
use crate::logo::{
    DeliveryError, FallbackApi, FallbackError, LogoRenderer, MakerQuery, PrimaryError,
    RenderedLogo,
};

/// One call made on a [`RecordingMessenger`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Delivery {
    Image {
        jid: String,
        image: OutgoingImage,
        message_id: String,
    },
    Reply {
        jid: String,
        text: String,
    },
    Error {
        jid: String,
        message: String,
        cause: String,
        extra: Option<String>,
    },
}

/// Messenger that records every call.
#[derive(Debug, Default)]
pub struct RecordingMessenger {
    deliveries: Mutex<Vec<Delivery>>,
    fail_images: bool,
    fail_errors: bool,
}

impl RecordingMessenger {
    pub fn new() -> Self {
        Self::default()
    }

    /// A messenger whose image deliveries fail.
    pub fn failing_images() -> Self {
        Self {
            fail_images: true,
            ..Self::default()
        }
    }

    /// A messenger whose image deliveries and error reports fail.
    pub fn failing_all() -> Self {
        Self {
            fail_images: true,
            fail_errors: true,
            ..Self::default()
        }
    }

    pub fn deliveries(&self) -> Vec<Delivery> {
        self.deliveries.lock().unwrap().clone()
    }

    fn record(&self, delivery: Delivery) {
        self.deliveries.lock().unwrap().push(delivery);
    }
}

#[async_trait]
impl Messenger for RecordingMessenger {
    async fn send_image(
        &self,
        jid: &str,
        image: OutgoingImage,
        message_id: &str,
    ) -> Result<(), DeliveryError> {
        if self.fail_images {
            return Err(DeliveryError::send(jid, "image upload rejected"));
        }
        self.record(Delivery::Image {
            jid: jid.to_owned(),
            image,
            message_id: message_id.to_owned(),
        });
        Ok(())
    }

    async fn reply(&self, jid: &str, text: &str) -> Result<(), DeliveryError> {
        self.record(Delivery::Reply {
            jid: jid.to_owned(),
            text: text.to_owned(),
        });
        Ok(())
    }

    async fn report_error(
        &self,
        jid: &str,
        message: &str,
        cause: &str,
        extra: Option<&str>,
    ) -> Result<(), DeliveryError> {
        if self.fail_errors {
            return Err(DeliveryError::Closed);
        }
        self.record(Delivery::Error {
            jid: jid.to_owned(),
            message: message.to_owned(),
            cause: cause.to_owned(),
            extra: extra.map(str::to_owned),
        });
        Ok(())
    }

    fn message_id(&self) -> String {
        "MSG-1".to_owned()
    }
}

type RenderFn = dyn Fn() -> Result<RenderedLogo, PrimaryError> + Send + Sync;

/// Renderer returning a canned outcome and recording its inputs.
pub struct StubRenderer {
    outcome: Box<RenderFn>,
    calls: Mutex<Vec<(String, [String; 2])>>,
}

impl StubRenderer {
    pub fn image(url: &str) -> Self {
        let url = url.to_owned();
        Self::with(move || {
            Ok(RenderedLogo {
                image: Some(url.clone()),
            })
        })
    }

    pub fn failing(reason: &str) -> Self {
        let reason = reason.to_owned();
        Self::with(move || Err(PrimaryError::Render(reason.clone())))
    }

    pub fn with<F>(outcome: F) -> Self
    where
        F: Fn() -> Result<RenderedLogo, PrimaryError> + Send + Sync + 'static,
    {
        Self {
            outcome: Box::new(outcome),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn calls(&self) -> Vec<(String, [String; 2])> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl LogoRenderer for StubRenderer {
    async fn render(
        &self,
        template_url: &str,
        texts: [&str; 2],
    ) -> Result<RenderedLogo, PrimaryError> {
        self.calls.lock().unwrap().push((
            template_url.to_owned(),
            [texts[0].to_owned(), texts[1].to_owned()],
        ));
        (self.outcome)()
    }
}

type MakeFn = dyn Fn() -> Result<Value, FallbackError> + Send + Sync;

/// Fallback API returning a canned outcome and recording its queries.
pub struct StubFallback {
    outcome: Box<MakeFn>,
    queries: Mutex<Vec<[String; 3]>>,
}

impl StubFallback {
    pub fn body(body: Value) -> Self {
        Self::with(move || Ok(body.clone()))
    }

    pub fn with<F>(outcome: F) -> Self
    where
        F: Fn() -> Result<Value, FallbackError> + Send + Sync + 'static,
    {
        Self {
            outcome: Box::new(outcome),
            queries: Mutex::new(Vec::new()),
        }
    }

    pub fn queries(&self) -> Vec<[String; 3]> {
        self.queries.lock().unwrap().clone()
    }
}

#[async_trait]
impl FallbackApi for StubFallback {
    async fn make(&self, query: MakerQuery<'_>) -> Result<Value, FallbackError> {
        self.queries.lock().unwrap().push([
            query.text1.to_owned(),
            query.text2.to_owned(),
            query.url.to_owned(),
        ]);
        (self.outcome)()
    }
}

/// HTTP client that never goes through a proxy, for the local responder.
pub fn local_client() -> reqwest::Client {
    reqwest::Client::builder().no_proxy().build().unwrap()
}

/// Serves one HTTP response and hands back the request line it received.
pub async fn serve_once(status: &str, body: &str) -> (String, oneshot::Receiver<String>) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let response = format!(
        "HTTP/1.1 {status}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
        body.len()
    );
    let (tx, rx) = oneshot::channel();

    tokio::spawn(async move {
        let (mut socket, _) = listener.accept().await.unwrap();
        let mut buf = Vec::new();
        let mut chunk = [0u8; 1024];
        let mut expected = None;
        loop {
            if expected.is_none() {
                expected = request_len(&buf);
            }
            if expected.is_some_and(|len| buf.len() >= len) {
                break;
            }
            let n = socket.read(&mut chunk).await.unwrap();
            if n == 0 {
                break;
            }
            buf.extend_from_slice(&chunk[..n]);
        }
        let request = String::from_utf8_lossy(&buf);
        let line = request.lines().next().unwrap_or_default().to_owned();
        let _ = tx.send(line);
        let _ = socket.write_all(response.as_bytes()).await;
        let _ = socket.shutdown().await;
    });

    (format!("http://{addr}"), rx)
}

/// Total length of a buffered request (head plus body) once its head is complete.
fn request_len(buf: &[u8]) -> Option<usize> {
    let head_end = buf.windows(4).position(|w| w == b"\r\n\r\n")? + 4;
    let head = String::from_utf8_lossy(&buf[..head_end]);
    let body_len = head
        .lines()
        .filter_map(|line| line.split_once(':'))
        .find(|(name, _)| name.trim().eq_ignore_ascii_case("content-length"))
        .and_then(|(_, value)| value.trim().parse::<usize>().ok())
        .unwrap_or(0);
    Some(head_end + body_len)
}

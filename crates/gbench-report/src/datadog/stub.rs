//! Single-request Datadog stand-in for client tests.

use std::net::SocketAddr;
use std::sync::{Arc, Mutex};

use axum::{
    Router,
    extract::State,
    http::{Method, StatusCode, Uri, header},
    response::IntoResponse,
};
use tokio::net::TcpListener;
use tokio::sync::oneshot;

/// What the client actually sent.
#[derive(Debug)]
pub(crate) struct Captured {
    pub method: Method,
    /// Path and query, e.g. `/api/v1/series?api_key=k`.
    pub uri: String,
    pub body: String,
}

impl Captured {
    pub(crate) fn json(&self) -> serde_json::Value {
        serde_json::from_str(&self.body).unwrap()
    }
}

struct Reply {
    status: StatusCode,
    body: String,
    seen: Mutex<Option<oneshot::Sender<Captured>>>,
}

async fn capture(
    State(reply): State<Arc<Reply>>,
    method: Method,
    uri: Uri,
    body: String,
) -> impl IntoResponse {
    if let Some(tx) = reply.seen.lock().unwrap().take() {
        let _ = tx.send(Captured {
            method,
            uri: uri.to_string(),
            body,
        });
    }
    (
        reply.status,
        [(header::CONTENT_TYPE, "application/json")],
        reply.body.clone(),
    )
}

pub(crate) struct StubServer {
    addr: SocketAddr,
    request: oneshot::Receiver<Captured>,
}

impl StubServer {
    /// Answer every route with `status` and `body`; the first request is captured.
    pub(crate) async fn respond(status: u16, body: &str) -> Self {
        let (tx, rx) = oneshot::channel();
        let reply = Arc::new(Reply {
            status: StatusCode::from_u16(status).unwrap(),
            body: body.to_string(),
            seen: Mutex::new(Some(tx)),
        });
        let app = Router::new().fallback(capture).with_state(reply);

        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self { addr, request: rx }
    }

    pub(crate) fn endpoint(&self) -> String {
        format!("http://{}", self.addr)
    }

    pub(crate) async fn request(self) -> Captured {
        self.request.await.unwrap()
    }
}

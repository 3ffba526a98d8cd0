//! An actix-web server answering every request with canned responses, for
//! testing the real `APIClient` without a backend.

use std::collections::VecDeque;
use std::net::TcpListener;
use std::sync::{Arc, Mutex};

use actix_web::{App, HttpRequest, HttpResponse, HttpServer, web};
use payloads::{APIClient, StatusCode};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedRequest {
    pub method: String,
    /// Path and query string, e.g. `/api/room-types?page=1`.
    pub target: String,
    /// Header names are lowercased.
    pub headers: Vec<(String, String)>,
    pub body: String,
}

impl RecordedRequest {
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(key, _)| key == &name.to_ascii_lowercase())
            .map(|(_, value)| value.as_str())
    }

    pub fn path(&self) -> &str {
        self.target.split('?').next().unwrap_or_default()
    }

    pub fn query(&self) -> Option<&str> {
        self.target.split_once('?').map(|(_, query)| query)
    }

    /// The body parsed as JSON.
    pub fn json(&self) -> serde_json::Result<serde_json::Value> {
        serde_json::from_str(&self.body)
    }
}

struct StubResponse {
    status: u16,
    body: String,
}

#[derive(Default)]
struct Shared {
    requests: Mutex<Vec<RecordedRequest>>,
    responses: Mutex<VecDeque<StubResponse>>,
}

pub struct StubServer {
    pub address: String,
    shared: Arc<Shared>,
}

impl StubServer {
    /// Bind an os-assigned port and start serving in the background.
    pub async fn start() -> anyhow::Result<Self> {
        let shared = Arc::new(Shared::default());
        let data = web::Data::from(shared.clone());

        let listener = TcpListener::bind("127.0.0.1:0")?;
        let port = listener.local_addr()?.port();
        let server = HttpServer::new(move || {
            App::new()
                .app_data(data.clone())
                .default_service(web::to(replay))
        })
        .workers(1)
        .listen(listener)?
        .run();
        tokio::spawn(server);

        Ok(Self {
            address: format!("http://127.0.0.1:{port}"),
            shared,
        })
    }

    pub fn client(&self) -> APIClient {
        APIClient::new(self.address.clone())
    }

    /// Queue a response; responses are served in order, one per request.
    pub fn respond(&self, status: StatusCode, body: impl Into<String>) {
        self.shared
            .responses
            .lock()
            .expect("stub server lock poisoned")
            .push_back(StubResponse {
                status: status.as_u16(),
                body: body.into(),
            });
    }

    pub fn respond_json(&self, status: StatusCode, body: serde_json::Value) {
        self.respond(status, body.to_string());
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.shared
            .requests
            .lock()
            .expect("stub server lock poisoned")
            .clone()
    }

    pub fn last_request(&self) -> Option<RecordedRequest> {
        self.requests().pop()
    }
}

/// Catch-all handler: record the request, then serve the next queued
/// response, or a 404 with a detail when nothing is queued.
async fn replay(
    req: HttpRequest,
    body: web::Bytes,
    shared: web::Data<Shared>,
) -> HttpResponse {
    let target = match req.query_string() {
        "" => req.path().to_string(),
        query => format!("{}?{query}", req.path()),
    };
    tracing::debug!(method = %req.method(), %target, "Stub server request");

    let headers: Vec<(String, String)> = req
        .headers()
        .iter()
        .map(|(name, value)| {
            (
                name.as_str().to_ascii_lowercase(),
                value.to_str().unwrap_or_default().to_string(),
            )
        })
        .collect();
    shared
        .requests
        .lock()
        .expect("stub server lock poisoned")
        .push(RecordedRequest {
            method: req.method().as_str().to_string(),
            target,
            headers,
            body: String::from_utf8_lossy(&body).into_owned(),
        });

    let response = shared
        .responses
        .lock()
        .expect("stub server lock poisoned")
        .pop_front()
        .unwrap_or_else(|| StubResponse {
            status: 404,
            body: r#"{"detail": "No stub response queued"}"#.into(),
        });

    let status = actix_web::http::StatusCode::from_u16(response.status)
        .unwrap_or(actix_web::http::StatusCode::INTERNAL_SERVER_ERROR);
    HttpResponse::build(status)
        .content_type("application/json")
        .body(response.body)
}

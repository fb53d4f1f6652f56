#![allow(dead_code)]

use std::net::SocketAddr;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{Method, Request, Response, StatusCode};
use axum::Router;
use serde_json::{json, Value};
use tokio_util::sync::CancellationToken;
use tower::ServiceExt;

use roomviz::api::routes::{router, AppState};
use roomviz::gateway::{GatewayError, GeneratedImage, ImageGateway};
use roomviz::room::{OutputSize, RoomValidator, ValidationPolicy};

/// What the fake provider does when asked for an image.
#[derive(Clone)]
pub enum Outcome {
    Image(Vec<u8>),
    Empty,
    Provider(u16, String),
    /// Never answers; only returns once cancelled.
    Hang,
}

pub struct FakeGateway {
    outcome: Outcome,
    pub calls: AtomicUsize,
    pub prompts: Mutex<Vec<String>>,
    pub sizes: Mutex<Vec<OutputSize>>,
    pub saw_cancel: AtomicBool,
}

impl FakeGateway {
    pub fn new(outcome: Outcome) -> Arc<Self> {
        Arc::new(FakeGateway {
            outcome,
            calls: AtomicUsize::new(0),
            prompts: Mutex::new(Vec::new()),
            sizes: Mutex::new(Vec::new()),
            saw_cancel: AtomicBool::new(false),
        })
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ImageGateway for FakeGateway {
    async fn generate(
        &self,
        prompt: &str,
        size: OutputSize,
        cancel: &CancellationToken,
    ) -> Result<GeneratedImage, GatewayError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.prompts.lock().unwrap().push(prompt.to_string());
        self.sizes.lock().unwrap().push(size);
        match &self.outcome {
            Outcome::Image(bytes) => Ok(GeneratedImage::png(bytes.clone())),
            Outcome::Empty => Err(GatewayError::EmptyPayload),
            Outcome::Provider(status, message) => {
                Err(GatewayError::Provider { status: *status, message: message.clone() })
            }
            Outcome::Hang => {
                cancel.cancelled().await;
                self.saw_cancel.store(true, Ordering::SeqCst);
                Err(GatewayError::Cancelled)
            }
        }
    }
}

pub fn build_test_app(gateway: Arc<dyn ImageGateway>) -> Router {
    build_test_app_with_policy(gateway, ValidationPolicy::default())
}

pub fn build_test_app_with_policy(gateway: Arc<dyn ImageGateway>, policy: ValidationPolicy) -> Router {
    router(Arc::new(AppState { gateway, validator: RoomValidator::new(policy) }))
}

/// The example room used throughout: 3000 × 3000 mm, blue walls.
pub fn scenario_a() -> Value {
    json!({
        "wallFinish": "Blue walls",
        "doorOffsetMm": 100,
        "doorSwing": "inward-right",
        "ceilingHeightMm": 2500,
        "roomWidthMm": 3000,
        "roomDepthMm": 3000,
        "style": "modern",
        "outputSize": "1536x1024"
    })
}

pub async fn post_raw(app: Router, uri: &str, body: impl Into<Body>) -> Response<axum::body::BoxBody> {
    let request = Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header("content-type", "application/json")
        .body(body.into())
        .unwrap();
    app.oneshot(request).await.unwrap()
}

pub async fn post_json(app: Router, uri: &str, body: &Value) -> Response<axum::body::BoxBody> {
    post_raw(app, uri, body.to_string()).await
}

pub async fn get(app: Router, uri: &str) -> Response<axum::body::BoxBody> {
    let request = Request::builder().uri(uri).body(Body::empty()).unwrap();
    app.oneshot(request).await.unwrap()
}

pub async fn body_bytes(response: Response<axum::body::BoxBody>) -> Vec<u8> {
    hyper::body::to_bytes(response.into_body()).await.unwrap().to_vec()
}

pub async fn body_json(response: Response<axum::body::BoxBody>) -> Value {
    serde_json::from_slice(&body_bytes(response).await).unwrap()
}

pub async fn expect_status(response: Response<axum::body::BoxBody>, status: StatusCode) -> Value {
    assert_eq!(response.status(), status);
    body_json(response).await
}

/// Serve `app` on an ephemeral local port and return its address.
pub fn spawn_server(app: Router) -> SocketAddr {
    let server = axum::Server::bind(&SocketAddr::from(([127, 0, 0, 1], 0))).serve(app.into_make_service());
    let addr = server.local_addr();
    tokio::spawn(server);
    addr
}

/// A local address with nothing listening on it.
pub fn closed_port() -> SocketAddr {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    addr
}

pub async fn wait_for(flag: &AtomicBool) -> bool {
    for _ in 0..100 {
        if flag.load(Ordering::SeqCst) {
            return true;
        }
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
    false
}

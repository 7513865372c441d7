//! Read-only HTTP view of the snapshot.
//!
//! The snapshot is read once at start-up; a running server does not see later
//! crawls until it is restarted.

use crate::domain::{EventMap, EventStore, Storage};
use crate::error::{HarvestError, Result};
use axum::body::Bytes;
use axum::extract::State;
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::routing::get;
use axum::Router;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;
use tracing::info;

#[derive(Clone)]
pub struct AppState {
    body: Bytes,
}

impl AppState {
    pub fn new(events: &EventMap) -> Result<Self> {
        let body = serde_json::to_vec(events)?;
        Ok(Self {
            body: Bytes::from(body),
        })
    }
}

pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/api", get(get_events))
        .with_state(state)
        .layer(TraceLayer::new_for_http())
}

/// The whole matches-by-event snapshot as one JSON object.
pub async fn get_events(State(state): State<AppState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "application/json")],
        state.body,
    )
}

pub struct ApiServer {
    listen_addr: String,
    storage: Arc<dyn Storage>,
}

impl ApiServer {
    pub fn new(listen_addr: impl Into<String>, storage: Arc<dyn Storage>) -> Self {
        Self {
            listen_addr: listen_addr.into(),
            storage,
        }
    }

    pub async fn run(&self) -> Result<()> {
        let addr: SocketAddr = self
            .listen_addr
            .parse()
            .map_err(|e| HarvestError::Parse(format!("Invalid listen address {}: {}", self.listen_addr, e)))?;

        let store = EventStore::load(self.storage.as_ref());
        let app = create_router(AppState::new(store.events())?);

        let listener = TcpListener::bind(&addr).await?;
        info!("Serving {} matches on http://{}/api", store.len(), addr);

        axum::serve(listener, app)
            .with_graceful_shutdown(async {
                let _ = tokio::signal::ctrl_c().await;
                info!("API server shutting down");
            })
            .await?;

        Ok(())
    }
}

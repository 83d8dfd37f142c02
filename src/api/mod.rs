//! HTTP surface: routes, middleware stack and server loop.

use crate::guard;
use anyhow::Result;
use axum::{
    Extension, Router,
    body::Body,
    http::{HeaderName, HeaderValue, Request},
    middleware,
    routing::options,
};
use std::{path::Path, sync::Arc};
use tokio::net::TcpListener;
use tower::ServiceBuilder;
use tower_http::{
    request_id::PropagateRequestIdLayer,
    services::{ServeDir, ServeFile},
    set_header::SetRequestHeaderLayer,
    trace::TraceLayer,
};
use tracing::{Span, debug_span, info, warn};
use ulid::Ulid;

pub mod handlers;
mod openapi;
pub mod state;

pub use openapi::openapi;
use handlers::health;
use state::AuthState;

/// Assemble the gateway.
///
/// Documented routes come from the `OpenAPI` router; everything else falls
/// through to the static bundle in `static_dir`, with `index.html` answering
/// client-side routes. The route guard wraps both.
pub fn app(auth_state: Arc<AuthState>, static_dir: &Path) -> Router {
    let (router, _openapi) = openapi::api_router().split_for_parts();

    router
        .route("/health", options(health::health))
        .fallback_service(
            ServeDir::new(static_dir).fallback(ServeFile::new(static_dir.join("index.html"))),
        )
        .layer(middleware::from_fn(guard::guard))
        .layer(
            ServiceBuilder::new()
                .layer(SetRequestHeaderLayer::if_not_present(
                    HeaderName::from_static("x-request-id"),
                    |_req: &_| HeaderValue::from_str(Ulid::new().to_string().as_str()).ok(),
                ))
                .layer(PropagateRequestIdLayer::new(HeaderName::from_static(
                    "x-request-id",
                )))
                .layer(TraceLayer::new_for_http().make_span_with(make_span))
                .layer(Extension(auth_state)),
        )
}

/// Bind `port` on all interfaces and serve until SIGINT or SIGTERM.
///
/// # Errors
/// Returns an error if the listener cannot be bound or the server fails
pub async fn new(port: u16, auth_state: Arc<AuthState>, static_dir: &Path) -> Result<()> {
    let app = app(auth_state, static_dir);

    let listener = TcpListener::bind(format!("::0:{port}")).await?;

    info!("Listening on [::]:{}", port);

    axum::serve(listener, app.into_make_service())
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = tokio::signal::ctrl_c().await {
            warn!("Failed to listen for SIGINT: {err}");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(err) => {
                warn!("Failed to listen for SIGTERM: {err}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }

    info!("Gracefully shutdown");
}

// span
fn make_span(request: &Request<Body>) -> Span {
    let headers = request.headers();
    let path = request.uri().path();
    let request_id = headers
        .get("x-request-id")
        .and_then(|val| val.to_str().ok())
        .unwrap_or("none");

    debug_span!(
        "http-request",
        method = %request.method(),
        path,
        ?headers,
        request_id
    )
}

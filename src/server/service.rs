//! HTTP service implementation.

use std::future::Future;
use std::sync::Arc;

use axum::extract::rejection::FormRejection;
use axum::extract::{DefaultBodyLimit, State};
use axum::response::Html;
use axum::routing::{get, post};
use axum::{Form, Json, Router};
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

use super::config::LimitsConfig;
use super::page;
use crate::types::HealthStatus;
use crate::{LustreError, PricingGateway, Result};

/// Build the router: `GET /`, `POST /predict`, `GET /health`.
pub fn router(gateway: Arc<PricingGateway>, limits: &LimitsConfig) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/predict", post(predict))
        .route("/health", get(health))
        .layer(DefaultBodyLimit::max(limits.max_body_bytes))
        .layer(TraceLayer::new_for_http())
        .with_state(gateway)
}

/// Serve `app` on `listener` until `shutdown` resolves.
pub async fn serve<F>(listener: TcpListener, app: Router, shutdown: F) -> Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    let addr = listener
        .local_addr()
        .map_err(|e| LustreError::Http(format!("listener has no local address: {e}")))?;
    info!(%addr, "serving");
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown)
        .await
        .map_err(|e| LustreError::Http(format!("server error: {e}")))
}

async fn index() -> Html<&'static str> {
    Html(page::index())
}

/// Always answers `200 OK` with plain text, whatever went wrong.
async fn predict(
    State(gateway): State<Arc<PricingGateway>>,
    form: std::result::Result<Form<Vec<(String, String)>>, FormRejection>,
) -> String {
    match form {
        Ok(Form(pairs)) => gateway.respond_pairs(&pairs),
        Err(rejection) => {
            let e = LustreError::MalformedForm(rejection.body_text());
            warn!(error = %e, "unusable prediction form");
            e.response_text()
        }
    }
}

async fn health(State(gateway): State<Arc<PricingGateway>>) -> Json<HealthStatus> {
    Json(HealthStatus {
        status: "ok".to_string(),
        version: crate::version_string(),
        scaler: gateway.scaler_name().to_string(),
        model: gateway.regressor_name().to_string(),
    })
}

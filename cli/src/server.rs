#[cfg(feature = "server")]
pub mod http {
    use crate::report::{DiagnoseResponse, RulesResponse};
    use axum::{
        body::Bytes,
        extract::{Path, State},
        http::StatusCode,
        response::{IntoResponse, Json},
        routing::{get, post},
        Router,
    };
    use serde::Serialize;
    use std::net::SocketAddr;
    use std::sync::Arc;
    use tower_http::cors::CorsLayer;
    use tower_http::limit::RequestBodyLimitLayer;
    use tower_http::trace::TraceLayer;
    use tracing::{error, info};
    use triage::{Engine, ResourceLimits, Rule, TriageError};

    #[derive(Clone)]
    struct AppState {
        engine: Arc<Engine>,
        limits: Arc<ResourceLimits>,
    }

    #[derive(Debug, Serialize)]
    struct ErrorResponse {
        error: String,
    }

    type ApiError = (StatusCode, Json<ErrorResponse>);

    pub async fn start_server(
        engine: Engine,
        limits: ResourceLimits,
        host: &str,
        port: u16,
    ) -> anyhow::Result<()> {
        tracing_subscriber::fmt()
            .with_env_filter(
                tracing_subscriber::EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| "triage=info,tower_http=info".into()),
            )
            .init();

        let app = router(engine, limits);

        let addr: SocketAddr = format!("{}:{}", host, port).parse()?;
        info!("Triage server listening on {}", addr);

        let listener = tokio::net::TcpListener::bind(addr).await?;
        axum::serve(listener, app).await?;

        Ok(())
    }

    pub fn router(engine: Engine, limits: ResourceLimits) -> Router {
        let body_limit = limits.max_request_bytes;
        let state = AppState {
            engine: Arc::new(engine),
            limits: Arc::new(limits),
        };

        Router::new()
            .route("/health", get(health_check))
            .route("/diagnose", post(diagnose))
            .route("/rules", get(list_rules))
            .route("/rules/:rule_id", get(show_rule))
            .layer(RequestBodyLimitLayer::new(body_limit))
            .layer(TraceLayer::new_for_http())
            .layer(CorsLayer::permissive())
            .with_state(state)
    }

    async fn health_check(State(state): State<AppState>) -> impl IntoResponse {
        Json(serde_json::json!({
            "status": "ok",
            "service": "triage",
            "version": env!("CARGO_PKG_VERSION"),
            "rules": state.engine.catalog().len()
        }))
    }

    async fn diagnose(
        State(state): State<AppState>,
        body: Bytes,
    ) -> Result<Json<DiagnoseResponse>, ApiError> {
        let facts = triage::facts_from_json(&body, &state.limits).map_err(|e| {
            error!("Rejected facts: {}", e);
            let status = match &e {
                TriageError::ResourceLimitExceeded { .. } => StatusCode::PAYLOAD_TOO_LARGE,
                _ => StatusCode::BAD_REQUEST,
            };
            (
                status,
                Json(ErrorResponse {
                    error: format!("Invalid facts: {}", e),
                }),
            )
        })?;

        let result = state.engine.infer(&facts);
        info!(
            "Diagnosed {} fact(s) with {} match(es)",
            facts.len(),
            result.len()
        );

        Ok(Json(DiagnoseResponse::new(result)))
    }

    async fn list_rules(State(state): State<AppState>) -> Json<RulesResponse> {
        Json(RulesResponse {
            rules: state.engine.describe_rules(),
        })
    }

    async fn show_rule(
        State(state): State<AppState>,
        Path(rule_id): Path<String>,
    ) -> Result<Json<Rule>, ApiError> {
        state
            .engine
            .catalog()
            .get(&rule_id)
            .cloned()
            .map(Json)
            .ok_or_else(|| {
                (
                    StatusCode::NOT_FOUND,
                    Json(ErrorResponse {
                        error: format!("Rule '{}' not found", rule_id),
                    }),
                )
            })
    }

}

#[cfg(not(feature = "server"))]
pub mod http {
    pub async fn start_server(
        _engine: triage::Engine,
        _limits: triage::ResourceLimits,
        _host: &str,
        _port: u16,
    ) -> anyhow::Result<()> {
        anyhow::bail!("Server feature not enabled. Recompile with --features server")
    }
}
